//! The Gatehouse box office: ticket issuance, usage tracking, and the
//! in-memory ticket registry, generic over any
//! [`TicketStore`](gatehouse_core::store::TicketStore) backend.

mod office;

pub mod error;

pub use error::{Error, Result};
pub use office::BoxOffice;
