//! The `TicketStore` trait — the persistence collaborator.
//!
//! Implemented by storage backends (e.g. `gatehouse-store-sqlite`). The
//! box office depends on this abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes.

use std::future::Future;

use crate::ticket::Ticket;

/// Abstraction over a ticket persistence backend.
///
/// The persisted record carries the full logical ticket — code, kind tag,
/// issuance timestamp, final price, buyer id/name, employee-discount flag,
/// state, and the kind-specific fields — and must round-trip losslessly:
/// a saved ticket reloads identical.
pub trait TicketStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a ticket, replacing any previous record with the same code.
  /// Called at issuance and again after usage marking.
  fn save(
    &self,
    ticket: &Ticket,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;

  /// Load every persisted ticket.
  fn load_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Ticket>, Self::Error>> + Send + '_;
}
