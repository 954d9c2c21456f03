//! Error types for `gatehouse-core`.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("ticket not found: {0}")]
  TicketNotFound(Uuid),

  #[error("ticket {0} is already used")]
  AlreadyUsed(Uuid),

  #[error("season tickets cannot carry the basic category")]
  BasicSeasonCategory,

  #[error("season validity window is empty: {from} .. {until}")]
  EmptyValidityWindow {
    from:  DateTime<Utc>,
    until: DateTime<Utc>,
  },

  #[error("generated code {0} collides with an existing ticket")]
  CodeCollision(Uuid),

  #[error("unknown ticket kind discriminant: {0:?}")]
  UnknownTicketKind(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
