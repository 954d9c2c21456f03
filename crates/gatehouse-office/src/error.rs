//! Error type for `gatehouse-office`.

use thiserror::Error;

/// An error returned by a box office operation.
#[derive(Debug, Error)]
pub enum Error {
  /// Validation or registry failure from the domain core.
  #[error("core error: {0}")]
  Core(#[from] gatehouse_core::Error),

  /// The persistence collaborator failed.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
