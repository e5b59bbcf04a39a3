//! Error types for `cardbase-catalog`.
//!
//! Normalization defects and token misses are not errors; they are logged
//! and the build carries on. Only a failing input or a failing render stops
//! a run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("source error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn from_source<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Source(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
