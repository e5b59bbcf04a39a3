//! Error types for `cardbase-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("malformed feed: {0}")]
  MalformedFeed(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
