//! Error type for `cardbase-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored body no longer matches the digest recorded with it.
  #[error("artifact {0} failed its digest check")]
  DigestMismatch(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
