//! [`SqliteSink`] — the SQLite implementation of [`CatalogSink`].

use std::path::Path;

use cardbase_core::sink::{Artifact, CatalogSink};
use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{decode_dt, digest, encode_dt},
  schema::SCHEMA,
};

/// One artifact as last published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
  pub name:       String,
  pub body:       String,
  pub digest:     String,
  pub written_at: DateTime<Utc>,
}

// ─── Sink ────────────────────────────────────────────────────────────────────

/// Catalog artifacts stored in a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteSink {
  conn: tokio_rusqlite::Connection,
}

impl SqliteSink {
  /// Open (or create) a database at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let sink = Self { conn };
    sink.init_schema().await?;
    Ok(sink)
  }

  /// Open an in-memory database; useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let sink = Self { conn };
    sink.init_schema().await?;
    Ok(sink)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The last published version of `artifact`, if any. The body is checked
  /// against its stored digest.
  pub async fn read_artifact(&self, artifact: Artifact) -> Result<Option<StoredArtifact>> {
    let name = artifact.name().to_owned();

    let row: Option<(String, String, String, String)> = self
      .conn
      .call(move |conn| {
        let row = conn
          .query_row(
            "SELECT name, body, digest, written_at FROM artifacts WHERE name = ?1",
            rusqlite::params![name],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
          )
          .optional()?;
        Ok(row)
      })
      .await?;

    let Some((name, body, stored_digest, written_at)) = row else {
      return Ok(None);
    };
    if digest(&body) != stored_digest {
      return Err(Error::DigestMismatch(name));
    }
    Ok(Some(StoredArtifact {
      name,
      body,
      digest: stored_digest,
      written_at: decode_dt(&written_at)?,
    }))
  }

  /// Names of every stored artifact, sorted.
  pub async fn artifact_names(&self) -> Result<Vec<String>> {
    let names = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT name FROM artifacts ORDER BY name")?;
        let names = stmt
          .query_map([], |r| r.get::<_, String>(0))?
          .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
      })
      .await?;
    Ok(names)
  }
}

// ─── CatalogSink impl ────────────────────────────────────────────────────────

impl CatalogSink for SqliteSink {
  type Error = Error;

  async fn write_artifact(&self, artifact: Artifact, body: String) -> Result<()> {
    let name = artifact.name().to_owned();
    let body_digest = digest(&body);
    let at_str = encode_dt(Utc::now());
    let bytes = body.len();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO artifacts (name, body, digest, written_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (name) DO UPDATE SET
             body       = excluded.body,
             digest     = excluded.digest,
             written_at = excluded.written_at",
          rusqlite::params![name, body, body_digest, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(%artifact, bytes, "stored artifact");
    Ok(())
  }
}
