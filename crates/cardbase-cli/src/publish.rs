//! Rendering and writing every artifact of a finished catalog.
//!
//! Each artifact is rendered on the blocking pool and written as its own
//! task. The first failure aborts the remaining tasks.

use std::sync::Arc;

use anyhow::Context as _;
use cardbase_catalog::Catalog;
use cardbase_core::sink::{Artifact, CatalogSink};
use strum::IntoEnumIterator as _;
use tokio::task::JoinSet;

/// Publish all artifacts to `sink`. Returns how many were written.
pub async fn publish<S>(catalog: Arc<Catalog>, sink: Arc<S>) -> anyhow::Result<usize>
where
  S: CatalogSink + 'static,
{
  let mut tasks = JoinSet::new();
  for artifact in Artifact::iter() {
    let catalog = Arc::clone(&catalog);
    let sink = Arc::clone(&sink);
    tasks.spawn(async move {
      let body = tokio::task::spawn_blocking(move || catalog.render(artifact))
        .await
        .context("render task panicked")?
        .with_context(|| format!("failed to render {artifact}"))?;
      sink
        .write_artifact(artifact, body)
        .await
        .with_context(|| format!("failed to write {artifact}"))?;
      anyhow::Ok(artifact)
    });
  }

  let mut written = 0;
  while let Some(joined) = tasks.join_next().await {
    let artifact = joined.context("publish task panicked")??;
    tracing::debug!(%artifact, "published");
    written += 1;
  }

  tracing::info!(artifacts = written, "catalog published");
  Ok(written)
}

#[cfg(test)]
mod tests {
  use std::io;

  use cardbase_catalog::{CatalogBuilder, PopularityIndex};
  use cardbase_core::raw::RawPrinting;

  use super::*;
  use crate::sink_dir::DirectorySink;

  fn catalog() -> Arc<Catalog> {
    let raw: RawPrinting = serde_json::from_value(serde_json::json!({
      "id": "opt-1",
      "oracle_id": "oracle-opt",
      "name": "Opt",
      "layout": "normal",
      "type_line": "Instant",
      "set": "xln",
      "collector_number": "65"
    }))
    .unwrap();
    let mut builder = CatalogBuilder::new(PopularityIndex::new());
    builder.ingest(&raw);
    Arc::new(builder.finish_english().finish().0)
  }

  #[tokio::test]
  async fn writes_all_nine_files() {
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(DirectorySink::create(dir.path()).await.unwrap());

    assert_eq!(publish(catalog(), Arc::clone(&sink)).await.unwrap(), 9);

    for artifact in Artifact::iter() {
      let body = std::fs::read_to_string(sink.path_of(artifact)).unwrap();
      serde_json::from_str::<serde_json::Value>(&body).unwrap();
    }
    let names = std::fs::read_to_string(sink.path_of(Artifact::Names)).unwrap();
    assert_eq!(names, "[\"opt\"]");
  }

  struct FailingSink;

  impl CatalogSink for FailingSink {
    type Error = io::Error;

    async fn write_artifact(&self, artifact: Artifact, _body: String) -> io::Result<()> {
      if artifact == Artifact::English {
        return Err(io::Error::other("disk full"));
      }
      Ok(())
    }
  }

  #[tokio::test]
  async fn first_failure_is_surfaced() {
    let err = publish(catalog(), Arc::new(FailingSink)).await.unwrap_err();
    assert!(format!("{err:#}").contains("failed to write english"));
  }
}
