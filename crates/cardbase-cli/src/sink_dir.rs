//! [`DirectorySink`] — one JSON file per artifact.

use std::{
  io,
  path::{Path, PathBuf},
};

use cardbase_core::sink::{Artifact, CatalogSink};

/// Writes `<root>/<artifact>.json`, replacing each file atomically.
#[derive(Debug, Clone)]
pub struct DirectorySink {
  root: PathBuf,
}

impl DirectorySink {
  /// Create `root` (and parents) if needed.
  pub async fn create(root: impl AsRef<Path>) -> io::Result<Self> {
    let root = root.as_ref().to_path_buf();
    tokio::fs::create_dir_all(&root).await?;
    Ok(Self { root })
  }

  pub fn path_of(&self, artifact: Artifact) -> PathBuf {
    self.root.join(artifact.file_name())
  }
}

impl CatalogSink for DirectorySink {
  type Error = io::Error;

  /// Stages the body in a hidden sibling, then renames it over the target.
  async fn write_artifact(&self, artifact: Artifact, body: String) -> io::Result<()> {
    let target = self.path_of(artifact);
    let staging = self.root.join(format!(".{}.tmp", artifact.file_name()));

    tokio::fs::write(&staging, body.as_bytes()).await?;
    tokio::fs::rename(&staging, &target).await?;

    tracing::debug!(path = %target.display(), bytes = body.len(), "wrote artifact");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn writes_and_replaces_files() {
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::create(dir.path().join("nested/out")).await.unwrap();

    sink.write_artifact(Artifact::Names, "[]".into()).await.unwrap();
    sink
      .write_artifact(Artifact::Names, "[\"opt\"]".into())
      .await
      .unwrap();

    let path = sink.path_of(Artifact::Names);
    assert!(path.ends_with("names.json"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[\"opt\"]");

    // no staging files left behind
    let entries: Vec<_> = std::fs::read_dir(dir.path().join("nested/out"))
      .unwrap()
      .map(|e| e.unwrap().file_name())
      .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("names.json")]);
  }
}
