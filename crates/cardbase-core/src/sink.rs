//! The `CatalogSink` trait and the set of named artifacts a finished catalog
//! is published as.
//!
//! The trait is implemented by persistence backends (e.g.
//! `cardbase-store-sqlite`). The catalog builder never depends on a concrete
//! backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

// ─── Artifacts ───────────────────────────────────────────────────────────────

/// One independently serialisable view of the finished catalog.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  IntoStaticStr,
)]
pub enum Artifact {
  /// Sorted, deduplicated normalized names.
  #[strum(serialize = "names")]
  Names,
  /// Prefix tree over the normalized names.
  #[strum(serialize = "cardtree")]
  CardTree,
  /// Id → card record.
  #[strum(serialize = "carddict")]
  CardDict,
  /// Normalized name → ids, default printing first.
  #[strum(serialize = "nameToId")]
  NameToId,
  /// Oracle id → ids.
  #[strum(serialize = "oracleToId")]
  OracleToId,
  /// Non-English id → English id.
  #[strum(serialize = "english")]
  English,
  /// Prefix tree over the normalized full names.
  #[strum(serialize = "full_names")]
  FullNames,
  /// Normalized full name → art descriptor.
  #[strum(serialize = "imagedict")]
  ImageDict,
  /// Normalized name → display images.
  #[strum(serialize = "cardimages")]
  CardImages,
}

impl Artifact {
  pub fn name(self) -> &'static str { self.into() }

  pub fn file_name(self) -> String { format!("{}.json", self.name()) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a destination for published catalog artifacts.
///
/// Each artifact arrives already rendered. Writes for different artifacts
/// may run concurrently; a backend must tolerate that.
pub trait CatalogSink: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `body` under the artifact's name, replacing any previous
  /// version.
  fn write_artifact(
    &self,
    artifact: Artifact,
    body: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn nine_distinct_file_names() {
    let mut names: Vec<String> = Artifact::iter().map(Artifact::file_name).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 9);
    assert!(names.contains(&"nameToId.json".to_owned()));
    assert_eq!(Artifact::FullNames.to_string(), "full_names");
  }
}
