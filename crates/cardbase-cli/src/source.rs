//! [`JsonFileSource`] — feeds read lazily from local JSON array files.

use std::{
  fs::File,
  io::BufReader,
  path::{Path, PathBuf},
};

use cardbase_core::{
  feed::{CardSource, JsonArrayStream},
  raw::{History, Rating, RawPrinting},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::BuildConfig;

#[derive(Debug, Error)]
pub enum SourceError {
  #[error("failed to open {path}: {source}")]
  Open {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("bad feed {path}: {source}")]
  Feed {
    path:   PathBuf,
    source: cardbase_core::Error,
  },
}

/// The two printing feeds are required; a missing ratings or histories
/// file reads as an empty list.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
  default_cards: PathBuf,
  all_cards:     PathBuf,
  ratings:       Option<PathBuf>,
  histories:     Option<PathBuf>,
}

impl JsonFileSource {
  pub fn new(config: &BuildConfig) -> Self {
    Self {
      default_cards: config.default_cards.clone(),
      all_cards:     config.all_cards.clone(),
      ratings:       config.ratings.clone(),
      histories:     config.histories.clone(),
    }
  }
}

fn open_stream<T: DeserializeOwned>(
  path: &Path,
) -> Result<impl Iterator<Item = Result<T, SourceError>>, SourceError> {
  let file = File::open(path).map_err(|source| SourceError::Open {
    path: path.to_owned(),
    source,
  })?;
  tracing::info!(path = %path.display(), "reading feed");

  let path = path.to_owned();
  Ok(JsonArrayStream::new(BufReader::new(file)).map(move |element| {
    element.map_err(|source| SourceError::Feed {
      path: path.clone(),
      source,
    })
  }))
}

fn open_optional<T: DeserializeOwned>(
  path: Option<&Path>,
) -> Result<impl Iterator<Item = Result<T, SourceError>>, SourceError> {
  let stream = path.map(open_stream).transpose()?;
  Ok(stream.into_iter().flatten())
}

impl CardSource for JsonFileSource {
  type Error = SourceError;

  fn english_printings(
    &self,
  ) -> Result<impl Iterator<Item = Result<RawPrinting, Self::Error>> + '_, Self::Error> {
    open_stream(&self.default_cards)
  }

  fn all_printings(
    &self,
  ) -> Result<impl Iterator<Item = Result<RawPrinting, Self::Error>> + '_, Self::Error> {
    open_stream(&self.all_cards)
  }

  fn ratings(
    &self,
  ) -> Result<impl Iterator<Item = Result<Rating, Self::Error>> + '_, Self::Error> {
    open_optional(self.ratings.as_deref())
  }

  fn histories(
    &self,
  ) -> Result<impl Iterator<Item = Result<History, Self::Error>> + '_, Self::Error> {
    open_optional(self.histories.as_deref())
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use crate::config::OutputFormat;

  fn source(dir: &Path, ratings: Option<&str>) -> JsonFileSource {
    JsonFileSource::new(&BuildConfig {
      default_cards: dir.join("default.json"),
      all_cards:     dir.join("all.json"),
      ratings:       ratings.map(|r| dir.join(r)),
      histories:     None,
      output:        dir.join("out"),
      format:        OutputFormat::Json,
    })
  }

  #[test]
  fn streams_printings_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
      dir.path().join("default.json"),
      r#"[{"id":"a","name":"Opt","set":"xln","collector_number":"65"}]"#,
    )
    .unwrap();

    let printings: Vec<RawPrinting> = source(dir.path(), None)
      .english_printings()
      .unwrap()
      .collect::<Result<_, _>>()
      .unwrap();
    assert_eq!(printings.len(), 1);
    assert_eq!(printings[0].name, "Opt");
  }

  #[test]
  fn unconfigured_lists_are_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(source(dir.path(), None).ratings().unwrap().count(), 0);
    assert_eq!(source(dir.path(), None).histories().unwrap().count(), 0);
  }

  #[test]
  fn missing_files_and_bad_json_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(dir.path(), Some("ratings.json"));
    assert!(matches!(src.all_printings(), Err(SourceError::Open { .. })));
    assert!(matches!(src.ratings(), Err(SourceError::Open { .. })));

    fs::write(dir.path().join("all.json"), "[{\"id\": 1}]").unwrap();
    let first = src.all_printings().unwrap().next().unwrap();
    assert!(matches!(first, Err(SourceError::Feed { .. })));
  }
}
