//! Build configuration: TOML file, then `CARDBASE_*` environment variables,
//! then command-line flags, each layer overriding the last.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Where published artifacts go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// One `<artifact>.json` file per artifact in the output directory.
  #[default]
  Json,
  /// One row per artifact in the SQLite database at the output path.
  Sqlite,
}

impl OutputFormat {
  fn as_str(self) -> &'static str {
    match self {
      Self::Json => "json",
      Self::Sqlite => "sqlite",
    }
  }
}

/// Resolved settings for one build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildConfig {
  /// English-only default feed.
  pub default_cards: PathBuf,
  /// All-languages feed.
  pub all_cards:     PathBuf,
  #[serde(default)]
  pub ratings:       Option<PathBuf>,
  #[serde(default)]
  pub histories:     Option<PathBuf>,
  pub output:        PathBuf,
  #[serde(default)]
  pub format:        OutputFormat,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub default_cards: Option<PathBuf>,
  pub all_cards:     Option<PathBuf>,
  pub ratings:       Option<PathBuf>,
  pub histories:     Option<PathBuf>,
  pub output:        Option<PathBuf>,
  pub format:        Option<OutputFormat>,
}

fn path_value(path: Option<&PathBuf>) -> Option<String> {
  path.map(|p| p.to_string_lossy().into_owned())
}

impl BuildConfig {
  pub fn load(file: &Path, overrides: &Overrides) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("CARDBASE"))
      .set_override_option("default_cards", path_value(overrides.default_cards.as_ref()))?
      .set_override_option("all_cards", path_value(overrides.all_cards.as_ref()))?
      .set_override_option("ratings", path_value(overrides.ratings.as_ref()))?
      .set_override_option("histories", path_value(overrides.histories.as_ref()))?
      .set_override_option("output", path_value(overrides.output.as_ref()))?
      .set_override_option("format", overrides.format.map(OutputFormat::as_str))?
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise build configuration")
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
      .suffix(".toml")
      .tempfile()
      .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn reads_the_file() {
    let file = toml_file(
      r#"
      default_cards = "feeds/default.json"
      all_cards = "feeds/all.json"
      ratings = "feeds/ratings.json"
      output = "out"
      format = "sqlite"
      "#,
    );
    let cfg = BuildConfig::load(file.path(), &Overrides::default()).unwrap();
    assert_eq!(cfg.default_cards, PathBuf::from("feeds/default.json"));
    assert_eq!(cfg.ratings, Some(PathBuf::from("feeds/ratings.json")));
    assert_eq!(cfg.histories, None);
    assert_eq!(cfg.format, OutputFormat::Sqlite);
  }

  #[test]
  fn flags_override_the_file() {
    let file = toml_file(
      r#"
      default_cards = "a.json"
      all_cards = "b.json"
      output = "out"
      "#,
    );
    let overrides = Overrides {
      output: Some(PathBuf::from("elsewhere")),
      format: Some(OutputFormat::Sqlite),
      ..Default::default()
    };
    let cfg = BuildConfig::load(file.path(), &overrides).unwrap();
    assert_eq!(cfg.output, PathBuf::from("elsewhere"));
    assert_eq!(cfg.all_cards, PathBuf::from("b.json"));
    assert_eq!(cfg.format, OutputFormat::Sqlite);
  }

  #[test]
  fn flags_alone_are_enough() {
    let overrides = Overrides {
      default_cards: Some(PathBuf::from("a.json")),
      all_cards: Some(PathBuf::from("b.json")),
      output: Some(PathBuf::from("out")),
      ..Default::default()
    };
    let cfg = BuildConfig::load(Path::new("does-not-exist.toml"), &overrides).unwrap();
    assert_eq!(cfg.format, OutputFormat::Json);
  }

  #[test]
  fn missing_required_keys_fail() {
    assert!(BuildConfig::load(Path::new("does-not-exist.toml"), &Overrides::default()).is_err());
  }
}
