//! `cardbase` — build the card catalog from bulk feeds and publish it.
//!
//! # Usage
//!
//! ```
//! cardbase --config cardbase.toml
//! cardbase --default-cards default.json --all-cards all.json --output out/
//! cardbase --format sqlite --output catalog.db
//! ```
//!
//! Settings come from the TOML file, then `CARDBASE_*` environment
//! variables, then flags.

mod config;
mod publish;
mod sink_dir;
mod source;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use cardbase_catalog::build_catalog;
use cardbase_store_sqlite::SqliteSink;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{
  config::{BuildConfig, OutputFormat, Overrides},
  sink_dir::DirectorySink,
  source::JsonFileSource,
};

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cardbase", version, about = "Build the card catalog from bulk feeds")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "cardbase.toml")]
  config: PathBuf,

  /// English-only default feed (JSON array).
  #[arg(long, value_name = "FILE")]
  default_cards: Option<PathBuf>,

  /// All-languages feed (JSON array).
  #[arg(long, value_name = "FILE")]
  all_cards: Option<PathBuf>,

  /// Ratings list (JSON array).
  #[arg(long, value_name = "FILE")]
  ratings: Option<PathBuf>,

  /// Popularity histories (JSON array).
  #[arg(long, value_name = "FILE")]
  histories: Option<PathBuf>,

  /// Output directory (json) or database file (sqlite).
  #[arg(short, long, value_name = "PATH")]
  output: Option<PathBuf>,

  #[arg(long, value_enum)]
  format: Option<OutputFormat>,
}

impl Cli {
  fn overrides(&self) -> Overrides {
    Overrides {
      default_cards: self.default_cards.clone(),
      all_cards:     self.all_cards.clone(),
      ratings:       self.ratings.clone(),
      histories:     self.histories.clone(),
      output:        self.output.clone(),
      format:        self.format,
    }
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = BuildConfig::load(&cli.config, &cli.overrides())?;

  // Both passes are synchronous and read large files.
  let source = JsonFileSource::new(&cfg);
  let (catalog, stats) = tokio::task::spawn_blocking(move || build_catalog(&source))
    .await
    .context("catalog build panicked")?
    .context("catalog build failed")?;
  tracing::info!(cards = catalog.len(), "catalog built");

  let catalog = Arc::new(catalog);
  match cfg.format {
    OutputFormat::Json => {
      let sink = DirectorySink::create(&cfg.output)
        .await
        .with_context(|| format!("failed to create {}", cfg.output.display()))?;
      publish::publish(catalog, Arc::new(sink)).await?;
    }
    OutputFormat::Sqlite => {
      let sink = SqliteSink::open(&cfg.output)
        .await
        .with_context(|| format!("failed to open database at {}", cfg.output.display()))?;
      publish::publish(catalog, Arc::new(sink)).await?;
    }
  }

  println!("{}", serde_json::to_string_pretty(&stats)?);
  Ok(())
}
