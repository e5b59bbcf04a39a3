//! The two-pass catalog build.
//!
//! ```text
//! CatalogBuilder ──ingest(raw)*──▶ finish_english() ──▶ LanguagePass
//!                                                        ──link(raw)*──▶ finish() ──▶ Catalog
//! ```
//!
//! The language pass can only be reached by consuming the builder, so every
//! English record is in the catalog before the first link is attempted.

use cardbase_core::raw::RawPrinting;
use serde::Serialize;

use crate::{
  normalize::{Diagnostics, normalize},
  popularity::PopularityIndex,
  store::{Catalog, PresentableFilter},
  tokens::infer_tokens,
};

/// Counters reported at the end of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
  pub printings:           usize,
  pub records:             usize,
  pub secondary_faces:     usize,
  pub defects:             usize,
  pub cards_with_tokens:   usize,
  pub translations_seen:   usize,
  pub translations_linked: usize,
}

// ─── Pass 1 ──────────────────────────────────────────────────────────────────

/// Pass 1: normalize English printings, infer their tokens and add them.
#[derive(Debug)]
pub struct CatalogBuilder {
  catalog:     Catalog,
  popularity:  PopularityIndex,
  diagnostics: Diagnostics,
  stats:       BuildStats,
}

impl CatalogBuilder {
  pub fn new(popularity: PopularityIndex) -> Self {
    Self::with_catalog(Catalog::new(), popularity)
  }

  /// Use `presentable` instead of the default display-image filter.
  pub fn with_filter(popularity: PopularityIndex, presentable: PresentableFilter) -> Self {
    Self::with_catalog(Catalog::with_filter(presentable), popularity)
  }

  fn with_catalog(catalog: Catalog, popularity: PopularityIndex) -> Self {
    Self {
      catalog,
      popularity,
      diagnostics: Diagnostics::default(),
      stats: BuildStats::default(),
    }
  }

  pub fn ingest(&mut self, raw: &RawPrinting) {
    self.stats.printings += 1;
    for mut record in normalize(raw, &self.popularity, &mut self.diagnostics) {
      let tokens = infer_tokens(raw, &record, &self.catalog);
      if !tokens.is_empty() {
        self.stats.cards_with_tokens += 1;
        record.card.tokens = Some(tokens);
      }
      if record.role.is_secondary() {
        self.stats.secondary_faces += 1;
      }
      self.stats.records += 1;
      self.catalog.add(record.card, record.role);
    }
  }

  pub fn catalog(&self) -> &Catalog { &self.catalog }

  /// End pass 1.
  pub fn finish_english(mut self) -> LanguagePass {
    self.stats.defects = self.diagnostics.defects;
    tracing::info!(
      printings = self.stats.printings,
      records = self.stats.records,
      defects = self.stats.defects,
      "english pass complete"
    );
    LanguagePass {
      catalog: self.catalog,
      stats:   self.stats,
    }
  }
}

// ─── Pass 2 ──────────────────────────────────────────────────────────────────

/// Pass 2: link translated printings to the finished English records.
#[derive(Debug)]
pub struct LanguagePass {
  catalog: Catalog,
  stats:   BuildStats,
}

impl LanguagePass {
  pub fn link(&mut self, raw: &RawPrinting) {
    if raw.is_english() {
      return;
    }
    self.stats.translations_seen += 1;
    if self.catalog.add_language_link(raw) {
      self.stats.translations_linked += 1;
    }
  }

  pub fn catalog(&self) -> &Catalog { &self.catalog }

  pub fn finish(self) -> (Catalog, BuildStats) {
    tracing::info!(
      seen = self.stats.translations_seen,
      linked = self.stats.translations_linked,
      "language pass complete"
    );
    (self.catalog, self.stats)
  }
}
