//! Raw feed shapes — one printing as it arrives from the bulk card feed,
//! plus the two auxiliary popularity lists.
//!
//! Field names follow the feed's own JSON keys. Everything that may be
//! absent on some printings is optional or defaulted so a single odd record
//! never fails the whole stream.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Printing ────────────────────────────────────────────────────────────────

/// One physical or digital printing of a card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPrinting {
  pub id:               String,
  /// Missing on reversible cards; each face then carries its own.
  #[serde(default)]
  pub oracle_id:        Option<String>,
  pub name:             String,
  #[serde(default = "default_lang")]
  pub lang:             String,
  #[serde(default)]
  pub layout:           String,
  #[serde(default)]
  pub released_at:      Option<NaiveDate>,
  #[serde(default)]
  pub scryfall_uri:     String,

  // ── Gameplay ──────────────────────────────────────────────────────────
  #[serde(default)]
  pub mana_cost:        Option<String>,
  #[serde(default)]
  pub cmc:              Option<f64>,
  #[serde(default)]
  pub type_line:        Option<String>,
  #[serde(default)]
  pub oracle_text:      Option<String>,
  #[serde(default)]
  pub power:            Option<String>,
  #[serde(default)]
  pub toughness:        Option<String>,
  #[serde(default)]
  pub loyalty:          Option<String>,
  #[serde(default)]
  pub colors:           Option<Vec<String>>,
  #[serde(default)]
  pub color_identity:   Vec<String>,
  #[serde(default)]
  pub card_faces:       Option<Vec<RawFace>>,
  #[serde(default)]
  pub all_parts:        Option<Vec<RelatedPart>>,
  /// Keyed by lowercase format name (`"legacy"`, `"modern"`, …).
  #[serde(default)]
  pub legalities:       HashMap<String, String>,

  // ── Printing ──────────────────────────────────────────────────────────
  pub set:              String,
  #[serde(default)]
  pub set_name:         String,
  pub collector_number: String,
  #[serde(default)]
  pub rarity:           String,
  #[serde(default)]
  pub artist:           Option<String>,
  #[serde(default)]
  pub border_color:     String,
  #[serde(default)]
  pub finishes:         Vec<String>,
  #[serde(default)]
  pub frame:            Option<String>,
  #[serde(default)]
  pub frame_effects:    Option<Vec<String>>,
  #[serde(default)]
  pub reprint:          bool,
  #[serde(default)]
  pub promo:            bool,
  #[serde(default)]
  pub digital:          bool,
  #[serde(default)]
  pub textless:         bool,
  #[serde(default)]
  pub full_art:         bool,
  #[serde(default)]
  pub prices:           RawPrices,
  #[serde(default)]
  pub image_uris:       Option<ImageUris>,
  #[serde(default)]
  pub mtgo_id:          Option<u64>,
  #[serde(default)]
  pub tcgplayer_id:     Option<u64>,
}

fn default_lang() -> String { "en".to_owned() }

impl RawPrinting {
  /// All faces of the printing; empty for single-faced cards.
  pub fn faces(&self) -> &[RawFace] { self.card_faces.as_deref().unwrap_or(&[]) }

  pub fn has_faces(&self) -> bool { self.card_faces.is_some() }

  pub fn is_english(&self) -> bool { self.lang == "en" }

  /// The printing's oracle id, falling back to the front face's.
  pub fn any_oracle_id(&self) -> Option<&str> {
    self
      .oracle_id
      .as_deref()
      .or_else(|| self.faces().first().and_then(|f| f.oracle_id.as_deref()))
  }
}

/// One named, text-bearing side of a multi-faced printing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFace {
  pub name:        String,
  #[serde(default)]
  pub oracle_id:   Option<String>,
  #[serde(default)]
  pub mana_cost:   Option<String>,
  #[serde(default)]
  pub cmc:         Option<f64>,
  #[serde(default)]
  pub type_line:   Option<String>,
  #[serde(default)]
  pub oracle_text: Option<String>,
  #[serde(default)]
  pub colors:      Option<Vec<String>>,
  #[serde(default)]
  pub power:       Option<String>,
  #[serde(default)]
  pub toughness:   Option<String>,
  #[serde(default)]
  pub loyalty:     Option<String>,
  #[serde(default)]
  pub image_uris:  Option<ImageUris>,
}

/// An entry of the printing's related-parts list (tokens, meld pieces,
/// combo pieces).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedPart {
  pub id:        String,
  #[serde(default)]
  pub component: String,
  #[serde(default)]
  pub name:      String,
  #[serde(default)]
  pub type_line: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageUris {
  #[serde(default)]
  pub small:    Option<String>,
  #[serde(default)]
  pub normal:   Option<String>,
  #[serde(default)]
  pub art_crop: Option<String>,
}

/// Prices arrive as decimal strings or `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPrices {
  #[serde(default)]
  pub usd:        Option<String>,
  #[serde(default)]
  pub usd_foil:   Option<String>,
  #[serde(default)]
  pub usd_etched: Option<String>,
  #[serde(default)]
  pub eur:        Option<String>,
  #[serde(default)]
  pub tix:        Option<String>,
}

// ─── Popularity lists ────────────────────────────────────────────────────────

/// A rating entry, keyed by card name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
  pub name:      String,
  pub elo:       f64,
  /// Expected to hold 64 components; anything else is ignored.
  #[serde(default)]
  pub embedding: Option<Vec<f64>>,
}

/// A popularity history entry, keyed by oracle id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
  pub oracle_id: String,
  pub current:   HistorySnapshot,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistorySnapshot {
  /// `[cube count, popularity fraction]`.
  #[serde(default)]
  pub total: [f64; 2],
  #[serde(default)]
  pub picks: u64,
}
