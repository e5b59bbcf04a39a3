//! The canonical card record — the unit of the catalog.
//!
//! One record exists per printed face: a two-faced printing produces a
//! front record under the printing's id and a back record under the same id
//! with [`SECONDARY_ID_SUFFIX`] appended. Serialised field names keep the
//! catalog's established wire shape (`_id`, `type`, `colorcategory`, …).

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator as _, IntoStaticStr};

/// Appended to a printing's id to form the id of its back-face record.
pub const SECONDARY_ID_SUFFIX: &str = "2";

/// Rating assigned to cards absent from the ratings list.
pub const DEFAULT_ELO: f64 = 1200.0;

/// Length of every embedding vector.
pub const EMBEDDING_DIMENSIONS: usize = 64;

// ─── Legalities ──────────────────────────────────────────────────────────────

/// The ten formats every legality map carries.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  EnumIter,
  IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
  Legacy,
  Modern,
  Standard,
  Pioneer,
  Pauper,
  Brawl,
  Historic,
  Commander,
  Penny,
  Vintage,
}

impl Format {
  /// The lowercase key the raw feed uses for this format.
  pub fn feed_key(self) -> &'static str { self.into() }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Legality {
  Legal,
  #[default]
  NotLegal,
  Restricted,
  Banned,
}

/// A legality map that always holds exactly one entry per [`Format`].
///
/// The inner map is private; every constructor fills all ten keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Format, Legality>")]
pub struct Legalities(BTreeMap<Format, Legality>);

impl Legalities {
  /// Every format set to `legality`.
  pub fn uniform(legality: Legality) -> Self {
    Self(Format::iter().map(|f| (f, legality)).collect())
  }

  /// Pick the ten formats out of the feed's lowercase-keyed map. Missing or
  /// unrecognised values become [`Legality::NotLegal`].
  pub fn from_feed(raw: &HashMap<String, String>) -> Self {
    Self(
      Format::iter()
        .map(|f| {
          let legality = raw
            .get(f.feed_key())
            .and_then(|v| v.parse::<Legality>().ok())
            .unwrap_or_default();
          (f, legality)
        })
        .collect(),
    )
  }

  pub fn get(&self, format: Format) -> Legality {
    self.0.get(&format).copied().unwrap_or_default()
  }

  pub fn iter(&self) -> impl Iterator<Item = (Format, Legality)> + '_ {
    self.0.iter().map(|(f, l)| (*f, *l))
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl From<BTreeMap<Format, Legality>> for Legalities {
  fn from(mut map: BTreeMap<Format, Legality>) -> Self {
    for format in Format::iter() {
      map.entry(format).or_default();
    }
    Self(map)
  }
}

// ─── Derived attributes ──────────────────────────────────────────────────────

/// Single-character bucket used for sorting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorCategory {
  #[serde(rename = "l")]
  Land,
  #[serde(rename = "c")]
  Colorless,
  #[serde(rename = "m")]
  Multicolor,
  #[serde(rename = "w")]
  White,
  #[serde(rename = "u")]
  Blue,
  #[serde(rename = "b")]
  Black,
  #[serde(rename = "r")]
  Red,
  #[serde(rename = "g")]
  Green,
}

impl ColorCategory {
  /// Lands first, then by the size of the color identity.
  pub fn classify(type_line: &str, color_identity: &[String]) -> Self {
    if type_line.to_lowercase().contains("land") {
      return Self::Land;
    }
    match color_identity {
      [] => Self::Colorless,
      [only] => match only.to_ascii_lowercase().as_str() {
        "w" => Self::White,
        "u" => Self::Blue,
        "b" => Self::Black,
        "r" => Self::Red,
        "g" => Self::Green,
        _ => Self::Colorless,
      },
      _ => Self::Multicolor,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
  pub usd:        Option<f64>,
  pub usd_foil:   Option<f64>,
  pub usd_etched: Option<f64>,
  pub eur:        Option<f64>,
  pub tix:        Option<f64>,
}

// ─── Card ────────────────────────────────────────────────────────────────────

/// A normalized catalog entry for one face of one printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
  // ── Identity ──────────────────────────────────────────────────────────
  #[serde(rename = "_id")]
  pub id:               String,
  pub oracle_id:        String,

  // ── Printing ──────────────────────────────────────────────────────────
  pub set:              String,
  pub set_name:         String,
  pub collector_number: String,
  pub released_at:      Option<NaiveDate>,
  pub reprint:          bool,
  pub promo:            bool,
  pub digital:          bool,
  #[serde(rename = "isToken")]
  pub is_token:         bool,
  pub finishes:         Vec<String>,
  pub border_color:     String,
  pub full_art:         bool,
  pub language:         String,
  pub rarity:           String,
  pub artist:           Option<String>,
  pub scryfall_uri:     String,
  pub layout:           String,
  pub mtgo_id:          Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tcgplayer_id:     Option<u64>,
  pub prices:           Prices,

  // ── Gameplay ──────────────────────────────────────────────────────────
  pub name:             String,
  pub name_lower:       String,
  /// `"<name> [<set>-<collector number>]"`.
  pub full_name:        String,
  pub cmc:              f64,
  /// Cost symbols, last symbol first; hybrids spelled `w-u`.
  pub parsed_cost:      Vec<String>,
  pub color_identity:   Vec<String>,
  pub colors:           Vec<String>,
  #[serde(rename = "type")]
  pub type_line:        String,
  pub oracle_text:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub power:            Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub toughness:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub loyalty:          Option<String>,
  #[serde(rename = "colorcategory")]
  pub color_category:   ColorCategory,
  pub legalities:       Legalities,

  // ── Images ────────────────────────────────────────────────────────────
  pub image_small:      Option<String>,
  pub image_normal:     Option<String>,
  pub art_crop:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_flip:       Option<String>,

  // ── Popularity ────────────────────────────────────────────────────────
  pub elo:              f64,
  /// Unit length, or all zeros when the card is unrated.
  pub embedding:        Vec<f64>,
  /// Share of cubes containing the card, as a percentage.
  pub popularity:       f64,
  #[serde(rename = "cubeCount")]
  pub cube_count:       u64,
  #[serde(rename = "pickCount")]
  pub pick_count:       u64,

  /// Ids of records this card creates during play.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tokens:           Option<Vec<String>>,
}

// ─── Derived index values ────────────────────────────────────────────────────

/// Art associated with a full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
  pub uri:    Option<String>,
  pub artist: Option<String>,
  pub id:     String,
}

/// Display images associated with a plain name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImages {
  pub image_normal: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_flip:   Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn feed_legalities_always_have_ten_keys() {
    let mut raw = HashMap::new();
    raw.insert("modern".to_owned(), "banned".to_owned());
    raw.insert("oathbreaker".to_owned(), "legal".to_owned());
    raw.insert("vintage".to_owned(), "something-new".to_owned());

    let l = Legalities::from_feed(&raw);
    assert_eq!(l.len(), 10);
    assert_eq!(l.get(Format::Modern), Legality::Banned);
    assert_eq!(l.get(Format::Vintage), Legality::NotLegal);
    assert_eq!(l.get(Format::Legacy), Legality::NotLegal);
  }

  #[test]
  fn deserialised_legalities_are_completed() {
    let l: Legalities =
      serde_json::from_str(r#"{"Legacy":"restricted"}"#).unwrap();
    assert_eq!(l.len(), 10);
    assert_eq!(l.get(Format::Legacy), Legality::Restricted);
  }

  #[test]
  fn legalities_serialise_with_capitalised_format_names() {
    let json = serde_json::to_value(Legalities::uniform(Legality::Legal)).unwrap();
    assert_eq!(json["Commander"], "legal");
    assert_eq!(json.as_object().unwrap().len(), 10);
  }

  #[test]
  fn color_category_prefers_land() {
    let identity = vec!["G".to_owned(), "U".to_owned()];
    assert_eq!(
      ColorCategory::classify("Land — Forest Island", &identity),
      ColorCategory::Land
    );
    assert_eq!(
      ColorCategory::classify("Creature — Elf", &identity),
      ColorCategory::Multicolor
    );
    assert_eq!(
      ColorCategory::classify("Instant", &["R".to_owned()]),
      ColorCategory::Red
    );
    assert_eq!(ColorCategory::classify("Artifact", &[]), ColorCategory::Colorless);
  }
}
