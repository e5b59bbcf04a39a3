//! Card normalizer: one raw printing → zero, one or two canonical records.
//!
//! Pipeline per face:
//!   RawPrinting
//!     └─ face_attributes()      → the face (or printing) gameplay fields come from
//!          └─ convert_*()       → one derived field each
//!               └─ popularity   → elo / embedding / history enrichment
//!                    └─ Card
//!
//! A field that cannot be derived for an unexpected layout is a defect, not
//! an error: it is logged, counted in [`Diagnostics`], and left empty.

use cardbase_core::{
  card::{
    Card, ColorCategory, Legalities, Legality, Prices, SECONDARY_ID_SUFFIX,
  },
  normalize_name,
  raw::{ImageUris, RawFace, RawPrices, RawPrinting},
};

use crate::popularity::{PopularityIndex, popularity_percent};

/// Set codes whose printings are all treated as promotional.
const MASTERPIECE_SETS: [&str; 4] = ["mps", "mp2", "exp", "amh1"];

/// Separator between face names and face type lines.
const FACE_SEPARATOR: &str = "//";

/// Which side of a printing a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceRole {
  Front,
  /// The second face of a two-faced printing.
  Back,
}

impl FaceRole {
  pub fn is_secondary(self) -> bool { matches!(self, Self::Back) }
}

/// A canonical record together with the face it was built from.
#[derive(Debug, Clone)]
pub struct NormalizedCard {
  pub card: Card,
  pub role: FaceRole,
}

/// Running count of normalization defects for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
  pub defects: usize,
}

impl Diagnostics {
  fn defect(&mut self, raw: &RawPrinting, role: FaceRole, field: &'static str) {
    self.defects += 1;
    tracing::warn!(
      id = %raw.id,
      name = %raw.name,
      layout = %raw.layout,
      ?role,
      field,
      "could not derive field for layout; using empty value"
    );
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Normalize one printing. The front record comes first.
pub fn normalize(
  raw: &RawPrinting,
  popularity: &PopularityIndex,
  diagnostics: &mut Diagnostics,
) -> Vec<NormalizedCard> {
  if raw.any_oracle_id().is_none() {
    diagnostics.defects += 1;
    tracing::warn!(id = %raw.id, name = %raw.name, "printing has no oracle id; skipped");
    return Vec::new();
  }

  let mut records = vec![NormalizedCard {
    card: convert_card(raw, FaceRole::Front, popularity, diagnostics),
    role: FaceRole::Front,
  }];
  if has_back_face(raw) {
    records.push(NormalizedCard {
      card: convert_card(raw, FaceRole::Back, popularity, diagnostics),
      role: FaceRole::Back,
    });
  }
  records
}

/// Two-faced printings get a separate back record, except for layouts that
/// print both halves on one side.
pub fn has_back_face(raw: &RawPrinting) -> bool {
  raw.faces().len() >= 2
    && !matches!(raw.layout.as_str(), "split" | "flip" | "adventure")
}

/// Build the record for one face.
pub fn convert_card(
  raw: &RawPrinting,
  role: FaceRole,
  popularity: &PopularityIndex,
  diagnostics: &mut Diagnostics,
) -> Card {
  let face = face_attributes(raw, role);
  let name = convert_name(raw, role);

  let oracle_id = face
    .oracle_id
    .or(raw.oracle_id.as_deref())
    .or_else(|| raw.any_oracle_id())
    .unwrap_or_default()
    .to_owned();

  let parsed_cost = convert_parsed_cost(raw, role).unwrap_or_else(|| {
    diagnostics.defect(raw, role, "parsed_cost");
    Vec::new()
  });
  let colors = convert_colors(raw, role).unwrap_or_else(|| {
    diagnostics.defect(raw, role, "colors");
    Vec::new()
  });
  let type_line = convert_type(raw, role, &face).unwrap_or_else(|| {
    diagnostics.defect(raw, role, "type_line");
    String::new()
  });

  let images = face.image_uris.or(raw.image_uris.as_ref());
  let image_flip = match role {
    FaceRole::Front => raw
      .faces()
      .get(1)
      .and_then(|f| f.image_uris.as_ref())
      .and_then(|i| i.normal.clone()),
    FaceRole::Back => None,
  };

  let history = popularity.history(&oracle_id);
  let color_category = ColorCategory::classify(&type_line, &raw.color_identity);

  Card {
    id: convert_id(raw, role),
    oracle_id,
    set: raw.set.clone(),
    set_name: raw.set_name.clone(),
    collector_number: raw.collector_number.clone(),
    released_at: raw.released_at,
    reprint: raw.reprint,
    promo: is_promo(raw),
    digital: raw.digital,
    is_token: raw.layout == "token",
    finishes: raw.finishes.clone(),
    border_color: raw.border_color.clone(),
    full_art: raw.full_art,
    language: raw.lang.clone(),
    rarity: raw.rarity.clone(),
    artist: raw.artist.clone(),
    scryfall_uri: raw.scryfall_uri.clone(),
    layout: raw.layout.clone(),
    mtgo_id: raw.mtgo_id,
    tcgplayer_id: raw.tcgplayer_id,
    prices: convert_prices(&raw.prices),

    name_lower: normalize_name(&name),
    full_name: format!("{name} [{}-{}]", raw.set, raw.collector_number),
    cmc: convert_cmc(raw, role, &face),
    parsed_cost,
    color_identity: raw.color_identity.clone(),
    colors,
    oracle_text: convert_rules_text(raw, role),
    power: face.power.map(str::to_owned),
    toughness: face.toughness.map(str::to_owned),
    loyalty: face.loyalty.map(str::to_owned),
    color_category,
    type_line,
    legalities: convert_legalities(raw, role),

    image_small: images.and_then(|i| i.small.clone()),
    image_normal: images.and_then(|i| i.normal.clone()),
    art_crop: images.and_then(|i| i.art_crop.clone()),
    image_flip,

    elo: popularity.elo(&name),
    embedding: popularity.embedding(&name),
    popularity: history.map_or(0.0, |h| popularity_percent(h.total[1])),
    cube_count: history.map_or(0, |h| h.total[0] as u64),
    pick_count: history.map_or(0, |h| h.picks),
    name,

    tokens: None,
  }
}

// ─── Face selection ──────────────────────────────────────────────────────────

/// The per-face gameplay fields, borrowed from whichever object supplies
/// them for this record.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FaceAttributes<'a> {
  oracle_id:  Option<&'a str>,
  cmc:        Option<f64>,
  type_line:  Option<&'a str>,
  power:      Option<&'a str>,
  toughness:  Option<&'a str>,
  loyalty:    Option<&'a str>,
  image_uris: Option<&'a ImageUris>,
}

impl<'a> From<&'a RawFace> for FaceAttributes<'a> {
  fn from(face: &'a RawFace) -> Self {
    Self {
      oracle_id:  face.oracle_id.as_deref(),
      cmc:        face.cmc,
      type_line:  face.type_line.as_deref(),
      power:      face.power.as_deref(),
      toughness:  face.toughness.as_deref(),
      loyalty:    face.loyalty.as_deref(),
      image_uris: face.image_uris.as_ref(),
    }
  }
}

impl<'a> From<&'a RawPrinting> for FaceAttributes<'a> {
  fn from(raw: &'a RawPrinting) -> Self {
    Self {
      oracle_id:  raw.oracle_id.as_deref(),
      cmc:        raw.cmc,
      type_line:  raw.type_line.as_deref(),
      power:      raw.power.as_deref(),
      toughness:  raw.toughness.as_deref(),
      loyalty:    raw.loyalty.as_deref(),
      image_uris: raw.image_uris.as_ref(),
    }
  }
}

/// Back face for the secondary record, front face when the printing has
/// faces, otherwise the printing itself.
pub(crate) fn face_attributes(raw: &RawPrinting, role: FaceRole) -> FaceAttributes<'_> {
  let faces = raw.faces();
  match role {
    FaceRole::Back => faces.get(1).map_or_else(|| raw.into(), Into::into),
    FaceRole::Front if raw.has_faces() => {
      faces.first().map_or_else(|| raw.into(), Into::into)
    }
    FaceRole::Front => raw.into(),
  }
}

// ─── Field conversions ───────────────────────────────────────────────────────

pub fn convert_id(raw: &RawPrinting, role: FaceRole) -> String {
  match role {
    FaceRole::Front => raw.id.clone(),
    FaceRole::Back => format!("{}{SECONDARY_ID_SUFFIX}", raw.id),
  }
}

/// Split cards keep the combined name on their single record; other
/// multi-faced printings use the name of the face being built.
pub fn convert_name(raw: &RawPrinting, role: FaceRole) -> String {
  let name = raw.name.as_str();
  let picked = match role {
    FaceRole::Back => name.split_once(FACE_SEPARATOR).map_or(name, |(_, back)| back),
    FaceRole::Front if raw.layout != "split" => {
      name.split_once(FACE_SEPARATOR).map_or(name, |(front, _)| front)
    }
    FaceRole::Front => name,
  };
  picked.trim().to_owned()
}

fn convert_cmc(raw: &RawPrinting, role: FaceRole, face: &FaceAttributes<'_>) -> f64 {
  match role {
    FaceRole::Back => 0.0,
    FaceRole::Front => face.cmc.or(raw.cmc).unwrap_or(0.0),
  }
}

pub fn convert_legalities(raw: &RawPrinting, role: FaceRole) -> Legalities {
  match role {
    FaceRole::Back => Legalities::uniform(Legality::NotLegal),
    FaceRole::Front => Legalities::from_feed(&raw.legalities),
  }
}

/// `None` when no layout branch applies.
pub fn convert_parsed_cost(raw: &RawPrinting, role: FaceRole) -> Option<Vec<String>> {
  if role.is_secondary() {
    return Some(Vec::new());
  }
  let printing_cost = raw.mana_cost.as_deref().unwrap_or("");

  let cost = if !raw.has_faces() || raw.layout == "flip" {
    printing_cost.to_owned()
  } else if matches!(raw.layout.as_str(), "split" | "adventure") {
    printing_cost.replace(" // ", "{split}")
  } else {
    let front = raw.faces().first().filter(|f| f.colors.is_some())?;
    front.mana_cost.clone().unwrap_or_default()
  };
  Some(tokenize_cost(&cost))
}

/// `"{2}{W/U}{B}"` → `["b", "w-u", "2"]`.
pub fn tokenize_cost(cost: &str) -> Vec<String> {
  let inner = cost.trim();
  let inner = inner.strip_prefix('{').unwrap_or(inner);
  let inner = inner.strip_suffix('}').unwrap_or(inner);
  if inner.is_empty() {
    return Vec::new();
  }
  inner
    .to_lowercase()
    .rsplit("}{")
    .map(|symbol| symbol.replacen('/', "-", 1))
    .collect()
}

/// `None` when no layout branch applies.
pub fn convert_colors(raw: &RawPrinting, role: FaceRole) -> Option<Vec<String>> {
  let faces = raw.faces();
  let printing_colors = || raw.colors.clone().unwrap_or_default();

  match role {
    FaceRole::Back if faces.len() < 2 => Some(Vec::new()),
    // Adventure halves carry no colors of their own.
    FaceRole::Back if raw.layout == "adventure" => Some(printing_colors()),
    FaceRole::Back => Some(faces[1].colors.clone().unwrap_or_default()),
    FaceRole::Front if !raw.has_faces() => Some(printing_colors()),
    // These layouts store colors only on the printing.
    FaceRole::Front
      if matches!(raw.layout.as_str(), "flip" | "split" | "adventure") =>
    {
      Some(printing_colors())
    }
    FaceRole::Front => faces.first().and_then(|f| f.colors.clone()),
  }
}

/// `None` when neither the face nor the printing yields a type line.
fn convert_type(
  raw: &RawPrinting,
  role: FaceRole,
  face: &FaceAttributes<'_>,
) -> Option<String> {
  let type_line = match face.type_line.filter(|t| !t.trim().is_empty()) {
    Some(own) => own,
    None => {
      let whole = raw.type_line.as_deref().unwrap_or("");
      match role {
        FaceRole::Back => whole.split_once(FACE_SEPARATOR).map_or(whole, |(_, b)| b),
        FaceRole::Front => whole.split_once(FACE_SEPARATOR).map_or(whole, |(f, _)| f),
      }
    }
  }
  .trim();

  let type_line = match type_line {
    "Artifact — Contraption" => "Artifact Contraption",
    other => other,
  };
  (!type_line.is_empty()).then(|| type_line.to_owned())
}

/// Faced printings concatenate every face's text on the front record so it
/// can be searched; the back record only carries its own.
fn convert_rules_text(raw: &RawPrinting, role: FaceRole) -> Option<String> {
  match role {
    FaceRole::Back => raw.faces().get(1).and_then(|f| f.oracle_text.clone()),
    FaceRole::Front if raw.has_faces() => Some(
      raw
        .faces()
        .iter()
        .map(|f| f.oracle_text.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n"),
    ),
    FaceRole::Front => raw.oracle_text.clone(),
  }
}

pub fn is_promo(raw: &RawPrinting) -> bool {
  let effects = raw.frame_effects.as_deref().unwrap_or(&[]);
  raw.promo
    || effects.iter().any(|e| e == "extendedart" || e == "showcase")
    || raw.textless
    || raw.frame.as_deref() == Some("art_series")
    || MASTERPIECE_SETS.contains(&raw.set.to_lowercase().as_str())
}

fn convert_prices(raw: &RawPrices) -> Prices {
  fn parse(v: &Option<String>) -> Option<f64> {
    v.as_deref().and_then(|s| s.trim().parse().ok())
  }
  Prices {
    usd:        parse(&raw.usd),
    usd_foil:   parse(&raw.usd_foil),
    usd_etched: parse(&raw.usd_etched),
    eur:        parse(&raw.eur),
    tix:        parse(&raw.tix),
  }
}
