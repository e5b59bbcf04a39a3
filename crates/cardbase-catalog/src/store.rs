//! The in-memory catalog: every canonical record plus the lookup indices
//! built alongside them.

use std::collections::BTreeMap;

use cardbase_core::{
  card::{Card, CardImages, ImageDescriptor},
  normalize_name,
};

use crate::normalize::FaceRole;

/// Decides which records may supply the display images for a name.
pub type PresentableFilter = fn(&Card) -> bool;

/// Set codes whose printings never supply display images.
const UNPRESENTABLE_SETS: [&str; 2] = ["myb", "mb1"];

/// Rejects promo, digital, token, gold-bordered, non-English,
/// TCGplayer-less, art-series and star-numbered printings.
pub fn is_presentable(card: &Card) -> bool {
  !card.promo
    && !card.digital
    && !card.is_token
    && card.border_color != "gold"
    && card.language == "en"
    && card.tcgplayer_id.is_some()
    && card.layout != "art_series"
    && !UNPRESENTABLE_SETS.contains(&card.set.as_str())
    && !card.collector_number.contains('★')
}

/// All canonical records and their indices.
///
/// Populated monotonically: records are only ever added, and the name index
/// keeps first-insertion order, so the first id under a name is that name's
/// default printing.
#[derive(Debug, Clone)]
pub struct Catalog {
  pub(crate) cards:         BTreeMap<String, Card>,
  pub(crate) name_to_ids:   BTreeMap<String, Vec<String>>,
  pub(crate) oracle_to_ids: BTreeMap<String, Vec<String>>,
  pub(crate) english:       BTreeMap<String, String>,
  pub(crate) image_dict:    BTreeMap<String, ImageDescriptor>,
  pub(crate) card_images:   BTreeMap<String, CardImages>,
  pub(crate) names:         Vec<String>,
  pub(crate) full_names:    Vec<String>,
  presentable:              PresentableFilter,
}

impl Default for Catalog {
  fn default() -> Self { Self::with_filter(is_presentable) }
}

impl Catalog {
  pub fn new() -> Self { Self::default() }

  pub fn with_filter(presentable: PresentableFilter) -> Self {
    Self {
      cards: BTreeMap::new(),
      name_to_ids: BTreeMap::new(),
      oracle_to_ids: BTreeMap::new(),
      english: BTreeMap::new(),
      image_dict: BTreeMap::new(),
      card_images: BTreeMap::new(),
      names: Vec::new(),
      full_names: Vec::new(),
      presentable,
    }
  }

  // ─── Writes ──────────────────────────────────────────────────────────────

  /// Insert a record and update every index.
  pub fn add(&mut self, card: Card, role: FaceRole) {
    let id = card.id.clone();
    let oracle_key = normalize_name(&card.oracle_id);
    let name = normalize_name(&card.name);
    let full_name = normalize_name(&card.full_name);

    self.image_dict.insert(full_name.clone(), ImageDescriptor {
      uri:    card.art_crop.clone(),
      artist: card.artist.clone(),
      id:     id.clone(),
    });

    if role == FaceRole::Front && (self.presentable)(&card) {
      self.card_images.insert(name.clone(), CardImages {
        image_normal: card.image_normal.clone(),
        image_flip:   card.image_flip.clone(),
      });
    }

    let ids = self.name_to_ids.entry(name.clone()).or_default();
    if !ids.contains(&id) {
      ids.push(id.clone());
    }

    self.oracle_to_ids.entry(oracle_key).or_default().push(id.clone());

    insert_sorted(&mut self.names, name);
    insert_sorted(&mut self.full_names, full_name);

    if self.cards.insert(id, card).is_some() {
      tracing::debug!("replaced a record with a duplicate id");
    }
  }

  /// Record that `foreign_id` is a translation of `english_id`.
  pub(crate) fn link_english(&mut self, foreign_id: &str, english_id: &str) {
    self
      .english
      .insert(foreign_id.to_owned(), english_id.to_owned());
  }

  // ─── Reads ───────────────────────────────────────────────────────────────

  pub fn card(&self, id: &str) -> Option<&Card> { self.cards.get(id) }

  pub fn cards(&self) -> impl Iterator<Item = &Card> { self.cards.values() }

  /// Ids sharing a name, default printing first. The name is normalized
  /// before lookup.
  pub fn ids_for_name(&self, name: &str) -> &[String] {
    self
      .name_to_ids
      .get(&normalize_name(name))
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  pub fn default_printing(&self, name: &str) -> Option<&Card> {
    self.ids_for_name(name).first().and_then(|id| self.card(id))
  }

  pub fn ids_for_oracle(&self, oracle_id: &str) -> &[String] {
    self
      .oracle_to_ids
      .get(&normalize_name(oracle_id))
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  pub fn english_id(&self, foreign_id: &str) -> Option<&str> {
    self.english.get(foreign_id).map(String::as_str)
  }

  /// Image descriptor by full name (normalized before lookup).
  pub fn image(&self, full_name: &str) -> Option<&ImageDescriptor> {
    self.image_dict.get(&normalize_name(full_name))
  }

  pub fn card_images(&self, name: &str) -> Option<&CardImages> {
    self.card_images.get(&normalize_name(name))
  }

  /// Sorted, deduplicated normalized names.
  pub fn names(&self) -> &[String] { &self.names }

  /// Sorted, deduplicated normalized full names.
  pub fn full_names(&self) -> &[String] { &self.full_names }

  pub fn len(&self) -> usize { self.cards.len() }

  pub fn is_empty(&self) -> bool { self.cards.is_empty() }
}

fn insert_sorted(list: &mut Vec<String>, value: String) {
  if let Err(at) = list.binary_search(&value) {
    list.insert(at, value);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_helpers::card;

  #[test]
  fn first_insertion_is_the_default_printing() {
    let mut catalog = Catalog::new();
    catalog.add(card("a1", "Opt", "o-opt"), FaceRole::Front);
    catalog.add(card("a2", "Opt", "o-opt"), FaceRole::Front);
    catalog.add(card("a1", "Opt", "o-opt"), FaceRole::Front);

    assert_eq!(catalog.ids_for_name("OPT"), ["a1", "a2"]);
    assert_eq!(catalog.default_printing("opt").unwrap().id, "a1");
    // the oracle index is an audit trail and keeps duplicates
    assert_eq!(catalog.ids_for_oracle("o-opt"), ["a1", "a2", "a1"]);
    assert_eq!(catalog.len(), 2);
  }

  #[test]
  fn name_lists_stay_sorted_and_unique() {
    let mut catalog = Catalog::new();
    for (id, name) in [("1", "Shock"), ("2", "Brainstorm"), ("3", "Shock"), ("4", "Ponder")] {
      catalog.add(card(id, name, id), FaceRole::Front);
    }
    assert_eq!(catalog.names(), ["brainstorm", "ponder", "shock"]);
    assert_eq!(catalog.full_names().len(), 4);
    assert!(catalog.full_names().windows(2).all(|w| w[0] < w[1]));
  }

  #[test]
  fn display_images_only_for_presentable_fronts() {
    let mut catalog = Catalog::new();

    let mut promo = card("p", "Opt", "o");
    promo.promo = true;
    catalog.add(promo, FaceRole::Front);
    assert!(catalog.card_images("Opt").is_none());

    catalog.add(card("b", "Opt Back", "o"), FaceRole::Back);
    assert!(catalog.card_images("Opt Back").is_none());

    catalog.add(card("n", "Opt", "o"), FaceRole::Front);
    assert!(catalog.card_images("Opt").is_some());

    // image descriptors are kept for every record
    assert_eq!(catalog.image("Opt [tst-n]").map(|d| d.id.as_str()), Some("n"));
    assert!(catalog.image("opt back [tst-b]").is_some());
  }

  #[test]
  fn default_filter_rejections() {
    let base = card("x", "Opt", "o");
    assert!(is_presentable(&base));

    let rejected: [fn(&mut Card); 8] = [
      |c| c.digital = true,
      |c| c.is_token = true,
      |c| c.border_color = "gold".into(),
      |c| c.language = "de".into(),
      |c| c.tcgplayer_id = None,
      |c| c.layout = "art_series".into(),
      |c| c.set = "mb1".into(),
      |c| c.collector_number = "12★".into(),
    ];
    for (i, tweak) in rejected.iter().enumerate() {
      let mut c = base.clone();
      tweak(&mut c);
      assert!(!is_presentable(&c), "case {i}");
    }
  }

  #[test]
  fn custom_filter_is_honoured() {
    let mut catalog = Catalog::with_filter(|_| false);
    catalog.add(card("x", "Opt", "o"), FaceRole::Front);
    assert!(catalog.card_images("Opt").is_none());
  }
}
