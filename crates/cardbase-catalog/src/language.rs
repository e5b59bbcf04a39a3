//! Linking translated printings to their English counterparts.

use cardbase_core::raw::RawPrinting;

use crate::{
  normalize::{FaceRole, convert_name},
  store::Catalog,
};

impl Catalog {
  /// Link a non-English printing to the English record sharing its set
  /// code and collector number. Siblings are looked up by oracle id first,
  /// then by name. Returns whether a link was made.
  ///
  /// English printings and printings with no counterpart are ignored.
  pub fn add_language_link(&mut self, raw: &RawPrinting) -> bool {
    if raw.is_english() {
      return false;
    }
    let Some(english_id) = self.english_counterpart(raw) else {
      return false;
    };
    self.link_english(&raw.id, &english_id);
    true
  }

  fn english_counterpart(&self, raw: &RawPrinting) -> Option<String> {
    let same_printing = |id: &&String| {
      self
        .card(id)
        .is_some_and(|c| c.set == raw.set && c.collector_number == raw.collector_number)
    };

    let by_oracle = raw
      .any_oracle_id()
      .and_then(|oracle_id| self.ids_for_oracle(oracle_id).iter().find(same_printing));
    by_oracle
      .or_else(|| {
        self
          .ids_for_name(&convert_name(raw, FaceRole::Front))
          .iter()
          .find(same_printing)
      })
      .cloned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_helpers::card;

  fn foreign(id: &str, name: &str, oracle_id: &str, cn: &str) -> RawPrinting {
    RawPrinting {
      id: id.into(),
      name: name.into(),
      oracle_id: Some(oracle_id.into()),
      lang: "fr".into(),
      set: "tst".into(),
      collector_number: cn.into(),
      ..Default::default()
    }
  }

  fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.add(card("en-old", "Opt", "o-opt"), FaceRole::Front);
    catalog.add(card("en-new", "Opt", "o-opt"), FaceRole::Front);
    catalog
  }

  #[test]
  fn prefers_the_same_set_and_number() {
    let mut catalog = catalog();
    // collector numbers equal the ids in the test catalog
    assert!(catalog.add_language_link(&foreign("fr1", "Opt", "o-opt", "en-new")));
    assert_eq!(catalog.english_id("fr1"), Some("en-new"));
  }

  #[test]
  fn falls_back_to_the_name_index() {
    let mut catalog = catalog();
    assert!(catalog.add_language_link(&foreign("fr2", "Opt", "o-unknown", "en-old")));
    assert_eq!(catalog.english_id("fr2"), Some("en-old"));

    // a name match alone is not enough
    assert!(!catalog.add_language_link(&foreign("fr3", "Opt", "o-unknown", "99")));
  }

  #[test]
  fn english_and_unmatched_printings_are_ignored() {
    let mut catalog = catalog();

    let mut english = foreign("en-x", "Opt", "o-opt", "en-old");
    english.lang = "en".into();
    assert!(!catalog.add_language_link(&english));

    assert!(!catalog.add_language_link(&foreign("fr4", "Option", "o-other", "1")));
    assert!(catalog.english_id("fr4").is_none());
    assert!(catalog.english_id("en-x").is_none());
  }
}
