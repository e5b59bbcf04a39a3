//! Token inference: which other catalog records a card creates during play.
//!
//! Contributions are concatenated in this order:
//!
//!   1. curated overrides (then the linked parts)
//!   2. linked parts alone, when there is no override
//!   3. rules-text parsing, when neither of the above fired
//!   4. keyword triggers (monarch, energy, …)
//!   5. a `"<name> emblem"` record, when the text mentions an emblem

mod descriptor;
pub mod tables;

use std::{collections::BTreeSet, sync::LazyLock};

use cardbase_core::{card::Card, raw::RawPrinting};
use regex::Regex;

pub use self::descriptor::{TokenDescriptor, extract_token_descriptor};
use crate::{
  normalize::{FaceRole, NormalizedCard},
  store::Catalog,
};

const POPULATE_WORDING: &str =
  "create a token that's a copy of a creature token you control.";

static REMINDER_TEXT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r" *\([^)]*\) *").expect("reminder pattern is valid"));

/// Ids of the records `normalized` creates, in contribution order. May
/// contain duplicates.
pub fn infer_tokens(
  raw: &RawPrinting,
  normalized: &NormalizedCard,
  catalog: &Catalog,
) -> Vec<String> {
  let card = &normalized.card;
  let linked = linked_tokens(raw);
  let overrides = tables::overrides(override_key(raw, normalized));

  let mut tokens: Vec<String> = Vec::new();
  let mut parse_text = false;
  if !overrides.is_empty() {
    tokens.extend(overrides.iter().map(|id| (*id).to_owned()));
    tokens.extend(linked.iter().cloned());
  } else if !linked.is_empty() {
    tokens.extend(linked.iter().cloned());
  } else {
    parse_text = true;
  }

  let Some(text) = card.oracle_text.as_deref() else {
    return tokens;
  };

  if parse_text {
    for line in text.split('\n').filter(|l| l.contains(" token")) {
      tokens.extend(tokens_from_line(line, &linked, catalog));
    }
  }

  tokens.extend(
    tables::KEYWORD_TRIGGERS
      .iter()
      .filter(|(needle, _)| text.contains(needle))
      .map(|(_, id)| (*id).to_owned()),
  );

  if text.contains("emblem") {
    let emblem = format!("{} emblem", card.name);
    if let Some(id) = catalog.ids_for_name(&emblem).first() {
      tokens.push(id.clone());
    }
  }

  tokens
}

/// The override table is keyed by the front face name for faced printings.
fn override_key<'a>(raw: &'a RawPrinting, normalized: &'a NormalizedCard) -> &'a str {
  match (raw.faces().first(), normalized.role) {
    (Some(front), FaceRole::Front) => &front.name,
    _ => &normalized.card.name,
  }
}

/// Related parts that are tokens or emblems.
pub fn linked_tokens(raw: &RawPrinting) -> Vec<String> {
  raw
    .all_parts
    .iter()
    .flatten()
    .filter(|p| p.component == "token" || p.type_line.starts_with("Emblem"))
    .map(|p| p.id.clone())
    .collect()
}

fn tokens_from_line(line: &str, linked: &[String], catalog: &Catalog) -> Vec<String> {
  let Some(descriptor) = extract_token_descriptor(line) else {
    return Vec::new();
  };

  if let Some(id) = tables::universal_token(&descriptor.name) {
    return vec![id.to_owned()];
  }

  if descriptor.is_copy {
    if line.to_lowercase().contains(POPULATE_WORDING) {
      return Vec::new();
    }
    if linked.is_empty() {
      return vec![tables::GENERIC_COPY_TOKEN.to_owned()];
    }
    return linked.to_vec();
  }

  resolve(&descriptor, catalog).into_iter().collect()
}

/// First record under the descriptor's name whose attributes all agree.
pub fn resolve(descriptor: &TokenDescriptor, catalog: &Catalog) -> Option<String> {
  catalog
    .ids_for_name(&descriptor.name)
    .iter()
    .filter_map(|id| catalog.card(id))
    .filter(|candidate| matches_descriptor(candidate, descriptor))
    .map(|candidate| candidate.id.clone())
    .next()
}

fn matches_descriptor(candidate: &Card, descriptor: &TokenDescriptor) -> bool {
  candidate.power == descriptor.power
    && candidate.toughness == descriptor.toughness
    && candidate.colors.iter().cloned().collect::<BTreeSet<_>>() == descriptor.colors
    && candidate_type_words(&candidate.type_line) == descriptor.type_words
    && candidate_abilities(candidate.oracle_text.as_deref()) == descriptor.abilities
}

fn candidate_type_words(type_line: &str) -> BTreeSet<String> {
  type_line
    .to_lowercase()
    .split_whitespace()
    .filter(|w| *w != "—" && *w != "token")
    .map(str::to_owned)
    .collect()
}

fn candidate_abilities(text: Option<&str>) -> BTreeSet<String> {
  let Some(text) = text.filter(|t| !t.is_empty()) else {
    return BTreeSet::new();
  };
  REMINDER_TEXT
    .replace_all(&text.to_lowercase(), "")
    .split(", ")
    .filter(|a| !a.is_empty())
    .map(str::to_owned)
    .collect()
}
