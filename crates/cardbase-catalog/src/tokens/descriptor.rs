//! Extracting a token description from one line of rules text.
//!
//! The pattern is best-effort: it recognises the common "create a 2/2 green
//! Wolf creature token with trample" family of phrasings and some named and
//! legendary variants. Lines it cannot read yield `None`.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::{Captures, Regex};

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(concat!(
    r#"((?:(?:([A-Za-z ,]+), a (legendary))|[Xa-z ]+))"#,
    r#"(?: ([0-9X]+/[0-9X]+))?"#,
    r#" ((?:red|colorless|green|white|black|blue| and )+)?"#,
    r#"(?: ?((?:(?:[A-Z][a-z]+ )+)|[a-z]+))?"#,
    r#"((?:legendary|artifact|creature|Aura|enchantment| )*)?"#,
    r#"tokens?"#,
    r#"( that are copies of)?"#,
    r#"(?: named ((?:[A-Z][a-z]+ ?|of ?)+(?:'s \w+)?)?)?"#,
    r#"(?:(?: with |\. It has )?((?:(".*")|[a-z]+| and )+)+)?"#,
    r#"(?:.*(a copy of))?"#,
  ))
  .expect("token pattern is valid")
});

static QUOTED_TEXT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#" *"[^"]*" *"#).expect("quote pattern is valid"));

/// Everything the text says about a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenDescriptor {
  pub name:       String,
  /// `X` is spelled `*`.
  pub power:      Option<String>,
  pub toughness:  Option<String>,
  /// Single-letter color codes.
  pub colors:     BTreeSet<String>,
  /// Lowercase super, card and sub types.
  pub type_words: BTreeSet<String>,
  /// Lowercase keyword and quoted abilities.
  pub abilities:  BTreeSet<String>,
  pub is_copy:    bool,
}

/// Capture groups of [`TOKEN_PATTERN`].
mod group {
  pub const PHRASE: usize = 1;
  pub const LEGENDARY_NAME: usize = 2;
  pub const LEGENDARY: usize = 3;
  pub const POWER_TOUGHNESS: usize = 4;
  pub const COLORS: usize = 5;
  pub const SUBTYPES: usize = 6;
  pub const SUPERTYPES: usize = 7;
  pub const COPIES_OF: usize = 8;
  pub const NAMED: usize = 9;
  pub const KEYWORDS: usize = 10;
  pub const QUOTED: usize = 11;
  pub const A_COPY_OF: usize = 12;
}

/// Non-empty capture text.
fn capture<'h>(caps: &Captures<'h>, i: usize) -> Option<&'h str> {
  caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty())
}

pub fn extract_token_descriptor(line: &str) -> Option<TokenDescriptor> {
  let caps = TOKEN_PATTERN.captures(line)?;

  let subtypes = capture(&caps, group::SUBTYPES).map_or("", str::trim);
  let mut supertypes = capture(&caps, group::SUPERTYPES)
    .map_or("", str::trim)
    .to_owned();
  if capture(&caps, group::LEGENDARY).is_some() {
    supertypes = format!("legendary {supertypes}");
  }

  let name = match capture(&caps, group::NAMED) {
    Some(named) => named.trim(),
    None => capture(&caps, group::LEGENDARY_NAME).unwrap_or(subtypes),
  }
  .to_owned();

  let color_words =
    capture(&caps, group::COLORS).or_else(|| capture(&caps, group::PHRASE));
  let colors = color_words
    .into_iter()
    .flat_map(|s| s.trim().split(' '))
    .filter_map(color_code)
    .map(str::to_owned)
    .collect();

  let (power, toughness) = match capture(&caps, group::POWER_TOUGHNESS) {
    Some(pt) => {
      let pt = pt.replace('X', "*");
      let mut parts = pt.split('/').map(str::to_owned);
      (parts.next(), parts.next())
    }
    None if line.contains("power and toughness are each equal") => {
      (Some("*".to_owned()), Some("*".to_owned()))
    }
    None => (None, None),
  };

  let type_words = format!("{supertypes} {subtypes}")
    .to_lowercase()
    .split(' ')
    .filter(|w| !w.is_empty())
    .map(str::to_owned)
    .collect();

  let mut abilities = BTreeSet::new();
  if let Some(keywords) = capture(&caps, group::KEYWORDS) {
    let keywords = QUOTED_TEXT
      .replace_all(&keywords.to_lowercase(), "")
      .replacen(" and ", ",", 1);
    abilities.extend(
      keywords
        .split(',')
        .filter(|p| !p.is_empty())
        .map(str::to_owned),
    );
  }
  if let Some(quoted) = capture(&caps, group::QUOTED) {
    abilities.extend(
      quoted
        .to_lowercase()
        .split('"')
        .filter(|p| !p.is_empty())
        .map(str::to_owned),
    );
  }

  Some(TokenDescriptor {
    name,
    power,
    toughness,
    colors,
    type_words,
    abilities,
    is_copy: capture(&caps, group::A_COPY_OF).is_some()
      || capture(&caps, group::COPIES_OF).is_some(),
  })
}

fn color_code(word: &str) -> Option<&'static str> {
  match word.to_lowercase().as_str() {
    "white" => Some("W"),
    "blue" => Some("U"),
    "black" => Some("B"),
    "red" => Some("R"),
    "green" => Some("G"),
    _ => None,
  }
}
