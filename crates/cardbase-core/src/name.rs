//! Name normalization shared by every index key.

use unicode_normalization::UnicodeNormalization as _;

/// Lowercase, strip combining diacritics, and trim.
///
/// Idempotent: `normalize_name(&normalize_name(x)) == normalize_name(x)`.
pub fn normalize_name(name: &str) -> String {
  let folded: String = name
    .to_lowercase()
    .nfd()
    .filter(|c| !is_combining_diacritic(*c))
    .collect();
  folded.trim().to_owned()
}

/// The Combining Diacritical Marks block (U+0300–U+036F).
fn is_combining_diacritic(c: char) -> bool { ('\u{0300}'..='\u{036f}').contains(&c) }
