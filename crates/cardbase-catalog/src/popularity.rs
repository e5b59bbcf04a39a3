//! Rating, embedding and history lookups consulted while normalizing.
//!
//! Built once from the two auxiliary lists before the first feed pass and
//! never published.

use std::collections::HashMap;

use cardbase_core::{
  card::{DEFAULT_ELO, EMBEDDING_DIMENSIONS},
  normalize_name,
  raw::{History, HistorySnapshot, Rating},
};

#[derive(Debug, Clone)]
struct RatingEntry {
  elo:       f64,
  embedding: Vec<f64>,
}

/// Popularity data keyed by normalized card name (ratings) and oracle id
/// (histories).
#[derive(Debug, Clone, Default)]
pub struct PopularityIndex {
  ratings:   HashMap<String, RatingEntry>,
  histories: HashMap<String, HistorySnapshot>,
}

impl PopularityIndex {
  pub fn new() -> Self { Self::default() }

  pub fn from_lists(
    ratings: impl IntoIterator<Item = Rating>,
    histories: impl IntoIterator<Item = History>,
  ) -> Self {
    let mut index = Self::new();
    for rating in ratings {
      index.add_rating(rating);
    }
    for history in histories {
      index.add_history(history);
    }
    index
  }

  /// Later entries for the same name replace earlier ones.
  pub fn add_rating(&mut self, rating: Rating) {
    let entry = RatingEntry {
      elo:       rating.elo,
      embedding: unit_embedding(rating.embedding),
    };
    self.ratings.insert(normalize_name(&rating.name), entry);
  }

  pub fn add_history(&mut self, history: History) {
    self.histories.insert(history.oracle_id, history.current);
  }

  pub fn elo(&self, name: &str) -> f64 {
    self
      .ratings
      .get(&normalize_name(name))
      .map_or(DEFAULT_ELO, |r| r.elo)
  }

  pub fn embedding(&self, name: &str) -> Vec<f64> {
    self
      .ratings
      .get(&normalize_name(name))
      .map_or_else(zero_embedding, |r| r.embedding.clone())
  }

  pub fn history(&self, oracle_id: &str) -> Option<&HistorySnapshot> {
    self.histories.get(oracle_id)
  }

  pub fn rating_count(&self) -> usize { self.ratings.len() }

  pub fn history_count(&self) -> usize { self.histories.len() }
}

fn zero_embedding() -> Vec<f64> { vec![0.0; EMBEDDING_DIMENSIONS] }

/// Scale to unit length. Wrong-sized or zero vectors become the zero vector.
fn unit_embedding(raw: Option<Vec<f64>>) -> Vec<f64> {
  let Some(values) = raw.filter(|v| v.len() == EMBEDDING_DIMENSIONS) else {
    return zero_embedding();
  };
  let norm = values.iter().map(|x| x * x).sum::<f64>().sqrt();
  if norm > 0.0 {
    values.into_iter().map(|x| x / norm).collect()
  } else {
    zero_embedding()
  }
}

/// History fraction rounded to four places, expressed as a percentage.
pub(crate) fn popularity_percent(fraction: f64) -> f64 {
  (fraction * 10_000.0).round() / 100.0
}
