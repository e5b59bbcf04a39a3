//! Catalog construction: normalization, indexing, token inference and
//! language linking over the raw card feeds.
//!
//! The crate is synchronous and does no I/O of its own; feeds arrive through
//! a [`CardSource`] and the finished [`Catalog`] renders its artifacts as
//! strings for a sink to persist.

mod artifact;
pub mod builder;
pub mod error;
mod language;
pub mod normalize;
pub mod popularity;
pub mod store;
pub mod tokens;
pub mod tree;


use cardbase_core::feed::CardSource;

pub use self::{
  builder::{BuildStats, CatalogBuilder, LanguagePass},
  error::{Error, Result},
  popularity::PopularityIndex,
  store::Catalog,
};

/// Run both passes over `source`.
///
/// Any source error aborts the build; nothing partial is returned.
pub fn build_catalog<S: CardSource>(source: &S) -> Result<(Catalog, BuildStats)> {
  let ratings = source.ratings().map_err(Error::from_source)?;
  let histories = source.histories().map_err(Error::from_source)?;
  let popularity = PopularityIndex::from_lists(
    ratings
      .collect::<Result<Vec<_>, _>>()
      .map_err(Error::from_source)?,
    histories
      .collect::<Result<Vec<_>, _>>()
      .map_err(Error::from_source)?,
  );
  tracing::info!(
    ratings = popularity.rating_count(),
    histories = popularity.history_count(),
    "loaded popularity data"
  );

  let mut builder = CatalogBuilder::new(popularity);
  for raw in source.english_printings().map_err(Error::from_source)? {
    builder.ingest(&raw.map_err(Error::from_source)?);
  }

  let mut pass = builder.finish_english();
  for raw in source.all_printings().map_err(Error::from_source)? {
    pass.link(&raw.map_err(Error::from_source)?);
  }

  Ok(pass.finish())
}
