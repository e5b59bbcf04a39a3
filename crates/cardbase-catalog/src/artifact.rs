//! Rendering the catalog's named artifacts to JSON.

use cardbase_core::sink::Artifact;

use crate::{Result, store::Catalog, tree::PrefixTree};

impl Catalog {
  /// Serialize one artifact to its JSON body.
  pub fn render(&self, artifact: Artifact) -> Result<String> {
    let body = match artifact {
      Artifact::Names => serde_json::to_string(&self.names)?,
      Artifact::CardTree => {
        serde_json::to_string(&PrefixTree::from_words(&self.names))?
      }
      Artifact::CardDict => serde_json::to_string(&self.cards)?,
      Artifact::NameToId => serde_json::to_string(&self.name_to_ids)?,
      Artifact::OracleToId => serde_json::to_string(&self.oracle_to_ids)?,
      Artifact::English => serde_json::to_string(&self.english)?,
      Artifact::FullNames => {
        serde_json::to_string(&PrefixTree::from_words(&self.full_names))?
      }
      Artifact::ImageDict => serde_json::to_string(&self.image_dict)?,
      Artifact::CardImages => serde_json::to_string(&self.card_images)?,
    };
    tracing::debug!(artifact = %artifact, bytes = body.len(), "rendered artifact");
    Ok(body)
  }
}
