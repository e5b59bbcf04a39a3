//! Integration tests for `SqliteSink` against an in-memory database.

use cardbase_catalog::{CatalogBuilder, PopularityIndex};
use cardbase_core::{
  raw::RawPrinting,
  sink::{Artifact, CatalogSink},
};
use strum::IntoEnumIterator as _;

use crate::{SqliteSink, encode::digest};

async fn sink() -> SqliteSink {
  SqliteSink::open_in_memory()
    .await
    .expect("in-memory sink")
}

fn opt() -> RawPrinting {
  serde_json::from_value(serde_json::json!({
    "id": "opt-1",
    "oracle_id": "oracle-opt",
    "name": "Opt",
    "layout": "normal",
    "type_line": "Instant",
    "mana_cost": "{U}",
    "set": "xln",
    "collector_number": "65",
    "tcgplayer_id": 1
  }))
  .expect("valid printing")
}

#[tokio::test]
async fn missing_artifact_reads_as_none() {
  let s = sink().await;
  assert!(s.read_artifact(Artifact::Names).await.unwrap().is_none());
  assert!(s.artifact_names().await.unwrap().is_empty());
}

#[tokio::test]
async fn write_then_read() {
  let s = sink().await;
  s.write_artifact(Artifact::Names, "[\"opt\"]".into())
    .await
    .unwrap();

  let stored = s.read_artifact(Artifact::Names).await.unwrap().unwrap();
  assert_eq!(stored.name, "names");
  assert_eq!(stored.body, "[\"opt\"]");
  assert_eq!(stored.digest, digest("[\"opt\"]"));
}

#[tokio::test]
async fn rewrite_replaces_the_previous_body() {
  let s = sink().await;
  s.write_artifact(Artifact::English, "{}".into()).await.unwrap();
  let first = s.read_artifact(Artifact::English).await.unwrap().unwrap();

  s.write_artifact(Artifact::English, "{\"fr\":\"en\"}".into())
    .await
    .unwrap();
  let second = s.read_artifact(Artifact::English).await.unwrap().unwrap();

  assert_eq!(second.body, "{\"fr\":\"en\"}");
  assert_ne!(first.digest, second.digest);
  assert!(second.written_at >= first.written_at);
  assert_eq!(s.artifact_names().await.unwrap(), vec!["english"]);
}

#[tokio::test]
async fn publishes_every_catalog_artifact() {
  let mut builder = CatalogBuilder::new(PopularityIndex::new());
  builder.ingest(&opt());
  let (catalog, _) = builder.finish_english().finish();

  let s = sink().await;
  for artifact in Artifact::iter() {
    s.write_artifact(artifact, catalog.render(artifact).unwrap())
      .await
      .unwrap();
  }

  let mut expected: Vec<String> = Artifact::iter().map(|a| a.name().to_owned()).collect();
  expected.sort();
  assert_eq!(s.artifact_names().await.unwrap(), expected);

  let dict = s.read_artifact(Artifact::CardDict).await.unwrap().unwrap();
  let dict: serde_json::Value = serde_json::from_str(&dict.body).unwrap();
  assert_eq!(dict["opt-1"]["parsed_cost"], serde_json::json!(["u"]));
}

#[tokio::test]
async fn concurrent_writes_all_land() {
  let s = sink().await;
  let writes = Artifact::iter().map(|artifact| {
    let s = s.clone();
    tokio::spawn(async move { s.write_artifact(artifact, "[]".into()).await })
  });
  for handle in writes.collect::<Vec<_>>() {
    handle.await.unwrap().unwrap();
  }
  assert_eq!(s.artifact_names().await.unwrap().len(), 9);
}
