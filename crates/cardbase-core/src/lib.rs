//! Core types and trait definitions for the cardbase catalog builder.
//!
//! This crate is deliberately free of database and runtime dependencies.
//! It holds the raw feed shapes, the canonical card record, name
//! normalization, and the source/sink seams the other crates plug into.

// We intentionally use native `async fn` / `impl Future` in traits.
#![allow(async_fn_in_trait)]

pub mod card;
pub mod error;
pub mod feed;
pub mod name;
pub mod raw;
pub mod sink;

pub use error::{Error, Result};
pub use name::normalize_name;
