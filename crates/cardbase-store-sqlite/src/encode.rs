//! Plain-text column encodings.
//!
//! Timestamps are stored as RFC 3339 strings; digests as lowercase hex.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

// ─── Digest ──────────────────────────────────────────────────────────────────

/// SHA-256 of `body`, hex encoded.
pub fn digest(body: &str) -> String { hex::encode(Sha256::digest(body.as_bytes())) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn digest_is_stable_hex() {
    let d = digest("[]");
    assert_eq!(d.len(), 64);
    assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(d, digest("[]"));
    assert_ne!(d, digest("{}"));
  }

  #[test]
  fn timestamps_round_trip() {
    let dt = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
    assert_eq!(decode_dt(&encode_dt(dt)).unwrap(), dt);
    assert!(decode_dt("yesterday").is_err());
  }
}
