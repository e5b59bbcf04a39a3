//! SQL schema for the artifact sink.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per named artifact; a publish replaces the previous body.
CREATE TABLE IF NOT EXISTS artifacts (
    name        TEXT PRIMARY KEY,   -- artifact name, e.g. 'carddict'
    body        TEXT NOT NULL,      -- rendered JSON
    digest      TEXT NOT NULL,      -- lowercase hex SHA-256 of body
    written_at  TEXT NOT NULL       -- RFC 3339 UTC
);

PRAGMA user_version = 1;
";
