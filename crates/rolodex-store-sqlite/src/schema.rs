//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One JSON document per contact. `collection` partitions production and
-- test data inside the same file.
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,
    doc_id      TEXT NOT NULL,   -- lowercased contact name
    body        TEXT NOT NULL,   -- JSON object, unset fields omitted
    PRIMARY KEY (collection, doc_id)
);

PRAGMA user_version = 1;
";
