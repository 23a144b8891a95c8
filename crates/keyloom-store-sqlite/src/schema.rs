//! Schema DDL for the Keyloom SQLite store.
//!
//! The schema is a fixed, ordered set of tagged migration steps. Every step is
//! individually idempotent (`CREATE TABLE IF NOT EXISTS` / `CREATE INDEX IF
//! NOT EXISTS`), so there is no mutable migration-version table: re-running
//! any step, in any process, converges to the same schema without touching
//! existing rows. The schema is additive-only — steps never `ALTER` or `DROP`.
//!
//! The documented order is base before extended, but the steps do not depend
//! on it: SQLite resolves `REFERENCES sessions(id)` at DML time, so creating
//! the extended tables first leaves a harmless forward reference.

/// One idempotent schema-creation step.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
  /// Short name used in logs.
  pub tag: &'static str,
  /// Batch of idempotent DDL statements.
  pub sql: &'static str,
}

/// Per-connection pragmas, applied at open time rather than with the DDL —
/// `foreign_keys` is connection-scoped and must be on for every connection,
/// not just the one that created the schema. Kept write-free so read-only
/// handles can apply them too.
pub const PRAGMAS: &str = "
PRAGMA foreign_keys = ON;
";

/// Base schema: sessions and their briefs.
pub const BASE: Migration = Migration {
  tag: "base",
  sql: "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    query       TEXT NOT NULL,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

-- Briefs are strictly append-only. A session accumulates briefs over time;
-- readers wanting 'the' brief take the newest row.
CREATE TABLE IF NOT EXISTS briefs (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id  INTEGER NOT NULL REFERENCES sessions(id),
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS sessions_created_idx ON sessions(created_at);
CREATE INDEX IF NOT EXISTS briefs_session_idx   ON briefs(session_id);
",
};

/// Extended schema: per-session suggestion and SERP-snapshot records.
pub const EXTENDED: Migration = Migration {
  tag: "extended",
  sql: "
CREATE TABLE IF NOT EXISTS suggestions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id  INTEGER NOT NULL REFERENCES sessions(id),
    content     TEXT NOT NULL,
    tag         TEXT,            -- optional classification
    created_at  TEXT NOT NULL
);

-- SERP snapshots may be re-fetched for the same query; every capture is a
-- new row. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS serps (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id  INTEGER NOT NULL REFERENCES sessions(id),
    payload     TEXT NOT NULL,   -- opaque snapshot, typically JSON
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS suggestions_session_idx ON suggestions(session_id);
CREATE INDEX IF NOT EXISTS serps_session_idx       ON serps(session_id);
",
};

/// All steps in the recommended application order.
pub const MIGRATIONS: [Migration; 2] = [BASE, EXTENDED];
