//! [`SqliteStore`] — the SQLite implementation of [`ResearchStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use keyloom_core::{
  record::{SerpRecord, Suggestion},
  session::{Brief, Session, SessionId},
  store::ResearchStore,
};

use crate::{
  encode::{encode_dt, RawBrief, RawSerpRecord, RawSession, RawSuggestion},
  schema::{Migration, BASE, EXTENDED, PRAGMAS},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Keyloom research store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Opening a
/// store applies per-connection pragmas but no DDL; schema creation is the
/// explicit [`ensure_base_schema`](SqliteStore::ensure_base_schema) /
/// [`ensure_extended_schema`](SqliteStore::ensure_extended_schema) pair,
/// normally driven by [`crate::init::initialize`] at boot.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.apply_pragmas().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.apply_pragmas().await?;
    Ok(store)
  }

  /// Open an existing store without write access, for read-side tooling.
  /// Any schema or row write through this handle will fail.
  pub async fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_with_flags(
      path,
      rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
        | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .await?;
    let store = Self { conn };
    store.apply_pragmas().await?;
    Ok(store)
  }

  async fn apply_pragmas(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Schema management ─────────────────────────────────────────────────────

  /// Create the sessions and briefs tables if absent.
  ///
  /// Idempotent and safe to run concurrently from multiple processes; the
  /// engine serializes the DDL and `IF NOT EXISTS` makes re-runs no-ops.
  pub async fn ensure_base_schema(&self) -> Result<()> {
    self.apply_migration(&BASE).await
  }

  /// Create the suggestions and serps tables if absent.
  ///
  /// Does not require [`ensure_base_schema`](SqliteStore::ensure_base_schema)
  /// to have run first: the foreign-key reference to `sessions` is resolved
  /// at row-write time, not at table creation.
  pub async fn ensure_extended_schema(&self) -> Result<()> {
    self.apply_migration(&EXTENDED).await
  }

  async fn apply_migration(&self, step: &'static Migration) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(step.sql)?;
        Ok(())
      })
      .await
      .map_err(Error::Schema)?;
    tracing::debug!(step = step.tag, "schema step applied");
    Ok(())
  }

  // ── Internal helpers ──────────────────────────────────────────────────────

  /// Fail with [`Error::SessionNotFound`] unless `id` references a session.
  ///
  /// Sessions are never deleted, so a positive answer cannot go stale between
  /// this check and a following insert.
  async fn require_session(&self, id: SessionId) -> Result<()> {
    let raw_id = id.0;
    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM sessions WHERE id = ?1",
              rusqlite::params![raw_id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    if exists { Ok(()) } else { Err(Error::SessionNotFound(id)) }
  }
}

// ─── ResearchStore impl ──────────────────────────────────────────────────────

impl ResearchStore for SqliteStore {
  type Error = Error;

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn create_session(&self, query: &str) -> Result<Session> {
    if query.trim().is_empty() {
      return Err(Error::EmptyQuery);
    }

    let created_at = Utc::now();
    let query_owned = query.to_owned();
    let at_str = encode_dt(created_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (query, created_at) VALUES (?1, ?2)",
          rusqlite::params![query_owned, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Session {
      id: SessionId(id),
      query: query.to_owned(),
      created_at,
    })
  }

  async fn get_session(&self, id: SessionId) -> Result<Option<Session>> {
    let raw_id = id.0;

    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, query, created_at FROM sessions WHERE id = ?1",
              rusqlite::params![raw_id],
              |row| {
                Ok(RawSession {
                  id:         row.get(0)?,
                  query:      row.get(1)?,
                  created_at: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSession::into_session).transpose()
  }

  async fn recent_sessions(&self, limit: usize) -> Result<Vec<Session>> {
    // Saturate rather than wrap: a negative SQLite LIMIT means unbounded.
    let limit_val = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawSession> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, query, created_at FROM sessions
           ORDER BY created_at DESC, id DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], |row| {
            Ok(RawSession {
              id:         row.get(0)?,
              query:      row.get(1)?,
              created_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSession::into_session).collect()
  }

  // ── Briefs ────────────────────────────────────────────────────────────────

  async fn attach_brief(
    &self,
    session_id: SessionId,
    content: &str,
  ) -> Result<Brief> {
    self.require_session(session_id).await?;

    let created_at = Utc::now();
    let raw_session = session_id.0;
    let content_owned = content.to_owned();
    let at_str = encode_dt(created_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO briefs (session_id, content, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![raw_session, content_owned, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Brief {
      id,
      session_id,
      content: content.to_owned(),
      created_at,
    })
  }

  async fn latest_brief(&self, session_id: SessionId) -> Result<Option<Brief>> {
    self.require_session(session_id).await?;

    let raw_session = session_id.0;
    let raw: Option<RawBrief> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, session_id, content, created_at FROM briefs
               WHERE session_id = ?1
               ORDER BY created_at DESC, id DESC
               LIMIT 1",
              rusqlite::params![raw_session],
              |row| {
                Ok(RawBrief {
                  id:         row.get(0)?,
                  session_id: row.get(1)?,
                  content:    row.get(2)?,
                  created_at: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawBrief::into_brief).transpose()
  }

  async fn list_briefs(&self, session_id: SessionId) -> Result<Vec<Brief>> {
    self.require_session(session_id).await?;

    let raw_session = session_id.0;
    let raws: Vec<RawBrief> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, session_id, content, created_at FROM briefs
           WHERE session_id = ?1
           ORDER BY id ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![raw_session], |row| {
            Ok(RawBrief {
              id:         row.get(0)?,
              session_id: row.get(1)?,
              content:    row.get(2)?,
              created_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBrief::into_brief).collect()
  }

  // ── Suggestions ───────────────────────────────────────────────────────────

  async fn add_suggestion(
    &self,
    session_id: SessionId,
    content: &str,
    tag: Option<&str>,
  ) -> Result<Suggestion> {
    self.require_session(session_id).await?;

    let created_at = Utc::now();
    let raw_session = session_id.0;
    let content_owned = content.to_owned();
    let tag_owned = tag.map(str::to_owned);
    let tag_for_insert = tag_owned.clone();
    let at_str = encode_dt(created_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO suggestions (session_id, content, tag, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![raw_session, content_owned, tag_for_insert, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Suggestion {
      id,
      session_id,
      content: content.to_owned(),
      tag: tag_owned,
      created_at,
    })
  }

  async fn list_suggestions(
    &self,
    session_id: SessionId,
  ) -> Result<Vec<Suggestion>> {
    self.require_session(session_id).await?;

    let raw_session = session_id.0;
    let raws: Vec<RawSuggestion> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, session_id, content, tag, created_at FROM suggestions
           WHERE session_id = ?1
           ORDER BY id ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![raw_session], |row| {
            Ok(RawSuggestion {
              id:         row.get(0)?,
              session_id: row.get(1)?,
              content:    row.get(2)?,
              tag:        row.get(3)?,
              created_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawSuggestion::into_suggestion)
      .collect()
  }

  // ── SERP snapshots ────────────────────────────────────────────────────────

  async fn add_serp(
    &self,
    session_id: SessionId,
    payload: &str,
  ) -> Result<SerpRecord> {
    self.require_session(session_id).await?;

    let created_at = Utc::now();
    let raw_session = session_id.0;
    let payload_owned = payload.to_owned();
    let at_str = encode_dt(created_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO serps (session_id, payload, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![raw_session, payload_owned, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(SerpRecord {
      id,
      session_id,
      payload: payload.to_owned(),
      created_at,
    })
  }

  async fn list_serps(&self, session_id: SessionId) -> Result<Vec<SerpRecord>> {
    self.require_session(session_id).await?;

    let raw_session = session_id.0;
    let raws: Vec<RawSerpRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, session_id, payload, created_at FROM serps
           WHERE session_id = ?1
           ORDER BY id ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![raw_session], |row| {
            Ok(RawSerpRecord {
              id:         row.get(0)?,
              session_id: row.get(1)?,
              payload:    row.get(2)?,
              created_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSerpRecord::into_serp).collect()
  }
}
