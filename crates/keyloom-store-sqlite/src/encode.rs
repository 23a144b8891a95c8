//! Decoding helpers between SQLite rows and the core domain types.
//!
//! Timestamps are stored as RFC 3339 strings and ids as SQLite rowids, so the
//! raw row structs hold `(i64, String)` pairs that only need timestamp
//! parsing on the way out.

use chrono::{DateTime, Utc};
use keyloom_core::{
  record::{SerpRecord, Suggestion},
  session::{Brief, Session, SessionId},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// A `sessions` row as read from SQLite.
pub struct RawSession {
  pub id:         i64,
  pub query:      String,
  pub created_at: String,
}

impl RawSession {
  pub fn into_session(self) -> Result<Session> {
    Ok(Session {
      id:         SessionId(self.id),
      query:      self.query,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// A `briefs` row as read from SQLite.
pub struct RawBrief {
  pub id:         i64,
  pub session_id: i64,
  pub content:    String,
  pub created_at: String,
}

impl RawBrief {
  pub fn into_brief(self) -> Result<Brief> {
    Ok(Brief {
      id:         self.id,
      session_id: SessionId(self.session_id),
      content:    self.content,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// A `suggestions` row as read from SQLite.
pub struct RawSuggestion {
  pub id:         i64,
  pub session_id: i64,
  pub content:    String,
  pub tag:        Option<String>,
  pub created_at: String,
}

impl RawSuggestion {
  pub fn into_suggestion(self) -> Result<Suggestion> {
    Ok(Suggestion {
      id:         self.id,
      session_id: SessionId(self.session_id),
      content:    self.content,
      tag:        self.tag,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// A `serps` row as read from SQLite.
pub struct RawSerpRecord {
  pub id:         i64,
  pub session_id: i64,
  pub payload:    String,
  pub created_at: String,
}

impl RawSerpRecord {
  pub fn into_serp(self) -> Result<SerpRecord> {
    Ok(SerpRecord {
      id:         self.id,
      session_id: SessionId(self.session_id),
      payload:    self.payload,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
