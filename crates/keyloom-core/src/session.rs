//! Session — one keyword-research query plus its derived artifacts.
//!
//! A session holds only the query and identity metadata. The AI-generated
//! artifacts (brief, suggestions, SERP snapshots) live in their own
//! append-only rows keyed to the session.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned session identifier.
///
/// Monotonically assigned by the backend and never reused, so descending id
/// order matches reverse insertion order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(pub i64);

impl fmt::Display for SessionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// One research session: the user's keyword/topic query and when it started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id:         SessionId,
  pub query:      String,
  pub created_at: DateTime<Utc>,
}

/// AI-generated narrative content attached to a session.
///
/// Briefs are append-only: a session may accumulate several, and callers
/// wanting "the current brief" take the most recent one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brief {
  pub id:         i64,
  pub session_id: SessionId,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}
