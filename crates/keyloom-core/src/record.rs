//! Auxiliary per-session records: content suggestions and SERP snapshots.
//!
//! Both are strictly append-only. Repeated inserts with identical content are
//! distinct records; corrections are new rows, never mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// A discrete AI-generated content idea for a session's query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
  pub id:         i64,
  pub session_id: SessionId,
  pub content:    String,
  /// Optional classification (e.g. "blog-post", "faq").
  pub tag:        Option<String>,
  pub created_at: DateTime<Utc>,
}

/// A captured search-engine-results-page snapshot for a session's query.
///
/// The payload is opaque to the store — typically JSON from the SERP fetcher,
/// but nothing here parses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpRecord {
  pub id:         i64,
  pub session_id: SessionId,
  pub payload:    String,
  pub created_at: DateTime<Utc>,
}
