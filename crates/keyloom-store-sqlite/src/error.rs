//! Error type for `keyloom-store-sqlite`.

use keyloom_core::session::SessionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// Schema DDL could not be applied — medium unreachable or read-only.
  /// `CREATE ... IF NOT EXISTS` means "already exists" is never an error.
  #[error("schema creation failed: {0}")]
  Schema(#[source] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("session not found: {0}")]
  SessionNotFound(SessionId),

  #[error("query must not be empty")]
  EmptyQuery,
}

/// Collapse into the caller-facing taxonomy so generic consumers of
/// [`ResearchStore`](keyloom_core::store::ResearchStore) can classify
/// failures without depending on this crate.
impl From<Error> for keyloom_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::EmptyQuery => keyloom_core::Error::EmptyQuery,
      Error::SessionNotFound(id) => keyloom_core::Error::SessionNotFound(id),
      Error::Schema(inner) => keyloom_core::Error::Schema(inner.to_string()),
      Error::Database(inner) => keyloom_core::Error::Storage(inner.to_string()),
      Error::DateParse(msg) => keyloom_core::Error::Storage(msg),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
