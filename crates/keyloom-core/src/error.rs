//! Error taxonomy for `keyloom-core`.
//!
//! These are the caller-facing error classes. Storage backends keep their own
//! richer error types and convert into this enum at the trait boundary, so
//! generic callers (the API layer) can classify failures without naming a
//! concrete backend.

use thiserror::Error;

use crate::session::SessionId;

#[derive(Debug, Error)]
pub enum Error {
  /// A caller-supplied query string was empty or whitespace-only.
  #[error("query must not be empty")]
  EmptyQuery,

  /// A referenced session does not exist. Not retryable without correcting
  /// the reference.
  #[error("session not found: {0}")]
  SessionNotFound(SessionId),

  /// Schema creation failed because the storage medium is unreachable or
  /// write-protected. Never raised because a table already exists.
  #[error("schema creation failed: {0}")]
  Schema(String),

  /// Any other failure in the underlying medium during a row read or write.
  /// The core never retries; retry policy belongs to the caller.
  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
