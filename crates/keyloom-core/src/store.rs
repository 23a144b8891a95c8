//! The `ResearchStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `keyloom-store-sqlite`).
//! Higher layers (`keyloom-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  record::{SerpRecord, Suggestion},
  session::{Brief, Session, SessionId},
};

/// Default cap for [`ResearchStore::recent_sessions`].
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Abstraction over a Keyloom research store backend.
///
/// All artifact writes are append-only: briefs, suggestions, and SERP records
/// are never updated or deleted, and identical payloads inserted twice yield
/// two records. The store assigns ids and timestamps at insert time.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ResearchStore: Send + Sync {
  type Error: std::error::Error
    + Into<crate::Error>
    + Send
    + Sync
    + 'static;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Create and persist a new session for `query`.
  ///
  /// Fails with the validation error if `query` is empty or whitespace-only;
  /// no row is written in that case.
  fn create_session<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Session, Self::Error>> + Send + 'a;

  /// Retrieve a session by id. Returns `None` if not found.
  fn get_session(
    &self,
    id: SessionId,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + '_;

  /// Return up to `limit` sessions, most recent first. Ties on the creation
  /// timestamp are broken by descending id. An empty store yields an empty
  /// `Vec`, never an error.
  fn recent_sessions(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Session>, Self::Error>> + Send + '_;

  // ── Briefs ────────────────────────────────────────────────────────────

  /// Attach a new brief to an existing session. Append-only: every call
  /// inserts a new row, and callers wanting a single current brief should use
  /// [`ResearchStore::latest_brief`].
  fn attach_brief<'a>(
    &'a self,
    session_id: SessionId,
    content: &'a str,
  ) -> impl Future<Output = Result<Brief, Self::Error>> + Send + 'a;

  /// The most recently attached brief for a session, or `None` if the session
  /// has no brief yet. Fails if the session itself does not exist.
  fn latest_brief(
    &self,
    session_id: SessionId,
  ) -> impl Future<Output = Result<Option<Brief>, Self::Error>> + Send + '_;

  /// All briefs for a session, oldest first.
  fn list_briefs(
    &self,
    session_id: SessionId,
  ) -> impl Future<Output = Result<Vec<Brief>, Self::Error>> + Send + '_;

  // ── Suggestions ───────────────────────────────────────────────────────

  /// Append a content suggestion for an existing session. No deduplication is
  /// performed against prior records.
  fn add_suggestion<'a>(
    &'a self,
    session_id: SessionId,
    content: &'a str,
    tag: Option<&'a str>,
  ) -> impl Future<Output = Result<Suggestion, Self::Error>> + Send + 'a;

  /// All suggestions for a session in insertion order. An existing session
  /// with no suggestions yields an empty `Vec`; a missing session fails.
  fn list_suggestions(
    &self,
    session_id: SessionId,
  ) -> impl Future<Output = Result<Vec<Suggestion>, Self::Error>> + Send + '_;

  // ── SERP snapshots ────────────────────────────────────────────────────

  /// Append a SERP snapshot for an existing session. Snapshots for the same
  /// query may be captured repeatedly over time; each call stores a new row.
  fn add_serp<'a>(
    &'a self,
    session_id: SessionId,
    payload: &'a str,
  ) -> impl Future<Output = Result<SerpRecord, Self::Error>> + Send + 'a;

  /// All SERP snapshots for a session in insertion order. Same not-found
  /// semantics as [`ResearchStore::list_suggestions`].
  fn list_serps(
    &self,
    session_id: SessionId,
  ) -> impl Future<Output = Result<Vec<SerpRecord>, Self::Error>> + Send + '_;
}
