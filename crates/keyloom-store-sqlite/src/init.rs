//! Startup initializer.
//!
//! Runs schema creation once at process boot. Failures are logged and
//! swallowed: the service must come up and serve what it can even when the
//! storage medium is temporarily unavailable, and any later row operation
//! will surface its own error at the point of use.

use crate::SqliteStore;

/// Ensure the base and extended schemas exist, warning instead of failing.
///
/// Always returns normally. Callers that need schema failures to propagate
/// (the operator provisioning path) should call
/// [`SqliteStore::ensure_base_schema`] and
/// [`SqliteStore::ensure_extended_schema`] directly instead.
pub async fn initialize(store: &SqliteStore) {
  if let Err(e) = store.ensure_base_schema().await {
    tracing::warn!(error = %e, "base schema creation failed; continuing without it");
    return;
  }
  if let Err(e) = store.ensure_extended_schema().await {
    tracing::warn!(error = %e, "extended schema creation failed; continuing without it");
    return;
  }
  tracing::debug!("research store schema ready");
}
