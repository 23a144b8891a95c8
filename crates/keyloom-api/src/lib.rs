//! JSON REST API for Keyloom.
//!
//! Exposes an axum [`Router`] backed by any
//! [`keyloom_core::store::ResearchStore`]. This layer is a thin caller: all
//! state management lives behind the store trait, and the AI components that
//! produce brief/suggestion/SERP content POST their output here as opaque
//! text.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", keyloom_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod records;
pub mod sessions;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use keyloom_core::store::ResearchStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` merged with
/// `KEYLOOM_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ResearchStore + 'static,
{
  Router::new()
    // Sessions
    .route(
      "/sessions",
      get(sessions::list::<S>).post(sessions::create::<S>),
    )
    .route("/sessions/{id}", get(sessions::get_one::<S>))
    // Briefs
    .route(
      "/sessions/{id}/brief",
      get(sessions::latest_brief::<S>).post(sessions::attach_brief::<S>),
    )
    .route("/sessions/{id}/briefs", get(sessions::list_briefs::<S>))
    // Suggestions
    .route(
      "/sessions/{id}/suggestions",
      get(records::list_suggestions::<S>).post(records::add_suggestion::<S>),
    )
    // SERP snapshots
    .route(
      "/sessions/{id}/serps",
      get(records::list_serps::<S>).post(records::add_serp::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
