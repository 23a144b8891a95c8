//! Handlers for per-session suggestion and SERP-snapshot records.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/sessions/:id/suggestions` | Body: `{"content":"...","tag":"..."}` |
//! | `GET`  | `/sessions/:id/suggestions` | Insertion order; 404 if session missing |
//! | `POST` | `/sessions/:id/serps` | Body: `{"payload":"..."}`; payload is opaque |
//! | `GET`  | `/sessions/:id/serps` | Insertion order; 404 if session missing |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use keyloom_core::{
  record::{SerpRecord, Suggestion},
  session::SessionId,
  store::ResearchStore,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Suggestions ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SuggestionBody {
  pub content: String,
  pub tag:     Option<String>,
}

/// `POST /sessions/:id/suggestions`
pub async fn add_suggestion<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<SuggestionBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ResearchStore,
{
  let suggestion = store
    .add_suggestion(SessionId(id), &body.content, body.tag.as_deref())
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(suggestion)))
}

/// `GET /sessions/:id/suggestions`
pub async fn list_suggestions<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Suggestion>>, ApiError>
where
  S: ResearchStore,
{
  let suggestions = store
    .list_suggestions(SessionId(id))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(suggestions))
}

// ─── SERP snapshots ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SerpBody {
  pub payload: String,
}

/// `POST /sessions/:id/serps`
pub async fn add_serp<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<SerpBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ResearchStore,
{
  let serp = store
    .add_serp(SessionId(id), &body.payload)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(serp)))
}

/// `GET /sessions/:id/serps`
pub async fn list_serps<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<SerpRecord>>, ApiError>
where
  S: ResearchStore,
{
  let serps = store
    .list_serps(SessionId(id))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(serps))
}
