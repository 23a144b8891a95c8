//! Handlers for `/sessions` and brief sub-resources.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/sessions` | Optional `?limit=k`; newest first |
//! | `POST` | `/sessions` | Body: `{"query":"..."}`; 400 on empty query |
//! | `GET`  | `/sessions/:id` | 404 if not found |
//! | `POST` | `/sessions/:id/brief` | Body: `{"content":"..."}`; appends |
//! | `GET`  | `/sessions/:id/brief` | Latest brief; 404 when none |
//! | `GET`  | `/sessions/:id/briefs` | All briefs, oldest first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use keyloom_core::{
  session::{Brief, Session, SessionId},
  store::{DEFAULT_RECENT_LIMIT, ResearchStore},
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit: Option<usize>,
}

/// `GET /sessions[?limit=k]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Session>>, ApiError>
where
  S: ResearchStore,
{
  let sessions = store
    .recent_sessions(params.limit.unwrap_or(DEFAULT_RECENT_LIMIT))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(sessions))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub query: String,
}

/// `POST /sessions` — body: `{"query":"..."}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ResearchStore,
{
  let session = store
    .create_session(&body.query)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(session)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /sessions/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Session>, ApiError>
where
  S: ResearchStore,
{
  let session = store
    .get_session(SessionId(id))
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("session {id} not found")))?;
  Ok(Json(session))
}

// ─── Briefs ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BriefBody {
  pub content: String,
}

/// `POST /sessions/:id/brief` — appends a new brief row.
pub async fn attach_brief<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<BriefBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ResearchStore,
{
  let brief = store
    .attach_brief(SessionId(id), &body.content)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(brief)))
}

/// `GET /sessions/:id/brief` — the most recent brief.
pub async fn latest_brief<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Brief>, ApiError>
where
  S: ResearchStore,
{
  let brief = store
    .latest_brief(SessionId(id))
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("session {id} has no brief")))?;
  Ok(Json(brief))
}

/// `GET /sessions/:id/briefs` — full append-only history, oldest first.
pub async fn list_briefs<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Brief>>, ApiError>
where
  S: ResearchStore,
{
  let briefs = store
    .list_briefs(SessionId(id))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(briefs))
}
