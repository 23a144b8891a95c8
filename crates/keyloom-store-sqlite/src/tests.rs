//! Integration tests for `SqliteStore` against an in-memory database.

use keyloom_core::{session::SessionId, store::ResearchStore};

use crate::{init, SqliteStore};

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  s.ensure_base_schema().await.expect("base schema");
  s.ensure_extended_schema().await.expect("extended schema");
  s
}

/// Count rows in `table` through the raw connection.
async fn count_rows(s: &SqliteStore, table: &'static str) -> i64 {
  s.conn
    .call(move |conn| {
      Ok(conn.query_row(
        &format!("SELECT COUNT(*) FROM {table}"),
        [],
        |row| row.get(0),
      )?)
    })
    .await
    .unwrap()
}

/// Names of all user tables, sorted.
async fn table_names(s: &SqliteStore) -> Vec<String> {
  s.conn
    .call(|conn| {
      let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
      )?;
      let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
      Ok(rows)
    })
    .await
    .unwrap()
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_fetch_session() {
  let s = store().await;

  let session = s.create_session("rust sqlite tutorial").await.unwrap();
  assert_eq!(session.query, "rust sqlite tutorial");

  let fetched = s.get_session(session.id).await.unwrap();
  assert!(fetched.is_some());
  let fetched = fetched.unwrap();
  assert_eq!(fetched.id, session.id);
  assert_eq!(fetched.query, "rust sqlite tutorial");
}

#[tokio::test]
async fn get_session_missing_returns_none() {
  let s = store().await;
  let result = s.get_session(SessionId(999)).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn create_session_rejects_empty_query() {
  let s = store().await;

  let err = s.create_session("").await.unwrap_err();
  assert!(matches!(err, crate::Error::EmptyQuery));

  let err = s.create_session("   ").await.unwrap_err();
  assert!(matches!(err, crate::Error::EmptyQuery));

  // Neither attempt wrote a row.
  assert_eq!(count_rows(&s, "sessions").await, 0);
}

#[tokio::test]
async fn session_ids_are_unique_and_increasing() {
  let s = store().await;

  let a = s.create_session("first").await.unwrap();
  let b = s.create_session("second").await.unwrap();
  let c = s.create_session("third").await.unwrap();

  assert!(a.id < b.id);
  assert!(b.id < c.id);
}

#[tokio::test]
async fn session_timestamps_never_decrease() {
  let s = store().await;

  let a = s.create_session("first").await.unwrap();
  let b = s.create_session("second").await.unwrap();
  let c = s.create_session("third").await.unwrap();

  assert!(a.created_at <= b.created_at);
  assert!(b.created_at <= c.created_at);
}

// ─── Recency reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn recent_sessions_empty_store() {
  let s = store().await;
  let recent = s.recent_sessions(10).await.unwrap();
  assert!(recent.is_empty());
}

#[tokio::test]
async fn newest_session_comes_back_first() {
  let s = store().await;

  s.create_session("older query").await.unwrap();
  let newest = s.create_session("newest query").await.unwrap();

  let recent = s.recent_sessions(1).await.unwrap();
  assert_eq!(recent.len(), 1);
  assert_eq!(recent[0].id, newest.id);
  assert_eq!(recent[0].query, "newest query");
}

#[tokio::test]
async fn recent_sessions_respects_limit_and_order() {
  let s = store().await;

  let mut ids = Vec::new();
  for i in 0..5 {
    ids.push(s.create_session(&format!("query {i}")).await.unwrap().id);
  }

  let recent = s.recent_sessions(3).await.unwrap();
  assert_eq!(recent.len(), 3);

  // Newest first; timestamp ties fall back to descending id, so the result
  // is exactly the last three ids reversed.
  let got: Vec<_> = recent.iter().map(|sess| sess.id).collect();
  assert_eq!(got, vec![ids[4], ids[3], ids[2]]);
}

#[tokio::test]
async fn recent_sessions_with_oversized_limit_returns_everything() {
  let s = store().await;

  for i in 0..3 {
    s.create_session(&format!("query {i}")).await.unwrap();
  }

  // A limit beyond i64 range must saturate, not wrap into a negative
  // (unbounded-by-accident) SQLite LIMIT.
  let recent = s.recent_sessions(usize::MAX).await.unwrap();
  assert_eq!(recent.len(), 3);
  assert_eq!(recent[0].query, "query 2");
}

// ─── Briefs ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn attach_and_fetch_latest_brief() {
  let s = store().await;
  let session = s.create_session("keyword gap analysis").await.unwrap();

  let brief = s
    .attach_brief(session.id, "An overview of keyword gaps.")
    .await
    .unwrap();
  assert_eq!(brief.session_id, session.id);

  let latest = s.latest_brief(session.id).await.unwrap().unwrap();
  assert_eq!(latest.id, brief.id);
  assert_eq!(latest.content, "An overview of keyword gaps.");
}

#[tokio::test]
async fn attach_brief_missing_session_errors() {
  let s = store().await;

  let err = s
    .attach_brief(SessionId(42), "orphan brief")
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::SessionNotFound(SessionId(42))));

  assert_eq!(count_rows(&s, "briefs").await, 0);
}

#[tokio::test]
async fn briefs_append_and_latest_wins() {
  let s = store().await;
  let session = s.create_session("content refresh").await.unwrap();

  s.attach_brief(session.id, "first draft").await.unwrap();
  let second = s.attach_brief(session.id, "second draft").await.unwrap();

  let all = s.list_briefs(session.id).await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].content, "first draft");
  assert_eq!(all[1].content, "second draft");

  let latest = s.latest_brief(session.id).await.unwrap().unwrap();
  assert_eq!(latest.id, second.id);
  assert_eq!(latest.content, "second draft");
}

#[tokio::test]
async fn latest_brief_none_before_any_attach() {
  let s = store().await;
  let session = s.create_session("no brief yet").await.unwrap();

  let latest = s.latest_brief(session.id).await.unwrap();
  assert!(latest.is_none());
}

#[tokio::test]
async fn latest_brief_missing_session_errors() {
  let s = store().await;
  let err = s.latest_brief(SessionId(7)).await.unwrap_err();
  assert!(matches!(err, crate::Error::SessionNotFound(_)));
}

// ─── Suggestions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn suggestions_come_back_in_insertion_order() {
  let s = store().await;
  let session = s.create_session("email marketing").await.unwrap();

  for i in 0..4 {
    s.add_suggestion(session.id, &format!("idea {i}"), Some("blog-post"))
      .await
      .unwrap();
  }

  let listed = s.list_suggestions(session.id).await.unwrap();
  assert_eq!(listed.len(), 4);
  for (i, suggestion) in listed.iter().enumerate() {
    assert_eq!(suggestion.content, format!("idea {i}"));
    assert_eq!(suggestion.tag.as_deref(), Some("blog-post"));
  }
}

#[tokio::test]
async fn suggestions_empty_list_is_not_an_error() {
  let s = store().await;
  let session = s.create_session("quiet session").await.unwrap();

  let listed = s.list_suggestions(session.id).await.unwrap();
  assert!(listed.is_empty());
}

#[tokio::test]
async fn list_suggestions_missing_session_errors() {
  let s = store().await;
  let err = s.list_suggestions(SessionId(9000)).await.unwrap_err();
  assert!(matches!(err, crate::Error::SessionNotFound(_)));
}

#[tokio::test]
async fn duplicate_suggestions_are_distinct_records() {
  let s = store().await;
  let session = s.create_session("dup check").await.unwrap();

  let a = s
    .add_suggestion(session.id, "same idea", None)
    .await
    .unwrap();
  let b = s
    .add_suggestion(session.id, "same idea", None)
    .await
    .unwrap();
  assert_ne!(a.id, b.id);

  let listed = s.list_suggestions(session.id).await.unwrap();
  assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn add_suggestion_missing_session_errors() {
  let s = store().await;
  let err = s
    .add_suggestion(SessionId(1), "lost idea", None)
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::SessionNotFound(_)));
  assert_eq!(count_rows(&s, "suggestions").await, 0);
}

// ─── SERP snapshots ──────────────────────────────────────────────────────────

#[tokio::test]
async fn serps_append_and_list_in_order() {
  let s = store().await;
  let session = s.create_session("serp tracking").await.unwrap();

  s.add_serp(session.id, r#"{"results":["a"]}"#).await.unwrap();
  s.add_serp(session.id, r#"{"results":["a","b"]}"#)
    .await
    .unwrap();

  let listed = s.list_serps(session.id).await.unwrap();
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].payload, r#"{"results":["a"]}"#);
  assert_eq!(listed[1].payload, r#"{"results":["a","b"]}"#);
}

#[tokio::test]
async fn refetched_serp_with_identical_payload_is_a_new_record() {
  let s = store().await;
  let session = s.create_session("stable serp").await.unwrap();

  let first = s.add_serp(session.id, "{}").await.unwrap();
  let second = s.add_serp(session.id, "{}").await.unwrap();
  assert_ne!(first.id, second.id);

  assert_eq!(s.list_serps(session.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn serp_operations_on_missing_session_error() {
  let s = store().await;

  let err = s.add_serp(SessionId(3), "{}").await.unwrap_err();
  assert!(matches!(err, crate::Error::SessionNotFound(_)));

  let err = s.list_serps(SessionId(3)).await.unwrap_err();
  assert!(matches!(err, crate::Error::SessionNotFound(_)));
}

// ─── Schema management ───────────────────────────────────────────────────────

#[tokio::test]
async fn schema_creation_is_idempotent() {
  let s = SqliteStore::open_in_memory().await.unwrap();

  s.ensure_base_schema().await.unwrap();
  s.ensure_extended_schema().await.unwrap();

  // Rows written before the re-run must survive it.
  let session = s.create_session("survives re-provisioning").await.unwrap();
  s.attach_brief(session.id, "brief").await.unwrap();

  s.ensure_base_schema().await.unwrap();
  s.ensure_extended_schema().await.unwrap();

  assert_eq!(
    table_names(&s).await,
    vec!["briefs", "serps", "sessions", "suggestions"]
  );
  assert_eq!(count_rows(&s, "sessions").await, 1);
  assert_eq!(count_rows(&s, "briefs").await, 1);

  let fetched = s.get_session(session.id).await.unwrap().unwrap();
  assert_eq!(fetched.query, "survives re-provisioning");
}

#[tokio::test]
async fn extended_schema_before_base_is_safe() {
  let s = SqliteStore::open_in_memory().await.unwrap();

  // Reverse of the documented order; the forward reference to `sessions`
  // only matters once rows are written.
  s.ensure_extended_schema().await.unwrap();
  s.ensure_base_schema().await.unwrap();

  let session = s.create_session("out of order").await.unwrap();
  s.add_suggestion(session.id, "still works", None)
    .await
    .unwrap();
  assert_eq!(s.list_suggestions(session.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn schema_error_on_read_only_store() {
  let file = tempfile::NamedTempFile::new().unwrap();
  let s = SqliteStore::open_read_only(file.path()).await.unwrap();

  let err = s.ensure_base_schema().await.unwrap_err();
  assert!(matches!(err, crate::Error::Schema(_)));
}

// ─── Startup initializer ─────────────────────────────────────────────────────

#[tokio::test]
async fn initialize_prepares_a_fresh_store() {
  let s = SqliteStore::open_in_memory().await.unwrap();
  init::initialize(&s).await;

  let session = s.create_session("boot path").await.unwrap();
  s.add_serp(session.id, "{}").await.unwrap();
  assert_eq!(
    table_names(&s).await,
    vec!["briefs", "serps", "sessions", "suggestions"]
  );
}

#[tokio::test]
async fn initialize_swallows_schema_failures() {
  let file = tempfile::NamedTempFile::new().unwrap();
  let s = SqliteStore::open_read_only(file.path()).await.unwrap();

  // Must return normally even though every DDL statement fails.
  init::initialize(&s).await;
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

#[tokio::test]
async fn research_session_round_trip() {
  let s = store().await;

  let session = s
    .create_session("how to use sqlite with ai")
    .await
    .unwrap();
  s.attach_brief(session.id, "This is a sample AI-generated brief.")
    .await
    .unwrap();

  let recent = s.recent_sessions(10).await.unwrap();
  let found = recent.iter().find(|sess| sess.id == session.id).unwrap();
  assert_eq!(found.query, "how to use sqlite with ai");

  let brief = s.latest_brief(session.id).await.unwrap().unwrap();
  assert_eq!(brief.content, "This is a sample AI-generated brief.");
}
