// Web API tests — drive the axum router directly with tower's oneshot.
//
// No listener is bound; requests go straight through the service stack
// against an in-memory database.

#![cfg(feature = "web")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rusqlite::Connection;
use tower::ServiceExt;

use quarry::config::Config;
use quarry::db::schema::create_tables;
use quarry::db::sqlite::SqliteDatabase;
use quarry::db::Database;
use quarry::web::{build_router, AppState};

fn test_state() -> AppState {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn).unwrap();
    AppState {
        db: Arc::new(SqliteDatabase::new(conn)),
        config: Arc::new(Config {
            db_path: ":memory:".to_string(),
            metrics_url: None,
            metrics_api_key: None,
            metrics_timeout_ms: 200,
        }),
        metrics: None,
    }
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = build_router(test_state());
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn inline_extraction_returns_keywords_and_persists() {
    let state = test_state();
    let db = state.db.clone();
    let app = build_router(state);

    let response = app
        .oneshot(json_post(
            "/api/extract",
            serde_json::json!({
                "title": "Rust Web Servers",
                "content": "rust web servers are fast. web servers need routing."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let extraction_id = json["extraction_id"].as_i64().unwrap();
    assert!(json["keywords"].as_array().unwrap().len() > 0);
    assert!(json["topics"].as_array().unwrap().len() > 0);
    assert_eq!(json["enriched"], serde_json::json!(false));

    // The row landed in the store
    let stored = db.get_extraction(extraction_id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Rust Web Servers");
}

#[tokio::test]
async fn draft_id_extraction_unwraps_envelope() {
    let state = test_state();
    let db = state.db.clone();
    let app = build_router(state);

    let draft_id = db
        .insert_draft(
            "Newsletter Growth",
            r#"{"content":"newsletter growth tactics and newsletter growth metrics"}"#,
        )
        .await
        .unwrap();

    let response = app
        .oneshot(json_post(
            "/api/extract",
            serde_json::json!({ "draft_id": draft_id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let keywords: Vec<String> = json["keywords"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["keyword"].as_str().unwrap().to_string())
        .collect();
    assert!(keywords.contains(&"newsletter growth".to_string()));
}

#[tokio::test]
async fn empty_input_maps_to_bad_request() {
    let app = build_router(test_state());

    let response = app
        .oneshot(json_post(
            "/api/extract",
            serde_json::json!({ "title": "", "content": "  " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ambiguous_source_is_rejected() {
    let app = build_router(test_state());

    let response = app
        .oneshot(json_post(
            "/api/extract",
            serde_json::json!({ "post_id": 1, "draft_id": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_post_id_maps_to_not_found() {
    let app = build_router(test_state());

    let response = app
        .oneshot(json_post(
            "/api/extract",
            serde_json::json!({ "post_id": 999 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn extraction_listing_and_detail_routes() {
    let state = test_state();
    let app = build_router(state);

    // Store one extraction through the API
    let response = app
        .clone()
        .oneshot(json_post(
            "/api/extract",
            serde_json::json!({ "title": "One", "content": "alpha beta gamma" }),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["extraction_id"].as_i64().unwrap();

    let list = app
        .clone()
        .oneshot(
            Request::get("/api/extractions?limit=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(list.status(), StatusCode::OK);
    let list_json = body_json(list).await;
    assert_eq!(list_json["extractions"].as_array().unwrap().len(), 1);

    let detail = app
        .clone()
        .oneshot(
            Request::get(format!("/api/extractions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(detail.status(), StatusCode::OK);

    let missing = app
        .oneshot(
            Request::get("/api/extractions/9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_reports_counts() {
    let state = test_state();
    let db = state.db.clone();
    let app = build_router(state);

    db.insert_post("p", "content words").await.unwrap();

    let response = app
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["posts"], serde_json::json!(1));
    assert_eq!(json["extractions"], serde_json::json!(0));
    assert_eq!(json["enrichment_configured"], serde_json::json!(false));
}
