// Shared test utilities for integration tests
#![allow(dead_code)]

use axum_test::TestServer;
use fyyur_db::{AppState, DatabaseConfig};
use fyyur_migration::{Migrator, MigratorTrait};
use fyyur_server::router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Create a test AppState backed by a migrated in-memory SQLite database
pub async fn test_app_state() -> Arc<AppState> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 8,
        idle_timeout_secs: 600,
    };
    let db = fyyur_db::connect(&config)
        .await
        .expect("failed to open sqlite database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    Arc::new(AppState { db })
}

pub async fn test_server() -> TestServer {
    let app = router::build(test_app_state().await, CorsLayer::new());
    TestServer::new(app).expect("failed to start test server")
}

pub fn venue_body(name: &str) -> Value {
    json!({
        "name": name,
        "city": "San Francisco",
        "state": "CA",
        "address": "1015 Folsom Street",
        "phone": "123-123-1234",
        "genres": ["Jazz", "Reggae", "Swing"],
        "website": "https://www.themusicalhop.com",
    })
}

pub fn artist_body(name: &str) -> Value {
    json!({
        "name": name,
        "city": "San Francisco",
        "state": "CA",
        "phone": "326-123-5000",
        "genres": ["Rock n Roll"],
        "seeking_venue": true,
        "seeking_description": "Looking for shows to perform at in the San Francisco Bay Area!",
    })
}

/// POST a body and return the `data.id` of the created record.
pub async fn create(server: &TestServer, path: &str, body: &Value) -> String {
    let resp = server.post(path).json(body).await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    resp.json::<Value>()["data"]["id"]
        .as_str()
        .expect("created record has an id")
        .to_string()
}
