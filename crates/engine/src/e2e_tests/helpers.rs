//! Helpers for constructing a test server and speaking JSON to it.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::api;
use crate::app::App;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::sqlite::{test_support, SqliteRepositories};

/// A fully wired application over a throwaway database.
///
/// The clock is pinned so timestamps are stable across a test run.
pub struct TestServer {
    router: Router,
    pub now: DateTime<Utc>,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let (pool, dir) = test_support::temp_pool().await;
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let app = Arc::new(App::new(
            SqliteRepositories::new(pool),
            Arc::new(FixedClock(now)),
        ));

        Self {
            router: api::http::routes().with_state(app),
            now,
            _dir: dir,
        }
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request("DELETE", path, body).await
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("build request"),
            None => Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .expect("build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("route request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }

    /// Create a character and teach it the given catalog languages.
    /// Returns the new character's id.
    pub async fn enroll(&self, name: &str, char_type: &str, languages: &[&str]) -> String {
        let (status, body) = self
            .post("/api/characters", json!({ "name": name, "type": char_type }))
            .await;
        assert_eq!(status, StatusCode::OK, "create {name}: {body}");
        let id = body["id"].as_str().expect("character id").to_string();

        for language in languages {
            let (status, body) = self
                .post(
                    &format!("/api/characters/{id}/languages"),
                    json!({ "name": language }),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "teach {language}: {body}");
        }

        id
    }
}
