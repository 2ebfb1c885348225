#![allow(dead_code)]

use std::sync::{Arc, Once};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use exercise_tracker::api::{create_app, App};
use exercise_tracker::config::StaticAssets;
use exercise_tracker::store::{ExerciseStore, MemoryStore};

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

/// App backed by a fresh in-memory store, returned alongside the store for
/// direct inspection.
pub fn test_app() -> (App, Arc<MemoryStore>) {
    init_test_logging();
    let store = Arc::new(MemoryStore::new());
    let app = app_with_store(store.clone());
    (app, store)
}

pub fn app_with_store(store: Arc<dyn ExerciseStore>) -> App {
    create_app(store, &StaticAssets::default())
}

pub struct ApiTestHelpers;

impl ApiTestHelpers {
    pub fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    pub fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub async fn send(app: &App, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    /// Create a user and return its `_id`.
    pub async fn create_user(app: &App, username: &str) -> String {
        let (status, body) = Self::send(
            app,
            Self::form_request("/api/users", &[("username", username)]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["_id"].as_str().unwrap().to_string()
    }

    pub async fn add_exercise(
        app: &App,
        user_id: &str,
        fields: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        Self::send(
            app,
            Self::form_request(&format!("/api/users/{user_id}/exercises"), fields),
        )
        .await
    }

    pub async fn get_logs(app: &App, user_id: &str, query: &str) -> (StatusCode, Value) {
        let uri = if query.is_empty() {
            format!("/api/users/{user_id}/logs")
        } else {
            format!("/api/users/{user_id}/logs?{query}")
        };
        Self::send(app, Self::get_request(&uri)).await
    }
}
