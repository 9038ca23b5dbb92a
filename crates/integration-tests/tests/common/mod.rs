//! Shared fixtures: an in-memory app with mock upstreams and a manual clock.
#![allow(dead_code)]

use std::sync::Arc;

use ah_api::{router, AppState, Ports};
use ah_core::clock::ManualClock;
use ah_core::traits::{MockChatProvider, MockMediaHost, MockVisionProvider, MockWeatherProvider};
use ah_store_memory::MemoryStore;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Mocks start with no expectations; any unexpected upstream call panics.
#[derive(Default)]
pub struct Upstreams {
    pub chat: MockChatProvider,
    pub vision: MockVisionProvider,
    pub weather: MockWeatherProvider,
    pub media: MockMediaHost,
}

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(Upstreams::default())
    }

    pub fn with(upstreams: Upstreams) -> Self {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()));
        let store = Arc::new(MemoryStore::with_clock(clock.clone()));
        let state = AppState::new(Ports {
            repo: store.clone(),
            chat: Arc::new(upstreams.chat),
            vision: Arc::new(upstreams.vision),
            weather: Arc::new(upstreams.weather),
            media: Arc::new(upstreams.media),
            clock: clock.clone(),
        });
        Self { router: router(Arc::new(state)), clock, store }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("PUT", uri, body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap()).await
    }

    /// Registers a farmer and returns its id.
    pub async fn register(&self, email: &str, name: &str) -> String {
        let (status, farmer) = self
            .post(
                "/api/auth/register",
                json!({ "email": email, "name": name, "region": "Ashanti", "farmingType": "crop" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {farmer}");
        farmer["id"].as_str().unwrap().to_string()
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
