//! # ah-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! ports and services. Handlers stay thin: extract, call, map the result.

pub mod assistant;
pub mod community;
pub mod farmers;
pub mod notifications;
pub mod projects;
pub mod upload;
pub mod weather;

use ah_core::error::AppError;
use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::SharedState;

/// `{"success": true}` acknowledgement used by deletes.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

/// Turns a lookup miss into a 404 for `kind`.
pub(crate) fn found<T>(value: Option<T>, kind: &str, id: &str) -> Result<Json<T>, ApiError> {
    value.map(Json).ok_or_else(|| ApiError(AppError::not_found(kind, id)))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn metrics(State(state): State<SharedState>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/openmetrics-text; version=1.0.0; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
