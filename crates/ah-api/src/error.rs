//! HTTP mapping for `AppError`.
//!
//! Bodies are `{"error": "<message>"}`. Upstream and internal failures are
//! logged here, once, at the edge; their details never reach the client.

use ah_core::error::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// What the client sees when a third-party service fails.
pub const UPSTREAM_MESSAGE: &str = "Upstream service unavailable";

#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) | AppError::Unavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.0 {
            AppError::ValidationError(msg) | AppError::Conflict(msg) => msg,
            AppError::Unavailable(msg) => {
                warn!(error = %msg, "upstream service gave no result");
                msg
            }
            AppError::NotFound(kind, _) => format!("{kind} not found"),
            AppError::Upstream(msg) => {
                error!(error = %msg, "upstream service failed");
                UPSTREAM_MESSAGE.to_string()
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "internal error");
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (AppError::validation("bad"), StatusCode::BAD_REQUEST),
            (AppError::not_found("Farmer", "x"), StatusCode::NOT_FOUND),
            (AppError::Conflict("dup".into()), StatusCode::CONFLICT),
            (AppError::upstream("down"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Unavailable("no answer".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal("oops".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).into_response().status(), status);
        }
    }

    async fn body_of(err: AppError) -> serde_json::Value {
        let response = ApiError(err).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn upstream_detail_stays_in_logs() {
        let body = body_of(AppError::upstream(
            "open-meteo: error sending request for url (https://api.open-meteo.com/v1/forecast?latitude=1)",
        ))
        .await;
        assert_eq!(body, json!({ "error": UPSTREAM_MESSAGE }));
    }

    #[tokio::test]
    async fn unavailable_message_is_passed_through() {
        let body = body_of(AppError::Unavailable("Image analysis service unavailable".into())).await;
        assert_eq!(body, json!({ "error": "Image analysis service unavailable" }));
    }
}
