//! Image upload proxy to the media host.
//!
//! Responses keep the `{success, ...}` envelope the web client expects
//! instead of the `{error}` body used elsewhere.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::UPSTREAM_MESSAGE;
use crate::state::SharedState;

const FILE_FIELD: &str = "file";
const FALLBACK_FILE_NAME: &str = "upload";
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    pub file_name: String,
    pub size: usize,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub data: UploadedFile,
}

#[derive(Debug)]
pub enum UploadError {
    NotMultipart,
    Malformed(MultipartError),
    NoFile,
    Failed(String),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            UploadError::NotMultipart => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": "Content-Type must be multipart/form-data" }),
            ),
            UploadError::Malformed(e) => (
                e.status(),
                json!({ "success": false, "error": "Invalid multipart/form-data", "message": e.body_text() }),
            ),
            UploadError::NoFile => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": "No file found in request" }),
            ),
            UploadError::Failed(detail) => {
                error!(error = %detail, "upload failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Upload failed", "message": UPSTREAM_MESSAGE }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

struct FilePart {
    data: Vec<u8>,
    file_name: String,
    mime_type: String,
}

/// Picks the first `file` part that carries a file name.
async fn read_file_part(multipart: &mut Multipart) -> Result<Option<FilePart>, UploadError> {
    while let Some(field) = multipart.next_field().await.map_err(UploadError::Malformed)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let mime_type = match field.content_type() {
            Some(ct) => ct.to_string(),
            None => mime_guess::from_path(&file_name)
                .first_raw()
                .unwrap_or(FALLBACK_MIME)
                .to_string(),
        };
        let data = field.bytes().await.map_err(UploadError::Malformed)?;
        if data.is_empty() {
            continue;
        }
        let file_name = if file_name.is_empty() { FALLBACK_FILE_NAME.to_string() } else { file_name };
        return Ok(Some(FilePart { data: data.to_vec(), file_name, mime_type }));
    }
    Ok(None)
}

pub async fn upload(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    let mut multipart = multipart.map_err(|_| UploadError::NotMultipart)?;
    let part = read_file_part(&mut multipart).await?.ok_or(UploadError::NoFile)?;

    let size = part.data.len();
    let result = state.media.upload(part.data, &part.file_name, &part.mime_type).await;
    state.metrics.record_upstream("media", result.is_ok());
    let url = result.map_err(|e| UploadError::Failed(e.to_string()))?;

    info!(%url, file_name = %part.file_name, size, "file uploaded");
    Ok(Json(UploadResponse {
        success: true,
        data: UploadedFile { url, file_name: part.file_name, size, mime_type: part.mime_type },
    }))
}
