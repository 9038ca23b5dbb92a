//! AI chat and crop image diagnosis.

use ah_core::error::{AppError, Result as CoreResult};
use ah_core::models::{AnalysisReport, ChatMessage};
use ah_core::validate::Validate;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{parse_id, ValidJson};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub question: String,
    pub farmer_id: Uuid,
}

impl Validate for ChatRequest {
    fn validate(&self) -> CoreResult<()> {
        if self.question.trim().is_empty() {
            return Err(AppError::validation("question must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisRequest {
    pub image_url: String,
    pub farmer_id: Uuid,
}

impl Validate for ImageAnalysisRequest {
    fn validate(&self) -> CoreResult<()> {
        if self.image_url.trim().is_empty() {
            return Err(AppError::validation("imageUrl must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAccepted {
    pub success: bool,
    pub user_message: ChatMessage,
}

/// Answers once the question is stored; the reply arrives in the history
/// later.
pub async fn chat(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<ChatRequest>,
) -> Result<Json<ChatAccepted>, ApiError> {
    let (user_message, _reply) = state.chat.ask(req.farmer_id, req.question).await?;
    info!(farmer_id = %req.farmer_id, message_id = %user_message.id, "chat question accepted");
    Ok(Json(ChatAccepted { success: true, user_message }))
}

pub async fn history(
    State(state): State<SharedState>,
    Path(farmer_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let farmer_id = parse_id(&farmer_id, "Farmer")?;
    Ok(Json(state.chat.history(farmer_id).await?))
}

pub async fn analyze_image(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<ImageAnalysisRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let outcome = state.diagnosis.analyze(req.farmer_id, req.image_url).await;
    if !matches!(outcome, Err(AppError::ValidationError(_))) {
        state.metrics.record_upstream("vision", outcome.is_ok());
    }
    let report = outcome?;
    info!(farmer_id = %report.farmer_id, report_id = %report.id, "image analysed");
    Ok(Json(report))
}

pub async fn reports(
    State(state): State<SharedState>,
    Path(farmer_id): Path<String>,
) -> Result<Json<Vec<AnalysisReport>>, ApiError> {
    let farmer_id = parse_id(&farmer_id, "Farmer")?;
    Ok(Json(state.diagnosis.reports(farmer_id).await?))
}
