//! # Assistant
//!
//! Chat and image diagnosis on top of the AI ports.
//!
//! The chat path answers the HTTP request as soon as the farmer's question
//! is stored. The assistant reply is produced by a detached task and only
//! becomes visible when the client polls the history again.

use std::sync::Arc;

use ah_core::error::{AppError, Result};
use ah_core::models::{AnalysisReport, ChatMessage, NewAnalysisReport, NewChatMessage};
use ah_core::traits::{ChatProvider, FarmRepo, VisionProvider};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use uuid::Uuid;

pub const NO_ANSWER_REPLY: &str = "Sorry, I couldn't process that request. Please try again.";
pub const CONNECTION_REPLY: &str = "Sorry, I'm having trouble connecting. Please try again.";
pub const VISION_UNAVAILABLE: &str = "Image analysis service unavailable";

#[derive(Clone)]
pub struct ChatService {
    repo: Arc<dyn FarmRepo>,
    provider: Arc<dyn ChatProvider>,
}

impl ChatService {
    pub fn new(repo: Arc<dyn FarmRepo>, provider: Arc<dyn ChatProvider>) -> Self {
        Self { repo, provider }
    }

    /// Stores the question and schedules the reply.
    ///
    /// The returned handle may be dropped; the reply task keeps running.
    pub async fn ask(&self, farmer_id: Uuid, question: String) -> Result<(ChatMessage, JoinHandle<()>)> {
        if question.trim().is_empty() {
            return Err(AppError::validation("question must not be empty"));
        }

        let user_message = self
            .repo
            .create_chat_message(NewChatMessage::user(farmer_id, question.clone()))
            .await?;

        let repo = self.repo.clone();
        let provider = self.provider.clone();
        let job = tokio::spawn(async move {
            reply(repo, provider, farmer_id, question).await;
        });

        Ok((user_message, job))
    }

    pub async fn history(&self, farmer_id: Uuid) -> Result<Vec<ChatMessage>> {
        self.repo.list_chat_messages_by_farmer(farmer_id).await
    }
}

async fn reply(repo: Arc<dyn FarmRepo>, provider: Arc<dyn ChatProvider>, farmer_id: Uuid, question: String) {
    let content = match provider.ask(&question).await {
        Ok(Some(answer)) => answer,
        Ok(None) => {
            warn!(%farmer_id, "chat provider returned no answer");
            NO_ANSWER_REPLY.to_string()
        }
        Err(e) => {
            error!(%farmer_id, error = %e, "chat provider failed");
            CONNECTION_REPLY.to_string()
        }
    };

    match repo.create_chat_message(NewChatMessage::assistant(farmer_id, content)).await {
        Ok(message) => debug!(%farmer_id, message_id = %message.id, "assistant reply stored"),
        Err(e) => error!(%farmer_id, error = %e, "failed to store assistant reply"),
    }
}

#[derive(Clone)]
pub struct DiagnosisService {
    repo: Arc<dyn FarmRepo>,
    vision: Arc<dyn VisionProvider>,
}

impl DiagnosisService {
    pub fn new(repo: Arc<dyn FarmRepo>, vision: Arc<dyn VisionProvider>) -> Self {
        Self { repo, vision }
    }

    /// Runs the vision model inline and keeps the report only on success.
    pub async fn analyze(&self, farmer_id: Uuid, image_url: String) -> Result<AnalysisReport> {
        if image_url.trim().is_empty() {
            return Err(AppError::validation("imageUrl must not be empty"));
        }

        match self.vision.diagnose(&image_url).await? {
            Some(diagnosis) => {
                self.repo
                    .create_report(NewAnalysisReport { farmer_id, image_url, diagnosis })
                    .await
            }
            None => Err(AppError::Unavailable(VISION_UNAVAILABLE.to_string())),
        }
    }

    pub async fn reports(&self, farmer_id: Uuid) -> Result<Vec<AnalysisReport>> {
        self.repo.list_reports_by_farmer(farmer_id).await
    }
}
