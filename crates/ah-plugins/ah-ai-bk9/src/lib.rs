//! # ah-ai-bk9
//!
//! BK9 gateway implementation of `ChatProvider` and `VisionProvider`.
//! Both endpoints answer `{"status": bool, "BK9": "<text>"}`; anything else
//! counts as "no answer".

use ah_core::error::{AppError, Result};
use ah_core::traits::{ChatProvider, VisionProvider};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

/// Question asked of the vision model for every photo.
const VISION_QUERY: &str = "disease_causes_solutions_suggestions_keyfactors";

pub struct Bk9Client {
    http: reqwest::Client,
    base_url: String,
    chat_model: String,
    vision_model: String,
    system_prompt: String,
}

impl Bk9Client {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        chat_model: String,
        vision_model: String,
        system_prompt: String,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_model,
            vision_model,
            system_prompt,
        }
    }

    async fn read(response: reqwest::Response) -> Result<Option<String>> {
        let response = response.error_for_status().map_err(upstream)?;
        let body: Bk9Response = response.json().await.map_err(upstream)?;
        Ok(body.into_answer())
    }
}

#[derive(Debug, Deserialize)]
struct Bk9Response {
    #[serde(default)]
    status: bool,
    #[serde(rename = "BK9", default)]
    answer: Option<String>,
}

impl Bk9Response {
    fn into_answer(self) -> Option<String> {
        if !self.status {
            return None;
        }
        self.answer.filter(|a| !a.trim().is_empty())
    }
}

fn upstream(e: reqwest::Error) -> AppError {
    AppError::upstream(format!("bk9: {e}"))
}

#[async_trait]
impl ChatProvider for Bk9Client {
    async fn ask(&self, question: &str) -> Result<Option<String>> {
        debug!(model = %self.chat_model, "asking bk9 chat");
        let response = self
            .http
            .get(format!("{}/ai/BK9", self.base_url))
            .query(&[
                ("BK9", self.system_prompt.as_str()),
                ("q", question),
                ("model", self.chat_model.as_str()),
            ])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(upstream)?;
        Self::read(response).await
    }
}

#[async_trait]
impl VisionProvider for Bk9Client {
    async fn diagnose(&self, image_url: &str) -> Result<Option<String>> {
        debug!(model = %self.vision_model, %image_url, "asking bk9 vision");
        let response = self
            .http
            .post(format!("{}/ai/vision", self.base_url))
            .query(&[
                ("q", VISION_QUERY),
                ("image_url", image_url),
                ("model", self.vision_model.as_str()),
            ])
            .send()
            .await
            .map_err(upstream)?;
        Self::read(response).await
    }
}
