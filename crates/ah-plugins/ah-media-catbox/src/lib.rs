//! # ah-media-catbox
//!
//! Catbox implementation of `MediaHost`. Catbox replies with the bare file
//! URL as plain text, or with an error sentence on failure.

use ah_core::error::{AppError, Result};
use ah_core::traits::MediaHost;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

pub struct CatboxHost {
    http: reqwest::Client,
    endpoint: String,
    /// Attaches uploads to an account; anonymous when absent
    userhash: Option<SecretString>,
}

impl CatboxHost {
    pub fn new(http: reqwest::Client, endpoint: String, userhash: Option<SecretString>) -> Self {
        Self { http, endpoint, userhash }
    }

    fn form(&self, data: Vec<u8>, file_name: &str, content_type: &str) -> Result<Form> {
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::validation(format!("invalid content type {content_type:?}: {e}")))?;

        let mut form = Form::new().text("reqtype", "fileupload");
        if let Some(hash) = &self.userhash {
            form = form.text("userhash", hash.expose_secret().to_string());
        }
        Ok(form.part("fileToUpload", part))
    }
}

fn parse_upload_response(body: &str) -> Result<String> {
    let url = body.trim();
    if url.starts_with("http") {
        Ok(url.to_string())
    } else {
        Err(AppError::upstream(format!("Invalid response from Catbox: {url}")))
    }
}

fn upstream(e: reqwest::Error) -> AppError {
    AppError::upstream(format!("catbox: {e}"))
}

#[async_trait]
impl MediaHost for CatboxHost {
    async fn upload(&self, data: Vec<u8>, file_name: &str, content_type: &str) -> Result<String> {
        let size = data.len();
        let form = self.form(data, file_name, content_type)?;

        let body = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?
            .text()
            .await
            .map_err(upstream)?;

        let url = parse_upload_response(&body)?;
        info!(%file_name, size, %url, "file uploaded to catbox");
        Ok(url)
    }
}
