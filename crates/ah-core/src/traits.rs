//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.
//! "Not found" is never an error here: lookups return `Option`, deletes
//! return `bool`, and the route layer decides what a miss means.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    AnalysisReport, ChatMessage, Comment, CommunityPost, Farmer, FarmerPatch, NewAnalysisReport,
    NewChatMessage, NewComment, NewCommunityPost, NewFarmer, NewNotification, NewProject,
    NewWeatherCache, Notification, Project, ProjectPatch, WeatherCache,
};

/// Data access contract for every entity table.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FarmRepo: Send + Sync {
    // Farmer Operations
    async fn get_farmer(&self, id: Uuid) -> Result<Option<Farmer>>;
    async fn get_farmer_by_email(&self, email: &str) -> Result<Option<Farmer>>;
    /// Fails with `Conflict` when the email is already registered.
    async fn create_farmer(&self, farmer: NewFarmer) -> Result<Farmer>;
    async fn update_farmer(&self, id: Uuid, patch: FarmerPatch) -> Result<Option<Farmer>>;

    // Project Operations
    async fn list_projects_by_farmer(&self, farmer_id: Uuid) -> Result<Vec<Project>>;
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>>;
    async fn create_project(&self, project: NewProject) -> Result<Project>;
    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>>;
    async fn delete_project(&self, id: Uuid) -> Result<bool>;

    // Analysis Report Operations
    async fn list_reports_by_farmer(&self, farmer_id: Uuid) -> Result<Vec<AnalysisReport>>;
    async fn create_report(&self, report: NewAnalysisReport) -> Result<AnalysisReport>;

    // Community Post Operations
    /// Newest first, optionally restricted to one category.
    async fn list_posts(&self, category: Option<String>) -> Result<Vec<CommunityPost>>;
    async fn get_post(&self, id: Uuid) -> Result<Option<CommunityPost>>;
    async fn create_post(&self, post: NewCommunityPost) -> Result<CommunityPost>;
    async fn upvote_post(&self, id: Uuid) -> Result<Option<CommunityPost>>;

    // Comment Operations
    async fn list_comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>>;
    async fn create_comment(&self, comment: NewComment) -> Result<Comment>;

    // Notification Operations
    async fn list_notifications_by_farmer(&self, farmer_id: Uuid) -> Result<Vec<Notification>>;
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification>;
    async fn mark_notification_read(&self, id: Uuid) -> Result<Option<Notification>>;

    // Weather Cache Operations
    async fn get_weather_cache(&self, key: &str) -> Result<Option<WeatherCache>>;
    /// Overwrites any existing entry and stamps `last_updated`.
    async fn set_weather_cache(&self, entry: NewWeatherCache) -> Result<WeatherCache>;

    // Chat Operations
    async fn list_chat_messages_by_farmer(&self, farmer_id: Uuid) -> Result<Vec<ChatMessage>>;
    async fn create_chat_message(&self, message: NewChatMessage) -> Result<ChatMessage>;
}

/// Text completion for the farming assistant.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// `Ok(None)` means the provider responded but produced no usable answer.
    async fn ask(&self, question: &str) -> Result<Option<String>>;
}

/// Image diagnosis for crop and livestock photos.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait VisionProvider: Send + Sync {
    async fn diagnose(&self, image_url: &str) -> Result<Option<String>>;
}

/// Forecast source. The payload is opaque to AgriHub.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn forecast(&self, latitude: &str, longitude: &str) -> Result<serde_json::Value>;
}

/// Third-party file hosting for user uploads.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Uploads raw bytes and returns the public URL.
    async fn upload(&self, data: Vec<u8>, file_name: &str, content_type: &str) -> Result<String>;
}
