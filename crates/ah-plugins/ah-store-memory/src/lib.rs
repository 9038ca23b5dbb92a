//! # ah-store-memory
//!
//! In-process implementation of `FarmRepo`.
//! One `DashMap` per entity kind, keyed by identifier. Nothing survives a
//! restart.
//!
//! # Developer Note
//! Every read-modify-write (merge, upvote, mark-read) runs while holding the
//! entry's shard lock and never awaits, so it is atomic even on the
//! multi-threaded runtime.

use std::cmp::Reverse;
use std::sync::Arc;

use ah_core::clock::{Clock, SystemClock};
use ah_core::error::{AppError, Result};
use ah_core::models::{
    AnalysisReport, ChatMessage, Comment, CommunityPost, Farmer, FarmerPatch, NewAnalysisReport,
    NewChatMessage, NewComment, NewCommunityPost, NewFarmer, NewNotification, NewProject,
    NewWeatherCache, Notification, Project, ProjectPatch, WeatherCache, DEFAULT_PROJECT_STATUS,
};
use ah_core::traits::FarmRepo;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

pub struct MemoryStore {
    clock: Arc<dyn Clock>,
    farmers: DashMap<Uuid, Farmer>,
    /// email -> farmer id; the uniqueness guard for registrations
    emails: DashMap<String, Uuid>,
    projects: DashMap<Uuid, Project>,
    reports: DashMap<Uuid, AnalysisReport>,
    posts: DashMap<Uuid, CommunityPost>,
    comments: DashMap<Uuid, Comment>,
    notifications: DashMap<Uuid, Notification>,
    weather: DashMap<String, WeatherCache>,
    chat: DashMap<Uuid, ChatMessage>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            farmers: DashMap::new(),
            emails: DashMap::new(),
            projects: DashMap::new(),
            reports: DashMap::new(),
            posts: DashMap::new(),
            comments: DashMap::new(),
            notifications: DashMap::new(),
            weather: DashMap::new(),
            chat: DashMap::new(),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

/// Collects matching rows sorted oldest first. Ties fall back to the v7 id,
/// which follows insertion order.
fn oldest_first<T, F, K>(table: &DashMap<Uuid, T>, keep: F, stamp: K) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
    K: Fn(&T) -> (DateTime<Utc>, Uuid),
{
    let mut rows: Vec<T> = table
        .iter()
        .filter(|row| keep(row.value()))
        .map(|row| row.value().clone())
        .collect();
    rows.sort_by_key(|row| stamp(row));
    rows
}

fn newest_first<T, F, K>(table: &DashMap<Uuid, T>, keep: F, stamp: K) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
    K: Fn(&T) -> (DateTime<Utc>, Uuid),
{
    let mut rows: Vec<T> = table
        .iter()
        .filter(|row| keep(row.value()))
        .map(|row| row.value().clone())
        .collect();
    rows.sort_by_key(|row| Reverse(stamp(row)));
    rows
}

#[async_trait]
impl FarmRepo for MemoryStore {
    async fn get_farmer(&self, id: Uuid) -> Result<Option<Farmer>> {
        Ok(self.farmers.get(&id).map(|f| f.clone()))
    }

    async fn get_farmer_by_email(&self, email: &str) -> Result<Option<Farmer>> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.farmers.get(&id).map(|f| f.clone()))
    }

    async fn create_farmer(&self, new: NewFarmer) -> Result<Farmer> {
        let farmer = Farmer {
            id: Uuid::now_v7(),
            email: new.email,
            name: new.name,
            age: new.age,
            region: new.region,
            language: new.language,
            farming_type: new.farming_type,
            created_at: self.now(),
        };

        // Claim the email first so two concurrent registrations cannot both win.
        match self.emails.entry(farmer.email.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::Conflict(format!(
                    "a farmer with email {} already exists",
                    farmer.email
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(farmer.id);
            }
        }

        self.farmers.insert(farmer.id, farmer.clone());
        debug!(farmer_id = %farmer.id, "farmer registered");
        Ok(farmer)
    }

    async fn update_farmer(&self, id: Uuid, patch: FarmerPatch) -> Result<Option<Farmer>> {
        // The farmer's entry stays locked across the index swap so two email
        // changes on one farmer serialize. `create_farmer` and lookups never
        // hold an `emails` guard while touching `farmers`.
        let Some(mut farmer) = self.farmers.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(new_email) = patch.email.as_ref().filter(|e| **e != farmer.email) {
            match self.emails.entry(new_email.clone()) {
                Entry::Occupied(_) => {
                    return Err(AppError::Conflict(format!(
                        "a farmer with email {new_email} already exists"
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.emails.remove_if(&farmer.email, |_, owner| *owner == id);
        }

        farmer.apply(patch);
        Ok(Some(farmer.clone()))
    }

    async fn list_projects_by_farmer(&self, farmer_id: Uuid) -> Result<Vec<Project>> {
        Ok(oldest_first(
            &self.projects,
            |p| p.farmer_id == farmer_id,
            |p| (p.created_at, p.id),
        ))
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        Ok(self.projects.get(&id).map(|p| p.clone()))
    }

    async fn create_project(&self, new: NewProject) -> Result<Project> {
        let input = new.input;
        let project = Project {
            id: Uuid::now_v7(),
            farmer_id: new.farmer_id,
            kind: input.kind,
            name: input.name,
            land_size: input.land_size,
            expected_yield: input.expected_yield,
            costs: input.costs,
            market_price: input.market_price,
            planting_date: input.planting_date,
            harvest_date: input.harvest_date,
            status: input.status.unwrap_or_else(|| DEFAULT_PROJECT_STATUS.to_string()),
            created_at: self.now(),
        };
        self.projects.insert(project.id, project.clone());
        debug!(project_id = %project.id, farmer_id = %project.farmer_id, "project created");
        Ok(project)
    }

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>> {
        let Some(mut project) = self.projects.get_mut(&id) else {
            return Ok(None);
        };
        project.apply(patch);
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool> {
        Ok(self.projects.remove(&id).is_some())
    }

    async fn list_reports_by_farmer(&self, farmer_id: Uuid) -> Result<Vec<AnalysisReport>> {
        Ok(oldest_first(
            &self.reports,
            |r| r.farmer_id == farmer_id,
            |r| (r.timestamp, r.id),
        ))
    }

    async fn create_report(&self, new: NewAnalysisReport) -> Result<AnalysisReport> {
        let report = AnalysisReport {
            id: Uuid::now_v7(),
            farmer_id: new.farmer_id,
            image_url: new.image_url,
            diagnosis: new.diagnosis,
            timestamp: self.now(),
        };
        self.reports.insert(report.id, report.clone());
        Ok(report)
    }

    async fn list_posts(&self, category: Option<String>) -> Result<Vec<CommunityPost>> {
        Ok(newest_first(
            &self.posts,
            |p| category.as_deref().map_or(true, |c| p.category == c),
            |p| (p.timestamp, p.id),
        ))
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<CommunityPost>> {
        Ok(self.posts.get(&id).map(|p| p.clone()))
    }

    async fn create_post(&self, new: NewCommunityPost) -> Result<CommunityPost> {
        let post = CommunityPost {
            id: Uuid::now_v7(),
            farmer_id: new.farmer_id,
            farmer_name: new.farmer_name,
            content: new.content,
            image_url: new.image_url,
            category: new.category,
            upvotes: 0,
            location: new.location,
            timestamp: self.now(),
        };
        self.posts.insert(post.id, post.clone());
        debug!(post_id = %post.id, category = %post.category, "post created");
        Ok(post)
    }

    async fn upvote_post(&self, id: Uuid) -> Result<Option<CommunityPost>> {
        let Some(mut post) = self.posts.get_mut(&id) else {
            return Ok(None);
        };
        post.upvotes = post.upvotes.saturating_add(1);
        Ok(Some(post.clone()))
    }

    async fn list_comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        Ok(oldest_first(
            &self.comments,
            |c| c.post_id == post_id,
            |c| (c.timestamp, c.id),
        ))
    }

    async fn create_comment(&self, new: NewComment) -> Result<Comment> {
        let comment = Comment {
            id: Uuid::now_v7(),
            post_id: new.post_id,
            farmer_id: new.input.farmer_id,
            farmer_name: new.input.farmer_name,
            content: new.input.content,
            timestamp: self.now(),
        };
        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list_notifications_by_farmer(&self, farmer_id: Uuid) -> Result<Vec<Notification>> {
        Ok(newest_first(
            &self.notifications,
            |n| n.farmer_id == farmer_id,
            |n| (n.timestamp, n.id),
        ))
    }

    async fn create_notification(&self, new: NewNotification) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::now_v7(),
            farmer_id: new.farmer_id,
            kind: new.input.kind,
            title: new.input.title,
            message: new.input.message,
            read: false,
            timestamp: self.now(),
        };
        self.notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<Option<Notification>> {
        let Some(mut notification) = self.notifications.get_mut(&id) else {
            return Ok(None);
        };
        notification.read = true;
        Ok(Some(notification.clone()))
    }

    async fn get_weather_cache(&self, key: &str) -> Result<Option<WeatherCache>> {
        Ok(self.weather.get(key).map(|w| w.clone()))
    }

    async fn set_weather_cache(&self, new: NewWeatherCache) -> Result<WeatherCache> {
        let entry = WeatherCache {
            id: new.id,
            location: new.location,
            data: new.data,
            last_updated: self.now(),
        };
        self.weather.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn list_chat_messages_by_farmer(&self, farmer_id: Uuid) -> Result<Vec<ChatMessage>> {
        Ok(oldest_first(
            &self.chat,
            |m| m.farmer_id == farmer_id,
            |m| (m.timestamp, m.id),
        ))
    }

    async fn create_chat_message(&self, new: NewChatMessage) -> Result<ChatMessage> {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            farmer_id: new.farmer_id,
            role: new.role,
            content: new.content,
            timestamp: self.now(),
        };
        self.chat.insert(message.id, message.clone());
        Ok(message)
    }
}
