//! # Domain Models
//!
//! These structs represent the core entities of AgriHub.
//! We use UUID v7 so that identifier order follows creation order.
//!
//! Every stored entity has a matching `New*` insert shape (no id, no
//! server-stamped fields). `Farmer` and `Project` also have a `*Patch` used
//! for whole-object merges.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_PROJECT_KIND: &str = "crop";
pub const DEFAULT_PROJECT_STATUS: &str = "active";
pub const DEFAULT_POST_CATEGORY: &str = "crops";

/// A registered farmer profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub region: Option<String>,
    pub language: String,
    pub farming_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFarmer {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    pub farming_type: String,
}

/// Partial update for a farmer. `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub region: Option<Option<String>>,
    pub language: Option<String>,
    pub farming_type: Option<String>,
}

impl Farmer {
    pub fn apply(&mut self, patch: FarmerPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(region) = patch.region {
            self.region = region;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(farming_type) = patch.farming_type {
            self.farming_type = farming_type;
        }
    }
}

/// A tracked crop or livestock activity, used by the profitability planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub farmer_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Hectares
    pub land_size: Option<f64>,
    pub expected_yield: Option<i64>,
    /// Free-form cost breakdown owned by the planner UI
    pub costs: Option<serde_json::Value>,
    pub market_price: Option<f64>,
    pub planting_date: Option<DateTime<Utc>>,
    pub harvest_date: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Project fields supplied by a client, without the owning farmer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[serde(rename = "type", default = "default_project_kind")]
    pub kind: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub land_size: Option<f64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub expected_yield: Option<i64>,
    #[serde(default)]
    pub costs: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub market_price: Option<f64>,
    #[serde(default)]
    pub planting_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub harvest_date: Option<DateTime<Utc>>,
    /// Falls back to "active" when omitted
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub farmer_id: Uuid,
    #[serde(flatten)]
    pub input: ProjectInput,
}

impl NewProject {
    pub fn new(farmer_id: Uuid, input: ProjectInput) -> Self {
        Self { farmer_id, input }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub farmer_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable_number")]
    pub land_size: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable_whole_number")]
    pub expected_yield: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub costs: Option<Option<serde_json::Value>>,
    #[serde(default, deserialize_with = "nullable_number")]
    pub market_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub planting_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub harvest_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<String>,
}

impl Project {
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(farmer_id) = patch.farmer_id {
            self.farmer_id = farmer_id;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(land_size) = patch.land_size {
            self.land_size = land_size;
        }
        if let Some(expected_yield) = patch.expected_yield {
            self.expected_yield = expected_yield;
        }
        if let Some(costs) = patch.costs {
            self.costs = costs;
        }
        if let Some(market_price) = patch.market_price {
            self.market_price = market_price;
        }
        if let Some(planting_date) = patch.planting_date {
            self.planting_date = planting_date;
        }
        if let Some(harvest_date) = patch.harvest_date {
            self.harvest_date = harvest_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Result of a vision diagnosis on an uploaded crop photo. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub image_url: String,
    pub diagnosis: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalysisReport {
    pub farmer_id: Uuid,
    pub image_url: String,
    pub diagnosis: String,
}

/// A public forum entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: Uuid,
    pub farmer_id: Uuid,
    /// Denormalized so listings need no farmer lookup
    pub farmer_name: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub upvotes: u32,
    pub location: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunityPost {
    pub farmer_id: Uuid,
    pub farmer_name: String,
    pub content: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub image_url: Option<String>,
    #[serde(default = "default_post_category")]
    pub category: String,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub farmer_id: Uuid,
    pub farmer_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Comment fields supplied by a client, without the target post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    pub farmer_id: Uuid,
    pub farmer_name: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: Uuid,
    #[serde(flatten)]
    pub input: CommentInput,
}

impl NewComment {
    pub fn new(post_id: Uuid, input: CommentInput) -> Self {
        Self { post_id, input }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub farmer_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub farmer_id: Uuid,
    #[serde(flatten)]
    pub input: NotificationInput,
}

impl NewNotification {
    pub fn new(farmer_id: Uuid, input: NotificationInput) -> Self {
        Self { farmer_id, input }
    }
}

/// Memoized upstream forecast keyed by the "lat,lon" pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCache {
    pub id: String,
    pub location: String,
    /// Raw provider payload, passed through untouched
    pub data: serde_json::Value,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewWeatherCache {
    pub id: String,
    pub location: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn in the assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    pub farmer_id: Uuid,
    pub role: ChatRole,
    pub content: String,
}

impl NewChatMessage {
    pub fn user(farmer_id: Uuid, content: impl Into<String>) -> Self {
        Self { farmer_id, role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(farmer_id: Uuid, content: impl Into<String>) -> Self {
        Self { farmer_id, role: ChatRole::Assistant, content: content.into() }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_project_kind() -> String {
    DEFAULT_PROJECT_KIND.to_string()
}

fn default_post_category() -> String {
    DEFAULT_POST_CATEGORY.to_string()
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Must be paired with `#[serde(default)]`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Treats `""` the same as `null`.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// HTML forms post numbers as strings; accept both. Blank text counts as unset.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid number {s:?}: {e}"))),
    }
}

fn nullable_number<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    lenient_number(deserializer).map(Some)
}

/// Counts such as yield are whole; fractional input is truncated toward zero.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match lenient_number::<D, f64>(deserializer)? {
        None => Ok(None),
        Some(v) if v.is_finite() => Ok(Some(v.trunc() as i64)),
        Some(v) => Err(serde::de::Error::custom(format!("invalid number {v}"))),
    }
}

fn nullable_whole_number<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    whole_number(deserializer).map(Some)
}
