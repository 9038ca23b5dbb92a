use ah_core::models::{NewNotification, Notification, NotificationInput};
use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use super::found;
use crate::error::ApiError;
use crate::extract::{parse_id, ValidJson};
use crate::state::SharedState;

pub async fn list_for_farmer(
    State(state): State<SharedState>,
    Path(farmer_id): Path<String>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let farmer_id = parse_id(&farmer_id, "Farmer")?;
    Ok(Json(state.repo.list_notifications_by_farmer(farmer_id).await?))
}

pub async fn create_for_farmer(
    State(state): State<SharedState>,
    Path(farmer_id): Path<String>,
    ValidJson(input): ValidJson<NotificationInput>,
) -> Result<Json<Notification>, ApiError> {
    let farmer_id = parse_id(&farmer_id, "Farmer")?;
    notify(&state, NewNotification::new(farmer_id, input)).await
}

pub async fn create(
    State(state): State<SharedState>,
    ValidJson(new): ValidJson<NewNotification>,
) -> Result<Json<Notification>, ApiError> {
    notify(&state, new).await
}

async fn notify(state: &SharedState, new: NewNotification) -> Result<Json<Notification>, ApiError> {
    let notification = state.repo.create_notification(new).await?;
    info!(
        notification_id = %notification.id,
        farmer_id = %notification.farmer_id,
        kind = %notification.kind,
        "notification created"
    );
    Ok(Json(notification))
}

/// Idempotent: marking an already-read notification returns it unchanged.
pub async fn mark_read(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Notification>, ApiError> {
    let notification_id = parse_id(&id, "Notification")?;
    found(state.repo.mark_notification_read(notification_id).await?, "Notification", &id)
}
