//! Registration, email "login" and profile edits.

use ah_core::models::{Farmer, FarmerPatch, NewFarmer};
use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use super::found;
use crate::error::ApiError;
use crate::extract::{parse_id, ValidJson};
use crate::state::SharedState;

pub async fn register(
    State(state): State<SharedState>,
    ValidJson(new): ValidJson<NewFarmer>,
) -> Result<Json<Farmer>, ApiError> {
    let farmer = state.repo.create_farmer(new).await?;
    info!(farmer_id = %farmer.id, region = ?farmer.region, "farmer registered");
    Ok(Json(farmer))
}

pub async fn by_email(
    State(state): State<SharedState>,
    Path(email): Path<String>,
) -> Result<Json<Farmer>, ApiError> {
    found(state.repo.get_farmer_by_email(&email).await?, "Farmer", &email)
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Farmer>, ApiError> {
    let farmer_id = parse_id(&id, "Farmer")?;
    found(state.repo.get_farmer(farmer_id).await?, "Farmer", &id)
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<FarmerPatch>,
) -> Result<Json<Farmer>, ApiError> {
    let farmer_id = parse_id(&id, "Farmer")?;
    found(state.repo.update_farmer(farmer_id, patch).await?, "Farmer", &id)
}
