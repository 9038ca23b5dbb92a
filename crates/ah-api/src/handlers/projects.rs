//! Planner projects. Only projects support hard delete.

use ah_core::models::{NewProject, Project, ProjectInput, ProjectPatch};
use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use super::{found, Ack};
use crate::error::ApiError;
use crate::extract::{parse_id, ValidJson};
use crate::state::SharedState;

pub async fn list_for_farmer(
    State(state): State<SharedState>,
    Path(farmer_id): Path<String>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let farmer_id = parse_id(&farmer_id, "Farmer")?;
    Ok(Json(state.repo.list_projects_by_farmer(farmer_id).await?))
}

pub async fn create_for_farmer(
    State(state): State<SharedState>,
    Path(farmer_id): Path<String>,
    ValidJson(input): ValidJson<ProjectInput>,
) -> Result<Json<Project>, ApiError> {
    let farmer_id = parse_id(&farmer_id, "Farmer")?;
    create_project(&state, NewProject::new(farmer_id, input)).await
}

pub async fn create(
    State(state): State<SharedState>,
    ValidJson(new): ValidJson<NewProject>,
) -> Result<Json<Project>, ApiError> {
    create_project(&state, new).await
}

async fn create_project(state: &SharedState, new: NewProject) -> Result<Json<Project>, ApiError> {
    let project = state.repo.create_project(new).await?;
    info!(project_id = %project.id, farmer_id = %project.farmer_id, kind = %project.kind, "project created");
    Ok(Json(project))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let project_id = parse_id(&id, "Project")?;
    found(state.repo.get_project(project_id).await?, "Project", &id)
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<ProjectPatch>,
) -> Result<Json<Project>, ApiError> {
    let project_id = parse_id(&id, "Project")?;
    found(state.repo.update_project(project_id, patch).await?, "Project", &id)
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let project_id = parse_id(&id, "Project")?;
    let removed = state.repo.delete_project(project_id).await?;
    found(removed.then_some(Ack { success: true }), "Project", &id)
}
