//! Community forum: posts, upvotes and comments.

use ah_core::models::{Comment, CommentInput, CommunityPost, NewComment, NewCommunityPost};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info};

use super::found;
use crate::error::ApiError;
use crate::extract::{parse_id, ValidJson};
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct PostFilter {
    pub category: Option<String>,
}

pub async fn list_posts(
    State(state): State<SharedState>,
    Query(filter): Query<PostFilter>,
) -> Result<Json<Vec<CommunityPost>>, ApiError> {
    let category = filter.category.filter(|c| !c.is_empty());
    Ok(Json(state.repo.list_posts(category).await?))
}

pub async fn create_post(
    State(state): State<SharedState>,
    ValidJson(new): ValidJson<NewCommunityPost>,
) -> Result<Json<CommunityPost>, ApiError> {
    let post = state.repo.create_post(new).await?;
    info!(post_id = %post.id, farmer_id = %post.farmer_id, category = %post.category, "post created");
    Ok(Json(post))
}

pub async fn get_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommunityPost>, ApiError> {
    let post_id = parse_id(&id, "Post")?;
    found(state.repo.get_post(post_id).await?, "Post", &id)
}

pub async fn upvote(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CommunityPost>, ApiError> {
    let post_id = parse_id(&id, "Post")?;
    let post = found(state.repo.upvote_post(post_id).await?, "Post", &id)?;
    debug!(%post_id, upvotes = post.upvotes, "post upvoted");
    Ok(post)
}

pub async fn list_comments(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let post_id = parse_id(&id, "Post")?;
    Ok(Json(state.repo.list_comments_by_post(post_id).await?))
}

pub async fn comment_on_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<CommentInput>,
) -> Result<Json<Comment>, ApiError> {
    let post_id = parse_id(&id, "Post")?;
    create_comment_inner(&state, NewComment::new(post_id, input)).await
}

pub async fn create_comment(
    State(state): State<SharedState>,
    ValidJson(new): ValidJson<NewComment>,
) -> Result<Json<Comment>, ApiError> {
    create_comment_inner(&state, new).await
}

async fn create_comment_inner(state: &SharedState, new: NewComment) -> Result<Json<Comment>, ApiError> {
    let comment = state.repo.create_comment(new).await?;
    info!(comment_id = %comment.id, post_id = %comment.post_id, "comment added");
    Ok(Json(comment))
}
