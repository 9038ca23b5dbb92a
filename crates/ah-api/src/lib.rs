//! # ah-api
//!
//! The HTTP routing layer for AgriHub. Handlers translate requests into
//! calls on the `FarmRepo` port and the services in `ah-services`.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

pub use error::ApiError;
pub use state::{AppState, Ports, SharedState};

/// Builds the full application router.
///
/// Path parameters sharing a position are all called `{id}` so the
/// matcher sees one segment name per prefix.
pub fn router(state: SharedState) -> Router {
    let body_limit = state.body_limit;

    let api = Router::new()
        .route("/health", get(handlers::health))
        // Auth
        .route("/auth/register", post(handlers::farmers::register))
        .route("/auth/farmer/{email}", get(handlers::farmers::by_email))
        // Farmers and their sub-resources
        .route("/farmers/{id}", get(handlers::farmers::get).put(handlers::farmers::update))
        .route(
            "/farmers/{id}/projects",
            get(handlers::projects::list_for_farmer).post(handlers::projects::create_for_farmer),
        )
        .route("/farmers/{id}/chat", get(handlers::assistant::history))
        .route("/farmers/{id}/analysis", get(handlers::assistant::reports))
        .route(
            "/farmers/{id}/notifications",
            get(handlers::notifications::list_for_farmer).post(handlers::notifications::create_for_farmer),
        )
        // Projects
        .route("/projects", post(handlers::projects::create))
        .route(
            "/projects/{id}",
            get(handlers::projects::get)
                .put(handlers::projects::update)
                .delete(handlers::projects::delete),
        )
        // AI
        .route("/ai/chat", post(handlers::assistant::chat))
        .route("/ai/analyze-image", post(handlers::assistant::analyze_image))
        // Weather
        .route("/weather/{latitude}/{longitude}", get(handlers::weather::forecast))
        // Community
        .route(
            "/community/posts",
            get(handlers::community::list_posts).post(handlers::community::create_post),
        )
        .route("/community/posts/{id}", get(handlers::community::get_post))
        .route("/community/posts/{id}/upvote", post(handlers::community::upvote))
        .route(
            "/community/posts/{id}/comments",
            get(handlers::community::list_comments).post(handlers::community::comment_on_post),
        )
        .route("/community/comments", post(handlers::community::create_comment))
        // Notifications
        .route("/notifications", post(handlers::notifications::create))
        .route("/notifications/{id}/read", put(handlers::notifications::mark_read))
        // Uploads
        .route("/upload", post(handlers::upload::upload));

    Router::new()
        .nest("/api", api)
        .route("/metrics", get(handlers::metrics))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::cors_policy())
        .layer(middleware::standard_middleware())
        .with_state(state)
}
