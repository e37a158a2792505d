//! Request handlers.
//!
//! Handlers validate input, consult the classifier or auth gate where the
//! route calls for it, and perform store operations through parameterized
//! queries only. All failures funnel into [`ApiError`].

use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gazette_moderation::Verdict;
use gazette_types::{Comment, CommentStats, CommentStatus, ModerationComment, NewComment, Post, PostSummary};
use serde::Deserialize;
use serde_json::json;

/// Message shown to a commenter whose submission went to the moderation
/// queue.
const MODERATION_NOTICE: &str = "Your comment has been submitted for moderation.";

// ── public routes ────────────────────────────────────────────────

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.store.published_posts()?))
}

pub async fn list_comments(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let Path(post_id) = path.map_err(bad_path)?;
    Ok(Json(state.store.approved_comments(post_id)?))
}

/// Comment submission: validate, classify, store, respond.
///
/// Approved comments come back as the bare stored record; pending ones
/// are wrapped in a moderation notice so the front end can tell the
/// commenter what happened.
pub async fn create_comment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewComment>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(post_id) = path.map_err(bad_path)?;
    let Json(submission) = body.map_err(bad_body)?;
    submission
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let verdict = state.classifier.classify(&submission.content);
    let stored = state
        .store
        .insert_comment(post_id, &submission, verdict.initial_status())?;

    tracing::info!(
        comment_id = stored.id,
        post_id,
        status = %stored.status,
        "comment stored"
    );

    match verdict {
        Verdict::Pending => Ok(Json(json!({
            "message": MODERATION_NOTICE,
            "comment": stored,
        }))
        .into_response()),
        Verdict::Approved => Ok(Json(stored).into_response()),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

pub async fn search_posts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PostSummary>>, ApiError> {
    if params.q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    Ok(Json(state.store.search_posts(&params.q)?))
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    email: String,
}

pub async fn subscribe(
    State(state): State<AppState>,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(request) = body.map_err(bad_body)?;
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest(
            "a valid email address is required".to_string(),
        ));
    }
    state.store.subscribe(email)?;
    Ok(Json(json!({ "message": "Subscribed." })))
}

// ── admin routes ─────────────────────────────────────────────────

/// Runs the auth gate before any admin handler. On failure nothing
/// downstream executes, so no state is inspected or mutated.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if state.credentials.authenticate(header) {
        next.run(request).await
    } else {
        ApiError::Unauthorized.into_response()
    }
}

pub async fn moderation_queue(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModerationComment>>, ApiError> {
    Ok(Json(state.store.all_comments()?))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    status: String,
}

pub async fn update_comment_status(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<Comment>, ApiError> {
    let Path(id) = path.map_err(bad_path)?;
    let Json(update) = body.map_err(bad_body)?;
    let status: CommentStatus = update
        .status
        .parse()
        .map_err(|e: gazette_types::Error| ApiError::BadRequest(e.to_string()))?;

    let updated = state.store.update_comment_status(id, status)?;
    tracing::info!(comment_id = id, status = %status, "comment status updated");
    Ok(Json(updated))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Path(id) = path.map_err(bad_path)?;
    state.store.delete_comment(id)?;
    tracing::info!(comment_id = id, "comment deleted");
    Ok(Json(json!({ "message": "Comment deleted." })))
}

pub async fn comment_stats(
    State(state): State<AppState>,
) -> Result<Json<CommentStats>, ApiError> {
    Ok(Json(state.store.comment_stats()?))
}

// ── fallbacks ────────────────────────────────────────────────────

/// Unknown path, or known path with a method it does not serve.
pub async fn unknown_route() -> ApiError {
    ApiError::UnknownRoute
}

fn bad_path(rejection: PathRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}
