//! Issue comment endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use super::{conditional_json, list_response, not_found, paginate, validation_failed, PageQuery};
use crate::mock_server::state::SharedState;

/// Login recorded as the author of comments created through the API.
const API_USER: &str = "octocat";

/// Body of a comment create or update.
#[derive(Debug, Deserialize)]
pub struct CommentParams {
    pub body: String,
}

/// GET /repos/{owner}/{repo}/issues/{number}/comments
pub async fn list_issue_comments(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Query(query): Query<PageQuery>,
) -> Response {
    let full_name = format!("{owner}/{repo}");
    let state = state.read().await;
    if !state.issues.contains_key(&(full_name.clone(), number)) {
        return not_found();
    }

    let comments: Vec<Value> = state
        .comments
        .values()
        .filter(|c| c.repo == full_name && c.issue_number == number)
        .map(|c| state.comment_json(c))
        .collect();
    let url = format!(
        "{}/repos/{full_name}/issues/{number}/comments",
        state.base_url
    );
    let (items, link) = paginate(comments, &query, &url);
    list_response(items, link)
}

/// POST /repos/{owner}/{repo}/issues/{number}/comments
pub async fn create_issue_comment(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(params): Json<CommentParams>,
) -> Response {
    if params.body.is_empty() {
        return validation_failed("body must not be empty");
    }

    let full_name = format!("{owner}/{repo}");
    let mut state = state.write().await;
    if !state.issues.contains_key(&(full_name.clone(), number)) {
        return not_found();
    }

    let id = state.add_comment(&full_name, number, params.body, API_USER);
    match state.comments.get(&id) {
        Some(comment) => (StatusCode::CREATED, Json(state.comment_json(comment))).into_response(),
        None => not_found(),
    }
}

/// GET /repos/{owner}/{repo}/issues/comments/{id}
pub async fn get_comment(
    State(state): State<SharedState>,
    Path((owner, repo, id)): Path<(String, String, u64)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    match state.comments.get(&id) {
        Some(comment) if comment.repo == format!("{owner}/{repo}") => {
            conditional_json(&headers, state.comment_json(comment))
        }
        _ => not_found(),
    }
}

/// PATCH /repos/{owner}/{repo}/issues/comments/{id}
pub async fn edit_comment(
    State(state): State<SharedState>,
    Path((owner, repo, id)): Path<(String, String, u64)>,
    Json(params): Json<CommentParams>,
) -> Response {
    let mut state = state.write().await;
    let Some(comment) = state
        .comments
        .get_mut(&id)
        .filter(|c| c.repo == format!("{owner}/{repo}"))
    else {
        return not_found();
    };

    comment.body = params.body;
    comment.updated_at = Utc::now();

    let comment = comment.clone();
    (StatusCode::OK, Json(state.comment_json(&comment))).into_response()
}

/// DELETE /repos/{owner}/{repo}/issues/comments/{id}
pub async fn delete_comment(
    State(state): State<SharedState>,
    Path((owner, repo, id)): Path<(String, String, u64)>,
) -> Response {
    let mut state = state.write().await;
    let owned = state
        .comments
        .get(&id)
        .is_some_and(|c| c.repo == format!("{owner}/{repo}"));
    if !owned {
        return not_found();
    }
    state.comments.remove(&id);
    StatusCode::NO_CONTENT.into_response()
}
