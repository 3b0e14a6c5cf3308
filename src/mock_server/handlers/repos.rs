//! Repository, label and commit endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use serde_json::Value;

use super::{conditional_json, list_response, not_found, paginate, PageQuery};
use crate::mock_server::state::SharedState;

/// GET /repos/{owner}/{repo}
pub async fn get_repo(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    match state.repo_json(&format!("{owner}/{repo}")) {
        Some(body) => conditional_json(&headers, body),
        None => not_found(),
    }
}

/// GET /repos/{owner}/{repo}/labels
pub async fn list_labels(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
) -> Response {
    let full_name = format!("{owner}/{repo}");
    let state = state.read().await;
    if !state.repos.contains_key(&full_name) {
        return not_found();
    }

    let labels: Vec<Value> = state
        .labels
        .values()
        .filter(|l| l.repo == full_name)
        .map(|l| state.label_json(l))
        .collect();
    let url = format!("{}/repos/{full_name}/labels", state.base_url);
    let (items, link) = paginate(labels, &query, &url);
    list_response(items, link)
}

/// GET /repos/{owner}/{repo}/labels/{name}
pub async fn get_label(
    State(state): State<SharedState>,
    Path((owner, repo, name)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    match state.labels.get(&(format!("{owner}/{repo}"), name)) {
        Some(label) => conditional_json(&headers, state.label_json(label)),
        None => not_found(),
    }
}

/// GET /repos/{owner}/{repo}/commits/{sha}
///
/// Accepts any unambiguous prefix of a stored SHA.
pub async fn get_commit(
    State(state): State<SharedState>,
    Path((owner, repo, sha)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let full_name = format!("{owner}/{repo}");
    let state = state.read().await;
    let mut matches = state
        .commits
        .values()
        .filter(|c| c.repo == full_name && c.sha.starts_with(&sha));

    match (matches.next(), matches.next()) {
        (Some(commit), None) => conditional_json(&headers, state.commit_json(commit)),
        _ => not_found(),
    }
}
