//! Issue endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use super::{conditional_json, list_response, not_found, paginate, validation_failed, PageQuery};
use crate::mock_server::state::SharedState;

/// Query parameters for listing issues.
#[derive(Debug, Default, Deserialize)]
pub struct ListIssuesQuery {
    pub state: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Body of an issue update. Absent fields are left alone.
#[derive(Debug, Deserialize)]
pub struct EditIssueParams {
    pub title: Option<String>,
    pub body: Option<String>,
    pub state: Option<String>,
    pub labels: Option<Vec<String>>,
}

/// GET /repos/{owner}/{repo}/issues
///
/// Defaults to open issues, as GitHub does.
pub async fn list_issues(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<ListIssuesQuery>,
) -> Response {
    let full_name = format!("{owner}/{repo}");
    let filter = query.state.as_deref().unwrap_or("open");
    let state = state.read().await;
    if !state.repos.contains_key(&full_name) {
        return not_found();
    }

    let issues: Vec<Value> = state
        .issues
        .values()
        .filter(|i| i.repo == full_name && (filter == "all" || i.state == filter))
        .map(|i| state.issue_json(i))
        .collect();
    let url = format!(
        "{}/repos/{full_name}/issues?state={filter}",
        state.base_url
    );
    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    let (items, link) = paginate(issues, &page_query, &url);
    list_response(items, link)
}

/// GET /repos/{owner}/{repo}/issues/{number}
pub async fn get_issue(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    match state.issues.get(&(format!("{owner}/{repo}"), number)) {
        Some(issue) => conditional_json(&headers, state.issue_json(issue)),
        None => not_found(),
    }
}

/// PATCH /repos/{owner}/{repo}/issues/{number}
pub async fn edit_issue(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(params): Json<EditIssueParams>,
) -> Response {
    if let Some(new_state) = params.state.as_deref() {
        if new_state != "open" && new_state != "closed" {
            return validation_failed("state must be open or closed");
        }
    }

    let mut state = state.write().await;
    let key = (format!("{owner}/{repo}"), number);
    let Some(issue) = state.issues.get_mut(&key) else {
        return not_found();
    };

    if let Some(title) = params.title {
        issue.title = title;
    }
    if let Some(body) = params.body {
        issue.body = Some(body);
    }
    if let Some(new_state) = params.state {
        issue.state = new_state;
    }
    if let Some(labels) = params.labels {
        issue.labels = labels;
    }
    issue.updated_at = Utc::now();

    let issue = issue.clone();
    conditional_json(&HeaderMap::new(), state.issue_json(&issue))
}
