//! Search endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{paginate, validation_failed, PageQuery};
use crate::mock_server::state::{MockState, SharedState};

/// Query parameters for searching topics.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// GET /search/topics
///
/// Matches topics whose name or display name contains the query.
pub async fn search_topics(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let Some(q) = query.q.filter(|q| !q.trim().is_empty()) else {
        return validation_failed("Validation Failed: q is required");
    };
    let needle = q.to_lowercase();

    let state = state.read().await;
    let matches: Vec<Value> = state
        .topics
        .iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&needle)
                || t
                    .display_name
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .map(MockState::topic_json)
        .collect();
    let total = matches.len();

    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    let url = format!("{}/search/topics?q={}", state.base_url, urlencoding::encode(&q));
    let (items, _) = paginate(matches, &page_query, &url);

    (
        StatusCode::OK,
        Json(json!({
            "total_count": total,
            "incomplete_results": false,
            "items": items,
        })),
    )
        .into_response()
}
