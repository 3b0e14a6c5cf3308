//! HTTP request handlers for the mock server.

pub mod comments;
pub mod issues;
pub mod repos;
pub mod search;
pub mod users;

pub use comments::*;
pub use issues::*;
pub use repos::*;
pub use search::*;
pub use users::*;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use axum::{
    http::{
        header::{ETAG, IF_NONE_MATCH, LINK},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Default and maximum page sizes, as on GitHub.
const DEFAULT_PER_PAGE: usize = 30;
const MAX_PER_PAGE: usize = 100;

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// 404 in GitHub's error format.
pub(crate) fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })),
    )
        .into_response()
}

/// 422 in GitHub's error format.
pub(crate) fn validation_failed(message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "message": message })),
    )
        .into_response()
}

fn etag_for(body: &Value) -> String {
    let mut hasher = DefaultHasher::new();
    body.to_string().hash(&mut hasher);
    format!("\"{:016x}\"", hasher.finish())
}

/// Answer with `body` and its ETag, or `304 Not Modified` when the client
/// already holds that version.
pub(crate) fn conditional_json(headers: &HeaderMap, body: Value) -> Response {
    let etag = etag_for(&body);
    let cached = headers
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag);
    if cached {
        return (StatusCode::NOT_MODIFIED, [(ETAG, etag)]).into_response();
    }
    (StatusCode::OK, [(ETAG, etag)], Json(body)).into_response()
}

/// Slice `items` to the requested page and add a `Link` header pointing at
/// the next page when there is one.
///
/// `url` is the absolute URL of the list, including any filter query.
pub(crate) fn paginate(items: Vec<Value>, query: &PageQuery, url: &str) -> (Vec<Value>, Option<String>) {
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let page = query.page.unwrap_or(1).max(1);
    let start = (page - 1) * per_page;
    let has_next = items.len() > start + per_page;

    let page_items = items.into_iter().skip(start).take(per_page).collect();
    let link = has_next.then(|| {
        let separator = if url.contains('?') { '&' } else { '?' };
        format!(
            "<{url}{separator}per_page={per_page}&page={}>; rel=\"next\"",
            page + 1
        )
    });
    (page_items, link)
}

/// A JSON array response with an optional `Link` header.
pub(crate) fn list_response(items: Vec<Value>, link: Option<String>) -> Response {
    match link {
        Some(link) => (StatusCode::OK, [(LINK, link)], Json(Value::Array(items))).into_response(),
        None => (StatusCode::OK, Json(Value::Array(items))).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_links_next_page() {
        let items: Vec<Value> = (0..5).map(|i| json!(i)).collect();
        let query = PageQuery {
            page: Some(1),
            per_page: Some(2),
        };

        let (page, link) = paginate(items, &query, "http://mock/repos/o/r/issues?state=all");
        assert_eq!(page, vec![json!(0), json!(1)]);
        assert_eq!(
            link.as_deref(),
            Some("<http://mock/repos/o/r/issues?state=all&per_page=2&page=2>; rel=\"next\"")
        );
    }

    #[test]
    fn test_paginate_last_page_has_no_link() {
        let items: Vec<Value> = (0..5).map(|i| json!(i)).collect();
        let query = PageQuery {
            page: Some(3),
            per_page: Some(2),
        };

        let (page, link) = paginate(items, &query, "http://mock/x");
        assert_eq!(page, vec![json!(4)]);
        assert!(link.is_none());
    }

    #[test]
    fn test_etag_matches_yield_304() {
        let body = json!({"id": 1});
        let mut headers = HeaderMap::new();
        headers.insert(IF_NONE_MATCH, etag_for(&body).parse().unwrap());

        assert_eq!(
            conditional_json(&headers, body.clone()).status(),
            StatusCode::NOT_MODIFIED
        );
        assert_eq!(
            conditional_json(&HeaderMap::new(), body).status(),
            StatusCode::OK
        );
    }
}
