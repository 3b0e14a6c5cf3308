//! User endpoint handlers.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};

use super::{conditional_json, not_found};
use crate::mock_server::state::SharedState;

/// GET /users/{login}
pub async fn get_user(
    State(state): State<SharedState>,
    Path(login): Path<String>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    match state.user_json(&login) {
        Some(body) => conditional_json(&headers, body),
        None => not_found(),
    }
}
