//! Resource objects.
//!
//! [`Object`] is the plain data holder: a typed field table filled from JSON
//! attribute maps. [`Completable`] wraps an `Object` with the lazy completion
//! state machine: an incomplete object fetches its full representation the
//! first time an unset field is read.

mod base;
mod completable;
#[cfg(test)]
pub(crate) mod tests_support;

pub use base::Object;
pub use completable::Completable;

use serde_json::{Map, Value};

use crate::error::{GithubError, Result};

/// Turn a response body into an attribute map.
pub(crate) fn into_attributes(body: Value) -> Result<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        other => Err(GithubError::InvalidResponse(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Build a seed attribute map from a `json!` object literal.
pub(crate) fn seed(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Strip the last path segment: `.../issues/12` becomes `.../issues`.
pub(crate) fn parent_url(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit_once('/')
        .map_or(url, |(parent, _)| parent)
}
