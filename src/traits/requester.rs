//! Requester trait for issuing JSON requests.

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::error::Result;

/// Response headers, keyed by lower-cased header name.
pub type Headers = HashMap<String, String>;

/// Issue JSON requests against the API.
///
/// [`GithubClient`](crate::GithubClient) is the HTTP implementation. Resource
/// objects only hold an `Arc<dyn Requester>`, so tests can substitute their
/// own implementation.
#[async_trait]
pub trait Requester: Send + Sync + Debug {
    /// Base URL that relative resource paths are resolved against.
    ///
    /// Always ends with `/`.
    fn base_url(&self) -> &Url;

    /// Send a request with an optional JSON body.
    ///
    /// `url` may be absolute or relative to [`Requester::base_url`]. Returns
    /// the response headers and the parsed body (`Value::Null` for empty
    /// bodies).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    async fn request_json(
        &self,
        method: Method,
        url: &str,
        input: Option<&Value>,
    ) -> Result<(Headers, Value)>;

    /// GET `url` unless it is unchanged since `etag` / `last_modified`.
    ///
    /// Returns `Ok(None)` when the server answers `304 Not Modified`.
    ///
    /// # Errors
    ///
    /// Same as [`Requester::request_json`].
    async fn get_json_if_modified(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> Result<Option<(Headers, Value)>>;

    /// GET `url`.
    ///
    /// # Errors
    ///
    /// Same as [`Requester::request_json`].
    async fn get_json(&self, url: &str) -> Result<(Headers, Value)> {
        self.request_json(Method::GET, url, None).await
    }

    /// Resolve `path` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid URL.
    fn make_url(&self, path: &str) -> Result<String> {
        let path = path.trim_start_matches('/');
        Ok(self.base_url().join(path)?.to_string())
    }
}
