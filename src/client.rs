//! GitHub API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Resource objects reach it through the [`Requester`] trait.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, IF_MODIFIED_SINCE, IF_NONE_MATCH};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{GithubError, Result};
use crate::traits::{Headers, Requester};

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("ghapi/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Credentials sent with every request.
#[derive(Clone)]
pub enum Auth {
    /// A personal access or OAuth token (`Authorization: token ...`).
    Token(String),
    /// Login and password (`Authorization: Basic ...`).
    Login { login: String, password: String },
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Token(_) => f.write_str("Token(..)"),
            Auth::Login { login, .. } => f
                .debug_struct("Login")
                .field("login", login)
                .finish_non_exhaustive(),
        }
    }
}

impl Auth {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Auth::Token(token) => request.header("Authorization", format!("token {token}")),
            Auth::Login { login, password } => request.basic_auth(login, Some(password)),
        }
    }
}

/// Low-level GitHub API client.
///
/// Handles authentication and HTTP requests. Resource-specific operations
/// live on the resource objects, which hold this client as their
/// [`Requester`].
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use ghapi::{Auth, GithubClient};
///
/// # fn example() -> ghapi::Result<()> {
/// // Create from environment variables
/// let client = GithubClient::from_env()?;
///
/// // Or configure manually
/// let client = GithubClient::new(
///     Some(Auth::Token("your-token".to_string())),
///     "https://api.github.com",
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    base_url: Arc<Url>,
    auth: Option<Auth>,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Create a client from environment variables.
    ///
    /// Uses `GITHUB_TOKEN` for authentication if set (requests are
    /// unauthenticated otherwise) and optionally `GITHUB_API_URL` for the
    /// base URL (defaults to `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn from_env() -> Result<Self> {
        let auth = env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(Auth::Token);

        let base_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(auth, &base_url)
    }

    /// Create a new client with the provided credentials and base URL.
    ///
    /// # Arguments
    ///
    /// * `auth` - Credentials, or `None` for anonymous access
    /// * `base_url` - Base URL for the API (e.g., `https://api.github.com`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(auth: Option<Auth>, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(GithubError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            auth,
        })
    }

    /// Shorthand for token authentication.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_token(token: &str, base_url: &str) -> Result<Self> {
        Self::new(Some(Auth::Token(token.to_string())), base_url)
    }

    /// Resolve an absolute URL or a path relative to the base URL.
    fn resolve(&self, url: &str) -> Result<Url> {
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(Url::parse(url)?)
        } else {
            Ok(self.base_url.join(url.trim_start_matches('/'))?)
        }
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.http.request(method, url).header("Accept", ACCEPT);
        match &self.auth {
            Some(auth) => auth.apply(request),
            None => request,
        }
    }

    /// Send a request and decode the JSON body.
    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<(Headers, Value)> {
        let response = request.send().await.map_err(GithubError::HttpError)?;
        let response = Self::check_response(response, url).await?;
        Self::decode(response).await
    }

    async fn decode(response: Response) -> Result<(Headers, Value)> {
        let headers = Self::collect_headers(response.headers());
        let body = response.text().await.map_err(GithubError::HttpError)?;
        let body = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };
        Ok((headers, body))
    }

    fn collect_headers(headers: &HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect()
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response, url: &Url) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(GithubError::NotFound {
                url: url.to_string(),
            });
        }

        // Handle rate limiting, both the secondary (429) and primary
        // (403 with no remaining requests) flavours.
        let exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "0");
        if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted)
        {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(GithubError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(GithubError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract message field
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[async_trait]
impl Requester for GithubClient {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[tracing::instrument(skip(self, input))]
    async fn request_json(
        &self,
        method: Method,
        url: &str,
        input: Option<&Value>,
    ) -> Result<(Headers, Value)> {
        let url = self.resolve(url)?;
        let mut request = self.request(method, url.clone());
        if let Some(input) = input {
            request = request.json(input);
        }
        self.send(request, &url).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_json_if_modified(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> Result<Option<(Headers, Value)>> {
        let url = self.resolve(url)?;
        let mut request = self.request(Method::GET, url.clone());
        if let Some(etag) = etag {
            request = request.header(IF_NONE_MATCH, etag);
        }
        if let Some(last_modified) = last_modified {
            request = request.header(IF_MODIFIED_SINCE, last_modified);
        }

        let response = request.send().await.map_err(GithubError::HttpError)?;
        if response.status() == StatusCode::NOT_MODIFIED {
            tracing::debug!(%url, "not modified");
            return Ok(None);
        }
        let response = Self::check_response(response, &url).await?;
        Self::decode(response).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = GithubClient::with_token("test-token", "https://api.github.com").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("GithubClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_auth_debug_hides_secrets() {
        let auth = Auth::Login {
            login: "octocat".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{auth:?}");
        assert!(debug.contains("octocat"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = GithubClient::new(None, "https://api.github.com").unwrap();
        let client2 = GithubClient::new(None, "https://api.github.com/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_resolve_keeps_enterprise_prefix() {
        let client = GithubClient::new(None, "https://ghe.example.com/api/v3").unwrap();
        assert_eq!(
            client.resolve("/repos/o/r").unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/o/r"
        );
        assert_eq!(
            client.resolve("https://other.example.com/x").unwrap().as_str(),
            "https://other.example.com/x"
        );
        assert_eq!(
            client.make_url("users/octocat").unwrap(),
            "https://ghe.example.com/api/v3/users/octocat"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            GithubClient::new(None, "not a url"),
            Err(GithubError::UrlError(_))
        ));
    }
}
