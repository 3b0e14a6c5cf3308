//! Mock GitHub API server.
//!
//! Provides an axum-based HTTP server that simulates the GitHub REST API.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::{MockState, SharedState};

/// A mock GitHub API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation. Every request is recorded, so
/// tests can assert exactly which requests lazy objects issued.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{addr}");

        let shared_state = state.shared();
        shared_state.write().await.base_url = url.clone();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `GithubClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Requests received so far, as `"METHOD path?query"`.
    pub async fn requests(&self) -> Vec<String> {
        self.state.read().await.requests.clone()
    }

    /// Number of requests received so far, health checks excluded.
    pub async fn request_count(&self) -> usize {
        self.state
            .read()
            .await
            .requests
            .iter()
            .filter(|r| !r.ends_with("/health"))
            .count()
    }

    /// Forget the requests received so far.
    pub async fn clear_requests(&self) {
        self.state.write().await.requests.clear();
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    fn create_router(state: SharedState) -> Router {
        Router::new()
            // Repository routes
            .route("/repos/:owner/:repo", get(handlers::get_repo))
            .route("/repos/:owner/:repo/labels", get(handlers::list_labels))
            .route("/repos/:owner/:repo/labels/:name", get(handlers::get_label))
            .route("/repos/:owner/:repo/commits/:sha", get(handlers::get_commit))
            // Issue routes
            .route("/repos/:owner/:repo/issues", get(handlers::list_issues))
            .route(
                "/repos/:owner/:repo/issues/:number",
                get(handlers::get_issue).patch(handlers::edit_issue),
            )
            .route(
                "/repos/:owner/:repo/issues/:number/comments",
                get(handlers::list_issue_comments).post(handlers::create_issue_comment),
            )
            // Comment routes
            .route(
                "/repos/:owner/:repo/issues/comments/:id",
                get(handlers::get_comment)
                    .patch(handlers::edit_comment)
                    .delete(handlers::delete_comment),
            )
            // User and search routes
            .route("/users/:login", get(handlers::get_user))
            .route("/search/topics", get(handlers::search_topics))
            // Health check
            .route("/health", get(health_check))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                record_and_authorize,
            ))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

/// Record the request, then reject it if a token is required and missing.
async fn record_and_authorize(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let line = match request.uri().query() {
        Some(query) => format!("{} {}?{query}", request.method(), request.uri().path()),
        None => format!("{} {}", request.method(), request.uri().path()),
    };

    let required_token = {
        let mut state = state.write().await;
        state.requests.push(line);
        state.required_token.clone()
    };

    if let Some(token) = required_token {
        let expected = format!("token {token}");
        let presented = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Bad credentials" })),
            )
                .into_response();
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::fixtures::{DEFAULT_ISSUE, DEFAULT_REPO};
    use crate::{Github, GithubClient, Opt};

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_issue_with_github_client() {
        let server = MockServer::start().await;
        let client = GithubClient::with_token("test-token", server.url()).unwrap();
        let github = Github::new(client);

        let repo = github.get_repo(DEFAULT_REPO, Opt::Unset).await.unwrap();
        let mut issue = repo.get_issue(DEFAULT_ISSUE, Opt::Unset).await.unwrap();

        assert_eq!(issue.title().await.unwrap(), "Lazy loading of attributes");
        assert_eq!(server.request_count().await, 2);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = GithubClient::new(None, server.url()).unwrap();

        let result = Github::new(client).get_repo("no/such", Opt::Unset).await;

        assert!(matches!(result, Err(crate::GithubError::NotFound { .. })));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token() {
        let state = Fixtures::default_scenario().with_required_token("secret");
        let server = MockServer::with_state(state).await;

        let anonymous = Github::new(GithubClient::new(None, server.url()).unwrap());
        let err = anonymous
            .get_user("octocat", Opt::Unset)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(401));

        let authed = Github::new(GithubClient::with_token("secret", server.url()).unwrap());
        let mut user = authed.get_user("octocat", Opt::Unset).await.unwrap();
        assert_eq!(user.name().await.unwrap(), Some("The Octocat"));

        server.shutdown().await;
    }
}
