//! Mock GitHub API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the GitHub
//! REST API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests and records every request it receives, enabling realistic
//! workflow testing of lazy completion.
//!
//! # Example
//!
//! ```ignore
//! use ghapi::mock_server::MockServer;
//! use ghapi::{Github, GithubClient, Opt};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = GithubClient::with_token("test-token", server.url()).unwrap();
//!     let github = Github::new(client).with_lazy(true);
//!
//!     // Lazy objects issue no request until an unset field is read
//!     let repo = github.get_repo("PyGithub/PyGithub", Opt::Unset).await.unwrap();
//!     assert_eq!(server.request_count().await, 0);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{Fixtures, DEFAULT_COMMENT, DEFAULT_ISSUE, DEFAULT_REPO};
pub use server::MockServer;
pub use state::{
    MockComment, MockCommit, MockIssue, MockLabel, MockRepo, MockState, MockTopic, MockUser,
    SharedState,
};
