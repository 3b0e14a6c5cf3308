//! GitHub API client library.
//!
//! A Rust library for walking the GitHub REST API object graph, where every
//! resource object can be *lazy*: built from the identifiers known at hand
//! and only fetched the first time a field that was not provided is read.
//!
//! # Quick Start
//!
//! ```no_run
//! use ghapi::{Github, GithubClient, Opt};
//!
//! #[tokio::main]
//! async fn main() -> ghapi::Result<()> {
//!     // Create client from environment variables
//!     let github = Github::new(GithubClient::from_env()?).with_lazy(true);
//!
//!     // Walk to a comment: no request is sent for the repository or issue
//!     let repo = github.get_repo("PyGithub/PyGithub", Opt::Unset).await?;
//!     let issue = repo.get_issue(1234, Opt::Unset).await?;
//!     let mut comment = issue.get_comment(560146023, Opt::Unset).await?;
//!
//!     // Reading an unset field fetches the comment, once
//!     let user = comment.user().await?;
//!     println!("Comment by {}", user.login().await?);
//!
//!     // List the open issues of the repository
//!     let issues = repo.get_issues(None)?.get_page(1).await?;
//!     println!("Found {} issues on the first page", issues.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around two object kinds:
//!
//! - [`Object`] - A plain data holder, filled from the attributes it was
//!   built with (used for search results such as [`Topic`])
//! - [`Completable`] - An object that knows its own URL and fetches its full
//!   representation the first time an unset field is read
//!
//! Each resource (like [`Repository`] or [`Issue`]) is a type alias over one
//! of these, parameterised by a field table implementing [`Resource`].
//!
//! # Laziness
//!
//! Every accessor that builds a child object takes an [`Opt<bool>`]. Leaving
//! it [`Opt::Unset`] inherits the parent's preference, which comes from
//! [`Github::with_lazy`] at the root. An unset preference everywhere means
//! eager: the child is fetched before the accessor returns.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `GITHUB_TOKEN` (optional) - Token sent as `Authorization: token ...`
//! - `GITHUB_API_URL` (optional) - Base URL (defaults to `https://api.github.com`)
//! - `GITHUB_LAZY` (optional) - Root laziness preference, read by
//!   [`Github::from_env`]

mod attribute;
mod client;
mod error;
mod github;
mod models;
mod object;
mod opt;
mod pagination;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use attribute::Attribute;
pub use client::{Auth, GithubClient};
pub use error::{GithubError, Result};
pub use github::Github;
pub use object::{Completable, Object};
pub use opt::Opt;
pub use pagination::{FromListItem, Page, PaginatedList, DEFAULT_PER_PAGE, MAX_PER_PAGE};

// Re-export traits
pub use traits::{CompletableResource, Context, Headers, Requester, Resource};

// Re-export models
pub use models::{
    // Commit types
    Commit,
    CommitData,
    CommitStats,
    // Issue types
    Issue,
    IssueComment,
    IssueCommentData,
    IssueData,
    IssueDependenciesSummary,
    IssueDependenciesSummaryData,
    IssueEditParams,
    IssueState,
    IssueType,
    IssueTypeData,
    SubIssuesSummary,
    SubIssuesSummaryData,
    // Repository types
    Label,
    LabelData,
    Repository,
    RepositoryData,
    Topic,
    TopicData,
    // User types
    NamedUser,
    NamedUserData,
};
