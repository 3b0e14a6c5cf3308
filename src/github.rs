//! The root object of the API.

use std::env;
use std::sync::Arc;

use serde_json::json;

use crate::client::GithubClient;
use crate::error::{GithubError, Result};
use crate::models::{NamedUser, Repository, Topic};
use crate::object::seed;
use crate::opt::Opt;
use crate::pagination::PaginatedList;
use crate::traits::Requester;

/// Entry point for walking the GitHub object graph.
///
/// The laziness preference set here is inherited by every object obtained
/// through it, and from those by their children, unless an accessor call
/// overrides it.
///
/// # Example
///
/// ```no_run
/// use ghapi::{Github, GithubClient, Opt};
///
/// # async fn example() -> ghapi::Result<()> {
/// let github = Github::new(GithubClient::from_env()?).with_lazy(true);
///
/// // No request yet: the repository and the issue are both lazy.
/// let repo = github.get_repo("PyGithub/PyGithub", Opt::Unset).await?;
/// let mut issue = repo.get_issue(1234, Opt::Unset).await?;
///
/// // First read of an unset field completes the issue.
/// println!("{}", issue.title().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Github {
    requester: Arc<dyn Requester>,
    lazy: Opt<bool>,
}

impl Github {
    /// Wrap a client, with no laziness preference (objects are fetched
    /// eagerly).
    pub fn new(client: GithubClient) -> Self {
        Self::with_requester(Arc::new(client))
    }

    /// Wrap any [`Requester`].
    pub fn with_requester(requester: Arc<dyn Requester>) -> Self {
        Self {
            requester,
            lazy: Opt::Unset,
        }
    }

    /// Set the laziness preference handed to every object.
    #[must_use]
    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = Opt::present(lazy);
        self
    }

    /// Create from environment variables.
    ///
    /// Reads the client configuration (see [`GithubClient::from_env`]) and
    /// `GITHUB_LAZY` (`true`/`false`; unset leaves the preference unset).
    ///
    /// # Errors
    ///
    /// Returns an error if the client configuration is invalid or
    /// `GITHUB_LAZY` holds anything but a boolean.
    pub fn from_env() -> Result<Self> {
        let github = Self::new(GithubClient::from_env()?);
        match env::var("GITHUB_LAZY") {
            Ok(value) => Ok(github.with_lazy(parse_bool(&value)?)),
            Err(_) => Ok(github),
        }
    }

    /// The laziness preference inherited by objects built from here.
    pub fn lazy_preference(&self) -> Opt<bool> {
        self.lazy
    }

    pub fn requester(&self) -> &Arc<dyn Requester> {
        &self.requester
    }

    /// Get a repository by `owner/name`.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidArgument`] if `full_name` is not of the
    /// form `owner/name`, or the request error of an eager fetch.
    pub async fn get_repo(&self, full_name: &str, lazy: Opt<bool>) -> Result<Repository> {
        validate_full_name(full_name)?;
        let url = self.requester.make_url(&format!("repos/{full_name}"))?;
        Repository::spawn(
            &self.requester,
            self.lazy,
            lazy,
            seed(json!({ "full_name": full_name, "url": url })),
        )
        .await
    }

    /// Get a user by login.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidArgument`] for a malformed login, or the
    /// request error of an eager fetch.
    pub async fn get_user(&self, login: &str, lazy: Opt<bool>) -> Result<NamedUser> {
        validate_login(login)?;
        let url = self.requester.make_url(&format!("users/{login}"))?;
        NamedUser::spawn(
            &self.requester,
            self.lazy,
            lazy,
            seed(json!({ "login": login, "url": url })),
        )
        .await
    }

    /// Search topics. Performs no I/O until a page is requested.
    pub fn search_topics(&self, query: &str) -> PaginatedList<Topic> {
        PaginatedList::new(
            Arc::clone(&self.requester),
            "search/topics".to_string(),
            self.lazy,
        )
        .with_list_item("items")
        .with_param("q", query)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(GithubError::InvalidArgument(format!(
            "GITHUB_LAZY must be true or false, got {other:?}"
        ))),
    }
}

fn validate_full_name(full_name: &str) -> Result<()> {
    match full_name.split_once('/') {
        Some((owner, name)) if is_name_segment(owner) && is_name_segment(name) => Ok(()),
        _ => Err(GithubError::InvalidArgument(format!(
            "repository name must be owner/name, got {full_name:?}"
        ))),
    }
}

/// One path segment of `owner/name`: ASCII alphanumerics, `.`, `_` and `-`,
/// but never `.` or `..` alone.
fn is_name_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

fn validate_login(login: &str) -> Result<()> {
    let valid = !login.is_empty()
        && login
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '[' || c == ']');
    if valid {
        Ok(())
    } else {
        Err(GithubError::InvalidArgument(format!(
            "invalid user login: {login:?}"
        )))
    }
}
