//! Issue model.
//!
//! Issues are reached from a repository (`Repository::get_issue`) or from
//! list endpoints. Comments hang off an issue's URL family.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::attribute::Attribute;
use crate::error::{GithubError, Result};
use crate::models::{
    IssueComment, IssueDependenciesSummary, IssueType, Label, NamedUser, SubIssuesSummary,
};
use crate::object::{into_attributes, parent_url, seed, Completable, Object};
use crate::opt::Opt;
use crate::pagination::PaginatedList;
use crate::traits::{repr_value, CompletableResource, Context, Resource};

// =============================================================================
// TYPES
// =============================================================================

/// An issue (or pull request seen through the issues API).
pub type Issue = Completable<IssueData>;

/// Field table of an [`Issue`].
#[derive(Debug, Default)]
pub struct IssueData {
    id: Attribute<u64>,
    number: Attribute<u64>,
    title: Attribute<String>,
    body: Attribute<Option<String>>,
    state: Attribute<String>,
    state_reason: Attribute<Option<String>>,
    locked: Attribute<bool>,
    user: Attribute<NamedUser>,
    assignees: Attribute<Vec<NamedUser>>,
    labels: Attribute<Vec<Label>>,
    closed_by: Attribute<Option<NamedUser>>,
    issue_type: Attribute<Option<IssueType>>,
    sub_issues_summary: Attribute<Option<SubIssuesSummary>>,
    issue_dependencies_summary: Attribute<Option<IssueDependenciesSummary>>,
    comments: Attribute<u64>,
    created_at: Attribute<DateTime<Utc>>,
    updated_at: Attribute<DateTime<Utc>>,
    closed_at: Attribute<Option<DateTime<Utc>>>,
    html_url: Attribute<String>,
    repository_url: Attribute<String>,
    url: Attribute<String>,
}

/// Issue state filter and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
    All,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::All => "all",
        }
    }
}

/// Fields to change with [`Issue::edit`]. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueEditParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

impl IssueEditParams {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.state.is_none()
            && self.labels.is_none()
            && self.assignees.is_none()
    }
}

// =============================================================================
// MAPPING
// =============================================================================

impl Resource for IssueData {
    const NAME: &'static str = "Issue";

    fn use_attributes(&mut self, ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.id.assign(attributes, "id");
        self.number.assign(attributes, "number");
        self.title.assign(attributes, "title");
        self.body.assign(attributes, "body");
        self.state.assign(attributes, "state");
        self.state_reason.assign(attributes, "state_reason");
        self.locked.assign(attributes, "locked");
        self.user
            .assign_with(attributes, "user", |v| NamedUser::embedded(ctx, v));
        self.assignees
            .assign_with(attributes, "assignees", |v| NamedUser::embedded_list(ctx, v));
        self.labels
            .assign_with(attributes, "labels", |v| Label::embedded_list(ctx, v));
        self.closed_by
            .assign_with(attributes, "closed_by", |v| NamedUser::embedded_opt(ctx, v));
        self.issue_type
            .assign_with(attributes, "type", |v| IssueType::embedded_opt(ctx, v));
        self.sub_issues_summary
            .assign_with(attributes, "sub_issues_summary", |v| Object::embedded_opt(ctx, v));
        self.issue_dependencies_summary
            .assign_with(attributes, "issue_dependencies_summary", |v| {
                Object::embedded_opt(ctx, v)
            });
        self.comments.assign(attributes, "comments");
        self.created_at.assign(attributes, "created_at");
        self.updated_at.assign(attributes, "updated_at");
        self.closed_at.assign(attributes, "closed_at");
        self.html_url.assign(attributes, "html_url");
        self.repository_url.assign(attributes, "repository_url");
        self.url.assign(attributes, "url");
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("number", repr_value(&self.number)),
            ("title", repr_value(&self.title)),
        ]
    }
}

impl CompletableResource for IssueData {
    fn url(&self) -> &Attribute<String> {
        &self.url
    }
}

// =============================================================================
// ACCESSORS
// =============================================================================

impl Issue {
    pub async fn id(&mut self) -> Result<u64> {
        self.attr("id", |d| &d.id).await.copied()
    }

    /// The issue number within its repository.
    pub async fn number(&mut self) -> Result<u64> {
        self.attr("number", |d| &d.number).await.copied()
    }

    pub async fn title(&mut self) -> Result<&str> {
        self.attr("title", |d| &d.title).await.map(String::as_str)
    }

    pub async fn body(&mut self) -> Result<Option<&str>> {
        self.attr("body", |d| &d.body).await.map(Option::as_deref)
    }

    /// `open` or `closed`.
    pub async fn state(&mut self) -> Result<&str> {
        self.attr("state", |d| &d.state).await.map(String::as_str)
    }

    pub async fn state_reason(&mut self) -> Result<Option<&str>> {
        self.attr("state_reason", |d| &d.state_reason)
            .await
            .map(Option::as_deref)
    }

    pub async fn locked(&mut self) -> Result<bool> {
        self.attr("locked", |d| &d.locked).await.copied()
    }

    /// The author of the issue.
    pub async fn user(&mut self) -> Result<&mut NamedUser> {
        self.attr_mut("user", |d| &mut d.user).await
    }

    pub async fn assignees(&mut self) -> Result<&mut [NamedUser]> {
        self.attr_mut("assignees", |d| &mut d.assignees)
            .await
            .map(Vec::as_mut_slice)
    }

    pub async fn labels(&mut self) -> Result<&mut [Label]> {
        self.attr_mut("labels", |d| &mut d.labels)
            .await
            .map(Vec::as_mut_slice)
    }

    pub async fn closed_by(&mut self) -> Result<Option<&mut NamedUser>> {
        self.attr_mut("closed_by", |d| &mut d.closed_by)
            .await
            .map(Option::as_mut)
    }

    /// The issue type, for repositories whose organization defines them.
    pub async fn issue_type(&mut self) -> Result<Option<&mut IssueType>> {
        self.attr_mut("type", |d| &mut d.issue_type)
            .await
            .map(Option::as_mut)
    }

    pub async fn sub_issues_summary(&mut self) -> Result<Option<&SubIssuesSummary>> {
        self.attr("sub_issues_summary", |d| &d.sub_issues_summary)
            .await
            .map(Option::as_ref)
    }

    pub async fn issue_dependencies_summary(
        &mut self,
    ) -> Result<Option<&IssueDependenciesSummary>> {
        self.attr("issue_dependencies_summary", |d| &d.issue_dependencies_summary)
            .await
            .map(Option::as_ref)
    }

    /// Number of comments.
    pub async fn comments(&mut self) -> Result<u64> {
        self.attr("comments", |d| &d.comments).await.copied()
    }

    pub async fn created_at(&mut self) -> Result<DateTime<Utc>> {
        self.attr("created_at", |d| &d.created_at).await.copied()
    }

    pub async fn updated_at(&mut self) -> Result<DateTime<Utc>> {
        self.attr("updated_at", |d| &d.updated_at).await.copied()
    }

    pub async fn closed_at(&mut self) -> Result<Option<DateTime<Utc>>> {
        self.attr("closed_at", |d| &d.closed_at).await.copied()
    }

    pub async fn html_url(&mut self) -> Result<&str> {
        self.attr("html_url", |d| &d.html_url).await.map(String::as_str)
    }

    pub async fn repository_url(&mut self) -> Result<&str> {
        self.attr("repository_url", |d| &d.repository_url)
            .await
            .map(String::as_str)
    }

    // -------------------------------------------------------------------------
    // Related objects
    // -------------------------------------------------------------------------

    /// A comment of the repository this issue belongs to.
    ///
    /// Comment URLs are shared by all issues of a repository
    /// (`.../issues/comments/{id}`), so the comment need not belong to this
    /// issue. Follows the laziness rules of [`Completable`]: eager unless the
    /// effective preference is `Present(true)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue has no URL, or if the comment is fetched
    /// eagerly and the request fails.
    pub async fn get_comment(&self, id: u64, lazy: Opt<bool>) -> Result<IssueComment> {
        let url = format!("{}/comments/{id}", parent_url(self.url()?));
        IssueComment::spawn(
            self.requester(),
            self.lazy_preference(),
            lazy,
            seed(json!({ "id": id, "url": url })),
        )
        .await
    }

    /// All comments on this issue. Performs no I/O until a page is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue has no URL.
    pub fn get_comments(&self) -> Result<PaginatedList<IssueComment>> {
        let url = format!("{}/comments", self.url()?);
        Ok(PaginatedList::new(
            self.requester().clone(),
            url,
            self.lazy_preference(),
        ))
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Update the issue.
    ///
    /// The response is applied to this object; the completion state is left
    /// as it was.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidArgument`] if `params` is empty, or an
    /// error if the request fails.
    #[tracing::instrument(skip(self), fields(url = ?self.url().ok()))]
    pub async fn edit(&mut self, params: &IssueEditParams) -> Result<()> {
        if params.is_empty() {
            return Err(GithubError::InvalidArgument(
                "at least one issue field must be set".to_string(),
            ));
        }
        let url = self.url()?.to_string();
        let input = serde_json::to_value(params)?;
        let (headers, response) = self
            .requester()
            .request_json(Method::PATCH, &url, Some(&input))
            .await?;
        let attributes = into_attributes(response)?;
        self.store_headers(headers);
        self.apply_attributes(&attributes);
        Ok(())
    }

    /// Add a comment to the issue. The returned comment is complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self, body), fields(url = ?self.url().ok()))]
    pub async fn create_comment(&self, body: &str) -> Result<IssueComment> {
        let url = format!("{}/comments", self.url()?);
        let input = json!({ "body": body });
        let (headers, response) = self
            .requester()
            .request_json(Method::POST, &url, Some(&input))
            .await?;
        let attributes = into_attributes(response)?;
        Ok(IssueComment::from_full(
            self.requester().clone(),
            headers,
            &attributes,
            self.lazy_preference(),
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================
