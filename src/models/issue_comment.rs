//! Comments on issues and pull requests.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::{json, Map, Value};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::models::NamedUser;
use crate::object::{into_attributes, Completable};
use crate::traits::{repr_value, CompletableResource, Context, Resource};

/// A comment on an issue.
pub type IssueComment = Completable<IssueCommentData>;

/// Field table of an [`IssueComment`].
#[derive(Debug, Default)]
pub struct IssueCommentData {
    id: Attribute<u64>,
    node_id: Attribute<String>,
    body: Attribute<String>,
    user: Attribute<NamedUser>,
    author_association: Attribute<String>,
    created_at: Attribute<DateTime<Utc>>,
    updated_at: Attribute<DateTime<Utc>>,
    html_url: Attribute<String>,
    issue_url: Attribute<String>,
    url: Attribute<String>,
}

impl Resource for IssueCommentData {
    const NAME: &'static str = "IssueComment";

    fn use_attributes(&mut self, ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.id.assign(attributes, "id");
        self.node_id.assign(attributes, "node_id");
        self.body.assign(attributes, "body");
        self.user
            .assign_with(attributes, "user", |v| NamedUser::embedded(ctx, v));
        self.author_association
            .assign(attributes, "author_association");
        self.created_at.assign(attributes, "created_at");
        self.updated_at.assign(attributes, "updated_at");
        self.html_url.assign(attributes, "html_url");
        self.issue_url.assign(attributes, "issue_url");
        self.url.assign(attributes, "url");
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        let user = self
            .user
            .as_value()
            .and_then(NamedUser::peek_login)
            .map_or(Value::Null, Value::from);
        vec![("id", repr_value(&self.id)), ("user", user)]
    }
}

impl CompletableResource for IssueCommentData {
    fn url(&self) -> &Attribute<String> {
        &self.url
    }
}

impl IssueComment {
    pub async fn id(&mut self) -> Result<u64> {
        self.attr("id", |d| &d.id).await.copied()
    }

    pub async fn node_id(&mut self) -> Result<&str> {
        self.attr("node_id", |d| &d.node_id).await.map(String::as_str)
    }

    pub async fn body(&mut self) -> Result<&str> {
        self.attr("body", |d| &d.body).await.map(String::as_str)
    }

    /// The author of the comment.
    pub async fn user(&mut self) -> Result<&mut NamedUser> {
        self.attr_mut("user", |d| &mut d.user).await
    }

    /// `OWNER`, `MEMBER`, `CONTRIBUTOR`, `NONE`, ...
    pub async fn author_association(&mut self) -> Result<&str> {
        self.attr("author_association", |d| &d.author_association)
            .await
            .map(String::as_str)
    }

    pub async fn created_at(&mut self) -> Result<DateTime<Utc>> {
        self.attr("created_at", |d| &d.created_at).await.copied()
    }

    pub async fn updated_at(&mut self) -> Result<DateTime<Utc>> {
        self.attr("updated_at", |d| &d.updated_at).await.copied()
    }

    pub async fn html_url(&mut self) -> Result<&str> {
        self.attr("html_url", |d| &d.html_url).await.map(String::as_str)
    }

    pub async fn issue_url(&mut self) -> Result<&str> {
        self.attr("issue_url", |d| &d.issue_url).await.map(String::as_str)
    }

    /// Replace the comment body.
    ///
    /// The response is applied to this object; the completion state is left
    /// as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self, body), fields(url = ?self.url().ok()))]
    pub async fn edit(&mut self, body: &str) -> Result<()> {
        let url = self.url()?.to_string();
        let input = json!({ "body": body });
        let (headers, response) = self
            .requester()
            .request_json(Method::PATCH, &url, Some(&input))
            .await?;
        let attributes = into_attributes(response)?;
        self.store_headers(headers);
        self.apply_attributes(&attributes);
        Ok(())
    }

    /// Delete the comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self), fields(url = ?self.url().ok()))]
    pub async fn delete(&self) -> Result<()> {
        let url = self.url()?;
        self.requester()
            .request_json(Method::DELETE, url, None)
            .await?;
        Ok(())
    }
}
