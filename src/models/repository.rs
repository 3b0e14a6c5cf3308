//! Repository model.
//!
//! A repository is the usual entry point for walking the object graph:
//! issues, comments, labels and commits are all reached through it.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::attribute::Attribute;
use crate::error::{GithubError, Result};
use crate::models::{Commit, Issue, IssueComment, IssueState, Label, NamedUser};
use crate::object::{seed, Completable};
use crate::opt::Opt;
use crate::pagination::PaginatedList;
use crate::traits::{repr_value, CompletableResource, Context, Resource};

/// A GitHub repository.
pub type Repository = Completable<RepositoryData>;

/// Field table of a [`Repository`].
#[derive(Debug, Default)]
pub struct RepositoryData {
    id: Attribute<u64>,
    name: Attribute<String>,
    full_name: Attribute<String>,
    owner: Attribute<NamedUser>,
    description: Attribute<Option<String>>,
    private: Attribute<bool>,
    fork: Attribute<bool>,
    archived: Attribute<bool>,
    html_url: Attribute<String>,
    homepage: Attribute<Option<String>>,
    language: Attribute<Option<String>>,
    default_branch: Attribute<String>,
    topics: Attribute<Vec<String>>,
    stargazers_count: Attribute<u64>,
    forks_count: Attribute<u64>,
    open_issues_count: Attribute<u64>,
    created_at: Attribute<DateTime<Utc>>,
    updated_at: Attribute<DateTime<Utc>>,
    pushed_at: Attribute<Option<DateTime<Utc>>>,
    url: Attribute<String>,
}

impl Resource for RepositoryData {
    const NAME: &'static str = "Repository";

    fn use_attributes(&mut self, ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.id.assign(attributes, "id");
        self.name.assign(attributes, "name");
        self.full_name.assign(attributes, "full_name");
        self.owner
            .assign_with(attributes, "owner", |v| NamedUser::embedded(ctx, v));
        self.description.assign(attributes, "description");
        self.private.assign(attributes, "private");
        self.fork.assign(attributes, "fork");
        self.archived.assign(attributes, "archived");
        self.html_url.assign(attributes, "html_url");
        self.homepage.assign(attributes, "homepage");
        self.language.assign(attributes, "language");
        self.default_branch.assign(attributes, "default_branch");
        self.topics.assign(attributes, "topics");
        self.stargazers_count.assign(attributes, "stargazers_count");
        self.forks_count.assign(attributes, "forks_count");
        self.open_issues_count.assign(attributes, "open_issues_count");
        self.created_at.assign(attributes, "created_at");
        self.updated_at.assign(attributes, "updated_at");
        self.pushed_at.assign(attributes, "pushed_at");
        self.url.assign(attributes, "url");
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        vec![("full_name", repr_value(&self.full_name))]
    }
}

impl CompletableResource for RepositoryData {
    fn url(&self) -> &Attribute<String> {
        &self.url
    }
}

impl Repository {
    pub async fn id(&mut self) -> Result<u64> {
        self.attr("id", |d| &d.id).await.copied()
    }

    pub async fn name(&mut self) -> Result<&str> {
        self.attr("name", |d| &d.name).await.map(String::as_str)
    }

    /// `owner/name`.
    pub async fn full_name(&mut self) -> Result<&str> {
        self.attr("full_name", |d| &d.full_name)
            .await
            .map(String::as_str)
    }

    pub async fn owner(&mut self) -> Result<&mut NamedUser> {
        self.attr_mut("owner", |d| &mut d.owner).await
    }

    pub async fn description(&mut self) -> Result<Option<&str>> {
        self.attr("description", |d| &d.description)
            .await
            .map(Option::as_deref)
    }

    pub async fn private(&mut self) -> Result<bool> {
        self.attr("private", |d| &d.private).await.copied()
    }

    pub async fn fork(&mut self) -> Result<bool> {
        self.attr("fork", |d| &d.fork).await.copied()
    }

    pub async fn archived(&mut self) -> Result<bool> {
        self.attr("archived", |d| &d.archived).await.copied()
    }

    pub async fn html_url(&mut self) -> Result<&str> {
        self.attr("html_url", |d| &d.html_url).await.map(String::as_str)
    }

    pub async fn homepage(&mut self) -> Result<Option<&str>> {
        self.attr("homepage", |d| &d.homepage)
            .await
            .map(Option::as_deref)
    }

    /// Primary language as detected by GitHub.
    pub async fn language(&mut self) -> Result<Option<&str>> {
        self.attr("language", |d| &d.language)
            .await
            .map(Option::as_deref)
    }

    pub async fn default_branch(&mut self) -> Result<&str> {
        self.attr("default_branch", |d| &d.default_branch)
            .await
            .map(String::as_str)
    }

    pub async fn topics(&mut self) -> Result<&[String]> {
        self.attr("topics", |d| &d.topics).await.map(Vec::as_slice)
    }

    pub async fn stargazers_count(&mut self) -> Result<u64> {
        self.attr("stargazers_count", |d| &d.stargazers_count)
            .await
            .copied()
    }

    pub async fn forks_count(&mut self) -> Result<u64> {
        self.attr("forks_count", |d| &d.forks_count).await.copied()
    }

    /// Open issues and pull requests.
    pub async fn open_issues_count(&mut self) -> Result<u64> {
        self.attr("open_issues_count", |d| &d.open_issues_count)
            .await
            .copied()
    }

    pub async fn created_at(&mut self) -> Result<DateTime<Utc>> {
        self.attr("created_at", |d| &d.created_at).await.copied()
    }

    pub async fn updated_at(&mut self) -> Result<DateTime<Utc>> {
        self.attr("updated_at", |d| &d.updated_at).await.copied()
    }

    pub async fn pushed_at(&mut self) -> Result<Option<DateTime<Utc>>> {
        self.attr("pushed_at", |d| &d.pushed_at).await.copied()
    }

    /// Get an issue by number.
    ///
    /// With an effective preference of `Present(true)` (the `lazy` argument,
    /// or this repository's preference when `lazy` is unset) the issue is
    /// returned without any request and completes on first use. Otherwise it
    /// is fetched before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidArgument`] for issue number 0, or the
    /// request error of an eager fetch.
    pub async fn get_issue(&self, number: u64, lazy: Opt<bool>) -> Result<Issue> {
        if number == 0 {
            return Err(GithubError::InvalidArgument(
                "issue numbers start at 1".to_string(),
            ));
        }
        let url = format!("{}/issues/{number}", self.url()?);
        Issue::spawn(
            self.requester(),
            self.lazy_preference(),
            lazy,
            seed(json!({ "number": number, "url": url })),
        )
        .await
    }

    /// Get an issue comment by id.
    ///
    /// # Errors
    ///
    /// Returns the request error of an eager fetch.
    pub async fn get_comment(&self, id: u64, lazy: Opt<bool>) -> Result<IssueComment> {
        let url = format!("{}/issues/comments/{id}", self.url()?);
        IssueComment::spawn(
            self.requester(),
            self.lazy_preference(),
            lazy,
            seed(json!({ "id": id, "url": url })),
        )
        .await
    }

    /// Get a label by name.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidArgument`] for an empty name, or the
    /// request error of an eager fetch.
    pub async fn get_label(&self, name: &str, lazy: Opt<bool>) -> Result<Label> {
        if name.is_empty() {
            return Err(GithubError::InvalidArgument(
                "label name must not be empty".to_string(),
            ));
        }
        let url = format!("{}/labels/{}", self.url()?, urlencoding::encode(name));
        Label::spawn(
            self.requester(),
            self.lazy_preference(),
            lazy,
            seed(json!({ "name": name, "url": url })),
        )
        .await
    }

    /// Get a commit by SHA (or any ref GitHub resolves to a commit).
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidArgument`] for a ref with characters
    /// outside `[A-Za-z0-9._/-]` or an empty, `.` or `..` segment, or the
    /// request error of an eager fetch.
    pub async fn get_commit(&self, sha: &str, lazy: Opt<bool>) -> Result<Commit> {
        if !is_commit_ref(sha) {
            return Err(GithubError::InvalidArgument(format!(
                "invalid commit ref: {sha:?}"
            )));
        }
        let url = format!("{}/commits/{sha}", self.url()?);
        Commit::spawn(
            self.requester(),
            self.lazy_preference(),
            lazy,
            seed(json!({ "sha": sha, "url": url })),
        )
        .await
    }

    /// Issues of the repository, optionally filtered by state.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has no URL.
    pub fn get_issues(&self, state: Option<IssueState>) -> Result<PaginatedList<Issue>> {
        let url = format!("{}/issues", self.url()?);
        let list = PaginatedList::new(self.requester().clone(), url, self.lazy_preference());
        Ok(match state {
            Some(state) => list.with_param("state", state.as_str()),
            None => list,
        })
    }

    /// Labels defined on the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has no URL.
    pub fn get_labels(&self) -> Result<PaginatedList<Label>> {
        let url = format!("{}/labels", self.url()?);
        Ok(PaginatedList::new(
            self.requester().clone(),
            url,
            self.lazy_preference(),
        ))
    }
}

/// A SHA, branch or tag name usable as a path suffix. Branch names may
/// contain `/`, but no segment may be empty, `.` or `..`.
fn is_commit_ref(sha: &str) -> bool {
    !sha.is_empty()
        && sha
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/'))
        && sha
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::tests_support::FakeRequester;
    use crate::traits::Requester;
    use std::sync::Arc;

    const REPO_URL: &str = "https://api.test/repos/octocat/hello-world";

    fn repo(fake: &Arc<FakeRequester>, lazy: Opt<bool>) -> Repository {
        let requester: Arc<dyn Requester> = fake.clone();
        Repository::seeded(
            requester,
            &seed(json!({"full_name": "octocat/hello-world", "url": REPO_URL})),
            lazy,
        )
    }

    #[tokio::test]
    async fn test_child_urls() {
        let fake = Arc::new(FakeRequester::new());
        let repo = repo(&fake, Opt::present(true));

        let issue = repo.get_issue(1, Opt::Unset).await.unwrap();
        assert_eq!(issue.url().unwrap(), format!("{REPO_URL}/issues/1"));

        let comment = repo.get_comment(5, Opt::Unset).await.unwrap();
        assert_eq!(comment.url().unwrap(), format!("{REPO_URL}/issues/comments/5"));

        let label = repo.get_label("good first issue", Opt::Unset).await.unwrap();
        assert_eq!(
            label.url().unwrap(),
            format!("{REPO_URL}/labels/good%20first%20issue")
        );

        let commit = repo.get_commit("main", Opt::Unset).await.unwrap();
        assert_eq!(commit.url().unwrap(), format!("{REPO_URL}/commits/main"));

        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_arguments_fail_before_io() {
        let fake = Arc::new(FakeRequester::new());
        let repo = repo(&fake, Opt::Unset);

        assert!(matches!(
            repo.get_issue(0, Opt::Unset).await,
            Err(GithubError::InvalidArgument(_))
        ));
        assert!(matches!(
            repo.get_label("", Opt::Unset).await,
            Err(GithubError::InvalidArgument(_))
        ));
        assert!(matches!(
            repo.get_commit("not a sha", Opt::Unset).await,
            Err(GithubError::InvalidArgument(_))
        ));
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_commit_ref_cannot_escape_commits_path() {
        let fake = Arc::new(FakeRequester::new());
        let repo = repo(&fake, Opt::Unset);

        for bad in ["abc#x", "a?b", "../x", "feature//x", "main/.", "/main"] {
            assert!(
                matches!(
                    repo.get_commit(bad, Opt::present(true)).await,
                    Err(GithubError::InvalidArgument(_))
                ),
                "{bad} should be rejected"
            );
        }
        assert_eq!(fake.call_count(), 0);

        let commit = repo.get_commit("release/v1.2", Opt::present(true)).await.unwrap();
        assert_eq!(commit.url().unwrap(), format!("{REPO_URL}/commits/release/v1.2"));
    }

    #[tokio::test]
    async fn test_eager_child_is_fetched() {
        let fake = Arc::new(FakeRequester::new());
        fake.serve(
            &format!("{REPO_URL}/labels/bug"),
            json!({"name": "bug", "color": "d73a4a", "default": true, "url": format!("{REPO_URL}/labels/bug")}),
        );
        let repo = repo(&fake, Opt::Unset);

        let mut label = repo.get_label("bug", Opt::Unset).await.unwrap();
        assert!(label.is_completed());
        assert_eq!(label.lazy_preference(), Opt::Unset);
        assert_eq!(label.color().await.unwrap(), "d73a4a");
        assert!(label.default().await.unwrap());
        assert_eq!(fake.call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_issues_sends_state_filter() {
        let fake = Arc::new(FakeRequester::new());
        fake.serve(
            &format!("{REPO_URL}/issues?state=closed&per_page=30&page=1"),
            json!([{"number": 3, "title": "Old", "url": format!("{REPO_URL}/issues/3")}]),
        );
        let repo = repo(&fake, Opt::present(true));

        let page = repo
            .get_issues(Some(IssueState::Closed))
            .unwrap()
            .get_page(1)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].repr(), "Issue(number=3, title=\"Old\")");
        assert!(page.items[0].is_completed());
    }
}
