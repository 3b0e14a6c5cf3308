//! Repository commits.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::models::NamedUser;
use crate::object::Completable;
use crate::traits::{repr_value, CompletableResource, Context, Resource};

/// A commit of a repository.
///
/// `author` and `committer` are the GitHub accounts matched to the commit,
/// and are absent when the commit email is not linked to an account.
pub type Commit = Completable<CommitData>;

/// Line counts of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

/// Field table of a [`Commit`].
#[derive(Debug, Default)]
pub struct CommitData {
    sha: Attribute<String>,
    message: Attribute<String>,
    html_url: Attribute<String>,
    author: Attribute<Option<NamedUser>>,
    committer: Attribute<Option<NamedUser>>,
    parents: Attribute<Vec<String>>,
    stats: Attribute<CommitStats>,
    url: Attribute<String>,
}

/// Parent SHAs from `[{"sha": ..., "url": ...}, ...]`.
fn parent_shas(value: &Value) -> Attribute<Vec<String>> {
    let shas = value.as_array().map(|parents| {
        parents
            .iter()
            .map(|p| p.get("sha").and_then(Value::as_str).map(str::to_owned))
            .collect::<Option<Vec<_>>>()
    });
    match shas {
        Some(Some(shas)) => Attribute::Value(shas),
        _ => Attribute::Bad {
            value: value.clone(),
            expected: "list of commit references",
        },
    }
}

impl Resource for CommitData {
    const NAME: &'static str = "Commit";

    fn use_attributes(&mut self, ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.sha.assign(attributes, "sha");
        self.html_url.assign(attributes, "html_url");
        self.author
            .assign_with(attributes, "author", |v| NamedUser::embedded_opt(ctx, v));
        self.committer
            .assign_with(attributes, "committer", |v| NamedUser::embedded_opt(ctx, v));
        self.parents.assign_with(attributes, "parents", parent_shas);
        self.stats.assign(attributes, "stats");
        self.url.assign(attributes, "url");
        if let Some(Value::Object(git_commit)) = attributes.get("commit") {
            self.message.assign(git_commit, "message");
        }
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        vec![("sha", repr_value(&self.sha))]
    }
}

impl CompletableResource for CommitData {
    fn url(&self) -> &Attribute<String> {
        &self.url
    }
}

impl Commit {
    pub async fn sha(&mut self) -> Result<&str> {
        self.attr("sha", |d| &d.sha).await.map(String::as_str)
    }

    /// The full commit message.
    pub async fn message(&mut self) -> Result<&str> {
        self.attr("message", |d| &d.message).await.map(String::as_str)
    }

    pub async fn html_url(&mut self) -> Result<&str> {
        self.attr("html_url", |d| &d.html_url).await.map(String::as_str)
    }

    pub async fn author(&mut self) -> Result<Option<&mut NamedUser>> {
        self.attr_mut("author", |d| &mut d.author)
            .await
            .map(Option::as_mut)
    }

    pub async fn committer(&mut self) -> Result<Option<&mut NamedUser>> {
        self.attr_mut("committer", |d| &mut d.committer)
            .await
            .map(Option::as_mut)
    }

    /// SHAs of the parent commits.
    pub async fn parents(&mut self) -> Result<&[String]> {
        self.attr("parents", |d| &d.parents).await.map(Vec::as_slice)
    }

    /// Only present on the single-commit endpoint.
    pub async fn stats(&mut self) -> Result<CommitStats> {
        self.attr("stats", |d| &d.stats).await.copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::seed;
    use crate::object::tests_support::FakeRequester;
    use crate::opt::Opt;
    use crate::traits::Requester;
    use serde_json::json;
    use std::sync::Arc;

    const COMMIT_URL: &str = "https://api.test/repos/octocat/hello-world/commits/7fd1a60";

    #[tokio::test]
    async fn test_nested_message_and_unlinked_author() {
        let fake = Arc::new(FakeRequester::new());
        fake.serve(
            COMMIT_URL,
            json!({
                "sha": "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d",
                "url": COMMIT_URL,
                "html_url": "https://github.com/octocat/hello-world/commit/7fd1a60",
                "commit": {"message": "Merge pull request #6"},
                "author": null,
                "committer": {"login": "web-flow", "id": 19864447},
                "parents": [{"sha": "553c2077"}, {"sha": "762941318"}],
                "stats": {"additions": 104, "deletions": 4, "total": 108}
            }),
        );
        let requester: Arc<dyn Requester> = fake.clone();
        let mut commit = Commit::seeded(
            requester,
            &seed(json!({"sha": "7fd1a60", "url": COMMIT_URL})),
            Opt::Unset,
        );

        assert_eq!(commit.repr(), "Commit(sha=\"7fd1a60\")");
        assert_eq!(commit.message().await.unwrap(), "Merge pull request #6");
        assert!(commit.author().await.unwrap().is_none());
        let committer = commit.committer().await.unwrap().unwrap();
        assert_eq!(committer.login().await.unwrap(), "web-flow");
        assert_eq!(commit.parents().await.unwrap(), ["553c2077", "762941318"]);
        assert_eq!(commit.stats().await.unwrap().total, 108);
        assert_eq!(fake.call_count(), 1);
    }

    #[test]
    fn test_malformed_parents_are_bad() {
        assert!(matches!(
            parent_shas(&json!([{"url": "x"}])),
            Attribute::Bad { .. }
        ));
    }
}
