//! Mock server state management.
//!
//! Provides the in-memory data store for the mock GitHub API server, and
//! renders stored records as GitHub-shaped JSON.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::sync::RwLock;

/// State shared between handlers.
pub type SharedState = Arc<RwLock<MockState>>;

/// A user account.
#[derive(Debug, Clone)]
pub struct MockUser {
    pub login: String,
    pub id: u64,
    pub name: Option<String>,
    pub user_type: String,
    pub followers: u64,
    pub created_at: DateTime<Utc>,
}

/// A repository, keyed by `owner/name`.
#[derive(Debug, Clone)]
pub struct MockRepo {
    pub owner: String,
    pub name: String,
    pub id: u64,
    pub description: Option<String>,
    pub language: Option<String>,
    pub default_branch: String,
    pub topics: Vec<String>,
    pub stargazers_count: u64,
    pub created_at: DateTime<Utc>,
}

impl MockRepo {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// An issue of the repository `repo`.
#[derive(Debug, Clone)]
pub struct MockIssue {
    pub repo: String,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
    pub user: String,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment on issue `issue_number` of `repo`.
#[derive(Debug, Clone)]
pub struct MockComment {
    pub repo: String,
    pub issue_number: u64,
    pub id: u64,
    pub body: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MockLabel {
    pub repo: String,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MockCommit {
    pub repo: String,
    pub sha: String,
    pub message: String,
    pub author: Option<String>,
    pub parents: Vec<String>,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone)]
pub struct MockTopic {
    pub name: String,
    pub display_name: Option<String>,
    pub short_description: Option<String>,
    pub featured: bool,
    pub curated: bool,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Base URL the server listens on, used for the URLs in payloads.
    /// Set by the server when it starts.
    pub base_url: String,

    /// Users indexed by login.
    pub users: HashMap<String, MockUser>,

    /// Repositories indexed by full name.
    pub repos: HashMap<String, MockRepo>,

    /// Issues indexed by (full name, number).
    pub issues: BTreeMap<(String, u64), MockIssue>,

    /// Comments indexed by ID (comment IDs are global on GitHub).
    pub comments: BTreeMap<u64, MockComment>,

    /// Labels indexed by (full name, label name).
    pub labels: BTreeMap<(String, String), MockLabel>,

    /// Commits indexed by (full name, sha).
    pub commits: HashMap<(String, String), MockCommit>,

    pub topics: Vec<MockTopic>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Every request received, as `"METHOD path?query"`.
    pub requests: Vec<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    pub fn with_user(mut self, user: MockUser) -> Self {
        self.users.insert(user.login.clone(), user);
        self
    }

    pub fn with_repo(mut self, repo: MockRepo) -> Self {
        self.repos.insert(repo.full_name(), repo);
        self
    }

    pub fn with_issue(mut self, issue: MockIssue) -> Self {
        self.issues
            .insert((issue.repo.clone(), issue.number), issue);
        self
    }

    pub fn with_comment(mut self, comment: MockComment) -> Self {
        self.comments.insert(comment.id, comment);
        self
    }

    pub fn with_label(mut self, label: MockLabel) -> Self {
        self.labels
            .insert((label.repo.clone(), label.name.clone()), label);
        self
    }

    pub fn with_commit(mut self, commit: MockCommit) -> Self {
        self.commits
            .insert((commit.repo.clone(), commit.sha.clone()), commit);
        self
    }

    pub fn with_topic(mut self, topic: MockTopic) -> Self {
        self.topics.push(topic);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Create a comment with the next free ID.
    pub fn add_comment(&mut self, repo: &str, issue_number: u64, body: String, user: &str) -> u64 {
        let id = self.comments.keys().next_back().map_or(1, |last| last + 1);
        let now = Utc::now();
        self.comments.insert(
            id,
            MockComment {
                repo: repo.to_string(),
                issue_number,
                id,
                body,
                user: user.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The summary form of a user, as embedded in other payloads.
    pub fn user_summary_json(&self, login: &str) -> Value {
        let id = self.users.get(login).map_or(0, |u| u.id);
        let user_type = self
            .users
            .get(login)
            .map_or("User", |u| u.user_type.as_str());
        json!({
            "login": login,
            "id": id,
            "type": user_type,
            "site_admin": false,
            "html_url": format!("https://github.com/{login}"),
            "url": format!("{}/users/{login}", self.base_url),
        })
    }

    pub fn user_json(&self, login: &str) -> Option<Value> {
        let user = self.users.get(login)?;
        let mut value = self.user_summary_json(login);
        if let Value::Object(map) = &mut value {
            map.insert("name".into(), json!(user.name));
            map.insert("followers".into(), json!(user.followers));
            map.insert("created_at".into(), json!(user.created_at));
        }
        Some(value)
    }

    pub fn repo_json(&self, full_name: &str) -> Option<Value> {
        let repo = self.repos.get(full_name)?;
        let open_issues = self
            .issues
            .values()
            .filter(|i| i.repo == full_name && i.state == "open")
            .count();
        Some(json!({
            "id": repo.id,
            "name": repo.name,
            "full_name": full_name,
            "owner": self.user_summary_json(&repo.owner),
            "description": repo.description,
            "private": false,
            "fork": false,
            "archived": false,
            "html_url": format!("https://github.com/{full_name}"),
            "homepage": null,
            "language": repo.language,
            "default_branch": repo.default_branch,
            "topics": repo.topics,
            "stargazers_count": repo.stargazers_count,
            "forks_count": 0,
            "open_issues_count": open_issues,
            "created_at": repo.created_at,
            "updated_at": repo.created_at,
            "pushed_at": null,
            "url": format!("{}/repos/{full_name}", self.base_url),
        }))
    }

    pub fn label_json(&self, label: &MockLabel) -> Value {
        json!({
            "name": label.name,
            "color": label.color,
            "description": label.description,
            "default": false,
            "url": format!(
                "{}/repos/{}/labels/{}",
                self.base_url,
                label.repo,
                urlencoding::encode(&label.name)
            ),
        })
    }

    pub fn issue_json(&self, issue: &MockIssue) -> Value {
        let repo_url = format!("{}/repos/{}", self.base_url, issue.repo);
        let labels: Vec<Value> = issue
            .labels
            .iter()
            .filter_map(|name| self.labels.get(&(issue.repo.clone(), name.clone())))
            .map(|label| self.label_json(label))
            .collect();
        let comments = self
            .comments
            .values()
            .filter(|c| c.repo == issue.repo && c.issue_number == issue.number)
            .count();
        json!({
            "id": issue.number * 1000,
            "number": issue.number,
            "title": issue.title,
            "body": issue.body,
            "state": issue.state,
            "state_reason": null,
            "locked": false,
            "user": self.user_summary_json(&issue.user),
            "assignees": [],
            "labels": labels,
            "closed_by": null,
            "comments": comments,
            "created_at": issue.created_at,
            "updated_at": issue.updated_at,
            "closed_at": null,
            "html_url": format!("https://github.com/{}/issues/{}", issue.repo, issue.number),
            "repository_url": repo_url,
            "url": format!("{repo_url}/issues/{}", issue.number),
        })
    }

    pub fn comment_json(&self, comment: &MockComment) -> Value {
        let repo_url = format!("{}/repos/{}", self.base_url, comment.repo);
        json!({
            "id": comment.id,
            "body": comment.body,
            "user": self.user_summary_json(&comment.user),
            "author_association": "NONE",
            "created_at": comment.created_at,
            "updated_at": comment.updated_at,
            "html_url": format!(
                "https://github.com/{}/issues/{}#issuecomment-{}",
                comment.repo, comment.issue_number, comment.id
            ),
            "issue_url": format!("{repo_url}/issues/{}", comment.issue_number),
            "url": format!("{repo_url}/issues/comments/{}", comment.id),
        })
    }

    pub fn commit_json(&self, commit: &MockCommit) -> Value {
        let repo_url = format!("{}/repos/{}", self.base_url, commit.repo);
        let parents: Vec<Value> = commit
            .parents
            .iter()
            .map(|sha| json!({"sha": sha, "url": format!("{repo_url}/commits/{sha}")}))
            .collect();
        json!({
            "sha": commit.sha,
            "commit": {"message": commit.message},
            "author": commit.author.as_deref().map(|login| self.user_summary_json(login)),
            "committer": null,
            "parents": parents,
            "stats": {
                "additions": commit.additions,
                "deletions": commit.deletions,
                "total": commit.additions + commit.deletions,
            },
            "html_url": format!("https://github.com/{}/commit/{}", commit.repo, commit.sha),
            "url": format!("{repo_url}/commits/{}", commit.sha),
        })
    }

    pub fn topic_json(topic: &MockTopic) -> Value {
        json!({
            "name": topic.name,
            "display_name": topic.display_name,
            "short_description": topic.short_description,
            "description": null,
            "created_by": null,
            "released": null,
            "created_at": "2016-11-28T22:03:59Z",
            "updated_at": "2016-11-28T22:03:59Z",
            "featured": topic.featured,
            "curated": topic.curated,
            "score": 1.0,
        })
    }
}
