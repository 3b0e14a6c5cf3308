//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{DateTime, TimeZone, Utc};

use super::state::{
    MockComment, MockCommit, MockIssue, MockLabel, MockRepo, MockState, MockTopic, MockUser,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The repository of the default scenario.
pub const DEFAULT_REPO: &str = "PyGithub/PyGithub";

/// An issue of [`DEFAULT_REPO`] in the default scenario.
pub const DEFAULT_ISSUE: u64 = 1234;

/// A comment on [`DEFAULT_ISSUE`], written by `stale[bot]`.
pub const DEFAULT_COMMENT: u64 = 560_146_023;

fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

impl Fixtures {
    // =========================================================================
    // Users
    // =========================================================================

    pub fn user(login: &str, id: u64, name: Option<&str>) -> MockUser {
        MockUser {
            login: login.to_string(),
            id,
            name: name.map(str::to_string),
            user_type: "User".to_string(),
            followers: 0,
            created_at: timestamp(2011, 1, 25),
        }
    }

    pub fn bot(login: &str, id: u64) -> MockUser {
        MockUser {
            user_type: "Bot".to_string(),
            ..Self::user(login, id, None)
        }
    }

    // =========================================================================
    // Repository content
    // =========================================================================

    /// A repository. `full_name` must be `owner/name`.
    pub fn repo(full_name: &str, description: Option<&str>) -> MockRepo {
        let (owner, name) = full_name.split_once('/').unwrap_or((full_name, full_name));
        MockRepo {
            owner: owner.to_string(),
            name: name.to_string(),
            id: 3_544_490,
            description: description.map(str::to_string),
            language: Some("Python".to_string()),
            default_branch: "main".to_string(),
            topics: vec!["github".to_string(), "python".to_string()],
            stargazers_count: 7000,
            created_at: timestamp(2012, 2, 25),
        }
    }

    pub fn issue(repo: &str, number: u64, title: &str, user: &str, labels: &[&str]) -> MockIssue {
        MockIssue {
            repo: repo.to_string(),
            number,
            title: title.to_string(),
            body: None,
            state: "open".to_string(),
            user: user.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            created_at: timestamp(2019, 10, 1),
            updated_at: timestamp(2019, 11, 17),
        }
    }

    pub fn comment(repo: &str, issue_number: u64, id: u64, body: &str, user: &str) -> MockComment {
        MockComment {
            repo: repo.to_string(),
            issue_number,
            id,
            body: body.to_string(),
            user: user.to_string(),
            created_at: timestamp(2019, 11, 17),
            updated_at: timestamp(2019, 11, 17),
        }
    }

    pub fn label(repo: &str, name: &str, color: &str) -> MockLabel {
        MockLabel {
            repo: repo.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            description: None,
        }
    }

    pub fn commit(repo: &str, sha: &str, message: &str, author: Option<&str>) -> MockCommit {
        MockCommit {
            repo: repo.to_string(),
            sha: sha.to_string(),
            message: message.to_string(),
            author: author.map(str::to_string),
            parents: Vec::new(),
            additions: 10,
            deletions: 2,
        }
    }

    pub fn topic(name: &str, display_name: &str, featured: bool) -> MockTopic {
        MockTopic {
            name: name.to_string(),
            display_name: Some(display_name.to_string()),
            short_description: None,
            featured,
            curated: featured,
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// A repository with a few issues, comments, labels and a commit.
    pub fn default_scenario() -> MockState {
        let mut state = MockState::new()
            .with_user(Self::user("jacquev6", 327_146, Some("Vincent Jacques")))
            .with_user(Self::user("octocat", 583_231, Some("The Octocat")))
            .with_user(Self::bot("stale[bot]", 26_384_082))
            .with_repo(Self::repo(DEFAULT_REPO, Some("Typed interactions with the GitHub API v3")))
            .with_label(Self::label(DEFAULT_REPO, "bug", "d73a4a"))
            .with_label(Self::label(DEFAULT_REPO, "stale", "ededed"))
            .with_label(Self::label(DEFAULT_REPO, "good first issue", "7057ff"))
            .with_issue(Self::issue(
                DEFAULT_REPO,
                DEFAULT_ISSUE,
                "Lazy loading of attributes",
                "octocat",
                &["bug", "stale"],
            ))
            .with_issue(Self::issue(DEFAULT_REPO, 1235, "Add type hints", "jacquev6", &[]))
            .with_comment(Self::comment(
                DEFAULT_REPO,
                DEFAULT_ISSUE,
                DEFAULT_COMMENT,
                "This issue has been automatically marked as stale.",
                "stale[bot]",
            ))
            .with_commit(Self::commit(
                DEFAULT_REPO,
                "1f3d2b9c0a8e7d6f5a4b3c2d1e0f9a8b7c6d5e4f",
                "Fix lazy completion",
                Some("jacquev6"),
            ))
            .with_topic(Self::topic("python", "Python", true))
            .with_topic(Self::topic("pygithub", "PyGithub", false));

        if let Some(issue) = state
            .issues
            .get_mut(&(DEFAULT_REPO.to_string(), 1235))
        {
            issue.state = "closed".to_string();
        }
        state
    }
}
