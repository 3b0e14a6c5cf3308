//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.
//!
//! Rendering reads attributes through the regular accessors, so rendering an
//! incomplete object completes it if a displayed field is missing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::{Issue, IssueComment, Label, NamedUser, Repository};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
#[async_trait]
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    async fn pretty_print(&mut self) -> Result<String>;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[async_trait]
impl PrettyPrint for Repository {
    async fn pretty_print(&mut self) -> Result<String> {
        let mut lines = header(format!("Repository: {}", self.full_name().await?));

        if let Some(description) = self.description().await? {
            lines.push(format!("Description:    {description}"));
        }
        if let Some(language) = self.language().await? {
            lines.push(format!("Language:       {language}"));
        }
        lines.push(format!("Default Branch: {}", self.default_branch().await?));
        lines.push(format!("Stars:          {}", self.stargazers_count().await?));
        lines.push(format!("Open Issues:    {}", self.open_issues_count().await?));

        let topics = self.topics().await?;
        if !topics.is_empty() {
            lines.push(format!("Topics:         {}", topics.join(", ")));
        }

        lines.push(format!("Created:        {}", timestamp(self.created_at().await?)));
        Ok(lines.join("\n"))
    }
}

#[async_trait]
impl PrettyPrint for Issue {
    async fn pretty_print(&mut self) -> Result<String> {
        let number = self.number().await?;
        let mut lines = header(format!("Issue #{number}: {}", self.title().await?));

        lines.push(format!("State:          {}", self.state().await?));
        lines.push(format!("Author:         {}", self.user().await?.login().await?));

        let mut names = Vec::new();
        for label in self.labels().await?.iter_mut() {
            names.push(label.name().await?.to_string());
        }
        if !names.is_empty() {
            lines.push(format!("Labels:         {}", names.join(", ")));
        }

        lines.push(format!("Comments:       {}", self.comments().await?));
        lines.push(format!("Created:        {}", timestamp(self.created_at().await?)));

        if let Some(body) = self.body().await? {
            lines.push(String::new());
            lines.push(body.to_string());
        }
        Ok(lines.join("\n"))
    }
}

#[async_trait]
impl PrettyPrint for IssueComment {
    async fn pretty_print(&mut self) -> Result<String> {
        let mut lines = header(format!("Comment {}", self.id().await?));

        lines.push(format!("Author:         {}", self.user().await?.login().await?));
        lines.push(format!("Created:        {}", timestamp(self.created_at().await?)));
        lines.push(String::new());
        lines.push(self.body().await?.to_string());
        Ok(lines.join("\n"))
    }
}

#[async_trait]
impl PrettyPrint for NamedUser {
    async fn pretty_print(&mut self) -> Result<String> {
        let mut lines = header(format!("User: {}", self.login().await?));

        if let Some(name) = self.name().await? {
            lines.push(format!("Name:           {name}"));
        }
        lines.push(format!("Type:           {}", self.user_type().await?));
        lines.push(format!("Followers:      {}", self.followers().await?));
        lines.push(format!("Created:        {}", timestamp(self.created_at().await?)));
        Ok(lines.join("\n"))
    }
}

#[async_trait]
impl PrettyPrint for Label {
    async fn pretty_print(&mut self) -> Result<String> {
        let mut lines = header(format!("Label: {}", self.name().await?));

        lines.push(format!("Color:          #{}", self.color().await?));
        if let Some(description) = self.description().await? {
            lines.push(format!("Description:    {description}"));
        }
        Ok(lines.join("\n"))
    }
}
