//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the ghapi binary.

use clap::{Parser, Subcommand, ValueEnum};

use crate::IssueState;

/// GitHub API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "ghapi", about = "GitHub API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Build objects lazily: only fetch what is actually displayed.
    #[arg(long, global = true, env = "GITHUB_LAZY")]
    pub lazy: bool,

    /// Log requests and completion decisions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// `owner/name` of the repository, or the login of a user.
        target: String,

        /// Issue number, comment ID or label name (within the repository).
        id: Option<String>,
    },

    /// List the entities of a repository, with pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// `owner/name` of the repository.
        repo: String,

        /// Issue number (required for comments).
        number: Option<u64>,

        /// Only issues in this state.
        #[arg(long, value_enum)]
        state: Option<StateFilter>,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Search GitHub.
    Search {
        /// What to search for.
        entity: SearchEntity,

        /// The search query.
        query: String,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        per_page: Option<u32>,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A repository.
    #[value(alias = "repos", alias = "repository")]
    Repo,
    /// An issue of a repository.
    #[value(alias = "issues")]
    Issue,
    /// An issue comment.
    #[value(alias = "comments")]
    Comment,
    /// A user.
    #[value(alias = "users")]
    User,
    /// A repository label.
    #[value(alias = "labels")]
    Label,
}

/// Entity types that can be searched.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEntity {
    #[value(alias = "topic")]
    Topics,
}

/// Issue state filter.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateFilter {
    Open,
    Closed,
    All,
}

impl From<StateFilter> for IssueState {
    fn from(filter: StateFilter) -> Self {
        match filter {
            StateFilter::Open => IssueState::Open,
            StateFilter::Closed => IssueState::Closed,
            StateFilter::All => IssueState::All,
        }
    }
}
