//! CLI argument parsing tests.

use clap::Parser;
use ghapi::cli::{Cli, Command, Entity, SearchEntity, StateFilter};
use ghapi::IssueState;

#[test]
fn test_cli_parses_get_repo() {
    let cli = Cli::parse_from(["ghapi", "get", "repo", "PyGithub/PyGithub"]);

    assert!(!cli.json);
    assert!(!cli.verbose);
    match cli.command {
        Command::Get { entity, target, id } => {
            assert_eq!(entity, Entity::Repo);
            assert_eq!(target, "PyGithub/PyGithub");
            assert_eq!(id, None);
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_get_comment_with_id() {
    let cli = Cli::parse_from([
        "ghapi",
        "get",
        "comment",
        "PyGithub/PyGithub",
        "560146023",
        "--lazy",
    ]);

    assert!(cli.lazy);
    match cli.command {
        Command::Get { entity, target, id } => {
            assert_eq!(entity, Entity::Comment);
            assert_eq!(target, "PyGithub/PyGithub");
            assert_eq!(id.as_deref(), Some("560146023"));
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_issues_with_filters() {
    let cli = Cli::parse_from([
        "ghapi",
        "list",
        "issues",
        "PyGithub/PyGithub",
        "--state",
        "closed",
        "--page",
        "2",
        "--per-page",
        "50",
    ]);

    match cli.command {
        Command::List {
            entity,
            repo,
            number,
            state,
            page,
            per_page,
        } => {
            assert_eq!(entity, Entity::Issue);
            assert_eq!(repo, "PyGithub/PyGithub");
            assert_eq!(number, None);
            assert_eq!(state, Some(StateFilter::Closed));
            assert_eq!(page, Some(2));
            assert_eq!(per_page, Some(50));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_comments_of_issue() {
    let cli = Cli::parse_from(["ghapi", "list", "comments", "PyGithub/PyGithub", "1234"]);

    match cli.command {
        Command::List { entity, number, .. } => {
            assert_eq!(entity, Entity::Comment);
            assert_eq!(number, Some(1234));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_search_topics() {
    let cli = Cli::parse_from(["ghapi", "--json", "search", "topics", "python"]);

    assert!(cli.json);
    match cli.command {
        Command::Search { entity, query, .. } => {
            assert_eq!(entity, SearchEntity::Topics);
            assert_eq!(query, "python");
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["ghapi", "get", "user", "octocat", "--json", "-v"]);

    assert!(cli.json);
    assert!(cli.verbose);
}

#[test]
fn test_cli_entity_aliases() {
    for (alias, expected) in [
        ("repos", Entity::Repo),
        ("repository", Entity::Repo),
        ("users", Entity::User),
        ("labels", Entity::Label),
    ] {
        let cli = Cli::parse_from(["ghapi", "get", alias, "x"]);
        match cli.command {
            Command::Get { entity, .. } => assert_eq!(entity, expected, "alias {alias}"),
            _ => panic!("Expected Get command"),
        }
    }
}

#[test]
fn test_cli_rejects_unknown_entity() {
    let result = Cli::try_parse_from(["ghapi", "get", "project", "x"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_non_numeric_issue_number() {
    let result = Cli::try_parse_from(["ghapi", "list", "comments", "o/r", "abc"]);
    assert!(result.is_err());
}

#[test]
fn test_state_filter_converts_to_issue_state() {
    assert_eq!(IssueState::from(StateFilter::Open), IssueState::Open);
    assert_eq!(IssueState::from(StateFilter::All), IssueState::All);
}
