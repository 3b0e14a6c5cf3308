//! GitHub API CLI binary.
//!
//! A command-line interface for walking the GitHub API object graph.

use async_trait::async_trait;
use clap::Parser;
use ghapi::cli::{Cli, Command, Entity, SearchEntity};
use ghapi::output::PrettyPrint;
use ghapi::{
    FromListItem, Github, GithubError, Issue, IssueComment, Label, NamedUser, Opt, Page,
    PaginatedList, Repository, Topic,
};
use serde_json::{Map, Value};
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let github = match ghapi::GithubClient::from_env() {
        Ok(client) => Github::new(client),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Check the GITHUB_API_URL environment variable");
            return ExitCode::FAILURE;
        }
    };
    let github = if cli.lazy {
        github.with_lazy(true)
    } else {
        github
    };

    match run(&github, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, GithubError::RateLimited { .. }) {
                eprintln!("Hint: Set GITHUB_TOKEN for a higher rate limit");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(github: &Github, cli: Cli) -> ghapi::Result<()> {
    match cli.command {
        Command::Get { entity, target, id } => {
            handle_get(github, entity, &target, id.as_deref(), cli.json).await
        }
        Command::List {
            entity,
            repo,
            number,
            state,
            page,
            per_page,
        } => {
            let repo = github.get_repo(&repo, Opt::present(true)).await?;
            let page = page.unwrap_or(1);
            match entity {
                Entity::Issue => {
                    let list = repo.get_issues(state.map(Into::into))?;
                    let mut page = with_per_page(list, per_page).get_page(page).await?;
                    if cli.json {
                        return print_json(&mut page.items).await;
                    }
                    let mut rows = Vec::with_capacity(page.len());
                    for issue in &mut page.items {
                        rows.push(IssueRow::build(issue).await?);
                    }
                    print_table(rows, &page);
                }
                Entity::Comment => {
                    let number = number.ok_or_else(|| {
                        GithubError::InvalidArgument(
                            "an issue number is required to list comments".to_string(),
                        )
                    })?;
                    let issue = repo.get_issue(number, Opt::present(true)).await?;
                    let list = issue.get_comments()?;
                    let mut page = with_per_page(list, per_page).get_page(page).await?;
                    if cli.json {
                        return print_json(&mut page.items).await;
                    }
                    let mut rows = Vec::with_capacity(page.len());
                    for comment in &mut page.items {
                        rows.push(CommentRow::build(comment).await?);
                    }
                    print_table(rows, &page);
                }
                Entity::Label => {
                    let list = repo.get_labels()?;
                    let mut page = with_per_page(list, per_page).get_page(page).await?;
                    if cli.json {
                        return print_json(&mut page.items).await;
                    }
                    let mut rows = Vec::with_capacity(page.len());
                    for label in &mut page.items {
                        rows.push(LabelRow::build(label).await?);
                    }
                    print_table(rows, &page);
                }
                Entity::Repo | Entity::User => {
                    return Err(GithubError::InvalidArgument(
                        "only issues, comments and labels can be listed".to_string(),
                    ))
                }
            }
            Ok(())
        }
        Command::Search {
            entity: SearchEntity::Topics,
            query,
            page,
            per_page,
        } => {
            let list = with_per_page(github.search_topics(&query), per_page);
            let page = list.get_page(page.unwrap_or(1)).await?;
            output_topics(page, cli.json)
        }
    }
}

fn with_per_page<T: FromListItem>(
    list: PaginatedList<T>,
    per_page: Option<u32>,
) -> PaginatedList<T> {
    match per_page {
        Some(n) => list.with_per_page(n),
        None => list,
    }
}

fn required_id<T: std::str::FromStr>(entity: Entity, id: Option<&str>) -> ghapi::Result<T> {
    let id = id.ok_or_else(|| {
        GithubError::InvalidArgument(format!("{entity:?} requires an ID after the repository"))
    })?;
    id.parse()
        .map_err(|_| GithubError::InvalidArgument(format!("invalid {entity:?} ID: {id}")))
}

async fn handle_get(
    github: &Github,
    entity: Entity,
    target: &str,
    id: Option<&str>,
    json: bool,
) -> ghapi::Result<()> {
    // Intermediate objects are only needed for their URL.
    let lazy_parent = Opt::present(true);
    match entity {
        Entity::Repo => {
            let mut repo = github.get_repo(target, Opt::Unset).await?;
            output_single(&mut repo, json).await
        }
        Entity::User => {
            let mut user = github.get_user(target, Opt::Unset).await?;
            output_single(&mut user, json).await
        }
        Entity::Issue => {
            let number = required_id(entity, id)?;
            let repo = github.get_repo(target, lazy_parent).await?;
            let mut issue = repo.get_issue(number, Opt::Unset).await?;
            output_single(&mut issue, json).await
        }
        Entity::Comment => {
            let comment_id = required_id(entity, id)?;
            let repo = github.get_repo(target, lazy_parent).await?;
            let mut comment = repo.get_comment(comment_id, Opt::Unset).await?;
            output_single(&mut comment, json).await
        }
        Entity::Label => {
            let name: String = required_id(entity, id)?;
            let repo = github.get_repo(target, lazy_parent).await?;
            let mut label = repo.get_label(&name, Opt::Unset).await?;
            output_single(&mut label, json).await
        }
    }
}

/// A completable object that can be printed both ways.
#[async_trait]
trait Printable: PrettyPrint + Send {
    async fn raw(&mut self) -> ghapi::Result<&Map<String, Value>>;
}

macro_rules! printable {
    ($($ty:ty),*) => {
        $(#[async_trait]
        impl Printable for $ty {
            async fn raw(&mut self) -> ghapi::Result<&Map<String, Value>> {
                self.raw_data().await
            }
        })*
    };
}

printable!(Repository, Issue, IssueComment, NamedUser, Label);

async fn output_single<T: Printable>(item: &mut T, json: bool) -> ghapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item.raw().await?)?);
    } else {
        println!("{}", item.pretty_print().await?);
    }
    Ok(())
}

async fn print_json<T: Printable>(items: &mut [T]) -> ghapi::Result<()> {
    let mut raw = Vec::with_capacity(items.len());
    for item in items {
        raw.push(Value::Object(item.raw().await?.clone()));
    }
    println!("{}", serde_json::to_string_pretty(&raw)?);
    Ok(())
}

fn print_table<T, R: Tabled>(rows: Vec<R>, page: &Page<T>) {
    println!("{}", Table::new(rows));
    if let Some(total) = page.total {
        let total_pages = total.div_ceil(u64::from(page.count.max(1)));
        println!("\nPage {}/{} ({} total items)", page.page, total_pages, total);
    } else if page.has_more {
        println!("\nPage {} (more available)", page.page);
    } else {
        println!("\nPage {} (end)", page.page);
    }
}

fn output_topics(page: Page<Topic>, json: bool) -> ghapi::Result<()> {
    if json {
        let raw: Vec<Value> = page
            .iter()
            .map(|t| Value::Object(t.raw_data().clone()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let rows: Vec<TopicRow> = page.iter().map(TopicRow::from).collect();
    print_table(rows, &page);
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct IssueRow {
    number: u64,
    state: String,
    title: String,
    author: String,
}

impl IssueRow {
    async fn build(issue: &mut Issue) -> ghapi::Result<Self> {
        Ok(Self {
            number: issue.number().await?,
            state: issue.state().await?.to_string(),
            title: issue.title().await?.to_string(),
            author: issue.user().await?.login().await?.to_string(),
        })
    }
}

#[derive(Tabled)]
struct CommentRow {
    id: u64,
    author: String,
    body: String,
}

impl CommentRow {
    async fn build(comment: &mut IssueComment) -> ghapi::Result<Self> {
        let body = comment.body().await?;
        let first_line = body.lines().next().unwrap_or_default().to_string();
        Ok(Self {
            id: comment.id().await?,
            author: comment.user().await?.login().await?.to_string(),
            body: first_line,
        })
    }
}

#[derive(Tabled)]
struct LabelRow {
    name: String,
    color: String,
    description: String,
}

impl LabelRow {
    async fn build(label: &mut Label) -> ghapi::Result<Self> {
        Ok(Self {
            name: label.name().await?.to_string(),
            color: label.color().await?.to_string(),
            description: label.description().await?.unwrap_or_default().to_string(),
        })
    }
}

#[derive(Tabled)]
struct TopicRow {
    name: String,
    display_name: String,
    featured: bool,
}

impl From<&Topic> for TopicRow {
    fn from(t: &Topic) -> Self {
        Self {
            name: t.name().unwrap_or_default().to_string(),
            display_name: t
                .display_name()
                .ok()
                .flatten()
                .unwrap_or_default()
                .to_string(),
            featured: t.featured().unwrap_or_default(),
        }
    }
}
