//! Walking the object graph lazily with the GitHub API client.
//!
//! Run with:
//! ```
//! GITHUB_TOKEN=your-token cargo run --example lazy_walk
//! ```

use ghapi::{Github, GithubClient, Opt};

#[tokio::main]
async fn main() -> ghapi::Result<()> {
    // Initialize tracing to see every request and completion (optional)
    tracing_subscriber::fmt::init();

    println!("Creating GitHub client...");
    let github = Github::new(GithubClient::from_env()?).with_lazy(true);

    // None of these sends a request
    println!("\n--- Building lazy objects ---");
    let repo = github.get_repo("PyGithub/PyGithub", Opt::Unset).await?;
    let issue = repo.get_issue(1234, Opt::Unset).await?;
    let mut comment = issue.get_comment(560146023, Opt::Unset).await?;
    println!("Repository: {}", repo.repr());
    println!("Issue:      {}", issue.repr());
    println!("Comment:    {}", comment.repr());

    // The first unset field read completes the comment
    println!("\n--- Reading the comment author ---");
    let user = comment.user().await?;
    println!("Written by {}", user.login().await?);
    println!("Comment complete: {}", comment.is_completed());

    // Explicitly eager, regardless of the root preference
    println!("\n--- Fetching the issue eagerly ---");
    let mut issue = repo.get_issue(1234, Opt::present(false)).await?;
    println!("#{}: {}", issue.number().await?, issue.title().await?);

    // List the first page of open issues
    println!("\n--- Listing open issues (first page) ---");
    let mut page = repo.get_issues(None)?.with_per_page(10).get_page(1).await?;
    println!("Found {} issues (more: {})", page.len(), page.has_more);
    for issue in &mut page.items {
        println!("  - #{} {}", issue.number().await?, issue.title().await?);
    }

    println!("\nDone!");
    Ok(())
}
