use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use super::print_json;
use crate::domain::authors::NewAuthor;
use crate::domain::repositories::AuthorRepository;
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::authors::SqlAuthorRepository;

#[derive(Debug, Subcommand)]
pub enum AuthorCommands {
    /// Add a new author
    Add(AddAuthorCommand),
    /// List all authors
    List,
}

#[derive(Debug, Args)]
pub struct AddAuthorCommand {
    #[arg(long)]
    pub name: String,
}

/// Authors have no HTTP write surface, so these commands open the database directly.
pub async fn run(database_url: &str, cmd: AuthorCommands) -> Result<()> {
    let database = Database::connect(database_url)
        .await
        .context("failed to connect to database")?;
    let repo = SqlAuthorRepository::new(database.clone_pool());

    match cmd {
        AuthorCommands::Add(c) => add_author(&repo, c).await,
        AuthorCommands::List => list_authors(&repo).await,
    }
}

async fn add_author(repo: &SqlAuthorRepository, command: AddAuthorCommand) -> Result<()> {
    let new_author = NewAuthor { name: command.name }.normalize();
    if new_author.name.is_empty() {
        bail!("author name must not be empty");
    }

    let author = repo
        .insert(new_author)
        .await
        .context("failed to add author")?;
    print_json(&author)
}

async fn list_authors(repo: &SqlAuthorRepository) -> Result<()> {
    let authors = repo.list_all().await.context("failed to list authors")?;
    print_json(&authors)
}
