use anyhow::Result;
use clap::{Args, Subcommand};

use super::print_json;
use crate::domain::book_items::NewBook;
use crate::domain::ids::{AuthorId, BookId};
use crate::infrastructure::client::BookclubClient;

#[derive(Debug, Subcommand)]
pub enum BookCommands {
    /// List all books
    List,
    /// Get a book by ID
    Get(BookIdArgs),
    /// Add a new book
    Add(AddBookCommand),
    /// Replace a book's fields
    Update(UpdateBookCommand),
    /// Delete a book
    Delete(BookIdArgs),
    /// Like a book as the logged-in user
    Like(BookIdArgs),
}

pub async fn run(client: &BookclubClient, cmd: BookCommands) -> Result<()> {
    match cmd {
        BookCommands::List => print_json(&client.books().list().await?),
        BookCommands::Get(c) => get_book(client, c).await,
        BookCommands::Add(c) => {
            let book = client.books().create(&c.book.into_new_book()).await?;
            print_json(&book)
        }
        BookCommands::Update(c) => {
            let book = client
                .books()
                .update(BookId::new(c.id), &c.book.into_new_book())
                .await?;
            print_json(&book)
        }
        BookCommands::Delete(c) => print_json(&client.books().delete(BookId::new(c.id)).await?),
        BookCommands::Like(c) => print_json(&client.books().like(BookId::new(c.id)).await?),
    }
}

#[derive(Debug, Args)]
pub struct BookIdArgs {
    #[arg(long)]
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct BookFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author_id: i64,
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub page_count: Option<i32>,
    #[arg(long)]
    pub year_published: Option<i32>,
}

impl BookFields {
    fn into_new_book(self) -> NewBook {
        NewBook {
            title: self.title,
            isbn: self.isbn,
            description: self.description,
            page_count: self.page_count,
            year_published: self.year_published,
            author_id: AuthorId::new(self.author_id),
        }
    }
}

#[derive(Debug, Args)]
pub struct AddBookCommand {
    #[command(flatten)]
    pub book: BookFields,
}

#[derive(Debug, Args)]
pub struct UpdateBookCommand {
    #[arg(long)]
    pub id: i64,
    #[command(flatten)]
    pub book: BookFields,
}

async fn get_book(client: &BookclubClient, command: BookIdArgs) -> Result<()> {
    match client.books().get(BookId::new(command.id)).await? {
        Some(book) => print_json(&book),
        None => anyhow::bail!("book {} not found", command.id),
    }
}
