pub mod auth;
pub mod authors;
pub mod books;

use std::net::SocketAddr;

use auth::AuthCommands;
use authors::AuthorCommands;
use books::BookCommands;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "A small book club: share books and like them", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "BOOKCLUB_URL",
        default_value = "http://localhost:3000"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Seed and list authors directly in the database
    Author {
        #[arg(
            long,
            env = "BOOKCLUB_DATABASE_URL",
            default_value = "sqlite://bookclub.db"
        )]
        database_url: String,

        #[command(subcommand)]
        command: AuthorCommands,
    },

    /// Register and log in
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Manage books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(
        long,
        env = "BOOKCLUB_DATABASE_URL",
        default_value = "sqlite://bookclub.db"
    )]
    pub database_url: String,

    #[arg(long, env = "BOOKCLUB_BIND_ADDRESS", default_value = "127.0.0.1:3000")]
    pub bind_address: SocketAddr,

    /// Drop the `Secure` attribute from the session cookie (plain-HTTP development)
    #[arg(long, env = "BOOKCLUB_INSECURE_COOKIES")]
    pub insecure_cookies: bool,

    #[arg(
        long,
        env = "BOOKCLUB_SESSION_TTL_HOURS",
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(1..=8760)
    )]
    pub session_ttl_hours: u32,
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
