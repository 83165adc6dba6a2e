use anyhow::Result;
use bookclub::application::{ServerConfig, serve};
use bookclub::infrastructure::client::BookclubClient;
use bookclub::presentation::cli::{Cli, Commands, ServeCommand, auth, authors, books};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => run_server(cmd).await,
        Commands::Author {
            database_url,
            command,
        } => authors::run(&database_url, command).await,
        Commands::Auth { command } => {
            let client = BookclubClient::from_base_url(&cli.api_url)?;
            auth::run(&client, command).await
        }
        Commands::Book { command } => {
            let client = BookclubClient::from_base_url(&cli.api_url)?;
            books::run(&client, command).await
        }
    }
}

async fn run_server(command: ServeCommand) -> Result<()> {
    if command.insecure_cookies {
        tracing::warn!("insecure cookies enabled for development - do not use in production");
    }

    let config = ServerConfig {
        bind_address: command.bind_address,
        database_url: command.database_url,
        insecure_cookies: command.insecure_cookies,
        session_ttl_hours: command.session_ttl_hours,
    };

    serve(config).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
