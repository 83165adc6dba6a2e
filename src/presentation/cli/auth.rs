use anyhow::Result;
use clap::{Args, Subcommand};

use super::print_json;
use crate::domain::credentials::{Credentials, RegisterRequest};
use crate::infrastructure::client::{BookclubClient, SESSION_ENV_VAR};

#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Create an account
    Register(CredentialsArgs),
    /// Log in and print a session token
    Login(CredentialsArgs),
    /// End the session held in BOOKCLUB_SESSION
    Logout(CredentialsArgs),
}

#[derive(Debug, Args)]
pub struct CredentialsArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "BOOKCLUB_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(client: &BookclubClient, cmd: AuthCommands) -> Result<()> {
    match cmd {
        AuthCommands::Register(c) => register(client, c).await,
        AuthCommands::Login(c) => login(client, c).await,
        AuthCommands::Logout(c) => logout(client, c).await,
    }
}

async fn register(client: &BookclubClient, args: CredentialsArgs) -> Result<()> {
    let payload = RegisterRequest {
        email: args.email,
        password: args.password,
    };
    let user = client.auth().register(&payload).await?;
    print_json(&user)
}

async fn login(client: &BookclubClient, args: CredentialsArgs) -> Result<()> {
    let credentials = Credentials {
        email: args.email,
        password: args.password,
    };
    let token = client.auth().login(&credentials).await?;
    println!("export {SESSION_ENV_VAR}={token}");
    Ok(())
}

async fn logout(client: &BookclubClient, args: CredentialsArgs) -> Result<()> {
    let credentials = Credentials {
        email: args.email,
        password: args.password,
    };
    client.auth().logout(&credentials).await?;
    eprintln!("Logged out.");
    Ok(())
}
