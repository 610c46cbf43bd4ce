//! Boruta admin CLI - manage Boruta users from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{config, login, users};

/// Boruta admin - manage users and their authorized scopes
#[derive(Parser)]
#[command(name = "boruta-admin", version, about, long_about = None)]
struct Cli {
    /// Log admin API traffic to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    Users {
        #[command(subcommand)]
        command: users::UserCommands,
    },

    /// Store the admin access token
    Login {
        /// Access token issued by Boruta
        #[arg(long, env = "BORUTA_ACCESS_TOKEN")]
        token: String,
    },

    /// Forget the stored access token
    Logout,

    /// Show or change configuration
    Config {
        /// Boruta base URL (e.g. https://boruta.example.com)
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Users { command } => users::run(command).await,
        Commands::Login { token } => login::run_login(&token),
        Commands::Logout => login::run_logout(),
        Commands::Config { base_url } => config::run(base_url),
    }
}
