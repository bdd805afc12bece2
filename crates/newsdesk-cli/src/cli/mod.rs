//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use newsdesk_core::config::{Config, paths};
use newsdesk_core::logging::{self, LogTarget};
use newsdesk_core::services::Services;

mod commands;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(version)]
#[command(about = "Search the news and keep the articles worth reading")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Search news articles by keyword
    Search {
        /// Keyword to search for
        keyword: String,
    },

    /// Sign in (password is read from stdin)
    Login {
        #[arg(long, env = "NEWSDESK_EMAIL")]
        email: String,
    },

    /// Create an account and sign in (password is read from stdin)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage saved articles
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SavedCommands {
    /// List saved articles
    List,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config commands work even when the existing file does not parse.
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let config = Config::load().context("load config")?;
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    // default to the interactive shell
    let Some(command) = cli.command else {
        let _log_guard = logging::init(LogTarget::File(paths::logs_dir()), &config.log.level)?;
        let services = Services::from_config(&config)?;
        let _enter = rt.enter();
        return newsdesk_tui::run_interactive(&config, services);
    };

    let _log_guard = logging::init(LogTarget::Stderr, &config.log.level)?;
    let services = Services::from_config(&config)?;
    rt.block_on(async move { dispatch(command, &services).await })
}

async fn dispatch(command: Commands, services: &Services) -> Result<()> {
    match command {
        Commands::Search { keyword } => commands::search::run(services, &keyword).await,
        Commands::Login { email } => commands::auth::login(services, &email).await,
        Commands::Register { name, email } => {
            commands::auth::register(services, &name, &email).await
        }
        Commands::Logout => commands::auth::logout(services),
        Commands::Whoami => commands::auth::whoami(services).await,
        Commands::Saved { command } => match command {
            SavedCommands::List => commands::saved::list(services).await,
        },
        Commands::Config { .. } => Ok(()),
    }
}
