//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use uadm_core::config::{self, API_URL_ENV, Config};
use uadm_core::logging::{self, LogTarget};

mod commands;

#[derive(Parser)]
#[command(name = "uadm")]
#[command(version)]
#[command(about = "Admin console for the user-management service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides the config file and UADM_API_URL)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Check that the backend and its database are reachable
    Health,
    /// Check an end-user login (does not start an admin session)
    UserLogin {
        /// Username to log in with
        #[arg(short, long)]
        username: String,

        /// Password; prompted on stdin when not set
        #[arg(long, env = "UADM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
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

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        let (config, base_url) = load_config(cli.api_url)?;
        let log_dir = config::paths::logs_dir()?;
        let _guard = logging::init(&config.log_level, LogTarget::File(log_dir.clone()))?;
        tracing::info!(api = %base_url, "starting admin console");
        return commands::tui::run(&config, base_url, &log_dir).await;
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
        Commands::Health => {
            let (config, base_url) = load_config(cli.api_url)?;
            let _guard = logging::init(&config.log_level, LogTarget::Stderr)?;
            commands::health::run(&config, base_url).await
        }
        Commands::UserLogin { username, password } => {
            let (config, base_url) = load_config(cli.api_url)?;
            let _guard = logging::init(&config.log_level, LogTarget::Stderr)?;
            commands::user_login::run(&config, base_url, &username, password).await
        }
    }
}

/// Loads the config file and resolves the effective base URL.
fn load_config(api_url: Option<String>) -> Result<(Config, String)> {
    let mut config = Config::load().context("load config")?;
    config.override_api_url(api_url);
    let base_url = config
        .base_url()
        .with_context(|| format!("check api_base_url (or {API_URL_ENV} / --api-url)"))?;
    Ok((config, base_url))
}
