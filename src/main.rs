use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use fileshare::{
    ApiKeyRepository, Capability, Config, Database, KeyManager, Result, WebServer,
};

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// File sharing service with scoped API keys and short links.
#[derive(Parser, Debug)]
#[command(name = "fileshare")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP service (default)
    Serve,

    /// Issue a new API key and print it
    CreateKey {
        /// Capability of the key: upload, download, shorten or administer
        capability: Capability,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, ignored_overrides) = match load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fileshare::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        fileshare::logging::init_console_only(&config.logging.level);
    }

    for message in ignored_overrides {
        warn!("{}", message);
    }

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::CreateKey { capability } => create_key(&config, capability).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load configuration from `--config`, `./config.toml` or defaults.
///
/// Environment overrides apply in every case. Overrides that were ignored
/// are returned so they can be logged once logging is up.
fn load_config(path: Option<&Path>) -> Result<(Config, Vec<String>)> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Config::load(DEFAULT_CONFIG_FILE)?,
        None => Config::default(),
    };
    let ignored = config.apply_env_overrides();
    config.validate()?;
    Ok((config, ignored))
}

async fn serve(config: &Config) -> Result<()> {
    info!("fileshare {}", env!("CARGO_PKG_VERSION"));

    let db = Database::open(&config.database.url, config.database.max_connections).await?;
    let server = WebServer::new(config, &db)?;

    info!("Server configured on {}", server.addr());
    server.run().await?;
    Ok(())
}

async fn create_key(config: &Config, capability: Capability) -> Result<()> {
    let db = Database::open(&config.database.url, config.database.max_connections).await?;
    let keys = KeyManager::new(Arc::new(ApiKeyRepository::new(db.pool())));

    let key = keys.issue(capability).await?;
    println!("{}", key.key);
    Ok(())
}
