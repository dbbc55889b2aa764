// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use potluck::{PotluckConfig, RecipeStore, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "potluck")]
#[command(author, version, about = "Minimal recipe sharing web application", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Address to bind to (overrides config)
        #[arg(short, long)]
        bind: Option<SocketAddr>,
        /// Recipe collection file (overrides config)
        #[arg(short, long)]
        data_file: Option<PathBuf>,
        /// Static assets directory (overrides config)
        #[arg(long)]
        assets_dir: Option<PathBuf>,
        /// Lock file for cross-process writers (overrides config)
        #[arg(long)]
        lock_file: Option<PathBuf>,
    },
    /// Create an empty recipe collection file if none exists
    Init {
        /// Recipe collection file
        #[arg(short, long, default_value = "db/recipes.json")]
        data_file: PathBuf,
    },
    /// Print all recipes as JSON
    List {
        /// Recipe collection file
        #[arg(short, long, default_value = "db/recipes.json")]
        data_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            bind,
            data_file,
            assets_dir,
            lock_file,
        } => {
            let mut server_config = match config {
                Some(path) => {
                    info!("Loading configuration from {}", path.display());
                    PotluckConfig::load(&path)?.to_server_config()?
                }
                None => ServerConfig::default(),
            };

            if let Some(bind) = bind {
                server_config.bind_addr = bind;
            }
            if let Some(data_file) = data_file {
                server_config.data_file = data_file;
            }
            if let Some(assets_dir) = assets_dir {
                server_config.assets_dir = assets_dir;
            }
            if let Some(lock_file) = lock_file {
                server_config.lock_file = Some(lock_file);
            }

            potluck::run_server(server_config).await
        }
        Commands::Init { data_file } => {
            let store = RecipeStore::open(&data_file);
            if store
                .init()
                .await
                .with_context(|| format!("Failed to initialize {}", data_file.display()))?
            {
                println!("Created empty recipe collection at {}", data_file.display());
            } else {
                println!("Recipe collection already exists at {}", data_file.display());
            }
            Ok(())
        }
        Commands::List { data_file } => {
            let store = RecipeStore::open(&data_file);
            let recipes = store
                .load_all()
                .await
                .with_context(|| format!("Failed to load {}", data_file.display()))?;
            println!("{}", serde_json::to_string_pretty(&recipes)?);
            Ok(())
        }
    }
}
