// src/server/config.rs
//! Configuration file parsing for the Potluck server
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address
//! - [storage] - Recipe file and optional writer lock file
//! - [assets] - Static asset directory
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:3000"
//!
//! [storage]
//! data_file = "db/recipes.json"
//! lock_file = "db/recipes.lock"
//!
//! [assets]
//! dir = "public"
//! ```

use crate::server::ServerConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct PotluckConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageSection,

    /// Static asset settings
    #[serde(default)]
    pub assets: AssetsSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Bind address
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// Storage configuration section
#[derive(Debug, Deserialize)]
pub struct StorageSection {
    /// JSON file holding the recipe collection
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Lock file for cross-process writers (unset = single writer process)
    #[serde(default)]
    pub lock_file: Option<PathBuf>,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            lock_file: None,
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("db/recipes.json")
}

/// Static asset configuration section
#[derive(Debug, Deserialize)]
pub struct AssetsSection {
    #[serde(default = "default_assets_dir")]
    pub dir: PathBuf,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
        }
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("public")
}

impl PotluckConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: PotluckConfig = toml::from_str(content).context("Invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        if self.storage.data_file.as_os_str().is_empty() {
            anyhow::bail!("storage.data_file must not be empty");
        }

        if let Some(ref lock) = self.storage.lock_file
            && lock == &self.storage.data_file
        {
            anyhow::bail!("storage.lock_file must differ from storage.data_file");
        }

        Ok(())
    }

    /// Convert to the internal ServerConfig structure
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let bind_addr = self.server.bind.parse()?;

        Ok(ServerConfig {
            bind_addr,
            data_file: self.storage.data_file.clone(),
            lock_file: self.storage.lock_file.clone(),
            assets_dir: self.assets.dir.clone(),
        })
    }
}
