//! Configuration management for the content server

use anyhow::{Context, Result};
use serde::Deserialize;
use std::str::FromStr;

/// Store backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    #[default]
    MongoDB,
    Memory,
}

impl FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreType::MongoDB),
            "memory" | "mem" => Ok(StoreType::Memory),
            _ => Err(format!("Unknown store type: {}", s)),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Store type (default: mongodb)
    #[serde(default)]
    pub store_type: StoreType,

    /// MongoDB connection string (default: mongodb://localhost:27017/myBlogApp)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Database name; falls back to the one in the connection string
    pub database_name: Option<String>,

    /// Maximum request body size in bytes (default: 10 MiB)
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "mongodb://localhost:27017/myBlogApp".to_string()
}

fn default_body_limit_bytes() -> usize {
    10 * 1024 * 1024
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = var("HOST").unwrap_or_else(default_host);
        let port = match var("PORT") {
            Some(s) => s
                .parse()
                .with_context(|| format!("Invalid PORT '{}'", s))?,
            None => default_port(),
        };
        let store_type = match var("STORE_TYPE") {
            Some(s) => s.parse().map_err(anyhow::Error::msg)?,
            None => StoreType::default(),
        };
        let database_url = var("MONGODB_URI")
            .or_else(|| var("DATABASE_URL"))
            .unwrap_or_else(default_database_url);
        let database_name = var("DATABASE_NAME").filter(|s| !s.is_empty());
        let body_limit_bytes = match var("BODY_LIMIT_BYTES") {
            Some(s) => s
                .parse()
                .with_context(|| format!("Invalid BODY_LIMIT_BYTES '{}'", s))?,
            None => default_body_limit_bytes(),
        };

        Ok(Self {
            host,
            port,
            store_type,
            database_url,
            database_name,
            body_limit_bytes,
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;
        Ok(config)
    }
}
