//! Configuration Module
//!
//! This module defines all configuration structures for the ledger service.
//! Configuration is loaded from TOML files and parsed using serde.

use crate::{BlockHeight, Principal};
use serde::Deserialize;
use std::fs;

/// Main configuration structure
///
/// Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [api]
/// host = "127.0.0.1"
/// port = 8545
///
/// [chain]
/// start_height = 1
/// block_interval_ms = 5000
///
/// [certification]
/// owner = "ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub chain: ChainConfig,
    pub certification: CertificationConfig,
}

/// API server configuration
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: TCP port to listen on (e.g., 8545)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

/// Block clock configuration
///
/// # Fields
/// - `start_height`: Block height the ledger starts at
/// - `block_interval_ms`: Time per block; 0 disables automatic advancement
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_start_height")]
    pub start_height: BlockHeight,
    #[serde(default)]
    pub block_interval_ms: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            start_height: default_start_height(),
            block_interval_ms: 0,
        }
    }
}

fn default_start_height() -> BlockHeight {
    1
}

/// Certification authority configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CertificationConfig {
    /// Principal allowed to register and (de)activate certifiers
    pub owner: Principal,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
