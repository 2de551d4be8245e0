use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

/// Settings for the remote page fetcher used by `lks save`.
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Fetches past this deadline are treated as a soft failure (empty
    /// metadata), never a hard error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Permit fetching private/loopback addresses. Off outside tests.
    #[serde(default)]
    pub allow_private_addresses: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            allow_private_addresses: false,
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; LinkstashBot/1.0; +https://github.com/parallax-labs/linkstash)"
        .to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Import files larger than this are rejected before parsing.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Owner assigned when the CLI is not given `--user`.
    #[serde(default = "default_user")]
    pub default_user: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            default_user: default_user(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_user() -> String {
    "local".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.fetch.timeout_secs == 0 {
        anyhow::bail!("fetch.timeout_secs must be > 0");
    }

    if config.import.max_file_bytes == 0 {
        anyhow::bail!("import.max_file_bytes must be > 0");
    }

    if config.import.default_user.trim().is_empty() {
        anyhow::bail!("import.default_user must not be empty");
    }

    Ok(config)
}
