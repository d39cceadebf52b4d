use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

pub const DATA_URL_ENV: &str = "DASHBOARD_DATA_URL";
pub const DATA_FILE_ENV: &str = "DASHBOARD_DATA_FILE";
pub const PORT_ENV: &str = "PORT";

pub const DEFAULT_DATA_URL: &str = "http://127.0.0.1:8844/api/data";
pub const DEFAULT_DATA_FILE: &str = "data.json";
pub const DEFAULT_PORT: u16 = 8844;

/// Retrieves an environment variable, treating unset and blank values the same.
///
/// # Arguments
/// - `var`: The name of the environment variable.
///
/// # Returns
/// - `Some(value)` trimmed, or `None` when unset or empty.
pub fn get_env_var(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolves the data endpoint: explicit override first, then `DASHBOARD_DATA_URL`,
/// then the local data server default.
pub fn data_url(override_url: Option<&str>) -> Result<Url> {
    let raw = override_url
        .map(str::to_string)
        .or_else(|| get_env_var(DATA_URL_ENV))
        .unwrap_or_else(|| DEFAULT_DATA_URL.to_string());
    Url::parse(&raw).with_context(|| format!("Invalid data endpoint URL: {}", raw))
}

/// Settings for the file-backed data server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_file: PathBuf,
    pub port: u16,
}

impl ServerConfig {
    /// Reads `DASHBOARD_DATA_FILE` and `PORT`, with CLI overrides taking precedence.
    pub fn from_env(data_file: Option<PathBuf>, port: Option<u16>) -> Self {
        let data_file = data_file
            .or_else(|| get_env_var(DATA_FILE_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let port = port
            .or_else(|| get_env_var(PORT_ENV).and_then(|p| p.parse::<u16>().ok()))
            .unwrap_or(DEFAULT_PORT);
        ServerConfig { data_file, port }
    }
}
