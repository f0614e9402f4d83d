//! Configuration loading and scoring endpoint resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default scoring endpoint (local mock server)
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";

/// Default bounded wait for the scoring request
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

/// Environment variable overriding the scoring endpoint
pub const ENDPOINT_ENV_VAR: &str = "VOXCHECK_ENDPOINT";

/// Environment variable overriding the upload timeout (seconds)
pub const TIMEOUT_ENV_VAR: &str = "VOXCHECK_UPLOAD_TIMEOUT_SECS";

/// Upload collaborator configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Scoring service URL the WAV buffer is posted to
    pub endpoint: String,
    /// Bounded wait before giving up on the scoring request
    pub timeout: Duration,
}

/// Optional keys recognized in the TOML config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    endpoint: Option<String>,
    upload_timeout_secs: Option<u64>,
}

/// Resolve upload configuration following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. Compiled default (fallback)
pub fn resolve_upload_config(
    cli_endpoint: Option<&str>,
    cli_timeout_secs: Option<u64>,
) -> Result<UploadConfig> {
    let file = load_config_file()?;

    let endpoint = match cli_endpoint {
        Some(url) => url.to_string(),
        None => match std::env::var(ENDPOINT_ENV_VAR) {
            Ok(url) if !url.is_empty() => url,
            _ => file
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        },
    };

    let timeout_secs = match cli_timeout_secs {
        Some(secs) => secs,
        None => match std::env::var(TIMEOUT_ENV_VAR) {
            Ok(value) => value.parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    TIMEOUT_ENV_VAR, value
                ))
            })?,
            Err(_) => file
                .upload_timeout_secs
                .unwrap_or(DEFAULT_UPLOAD_TIMEOUT_SECS),
        },
    };

    if timeout_secs == 0 {
        return Err(Error::Config(
            "upload timeout must be at least 1 second".to_string(),
        ));
    }

    Ok(UploadConfig {
        endpoint,
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// Parse the config file if one exists; absent files are not an error
fn load_config_file() -> Result<ConfigFile> {
    let Some(path) = find_config_file() else {
        return Ok(ConfigFile::default());
    };

    let contents = std::fs::read_to_string(&path)?;
    toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Locate the config file for the platform
///
/// Linux checks the user config directory first, then /etc/voxcheck.
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("voxcheck").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/voxcheck/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
