use crate::constants::{DEFAULT_DOWNLOAD_DIR, DEFAULT_IGNORE_TLDS, DEFAULT_PORTAL_URL};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration, loaded once per run from a JSON file.
///
/// API credentials (`base_url` + `token`) and portal credentials
/// (`username` + `password`) are each optional in the file and validated
/// lazily: the downloader only needs the former, the reporter only the latter.
/// Unknown keys are rejected to catch typos.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// CZDS API root for the zone data endpoints
    pub base_url: Option<String>,
    /// Bearer token appended to the listing call
    pub token: Option<String>,
    /// Portal login name
    pub username: Option<String>,
    /// Portal password
    pub password: Option<String>,
    /// Probe each zone with a HEAD call and skip unchanged files
    pub prefetch: bool,
    /// Portal root for the reporter commands
    pub portal_url: String,
    /// Root directory under which per-day `zonefiles.<YYYYMMDD>` dirs are created
    pub download_dir: PathBuf,
    /// TLD labels excluded from reporter output
    pub ignore_tlds: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            username: None,
            password: None,
            prefetch: false,
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            ignore_tlds: DEFAULT_IGNORE_TLDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, is not valid JSON,
    /// or contains unknown keys.
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Error loading '{}' file: {e}", path.display()))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            AppError::ConfigError(format!("Error loading '{}' file: {e}", path.display()))
        })
    }

    /// API root and token, required by the downloader.
    pub fn api(&self) -> AppResult<(&str, &str)> {
        match (self.base_url.as_deref(), self.token.as_deref()) {
            (Some(base_url), Some(token)) => Ok((base_url, token)),
            _ => Err(AppError::ConfigError(
                "'base_url' and 'token' are required for zone downloads".to_string(),
            )),
        }
    }

    /// Portal credentials, required by the reporter commands.
    pub fn credentials(&self) -> AppResult<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::ConfigError(
                "'username' and 'password' are required for portal commands".to_string(),
            )),
        }
    }

    /// True if the given TLD label is on the ignore-list.
    pub fn is_ignored_tld(&self, label: &str) -> bool {
        self.ignore_tlds.iter().any(|t| t == label)
    }
}
