//! Client settings and their persistence
//!
//! Saves and loads [`ClientSettings`] to/from a JSON file in the user's
//! configuration directory.
//!
//! # Precedence
//!
//! 1. Command line flags
//! 2. `SERINA_SERVER_URL` (also read from `.env`)
//! 3. `settings.json`
//! 4. [`ClientSettings::default`]
//!
//! # Error Handling
//!
//! Load and save failures are returned to the caller; the binary logs a
//! load failure and continues with default settings.

use crate::core::error::{CoreError, CoreResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use url::Url;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Environment variable overriding [`ClientSettings::server_url`]
pub const SERVER_URL_ENV: &str = "SERINA_SERVER_URL";

/// User preferences for the board client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the position service
    pub server_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,

    /// Mark highlighted squares when a piece is selected
    pub show_hints: bool,

    /// Draw the board from Black's side
    pub flipped: bool,

    /// Use chess glyphs instead of letters
    pub unicode_pieces: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            log_filter: "serina_board=info".to_string(),
            show_hints: true,
            flipped: false,
            unicode_pieces: false,
        }
    }
}

impl ClientSettings {
    /// Parsed server URL
    pub fn server_url(&self) -> CoreResult<Url> {
        Url::parse(&self.server_url).map_err(|source| CoreError::InvalidServerUrl {
            url: self.server_url.clone(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Replace the server URL if `value` is set and non-empty
    pub fn override_server_url(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            info!("[SETTINGS] Server URL overridden: {}", url);
            self.server_url = url.trim().to_string();
        }
    }

    /// Apply [`SERVER_URL_ENV`] from the process environment
    pub fn apply_env(&mut self) {
        self.override_server_url(std::env::var(SERVER_URL_ENV).ok());
    }
}

/// Resolve the settings file path
///
/// Returns a path to `settings.json` in the user's configuration directory,
/// or a local `settings.json` if the system config dir cannot be found.
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "serina", "serina-board") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Read settings from `path`
///
/// A missing file yields defaults; an unreadable or malformed one is an error.
pub fn load_settings_from(path: &Path) -> CoreResult<ClientSettings> {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return Ok(ClientSettings::default());
    }

    let contents = fs::read_to_string(path)?;
    let settings = serde_json::from_str::<ClientSettings>(&contents)?;
    info!("[SETTINGS] Loaded settings from {:?}", path);
    Ok(settings)
}

/// Write settings to `path`, creating the parent directory if needed
pub fn save_settings_to(settings: &ClientSettings, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
