//! Configuration management for bbviz.
//!
//! Handles loading configuration from TOML files and environment variables:
//! where batted-ball data comes from, where the name rosters live, and UI
//! timing.

use crate::data::{Ballpark, SourceKind};
use crate::error::{Result, VizError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Default location of the pre-generated hitter roster.
pub const DEFAULT_HITTERS_PATH: &str = "public/hitters.json";

/// Default location of the pre-generated pitcher roster.
pub const DEFAULT_PITCHERS_PATH: &str = "public/pitchers.json";

/// Main configuration structure for bbviz.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Batted-ball data source.
    #[serde(default)]
    pub data: DataConfig,

    /// Name roster files.
    #[serde(default)]
    pub roster: RosterConfig,

    /// UI behavior.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where batted-ball records are fetched from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Source kind: "http", "sqlite" or "mock".
    #[serde(default)]
    pub source: SourceKind,

    /// Base URL of the query endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// SQLite database file for the "sqlite" source.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// HTTP request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_database() -> PathBuf {
    PathBuf::from("data/BattedBallData.db")
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            api_url: default_api_url(),
            database: default_database(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Roster files holding JSON arrays of player names.
///
/// When neither is set, names come from the data source where it can list
/// them (sqlite, mock) and from the default `public/` files otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RosterConfig {
    pub hitters: Option<PathBuf>,
    pub pitchers: Option<PathBuf>,
}

impl RosterConfig {
    /// Returns true if either roster file was configured explicitly.
    pub fn is_configured(&self) -> bool {
        self.hitters.is_some() || self.pitchers.is_some()
    }
}

/// UI timing and chart defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Quiet period before a hovered record is shown in the details panel.
    #[serde(default = "default_hover_debounce_ms")]
    pub hover_debounce_ms: u64,
    /// Park the spray chart starts on, by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ballpark: Option<String>,
}

fn default_hover_debounce_ms() -> u64 {
    100
}

impl UiConfig {
    /// Index of the configured ballpark, or the first park when unset or
    /// unknown.
    pub fn ballpark_index(&self) -> usize {
        self.ballpark
            .as_deref()
            .and_then(Ballpark::position)
            .unwrap_or(0)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hover_debounce_ms: default_hover_debounce_ms(),
            ballpark: None,
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bbviz")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| VizError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            VizError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Applies environment variables (BBVIZ_API_URL, DB_PATH, etc.) as
    /// defaults for values the file left unset.
    pub fn apply_env_defaults(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Like [`apply_env_defaults`](Self::apply_env_defaults), with a custom
    /// variable lookup.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.data.api_url == default_api_url() {
            if let Some(url) = lookup("BBVIZ_API_URL") {
                self.data.api_url = url;
            }
        }
        if self.data.database == default_database() {
            if let Some(path) = lookup("DB_PATH") {
                self.data.database = PathBuf::from(path);
            }
        }
        if self.roster.hitters.is_none() {
            self.roster.hitters = lookup("BBVIZ_HITTERS").map(PathBuf::from);
        }
        if self.roster.pitchers.is_none() {
            self.roster.pitchers = lookup("BBVIZ_PITCHERS").map(PathBuf::from);
        }
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.data.source == SourceKind::Http {
            validate_api_url(&self.data.api_url)?;
        }
        if let Some(name) = &self.ui.ballpark {
            if Ballpark::position(name).is_none() {
                return Err(VizError::config(format!("Unknown ballpark '{name}'")));
            }
        }
        Ok(())
    }

    /// Hitter and pitcher roster paths, falling back to the `public/` files.
    pub fn roster_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.roster
                .hitters
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HITTERS_PATH)),
            self.roster
                .pitchers
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PITCHERS_PATH)),
        )
    }
}

/// Validates an API base URL: must parse and use http or https.
pub fn validate_api_url(api_url: &str) -> Result<Url> {
    let url = Url::parse(api_url)
        .map_err(|e| VizError::config(format!("Invalid API URL '{api_url}': {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(VizError::config(format!(
            "Invalid scheme '{}'. Expected 'http' or 'https'",
            url.scheme()
        )));
    }

    Ok(url)
}
