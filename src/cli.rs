//! Command-line argument parsing for bbviz.

use crate::config::Config;
use crate::data::SourceKind;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output of the final screen.
    #[default]
    Text,
    /// JSON output with screen, state, and metadata.
    Json,
    /// Frame-by-frame output showing state after each event.
    Frames,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "frames" => Ok(Self::Frames),
            _ => Err(format!(
                "Invalid output format: {s}. Expected: text, json, or frames"
            )),
        }
    }
}

/// A terminal dashboard for exploring batted-ball events.
#[derive(Parser, Debug)]
#[command(name = "bbviz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Data source: http, sqlite, or mock
    #[arg(short = 's', long, value_name = "KIND")]
    pub source: Option<String>,

    /// Base URL of the batted-ball query endpoint
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// SQLite database file (implies --source sqlite unless set)
    #[arg(short = 'd', long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// JSON file with hitter names
    #[arg(long, value_name = "PATH")]
    pub hitters: Option<PathBuf>,

    /// JSON file with pitcher names
    #[arg(long, value_name = "PATH")]
    pub pitchers: Option<PathBuf>,

    /// Write hitters.json and pitchers.json to DIR and exit
    #[arg(long, value_name = "DIR")]
    pub export_roster: Option<PathBuf>,

    // === Headless mode options ===
    /// Run in headless mode (no terminal UI, for testing/automation)
    #[arg(long)]
    pub headless: bool,

    /// Use built-in sample data and rosters
    #[arg(long)]
    pub mock_data: bool,

    /// Comma-separated events to execute in headless mode (e.g., "type:ab,key:down")
    #[arg(long, value_name = "EVENTS")]
    pub events: Option<String>,

    /// Path to script file with events (use "-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Screen size for headless mode (WIDTHxHEIGHT, e.g., "100x30")
    #[arg(long, value_name = "SIZE", default_value = "100x30")]
    pub size: String,

    /// Output format for headless mode
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,

    /// Write output to file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Stop on first assertion failure
    #[arg(long)]
    pub fail_fast: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Applies command-line overrides on top of file and environment values.
    pub fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(source) = &self.source {
            config.data.source = source.parse::<SourceKind>()?;
        } else if self.database.is_some() {
            config.data.source = SourceKind::Sqlite;
        }
        if let Some(url) = &self.api_url {
            config.data.api_url = url.clone();
        }
        if let Some(database) = &self.database {
            config.data.database = database.clone();
        }
        if let Some(hitters) = &self.hitters {
            config.roster.hitters = Some(hitters.clone());
        }
        if let Some(pitchers) = &self.pitchers {
            config.roster.pitchers = Some(pitchers.clone());
        }
        if self.mock_data {
            config.data.source = SourceKind::Mock;
        }
        Ok(())
    }

    /// Returns true if headless mode is enabled.
    pub fn is_headless(&self) -> bool {
        self.headless
    }

    /// Parses the screen size from the --size argument.
    /// Returns (width, height) or an error.
    pub fn parse_screen_size(&self) -> std::result::Result<(u16, u16), String> {
        let parts: Vec<&str> = self.size.split('x').collect();
        if parts.len() != 2 {
            return Err(format!(
                "Invalid size format: '{}'. Expected WIDTHxHEIGHT (e.g., 100x30)",
                self.size
            ));
        }
        let width = parts[0]
            .parse::<u16>()
            .map_err(|_| format!("Invalid width: '{}'", parts[0]))?;
        let height = parts[1]
            .parse::<u16>()
            .map_err(|_| format!("Invalid height: '{}'", parts[1]))?;
        Ok((width, height))
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }

    /// Validates headless mode arguments.
    /// Returns an error message if validation fails.
    pub fn validate_headless(&self) -> std::result::Result<(), String> {
        if !self.headless {
            return Ok(());
        }

        if self.events.is_none() && self.script.is_none() {
            return Err("--headless requires --events or --script".to_string());
        }

        self.parse_screen_size()?;
        self.parse_output_format()?;

        Ok(())
    }
}
