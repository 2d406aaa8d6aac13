//! Batted-ball data sources.
//!
//! Provides a trait-based interface for fetching filtered records, so the
//! dashboard can read from the HTTP endpoint, a local SQLite file, or
//! built-in sample data interchangeably.

mod ballpark;
mod http;
mod mock;
mod sqlite;
mod types;

pub use ballpark::{Ballpark, BALLPARKS};
pub use http::HttpDataSource;
pub use mock::{sample_records, FailingDataSource, MockDataSource};
pub use sqlite::SqliteDataSource;
pub use types::{
    parse_bound, BattedBall, FilterParams, PlayOutcome, DEFAULT_MAX_EXIT_SPEED,
    DEFAULT_MAX_LAUNCH_ANGLE, DEFAULT_MIN_EXIT_SPEED, DEFAULT_MIN_LAUNCH_ANGLE,
};

use crate::config::DataConfig;
use crate::error::{Result, VizError};
use async_trait::async_trait;
use std::sync::Arc;

/// Supported data source kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Http,
    Sqlite,
    Mock,
}

impl SourceKind {
    /// Returns the kind as a string for display and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Sqlite => "sqlite",
            Self::Mock => "mock",
        }
    }

    /// Parses a source kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "http" | "api" => Some(Self::Http),
            "sqlite" | "db" => Some(Self::Sqlite),
            "mock" | "sample" => Some(Self::Mock),
            _ => None,
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            VizError::config(format!(
                "Unknown data source '{s}'. Valid options: http, sqlite, mock"
            ))
        })
    }
}

/// Trait for anything that can answer a filtered batted-ball query.
#[async_trait]
pub trait BattedBallSource: Send + Sync {
    /// Returns every record matching `params`.
    async fn fetch(&self, params: &FilterParams) -> Result<Vec<BattedBall>>;

    /// Short human-readable description for the header.
    fn describe(&self) -> String;
}

/// Creates a data source for the configured kind.
pub async fn connect(config: &DataConfig) -> Result<Arc<dyn BattedBallSource>> {
    match config.source {
        SourceKind::Http => {
            let source = HttpDataSource::new(&config.api_url, config.timeout_secs)?;
            Ok(Arc::new(source))
        }
        SourceKind::Sqlite => {
            let source = SqliteDataSource::open(&config.database).await?;
            Ok(Arc::new(source))
        }
        SourceKind::Mock => Ok(Arc::new(MockDataSource::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_parse() {
        assert_eq!(SourceKind::parse("HTTP"), Some(SourceKind::Http));
        assert_eq!(SourceKind::parse("sqlite"), Some(SourceKind::Sqlite));
        assert_eq!(SourceKind::parse("sample"), Some(SourceKind::Mock));
        assert_eq!(SourceKind::parse("postgres"), None);
    }

    #[test]
    fn test_source_kind_from_str_error() {
        let err = "postgres".parse::<SourceKind>().unwrap_err();
        assert!(err.to_string().contains("Unknown data source 'postgres'"));
    }

    #[tokio::test]
    async fn test_connect_mock() {
        let config = DataConfig {
            source: SourceKind::Mock,
            ..Default::default()
        };
        let source = connect(&config).await.unwrap();
        let records = source.fetch(&FilterParams::default()).await.unwrap();
        assert!(!records.is_empty());
    }
}
