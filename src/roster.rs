//! Player name rosters for the suggestion fields.
//!
//! Names come from a [`NameSource`]: pre-generated JSON files, distinct values
//! in the SQLite database, or the built-in sample. Loading never fails: a
//! source that errors yields an empty index and a warning.

use crate::config::Config;
use crate::data::{MockDataSource, SourceKind, SqliteDataSource};
use crate::error::{Result, VizError};
use crate::suggest::NameIndex;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Which player column a roster is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    Hitter,
    Pitcher,
}

impl PlayerRole {
    /// Column name in the batted-ball table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Hitter => "BATTER",
            Self::Pitcher => "PITCHER",
        }
    }

    /// File name used for exported rosters.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Hitter => "hitters.json",
            Self::Pitcher => "pitchers.json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hitter => "hitter",
            Self::Pitcher => "pitcher",
        }
    }
}

/// Anything that can list player names for a role. Order is irrelevant.
#[async_trait]
pub trait NameSource: Send + Sync {
    async fn load_names(&self, role: PlayerRole) -> Result<Vec<String>>;
}

/// Reads names from JSON files holding an array of strings.
#[derive(Debug, Clone, Default)]
pub struct JsonNameSource {
    pub hitters: Option<PathBuf>,
    pub pitchers: Option<PathBuf>,
}

impl JsonNameSource {
    pub fn new(hitters: Option<PathBuf>, pitchers: Option<PathBuf>) -> Self {
        Self { hitters, pitchers }
    }

    fn path(&self, role: PlayerRole) -> Option<&Path> {
        match role {
            PlayerRole::Hitter => self.hitters.as_deref(),
            PlayerRole::Pitcher => self.pitchers.as_deref(),
        }
    }
}

#[async_trait]
impl NameSource for JsonNameSource {
    async fn load_names(&self, role: PlayerRole) -> Result<Vec<String>> {
        let path = self
            .path(role)
            .ok_or_else(|| VizError::roster(format!("No {} roster file configured", role.label())))?;

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            VizError::roster(format!("Failed to read {}: {e}", path.display()))
        })?;

        serde_json::from_str::<Vec<String>>(&content).map_err(|e| {
            VizError::roster(format!(
                "{} is not a JSON array of names: {e}",
                path.display()
            ))
        })
    }
}

/// Hitter and pitcher indexes, built once at startup and shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub hitters: NameIndex,
    pub pitchers: NameIndex,
}

impl Roster {
    /// Loads both rosters. A failing source yields an empty index.
    pub async fn load(source: &dyn NameSource) -> Self {
        Self {
            hitters: load_index(source, PlayerRole::Hitter).await,
            pitchers: load_index(source, PlayerRole::Pitcher).await,
        }
    }

    pub fn index(&self, role: PlayerRole) -> &NameIndex {
        match role {
            PlayerRole::Hitter => &self.hitters,
            PlayerRole::Pitcher => &self.pitchers,
        }
    }
}

async fn load_index(source: &dyn NameSource, role: PlayerRole) -> NameIndex {
    match source.load_names(role).await {
        Ok(names) => {
            let index = NameIndex::build(names);
            info!(role = role.label(), names = index.len(), "Roster loaded");
            index
        }
        Err(e) => {
            warn!(role = role.label(), "Roster unavailable, suggestions disabled: {e}");
            NameIndex::empty()
        }
    }
}

/// Picks the name source for a configuration.
///
/// Explicit roster files win. Otherwise the sqlite and mock data sources list
/// their own distinct names, and the HTTP source falls back to the default
/// `public/` files.
pub async fn name_source(config: &Config) -> Box<dyn NameSource> {
    let (hitters, pitchers) = config.roster_paths();
    let files = JsonNameSource::new(Some(hitters), Some(pitchers));

    if config.roster.is_configured() {
        return Box::new(JsonNameSource::new(
            config.roster.hitters.clone(),
            config.roster.pitchers.clone(),
        ));
    }

    match config.data.source {
        SourceKind::Mock => Box::new(MockDataSource::new()),
        SourceKind::Sqlite => match SqliteDataSource::open(&config.data.database).await {
            Ok(source) => Box::new(source),
            Err(e) => {
                warn!("Cannot read names from database, using roster files: {e}");
                Box::new(files)
            }
        },
        SourceKind::Http => Box::new(files),
    }
}

/// Writes `hitters.json` and `pitchers.json` into `dir`.
///
/// Names are lower-cased, de-duplicated and sorted. Returns the written paths.
pub async fn export(source: &dyn NameSource, dir: &Path) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        VizError::roster(format!("Failed to create {}: {e}", dir.display()))
    })?;

    let mut written = Vec::new();
    for role in [PlayerRole::Hitter, PlayerRole::Pitcher] {
        let names: BTreeSet<String> = source
            .load_names(role)
            .await?
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        let names: Vec<String> = names.into_iter().collect();

        let json = serde_json::to_string(&names)
            .map_err(|e| VizError::internal(format!("Failed to encode roster: {e}")))?;
        let path = dir.join(role.file_name());
        tokio::fs::write(&path, json).await.map_err(|e| {
            VizError::roster(format!("Failed to write {}: {e}", path.display()))
        })?;

        info!(path = %path.display(), names = names.len(), "Roster exported");
        written.push(path);
    }

    Ok(written)
}
