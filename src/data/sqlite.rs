//! Direct SQLite access to the batted-ball database.
//!
//! Runs the same filtered query as the HTTP endpoint, locally, and doubles as
//! a [`NameSource`] by reading distinct player names.

use super::{BattedBall, BattedBallSource, FilterParams, PlayOutcome};
use crate::error::{Result, VizError};
use crate::roster::{NameSource, PlayerRole};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Table holding one row per batted ball.
pub const TABLE: &str = "batted_ball_data";

const SELECT_COLUMNS: &str = "BATTER, PITCHER, CAST(GAME_DATE AS TEXT) AS GAME_DATE, \
     CAST(LAUNCH_ANGLE AS REAL) AS LAUNCH_ANGLE, CAST(EXIT_SPEED AS REAL) AS EXIT_SPEED, \
     CAST(EXIT_DIRECTION AS REAL) AS EXIT_DIRECTION, CAST(HIT_DISTANCE AS REAL) AS HIT_DISTANCE, \
     PLAY_OUTCOME, VIDEO_LINK";

const INDEXES: [(&str, &str); 4] = [
    ("idx_batter", "BATTER"),
    ("idx_pitcher", "PITCHER"),
    ("idx_exit_speed", "EXIT_SPEED"),
    ("idx_launch_angle", "LAUNCH_ANGLE"),
];

/// Batted-ball source backed by a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteDataSource {
    pool: SqlitePool,
    path: Option<PathBuf>,
}

impl SqliteDataSource {
    /// Opens an existing database and creates its lookup indexes if missing.
    pub async fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VizError::connection(format!(
                "Database not found: {}",
                path.display()
            )));
        }

        let conn_str = format!("sqlite:{}", path.display());
        let options = SqliteConnectOptions::from_str(&conn_str)
            .map_err(|e| VizError::config(format!("Invalid database path: {e}")))?
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| {
                VizError::connection(format!("Failed to open {}: {e}", path.display()))
            })?;

        let source = Self {
            pool,
            path: Some(path.to_path_buf()),
        };
        source.ensure_indexes().await;
        info!("Batted-ball database opened at {}", path.display());
        Ok(source)
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool, path: None }
    }

    /// Creates the lookup indexes used by the filtered query.
    ///
    /// Failure (read-only file, missing table) is logged and ignored.
    pub async fn ensure_indexes(&self) {
        for (name, column) in INDEXES {
            let sql = format!("CREATE INDEX IF NOT EXISTS {name} ON {TABLE}({column})");
            if let Err(e) = sqlx::query(&sql).execute(&self.pool).await {
                warn!(index = name, "Could not create index: {e}");
            }
        }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Builds the filtered SELECT. Name and outcome clauses are only added when
/// the filter is set.
fn build_query(params: &FilterParams) -> (String, Option<String>, Option<String>, Option<String>) {
    let mut sql = format!(
        "SELECT {SELECT_COLUMNS} FROM {TABLE} \
         WHERE EXIT_SPEED BETWEEN ? AND ? AND LAUNCH_ANGLE BETWEEN ? AND ?"
    );

    let like = |value: &str| {
        let value = value.trim().to_lowercase();
        (!value.is_empty()).then(|| format!("%{value}%"))
    };

    let hitter = like(&params.hitter);
    if hitter.is_some() {
        sql.push_str(" AND LOWER(BATTER) LIKE ?");
    }
    let pitcher = like(&params.pitcher);
    if pitcher.is_some() {
        sql.push_str(" AND LOWER(PITCHER) LIKE ?");
    }
    let outcome = match params.play_outcome {
        PlayOutcome::All => None,
        other => Some(other.as_str().to_lowercase()),
    };
    if outcome.is_some() {
        sql.push_str(" AND LOWER(PLAY_OUTCOME) = ?");
    }
    // Range scans on the indexes would otherwise reorder rows.
    sql.push_str(" ORDER BY rowid");

    (sql, hitter, pitcher, outcome)
}

#[async_trait]
impl BattedBallSource for SqliteDataSource {
    async fn fetch(&self, params: &FilterParams) -> Result<Vec<BattedBall>> {
        let (sql, hitter, pitcher, outcome) = build_query(params);
        debug!(%sql, "Querying batted balls");

        let mut query = sqlx::query_as::<_, BattedBall>(&sql)
            .bind(params.min_exit_speed)
            .bind(params.max_exit_speed)
            .bind(params.min_launch_angle)
            .bind(params.max_launch_angle);
        for value in [hitter, pitcher, outcome].into_iter().flatten() {
            query = query.bind(value);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| VizError::query(format!("Batted-ball query failed: {e}")))
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => format!("sqlite {}", path.display()),
            None => "sqlite".to_string(),
        }
    }
}

#[async_trait]
impl NameSource for SqliteDataSource {
    async fn load_names(&self, role: PlayerRole) -> Result<Vec<String>> {
        let column = role.column();
        let sql = format!(
            "SELECT DISTINCT LOWER({column}) AS name FROM {TABLE} WHERE {column} IS NOT NULL"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| VizError::roster(format!("Failed to read {} names: {e}", role.label())))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("name")
                    .map_err(|e| VizError::roster(format!("Bad {} name: {e}", role.label())))
            })
            .collect()
    }
}
