//! In-memory data source for headless testing and demos.

use super::{BattedBall, BattedBallSource, FilterParams};
use crate::error::{Result, VizError};
use crate::roster::{NameSource, PlayerRole};
use async_trait::async_trait;
use std::collections::BTreeSet;

type SampleRow = (
    &'static str,
    &'static str,
    &'static str,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<&'static str>,
);

const SAMPLE: [SampleRow; 14] = [
    ("Judge, Aaron", "Cole, Gerrit", "2023-04-02", Some(28.4), Some(112.3), Some(-12.0), Some(421.0), Some("HomeRun")),
    ("Soto, Juan", "Webb, Logan", "2023-04-03", Some(12.1), Some(98.7), Some(18.5), Some(182.0), Some("Single")),
    ("Ohtani, Shohei", "Strider, Spencer", "2023-04-05", Some(31.0), Some(109.8), Some(22.0), Some(398.0), Some("HomeRun")),
    ("Alonso, Pete", "Wheeler, Zack", "2023-04-06", Some(45.2), Some(88.4), Some(3.0), Some(312.0), Some("Out")),
    ("Altuve, Jose", "Cease, Dylan", "2023-04-08", Some(-8.3), Some(84.0), Some(-25.0), Some(38.0), Some("Out")),
    ("Betts, Mookie", "Burnes, Corbin", "2023-04-09", Some(18.9), Some(101.5), Some(-30.5), Some(265.0), Some("Double")),
    ("Freeman, Freddie", "Castillo, Luis", "2023-04-11", Some(9.4), Some(95.2), Some(6.0), Some(156.0), Some("Single")),
    ("Acuna Jr., Ronald", "Cole, Gerrit", "2023-04-12", Some(22.7), Some(107.9), Some(35.0), Some(352.0), Some("Double")),
    ("Arenado, Nolan", "Webb, Logan", "2023-04-14", Some(26.0), Some(104.4), Some(-40.0), Some(377.0), Some("HomeRun")),
    ("Adell, Jo", "Strider, Spencer", "2023-04-15", Some(14.2), Some(99.0), Some(41.0), Some(318.0), Some("Triple")),
    ("Abreu, Jose", "Wheeler, Zack", "2023-04-16", Some(58.1), Some(76.5), Some(10.0), Some(145.0), Some("Out")),
    ("Judge, Aaron", "Burnes, Corbin", "2023-04-18", Some(5.5), Some(115.6), Some(-2.0), Some(120.0), Some("Single")),
    ("Ohtani, Shohei", "Cease, Dylan", "2023-04-21", Some(-22.0), Some(70.3), Some(12.0), Some(12.0), Some("Out")),
    ("Soto, Juan", "Castillo, Luis", "2023-04-22", None, None, None, None, None),
];

/// Returns the built-in sample records.
pub fn sample_records() -> Vec<BattedBall> {
    SAMPLE
        .iter()
        .enumerate()
        .map(
            |(i, &(batter, pitcher, date, angle, speed, direction, distance, outcome))| BattedBall {
                batter: Some(batter.to_string()),
                pitcher: Some(pitcher.to_string()),
                game_date: Some(date.to_string()),
                launch_angle: angle,
                exit_speed: speed,
                exit_direction: direction,
                hit_distance: distance,
                play_outcome: outcome.map(str::to_string),
                video_link: outcome.map(|_| format!("https://video.example.com/plays/{}", 1001 + i)),
            },
        )
        .collect()
}

/// A data source that filters a fixed set of records in memory.
#[derive(Debug, Clone)]
pub struct MockDataSource {
    records: Vec<BattedBall>,
}

impl MockDataSource {
    /// Creates a mock source holding the built-in sample.
    pub fn new() -> Self {
        Self {
            records: sample_records(),
        }
    }

    /// Creates a mock source with the given records.
    pub fn with_records(records: Vec<BattedBall>) -> Self {
        Self { records }
    }
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BattedBallSource for MockDataSource {
    async fn fetch(&self, params: &FilterParams) -> Result<Vec<BattedBall>> {
        Ok(self
            .records
            .iter()
            .filter(|ball| params.matches(ball))
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        "sample data".to_string()
    }
}

#[async_trait]
impl NameSource for MockDataSource {
    async fn load_names(&self, role: PlayerRole) -> Result<Vec<String>> {
        let names: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|ball| match role {
                PlayerRole::Hitter => ball.batter.as_deref(),
                PlayerRole::Pitcher => ball.pitcher.as_deref(),
            })
            .collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }
}

/// A data source whose every query fails.
#[derive(Debug, Clone)]
pub struct FailingDataSource {
    message: String,
}

impl FailingDataSource {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl BattedBallSource for FailingDataSource {
    async fn fetch(&self, _params: &FilterParams) -> Result<Vec<BattedBall>> {
        Err(VizError::connection(self.message.clone()))
    }

    fn describe(&self) -> String {
        "unavailable".to_string()
    }
}
