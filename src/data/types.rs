//! Batted-ball records and the filters that select them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One batted-ball event. Every column may be missing in the source data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BattedBall {
    pub batter: Option<String>,
    pub pitcher: Option<String>,
    pub game_date: Option<String>,
    pub launch_angle: Option<f64>,
    pub exit_speed: Option<f64>,
    pub exit_direction: Option<f64>,
    pub hit_distance: Option<f64>,
    pub play_outcome: Option<String>,
    pub video_link: Option<String>,
}

impl BattedBall {
    /// Spray chart position: x toward right field, y toward center field.
    ///
    /// Returns `None` when direction or distance is missing.
    pub fn spray_point(&self) -> Option<(f64, f64)> {
        let direction = self.exit_direction?.to_radians();
        let distance = self.hit_distance?;
        Some((direction.sin() * distance, direction.cos() * distance))
    }
}

/// Outcome filter for the play result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayOutcome {
    #[default]
    All,
    HomeRun,
    Out,
    Single,
    Double,
    Triple,
}

impl PlayOutcome {
    pub const ALL: [PlayOutcome; 6] = [
        Self::All,
        Self::HomeRun,
        Self::Out,
        Self::Single,
        Self::Double,
        Self::Triple,
    ];

    /// Returns the value sent to the data source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::HomeRun => "HomeRun",
            Self::Out => "Out",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Triple => "Triple",
        }
    }

    /// Parses an outcome name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|outcome| outcome.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Cycles forward through the outcomes.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|o| *o == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Cycles backward through the outcomes.
    pub fn prev(self) -> Self {
        let pos = Self::ALL.iter().position(|o| *o == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Returns true if a record's outcome passes this filter.
    pub fn matches(&self, outcome: Option<&str>) -> bool {
        match self {
            Self::All => true,
            other => outcome.is_some_and(|o| o.to_lowercase() == other.as_str().to_lowercase()),
        }
    }
}

impl fmt::Display for PlayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters applied to a data query.
///
/// Bounds are inclusive. Bounds that failed to parse are NaN and are passed
/// through untouched; a NaN bound matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub hitter: String,
    pub pitcher: String,
    pub min_exit_speed: f64,
    pub max_exit_speed: f64,
    pub min_launch_angle: f64,
    pub max_launch_angle: f64,
    pub play_outcome: PlayOutcome,
}

pub const DEFAULT_MIN_EXIT_SPEED: f64 = 0.0;
pub const DEFAULT_MAX_EXIT_SPEED: f64 = 120.0;
pub const DEFAULT_MIN_LAUNCH_ANGLE: f64 = -90.0;
pub const DEFAULT_MAX_LAUNCH_ANGLE: f64 = 90.0;

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            hitter: String::new(),
            pitcher: String::new(),
            min_exit_speed: DEFAULT_MIN_EXIT_SPEED,
            max_exit_speed: DEFAULT_MAX_EXIT_SPEED,
            min_launch_angle: DEFAULT_MIN_LAUNCH_ANGLE,
            max_launch_angle: DEFAULT_MAX_LAUNCH_ANGLE,
            play_outcome: PlayOutcome::All,
        }
    }
}

impl FilterParams {
    /// Returns the query-string pairs understood by the data endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("hitter", self.hitter.clone()),
            ("pitcher", self.pitcher.clone()),
            ("minExitSpeed", self.min_exit_speed.to_string()),
            ("maxExitSpeed", self.max_exit_speed.to_string()),
            ("minLaunchAngle", self.min_launch_angle.to_string()),
            ("maxLaunchAngle", self.max_launch_angle.to_string()),
            ("playOutcome", self.play_outcome.as_str().to_string()),
        ]
    }

    /// Applies the filter to one record in memory.
    ///
    /// Name filters are trimmed, case-insensitive substring matches. Missing
    /// numeric values never match a range.
    pub fn matches(&self, ball: &BattedBall) -> bool {
        fn contains(value: Option<&str>, needle: &str) -> bool {
            let needle = needle.trim().to_lowercase();
            needle.is_empty() || value.is_some_and(|v| v.to_lowercase().contains(&needle))
        }
        fn between(value: Option<f64>, min: f64, max: f64) -> bool {
            value.is_some_and(|v| min <= v && v <= max)
        }

        contains(ball.batter.as_deref(), &self.hitter)
            && contains(ball.pitcher.as_deref(), &self.pitcher)
            && between(ball.exit_speed, self.min_exit_speed, self.max_exit_speed)
            && between(ball.launch_angle, self.min_launch_angle, self.max_launch_angle)
            && self.play_outcome.matches(ball.play_outcome.as_deref())
    }
}

/// Parses numeric filter text: empty is 0, anything unparsable is NaN.
pub fn parse_bound(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ball(batter: &str, speed: f64, angle: f64, outcome: &str) -> BattedBall {
        BattedBall {
            batter: Some(batter.to_string()),
            pitcher: Some("Cole, Gerrit".to_string()),
            exit_speed: Some(speed),
            launch_angle: Some(angle),
            play_outcome: Some(outcome.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_filters() {
        let params = FilterParams::default();
        assert_eq!(params.min_exit_speed, 0.0);
        assert_eq!(params.max_exit_speed, 120.0);
        assert_eq!(params.min_launch_angle, -90.0);
        assert_eq!(params.max_launch_angle, 90.0);
        assert_eq!(params.play_outcome, PlayOutcome::All);
    }

    #[test]
    fn test_outcome_cycle() {
        assert_eq!(PlayOutcome::All.next(), PlayOutcome::HomeRun);
        assert_eq!(PlayOutcome::Triple.next(), PlayOutcome::All);
        assert_eq!(PlayOutcome::All.prev(), PlayOutcome::Triple);
        assert_eq!(PlayOutcome::parse("homerun"), Some(PlayOutcome::HomeRun));
        assert_eq!(PlayOutcome::parse("walk"), None);
    }

    #[test]
    fn test_filter_matches() {
        let params = FilterParams {
            hitter: " JUDGE ".to_string(),
            play_outcome: PlayOutcome::HomeRun,
            ..Default::default()
        };
        assert!(params.matches(&ball("Judge, Aaron", 110.0, 28.0, "HomeRun")));
        assert!(!params.matches(&ball("Judge, Aaron", 110.0, 28.0, "Out")));
        assert!(!params.matches(&ball("Soto, Juan", 110.0, 28.0, "HomeRun")));
    }

    #[test]
    fn test_range_is_inclusive_and_skips_missing() {
        let params = FilterParams {
            min_exit_speed: 100.0,
            max_exit_speed: 110.0,
            ..Default::default()
        };
        assert!(params.matches(&ball("a", 100.0, 0.0, "Out")));
        assert!(params.matches(&ball("a", 110.0, 0.0, "Out")));
        assert!(!params.matches(&ball("a", 110.5, 0.0, "Out")));

        let mut missing = ball("a", 105.0, 0.0, "Out");
        missing.exit_speed = None;
        assert!(!params.matches(&missing));
    }

    #[test]
    fn test_nan_bound_matches_nothing() {
        let params = FilterParams {
            min_launch_angle: parse_bound("steep"),
            ..Default::default()
        };
        assert!(params.min_launch_angle.is_nan());
        assert!(!params.matches(&ball("a", 90.0, 10.0, "Single")));
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound(""), 0.0);
        assert_eq!(parse_bound(" 95.5 "), 95.5);
        assert_eq!(parse_bound("-10"), -10.0);
        assert!(parse_bound("fast").is_nan());
    }

    #[test]
    fn test_query_pairs() {
        let pairs = FilterParams::default().query_pairs();
        assert_eq!(pairs[2], ("minExitSpeed", "0".to_string()));
        assert_eq!(pairs[4], ("minLaunchAngle", "-90".to_string()));
        assert_eq!(pairs[6], ("playOutcome", "All".to_string()));
    }

    #[test]
    fn test_record_json_uses_column_names() {
        let json = r#"{"BATTER":"Soto, Juan","EXIT_SPEED":101.2,"PLAY_OUTCOME":"Single","VIDEO_LINK":null}"#;
        let parsed: BattedBall = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.batter.as_deref(), Some("Soto, Juan"));
        assert_eq!(parsed.exit_speed, Some(101.2));
        assert_eq!(parsed.launch_angle, None);
    }

    #[test]
    fn test_spray_point() {
        let mut b = ball("a", 100.0, 20.0, "Out");
        assert_eq!(b.spray_point(), None);
        b.exit_direction = Some(0.0);
        b.hit_distance = Some(400.0);
        let (x, y) = b.spray_point().unwrap();
        assert!(x.abs() < 1e-9);
        assert!((y - 400.0).abs() < 1e-9);
    }
}
