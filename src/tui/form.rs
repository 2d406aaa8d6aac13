//! Filter form state: two name fields with suggestions, four numeric bounds,
//! and the outcome selector.

use super::app::Focus;
use crate::data::{
    parse_bound, FilterParams, PlayOutcome, DEFAULT_MAX_EXIT_SPEED, DEFAULT_MAX_LAUNCH_ANGLE,
    DEFAULT_MIN_EXIT_SPEED, DEFAULT_MIN_LAUNCH_ANGLE,
};
use crate::roster::Roster;
use crate::suggest::{InputState, InteractionHub, SuggestionDropdown};

/// All filter inputs. Each name field owns its own dropdown.
#[derive(Debug)]
pub struct FilterForm {
    pub hitter: SuggestionDropdown,
    pub pitcher: SuggestionDropdown,
    pub min_exit_speed: InputState,
    pub max_exit_speed: InputState,
    pub min_launch_angle: InputState,
    pub max_launch_angle: InputState,
    pub play_outcome: PlayOutcome,
}

impl FilterForm {
    /// Mounts the form with default bounds and the roster's name indexes.
    pub fn new(roster: &Roster, hub: &InteractionHub) -> Self {
        Self {
            hitter: SuggestionDropdown::new(roster.hitters.clone(), hub),
            pitcher: SuggestionDropdown::new(roster.pitchers.clone(), hub),
            min_exit_speed: InputState::with_text(DEFAULT_MIN_EXIT_SPEED.to_string()),
            max_exit_speed: InputState::with_text(DEFAULT_MAX_EXIT_SPEED.to_string()),
            min_launch_angle: InputState::with_text(DEFAULT_MIN_LAUNCH_ANGLE.to_string()),
            max_launch_angle: InputState::with_text(DEFAULT_MAX_LAUNCH_ANGLE.to_string()),
            play_outcome: PlayOutcome::All,
        }
    }

    /// Current filter values. Bounds are not validated.
    pub fn params(&self) -> FilterParams {
        FilterParams {
            hitter: self.hitter.text().to_string(),
            pitcher: self.pitcher.text().to_string(),
            min_exit_speed: parse_bound(&self.min_exit_speed.text),
            max_exit_speed: parse_bound(&self.max_exit_speed.text),
            min_launch_angle: parse_bound(&self.min_launch_angle.text),
            max_launch_angle: parse_bound(&self.max_launch_angle.text),
            play_outcome: self.play_outcome,
        }
    }

    pub fn dropdown(&self, focus: Focus) -> Option<&SuggestionDropdown> {
        match focus {
            Focus::Hitter => Some(&self.hitter),
            Focus::Pitcher => Some(&self.pitcher),
            _ => None,
        }
    }

    pub fn dropdown_mut(&mut self, focus: Focus) -> Option<&mut SuggestionDropdown> {
        match focus {
            Focus::Hitter => Some(&mut self.hitter),
            Focus::Pitcher => Some(&mut self.pitcher),
            _ => None,
        }
    }

    pub fn numeric(&self, focus: Focus) -> Option<&InputState> {
        match focus {
            Focus::MinExitSpeed => Some(&self.min_exit_speed),
            Focus::MaxExitSpeed => Some(&self.max_exit_speed),
            Focus::MinLaunchAngle => Some(&self.min_launch_angle),
            Focus::MaxLaunchAngle => Some(&self.max_launch_angle),
            _ => None,
        }
    }

    pub fn numeric_mut(&mut self, focus: Focus) -> Option<&mut InputState> {
        match focus {
            Focus::MinExitSpeed => Some(&mut self.min_exit_speed),
            Focus::MaxExitSpeed => Some(&mut self.max_exit_speed),
            Focus::MinLaunchAngle => Some(&mut self.min_launch_angle),
            Focus::MaxLaunchAngle => Some(&mut self.max_launch_angle),
            _ => None,
        }
    }

    /// Lets both name fields react to interactions published since last time.
    pub fn pump_interactions(&mut self) {
        self.hitter.pump_interactions();
        self.pitcher.pump_interactions();
    }
}
