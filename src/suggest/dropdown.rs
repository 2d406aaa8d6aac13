//! Per-field suggestion dropdown.
//!
//! A [`SuggestionDropdown`] owns the text of one name field, the suggestions
//! shown under it, and whether that list is visible. Each field has its own
//! instance, so two fields never share open/closed state.

use super::field::InputState;
use super::index::NameIndex;
use super::interaction::{InteractionHub, InteractionSubscription, InteractionTarget, SubscriptionId};
use tracing::debug;

/// Visibility of the suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

impl DropdownState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }
}

/// A screen rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the cell at (`column`, `row`) lies inside.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && u32::from(column) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }

    /// Smallest region covering both `self` and `other`.
    pub fn union(&self, other: &Region) -> Region {
        if self.width == 0 || self.height == 0 {
            return *other;
        }
        if other.width == 0 || other.height == 0 {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (u32::from(self.x) + u32::from(self.width))
            .max(u32::from(other.x) + u32::from(other.width));
        let bottom = (u32::from(self.y) + u32::from(self.height))
            .max(u32::from(other.y) + u32::from(other.height));
        Region {
            x,
            y,
            width: u16::try_from(right - u32::from(x)).unwrap_or(u16::MAX),
            height: u16::try_from(bottom - u32::from(y)).unwrap_or(u16::MAX),
        }
    }
}

/// A name input with a case-insensitive prefix suggestion list.
#[derive(Debug)]
pub struct SuggestionDropdown {
    input: InputState,
    state: DropdownState,
    suggestions: Vec<String>,
    highlighted: Option<usize>,
    region: Region,
    index: NameIndex,
    subscription: InteractionSubscription,
}

impl SuggestionDropdown {
    /// Mounts a field: registers with `hub` and starts Closed and empty.
    pub fn new(index: NameIndex, hub: &InteractionHub) -> Self {
        Self {
            input: InputState::new(),
            state: DropdownState::Closed,
            suggestions: Vec::new(),
            highlighted: None,
            region: Region::default(),
            index,
            subscription: hub.subscribe(),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.subscription.id()
    }

    pub fn text(&self) -> &str {
        &self.input.text
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn state(&self) -> DropdownState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DropdownState::Open
    }

    /// Current suggestions, whether or not the list is visible.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Suggestions to draw: empty while Closed.
    pub fn visible_suggestions(&self) -> &[String] {
        match self.state {
            DropdownState::Open => &self.suggestions,
            DropdownState::Closed => &[],
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Records where the field and its popup were drawn.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Swaps in a different name index and recomputes suggestions.
    pub fn set_index(&mut self, index: NameIndex) {
        self.index = index;
        self.recompute();
    }

    /// Closed --focus--> Open. Focusing an open field just refreshes it.
    pub fn focus(&mut self) {
        if self.state == DropdownState::Closed {
            debug!(id = ?self.id(), "Dropdown opened");
        }
        self.state = DropdownState::Open;
        self.recompute();
    }

    /// Closes the list without touching the text.
    pub fn close(&mut self) {
        if self.state == DropdownState::Open {
            debug!(id = ?self.id(), "Dropdown closed");
        }
        self.state = DropdownState::Closed;
        self.highlighted = None;
    }

    /// Commits `name` as the field value and closes the list.
    pub fn select(&mut self, name: &str) {
        self.input.set_text(name);
        self.recompute();
        self.close();
    }

    /// Commits the highlighted suggestion. Returns false if none is highlighted
    /// or the list is closed.
    pub fn select_highlighted(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        match self.highlighted.and_then(|i| self.suggestions.get(i)).cloned() {
            Some(name) => {
                self.select(&name);
                true
            }
            None => false,
        }
    }

    /// Commits the suggestion at `position` in the visible list.
    pub fn select_at(&mut self, position: usize) -> bool {
        match self.visible_suggestions().get(position).cloned() {
            Some(name) => {
                self.select(&name);
                true
            }
            None => false,
        }
    }

    /// Moves the highlight down, stopping at the last suggestion.
    pub fn highlight_next(&mut self) {
        if !self.is_open() || self.suggestions.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(self.suggestions.len() - 1),
        });
    }

    /// Moves the highlight up. Moving above the first clears it.
    pub fn highlight_previous(&mut self) {
        if !self.is_open() {
            return;
        }
        self.highlighted = match self.highlighted {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn insert(&mut self, c: char) {
        self.input.insert(c);
        self.text_changed();
    }

    pub fn backspace(&mut self) {
        self.input.backspace();
        self.text_changed();
    }

    pub fn delete(&mut self) {
        self.input.delete();
        self.text_changed();
    }

    /// Replaces the text as if typed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.set_text(text);
        self.text_changed();
    }

    pub fn move_left(&mut self) {
        self.input.move_left();
    }

    pub fn move_right(&mut self) {
        self.input.move_right();
    }

    pub fn move_home(&mut self) {
        self.input.move_home();
    }

    pub fn move_end(&mut self) {
        self.input.move_end();
    }

    /// Clears the text and closes the list.
    pub fn clear(&mut self) {
        self.input.take();
        self.suggestions.clear();
        self.close();
    }

    // Typing into a closed field that still has focus re-engages it.
    fn text_changed(&mut self) {
        if self.state == DropdownState::Closed {
            self.focus();
        } else {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.suggestions = self.index.suggest(&self.input.text);
        self.highlighted = None;
    }

    /// Returns true if `target` lands on this field or its popup.
    pub fn is_inside(&self, target: InteractionTarget) -> bool {
        match target {
            InteractionTarget::Point { column, row } => self.region.contains(column, row),
            InteractionTarget::Subscriber(id) => id == self.id(),
            InteractionTarget::Elsewhere => false,
        }
    }

    /// Applies one interaction: Open --outside--> Closed.
    pub fn handle(&mut self, target: InteractionTarget) {
        if self.is_open() && !self.is_inside(target) {
            self.close();
        }
    }

    /// Handles every interaction published since the last pump.
    pub fn pump_interactions(&mut self) {
        for target in self.subscription.drain() {
            self.handle(target);
        }
    }
}
