//! Name suggestion engine.
//!
//! A sorted [`NameIndex`] is built once per roster. Each keystroke runs a
//! binary-search prefix query against it, and a [`SuggestionDropdown`] per
//! field keeps the resulting list open or closed. [`Debouncer`] rate-limits
//! the noisier UI callbacks.

pub mod debounce;
pub mod dropdown;
pub mod field;
pub mod index;
pub mod interaction;
pub mod query;

pub use debounce::Debouncer;
pub use dropdown::{DropdownState, Region, SuggestionDropdown};
pub use field::InputState;
pub use index::NameIndex;
pub use interaction::{InteractionHub, InteractionSubscription, InteractionTarget, SubscriptionId};
pub use query::{suggest, SUGGESTION_LIMIT};
