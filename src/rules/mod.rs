//! Game rules.
//!
//! `GameState::next` is the single entry point that changes a game. It
//! routes each input to the entity it names (a card, location, event or
//! adornment) through the [`RuleEntity`] trait, then hands the turn on.
//!
//! - `transition`: `next` / `next_for` and turn passing
//! - `available`: `available_inputs`, the legal moves of a player
//! - `season`: preparing for a season and passing at the end
//! - `scoring`: [`points`], `final_scores` and `result`

pub mod engine;
mod available;
mod scoring;
mod season;
mod transition;

pub use engine::{GameResult, RuleEntity};
pub use scoring::points;
