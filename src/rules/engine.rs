//! Rule-entity trait and game results.
//!
//! Every registry (cards, locations, events, adornments) implements
//! `RuleEntity` so the transition function can route an input to the
//! entity it names:
//! - `check`: is this top-level input legal for the active player
//! - `play`: apply it, possibly pushing follow-up decisions
//! - `resolve`: apply an answer to a decision this entity pushed
//!
//! `play` assumes `check` passed. Both run against a scratch copy of the
//! state, so an error half way through never reaches the caller.

use std::fmt;

use crate::core::input::GameInput;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::error::Result;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Tied on points and on every tie-breaker.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }
}

/// An entity whose rules the transition function dispatches to.
///
/// All methods act for `state.active_player`.
pub trait RuleEntity: Copy + fmt::Display {
    /// Legality of a top-level input naming this entity.
    fn check(self, state: &GameState, input: &GameInput) -> Result<()>;

    #[must_use]
    fn can_play(self, state: &GameState, input: &GameInput) -> bool {
        self.check(state, input).is_ok()
    }

    /// Apply a top-level input that passed `check`.
    fn play(self, state: &mut GameState, input: &GameInput) -> Result<()>;

    /// Apply an answer to a decision this entity pushed.
    fn resolve(self, state: &mut GameState, input: &GameInput) -> Result<()>;
}
