//! # everdell-engine
//!
//! A deterministic rules engine for Everdell, with the Pearlbrook
//! adornments.
//!
//! The engine owns no I/O. A caller builds a [`GameState`] from a
//! [`GameConfig`], feeds it one [`GameInput`] at a time through
//! [`GameState::next`], and stores whatever it likes of the result.
//!
//! ## Design Principles
//!
//! 1. **Immutable transitions**: `next` works on a clone and returns the new
//!    state. A rejected input never touches the caller's copy. Collections
//!    shared between turns are persistent (`im`), so the clone is cheap.
//!
//! 2. **Serializable mid-turn**: multi-step effects park their progress in
//!    the pending-decision queue as plain data, so a state can be saved and
//!    resumed between any two inputs.
//!
//! 3. **Reproducible**: all shuffling and drawing goes through the seeded
//!    [`GameRng`] stored in the state.
//!
//! ## Modules
//!
//! - `core`: resources, players, RNG, configuration, inputs, state
//! - `cards`: the card registry, payment rules and card effects
//! - `locations`: basic, forest, haven and journey locations
//! - `events`: basic and special events
//! - `adornments`: Pearlbrook adornments
//! - `stack`: the pending-decision queue
//! - `rules`: the transition function, available inputs, seasons, scoring

pub mod core;
pub mod cards;
pub mod locations;
pub mod events;
pub mod adornments;
pub mod stack;
pub mod rules;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameInput, GamePhase, GameState, InputKind, Player, PlayerId, PlayerMap,
    ResourceType, Resources, Season,
    GameRng, GameRngState,
};

pub use crate::cards::{CardName, CardType};
pub use crate::locations::LocationName;
pub use crate::events::EventName;
pub use crate::adornments::AdornmentName;
pub use crate::stack::PendingQueue;
pub use crate::rules::{points, GameResult, RuleEntity};
pub use crate::error::{GameError, Result};
