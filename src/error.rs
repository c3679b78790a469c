//! Error types for the rules engine.
//!
//! Every rejected transition is reported as a `GameError`. The caller's
//! state is never touched on the failure path: transitions work on a clone
//! and drop it on error.

use thiserror::Error;

/// A recoverable rejection of a submitted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The input does not have the shape the engine expects right now: it
    /// does not match the head of the pending-decision queue, it answers a
    /// decision that does not exist, or its selection is out of bounds.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The input is well formed but the rules forbid it: missing resources,
    /// requirement not met, target occupied, or not the active player.
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    /// The game has reached its terminal phase.
    #[error("Game is over")]
    GameOver,
}

impl GameError {
    /// Build an `InvalidInput` error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        GameError::InvalidInput(msg.into())
    }

    /// Build an `IllegalAction` error.
    pub fn illegal(msg: impl Into<String>) -> Self {
        GameError::IllegalAction(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

/// Return early with `IllegalAction` unless `cond` holds.
macro_rules! ensure_legal {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::GameError::illegal(format!($($arg)+)));
        }
    };
}

/// Return early with `InvalidInput` unless `cond` holds.
macro_rules! ensure_valid {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::GameError::invalid(format!($($arg)+)));
        }
    };
}

pub(crate) use ensure_legal;
pub(crate) use ensure_valid;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GameError::invalid("wrong kind").to_string(),
            "Invalid input: wrong kind"
        );
        assert_eq!(
            GameError::illegal("no workers").to_string(),
            "Illegal action: no workers"
        );
        assert_eq!(GameError::GameOver.to_string(), "Game is over");
    }

    fn check(value: u32) -> Result<u32> {
        ensure_legal!(value > 0, "value must be positive, got {}", value);
        ensure_valid!(value < 10, "value too large: {}", value);
        Ok(value)
    }

    #[test]
    fn test_ensure_macros() {
        assert_eq!(check(3), Ok(3));
        assert!(matches!(check(0), Err(GameError::IllegalAction(_))));
        assert!(matches!(check(12), Err(GameError::InvalidInput(_))));
    }
}
