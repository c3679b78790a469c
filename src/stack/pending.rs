//! Pending-decision queue.
//!
//! Decisions resolve head first. Decisions pushed while one input is being
//! applied are promoted ahead of older ones in the order they were pushed,
//! so a chain started by an effect finishes before anything queued earlier.

use serde::{Deserialize, Serialize};

use crate::core::input::GameInput;
use crate::error::{ensure_valid, GameError, Result};

/// Ordered queue of outstanding follow-up decisions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingQueue {
    entries: Vec<GameInput>,
}

/// Position in the queue before an input was applied. See [`PendingQueue::mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueMark(usize);

impl PendingQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The decision that must be answered next.
    #[must_use]
    pub fn head(&self) -> Option<&GameInput> {
        self.entries.first()
    }

    /// All decisions, head first.
    #[must_use]
    pub fn entries(&self) -> &[GameInput] {
        &self.entries
    }

    /// Queue a decision template. Answer slots are cleared.
    pub fn push(&mut self, decision: GameInput) {
        debug_assert!(decision.is_follow_up(), "only follow-up inputs can be pending");
        self.entries.push(decision.template());
    }

    /// Remember the current length before applying an input.
    #[must_use]
    pub fn mark(&self) -> QueueMark {
        QueueMark(self.entries.len())
    }

    /// Move everything pushed since `mark` to the front, keeping push order.
    pub fn promote_since(&mut self, mark: QueueMark) {
        let pushed = self.entries.len().saturating_sub(mark.0);
        if pushed > 0 && pushed < self.entries.len() {
            self.entries.rotate_right(pushed);
        }
    }

    /// Check `answer` against the head and remove the head.
    ///
    /// Fails with `InvalidInput` when nothing is pending, the answer does
    /// not match the head, or the selection breaks the head's bounds.
    pub fn accept(&mut self, answer: &GameInput) -> Result<()> {
        let head = self
            .head()
            .ok_or_else(|| GameError::invalid(format!("no pending decision for {}", answer)))?;
        ensure_valid!(
            answer.answers(head),
            "{} does not match pending {}",
            answer,
            head
        );
        validate_selection(answer)?;
        self.entries.remove(0);
        Ok(())
    }
}

/// Is every element of `picked` drawn from `options`, respecting multiplicity?
fn is_sub_multiset<T: PartialEq>(picked: &[T], options: &[T]) -> bool {
    picked.iter().all(|item| {
        picked.iter().filter(|&other| other == item).count()
            <= options.iter().filter(|&other| other == item).count()
    })
}

/// Shape checks on an answer: counts within bounds, picks drawn from the options.
pub fn validate_selection(answer: &GameInput) -> Result<()> {
    match answer {
        GameInput::SelectCards(s) => {
            let n = s.client_options.len();
            ensure_valid!(
                n >= s.min_to_select && n <= s.max_to_select,
                "selected {} cards, expected {}..={}",
                n,
                s.min_to_select,
                s.max_to_select
            );
            ensure_valid!(
                is_sub_multiset(&s.client_options, &s.card_options),
                "selected cards are not among the options"
            );
        }
        GameInput::SelectPlayedCards(s) => {
            let n = s.client_options.len();
            ensure_valid!(
                n >= s.min_to_select && n <= s.max_to_select,
                "selected {} played cards, expected {}..={}",
                n,
                s.min_to_select,
                s.max_to_select
            );
            ensure_valid!(
                is_sub_multiset(&s.client_options, &s.card_options),
                "selected played cards are not among the options"
            );
        }
        GameInput::SelectResources(s) => {
            let total = s.client_options.total();
            ensure_valid!(
                total >= s.min_resources && total <= s.max_resources,
                "selected {} resources, expected {}..={}",
                total,
                s.min_resources,
                s.max_resources
            );
            match &s.limits {
                Some(limits) => ensure_valid!(
                    s.client_options.fits_within(limits),
                    "selected resources exceed the allowed kinds"
                ),
                None => ensure_valid!(
                    s.client_options.is_basic_only(),
                    "only BERRY, TWIG, RESIN or PEBBLE may be selected"
                ),
            }
        }
        GameInput::SelectOption(s) => match &s.client_options {
            Some(choice) => ensure_valid!(s.options.contains(choice), "option not offered"),
            None => return Err(GameError::invalid("no option selected")),
        },
        GameInput::SelectLocation(s) => match &s.client_options {
            Some(location) => ensure_valid!(
                s.location_options.contains(location),
                "location {} not offered",
                location
            ),
            None => return Err(GameError::invalid("no location selected")),
        },
        GameInput::SelectPlayer(s) => match &s.client_options {
            Some(player) => ensure_valid!(
                s.player_options.contains(player),
                "{} not offered",
                player
            ),
            None => return Err(GameError::invalid("no player selected")),
        },
        other => {
            return Err(GameError::invalid(format!(
                "{} does not answer a decision",
                other.kind()
            )))
        }
    }
    Ok(())
}
