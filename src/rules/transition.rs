//! The transition function.
//!
//! `GameState::next` applies one input for the active player:
//!
//! 1. A finished game rejects everything with `GameOver`.
//! 2. With a decision pending, the input must answer the head of the
//!    queue. The answer is routed to the entity that pushed the decision.
//! 3. Otherwise the input must be top-level. The named entity checks it
//!    and then plays it.
//! 4. Decisions pushed while applying the input jump ahead of older ones,
//!    in push order.
//! 5. Once the queue is empty the turn passes to the next player still
//!    playing. If there is none, the game is over.
//!
//! All of this runs on a clone, so a rejected input leaves the caller's
//! state untouched.

use tracing::{debug, info};

use super::engine::RuleEntity;
use super::season;
use crate::core::input::{EntityRef, GameInput, InputRecord};
use crate::core::player::PlayerId;
use crate::core::state::{GamePhase, GameState};
use crate::error::{ensure_legal, ensure_valid, GameError, Result};

fn apply<E: RuleEntity>(entity: E, state: &mut GameState, input: &GameInput) -> Result<()> {
    entity.check(state, input)?;
    entity.play(state, input)
}

/// Legality of a top-level input for the active player, without applying it.
pub(crate) fn check_top_level(state: &GameState, input: &GameInput) -> Result<()> {
    match input {
        GameInput::PlaceWorker { location } => location.check(state, input),
        GameInput::PlayCard { card, .. } | GameInput::VisitDestinationCard { card, .. } => {
            card.check(state, input)
        }
        GameInput::ClaimEvent { event } => event.check(state, input),
        GameInput::PlayAdornment { adornment } => adornment.check(state, input),
        GameInput::PrepareForSeason => season::check_prepare(state),
        GameInput::GameEnd => season::check_game_end(state),
        other => Err(GameError::invalid(format!("{} answers no pending decision", other))),
    }
}

fn apply_top_level(state: &mut GameState, input: &GameInput) -> Result<()> {
    match input {
        GameInput::PlaceWorker { location } => apply(*location, state, input),
        GameInput::PlayCard { card, .. } | GameInput::VisitDestinationCard { card, .. } => {
            apply(*card, state, input)
        }
        GameInput::ClaimEvent { event } => apply(*event, state, input),
        GameInput::PlayAdornment { adornment } => apply(*adornment, state, input),
        GameInput::PrepareForSeason => {
            season::check_prepare(state)?;
            season::prepare_for_season(state)
        }
        GameInput::GameEnd => {
            season::check_game_end(state)?;
            season::end_game(state);
            Ok(())
        }
        other => Err(GameError::invalid(format!("{} answers no pending decision", other))),
    }
}

fn resolve_follow_up(state: &mut GameState, input: &GameInput) -> Result<()> {
    if let GameInput::SelectResources(s) = input {
        if s.to_spend {
            ensure_legal!(
                state.active().resources.can_afford(&s.client_options),
                "{} cannot afford the selected resources",
                state.active_player
            );
        }
    }
    let context = input
        .context()
        .ok_or_else(|| GameError::invalid(format!("{} is not a follow-up", input)))?;
    match context.source {
        EntityRef::Card { card } => card.resolve(state, input),
        EntityRef::Location { location } => location.resolve(state, input),
        EntityRef::Event { event } => event.resolve(state, input),
        EntityRef::Adornment { adornment } => adornment.resolve(state, input),
        EntityRef::Season => season::resolve(state, input),
    }
}

fn end_turn(state: &mut GameState) {
    state.turn_number += 1;
    match state.next_playing_after(state.active_player) {
        Some(next) => state.active_player = next,
        None => {
            state.phase = GamePhase::GameOver;
            info!(turn = state.turn_number, "game over");
        }
    }
}

impl GameState {
    /// Apply `input` for the active player and return the new state.
    ///
    /// ```
    /// use everdell_engine::core::{GameConfig, GameInput, GameState};
    /// use everdell_engine::locations::LocationName;
    ///
    /// let state = GameState::new(GameConfig::new(2).with_seed(1));
    /// let next = state.next(&GameInput::place_worker(LocationName::BasicOneBerry)).unwrap();
    ///
    /// assert_eq!(next.turn_number, 2);
    /// assert_eq!(next.player(state.active_player).resources.berry, 1);
    /// // the original is untouched
    /// assert_eq!(state.turn_number, 1);
    /// ```
    pub fn next(&self, input: &GameInput) -> Result<GameState> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        let mut state = self.clone();
        let player = state.active_player;

        if state.pending.is_empty() {
            ensure_valid!(!input.is_follow_up(), "{} answers no pending decision", input);
            apply_top_level(&mut state, input)?;
        } else {
            state.pending.accept(input)?;
            let mark = state.pending.mark();
            resolve_follow_up(&mut state, input)?;
            state.pending.promote_since(mark);
        }

        debug!(%player, %input, pending = state.pending.len(), "input accepted");
        state.history.push_back(InputRecord {
            player,
            input: input.clone(),
            turn: state.turn_number,
        });

        if state.pending.is_empty() {
            debug_assert!(
                state
                    .players
                    .iter()
                    .all(|(_, p)| p.city_occupancy() <= state.config.city_limit),
                "a city ended the turn over the limit"
            );
            end_turn(&mut state);
        }
        Ok(state)
    }

    /// Like [`next`](Self::next), but rejects callers other than the active player.
    pub fn next_for(&self, player: PlayerId, input: &GameInput) -> Result<GameState> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        ensure_legal!(
            player == self.active_player,
            "it is {}'s turn, not {}'s",
            self.active_player,
            player
        );
        self.next(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardName;
    use crate::core::input::PlayedCardRef;
    use crate::core::resources::Resources;
    use crate::core::GameConfig;
    use crate::locations::LocationName;

    fn setup() -> GameState {
        GameState::new(GameConfig::new(2).with_seed(5).without_starting_hands())
    }

    #[test]
    fn test_turn_passes_after_simple_action() {
        let state = setup();
        let next = state
            .next(&GameInput::place_worker(LocationName::BasicThreeTwigs))
            .unwrap();
        assert_eq!(next.active_player, PlayerId::new(1));
        assert_eq!(next.player(PlayerId::new(0)).resources.twig, 3);
        assert_eq!(next.history.len(), 1);
    }

    #[test]
    fn test_rejection_leaves_state_unchanged() {
        let state = setup();
        let err = state.next(&GameInput::play_card(CardName::Castle));
        assert!(matches!(err, Err(GameError::IllegalAction(_))));
        assert_eq!(state, setup());
    }

    #[test]
    fn test_follow_up_without_pending_is_invalid() {
        let state = setup();
        let stray = GameInput::select_one_any(crate::core::input::InputContext::new(
            crate::core::input::InputKind::PlaceWorker,
            LocationName::ForestTwoCardsOneAny,
        ));
        assert!(matches!(state.next(&stray), Err(GameError::InvalidInput(_))));
    }

    #[test]
    fn test_next_for_checks_turn() {
        let state = setup();
        let input = GameInput::place_worker(LocationName::BasicOneBerry);
        assert!(matches!(
            state.next_for(PlayerId::new(1), &input),
            Err(GameError::IllegalAction(_))
        ));
        assert!(state.next_for(PlayerId::new(0), &input).is_ok());
    }

    #[test]
    fn test_full_city_settles_before_turn_ends() {
        let mut state = setup();
        let p0 = PlayerId::new(0);
        for _ in 0..15 {
            state.player_mut(p0).add_to_city(CardName::Farm);
        }
        state.player_mut(p0).hand.push(CardName::Ruins);

        let next = state.next(&GameInput::play_card(CardName::Ruins)).unwrap();
        assert_eq!(next.player(p0).city_occupancy(), 16);
        assert_eq!(next.active_player, p0);

        let farm = PlayedCardRef {
            owner: p0,
            card: CardName::Farm,
        };
        let answer = next.pending.head().cloned().unwrap().with_played_cards(vec![farm]);
        let done = next.next(&answer).unwrap();
        assert_eq!(done.player(p0).city_occupancy(), 15);
        assert_eq!(done.player(p0).resources, Resources::cost(2, 1, 0, 0));
        assert_eq!(done.active_player, PlayerId::new(1));
    }

    #[test]
    fn test_game_over_rejects_everything() {
        let mut state = setup();
        state.phase = GamePhase::GameOver;
        assert_eq!(state.next(&GameInput::GameEnd), Err(GameError::GameOver));
    }
}
