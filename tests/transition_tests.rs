//! Transition tests.
//!
//! These tests exercise `GameState::next` as a whole:
//! - Turn order, skipping passed players and game over
//! - Matching answers against the pending-decision queue
//! - Available inputs agreeing with `next`
//! - History and determinism

use everdell_engine::core::{
    GameConfig, GameInput, GamePhase, GameState, InputKind, PlayerId, PlayerStatus, Season,
};
use everdell_engine::{GameError, GameResult, LocationName};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const P2: PlayerId = PlayerId::new(2);

fn setup(players: usize) -> GameState {
    GameState::new(GameConfig::new(players).with_seed(64).without_starting_hands())
}

fn head(state: &GameState) -> GameInput {
    state.pending.head().cloned().expect("a pending decision")
}

fn autumn_without_workers(state: &mut GameState, player: PlayerId) {
    let p = state.player_mut(player);
    p.season = Season::Autumn;
    p.num_workers = 0;
}

// =============================================================================
// Turn order
// =============================================================================

/// Test turns rotate through the table and record history.
#[test]
fn test_turn_rotation() {
    let state = setup(3);
    let input = GameInput::place_worker(LocationName::BasicTwoCardsOnePoint);

    let s1 = state.next(&input).unwrap();
    let s2 = s1.next(&input).unwrap();
    let s3 = s2.next(&input).unwrap();

    assert_eq!(s1.active_player, P1);
    assert_eq!(s2.active_player, P2);
    assert_eq!(s3.active_player, P0);
    assert_eq!(s3.turn_number, 4);
    let players: Vec<PlayerId> = s3.history.iter().map(|r| r.player).collect();
    assert_eq!(players, vec![P0, P1, P2]);
}

/// Test players who passed are skipped.
#[test]
fn test_passed_players_are_skipped() {
    let mut state = setup(3);
    state.player_mut(P1).status = PlayerStatus::GameEnded;

    let next = state
        .next(&GameInput::place_worker(LocationName::BasicOneBerry))
        .unwrap();
    assert_eq!(next.active_player, P2);
}

/// Test the game ends once every player has passed.
#[test]
fn test_game_over_after_everyone_passes() {
    let mut state = setup(2);
    autumn_without_workers(&mut state, P0);
    autumn_without_workers(&mut state, P1);

    let next = state.next(&GameInput::GameEnd).unwrap();
    assert!(next.player(P0).has_passed());
    assert_eq!(next.active_player, P1);
    assert!(next.result().is_none());

    let done = next.next(&GameInput::GameEnd).unwrap();
    assert_eq!(done.phase, GamePhase::GameOver);
    assert!(done.available_inputs(P0).is_empty());
    assert!(done.available_inputs(P1).is_empty());
    assert_eq!(
        done.next(&GameInput::place_worker(LocationName::BasicOneBerry)),
        Err(GameError::GameOver)
    );
    assert_eq!(done.result(), Some(GameResult::Winners(vec![P0, P1])));
}

/// Test a passed player is never active again while others play on.
#[test]
fn test_remaining_player_keeps_playing() {
    let mut state = setup(2);
    autumn_without_workers(&mut state, P0);

    let next = state.next(&GameInput::GameEnd).unwrap();
    let next = next
        .next(&GameInput::place_worker(LocationName::BasicOneBerry))
        .unwrap();
    assert_eq!(next.active_player, P1);
    assert_eq!(next.phase, GamePhase::InProgress);
}

/// Test passing is only allowed in autumn.
#[test]
fn test_game_end_requires_autumn() {
    let mut state = setup(2);
    state.player_mut(P0).num_workers = 0;
    assert!(matches!(
        state.next(&GameInput::GameEnd),
        Err(GameError::IllegalAction(_))
    ));
}

// =============================================================================
// Pending decisions
// =============================================================================

/// Test a top-level input is rejected while a decision is pending.
#[test]
fn test_top_level_rejected_while_pending() {
    let mut state = setup(2);
    state.locations.insert(LocationName::ForestTwoAny, Vec::new());
    let next = state
        .next(&GameInput::place_worker(LocationName::ForestTwoAny))
        .unwrap();

    let result = next.next(&GameInput::place_worker(LocationName::BasicOneBerry));
    assert!(matches!(result, Err(GameError::InvalidInput(_))));
    assert_eq!(next.pending.len(), 1);
}

/// Test an answer for a different decision is rejected.
#[test]
fn test_mismatched_answer() {
    let mut state = setup(2);
    state.locations.insert(LocationName::ForestTwoAny, Vec::new());
    let next = state
        .next(&GameInput::place_worker(LocationName::ForestTwoAny))
        .unwrap();

    let mut wrong = head(&next);
    if let GameInput::SelectResources(s) = &mut wrong {
        s.max_resources = 5;
        s.client_options.berry = 5;
    }
    assert!(matches!(next.next(&wrong), Err(GameError::InvalidInput(_))));
}

/// Test `next_for` rejects the waiting player.
#[test]
fn test_next_for_rejects_waiting_player() {
    let state = setup(2);
    let input = GameInput::place_worker(LocationName::BasicOneBerry);
    assert!(matches!(
        state.next_for(P1, &input),
        Err(GameError::IllegalAction(_))
    ));
    let next = state.next_for(P0, &input).unwrap();
    assert_eq!(next.history.back().map(|r| r.player), Some(P0));
}

// =============================================================================
// Available inputs
// =============================================================================

/// Test every listed input is accepted by `next`.
#[test]
fn test_available_inputs_are_accepted() {
    let state = GameState::new(GameConfig::new(3).with_seed(65));
    let inputs = state.available_inputs(P0);
    assert!(!inputs.is_empty());
    for input in &inputs {
        assert!(state.next(input).is_ok(), "{} was listed but rejected", input);
    }
}

/// Test listed inputs are grouped by kind in the fixed order.
#[test]
fn test_available_inputs_order() {
    let state = GameState::new(GameConfig::new(2).with_seed(66));
    let kinds: Vec<InputKind> = state
        .available_inputs(P0)
        .iter()
        .map(GameInput::kind)
        .collect();
    let ranks: Vec<u8> = kinds.iter().map(|k| k.sort_rank()).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);
    assert!(kinds.contains(&InputKind::PlaceWorker));
}

// =============================================================================
// Determinism
// =============================================================================

/// Test equal seeds and inputs give equal states.
#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut state = GameState::new(GameConfig::new(2).with_seed(seed));
        for location in [
            LocationName::BasicTwoCardsOnePoint,
            LocationName::BasicOneBerryOneCard,
            LocationName::BasicTwoTwigsOneCard,
        ] {
            state = state.next(&GameInput::place_worker(location)).unwrap();
        }
        state
    };
    assert_eq!(play(7), play(7));
    assert_ne!(play(7).player(P0).hand, play(8).player(P0).hand);
}
