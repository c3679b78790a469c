//! Card play tests.
//!
//! These tests drive `GameState::next` with `PLAY_CARD` and
//! `VISIT_DESTINATION_CARD` inputs:
//! - Paying from the hand and the meadow
//! - Modifier cards (associated constructions, Innkeeper, Crane)
//! - City limits and unique cards
//! - Multi-step card effects

use im::Vector;

use everdell_engine::core::{
    Choice, EntityRef, GameConfig, GameInput, GameState, PaymentOptions, PlayedCardRef, PlayerId,
    ResourceType, Resources,
};
use everdell_engine::{CardName, GameError};

fn setup() -> GameState {
    GameState::new(GameConfig::new(2).with_seed(21).without_starting_hands())
}

fn head(state: &GameState) -> GameInput {
    state.pending.head().cloned().expect("a pending decision")
}

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

// =============================================================================
// Paying for cards
// =============================================================================

/// Test playing a card from hand at its printed cost ends the turn.
#[test]
fn test_play_from_hand() {
    let mut state = setup();
    state.player_mut(P0).hand.push(CardName::Mine);
    state.player_mut(P0).resources = Resources::cost(1, 1, 1, 0);

    let next = state.next(&GameInput::play_card(CardName::Mine)).unwrap();

    let player = next.player(P0);
    assert!(player.has_card(CardName::Mine));
    assert!(player.hand.is_empty());
    // cost spent, one pebble produced on play
    assert_eq!(player.resources, Resources::of(ResourceType::Pebble, 1));
    // playing a card does not use a worker
    assert_eq!(player.available_workers(), 2);
    assert_eq!(next.active_player, P1);
}

/// Test playing from the meadow refills it.
#[test]
fn test_play_from_meadow_refills() {
    let mut state = setup();
    state.meadow = Vector::from(vec![
        CardName::Farm,
        CardName::Mine,
        CardName::Inn,
        CardName::Wife,
        CardName::Queen,
        CardName::Ruins,
        CardName::Bard,
        CardName::King,
    ]);
    state.player_mut(P0).resources = Resources::cost(2, 1, 0, 0);
    let deck_before = state.deck.len();

    let next = state.next(&GameInput::play_from_meadow(CardName::Farm)).unwrap();

    assert!(next.player(P0).has_card(CardName::Farm));
    assert_eq!(next.meadow.len(), 8);
    assert_eq!(next.deck.len(), deck_before - 1);
}

/// Test an unaffordable card is rejected without touching the state.
#[test]
fn test_cannot_afford() {
    let mut state = setup();
    state.player_mut(P0).hand.push(CardName::Castle);
    state.player_mut(P0).resources = Resources::cost(2, 3, 2, 0);

    let result = state.next(&GameInput::play_card(CardName::Castle));
    assert!(matches!(result, Err(GameError::IllegalAction(_))));
    assert_eq!(state.player(P0).hand.len(), 1);
}

/// Test a payment that differs from the cost needs a modifier card.
#[test]
fn test_partial_payment_rejected() {
    let mut state = setup();
    state.player_mut(P0).hand.push(CardName::Farm);
    state.player_mut(P0).resources = Resources::cost(5, 5, 5, 5);

    let cheap = GameInput::play_card_with(
        CardName::Farm,
        false,
        PaymentOptions::resources(Resources::cost(1, 1, 0, 0)),
    );
    assert!(matches!(state.next(&cheap), Err(GameError::IllegalAction(_))));
}

/// Test a critter enters free through its construction, once per construction.
#[test]
fn test_associated_construction_hosts_once() {
    let mut state = setup();
    state.player_mut(P0).add_to_city(CardName::Mine);
    state.player_mut(P0).hand.push(CardName::MinerMole);
    state.player_mut(P0).hand.push(CardName::MinerMole);

    let free = GameInput::play_card_with(
        CardName::MinerMole,
        false,
        PaymentOptions::using(CardName::Mine, Resources::new()),
    );
    let mut next = state.next(&free).unwrap();
    assert!(next.player(P0).has_card(CardName::MinerMole));
    assert!(next.player(P0).played_card(CardName::Mine).unwrap().occupied);

    next.active_player = P0;
    assert!(matches!(next.next(&free), Err(GameError::IllegalAction(_))));
}

/// Test the Innkeeper discounts a critter and leaves the city.
#[test]
fn test_innkeeper_discount() {
    let mut state = setup();
    state.player_mut(P0).add_to_city(CardName::Innkeeper);
    state.player_mut(P0).hand.push(CardName::King);
    state.player_mut(P0).resources = Resources::of(ResourceType::Berry, 3);

    let input = GameInput::play_card_with(
        CardName::King,
        false,
        PaymentOptions::using(CardName::Innkeeper, Resources::of(ResourceType::Berry, 3)),
    );
    let next = state.next(&input).unwrap();

    let player = next.player(P0);
    assert!(player.has_card(CardName::King));
    assert!(!player.has_card(CardName::Innkeeper));
    assert_eq!(player.resources.berry, 0);
    assert_eq!(next.discard.back(), Some(&CardName::Innkeeper));
}

/// Test the Crane discounts a construction by up to three.
#[test]
fn test_crane_discount() {
    let mut state = setup();
    state.player_mut(P0).add_to_city(CardName::Crane);
    state.player_mut(P0).hand.push(CardName::Castle);
    state.player_mut(P0).resources = Resources::cost(2, 3, 3, 0);

    let too_cheap = GameInput::play_card_with(
        CardName::Castle,
        false,
        PaymentOptions::using(CardName::Crane, Resources::cost(0, 2, 2, 0)),
    );
    assert!(state.next(&too_cheap).is_err());

    let input = GameInput::play_card_with(
        CardName::Castle,
        false,
        PaymentOptions::using(CardName::Crane, Resources::cost(0, 2, 3, 0)),
    );
    let next = state.next(&input).unwrap();
    let player = next.player(P0);
    assert!(player.has_card(CardName::Castle));
    assert!(!player.has_card(CardName::Crane));
    assert_eq!(player.resources, Resources::cost(2, 1, 0, 0));
}

// =============================================================================
// City rules
// =============================================================================

/// Test unique cards are limited to one per city.
#[test]
fn test_unique_card_once() {
    let mut state = setup();
    state.player_mut(P0).add_to_city(CardName::King);
    state.player_mut(P0).hand.push(CardName::King);
    state.player_mut(P0).resources = Resources::of(ResourceType::Berry, 6);

    let result = state.next(&GameInput::play_card(CardName::King));
    assert!(matches!(result, Err(GameError::IllegalAction(_))));
}

/// Test a full city only takes cards that need no space.
#[test]
fn test_full_city() {
    let mut state = setup();
    for _ in 0..15 {
        state.player_mut(P0).add_to_city(CardName::Farm);
    }
    state.player_mut(P0).hand.push(CardName::Mine);
    state.player_mut(P0).hand.push(CardName::Wanderer);
    state.player_mut(P0).resources = Resources::cost(1, 1, 1, 2);

    assert!(state.next(&GameInput::play_card(CardName::Mine)).is_err());
    let next = state.next(&GameInput::play_card(CardName::Wanderer)).unwrap();
    assert!(next.player(P0).has_card(CardName::Wanderer));
    assert_eq!(next.player(P0).city_occupancy(), 15);
}

// =============================================================================
// Chained card effects
// =============================================================================

/// Test the Fool goes to the chosen opponent's city.
#[test]
fn test_fool_joins_opponent() {
    let mut state = setup();
    state.player_mut(P0).hand.push(CardName::Fool);
    state.player_mut(P0).resources = Resources::of(ResourceType::Berry, 3);

    let next = state.next(&GameInput::play_card(CardName::Fool)).unwrap();
    assert_eq!(next.active_player, P0);
    let next = next.next(&head(&next).with_player(P1)).unwrap();

    assert!(!next.player(P0).has_card(CardName::Fool));
    assert!(next.player(P1).has_card(CardName::Fool));
    assert_eq!(everdell_engine::points(&next, P1), -2);
    assert_eq!(next.active_player, P1);
}

/// Test the Doctor turns berries into points when it enters play.
#[test]
fn test_doctor_pays_for_points() {
    let mut state = setup();
    state.player_mut(P0).hand.push(CardName::Doctor);
    state.player_mut(P0).resources = Resources::of(ResourceType::Berry, 6);

    let next = state.next(&GameInput::play_card(CardName::Doctor)).unwrap();
    match next.pending.head() {
        Some(GameInput::SelectResources(s)) => {
            assert!(s.to_spend);
            assert_eq!(s.max_resources, 2);
        }
        other => panic!("unexpected decision {:?}", other),
    }
    let next = next
        .next(&head(&next).with_resources(Resources::of(ResourceType::Berry, 2)))
        .unwrap();

    assert_eq!(next.player(P0).resources.berry, 0);
    assert_eq!(next.player(P0).resources.vp, 2);
}

/// Test the Ruins replace a construction and refund its cost.
#[test]
fn test_ruins_refund() {
    let mut state = setup();
    state.player_mut(P0).add_to_city(CardName::Mine);
    state.player_mut(P0).hand.push(CardName::Ruins);

    let next = state.next(&GameInput::play_card(CardName::Ruins)).unwrap();
    let pick = PlayedCardRef {
        owner: P0,
        card: CardName::Mine,
    };
    let next = next.next(&head(&next).with_played_cards(vec![pick])).unwrap();

    let player = next.player(P0);
    assert!(player.has_card(CardName::Ruins));
    assert!(!player.has_card(CardName::Mine));
    assert_eq!(player.resources, Resources::cost(1, 1, 1, 0));
    assert_eq!(player.hand.len(), 2);
}

/// Test the Courthouse asks for a resource after a construction is played.
#[test]
fn test_courthouse_reacts() {
    let mut state = setup();
    state.player_mut(P0).add_to_city(CardName::Courthouse);
    state.player_mut(P0).hand.push(CardName::TwigBarge);
    state.player_mut(P0).resources = Resources::cost(1, 0, 1, 0);

    let next = state.next(&GameInput::play_card(CardName::TwigBarge)).unwrap();
    let decision = head(&next);
    assert_eq!(
        decision.context().map(|c| c.source),
        Some(EntityRef::Card {
            card: CardName::Courthouse
        })
    );
    let next = next
        .next(&decision.with_choice(Choice::Resource(ResourceType::Resin)))
        .unwrap();
    assert_eq!(next.player(P0).resources, Resources::cost(2, 1, 0, 0));
}

// =============================================================================
// Destinations
// =============================================================================

/// Test visiting an opponent's Post Office: give two cards, discard, refill.
#[test]
fn test_post_office_chain() {
    let mut state = setup();
    state.player_mut(P0).add_to_city(CardName::PostOffice);
    state.active_player = P1;
    state
        .player_mut(P1)
        .hand
        .extend([CardName::Farm, CardName::Mine, CardName::Wife]);

    let next = state
        .next(&GameInput::visit_destination(CardName::PostOffice, P0))
        .unwrap();
    assert_eq!(next.player(P0).resources.vp, 1);

    let next = next.next(&head(&next).with_player(P0)).unwrap();
    let next = next
        .next(&head(&next).with_cards(vec![CardName::Farm, CardName::Mine]))
        .unwrap();
    assert_eq!(next.player(P0).hand.len(), 2);

    let next = next.next(&head(&next).with_cards(vec![CardName::Wife])).unwrap();
    assert_eq!(next.player(P1).hand.len(), 8);
    assert!(next.pending.is_empty());
    assert_eq!(next.active_player, P0);
    assert_eq!(next.history.len(), 4);
}

/// Test a closed destination only admits its owner.
#[test]
fn test_closed_destination() {
    let mut state = setup();
    state.player_mut(P1).add_to_city(CardName::Lookout);

    let input = GameInput::visit_destination(CardName::Lookout, P1);
    assert!(matches!(state.next(&input), Err(GameError::IllegalAction(_))));
}

/// Test the Lookout copies a basic location.
#[test]
fn test_lookout_copies_location() {
    let mut state = setup();
    state.player_mut(P0).add_to_city(CardName::Lookout);

    let next = state
        .next(&GameInput::visit_destination(CardName::Lookout, P0))
        .unwrap();
    let next = next
        .next(&head(&next).with_location(everdell_engine::LocationName::BasicThreeTwigs))
        .unwrap();

    assert_eq!(next.player(P0).resources.twig, 3);
    // the copied location stays free
    assert!(next.locations[&everdell_engine::LocationName::BasicThreeTwigs].is_empty());
    assert_eq!(next.player(P0).available_workers(), 1);
}
