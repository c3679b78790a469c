//! Board locations.
//!
//! ## Kinds
//!
//! - **Basic**: always on the board. Those that hand out cards are shared;
//!   the rest take one worker.
//! - **Forest**: a random subset is revealed at setup. One worker, or two
//!   workers of different players at a table of four.
//! - **Haven**: shared; discard cards for resources.
//! - **Journey**: autumn only; discard cards for points.
//!
//! Activation is split from placement so that the Lookout, the Ranger,
//! the Hourglass and the copy-a-basic forest location can reuse a
//! location's effect without placing a worker on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::core::input::{Carried, Choice, GameInput, InputContext, InputKind};
use crate::core::player::{PlayerId, Season, WorkerPlacement};
use crate::core::resources::{ResourceType, Resources};
use crate::core::state::GameState;
use crate::error::{ensure_legal, GameError, Result};
use crate::rules::engine::RuleEntity;

/// Location family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationKind {
    Basic,
    Forest,
    Haven,
    Journey,
}

/// How many workers a location holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occupancy {
    Exclusive,
    Shared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationName {
    BasicOneBerry,
    BasicOneBerryOneCard,
    BasicOnePebble,
    BasicOneResinOneCard,
    BasicThreeTwigs,
    BasicTwoCardsOnePoint,
    BasicTwoResin,
    BasicTwoTwigsOneCard,
    ForestTwoBerryOneCard,
    ForestTwoAny,
    ForestOnePebbleThreeCard,
    ForestOneTwigOneResinOneBerry,
    ForestThreeBerry,
    ForestTwoResinOneTwig,
    ForestTwoCardsOneAny,
    ForestDiscardUpToThreeDrawTwoEach,
    ForestDiscardUpToThreeGainAnyEach,
    ForestCopyBasicOneCard,
    Haven,
    JourneyTwo,
    JourneyThree,
    JourneyFour,
    JourneyFive,
}

/// Static location data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationDefinition {
    pub location: LocationName,
    pub code: &'static str,
    pub kind: LocationKind,
    pub occupancy: Occupancy,
    /// Resources handed out on activation.
    pub gain: Resources,
    /// Cards drawn on activation.
    pub draw: usize,
}

const fn def(
    location: LocationName,
    code: &'static str,
    kind: LocationKind,
    occupancy: Occupancy,
    gain: Resources,
    draw: usize,
) -> LocationDefinition {
    LocationDefinition {
        location,
        code,
        kind,
        occupancy,
        gain,
        draw,
    }
}

const fn berries(n: u32) -> Resources {
    Resources::cost(0, 0, 0, n)
}

const NOTHING: Resources = Resources::new();

use LocationKind::{Basic, Forest, Haven as HavenKind, Journey};
use LocationName as L;
use Occupancy::{Exclusive, Shared};

#[rustfmt::skip]
static DEFINITIONS: [LocationDefinition; 23] = [
    def(L::BasicOneBerry, "BASIC_ONE_BERRY", Basic, Exclusive, berries(1), 0),
    def(L::BasicOneBerryOneCard, "BASIC_ONE_BERRY_ONE_CARD", Basic, Shared, berries(1), 1),
    def(L::BasicOnePebble, "BASIC_ONE_PEBBLE", Basic, Exclusive, Resources::cost(0, 0, 1, 0), 0),
    def(L::BasicOneResinOneCard, "BASIC_ONE_RESIN_ONE_CARD",
        Basic, Shared, Resources::cost(0, 1, 0, 0), 1),
    def(L::BasicThreeTwigs, "BASIC_THREE_TWIGS", Basic, Exclusive, Resources::cost(3, 0, 0, 0), 0),
    def(L::BasicTwoCardsOnePoint, "BASIC_TWO_CARDS_ONE_POINT", Basic, Shared, NOTHING, 2),
    def(L::BasicTwoResin, "BASIC_TWO_RESIN", Basic, Exclusive, Resources::cost(0, 2, 0, 0), 0),
    def(L::BasicTwoTwigsOneCard, "BASIC_TWO_TWIGS_ONE_CARD",
        Basic, Shared, Resources::cost(2, 0, 0, 0), 1),
    def(L::ForestTwoBerryOneCard, "FOREST_TWO_BERRY_ONE_CARD", Forest, Exclusive, berries(2), 1),
    def(L::ForestTwoAny, "FOREST_TWO_ANY", Forest, Exclusive, NOTHING, 0),
    def(L::ForestOnePebbleThreeCard, "FOREST_ONE_PEBBLE_THREE_CARD",
        Forest, Exclusive, Resources::cost(0, 0, 1, 0), 3),
    def(L::ForestOneTwigOneResinOneBerry, "FOREST_ONE_TWIG_ONE_RESIN_ONE_BERRY",
        Forest, Exclusive, Resources::cost(1, 1, 0, 1), 0),
    def(L::ForestThreeBerry, "FOREST_THREE_BERRY", Forest, Exclusive, berries(3), 0),
    def(L::ForestTwoResinOneTwig, "FOREST_TWO_RESIN_ONE_TWIG",
        Forest, Exclusive, Resources::cost(1, 2, 0, 0), 0),
    def(L::ForestTwoCardsOneAny, "FOREST_TWO_CARDS_ONE_ANY", Forest, Exclusive, NOTHING, 2),
    def(L::ForestDiscardUpToThreeDrawTwoEach, "FOREST_DISCARD_UP_TO_THREE_DRAW_TWO_EACH",
        Forest, Exclusive, NOTHING, 0),
    def(L::ForestDiscardUpToThreeGainAnyEach, "FOREST_DISCARD_UP_TO_THREE_GAIN_ANY_EACH",
        Forest, Exclusive, NOTHING, 0),
    def(L::ForestCopyBasicOneCard, "FOREST_COPY_BASIC_ONE_CARD", Forest, Exclusive, NOTHING, 1),
    def(L::Haven, "HAVEN", HavenKind, Shared, NOTHING, 0),
    def(L::JourneyTwo, "JOURNEY_TWO", Journey, Shared, NOTHING, 0),
    def(L::JourneyThree, "JOURNEY_THREE", Journey, Exclusive, NOTHING, 0),
    def(L::JourneyFour, "JOURNEY_FOUR", Journey, Exclusive, NOTHING, 0),
    def(L::JourneyFive, "JOURNEY_FIVE", Journey, Exclusive, NOTHING, 0),
];

impl LocationName {
    pub const ALL: [LocationName; 23] = [
        L::BasicOneBerry,
        L::BasicOneBerryOneCard,
        L::BasicOnePebble,
        L::BasicOneResinOneCard,
        L::BasicThreeTwigs,
        L::BasicTwoCardsOnePoint,
        L::BasicTwoResin,
        L::BasicTwoTwigsOneCard,
        L::ForestTwoBerryOneCard,
        L::ForestTwoAny,
        L::ForestOnePebbleThreeCard,
        L::ForestOneTwigOneResinOneBerry,
        L::ForestThreeBerry,
        L::ForestTwoResinOneTwig,
        L::ForestTwoCardsOneAny,
        L::ForestDiscardUpToThreeDrawTwoEach,
        L::ForestDiscardUpToThreeGainAnyEach,
        L::ForestCopyBasicOneCard,
        L::Haven,
        L::JourneyTwo,
        L::JourneyThree,
        L::JourneyFour,
        L::JourneyFive,
    ];

    #[must_use]
    pub fn definition(self) -> &'static LocationDefinition {
        &DEFINITIONS[self as usize]
    }

    /// Cards a journey asks the player to discard.
    #[must_use]
    pub fn journey_length(self) -> Option<usize> {
        match self {
            L::JourneyTwo => Some(2),
            L::JourneyThree => Some(3),
            L::JourneyFour => Some(4),
            L::JourneyFive => Some(5),
            _ => None,
        }
    }

    /// Would this location take a worker from `player` given its current occupants?
    #[must_use]
    pub fn has_room(self, occupants: &[PlayerId], player: PlayerId, player_count: usize) -> bool {
        let def = self.definition();
        match def.occupancy {
            Occupancy::Shared => true,
            Occupancy::Exclusive if def.kind == LocationKind::Forest && player_count >= 4 => {
                occupants.len() < 2 && !occupants.contains(&player)
            }
            Occupancy::Exclusive => occupants.is_empty(),
        }
    }

    /// Check that `player` may place a worker here.
    pub fn check_placement(self, state: &GameState, player: PlayerId) -> Result<()> {
        let p = state.player(player);
        ensure_legal!(p.available_workers() > 0, "{} has no free workers", player);
        let occupants = state
            .locations
            .get(&self)
            .ok_or_else(|| GameError::illegal(format!("{} is not on the board", self)))?;
        ensure_legal!(
            self.has_room(occupants, player, state.player_count()),
            "{} is full",
            self
        );
        if let Some(length) = self.journey_length() {
            ensure_legal!(p.season == Season::Autumn, "journeys open in autumn");
            ensure_legal!(
                p.hand.len() >= length,
                "{} needs {} cards in hand",
                self,
                length
            );
        }
        Ok(())
    }

    /// Apply this location's effect for `player` without placing a worker.
    pub fn activate(self, state: &mut GameState, player: PlayerId, prev: InputKind) -> Result<()> {
        let def = self.definition();
        state.gain(player, def.gain);
        state.draw_cards(player, def.draw);
        let context = InputContext::new(prev, self);
        let hand_size = state.player(player).hand.len();
        let hand = state.player(player).hand.to_vec();

        match self {
            L::BasicTwoCardsOnePoint => {
                state.player_mut(player).resources.add(ResourceType::Vp, 1);
            }
            L::ForestTwoAny => state.push_decision(GameInput::select_any(context, 2)),
            L::ForestTwoCardsOneAny => state.push_decision(GameInput::select_one_any(context)),
            L::ForestDiscardUpToThreeDrawTwoEach | L::ForestDiscardUpToThreeGainAnyEach => {
                if hand_size > 0 {
                    let max = hand_size.min(3);
                    state.push_decision(GameInput::select_cards(context, hand, 0, max));
                }
            }
            L::ForestCopyBasicOneCard => {
                let basics = state.locations_of(LocationKind::Basic);
                state.push_decision(GameInput::select_location(context, basics));
            }
            L::Haven => {
                if hand_size > 0 {
                    state.push_decision(GameInput::select_cards(context, hand, 0, hand_size));
                }
            }
            L::JourneyTwo | L::JourneyThree | L::JourneyFour | L::JourneyFive => {
                let length = self.journey_length().unwrap_or(0);
                state.push_decision(GameInput::select_cards(context, hand, length, length));
            }
            _ => {}
        }
        debug!(%player, location = %self, "location activated");
        Ok(())
    }
}

impl RuleEntity for LocationName {
    fn check(self, state: &GameState, input: &GameInput) -> Result<()> {
        match input {
            GameInput::PlaceWorker { location } if *location == self => {
                self.check_placement(state, state.active_player)
            }
            other => Err(GameError::invalid(format!("{} cannot be applied to {}", other, self))),
        }
    }

    fn play(self, state: &mut GameState, input: &GameInput) -> Result<()> {
        let player = state.active_player;
        if let Some(occupants) = state.locations.get_mut(&self) {
            occupants.push(player);
        }
        state
            .player_mut(player)
            .placed_workers
            .push(WorkerPlacement::Location { location: self });
        self.activate(state, player, input.kind())
    }

    fn resolve(self, state: &mut GameState, input: &GameInput) -> Result<()> {
        let player = state.active_player;
        let next = InputContext::new(input.kind(), self);
        match (self, input) {
            (L::ForestTwoAny, GameInput::SelectResources(s)) => {
                state.gain(player, s.client_options);
            }
            (L::ForestDiscardUpToThreeGainAnyEach, GameInput::SelectResources(s))
            | (L::Haven, GameInput::SelectResources(s)) => {
                state.gain(player, s.client_options);
            }
            (L::ForestTwoCardsOneAny, GameInput::SelectOption(s)) => {
                if let Some(Choice::Resource(kind)) = s.client_options {
                    state.player_mut(player).resources.add(kind, 1);
                }
            }
            (L::ForestCopyBasicOneCard, GameInput::SelectLocation(s)) => {
                if let Some(basic) = s.client_options {
                    basic.activate(state, player, input.kind())?;
                }
            }
            (L::ForestDiscardUpToThreeDrawTwoEach, GameInput::SelectCards(s)) => {
                state.discard_from_hand(player, &s.client_options)?;
                state.draw_cards(player, 2 * s.client_options.len());
            }
            (L::ForestDiscardUpToThreeGainAnyEach, GameInput::SelectCards(s)) => {
                state.discard_from_hand(player, &s.client_options)?;
                let n = s.client_options.len() as u32;
                if n > 0 {
                    state.push_decision(GameInput::select_any(next.carrying(Carried::Count(n)), n));
                }
            }
            (L::Haven, GameInput::SelectCards(s)) => {
                state.discard_from_hand(player, &s.client_options)?;
                let n = (s.client_options.len() / 2) as u32;
                if n > 0 {
                    state.push_decision(GameInput::select_any(next.carrying(Carried::Count(n)), n));
                }
            }
            (journey, GameInput::SelectCards(s)) if journey.journey_length().is_some() => {
                state.discard_from_hand(player, &s.client_options)?;
                let points = s.client_options.len() as u32;
                state.player_mut(player).resources.add(ResourceType::Vp, points);
            }
            _ => {
                return Err(GameError::invalid(format!(
                    "{} has no pending {}",
                    self,
                    input.kind()
                )))
            }
        }
        Ok(())
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition().code)
    }
}
