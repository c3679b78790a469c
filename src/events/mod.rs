//! Events.
//!
//! Four basic events are always on the board; a random set of special
//! events joins them at setup. An event is claimed once, by placing a
//! worker on it after meeting its requirement. Some special events then
//! ask the claimant for cards or resources to store on them, which drive
//! the event's end-game points.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::cards::{self, CardName, CardType};
use crate::core::input::{GameInput, InputContext, PlayedCardRef};
use crate::core::player::{ClaimedEvent, Player, PlayerId, WorkerPlacement};
use crate::core::resources::{ResourceType, Resources};
use crate::core::state::GameState;
use crate::error::{ensure_legal, GameError, Result};
use crate::rules::engine::RuleEntity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventName {
    BasicFourProductionTags,
    BasicThreeDestination,
    BasicThreeTraveler,
    BasicThreeGovernance,
    SpecialGraduationOfScholars,
    SpecialTheEverdellGames,
    SpecialPerformerInResidence,
    SpecialCaptureOfTheAcornThieves,
    SpecialUnderNewManagement,
    SpecialAnEveningOfFireworks,
    SpecialTaxRelief,
    SpecialFlyingDoctorService,
}

/// What a city must contain before an event can be claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// At least this many cards of one type.
    TypeCount(CardType, usize),
    /// At least this many cards of every type.
    EachType(usize),
    /// Every listed card.
    Cards(&'static [CardName]),
}

impl Requirement {
    #[must_use]
    pub fn is_met(&self, player: &Player) -> bool {
        match *self {
            Requirement::TypeCount(card_type, n) => player.count_type(card_type) >= n,
            Requirement::EachType(n) => CardType::ALL.iter().all(|&t| player.count_type(t) >= n),
            Requirement::Cards(cards) => cards.iter().all(|&card| player.has_card(card)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDefinition {
    pub event: EventName,
    pub code: &'static str,
    pub is_basic: bool,
    /// Fixed points for claiming. Storage events add to this at scoring.
    pub base_vp: i32,
    pub requirement: Requirement,
}

use CardName as C;
use EventName as E;

static DEFINITIONS: [EventDefinition; 12] = [
    EventDefinition {
        event: E::BasicFourProductionTags,
        code: "BASIC_FOUR_PRODUCTION_TAGS",
        is_basic: true,
        base_vp: 3,
        requirement: Requirement::TypeCount(CardType::Production, 4),
    },
    EventDefinition {
        event: E::BasicThreeDestination,
        code: "BASIC_THREE_DESTINATION",
        is_basic: true,
        base_vp: 3,
        requirement: Requirement::TypeCount(CardType::Destination, 3),
    },
    EventDefinition {
        event: E::BasicThreeTraveler,
        code: "BASIC_THREE_TRAVELER",
        is_basic: true,
        base_vp: 3,
        requirement: Requirement::TypeCount(CardType::Traveler, 3),
    },
    EventDefinition {
        event: E::BasicThreeGovernance,
        code: "BASIC_THREE_GOVERNANCE",
        is_basic: true,
        base_vp: 3,
        requirement: Requirement::TypeCount(CardType::Governance, 3),
    },
    EventDefinition {
        event: E::SpecialGraduationOfScholars,
        code: "SPECIAL_GRADUATION_OF_SCHOLARS",
        is_basic: false,
        base_vp: 0,
        requirement: Requirement::Cards(&[C::Teacher, C::University]),
    },
    EventDefinition {
        event: E::SpecialTheEverdellGames,
        code: "SPECIAL_THE_EVERDELL_GAMES",
        is_basic: false,
        base_vp: 9,
        requirement: Requirement::EachType(2),
    },
    EventDefinition {
        event: E::SpecialPerformerInResidence,
        code: "SPECIAL_PERFORMER_IN_RESIDENCE",
        is_basic: false,
        base_vp: 0,
        requirement: Requirement::Cards(&[C::Inn, C::Bard]),
    },
    EventDefinition {
        event: E::SpecialCaptureOfTheAcornThieves,
        code: "SPECIAL_CAPTURE_OF_THE_ACORN_THIEVES",
        is_basic: false,
        base_vp: 0,
        requirement: Requirement::Cards(&[C::Courthouse, C::Ranger]),
    },
    EventDefinition {
        event: E::SpecialUnderNewManagement,
        code: "SPECIAL_UNDER_NEW_MANAGEMENT",
        is_basic: false,
        base_vp: 0,
        requirement: Requirement::Cards(&[C::Peddler, C::GeneralStore]),
    },
    EventDefinition {
        event: E::SpecialAnEveningOfFireworks,
        code: "SPECIAL_AN_EVENING_OF_FIREWORKS",
        is_basic: false,
        base_vp: 0,
        requirement: Requirement::Cards(&[C::Lookout, C::MinerMole]),
    },
    EventDefinition {
        event: E::SpecialTaxRelief,
        code: "SPECIAL_TAX_RELIEF",
        is_basic: false,
        base_vp: 3,
        requirement: Requirement::Cards(&[C::Judge, C::Queen]),
    },
    EventDefinition {
        event: E::SpecialFlyingDoctorService,
        code: "SPECIAL_FLYING_DOCTOR_SERVICE",
        is_basic: false,
        base_vp: 0,
        requirement: Requirement::Cards(&[C::Doctor, C::PostalPigeon]),
    },
];

impl EventName {
    pub const ALL: [EventName; 12] = [
        E::BasicFourProductionTags,
        E::BasicThreeDestination,
        E::BasicThreeTraveler,
        E::BasicThreeGovernance,
        E::SpecialGraduationOfScholars,
        E::SpecialTheEverdellGames,
        E::SpecialPerformerInResidence,
        E::SpecialCaptureOfTheAcornThieves,
        E::SpecialUnderNewManagement,
        E::SpecialAnEveningOfFireworks,
        E::SpecialTaxRelief,
        E::SpecialFlyingDoctorService,
    ];

    #[must_use]
    pub fn definition(self) -> &'static EventDefinition {
        &DEFINITIONS[self as usize]
    }

    /// Points this event is worth to the player who claimed it.
    #[must_use]
    pub fn points(self, state: &GameState, claimed: &ClaimedEvent) -> i32 {
        let stored = &claimed.stored_resources;
        let bonus = match self {
            E::SpecialGraduationOfScholars => 2 * claimed.stored_cards.len() as i32,
            E::SpecialPerformerInResidence => 2 * stored.berry as i32,
            E::SpecialCaptureOfTheAcornThieves => 3 * claimed.stored_cards.len() as i32,
            E::SpecialUnderNewManagement => {
                (stored.twig + stored.berry) as i32 + 2 * (stored.resin + stored.pebble) as i32
            }
            E::SpecialAnEveningOfFireworks => 2 * stored.twig as i32,
            E::SpecialFlyingDoctorService => {
                let pairs: usize = state
                    .players
                    .iter()
                    .map(|(_, p)| p.count_card(C::Husband).min(p.count_card(C::Wife)))
                    .sum();
                3 * pairs as i32
            }
            _ => 0,
        };
        self.definition().base_vp + bonus
    }

    fn on_claim(
        self,
        state: &mut GameState,
        player: PlayerId,
        context: InputContext,
    ) -> Result<()> {
        let p = state.player(player);
        let held = p.resources;
        match self {
            E::SpecialGraduationOfScholars => {
                let critters: Vec<CardName> = p
                    .hand
                    .iter()
                    .copied()
                    .filter(|c| c.definition().is_critter)
                    .collect();
                if !critters.is_empty() {
                    state.push_decision(GameInput::select_cards(context, critters, 0, 3));
                }
            }
            E::SpecialPerformerInResidence => {
                let berries = held.berry.min(3);
                if berries > 0 {
                    let limits = Resources::of(ResourceType::Berry, berries);
                    state.push_decision(GameInput::select_to_spend(context, limits, berries));
                }
            }
            E::SpecialAnEveningOfFireworks => {
                let twigs = held.twig.min(3);
                if twigs > 0 {
                    let limits = Resources::of(ResourceType::Twig, twigs);
                    state.push_decision(GameInput::select_to_spend(context, limits, twigs));
                }
            }
            E::SpecialUnderNewManagement => {
                let cap = Resources::cost(3, 3, 3, 3);
                let limits = held.min_each(&cap);
                let max = limits.basic_total().min(3);
                if max > 0 {
                    state.push_decision(GameInput::select_to_spend(context, limits, max));
                }
            }
            E::SpecialCaptureOfTheAcornThieves => {
                let critters: Vec<PlayedCardRef> = p
                    .city_cards()
                    .filter(|(card, _)| card.definition().is_critter)
                    .flat_map(|(card, copies)| {
                        std::iter::repeat(PlayedCardRef { owner: player, card }).take(copies)
                    })
                    .collect();
                if !critters.is_empty() {
                    state.push_decision(GameInput::select_played_cards(context, critters, 0, 2));
                }
            }
            E::SpecialTaxRelief => {
                cards::activate_all_production(state, player, context.prev_input_type)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn claimed_mut(
        state: &mut GameState,
        player: PlayerId,
        event: EventName,
    ) -> Result<&mut ClaimedEvent> {
        state
            .player_mut(player)
            .claimed_events
            .get_mut(&event)
            .ok_or_else(|| GameError::illegal(format!("{} has not claimed {}", player, event)))
    }
}

impl RuleEntity for EventName {
    fn check(self, state: &GameState, input: &GameInput) -> Result<()> {
        match input {
            GameInput::ClaimEvent { event } if *event == self => {}
            other => {
                return Err(GameError::invalid(format!(
                    "{} cannot be applied to {}",
                    other, self
                )))
            }
        }
        let player = state.active();
        ensure_legal!(
            player.available_workers() > 0,
            "{} has no free workers",
            player.id
        );
        match state.events.get(&self) {
            None => return Err(GameError::illegal(format!("{} is not on the board", self))),
            Some(Some(owner)) => {
                return Err(GameError::illegal(format!("{} was claimed by {}", self, owner)))
            }
            Some(None) => {}
        }
        ensure_legal!(
            self.definition().requirement.is_met(player),
            "{} does not meet the requirement of {}",
            player.id,
            self
        );
        Ok(())
    }

    fn play(self, state: &mut GameState, input: &GameInput) -> Result<()> {
        let player = state.active_player;
        state.events.insert(self, Some(player));
        let p = state.player_mut(player);
        p.claimed_events.insert(self, ClaimedEvent::with_worker());
        p.placed_workers.push(WorkerPlacement::Event { event: self });
        debug!(%player, event = %self, "event claimed");
        self.on_claim(state, player, InputContext::new(input.kind(), self))
    }

    fn resolve(self, state: &mut GameState, input: &GameInput) -> Result<()> {
        let player = state.active_player;
        match (self, input) {
            (E::SpecialGraduationOfScholars, GameInput::SelectCards(s)) => {
                let p = state.player_mut(player);
                ensure_legal!(
                    p.hand_contains_all(&s.client_options),
                    "{} does not hold the selected cards",
                    player
                );
                for &card in &s.client_options {
                    p.remove_from_hand(card);
                }
                Self::claimed_mut(state, player, self)?
                    .stored_cards
                    .extend(s.client_options.iter().copied());
            }
            (
                E::SpecialPerformerInResidence
                | E::SpecialAnEveningOfFireworks
                | E::SpecialUnderNewManagement,
                GameInput::SelectResources(s),
            ) => {
                let paid = s.client_options;
                ensure_legal!(
                    state.player_mut(player).resources.spend(&paid),
                    "{} cannot afford the selected resources",
                    player
                );
                Self::claimed_mut(state, player, self)?
                    .stored_resources
                    .add_all(&paid);
            }
            (E::SpecialCaptureOfTheAcornThieves, GameInput::SelectPlayedCards(s)) => {
                let mut captured = Vec::with_capacity(s.client_options.len());
                for selected in &s.client_options {
                    ensure_legal!(
                        selected.owner == player,
                        "only your own critters can be captured"
                    );
                    let removed = state.player_mut(player).remove_from_city(selected.card);
                    ensure_legal!(removed.is_some(), "{} is not in the city", selected.card);
                    captured.push(selected.card);
                }
                Self::claimed_mut(state, player, self)?
                    .stored_cards
                    .extend(captured);
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

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition().code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;

    #[test]
    fn test_table_is_indexed_by_name() {
        for event in EventName::ALL {
            assert_eq!(event.definition().event, event);
            let json = serde_json::to_string(&event).unwrap();
            assert_eq!(json, format!("\"{}\"", event));
        }
    }

    #[test]
    fn test_requirements() {
        let mut player = Player::new(PlayerId::new(0), "Ada");
        let games = Requirement::EachType(2);
        assert!(!games.is_met(&player));

        for card in [
            C::Judge,
            C::Historian,
            C::Farm,
            C::Farm,
            C::Wanderer,
            C::Wanderer,
            C::Queen,
            C::Lookout,
            C::King,
        ] {
            player.add_to_city(card);
        }
        assert!(!games.is_met(&player));
        player.add_to_city(C::Wife);
        assert!(games.is_met(&player));

        let scholars = E::SpecialGraduationOfScholars.definition().requirement;
        assert!(!scholars.is_met(&player));
        player.add_to_city(C::Teacher);
        player.add_to_city(C::University);
        assert!(scholars.is_met(&player));
    }

    #[test]
    fn test_basic_events_worth_three() {
        let state = GameState::new(crate::core::GameConfig::new(2));
        let claimed = ClaimedEvent::with_worker();
        for event in EventName::ALL.iter().filter(|e| e.definition().is_basic) {
            assert_eq!(event.points(&state, &claimed), 3);
        }
    }

    #[test]
    fn test_storage_points() {
        let state = GameState::new(crate::core::GameConfig::new(2));
        let mut claimed = ClaimedEvent::with_worker();
        claimed.stored_resources = Resources::cost(1, 1, 0, 1);
        assert_eq!(E::SpecialUnderNewManagement.points(&state, &claimed), 4);

        claimed.stored_cards = vec![C::Wife, C::Husband];
        assert_eq!(E::SpecialGraduationOfScholars.points(&state, &claimed), 4);
        assert_eq!(E::SpecialCaptureOfTheAcornThieves.points(&state, &claimed), 6);
        assert_eq!(E::SpecialTheEverdellGames.points(&state, &claimed), 9);
    }
}
