//! Card system: definitions, per-copy city data, payment and effects.
//!
//! ## Key Types
//!
//! - `CardName`: every card of the base deck
//! - `CardDefinition`: printed data (type, cost, points, pairing, copies)
//! - `PlayedCard`: runtime data of one copy in a city
//!
//! ## Playing a card
//!
//! A `PLAY_CARD` input takes the card from the hand or the meadow, pays
//! for it (see [`check_payment`]), applies the modifier card if one was
//! used, then places the card. Placing runs the card's own effect and the
//! passive reactions of cards already in the city.

pub mod definition;
pub mod instance;
mod effects;
mod payment;

pub use definition::{CardDefinition, CardName, CardType};
pub use effects::{
    activate_all_production, activate_production, can_place, free_play_options, inn_options,
    on_play, place_card, take_for_free_play,
};
pub use instance::PlayedCard;
pub use payment::{check_payment, payment_candidates};

use crate::core::input::{GameInput, PaymentOptions};
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::error::{ensure_legal, GameError, Result};
use crate::rules::engine::RuleEntity;

impl CardName {
    /// Check a `PLAY_CARD` of this card for `player`.
    pub fn check_play(
        self,
        state: &GameState,
        player: PlayerId,
        from_meadow: bool,
        payment: &PaymentOptions,
    ) -> Result<()> {
        let p = state.player(player);
        if from_meadow {
            ensure_legal!(state.meadow.contains(&self), "{} is not in the meadow", self);
        } else {
            ensure_legal!(p.hand_count(self) > 0, "{} does not hold {}", player, self);
        }
        ensure_legal!(
            can_place(state, player, self),
            "{} has no room for {}",
            player,
            self
        );
        check_payment(p, self, payment)
    }

    fn apply_modifier(self, state: &mut GameState, player: PlayerId, modifier: CardName) {
        match modifier {
            CardName::Innkeeper | CardName::Crane => {
                if state.player_mut(player).remove_from_city(modifier).is_some() {
                    state.discard_card(modifier);
                }
            }
            CardName::Judge => {}
            host => {
                let slot = state
                    .player_mut(player)
                    .city
                    .get_mut(&host)
                    .and_then(|copies| copies.iter_mut().find(|copy| !copy.occupied));
                if let Some(copy) = slot {
                    copy.occupied = true;
                }
            }
        }
    }
}

impl RuleEntity for CardName {
    fn check(self, state: &GameState, input: &GameInput) -> Result<()> {
        let player = state.active_player;
        match input {
            GameInput::PlayCard {
                card,
                from_meadow,
                payment,
            } if *card == self => self.check_play(state, player, *from_meadow, payment),
            GameInput::VisitDestinationCard { card, owner } if *card == self => {
                effects::check_visit(state, player, self, *owner)
            }
            other => Err(GameError::invalid(format!("{} cannot be applied to {}", other, self))),
        }
    }

    fn play(self, state: &mut GameState, input: &GameInput) -> Result<()> {
        let player = state.active_player;
        match input {
            GameInput::PlayCard {
                from_meadow,
                payment,
                ..
            } => {
                if *from_meadow {
                    state.take_from_meadow(self);
                    state.replenish_meadow();
                } else {
                    state.player_mut(player).remove_from_hand(self);
                }
                ensure_legal!(
                    state.player_mut(player).resources.spend(&payment.resources),
                    "{} cannot afford {}",
                    player,
                    self
                );
                if let Some(modifier) = payment.card_to_use {
                    self.apply_modifier(state, player, modifier);
                }
                place_card(state, player, self, input.kind())
            }
            GameInput::VisitDestinationCard { owner, .. } => {
                effects::visit_destination(state, player, self, *owner, input.kind())
            }
            other => Err(GameError::invalid(format!("{} cannot be applied to {}", other, self))),
        }
    }

    fn resolve(self, state: &mut GameState, input: &GameInput) -> Result<()> {
        effects::resolve(self, state, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::Resources;
    use crate::core::GameConfig;

    fn setup() -> GameState {
        GameState::new(GameConfig::new(2).with_seed(11).without_starting_hands())
    }

    #[test]
    fn test_check_play_from_hand() {
        let mut state = setup();
        let p0 = state.active_player;
        let input = GameInput::play_card(CardName::Farm);
        assert!(!CardName::Farm.can_play(&state, &input));

        state.player_mut(p0).hand.push(CardName::Farm);
        assert!(!CardName::Farm.can_play(&state, &input));

        state.player_mut(p0).resources = Resources::cost(2, 1, 0, 0);
        assert!(CardName::Farm.can_play(&state, &input));
        assert!(!CardName::Mine.can_play(&state, &input));
    }

    #[test]
    fn test_play_pays_and_places() {
        let mut state = setup();
        let p0 = state.active_player;
        state.player_mut(p0).hand.push(CardName::Farm);
        state.player_mut(p0).resources = Resources::cost(2, 1, 0, 0);

        let input = GameInput::play_card(CardName::Farm);
        CardName::Farm.play(&mut state, &input).unwrap();

        let player = state.player(p0);
        assert!(player.has_card(CardName::Farm));
        assert!(player.hand.is_empty());
        // spent the cost, then produced one berry
        assert_eq!(player.resources, Resources::cost(0, 0, 0, 1));
    }

    #[test]
    fn test_free_critter_occupies_host() {
        let mut state = setup();
        let p0 = state.active_player;
        state.player_mut(p0).add_to_city(CardName::Farm);
        state.player_mut(p0).hand.push(CardName::Wife);

        let input = GameInput::play_card_with(
            CardName::Wife,
            false,
            PaymentOptions::using(CardName::Farm, Resources::new()),
        );
        assert!(CardName::Wife.can_play(&state, &input));
        CardName::Wife.play(&mut state, &input).unwrap();

        let farm = state.player(p0).played_card(CardName::Farm).unwrap();
        assert!(farm.occupied);
        assert!(state.player(p0).has_card(CardName::Wife));
    }

    #[test]
    fn test_innkeeper_is_discarded() {
        let mut state = setup();
        let p0 = state.active_player;
        state.player_mut(p0).add_to_city(CardName::Innkeeper);
        state.player_mut(p0).hand.push(CardName::Queen);
        state.player_mut(p0).resources = Resources::cost(0, 0, 0, 2);

        let input = GameInput::play_card_with(
            CardName::Queen,
            false,
            PaymentOptions::using(CardName::Innkeeper, Resources::cost(0, 0, 0, 2)),
        );
        CardName::Queen.play(&mut state, &input).unwrap();
        assert!(!state.player(p0).has_card(CardName::Innkeeper));
        assert_eq!(state.discard.back(), Some(&CardName::Innkeeper));
        assert!(state.player(p0).resources.is_empty());
    }
}
