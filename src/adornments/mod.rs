//! Adornments (Pearlbrook).
//!
//! Each player is dealt adornments at setup. Playing one costs a PEARL
//! and the turn, but no worker. An adornment acts once when played and
//! scores at game end by its own formula.
//!
//! The Mirror copies an adornment an opponent has played; activation is
//! therefore split from playing so the copy can run without a pearl.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::cards::{self, CardName, CardType};
use crate::core::input::{Carried, Choice, GameInput, InputContext, InputKind, PlayedCardRef};
use crate::core::player::{Player, PlayerId};
use crate::core::resources::{ResourceType, Resources};
use crate::core::state::GameState;
use crate::error::{ensure_legal, GameError, Result};
use crate::rules::engine::RuleEntity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdornmentName {
    Bell,
    Compass,
    GildedBook,
    Hourglass,
    KeyToTheCity,
    Masque,
    Mirror,
    Scales,
    SeaglassAmulet,
    Spyglass,
    Sundial,
    Tiara,
}

use AdornmentName as A;
use CardName as C;

/// Travelers whose on-play effect the Compass can repeat.
const COMPASS_TRAVELERS: [CardName; 5] =
    [C::Bard, C::PostalPigeon, C::Ranger, C::Shepherd, C::Wanderer];

impl AdornmentName {
    pub const ALL: [AdornmentName; 12] = [
        A::Bell,
        A::Compass,
        A::GildedBook,
        A::Hourglass,
        A::KeyToTheCity,
        A::Masque,
        A::Mirror,
        A::Scales,
        A::SeaglassAmulet,
        A::Spyglass,
        A::Sundial,
        A::Tiara,
    ];

    /// Wire and display code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            A::Bell => "BELL",
            A::Compass => "COMPASS",
            A::GildedBook => "GILDED_BOOK",
            A::Hourglass => "HOURGLASS",
            A::KeyToTheCity => "KEY_TO_THE_CITY",
            A::Masque => "MASQUE",
            A::Mirror => "MIRROR",
            A::Scales => "SCALES",
            A::SeaglassAmulet => "SEAGLASS_AMULET",
            A::Spyglass => "SPYGLASS",
            A::Sundial => "SUNDIAL",
            A::Tiara => "TIARA",
        }
    }

    /// End-game points of this adornment in `player`'s possession.
    #[must_use]
    pub fn points(self, player: &Player) -> i32 {
        let n = match self {
            A::Bell => player.num_critters() / 2,
            A::Compass => player.count_type(CardType::Traveler) / 2,
            A::GildedBook => player.count_type(CardType::Governance),
            A::Hourglass => player.count_type(CardType::Destination),
            A::KeyToTheCity => player.num_constructions() / 2,
            A::Masque => player.resources.vp as usize / 3,
            A::Mirror => CardType::ALL
                .iter()
                .filter(|&&t| player.count_type(t) > 0)
                .count(),
            A::Scales => player.hand.len().min(5),
            A::SeaglassAmulet => 3,
            A::Spyglass => 0,
            A::Sundial => player.count_type(CardType::Production) / 2,
            A::Tiara => player.count_type(CardType::Prosperity),
        };
        n as i32
    }

    fn own_refs(player: &Player, pred: impl Fn(CardName) -> bool) -> Vec<PlayedCardRef> {
        player
            .city_cards()
            .filter(|&(card, _)| pred(card))
            .map(|(card, _)| PlayedCardRef {
                owner: player.id,
                card,
            })
            .collect()
    }

    /// Run this adornment's effect for `player`.
    pub fn activate(self, state: &mut GameState, player: PlayerId, prev: InputKind) -> Result<()> {
        let context = InputContext::new(prev, self);
        let p = state.player(player);
        match self {
            A::Bell => state.gain(player, Resources::of(ResourceType::Berry, 3)),
            A::Compass => {
                let options = Self::own_refs(p, |c| COMPASS_TRAVELERS.contains(&c));
                if !options.is_empty() {
                    state.push_decision(GameInput::select_played_cards(context, options, 0, 2));
                }
            }
            A::GildedBook => {
                let options =
                    Self::own_refs(p, |c| c.definition().card_type == CardType::Governance);
                if !options.is_empty() {
                    state.push_decision(GameInput::select_played_cards(context, options, 1, 1));
                }
            }
            A::Hourglass => {
                let forest = state.forest_locations();
                state.push_decision(GameInput::select_location(context.clone(), forest));
                state.push_decision(GameInput::select_one_any(context));
            }
            A::KeyToTheCity => {
                let constructions = p.num_constructions();
                state.push_decision(GameInput::select_any(context, 2));
                state.draw_cards(player, constructions);
            }
            A::Masque => {
                let options = cards::free_play_options(state, player, 3);
                if !options.is_empty() {
                    state.push_decision(GameInput::select_cards(context, options, 1, 1));
                }
            }
            A::Mirror => {
                let mut options: Vec<Choice> = Vec::new();
                for other in state.opponents(player) {
                    for &adornment in &state.player(other).played_adornments {
                        let choice = Choice::Adornment(adornment);
                        if adornment != A::Mirror && !options.contains(&choice) {
                            options.push(choice);
                        }
                    }
                }
                if !options.is_empty() {
                    state.push_decision(GameInput::select_option(context, options));
                }
            }
            A::Scales => {
                let hand = p.hand.to_vec();
                if !hand.is_empty() {
                    let max = hand.len().min(4);
                    state.push_decision(GameInput::select_cards(context, hand, 0, max));
                }
            }
            A::SeaglassAmulet => {
                state.push_decision(GameInput::select_any(context, 3));
                state.draw_cards(player, 2);
                state.gain(player, Resources::of(ResourceType::Vp, 1));
            }
            A::Spyglass => {
                state.push_decision(GameInput::select_one_any(context));
                state.draw_cards(player, 1);
                state.gain(player, Resources::of(ResourceType::Pearl, 1));
            }
            A::Sundial => {
                let options =
                    Self::own_refs(p, |c| c.definition().card_type == CardType::Production);
                if !options.is_empty() {
                    state.push_decision(GameInput::select_played_cards(context, options, 0, 3));
                }
            }
            A::Tiara => {
                let prosperity = p.count_type(CardType::Prosperity) as u32;
                if prosperity > 0 {
                    state.push_decision(GameInput::select_any(context, prosperity));
                }
            }
        }
        debug!(%player, adornment = %self, "adornment activated");
        Ok(())
    }
}

impl RuleEntity for AdornmentName {
    fn check(self, state: &GameState, input: &GameInput) -> Result<()> {
        match input {
            GameInput::PlayAdornment { adornment } if *adornment == self => {}
            other => {
                return Err(GameError::invalid(format!(
                    "{} cannot be applied to {}",
                    other, self
                )))
            }
        }
        let player = state.active();
        ensure_legal!(
            player.adornments_in_hand.contains(&self),
            "{} does not hold {}",
            player.id,
            self
        );
        ensure_legal!(
            player.resources.pearl >= 1,
            "{} needs a PEARL to play {}",
            player.id,
            self
        );
        Ok(())
    }

    fn play(self, state: &mut GameState, input: &GameInput) -> Result<()> {
        let player = state.active_player;
        let p = state.player_mut(player);
        ensure_legal!(
            p.resources.remove(ResourceType::Pearl, 1),
            "{} needs a PEARL to play {}",
            player,
            self
        );
        if let Some(pos) = p.adornments_in_hand.iter().position(|&a| a == self) {
            p.adornments_in_hand.remove(pos);
        }
        p.played_adornments.push(self);
        self.activate(state, player, input.kind())
    }

    fn resolve(self, state: &mut GameState, input: &GameInput) -> Result<()> {
        let player = state.active_player;
        let prev = input.kind();
        let stray = || GameError::invalid(format!("{} has no pending {}", self, prev));

        match (self, input) {
            (A::Compass, GameInput::SelectPlayedCards(s)) => {
                for picked in &s.client_options {
                    ensure_legal!(
                        picked.owner == player,
                        "the Compass only replays your own cards"
                    );
                    cards::on_play(state, player, picked.card, prev)?;
                }
            }
            (A::GildedBook, GameInput::SelectPlayedCards(s)) => {
                for picked in &s.client_options {
                    state.gain(player, picked.card.definition().cost);
                }
            }
            (A::Sundial, GameInput::SelectPlayedCards(s)) => {
                for picked in &s.client_options {
                    cards::activate_production(state, player, picked.card, prev)?;
                }
            }
            (A::Hourglass, GameInput::SelectLocation(s)) => {
                let forest = s.client_options.ok_or_else(stray)?;
                forest.activate(state, player, prev)?;
            }
            (A::Hourglass | A::Spyglass, GameInput::SelectOption(s)) => match s.client_options {
                Some(Choice::Resource(kind)) => state.player_mut(player).resources.add(kind, 1),
                _ => return Err(stray()),
            },
            (A::Mirror, GameInput::SelectOption(s)) => match s.client_options {
                Some(Choice::Adornment(copied)) => copied.activate(state, player, prev)?,
                _ => return Err(stray()),
            },
            (A::Masque, GameInput::SelectCards(s)) => {
                let pick = *s.client_options.first().ok_or_else(stray)?;
                cards::take_for_free_play(state, player, pick)?;
                cards::place_card(state, player, pick, prev)?;
            }
            (A::Scales, GameInput::SelectCards(s)) => {
                state.discard_from_hand(player, &s.client_options)?;
                let n = s.client_options.len() as u32;
                if n > 0 {
                    let context = InputContext::new(prev, self).carrying(Carried::Count(n));
                    state.push_decision(GameInput::select_any(context, n));
                }
            }
            (
                A::Scales | A::KeyToTheCity | A::SeaglassAmulet | A::Tiara,
                GameInput::SelectResources(s),
            ) => {
                state.gain(player, s.client_options);
            }
            _ => return Err(stray()),
        }
        Ok(())
    }
}

impl fmt::Display for AdornmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
