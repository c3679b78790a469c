//! Available inputs.
//!
//! With a decision pending, the only available input is that decision.
//! Otherwise every top-level candidate is generated and filtered through
//! the same checks `next` applies. The result is ordered by kind rank;
//! the sort is stable, so generation order holds within a kind.
//!
//! Card payments are listed once per applicable rule (full price,
//! associated construction, Innkeeper, the cheapest Crane payment). Judge
//! swaps and other Crane payments are accepted by `next` but not listed.

use super::transition::check_top_level;
use crate::cards::{payment_candidates, CardName, CardType};
use crate::core::input::GameInput;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

fn push_unique(out: &mut Vec<CardName>, card: CardName) {
    if !out.contains(&card) {
        out.push(card);
    }
}

fn candidates(state: &GameState) -> Vec<GameInput> {
    let player = state.active();
    let mut out = Vec::new();

    out.extend(
        state
            .events
            .iter()
            .filter(|(_, owner)| owner.is_none())
            .map(|(&event, _)| GameInput::claim_event(event)),
    );

    let mut hand = Vec::new();
    for &card in &player.hand {
        push_unique(&mut hand, card);
    }
    let mut meadow = Vec::new();
    for &card in state.meadow.iter() {
        push_unique(&mut meadow, card);
    }
    for (cards, from_meadow) in [(hand, false), (meadow, true)] {
        for card in cards {
            for payment in payment_candidates(player, card) {
                out.push(GameInput::play_card_with(card, from_meadow, payment));
            }
        }
    }

    out.extend(state.locations.keys().map(|&l| GameInput::place_worker(l)));

    let mut hosts = vec![player.id];
    hosts.extend(state.opponents(player.id));
    for owner in hosts {
        for (card, _) in state.player(owner).city_cards() {
            if card.definition().card_type == CardType::Destination {
                out.push(GameInput::visit_destination(card, owner));
            }
        }
    }

    out.extend(
        player
            .adornments_in_hand
            .iter()
            .map(|&a| GameInput::play_adornment(a)),
    );
    out.push(GameInput::PrepareForSeason);
    out.push(GameInput::GameEnd);
    out
}

impl GameState {
    /// Inputs `player` may submit right now, ordered by kind.
    ///
    /// Empty when the game is over or it is not `player`'s turn.
    #[must_use]
    pub fn available_inputs(&self, player: PlayerId) -> Vec<GameInput> {
        if self.is_game_over() || player != self.active_player {
            return Vec::new();
        }
        if let Some(head) = self.pending.head() {
            return vec![head.clone()];
        }
        let mut inputs: Vec<GameInput> = candidates(self)
            .into_iter()
            .filter(|input| check_top_level(self, input).is_ok())
            .collect();
        inputs.sort_by_key(|input| input.kind().sort_rank());
        inputs
    }
}
