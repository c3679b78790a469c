//! Scoring.
//!
//! Points are always derived from the state, never stored:
//! - printed card points, plus tokens stored on cards
//! - prosperity bonuses
//! - loose point tokens
//! - claimed events
//! - played adornments

use rustc_hash::FxHashMap;

use super::engine::GameResult;
use crate::cards::{CardName, CardType};
use crate::core::player::{Player, PlayerId};
use crate::core::state::GameState;

use CardName as C;

/// Per-city counts the prosperity cards score from.
struct CityTally {
    by_type: FxHashMap<CardType, usize>,
    common_constructions: usize,
    unique_constructions: usize,
    common_critters: usize,
    unique_critters: usize,
}

impl CityTally {
    fn of(player: &Player) -> Self {
        let mut tally = Self {
            by_type: FxHashMap::default(),
            common_constructions: 0,
            unique_constructions: 0,
            common_critters: 0,
            unique_critters: 0,
        };
        for (card, copies) in player.city_cards() {
            let def = card.definition();
            *tally.by_type.entry(def.card_type).or_insert(0) += copies;
            let bucket = match (def.is_construction(), def.is_common()) {
                (true, true) => &mut tally.common_constructions,
                (true, false) => &mut tally.unique_constructions,
                (false, true) => &mut tally.common_critters,
                (false, false) => &mut tally.unique_critters,
            };
            *bucket += copies;
        }
        tally
    }

    fn of_type(&self, card_type: CardType) -> usize {
        self.by_type.get(&card_type).copied().unwrap_or(0)
    }
}

fn prosperity_bonus(player: &Player) -> i32 {
    let tally = CityTally::of(player);
    let mut bonus = 0;

    if player.has_card(C::Wife) {
        let pairs = player.count_card(C::Husband).min(player.count_card(C::Wife));
        bonus += 3 * pairs;
    }
    if player.has_card(C::Architect) {
        let left = player.resources.resin + player.resources.pebble;
        bonus += left.min(6) as usize;
    }
    if player.has_card(C::Castle) {
        bonus += tally.common_constructions;
    }
    if player.has_card(C::EverTree) {
        bonus += tally.of_type(CardType::Prosperity);
    }
    if player.has_card(C::King) {
        let (basic, special) = player.claimed_event_counts();
        bonus += basic + 2 * special;
    }
    if player.has_card(C::Palace) {
        bonus += tally.unique_constructions;
    }
    if player.has_card(C::School) {
        bonus += tally.common_critters;
    }
    if player.has_card(C::Theater) {
        bonus += tally.unique_critters;
    }
    bonus as i32
}

/// Total points of `player` in `state`.
#[must_use]
pub fn points(state: &GameState, player: PlayerId) -> i32 {
    let p = state.player(player);

    let cards: i32 = p
        .city
        .iter()
        .map(|(card, copies)| {
            let stored: u32 = copies.iter().map(|c| c.resources.vp).sum();
            card.definition().base_vp * copies.len() as i32 + stored as i32
        })
        .sum();

    let events: i32 = p
        .claimed_events
        .iter()
        .map(|(event, claimed)| event.points(state, claimed))
        .sum();

    let adornments: i32 = p.played_adornments.iter().map(|a| a.points(p)).sum();

    cards + prosperity_bonus(p) + p.resources.vp as i32 + events + adornments
}

impl GameState {
    /// Points of every player, in seat order.
    #[must_use]
    pub fn final_scores(&self) -> Vec<(PlayerId, i32)> {
        self.players
            .player_ids()
            .map(|id| (id, points(self, id)))
            .collect()
    }

    /// Winner(s) of a finished game; `None` while the game is running.
    ///
    /// Ties break on claimed events, then on leftover resources.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_game_over() {
            return None;
        }
        let ranked: Vec<(PlayerId, (i32, usize, u32))> = self
            .final_scores()
            .into_iter()
            .map(|(id, score)| {
                let p = self.player(id);
                (id, (score, p.claimed_events.len(), p.resources.basic_total()))
            })
            .collect();
        let best = ranked.iter().map(|&(_, key)| key).max()?;
        let mut winners: Vec<PlayerId> = ranked
            .into_iter()
            .filter(|&(_, key)| key == best)
            .map(|(id, _)| id)
            .collect();
        if winners.len() == 1 {
            winners.pop().map(GameResult::Winner)
        } else {
            Some(GameResult::Winners(winners))
        }
    }
}
