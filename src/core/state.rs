//! Game state.
//!
//! ## GameState
//!
//! Complete, serializable snapshot of a game:
//! - Configuration, turn counter, phase and active player
//! - Every player's record
//! - Shared board: meadow, deck, discard pile, location occupancy and
//!   event claims
//! - Pending-decision queue and accepted-input history
//! - RNG
//!
//! Transitions never mutate a state observed by the caller; they clone it
//! and return the clone. Board collections use `im` persistent structures so
//! that the clone is cheap.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::GameConfig;
use super::input::{GameInput, InputRecord};
use super::player::{Player, PlayerId, PlayerMap, PlayerStatus};
use super::resources::Resources;
use super::rng::GameRng;
use crate::adornments::AdornmentName;
use crate::cards::CardName;
use crate::error::{ensure_legal, Result};
use crate::events::EventName;
use crate::locations::{LocationKind, LocationName};
use crate::stack::PendingQueue;

/// Whether the game is still accepting inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    #[default]
    InProgress,
    GameOver,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub config: GameConfig,

    // === Game Progression ===
    /// Turn number (starts at 1).
    pub turn_number: u32,
    pub phase: GamePhase,
    pub active_player: PlayerId,

    // === Players ===
    pub players: PlayerMap<Player>,

    // === Board ===
    pub meadow: Vector<CardName>,
    /// Draw pile; the front is the top.
    pub deck: Vector<CardName>,
    pub discard: Vector<CardName>,
    /// Locations on the board and the workers on each.
    pub locations: OrdMap<LocationName, Vec<PlayerId>>,
    /// Events on the board and who claimed each.
    pub events: OrdMap<EventName, Option<PlayerId>>,

    // === Resolution ===
    pub pending: PendingQueue,
    pub history: Vector<InputRecord>,

    pub rng: GameRng,
}

impl GameState {
    /// Set up a new game: shuffle the deck, reveal the board, deal hands
    /// and adornments, and fill the meadow.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut rng = GameRng::new(config.seed);

        let mut cards = CardName::deck();
        rng.shuffle(&mut cards);

        let mut locations = OrdMap::new();
        let forest: Vec<LocationName> = LocationName::ALL
            .iter()
            .copied()
            .filter(|l| l.definition().kind == LocationKind::Forest)
            .collect();
        for location in LocationName::ALL {
            if location.definition().kind != LocationKind::Forest {
                locations.insert(location, Vec::new());
            }
        }
        for location in rng.sample(&forest, config.forest_locations) {
            locations.insert(location, Vec::new());
        }

        let mut events = OrdMap::new();
        let special: Vec<EventName> = EventName::ALL
            .iter()
            .copied()
            .filter(|e| !e.definition().is_basic)
            .collect();
        for event in EventName::ALL {
            if event.definition().is_basic {
                events.insert(event, None);
            }
        }
        for event in rng.sample(&special, config.special_events) {
            events.insert(event, None);
        }

        let players = PlayerMap::new(config.player_count, |id| {
            Player::new(id, config.player_names[id.index()].clone())
        });

        let mut state = Self {
            turn_number: 1,
            phase: GamePhase::InProgress,
            active_player: PlayerId::new(0),
            players,
            meadow: Vector::new(),
            deck: Vector::from(cards),
            discard: Vector::new(),
            locations,
            events,
            pending: PendingQueue::new(),
            history: Vector::new(),
            rng,
            config,
        };

        if state.config.pearlbrook() {
            let mut adornments = AdornmentName::ALL.to_vec();
            state.rng.shuffle(&mut adornments);
            let per_player = state.config.adornments_per_player;
            for (seat, dealt) in adornments.chunks(per_player).enumerate() {
                let id = PlayerId::new(seat as u8);
                if !state.players.contains(id) {
                    break;
                }
                state.players[id].adornments_in_hand = dealt.to_vec();
            }
        }

        for id in PlayerId::all(state.config.player_count) {
            let count = state.config.starting_hand_size(id);
            state.draw_cards(id, count);
        }
        state.replenish_meadow();

        info!(
            players = state.config.player_count,
            seed = state.config.seed,
            "game created"
        );
        state
    }

    // === Queries ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active(&self) -> &Player {
        &self.players[self.active_player]
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Every other player, in turn order starting after `player`.
    #[must_use]
    pub fn opponents(&self, player: PlayerId) -> Vec<PlayerId> {
        let n = self.player_count();
        (1..n)
            .map(|offset| PlayerId::new(((player.index() + offset) % n) as u8))
            .collect()
    }

    /// Next player after `player` in turn order who is still playing.
    #[must_use]
    pub fn next_playing_after(&self, player: PlayerId) -> Option<PlayerId> {
        let n = self.player_count();
        (1..=n)
            .map(|offset| PlayerId::new(((player.index() + offset) % n) as u8))
            .find(|&id| self.players[id].status == PlayerStatus::Playing)
    }

    /// Forest locations on the board.
    #[must_use]
    pub fn forest_locations(&self) -> Vec<LocationName> {
        self.locations
            .keys()
            .copied()
            .filter(|l| l.definition().kind == LocationKind::Forest)
            .collect()
    }

    /// Locations of a kind on the board.
    #[must_use]
    pub fn locations_of(&self, kind: LocationKind) -> Vec<LocationName> {
        self.locations
            .keys()
            .copied()
            .filter(|l| l.definition().kind == kind)
            .collect()
    }

    // === Cards ===

    /// Take the top card, reshuffling the discard pile into an empty deck.
    pub fn draw_from_deck(&mut self) -> Option<CardName> {
        if self.deck.is_empty() && !self.discard.is_empty() {
            let mut cards: Vec<CardName> = self.discard.iter().copied().collect();
            self.rng.shuffle(&mut cards);
            self.discard = Vector::new();
            self.deck = Vector::from(cards);
            debug!(cards = self.deck.len(), "discard pile reshuffled into deck");
        }
        self.deck.pop_front()
    }

    /// Take up to `count` cards off the deck without putting them in a hand.
    pub fn reveal(&mut self, count: usize) -> Vec<CardName> {
        (0..count).map_while(|_| self.draw_from_deck()).collect()
    }

    /// Draw up to `count` cards into a hand, stopping at the hand limit.
    /// Returns the number drawn.
    pub fn draw_cards(&mut self, player: PlayerId, count: usize) -> usize {
        let room = self
            .config
            .hand_limit
            .saturating_sub(self.players[player].hand.len());
        let mut drawn = 0;
        for _ in 0..count.min(room) {
            match self.draw_from_deck() {
                Some(card) => {
                    self.players[player].hand.push(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Put `card` in a hand, or on the discard pile if the hand is full.
    /// Returns true when the card reached the hand.
    pub fn give_card(&mut self, player: PlayerId, card: CardName) -> bool {
        if self.players[player].hand.len() < self.config.hand_limit {
            self.players[player].hand.push(card);
            true
        } else {
            self.discard.push_back(card);
            false
        }
    }

    pub fn discard_card(&mut self, card: CardName) {
        self.discard.push_back(card);
    }

    /// Move `cards` from a hand to the discard pile. Nothing moves unless the
    /// hand holds all of them.
    pub fn discard_from_hand(&mut self, player: PlayerId, cards: &[CardName]) -> Result<()> {
        ensure_legal!(
            self.players[player].hand_contains_all(cards),
            "{} does not hold the selected cards",
            player
        );
        for &card in cards {
            self.players[player].remove_from_hand(card);
            self.discard.push_back(card);
        }
        Ok(())
    }

    /// Remove one copy of `card` from the meadow without refilling it.
    pub fn take_from_meadow(&mut self, card: CardName) -> bool {
        match self.meadow.index_of(&card) {
            Some(index) => {
                self.meadow.remove(index);
                true
            }
            None => false,
        }
    }

    /// Refill the meadow from the deck.
    pub fn replenish_meadow(&mut self) {
        while self.meadow.len() < self.config.meadow_size {
            match self.draw_from_deck() {
                Some(card) => self.meadow.push_back(card),
                None => break,
            }
        }
    }

    // === Resources ===

    pub fn gain(&mut self, player: PlayerId, resources: Resources) {
        self.players[player].resources.add_all(&resources);
    }

    // === Decisions ===

    /// Queue a follow-up decision for the active player.
    pub fn push_decision(&mut self, decision: GameInput) {
        debug!(decision = %decision, "decision pushed");
        self.pending.push(decision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state(players: usize) -> GameState {
        GameState::new(GameConfig::new(players).with_seed(42))
    }

    #[test]
    fn test_setup_deals_hands_by_seat() {
        let state = new_state(3);
        assert_eq!(state.player(PlayerId::new(0)).hand.len(), 5);
        assert_eq!(state.player(PlayerId::new(2)).hand.len(), 7);
        assert_eq!(state.meadow.len(), 8);
        assert_eq!(
            state.deck.len(),
            CardName::deck().len() - 5 - 6 - 7 - 8
        );
    }

    #[test]
    fn test_setup_board() {
        let state = new_state(2);
        assert_eq!(state.forest_locations().len(), 3);
        assert_eq!(state.locations_of(LocationKind::Basic).len(), 8);
        assert_eq!(state.locations_of(LocationKind::Journey).len(), 4);
        assert_eq!(state.events.len(), 8);
        assert!(state.events.values().all(Option::is_none));

        let four = new_state(4);
        assert_eq!(four.forest_locations().len(), 4);
    }

    #[test]
    fn test_setup_is_seeded() {
        assert_eq!(new_state(2), new_state(2));
        let other = GameState::new(GameConfig::new(2).with_seed(43));
        assert_ne!(new_state(2).deck, other.deck);
    }

    #[test]
    fn test_pearlbrook_deals_adornments() {
        let state = GameState::new(GameConfig::new(4).with_pearlbrook(true));
        for (_, player) in state.players.iter() {
            assert_eq!(player.adornments_in_hand.len(), 2);
        }
        let plain = new_state(2);
        assert!(plain.active().adornments_in_hand.is_empty());
    }

    #[test]
    fn test_draw_respects_hand_limit() {
        let mut state = GameState::new(GameConfig::new(2).without_starting_hands());
        let p0 = PlayerId::new(0);
        assert_eq!(state.draw_cards(p0, 10), 8);
        assert_eq!(state.draw_cards(p0, 1), 0);
        assert!(!state.give_card(p0, CardName::Farm));
        assert_eq!(state.discard.back(), Some(&CardName::Farm));
    }

    #[test]
    fn test_empty_deck_reshuffles_discard() {
        let mut state = new_state(2);
        state.deck = Vector::new();
        state.discard = Vector::from(vec![CardName::Farm, CardName::Mine]);

        let drawn = state.reveal(3);
        assert_eq!(drawn.len(), 2);
        assert!(state.discard.is_empty());
        assert!(state.deck.is_empty());
    }

    #[test]
    fn test_meadow_take_and_refill() {
        let mut state = new_state(2);
        let card = state.meadow[0];
        assert!(state.take_from_meadow(card));
        assert_eq!(state.meadow.len(), 7);
        state.replenish_meadow();
        assert_eq!(state.meadow.len(), 8);
    }

    #[test]
    fn test_turn_order_helpers() {
        let mut state = new_state(3);
        assert_eq!(
            state.opponents(PlayerId::new(1)),
            vec![PlayerId::new(2), PlayerId::new(0)]
        );
        state.players[PlayerId::new(1)].status = PlayerStatus::GameEnded;
        assert_eq!(state.next_playing_after(PlayerId::new(0)), Some(PlayerId::new(2)));
    }
}
