//! Player identification, per-player storage and the player record.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Seat order is turn order.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexed by `PlayerId`.
//!
//! ## Player
//!
//! Everything one player owns: resources, hand, city, claimed events,
//! adornments and workers.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use super::resources::Resources;
use crate::cards::{CardName, CardType, PlayedCard};
use crate::events::EventName;
use crate::adornments::AdornmentName;
use crate::locations::LocationName;

/// Player identifier (0-based seat index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use everdell_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use everdell_engine::core::{PlayerId, PlayerMap};
///
/// let mut workers: PlayerMap<u32> = PlayerMap::new(3, |_| 2);
/// workers[PlayerId::new(1)] += 1;
/// assert_eq!(workers[PlayerId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Does this map have an entry for `player`?
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs in turn order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A player's current season.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    #[default]
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// The season after this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Season> {
        match self {
            Season::Winter => Some(Season::Spring),
            Season::Spring => Some(Season::Summer),
            Season::Summer => Some(Season::Autumn),
            Season::Autumn => None,
        }
    }

    /// Total workers a player owns during this season.
    #[must_use]
    pub fn workers(self) -> u32 {
        match self {
            Season::Winter => 2,
            Season::Spring => 3,
            Season::Summer => 4,
            Season::Autumn => 6,
        }
    }
}

/// Whether a player is still taking turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    #[default]
    Playing,
    /// The player has passed for the rest of the game.
    GameEnded,
}

/// Where one deployed worker sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerPlacement {
    Location { location: LocationName },
    Event { event: EventName },
    Destination { card: CardName, owner: PlayerId },
}

/// Data attached to a claimed event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedEvent {
    /// Cards placed beneath the event.
    pub stored_cards: Vec<CardName>,
    /// Resources placed on the event.
    #[serde(default)]
    pub stored_resources: Resources,
    pub has_worker: bool,
}

impl ClaimedEvent {
    /// A freshly claimed event with a worker on it.
    #[must_use]
    pub fn with_worker() -> Self {
        Self {
            has_worker: true,
            ..Self::default()
        }
    }
}

/// The full record of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Opaque secret used by the transport layer. The engine never reads it.
    pub secret: String,
    pub season: Season,
    pub status: PlayerStatus,
    pub resources: Resources,
    pub hand: SmallVec<[CardName; 8]>,
    pub city: OrdMap<CardName, Vec<PlayedCard>>,
    pub claimed_events: OrdMap<EventName, ClaimedEvent>,
    pub adornments_in_hand: Vec<AdornmentName>,
    pub played_adornments: Vec<AdornmentName>,
    pub num_workers: u32,
    pub placed_workers: Vec<WorkerPlacement>,
}

impl Player {
    /// A player at the start of the game: winter, no cards, no resources.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            secret: String::new(),
            season: Season::Winter,
            status: PlayerStatus::Playing,
            resources: Resources::new(),
            hand: SmallVec::new(),
            city: OrdMap::new(),
            claimed_events: OrdMap::new(),
            adornments_in_hand: Vec::new(),
            played_adornments: Vec::new(),
            num_workers: Season::Winter.workers(),
            placed_workers: Vec::new(),
        }
    }

    /// Has this player passed?
    #[must_use]
    pub fn has_passed(&self) -> bool {
        self.status == PlayerStatus::GameEnded
    }

    // === Workers ===

    /// Workers not yet deployed this season.
    #[must_use]
    pub fn available_workers(&self) -> u32 {
        self.num_workers
            .saturating_sub(self.placed_workers.len() as u32)
    }

    /// Locations holding one of this player's workers, in placement order.
    pub fn worker_locations(&self) -> impl Iterator<Item = LocationName> + '_ {
        self.placed_workers.iter().filter_map(|p| match p {
            WorkerPlacement::Location { location } => Some(*location),
            _ => None,
        })
    }

    // === Hand ===

    /// Copies of `card` in hand.
    #[must_use]
    pub fn hand_count(&self, card: CardName) -> usize {
        self.hand.iter().filter(|&&c| c == card).count()
    }

    /// Remove one copy of `card` from hand. Returns false if absent.
    pub fn remove_from_hand(&mut self, card: CardName) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Does the hand contain every card of `cards` (as a multiset)?
    #[must_use]
    pub fn hand_contains_all(&self, cards: &[CardName]) -> bool {
        cards
            .iter()
            .all(|&card| self.hand_count(card) >= cards.iter().filter(|&&c| c == card).count())
    }

    // === City ===

    /// Copies of `card` in the city.
    #[must_use]
    pub fn count_card(&self, card: CardName) -> usize {
        self.city.get(&card).map_or(0, Vec::len)
    }

    /// Is at least one copy of `card` in the city?
    #[must_use]
    pub fn has_card(&self, card: CardName) -> bool {
        self.count_card(card) > 0
    }

    /// Iterate over `(card, copies)` in the city.
    pub fn city_cards(&self) -> impl Iterator<Item = (CardName, usize)> + '_ {
        self.city.iter().map(|(&card, copies)| (card, copies.len()))
    }

    /// Number of city cards matching `pred`, counting copies.
    pub fn count_where(&self, pred: impl Fn(CardName) -> bool) -> usize {
        self.city_cards()
            .filter(|&(card, _)| pred(card))
            .map(|(_, n)| n)
            .sum()
    }

    /// Number of city cards of a type.
    #[must_use]
    pub fn count_type(&self, card_type: CardType) -> usize {
        self.count_where(|c| c.definition().card_type == card_type)
    }

    #[must_use]
    pub fn num_critters(&self) -> usize {
        self.count_where(|c| c.definition().is_critter)
    }

    #[must_use]
    pub fn num_constructions(&self) -> usize {
        self.count_where(|c| !c.definition().is_critter)
    }

    /// City spaces in use. Wanderers take none; a Husband and Wife pair share one.
    #[must_use]
    pub fn city_occupancy(&self) -> usize {
        let total = self.count_where(|c| c != CardName::Wanderer);
        let pairs = self
            .count_card(CardName::Husband)
            .min(self.count_card(CardName::Wife));
        total - pairs
    }

    /// Can `card` be added to this city without exceeding `city_limit`?
    #[must_use]
    pub fn can_add_to_city(&self, card: CardName, city_limit: usize) -> bool {
        let def = card.definition();
        if def.is_unique && self.has_card(card) {
            return false;
        }
        if card == CardName::Wanderer {
            return true;
        }
        let shares_space = match card {
            CardName::Husband => {
                self.count_card(CardName::Wife) > self.count_card(CardName::Husband)
            }
            CardName::Wife => {
                self.count_card(CardName::Husband) > self.count_card(CardName::Wife)
            }
            _ => false,
        };
        shares_space || self.city_occupancy() < city_limit
    }

    /// Add a fresh copy of `card` to the city.
    pub fn add_to_city(&mut self, card: CardName) {
        self.city
            .entry(card)
            .or_insert_with(Vec::new)
            .push(PlayedCard::default());
    }

    /// Remove one copy of `card` from the city, preferring an unoccupied copy.
    pub fn remove_from_city(&mut self, card: CardName) -> Option<PlayedCard> {
        let copies = self.city.get_mut(&card)?;
        let pos = copies
            .iter()
            .position(|copy| !copy.occupied && !copy.is_visited())
            .unwrap_or(copies.len() - 1);
        let removed = copies.remove(pos);
        if copies.is_empty() {
            self.city.remove(&card);
        }
        Some(removed)
    }

    /// The first copy of `card`, if any.
    #[must_use]
    pub fn played_card(&self, card: CardName) -> Option<&PlayedCard> {
        self.city.get(&card).and_then(|copies| copies.first())
    }

    /// Mutable access to the first copy of `card`, if any.
    pub fn played_card_mut(&mut self, card: CardName) -> Option<&mut PlayedCard> {
        self.city.get_mut(&card).and_then(|copies| copies.first_mut())
    }

    // === Events ===

    /// Number of claimed basic and special events.
    #[must_use]
    pub fn claimed_event_counts(&self) -> (usize, usize) {
        let basic = self
            .claimed_events
            .keys()
            .filter(|e| e.definition().is_basic)
            .count();
        (basic, self.claimed_events.len() - basic)
    }
}
