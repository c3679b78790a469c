//! Game configuration.
//!
//! A `GameConfig` is built once, handed to `GameState::new` and stored in
//! the state so that every rule reading a limit sees the same value.
//!
//! ```
//! use everdell_engine::core::GameConfig;
//!
//! let config = GameConfig::new(3)
//!     .with_seed(7)
//!     .with_pearlbrook(true);
//!
//! assert_eq!(config.hand_limit, 8);
//! assert_eq!(config.forest_locations, 4);
//! assert_eq!(config.adornments_per_player, 2);
//! ```

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;
/// Largest supported table.
pub const MAX_PLAYERS: usize = 4;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Number of players (2-4).
    pub player_count: usize,

    /// Display names, one per seat.
    pub player_names: Vec<String>,

    /// RNG seed for deck order and board setup.
    pub seed: u64,

    /// Maximum cards in hand.
    pub hand_limit: usize,

    /// Maximum occupied city spaces.
    pub city_limit: usize,

    /// Face-up meadow slots.
    pub meadow_size: usize,

    /// Deal each seat `5 + seat index` cards at setup.
    pub deal_starting_hands: bool,

    /// Special events revealed at setup.
    pub special_events: usize,

    /// Forest locations revealed at setup.
    pub forest_locations: usize,

    /// Adornments dealt to each player. Zero disables the Pearlbrook module.
    pub adornments_per_player: usize,
}

impl GameConfig {
    /// Create a configuration with the standard limits.
    pub fn new(player_count: usize) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count),
            "Player count must be between {} and {}",
            MIN_PLAYERS,
            MAX_PLAYERS
        );

        Self {
            player_count,
            player_names: PlayerId::all(player_count)
                .map(|p| format!("Player {}", p.0 + 1))
                .collect(),
            seed: 0,
            hand_limit: 8,
            city_limit: 15,
            meadow_size: 8,
            deal_starting_hands: true,
            special_events: 4,
            forest_locations: if player_count == 2 { 3 } else { 4 },
            adornments_per_player: 0,
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set display names. Extra names are ignored; missing ones keep their default.
    #[must_use]
    pub fn with_player_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        for (slot, name) in self.player_names.iter_mut().zip(names) {
            *slot = name.into();
        }
        self
    }

    /// Start every player with an empty hand.
    #[must_use]
    pub fn without_starting_hands(mut self) -> Self {
        self.deal_starting_hands = false;
        self
    }

    /// Enable or disable Pearlbrook adornments.
    #[must_use]
    pub fn with_pearlbrook(mut self, enabled: bool) -> Self {
        self.adornments_per_player = if enabled { 2 } else { 0 };
        self
    }

    /// Set the number of revealed special events.
    #[must_use]
    pub fn with_special_events(mut self, count: usize) -> Self {
        self.special_events = count;
        self
    }

    /// Set the number of revealed forest locations.
    #[must_use]
    pub fn with_forest_locations(mut self, count: usize) -> Self {
        self.forest_locations = count;
        self
    }

    /// Is the Pearlbrook module on?
    #[must_use]
    pub fn pearlbrook(&self) -> bool {
        self.adornments_per_player > 0
    }

    /// Cards dealt to `player` at setup.
    #[must_use]
    pub fn starting_hand_size(&self, player: PlayerId) -> usize {
        if self.deal_starting_hands {
            5 + player.index()
        } else {
            0
        }
    }
}
