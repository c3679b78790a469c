//! Core engine types: resources, players, RNG, configuration, inputs, state.
//!
//! Nothing here knows card rules; the entity registries and `rules`
//! build on these types.

pub mod resources;
pub mod player;
pub mod rng;
pub mod config;
pub mod input;
pub mod state;

pub use resources::{ResourceType, Resources};
pub use player::{ClaimedEvent, Player, PlayerId, PlayerMap, PlayerStatus, Season, WorkerPlacement};
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
pub use input::{
    Carried, Choice, EntityRef, GameInput, InputContext, InputKind, InputRecord, PaymentOptions,
    PlayedCardRef, SelectCards, SelectLocation, SelectOption, SelectPlayedCards, SelectPlayer,
    SelectResources,
};
pub use state::{GamePhase, GameState};
