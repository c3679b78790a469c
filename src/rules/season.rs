//! Seasons and passing.
//!
//! A player with no free workers either prepares for the next season or,
//! in autumn, ends their game. Preparing recalls every worker, raises the
//! worker count and triggers the season's bonus:
//!
//! | Season | Workers | Bonus |
//! |---|---|---|
//! | Spring | 3 | production |
//! | Summer | 4 | take up to two meadow cards |
//! | Autumn | 6 | production |

use tracing::info;

use crate::cards;
use crate::core::input::{EntityRef, GameInput, InputContext, InputKind};
use crate::core::player::{PlayerId, PlayerStatus, Season, WorkerPlacement};
use crate::core::state::GameState;
use crate::error::{ensure_legal, GameError, Result};

/// Meadow cards taken when summer begins.
const SUMMER_MEADOW_CARDS: usize = 2;

pub(crate) fn check_prepare(state: &GameState) -> Result<()> {
    let p = state.active();
    ensure_legal!(p.season != Season::Autumn, "{} is already in autumn", p.id);
    ensure_legal!(
        p.available_workers() == 0,
        "{} still has workers to place",
        p.id
    );
    Ok(())
}

pub(crate) fn check_game_end(state: &GameState) -> Result<()> {
    let p = state.active();
    ensure_legal!(p.season == Season::Autumn, "{} can only pass in autumn", p.id);
    ensure_legal!(
        p.available_workers() == 0,
        "{} still has workers to place",
        p.id
    );
    Ok(())
}

/// Bring every worker of `player` home. Events keep their claim but lose
/// the worker; destination cards are freed for other visitors.
pub(crate) fn recall_workers(state: &mut GameState, player: PlayerId) {
    let placements = std::mem::take(&mut state.player_mut(player).placed_workers);
    for placement in placements {
        match placement {
            WorkerPlacement::Location { location } => {
                if let Some(occupants) = state.locations.get_mut(&location) {
                    if let Some(i) = occupants.iter().position(|&o| o == player) {
                        occupants.remove(i);
                    }
                }
            }
            WorkerPlacement::Event { event } => {
                if let Some(claimed) = state.player_mut(player).claimed_events.get_mut(&event) {
                    claimed.has_worker = false;
                }
            }
            WorkerPlacement::Destination { card, owner } => {
                let copy = state
                    .player_mut(owner)
                    .city
                    .get_mut(&card)
                    .and_then(|copies| copies.iter_mut().find(|c| c.workers.contains(&player)));
                if let Some(copy) = copy {
                    if let Some(i) = copy.workers.iter().position(|&w| w == player) {
                        copy.workers.remove(i);
                    }
                }
            }
        }
    }
}

pub(crate) fn prepare_for_season(state: &mut GameState) -> Result<()> {
    let player = state.active_player;
    let current = state.player(player).season;
    let season = current
        .next()
        .ok_or_else(|| GameError::illegal(format!("{} is already in autumn", player)))?;

    recall_workers(state, player);
    let p = state.player_mut(player);
    p.season = season;
    p.num_workers = season.workers();
    info!(%player, ?season, "season prepared");

    match season {
        Season::Spring | Season::Autumn => {
            cards::activate_all_production(state, player, InputKind::PrepareForSeason)?;
        }
        Season::Summer => {
            let room = state
                .config
                .hand_limit
                .saturating_sub(state.player(player).hand.len());
            let max = SUMMER_MEADOW_CARDS.min(room).min(state.meadow.len());
            if max > 0 {
                let options = state.meadow.iter().copied().collect();
                let context = InputContext::new(InputKind::PrepareForSeason, EntityRef::Season);
                state.push_decision(GameInput::select_cards(context, options, 0, max));
            }
        }
        Season::Winter => {}
    }
    Ok(())
}

pub(crate) fn end_game(state: &mut GameState) {
    let player = state.active_player;
    state.player_mut(player).status = PlayerStatus::GameEnded;
    info!(%player, "player passed");
}

/// Resolve the summer meadow pick.
pub(crate) fn resolve(state: &mut GameState, input: &GameInput) -> Result<()> {
    let GameInput::SelectCards(s) = input else {
        return Err(GameError::invalid(format!("the season has no pending {}", input.kind())));
    };
    let player = state.active_player;
    for &card in &s.client_options {
        ensure_legal!(state.take_from_meadow(card), "{} is not in the meadow", card);
        state.give_card(player, card);
    }
    state.replenish_meadow();
    Ok(())
}
