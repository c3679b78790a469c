//! Card effects.
//!
//! ## Triggers
//!
//! - **On play**: a card acts once when it enters a city.
//! - **Production**: green cards act when played and again whenever the
//!   city produces (spring, autumn, Tax Relief, copying cards).
//! - **Visit**: destinations act when a worker is placed on them.
//! - **Passive**: the Historian, Shopkeeper and Courthouse react to later
//!   cards entering the same city.
//!
//! Every effect acts for one player and may push follow-up decisions,
//! which come back through [`resolve`].

use tracing::debug;

use crate::core::input::{
    Carried, Choice, GameInput, InputContext, InputKind, PlayedCardRef, SelectResources,
};
use crate::core::player::{PlayerId, Season, WorkerPlacement};
use crate::core::resources::{ResourceType, Resources};
use crate::core::state::GameState;
use crate::error::{ensure_legal, GameError, Result};
use crate::locations::{LocationKind, LocationName};

use super::definition::{CardName, CardType};
use super::payment::DISCOUNT;

use CardName as C;

fn stray(card: CardName, input: &GameInput) -> GameError {
    GameError::invalid(format!("{} has no pending {}", card, input.kind()))
}

fn spend(state: &mut GameState, player: PlayerId, paid: &Resources) -> Result<()> {
    ensure_legal!(
        state.player_mut(player).resources.spend(paid),
        "{} cannot afford the selected resources",
        player
    );
    Ok(())
}

fn gain_choice(state: &mut GameState, player: PlayerId, choice: Option<Choice>) -> Result<()> {
    match choice {
        Some(Choice::Resource(kind)) => {
            state.player_mut(player).resources.add(kind, 1);
            Ok(())
        }
        other => Err(GameError::invalid(format!("expected a resource, got {:?}", other))),
    }
}

fn add_vp(state: &mut GameState, player: PlayerId, amount: u32) {
    state
        .player_mut(player)
        .resources
        .add(ResourceType::Vp, amount);
}

// === Placement ===

/// Could `card` enter play for `player` right now, ignoring its price?
#[must_use]
pub fn can_place(state: &GameState, player: PlayerId, card: CardName) -> bool {
    let limit = state.config.city_limit;
    match card {
        C::Fool => state
            .opponents(player)
            .into_iter()
            .any(|other| state.player(other).can_add_to_city(C::Fool, limit)),
        C::Ruins => state
            .player(player)
            .city_cards()
            .any(|(c, _)| c != C::Ruins && c.definition().is_construction()),
        _ => state.player(player).can_add_to_city(card, limit),
    }
}

/// Cards worth at most `max_vp` that `player` could play for free: hand
/// first, then the meadow, without repeats.
#[must_use]
pub fn free_play_options(state: &GameState, player: PlayerId, max_vp: i32) -> Vec<CardName> {
    let hand = state.player(player).hand.iter().copied();
    let mut options: Vec<CardName> = Vec::new();
    for card in hand.chain(state.meadow.iter().copied()) {
        if !options.contains(&card)
            && card.definition().base_vp <= max_vp
            && can_place(state, player, card)
        {
            options.push(card);
        }
    }
    options
}

/// Take `card` for a free play, from the hand if held, else from the meadow.
pub fn take_for_free_play(state: &mut GameState, player: PlayerId, card: CardName) -> Result<()> {
    if state.player_mut(player).remove_from_hand(card) {
        return Ok(());
    }
    ensure_legal!(
        state.take_from_meadow(card),
        "{} is neither in hand nor in the meadow",
        card
    );
    state.replenish_meadow();
    Ok(())
}

/// Put `card` into play for `player`: into the city (or, for the Fool,
/// an opponent's city), then its on-play effect, then passive reactions.
pub fn place_card(
    state: &mut GameState,
    player: PlayerId,
    card: CardName,
    prev: InputKind,
) -> Result<()> {
    if card == C::Fool {
        let limit = state.config.city_limit;
        let targets: Vec<PlayerId> = state
            .opponents(player)
            .into_iter()
            .filter(|&other| state.player(other).can_add_to_city(C::Fool, limit))
            .collect();
        ensure_legal!(!targets.is_empty(), "no opponent has room for the Fool");
        state.push_decision(GameInput::select_player(InputContext::new(prev, card), targets));
    } else {
        state.player_mut(player).add_to_city(card);
        on_play(state, player, card, prev)?;
    }
    debug!(%player, %card, "card placed");
    trigger_passives(state, player, card, prev);
    Ok(())
}

/// The effect of `card` entering `player`'s city. The Compass calls this
/// again for travelers already in the city.
pub fn on_play(
    state: &mut GameState,
    player: PlayerId,
    card: CardName,
    prev: InputKind,
) -> Result<()> {
    if card.definition().card_type == CardType::Production {
        return activate_production(state, player, card, prev);
    }
    let context = InputContext::new(prev, card);
    match card {
        C::Bard => {
            let hand = state.player(player).hand.to_vec();
            if !hand.is_empty() {
                let max = hand.len().min(5);
                state.push_decision(GameInput::select_cards(context, hand, 0, max));
            }
        }
        C::PostalPigeon => {
            let revealed = state.reveal(2);
            let eligible: Vec<CardName> = revealed
                .iter()
                .copied()
                .filter(|&c| c.definition().base_vp <= 3 && can_place(state, player, c))
                .collect();
            if eligible.is_empty() {
                for c in revealed {
                    state.discard_card(c);
                }
            } else {
                let context = context.carrying(Carried::Cards(revealed));
                state.push_decision(GameInput::select_cards(context, eligible, 0, 1));
            }
        }
        C::Ranger => {
            let mut from: Vec<LocationName> = state.player(player).worker_locations().collect();
            from.sort();
            from.dedup();
            if !from.is_empty() {
                state.push_decision(GameInput::select_location(context, from));
            }
        }
        C::Ruins => {
            let options: Vec<PlayedCardRef> = state
                .player(player)
                .city_cards()
                .filter(|&(c, _)| c != C::Ruins && c.definition().is_construction())
                .map(|(c, _)| PlayedCardRef { owner: player, card: c })
                .collect();
            if !options.is_empty() {
                state.push_decision(GameInput::select_played_cards(context, options, 1, 1));
            }
        }
        C::Shepherd => {
            let chapel = state
                .player(player)
                .played_card(C::Chapel)
                .map_or(0, |c| c.resources.vp);
            let reward = Resources::of(ResourceType::Berry, 3).with(ResourceType::Vp, chapel);
            state.gain(player, reward);
        }
        C::Wanderer => {
            state.draw_cards(player, 3);
        }
        _ => {}
    }
    Ok(())
}

fn trigger_passives(state: &mut GameState, player: PlayerId, card: CardName, prev: InputKind) {
    let p = state.player(player);
    let def = card.definition();
    let historian = card != C::Historian && p.has_card(C::Historian);
    let shopkeeper = def.is_critter && card != C::Shopkeeper && p.has_card(C::Shopkeeper);
    let courthouse = def.is_construction() && card != C::Courthouse && p.has_card(C::Courthouse);

    if historian {
        state.draw_cards(player, 1);
    }
    if shopkeeper {
        state.player_mut(player).resources.add(ResourceType::Berry, 1);
    }
    if courthouse {
        let options = [ResourceType::Twig, ResourceType::Resin, ResourceType::Pebble]
            .into_iter()
            .map(Choice::Resource)
            .collect();
        let context = InputContext::new(prev, C::Courthouse);
        state.push_decision(GameInput::select_option(context, options));
    }
}

// === Production ===

fn production_refs(
    state: &GameState,
    owner: PlayerId,
    skip: &[CardName],
) -> Vec<PlayedCardRef> {
    state
        .player(owner)
        .city_cards()
        .filter(|&(c, _)| c.definition().card_type == CardType::Production && !skip.contains(&c))
        .map(|(card, _)| PlayedCardRef { owner, card })
        .collect()
}

/// Run the production effect of one `card` for `player`. Copies made by
/// the Chip Sweep, Miner Mole and Sundial are evaluated against `player`'s
/// own city.
pub fn activate_production(
    state: &mut GameState,
    player: PlayerId,
    card: CardName,
    prev: InputKind,
) -> Result<()> {
    let context = InputContext::new(prev, card);
    let p = state.player(player);
    let held = p.resources;
    let farms = p.count_card(C::Farm) as u32;

    match card {
        C::Farm => state.gain(player, Resources::of(ResourceType::Berry, 1)),
        C::Mine => state.gain(player, Resources::of(ResourceType::Pebble, 1)),
        C::ResinRefinery => state.gain(player, Resources::of(ResourceType::Resin, 1)),
        C::TwigBarge => state.gain(player, Resources::of(ResourceType::Twig, 2)),
        C::GeneralStore => {
            let berries = if farms > 0 { 2 } else { 1 };
            state.gain(player, Resources::of(ResourceType::Berry, berries));
        }
        C::BargeToad => state.gain(player, Resources::of(ResourceType::Twig, 2 * farms)),
        C::Fairgrounds => {
            state.draw_cards(player, 2);
        }
        C::Husband => {
            if p.has_card(C::Wife) && farms > 0 {
                state.push_decision(GameInput::select_one_any(context));
            }
        }
        C::ChipSweep => {
            let options = production_refs(state, player, &[C::ChipSweep]);
            if !options.is_empty() {
                state.push_decision(GameInput::select_played_cards(context, options, 1, 1));
            }
        }
        C::MinerMole => {
            let options: Vec<PlayedCardRef> = state
                .opponents(player)
                .into_iter()
                .flat_map(|other| production_refs(state, other, &[C::MinerMole, C::ChipSweep]))
                .collect();
            if !options.is_empty() {
                state.push_decision(GameInput::select_played_cards(context, options, 1, 1));
            }
        }
        C::Doctor | C::Monk => {
            let cap = if card == C::Doctor { 3 } else { 2 };
            let berries = held.berry.min(cap);
            if berries > 0 {
                let limits = Resources::of(ResourceType::Berry, berries);
                state.push_decision(GameInput::select_to_spend(context, limits, berries));
            }
        }
        C::Woodcarver => {
            let twigs = held.twig.min(3);
            if twigs > 0 {
                let limits = Resources::of(ResourceType::Twig, twigs);
                state.push_decision(GameInput::select_to_spend(context, limits, twigs));
            }
        }
        C::Peddler => {
            let limits = held.min_each(&Resources::cost(2, 2, 2, 2));
            let max = limits.basic_total().min(2);
            if max > 0 {
                state.push_decision(GameInput::select_to_spend(context, limits, max));
            }
        }
        C::Teacher => {
            let drawn = state.reveal(2);
            match drawn.len() {
                0 => {}
                1 => {
                    state.give_card(player, drawn[0]);
                }
                _ => {
                    let options = drawn.clone();
                    let context = context.carrying(Carried::Cards(drawn));
                    state.push_decision(GameInput::select_cards(context, options, 1, 1));
                }
            }
        }
        other => {
            return Err(GameError::illegal(format!("{} has no production effect", other)));
        }
    }
    Ok(())
}

/// Activate every production card in `player`'s city, once per copy. A
/// Husband only produces while paired with a Wife.
pub fn activate_all_production(
    state: &mut GameState,
    player: PlayerId,
    prev: InputKind,
) -> Result<()> {
    let p = state.player(player);
    let wives = p.count_card(C::Wife);
    let producers: Vec<(CardName, usize)> = p
        .city_cards()
        .filter(|(c, _)| c.definition().card_type == CardType::Production)
        .map(|(c, copies)| if c == C::Husband { (c, copies.min(wives)) } else { (c, copies) })
        .collect();

    for (card, copies) in producers {
        for _ in 0..copies {
            activate_production(state, player, card, prev)?;
        }
    }
    debug!(%player, "production activated");
    Ok(())
}

// === Destinations ===

/// Meadow cards `player` could play through an Inn (3 fewer of any kind).
#[must_use]
pub fn inn_options(state: &GameState, player: PlayerId) -> Vec<CardName> {
    let held = state.player(player).resources;
    let mut options = Vec::new();
    for &card in state.meadow.iter() {
        let cost = card.definition().cost;
        let payable = cost.min_each(&held).basic_total();
        if !options.contains(&card)
            && payable + DISCOUNT >= cost.basic_total()
            && can_place(state, player, card)
        {
            options.push(card);
        }
    }
    options
}

fn university_options(state: &GameState, player: PlayerId) -> Vec<PlayedCardRef> {
    state
        .player(player)
        .city
        .iter()
        .filter(|&(&c, copies)| c != C::University && copies.iter().any(|copy| !copy.is_visited()))
        .map(|(&card, _)| PlayedCardRef { owner: player, card })
        .collect()
}

/// Check that `player` may put a worker on `owner`'s copy of `card`.
pub fn check_visit(
    state: &GameState,
    player: PlayerId,
    card: CardName,
    owner: PlayerId,
) -> Result<()> {
    let def = card.definition();
    ensure_legal!(def.card_type == CardType::Destination, "{} is not a destination", card);
    if !state.players.contains(owner) {
        return Err(GameError::invalid(format!("{} is not at the table", owner)));
    }
    ensure_legal!(
        state.player(player).available_workers() > 0,
        "{} has no free workers",
        player
    );
    ensure_legal!(
        owner == player || def.is_open_destination,
        "only {} may visit their {}",
        owner,
        card
    );
    let copies = state
        .player(owner)
        .city
        .get(&card)
        .ok_or_else(|| GameError::illegal(format!("{} has no {}", owner, card)))?;
    ensure_legal!(
        copies.iter().any(|copy| !copy.is_visited()),
        "every {} of {} is occupied",
        card,
        owner
    );
    match card {
        C::Inn => ensure_legal!(
            !inn_options(state, player).is_empty(),
            "nothing in the meadow fits the Inn"
        ),
        C::Queen => ensure_legal!(
            !free_play_options(state, player, 3).is_empty(),
            "no card can be played through the Queen"
        ),
        C::University => ensure_legal!(
            !university_options(state, player).is_empty(),
            "no card can be sent to the University"
        ),
        _ => {}
    }
    Ok(())
}

/// Put `player`'s worker on `owner`'s `card` and run the visit.
pub fn visit_destination(
    state: &mut GameState,
    player: PlayerId,
    card: CardName,
    owner: PlayerId,
    prev: InputKind,
) -> Result<()> {
    let copy = state
        .player_mut(owner)
        .city
        .get_mut(&card)
        .and_then(|copies| copies.iter_mut().find(|copy| !copy.is_visited()))
        .ok_or_else(|| GameError::illegal(format!("every {} of {} is occupied", card, owner)))?;
    copy.workers.push(player);
    state
        .player_mut(player)
        .placed_workers
        .push(WorkerPlacement::Destination { card, owner });
    if owner != player {
        add_vp(state, owner, 1);
    }
    debug!(%player, %card, %owner, "destination visited");

    let context = InputContext::new(prev, card);
    match card {
        C::Chapel => {
            let stored = match state.player_mut(player).played_card_mut(C::Chapel) {
                Some(chapel) => {
                    chapel.resources.add(ResourceType::Vp, 1);
                    chapel.resources.vp
                }
                None => 0,
            };
            state.draw_cards(player, 2 * stored as usize);
        }
        C::Inn => {
            let options = inn_options(state, player);
            if !options.is_empty() {
                state.push_decision(GameInput::select_cards(context, options, 1, 1));
            }
        }
        C::Lookout => {
            let mut options = state.locations_of(LocationKind::Basic);
            options.extend(state.locations_of(LocationKind::Forest));
            state.push_decision(GameInput::select_location(context, options));
        }
        C::PostOffice => {
            let opponents = state.opponents(player);
            state.push_decision(GameInput::select_player(context, opponents));
        }
        C::Queen => {
            let options = free_play_options(state, player, 3);
            if !options.is_empty() {
                state.push_decision(GameInput::select_cards(context, options, 1, 1));
            }
        }
        C::University => {
            let options = university_options(state, player);
            if !options.is_empty() {
                state.push_decision(GameInput::select_played_cards(context, options, 1, 1));
            }
        }
        other => return Err(GameError::illegal(format!("{} is not a destination", other))),
    }
    Ok(())
}

fn ranger_targets(state: &GameState, player: PlayerId, from: LocationName) -> Vec<LocationName> {
    let p = state.player(player);
    let count = state.player_count();
    state
        .locations
        .iter()
        .filter_map(|(&location, occupants)| {
            let journey_ok = location
                .journey_length()
                .map_or(true, |n| p.season == Season::Autumn && p.hand.len() >= n);
            let open =
                location != from && journey_ok && location.has_room(occupants, player, count);
            open.then_some(location)
        })
        .collect()
}

fn move_worker(
    state: &mut GameState,
    player: PlayerId,
    from: LocationName,
    to: LocationName,
) -> Result<()> {
    let placed = &mut state.player_mut(player).placed_workers;
    let slot = placed
        .iter()
        .position(|w| *w == WorkerPlacement::Location { location: from })
        .ok_or_else(|| GameError::illegal(format!("{} has no worker on {}", player, from)))?;
    placed[slot] = WorkerPlacement::Location { location: to };

    if let Some(occupants) = state.locations.get_mut(&from) {
        if let Some(i) = occupants.iter().position(|&o| o == player) {
            occupants.remove(i);
        }
    }
    state
        .locations
        .get_mut(&to)
        .ok_or_else(|| GameError::illegal(format!("{} is not on the board", to)))?
        .push(player);
    Ok(())
}

fn refill_hand(state: &mut GameState, player: PlayerId) {
    let limit = state.config.hand_limit;
    state.draw_cards(player, limit);
}

// === Follow-ups ===

/// Apply an answer to a decision pushed by `card`.
pub fn resolve(card: CardName, state: &mut GameState, input: &GameInput) -> Result<()> {
    let player = state.active_player;
    let prev = input.kind();
    let next = InputContext::new(prev, card);
    let carried = input.context().and_then(|c| c.carried.clone());

    match (card, input) {
        (C::Bard, GameInput::SelectCards(s)) => {
            state.discard_from_hand(player, &s.client_options)?;
            add_vp(state, player, s.client_options.len() as u32);
        }
        (C::PostalPigeon, GameInput::SelectCards(s)) => {
            let Some(Carried::Cards(mut rest)) = carried else {
                return Err(stray(card, input));
            };
            for pick in &s.client_options {
                if let Some(pos) = rest.iter().position(|c| c == pick) {
                    rest.remove(pos);
                }
            }
            for c in rest {
                state.discard_card(c);
            }
            if let Some(&pick) = s.client_options.first() {
                place_card(state, player, pick, prev)?;
            }
        }
        (C::Ranger, GameInput::SelectLocation(s)) => {
            let target = s.client_options.ok_or_else(|| stray(card, input))?;
            match carried {
                None => {
                    let targets = ranger_targets(state, player, target);
                    if !targets.is_empty() {
                        let context = next.carrying(Carried::Location(target));
                        state.push_decision(GameInput::select_location(context, targets));
                    }
                }
                Some(Carried::Location(from)) => {
                    move_worker(state, player, from, target)?;
                    target.activate(state, player, prev)?;
                }
                Some(_) => return Err(stray(card, input)),
            }
        }
        (C::Ruins, GameInput::SelectPlayedCards(s)) => {
            for picked in &s.client_options {
                ensure_legal!(
                    picked.owner == player
                        && picked.card != C::Ruins
                        && picked.card.definition().is_construction(),
                    "the Ruins replace one of your own constructions"
                );
                let removed = state.player_mut(player).remove_from_city(picked.card);
                ensure_legal!(removed.is_some(), "{} is not in the city", picked.card);
                state.discard_card(picked.card);
                state.gain(player, picked.card.definition().cost);
            }
            state.draw_cards(player, 2);
        }
        (C::ChipSweep | C::MinerMole, GameInput::SelectPlayedCards(s)) => {
            for picked in &s.client_options {
                activate_production(state, player, picked.card, prev)?;
            }
        }
        (C::Doctor, GameInput::SelectResources(s)) => {
            spend(state, player, &s.client_options)?;
            add_vp(state, player, s.client_options.berry);
        }
        (C::Woodcarver, GameInput::SelectResources(s)) => {
            spend(state, player, &s.client_options)?;
            add_vp(state, player, s.client_options.twig);
        }
        (C::Monk, GameInput::SelectResources(s)) => {
            spend(state, player, &s.client_options)?;
            let given = s.client_options.berry;
            if given > 0 {
                let opponents = state.opponents(player);
                let context = next.carrying(Carried::Count(given));
                state.push_decision(GameInput::select_player(context, opponents));
            }
        }
        (C::Monk, GameInput::SelectPlayer(s)) => {
            let (Some(Carried::Count(given)), Some(target)) = (carried, s.client_options) else {
                return Err(stray(card, input));
            };
            state.gain(target, Resources::of(ResourceType::Berry, given));
            add_vp(state, player, 2 * given);
        }
        (C::Peddler, GameInput::SelectResources(s)) if s.to_spend => {
            spend(state, player, &s.client_options)?;
            let paid = s.client_options.total();
            if paid > 0 {
                let context = next.carrying(Carried::Count(paid));
                state.push_decision(GameInput::select_any(context, paid));
            }
        }
        (C::Peddler, GameInput::SelectResources(s)) => {
            state.gain(player, s.client_options);
        }
        (C::Teacher, GameInput::SelectCards(s)) => {
            let (Some(Carried::Cards(mut drawn)), Some(&keep)) =
                (carried, s.client_options.first())
            else {
                return Err(stray(card, input));
            };
            if let Some(pos) = drawn.iter().position(|&c| c == keep) {
                drawn.remove(pos);
            }
            state.give_card(player, keep);
            if let Some(&other) = drawn.first() {
                let opponents = state.opponents(player);
                let context = next.carrying(Carried::Card(other));
                state.push_decision(GameInput::select_player(context, opponents));
            }
        }
        (C::Teacher, GameInput::SelectPlayer(s)) => {
            let (Some(Carried::Card(gift)), Some(target)) = (carried, s.client_options) else {
                return Err(stray(card, input));
            };
            state.give_card(target, gift);
        }
        (C::Husband | C::Courthouse | C::University, GameInput::SelectOption(s)) => {
            gain_choice(state, player, s.client_options)?;
        }
        (C::Fool, GameInput::SelectPlayer(s)) => {
            let target = s.client_options.ok_or_else(|| stray(card, input))?;
            let limit = state.config.city_limit;
            ensure_legal!(
                target != player && state.player(target).can_add_to_city(C::Fool, limit),
                "the Fool cannot join {}'s city",
                target
            );
            state.player_mut(target).add_to_city(C::Fool);
        }
        (C::Inn, GameInput::SelectCards(s)) => {
            let pick = *s.client_options.first().ok_or_else(|| stray(card, input))?;
            let cost = pick.definition().cost;
            let due = cost.basic_total().saturating_sub(DISCOUNT);
            if due == 0 {
                ensure_legal!(state.take_from_meadow(pick), "{} is not in the meadow", pick);
                state.replenish_meadow();
                place_card(state, player, pick, prev)?;
            } else {
                let held = state.player(player).resources;
                state.push_decision(GameInput::SelectResources(SelectResources {
                    context: next.carrying(Carried::Card(pick)),
                    to_spend: true,
                    min_resources: due,
                    max_resources: due,
                    limits: Some(cost.min_each(&held)),
                    client_options: Resources::new(),
                }));
            }
        }
        (C::Inn, GameInput::SelectResources(s)) => {
            let Some(Carried::Card(pick)) = carried else {
                return Err(stray(card, input));
            };
            spend(state, player, &s.client_options)?;
            ensure_legal!(state.take_from_meadow(pick), "{} is not in the meadow", pick);
            state.replenish_meadow();
            place_card(state, player, pick, prev)?;
        }
        (C::Lookout, GameInput::SelectLocation(s)) => {
            let target = s.client_options.ok_or_else(|| stray(card, input))?;
            target.activate(state, player, prev)?;
        }
        (C::PostOffice, GameInput::SelectPlayer(s)) => {
            let target = s.client_options.ok_or_else(|| stray(card, input))?;
            let hand = state.player(player).hand.to_vec();
            let give = hand.len().min(2);
            if give > 0 {
                let context = next.carrying(Carried::Player(target));
                state.push_decision(GameInput::select_cards(context, hand, give, give));
            } else {
                refill_hand(state, player);
            }
        }
        (C::PostOffice, GameInput::SelectCards(s)) => match carried {
            Some(Carried::Player(target)) => {
                ensure_legal!(
                    state.player(player).hand_contains_all(&s.client_options),
                    "{} does not hold the selected cards",
                    player
                );
                for &gift in &s.client_options {
                    state.player_mut(player).remove_from_hand(gift);
                    state.give_card(target, gift);
                }
                let hand = state.player(player).hand.to_vec();
                if hand.is_empty() {
                    refill_hand(state, player);
                } else {
                    let max = hand.len();
                    state.push_decision(GameInput::select_cards(next, hand, 0, max));
                }
            }
            None => {
                state.discard_from_hand(player, &s.client_options)?;
                refill_hand(state, player);
            }
            Some(_) => return Err(stray(card, input)),
        },
        (C::Queen, GameInput::SelectCards(s)) => {
            let pick = *s.client_options.first().ok_or_else(|| stray(card, input))?;
            take_for_free_play(state, player, pick)?;
            place_card(state, player, pick, prev)?;
        }
        (C::University, GameInput::SelectPlayedCards(s)) => {
            let picked = *s.client_options.first().ok_or_else(|| stray(card, input))?;
            ensure_legal!(
                picked.owner == player && picked.card != C::University,
                "the University takes one of your other cards"
            );
            let removed = state.player_mut(player).remove_from_city(picked.card);
            ensure_legal!(removed.is_some(), "{} is not in the city", picked.card);
            state.discard_card(picked.card);
            let refund = picked.card.definition().cost.with(ResourceType::Vp, 1);
            state.gain(player, refund);
            let context = next.carrying(Carried::Card(picked.card));
            state.push_decision(GameInput::select_one_any(context));
        }
        _ => return Err(stray(card, input)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use im::Vector;

    fn setup() -> (GameState, PlayerId) {
        let state = GameState::new(GameConfig::new(2).with_seed(7).without_starting_hands());
        (state, PlayerId::new(0))
    }

    #[test]
    fn test_simple_production() {
        let (mut state, p0) = setup();
        for card in [C::Farm, C::GeneralStore, C::Mine, C::TwigBarge] {
            state.player_mut(p0).add_to_city(card);
        }
        activate_all_production(&mut state, p0, InputKind::PrepareForSeason).unwrap();

        let held = state.player(p0).resources;
        assert_eq!(held.berry, 3);
        assert_eq!(held.pebble, 1);
        assert_eq!(held.twig, 2);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn test_husband_needs_wife_and_farm() {
        let (mut state, p0) = setup();
        state.player_mut(p0).add_to_city(C::Husband);
        activate_all_production(&mut state, p0, InputKind::PrepareForSeason).unwrap();
        assert!(state.pending.is_empty());

        state.player_mut(p0).add_to_city(C::Wife);
        state.player_mut(p0).add_to_city(C::Farm);
        activate_all_production(&mut state, p0, InputKind::PrepareForSeason).unwrap();
        assert_eq!(state.pending.len(), 1);
        assert!(matches!(state.pending.head(), Some(GameInput::SelectOption(_))));
    }

    #[test]
    fn test_passives_react_to_new_cards() {
        let (mut state, p0) = setup();
        state.player_mut(p0).add_to_city(C::Historian);
        state.player_mut(p0).add_to_city(C::Shopkeeper);
        state.player_mut(p0).add_to_city(C::Courthouse);

        place_card(&mut state, p0, C::Wanderer, InputKind::PlayCard).unwrap();
        // three from the Wanderer, one from the Historian
        assert_eq!(state.player(p0).hand.len(), 4);
        assert_eq!(state.player(p0).resources.berry, 1);
        assert!(state.pending.is_empty());

        place_card(&mut state, p0, C::Mine, InputKind::PlayCard).unwrap();
        assert_eq!(state.player(p0).resources.pebble, 1);
        assert_eq!(state.pending.len(), 1);
    }

    #[test]
    fn test_fool_targets_opponent() {
        let (mut state, p0) = setup();
        place_card(&mut state, p0, C::Fool, InputKind::PlayCard).unwrap();
        assert!(!state.player(p0).has_card(C::Fool));
        match state.pending.head() {
            Some(GameInput::SelectPlayer(s)) => {
                assert_eq!(s.player_options, vec![PlayerId::new(1)])
            }
            other => panic!("unexpected decision {:?}", other),
        }
    }

    #[test]
    fn test_inn_options_apply_discount() {
        let (mut state, p0) = setup();
        state.meadow = Vector::from(vec![C::Farm, C::Castle, C::Farm]);
        assert_eq!(inn_options(&state, p0), vec![C::Farm]);

        state.player_mut(p0).resources = Resources::cost(2, 3, 0, 0);
        assert_eq!(inn_options(&state, p0), vec![C::Farm, C::Castle]);
    }

    #[test]
    fn test_free_play_options_prefer_hand() {
        let (mut state, p0) = setup();
        state.meadow = Vector::from(vec![C::Wanderer, C::King, C::Farm]);
        state.player_mut(p0).hand.push(C::Farm);
        state.player_mut(p0).hand.push(C::Palace);
        assert_eq!(free_play_options(&state, p0, 3), vec![C::Farm, C::Wanderer]);
    }

    #[test]
    fn test_visit_check() {
        let (mut state, p0) = setup();
        let p1 = PlayerId::new(1);
        state.player_mut(p1).add_to_city(C::Lookout);
        assert!(check_visit(&state, p0, C::Lookout, p1).is_err());
        assert!(check_visit(&state, p1, C::Lookout, p1).is_ok());

        state.player_mut(p1).add_to_city(C::PostOffice);
        assert!(check_visit(&state, p0, C::PostOffice, p1).is_ok());
        assert!(check_visit(&state, p0, C::Farm, p1).is_err());
    }
}
