//! Card payment rules.
//!
//! A `PLAY_CARD` input names the resources handed over and, optionally, a
//! card that changes the price:
//!
//! - an associated construction with its critter slot free: the critter is free
//! - Innkeeper (discarded): a critter costs 3 fewer BERRY
//! - Crane (discarded): a construction costs up to 3 fewer of its resources
//! - Judge (stays): one unit of the cost may be swapped for another kind

use crate::core::input::PaymentOptions;
use crate::core::player::Player;
use crate::core::resources::{ResourceType, Resources};
use crate::error::{ensure_legal, GameError, Result};

use super::definition::CardName;

/// Discount granted by the Innkeeper and the Crane.
pub const DISCOUNT: u32 = 3;

/// The cost of a critter after discarding an Innkeeper.
#[must_use]
pub fn innkeeper_price(cost: &Resources) -> Resources {
    let mut price = *cost;
    price.berry = price.berry.saturating_sub(DISCOUNT);
    price
}

/// Cheapest Crane payment `player` can make for `cost`: keep the priciest
/// kinds, drop up to three units starting with berries.
#[must_use]
pub fn crane_price(cost: &Resources) -> Resources {
    let mut price = *cost;
    let mut left = DISCOUNT;
    for kind in [
        ResourceType::Berry,
        ResourceType::Twig,
        ResourceType::Resin,
        ResourceType::Pebble,
    ] {
        let cut = price.get(kind).min(left);
        price.remove(kind, cut);
        left -= cut;
    }
    price
}

/// Units of `cost` left unpaid by `paid`, counted per kind.
fn shortfall(cost: &Resources, paid: &Resources) -> u32 {
    ResourceType::BASIC
        .iter()
        .map(|&kind| cost.get(kind).saturating_sub(paid.get(kind)))
        .sum()
}

/// Would `player` satisfy the price of `card` with `payment`?
pub fn check_payment(player: &Player, card: CardName, payment: &PaymentOptions) -> Result<()> {
    let def = card.definition();
    let cost = &def.cost;
    let paid = &payment.resources;

    ensure_legal!(
        player.resources.can_afford(paid),
        "{} cannot afford the offered payment",
        player.id
    );

    let Some(modifier) = payment.card_to_use else {
        ensure_legal!(*paid == *cost, "{} must be paid in full", card);
        return Ok(());
    };

    ensure_legal!(
        player.has_card(modifier),
        "{} is not in {}'s city",
        modifier,
        player.id
    );

    match modifier {
        CardName::Innkeeper => {
            ensure_legal!(def.is_critter, "the Innkeeper only discounts critters");
            ensure_legal!(
                *paid == innkeeper_price(cost),
                "{} costs {} BERRY with the Innkeeper",
                card,
                innkeeper_price(cost).berry
            );
        }
        CardName::Crane => {
            ensure_legal!(def.is_construction(), "the Crane only discounts constructions");
            ensure_legal!(
                paid.is_basic_only() && paid.fits_within(cost),
                "the Crane payment must come from {}'s cost",
                card
            );
            ensure_legal!(
                paid.total() + DISCOUNT >= cost.total(),
                "the Crane removes at most {} resources",
                DISCOUNT
            );
        }
        CardName::Judge => {
            ensure_legal!(
                paid.is_basic_only() && paid.total() == cost.total(),
                "the Judge swaps resources, it does not discount them"
            );
            ensure_legal!(
                shortfall(cost, paid) <= 1,
                "the Judge swaps at most one resource"
            );
        }
        construction if construction.admits(card) => {
            let free_slot = player
                .city
                .get(&construction)
                .map_or(false, |copies| copies.iter().any(|copy| !copy.occupied));
            ensure_legal!(free_slot, "every {} already hosts a critter", construction);
            ensure_legal!(paid.is_empty(), "{} enters for free", card);
        }
        other => {
            return Err(GameError::illegal(format!(
                "{} cannot be used to play {}",
                other, card
            )))
        }
    }
    Ok(())
}

/// Payments `player` could make for `card`, one per applicable rule, in a
/// fixed order: full price, associated construction, Innkeeper, Crane.
#[must_use]
pub fn payment_candidates(player: &Player, card: CardName) -> Vec<PaymentOptions> {
    let def = card.definition();
    let mut out = vec![PaymentOptions::resources(def.cost)];

    if def.is_critter {
        let mut hosts: Vec<CardName> = player
            .city_cards()
            .map(|(c, _)| c)
            .filter(|c| c.admits(card))
            .collect();
        hosts.dedup();
        out.extend(
            hosts
                .into_iter()
                .map(|host| PaymentOptions::using(host, Resources::new())),
        );
        out.push(PaymentOptions::using(CardName::Innkeeper, innkeeper_price(&def.cost)));
    } else {
        out.push(PaymentOptions::using(CardName::Crane, crane_price(&def.cost)));
    }

    out.into_iter()
        .filter(|payment| check_payment(player, card, payment).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;

    fn player_with(resources: Resources) -> Player {
        let mut player = Player::new(PlayerId::new(0), "Ada");
        player.resources = resources;
        player
    }

    #[test]
    fn test_exact_cost() {
        let player = player_with(Resources::cost(2, 1, 0, 0));
        let farm = PaymentOptions::resources(Resources::cost(2, 1, 0, 0));
        assert!(check_payment(&player, CardName::Farm, &farm).is_ok());

        let short = PaymentOptions::resources(Resources::cost(1, 1, 0, 0));
        assert!(check_payment(&player, CardName::Farm, &short).is_err());
    }

    #[test]
    fn test_associated_construction() {
        let mut player = player_with(Resources::new());
        let free = PaymentOptions::using(CardName::Farm, Resources::new());
        assert!(check_payment(&player, CardName::Wife, &free).is_err());

        player.add_to_city(CardName::Farm);
        assert!(check_payment(&player, CardName::Wife, &free).is_ok());
        assert!(check_payment(&player, CardName::Queen, &free).is_err());

        if let Some(copy) = player.played_card_mut(CardName::Farm) {
            copy.occupied = true;
        }
        assert!(check_payment(&player, CardName::Wife, &free).is_err());
    }

    #[test]
    fn test_innkeeper() {
        let mut player = player_with(Resources::cost(0, 0, 0, 2));
        player.add_to_city(CardName::Innkeeper);
        let pay = PaymentOptions::using(CardName::Innkeeper, Resources::cost(0, 0, 0, 2));
        assert!(check_payment(&player, CardName::Queen, &pay).is_ok());
        assert!(check_payment(&player, CardName::Farm, &pay).is_err());
    }

    #[test]
    fn test_crane() {
        let mut player = player_with(Resources::cost(0, 3, 3, 0));
        player.add_to_city(CardName::Crane);
        let pay = PaymentOptions::using(CardName::Crane, Resources::cost(0, 3, 3, 0));
        assert!(check_payment(&player, CardName::Castle, &pay).is_ok());

        let too_little = PaymentOptions::using(CardName::Crane, Resources::cost(0, 1, 3, 0));
        assert!(check_payment(&player, CardName::Castle, &too_little).is_err());
        assert_eq!(crane_price(&Resources::cost(2, 3, 3, 0)), Resources::cost(0, 2, 3, 0));
    }

    #[test]
    fn test_judge_swaps_one() {
        let mut player = player_with(Resources::cost(2, 0, 0, 1));
        player.add_to_city(CardName::Judge);
        let swap = PaymentOptions::using(CardName::Judge, Resources::cost(2, 0, 0, 1));
        assert!(check_payment(&player, CardName::Farm, &swap).is_ok());

        let mut rich = player_with(Resources::cost(0, 0, 0, 3));
        rich.add_to_city(CardName::Judge);
        let double = PaymentOptions::using(CardName::Judge, Resources::cost(0, 0, 0, 3));
        assert!(check_payment(&rich, CardName::Farm, &double).is_err());
    }

    #[test]
    fn test_candidates_for_critter() {
        let mut player = player_with(Resources::cost(0, 0, 0, 2));
        player.add_to_city(CardName::Farm);
        let options = payment_candidates(&player, CardName::Husband);
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].card_to_use, Some(CardName::Farm));
    }
}
