//! Card definitions - static card data.
//!
//! `CardDefinition` holds the printed properties of a card: its type, cost,
//! base points, whether it is a critter or a construction, how many copies
//! are in the deck and which cards it pairs with for free play.
//!
//! Per-copy runtime data (stored points, visiting workers) lives in
//! `PlayedCard`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::resources::Resources;

/// Card colour. Events and scoring count cards by type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    /// Tan cards: one-time effect when played.
    Traveler,
    /// Green cards: activate when played and in spring and autumn.
    Production,
    /// Red cards: can be visited with a worker.
    Destination,
    /// Blue cards: passive bonuses.
    Governance,
    /// Purple cards: end-game points.
    Prosperity,
}

impl CardType {
    pub const ALL: [CardType; 5] = [
        CardType::Traveler,
        CardType::Production,
        CardType::Destination,
        CardType::Governance,
        CardType::Prosperity,
    ];
}

/// Every card in the base deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardName {
    Architect,
    Bard,
    BargeToad,
    Castle,
    Chapel,
    ChipSweep,
    Courthouse,
    Crane,
    Doctor,
    EverTree,
    Fairgrounds,
    Farm,
    Fool,
    GeneralStore,
    Historian,
    Husband,
    Inn,
    Innkeeper,
    Judge,
    King,
    Lookout,
    Mine,
    MinerMole,
    Monk,
    Palace,
    Peddler,
    PostOffice,
    PostalPigeon,
    Queen,
    Ranger,
    ResinRefinery,
    Ruins,
    School,
    Shepherd,
    Shopkeeper,
    Teacher,
    Theater,
    TwigBarge,
    University,
    Wanderer,
    Wife,
    Woodcarver,
}

/// Static card definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardDefinition {
    pub card: CardName,
    pub display_name: &'static str,
    pub card_type: CardType,
    pub cost: Resources,
    pub base_vp: i32,
    pub is_critter: bool,
    pub is_unique: bool,
    /// For a construction, the critters it lets in for free. For a critter,
    /// the construction that admits it.
    pub associated: &'static [CardName],
    /// Copies shuffled into the deck.
    pub copies: usize,
    /// Opponents may visit this destination too.
    pub is_open_destination: bool,
}

impl CardDefinition {
    #[must_use]
    pub fn is_construction(&self) -> bool {
        !self.is_critter
    }

    #[must_use]
    pub fn is_common(&self) -> bool {
        !self.is_unique
    }
}

const fn critter(
    card: CardName,
    display_name: &'static str,
    card_type: CardType,
    berries: u32,
    base_vp: i32,
    is_unique: bool,
    associated: &'static [CardName],
) -> CardDefinition {
    CardDefinition {
        card,
        display_name,
        card_type,
        cost: Resources::cost(0, 0, 0, berries),
        base_vp,
        is_critter: true,
        is_unique,
        associated,
        copies: if is_unique { 2 } else { 3 },
        is_open_destination: false,
    }
}

/// `cost` is `[twig, resin, pebble]`; constructions never cost berries.
const fn construction(
    card: CardName,
    display_name: &'static str,
    card_type: CardType,
    cost: [u32; 3],
    base_vp: i32,
    is_unique: bool,
    associated: &'static [CardName],
) -> CardDefinition {
    CardDefinition {
        card,
        display_name,
        card_type,
        cost: Resources::cost(cost[0], cost[1], cost[2], 0),
        base_vp,
        is_critter: false,
        is_unique,
        associated,
        copies: if is_unique { 2 } else { 3 },
        is_open_destination: false,
    }
}

const fn open(mut def: CardDefinition) -> CardDefinition {
    def.is_open_destination = true;
    def
}

const fn with_copies(mut def: CardDefinition, copies: usize) -> CardDefinition {
    def.copies = copies;
    def
}

use CardName as C;
use CardType as T;

/// Indexed by `CardName as usize`.
#[rustfmt::skip]
static DEFINITIONS: [CardDefinition; 42] = [
    critter(C::Architect, "Architect", T::Prosperity, 4, 2, true, &[C::Crane]),
    critter(C::Bard, "Bard", T::Traveler, 3, 0, true, &[C::Theater]),
    critter(C::BargeToad, "Barge Toad", T::Production, 2, 1, false, &[C::TwigBarge]),
    construction(C::Castle, "Castle", T::Prosperity, [2, 3, 3], 4, true, &[C::King]),
    construction(C::Chapel, "Chapel", T::Destination, [2, 1, 1], 2, true, &[C::Shepherd]),
    critter(C::ChipSweep, "Chip Sweep", T::Production, 3, 2, false, &[C::ResinRefinery]),
    construction(C::Courthouse, "Courthouse", T::Governance, [1, 1, 2], 2, true, &[C::Judge]),
    construction(C::Crane, "Crane", T::Governance, [0, 0, 1], 1, true, &[C::Architect]),
    critter(C::Doctor, "Doctor", T::Production, 4, 4, true, &[C::University]),
    construction(C::EverTree, "Ever Tree", T::Prosperity, [3, 3, 3], 5, true, &[]),
    construction(C::Fairgrounds, "Fairgrounds", T::Production, [1, 2, 1], 3, true, &[C::Fool]),
    with_copies(
        construction(C::Farm, "Farm", T::Production, [2, 1, 0], 1, false, &[C::Husband, C::Wife]),
        8,
    ),
    critter(C::Fool, "Fool", T::Traveler, 3, -2, true, &[C::Fairgrounds]),
    construction(C::GeneralStore, "General Store", T::Production, [0, 1, 1], 1, false,
        &[C::Shopkeeper]),
    critter(C::Historian, "Historian", T::Governance, 2, 1, true, &[]),
    critter(C::Husband, "Husband", T::Production, 2, 2, false, &[C::Farm]),
    open(construction(C::Inn, "Inn", T::Destination, [2, 1, 0], 2, false, &[C::Innkeeper])),
    critter(C::Innkeeper, "Innkeeper", T::Governance, 1, 1, true, &[C::Inn]),
    critter(C::Judge, "Judge", T::Governance, 3, 2, true, &[C::Courthouse]),
    critter(C::King, "King", T::Prosperity, 6, 4, true, &[C::Castle]),
    construction(C::Lookout, "Lookout", T::Destination, [1, 1, 1], 2, true, &[C::Wanderer]),
    construction(C::Mine, "Mine", T::Production, [1, 1, 1], 2, false, &[C::MinerMole]),
    critter(C::MinerMole, "Miner Mole", T::Production, 3, 1, false, &[C::Mine]),
    critter(C::Monk, "Monk", T::Production, 1, 0, true, &[]),
    construction(C::Palace, "Palace", T::Prosperity, [2, 3, 3], 4, true, &[C::Queen]),
    critter(C::Peddler, "Peddler", T::Production, 2, 1, false, &[C::Ruins]),
    open(construction(C::PostOffice, "Post Office", T::Destination, [1, 2, 0], 2, false,
        &[C::PostalPigeon])),
    critter(C::PostalPigeon, "Postal Pigeon", T::Traveler, 2, 0, false, &[C::PostOffice]),
    critter(C::Queen, "Queen", T::Destination, 5, 4, true, &[C::Palace]),
    critter(C::Ranger, "Ranger", T::Traveler, 2, 1, true, &[]),
    construction(C::ResinRefinery, "Resin Refinery", T::Production, [0, 1, 1], 1, false,
        &[C::ChipSweep]),
    construction(C::Ruins, "Ruins", T::Traveler, [0, 0, 0], 0, false, &[C::Peddler]),
    construction(C::School, "School", T::Prosperity, [2, 2, 0], 2, true, &[C::Teacher]),
    critter(C::Shepherd, "Shepherd", T::Traveler, 3, 1, true, &[C::Chapel]),
    critter(C::Shopkeeper, "Shopkeeper", T::Governance, 2, 1, true, &[C::GeneralStore]),
    critter(C::Teacher, "Teacher", T::Production, 2, 2, false, &[C::School]),
    construction(C::Theater, "Theater", T::Prosperity, [3, 1, 1], 3, true, &[C::Bard]),
    construction(C::TwigBarge, "Twig Barge", T::Production, [1, 0, 1], 1, false, &[C::BargeToad]),
    construction(C::University, "University", T::Destination, [0, 2, 1], 3, true, &[C::Doctor]),
    critter(C::Wanderer, "Wanderer", T::Traveler, 2, 1, false, &[C::Lookout]),
    critter(C::Wife, "Wife", T::Prosperity, 2, 2, false, &[C::Farm]),
    critter(C::Woodcarver, "Woodcarver", T::Production, 2, 2, false, &[]),
];

impl CardName {
    /// Every card, in definition order.
    pub const ALL: [CardName; 42] = [
        C::Architect,
        C::Bard,
        C::BargeToad,
        C::Castle,
        C::Chapel,
        C::ChipSweep,
        C::Courthouse,
        C::Crane,
        C::Doctor,
        C::EverTree,
        C::Fairgrounds,
        C::Farm,
        C::Fool,
        C::GeneralStore,
        C::Historian,
        C::Husband,
        C::Inn,
        C::Innkeeper,
        C::Judge,
        C::King,
        C::Lookout,
        C::Mine,
        C::MinerMole,
        C::Monk,
        C::Palace,
        C::Peddler,
        C::PostOffice,
        C::PostalPigeon,
        C::Queen,
        C::Ranger,
        C::ResinRefinery,
        C::Ruins,
        C::School,
        C::Shepherd,
        C::Shopkeeper,
        C::Teacher,
        C::Theater,
        C::TwigBarge,
        C::University,
        C::Wanderer,
        C::Wife,
        C::Woodcarver,
    ];

    /// Static data for this card.
    #[must_use]
    pub fn definition(self) -> &'static CardDefinition {
        &DEFINITIONS[self as usize]
    }

    /// Does this construction admit `critter` for free?
    ///
    /// The Ever Tree admits any critter.
    #[must_use]
    pub fn admits(self, critter: CardName) -> bool {
        let def = self.definition();
        if def.is_critter || !critter.definition().is_critter {
            return false;
        }
        self == C::EverTree || def.associated.contains(&critter)
    }

    /// The full deck, unshuffled.
    #[must_use]
    pub fn deck() -> Vec<CardName> {
        Self::ALL
            .iter()
            .flat_map(|&card| std::iter::repeat(card).take(card.definition().copies))
            .collect()
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition().display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_name() {
        for card in CardName::ALL {
            assert_eq!(card.definition().card, card);
        }
    }

    #[test]
    fn test_copies() {
        assert_eq!(C::Farm.definition().copies, 8);
        assert_eq!(C::Queen.definition().copies, 2);
        assert_eq!(C::Wanderer.definition().copies, 3);
        assert_eq!(CardName::deck().len(), 24 * 2 + 17 * 3 + 8);
    }

    #[test]
    fn test_associations_are_symmetric() {
        for card in CardName::ALL {
            let def = card.definition();
            for &other in def.associated {
                assert!(
                    other.definition().associated.contains(&card),
                    "{} -> {} has no back link",
                    card,
                    other
                );
            }
        }
    }

    #[test]
    fn test_admits() {
        assert!(C::Farm.admits(C::Husband));
        assert!(C::Farm.admits(C::Wife));
        assert!(!C::Farm.admits(C::Queen));
        assert!(C::EverTree.admits(C::Queen));
        assert!(!C::EverTree.admits(C::Farm));
        assert!(!C::Husband.admits(C::Farm));
    }

    #[test]
    fn test_costs() {
        assert_eq!(C::King.definition().cost, Resources::cost(0, 0, 0, 6));
        assert_eq!(C::University.definition().cost, Resources::cost(0, 2, 1, 0));
        assert!(C::Ruins.definition().cost.is_empty());
        assert_eq!(C::Fool.definition().base_vp, -2);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&C::EverTree).unwrap(), "\"EVER_TREE\"");
        assert_eq!(serde_json::to_string(&C::PostalPigeon).unwrap(), "\"POSTAL_PIGEON\"");
        assert_eq!(C::MinerMole.to_string(), "Miner Mole");
    }
}
