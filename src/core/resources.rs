//! Resource ledger.
//!
//! Players, cards and events hold counted resources. Counts are unsigned,
//! so a ledger can never go negative; spending more than is held fails
//! without touching the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A countable resource kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Berry,
    Twig,
    Resin,
    Pebble,
    Pearl,
    /// Point tokens.
    Vp,
}

impl ResourceType {
    /// Every resource kind.
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Berry,
        ResourceType::Twig,
        ResourceType::Resin,
        ResourceType::Pebble,
        ResourceType::Pearl,
        ResourceType::Vp,
    ];

    /// The four kinds an "ANY" reward may be taken as.
    pub const BASIC: [ResourceType; 4] = [
        ResourceType::Berry,
        ResourceType::Twig,
        ResourceType::Resin,
        ResourceType::Pebble,
    ];

    /// Is this one of the four basic resources?
    #[must_use]
    pub fn is_basic(self) -> bool {
        Self::BASIC.contains(&self)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceType::Berry => "BERRY",
            ResourceType::Twig => "TWIG",
            ResourceType::Resin => "RESIN",
            ResourceType::Pebble => "PEBBLE",
            ResourceType::Pearl => "PEARL",
            ResourceType::Vp => "VP",
        };
        f.write_str(name)
    }
}

/// A bag of resources.
///
/// ```
/// use everdell_engine::core::{Resources, ResourceType};
///
/// let mut purse = Resources::new().with(ResourceType::Twig, 2);
/// purse.add(ResourceType::Berry, 1);
///
/// let cost = Resources::cost(2, 0, 0, 0);
/// assert!(purse.can_afford(&cost));
/// assert!(purse.spend(&cost));
/// assert_eq!(purse.get(ResourceType::Twig), 0);
/// assert_eq!(purse.total(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Resources {
    pub berry: u32,
    pub twig: u32,
    pub resin: u32,
    pub pebble: u32,
    pub pearl: u32,
    pub vp: u32,
}

impl Resources {
    /// An empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            berry: 0,
            twig: 0,
            resin: 0,
            pebble: 0,
            pearl: 0,
            vp: 0,
        }
    }

    /// A card cost in the order printed on the cards: twig, resin, pebble, berry.
    #[must_use]
    pub const fn cost(twig: u32, resin: u32, pebble: u32, berry: u32) -> Self {
        Self {
            berry,
            twig,
            resin,
            pebble,
            pearl: 0,
            vp: 0,
        }
    }

    /// A ledger holding `amount` of a single kind.
    #[must_use]
    pub fn of(kind: ResourceType, amount: u32) -> Self {
        Self::new().with(kind, amount)
    }

    /// Builder-style add.
    #[must_use]
    pub fn with(mut self, kind: ResourceType, amount: u32) -> Self {
        Resources::add(&mut self, kind, amount);
        self
    }

    fn slot(&self, kind: ResourceType) -> &u32 {
        match kind {
            ResourceType::Berry => &self.berry,
            ResourceType::Twig => &self.twig,
            ResourceType::Resin => &self.resin,
            ResourceType::Pebble => &self.pebble,
            ResourceType::Pearl => &self.pearl,
            ResourceType::Vp => &self.vp,
        }
    }

    fn slot_mut(&mut self, kind: ResourceType) -> &mut u32 {
        match kind {
            ResourceType::Berry => &mut self.berry,
            ResourceType::Twig => &mut self.twig,
            ResourceType::Resin => &mut self.resin,
            ResourceType::Pebble => &mut self.pebble,
            ResourceType::Pearl => &mut self.pearl,
            ResourceType::Vp => &mut self.vp,
        }
    }

    /// Count of one kind.
    #[must_use]
    pub fn get(&self, kind: ResourceType) -> u32 {
        *self.slot(kind)
    }

    /// Add to one kind. Counts saturate at `u32::MAX`.
    pub fn add(&mut self, kind: ResourceType, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Add every kind of `other`.
    pub fn add_all(&mut self, other: &Resources) {
        for kind in ResourceType::ALL {
            Resources::add(self, kind, other.get(kind));
        }
    }

    /// Remove `amount` of one kind. Returns false (and changes nothing) when short.
    pub fn remove(&mut self, kind: ResourceType, amount: u32) -> bool {
        let slot = self.slot_mut(kind);
        match slot.checked_sub(amount) {
            Some(left) => {
                *slot = left;
                true
            }
            None => false,
        }
    }

    /// Does this ledger hold at least `cost` of every kind?
    #[must_use]
    pub fn can_afford(&self, cost: &Resources) -> bool {
        ResourceType::ALL
            .iter()
            .all(|&kind| self.get(kind) >= cost.get(kind))
    }

    /// Spend `cost`. Returns false (and changes nothing) when short.
    pub fn spend(&mut self, cost: &Resources) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for kind in ResourceType::ALL {
            *self.slot_mut(kind) -= cost.get(kind);
        }
        true
    }

    /// Is every count within the matching count of `limits`?
    #[must_use]
    pub fn fits_within(&self, limits: &Resources) -> bool {
        limits.can_afford(self)
    }

    /// Total count over all kinds.
    #[must_use]
    pub fn total(&self) -> u32 {
        ResourceType::ALL
            .iter()
            .fold(0u32, |acc, &kind| acc.saturating_add(self.get(kind)))
    }

    /// Total count over the four basic kinds.
    #[must_use]
    pub fn basic_total(&self) -> u32 {
        ResourceType::BASIC
            .iter()
            .fold(0u32, |acc, &kind| acc.saturating_add(self.get(kind)))
    }

    /// Are all counts zero?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Do only basic kinds have non-zero counts?
    #[must_use]
    pub fn is_basic_only(&self) -> bool {
        self.pearl == 0 && self.vp == 0
    }

    /// Iterate over non-zero `(kind, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, u32)> + '_ {
        ResourceType::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
            .filter(|&(_, count)| count > 0)
    }

    /// Per-kind `min(self, other)`.
    #[must_use]
    pub fn min_each(&self, other: &Resources) -> Resources {
        let mut out = Resources::new();
        for kind in ResourceType::ALL {
            Resources::add(&mut out, kind, self.get(kind).min(other.get(kind)));
        }
        out
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(mut self, rhs: Resources) -> Resources {
        self.add_all(&rhs);
        self
    }
}

impl AddAssign for Resources {
    fn add_assign(&mut self, rhs: Resources) {
        self.add_all(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_order() {
        let cost = Resources::cost(1, 2, 3, 4);
        assert_eq!(cost.twig, 1);
        assert_eq!(cost.resin, 2);
        assert_eq!(cost.pebble, 3);
        assert_eq!(cost.berry, 4);
        assert_eq!(cost.total(), 10);
    }

    #[test]
    fn test_spend_is_all_or_nothing() {
        let mut purse = Resources::cost(1, 1, 0, 0);
        assert!(!purse.spend(&Resources::cost(1, 1, 1, 0)));
        assert_eq!(purse, Resources::cost(1, 1, 0, 0));

        assert!(purse.spend(&Resources::cost(1, 0, 0, 0)));
        assert_eq!(purse, Resources::cost(0, 1, 0, 0));
    }

    #[test]
    fn test_remove_never_underflows() {
        let mut purse = Resources::of(ResourceType::Pearl, 1);
        assert!(!purse.remove(ResourceType::Pearl, 2));
        assert_eq!(purse.pearl, 1);
        assert!(purse.remove(ResourceType::Pearl, 1));
        assert!(purse.is_empty());
    }

    #[test]
    fn test_fits_within_and_min_each() {
        let limits = Resources::cost(2, 0, 1, 0);
        assert!(Resources::cost(1, 0, 1, 0).fits_within(&limits));
        assert!(!Resources::cost(0, 1, 0, 0).fits_within(&limits));

        let held = Resources::cost(5, 5, 0, 0);
        assert_eq!(held.min_each(&limits), Resources::cost(2, 0, 0, 0));
    }

    #[test]
    fn test_builders_and_operators() {
        let bag = Resources::of(ResourceType::Twig, 2).with(ResourceType::Twig, 1);
        assert_eq!(bag, Resources::cost(3, 0, 0, 0));

        let mut sum = bag + Resources::of(ResourceType::Pearl, 1);
        assert_eq!(sum.total(), 4);
        sum += Resources::cost(0, 0, 0, 2);
        assert_eq!(sum.basic_total(), 5);
    }

    #[test]
    fn test_counts_saturate() {
        let mut bag = Resources::of(ResourceType::Berry, u32::MAX);
        Resources::add(&mut bag, ResourceType::Berry, 1);
        assert_eq!(bag.berry, u32::MAX);

        let huge: Resources =
            serde_json::from_str("{\"BERRY\":4294967295,\"TWIG\":4294967295,\"VP\":7}").unwrap();
        assert_eq!(huge.basic_total(), u32::MAX);
        assert_eq!(huge.total(), u32::MAX);
    }

    #[test]
    fn test_iter_skips_zero() {
        let bag = Resources::new()
            .with(ResourceType::Berry, 3)
            .with(ResourceType::Vp, 1);
        let pairs: Vec<_> = bag.iter().collect();
        assert_eq!(pairs, vec![(ResourceType::Berry, 3), (ResourceType::Vp, 1)]);
        assert_eq!(bag.basic_total(), 3);
        assert!(!bag.is_basic_only());
    }

    #[test]
    fn test_serialization() {
        let bag = Resources::new().with(ResourceType::Resin, 2);
        let json = serde_json::to_string(&bag).unwrap();
        assert!(json.contains("\"RESIN\":2"));
        let back: Resources = serde_json::from_str(&json).unwrap();
        assert_eq!(bag, back);

        let sparse: Resources = serde_json::from_str("{\"BERRY\":3}").unwrap();
        assert_eq!(sparse, Resources::of(ResourceType::Berry, 3));
    }
}
