//! Played cards - per-copy runtime data.
//!
//! Each copy of a card in a city carries its own small record: point
//! tokens stored on it (Chapel), workers visiting it (destinations) and
//! whether a construction has already admitted its free critter.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::core::resources::Resources;

/// One copy of a card in a city.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    /// Resources placed on the card.
    #[serde(default)]
    pub resources: Resources,

    /// Players with a worker on this card.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workers: Vec<PlayerId>,

    /// A construction whose free critter slot has been used.
    #[serde(default)]
    pub occupied: bool,
}

impl PlayedCard {
    /// Is a worker on this copy?
    #[must_use]
    pub fn is_visited(&self) -> bool {
        !self.workers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let copy = PlayedCard::default();
        assert!(copy.resources.is_empty());
        assert!(!copy.is_visited());
        assert!(!copy.occupied);
    }

    #[test]
    fn test_sparse_serialization() {
        let json = serde_json::to_string(&PlayedCard::default()).unwrap();
        assert!(!json.contains("workers"));
        let back: PlayedCard = serde_json::from_str("{}").unwrap();
        assert_eq!(back, PlayedCard::default());
    }
}
