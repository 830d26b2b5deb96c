//! Stack groups - items whose bulk is counted per full stack instead of per unit.
//!
//! Ammunition, rations, coins and gems are light individually; only a full
//! stack of them registers as bulk, and a partial stack is negligible.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bulk;
use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StackGroup {
    Arrows,
    Bolts,
    SlingBullets,
    BlowgunDarts,
    WoodenTaws,
    Rations,
    Coins,
    Gems,
    /// Unknown group for forward compatibility; falls back to per-unit bulk
    #[serde(other)]
    Unknown,
}

impl StackGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arrows => "arrows",
            Self::Bolts => "bolts",
            Self::SlingBullets => "slingBullets",
            Self::BlowgunDarts => "blowgunDarts",
            Self::WoodenTaws => "woodenTaws",
            Self::Rations => "rations",
            Self::Coins => "coins",
            Self::Gems => "gems",
            Self::Unknown => "unknown",
        }
    }

    /// Stacking rule for this group, or `None` when quantity simply multiplies.
    pub fn definition(&self) -> Option<StackDefinition> {
        let (size, bulk) = match self {
            Self::Arrows | Self::Bolts | Self::SlingBullets | Self::BlowgunDarts | Self::WoodenTaws => {
                (10, Bulk::from_light(1))
            }
            Self::Rations => (7, Bulk::from_light(1)),
            Self::Coins => (1000, Bulk::from_value(1)),
            Self::Gems => (2000, Bulk::from_value(1)),
            Self::Unknown => return None,
        };
        Some(StackDefinition { size, bulk })
    }

    pub fn is_coins(&self) -> bool {
        matches!(self, Self::Coins)
    }
}

impl fmt::Display for StackGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How many units make a stack, and what one full stack weighs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackDefinition {
    size: u32,
    bulk: Bulk,
}

impl StackDefinition {
    pub fn new(size: u32, bulk: Bulk) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::validation("stack size must be at least 1"));
        }
        Ok(Self { size, bulk })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn bulk(&self) -> Bulk {
        self.bulk
    }

    /// Bulk of `quantity` units, plus the units left over in a partial stack.
    pub fn bulk_for_quantity(&self, quantity: u32) -> (Bulk, u32) {
        (self.bulk.multiply(quantity / self.size), quantity % self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ammunition_counts_per_ten() {
        let arrows = StackGroup::Arrows.definition().unwrap();
        assert_eq!(arrows.bulk_for_quantity(9), (Bulk::zero(), 9));
        assert_eq!(arrows.bulk_for_quantity(10), (Bulk::from_light(1), 0));
        assert_eq!(arrows.bulk_for_quantity(35), (Bulk::from_light(3), 5));
    }

    #[test]
    fn test_coins_count_per_thousand() {
        let coins = StackGroup::Coins.definition().unwrap();
        assert_eq!(coins.bulk_for_quantity(2500), (Bulk::from_value(2), 500));
        assert!(StackGroup::Coins.is_coins());
        assert!(!StackGroup::Gems.is_coins());
    }

    #[test]
    fn test_unknown_group_has_no_definition() {
        assert_eq!(StackGroup::Unknown.definition(), None);
    }

    #[test]
    fn test_stack_definition_rejects_zero_size() {
        assert!(StackDefinition::new(0, Bulk::from_light(1)).is_err());
        let custom = StackDefinition::new(4, Bulk::from_light(2)).unwrap();
        assert_eq!(custom.bulk_for_quantity(9), (Bulk::from_light(4), 1));
    }

    #[test]
    fn test_stack_group_serde() {
        let parsed: StackGroup = serde_json::from_str("\"slingBullets\"").unwrap();
        assert_eq!(parsed, StackGroup::SlingBullets);
        let unknown: StackGroup = serde_json::from_str("\"candles\"").unwrap();
        assert_eq!(unknown, StackGroup::Unknown);
        assert_eq!(serde_json::to_string(&StackGroup::Coins).unwrap(), "\"coins\"");
    }
}
