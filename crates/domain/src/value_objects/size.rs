//! Creature and item sizes, as used by bulk conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Size category of a creature or of the creature an item is made for.
///
/// Serialized with the short codes found in item data (`"sm"`, `"med"`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "tiny")]
    Tiny,
    #[serde(rename = "sm", alias = "small")]
    Small,
    #[default]
    #[serde(rename = "med", alias = "medium")]
    Medium,
    #[serde(rename = "lg", alias = "large")]
    Large,
    #[serde(rename = "huge")]
    Huge,
    #[serde(rename = "grg", alias = "gargantuan")]
    Gargantuan,
}

impl Size {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "sm",
            Self::Medium => "med",
            Self::Large => "lg",
            Self::Huge => "huge",
            Self::Gargantuan => "grg",
        }
    }

    /// Position on the bulk scale. Small and medium items weigh the same.
    pub fn bulk_step(&self) -> i8 {
        match self {
            Self::Tiny => -1,
            Self::Small | Self::Medium => 0,
            Self::Large => 1,
            Self::Huge => 2,
            Self::Gargantuan => 3,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiny" => Ok(Self::Tiny),
            "sm" | "small" => Ok(Self::Small),
            "med" | "medium" => Ok(Self::Medium),
            "lg" | "large" => Ok(Self::Large),
            "huge" => Ok(Self::Huge),
            "grg" | "gargantuan" => Ok(Self::Gargantuan),
            _ => Err(DomainError::parse(format!("Unknown size: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_from_str() {
        assert_eq!(Size::from_str("med").unwrap(), Size::Medium);
        assert_eq!(Size::from_str("Large").unwrap(), Size::Large);
        assert_eq!(Size::from_str("grg").unwrap(), Size::Gargantuan);
        assert!(Size::from_str("colossal").is_err());
    }

    #[test]
    fn test_size_serde_uses_short_codes() {
        assert_eq!(serde_json::to_string(&Size::Small).unwrap(), "\"sm\"");
        let parsed: Size = serde_json::from_str("\"huge\"").unwrap();
        assert_eq!(parsed, Size::Huge);
        let aliased: Size = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(aliased, Size::Medium);
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Size::default(), Size::Medium);
    }
}
