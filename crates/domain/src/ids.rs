use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Identifier of a physical item, as assigned by the host document store.
///
/// Host ids are opaque strings, so the only invariant is that they are not
/// blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::invalid_id("item id cannot be empty"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ItemId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_rejects_blank() {
        assert!(ItemId::new("").is_err());
        assert!(ItemId::new("   ").is_err());
        assert_eq!(ItemId::new("xVq3lBcRfw2pXyZ1").unwrap().as_str(), "xVq3lBcRfw2pXyZ1");
    }

    #[test]
    fn test_item_id_serde_is_transparent_string() {
        let id = ItemId::new("backpack01").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"backpack01\"");
        let parsed: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<ItemId>("\"\"").is_err());
    }
}
