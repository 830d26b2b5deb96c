//! Physical item entity - source data for anything an actor can carry
//!
//! Items arrive as host documents in camelCase JSON:
//!
//! ```json
//! {
//!   "id": "bedroll01",
//!   "name": "Bedroll",
//!   "type": "equipment",
//!   "system": { "weight": "L", "quantity": 1, "containerId": "backpack01" }
//! }
//! ```
//!
//! Containment is an edge stored on the child (`containerId`). Only
//! `backpack` items can hold other items.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::{Bulk, ItemId, Size, StackGroup};

/// Trait marking a container whose interior is extradimensional space.
pub const EXTRADIMENSIONAL_TRAIT: &str = "extradimensional";

/// An item with physical presence, as stored by the host.
///
/// Bulk-related text fields stay as authored; they are parsed permissively
/// when the item is projected for calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalItem {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: PhysicalItemType,
    pub system: PhysicalItemSystem,
    /// Display-only values rebuilt by every preparation pass
    #[serde(skip)]
    pub derived: DerivedBulk,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalItemSystem {
    /// Bulk of a single unit
    #[serde(default, deserialize_with = "deserialize_bulk_text")]
    pub weight: String,
    /// Replaces `weight` while the item is equipped (worn armor)
    #[serde(
        default,
        deserialize_with = "deserialize_optional_bulk_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub equipped_bulk: Option<String>,
    /// Replaces `weight` while the item is not equipped
    #[serde(
        default,
        deserialize_with = "deserialize_optional_bulk_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub unequipped_bulk: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub equipped: bool,
    /// Containing item; blank means carried directly
    #[serde(
        default,
        deserialize_with = "deserialize_container_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub container_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_group: Option<StackGroup>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_bulk_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bulk_capacity: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_bulk_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub negate_bulk: Option<String>,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub traits: Vec<String>,
}

fn default_quantity() -> u32 {
    1
}

/// Bulk text as found in item data. Numbers become their text form; any
/// other shape is treated as blank.
fn bulk_text(raw: Value) -> Option<String> {
    match raw {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Null => None,
        other => {
            tracing::warn!(value = %other, "Unreadable bulk value, treating as blank");
            None
        }
    }
}

fn deserialize_bulk_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|raw| bulk_text(raw).unwrap_or_default())
}

fn deserialize_optional_bulk_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(bulk_text)
}

fn deserialize_container_id<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(id) if !id.trim().is_empty() => ItemId::new(id).map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl Default for PhysicalItemSystem {
    fn default() -> Self {
        Self {
            weight: String::new(),
            equipped_bulk: None,
            unequipped_bulk: None,
            quantity: default_quantity(),
            equipped: false,
            container_id: None,
            stack_group: None,
            bulk_capacity: None,
            negate_bulk: None,
            size: Size::default(),
            traits: Vec::new(),
        }
    }
}

impl PhysicalItem {
    pub fn new(id: ItemId, name: impl Into<String>, item_type: PhysicalItemType) -> Self {
        Self {
            id,
            name: name.into(),
            item_type,
            system: PhysicalItemSystem::default(),
            derived: DerivedBulk::default(),
        }
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.system.weight = weight.into();
        self
    }

    pub fn with_equipped_bulk(mut self, bulk: impl Into<String>) -> Self {
        self.system.equipped_bulk = Some(bulk.into());
        self
    }

    pub fn with_unequipped_bulk(mut self, bulk: impl Into<String>) -> Self {
        self.system.unequipped_bulk = Some(bulk.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.system.quantity = quantity;
        self
    }

    pub fn equipped(mut self) -> Self {
        self.system.equipped = true;
        self
    }

    pub fn in_container(mut self, container_id: ItemId) -> Self {
        self.system.container_id = Some(container_id);
        self
    }

    pub fn with_stack_group(mut self, group: StackGroup) -> Self {
        self.system.stack_group = Some(group);
        self
    }

    pub fn with_bulk_capacity(mut self, capacity: impl Into<String>) -> Self {
        self.system.bulk_capacity = Some(capacity.into());
        self
    }

    pub fn with_negate_bulk(mut self, negate: impl Into<String>) -> Self {
        self.system.negate_bulk = Some(negate.into());
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.system.size = size;
        self
    }

    pub fn with_trait(mut self, item_trait: impl Into<String>) -> Self {
        self.system.traits.push(item_trait.into());
        self
    }

    pub fn is_container(&self) -> bool {
        self.item_type.is_container()
    }

    pub fn is_extra_dimensional(&self) -> bool {
        self.is_container()
            && self
                .system
                .traits
                .iter()
                .any(|t| t.eq_ignore_ascii_case(EXTRADIMENSIONAL_TRAIT))
    }

    /// Declared capacity, if any.
    pub fn bulk_capacity(&self) -> Option<Bulk> {
        self.system
            .bulk_capacity
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(Bulk::parse)
    }

    pub fn negate_bulk(&self) -> Bulk {
        self.system.negate_bulk.as_deref().map(Bulk::parse).unwrap_or_default()
    }

    /// Per-unit bulk for the current equip state.
    pub fn unit_bulk(&self) -> Bulk {
        let override_bulk = if self.system.equipped {
            self.system.equipped_bulk.as_deref()
        } else {
            self.system.unequipped_bulk.as_deref()
        };
        Bulk::parse(override_bulk.unwrap_or(&self.system.weight))
    }
}

/// Item categories with physical presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhysicalItemType {
    Weapon,
    Armor,
    Shield,
    Equipment,
    Consumable,
    Backpack,
    Treasure,
    Book,
    Kit,
    /// Unknown type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl PhysicalItemType {
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Backpack)
    }
}

impl fmt::Display for PhysicalItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Shield => "shield",
            Self::Equipment => "equipment",
            Self::Consumable => "consumable",
            Self::Backpack => "backpack",
            Self::Treasure => "treasure",
            Self::Book => "book",
            Self::Kit => "kit",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Display fields written back by a preparation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedBulk {
    pub formatted_bulk: String,
    /// Containers only: bulk of everything held
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained_item_bulk: Option<Bulk>,
    /// Containers with a declared capacity only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<ContainerCapacity>,
}

/// Capacity usage of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerCapacity {
    pub value: Bulk,
    pub max: Bulk,
}

impl ContainerCapacity {
    pub fn new(value: Bulk, max: Bulk) -> Self {
        Self { value, max }
    }

    pub fn is_over_capacity(&self) -> bool {
        self.value.to_light_bulk() > self.max.to_light_bulk()
    }
}
