//! Bulk value object - the game's abstract carried-weight unit.
//!
//! Bulk is counted in whole units plus "light" tenths. Ten light make one
//! whole unit, and every constructor and operation keeps the light part in
//! `0..10`.
//!
//! Text forms follow the item data: `"2"`, `"L"`, `"4L"`, `"3; 2L"`, and `"-"`
//! for negligible bulk.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;
use thiserror::Error;

use super::Size;

/// Light units per whole unit of bulk.
pub const LIGHT_PER_BULK: u32 = 10;

/// Error when parsing bulk text strictly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkParseError {
    /// The text is empty
    #[error("Empty bulk value")]
    Empty,
    /// Not a recognized bulk form
    #[error("Invalid bulk format: {0}")]
    InvalidFormat(String),
    /// A count does not fit in the value range
    #[error("Bulk value overflow")]
    Overflow,
}

/// A quantity of carried bulk.
///
/// Field order matters: the derived ordering compares whole units first and
/// light second, which on normalized values is the same as comparing total
/// light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bulk {
    value: u32,
    light: u32,
}

impl Bulk {
    /// Largest representable bulk; arithmetic saturates here.
    pub const MAX: Self = Self {
        value: u32::MAX,
        light: LIGHT_PER_BULK - 1,
    };

    pub const fn zero() -> Self {
        Self { value: 0, light: 0 }
    }

    pub fn from_light(light: u32) -> Self {
        Self::from_total_light(u64::from(light))
    }

    pub const fn from_value(value: u32) -> Self {
        Self { value, light: 0 }
    }

    /// Whole units plus light; light above nine carries into the whole part.
    pub fn new(value: u32, light: u32) -> Self {
        Self::from_total_light(
            u64::from(value)
                .saturating_mul(u64::from(LIGHT_PER_BULK))
                .saturating_add(u64::from(light)),
        )
    }

    fn from_total_light(total: u64) -> Self {
        let per_bulk = u64::from(LIGHT_PER_BULK);
        match u32::try_from(total / per_bulk) {
            Ok(value) => Self {
                value,
                light: (total % per_bulk) as u32,
            },
            Err(_) => Self::MAX,
        }
    }

    /// Whole units.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Light units, always below [`LIGHT_PER_BULK`].
    pub fn light(&self) -> u32 {
        self.light
    }

    /// Collapse to a light-only count, used for capacity comparisons.
    pub fn to_light_bulk(&self) -> u64 {
        u64::from(self.value) * u64::from(LIGHT_PER_BULK) + u64::from(self.light)
    }

    pub fn is_negligible(&self) -> bool {
        self.value == 0 && self.light == 0
    }

    /// Difference, clamped at zero.
    pub fn subtract(self, other: Self) -> Self {
        Self::from_total_light(self.to_light_bulk().saturating_sub(other.to_light_bulk()))
    }

    pub fn multiply(self, factor: u32) -> Self {
        Self::from_total_light(self.to_light_bulk().saturating_mul(u64::from(factor)))
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    pub fn is_greater_than(&self, other: &Self) -> bool {
        self > other
    }

    pub fn is_smaller_than(&self, other: &Self) -> bool {
        self < other
    }

    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Parse bulk text permissively.
    ///
    /// Blank text is negligible bulk. Anything malformed is logged and
    /// treated as zero, since hand-authored item data is often inconsistent.
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::zero();
        }
        match text.parse() {
            Ok(bulk) => bulk,
            Err(error) => {
                tracing::warn!(input = text, %error, "Malformed bulk text, treating as zero");
                Self::zero()
            }
        }
    }

    /// Display form, e.g. `"3; 2L"`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Re-express this bulk for an actor of a different size than the item.
    ///
    /// Each size step up doubles whole units and turns every light unit into
    /// a whole unit. Each step down halves whole units (rounding down), turns
    /// a single unit into one light, and makes light-only bulk negligible.
    pub fn convert_for_size(self, item_size: Size, actor_size: Size) -> Self {
        let steps = item_size.bulk_step() - actor_size.bulk_step();
        let mut bulk = self;
        match steps.cmp(&0) {
            Ordering::Greater => {
                for _ in 0..steps {
                    bulk = bulk.grown();
                }
            }
            Ordering::Less => {
                for _ in 0..steps.unsigned_abs() {
                    bulk = bulk.shrunk();
                }
            }
            Ordering::Equal => {}
        }
        bulk
    }

    fn grown(self) -> Self {
        let value = u64::from(self.value)
            .saturating_mul(2)
            .saturating_add(u64::from(self.light));
        Self::from_total_light(value.saturating_mul(u64::from(LIGHT_PER_BULK)))
    }

    fn shrunk(self) -> Self {
        match self.value {
            0 => Self::zero(),
            1 => Self::from_light(1),
            value => Self::from_value(value / 2),
        }
    }
}

impl Add for Bulk {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_total_light(self.to_light_bulk().saturating_add(other.to_light_bulk()))
    }
}

impl Sub for Bulk {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.subtract(other)
    }
}

impl Mul<u32> for Bulk {
    type Output = Self;

    fn mul(self, factor: u32) -> Self {
        self.multiply(factor)
    }
}

impl Sum for Bulk {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Bulk> for Bulk {
    fn sum<I: Iterator<Item = &'a Bulk>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Bulk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.value, self.light) {
            (0, 0) => write!(f, "-"),
            (value, 0) => write!(f, "{}", value),
            (0, light) => write!(f, "{}L", light),
            (value, light) => write!(f, "{}; {}L", value, light),
        }
    }
}

impl FromStr for Bulk {
    type Err = BulkParseError;

    /// Strict parse; see [`Bulk::parse`] for the permissive form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        if input.is_empty() {
            return Err(BulkParseError::Empty);
        }
        if input == "-" || input == "—" {
            return Ok(Self::zero());
        }

        // At most one whole part, then at most one light part
        let parts: Vec<&str> = input.split(';').map(str::trim).collect();
        match parts.as_slice() {
            [single] => match parse_light(single, s)? {
                Some(light) => Ok(light),
                None => Ok(Self::from_value(parse_count(single, s)?)),
            },
            [whole, light] => {
                let value = Self::from_value(parse_count(whole, s)?);
                let light = parse_light(light, s)?
                    .ok_or_else(|| BulkParseError::InvalidFormat(s.to_string()))?;
                Ok(value + light)
            }
            _ => Err(BulkParseError::InvalidFormat(s.to_string())),
        }
    }
}

/// Light part of bulk text, or `None` when `part` has no `L` suffix.
fn parse_light(part: &str, input: &str) -> Result<Option<Bulk>, BulkParseError> {
    match part.strip_suffix('l') {
        // A bare "L" is one light
        Some(count) if count.trim().is_empty() => Ok(Some(Bulk::from_light(1))),
        Some(count) => parse_count(count.trim(), input).map(|n| Some(Bulk::from_light(n))),
        None => Ok(None),
    }
}

fn parse_count(text: &str, input: &str) -> Result<u32, BulkParseError> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(BulkParseError::InvalidFormat(input.to_string()));
    }
    text.parse().map_err(|_| BulkParseError::Overflow)
}

impl Serialize for Bulk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bulk {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BulkVisitor)
    }
}

struct BulkVisitor;

impl<'de> de::Visitor<'de> for BulkVisitor {
    type Value = Bulk;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bulk text like \"1; 2L\" or a whole number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Bulk, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Bulk, E> {
        u32::try_from(v)
            .map(Bulk::from_value)
            .map_err(|_| E::custom(BulkParseError::Overflow))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Bulk, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(BulkParseError::InvalidFormat(v.to_string())))
            .and_then(|v| self.visit_u64(v))
    }
}
