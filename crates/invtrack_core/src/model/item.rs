//! Item domain model.
//!
//! # Responsibility
//! - Define the name/quantity/cost triple stored per inventory row.
//! - Provide validation shared by write paths, read paths and deserialization.
//! - Define the orderings offered for sorted inventory views.
//!
//! # Invariants
//! - `name` is not blank.
//! - `cost` is finite and `>= 0.0`.
//! - `quantity` is non-negative by construction (`u32`).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One inventory line: what it is, how many are held, and the unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ItemFields")]
pub struct Item {
    /// Business key used by lookups. Duplicates are allowed.
    pub name: String,
    pub quantity: u32,
    /// Unit price.
    pub cost: f64,
}

/// Validation failures for item field values.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValidationError {
    EmptyName,
    NegativeCost(f64),
    NonFiniteCost(f64),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name cannot be empty"),
            Self::NegativeCost(cost) => write!(f, "item cost ({cost}) must be >= 0"),
            Self::NonFiniteCost(cost) => write!(f, "item cost ({cost}) must be a finite number"),
        }
    }
}

impl Error for ItemValidationError {}

impl Item {
    /// Creates a validated item.
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        cost: f64,
    ) -> Result<Self, ItemValidationError> {
        let item = Self {
            name: name.into(),
            quantity,
            cost,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks field invariants.
    ///
    /// Fields are public, so write paths call this again before persisting.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        validate_name(&self.name)?;
        validate_cost(self.cost)
    }
}

/// Cost is printed exactly as stored, without rounding.
impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Item: {}, Quantity: {}, Cost: {}",
            self.name, self.quantity, self.cost
        )
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), ItemValidationError> {
    if name.trim().is_empty() {
        return Err(ItemValidationError::EmptyName);
    }
    Ok(())
}

pub(crate) fn validate_cost(cost: f64) -> Result<(), ItemValidationError> {
    if !cost.is_finite() {
        return Err(ItemValidationError::NonFiniteCost(cost));
    }
    if cost < 0.0 {
        return Err(ItemValidationError::NegativeCost(cost));
    }
    Ok(())
}

#[derive(Deserialize)]
struct ItemFields {
    name: String,
    quantity: u32,
    cost: f64,
}

impl TryFrom<ItemFields> for Item {
    type Error = ItemValidationError;

    fn try_from(value: ItemFields) -> Result<Self, Self::Error> {
        Item::new(value.name, value.quantity, value.cost)
    }
}

/// Column an inventory listing can be ordered by. Always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Quantity,
    /// Lexicographic by UTF-8 bytes, case-sensitive.
    Name,
    Cost,
}

impl SortKey {
    /// Total order on items for this key.
    pub fn compare(self, left: &Item, right: &Item) -> Ordering {
        match self {
            Self::Quantity => left.quantity.cmp(&right.quantity),
            Self::Name => left.name.cmp(&right.name),
            Self::Cost => left.cost.total_cmp(&right.cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemValidationError, SortKey};
    use std::cmp::Ordering;

    #[test]
    fn new_rejects_blank_name_and_bad_costs() {
        assert_eq!(
            Item::new("  ", 1, 1.0).unwrap_err(),
            ItemValidationError::EmptyName
        );
        assert_eq!(
            Item::new("bolt", 1, -0.5).unwrap_err(),
            ItemValidationError::NegativeCost(-0.5)
        );
        assert!(matches!(
            Item::new("bolt", 1, f64::NAN).unwrap_err(),
            ItemValidationError::NonFiniteCost(_)
        ));
    }

    #[test]
    fn zero_cost_is_a_valid_price() {
        let item = Item::new("sample", 0, 0.0).unwrap();
        assert_eq!(item.cost, 0.0);
    }

    #[test]
    fn display_renders_stored_cost_unrounded() {
        let item = Item::new("Widget", 10, 1.5).unwrap();
        assert_eq!(item.to_string(), "Item: Widget, Quantity: 10, Cost: 1.5");

        let tiny = Item::new("Shim", 1, 0.004).unwrap();
        assert_eq!(tiny.to_string(), "Item: Shim, Quantity: 1, Cost: 0.004");
    }

    #[test]
    fn sort_key_cost_orders_by_value() {
        let cheap = Item::new("a", 1, 0.25).unwrap();
        let dear = Item::new("b", 1, 4.0).unwrap();
        assert_eq!(SortKey::Cost.compare(&cheap, &dear), Ordering::Less);
        assert_eq!(SortKey::Cost.compare(&dear, &dear), Ordering::Equal);
    }

    #[test]
    fn sort_key_name_is_case_sensitive() {
        let upper = Item::new("Zinc", 1, 1.0).unwrap();
        let lower = Item::new("apple", 1, 1.0).unwrap();
        assert_eq!(SortKey::Name.compare(&upper, &lower), Ordering::Less);
    }
}
