//! Bill request and report types.

use crate::model::item::Item;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One `(name, quantity)` pair the operator wants billed.
///
/// Carries no price: billing always reads the current store cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRequest {
    pub name: String,
    pub quantity: u32,
}

impl BillRequest {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Drops the item's cost; only name and quantity are billed.
impl From<&Item> for BillRequest {
    fn from(item: &Item) -> Self {
        Self::new(item.name.clone(), item.quantity)
    }
}

/// A priced bill line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub name: String,
    pub quantity: u32,
    /// Store cost at billing time; `None` when no row matched the name.
    pub unit_cost: Option<f64>,
    /// `unit_cost * quantity`, or `0.0` for unknown items.
    pub line_total: f64,
}

/// Line-item report plus grand total, in request order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bill {
    pub lines: Vec<BillLine>,
    pub total: f64,
}

impl Bill {
    pub(crate) fn push_line(&mut self, request: &BillRequest, unit_cost: Option<f64>) {
        let line_total = unit_cost.map_or(0.0, |cost| cost * f64::from(request.quantity));
        self.total += line_total;
        self.lines.push(BillLine {
            name: request.name.clone(),
            quantity: request.quantity,
            unit_cost,
            line_total,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Unit cost is shown as stored; money totals are rounded to cents.
impl Display for BillLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.unit_cost {
            Some(cost) => write!(
                f,
                "Item: {}, Quantity: {}, Cost: {}, Total Cost: {:.2}",
                self.name, self.quantity, cost, self.line_total
            ),
            None => write!(
                f,
                "Item: {}, Quantity: {}, Cost: not found, Total Cost: {:.2}",
                self.name, self.quantity, self.line_total
            ),
        }
    }
}

impl Display for Bill {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Bill ---")?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        write!(f, "Total Bill: {:.2}", self.total)
    }
}
