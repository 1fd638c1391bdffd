//! Inventory use-case service.
//!
//! # Responsibility
//! - Provide the operator-facing inventory operations.
//! - Build sorted views, totals and bills on top of repository reads.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Sorting is stable and ascending; ties keep backend-native order.
//! - Billing prices every line from the store, never from caller input.

use crate::model::item::{Item, SortKey};
use crate::repo::inventory_repo::{InventoryRepository, RepoResult};
use crate::service::bill::{Bill, BillRequest};
use log::info;
use std::cmp::Ordering;

/// Use-case service wrapper for inventory operations.
pub struct InventoryService<R: InventoryRepository> {
    repo: R,
}

impl<R: InventoryRepository> InventoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a new row. Existing rows with the same name are left alone.
    pub fn add_item(&self, name: impl Into<String>, quantity: u32, cost: f64) -> RepoResult<()> {
        let item = Item::new(name, quantity, cost)?;
        self.repo.add_item(&item)
    }

    /// Returns every item in backend-native order.
    pub fn all_items(&self) -> RepoResult<Vec<Item>> {
        self.repo.list_items()
    }

    /// Returns the unit cost of the first row named `name`.
    pub fn item_cost(&self, name: &str) -> RepoResult<Option<f64>> {
        self.repo.get_item_cost(name)
    }

    /// Sets quantity on every row named `name`; returns rows touched.
    pub fn update_quantity(&self, name: &str, quantity: u32) -> RepoResult<usize> {
        self.repo.update_quantity(name, quantity)
    }

    /// Sets unit cost on every row named `name`; returns rows touched.
    pub fn set_item_cost(&self, name: &str, cost: f64) -> RepoResult<usize> {
        self.repo.set_item_cost(name, cost)
    }

    /// Deletes every row named `name`; returns rows removed.
    pub fn delete_item(&self, name: &str) -> RepoResult<usize> {
        self.repo.delete_item(name)
    }

    /// Returns all items stably sorted ascending by `compare`.
    ///
    /// `compare` must be a total order.
    pub fn sorted_inventory<F>(&self, compare: F) -> RepoResult<Vec<Item>>
    where
        F: FnMut(&Item, &Item) -> Ordering,
    {
        let mut items = self.repo.list_items()?;
        items.sort_by(compare);
        Ok(items)
    }

    pub fn sorted_inventory_by_key(&self, key: SortKey) -> RepoResult<Vec<Item>> {
        self.sorted_inventory(|left, right| key.compare(left, right))
    }

    /// Sums the unit cost column over all rows.
    ///
    /// Quantity is not factored in.
    pub fn total_inventory_cost(&self) -> RepoResult<f64> {
        let items = self.repo.list_items()?;
        Ok(items.iter().map(|item| item.cost).sum())
    }

    /// Prices each request at the current store cost and totals the result.
    ///
    /// # Contract
    /// - One line per request, in request order.
    /// - Unknown names yield a line with `unit_cost = None` and total `0.0`.
    /// - The first backend failure aborts the bill.
    pub fn generate_bill(&self, requests: &[BillRequest]) -> RepoResult<Bill> {
        let mut bill = Bill::default();
        for request in requests {
            let unit_cost = self.repo.get_item_cost(&request.name)?;
            bill.push_line(request, unit_cost);
        }

        let missing = bill
            .lines
            .iter()
            .filter(|line| line.unit_cost.is_none())
            .count();
        info!(
            "event=bill_generate module=service status=ok lines={} missing={}",
            bill.lines.len(),
            missing
        );
        Ok(bill)
    }
}
