//! Domain model for inventory lines.
//!
//! # Responsibility
//! - Define the value types shared by repository, service and console layers.
//!
//! # Invariants
//! - An item has no identity beyond its name; the name is not unique.
//! - Items are transient projections of `inventory` rows and are never cached.

pub mod item;
