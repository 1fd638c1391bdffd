//! Core domain logic for invtrack.
//! This crate owns the inventory table and every rule applied to its rows.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::item::{Item, ItemValidationError, SortKey};
pub use repo::inventory_repo::{
    InventoryRepository, RepoError, RepoResult, SqliteInventoryRepository,
};
pub use service::bill::{Bill, BillLine, BillRequest};
pub use service::inventory_service::InventoryService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
