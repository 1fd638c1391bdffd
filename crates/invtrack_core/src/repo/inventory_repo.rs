//! Inventory repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map each inventory operation to exactly one SQL statement.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate field values before SQL mutations.
//! - Single-row reads reject invalid persisted rows instead of masking them.
//! - Listing skips invalid rows (e.g. negative quantities in an adopted legacy
//!   table) and reports the skip count as a `warn` event.
//! - Name matching is exact; UPDATE/DELETE touch every matching row.
//! - Listing uses backend-native row order (no `ORDER BY`).

use crate::db::DbError;
use crate::model::item::{validate_cost, validate_name, Item, ItemValidationError};
use log::{debug, warn};
use rusqlite::types::FromSql;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INVENTORY_TABLE: &str = "inventory";
const INVENTORY_COLUMNS: [&str; 3] = ["name", "quantity", "cost"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for inventory persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    /// No row carries the requested name.
    NotFound(String),
    InvalidData(String),
    /// Connection was handed over before the schema was applied.
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(name) => write!(f, "item not found: {name}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl RepoError {
    /// Stable code for log events; carries no item data.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Db(_) => "db_failed",
            Self::NotFound(_) => "not_found",
            Self::InvalidData(_) => "invalid_data",
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => {
                "schema_not_ready"
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for inventory rows.
///
/// Mutations that match no row return `RepoError::NotFound`; on success they
/// return the number of rows touched.
pub trait InventoryRepository {
    fn add_item(&self, item: &Item) -> RepoResult<()>;
    fn list_items(&self) -> RepoResult<Vec<Item>>;
    fn get_item_cost(&self, name: &str) -> RepoResult<Option<f64>>;
    fn update_quantity(&self, name: &str, quantity: u32) -> RepoResult<usize>;
    fn set_item_cost(&self, name: &str, cost: f64) -> RepoResult<usize>;
    fn delete_item(&self, name: &str) -> RepoResult<usize>;
}

/// SQLite-backed inventory repository.
pub struct SqliteInventoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInventoryRepository<'conn> {
    /// Wraps a connection after checking the `inventory` table shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_inventory_table_ready(conn)?;
        Ok(Self { conn })
    }
}

impl InventoryRepository for SqliteInventoryRepository<'_> {
    fn add_item(&self, item: &Item) -> RepoResult<()> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO inventory (name, quantity, cost) VALUES (?1, ?2, ?3);",
            params![item.name.as_str(), item.quantity, item.cost],
        )?;

        debug!("event=item_add module=repo status=ok rows=1");
        Ok(())
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, quantity, cost FROM inventory;")?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        let mut skipped = 0_usize;

        while let Some(row) = rows.next()? {
            match parse_item_row(row) {
                Ok(item) => items.push(item),
                Err(RepoError::InvalidData(_)) => skipped += 1,
                Err(err) => return Err(err),
            }
        }

        if skipped > 0 {
            warn!(
                "event=item_list module=repo status=partial rows={} skipped={}",
                items.len(),
                skipped
            );
        }
        Ok(items)
    }

    fn get_item_cost(&self, name: &str) -> RepoResult<Option<f64>> {
        let cost: Option<Option<f64>> = self
            .conn
            .query_row(
                "SELECT cost FROM inventory WHERE name = ?1 LIMIT 1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;

        match cost {
            None => Ok(None),
            Some(None) => Err(RepoError::InvalidData(
                "NULL value in inventory.cost".to_string(),
            )),
            Some(Some(value)) => {
                validate_cost(value).map_err(|err| {
                    RepoError::InvalidData(format!("inventory.cost: {err}"))
                })?;
                Ok(Some(value))
            }
        }
    }

    fn update_quantity(&self, name: &str, quantity: u32) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE inventory SET quantity = ?1 WHERE name = ?2;",
            params![quantity, name],
        )?;

        finish_mutation("item_update_quantity", name, changed)
    }

    fn set_item_cost(&self, name: &str, cost: f64) -> RepoResult<usize> {
        validate_cost(cost)?;

        let changed = self.conn.execute(
            "UPDATE inventory SET cost = ?1 WHERE name = ?2;",
            params![cost, name],
        )?;

        finish_mutation("item_set_cost", name, changed)
    }

    fn delete_item(&self, name: &str) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM inventory WHERE name = ?1;", [name])?;

        finish_mutation("item_delete", name, changed)
    }
}

fn finish_mutation(event: &str, name: &str, changed: usize) -> RepoResult<usize> {
    if changed == 0 {
        debug!("event={event} module=repo status=not_found rows=0");
        return Err(RepoError::NotFound(name.to_string()));
    }

    debug!("event={event} module=repo status=ok rows={changed}");
    Ok(changed)
}

/// Reads a nullable column; a value of the wrong storage class is bad data.
fn column<T: FromSql>(row: &Row<'_>, name: &str) -> RepoResult<Option<T>> {
    match row.get::<_, Option<T>>(name) {
        Ok(value) => Ok(value),
        Err(err @ rusqlite::Error::InvalidColumnType(..))
        | Err(err @ rusqlite::Error::IntegralValueOutOfRange(..)) => Err(
            RepoError::InvalidData(format!("inventory.{name}: {err}")),
        ),
        Err(err) => Err(err.into()),
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let name: String = column::<String>(row, "name")?
        .ok_or_else(|| RepoError::InvalidData("NULL value in inventory.name".to_string()))?;
    validate_name(&name)
        .map_err(|err| RepoError::InvalidData(format!("inventory.name: {err}")))?;

    let raw_quantity: i64 = column::<i64>(row, "quantity")?
        .ok_or_else(|| RepoError::InvalidData("NULL value in inventory.quantity".to_string()))?;
    let quantity = u32::try_from(raw_quantity).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid quantity `{raw_quantity}` in inventory.quantity"
        ))
    })?;

    let cost: f64 = column::<f64>(row, "cost")?
        .ok_or_else(|| RepoError::InvalidData("NULL value in inventory.cost".to_string()))?;
    validate_cost(cost).map_err(|err| RepoError::InvalidData(format!("inventory.cost: {err}")))?;

    Ok(Item {
        name,
        quantity,
        cost,
    })
}

fn ensure_inventory_table_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, INVENTORY_TABLE)? {
        return Err(RepoError::MissingRequiredTable(INVENTORY_TABLE));
    }

    for column in INVENTORY_COLUMNS {
        if !table_has_column(conn, INVENTORY_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: INVENTORY_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_table_info(?1)
            WHERE name = ?2
        );",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
