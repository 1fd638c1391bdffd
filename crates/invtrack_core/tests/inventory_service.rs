use invtrack_core::db::open_db_in_memory;
use invtrack_core::{
    BillRequest, InventoryService, Item, RepoError, SortKey, SqliteInventoryRepository,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> InventoryService<SqliteInventoryRepository<'_>> {
    InventoryService::new(SqliteInventoryRepository::try_new(conn).unwrap())
}

fn names(items: &[Item]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn sort_by_cost_and_bill_scenario() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_item("Widget", 10, 1.99).unwrap();
    service.add_item("Gadget", 3, 9.99).unwrap();

    let sorted = service.sorted_inventory_by_key(SortKey::Cost).unwrap();
    assert_eq!(names(&sorted), vec!["Widget", "Gadget"]);

    let bill = service
        .generate_bill(&[BillRequest::new("Widget", 2)])
        .unwrap();
    assert_close(bill.total, 3.98);
    assert_eq!(bill.lines.len(), 1);
    assert_eq!(bill.lines[0].unit_cost, Some(1.99));
}

#[test]
fn sorting_is_ascending_per_key() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_item("pear", 7, 0.5).unwrap();
    service.add_item("apple", 2, 3.0).unwrap();
    service.add_item("mango", 12, 1.25).unwrap();

    let by_quantity = service.sorted_inventory_by_key(SortKey::Quantity).unwrap();
    assert_eq!(names(&by_quantity), vec!["apple", "pear", "mango"]);

    let by_name = service.sorted_inventory_by_key(SortKey::Name).unwrap();
    assert_eq!(names(&by_name), vec!["apple", "mango", "pear"]);

    let by_cost = service.sorted_inventory_by_key(SortKey::Cost).unwrap();
    assert_eq!(names(&by_cost), vec!["pear", "mango", "apple"]);
}

#[test]
fn sorting_is_stable_on_ties_and_keeps_every_row() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_item("first", 5, 2.0).unwrap();
    service.add_item("second", 1, 2.0).unwrap();
    service.add_item("third", 5, 1.0).unwrap();
    service.add_item("fourth", 5, 2.0).unwrap();

    let by_quantity = service.sorted_inventory_by_key(SortKey::Quantity).unwrap();
    assert_eq!(
        names(&by_quantity),
        vec!["second", "first", "third", "fourth"]
    );

    let by_cost = service.sorted_inventory_by_key(SortKey::Cost).unwrap();
    assert_eq!(names(&by_cost), vec!["third", "first", "second", "fourth"]);

    let mut all = service.all_items().unwrap();
    let mut sorted = by_cost;
    all.sort_by(|a, b| a.name.cmp(&b.name));
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(all, sorted);
}

#[test]
fn sorted_inventory_accepts_custom_comparator() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_item("bb", 1, 1.0).unwrap();
    service.add_item("a", 1, 1.0).unwrap();
    service.add_item("ccc", 1, 1.0).unwrap();

    let by_length = service
        .sorted_inventory(|left, right| left.name.len().cmp(&right.name.len()))
        .unwrap();
    assert_eq!(names(&by_length), vec!["a", "bb", "ccc"]);
}

#[test]
fn bill_uses_store_cost_not_input_cost() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_item("Widget", 10, 1.99).unwrap();
    service.add_item("Gadget", 3, 9.99).unwrap();

    let stale_widget = Item::new("Widget", 2, 100.0).unwrap();
    let stale_gadget = Item::new("Gadget", 1, 0.0).unwrap();
    let bill = service
        .generate_bill(&[
            BillRequest::from(&stale_widget),
            BillRequest::from(&stale_gadget),
        ])
        .unwrap();

    assert_close(bill.total, 1.99 * 2.0 + 9.99);
    assert_close(bill.lines[1].line_total, 9.99);
}

#[test]
fn bill_reprices_after_cost_change() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_item("Widget", 10, 1.99).unwrap();
    service.set_item_cost("Widget", 2.5).unwrap();

    let bill = service
        .generate_bill(&[BillRequest::new("Widget", 4)])
        .unwrap();
    assert_close(bill.total, 10.0);
}

#[test]
fn bill_prices_unknown_items_at_zero() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_item("Widget", 10, 1.5).unwrap();

    let bill = service
        .generate_bill(&[BillRequest::new("Ghost", 3), BillRequest::new("Widget", 2)])
        .unwrap();
    assert_eq!(bill.lines[0].unit_cost, None);
    assert_eq!(bill.lines[0].line_total, 0.0);
    assert_close(bill.total, 3.0);
}

#[test]
fn empty_bill_has_zero_total() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let bill = service.generate_bill(&[]).unwrap();
    assert!(bill.is_empty());
    assert_eq!(bill.total, 0.0);
}

#[test]
fn total_inventory_cost_sums_unit_costs() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert_eq!(service.total_inventory_cost().unwrap(), 0.0);

    service.add_item("Widget", 10, 1.5).unwrap();
    service.add_item("Gadget", 3, 2.25).unwrap();
    assert_close(service.total_inventory_cost().unwrap(), 3.75);
}

#[test]
fn add_item_validates_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.add_item("", 1, 1.0).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(service.all_items().unwrap().is_empty());
}

#[test]
fn delete_reports_not_found_for_missing_item() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.delete_item("Ghost").unwrap_err();
    assert_eq!(err.to_string(), "item not found: Ghost");
}

#[test]
fn views_and_totals_ignore_invalid_legacy_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO inventory (name, quantity, cost) VALUES ('Legacy', -2, 50.0);",
    )
    .unwrap();
    let service = service(&conn);
    service.add_item("Widget", 10, 1.5).unwrap();

    assert_close(service.total_inventory_cost().unwrap(), 1.5);
    let sorted = service.sorted_inventory_by_key(SortKey::Name).unwrap();
    assert_eq!(names(&sorted), vec!["Widget"]);

    // The row is still addressable by name for repair.
    assert_eq!(service.update_quantity("Legacy", 2).unwrap(), 1);
    assert_close(service.total_inventory_cost().unwrap(), 51.5);
}
