use lifedesk_core::db::open_db_in_memory;
use lifedesk_core::model::inventory::InventoryItem;
use lifedesk_core::service::inventory_service::{InventoryService, FALLBACK_LOCATION};

const NOW_MS: i64 = 1_700_000_000_000;

fn item(name: &str, location: Option<&str>, quantity: i64, minimum: i64) -> InventoryItem {
    let mut item = InventoryItem::new(name, quantity, minimum, NOW_MS);
    item.location = location.map(str::to_string);
    item
}

#[test]
fn location_groups_cover_all_items_in_stable_order() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(&conn);

    service.add_item(&item("Drill", Some("Garage"), 1, 0)).unwrap();
    service.add_item(&item("Flour", Some("Pantry"), 2, 1)).unwrap();
    service.add_item(&item("Ladder", Some("Garage"), 1, 0)).unwrap();
    service.add_item(&item("Spare keys", None, 1, 0)).unwrap();

    let groups = service.items_by_location().unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].location, "Garage");
    assert_eq!(
        groups[0]
            .items
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Drill", "Ladder"]
    );
    assert_eq!(groups[1].location, "Pantry");
    assert_eq!(groups[2].location, FALLBACK_LOCATION);

    let grouped_total: usize = groups.iter().map(|group| group.items.len()).sum();
    assert_eq!(grouped_total, 4);
}

#[test]
fn empty_inventory_produces_no_groups() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(&conn);

    assert!(service.items_by_location().unwrap().is_empty());
}

#[test]
fn low_stock_boundary_is_strict() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(&conn);

    service.add_item(&item("At minimum", None, 3, 3)).unwrap();
    service.add_item(&item("Below minimum", None, 2, 3)).unwrap();

    let low = service.low_stock_items().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "Below minimum");
}

#[test]
fn set_quantity_moves_an_item_across_the_boundary() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(&conn);

    let batteries = item("AA batteries", Some("Drawer"), 4, 4);
    service.add_item(&batteries).unwrap();
    assert!(service.low_stock_items().unwrap().is_empty());

    service.set_quantity(batteries.uuid, 3, NOW_MS + 1).unwrap();
    let low = service.low_stock_items().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].updated_at, NOW_MS + 1);
}

#[test]
fn search_composes_query_and_category_selector() {
    let conn = open_db_in_memory().unwrap();
    let service = InventoryService::new(&conn);

    let mut bulbs = item("Light bulbs", Some("Closet"), 6, 2);
    bulbs.category = Some("Electrical".to_string());
    let mut tape = item("Electrical tape", Some("Garage"), 3, 1);
    tape.category = Some("Hardware".to_string());
    service.add_item(&bulbs).unwrap();
    service.add_item(&tape).unwrap();

    // Blank query with the "all" sentinel returns everything.
    assert_eq!(service.search_items("", None).unwrap().len(), 2);

    let electrical_text = service.search_items("electrical", None).unwrap();
    assert_eq!(electrical_text.len(), 2);

    let filtered = service
        .search_items("electrical", Some("Hardware"))
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Electrical tape");
}
