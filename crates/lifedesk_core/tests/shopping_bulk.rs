use lifedesk_core::db::open_db_in_memory;
use lifedesk_core::model::shopping::{ShoppingItem, ShoppingList};
use lifedesk_core::service::shopping_service::ShoppingService;
use lifedesk_core::StoreError;
use uuid::Uuid;

const NOW_MS: i64 = 1_700_000_000_000;
const PURCHASE_MS: i64 = 1_700_000_100_000;

fn seeded_list(service: &ShoppingService<'_>) -> (ShoppingList, Vec<ShoppingItem>) {
    let list = ShoppingList::new("Groceries", NOW_MS);
    service.create_list(&list).unwrap();

    let items: Vec<ShoppingItem> = ["Milk", "Bread", "Eggs"]
        .iter()
        .map(|name| ShoppingItem::new(list.uuid, *name, 1, NOW_MS))
        .collect();
    for item in &items {
        service.add_item(item).unwrap();
    }
    (list, items)
}

#[test]
fn bulk_complete_marks_all_and_stamps_purchase_time() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = ShoppingService::new(&mut conn);

    let (list, items) = seeded_list(&service);
    let ids: Vec<Uuid> = items.iter().map(|item| item.uuid).collect();

    let updated = service.bulk_complete(&ids, PURCHASE_MS).unwrap();
    assert_eq!(updated, 3);

    let stored = service.list_items(list.uuid).unwrap();
    assert!(stored.iter().all(|item| item.is_done));
    assert!(stored
        .iter()
        .all(|item| item.purchased_at == Some(PURCHASE_MS)));
}

#[test]
fn failing_bulk_complete_changes_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = ShoppingService::new(&mut conn);

    let (list, items) = seeded_list(&service);
    let mut ids: Vec<Uuid> = items.iter().map(|item| item.uuid).collect();
    ids.push(Uuid::new_v4());

    let err = service.bulk_complete(&ids, PURCHASE_MS).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    let stored = service.list_items(list.uuid).unwrap();
    assert!(stored.iter().all(|item| !item.is_done));
    assert!(stored.iter().all(|item| item.purchased_at.is_none()));
}

#[test]
fn failing_bulk_remove_rolls_back_the_batch() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = ShoppingService::new(&mut conn);

    let (list, items) = seeded_list(&service);
    let ids = vec![items[0].uuid, Uuid::new_v4(), items[2].uuid];

    let err = service.bulk_remove(&ids).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(service.list_items(list.uuid).unwrap().len(), 3);

    let valid_ids = vec![items[0].uuid, items[2].uuid];
    service.bulk_remove(&valid_ids).unwrap();
    assert_eq!(service.list_items(list.uuid).unwrap().len(), 1);
}

#[test]
fn toggle_stamps_and_clears_purchase_time() {
    let mut conn = open_db_in_memory().unwrap();
    let service = ShoppingService::new(&mut conn);

    let (list, items) = seeded_list(&service);
    let milk = items[0].uuid;

    service.toggle_item(milk, PURCHASE_MS).unwrap();
    let overview = service.overview(list.uuid).unwrap().unwrap();
    assert_eq!(overview.done.len(), 1);
    assert_eq!(overview.done[0].purchased_at, Some(PURCHASE_MS));
    assert_eq!(overview.remaining_count, 2);

    service.toggle_item(milk, PURCHASE_MS + 1).unwrap();
    let overview = service.overview(list.uuid).unwrap().unwrap();
    assert!(overview.done.is_empty());
    assert_eq!(overview.remaining_count, 3);
    assert!(overview.active.iter().all(|item| item.purchased_at.is_none()));
}

#[test]
fn deleting_a_list_cascades_to_items() {
    let mut conn = open_db_in_memory().unwrap();
    let service = ShoppingService::new(&mut conn);

    let (list, _) = seeded_list(&service);
    service.delete_list(list.uuid).unwrap();

    assert!(service.list_lists().unwrap().is_empty());
    assert!(service.list_items(list.uuid).unwrap().is_empty());
    assert!(service.overview(list.uuid).unwrap().is_none());
}
