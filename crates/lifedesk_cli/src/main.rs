//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the core crate end to end against an in-memory store.
//! - Keep output deterministic apart from the single wall-clock read
//!   that supplies "today".

use chrono::{Duration, Local, Utc};
use lifedesk_core::db::open_db_in_memory;
use lifedesk_core::model::shopping::{ShoppingItem, ShoppingList};
use lifedesk_core::model::travel::Trip;
use lifedesk_core::model::vehicle::{MaintenanceRecord, Vehicle};
use lifedesk_core::service::shopping_service::ShoppingService;
use lifedesk_core::service::travel_service::TravelService;
use lifedesk_core::service::vehicle_service::VehicleService;

fn main() {
    println!("lifedesk_core version={}", lifedesk_core::core_version());

    if let Err(err) = run_smoke() {
        eprintln!("smoke run failed: {err}");
        std::process::exit(1);
    }
}

fn run_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_db_in_memory()?;
    let today = Local::now().date_naive();
    let now_ms = Utc::now().timestamp_millis();

    let vehicles = VehicleService::new(&conn);
    let car = Vehicle::new("Daily driver", "Toyota", "Corolla", now_ms);
    vehicles.add_vehicle(&car)?;

    let mut oil_change = MaintenanceRecord::new(car.uuid, "Oil change", today, now_ms);
    oil_change.cost_cents = Some(7499);
    vehicles.log_maintenance(&oil_change)?;

    let summary = vehicles
        .cost_summary(car.uuid)?
        .ok_or("vehicle summary missing")?;
    println!(
        "vehicle `{}`: {} maintenance records, total {}",
        car.name, summary.record_count, summary.total_cost_display
    );

    let travel = TravelService::new(&conn);
    let trip = Trip::new(
        "Long weekend",
        "Lisbon",
        today + Duration::days(5),
        today + Duration::days(8),
        now_ms,
    );
    travel.create_trip(&trip)?;
    let countdown = TravelService::countdown(&trip, today);
    println!("trip `{}` starts: {}", trip.name, countdown.label);

    let shopping = ShoppingService::new(&mut conn);
    let groceries = ShoppingList::new("Groceries", now_ms);
    shopping.create_list(&groceries)?;
    let milk = ShoppingItem::new(groceries.uuid, "Milk", 2, now_ms);
    let bread = ShoppingItem::new(groceries.uuid, "Bread", 1, now_ms);
    shopping.add_item(&milk)?;
    shopping.add_item(&bread)?;

    let overview = shopping
        .overview(groceries.uuid)?
        .ok_or("shopping overview missing")?;
    println!(
        "shopping list `{}`: {} items remaining",
        overview.list.name, overview.remaining_count
    );

    Ok(())
}
