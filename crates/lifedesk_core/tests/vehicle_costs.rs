use chrono::NaiveDate;
use lifedesk_core::db::open_db_in_memory;
use lifedesk_core::model::vehicle::{MaintenanceRecord, OdometerLog, Vehicle, VehicleStatus};
use lifedesk_core::service::vehicle_service::VehicleService;
use uuid::Uuid;

const NOW_MS: i64 = 1_700_000_000_000;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn maintenance(
    vehicle: &Vehicle,
    service_type: &str,
    on: NaiveDate,
    cost_cents: Option<i64>,
) -> MaintenanceRecord {
    let mut record = MaintenanceRecord::new(vehicle.uuid, service_type, on, NOW_MS);
    record.cost_cents = cost_cents;
    record
}

#[test]
fn cost_rollup_treats_missing_costs_as_zero() {
    let conn = open_db_in_memory().unwrap();
    let service = VehicleService::new(&conn);

    let car = Vehicle::new("Daily driver", "Toyota", "Corolla", NOW_MS);
    service.add_vehicle(&car).unwrap();

    service
        .log_maintenance(&maintenance(&car, "Oil change", date(2025, 1, 10), Some(2500)))
        .unwrap();
    service
        .log_maintenance(&maintenance(&car, "Wiper blades", date(2025, 2, 1), None))
        .unwrap();
    service
        .log_maintenance(&maintenance(&car, "Brake pads", date(2025, 3, 15), Some(4999)))
        .unwrap();

    let summary = service.cost_summary(car.uuid).unwrap().unwrap();
    assert_eq!(summary.record_count, 3);
    assert_eq!(summary.total_cost_cents, 7499);
    assert_eq!(summary.total_cost_display, "$74.99");
    assert_eq!(summary.last_service_on, Some(date(2025, 3, 15)));
}

#[test]
fn cost_summary_for_unknown_vehicle_is_none() {
    let conn = open_db_in_memory().unwrap();
    let service = VehicleService::new(&conn);

    assert!(service.cost_summary(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn overview_tolerates_dangling_vehicle_references() {
    let conn = open_db_in_memory().unwrap();
    let service = VehicleService::new(&conn);

    let car = Vehicle::new("Car", "Honda", "Fit", NOW_MS);
    service.add_vehicle(&car).unwrap();
    service
        .log_maintenance(&maintenance(&car, "Oil change", date(2025, 1, 10), Some(3000)))
        .unwrap();

    let orphan = MaintenanceRecord::new(Uuid::new_v4(), "Mystery fix", date(2025, 1, 12), NOW_MS);
    service.log_maintenance(&orphan).unwrap();

    let overview = service.maintenance_overview().unwrap();
    assert_eq!(overview.len(), 2);
    assert_eq!(overview[0].vehicle_name.as_deref(), Some("Car"));
    assert_eq!(overview[1].vehicle_name, None);
}

#[test]
fn deleting_a_vehicle_cascades_to_children() {
    let conn = open_db_in_memory().unwrap();
    let service = VehicleService::new(&conn);

    let car = Vehicle::new("Car", "Honda", "Fit", NOW_MS);
    service.add_vehicle(&car).unwrap();
    service
        .log_maintenance(&maintenance(&car, "Oil change", date(2025, 1, 10), Some(3000)))
        .unwrap();
    service
        .log_odometer(&OdometerLog::new(car.uuid, date(2025, 1, 10), 42_000))
        .unwrap();

    service.delete_vehicle(car.uuid).unwrap();

    assert!(service.get_vehicle(car.uuid).unwrap().is_none());
    assert!(service.list_maintenance(car.uuid).unwrap().is_empty());
    assert!(service.latest_odometer(car.uuid).unwrap().is_none());
}

#[test]
fn latest_odometer_picks_most_recent_date() {
    let conn = open_db_in_memory().unwrap();
    let service = VehicleService::new(&conn);

    let car = Vehicle::new("Car", "Honda", "Fit", NOW_MS);
    service.add_vehicle(&car).unwrap();

    service
        .log_odometer(&OdometerLog::new(car.uuid, date(2025, 3, 1), 44_000))
        .unwrap();
    service
        .log_odometer(&OdometerLog::new(car.uuid, date(2025, 1, 1), 42_000))
        .unwrap();

    let latest = service.latest_odometer(car.uuid).unwrap().unwrap();
    assert_eq!(latest.reading, 44_000);
}

#[test]
fn search_composes_text_and_status_filters() {
    let conn = open_db_in_memory().unwrap();
    let service = VehicleService::new(&conn);

    let mut corolla = Vehicle::new("Commuter", "Toyota", "Corolla", NOW_MS);
    corolla.status = VehicleStatus::Active;
    let mut old_truck = Vehicle::new("Old truck", "Toyota", "Hilux", NOW_MS);
    old_truck.status = VehicleStatus::Retired;
    service.add_vehicle(&corolla).unwrap();
    service.add_vehicle(&old_truck).unwrap();

    let toyotas = service.search_vehicles("toyota", None).unwrap();
    assert_eq!(toyotas.len(), 2);

    let active_toyotas = service
        .search_vehicles("toyota", Some(VehicleStatus::Active))
        .unwrap();
    assert_eq!(active_toyotas.len(), 1);
    assert_eq!(active_toyotas[0].name, "Commuter");

    let none = service.search_vehicles("subaru", None).unwrap();
    assert!(none.is_empty());
}
