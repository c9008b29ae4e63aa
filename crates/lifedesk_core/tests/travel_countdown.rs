use chrono::NaiveDate;
use lifedesk_core::db::open_db_in_memory;
use lifedesk_core::model::travel::{ItineraryItem, Trip, TripJournalEntry, TripStatus};
use lifedesk_core::service::travel_service::TravelService;
use lifedesk_core::StoreError;

const NOW_MS: i64 = 1_700_000_000_000;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn countdown_labels_today_future_and_past_distinctly() {
    let today = date(2025, 7, 1);

    let in_five = Trip::new("Lisbon", "Portugal", date(2025, 7, 6), date(2025, 7, 10), NOW_MS);
    let countdown = TravelService::countdown(&in_five, today);
    assert_eq!(countdown.days_until_start, 5);
    assert_eq!(countdown.label, "In 5 days");

    let starts_today = Trip::new("Porto", "Portugal", today, date(2025, 7, 3), NOW_MS);
    let countdown = TravelService::countdown(&starts_today, today);
    assert_eq!(countdown.days_until_start, 0);
    assert_eq!(countdown.label, "Today");

    let started_yesterday =
        Trip::new("Faro", "Portugal", date(2025, 6, 30), date(2025, 7, 4), NOW_MS);
    let countdown = TravelService::countdown(&started_yesterday, today);
    assert_eq!(countdown.days_until_start, -1);
    assert_eq!(countdown.label, "1 day ago");
}

#[test]
fn itinerary_groups_by_day_in_chronological_order() {
    let conn = open_db_in_memory().unwrap();
    let service = TravelService::new(&conn);

    let trip = Trip::new("Lisbon", "Portugal", date(2025, 7, 6), date(2025, 7, 8), NOW_MS);
    service.create_trip(&trip).unwrap();

    // Inserted out of day order; within a day, insertion order must hold.
    service
        .add_itinerary_item(&ItineraryItem::new(trip.uuid, date(2025, 7, 7), "Tram 28"))
        .unwrap();
    service
        .add_itinerary_item(&ItineraryItem::new(trip.uuid, date(2025, 7, 6), "Check in"))
        .unwrap();
    service
        .add_itinerary_item(&ItineraryItem::new(trip.uuid, date(2025, 7, 6), "Dinner"))
        .unwrap();

    let days = service.itinerary_by_day(trip.uuid).unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].day, date(2025, 7, 6));
    assert_eq!(
        days[0]
            .items
            .iter()
            .map(|item| item.title.as_str())
            .collect::<Vec<_>>(),
        vec!["Check in", "Dinner"]
    );
    assert_eq!(days[1].day, date(2025, 7, 7));
}

#[test]
fn journal_is_chronological() {
    let conn = open_db_in_memory().unwrap();
    let service = TravelService::new(&conn);

    let trip = Trip::new("Lisbon", "Portugal", date(2025, 7, 6), date(2025, 7, 8), NOW_MS);
    service.create_trip(&trip).unwrap();

    service
        .add_journal_entry(&TripJournalEntry::new(
            trip.uuid,
            date(2025, 7, 7),
            "Day two",
            NOW_MS,
        ))
        .unwrap();
    service
        .add_journal_entry(&TripJournalEntry::new(
            trip.uuid,
            date(2025, 7, 6),
            "Day one",
            NOW_MS,
        ))
        .unwrap();

    let entries = service.journal(trip.uuid).unwrap();
    assert_eq!(entries[0].body, "Day one");
    assert_eq!(entries[1].body, "Day two");
}

#[test]
fn reversed_date_range_fails_validation() {
    let conn = open_db_in_memory().unwrap();
    let service = TravelService::new(&conn);

    let backwards = Trip::new("Oops", "Nowhere", date(2025, 7, 8), date(2025, 7, 6), NOW_MS);
    let err = service.create_trip(&backwards).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[test]
fn set_status_advances_the_trip() {
    let conn = open_db_in_memory().unwrap();
    let service = TravelService::new(&conn);

    let trip = Trip::new("Lisbon", "Portugal", date(2025, 7, 6), date(2025, 7, 8), NOW_MS);
    service.create_trip(&trip).unwrap();
    service
        .set_status(trip.uuid, TripStatus::Booked, NOW_MS + 1)
        .unwrap();

    let loaded = service.get_trip(trip.uuid).unwrap().unwrap();
    assert_eq!(loaded.status, TripStatus::Booked);
    assert_eq!(loaded.updated_at, NOW_MS + 1);
}

#[test]
fn deleting_a_trip_cascades_to_itinerary_and_journal() {
    let conn = open_db_in_memory().unwrap();
    let service = TravelService::new(&conn);

    let trip = Trip::new("Lisbon", "Portugal", date(2025, 7, 6), date(2025, 7, 8), NOW_MS);
    service.create_trip(&trip).unwrap();
    service
        .add_itinerary_item(&ItineraryItem::new(trip.uuid, date(2025, 7, 6), "Check in"))
        .unwrap();
    service
        .add_journal_entry(&TripJournalEntry::new(
            trip.uuid,
            date(2025, 7, 6),
            "Arrived",
            NOW_MS,
        ))
        .unwrap();

    service.delete_trip(trip.uuid).unwrap();

    assert!(service.get_trip(trip.uuid).unwrap().is_none());
    assert!(service.itinerary_by_day(trip.uuid).unwrap().is_empty());
    assert!(service.journal(trip.uuid).unwrap().is_empty());
}
