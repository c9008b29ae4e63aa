use chrono::NaiveDate;
use lifedesk_core::db::open_db_in_memory;
use lifedesk_core::model::household::{Chore, Renewal};
use lifedesk_core::service::household_service::HouseholdService;

const NOW_MS: i64 = 1_700_000_000_000;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn chore_due(name: &str, due_on: Option<NaiveDate>) -> Chore {
    let mut chore = Chore::new(name, NOW_MS);
    chore.due_on = due_on;
    chore
}

#[test]
fn overdue_is_strictly_past_due_dates() {
    let conn = open_db_in_memory().unwrap();
    let service = HouseholdService::new(&conn);

    let today = date(2025, 4, 10);
    service
        .add_chore(&chore_due("Yesterday", Some(date(2025, 4, 9))))
        .unwrap();
    service
        .add_chore(&chore_due("Due today", Some(today)))
        .unwrap();
    service
        .add_chore(&chore_due("Unscheduled", None))
        .unwrap();

    let statuses = service.chore_statuses(today).unwrap();
    assert_eq!(statuses.len(), 3);

    assert_eq!(statuses[0].days_until_due, Some(-1));
    assert!(statuses[0].is_overdue);

    assert_eq!(statuses[1].days_until_due, Some(0));
    assert!(!statuses[1].is_overdue);

    assert_eq!(statuses[2].days_until_due, None);
    assert!(!statuses[2].is_overdue);
}

#[test]
fn completed_chores_are_never_overdue() {
    let conn = open_db_in_memory().unwrap();
    let service = HouseholdService::new(&conn);

    let today = date(2025, 4, 10);
    let chore = chore_due("Old task", Some(date(2025, 4, 1)));
    service.add_chore(&chore).unwrap();
    service.complete_chore(chore.uuid, NOW_MS + 1).unwrap();

    let statuses = service.chore_statuses(today).unwrap();
    assert!(statuses[0].chore.is_done);
    assert!(!statuses[0].is_overdue);
}

#[test]
fn renewals_sort_chronologically_with_countdown_labels() {
    let conn = open_db_in_memory().unwrap();
    let service = HouseholdService::new(&conn);

    let today = date(2025, 4, 10);
    service
        .add_renewal(&Renewal::new("Car insurance", date(2025, 5, 1), NOW_MS))
        .unwrap();
    service
        .add_renewal(&Renewal::new("Streaming", date(2025, 4, 10), NOW_MS))
        .unwrap();
    service
        .add_renewal(&Renewal::new("Lapsed domain", date(2025, 4, 7), NOW_MS))
        .unwrap();

    let upcoming = service.upcoming_renewals(today).unwrap();
    assert_eq!(
        upcoming
            .iter()
            .map(|entry| entry.renewal.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Lapsed domain", "Streaming", "Car insurance"]
    );
    assert_eq!(upcoming[0].days_until, -3);
    assert_eq!(upcoming[0].label, "3 days ago");
    assert_eq!(upcoming[1].label, "Today");
    assert_eq!(upcoming[2].days_until, 21);
    assert_eq!(upcoming[2].label, "In 21 days");
}
