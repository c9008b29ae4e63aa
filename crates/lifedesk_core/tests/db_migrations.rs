use lifedesk_core::db::migrations::{apply_migrations, latest_version};
use lifedesk_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;")
        .unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut names = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        names.push(row.get::<_, String>(0).unwrap());
    }
    names
}

#[test]
fn fresh_database_migrates_to_latest_version() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(user_version(&conn), latest_version());

    let tables = table_names(&conn);
    for required in [
        "vehicles",
        "maintenance_records",
        "odometer_logs",
        "accounts",
        "transactions",
        "inventory_items",
        "notes",
        "media_items",
        "meals",
        "meal_entries",
        "nutrition_targets",
        "books",
        "reading_logs",
        "highlights",
        "chores",
        "renewals",
        "shopping_lists",
        "shopping_items",
        "trips",
        "itinerary_items",
        "trip_journal_entries",
    ] {
        assert!(
            tables.iter().any(|name| name == required),
            "missing table {required}"
        );
    }
}

#[test]
fn reapplying_migrations_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    let before = user_version(&conn);
    apply_migrations(&mut conn).unwrap();
    assert_eq!(user_version(&conn), before);
}

#[test]
fn newer_schema_version_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
        .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
}

#[test]
fn file_backed_database_opens_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifedesk.db");

    {
        let conn = open_db(&path).unwrap();
        assert_eq!(user_version(&conn), latest_version());
    }

    let reopened = open_db(&path).unwrap();
    assert_eq!(user_version(&reopened), latest_version());
}
