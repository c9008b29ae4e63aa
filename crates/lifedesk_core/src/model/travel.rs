//! Travel planning domain model.
//!
//! # Invariants
//! - `end_on` must not be earlier than `start_on`.
//! - Itinerary items and journal entries reference their trip by id;
//!   dangling references render without trip-derived fields.

use crate::model::{require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Planning,
    Booked,
    Active,
    Completed,
}

fn trip_status_to_db(status: TripStatus) -> &'static str {
    match status {
        TripStatus::Planning => "planning",
        TripStatus::Booked => "booked",
        TripStatus::Active => "active",
        TripStatus::Completed => "completed",
    }
}

fn parse_trip_status(value: &str) -> Option<TripStatus> {
    match value {
        "planning" => Some(TripStatus::Planning),
        "booked" => Some(TripStatus::Booked),
        "active" => Some(TripStatus::Active),
        "completed" => Some(TripStatus::Completed),
        _ => None,
    }
}

/// A planned or past trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub uuid: RecordId,
    pub name: String,
    pub destination: String,
    pub start_on: NaiveDate,
    pub end_on: NaiveDate,
    pub status: TripStatus,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Trip {
    pub fn new(
        name: impl Into<String>,
        destination: impl Into<String>,
        start_on: NaiveDate,
        end_on: NaiveDate,
        now_ms: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            destination: destination.into(),
            start_on,
            end_on,
            status: TripStatus::Planning,
            notes: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

impl Record for Trip {
    const TABLE: &'static str = "trips";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "name",
        "destination",
        "start_on",
        "end_on",
        "status",
        "notes",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "trip", "name")?;
        require_text(&self.destination, "trip", "destination")?;
        if self.end_on < self.start_on {
            return Err(ValidationError::DateOrder {
                record: "trip",
                start: "start_on",
                end: "end_on",
            });
        }
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.name),
            codec::text(&self.destination),
            codec::date(self.start_on),
            codec::date(self.end_on),
            codec::text(trip_status_to_db(self.status)),
            codec::opt_text(self.notes.as_deref()),
            codec::int(self.created_at),
            codec::int(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let status_text: String = row.get("status")?;
        let status = parse_trip_status(&status_text).ok_or_else(|| {
            StoreError::InvalidData(format!("invalid trip status `{status_text}` in trips.status"))
        })?;

        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            name: row.get("name")?,
            destination: row.get("destination")?,
            start_on: codec::parse_date(row, "start_on")?,
            end_on: codec::parse_date(row, "end_on")?,
            status,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// One planned activity on a trip day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub uuid: RecordId,
    pub trip_uuid: RecordId,
    pub entry_on: NaiveDate,
    pub title: String,
    /// Optional "HH:MM" display time.
    pub start_time: Option<String>,
    pub location: Option<String>,
}

impl ItineraryItem {
    pub fn new(trip_uuid: RecordId, entry_on: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            trip_uuid,
            entry_on,
            title: title.into(),
            start_time: None,
            location: None,
        }
    }
}

impl Record for ItineraryItem {
    const TABLE: &'static str = "itinerary_items";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "trip_uuid",
        "entry_on",
        "title",
        "start_time",
        "location",
    ];
    const PARENT_COLUMN: Option<&'static str> = Some("trip_uuid");

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, "itinerary_item", "title")
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::id_value(self.trip_uuid),
            codec::date(self.entry_on),
            codec::text(&self.title),
            codec::opt_text(self.start_time.as_deref()),
            codec::opt_text(self.location.as_deref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            trip_uuid: codec::parse_id(row, "trip_uuid")?,
            entry_on: codec::parse_date(row, "entry_on")?,
            title: row.get("title")?,
            start_time: row.get("start_time")?,
            location: row.get("location")?,
        })
    }
}

/// A dated journal entry written during a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripJournalEntry {
    pub uuid: RecordId,
    pub trip_uuid: RecordId,
    pub entry_on: NaiveDate,
    pub body: String,
    pub created_at: i64,
}

impl TripJournalEntry {
    pub fn new(
        trip_uuid: RecordId,
        entry_on: NaiveDate,
        body: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            trip_uuid,
            entry_on,
            body: body.into(),
            created_at: now_ms,
        }
    }
}

impl Record for TripJournalEntry {
    const TABLE: &'static str = "trip_journal_entries";
    const COLUMNS: &'static [&'static str] =
        &["uuid", "trip_uuid", "entry_on", "body", "created_at"];
    const PARENT_COLUMN: Option<&'static str> = Some("trip_uuid");

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.body, "trip_journal_entry", "body")
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::id_value(self.trip_uuid),
            codec::date(self.entry_on),
            codec::text(&self.body),
            codec::int(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            trip_uuid: codec::parse_id(row, "trip_uuid")?,
            entry_on: codec::parse_date(row, "entry_on")?,
            body: row.get("body")?,
            created_at: row.get("created_at")?,
        })
    }
}
