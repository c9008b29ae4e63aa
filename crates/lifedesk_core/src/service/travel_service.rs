//! Travel planning use-case service.
//!
//! # Invariants
//! - Countdowns render "Today" only at exactly zero days; negative
//!   distances are past, rendered distinctly.
//! - Itinerary day groups are chronological; items keep their insertion
//!   order within a day.

use crate::derive::{countdown_label, days_until, group_by};
use crate::model::travel::{ItineraryItem, Trip, TripJournalEntry, TripStatus};
use crate::store::{Collection, RecordId, SqliteCollection, StoreError, StoreResult};
use chrono::NaiveDate;
use log::info;
use rusqlite::Connection;

/// Countdown derivation for a trip start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripCountdown {
    pub trip_uuid: RecordId,
    pub days_until_start: i64,
    /// "Today", "In N days", "N days ago".
    pub label: String,
}

/// One itinerary day with its planned items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub day: NaiveDate,
    pub items: Vec<ItineraryItem>,
}

pub struct TravelService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> TravelService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn trips(&self) -> StoreResult<SqliteCollection<'_, Trip>> {
        SqliteCollection::try_new(self.conn)
    }

    fn itinerary(&self) -> StoreResult<SqliteCollection<'_, ItineraryItem>> {
        SqliteCollection::try_new(self.conn)
    }

    fn journal_entries(&self) -> StoreResult<SqliteCollection<'_, TripJournalEntry>> {
        SqliteCollection::try_new(self.conn)
    }

    pub fn create_trip(&self, trip: &Trip) -> StoreResult<RecordId> {
        self.trips()?.insert(trip)
    }

    pub fn update_trip(&self, trip: &mut Trip, now_ms: i64) -> StoreResult<()> {
        trip.updated_at = now_ms;
        self.trips()?.update(trip)
    }

    pub fn set_status(&self, id: RecordId, status: TripStatus, now_ms: i64) -> StoreResult<()> {
        let trips = self.trips()?;
        let Some(mut trip) = trips.get(id)? else {
            return Err(StoreError::NotFound(id));
        };
        trip.status = status;
        trip.updated_at = now_ms;
        trips.update(&trip)
    }

    pub fn get_trip(&self, id: RecordId) -> StoreResult<Option<Trip>> {
        self.trips()?.get(id)
    }

    pub fn list_trips(&self) -> StoreResult<Vec<Trip>> {
        self.trips()?.list()
    }

    pub fn add_itinerary_item(&self, item: &ItineraryItem) -> StoreResult<RecordId> {
        self.itinerary()?.insert(item)
    }

    pub fn add_journal_entry(&self, entry: &TripJournalEntry) -> StoreResult<RecordId> {
        self.journal_entries()?.insert(entry)
    }

    /// Deletes a trip and cascades to itinerary and journal children.
    pub fn delete_trip(&self, id: RecordId) -> StoreResult<()> {
        self.trips()?.delete(id)?;
        let removed_itinerary = self.itinerary()?.delete_children(id)?;
        let removed_journal = self.journal_entries()?.delete_children(id)?;
        info!(
            "event=trip_delete module=travel status=ok trip={id} \
             itinerary_removed={removed_itinerary} journal_removed={removed_journal}"
        );
        Ok(())
    }

    /// Days until the trip starts, with the display label.
    pub fn countdown(trip: &Trip, today: NaiveDate) -> TripCountdown {
        let days = days_until(today, trip.start_on);
        TripCountdown {
            trip_uuid: trip.uuid,
            days_until_start: days,
            label: countdown_label(days),
        }
    }

    /// Itinerary grouped by day, days in chronological order, items in
    /// insertion order within each day.
    pub fn itinerary_by_day(&self, trip_uuid: RecordId) -> StoreResult<Vec<DayPlan>> {
        let mut items = self.itinerary()?.list_children(trip_uuid)?;
        items.sort_by_key(|item| item.entry_on);

        Ok(group_by(&items, "", |item| Some(item.entry_on.to_string()))
            .into_iter()
            .map(|group| {
                let members: Vec<ItineraryItem> =
                    group.members.into_iter().cloned().collect();
                DayPlan {
                    day: members[0].entry_on,
                    items: members,
                }
            })
            .collect())
    }

    /// Journal entries in chronological order.
    pub fn journal(&self, trip_uuid: RecordId) -> StoreResult<Vec<TripJournalEntry>> {
        let mut entries = self.journal_entries()?.list_children(trip_uuid)?;
        entries.sort_by_key(|entry| entry.entry_on);
        Ok(entries)
    }
}
