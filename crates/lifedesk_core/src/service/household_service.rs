//! Household management use-case service.
//!
//! # Invariants
//! - A chore due today is not overdue; only strictly-past due dates are.
//! - Renewal countdowns sort chronologically by renewal date.

use crate::derive::{countdown_label, days_until};
use crate::model::household::{Chore, Renewal};
use crate::store::{Collection, RecordId, SqliteCollection, StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::Connection;

/// A chore with its due-date derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreStatus {
    pub chore: Chore,
    /// `None` for unscheduled chores.
    pub days_until_due: Option<i64>,
    pub is_overdue: bool,
}

/// A renewal with its countdown derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewalCountdown {
    pub renewal: Renewal,
    pub days_until: i64,
    /// "Today", "In N days", "N days ago".
    pub label: String,
}

pub struct HouseholdService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> HouseholdService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn chores(&self) -> StoreResult<SqliteCollection<'_, Chore>> {
        SqliteCollection::try_new(self.conn)
    }

    fn renewals(&self) -> StoreResult<SqliteCollection<'_, Renewal>> {
        SqliteCollection::try_new(self.conn)
    }

    pub fn add_chore(&self, chore: &Chore) -> StoreResult<RecordId> {
        self.chores()?.insert(chore)
    }

    pub fn update_chore(&self, chore: &mut Chore, now_ms: i64) -> StoreResult<()> {
        chore.updated_at = now_ms;
        self.chores()?.update(chore)
    }

    /// Marks a chore done in place.
    pub fn complete_chore(&self, id: RecordId, now_ms: i64) -> StoreResult<()> {
        let chores = self.chores()?;
        let Some(mut chore) = chores.get(id)? else {
            return Err(StoreError::NotFound(id));
        };
        chore.is_done = true;
        chore.updated_at = now_ms;
        chores.update(&chore)
    }

    pub fn delete_chore(&self, id: RecordId) -> StoreResult<()> {
        self.chores()?.delete(id)
    }

    /// Due-date derivation for every chore, in insertion order.
    pub fn chore_statuses(&self, today: NaiveDate) -> StoreResult<Vec<ChoreStatus>> {
        let chores = self.chores()?.list()?;
        Ok(chores
            .into_iter()
            .map(|chore| {
                let days_until_due = chore.due_on.map(|due| days_until(today, due));
                let is_overdue =
                    !chore.is_done && days_until_due.map(|days| days < 0).unwrap_or(false);
                ChoreStatus {
                    chore,
                    days_until_due,
                    is_overdue,
                }
            })
            .collect())
    }

    pub fn add_renewal(&self, renewal: &Renewal) -> StoreResult<RecordId> {
        self.renewals()?.insert(renewal)
    }

    pub fn delete_renewal(&self, id: RecordId) -> StoreResult<()> {
        self.renewals()?.delete(id)
    }

    /// All renewals sorted by renewal date with countdown labels.
    pub fn upcoming_renewals(&self, today: NaiveDate) -> StoreResult<Vec<RenewalCountdown>> {
        let mut renewals = self.renewals()?.list()?;
        renewals.sort_by_key(|renewal| renewal.renews_on);

        Ok(renewals
            .into_iter()
            .map(|renewal| {
                let days = days_until(today, renewal.renews_on);
                RenewalCountdown {
                    renewal,
                    days_until: days,
                    label: countdown_label(days),
                }
            })
            .collect())
    }
}
