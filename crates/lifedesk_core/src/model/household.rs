//! Household management domain model: chores and recurring renewals.

use crate::model::{require_non_negative_opt, require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A household task, optionally scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    pub uuid: RecordId,
    pub name: String,
    /// Room or zone, e.g. "Kitchen".
    pub area: Option<String>,
    pub due_on: Option<NaiveDate>,
    pub is_done: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Chore {
    pub fn new(name: impl Into<String>, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            area: None,
            due_on: None,
            is_done: false,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

impl Record for Chore {
    const TABLE: &'static str = "chores";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "name",
        "area",
        "due_on",
        "is_done",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "chore", "name")
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.name),
            codec::opt_text(self.area.as_deref()),
            codec::opt_date(self.due_on),
            codec::flag(self.is_done),
            codec::int(self.created_at),
            codec::int(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            name: row.get("name")?,
            area: row.get("area")?,
            due_on: codec::parse_opt_date(row, "due_on")?,
            is_done: codec::parse_flag(row, "is_done")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// A recurring cost that comes due on a known date (insurance,
/// registration, subscriptions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renewal {
    pub uuid: RecordId,
    pub name: String,
    pub renews_on: NaiveDate,
    pub cost_cents: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl Renewal {
    pub fn new(name: impl Into<String>, renews_on: NaiveDate, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            renews_on,
            cost_cents: None,
            notes: None,
            created_at: now_ms,
        }
    }
}

impl Record for Renewal {
    const TABLE: &'static str = "renewals";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "name",
        "renews_on",
        "cost_cents",
        "notes",
        "created_at",
    ];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "renewal", "name")?;
        require_non_negative_opt(self.cost_cents, "renewal", "cost_cents")?;
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.name),
            codec::date(self.renews_on),
            codec::opt_int(self.cost_cents),
            codec::opt_text(self.notes.as_deref()),
            codec::int(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            name: row.get("name")?,
            renews_on: codec::parse_date(row, "renews_on")?,
            cost_cents: row.get("cost_cents")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }
}
