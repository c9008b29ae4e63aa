//! General inventory domain model.

use crate::model::{require_non_negative, require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreResult};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stocked household item.
///
/// `location` is optional; grouping uses the "Unspecified Location"
/// fallback bucket for items without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub uuid: RecordId,
    pub name: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub quantity: i64,
    /// Low-stock threshold: quantity strictly below this is low.
    pub minimum_quantity: i64,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, quantity: i64, minimum_quantity: i64, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            category: None,
            location: None,
            quantity,
            minimum_quantity,
            notes: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

impl Record for InventoryItem {
    const TABLE: &'static str = "inventory_items";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "name",
        "category",
        "location",
        "quantity",
        "minimum_quantity",
        "notes",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "inventory_item", "name")?;
        require_non_negative(self.quantity, "inventory_item", "quantity")?;
        require_non_negative(self.minimum_quantity, "inventory_item", "minimum_quantity")?;
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.name),
            codec::opt_text(self.category.as_deref()),
            codec::opt_text(self.location.as_deref()),
            codec::int(self.quantity),
            codec::int(self.minimum_quantity),
            codec::opt_text(self.notes.as_deref()),
            codec::int(self.created_at),
            codec::int(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            name: row.get("name")?,
            category: row.get("category")?,
            location: row.get("location")?,
            quantity: row.get("quantity")?,
            minimum_quantity: row.get("minimum_quantity")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
