//! Shopping list domain model.

use crate::model::{require_non_negative, require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreResult};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub uuid: RecordId,
    pub name: String,
    pub created_at: i64,
}

impl ShoppingList {
    pub fn new(name: impl Into<String>, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            created_at: now_ms,
        }
    }
}

impl Record for ShoppingList {
    const TABLE: &'static str = "shopping_lists";
    const COLUMNS: &'static [&'static str] = &["uuid", "name", "created_at"];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "shopping_list", "name")
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.name),
            codec::int(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            name: row.get("name")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// One item on a shopping list.
///
/// `purchased_at` is stamped when the item is completed; clearing the
/// done flag clears the stamp as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub uuid: RecordId,
    pub list_uuid: RecordId,
    pub name: String,
    pub quantity: i64,
    pub note: Option<String>,
    pub is_done: bool,
    /// Epoch milliseconds of purchase, when done.
    pub purchased_at: Option<i64>,
    pub created_at: i64,
}

impl ShoppingItem {
    pub fn new(list_uuid: RecordId, name: impl Into<String>, quantity: i64, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            list_uuid,
            name: name.into(),
            quantity,
            note: None,
            is_done: false,
            purchased_at: None,
            created_at: now_ms,
        }
    }
}

impl Record for ShoppingItem {
    const TABLE: &'static str = "shopping_items";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "list_uuid",
        "name",
        "quantity",
        "note",
        "is_done",
        "purchased_at",
        "created_at",
    ];
    const PARENT_COLUMN: Option<&'static str> = Some("list_uuid");

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "shopping_item", "name")?;
        require_non_negative(self.quantity, "shopping_item", "quantity")?;
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::id_value(self.list_uuid),
            codec::text(&self.name),
            codec::int(self.quantity),
            codec::opt_text(self.note.as_deref()),
            codec::flag(self.is_done),
            codec::opt_int(self.purchased_at),
            codec::int(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            list_uuid: codec::parse_id(row, "list_uuid")?,
            name: row.get("name")?,
            quantity: row.get("quantity")?,
            note: row.get("note")?,
            is_done: codec::parse_flag(row, "is_done")?,
            purchased_at: row.get("purchased_at")?,
            created_at: row.get("created_at")?,
        })
    }
}
