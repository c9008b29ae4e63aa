//! General inventory use-case service.
//!
//! # Invariants
//! - Location grouping uses the "Unspecified Location" fallback bucket
//!   and never drops or reorders items.
//! - Low stock is a strict comparison: equal to minimum is not low.

use crate::derive::{group_by, is_low_stock, matches_text};
use crate::model::inventory::InventoryItem;
use crate::store::{Collection, RecordId, SqliteCollection, StoreError, StoreResult};
use rusqlite::Connection;

pub const FALLBACK_LOCATION: &str = "Unspecified Location";

/// Items sharing one storage location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationGroup {
    pub location: String,
    pub items: Vec<InventoryItem>,
}

pub struct InventoryService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> InventoryService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn items(&self) -> StoreResult<SqliteCollection<'_, InventoryItem>> {
        SqliteCollection::try_new(self.conn)
    }

    pub fn add_item(&self, item: &InventoryItem) -> StoreResult<RecordId> {
        self.items()?.insert(item)
    }

    pub fn update_item(&self, item: &mut InventoryItem, now_ms: i64) -> StoreResult<()> {
        item.updated_at = now_ms;
        self.items()?.update(item)
    }

    /// Sets the stock count for one item.
    pub fn set_quantity(&self, id: RecordId, quantity: i64, now_ms: i64) -> StoreResult<()> {
        let items = self.items()?;
        let Some(mut item) = items.get(id)? else {
            return Err(StoreError::NotFound(id));
        };
        item.quantity = quantity;
        item.updated_at = now_ms;
        items.update(&item)
    }

    pub fn delete_item(&self, id: RecordId) -> StoreResult<()> {
        self.items()?.delete(id)
    }

    pub fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
        self.items()?.list()
    }

    /// Stable location grouping with the fallback bucket for items
    /// without a location.
    pub fn items_by_location(&self) -> StoreResult<Vec<LocationGroup>> {
        let items = self.items()?.list()?;
        Ok(group_by(&items, FALLBACK_LOCATION, |item| item.location.clone())
            .into_iter()
            .map(|group| LocationGroup {
                location: group.key,
                items: group.members.into_iter().cloned().collect(),
            })
            .collect())
    }

    /// Items strictly below their minimum quantity.
    pub fn low_stock_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let items = self.items()?.list()?;
        Ok(items
            .into_iter()
            .filter(|item| is_low_stock(item.quantity, item.minimum_quantity))
            .collect())
    }

    /// Text search over name/category/notes, AND-composed with a
    /// category selector (`None` selects all).
    pub fn search_items(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> StoreResult<Vec<InventoryItem>> {
        let items = self.items()?.list()?;
        Ok(items
            .into_iter()
            .filter(|item| {
                let category_ok = match category {
                    Some(wanted) => item.category.as_deref() == Some(wanted),
                    None => true,
                };
                matches_text(
                    query,
                    &[
                        Some(item.name.as_str()),
                        item.category.as_deref(),
                        item.notes.as_deref(),
                    ],
                ) && category_ok
            })
            .collect())
    }
}
