//! Shopping list use-case service.
//!
//! # Responsibility
//! - List/item CRUD with cascade on list delete.
//! - Atomic bulk completion over selected items.
//!
//! # Invariants
//! - Bulk operations are all-or-nothing: a missing identifier rolls the
//!   whole batch back and no item changes.
//! - Completing an item stamps `purchased_at`; un-completing clears it.

use crate::model::shopping::{ShoppingItem, ShoppingList};
use crate::store::{
    bulk_delete, bulk_update, Collection, RecordId, SqliteCollection, StoreError, StoreResult,
};
use rusqlite::Connection;

/// Active/done split for one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOverview {
    pub list: ShoppingList,
    pub active: Vec<ShoppingItem>,
    pub done: Vec<ShoppingItem>,
    pub remaining_count: usize,
}

/// Use-case facade for the shopping module.
///
/// Holds the connection mutably because bulk operations run inside an
/// immediate transaction.
pub struct ShoppingService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> ShoppingService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    fn lists(&self) -> StoreResult<SqliteCollection<'_, ShoppingList>> {
        SqliteCollection::try_new(&*self.conn)
    }

    fn items(&self) -> StoreResult<SqliteCollection<'_, ShoppingItem>> {
        SqliteCollection::try_new(&*self.conn)
    }

    pub fn create_list(&self, list: &ShoppingList) -> StoreResult<RecordId> {
        self.lists()?.insert(list)
    }

    pub fn add_item(&self, item: &ShoppingItem) -> StoreResult<RecordId> {
        self.items()?.insert(item)
    }

    /// Flips one item's done state, stamping or clearing `purchased_at`.
    pub fn toggle_item(&self, id: RecordId, now_ms: i64) -> StoreResult<()> {
        let items = self.items()?;
        let Some(mut item) = items.get(id)? else {
            return Err(StoreError::NotFound(id));
        };
        item.is_done = !item.is_done;
        item.purchased_at = item.is_done.then_some(now_ms);
        items.update(&item)
    }

    /// Marks every selected item done with one purchase stamp, atomically.
    ///
    /// A missing identifier fails the whole batch; no item changes.
    pub fn bulk_complete(&mut self, ids: &[RecordId], purchased_at_ms: i64) -> StoreResult<usize> {
        let mut updated = Vec::with_capacity(ids.len());
        {
            let items = self.items()?;
            for &id in ids {
                let Some(mut item) = items.get(id)? else {
                    return Err(StoreError::NotFound(id));
                };
                item.is_done = true;
                item.purchased_at = Some(purchased_at_ms);
                updated.push(item);
            }
        }

        bulk_update(self.conn, &updated)?;
        Ok(updated.len())
    }

    /// Deletes every selected item, atomically.
    pub fn bulk_remove(&mut self, ids: &[RecordId]) -> StoreResult<()> {
        bulk_delete::<ShoppingItem>(self.conn, ids)
    }

    /// Deletes a list and all of its items.
    pub fn delete_list(&self, id: RecordId) -> StoreResult<()> {
        self.lists()?.delete(id)?;
        self.items()?.delete_children(id)?;
        Ok(())
    }

    pub fn list_lists(&self) -> StoreResult<Vec<ShoppingList>> {
        self.lists()?.list()
    }

    pub fn list_items(&self, list_uuid: RecordId) -> StoreResult<Vec<ShoppingItem>> {
        self.items()?.list_children(list_uuid)
    }

    /// Active/done split with the count still to buy. `None` for an
    /// unknown list.
    pub fn overview(&self, list_uuid: RecordId) -> StoreResult<Option<ListOverview>> {
        let Some(list) = self.lists()?.get(list_uuid)? else {
            return Ok(None);
        };

        let (done, active): (Vec<ShoppingItem>, Vec<ShoppingItem>) = self
            .items()?
            .list_children(list_uuid)?
            .into_iter()
            .partition(|item| item.is_done);

        Ok(Some(ListOverview {
            list,
            remaining_count: active.len(),
            active,
            done,
        }))
    }
}
