//! Media-watch tracking use-case service.

use crate::derive::{group_by, matches_text, selector_matches};
use crate::model::media::{MediaItem, MediaKind, WatchStatus};
use crate::store::{Collection, RecordId, SqliteCollection, StoreError, StoreResult};
use rusqlite::Connection;

/// One status shelf with the items filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfGroup {
    /// Status display label, e.g. "Plan to Watch".
    pub label: String,
    pub items: Vec<MediaItem>,
}

pub struct MediaService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> MediaService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn items(&self) -> StoreResult<SqliteCollection<'_, MediaItem>> {
        SqliteCollection::try_new(self.conn)
    }

    pub fn add_item(&self, item: &MediaItem) -> StoreResult<RecordId> {
        self.items()?.insert(item)
    }

    pub fn set_status(&self, id: RecordId, status: WatchStatus, now_ms: i64) -> StoreResult<()> {
        let items = self.items()?;
        let Some(mut item) = items.get(id)? else {
            return Err(StoreError::NotFound(id));
        };
        item.status = status;
        item.updated_at = now_ms;
        items.update(&item)
    }

    pub fn rate(&self, id: RecordId, rating: i64, now_ms: i64) -> StoreResult<()> {
        let items = self.items()?;
        let Some(mut item) = items.get(id)? else {
            return Err(StoreError::NotFound(id));
        };
        item.rating = Some(rating);
        item.updated_at = now_ms;
        items.update(&item)
    }

    pub fn delete_item(&self, id: RecordId) -> StoreResult<()> {
        self.items()?.delete(id)
    }

    pub fn list_items(&self) -> StoreResult<Vec<MediaItem>> {
        self.items()?.list()
    }

    /// Watch list grouped by status label, shelves in first-seen order.
    pub fn shelf(&self) -> StoreResult<Vec<ShelfGroup>> {
        let items = self.items()?.list()?;
        Ok(group_by(&items, "Unknown", |item| {
            Some(item.status.label().to_string())
        })
        .into_iter()
        .map(|group| ShelfGroup {
            label: group.key,
            items: group.members.into_iter().cloned().collect(),
        })
        .collect())
    }

    /// Text search over title/notes, AND-composed with kind and status
    /// selectors (`None` selects all).
    pub fn search(
        &self,
        query: &str,
        kind: Option<MediaKind>,
        status: Option<WatchStatus>,
    ) -> StoreResult<Vec<MediaItem>> {
        let items = self.items()?.list()?;
        Ok(items
            .into_iter()
            .filter(|item| {
                matches_text(query, &[Some(item.title.as_str()), item.notes.as_deref()])
                    && selector_matches(kind.as_ref(), &item.kind)
                    && selector_matches(status.as_ref(), &item.status)
            })
            .collect())
    }
}
