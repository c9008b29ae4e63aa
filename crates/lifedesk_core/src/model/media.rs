//! Media-watch tracking domain model.

use crate::model::{require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Series,
}

fn media_kind_to_db(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movie",
        MediaKind::Series => "series",
    }
}

fn parse_media_kind(value: &str) -> Option<MediaKind> {
    match value {
        "movie" => Some(MediaKind::Movie),
        "series" => Some(MediaKind::Series),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    PlanToWatch,
    Watching,
    Completed,
    Dropped,
}

impl WatchStatus {
    /// Display label used as the grouping key on the watch shelf.
    pub fn label(self) -> &'static str {
        match self {
            Self::PlanToWatch => "Plan to Watch",
            Self::Watching => "Watching",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
        }
    }
}

fn watch_status_to_db(status: WatchStatus) -> &'static str {
    match status {
        WatchStatus::PlanToWatch => "plan_to_watch",
        WatchStatus::Watching => "watching",
        WatchStatus::Completed => "completed",
        WatchStatus::Dropped => "dropped",
    }
}

fn parse_watch_status(value: &str) -> Option<WatchStatus> {
    match value {
        "plan_to_watch" => Some(WatchStatus::PlanToWatch),
        "watching" => Some(WatchStatus::Watching),
        "completed" => Some(WatchStatus::Completed),
        "dropped" => Some(WatchStatus::Dropped),
        _ => None,
    }
}

/// A movie or series on the watch list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub uuid: RecordId,
    pub title: String,
    pub kind: MediaKind,
    pub status: WatchStatus,
    /// 1..=10 when rated.
    pub rating: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MediaItem {
    pub fn new(title: impl Into<String>, kind: MediaKind, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            kind,
            status: WatchStatus::PlanToWatch,
            rating: None,
            notes: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

impl Record for MediaItem {
    const TABLE: &'static str = "media_items";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "title",
        "kind",
        "status",
        "rating",
        "notes",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, "media_item", "title")?;
        if let Some(rating) = self.rating {
            if !(RATING_MIN..=RATING_MAX).contains(&rating) {
                return Err(ValidationError::OutOfRange {
                    record: "media_item",
                    field: "rating",
                    min: RATING_MIN,
                    max: RATING_MAX,
                });
            }
        }
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.title),
            codec::text(media_kind_to_db(self.kind)),
            codec::text(watch_status_to_db(self.status)),
            codec::opt_int(self.rating),
            codec::opt_text(self.notes.as_deref()),
            codec::int(self.created_at),
            codec::int(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let kind_text: String = row.get("kind")?;
        let kind = parse_media_kind(&kind_text).ok_or_else(|| {
            StoreError::InvalidData(format!("invalid media kind `{kind_text}` in media_items.kind"))
        })?;

        let status_text: String = row.get("status")?;
        let status = parse_watch_status(&status_text).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "invalid watch status `{status_text}` in media_items.status"
            ))
        })?;

        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            title: row.get("title")?,
            kind,
            status,
            rating: row.get("rating")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
