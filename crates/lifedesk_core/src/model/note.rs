//! Notes domain model.
//!
//! # Invariants
//! - Tags are lowercase-normalized and deduplicated before persistence.
//! - `preview_text` is derived from the body at write time, never edited
//!   directly.

use crate::model::{require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreResult};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A markdown note with tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub uuid: RecordId,
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Lowercase-normalized, deduplicated.
    pub tags: Vec<String>,
    /// Derived plain-text summary of the body.
    pub preview_text: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    pub fn new(title: impl Into<String>, body: impl Into<String>, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
            preview_text: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

impl Record for Note {
    const TABLE: &'static str = "notes";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "title",
        "body",
        "tags",
        "preview_text",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, "note", "title")
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.title),
            codec::text(&self.body),
            codec::tags(&self.tags),
            codec::opt_text(self.preview_text.as_deref()),
            codec::int(self.created_at),
            codec::int(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            title: row.get("title")?,
            body: row.get("body")?,
            tags: codec::parse_tags(row, "tags")?,
            preview_text: row.get("preview_text")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Normalizes one tag value: trimmed, lowercased, empty rejected.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes and deduplicates tag values.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            unique.insert(value);
        }
    }
    unique.into_iter().collect()
}
