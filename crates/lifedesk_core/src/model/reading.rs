//! Reading tracker domain model.
//!
//! # Invariants
//! - `finished_on` should not be earlier than `started_on` when both set.
//! - Progress derivation tolerates books without a page count.

use crate::model::{require_non_negative, require_non_negative_opt, require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    ToRead,
    Reading,
    Finished,
    Abandoned,
}

impl BookStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::ToRead => "To Read",
            Self::Reading => "Reading",
            Self::Finished => "Finished",
            Self::Abandoned => "Abandoned",
        }
    }
}

fn book_status_to_db(status: BookStatus) -> &'static str {
    match status {
        BookStatus::ToRead => "to_read",
        BookStatus::Reading => "reading",
        BookStatus::Finished => "finished",
        BookStatus::Abandoned => "abandoned",
    }
}

fn parse_book_status(value: &str) -> Option<BookStatus> {
    match value {
        "to_read" => Some(BookStatus::ToRead),
        "reading" => Some(BookStatus::Reading),
        "finished" => Some(BookStatus::Finished),
        "abandoned" => Some(BookStatus::Abandoned),
        _ => None,
    }
}

/// A book on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub uuid: RecordId,
    pub title: String,
    pub author: Option<String>,
    pub status: BookStatus,
    pub total_pages: Option<i64>,
    pub current_page: i64,
    pub started_on: Option<NaiveDate>,
    pub finished_on: Option<NaiveDate>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Book {
    pub fn new(title: impl Into<String>, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            author: None,
            status: BookStatus::ToRead,
            total_pages: None,
            current_page: 0,
            started_on: None,
            finished_on: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

impl Record for Book {
    const TABLE: &'static str = "books";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "title",
        "author",
        "status",
        "total_pages",
        "current_page",
        "started_on",
        "finished_on",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, "book", "title")?;
        require_non_negative(self.current_page, "book", "current_page")?;
        require_non_negative_opt(self.total_pages, "book", "total_pages")?;
        if let (Some(started), Some(finished)) = (self.started_on, self.finished_on) {
            if finished < started {
                return Err(ValidationError::DateOrder {
                    record: "book",
                    start: "started_on",
                    end: "finished_on",
                });
            }
        }
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.title),
            codec::opt_text(self.author.as_deref()),
            codec::text(book_status_to_db(self.status)),
            codec::opt_int(self.total_pages),
            codec::int(self.current_page),
            codec::opt_date(self.started_on),
            codec::opt_date(self.finished_on),
            codec::int(self.created_at),
            codec::int(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let status_text: String = row.get("status")?;
        let status = parse_book_status(&status_text).ok_or_else(|| {
            StoreError::InvalidData(format!("invalid book status `{status_text}` in books.status"))
        })?;

        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            title: row.get("title")?,
            author: row.get("author")?,
            status,
            total_pages: row.get("total_pages")?,
            current_page: row.get("current_page")?,
            started_on: codec::parse_opt_date(row, "started_on")?,
            finished_on: codec::parse_opt_date(row, "finished_on")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// One reading session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingLog {
    pub uuid: RecordId,
    pub book_uuid: RecordId,
    pub log_date: NaiveDate,
    pub pages_read: i64,
}

impl ReadingLog {
    pub fn new(book_uuid: RecordId, log_date: NaiveDate, pages_read: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            book_uuid,
            log_date,
            pages_read,
        }
    }
}

impl Record for ReadingLog {
    const TABLE: &'static str = "reading_logs";
    const COLUMNS: &'static [&'static str] = &["uuid", "book_uuid", "log_date", "pages_read"];
    const PARENT_COLUMN: Option<&'static str> = Some("book_uuid");

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative(self.pages_read, "reading_log", "pages_read")
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::id_value(self.book_uuid),
            codec::date(self.log_date),
            codec::int(self.pages_read),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            book_uuid: codec::parse_id(row, "book_uuid")?,
            log_date: codec::parse_date(row, "log_date")?,
            pages_read: row.get("pages_read")?,
        })
    }
}

/// A saved passage from a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub uuid: RecordId,
    pub book_uuid: RecordId,
    pub page: Option<i64>,
    pub text: String,
    pub created_at: i64,
}

impl Highlight {
    pub fn new(book_uuid: RecordId, text: impl Into<String>, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            book_uuid,
            page: None,
            text: text.into(),
            created_at: now_ms,
        }
    }
}

impl Record for Highlight {
    const TABLE: &'static str = "highlights";
    const COLUMNS: &'static [&'static str] = &["uuid", "book_uuid", "page", "text", "created_at"];
    const PARENT_COLUMN: Option<&'static str> = Some("book_uuid");

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.text, "highlight", "text")?;
        require_non_negative_opt(self.page, "highlight", "page")?;
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::id_value(self.book_uuid),
            codec::opt_int(self.page),
            codec::text(&self.text),
            codec::int(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            book_uuid: codec::parse_id(row, "book_uuid")?,
            page: row.get("page")?,
            text: row.get("text")?,
            created_at: row.get("created_at")?,
        })
    }
}
