//! Reading tracker use-case service.
//!
//! # Invariants
//! - Progress percentage falls back to 0 for books without a page count.
//! - Logging a session advances the book's current page.

use crate::derive::{clamp_bar_percent, group_by, in_same_year, percent_of_target};
use crate::model::reading::{Book, BookStatus, Highlight, ReadingLog};
use crate::store::{Collection, RecordId, SqliteCollection, StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Page-progress derivation for one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingProgress {
    pub book_uuid: RecordId,
    /// Unclamped percent of pages read; 0 without a page count.
    pub percent: i64,
    pub bar_percent: u8,
}

/// One status shelf with the books filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookShelfGroup {
    pub label: String,
    pub books: Vec<Book>,
}

pub struct ReadingService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ReadingService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn books(&self) -> StoreResult<SqliteCollection<'_, Book>> {
        SqliteCollection::try_new(self.conn)
    }

    fn logs(&self) -> StoreResult<SqliteCollection<'_, ReadingLog>> {
        SqliteCollection::try_new(self.conn)
    }

    fn highlights(&self) -> StoreResult<SqliteCollection<'_, Highlight>> {
        SqliteCollection::try_new(self.conn)
    }

    pub fn add_book(&self, book: &Book) -> StoreResult<RecordId> {
        self.books()?.insert(book)
    }

    pub fn update_book(&self, book: &mut Book, now_ms: i64) -> StoreResult<()> {
        book.updated_at = now_ms;
        self.books()?.update(book)
    }

    /// Moves a book to `Reading` and records the start date.
    pub fn start_book(&self, id: RecordId, started_on: NaiveDate, now_ms: i64) -> StoreResult<()> {
        let books = self.books()?;
        let Some(mut book) = books.get(id)? else {
            return Err(StoreError::NotFound(id));
        };
        book.status = BookStatus::Reading;
        book.started_on = Some(started_on);
        book.updated_at = now_ms;
        books.update(&book)
    }

    /// Moves a book to `Finished` and records the finish date.
    pub fn finish_book(&self, id: RecordId, finished_on: NaiveDate, now_ms: i64) -> StoreResult<()> {
        let books = self.books()?;
        let Some(mut book) = books.get(id)? else {
            return Err(StoreError::NotFound(id));
        };
        book.status = BookStatus::Finished;
        book.finished_on = Some(finished_on);
        book.updated_at = now_ms;
        books.update(&book)
    }

    /// Records a reading session and advances the book's current page.
    pub fn log_reading(&self, log: &ReadingLog, now_ms: i64) -> StoreResult<RecordId> {
        let books = self.books()?;
        let Some(mut book) = books.get(log.book_uuid)? else {
            return Err(StoreError::NotFound(log.book_uuid));
        };

        let id = self.logs()?.insert(log)?;
        book.current_page += log.pages_read;
        book.updated_at = now_ms;
        books.update(&book)?;
        Ok(id)
    }

    pub fn add_highlight(&self, highlight: &Highlight) -> StoreResult<RecordId> {
        self.highlights()?.insert(highlight)
    }

    pub fn list_highlights(&self, book_uuid: RecordId) -> StoreResult<Vec<Highlight>> {
        self.highlights()?.list_children(book_uuid)
    }

    /// Deletes a book and cascades to its logs and highlights.
    pub fn delete_book(&self, id: RecordId) -> StoreResult<()> {
        self.books()?.delete(id)?;
        self.logs()?.delete_children(id)?;
        self.highlights()?.delete_children(id)?;
        Ok(())
    }

    pub fn list_books(&self) -> StoreResult<Vec<Book>> {
        self.books()?.list()
    }

    /// Page progress for one book.
    pub fn progress(book: &Book) -> ReadingProgress {
        let percent = percent_of_target(book.current_page, book.total_pages);
        ReadingProgress {
            book_uuid: book.uuid,
            percent,
            bar_percent: clamp_bar_percent(percent),
        }
    }

    /// Shelf view grouped by status label, shelves in first-seen order.
    pub fn shelf(&self) -> StoreResult<Vec<BookShelfGroup>> {
        let books = self.books()?.list()?;
        Ok(group_by(&books, "Unknown", |book| {
            Some(book.status.label().to_string())
        })
        .into_iter()
        .map(|group| BookShelfGroup {
            label: group.key,
            books: group.members.into_iter().cloned().collect(),
        })
        .collect())
    }

    /// Pages logged in `today`'s calendar year across all books.
    pub fn pages_read_this_year(&self, today: NaiveDate) -> StoreResult<i64> {
        let logs = self.logs()?.list()?;
        Ok(logs
            .iter()
            .filter(|log| in_same_year(log.log_date, today))
            .map(|log| log.pages_read)
            .sum())
    }
}
