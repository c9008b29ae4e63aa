//! Notes use-case service.
//!
//! # Responsibility
//! - Note CRUD with tag normalization and preview derivation.
//! - In-memory search and AND-composed tag filtering.
//!
//! # Invariants
//! - `preview_text` is re-derived on every body write.
//! - Tag names are normalized to lowercase and deduplicated.
//! - Tag filtering requires every selected tag; zero selections retain
//!   all notes.

use crate::derive::{has_all_tags, matches_text};
use crate::model::note::{normalize_tag, normalize_tags, Note};
use crate::store::{Collection, RecordId, SqliteCollection, StoreError, StoreResult};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const PREVIEW_MAX_CHARS: usize = 120;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Tag input normalizes to nothing (empty or whitespace-only).
    InvalidTag(String),
    NoteNotFound(RecordId),
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTag(value) => write!(f, "invalid tag: `{value}`"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Store(other),
        }
    }
}

pub struct NoteService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> NoteService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn notes(&self) -> Result<SqliteCollection<'_, Note>, NoteServiceError> {
        Ok(SqliteCollection::try_new(self.conn)?)
    }

    /// Creates a note with normalized tags and a derived preview.
    pub fn create_note(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
        tags: &[String],
        now_ms: i64,
    ) -> Result<Note, NoteServiceError> {
        validate_tags(tags)?;

        let mut note = Note::new(title, body, now_ms);
        note.tags = normalize_tags(tags);
        note.preview_text = derive_preview_text(&note.body);

        self.notes()?.insert(&note)?;
        Ok(note)
    }

    /// Replaces a note's body (and title), re-deriving the preview.
    pub fn update_note(
        &self,
        id: RecordId,
        title: impl Into<String>,
        body: impl Into<String>,
        now_ms: i64,
    ) -> Result<Note, NoteServiceError> {
        let notes = self.notes()?;
        let Some(mut note) = notes.get(id)? else {
            return Err(NoteServiceError::NoteNotFound(id));
        };

        note.title = title.into();
        note.body = body.into();
        note.preview_text = derive_preview_text(&note.body);
        note.updated_at = now_ms;
        notes.update(&note)?;
        Ok(note)
    }

    /// Replaces the full tag set for one note.
    pub fn set_tags(
        &self,
        id: RecordId,
        tags: &[String],
        now_ms: i64,
    ) -> Result<Note, NoteServiceError> {
        validate_tags(tags)?;

        let notes = self.notes()?;
        let Some(mut note) = notes.get(id)? else {
            return Err(NoteServiceError::NoteNotFound(id));
        };

        note.tags = normalize_tags(tags);
        note.updated_at = now_ms;
        notes.update(&note)?;
        Ok(note)
    }

    pub fn delete_note(&self, id: RecordId) -> Result<(), NoteServiceError> {
        self.notes()?.delete(id)?;
        Ok(())
    }

    pub fn list_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.notes()?.list()?)
    }

    /// Free-text search over title/body/tags AND-composed with the tag
    /// filter (every selected tag must be present).
    pub fn filter_notes(
        &self,
        query: &str,
        selected_tags: &[String],
    ) -> Result<Vec<Note>, NoteServiceError> {
        let notes = self.notes()?.list()?;
        Ok(notes
            .into_iter()
            .filter(|note| {
                let joined_tags = note.tags.join(" ");
                matches_text(
                    query,
                    &[
                        Some(note.title.as_str()),
                        Some(note.body.as_str()),
                        Some(joined_tags.as_str()),
                    ],
                ) && has_all_tags(&note.tags, selected_tags)
            })
            .collect())
    }

    /// All known tags, sorted, deduplicated.
    pub fn list_tags(&self) -> Result<Vec<String>, NoteServiceError> {
        let notes = self.notes()?.list()?;
        let mut tags = BTreeSet::new();
        for note in &notes {
            for tag in &note.tags {
                tags.insert(tag.clone());
            }
        }
        Ok(tags.into_iter().collect())
    }
}

fn validate_tags(tags: &[String]) -> Result<(), NoteServiceError> {
    for tag in tags {
        if normalize_tag(tag).is_none() {
            return Err(NoteServiceError::InvalidTag(tag.clone()));
        }
    }
    Ok(())
}

/// Derives a plain-text preview from a markdown body.
///
/// Images are dropped, links collapse to their label, markdown syntax
/// is stripped and whitespace is flattened; the result is capped at
/// `PREVIEW_MAX_CHARS` characters.
pub fn derive_preview_text(body: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(body, " ");
    let with_link_labels = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&with_link_labels, " ");
    let flattened = WHITESPACE_RE.replace_all(&without_symbols, " ");

    let trimmed = flattened.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut preview = trimmed.chars().take(PREVIEW_MAX_CHARS).collect::<String>();
    if trimmed.chars().count() > PREVIEW_MAX_CHARS {
        preview.push_str("...");
    }
    Some(preview)
}
