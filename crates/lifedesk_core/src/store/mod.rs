//! Generic record store contracts.
//!
//! # Responsibility
//! - Define the `Record` binding between a domain type and its table.
//! - Define the `Collection` CRUD contract every module shares.
//!
//! # Invariants
//! - Write paths validate records before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - The store never cascades deletes; child cleanup is owned by services.

use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::types::Value;
use rusqlite::Row;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod codec;
mod sqlite;

pub use sqlite::{bulk_delete, bulk_update, SqliteCollection};

/// Stable identifier shared by every record in every module.
pub type RecordId = Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
    /// The connection has no applied schema (missing migrations).
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// The record type declares no parent column, so child queries are invalid.
    UnsupportedChildQuery(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection has schema version {actual_version}, expected {expected_version}; \
                 open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::UnsupportedChildQuery(table) => {
                write!(f, "table `{table}` has no parent column; child queries unsupported")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Binding between a domain record and its storage table.
///
/// One implementation per entity type replaces the per-module CRUD
/// controllers this system grew out of: the collection builds all SQL
/// from `TABLE`/`COLUMNS`, so a new module only supplies its row codec.
pub trait Record: Sized {
    /// Table name.
    const TABLE: &'static str;
    /// Column list. The identifier column must come first; `bind_values`
    /// must produce values in exactly this order.
    const COLUMNS: &'static [&'static str];
    /// Column referencing the parent record for child collections.
    const PARENT_COLUMN: Option<&'static str> = None;

    /// Stable identifier, assigned at creation and never reassigned.
    fn id(&self) -> RecordId;

    /// Checks record-level invariants before a write.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Bind parameters in `COLUMNS` order.
    fn bind_values(&self) -> Vec<Value>;

    /// Decodes one row selected with `COLUMNS`.
    fn from_row(row: &Row<'_>) -> StoreResult<Self>;
}

/// CRUD contract shared by every module's collections.
pub trait Collection<T: Record> {
    /// Inserts a validated record and returns its identifier.
    fn insert(&self, record: &T) -> StoreResult<RecordId>;
    /// Full-record update keyed by identifier. `NotFound` when missing.
    fn update(&self, record: &T) -> StoreResult<()>;
    /// Fetches one record by identifier.
    fn get(&self, id: RecordId) -> StoreResult<Option<T>>;
    /// Lists all records in insertion order.
    fn list(&self) -> StoreResult<Vec<T>>;
    /// Lists records referencing `parent`, in insertion order.
    fn list_children(&self, parent: RecordId) -> StoreResult<Vec<T>>;
    /// Deletes one record. Deleting a missing identifier is `NotFound`.
    fn delete(&self, id: RecordId) -> StoreResult<()>;
    /// Deletes all records referencing `parent`; returns how many went away.
    fn delete_children(&self, parent: RecordId) -> StoreResult<usize>;
}
