//! SQLite implementation of the generic collection store.
//!
//! # Responsibility
//! - Build all CRUD SQL from a record type's `TABLE`/`COLUMNS` binding.
//! - Guard against uninitialized or structurally incomplete databases.
//! - Apply bulk mutations atomically (all rows or none).
//!
//! # Invariants
//! - Write paths call `Record::validate()` before SQL mutations.
//! - Zero affected rows on update/delete surfaces as `NotFound`.
//! - Bulk operations run inside one immediate transaction.

use crate::db::migrations::latest_version;
use crate::store::{Collection, Record, RecordId, StoreError, StoreResult};
use rusqlite::{params_from_iter, Connection, Transaction, TransactionBehavior};
use std::marker::PhantomData;

/// SQLite-backed collection for one record type.
pub struct SqliteCollection<'conn, T: Record> {
    conn: &'conn Connection,
    _record: PhantomData<T>,
}

impl<'conn, T: Record> SqliteCollection<'conn, T> {
    /// Constructs a collection after verifying the connection is migrated
    /// and the record's table and columns exist.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready::<T>(conn)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!("SELECT {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
    }

    fn insert_sql() -> String {
        let placeholders = (1..=T::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({});",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders
        )
    }

    fn update_sql() -> String {
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {} WHERE {} = ?1;",
            T::TABLE,
            assignments,
            T::COLUMNS[0]
        )
    }

    fn parent_column() -> StoreResult<&'static str> {
        T::PARENT_COLUMN.ok_or(StoreError::UnsupportedChildQuery(T::TABLE))
    }
}

impl<T: Record> Collection<T> for SqliteCollection<'_, T> {
    fn insert(&self, record: &T) -> StoreResult<RecordId> {
        record.validate()?;
        self.conn
            .execute(&Self::insert_sql(), params_from_iter(record.bind_values()))?;
        Ok(record.id())
    }

    fn update(&self, record: &T) -> StoreResult<()> {
        record.validate()?;
        let changed = self
            .conn
            .execute(&Self::update_sql(), params_from_iter(record.bind_values()))?;
        if changed == 0 {
            return Err(StoreError::NotFound(record.id()));
        }
        Ok(())
    }

    fn get(&self, id: RecordId) -> StoreResult<Option<T>> {
        let sql = format!("{} WHERE {} = ?1;", Self::select_sql(), T::COLUMNS[0]);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(T::from_row(row)?));
        }
        Ok(None)
    }

    fn list(&self) -> StoreResult<Vec<T>> {
        let sql = format!("{} ORDER BY rowid ASC;", Self::select_sql());
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(T::from_row(row)?);
        }
        Ok(records)
    }

    fn list_children(&self, parent: RecordId) -> StoreResult<Vec<T>> {
        let parent_column = Self::parent_column()?;
        let sql = format!(
            "{} WHERE {} = ?1 ORDER BY rowid ASC;",
            Self::select_sql(),
            parent_column
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([parent.to_string()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(T::from_row(row)?);
        }
        Ok(records)
    }

    fn delete(&self, id: RecordId) -> StoreResult<()> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1;", T::TABLE, T::COLUMNS[0]);
        let changed = self.conn.execute(&sql, [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete_children(&self, parent: RecordId) -> StoreResult<usize> {
        let parent_column = Self::parent_column()?;
        let sql = format!("DELETE FROM {} WHERE {} = ?1;", T::TABLE, parent_column);
        let removed = self.conn.execute(&sql, [parent.to_string()])?;
        Ok(removed)
    }
}

/// Applies full-record updates for every given record, atomically.
///
/// If any record fails validation or does not exist, the transaction
/// rolls back and no row changes.
pub fn bulk_update<T: Record>(conn: &mut Connection, records: &[T]) -> StoreResult<()> {
    ensure_connection_ready::<T>(conn)?;
    for record in records {
        record.validate()?;
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    apply_bulk_updates::<T>(&tx, records)?;
    tx.commit()?;
    Ok(())
}

/// Deletes every given identifier, atomically.
///
/// A missing identifier rolls back the whole batch with `NotFound`.
pub fn bulk_delete<T: Record>(conn: &mut Connection, ids: &[RecordId]) -> StoreResult<()> {
    ensure_connection_ready::<T>(conn)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let sql = format!("DELETE FROM {} WHERE {} = ?1;", T::TABLE, T::COLUMNS[0]);
    for id in ids {
        let changed = tx.execute(&sql, [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(*id));
        }
    }
    tx.commit()?;
    Ok(())
}

fn apply_bulk_updates<T: Record>(tx: &Transaction<'_>, records: &[T]) -> StoreResult<()> {
    let assignments = T::COLUMNS
        .iter()
        .enumerate()
        .skip(1)
        .map(|(index, column)| format!("{column} = ?{}", index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?1;",
        T::TABLE,
        assignments,
        T::COLUMNS[0]
    );

    for record in records {
        let changed = tx.execute(&sql, params_from_iter(record.bind_values()))?;
        if changed == 0 {
            return Err(StoreError::NotFound(record.id()));
        }
    }
    Ok(())
}

fn ensure_connection_ready<T: Record>(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version == 0 {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, T::TABLE)? {
        return Err(StoreError::MissingRequiredTable(T::TABLE));
    }

    for &column in T::COLUMNS {
        if !table_has_column(conn, T::TABLE, column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: T::TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
