//! Core domain logic for Lifedesk, a personal life-management dashboard.
//! This crate is the single source of truth for record storage and every
//! derived value the modules display.

pub mod db;
pub mod derive;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::ValidationError;
pub use store::{
    bulk_delete, bulk_update, Collection, Record, RecordId, SqliteCollection, StoreError,
    StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
