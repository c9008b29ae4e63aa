//! Per-module use-case services.
//!
//! # Responsibility
//! - Combine the generic collection store with the derivation engine
//!   into module-level operations and summaries.
//! - Own child cascade on parent deletes; the store never cascades.
//!
//! # Invariants
//! - Services never bypass store validation/persistence contracts.
//! - Summaries taking a "today" argument never read the wall clock.

pub mod finance_service;
pub mod household_service;
pub mod inventory_service;
pub mod media_service;
pub mod note_service;
pub mod nutrition_service;
pub mod reading_service;
pub mod shopping_service;
pub mod travel_service;
pub mod vehicle_service;
