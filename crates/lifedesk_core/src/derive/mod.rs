//! The derivation engine: pure functions from loaded records to
//! display-ready values.
//!
//! # Responsibility
//! - Group, sum, filter and flag in-memory record sets.
//! - Keep every computation deterministic: "today" is always an argument,
//!   never a wall-clock read.
//!
//! # Invariants
//! - No function here touches storage or mutates its inputs.
//! - Re-running a derivation over the same inputs yields the same output.

pub mod aggregate;
pub mod filter;
pub mod group;
pub mod time;

pub use aggregate::{
    clamp_bar_percent, format_cents, is_low_stock, percent_of_target, remaining, sum_amounts,
};
pub use filter::{has_all_tags, matches_text, selector_matches};
pub use group::{group_by, Group};
pub use time::{countdown_label, days_until, in_same_month, in_same_year};
