//! Numeric aggregation over loaded records.
//!
//! # Responsibility
//! - Sum optional amounts, compute percentage-of-target values and
//!   signed remainders, and format money rollups.
//!
//! # Invariants
//! - An absent amount contributes exactly zero; an empty input sums to zero.
//! - A zero or absent target yields percentage 0, never a division error.
//! - `percent_of_target` is unclamped (text may exceed 100);
//!   `clamp_bar_percent` bounds the same value for bar widths.
//! - `remaining` is signed and never floored at zero.

/// Sums optional integer amounts, treating `None` as zero.
pub fn sum_amounts<I>(values: I) -> i64
where
    I: IntoIterator<Item = Option<i64>>,
{
    values.into_iter().map(|value| value.unwrap_or(0)).sum()
}

/// Percentage of `actual` against `target`, rounded to the nearest whole
/// point. Unclamped: 2200 against 2000 yields 110.
pub fn percent_of_target(actual: i64, target: Option<i64>) -> i64 {
    match target {
        Some(target) if target != 0 => {
            let ratio = 100.0 * actual as f64 / target as f64;
            ratio.round() as i64
        }
        _ => 0,
    }
}

/// Clamps a percentage into `[0, 100]` for progress-bar widths.
pub fn clamp_bar_percent(percent: i64) -> u8 {
    percent.clamp(0, 100) as u8
}

/// Signed remainder against a target; negative means over target.
pub fn remaining(target: i64, actual: i64) -> i64 {
    target - actual
}

/// Strict low-stock check: equal to the minimum is NOT low.
pub fn is_low_stock(quantity: i64, minimum_quantity: i64) -> bool {
    quantity < minimum_quantity
}

/// Renders integer cents as a dollar string, e.g. 7499 -> "$74.99".
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{sign}${}.{:02}", magnitude / 100, magnitude % 100)
}
