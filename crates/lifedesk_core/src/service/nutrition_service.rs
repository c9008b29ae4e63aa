//! Nutrition logging use-case service.
//!
//! # Responsibility
//! - Meal/entry CRUD and daily target progress derivation.
//!
//! # Invariants
//! - `percent` is unclamped (110% over target stays 110); `bar_percent`
//!   clamps the same value into [0, 100].
//! - `remaining` is signed: logging past the target goes negative, it is
//!   never floored at zero.
//! - Absent targets behave as zero targets: percent falls back to 0.

use crate::derive::{clamp_bar_percent, percent_of_target, remaining, sum_amounts};
use crate::model::nutrition::{Meal, MealEntry, MealType, NutritionTargets};
use crate::store::{Collection, RecordId, SqliteCollection, StoreResult};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Consumed-vs-target derivation for one tracked value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroProgress {
    pub consumed: i64,
    pub target: i64,
    /// Unclamped percentage for text display; may exceed 100.
    pub percent: i64,
    /// The same percentage clamped into [0, 100] for bar widths.
    pub bar_percent: u8,
    /// `target - consumed`, signed.
    pub remaining: i64,
}

/// One meal with its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealWithEntries {
    pub meal: Meal,
    pub entries: Vec<MealEntry>,
}

/// Full derivation for one day of logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub day: NaiveDate,
    /// Meals of the day in breakfast..snack order.
    pub meals: Vec<MealWithEntries>,
    pub calories: MacroProgress,
    pub protein_g: MacroProgress,
    pub carbs_g: MacroProgress,
    pub fat_g: MacroProgress,
}

pub struct NutritionService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> NutritionService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn meals(&self) -> StoreResult<SqliteCollection<'_, Meal>> {
        SqliteCollection::try_new(self.conn)
    }

    fn entries(&self) -> StoreResult<SqliteCollection<'_, MealEntry>> {
        SqliteCollection::try_new(self.conn)
    }

    fn targets_collection(&self) -> StoreResult<SqliteCollection<'_, NutritionTargets>> {
        SqliteCollection::try_new(self.conn)
    }

    /// Replaces the single targets row.
    pub fn set_targets(&self, targets: &NutritionTargets) -> StoreResult<()> {
        let collection = self.targets_collection()?;
        for existing in collection.list()? {
            collection.delete(existing.uuid)?;
        }
        collection.insert(targets)?;
        Ok(())
    }

    pub fn targets(&self) -> StoreResult<Option<NutritionTargets>> {
        Ok(self.targets_collection()?.list()?.into_iter().next())
    }

    pub fn log_meal(&self, meal: &Meal) -> StoreResult<RecordId> {
        self.meals()?.insert(meal)
    }

    pub fn add_entry(&self, entry: &MealEntry) -> StoreResult<RecordId> {
        self.entries()?.insert(entry)
    }

    pub fn delete_entry(&self, id: RecordId) -> StoreResult<()> {
        self.entries()?.delete(id)
    }

    /// Deletes a meal and its entries.
    pub fn delete_meal(&self, id: RecordId) -> StoreResult<()> {
        self.meals()?.delete(id)?;
        self.entries()?.delete_children(id)?;
        Ok(())
    }

    /// Derives the full day view: meals in canonical order plus macro
    /// progress against the current targets (zero targets when unset).
    pub fn day_summary(&self, day: NaiveDate) -> StoreResult<DaySummary> {
        let mut day_meals: Vec<Meal> = self
            .meals()?
            .list()?
            .into_iter()
            .filter(|meal| meal.meal_date == day)
            .collect();
        day_meals.sort_by_key(|meal| meal_order(meal.meal_type));

        let entries_collection = self.entries()?;
        let mut meals = Vec::with_capacity(day_meals.len());
        for meal in day_meals {
            let entries = entries_collection.list_children(meal.uuid)?;
            meals.push(MealWithEntries { meal, entries });
        }

        let targets = self.targets()?;
        let all_entries: Vec<&MealEntry> = meals
            .iter()
            .flat_map(|meal| meal.entries.iter())
            .collect();

        let calories = macro_progress(
            sum_amounts(all_entries.iter().map(|entry| Some(entry.calories))),
            targets.as_ref().map(|t| t.calories),
        );
        let protein_g = macro_progress(
            sum_amounts(all_entries.iter().map(|entry| Some(entry.protein_g))),
            targets.as_ref().map(|t| t.protein_g),
        );
        let carbs_g = macro_progress(
            sum_amounts(all_entries.iter().map(|entry| Some(entry.carbs_g))),
            targets.as_ref().map(|t| t.carbs_g),
        );
        let fat_g = macro_progress(
            sum_amounts(all_entries.iter().map(|entry| Some(entry.fat_g))),
            targets.as_ref().map(|t| t.fat_g),
        );

        Ok(DaySummary {
            day,
            meals,
            calories,
            protein_g,
            carbs_g,
            fat_g,
        })
    }
}

fn meal_order(meal_type: MealType) -> u8 {
    match meal_type {
        MealType::Breakfast => 0,
        MealType::Lunch => 1,
        MealType::Dinner => 2,
        MealType::Snack => 3,
    }
}

fn macro_progress(consumed: i64, target: Option<i64>) -> MacroProgress {
    let percent = percent_of_target(consumed, target);
    MacroProgress {
        consumed,
        target: target.unwrap_or(0),
        percent,
        bar_percent: clamp_bar_percent(percent),
        remaining: remaining(target.unwrap_or(0), consumed),
    }
}
