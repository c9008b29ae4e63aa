//! Nutrition logging domain model.
//!
//! # Invariants
//! - A meal is identified by date + type; entries hang off the meal.
//! - Targets are a single row; progress derivation treats absent targets
//!   as zero targets (percentage falls back to 0).

use crate::model::{require_non_negative, require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }
}

fn meal_type_to_db(value: MealType) -> &'static str {
    match value {
        MealType::Breakfast => "breakfast",
        MealType::Lunch => "lunch",
        MealType::Dinner => "dinner",
        MealType::Snack => "snack",
    }
}

fn parse_meal_type(value: &str) -> Option<MealType> {
    match value {
        "breakfast" => Some(MealType::Breakfast),
        "lunch" => Some(MealType::Lunch),
        "dinner" => Some(MealType::Dinner),
        "snack" => Some(MealType::Snack),
        _ => None,
    }
}

/// One logged meal on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub uuid: RecordId,
    pub meal_date: NaiveDate,
    pub meal_type: MealType,
    pub created_at: i64,
}

impl Meal {
    pub fn new(meal_date: NaiveDate, meal_type: MealType, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            meal_date,
            meal_type,
            created_at: now_ms,
        }
    }
}

impl Record for Meal {
    const TABLE: &'static str = "meals";
    const COLUMNS: &'static [&'static str] = &["uuid", "meal_date", "meal_type", "created_at"];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::date(self.meal_date),
            codec::text(meal_type_to_db(self.meal_type)),
            codec::int(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let type_text: String = row.get("meal_type")?;
        let meal_type = parse_meal_type(&type_text).ok_or_else(|| {
            StoreError::InvalidData(format!("invalid meal type `{type_text}` in meals.meal_type"))
        })?;

        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            meal_date: codec::parse_date(row, "meal_date")?,
            meal_type,
            created_at: row.get("created_at")?,
        })
    }
}

/// One food line within a meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub uuid: RecordId,
    pub meal_uuid: RecordId,
    pub food_name: String,
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
}

impl MealEntry {
    pub fn new(meal_uuid: RecordId, food_name: impl Into<String>, calories: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            meal_uuid,
            food_name: food_name.into(),
            calories,
            protein_g: 0,
            carbs_g: 0,
            fat_g: 0,
        }
    }
}

impl Record for MealEntry {
    const TABLE: &'static str = "meal_entries";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "meal_uuid",
        "food_name",
        "calories",
        "protein_g",
        "carbs_g",
        "fat_g",
    ];
    const PARENT_COLUMN: Option<&'static str> = Some("meal_uuid");

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.food_name, "meal_entry", "food_name")?;
        require_non_negative(self.calories, "meal_entry", "calories")?;
        require_non_negative(self.protein_g, "meal_entry", "protein_g")?;
        require_non_negative(self.carbs_g, "meal_entry", "carbs_g")?;
        require_non_negative(self.fat_g, "meal_entry", "fat_g")?;
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::id_value(self.meal_uuid),
            codec::text(&self.food_name),
            codec::int(self.calories),
            codec::int(self.protein_g),
            codec::int(self.carbs_g),
            codec::int(self.fat_g),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            meal_uuid: codec::parse_id(row, "meal_uuid")?,
            food_name: row.get("food_name")?,
            calories: row.get("calories")?,
            protein_g: row.get("protein_g")?,
            carbs_g: row.get("carbs_g")?,
            fat_g: row.get("fat_g")?,
        })
    }
}

/// Daily intake targets. One row; re-setting replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub uuid: RecordId,
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
    pub updated_at: i64,
}

impl NutritionTargets {
    pub fn new(calories: i64, protein_g: i64, carbs_g: i64, fat_g: i64, now_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            calories,
            protein_g,
            carbs_g,
            fat_g,
            updated_at: now_ms,
        }
    }
}

impl Record for NutritionTargets {
    const TABLE: &'static str = "nutrition_targets";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "calories",
        "protein_g",
        "carbs_g",
        "fat_g",
        "updated_at",
    ];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative(self.calories, "nutrition_targets", "calories")?;
        require_non_negative(self.protein_g, "nutrition_targets", "protein_g")?;
        require_non_negative(self.carbs_g, "nutrition_targets", "carbs_g")?;
        require_non_negative(self.fat_g, "nutrition_targets", "fat_g")?;
        Ok(())
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::int(self.calories),
            codec::int(self.protein_g),
            codec::int(self.carbs_g),
            codec::int(self.fat_g),
            codec::int(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            calories: row.get("calories")?,
            protein_g: row.get("protein_g")?,
            carbs_g: row.get("carbs_g")?,
            fat_g: row.get("fat_g")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
