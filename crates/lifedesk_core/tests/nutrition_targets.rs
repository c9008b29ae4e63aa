use chrono::NaiveDate;
use lifedesk_core::db::open_db_in_memory;
use lifedesk_core::model::nutrition::{Meal, MealEntry, MealType, NutritionTargets};
use lifedesk_core::service::nutrition_service::NutritionService;

const NOW_MS: i64 = 1_700_000_000_000;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(meal: &Meal, food: &str, calories: i64, protein_g: i64) -> MealEntry {
    let mut entry = MealEntry::new(meal.uuid, food, calories);
    entry.protein_g = protein_g;
    entry
}

#[test]
fn over_target_day_shows_unclamped_percent_and_negative_remaining() {
    let conn = open_db_in_memory().unwrap();
    let service = NutritionService::new(&conn);

    service
        .set_targets(&NutritionTargets::new(2000, 120, 250, 70, NOW_MS))
        .unwrap();

    let day = date(2025, 6, 10);
    let dinner = Meal::new(day, MealType::Dinner, NOW_MS);
    service.log_meal(&dinner).unwrap();
    service
        .add_entry(&entry(&dinner, "Pasta night", 2200, 60))
        .unwrap();

    let summary = service.day_summary(day).unwrap();
    assert_eq!(summary.calories.consumed, 2200);
    // Text percent is unclamped, the bar is not.
    assert_eq!(summary.calories.percent, 110);
    assert_eq!(summary.calories.bar_percent, 100);
    // Remaining is signed, never floored at zero.
    assert_eq!(summary.calories.remaining, -200);

    assert_eq!(summary.protein_g.consumed, 60);
    assert_eq!(summary.protein_g.percent, 50);
    assert_eq!(summary.protein_g.remaining, 60);
}

#[test]
fn absent_targets_fall_back_to_zero_percent() {
    let conn = open_db_in_memory().unwrap();
    let service = NutritionService::new(&conn);

    let day = date(2025, 6, 10);
    let lunch = Meal::new(day, MealType::Lunch, NOW_MS);
    service.log_meal(&lunch).unwrap();
    service
        .add_entry(&entry(&lunch, "Sandwich", 600, 25))
        .unwrap();

    let summary = service.day_summary(day).unwrap();
    assert_eq!(summary.calories.consumed, 600);
    assert_eq!(summary.calories.percent, 0);
    assert_eq!(summary.calories.bar_percent, 0);
    assert_eq!(summary.calories.remaining, -600);
}

#[test]
fn day_summary_orders_meals_and_ignores_other_days() {
    let conn = open_db_in_memory().unwrap();
    let service = NutritionService::new(&conn);

    let day = date(2025, 6, 10);
    let dinner = Meal::new(day, MealType::Dinner, NOW_MS);
    let breakfast = Meal::new(day, MealType::Breakfast, NOW_MS);
    let other_day = Meal::new(date(2025, 6, 11), MealType::Breakfast, NOW_MS);
    service.log_meal(&dinner).unwrap();
    service.log_meal(&breakfast).unwrap();
    service.log_meal(&other_day).unwrap();

    let summary = service.day_summary(day).unwrap();
    assert_eq!(summary.meals.len(), 2);
    assert_eq!(summary.meals[0].meal.meal_type, MealType::Breakfast);
    assert_eq!(summary.meals[1].meal.meal_type, MealType::Dinner);
}

#[test]
fn empty_day_sums_to_zero_without_error() {
    let conn = open_db_in_memory().unwrap();
    let service = NutritionService::new(&conn);

    let summary = service.day_summary(date(2025, 6, 10)).unwrap();
    assert!(summary.meals.is_empty());
    assert_eq!(summary.calories.consumed, 0);
    assert_eq!(summary.calories.percent, 0);
}

#[test]
fn set_targets_replaces_the_single_row() {
    let conn = open_db_in_memory().unwrap();
    let service = NutritionService::new(&conn);

    service
        .set_targets(&NutritionTargets::new(2000, 120, 250, 70, NOW_MS))
        .unwrap();
    service
        .set_targets(&NutritionTargets::new(1800, 130, 200, 60, NOW_MS + 1))
        .unwrap();

    let targets = service.targets().unwrap().unwrap();
    assert_eq!(targets.calories, 1800);
}

#[test]
fn deleting_a_meal_cascades_to_entries() {
    let conn = open_db_in_memory().unwrap();
    let service = NutritionService::new(&conn);

    let day = date(2025, 6, 10);
    let snack = Meal::new(day, MealType::Snack, NOW_MS);
    service.log_meal(&snack).unwrap();
    service.add_entry(&entry(&snack, "Apple", 90, 0)).unwrap();

    service.delete_meal(snack.uuid).unwrap();

    let summary = service.day_summary(day).unwrap();
    assert!(summary.meals.is_empty());
    assert_eq!(summary.calories.consumed, 0);
}
