//! Demo dataset: a complete profile, a small meal catalog with randomized macros and
//! a week of food logs filled from meal suggestions.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::food_log::log::{FoodLog, FoodLogDraft};
use crate::meals::meal::Meal;
use crate::meals::suggestions::get_suggestions;
use crate::nutrition::advice::MacroAdvice;
use crate::nutrition::macros::MacroBreakdown;
use crate::nutrition::profile::{Gender, Goal, UserProfile};

pub const DEMO_MEAL_NAMES: [&str; 9] = [
    "Egg white omelet",
    "Grilled chicken salad",
    "Whey protein banana smoothie",
    "Grilled tilapia",
    "Chickpea curry with rice",
    "Black beans with rice",
    "Kidney beans with rice",
    "Protein pancakes",
    "Ezekiel bread french toast",
];

// Gram ranges for generated meals
const PROTEIN_GRAMS: (u32, u32) = (25, 50);
const CARBOHYDRATE_GRAMS: (u32, u32) = (30, 56);
const FAT_GRAMS: (u32, u32) = (8, 24);

pub const DEMO_LOG_DAYS: i64 = 7;

const FALLBACK_MEALS_PER_DAY: u32 = 3;

pub fn demo_profile() -> UserProfile {
    UserProfile {
        age: Some(31),
        gender: Some(Gender::Male),
        num_of_exercise_days: Some(3),
        num_of_meals_in_a_day: Some(5),
        body_weight_in_kgs: Some(78.0),
        body_height_in_cms: Some(180.34),
        body_fat_in_percentage: Some(12.9),
        goal: Some(Goal::WeightLoss),
    }
}

fn grams<R: Rng + ?Sized>(range: (u32, u32), rng: &mut R) -> f64 {
    f64::from(rng.gen_range(range.0..=range.1))
}

/// The demo catalog, ids `1` through `9`.
pub fn demo_meals<R: Rng + ?Sized>(rng: &mut R) -> Vec<Meal> {
    DEMO_MEAL_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let macros = MacroBreakdown::new(
                grams(PROTEIN_GRAMS, rng),
                grams(CARBOHYDRATE_GRAMS, rng),
                grams(FAT_GRAMS, rng),
            );
            Meal::new((i + 1).to_string(), *name, macros)
        })
        .collect()
}

/// A week of logs ending on `today`, oldest first. Each day holds the first meal
/// suggestion for the profile's meals per day and the advice's calorie budget.
pub fn demo_food_logs<R: Rng + ?Sized>(
    today: NaiveDate,
    profile: &UserProfile,
    advice: &MacroAdvice,
    meals: &[Meal],
    rng: &mut R,
) -> Result<Vec<FoodLog>> {
    let meals_per_day = profile.num_of_meals_in_a_day.unwrap_or(FALLBACK_MEALS_PER_DAY);

    let food_logs = (0..DEMO_LOG_DAYS)
        .map(|day| {
            let date = today - Duration::days(DEMO_LOG_DAYS - 1 - day);
            let suggestion = get_suggestions(meals_per_day, advice.current_calories, meals, Some(1), &mut *rng)
                .list
                .into_iter()
                .next()
                .map(|suggestion| suggestion.meals)
                .unwrap_or_default();

            let mut draft = FoodLogDraft::for_new_log(date, 0);
            for (slot, meal) in suggestion.iter().enumerate() {
                draft.set_slot(slot, meal);
            }
            draft.finalize((day + 1).to_string(), advice)
        })
        .collect::<Result<Vec<FoodLog>>>()?;

    info!(count = food_logs.len(), %today, "Generated demo food logs");
    Ok(food_logs)
}
