//! Meal suggestion allocator.
//!
//! Splits the catalog into meals above and at-or-below the average calories a
//! single meal may have, then draws a randomized daily combination that mixes both
//! groups. Several independent combinations are produced so they can be shown side
//! by side; duplicates between them are allowed.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::meals::meal::Meal;
use crate::meals::sort::{sort_meals, MealSortField, MealSortModel, SortOrder};
use crate::nutrition::profile::SUPPORTED_MEALS_PER_DAY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSuggestion {
    pub meals: Vec<Meal>,
    pub total_calories: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealSuggestions {
    pub list: Vec<MealSuggestion>,
}

/// Catalog split around the average calories per meal. Both buckets keep the
/// descending calorie order they were built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalorieBuckets {
    pub high_calorie: Vec<Meal>,
    pub low_calorie: Vec<Meal>,
}

/// In-place Fisher-Yates shuffle: walking from the end, each position is swapped
/// with a uniformly chosen position at or before it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Partitions meals into those strictly above `average_calories_per_meal` and the rest.
pub fn partition_by_calories(meals: &[Meal], average_calories_per_meal: f64) -> CalorieBuckets {
    let sorted = sort_meals(
        meals,
        &MealSortModel::new(MealSortField::Calories, SortOrder::Desc),
    );
    let (high_calorie, low_calorie): (Vec<Meal>, Vec<Meal>) = sorted
        .into_iter()
        .partition(|meal| meal.calories > average_calories_per_meal);
    CalorieBuckets {
        high_calorie,
        low_calorie,
    }
}

/// Draws one daily combination of up to `meals_per_day` meals from the buckets.
///
/// `floor(n/2)` meals come from the high-calorie bucket and `ceil(n/2)` from the
/// low-calorie one. When the catalog is no larger than `n` every meal is returned;
/// when either bucket is too small the combination is drawn from both buckets mixed.
pub fn compose_combination<R: Rng + ?Sized>(
    buckets: CalorieBuckets,
    meals_per_day: u32,
    rng: &mut R,
) -> Vec<Meal> {
    if !SUPPORTED_MEALS_PER_DAY.contains(&meals_per_day) {
        warn!(meals_per_day, "Unsupported number of meals in a day, no combination drawn");
        return Vec::new();
    }

    let meals_per_day = meals_per_day as usize;
    let high_target = meals_per_day / 2;
    let low_target = meals_per_day - high_target;
    let CalorieBuckets {
        mut high_calorie,
        mut low_calorie,
    } = buckets;

    if high_calorie.len() + low_calorie.len() <= meals_per_day {
        debug!(
            available = high_calorie.len() + low_calorie.len(),
            meals_per_day, "Catalog too small, suggesting every meal"
        );
        let mut all = high_calorie;
        all.append(&mut low_calorie);
        shuffle(&mut all, rng);
        return all;
    }

    if high_calorie.len() < high_target || low_calorie.len() < low_target {
        debug!(
            high = high_calorie.len(),
            low = low_calorie.len(),
            "Calorie buckets unbalanced, drawing from the mixed catalog"
        );
        let mut all = high_calorie;
        all.append(&mut low_calorie);
        shuffle(&mut all, rng);
        all.truncate(meals_per_day);
        return all;
    }

    shuffle(&mut high_calorie, rng);
    shuffle(&mut low_calorie, rng);
    high_calorie.truncate(high_target);
    low_calorie.truncate(low_target);
    high_calorie.append(&mut low_calorie);
    high_calorie
}

fn sum_calories(meals: &[Meal]) -> f64 {
    meals.iter().map(|meal| meal.calories).sum()
}

/// Generates independent daily meal combinations for a calorie budget.
///
/// # Arguments
/// * `meals_per_day`: meals wanted per day; only 3 and 5 produce meals.
/// * `calorie_budget`: calories allowed per day, usually the advice's current calories.
/// * `meal_pool`: candidate meals; never modified.
/// * `num_alternatives`: combinations to produce, defaults to `meals_per_day`.
/// * `rng`: randomness source for the shuffles.
pub fn get_suggestions<R: Rng + ?Sized>(
    meals_per_day: u32,
    calorie_budget: f64,
    meal_pool: &[Meal],
    num_alternatives: Option<usize>,
    rng: &mut R,
) -> MealSuggestions {
    let num_alternatives = num_alternatives.unwrap_or(meals_per_day as usize);
    let average_calories_per_meal = calorie_budget / f64::from(meals_per_day);

    let list = (0..num_alternatives)
        .map(|_| {
            let buckets = partition_by_calories(meal_pool, average_calories_per_meal);
            let meals = compose_combination(buckets, meals_per_day, &mut *rng);
            MealSuggestion {
                total_calories: sum_calories(&meals),
                meals,
            }
        })
        .collect();

    MealSuggestions { list }
}
