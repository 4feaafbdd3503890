use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::food_log::log::FoodLog;
use crate::meals::meal::Meal;
use crate::nutrition::advice::MacroAdvice;
use crate::nutrition::macros::{calories_for_macro, total_calories, MacroBreakdown, MacroType};

/// Calories in total and per macronutrient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CaloriesBreakdown {
    #[serde(rename = "totalCalories")]
    pub total: f64,
    #[serde(rename = "proteinCalories")]
    pub protein: f64,
    #[serde(rename = "carbohydratesCalories")]
    pub carbohydrates: f64,
    #[serde(rename = "fatsCalories")]
    pub fats: f64,
}

impl CaloriesBreakdown {
    /// Per-macro calories of `macros`, with `total` taken as given.
    fn with_total(total: f64, macros: &MacroBreakdown) -> Self {
        Self {
            total,
            protein: calories_for_macro(MacroType::Protein, macros.protein),
            carbohydrates: calories_for_macro(MacroType::Carbohydrates, macros.carbohydrates),
            fats: calories_for_macro(MacroType::Fats, macros.fats),
        }
    }

    pub fn from_macros(macros: &MacroBreakdown) -> Self {
        Self::with_total(total_calories(macros), macros)
    }

    pub fn abs_diff(&self, other: &CaloriesBreakdown) -> CaloriesBreakdown {
        CaloriesBreakdown {
            total: (self.total - other.total).abs(),
            protein: (self.protein - other.protein).abs(),
            carbohydrates: (self.carbohydrates - other.carbohydrates).abs(),
            fats: (self.fats - other.fats).abs(),
        }
    }
}

/// What a day's log consumed, what was advised, and how far apart they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLogBreakdownSummary {
    pub macro_breakdown: MacroBreakdown,
    pub macro_deficit_breakdown: MacroBreakdown,
    pub macro_suggested_breakdown: MacroBreakdown,
    pub calories_breakdown: CaloriesBreakdown,
    pub calories_deficit_breakdown: CaloriesBreakdown,
    pub calories_suggested_breakdown: CaloriesBreakdown,
}

/// Summary for a list of eaten meals against `advice`.
///
/// The calorie deficit total compares against `advice.current_calories` (calories of
/// the advised grams) while the suggested calorie total reports `advice.total_calories`.
pub fn compute_breakdown_for_meals(meals: &[Meal], advice: &MacroAdvice) -> FoodLogBreakdownSummary {
    let macro_breakdown = meals
        .iter()
        .fold(MacroBreakdown::default(), |sum, meal| sum.add(&meal.macros));
    let calories_breakdown = CaloriesBreakdown::from_macros(&macro_breakdown);
    let advised_calories = CaloriesBreakdown::with_total(advice.current_calories, &advice.macros);

    FoodLogBreakdownSummary {
        macro_breakdown,
        macro_deficit_breakdown: macro_breakdown.abs_diff(&advice.macros),
        macro_suggested_breakdown: advice.macros,
        calories_breakdown,
        calories_deficit_breakdown: calories_breakdown.abs_diff(&advised_calories),
        calories_suggested_breakdown: CaloriesBreakdown::with_total(
            advice.total_calories,
            &advice.macros,
        ),
    }
}

pub fn compute_breakdown(food_log: &FoodLog, advice: &MacroAdvice) -> FoodLogBreakdownSummary {
    compute_breakdown_for_meals(&food_log.meals, advice)
}

/// Summaries for every log, in input order.
pub fn compute_breakdowns(food_logs: &[FoodLog], advice: &MacroAdvice) -> Vec<FoodLogBreakdownSummary> {
    food_logs
        .par_iter()
        .map(|food_log| compute_breakdown(food_log, advice))
        .collect()
}

/// Replaces every log's summary after the advice changed.
pub fn recompute_breakdowns(food_logs: &mut [FoodLog], advice: &MacroAdvice) {
    debug!(count = food_logs.len(), "Recomputing food log breakdowns");
    food_logs.par_iter_mut().for_each(|food_log| {
        food_log.breakdown_summary = compute_breakdown(food_log, advice);
    });
}
