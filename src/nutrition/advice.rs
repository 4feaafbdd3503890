//! Macro advisory engine: turns a body profile into daily calorie and macro targets.
//!
//! The pipeline is BMR (Harris-Benedict) -> total energy expenditure (activity
//! multiplier) -> goal-adjusted macro split -> calories of the rounded split.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, warn};

use crate::nutrition::macros::{calories_for_macro, total_calories, MacroBreakdown, MacroType};
use crate::nutrition::profile::{Gender, Goal, UserProfile};

/// Calorie offset applied to TEE for weight loss / weight gain goals.
pub const GOAL_CALORIE_OFFSET: f64 = 500.0;

/// Protein target for weight loss, in grams per kg of body weight.
pub const WEIGHT_LOSS_PROTEIN_G_PER_KG: f64 = 2.0;

/// Activity multipliers keyed by exercise days per week.
///
/// Ranges overlap at 3 and 5. They are evaluated in order and the last
/// matching entry wins, so 3 and 5 days both resolve to 1.55.
pub const ACTIVITY_MULTIPLIERS: [(RangeInclusive<u8>, f64); 4] = [
    (0..=0, 1.2),
    (1..=3, 1.375),
    (3..=5, 1.55),
    (6..=7, 1.725),
];

/// Daily targets derived from a complete profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroAdvice {
    /// Basal metabolic rate (kcal/day)
    pub bmr_calories: f64,
    /// Total energy expenditure (kcal/day)
    pub total_calories: f64,
    /// Calories implied by the recommended grams in `macros`
    pub current_calories: f64,
    pub macros: MacroBreakdown,
}

/// Basal metabolic rate using the Harris-Benedict equation, rounded to whole kcal.
///
/// - Male: `66 + 13.7 x weight + 5 x height - 6.8 x age`
/// - Female: `655 + 9.6 x weight + 1.8 x height - 4.7 x age`
pub fn calculate_bmr(gender: Gender, body_weight_kg: f64, body_height_cm: f64, age: u32) -> f64 {
    let age = f64::from(age);
    let bmr = match gender {
        Gender::Male => 66.0 + (13.7 * body_weight_kg) + (5.0 * body_height_cm) - (6.8 * age),
        Gender::Female => 655.0 + (9.6 * body_weight_kg) + (1.8 * body_height_cm) - (4.7 * age),
    };
    bmr.round()
}

/// Activity multiplier for the given exercise days, `None` when no range matches.
pub fn activity_multiplier(exercise_days_per_week: u8) -> Option<f64> {
    ACTIVITY_MULTIPLIERS
        .iter()
        .filter(|(days, _)| days.contains(&exercise_days_per_week))
        .map(|(_, multiplier)| *multiplier)
        .last()
}

/// Total energy expenditure: BMR scaled by the activity multiplier, rounded.
///
/// Exercise days outside 0-7 match no range and yield 0.
pub fn calculate_tee(bmr_calories: f64, exercise_days_per_week: u8) -> f64 {
    match activity_multiplier(exercise_days_per_week) {
        Some(multiplier) => (bmr_calories * multiplier).round(),
        None => {
            warn!(
                exercise_days_per_week,
                "Exercise days outside 0-7, total energy expenditure set to 0"
            );
            0.0
        }
    }
}

/// Splits the goal-adjusted calories into grams of protein, carbohydrates and fats.
///
/// # Arguments
/// * `total_calories`: total energy expenditure (kcal/day).
/// * `body_weight_kg`: body weight, used for the weight-loss protein target.
/// * `goal`: weight loss eats 500 kcal below TEE, weight gain 500 kcal above.
///
/// # Returns
/// Gram values rounded to whole numbers. Weight loss fixes protein at 2 g/kg and
/// splits the remaining calories 60/40 between carbohydrates and fats; weight gain
/// splits all calories 30/40/30 protein/carbohydrates/fats.
pub fn calculate_macro_split(total_calories: f64, body_weight_kg: f64, goal: Goal) -> MacroBreakdown {
    match goal {
        Goal::WeightLoss => {
            let calories_to_eat = total_calories - GOAL_CALORIE_OFFSET;
            let protein_g = WEIGHT_LOSS_PROTEIN_G_PER_KG * body_weight_kg;
            let remaining = calories_to_eat - calories_for_macro(MacroType::Protein, protein_g);
            let carbohydrates_g = (remaining * 0.60) / MacroType::Carbohydrates.calories_per_gram();
            let fats_g = (remaining * 0.40) / MacroType::Fats.calories_per_gram();
            MacroBreakdown {
                protein: protein_g.round(),
                carbohydrates: carbohydrates_g.round(),
                fats: fats_g.round(),
            }
        }
        Goal::WeightGain => {
            let calories_to_eat = total_calories + GOAL_CALORIE_OFFSET;
            MacroBreakdown {
                protein: ((calories_to_eat * 0.30) / MacroType::Protein.calories_per_gram()).round(),
                carbohydrates: ((calories_to_eat * 0.40) / MacroType::Carbohydrates.calories_per_gram())
                    .round(),
                fats: ((calories_to_eat * 0.30) / MacroType::Fats.calories_per_gram()).round(),
            }
        }
    }
}

/// Builds the full advice for a profile.
///
/// Returns `None` while any of body weight, height, age, gender, exercise days or
/// goal is missing; callers should keep showing nothing rather than stale advice.
pub fn generate_macro_advice(profile: &UserProfile) -> Option<MacroAdvice> {
    let (Some(weight), Some(height), Some(age), Some(gender), Some(exercise_days), Some(goal)) = (
        profile.body_weight_in_kgs,
        profile.body_height_in_cms,
        profile.age,
        profile.gender,
        profile.num_of_exercise_days,
        profile.goal,
    ) else {
        debug!("Profile incomplete, no macro advice generated");
        return None;
    };

    let bmr_calories = calculate_bmr(gender, weight, height, age);
    let total_calories_tee = calculate_tee(bmr_calories, exercise_days);
    let macros = calculate_macro_split(total_calories_tee, weight, goal);
    let current_calories = total_calories(&macros);

    debug!(
        bmr_calories,
        total_calories = total_calories_tee,
        current_calories,
        "Generated macro advice"
    );

    Some(MacroAdvice {
        bmr_calories,
        total_calories: total_calories_tee,
        current_calories,
        macros,
    })
}
