use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::food_log::breakdown::{compute_breakdown_for_meals, FoodLogBreakdownSummary};
use crate::meals::meal::Meal;
use crate::nutrition::advice::MacroAdvice;
use crate::nutrition::macros::MacroBreakdown;

pub const LOG_DATE_FORMAT: &str = "%m/%d/%Y";

// Accepted on input, in order of preference
const ACCEPTED_DATE_FORMATS: [&str; 3] = [LOG_DATE_FORMAT, "%Y-%m-%d", "%a %b %d %Y"];

/// Parses `MM/DD/YYYY`, `YYYY-MM-DD` or the `Sat Oct 18 2026` form date pickers emit.
pub fn parse_log_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| PlannerError::InvalidDate(input.to_string()))
}

pub fn format_log_date(date: NaiveDate) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}

/// Serde adapter writing dates as `MM/DD/YYYY` and reading any form `parse_log_date` accepts.
pub mod log_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_log_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_log_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Meals eaten on one day. Meals are copies taken when the log was saved, later
/// catalog edits do not reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLog {
    pub id: String,
    #[serde(with = "log_date_format")]
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub breakdown_summary: FoodLogBreakdownSummary,
}

/// A food log being filled in, one slot per meal of the day.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodLogDraft {
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
}

impl FoodLogDraft {
    /// Draft with `meals_per_day` empty slots, ids `1000`, `1001`, ...
    pub fn for_new_log(date: NaiveDate, meals_per_day: u32) -> Self {
        let meals = (0..meals_per_day)
            .map(|slot| Meal::empty_slot(format!("100{}", slot)))
            .collect();
        Self { date, meals }
    }

    /// Draft for editing an existing log.
    pub fn from_log(food_log: &FoodLog) -> Self {
        Self {
            date: food_log.date,
            meals: food_log.meals.clone(),
        }
    }

    /// Copies `meal` into slot `index`, growing the draft when `index` is one past the end.
    pub fn set_slot(&mut self, index: usize, meal: &Meal) {
        match self.meals.get_mut(index) {
            Some(slot) => *slot = meal.clone(),
            None => self.meals.push(meal.clone()),
        }
    }

    pub fn first_empty_slot(&self) -> Option<usize> {
        self.meals.iter().position(Meal::is_empty_slot)
    }

    /// Turns the draft into a log summarized against `advice`.
    pub fn finalize(self, id: impl Into<String>, advice: &MacroAdvice) -> Result<FoodLog> {
        if let Some(index) = self.first_empty_slot() {
            return Err(PlannerError::EmptyMealSlot { index });
        }
        let breakdown_summary = compute_breakdown_for_meals(&self.meals, advice);
        let food_log = FoodLog {
            id: id.into(),
            date: self.date,
            meals: self.meals,
            breakdown_summary,
        };
        debug!(id = %food_log.id, date = %food_log.date, "Food log finalized");
        Ok(food_log)
    }
}

/// One point of the consumption-over-time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
    #[serde(with = "log_date_format")]
    pub date: NaiveDate,
    pub consumed_calories: f64,
    pub suggested_calories: f64,
    pub macros: MacroBreakdown,
}

/// Trend rows built from each log's stored summary, ordered by date.
pub fn daily_trend(food_logs: &[FoodLog]) -> Vec<TrendRow> {
    let mut rows: Vec<TrendRow> = food_logs
        .iter()
        .map(|food_log| TrendRow {
            date: food_log.date,
            consumed_calories: food_log.breakdown_summary.calories_breakdown.total,
            suggested_calories: food_log.breakdown_summary.calories_suggested_breakdown.total,
            macros: food_log.breakdown_summary.macro_breakdown,
        })
        .collect();
    rows.sort_by_key(|row| row.date);
    rows
}
