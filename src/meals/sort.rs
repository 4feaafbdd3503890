use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::PlannerError;
use crate::meals::meal::Meal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MealSortField {
    Name,
    Calories,
    Protein,
    Carbohydrates,
    Fats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSortModel {
    pub sort_property: MealSortField,
    pub sort_order: SortOrder,
}

impl MealSortModel {
    pub fn new(sort_property: MealSortField, sort_order: SortOrder) -> Self {
        Self {
            sort_property,
            sort_order,
        }
    }
}

impl FromStr for MealSortField {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(MealSortField::Name),
            "calories" => Ok(MealSortField::Calories),
            "protein" => Ok(MealSortField::Protein),
            "carbohydrates" | "carbs" => Ok(MealSortField::Carbohydrates),
            "fats" | "fat" => Ok(MealSortField::Fats),
            _ => Err(PlannerError::UnknownSortField(s.to_string())),
        }
    }
}

enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
}

fn sort_key(meal: &Meal, field: MealSortField) -> SortKey<'_> {
    match field {
        MealSortField::Name => SortKey::Text(&meal.name),
        MealSortField::Calories => SortKey::Number(meal.calories),
        MealSortField::Protein => SortKey::Number(meal.macros.protein),
        MealSortField::Carbohydrates => SortKey::Number(meal.macros.carbohydrates),
        MealSortField::Fats => SortKey::Number(meal.macros.fats),
    }
}

fn compare_keys(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
        // Keys for one field are always the same kind
        _ => Ordering::Equal,
    }
}

/// Returns a new vector of the meals ordered by `sort_model`. The input is left untouched.
pub fn sort_meals(meals: &[Meal], sort_model: &MealSortModel) -> Vec<Meal> {
    let field = sort_model.sort_property;
    let mut sorted = meals.to_vec();
    sorted.sort_by(|a, b| {
        let (a_key, b_key) = (sort_key(a, field), sort_key(b, field));
        match sort_model.sort_order {
            SortOrder::Asc => compare_keys(&a_key, &b_key),
            SortOrder::Desc => compare_keys(&b_key, &a_key),
        }
    });
    sorted
}
