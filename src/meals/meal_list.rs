use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::meals::meal::Meal;

/// The meal catalog as an immutable snapshot. Every change returns a new list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealList {
    pub list: Vec<Meal>,
}

impl MealList {
    pub fn new(meals: Vec<Meal>) -> Self {
        Self { list: meals }
    }

    pub fn get(&self, id: &str) -> Option<&Meal> {
        self.list.iter().find(|meal| meal.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.list
            .iter()
            .position(|meal| meal.id == id)
            .ok_or_else(|| PlannerError::MealNotFound(id.to_string()))
    }

    /// Appends `meal` with its calories re-derived. Ids must be unique.
    pub fn add(&self, meal: Meal) -> Result<MealList> {
        if self.get(&meal.id).is_some() {
            return Err(PlannerError::DuplicateId(meal.id));
        }
        let mut list = self.list.clone();
        list.push(meal.normalized());
        Ok(MealList { list })
    }

    /// Replaces the name and macros of the meal with `edited.id`; calories follow the new macros.
    pub fn edit(&self, edited: &Meal) -> Result<MealList> {
        let index = self.position(&edited.id)?;
        let mut list = self.list.clone();
        let renamed = Meal {
            name: edited.name.clone(),
            ..list[index].clone()
        };
        list[index] = renamed.with_macros(edited.macros);
        debug!(id = %edited.id, "Meal edited");
        Ok(MealList { list })
    }

    pub fn remove(&self, id: &str) -> Result<MealList> {
        let index = self.position(id)?;
        let mut list = self.list.clone();
        list.remove(index);
        Ok(MealList { list })
    }
}
