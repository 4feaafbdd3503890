use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::food_log::breakdown::recompute_breakdowns;
use crate::food_log::log::{FoodLog, FoodLogDraft};
use crate::nutrition::advice::MacroAdvice;

/// All saved food logs as an immutable snapshot. Every change returns a new list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodLogList {
    pub list: Vec<FoodLog>,
}

impl FoodLogList {
    pub fn new(food_logs: Vec<FoodLog>) -> Self {
        Self { list: food_logs }
    }

    pub fn get(&self, id: &str) -> Option<&FoodLog> {
        self.list.iter().find(|food_log| food_log.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.list
            .iter()
            .position(|food_log| food_log.id == id)
            .ok_or_else(|| PlannerError::FoodLogNotFound(id.to_string()))
    }

    /// Appends a finalized log. Ids must be unique.
    pub fn add(&self, food_log: FoodLog) -> Result<FoodLogList> {
        if self.get(&food_log.id).is_some() {
            return Err(PlannerError::DuplicateId(food_log.id));
        }
        let mut list = self.list.clone();
        list.push(food_log);
        Ok(FoodLogList { list })
    }

    /// Replaces the log `id` with the finalized `draft`, summarized against `advice`.
    pub fn edit(&self, id: &str, draft: FoodLogDraft, advice: &MacroAdvice) -> Result<FoodLogList> {
        let index = self.position(id)?;
        let mut list = self.list.clone();
        list[index] = draft.finalize(id, advice)?;
        debug!(id, "Food log edited");
        Ok(FoodLogList { list })
    }

    pub fn remove(&self, id: &str) -> Result<FoodLogList> {
        let index = self.position(id)?;
        let mut list = self.list.clone();
        list.remove(index);
        Ok(FoodLogList { list })
    }

    /// Copy with every summary recomputed against new advice.
    pub fn with_advice(&self, advice: &MacroAdvice) -> FoodLogList {
        let mut list = self.list.clone();
        recompute_breakdowns(&mut list, advice);
        FoodLogList { list }
    }
}
