use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Builder;

use crate::nutrition::macros::{total_calories, MacroBreakdown};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub macros: MacroBreakdown,
    /// Cached calorie value, always derived from `macros`
    #[serde(default)]
    pub calories: f64,
}

/// Calories stored on a meal for the given macros.
pub fn meal_calories(macros: &MacroBreakdown) -> f64 {
    total_calories(macros).round()
}

impl Meal {
    pub fn new(id: impl Into<String>, name: impl Into<String>, macros: MacroBreakdown) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            calories: meal_calories(&macros),
            macros,
        }
    }

    /// A blank meal slot, used by food log drafts before a meal is chosen.
    pub fn empty_slot(id: impl Into<String>) -> Self {
        Self::new(id, "", MacroBreakdown::default())
    }

    pub fn is_empty_slot(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Edited copy with new macros; calories are re-derived.
    pub fn with_macros(&self, macros: MacroBreakdown) -> Meal {
        Meal::new(self.id.clone(), self.name.clone(), macros)
    }

    /// Copy with `calories` recomputed, for meals read from untrusted input.
    pub fn normalized(mut self) -> Meal {
        self.calories = meal_calories(&self.macros);
        self
    }
}

/// How new meal ids are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Version 4 UUID built from the caller's randomness source
    #[default]
    Uuid,
    /// Uniform integer in an inclusive range, rendered as a string. Collisions are
    /// possible; kept for compatibility with data created by the dashboard.
    LegacyRandom { min: u32, max: u32 },
}

impl IdStrategy {
    pub const LEGACY: IdStrategy = IdStrategy::LegacyRandom { min: 0, max: 1000 };

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match *self {
            IdStrategy::Uuid => Builder::from_random_bytes(rng.gen()).into_uuid().to_string(),
            IdStrategy::LegacyRandom { min, max } => {
                let (low, high) = if min <= max { (min, max) } else { (max, min) };
                rng.gen_range(low..=high).to_string()
            }
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(IdStrategy::Uuid),
            "legacy" => Ok(IdStrategy::LEGACY),
            other => Err(format!("unknown id strategy '{}'", other)),
        }
    }
}
