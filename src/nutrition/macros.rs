use serde::{Deserialize, Serialize};

/// Calories per gram (Atwater factors).
pub mod calorie_per_gram {
    pub const PROTEIN: f64 = 4.0;
    pub const CARBOHYDRATES: f64 = 4.0;
    pub const FATS: f64 = 9.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MacroType {
    Protein,
    Carbohydrates,
    Fats,
}

impl MacroType {
    pub const ALL: [MacroType; 3] = [MacroType::Protein, MacroType::Carbohydrates, MacroType::Fats];

    pub fn calories_per_gram(self) -> f64 {
        match self {
            MacroType::Protein => calorie_per_gram::PROTEIN,
            MacroType::Carbohydrates => calorie_per_gram::CARBOHYDRATES,
            MacroType::Fats => calorie_per_gram::FATS,
        }
    }
}

/// Grams of each macronutrient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein: f64,
    pub carbohydrates: f64,
    pub fats: f64,
}

impl MacroBreakdown {
    pub fn new(protein: f64, carbohydrates: f64, fats: f64) -> Self {
        Self {
            protein,
            carbohydrates,
            fats,
        }
    }

    pub fn get(&self, macro_type: MacroType) -> f64 {
        match macro_type {
            MacroType::Protein => self.protein,
            MacroType::Carbohydrates => self.carbohydrates,
            MacroType::Fats => self.fats,
        }
    }

    /// Element-wise sum.
    pub fn add(&self, other: &MacroBreakdown) -> MacroBreakdown {
        MacroBreakdown {
            protein: self.protein + other.protein,
            carbohydrates: self.carbohydrates + other.carbohydrates,
            fats: self.fats + other.fats,
        }
    }

    /// Element-wise absolute difference.
    pub fn abs_diff(&self, other: &MacroBreakdown) -> MacroBreakdown {
        MacroBreakdown {
            protein: (self.protein - other.protein).abs(),
            carbohydrates: (self.carbohydrates - other.carbohydrates).abs(),
            fats: (self.fats - other.fats).abs(),
        }
    }
}

/// Calories contributed by `grams` of the given macronutrient.
pub fn calories_for_macro(macro_type: MacroType, grams: f64) -> f64 {
    grams * macro_type.calories_per_gram()
}

/// Sum of the per-macro calorie conversions of a breakdown.
pub fn total_calories(macros: &MacroBreakdown) -> f64 {
    MacroType::ALL
        .iter()
        .map(|&macro_type| calories_for_macro(macro_type, macros.get(macro_type)))
        .sum()
}
