use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PlannerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Goal {
    WeightLoss,
    WeightGain,
}

/// Upper-cases and turns separators into underscores so `weight-loss`,
/// `Weight Loss` and `WEIGHT_LOSS` all compare equal.
fn normalize_token(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

impl FromStr for Gender {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_token(s).as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            _ => Err(PlannerError::UnsupportedGender(s.to_string())),
        }
    }
}

impl FromStr for Goal {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_token(s).as_str() {
            "WEIGHT_LOSS" => Ok(Goal::WeightLoss),
            "WEIGHT_GAIN" => Ok(Goal::WeightGain),
            _ => Err(PlannerError::UnsupportedGoal(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "MALE"),
            Gender::Female => write!(f, "FEMALE"),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::WeightLoss => write!(f, "WEIGHT_LOSS"),
            Goal::WeightGain => write!(f, "WEIGHT_GAIN"),
        }
    }
}

/// Daily meal counts the suggestion allocator knows how to split.
pub const SUPPORTED_MEALS_PER_DAY: [u32; 2] = [3, 5];

/// Body profile as entered by the user. Every field may still be missing
/// while the profile is being filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_of_exercise_days: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_of_meals_in_a_day: Option<u32>,
    #[serde(rename = "bodyWeightInKGS", default, skip_serializing_if = "Option::is_none")]
    pub body_weight_in_kgs: Option<f64>,
    #[serde(rename = "bodyHeightInCMS", default, skip_serializing_if = "Option::is_none")]
    pub body_height_in_cms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_in_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value < min || value > max || value.is_nan() {
        return Err(PlannerError::FieldOutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl UserProfile {
    /// Checks every present field against the ranges the profile form accepts.
    /// Missing fields are not an error here; see `generate_macro_advice`.
    pub fn validate(&self) -> Result<()> {
        if let Some(age) = self.age {
            check_range("age", f64::from(age), 0.0, 99.0)?;
        }
        if let Some(weight) = self.body_weight_in_kgs {
            check_range("bodyWeightInKGS", weight, 0.0, 999.0)?;
        }
        if let Some(height) = self.body_height_in_cms {
            check_range("bodyHeightInCMS", height, 0.0, 999.0)?;
        }
        if let Some(body_fat) = self.body_fat_in_percentage {
            check_range("bodyFatInPercentage", body_fat, 0.0, 99.0)?;
        }
        if let Some(days) = self.num_of_exercise_days {
            check_range("numOfExerciseDays", f64::from(days), 0.0, 7.0)?;
        }
        if let Some(meals) = self.num_of_meals_in_a_day {
            if !SUPPORTED_MEALS_PER_DAY.contains(&meals) {
                return Err(PlannerError::UnsupportedMealCount(meals));
            }
        }
        Ok(())
    }

    /// Returns a new snapshot with every field present in `patch` taking precedence.
    pub fn merge(&self, patch: &UserProfile) -> UserProfile {
        UserProfile {
            age: patch.age.or(self.age),
            gender: patch.gender.or(self.gender),
            num_of_exercise_days: patch.num_of_exercise_days.or(self.num_of_exercise_days),
            num_of_meals_in_a_day: patch.num_of_meals_in_a_day.or(self.num_of_meals_in_a_day),
            body_weight_in_kgs: patch.body_weight_in_kgs.or(self.body_weight_in_kgs),
            body_height_in_cms: patch.body_height_in_cms.or(self.body_height_in_cms),
            body_fat_in_percentage: patch.body_fat_in_percentage.or(self.body_fat_in_percentage),
            goal: patch.goal.or(self.goal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gender_and_goal() {
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("weight-loss".parse::<Goal>().unwrap(), Goal::WeightLoss);
        assert_eq!("Weight Gain".parse::<Goal>().unwrap(), Goal::WeightGain);

        assert!(matches!(
            "OTHER".parse::<Gender>(),
            Err(PlannerError::UnsupportedGender(_))
        ));
        assert!(matches!(
            "MAINTENANCE".parse::<Goal>(),
            Err(PlannerError::UnsupportedGoal(_))
        ));
    }

    #[test]
    fn test_profile_json_field_names() {
        let json = r#"{
            "age": 31,
            "gender": "MALE",
            "numOfExerciseDays": 3,
            "numOfMealsInADay": 5,
            "bodyWeightInKGS": 78,
            "bodyHeightInCMS": 180.34,
            "bodyFatInPercentage": 12.9,
            "goal": "WEIGHT_LOSS"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.age, Some(31));
        assert_eq!(profile.gender, Some(Gender::Male));
        assert_eq!(profile.num_of_meals_in_a_day, Some(5));
        assert_eq!(profile.body_weight_in_kgs, Some(78.0));
        assert_eq!(profile.body_height_in_cms, Some(180.34));
        assert_eq!(profile.goal, Some(Goal::WeightLoss));

        let partial: UserProfile = serde_json::from_str(r#"{"age": 20}"#).unwrap();
        assert_eq!(partial.gender, None);
        assert_eq!(serde_json::to_string(&partial).unwrap(), r#"{"age":20}"#);
    }

    #[test]
    fn test_validate_ranges() {
        let ok = UserProfile {
            age: Some(99),
            body_weight_in_kgs: Some(0.0),
            body_height_in_cms: Some(999.0),
            body_fat_in_percentage: Some(12.9),
            num_of_exercise_days: Some(7),
            num_of_meals_in_a_day: Some(3),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
        assert!(UserProfile::default().validate().is_ok());

        let too_old = UserProfile { age: Some(100), ..Default::default() };
        assert!(matches!(
            too_old.validate(),
            Err(PlannerError::FieldOutOfRange { field: "age", .. })
        ));

        let negative_weight = UserProfile { body_weight_in_kgs: Some(-1.0), ..Default::default() };
        assert!(negative_weight.validate().is_err());

        let too_many_days = UserProfile { num_of_exercise_days: Some(8), ..Default::default() };
        assert!(too_many_days.validate().is_err());

        let four_meals = UserProfile { num_of_meals_in_a_day: Some(4), ..Default::default() };
        assert!(matches!(
            four_meals.validate(),
            Err(PlannerError::UnsupportedMealCount(4))
        ));
    }

    #[test]
    fn test_merge_prefers_patch_fields() {
        let base = UserProfile {
            age: Some(30),
            gender: Some(Gender::Female),
            goal: Some(Goal::WeightGain),
            ..Default::default()
        };
        let patch = UserProfile {
            age: Some(31),
            body_weight_in_kgs: Some(60.0),
            ..Default::default()
        };
        let merged = base.merge(&patch);
        assert_eq!(merged.age, Some(31));
        assert_eq!(merged.gender, Some(Gender::Female));
        assert_eq!(merged.goal, Some(Goal::WeightGain));
        assert_eq!(merged.body_weight_in_kgs, Some(60.0));
        // base is untouched
        assert_eq!(base.age, Some(30));
    }
}
