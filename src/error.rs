use thiserror::Error;

/// Errors raised while parsing, validating or loading planner inputs.
///
/// The calculation engines themselves never fail: degenerate inputs produce
/// degenerate (zero or empty) results instead.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("No meals loaded from {0}")]
    EmptyCatalog(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    FieldOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unsupported gender: {0}")]
    UnsupportedGender(String),

    #[error("Unsupported goal: {0}")]
    UnsupportedGoal(String),

    #[error("Unsupported number of meals in a day: {0} (expected 3 or 5)")]
    UnsupportedMealCount(u32),

    #[error("Invalid food log date: {0}")]
    InvalidDate(String),

    #[error("Meal slot {index} has no meal selected")]
    EmptyMealSlot { index: usize },

    #[error("Unknown meal sort field: {0}")]
    UnknownSortField(String),

    #[error("No meal with id '{0}'")]
    MealNotFound(String),

    #[error("No food log with id '{0}'")]
    FoodLogNotFound(String),

    #[error("Id '{0}' is already taken")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
