pub mod advice;
pub mod macros;
pub mod profile;

pub use advice::{
    calculate_bmr, calculate_macro_split, calculate_tee, generate_macro_advice, MacroAdvice,
};
pub use macros::{calories_for_macro, total_calories, MacroBreakdown, MacroType};
pub use profile::{Gender, Goal, UserProfile};
