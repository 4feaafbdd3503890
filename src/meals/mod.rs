pub mod catalog;
pub mod meal;
pub mod meal_list;
pub mod sort;
pub mod suggestions;

pub use catalog::{load_meal_catalog, parse_meal_catalog, CatalogFormat};
pub use meal::{IdStrategy, Meal};
pub use meal_list::MealList;
pub use sort::{sort_meals, MealSortField, MealSortModel, SortOrder};
pub use suggestions::{get_suggestions, MealSuggestion, MealSuggestions};
