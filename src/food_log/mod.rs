pub mod breakdown;
pub mod food_log_list;
pub mod log;

pub use breakdown::{
    compute_breakdown, compute_breakdowns, recompute_breakdowns, CaloriesBreakdown,
    FoodLogBreakdownSummary,
};
pub use food_log_list::FoodLogList;
pub use log::{daily_trend, format_log_date, parse_log_date, FoodLog, FoodLogDraft, TrendRow};
