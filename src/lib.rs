pub mod cli;
pub mod config;
pub mod error;
pub mod food_log;
pub mod logging;
pub mod meals;
pub mod nutrition;
pub mod sample_data;

pub use error::{PlannerError, Result};
