use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;
use crate::meals::sort::{MealSortField, SortOrder};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log output format, overrides MACRO_PLANNER_LOG_FORMAT
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the calorie and macro advice for a profile
    Advice {
        /// Path to the profile JSON file
        #[arg(short, long)]
        profile: PathBuf,
    },
    /// Suggest daily meal combinations from a meal catalog
    Suggest {
        #[arg(short, long)]
        profile: PathBuf,
        /// Meal catalog, `.json` or CSV
        #[arg(short, long)]
        meals: PathBuf,
        /// Number of alternatives, defaults to the profile's meals per day
        #[arg(short, long)]
        alternatives: Option<usize>,
        /// Seed for reproducible suggestions
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a meal catalog in sorted order
    Sort {
        #[arg(short, long)]
        meals: PathBuf,
        #[arg(long, value_enum, default_value_t = MealSortField::Calories)]
        by: MealSortField,
        #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
        order: SortOrder,
    },
    /// Recompute every food log summary against the profile's advice
    Breakdown {
        #[arg(short, long)]
        profile: PathBuf,
        #[arg(short, long)]
        food_logs: PathBuf,
    },
    /// Print consumed vs suggested calories per day
    Trend {
        #[arg(short, long)]
        profile: PathBuf,
        #[arg(short, long)]
        food_logs: PathBuf,
    },
    /// Write a demo profile, meal catalog and a week of food logs
    Seed {
        #[arg(short, long)]
        out_dir: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
