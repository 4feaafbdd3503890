use anyhow::{anyhow, Context, Result};
use macro_planner::cli::{parse_args, Command};
use macro_planner::config::AppConfig;
use macro_planner::food_log::{daily_trend, recompute_breakdowns, FoodLog};
use macro_planner::logging::init_logging;
use macro_planner::meals::{
    get_suggestions, parse_meal_catalog, sort_meals, CatalogFormat, IdStrategy, Meal, MealSortModel,
};
use macro_planner::nutrition::{generate_macro_advice, MacroAdvice, UserProfile};
use macro_planner::sample_data::{demo_food_logs, demo_meals, demo_profile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tokio::fs;
use tracing::{info, warn};

// Exit code when the profile lacks fields needed for advice
const INCOMPLETE_PROFILE_EXIT_CODE: u8 = 2;

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

async fn load_profile(path: &Path) -> Result<UserProfile> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;
    let profile: UserProfile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse profile file '{}'", path.display()))?;
    profile
        .validate()
        .with_context(|| format!("Invalid profile in '{}'", path.display()))?;
    Ok(profile)
}

fn require_advice(profile: &UserProfile) -> Result<MacroAdvice> {
    generate_macro_advice(profile).ok_or_else(|| {
        anyhow!("Profile is incomplete: weight, height, age, gender, exercise days and goal are required")
    })
}

async fn load_catalog(path: &Path, id_strategy: IdStrategy, rng: &mut StdRng) -> Result<Vec<Meal>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read meal catalog '{}'", path.display()))?;
    let meals = parse_meal_catalog(
        &content,
        CatalogFormat::from_path(path),
        &path.display().to_string(),
        id_strategy,
        rng,
    )
    .with_context(|| format!("Failed to load meal catalog '{}'", path.display()))?;
    Ok(meals)
}

async fn load_food_logs(path: &Path) -> Result<Vec<FoodLog>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read food logs '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse food logs '{}'", path.display()))
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    info!(path = %path.display(), "Wrote file");
    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> Result<ExitCode> {
    match command {
        Command::Advice { profile } => {
            let profile = load_profile(&profile).await?;
            match generate_macro_advice(&profile) {
                Some(advice) => print_json(&advice)?,
                None => {
                    eprintln!("Profile is incomplete: weight, height, age, gender, exercise days and goal are required");
                    return Ok(ExitCode::from(INCOMPLETE_PROFILE_EXIT_CODE));
                }
            }
        }
        Command::Suggest { profile, meals, alternatives, seed } => {
            let profile = load_profile(&profile).await?;
            let advice = require_advice(&profile)?;
            let meals_per_day = profile
                .num_of_meals_in_a_day
                .ok_or_else(|| anyhow!("Profile has no number of meals in a day"))?;

            let mut rng = make_rng(seed);
            let catalog = load_catalog(&meals, config.id_strategy, &mut rng).await?;
            let suggestions = get_suggestions(
                meals_per_day,
                advice.current_calories,
                &catalog,
                alternatives.or(config.suggestions),
                &mut rng,
            );
            print_json(&suggestions)?;
        }
        Command::Sort { meals, by, order } => {
            let mut rng = make_rng(None);
            let catalog = load_catalog(&meals, config.id_strategy, &mut rng).await?;
            print_json(&sort_meals(&catalog, &MealSortModel::new(by, order)))?;
        }
        Command::Breakdown { profile, food_logs } => {
            let advice = require_advice(&load_profile(&profile).await?)?;
            let mut logs = load_food_logs(&food_logs).await?;
            recompute_breakdowns(&mut logs, &advice);
            print_json(&logs)?;
        }
        Command::Trend { profile, food_logs } => {
            let advice = require_advice(&load_profile(&profile).await?)?;
            let mut logs = load_food_logs(&food_logs).await?;
            recompute_breakdowns(&mut logs, &advice);
            print_json(&daily_trend(&logs))?;
        }
        Command::Seed { out_dir, seed } => {
            let mut rng = make_rng(seed);
            let profile = demo_profile();
            let advice = require_advice(&profile)?;
            let meals = demo_meals(&mut rng);
            let today = chrono::Local::now().date_naive();
            let logs = demo_food_logs(today, &profile, &advice, &meals, &mut rng)?;

            fs::create_dir_all(&out_dir)
                .await
                .with_context(|| format!("Failed to create output directory '{}'", out_dir.display()))?;
            write_json(&out_dir.join("profile.json"), &profile).await?;
            write_json(&out_dir.join("meals.json"), &meals).await?;
            write_json(&out_dir.join("food_logs.json"), &logs).await?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok(); // Load .env file for settings

    let cli_args = parse_args();
    let config = AppConfig::from_env();
    let log_format = cli_args.log_format.unwrap_or(config.log_format);
    if let Err(e) = init_logging(&config.log_filter, log_format) {
        eprintln!("Logging disabled: {:#}", e);
    }
    if config.suggestions.is_some() {
        info!(suggestions = ?config.suggestions, "Default alternatives taken from configuration");
    }

    let outcome = run(cli_args.command, &config).await;
    if let Err(e) = &outcome {
        warn!(error = %e, "Command failed");
    }
    outcome
}
