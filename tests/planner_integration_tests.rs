use anyhow::Result;
use chrono::NaiveDate;
use macro_planner::food_log::{
    compute_breakdown, daily_trend, recompute_breakdowns, FoodLog, FoodLogBreakdownSummary, FoodLogDraft,
    FoodLogList,
};
use macro_planner::meals::suggestions::partition_by_calories;
use macro_planner::meals::{
    get_suggestions, load_meal_catalog, sort_meals, IdStrategy, Meal, MealList, MealSortField, MealSortModel,
    SortOrder,
};
use macro_planner::nutrition::advice::calculate_bmr;
use macro_planner::nutrition::{
    calories_for_macro, generate_macro_advice, total_calories, Gender, Goal, MacroBreakdown, MacroType,
    UserProfile,
};
use macro_planner::sample_data::{demo_food_logs, demo_meals, demo_profile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;

fn scenario_profile() -> UserProfile {
    UserProfile {
        age: Some(31),
        gender: Some(Gender::Male),
        num_of_exercise_days: Some(3),
        num_of_meals_in_a_day: Some(5),
        body_weight_in_kgs: Some(78.0),
        body_height_in_cms: Some(180.34),
        body_fat_in_percentage: Some(12.9),
        goal: Some(Goal::WeightLoss),
    }
}

fn random_pool(rng: &mut StdRng, size: usize) -> Vec<Meal> {
    (0..size)
        .map(|i| {
            let macros = MacroBreakdown::new(
                f64::from(rng.gen_range(0..60u32)),
                f64::from(rng.gen_range(0..120u32)),
                f64::from(rng.gen_range(0..40u32)),
            );
            Meal::new(i.to_string(), format!("Meal {}", i), macros)
        })
        .collect()
}

#[test]
fn test_bmr_reference_values() {
    let male = calculate_bmr(Gender::Male, 78.0, 180.0, 31);
    assert!((male - 1825.0).abs() <= 1.0, "male bmr {}", male);

    let female = calculate_bmr(Gender::Female, 60.0, 165.0, 28);
    let expected = (655.0 + 9.6 * 60.0 + 1.8 * 165.0 - 4.7 * 28.0_f64).round();
    assert_eq!(female, expected);
}

#[test]
fn test_scenario_profile_advice() {
    let advice = generate_macro_advice(&scenario_profile()).unwrap();
    assert_eq!(advice.bmr_calories, 1826.0);
    // 3 exercise days resolve to the 1.55 multiplier
    assert_eq!(advice.total_calories, (1826.0_f64 * 1.55).round());
    assert_eq!(advice.macros.protein, 156.0);
    assert_eq!(advice.macros, MacroBreakdown::new(156.0, 256.0, 76.0));
    assert_eq!(advice.current_calories, total_calories(&advice.macros));
}

#[test]
fn test_weight_loss_protein_is_two_grams_per_kg() {
    for weight in [45.0, 60.5, 78.0, 101.3, 150.0] {
        let profile = UserProfile {
            body_weight_in_kgs: Some(weight),
            ..scenario_profile()
        };
        let advice = generate_macro_advice(&profile).unwrap();
        assert_eq!(advice.macros.protein, (2.0_f64 * weight).round());
    }
}

#[test]
fn test_macro_calories_are_additive() {
    for grams in [0.0, 1.0, 12.5, 100.0, 333.3] {
        let sum = calories_for_macro(MacroType::Protein, grams)
            + calories_for_macro(MacroType::Carbohydrates, grams)
            + calories_for_macro(MacroType::Fats, grams);
        let total = total_calories(&MacroBreakdown::new(grams, grams, grams));
        assert!((sum - total).abs() < 1e-9);
    }
}

#[test]
fn test_advice_requires_every_field() {
    let complete = scenario_profile();
    let omitted = [
        UserProfile { body_weight_in_kgs: None, ..complete.clone() },
        UserProfile { body_height_in_cms: None, ..complete.clone() },
        UserProfile { age: None, ..complete.clone() },
        UserProfile { gender: None, ..complete.clone() },
        UserProfile { num_of_exercise_days: None, ..complete.clone() },
        UserProfile { goal: None, ..complete.clone() },
    ];
    for profile in &omitted {
        assert!(generate_macro_advice(profile).is_none());
    }
    // body fat and meals per day are not needed
    let optional_missing = UserProfile {
        body_fat_in_percentage: None,
        num_of_meals_in_a_day: None,
        ..complete
    };
    assert!(generate_macro_advice(&optional_missing).is_some());
}

#[test]
fn test_suggestion_sizes_over_random_pools() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let size = rng.gen_range(0..15);
        let pool = random_pool(&mut rng, size);
        let meals_per_day = if rng.gen_bool(0.5) { 3 } else { 5 };
        let budget = f64::from(rng.gen_range(1200..3500u32));

        let average = budget / f64::from(meals_per_day);
        let buckets = partition_by_calories(&pool, average);
        let high_target = (meals_per_day / 2) as usize;
        let low_target = meals_per_day as usize - high_target;
        let balanced = buckets.high_calorie.len() >= high_target && buckets.low_calorie.len() >= low_target;

        let suggestions = get_suggestions(meals_per_day, budget, &pool, None, &mut rng);
        assert_eq!(suggestions.list.len(), meals_per_day as usize);
        for suggestion in &suggestions.list {
            assert!(suggestion.meals.len() <= meals_per_day as usize);
            if pool.len() >= meals_per_day as usize && balanced {
                assert_eq!(suggestion.meals.len(), meals_per_day as usize);
            }
            let total: f64 = suggestion.meals.iter().map(|m| m.calories).sum();
            assert_eq!(suggestion.total_calories, total);
        }
    }
}

#[test]
fn test_sort_ascending_calories_over_random_pools() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let size = rng.gen_range(0..20);
        let pool = random_pool(&mut rng, size);
        let sorted = sort_meals(&pool, &MealSortModel::new(MealSortField::Calories, SortOrder::Asc));
        assert_eq!(sorted.len(), pool.len());
        for pair in sorted.windows(2) {
            assert!(pair[0].calories <= pair[1].calories);
        }
    }
}

#[test]
fn test_empty_food_log_breakdown() {
    let advice = generate_macro_advice(&scenario_profile()).unwrap();
    let food_log = FoodLog {
        id: "1".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        meals: Vec::new(),
        breakdown_summary: FoodLogBreakdownSummary::default(),
    };
    let summary = compute_breakdown(&food_log, &advice);
    assert_eq!(summary.macro_breakdown, MacroBreakdown::default());
    assert_eq!(summary.calories_breakdown.total, 0.0);
    assert_eq!(summary.calories_breakdown.protein, 0.0);
    assert_eq!(summary.macro_deficit_breakdown, advice.macros);
}

#[test]
fn test_catalog_to_food_log_flow() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let catalog_path = dir.path().join("meals.csv");
    let mut file = std::fs::File::create(&catalog_path)?;
    writeln!(file, "Name,Protein (g),Carbohydrates (g),Fats (g)")?;
    for (name, p, c, f) in [
        ("Egg white omelet", 30, 10, 8),
        ("Grilled chicken salad", 45, 20, 12),
        ("Whey protein banana smoothie", 35, 45, 6),
        ("Grilled tilapia", 40, 30, 10),
        ("Chickpea curry with rice", 25, 90, 18),
        ("Black beans with rice", 25, 95, 9),
        ("Protein pancakes", 40, 60, 14),
    ] {
        writeln!(file, "{},{},{},{}", name, p, c, f)?;
    }
    drop(file);

    let mut rng = StdRng::seed_from_u64(5);
    let catalog = load_meal_catalog(&catalog_path, IdStrategy::Uuid, &mut rng)?;
    assert_eq!(catalog.len(), 7);

    let profile = scenario_profile();
    let advice = generate_macro_advice(&profile).unwrap();
    let meals_per_day = profile.num_of_meals_in_a_day.unwrap();
    let suggestions = get_suggestions(meals_per_day, advice.current_calories, &catalog, None, &mut rng);
    let chosen = &suggestions.list[0];
    assert_eq!(chosen.meals.len(), 5);

    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut draft = FoodLogDraft::for_new_log(date, meals_per_day);
    for (slot, meal) in chosen.meals.iter().enumerate() {
        draft.set_slot(slot, meal);
    }
    let mut logs = vec![draft.finalize("log-1", &advice)?];
    assert_eq!(logs[0].breakdown_summary.calories_breakdown.total, chosen.total_calories);

    // New advice after a weight change replaces every summary
    let lighter = profile.merge(&UserProfile {
        body_weight_in_kgs: Some(70.0),
        ..UserProfile::default()
    });
    let new_advice = generate_macro_advice(&lighter).unwrap();
    recompute_breakdowns(&mut logs, &new_advice);
    assert_eq!(logs[0].breakdown_summary.macro_suggested_breakdown, new_advice.macros);

    let json = serde_json::to_string(&logs)?;
    assert!(json.contains("\"10/18/2026\""));
    let back: Vec<FoodLog> = serde_json::from_str(&json)?;
    assert_eq!(back, logs);
    Ok(())
}

#[test]
fn test_seeded_demo_data_is_reproducible() -> Result<()> {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let profile = demo_profile();
    let advice = generate_macro_advice(&profile).unwrap();

    let build = |seed: u64| -> Result<Vec<FoodLog>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let meals = demo_meals(&mut rng);
        Ok(demo_food_logs(today, &profile, &advice, &meals, &mut rng)?)
    };

    let first = build(11)?;
    assert_eq!(first, build(11)?);

    let trend = daily_trend(&first);
    assert_eq!(trend.len(), 7);
    assert!(trend.windows(2).all(|pair| pair[0].date < pair[1].date));
    assert!(trend.iter().all(|row| row.suggested_calories == advice.total_calories));
    Ok(())
}

#[test]
fn test_catalog_edits_leave_logged_meals_alone() -> Result<()> {
    let advice = generate_macro_advice(&scenario_profile()).unwrap();
    let catalog = MealList::default()
        .add(Meal::new("1", "Chickpea curry with rice", MacroBreakdown::new(25.0, 90.0, 18.0)))?
        .add(Meal::new("2", "Grilled tilapia", MacroBreakdown::new(40.0, 30.0, 10.0)))?;

    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut draft = FoodLogDraft::for_new_log(date, 3);
    draft.set_slot(0, catalog.get("1").unwrap());
    draft.set_slot(1, catalog.get("2").unwrap());
    draft.set_slot(2, catalog.get("2").unwrap());
    let logs = FoodLogList::default().add(draft.finalize("day-1", &advice)?)?;
    let logged_before = logs.get("day-1").unwrap().clone();

    let lighter_curry = Meal::new("1", "Chickpea curry", MacroBreakdown::new(20.0, 40.0, 8.0));
    let catalog = catalog.edit(&lighter_curry)?.remove("2")?;
    assert_eq!(catalog.get("1").unwrap().calories, 80.0 + 160.0 + 72.0);
    assert!(catalog.get("2").is_none());

    // The saved log still holds the meals as they were when logged
    let logged = logs.get("day-1").unwrap();
    assert_eq!(logged, &logged_before);
    assert_eq!(logged.meals[0].name, "Chickpea curry with rice");
    assert_eq!(logged.meals[0].calories, 100.0 + 360.0 + 162.0);
    assert_eq!(logged.meals[1].id, "2");

    // Editing the log picks up the current catalog entry and recomputes the summary
    let mut redo = FoodLogDraft::from_log(logged);
    redo.set_slot(0, catalog.get("1").unwrap());
    let logs = logs.edit("day-1", redo, &advice)?;
    let relogged = logs.get("day-1").unwrap();
    assert_eq!(relogged.breakdown_summary.calories_breakdown.total, 312.0 + 370.0 + 370.0);
    Ok(())
}
