use csv::ReaderBuilder;
use rand::Rng;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::meals::meal::{IdStrategy, Meal};
use crate::nutrition::macros::MacroBreakdown;

// Expected column headers
pub const ID_COL: &str = "Id";
pub const NAME_COL: &str = "Name";
pub const PROTEIN_COL: &str = "Protein (g)";
pub const CARB_COL: &str = "Carbohydrates (g)";
pub const FAT_COL: &str = "Fats (g)";

/// Catalog file layout, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Csv,
        }
    }
}

/// Gram value of a cell. Unparsable, non-finite and negative values count as 0 g.
fn parse_grams(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(grams) if grams.is_finite() && grams >= 0.0 => grams,
        _ => {
            if !s.trim().is_empty() {
                debug!(value = s, "Unusable gram value, counting as 0");
            }
            0.0
        }
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| PlannerError::MissingColumn(name.to_string()))
}

/// Reads meals from CSV. Rows with an empty name are skipped, unusable gram
/// values count as 0 and rows without an id get one from `id_strategy`.
pub fn parse_meal_catalog_csv<Rd: Read, R: Rng + ?Sized>(
    reader: Rd,
    id_strategy: IdStrategy,
    rng: &mut R,
) -> Result<Vec<Meal>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let id_idx = headers.iter().position(|h| h.trim() == ID_COL);
    let name_idx = column_index(&headers, NAME_COL)?;
    let protein_idx = column_index(&headers, PROTEIN_COL)?;
    let carb_idx = column_index(&headers, CARB_COL)?;
    let fat_idx = column_index(&headers, FAT_COL)?;

    let mut meals = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result?;

        let name = record.get(name_idx).unwrap_or_default().trim().to_string();
        if name.is_empty() {
            debug!(row_index, "Skipping catalog row with empty name");
            continue;
        }

        let id = id_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| id_strategy.generate(rng));

        let macros = MacroBreakdown::new(
            record.get(protein_idx).map(parse_grams).unwrap_or_default(),
            record.get(carb_idx).map(parse_grams).unwrap_or_default(),
            record.get(fat_idx).map(parse_grams).unwrap_or_default(),
        );
        meals.push(Meal::new(id, name, macros));
    }

    Ok(meals)
}

/// Reads a JSON array of meals. Cached calories are recomputed from the macros.
pub fn parse_meal_catalog_json(content: &str) -> Result<Vec<Meal>> {
    let meals: Vec<Meal> = serde_json::from_str(content)?;
    Ok(meals.into_iter().map(Meal::normalized).collect())
}

/// Parses catalog content already read from `source`, failing on an empty catalog.
pub fn parse_meal_catalog<R: Rng + ?Sized>(
    content: &str,
    format: CatalogFormat,
    source: &str,
    id_strategy: IdStrategy,
    rng: &mut R,
) -> Result<Vec<Meal>> {
    let meals = match format {
        CatalogFormat::Json => parse_meal_catalog_json(content)?,
        CatalogFormat::Csv => parse_meal_catalog_csv(content.as_bytes(), id_strategy, rng)?,
    };
    if meals.is_empty() {
        return Err(PlannerError::EmptyCatalog(source.to_string()));
    }
    info!(count = meals.len(), source, "Meal catalog loaded");
    Ok(meals)
}

/// Loads a meal catalog from disk; `.json` files hold a meal array, anything else is CSV.
pub fn load_meal_catalog<R: Rng + ?Sized>(
    path: &Path,
    id_strategy: IdStrategy,
    rng: &mut R,
) -> Result<Vec<Meal>> {
    let content = std::fs::read_to_string(path)?;
    parse_meal_catalog(
        &content,
        CatalogFormat::from_path(path),
        &path.display().to_string(),
        id_strategy,
        rng,
    )
}
