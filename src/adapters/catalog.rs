use crate::domain::model::{Catalog, Difficulty, Dish};
use crate::utils::error::{PlannerError, Result};
use serde::Deserialize;
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(CatalogFormat::Json),
            Some("csv") => Ok(CatalogFormat::Csv),
            _ => Err(PlannerError::InvalidConfigValueError {
                field: "catalog".to_string(),
                value: path.to_string(),
                reason: format!(
                    "Unsupported catalog format. Allowed extensions: {}",
                    SUPPORTED_EXTENSIONS.join(", ")
                ),
            }),
        }
    }
}

/// A catalog record before validation.
#[derive(Debug, Deserialize)]
struct RawDish {
    name: String,
    difficulty: String,
}

impl RawDish {
    fn into_dish(self, index: usize) -> Result<Dish> {
        let difficulty: Difficulty = self
            .difficulty
            .parse()
            .map_err(|reason| PlannerError::InvalidDish { index, reason })?;
        Dish::new(&self.name, difficulty).map_err(|reason| PlannerError::InvalidDish { index, reason })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    List(Vec<RawDish>),
    Wrapped { dishes: Vec<RawDish> },
}

/// Decodes and validates a catalog. Fails on the first malformed record.
pub fn decode_catalog(bytes: &[u8], format: CatalogFormat) -> Result<Catalog> {
    let raw = match format {
        CatalogFormat::Json => decode_json(bytes)?,
        CatalogFormat::Csv => decode_csv(bytes)?,
    };
    tracing::debug!("Decoded {} raw catalog records", raw.len());

    let dishes = raw
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_dish(index))
        .collect::<Result<Vec<_>>>()?;

    Catalog::new(dishes)
}

fn decode_json(bytes: &[u8]) -> Result<Vec<RawDish>> {
    let catalog: JsonCatalog = serde_json::from_slice(bytes)?;
    Ok(match catalog {
        JsonCatalog::List(dishes) => dishes,
        JsonCatalog::Wrapped { dishes } => dishes,
    })
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<RawDish>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut records = Vec::new();
    for record in reader.deserialize::<RawDish>() {
        records.push(record?);
    }
    Ok(records)
}
