pub mod cli;
pub mod toml_config;

use crate::adapters::catalog::SUPPORTED_EXTENSIONS;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extensions, validate_path};
use chrono::Utc;
#[cfg(feature = "cli")]
use {
    crate::core::ConfigProvider,
    crate::utils::validation::Validate,
    clap::Parser,
    serde::{Deserialize, Serialize},
};

pub const DEFAULT_HISTORY_PATH: &str = "meal_history.txt";
pub const DEFAULT_DIFFICULTY: &str = "mixed";

/// Seed for the process-wide random source when none is configured.
pub fn seed_from_clock() -> u64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros()) as u64
}

/// Shared checks for anything that names a catalog and a history log. The
/// difficulty is not checked here: any label, blank included, falls back to
/// `mixed` when the plan is generated.
pub(crate) fn validate_sources(catalog_path: &str, history_path: &str) -> Result<()> {
    validate_path("catalog", catalog_path)?;
    validate_file_extensions("catalog", &[catalog_path.to_string()], SUPPORTED_EXTENSIONS)?;
    validate_path("history", history_path)?;
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "meal-planner")]
#[command(about = "Generate a weekly meal plan that avoids the last two weeks' dishes")]
pub struct CliConfig {
    /// Dish catalog (.json or .csv)
    pub catalog: String,

    /// Difficulty preference: easy, medium, hard or mixed
    pub difficulty: String,

    #[arg(long, default_value = DEFAULT_HISTORY_PATH, help = "History log to read and append to")]
    pub history: String,

    #[arg(long, default_value = ".", help = "Directory relative paths are resolved against")]
    pub base_dir: String,

    #[arg(long, help = "Seed for the random source (defaults to the current time)")]
    pub seed: Option<u64>,

    #[arg(long, help = "Generate and print the plan without appending it")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog
    }

    fn history_path(&self) -> &str {
        &self.history
    }

    fn difficulty(&self) -> &str {
        &self.difficulty
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("base_dir", &self.base_dir)?;
        validate_sources(&self.catalog, &self.history)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::model::Preference;

    #[test]
    fn test_parse_positional_arguments() {
        let config = CliConfig::try_parse_from(["meal-planner", "dishes.json", "hard"]).unwrap();
        assert_eq!(config.catalog, "dishes.json");
        assert_eq!(config.difficulty(), "hard");
        assert_eq!(config.history_path(), DEFAULT_HISTORY_PATH);
        assert_eq!(config.seed, None);
        assert!(!config.dry_run());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_both_positionals_are_required() {
        assert!(CliConfig::try_parse_from(["meal-planner", "dishes.json"]).is_err());
    }

    #[test]
    fn test_options() {
        let config = CliConfig::try_parse_from([
            "meal-planner",
            "dishes.csv",
            "easy",
            "--history",
            "plans.log",
            "--seed",
            "42",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(config.history_path(), "plans.log");
        assert_eq!(config.seed, Some(42));
        assert!(config.dry_run());
    }

    #[test]
    fn test_blank_difficulty_is_accepted() {
        for label in ["", "   "] {
            let config = CliConfig::try_parse_from(["meal-planner", "dishes.json", label]).unwrap();
            assert!(config.validate().is_ok());
            assert_eq!(Preference::from_label(config.difficulty()), Preference::Mixed);
        }
    }

    #[test]
    fn test_rejects_unsupported_catalog_extension() {
        let config = CliConfig::try_parse_from(["meal-planner", "dishes.txt", "easy"]).unwrap();
        assert!(config.validate().is_err());
    }
}
