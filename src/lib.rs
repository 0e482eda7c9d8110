pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{
    engine::{PlanReport, PlannerEngine},
    generator::WeekGenerator,
    pipeline::PlannerPipeline,
};
pub use crate::domain::model::{
    Catalog, Difficulty, Dish, GeneratedWeek, HistoryWindow, PlanWarning, Preference, WeekPlan,
};
pub use crate::utils::error::{PlannerError, Result};
