use crate::adapters::catalog::{decode_catalog, CatalogFormat};
use crate::core::generator::WeekGenerator;
use crate::core::history::read_history;
use crate::core::writer::format_plan;
use crate::core::{ConfigProvider, GeneratedWeek, Pipeline, PlanInputs, Storage};
use crate::domain::model::{Difficulty, HistoryWindow, Preference};
use crate::utils::error::{PlannerError, Result};
use chrono::Utc;
use rand::Rng;
use std::sync::{Mutex, PoisonError};

/// Catalog + history in, one appended week out.
pub struct PlannerPipeline<S: Storage, C: ConfigProvider, R: Rng + Send> {
    storage: S,
    config: C,
    rng: Mutex<R>,
}

impl<S: Storage, C: ConfigProvider, R: Rng + Send> PlannerPipeline<S, C, R> {
    /// `rng` is the process-wide random source; it is never reseeded here.
    pub fn new(storage: S, config: C, rng: R) -> Self {
        Self {
            storage,
            config,
            rng: Mutex::new(rng),
        }
    }

    async fn load_history(&self) -> Result<HistoryWindow> {
        let path = self.config.history_path();
        match self.storage.read_file(path).await {
            Ok(bytes) => {
                let log = String::from_utf8_lossy(&bytes);
                let history = read_history(&log)?;
                tracing::info!("Loaded {} prior week(s) from {}", history.len(), path);
                Ok(history)
            }
            Err(PlannerError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No history log at {}, starting fresh", path);
                Ok(HistoryWindow::default())
            }
            Err(e) => {
                tracing::warn!("Could not read history log {}: {}; ignoring history", path, e);
                Ok(HistoryWindow::default())
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: Rng + Send> Pipeline for PlannerPipeline<S, C, R> {
    async fn extract(&self) -> Result<PlanInputs> {
        let catalog_path = self.config.catalog_path();
        let format = CatalogFormat::from_path(catalog_path)?;

        tracing::debug!("Reading {:?} catalog from: {}", format, catalog_path);
        let bytes = self.storage.read_file(catalog_path).await?;
        let catalog = decode_catalog(&bytes, format)?;
        tracing::info!("Loaded {} dishes from {}", catalog.len(), catalog_path);
        tracing::debug!(
            "Catalog tiers: easy={}, medium={}, hard={}",
            catalog.count_by_difficulty(Difficulty::Easy),
            catalog.count_by_difficulty(Difficulty::Medium),
            catalog.count_by_difficulty(Difficulty::Hard)
        );

        let history = self.load_history().await?;
        let preference = Preference::from_label(self.config.difficulty());

        Ok(PlanInputs {
            catalog,
            history,
            preference,
        })
    }

    async fn transform(&self, inputs: PlanInputs) -> Result<GeneratedWeek> {
        let generator = WeekGenerator::new(&inputs.catalog, &inputs.history);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generator.generate(inputs.preference, &mut *rng)
    }

    async fn load(&self, week: &GeneratedWeek) -> Result<Option<String>> {
        if self.config.dry_run() {
            tracing::info!("Dry run: plan not appended to history");
            return Ok(None);
        }

        let path = self.config.history_path();
        let record = format_plan(&week.plan, Utc::now());
        tracing::debug!("Appending {} bytes to {}", record.len(), path);
        self.storage.append_file(path, record.as_bytes()).await?;

        Ok(Some(path.to_string()))
    }
}
