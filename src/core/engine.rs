use crate::core::writer::format_days;
use crate::core::{GeneratedWeek, Pipeline};
use crate::utils::error::Result;
use std::fmt;

/// Outcome of one planner run. A failed append is recorded in `save_error`
/// instead of failing the run, since the plan itself is still valid.
#[derive(Debug)]
pub struct PlanReport {
    pub week: GeneratedWeek,
    pub saved_to: Option<String>,
    pub save_error: Option<String>,
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "🍽️  Weekly plan ({}/{} slots filled):",
            self.week.plan.filled_count(),
            self.week.plan.slots().len()
        )?;
        write!(f, "{}", format_days(&self.week.plan))?;
        for warning in &self.week.warnings {
            writeln!(f, "⚠️  {}", warning)?;
        }
        match (&self.saved_to, &self.save_error) {
            (Some(path), _) => writeln!(f, "📁 Plan appended to: {}", path),
            (None, Some(error)) => writeln!(f, "❌ Plan was not saved: {}", error),
            (None, None) => writeln!(f, "🔍 Dry run, plan not saved"),
        }
    }
}

pub struct PlannerEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PlannerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<PlanReport> {
        tracing::info!("Starting meal plan generation");

        let inputs = self.pipeline.extract().await?;
        tracing::debug!(
            "Generating a '{}' week from {} dishes against {} prior week(s)",
            inputs.preference,
            inputs.catalog.len(),
            inputs.history.len()
        );

        let week = self.pipeline.transform(inputs).await?;
        tracing::info!(
            "Generated plan with {}/{} slots filled",
            week.plan.filled_count(),
            week.plan.slots().len()
        );

        let (saved_to, save_error) = match self.pipeline.load(&week).await {
            Ok(saved_to) => {
                if let Some(path) = &saved_to {
                    tracing::info!("Plan appended to {}", path);
                }
                (saved_to, None)
            }
            Err(e) => {
                tracing::warn!("Plan generated but could not be saved: {}", e);
                (None, Some(e.user_friendly_message()))
            }
        };

        Ok(PlanReport {
            week,
            saved_to,
            save_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlanInputs;
    use crate::domain::model::{
        Catalog, Difficulty, Dish, HistoryWindow, Preference, TierCounts, WeekPlan,
    };
    use crate::utils::error::PlannerError;

    struct StubPipeline {
        fail_extract: bool,
        fail_load: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<PlanInputs> {
            if self.fail_extract {
                return Err(PlannerError::CatalogError {
                    message: "catalog contains no dishes".to_string(),
                });
            }
            Ok(PlanInputs {
                catalog: Catalog::new(vec![Dish::new("Soup", Difficulty::Easy).unwrap()])?,
                history: HistoryWindow::default(),
                preference: Preference::Easy,
            })
        }

        async fn transform(&self, inputs: PlanInputs) -> Result<GeneratedWeek> {
            let names = inputs
                .catalog
                .dishes()
                .iter()
                .map(|d| d.name.clone())
                .collect();
            Ok(GeneratedWeek {
                plan: WeekPlan::from_filled(names)?,
                targets: TierCounts::new(1, 0, 0),
                available: TierCounts::new(1, 0, 0),
                warnings: vec![],
            })
        }

        async fn load(&self, _week: &GeneratedWeek) -> Result<Option<String>> {
            if self.fail_load {
                return Err(PlannerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            Ok(Some("history.txt".to_string()))
        }
    }

    #[tokio::test]
    async fn test_run_reports_saved_path() {
        let engine = PlannerEngine::new(StubPipeline {
            fail_extract: false,
            fail_load: false,
        });
        let report = engine.run().await.unwrap();
        assert_eq!(report.saved_to.as_deref(), Some("history.txt"));
        assert!(report.save_error.is_none());
        assert_eq!(report.week.plan.slot(0), Some("Soup"));

        let rendered = report.to_string();
        assert!(rendered.contains("Day 1: Soup, "));
        assert!(rendered.contains("Plan appended to: history.txt"));
    }

    #[tokio::test]
    async fn test_save_failure_keeps_plan() {
        let engine = PlannerEngine::new(StubPipeline {
            fail_extract: false,
            fail_load: true,
        });
        let report = engine.run().await.unwrap();
        assert!(report.saved_to.is_none());
        assert!(report.save_error.is_some());
        assert_eq!(report.week.plan.filled_count(), 1);
    }

    #[tokio::test]
    async fn test_extract_failure_aborts() {
        let engine = PlannerEngine::new(StubPipeline {
            fail_extract: true,
            fail_load: false,
        });
        assert!(engine.run().await.is_err());
    }
}
