use clap::Parser;
use meal_planner::config::seed_from_clock;
use meal_planner::utils::{logger, validation::Validate};
use meal_planner::{CliConfig, LocalStorage, PlannerEngine, PlannerPipeline};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting meal-planner");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // Seeded once per process.
    let seed = config.seed.unwrap_or_else(seed_from_clock);
    tracing::debug!("Random seed: {}", seed);

    let storage = LocalStorage::new(config.base_dir.clone());
    let pipeline = PlannerPipeline::new(storage, config, SmallRng::seed_from_u64(seed));
    let engine = PlannerEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            print!("{}", report);
        }
        Err(e) => {
            tracing::error!(
                "❌ Meal planning failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
