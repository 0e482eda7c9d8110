use clap::Parser;
use meal_planner::config::seed_from_clock;
use meal_planner::core::ConfigProvider;
use meal_planner::utils::{logger, validation::Validate};
use meal_planner::{LocalStorage, PlannerEngine, PlannerPipeline, TomlConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(name = "toml-planner")]
#[command(about = "Meal planner driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "planner.toml")]
    config: String,

    /// Override the difficulty preference from config
    #[arg(long)]
    difficulty: Option<String>,

    /// Override the random seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Generate and print the plan without appending it to history
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based meal planner");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(difficulty) = args.difficulty {
        tracing::info!("🔧 Difficulty overridden to: {}", difficulty);
        config.set_difficulty(difficulty);
    }
    if let Some(seed) = args.seed {
        config.set_seed(seed);
    }
    config.dry_run = args.dry_run;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        "✅ Catalog: {}, history: {}, difficulty: {}",
        config.catalog_path(),
        config.history_path(),
        config.difficulty()
    );

    let seed = config.seed().unwrap_or_else(seed_from_clock);
    tracing::debug!("Random seed: {}", seed);

    let storage = LocalStorage::new(".".to_string());
    let pipeline = PlannerPipeline::new(storage, config, SmallRng::seed_from_u64(seed));
    let engine = PlannerEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            print!("{}", report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code().max(1));
        }
    }
}
