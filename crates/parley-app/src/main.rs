use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use parley_app::controller::AppController;
use parley_app::logging::init_logging;
use parley_app::profile::ProfileStore;
use parley_app::services::Services;
use parley_app::state::{AppState, load_catalog};
use parley_config::Config;

#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(version, about = "Two-pane translation widget")]
struct Cli {
    /// Load a bare config JSON file instead of a profile
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Profile to load from the user config directory
    #[arg(long, default_value = "main")]
    profile: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_json)?;

    let config = load_config(&cli)?;
    let catalog = load_catalog(&config);
    let services = Services::from_config(&config)?;
    let state = Arc::new(AppState::new(config, catalog));

    let runtime = tokio::runtime::Runtime::new()?;
    let controller = AppController::new(state);
    let mut tasks = {
        let _guard = runtime.enter();
        controller.spawn_tasks(services)
    };

    // Slint owns the main thread until the window closes
    let channels = controller.ui_channels();
    let ui_result = parley_ui::run_ui(channels.events, channels.intents);

    controller.shutdown();
    runtime.block_on(async {
        let drain = async {
            while let Some(result) = tasks.join_next().await {
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::error!("Backend task failed: {e:#}"),
                    Err(e) => tracing::error!("Backend task panicked: {e}"),
                }
            }
        };
        if tokio::time::timeout(Duration::from_secs(2), drain).await.is_err() {
            tracing::warn!("Backend did not stop in time");
        }
    });
    runtime.shutdown_timeout(Duration::from_millis(500));

    tracing::info!("Shutdown complete");
    ui_result
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading config from {}", path.display());
        return Ok(Config::from_json_file(path)?);
    }

    let Some(store) = ProfileStore::user() else {
        tracing::warn!("No user config directory, using defaults");
        return Ok(Config::new());
    };

    if let Err(e) = store.init() {
        tracing::warn!("Failed to initialize profiles: {e:#}");
    }
    let config = store.load(&cli.profile)?;
    tracing::info!("Loaded profile {}", cli.profile);
    Ok(config)
}
