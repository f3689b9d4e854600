//! Headless host for the colony simulation.
//!
//! Loads configuration, founds or restores a colony, and drives its tick
//! gate from a timer until the colony falls, the tick limit is reached or
//! the process receives Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the path given as the first argument, the
//!    `COLONY_CONFIG` environment variable, or `colony-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Found a new colony, then replace it with the save file if one loads
//! 4. Run the host loop
//! 5. Save on shutdown or tick limit; log the summary on game over

mod error;
mod runner;
mod sink;

use std::path::PathBuf;

use colony_core::{Colony, SimulationConfig};
use colony_store::JsonFileStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::runner::EndReason;
use crate::sink::TracingSink;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "colony-config.yaml";

/// Environment variable overriding the configuration path.
const CONFIG_ENV_VAR: &str = "COLONY_CONFIG";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, logging or colony setup fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_path, config_found) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config)?;
    info!("colony-engine starting");
    if config_found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        seed = config.world.seed,
        difficulty = ?config.world.difficulty,
        starting_survivors = config.world.starting_survivors,
        save_path = config.persistence.save_path,
        "Simulation configured"
    );

    // 3. Found or restore the colony.
    let store = JsonFileStore::new(&config.persistence.save_path);
    let mut colony = Colony::new(config, Box::new(store), Box::new(TracingSink))
        .map_err(EngineError::from)?;
    if !colony.load_game() {
        info!(
            survivors = colony.state().population(),
            "Starting a new colony"
        );
    }

    // 4. Run the host loop.
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(%err, "Ctrl-C handler unavailable, running until the game ends");
            std::future::pending::<()>().await;
        }
    };
    let result = runner::run(&mut colony, shutdown).await;
    runner::log_run_end(&result);

    // 5. Persist or report.
    match result.end_reason {
        EndReason::Shutdown | EndReason::MaxTicksReached => {
            if !colony.save() {
                warn!("Final save failed");
            }
        }
        EndReason::GameOver => {
            let summary = serde_json::to_string(&colony.summarize()).map_err(EngineError::from)?;
            info!(%summary, "Colony summary");
        }
    }

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "colony-engine shutdown complete"
    );
    Ok(())
}

/// Resolve the config path and load it, falling back to defaults when the
/// file does not exist.
fn load_config() -> Result<(SimulationConfig, PathBuf, bool), EngineError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        Ok((config, path, true))
    } else {
        Ok((SimulationConfig::default(), path, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(config: &SimulationConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}
