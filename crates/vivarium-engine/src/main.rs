//! Engine binary for the Vivarium simulation.
//!
//! Wires together configuration, world seeding, the decision oracle and
//! the tick loop, then runs until a termination condition is met or the
//! process receives Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `vivarium-config.yaml` (or `VIVARIUM_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulation state and seed the world
//! 4. Select the decision oracle (`ORACLE_URL` set, or silent)
//! 5. Start reading JSON-lines world commands from stdin
//! 6. Run the simulation loop
//! 7. Log the result

mod callback;
mod error;
mod spawner;

use std::io::BufRead;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vivarium_core::config::LoggingConfig;
use vivarium_core::{
    DecisionOracle, RunSettings, SimulationConfig, SimulationResult, SimulationState, StubOracle,
    run_simulation,
};
use vivarium_oracle::{AsyncOracle, OracleClientConfig, create_backend};
use vivarium_types::WorldCommand;

use crate::callback::LoggingCallback;
use crate::error::EngineError;

/// Config file read when `VIVARIUM_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "vivarium-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, world construction or oracle setup
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so report afterwards.
    let config_path = std::env::var("VIVARIUM_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, config_found) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("vivarium-engine starting");
    if config_found {
        info!(
            path = %config_path.display(),
            world_name = config.world.name,
            seed = ?config.world.seed,
            tick_interval_ms = config.world.tick_interval_ms,
            "Configuration loaded"
        );
    } else {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Build the world.
    let mut state = build_state(&config)?;
    spawner::seed_world(&mut state, &config.population);

    // 4. Select the decision oracle.
    let mut oracle = build_oracle()?;

    // 5. Commands from stdin.
    let (command_tx, mut command_rx) = tokio::sync::mpsc::unbounded_channel();
    // A detached thread: a blocking stdin read must not hold up shutdown.
    std::thread::spawn(move || read_commands(&command_tx));

    // 6. Run.
    let settings = RunSettings::from_config(&config);
    let report_every = 1000_u64
        .checked_div(settings.tick_interval.as_millis().try_into().unwrap_or(u64::MAX))
        .unwrap_or(1);
    let mut callback = LoggingCallback::new(report_every);

    info!(
        max_ticks = settings.max_ticks,
        stop_on_extinction = settings.stop_on_extinction,
        population = state.minions.len(),
        "Entering tick loop"
    );

    tokio::select! {
        result = run_simulation(
            &mut state,
            oracle.as_mut(),
            &mut command_rx,
            settings,
            &mut callback,
        ) => log_result(&result),
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => info!("Ctrl-C received, stopping"),
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C, stopping"),
        },
    }

    info!("vivarium-engine shutdown complete");
    Ok(())
}

/// Load configuration from `path`, falling back to defaults when absent.
///
/// Returns the configuration and whether the file existed.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        Ok((SimulationConfig::from_file(path)?, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Build the empty simulation state.
fn build_state(config: &SimulationConfig) -> Result<SimulationState, EngineError> {
    let state = SimulationState::new(config)?;
    info!(
        width = state.bounds.width(),
        height = state.bounds.height(),
        margin = state.bounds.margin(),
        "World created"
    );
    Ok(state)
}

/// Pick the oracle: the remote client when `ORACLE_URL` is set, otherwise
/// a silent stub so minions run on local policy alone.
fn build_oracle() -> Result<Box<dyn DecisionOracle>, EngineError> {
    let Some(oracle_config) = OracleClientConfig::from_env()? else {
        info!("ORACLE_URL not set, running without a decision oracle");
        return Ok(Box::new(StubOracle::silent()));
    };

    let backend = create_backend(&oracle_config)?;
    let oracle = AsyncOracle::new(backend, oracle_config.max_concurrent)?;
    info!(
        backend = oracle.backend_name(),
        url = oracle_config.url,
        model = oracle_config.model,
        timeout_ms = oracle_config.timeout.as_millis(),
        max_concurrent = oracle_config.max_concurrent,
        "Decision oracle configured"
    );
    Ok(Box::new(oracle))
}

/// Forward JSON-lines [`WorldCommand`]s from stdin to the tick loop.
///
/// Malformed lines are logged and skipped. Ends at EOF or when the loop
/// stops listening.
fn read_commands(tx: &UnboundedSender<WorldCommand>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read command input");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<WorldCommand>(trimmed) {
            Ok(command) => {
                if tx.send(command).is_err() {
                    break;
                }
            }
            Err(e) => warn!(error = %e, line = trimmed, "Ignoring malformed command"),
        }
    }
}

/// Log how the run ended.
fn log_result(result: &SimulationResult) {
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_population = result.final_summary.as_ref().map(|s| s.population),
        "Simulation ended"
    );
}
