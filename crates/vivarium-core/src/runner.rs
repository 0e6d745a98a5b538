//! Simulation loop runner.
//!
//! [`run_simulation`] drives [`run_tick`] on a fixed wall-clock interval.
//! Before each tick it applies every command queued by external
//! collaborators. It stops after `max_ticks` or, when enabled, once the
//! population is extinct. Without either bound it runs until its future is
//! dropped (the engine does this on Ctrl-C).
//!
//! [`run_tick`]: crate::tick::run_tick

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use vivarium_types::WorldCommand;

use crate::command::{CommandOutcome, apply_command};
use crate::config::SimulationConfig;
use crate::decision::DecisionOracle;
use crate::tick::{self, SimulationState, TickSummary};

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// All minions are dead.
    Extinction,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Loop timing and termination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Wall-clock time between ticks.
    pub tick_interval: Duration,
    /// Stop after this many ticks. `0` means unbounded.
    pub max_ticks: u64,
    /// Stop once the population is empty.
    pub stop_on_extinction: bool,
}

impl RunSettings {
    /// Derive settings from the loaded configuration.
    ///
    /// A zero interval is raised to one millisecond.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.world.tick_interval_ms.max(1)),
            max_ticks: config.simulation.max_ticks,
            stop_on_extinction: config.simulation.stop_on_extinction,
        }
    }
}

/// Callback invoked around each tick.
///
/// Implementations can forward summaries to a renderer, log progress, or
/// collect statistics.
pub trait TickCallback: Send {
    /// Called after a tick completes.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);

    /// Called after a queued command has been applied.
    fn on_command(&mut self, _command: &WorldCommand, _outcome: &CommandOutcome) {}
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Arguments
///
/// * `state` - Mutable simulation state
/// * `oracle` - Source of asynchronous behavior overrides
/// * `commands` - Queue of external commands, drained before every tick
/// * `settings` - Interval and termination bounds
/// * `callback` - Called after each command and each tick
pub async fn run_simulation(
    state: &mut SimulationState,
    oracle: &mut dyn DecisionOracle,
    commands: &mut UnboundedReceiver<WorldCommand>,
    settings: RunSettings,
    callback: &mut dyn TickCallback,
) -> SimulationResult {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;
    let mut interval = tokio::time::interval(settings.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        max_ticks = settings.max_ticks,
        tick_interval_ms = u64::try_from(settings.tick_interval.as_millis()).unwrap_or(u64::MAX),
        stop_on_extinction = settings.stop_on_extinction,
        population = state.minions.len(),
        "Simulation starting"
    );

    loop {
        interval.tick().await;

        // --- Drain commands ---
        while let Ok(command) = commands.try_recv() {
            let outcome = apply_command(state, command.clone());
            debug!(?command, ?outcome, "Command applied");
            callback.on_command(&command, &outcome);
        }

        // --- Execute tick ---
        let summary = tick::run_tick(state, oracle);
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary, state);
        let extinct = summary.population == 0;
        last_summary = Some(summary);

        // --- Check bounds ---
        let end_reason = if settings.max_ticks > 0 && total_ticks >= settings.max_ticks {
            Some(SimulationEndReason::MaxTicksReached)
        } else if settings.stop_on_extinction && extinct {
            Some(SimulationEndReason::Extinction)
        } else {
            None
        };

        if let Some(end_reason) = end_reason {
            info!(?end_reason, total_ticks, "Simulation ended");
            return SimulationResult {
                end_reason,
                final_summary: last_summary,
                total_ticks,
            };
        }
    }
}
