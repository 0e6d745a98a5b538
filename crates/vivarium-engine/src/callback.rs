//! Tick callback that reports simulation progress through `tracing`.
//!
//! Per-tick counters are folded into a window and logged as one summary
//! line every `report_every` ticks, which keeps a 60 Hz loop readable.

use tracing::{debug, info, warn};
use vivarium_core::{CommandOutcome, SimulationState, TickCallback, TickSummary};
use vivarium_types::{MinionView, WorldCommand};

/// Counters accumulated since the last report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowTotals {
    /// Ticks folded into this window.
    pub ticks: u64,
    /// Deaths.
    pub deaths: u64,
    /// Births.
    pub births: u64,
    /// Strikes landed.
    pub strikes: u64,
    /// Meals eaten.
    pub meals: u64,
    /// Drinks taken.
    pub drinks: u64,
    /// Oracle requests submitted.
    pub oracle_requests: u64,
    /// Oracle replies applied.
    pub oracle_replies: u64,
}

impl WindowTotals {
    fn absorb(&mut self, summary: &TickSummary) {
        let count = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);
        self.ticks = self.ticks.saturating_add(1);
        self.deaths = self.deaths.saturating_add(count(summary.deaths.len()));
        self.births = self.births.saturating_add(count(summary.births.len()));
        self.strikes = self.strikes.saturating_add(u64::from(summary.strikes));
        self.meals = self.meals.saturating_add(u64::from(summary.meals));
        self.drinks = self.drinks.saturating_add(u64::from(summary.drinks));
        self.oracle_requests = self
            .oracle_requests
            .saturating_add(u64::from(summary.oracle_requests));
        self.oracle_replies = self
            .oracle_replies
            .saturating_add(u64::from(summary.oracle_replies_applied));
    }
}

/// Callback that logs a periodic population summary.
#[derive(Debug)]
pub struct LoggingCallback {
    report_every: u64,
    window: WindowTotals,
}

impl LoggingCallback {
    /// Create a callback reporting every `report_every` ticks (at least 1).
    pub fn new(report_every: u64) -> Self {
        Self {
            report_every: report_every.max(1),
            window: WindowTotals::default(),
        }
    }
}

impl TickCallback for LoggingCallback {
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState) {
        self.window.absorb(summary);

        for death in &summary.deaths {
            debug!(
                tick = summary.tick,
                minion_id = %death.minion_id,
                cause = ?death.cause,
                "Death recorded"
            );
        }

        if self.window.ticks < self.report_every {
            return;
        }

        let window = std::mem::take(&mut self.window);
        info!(
            tick = summary.tick,
            population = summary.population,
            resources = state.resources.len(),
            ticks = window.ticks,
            births = window.births,
            deaths = window.deaths,
            strikes = window.strikes,
            meals = window.meals,
            drinks = window.drinks,
            oracle_requests = window.oracle_requests,
            oracle_replies = window.oracle_replies,
            "Simulation progress"
        );
    }

    fn on_command(&mut self, command: &WorldCommand, outcome: &CommandOutcome) {
        match outcome {
            CommandOutcome::Selected {
                minion: Some(view),
            } => match selection_json(view) {
                Ok(json) => info!(minion = %json, "Minion selected"),
                Err(e) => warn!(error = %e, "Failed to serialize selected minion"),
            },
            _ => info!(command = ?command, outcome = ?outcome, "Command applied"),
        }
    }
}

/// Serialize a selected minion for the renderer.
fn selection_json(view: &MinionView) -> Result<String, serde_json::Error> {
    serde_json::to_string(view)
}
