//! Tick scheduling and orchestration for the Vivarium simulation.
//!
//! # Modules
//!
//! - [`command`] -- Applying external [`WorldCommand`]s to the world
//! - [`config`] -- Typed `vivarium-config.yaml` loading
//! - [`decision`] -- The [`DecisionOracle`] protocol and [`StubOracle`]
//! - [`runner`] -- The async loop driving ticks on a wall-clock interval
//! - [`tick`] -- One four-phase simulation step ([`run_tick`])
//!
//! [`WorldCommand`]: vivarium_types::WorldCommand

pub mod command;
pub mod config;
pub mod decision;
pub mod runner;
pub mod tick;

pub use command::{CommandOutcome, apply_command};
pub use config::{ConfigError, SimulationConfig};
pub use decision::{DecisionOracle, StubOracle};
pub use runner::{
    NoOpCallback, RunSettings, SimulationEndReason, SimulationResult, TickCallback,
    run_simulation,
};
pub use tick::{SimulationState, TickSummary, run_tick};
