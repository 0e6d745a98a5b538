//! Minion mechanics for the Vivarium simulation.
//!
//! This crate holds every rule that operates on minion state without doing
//! I/O. It sits between `vivarium-types` (the data) and `vivarium-core`
//! (the tick loop and orchestration).
//!
//! # Modules
//!
//! - [`actions`] -- Per-tick behavior execution ([`ActionOutcome`])
//! - [`combat`] -- Damage formula and strike resolution
//! - [`config`] -- Tunable parameters ([`VitalsConfig`], [`BehaviorConfig`],
//!   [`InteractionConfig`])
//! - [`death`] -- Death conditions ([`DeathCause`], [`DeathRecord`])
//! - [`movement`] -- Straight-line movement and wander targets
//! - [`policy`] -- The local behavior state machine
//! - [`registry`] -- The live population ([`MinionRegistry`])
//! - [`reproduction`] -- Partner selection, trait merging and births
//! - [`vitals`] -- Metabolism, aging, growth and cooldowns

pub mod actions;
pub mod combat;
pub mod config;
pub mod death;
pub mod movement;
pub mod policy;
pub mod registry;
pub mod reproduction;
pub mod vitals;

pub use actions::{ActionContext, ActionOutcome, execute_behavior};
pub use config::{BehaviorConfig, InteractionConfig, VitalsConfig};
pub use death::{DeathCause, DeathRecord, check_death};
pub use registry::MinionRegistry;
