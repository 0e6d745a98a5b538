//! Shared type definitions for the Vivarium minion simulation.
//!
//! Everything that crosses a crate or process boundary lives here: entity
//! identifiers, the entity records themselves, the decision oracle wire
//! payloads and the command vocabulary. Types flow downstream to
//! `TypeScript` via `ts-rs` for the renderer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for minions, resources and families
//! - [`enums`] -- Behavior states, resource kinds, gender
//! - [`structs`] -- Positions, genetics, minions and resources
//! - [`oracle`] -- Decision oracle request/response payloads
//! - [`command`] -- Commands accepted from external collaborators

pub mod command;
pub mod enums;
pub mod ids;
pub mod oracle;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use command::WorldCommand;
pub use enums::{BehaviorState, Gender, ResourceKind};
pub use ids::{FamilyId, MinionId, ResourceId};
pub use oracle::{DecisionRequest, DecisionResponse, NEARBY_CATEGORIES, OracleReply, OracleStats};
pub use structs::{Genetics, Minion, MinionView, Position, Resource};
