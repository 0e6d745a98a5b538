//! Commands an external collaborator (renderer, UI, script) can send into
//! the simulation.
//!
//! Commands are serialized as internally tagged JSON, e.g.
//! `{"type":"place_resource","kind":"WATER","position":{"x":1,"y":2},"size":0.5}`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ResourceKind;
use crate::structs::{Genetics, Position};

/// A world mutation or query requested from outside the tick loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum WorldCommand {
    /// Create a founder minion.
    SpawnMinion {
        /// Caller-supplied genetics.
        genetics: Genetics,
        /// Where to place it.
        position: Position,
    },
    /// Place a static resource.
    PlaceResource {
        /// Resource kind.
        kind: ResourceKind,
        /// Where to place it.
        position: Position,
        /// Render scale.
        size: f64,
    },
    /// Remove the closest minion within `radius` of `position`.
    RemoveMinionNear {
        /// Search center.
        position: Position,
        /// Search radius.
        radius: f64,
    },
    /// Remove the closest resource within `radius` of `position`.
    RemoveResourceNear {
        /// Search center.
        position: Position,
        /// Search radius.
        radius: f64,
    },
    /// Look up the closest minion within `radius` of `position`.
    SelectMinionAt {
        /// Search center.
        position: Position,
        /// Search radius.
        radius: f64,
    },
}
