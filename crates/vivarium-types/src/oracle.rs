//! Wire payloads exchanged with the decision oracle.
//!
//! The oracle is an external service that nudges a minion's behavior. The
//! simulation sends a [`DecisionRequest`] and reads back a
//! [`DecisionResponse`]; whichever transport carries them hands the result
//! to the tick loop as an [`OracleReply`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BehaviorState, ResourceKind};
use crate::ids::MinionId;
use crate::structs::Minion;

/// Nearby categories reported with every request.
///
/// The list is static: no spatial query backs it.
pub const NEARBY_CATEGORIES: [&str; 4] = [
    ResourceKind::Food.category(),
    ResourceKind::Water.category(),
    ResourceKind::Obstacle.category(),
    "minion",
];

/// Snapshot of a minion's vitals and stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OracleStats {
    /// Current hunger.
    pub hunger: f64,
    /// Current thirst.
    pub thirst: f64,
    /// Current energy.
    pub energy: f64,
    /// Current hit points.
    pub hp: f64,
    /// Attack strength.
    pub atk: f64,
    /// Defense.
    pub def: f64,
    /// Movement speed.
    pub speed: f64,
    /// Age.
    pub age: f64,
}

/// Request body sent to the decision oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DecisionRequest {
    /// Current stats of the asking minion.
    pub stats: OracleStats,
    /// Trait tags of the asking minion.
    pub traits: Vec<String>,
    /// Categories of things in the world.
    pub nearby: Vec<String>,
}

impl DecisionRequest {
    /// Build the request for `minion` from its current state.
    pub fn for_minion(minion: &Minion) -> Self {
        Self {
            stats: OracleStats {
                hunger: minion.hunger,
                thirst: minion.thirst,
                energy: minion.energy,
                hp: minion.hp,
                atk: minion.atk,
                def: minion.def,
                speed: minion.speed,
                age: minion.age,
            },
            traits: minion.traits.clone(),
            nearby: NEARBY_CATEGORIES.iter().map(|c| (*c).to_owned()).collect(),
        }
    }
}

/// Response body returned by the decision oracle.
///
/// Only `action` is read. A missing or unrecognized action means
/// [`BehaviorState::Wander`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DecisionResponse {
    /// Requested behavior name, e.g. `"SLEEP"`.
    #[serde(default)]
    pub action: Option<String>,
}

impl DecisionResponse {
    /// The behavior this response asks for, falling back to wandering.
    pub fn behavior(&self) -> BehaviorState {
        self.action
            .as_deref()
            .and_then(BehaviorState::parse_action)
            .unwrap_or_default()
    }
}

/// A resolved oracle answer addressed to one minion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OracleReply {
    /// The minion that asked.
    pub minion_id: MinionId,
    /// The behavior to adopt.
    pub state: BehaviorState,
}
