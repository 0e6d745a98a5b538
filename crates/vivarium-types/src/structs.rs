//! Core entity structs: positions, genetics, minions and resources.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BehaviorState, Gender, ResourceKind};
use crate::ids::{FamilyId, MinionId, ResourceId};

/// A point in world space. The y axis grows downward, matching screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Move up to `max_step` units straight toward `target`.
    ///
    /// Never overshoots: when the target is within `max_step` the result is
    /// the target itself.
    pub fn step_toward(self, target: Self, max_step: f64) -> Self {
        let distance = self.distance_to(target);
        if distance <= max_step || distance <= f64::EPSILON {
            return target;
        }
        let ratio = max_step / distance;
        Self {
            x: (target.x - self.x).mul_add(ratio, self.x),
            y: (target.y - self.y).mul_add(ratio, self.y),
        }
    }
}

/// Inheritable traits supplied when a minion is spawned.
///
/// Spawn genetics are trusted as given; nothing here is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Genetics {
    /// Binary gender.
    pub gender: Gender,
    /// Free-form trait tags (e.g. `"aggressive"`).
    #[serde(default)]
    pub traits: Vec<String>,
    /// Attack strength.
    pub atk: f64,
    /// Defense. Halved when absorbing damage.
    pub def: f64,
    /// Movement speed in world units per tick delta.
    pub speed: f64,
    /// Maximum and starting hit points.
    pub max_hp: f64,
    /// Family to join. A fresh lineage is founded when absent.
    #[serde(default)]
    pub family_id: Option<FamilyId>,
}

/// One simulated agent.
///
/// Vitals live on a conceptual 0 to 100 scale, but hunger and thirst are
/// never clamped upward: crossing 100 is what removes the minion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Minion {
    /// Stable identity.
    pub id: MinionId,
    /// Lineage key, inherited from the mother.
    pub family_id: FamilyId,
    /// 1 for spawned founders, mother's generation plus one for offspring.
    pub generation: u32,
    /// Binary gender.
    pub gender: Gender,
    /// Trait tags.
    pub traits: Vec<String>,
    /// Current hit points. The minion dies at 0.
    pub hp: f64,
    /// Hit point ceiling.
    pub max_hp: f64,
    /// Hunger. Starvation at 100.
    pub hunger: f64,
    /// Thirst. Dehydration at 100.
    pub thirst: f64,
    /// Energy, drained while awake and restored while sleeping.
    pub energy: f64,
    /// Attack strength.
    pub atk: f64,
    /// Defense.
    pub def: f64,
    /// Movement speed in world units per tick delta.
    pub speed: f64,
    /// Age in simulation years. Stops growing at the age ceiling.
    pub age: f64,
    /// Current behavior.
    pub state: BehaviorState,
    /// Current location.
    pub position: Position,
    /// Pending movement target, if any.
    pub move_target: Option<Position>,
    /// Minion currently being chased for combat or breeding, if any.
    pub interaction_target: Option<MinionId>,
    /// Ticks until this minion may breed again.
    pub mate_cooldown: f64,
    /// Ticks until this minion may strike again.
    pub attack_cooldown: f64,
    /// Ticks until the next decision oracle request.
    pub oracle_cooldown: f64,
    /// Render scale, grown from juvenile to adult size.
    pub scale: f64,
    /// Remaining ticks of the hit pulse shown after taking damage.
    pub hit_flash: f64,
    /// RGB tint used by the renderer.
    pub tint: u32,
}

impl Minion {
    /// Build a newborn founder from spawn genetics.
    ///
    /// Starts at full hp, zero hunger and thirst, full energy, age 0 and
    /// generation 1, wandering. Render scale is left at 0 for the growth
    /// step to fill in.
    pub fn new(genetics: Genetics, position: Position) -> Self {
        Self {
            id: MinionId::new(),
            family_id: genetics.family_id.unwrap_or_default(),
            generation: 1,
            gender: genetics.gender,
            traits: genetics.traits,
            hp: genetics.max_hp,
            max_hp: genetics.max_hp,
            hunger: 0.0,
            thirst: 0.0,
            energy: 100.0,
            atk: genetics.atk,
            def: genetics.def,
            speed: genetics.speed,
            age: 0.0,
            state: BehaviorState::Wander,
            position,
            move_target: None,
            interaction_target: None,
            mate_cooldown: 0.0,
            attack_cooldown: 0.0,
            oracle_cooldown: 0.0,
            scale: 0.0,
            hit_flash: 0.0,
            tint: 0x00FF_FFFF,
        }
    }

    /// Switch behavior. A real change drops both pending targets.
    ///
    /// Returns `true` if the state actually changed.
    pub fn set_state(&mut self, state: BehaviorState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        self.move_target = None;
        self.interaction_target = None;
        true
    }

    /// Status label shown above the sprite, e.g. `"EAT\nH:72%"`.
    pub fn status_label(&self) -> String {
        format!("{}\nH:{:.0}%", self.state, self.hunger.floor())
    }

    /// Draw-order key. Minions lower on screen are drawn on top.
    pub const fn depth_key(&self) -> f64 {
        self.position.y
    }
}

/// A minion as the renderer receives it: the full record plus the derived
/// display fields, flattened into one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MinionView {
    /// The entity record.
    #[serde(flatten)]
    pub minion: Minion,
    /// Label drawn above the sprite.
    pub status_label: String,
    /// Draw-order key.
    pub depth_key: f64,
}

impl From<&Minion> for MinionView {
    fn from(minion: &Minion) -> Self {
        Self {
            status_label: minion.status_label(),
            depth_key: minion.depth_key(),
            minion: minion.clone(),
        }
    }
}

/// A static world object. Never mutated after placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Resource {
    /// Stable identity.
    pub id: ResourceId,
    /// What the resource provides.
    pub kind: ResourceKind,
    /// Where it sits.
    pub position: Position,
    /// Render scale supplied by the caller.
    pub size: f64,
}
