//! Death conditions for minions.
//!
//! A minion dies when any of these holds, checked in this order:
//! - hit points at or below 0 (injury)
//! - hunger at or above 100 (starvation)
//! - thirst at or above 100 (dehydration)
//!
//! Age never kills. Removal is immediate; nothing is left behind.

use vivarium_types::{FamilyId, Minion, MinionId, Position};

/// Hunger or thirst level that is fatal.
pub const LETHAL_NEED: f64 = 100.0;

/// The cause of a minion's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// Hit points reached 0, always from combat.
    Injury,
    /// Hunger reached the lethal level.
    Starvation,
    /// Thirst reached the lethal level.
    Dehydration,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Injury => write!(f, "injury"),
            Self::Starvation => write!(f, "starvation"),
            Self::Dehydration => write!(f, "dehydration"),
        }
    }
}

/// Check whether a minion meets any death condition.
///
/// Returns `Some(cause)` if the minion is dead, `None` if alive. Only
/// inspects state.
pub const fn check_death(minion: &Minion) -> Option<DeathCause> {
    if minion.hp <= 0.0 {
        return Some(DeathCause::Injury);
    }
    if minion.hunger >= LETHAL_NEED {
        return Some(DeathCause::Starvation);
    }
    if minion.thirst >= LETHAL_NEED {
        return Some(DeathCause::Dehydration);
    }
    None
}

/// Whether a minion is still alive.
pub const fn is_alive(minion: &Minion) -> bool {
    check_death(minion).is_none()
}

/// What was known about a minion at the moment it was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathRecord {
    /// The removed minion.
    pub minion_id: MinionId,
    /// Its lineage.
    pub family_id: FamilyId,
    /// Its generation.
    pub generation: u32,
    /// Why it died.
    pub cause: DeathCause,
    /// Its age at death.
    pub age: f64,
    /// Where it died.
    pub position: Position,
}

impl DeathRecord {
    /// Capture the record for `minion` dying of `cause`.
    pub const fn new(minion: &Minion, cause: DeathCause) -> Self {
        Self {
            minion_id: minion.id,
            family_id: minion.family_id,
            generation: minion.generation,
            cause,
            age: minion.age,
            position: minion.position,
        }
    }
}
