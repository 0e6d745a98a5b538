//! Local behavior policy.
//!
//! Runs every tick after the oracle has had its say. Survival needs always
//! win: thirst is checked before hunger, and whatever the oracle chose is
//! overridden while either need is critical. Otherwise the current state,
//! oracle-chosen or not, is left alone. Nothing here ever leaves `SLEEP`.

use vivarium_types::{BehaviorState, Minion};

use crate::config::BehaviorConfig;

/// The state forced by a critical need, if any.
pub fn survival_override(minion: &Minion, config: &BehaviorConfig) -> Option<BehaviorState> {
    if minion.thirst > config.thirst_threshold {
        Some(BehaviorState::Drink)
    } else if minion.hunger > config.hunger_threshold {
        Some(BehaviorState::Eat)
    } else {
        None
    }
}

/// The state the minion should be in this tick.
pub fn evaluate(minion: &Minion, config: &BehaviorConfig) -> BehaviorState {
    survival_override(minion, config).unwrap_or(minion.state)
}

/// Apply the policy. Returns `true` if the state changed.
pub fn apply(minion: &mut Minion, config: &BehaviorConfig) -> bool {
    let next = evaluate(minion, config);
    minion.set_state(next)
}
