//! Per-tick vital mechanics: metabolism, aging, growth and cooldowns.
//!
//! Hunger and thirst are never clamped at 100. Crossing the lethal level is
//! what removes a minion (see [`crate::death`]), so clamping would hide it.

use vivarium_types::{BehaviorState, Minion};

use crate::config::VitalsConfig;

/// Energy ceiling.
pub const MAX_ENERGY: f64 = 100.0;

/// Apply one tick of hunger, thirst and energy change.
///
/// Sleeping minions recover energy instead of spending it.
pub fn apply_metabolism(minion: &mut Minion, config: &VitalsConfig, delta: f64) {
    minion.hunger = config.hunger_rate.mul_add(delta, minion.hunger);
    minion.thirst = config.thirst_rate.mul_add(delta, minion.thirst);

    minion.energy = if minion.state == BehaviorState::Sleep {
        config
            .sleep_recovery
            .mul_add(delta, minion.energy)
            .min(MAX_ENERGY)
    } else {
        (-config.energy_decay).mul_add(delta, minion.energy).max(0.0)
    };
}

/// Advance age, stopping at the age ceiling.
pub fn advance_age(minion: &mut Minion, config: &VitalsConfig, delta: f64) {
    if minion.age < config.max_age {
        minion.age = config.age_rate.mul_add(delta, minion.age).min(config.max_age);
    }
}

/// Render scale for a minion of the given age.
///
/// Interpolates linearly from `base_scale` at birth to `grown_scale` at
/// maturity, then holds.
pub fn growth_scale(age: f64, config: &VitalsConfig) -> f64 {
    if config.maturity_age <= 0.0 || age >= config.maturity_age {
        return config.grown_scale;
    }
    let progress = (age / config.maturity_age).max(0.0);
    (config.grown_scale - config.base_scale).mul_add(progress, config.base_scale)
}

/// Refresh the minion's render scale from its age.
pub fn update_growth(minion: &mut Minion, config: &VitalsConfig) {
    minion.scale = growth_scale(minion.age, config);
}

/// Count down the mate, attack and oracle cooldowns and the hit pulse.
pub fn decay_cooldowns(minion: &mut Minion, delta: f64) {
    minion.mate_cooldown = (minion.mate_cooldown - delta).max(0.0);
    minion.attack_cooldown = (minion.attack_cooldown - delta).max(0.0);
    minion.oracle_cooldown = (minion.oracle_cooldown - delta).max(0.0);
    minion.hit_flash = (minion.hit_flash - delta).max(0.0);
}
