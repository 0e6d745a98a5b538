//! Tunable parameters for minion mechanics.
//!
//! These structs deserialize directly from the `vitals`, `behavior` and
//! `interaction` sections of `vivarium-config.yaml`. Every field has a
//! default, so an empty section (or no file at all) yields the stock
//! simulation.
//!
//! All rates are per unit of tick delta. With the default delta of 1.0 a
//! rate is simply "per tick".

use serde::Deserialize;

/// Metabolism, aging and growth parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VitalsConfig {
    /// Hunger gained per tick (default: 0.05).
    #[serde(default = "default_hunger_rate")]
    pub hunger_rate: f64,

    /// Thirst gained per tick (default: 0.06).
    #[serde(default = "default_thirst_rate")]
    pub thirst_rate: f64,

    /// Energy lost per tick while awake (default: 0.02).
    #[serde(default = "default_energy_decay")]
    pub energy_decay: f64,

    /// Energy restored per tick while sleeping (default: 0.1).
    #[serde(default = "default_sleep_recovery")]
    pub sleep_recovery: f64,

    /// Age gained per tick (default: 0.01).
    #[serde(default = "default_age_rate")]
    pub age_rate: f64,

    /// Age ceiling. Aging stops here; it never kills (default: 100).
    #[serde(default = "default_max_age")]
    pub max_age: f64,

    /// Age at which growth completes (default: 20).
    #[serde(default = "default_maturity_age")]
    pub maturity_age: f64,

    /// Render scale at age 0 (default: 0.08).
    #[serde(default = "default_base_scale")]
    pub base_scale: f64,

    /// Render scale from maturity onward (default: 0.15).
    #[serde(default = "default_grown_scale")]
    pub grown_scale: f64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            hunger_rate: default_hunger_rate(),
            thirst_rate: default_thirst_rate(),
            energy_decay: default_energy_decay(),
            sleep_recovery: default_sleep_recovery(),
            age_rate: default_age_rate(),
            max_age: default_max_age(),
            maturity_age: default_maturity_age(),
            base_scale: default_base_scale(),
            grown_scale: default_grown_scale(),
        }
    }
}

const fn default_hunger_rate() -> f64 {
    0.05
}

const fn default_thirst_rate() -> f64 {
    0.06
}

const fn default_energy_decay() -> f64 {
    0.02
}

const fn default_sleep_recovery() -> f64 {
    0.1
}

const fn default_age_rate() -> f64 {
    0.01
}

const fn default_max_age() -> f64 {
    100.0
}

const fn default_maturity_age() -> f64 {
    20.0
}

const fn default_base_scale() -> f64 {
    0.08
}

const fn default_grown_scale() -> f64 {
    0.15
}

/// Local policy thresholds and feeding/wandering geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehaviorConfig {
    /// Thirst above which `DRINK` is forced (default: 70).
    #[serde(default = "default_need_threshold")]
    pub thirst_threshold: f64,

    /// Hunger above which `EAT` is forced (default: 70).
    #[serde(default = "default_need_threshold")]
    pub hunger_threshold: f64,

    /// Distance to food at which eating happens (default: 20).
    #[serde(default = "default_eat_radius")]
    pub eat_radius: f64,

    /// Distance to water at which drinking happens (default: 40).
    #[serde(default = "default_drink_radius")]
    pub drink_radius: f64,

    /// Hunger removed by one meal (default: 30).
    #[serde(default = "default_eat_relief")]
    pub eat_relief: f64,

    /// Thirst removed by one drink (default: 40).
    #[serde(default = "default_drink_relief")]
    pub drink_relief: f64,

    /// Distance at which a wander target counts as reached (default: 10).
    #[serde(default = "default_wander_arrival")]
    pub wander_arrival: f64,

    /// Maximum per-axis offset of a new wander target (default: 100).
    #[serde(default = "default_wander_range")]
    pub wander_range: f64,

    /// How far a minion looks for enemies or partners (default: 300).
    #[serde(default = "default_search_radius")]
    pub search_radius: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            thirst_threshold: default_need_threshold(),
            hunger_threshold: default_need_threshold(),
            eat_radius: default_eat_radius(),
            drink_radius: default_drink_radius(),
            eat_relief: default_eat_relief(),
            drink_relief: default_drink_relief(),
            wander_arrival: default_wander_arrival(),
            wander_range: default_wander_range(),
            search_radius: default_search_radius(),
        }
    }
}

const fn default_need_threshold() -> f64 {
    70.0
}

const fn default_eat_radius() -> f64 {
    20.0
}

const fn default_drink_radius() -> f64 {
    40.0
}

const fn default_eat_relief() -> f64 {
    30.0
}

const fn default_drink_relief() -> f64 {
    40.0
}

const fn default_wander_arrival() -> f64 {
    10.0
}

const fn default_wander_range() -> f64 {
    100.0
}

const fn default_search_radius() -> f64 {
    300.0
}

/// Combat and breeding parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InteractionConfig {
    /// Distance at which a strike lands (default: 25).
    #[serde(default = "default_attack_range")]
    pub attack_range: f64,

    /// Ticks between strikes (default: 60).
    #[serde(default = "default_attack_cooldown")]
    pub attack_cooldown: f64,

    /// Ticks the hit pulse stays visible on the defender (default: 10).
    #[serde(default = "default_hit_flash_ticks")]
    pub hit_flash_ticks: f64,

    /// Distance at which breeding happens (default: 20).
    #[serde(default = "default_mating_range")]
    pub mating_range: f64,

    /// Ticks both parents wait before breeding again (default: 1000).
    #[serde(default = "default_mate_cooldown")]
    pub mate_cooldown: f64,

    /// Age a partner must exceed to be courted (default: 18).
    #[serde(default = "default_mating_age")]
    pub mating_age: f64,

    /// Hit points (and max hit points) of a newborn (default: 50).
    #[serde(default = "default_offspring_hp")]
    pub offspring_hp: f64,

    /// Maximum trait tags an offspring inherits (default: 2).
    #[serde(default = "default_max_traits")]
    pub max_traits: usize,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            attack_range: default_attack_range(),
            attack_cooldown: default_attack_cooldown(),
            hit_flash_ticks: default_hit_flash_ticks(),
            mating_range: default_mating_range(),
            mate_cooldown: default_mate_cooldown(),
            mating_age: default_mating_age(),
            offspring_hp: default_offspring_hp(),
            max_traits: default_max_traits(),
        }
    }
}

const fn default_attack_range() -> f64 {
    25.0
}

const fn default_attack_cooldown() -> f64 {
    60.0
}

const fn default_hit_flash_ticks() -> f64 {
    10.0
}

const fn default_mating_range() -> f64 {
    20.0
}

const fn default_mate_cooldown() -> f64 {
    1000.0
}

const fn default_mating_age() -> f64 {
    18.0
}

const fn default_offspring_hp() -> f64 {
    50.0
}

const fn default_max_traits() -> usize {
    2
}
