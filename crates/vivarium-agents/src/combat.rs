//! Combat resolution.
//!
//! One strike: damage is `atk - def / 2`, never below 1. The attacker then
//! waits out its attack cooldown and the defender flashes. Defenders do not
//! strike back on their own; retaliation only happens if the defender is
//! itself in `ATTACK`.

use tracing::debug;
use vivarium_types::Minion;

use crate::config::InteractionConfig;

/// Every landed strike does at least this much damage.
pub const MIN_DAMAGE: f64 = 1.0;

/// Damage dealt by an attacker with `atk` to a defender with `def`.
pub fn compute_damage(atk: f64, def: f64) -> f64 {
    def.mul_add(-0.5, atk).max(MIN_DAMAGE)
}

/// Whether the attacker's cooldown has expired.
pub const fn can_strike(attacker: &Minion) -> bool {
    attacker.attack_cooldown <= 0.0
}

/// Land one strike. Returns the damage dealt.
///
/// The caller checks range and [`can_strike`].
pub fn strike(attacker: &mut Minion, defender: &mut Minion, config: &InteractionConfig) -> f64 {
    let damage = compute_damage(attacker.atk, defender.def);
    defender.hp -= damage;
    defender.hit_flash = config.hit_flash_ticks;
    attacker.attack_cooldown = config.attack_cooldown;
    debug!(
        attacker = %attacker.id,
        defender = %defender.id,
        damage,
        defender_hp = defender.hp,
        "Strike landed"
    );
    damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{approx, make_minion};

    #[test]
    fn damage_is_attack_minus_half_defense() {
        assert!(approx(compute_damage(10.0, 4.0), 8.0));
        assert!(approx(compute_damage(10.0, 5.0), 7.5));
    }

    #[test]
    fn damage_never_drops_below_one() {
        for (atk, def) in [(1.0, 100.0), (0.0, 0.0), (3.0, 6.0), (3.0, 4.5)] {
            assert!(compute_damage(atk, def) >= MIN_DAMAGE);
        }
        assert!(approx(compute_damage(2.0, 50.0), MIN_DAMAGE));
    }

    #[test]
    fn strike_applies_damage_cooldown_and_flash() {
        let config = InteractionConfig::default();
        let mut attacker = make_minion();
        attacker.atk = 12.0;
        let mut defender = make_minion();
        defender.def = 4.0;
        defender.hp = 50.0;

        let damage = strike(&mut attacker, &mut defender, &config);
        assert!(approx(damage, 10.0));
        assert!(approx(defender.hp, 40.0));
        assert!(approx(defender.hit_flash, config.hit_flash_ticks));
        assert!(approx(attacker.attack_cooldown, config.attack_cooldown));
        assert!(!can_strike(&attacker));
        assert!(approx(attacker.hp, 100.0));
    }
}
