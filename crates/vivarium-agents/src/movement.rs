//! Targeting and straight-line movement.
//!
//! Movement is a straight step of `speed * delta` toward the target that
//! never overshoots, followed by a clamp to the world rectangle.

use rand::Rng;
use vivarium_types::{Minion, Position};
use vivarium_world::WorldBounds;

use crate::config::BehaviorConfig;

/// Step `minion` toward `target`. Returns the remaining distance.
pub fn move_toward(minion: &mut Minion, target: Position, delta: f64, bounds: &WorldBounds) -> f64 {
    let step = (minion.speed * delta).max(0.0);
    minion.position = bounds.clamp(minion.position.step_toward(target, step));
    minion.position.distance_to(target)
}

/// A random point within `wander_range` per axis of `from`, kept inside the
/// inner wander rectangle.
pub fn pick_wander_target(
    from: Position,
    config: &BehaviorConfig,
    bounds: &WorldBounds,
    rng: &mut impl Rng,
) -> Position {
    let range = config.wander_range;
    if !range.is_finite() || range <= 0.0 {
        return bounds.clamp_inner(from);
    }
    let dx = rng.random_range(-range..=range);
    let dy = rng.random_range(-range..=range);
    bounds.clamp_inner(Position::new(from.x + dx, from.y + dy))
}

/// One tick of wandering.
///
/// A new target is picked when there is none or the current one is within
/// the arrival distance.
pub fn wander(
    minion: &mut Minion,
    config: &BehaviorConfig,
    bounds: &WorldBounds,
    delta: f64,
    rng: &mut impl Rng,
) {
    let position = minion.position;
    let needs_target = minion
        .move_target
        .is_none_or(|target| position.distance_to(target) < config.wander_arrival);
    if needs_target {
        minion.move_target = Some(pick_wander_target(position, config, bounds, rng));
    }
    if let Some(target) = minion.move_target {
        move_toward(minion, target, delta, bounds);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::test_support::{approx, make_bounds, make_minion_at};

    #[test]
    fn move_toward_steps_at_speed() {
        let bounds = make_bounds();
        let mut minion = make_minion_at(Position::new(100.0, 100.0));
        minion.speed = 2.0;
        let remaining = move_toward(&mut minion, Position::new(110.0, 100.0), 1.0, &bounds);
        assert!(approx(minion.position.x, 102.0));
        assert!(approx(remaining, 8.0));
    }

    #[test]
    fn move_toward_stops_on_target() {
        let bounds = make_bounds();
        let mut minion = make_minion_at(Position::new(100.0, 100.0));
        minion.speed = 50.0;
        let remaining = move_toward(&mut minion, Position::new(110.0, 100.0), 1.0, &bounds);
        assert!(approx(remaining, 0.0));
        assert_eq!(minion.position, Position::new(110.0, 100.0));
    }

    #[test]
    fn movement_is_clamped_to_the_world() {
        let bounds = make_bounds();
        let mut minion = make_minion_at(Position::new(1.0, 1.0));
        minion.speed = 5.0;
        move_toward(&mut minion, Position::new(-100.0, 1.0), 1.0, &bounds);
        assert!(approx(minion.position.x, 0.0));
    }

    #[test]
    fn wander_targets_stay_in_range_and_inside_margin() {
        let bounds = make_bounds();
        let config = BehaviorConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let from = Position::new(60.0, 60.0);
        for _ in 0..200 {
            let target = pick_wander_target(from, &config, &bounds, &mut rng);
            assert!((target.x - from.x).abs() <= config.wander_range);
            assert!((target.y - from.y).abs() <= config.wander_range);
            assert!(target.x >= bounds.margin() && target.y >= bounds.margin());
            assert!(target.x <= bounds.width() - bounds.margin());
        }
    }

    #[test]
    fn wander_keeps_target_until_reached() {
        let bounds = make_bounds();
        let config = BehaviorConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut minion = make_minion_at(Position::new(400.0, 300.0));
        minion.speed = 0.0;
        minion.move_target = Some(Position::new(450.0, 300.0));

        wander(&mut minion, &config, &bounds, 1.0, &mut rng);
        assert_eq!(minion.move_target, Some(Position::new(450.0, 300.0)));

        minion.position = Position::new(445.0, 300.0);
        wander(&mut minion, &config, &bounds, 1.0, &mut rng);
        assert_ne!(minion.move_target, Some(Position::new(450.0, 300.0)));
    }
}
