//! The live minion population.
//!
//! Minions are stored in an arena keyed by [`MinionId`], with a separate
//! list recording insertion order. Lookups never depend on position in a
//! list, so removing one minion cannot invalidate a reference held to
//! another (an in-flight oracle request, a combat target).
//!
//! The tick loop processes one minion at a time by checking it out of the
//! arena with [`MinionRegistry::checkout`]. While checked out the minion is
//! invisible to searches, which keeps it from targeting itself, and the
//! rest of the population can be borrowed mutably as the other party of a
//! strike or a birth.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::info;
use vivarium_types::{Genetics, Minion, MinionId, Position};

use crate::config::VitalsConfig;
use crate::death::{DeathRecord, check_death, is_alive};
use crate::vitals;

/// All live minions.
#[derive(Debug, Clone, Default)]
pub struct MinionRegistry {
    minions: BTreeMap<MinionId, Minion>,
    order: Vec<MinionId>,
}

impl MinionRegistry {
    /// Create an empty population.
    pub const fn new() -> Self {
        Self {
            minions: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Spawn a founder from caller-supplied genetics.
    ///
    /// Genetics are not validated. The founder gets a random tint and a
    /// render scale matching age 0.
    pub fn spawn(
        &mut self,
        genetics: Genetics,
        position: Position,
        config: &VitalsConfig,
        rng: &mut impl Rng,
    ) -> MinionId {
        let mut minion = Minion::new(genetics, position);
        minion.tint = rng.random_range(0..=0x00FF_FFFF);
        vitals::update_growth(&mut minion, config);
        info!(
            minion_id = %minion.id,
            family_id = %minion.family_id,
            gender = ?minion.gender,
            x = position.x,
            y = position.y,
            "Minion spawned"
        );
        self.insert(minion)
    }

    /// Add a fully built minion (a spawn or a newborn).
    pub fn insert(&mut self, minion: Minion) -> MinionId {
        let id = minion.id;
        if self.minions.insert(id, minion).is_none() && !self.order.contains(&id) {
            self.order.push(id);
        }
        id
    }

    /// Look up a minion.
    pub fn get(&self, id: MinionId) -> Option<&Minion> {
        self.minions.get(&id)
    }

    /// Look up a minion mutably.
    pub fn get_mut(&mut self, id: MinionId) -> Option<&mut Minion> {
        self.minions.get_mut(&id)
    }

    /// Whether `id` is present (and not checked out).
    pub fn contains(&self, id: MinionId) -> bool {
        self.minions.contains_key(&id)
    }

    /// Remove a minion for good.
    pub fn remove(&mut self, id: MinionId) -> Option<Minion> {
        let removed = self.minions.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(removed)
    }

    /// Remove the minion closest to `position`, if one lies within `radius`.
    pub fn remove_near(&mut self, position: Position, radius: f64) -> Option<Minion> {
        let id = self.select_at(position, radius)?.id;
        self.remove(id)
    }

    /// The minion closest to `position` within `radius`, without removing it.
    pub fn select_at(&self, position: Position, radius: f64) -> Option<&Minion> {
        self.nearest_where(position, radius, |_| true)
    }

    /// The nearest live minion within `radius` of `from` matching `predicate`.
    ///
    /// Exhaustive scan in insertion order; ties keep the earlier minion.
    /// Dead minions awaiting the sweep are never returned.
    pub fn nearest_where(
        &self,
        from: Position,
        radius: f64,
        predicate: impl Fn(&Minion) -> bool,
    ) -> Option<&Minion> {
        let mut best: Option<(f64, &Minion)> = None;
        for minion in self.iter().filter(|m| is_alive(m) && predicate(m)) {
            let distance = from.distance_to(minion.position);
            if distance <= radius && best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, minion));
            }
        }
        best.map(|(_, minion)| minion)
    }

    /// Take a minion out of the arena for exclusive processing.
    ///
    /// Its slot in the insertion order is kept, so [`checkin`] restores it
    /// in place.
    ///
    /// [`checkin`]: MinionRegistry::checkin
    pub fn checkout(&mut self, id: MinionId) -> Option<Minion> {
        self.minions.remove(&id)
    }

    /// Return a checked-out minion to the arena.
    pub fn checkin(&mut self, minion: Minion) {
        self.insert(minion);
    }

    /// Remove every minion meeting a death condition.
    ///
    /// Walks the population from newest to oldest and returns one record per
    /// removal, in that order.
    pub fn sweep_dead(&mut self) -> Vec<DeathRecord> {
        let doomed: Vec<DeathRecord> = self
            .order
            .iter()
            .rev()
            .filter_map(|id| self.minions.get(id))
            .filter_map(|minion| check_death(minion).map(|cause| DeathRecord::new(minion, cause)))
            .collect();

        for record in &doomed {
            self.remove(record.minion_id);
            info!(
                minion_id = %record.minion_id,
                family_id = %record.family_id,
                generation = record.generation,
                cause = %record.cause,
                age = record.age,
                "Minion died"
            );
        }
        doomed
    }

    /// IDs in insertion order. A snapshot, safe to hold across mutation.
    pub fn ids(&self) -> Vec<MinionId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.minions.contains_key(id))
            .collect()
    }

    /// Iterate minions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Minion> {
        self.order.iter().filter_map(|id| self.minions.get(id))
    }

    /// Number of minions in the arena.
    pub fn len(&self) -> usize {
        self.minions.len()
    }

    /// Whether the population is extinct.
    pub fn is_empty(&self) -> bool {
        self.minions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use vivarium_types::Gender;

    use super::*;
    use crate::death::DeathCause;
    use crate::test_support::{make_genetics, make_minion_at};

    #[test]
    fn spawn_assigns_founder_defaults() {
        let mut registry = MinionRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);
        let config = VitalsConfig::default();
        let id = registry.spawn(
            make_genetics(Gender::Female),
            Position::new(10.0, 10.0),
            &config,
            &mut rng,
        );

        let minion = registry.get(id);
        assert!(minion.is_some_and(|m| m.generation == 1));
        assert!(minion.is_some_and(|m| (m.scale - config.base_scale).abs() < 1e-9));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn select_at_picks_closest_without_removing() {
        let mut registry = MinionRegistry::new();
        let far = registry.insert(make_minion_at(Position::new(30.0, 0.0)));
        let near = registry.insert(make_minion_at(Position::new(10.0, 0.0)));

        let selected = registry.select_at(Position::default(), 50.0).map(|m| m.id);
        assert_eq!(selected, Some(near));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(far));
        assert!(registry.select_at(Position::new(500.0, 500.0), 5.0).is_none());
    }

    #[test]
    fn remove_near_removes_at_most_one() {
        let mut registry = MinionRegistry::new();
        registry.insert(make_minion_at(Position::new(1.0, 0.0)));
        registry.insert(make_minion_at(Position::new(2.0, 0.0)));

        assert!(registry.remove_near(Position::default(), 10.0).is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.ids().len(), 1);
    }

    #[test]
    fn checkout_hides_minion_and_checkin_keeps_order() {
        let mut registry = MinionRegistry::new();
        let first = registry.insert(make_minion_at(Position::default()));
        let second = registry.insert(make_minion_at(Position::new(1.0, 1.0)));

        let taken = registry.checkout(first);
        assert!(taken.is_some());
        assert!(registry.select_at(Position::default(), 0.5).is_none());

        if let Some(minion) = taken {
            registry.checkin(minion);
        }
        assert_eq!(registry.ids(), vec![first, second]);
    }

    #[test]
    fn sweep_removes_dead_newest_first() {
        let mut registry = MinionRegistry::new();
        let mut starving = make_minion_at(Position::default());
        starving.hunger = 100.0;
        let starving_id = registry.insert(starving);
        let healthy_id = registry.insert(make_minion_at(Position::default()));
        let mut thirsty = make_minion_at(Position::default());
        thirsty.thirst = 101.0;
        let thirsty_id = registry.insert(thirsty);

        let records = registry.sweep_dead();
        let removed: Vec<_> = records.iter().map(|r| (r.minion_id, r.cause)).collect();
        assert_eq!(
            removed,
            vec![
                (thirsty_id, DeathCause::Dehydration),
                (starving_id, DeathCause::Starvation)
            ]
        );
        assert_eq!(registry.ids(), vec![healthy_id]);
    }

    #[test]
    fn nearest_where_skips_dead_minions() {
        let mut registry = MinionRegistry::new();
        let mut dying = make_minion_at(Position::new(1.0, 0.0));
        dying.hp = 0.0;
        registry.insert(dying);
        let alive = registry.insert(make_minion_at(Position::new(5.0, 0.0)));

        let found = registry.nearest_where(Position::default(), 300.0, |_| true);
        assert_eq!(found.map(|m| m.id), Some(alive));
    }
}
