//! World seeding at simulation start.
//!
//! Places the starting resources and founder minions described by the
//! `population` section of `vivarium-config.yaml`. Founders alternate
//! gender, are dealt round-robin into families, get jittered stats and draw
//! their traits from a shared pool. Everything is placed uniformly at random
//! inside the inner play area.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;
use vivarium_core::SimulationState;
use vivarium_core::config::PopulationConfig;
use vivarium_types::{FamilyId, Gender, Genetics, MinionId, Position, ResourceId, ResourceKind};
use vivarium_world::WorldBounds;

/// Upper limit on relative stat jitter, so jittered stats stay positive.
const MAX_JITTER: f64 = 0.95;

/// The output of world seeding.
#[derive(Debug, Default)]
pub struct SeedResult {
    /// Founders in spawn order.
    pub minions: Vec<MinionId>,
    /// Starting resources in placement order.
    pub resources: Vec<ResourceId>,
    /// Families the founders were dealt into.
    pub families: Vec<FamilyId>,
}

/// Render scale a resource of `kind` is placed with.
pub const fn default_size(kind: ResourceKind) -> f64 {
    match kind {
        ResourceKind::Food => 0.2,
        ResourceKind::Water => 0.5,
        ResourceKind::Obstacle => 0.15,
    }
}

/// Seed `state` with the configured resources and founders.
///
/// Resources go in first so founders have something to look for on the
/// first tick.
pub fn seed_world(state: &mut SimulationState, population: &PopulationConfig) -> SeedResult {
    let mut result = SeedResult::default();

    let plan = [
        (ResourceKind::Food, population.food_sources),
        (ResourceKind::Water, population.water_sources),
        (ResourceKind::Obstacle, population.obstacles),
    ];
    for (kind, count) in plan {
        for _ in 0..count {
            let position = random_position(&state.bounds, &mut state.rng);
            let id = state.resources.place(kind, position, default_size(kind));
            result.resources.push(id);
        }
    }

    result.families = (0..population.families).map(|_| FamilyId::new()).collect();
    let mut families = result.families.iter().copied().cycle();
    let mut gender = Gender::Female;

    for _ in 0..population.seed_minions {
        let genetics = founder_genetics(population, gender, families.next(), &mut state.rng);
        let position = random_position(&state.bounds, &mut state.rng);
        let id = state
            .minions
            .spawn(genetics, position, &state.vitals, &mut state.rng);
        result.minions.push(id);
        gender = gender.opposite();
    }

    info!(
        minions = result.minions.len(),
        families = result.families.len(),
        resources = result.resources.len(),
        "World seeded"
    );

    result
}

/// Build the genetics of one founder.
///
/// With no families configured each founder starts a lineage of its own.
fn founder_genetics(
    population: &PopulationConfig,
    gender: Gender,
    family_id: Option<FamilyId>,
    rng: &mut impl Rng,
) -> Genetics {
    let traits = population
        .trait_pool
        .choose_multiple(rng, population.traits_per_minion)
        .cloned()
        .collect();

    Genetics {
        gender,
        traits,
        atk: jitter(population.atk, population.stat_jitter, rng),
        def: jitter(population.def, population.stat_jitter, rng),
        speed: jitter(population.speed, population.stat_jitter, rng),
        max_hp: jitter(population.max_hp, population.stat_jitter, rng),
        family_id,
    }
}

/// Scale `base` by a random factor in `[1 - spread, 1 + spread]`.
fn jitter(base: f64, spread: f64, rng: &mut impl Rng) -> f64 {
    if spread.is_nan() || spread <= 0.0 {
        return base;
    }
    let spread = spread.min(MAX_JITTER);
    base * rng.random_range((1.0 - spread)..=(1.0 + spread))
}

/// Uniform position inside the inner play area.
fn random_position(bounds: &WorldBounds, rng: &mut impl Rng) -> Position {
    let margin = bounds.margin();
    Position::new(
        rng.random_range(margin..=(bounds.width() - margin)),
        rng.random_range(margin..=(bounds.height() - margin)),
    )
}
