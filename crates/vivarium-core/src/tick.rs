//! Tick cycle: one step of the Vivarium simulation.
//!
//! Each tick runs through these phases:
//!
//! 1. **Oracle** -- drain resolved oracle replies and overwrite the behavior
//!    of each addressed minion that is still alive. Replies for removed
//!    minions are dropped.
//!
//! 2. **Lifecycle** -- remove every minion meeting a death condition,
//!    newest first.
//!
//! 3. **Update** -- for each minion in insertion order: metabolism, aging
//!    and growth, cooldown decay, oracle trigger, local policy, then
//!    behavior execution. A minion whose metabolism just crossed a lethal
//!    level does not act.
//!
//! 4. **Sweep** -- remove minions killed during the update phase, so no
//!    dead minion survives a tick boundary.
//!
//! Minions born during phase 3 first act on the following tick. The tick is
//! deterministic given a seeded random source and a deterministic oracle.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use vivarium_agents::{
    ActionContext, ActionOutcome, BehaviorConfig, DeathRecord, InteractionConfig, MinionRegistry,
    VitalsConfig, check_death, execute_behavior, policy, vitals,
};
use vivarium_types::{DecisionRequest, Minion, MinionId};
use vivarium_world::{ResourceRegistry, WorldBounds, WorldError};

use crate::config::{OracleConfig, SimulationConfig};
use crate::decision::DecisionOracle;

/// Complete mutable state of a running simulation.
#[derive(Debug)]
pub struct SimulationState {
    /// Number of the last completed tick (0 before the first tick).
    pub tick: u64,
    /// Tick-delta scalar applied to every per-tick rate.
    pub delta: f64,
    /// The playfield.
    pub bounds: WorldBounds,
    /// Static resources.
    pub resources: ResourceRegistry,
    /// Live minions.
    pub minions: MinionRegistry,
    /// Metabolism, aging and growth parameters.
    pub vitals: VitalsConfig,
    /// Local policy parameters.
    pub behavior: BehaviorConfig,
    /// Combat and breeding parameters.
    pub interaction: InteractionConfig,
    /// Oracle cadence.
    pub oracle: OracleConfig,
    /// Shared random source.
    pub rng: StdRng,
    /// Outstanding oracle requests per minion.
    pending: BTreeMap<MinionId, u32>,
}

impl SimulationState {
    /// Build an empty world from configuration.
    ///
    /// The random source is seeded from `world.seed` when set, otherwise
    /// from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] if the configured playfield is
    /// degenerate.
    pub fn new(config: &SimulationConfig) -> Result<Self, WorldError> {
        let bounds = WorldBounds::new(config.world.width, config.world.height, config.world.margin)?;
        let rng = config
            .world
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Ok(Self {
            tick: 0,
            delta: config.world.tick_delta,
            bounds,
            resources: ResourceRegistry::new(),
            minions: MinionRegistry::new(),
            vitals: config.vitals.clone(),
            behavior: config.behavior.clone(),
            interaction: config.interaction.clone(),
            oracle: config.oracle.clone(),
            rng,
            pending: BTreeMap::new(),
        })
    }

    /// Number of oracle requests still outstanding for `minion_id`.
    pub fn pending_requests(&self, minion_id: MinionId) -> u32 {
        self.pending.get(&minion_id).copied().unwrap_or(0)
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Live minions at end of tick.
    pub population: usize,
    /// Minions removed this tick, in removal order.
    pub deaths: Vec<DeathRecord>,
    /// Minions born this tick.
    pub births: Vec<MinionId>,
    /// Strikes landed.
    pub strikes: u32,
    /// Meals eaten.
    pub meals: u32,
    /// Drinks taken.
    pub drinks: u32,
    /// Oracle requests submitted.
    pub oracle_requests: u32,
    /// Oracle requests skipped because one was already outstanding.
    pub oracle_skipped: u32,
    /// Oracle replies applied to live minions.
    pub oracle_replies_applied: u32,
    /// Oracle replies dropped because their minion was gone.
    pub oracle_replies_dropped: u32,
}

/// Execute one tick.
///
/// Infallible: oracle trouble degrades to wandering and missing targets
/// degrade to wandering, so nothing in a tick can fail.
pub fn run_tick(state: &mut SimulationState, oracle: &mut dyn DecisionOracle) -> TickSummary {
    state.tick = state.tick.saturating_add(1);
    let mut summary = TickSummary {
        tick: state.tick,
        ..TickSummary::default()
    };

    // --- Phase 1: Oracle ---
    apply_oracle_replies(state, oracle, &mut summary);

    // --- Phase 2: Lifecycle ---
    summary.deaths.extend(state.minions.sweep_dead());

    // --- Phase 3: Update ---
    for id in state.minions.ids() {
        let Some(mut minion) = state.minions.checkout(id) else {
            continue;
        };
        if check_death(&minion).is_none() {
            update_minion(state, &mut minion, oracle, &mut summary);
        }
        state.minions.checkin(minion);
    }

    // --- Phase 4: Sweep ---
    summary.deaths.extend(state.minions.sweep_dead());
    let minions = &state.minions;
    state.pending.retain(|id, _| minions.contains(*id));

    summary.population = state.minions.len();
    if !summary.deaths.is_empty() || !summary.births.is_empty() {
        info!(
            tick = summary.tick,
            population = summary.population,
            deaths = summary.deaths.len(),
            births = summary.births.len(),
            "Population changed"
        );
    }
    summary
}

/// Overwrite behavior states from resolved oracle replies.
fn apply_oracle_replies(
    state: &mut SimulationState,
    oracle: &mut dyn DecisionOracle,
    summary: &mut TickSummary,
) {
    for reply in oracle.poll_replies() {
        if let Some(count) = state.pending.get_mut(&reply.minion_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                state.pending.remove(&reply.minion_id);
            }
        }

        match state.minions.get_mut(reply.minion_id) {
            Some(minion) => {
                let previous = minion.state;
                minion.set_state(reply.state);
                summary.oracle_replies_applied = summary.oracle_replies_applied.saturating_add(1);
                debug!(
                    minion_id = %reply.minion_id,
                    from = %previous,
                    to = %reply.state,
                    "Oracle reply applied"
                );
            }
            None => {
                summary.oracle_replies_dropped = summary.oracle_replies_dropped.saturating_add(1);
                debug!(minion_id = %reply.minion_id, "Dropping oracle reply for removed minion");
            }
        }
    }
}

/// Run phase 3 for one checked-out minion.
fn update_minion(
    state: &mut SimulationState,
    minion: &mut Minion,
    oracle: &mut dyn DecisionOracle,
    summary: &mut TickSummary,
) {
    vitals::apply_metabolism(minion, &state.vitals, state.delta);
    vitals::advance_age(minion, &state.vitals, state.delta);
    vitals::update_growth(minion, &state.vitals);
    vitals::decay_cooldowns(minion, state.delta);

    if check_death(minion).is_some() {
        return;
    }

    trigger_oracle(state, minion, oracle, summary);

    let previous = minion.state;
    if policy::apply(minion, &state.behavior) {
        debug!(minion_id = %minion.id, from = %previous, to = %minion.state, "Survival override");
    }

    let ctx = ActionContext {
        behavior: &state.behavior,
        interaction: &state.interaction,
        vitals: &state.vitals,
        bounds: &state.bounds,
        delta: state.delta,
    };
    let outcome = execute_behavior(
        minion,
        &mut state.minions,
        &state.resources,
        &ctx,
        &mut state.rng,
    );
    match outcome {
        ActionOutcome::Ate => summary.meals = summary.meals.saturating_add(1),
        ActionOutcome::Drank => summary.drinks = summary.drinks.saturating_add(1),
        ActionOutcome::Struck { .. } => summary.strikes = summary.strikes.saturating_add(1),
        ActionOutcome::Born { child } => summary.births.push(child),
        ActionOutcome::Idle
        | ActionOutcome::Moved
        | ActionOutcome::Holding
        | ActionOutcome::NoTarget => {}
    }
}

/// Fire an oracle request when the minion's cooldown has run out.
fn trigger_oracle(
    state: &mut SimulationState,
    minion: &mut Minion,
    oracle: &mut dyn DecisionOracle,
    summary: &mut TickSummary,
) {
    if !state.oracle.enabled || minion.oracle_cooldown > 0.0 {
        return;
    }
    minion.oracle_cooldown = next_oracle_cooldown(&state.oracle, &mut state.rng);

    if state.oracle.skip_when_pending && state.pending.contains_key(&minion.id) {
        summary.oracle_skipped = summary.oracle_skipped.saturating_add(1);
        return;
    }

    let count = state.pending.entry(minion.id).or_insert(0);
    *count = count.saturating_add(1);
    summary.oracle_requests = summary.oracle_requests.saturating_add(1);
    debug!(minion_id = %minion.id, state = %minion.state, "Oracle request submitted");
    oracle.submit(minion.id, DecisionRequest::for_minion(minion));
}

/// A cooldown drawn uniformly from `[cooldown_min, cooldown_max)`.
fn next_oracle_cooldown(config: &OracleConfig, rng: &mut impl Rng) -> f64 {
    if config.cooldown_max > config.cooldown_min {
        rng.random_range(config.cooldown_min..config.cooldown_max)
    } else {
        config.cooldown_min
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use vivarium_types::{BehaviorState, FamilyId, Gender, Genetics, Position, ResourceKind};

    use super::*;
    use crate::decision::StubOracle;

    fn make_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.seed = Some(1234);
        config
    }

    /// A world where needs never change on their own.
    fn make_static_config() -> SimulationConfig {
        let mut config = make_config();
        config.vitals.hunger_rate = 0.0;
        config.vitals.thirst_rate = 0.0;
        config
    }

    fn make_genetics(gender: Gender) -> Genetics {
        Genetics {
            gender,
            traits: vec![String::from("A")],
            atk: 10.0,
            def: 4.0,
            speed: 2.0,
            max_hp: 100.0,
            family_id: None,
        }
    }

    fn spawn(state: &mut SimulationState, position: Position) -> MinionId {
        let genetics = make_genetics(Gender::Female);
        state
            .minions
            .spawn(genetics, position, &state.vitals, &mut state.rng)
    }

    #[test]
    fn thirsty_minion_walks_to_water_and_drinks_once() {
        let mut state = SimulationState::new(&make_static_config()).unwrap();
        state
            .resources
            .place(ResourceKind::Water, Position::new(100.0, 100.0), 0.5);
        let id = spawn(&mut state, Position::new(500.0, 500.0));
        if let Some(minion) = state.minions.get_mut(id) {
            minion.thirst = 80.0;
        }
        let mut oracle = StubOracle::silent();

        let mut drinks = 0;
        let mut distance_at_drink = None;
        for _ in 0..600 {
            let summary = run_tick(&mut state, &mut oracle);
            if summary.drinks > 0 && distance_at_drink.is_none() {
                distance_at_drink = state
                    .minions
                    .get(id)
                    .map(|m| m.position.distance_to(Position::new(100.0, 100.0)));
            }
            drinks += summary.drinks;
        }

        assert_eq!(drinks, 1);
        assert!(distance_at_drink.is_some_and(|d| d < 40.0));
        let minion = state.minions.get(id).unwrap();
        assert!((minion.thirst - 40.0).abs() < 1e-9);
        assert_ne!(minion.state, BehaviorState::Drink);
    }

    #[test]
    fn hungry_minion_without_food_stays_in_eat() {
        let mut state = SimulationState::new(&make_static_config()).unwrap();
        let id = spawn(&mut state, Position::new(400.0, 300.0));
        if let Some(minion) = state.minions.get_mut(id) {
            minion.hunger = 80.0;
        }
        let mut oracle = StubOracle::silent();

        for _ in 0..100 {
            run_tick(&mut state, &mut oracle);
            let minion = state.minions.get(id).unwrap();
            assert_eq!(minion.state, BehaviorState::Eat);
            assert!((minion.hunger - 80.0).abs() < 1e-9);
        }
    }

    #[test]
    fn thirst_takes_priority_over_hunger() {
        let mut state = SimulationState::new(&make_static_config()).unwrap();
        let id = spawn(&mut state, Position::new(400.0, 300.0));
        if let Some(minion) = state.minions.get_mut(id) {
            minion.hunger = 75.0;
            minion.thirst = 75.0;
        }
        run_tick(&mut state, &mut StubOracle::silent());
        assert_eq!(state.minions.get(id).map(|m| m.state), Some(BehaviorState::Drink));
    }

    #[test]
    fn oracle_reply_for_removed_minion_is_dropped() {
        let mut state = SimulationState::new(&make_config()).unwrap();
        let doomed = spawn(&mut state, Position::new(100.0, 100.0));
        let bystander = spawn(&mut state, Position::new(600.0, 400.0));
        let mut oracle = StubOracle::always(BehaviorState::Sleep);

        let first = run_tick(&mut state, &mut oracle);
        assert_eq!(first.oracle_requests, 2);

        state.minions.remove(doomed);
        let before = state.minions.get(bystander).cloned();
        let second = run_tick(&mut state, &mut oracle);

        assert_eq!(second.oracle_replies_dropped, 1);
        assert_eq!(second.oracle_replies_applied, 1);
        assert!(state.minions.get(doomed).is_none());
        let after = state.minions.get(bystander).unwrap();
        assert_eq!(after.state, BehaviorState::Sleep);
        assert_eq!(before.map(|m| m.position), Some(after.position));
    }

    #[test]
    fn oracle_cannot_block_survival_needs() {
        let mut state = SimulationState::new(&make_static_config()).unwrap();
        let id = spawn(&mut state, Position::new(400.0, 300.0));
        let mut oracle = StubOracle::always(BehaviorState::Sleep);

        run_tick(&mut state, &mut oracle);
        run_tick(&mut state, &mut oracle);
        assert_eq!(state.minions.get(id).map(|m| m.state), Some(BehaviorState::Sleep));

        if let Some(minion) = state.minions.get_mut(id) {
            minion.thirst = 90.0;
        }
        run_tick(&mut state, &mut oracle);
        assert_eq!(state.minions.get(id).map(|m| m.state), Some(BehaviorState::Drink));
    }

    #[test]
    fn oracle_cadence_respects_cooldown_range() {
        let mut state = SimulationState::new(&make_config()).unwrap();
        let id = spawn(&mut state, Position::new(400.0, 300.0));
        let mut oracle = StubOracle::silent();

        run_tick(&mut state, &mut oracle);
        let cooldown = state.minions.get(id).map_or(0.0, |m| m.oracle_cooldown);
        assert!((120.0..180.0).contains(&cooldown));

        for _ in 0..100 {
            run_tick(&mut state, &mut oracle);
        }
        assert_eq!(oracle.requests().len(), 1);
    }

    #[test]
    fn skip_when_pending_suppresses_duplicate_requests() {
        let mut config = make_config();
        config.oracle.cooldown_min = 1.0;
        config.oracle.cooldown_max = 1.0;

        let mut multi = SimulationState::new(&config).unwrap();
        spawn(&mut multi, Position::new(400.0, 300.0));
        let mut multi_oracle = StubOracle::silent();
        for _ in 0..5 {
            run_tick(&mut multi, &mut multi_oracle);
        }
        assert_eq!(multi_oracle.requests().len(), 5);

        config.oracle.skip_when_pending = true;
        let mut single = SimulationState::new(&config).unwrap();
        let id = spawn(&mut single, Position::new(400.0, 300.0));
        let mut single_oracle = StubOracle::silent();
        for _ in 0..5 {
            run_tick(&mut single, &mut single_oracle);
        }
        assert_eq!(single_oracle.requests().len(), 1);
        assert_eq!(single.pending_requests(id), 1);
    }

    #[test]
    fn combat_kill_is_removed_within_the_same_tick() {
        let mut config = make_config();
        config.oracle.enabled = false;
        let mut state = SimulationState::new(&config).unwrap();
        let attacker = spawn(&mut state, Position::new(300.0, 300.0));
        let victim = spawn(&mut state, Position::new(310.0, 300.0));
        if let Some(minion) = state.minions.get_mut(attacker) {
            minion.state = BehaviorState::Attack;
        }
        if let Some(minion) = state.minions.get_mut(victim) {
            minion.hp = 1.0;
            minion.family_id = FamilyId::new();
        }

        let summary = run_tick(&mut state, &mut StubOracle::silent());
        assert_eq!(summary.strikes, 1);
        assert_eq!(summary.deaths.len(), 1);
        assert_eq!(summary.deaths.first().map(|d| d.minion_id), Some(victim));
        assert!(state.minions.get(victim).is_none());
        assert_eq!(summary.population, 1);
    }

    #[test]
    fn metabolic_death_happens_on_the_crossing_tick() {
        let mut state = SimulationState::new(&make_config()).unwrap();
        let id = spawn(&mut state, Position::new(300.0, 300.0));
        if let Some(minion) = state.minions.get_mut(id) {
            minion.hunger = 99.99;
        }
        let summary = run_tick(&mut state, &mut StubOracle::silent());
        assert_eq!(summary.deaths.len(), 1);
        assert_eq!(summary.population, 0);
        assert!(state.minions.is_empty());
    }

    #[test]
    fn newborns_join_the_population() {
        let mut config = make_static_config();
        config.oracle.enabled = false;
        let mut state = SimulationState::new(&config).unwrap();
        let mother = spawn(&mut state, Position::new(300.0, 300.0));
        let father = state.minions.spawn(
            make_genetics(Gender::Male),
            Position::new(305.0, 300.0),
            &state.vitals,
            &mut state.rng,
        );
        if let Some(minion) = state.minions.get_mut(mother) {
            minion.state = BehaviorState::Mate;
        }
        if let Some(minion) = state.minions.get_mut(father) {
            minion.age = 30.0;
        }

        let summary = run_tick(&mut state, &mut StubOracle::silent());
        assert_eq!(summary.births.len(), 1);
        assert_eq!(summary.population, 3);
        let child = summary.births.first().and_then(|id| state.minions.get(*id)).unwrap();
        assert_eq!(child.generation, 2);
        assert_eq!(child.traits, vec![String::from("A")]);
    }
}
