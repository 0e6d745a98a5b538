//! Executing a minion's behavior for one tick.
//!
//! The acting minion is passed in checked out of the population (see
//! [`MinionRegistry::checkout`]), so every other minion can be targeted and
//! mutated without aliasing it. Targets are re-resolved every tick from
//! current positions.
//!
//! [`MinionRegistry::checkout`]: crate::registry::MinionRegistry::checkout

use rand::Rng;
use vivarium_types::{BehaviorState, Gender, Minion, MinionId, ResourceKind};
use vivarium_world::{ResourceRegistry, WorldBounds};

use crate::combat;
use crate::config::{BehaviorConfig, InteractionConfig, VitalsConfig};
use crate::movement;
use crate::policy;
use crate::registry::MinionRegistry;
use crate::reproduction;

/// Everything behavior execution reads besides the entities themselves.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Policy and feeding parameters.
    pub behavior: &'a BehaviorConfig,
    /// Combat and breeding parameters.
    pub interaction: &'a InteractionConfig,
    /// Growth parameters, used for newborns.
    pub vitals: &'a VitalsConfig,
    /// The playfield.
    pub bounds: &'a WorldBounds,
    /// Tick-delta scalar.
    pub delta: f64,
}

/// What a minion did this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    /// Stood still (sleeping).
    Idle,
    /// Moved toward a target.
    Moved,
    /// In range but waiting (cooldown, or a male waiting on the female).
    Holding,
    /// No target exists for the current behavior.
    NoTarget,
    /// Ate at a food source.
    Ate,
    /// Drank at a water source.
    Drank,
    /// Hit another minion.
    Struck {
        /// The defender.
        target: MinionId,
        /// Damage dealt.
        damage: f64,
    },
    /// Gave birth. The child is already in the population.
    Born {
        /// The newborn.
        child: MinionId,
    },
}

/// Run the actor's current behavior for one tick.
pub fn execute_behavior(
    actor: &mut Minion,
    population: &mut MinionRegistry,
    resources: &ResourceRegistry,
    ctx: &ActionContext<'_>,
    rng: &mut impl Rng,
) -> ActionOutcome {
    match actor.state {
        BehaviorState::Wander => {
            movement::wander(actor, ctx.behavior, ctx.bounds, ctx.delta, rng);
            ActionOutcome::Moved
        }
        BehaviorState::Eat | BehaviorState::Drink => seek_resource(actor, resources, ctx, rng),
        BehaviorState::Attack => hunt(actor, population, ctx),
        BehaviorState::Mate => court(actor, population, ctx, rng),
        BehaviorState::Sleep => ActionOutcome::Idle,
    }
}

/// Walk to the nearest food or water and consume it on arrival.
fn seek_resource(
    actor: &mut Minion,
    resources: &ResourceRegistry,
    ctx: &ActionContext<'_>,
    rng: &mut impl Rng,
) -> ActionOutcome {
    let drinking = actor.state == BehaviorState::Drink;
    let (kind, radius) = if drinking {
        (ResourceKind::Water, ctx.behavior.drink_radius)
    } else {
        (ResourceKind::Food, ctx.behavior.eat_radius)
    };

    let Some(target) = resources.nearest_of_kind(actor.position, kind) else {
        // A critical need keeps the state pinned; roam in place of giving up.
        if policy::survival_override(actor, ctx.behavior) == Some(actor.state) {
            movement::wander(actor, ctx.behavior, ctx.bounds, ctx.delta, rng);
        } else {
            actor.set_state(BehaviorState::Wander);
        }
        return ActionOutcome::NoTarget;
    };

    if actor.position.distance_to(target) < radius {
        let outcome = if drinking {
            actor.thirst = (actor.thirst - ctx.behavior.drink_relief).max(0.0);
            ActionOutcome::Drank
        } else {
            actor.hunger = (actor.hunger - ctx.behavior.eat_relief).max(0.0);
            ActionOutcome::Ate
        };
        actor.set_state(BehaviorState::Wander);
        return outcome;
    }

    actor.move_target = Some(target);
    movement::move_toward(actor, target, ctx.delta, ctx.bounds);
    ActionOutcome::Moved
}

/// Chase the nearest minion of another family and strike when in range.
fn hunt(actor: &mut Minion, population: &mut MinionRegistry, ctx: &ActionContext<'_>) -> ActionOutcome {
    let family = actor.family_id;
    let enemy = population
        .nearest_where(actor.position, ctx.behavior.search_radius, |m| m.family_id != family)
        .map(|m| (m.id, m.position));
    let Some((enemy_id, enemy_position)) = enemy else {
        actor.set_state(BehaviorState::Wander);
        return ActionOutcome::NoTarget;
    };

    actor.interaction_target = Some(enemy_id);
    if actor.position.distance_to(enemy_position) > ctx.interaction.attack_range {
        actor.move_target = Some(enemy_position);
        movement::move_toward(actor, enemy_position, ctx.delta, ctx.bounds);
        return ActionOutcome::Moved;
    }
    if !combat::can_strike(actor) {
        return ActionOutcome::Holding;
    }
    match population.get_mut(enemy_id) {
        Some(defender) => {
            let damage = combat::strike(actor, defender, ctx.interaction);
            ActionOutcome::Struck {
                target: enemy_id,
                damage,
            }
        }
        None => ActionOutcome::Holding,
    }
}

/// Approach the nearest eligible partner; a female in range gives birth.
fn court(
    actor: &mut Minion,
    population: &mut MinionRegistry,
    ctx: &ActionContext<'_>,
    rng: &mut impl Rng,
) -> ActionOutcome {
    let gender = actor.gender;
    let partner = population
        .nearest_where(actor.position, ctx.behavior.search_radius, |m| {
            reproduction::is_eligible_partner(gender, m, ctx.interaction)
        })
        .map(|m| (m.id, m.position));
    let Some((partner_id, partner_position)) = partner else {
        actor.set_state(BehaviorState::Wander);
        return ActionOutcome::NoTarget;
    };

    actor.interaction_target = Some(partner_id);
    if actor.position.distance_to(partner_position) > ctx.interaction.mating_range {
        actor.move_target = Some(partner_position);
        movement::move_toward(actor, partner_position, ctx.delta, ctx.bounds);
        return ActionOutcome::Moved;
    }
    if gender != Gender::Female {
        return ActionOutcome::Holding;
    }

    let child = match population.get_mut(partner_id) {
        Some(father) if reproduction::can_breed(actor, father, ctx.interaction) => {
            reproduction::breed(actor, father, ctx.interaction, ctx.vitals, rng)
        }
        _ => return ActionOutcome::Holding,
    };
    let child = population.insert(child);
    ActionOutcome::Born { child }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use vivarium_types::{FamilyId, Position};

    use super::*;
    use crate::test_support::{approx, make_bounds, make_minion_at};

    struct Fixture {
        behavior: BehaviorConfig,
        interaction: InteractionConfig,
        vitals: VitalsConfig,
        bounds: WorldBounds,
        rng: StdRng,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                behavior: BehaviorConfig::default(),
                interaction: InteractionConfig::default(),
                vitals: VitalsConfig::default(),
                bounds: make_bounds(),
                rng: StdRng::seed_from_u64(42),
            }
        }

        fn run(
            &mut self,
            actor: &mut Minion,
            population: &mut MinionRegistry,
            resources: &ResourceRegistry,
        ) -> ActionOutcome {
            let ctx = ActionContext {
                behavior: &self.behavior,
                interaction: &self.interaction,
                vitals: &self.vitals,
                bounds: &self.bounds,
                delta: 1.0,
            };
            execute_behavior(actor, population, resources, &ctx, &mut self.rng)
        }
    }

    #[test]
    fn drinking_on_arrival_relieves_thirst_once() {
        let mut fx = Fixture::new();
        let mut resources = ResourceRegistry::new();
        resources.place(ResourceKind::Water, Position::new(130.0, 100.0), 0.5);
        let mut population = MinionRegistry::new();
        let mut actor = make_minion_at(Position::new(100.0, 100.0));
        actor.thirst = 80.0;
        actor.state = BehaviorState::Drink;

        assert_eq!(fx.run(&mut actor, &mut population, &resources), ActionOutcome::Drank);
        assert!(approx(actor.thirst, 40.0));
        assert_eq!(actor.state, BehaviorState::Wander);
    }

    #[test]
    fn eating_moves_first_when_out_of_range() {
        let mut fx = Fixture::new();
        let mut resources = ResourceRegistry::new();
        resources.place(ResourceKind::Food, Position::new(200.0, 100.0), 0.2);
        let mut population = MinionRegistry::new();
        let mut actor = make_minion_at(Position::new(100.0, 100.0));
        actor.hunger = 80.0;
        actor.state = BehaviorState::Eat;

        assert_eq!(fx.run(&mut actor, &mut population, &resources), ActionOutcome::Moved);
        assert!(approx(actor.hunger, 80.0));
        assert!(actor.position.x > 100.0);
    }

    #[test]
    fn starving_without_food_stays_in_eat() {
        let mut fx = Fixture::new();
        let resources = ResourceRegistry::new();
        let mut population = MinionRegistry::new();
        let mut actor = make_minion_at(Position::new(300.0, 300.0));
        actor.hunger = 80.0;
        actor.state = BehaviorState::Eat;

        assert_eq!(fx.run(&mut actor, &mut population, &resources), ActionOutcome::NoTarget);
        assert_eq!(actor.state, BehaviorState::Eat);
        assert!(approx(actor.hunger, 80.0));
    }

    #[test]
    fn oracle_chosen_eat_without_food_reverts_to_wander() {
        let mut fx = Fixture::new();
        let resources = ResourceRegistry::new();
        let mut population = MinionRegistry::new();
        let mut actor = make_minion_at(Position::new(300.0, 300.0));
        actor.state = BehaviorState::Eat;

        assert_eq!(fx.run(&mut actor, &mut population, &resources), ActionOutcome::NoTarget);
        assert_eq!(actor.state, BehaviorState::Wander);
    }

    #[test]
    fn attack_ignores_own_family_and_strikes_enemies() {
        let mut fx = Fixture::new();
        let resources = ResourceRegistry::new();
        let mut population = MinionRegistry::new();
        let mut actor = make_minion_at(Position::new(100.0, 100.0));
        actor.state = BehaviorState::Attack;
        actor.atk = 10.0;

        let mut kin = make_minion_at(Position::new(105.0, 100.0));
        kin.family_id = actor.family_id;
        population.insert(kin);
        let mut enemy = make_minion_at(Position::new(120.0, 100.0));
        enemy.family_id = FamilyId::new();
        enemy.def = 4.0;
        let enemy_id = population.insert(enemy);

        let outcome = fx.run(&mut actor, &mut population, &resources);
        assert_eq!(
            outcome,
            ActionOutcome::Struck {
                target: enemy_id,
                damage: 8.0
            }
        );
        assert!(population.get(enemy_id).is_some_and(|e| approx(e.hp, 92.0)));

        // Cooling down: holds position instead of striking again.
        assert_eq!(fx.run(&mut actor, &mut population, &resources), ActionOutcome::Holding);
    }

    #[test]
    fn attack_without_enemy_reverts_to_wander() {
        let mut fx = Fixture::new();
        let resources = ResourceRegistry::new();
        let mut population = MinionRegistry::new();
        let mut actor = make_minion_at(Position::new(100.0, 100.0));
        actor.state = BehaviorState::Attack;
        let mut far_enemy = make_minion_at(Position::new(700.0, 500.0));
        far_enemy.family_id = FamilyId::new();
        population.insert(far_enemy);

        assert_eq!(fx.run(&mut actor, &mut population, &resources), ActionOutcome::NoTarget);
        assert_eq!(actor.state, BehaviorState::Wander);
    }

    #[test]
    fn female_in_range_gives_birth() {
        let mut fx = Fixture::new();
        let resources = ResourceRegistry::new();
        let mut population = MinionRegistry::new();
        let mut mother = make_minion_at(Position::new(100.0, 100.0));
        mother.gender = Gender::Female;
        mother.state = BehaviorState::Mate;
        let mut father = make_minion_at(Position::new(110.0, 100.0));
        father.gender = Gender::Male;
        father.age = 25.0;
        let father_id = population.insert(father);

        let outcome = fx.run(&mut mother, &mut population, &resources);
        assert!(matches!(outcome, ActionOutcome::Born { .. }));
        if let ActionOutcome::Born { child } = outcome {
            assert!(population.get(child).is_some_and(|c| c.family_id == mother.family_id));
        }
        assert!(population.get(father_id).is_some_and(|f| approx(f.mate_cooldown, 1000.0)));
        assert_eq!(population.len(), 2);
    }

    #[test]
    fn male_in_range_waits() {
        let mut fx = Fixture::new();
        let resources = ResourceRegistry::new();
        let mut population = MinionRegistry::new();
        let mut male = make_minion_at(Position::new(100.0, 100.0));
        male.gender = Gender::Male;
        male.state = BehaviorState::Mate;
        let mut female = make_minion_at(Position::new(110.0, 100.0));
        female.gender = Gender::Female;
        female.age = 25.0;
        population.insert(female);

        assert_eq!(fx.run(&mut male, &mut population, &resources), ActionOutcome::Holding);
        assert_eq!(population.len(), 1);
    }

    #[test]
    fn sleeping_minions_do_not_move() {
        let mut fx = Fixture::new();
        let resources = ResourceRegistry::new();
        let mut population = MinionRegistry::new();
        let mut actor = make_minion_at(Position::new(100.0, 100.0));
        actor.state = BehaviorState::Sleep;

        assert_eq!(fx.run(&mut actor, &mut population, &resources), ActionOutcome::Idle);
        assert_eq!(actor.position, Position::new(100.0, 100.0));
    }
}
