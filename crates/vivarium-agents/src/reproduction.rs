//! Breeding.
//!
//! Only the female resolves a birth, and only when she and her partner are
//! both off mate cooldown and within mating range. The child is placed on
//! the mother, joins her family and inherits the average of both parents'
//! combat stats.

use rand::Rng;
use tracing::info;
use vivarium_types::{Gender, Genetics, Minion};

use crate::config::{InteractionConfig, VitalsConfig};
use crate::vitals;

/// Whether `candidate` can be courted by a minion of `gender`.
pub fn is_eligible_partner(gender: Gender, candidate: &Minion, config: &InteractionConfig) -> bool {
    candidate.gender == gender.opposite() && candidate.age > config.mating_age
}

/// Whether `mother` and `father` can produce offspring right now.
pub fn can_breed(mother: &Minion, father: &Minion, config: &InteractionConfig) -> bool {
    mother.gender == Gender::Female
        && father.gender == Gender::Male
        && mother.mate_cooldown <= 0.0
        && father.mate_cooldown <= 0.0
        && mother.position.distance_to(father.position) <= config.mating_range
}

/// Merge parental trait tags: mother's first, then father's, deduplicated
/// in first-seen order and truncated to `max`.
pub fn merge_traits(mother: &[String], father: &[String], max: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(max);
    for tag in mother.iter().chain(father) {
        if merged.len() >= max {
            break;
        }
        if !merged.contains(tag) {
            merged.push(tag.clone());
        }
    }
    merged
}

/// Produce one offspring and put both parents on mate cooldown.
///
/// The caller checks [`can_breed`]. The mother goes back to wandering.
pub fn breed(
    mother: &mut Minion,
    father: &mut Minion,
    interaction: &InteractionConfig,
    vitals_config: &VitalsConfig,
    rng: &mut impl Rng,
) -> Minion {
    let gender = if rng.random_bool(0.5) {
        Gender::Male
    } else {
        Gender::Female
    };
    let genetics = Genetics {
        gender,
        traits: merge_traits(&mother.traits, &father.traits, interaction.max_traits),
        atk: f64::midpoint(mother.atk, father.atk),
        def: f64::midpoint(mother.def, father.def),
        speed: f64::midpoint(mother.speed, father.speed),
        max_hp: interaction.offspring_hp,
        family_id: Some(mother.family_id),
    };

    let mut child = Minion::new(genetics, mother.position);
    child.generation = mother.generation.saturating_add(1);
    child.tint = rng.random_range(0..=0x00FF_FFFF);
    vitals::update_growth(&mut child, vitals_config);

    mother.mate_cooldown = interaction.mate_cooldown;
    father.mate_cooldown = interaction.mate_cooldown;
    mother.set_state(vivarium_types::BehaviorState::Wander);

    info!(
        child_id = %child.id,
        mother_id = %mother.id,
        father_id = %father.id,
        family_id = %child.family_id,
        generation = child.generation,
        "Minion born"
    );
    child
}
