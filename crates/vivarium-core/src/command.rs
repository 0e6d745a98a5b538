//! Applying external commands to the world.
//!
//! Commands arrive between ticks (see [`crate::runner`]) and take effect
//! immediately. Removing something that is not there is a silent no-op.

use tracing::debug;
use vivarium_types::{MinionId, MinionView, ResourceId, WorldCommand};

use crate::tick::SimulationState;

/// The result of one [`WorldCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A founder was spawned.
    Spawned {
        /// Its identity.
        minion_id: MinionId,
    },
    /// A resource was placed.
    Placed {
        /// Its identity.
        resource_id: ResourceId,
    },
    /// A removal was attempted.
    Removed {
        /// Whether anything was within range.
        removed: bool,
    },
    /// A selection was made.
    Selected {
        /// Render view of the closest minion, if any was within range.
        minion: Option<Box<MinionView>>,
    },
}

/// Apply `command` to `state`.
///
/// Spawn and placement positions are clamped into the world.
pub fn apply_command(state: &mut SimulationState, command: WorldCommand) -> CommandOutcome {
    match command {
        WorldCommand::SpawnMinion { genetics, position } => {
            let position = state.bounds.clamp(position);
            let minion_id = state
                .minions
                .spawn(genetics, position, &state.vitals, &mut state.rng);
            CommandOutcome::Spawned { minion_id }
        }
        WorldCommand::PlaceResource {
            kind,
            position,
            size,
        } => {
            let position = state.bounds.clamp(position);
            let resource_id = state.resources.place(kind, position, size);
            CommandOutcome::Placed { resource_id }
        }
        WorldCommand::RemoveMinionNear { position, radius } => {
            let removed = state.minions.remove_near(position, radius);
            if let Some(minion) = &removed {
                debug!(minion_id = %minion.id, "Minion removed by command");
            }
            CommandOutcome::Removed {
                removed: removed.is_some(),
            }
        }
        WorldCommand::RemoveResourceNear { position, radius } => CommandOutcome::Removed {
            removed: state.resources.remove_near(position, radius).is_some(),
        },
        WorldCommand::SelectMinionAt { position, radius } => CommandOutcome::Selected {
            minion: state
                .minions
                .select_at(position, radius)
                .map(|minion| Box::new(MinionView::from(minion))),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vivarium_types::{Gender, Genetics, Position, ResourceKind};

    use super::*;
    use crate::config::SimulationConfig;

    fn make_state() -> SimulationState {
        let mut config = SimulationConfig::default();
        config.world.seed = Some(9);
        SimulationState::new(&config).unwrap()
    }

    fn spawn_command(x: f64, y: f64) -> WorldCommand {
        WorldCommand::SpawnMinion {
            genetics: Genetics {
                gender: Gender::Male,
                traits: Vec::new(),
                atk: 8.0,
                def: 2.0,
                speed: 1.0,
                max_hp: 60.0,
                family_id: None,
            },
            position: Position::new(x, y),
        }
    }

    #[test]
    fn spawn_then_select_then_remove() {
        let mut state = make_state();
        let spawned = apply_command(&mut state, spawn_command(200.0, 200.0));
        let minion_id = match spawned {
            CommandOutcome::Spawned { minion_id } => Some(minion_id),
            _ => None,
        }
        .unwrap();

        let selected = apply_command(
            &mut state,
            WorldCommand::SelectMinionAt {
                position: Position::new(205.0, 200.0),
                radius: 20.0,
            },
        );
        assert!(matches!(
            selected,
            CommandOutcome::Selected { minion: Some(ref m) } if m.minion.id == minion_id
        ));
        assert_eq!(state.minions.len(), 1);

        let removed = apply_command(
            &mut state,
            WorldCommand::RemoveMinionNear {
                position: Position::new(205.0, 200.0),
                radius: 20.0,
            },
        );
        assert_eq!(removed, CommandOutcome::Removed { removed: true });
        assert!(state.minions.is_empty());
    }

    #[test]
    fn removing_nothing_is_a_no_op() {
        let mut state = make_state();
        let outcome = apply_command(
            &mut state,
            WorldCommand::RemoveResourceNear {
                position: Position::new(10.0, 10.0),
                radius: 5.0,
            },
        );
        assert_eq!(outcome, CommandOutcome::Removed { removed: false });
    }

    #[test]
    fn placements_are_clamped_into_the_world() {
        let mut state = make_state();
        apply_command(
            &mut state,
            WorldCommand::PlaceResource {
                kind: ResourceKind::Food,
                position: Position::new(-50.0, 9000.0),
                size: 0.2,
            },
        );
        let placed = state.resources.iter().next().map(|r| r.position);
        assert_eq!(placed, Some(Position::new(0.0, 600.0)));
    }

    #[test]
    fn commands_parse_from_json_lines() {
        let mut state = make_state();
        let line = r#"{"type":"place_resource","kind":"WATER","position":{"x":50,"y":60},"size":0.5}"#;
        let command: WorldCommand = serde_json::from_str(line).unwrap();
        let outcome = apply_command(&mut state, command);
        assert!(matches!(outcome, CommandOutcome::Placed { .. }));
        assert_eq!(state.resources.len(), 1);
    }
}
