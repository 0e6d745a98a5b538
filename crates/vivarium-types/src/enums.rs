//! Enumeration types shared by the simulation and its collaborators.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The behavior a minion is currently pursuing.
///
/// Serialized in `SCREAMING_SNAKE_CASE`, which is also the vocabulary the
/// decision oracle answers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum BehaviorState {
    /// Roam toward random nearby points.
    #[default]
    Wander,
    /// Walk to the nearest food source and eat.
    Eat,
    /// Walk to the nearest water source and drink.
    Drink,
    /// Hunt the nearest minion of another family.
    Attack,
    /// Seek the nearest adult of the opposite gender.
    Mate,
    /// Stand still and recover energy. Only the oracle can end it.
    Sleep,
}

impl BehaviorState {
    /// Every behavior, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Wander,
        Self::Eat,
        Self::Drink,
        Self::Attack,
        Self::Mate,
        Self::Sleep,
    ];

    /// The wire name of this behavior (e.g. `"DRINK"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wander => "WANDER",
            Self::Eat => "EAT",
            Self::Drink => "DRINK",
            Self::Attack => "ATTACK",
            Self::Mate => "MATE",
            Self::Sleep => "SLEEP",
        }
    }

    /// Parse an action name leniently.
    ///
    /// Surrounding whitespace and quotes are ignored and matching is
    /// case-insensitive. Returns `None` for anything that is not one of
    /// the six behavior names.
    pub fn parse_action(raw: &str) -> Option<Self> {
        let cleaned = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(cleaned))
    }
}

impl core::fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a static world resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// A food source (drawn as a tree).
    #[serde(alias = "TREE")]
    Food,
    /// A water source.
    Water,
    /// A decorative obstacle (drawn as a rock). Has no behavior attached.
    #[serde(alias = "ROCK")]
    Obstacle,
}

impl ResourceKind {
    /// Lowercase category name used in oracle requests.
    pub const fn category(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Water => "water",
            Self::Obstacle => "obstacle",
        }
    }
}

/// Binary gender of a minion. Breeding pairs must differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Gender {
    /// Male. Never carries offspring.
    Male,
    /// Female. Resolves breeding and carries the family line.
    Female,
}

impl Gender {
    /// The other gender.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}
