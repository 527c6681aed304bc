//! Scene access requirements.

use academy_rules::{FlagValue, GameState};
use serde::{Deserialize, Serialize};

/// One condition a scene needs before it can be shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// The flag is present and truthy.
    FlagSet { flag: String },

    /// The flag is present with this value. Integers and floats compare
    /// numerically.
    FlagEquals { flag: String, value: FlagValue },

    /// Relationship with the ally is at least `min`.
    RelationshipAtLeast { ally: String, min: i64 },

    /// The trait is at least `min`.
    TraitAtLeast { name: String, min: i64 },
}

impl Requirement {
    pub fn flag_set(flag: impl Into<String>) -> Self {
        Requirement::FlagSet { flag: flag.into() }
    }

    pub fn flag_equals(flag: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        Requirement::FlagEquals {
            flag: flag.into(),
            value: value.into(),
        }
    }

    pub fn relationship_at_least(ally: impl Into<String>, min: i64) -> Self {
        Requirement::RelationshipAtLeast {
            ally: ally.into(),
            min,
        }
    }

    pub fn trait_at_least(name: impl Into<String>, min: i64) -> Self {
        Requirement::TraitAtLeast {
            name: name.into(),
            min,
        }
    }

    /// Check the requirement against the current state.
    pub fn is_met(&self, state: &GameState) -> bool {
        match self {
            Requirement::FlagSet { flag } => state.has_flag(flag),
            Requirement::FlagEquals { flag, value } => {
                state.flag(flag).is_some_and(|current| current.matches(value))
            }
            Requirement::RelationshipAtLeast { ally, min } => state.relationship(ally) >= *min,
            Requirement::TraitAtLeast { name, min } => state.trait_value(name) >= *min,
        }
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::FlagSet { flag } => write!(f, "flag '{}'", flag),
            Requirement::FlagEquals { flag, value } => write!(f, "flag '{}' = {:?}", flag, value),
            Requirement::RelationshipAtLeast { ally, min } => {
                write!(f, "relationship with {} >= {}", ally, min)
            }
            Requirement::TraitAtLeast { name, min } => write!(f, "{} >= {}", name, min),
        }
    }
}
