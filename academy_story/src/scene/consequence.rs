//! Consequence records attached to choices.

use academy_rules::{FlagValue, GameState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A fight the choice starts before traversal continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatTrigger {
    /// Enemy tag, resolved through the arc's enemy roster.
    pub enemy: String,
    #[serde(default)]
    pub allies: Vec<String>,
}

/// Everything a choice does.
///
/// Mutations are applied in a fixed order: traits, relationships, flags,
/// experience, achievements. Exactly one of `next_scene`, `next_arc`
/// (optionally with `next_scene`), or `game_over` must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consequence {
    pub traits: BTreeMap<String, i64>,
    pub relationships: BTreeMap<String, i64>,
    pub flags: BTreeMap<String, FlagValue>,
    pub experience: u64,
    pub achievements: Vec<String>,
    pub combat: Option<CombatTrigger>,
    pub next_arc: Option<u32>,
    pub next_scene: Option<String>,
    pub game_over: bool,
}

/// Where a consequence sends the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Another scene in the current arc.
    Scene(String),
    /// Another arc, at the given scene or at that arc's starting scene.
    Arc { arc: u32, scene: Option<String> },
    GameOver,
}

/// Ways a consequence record can fail to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConsequenceDefect {
    #[error("no next_scene, next_arc, or game_over")]
    NoTarget,

    #[error("game_over combined with a transition target")]
    AmbiguousTarget,

    #[error("combat cannot end the game directly")]
    CombatEndsGame,
}

impl Consequence {
    /// Create an empty consequence. Add a target before use.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trait(mut self, name: impl Into<String>, delta: i64) -> Self {
        *self.traits.entry(name.into()).or_insert(0) += delta;
        self
    }

    pub fn with_relationship(mut self, ally: impl Into<String>, delta: i64) -> Self {
        *self.relationships.entry(ally.into()).or_insert(0) += delta;
        self
    }

    pub fn with_flag(mut self, name: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(name.into(), value.into());
        self
    }

    pub fn with_experience(mut self, amount: u64) -> Self {
        self.experience += amount;
        self
    }

    pub fn with_achievement(mut self, id: impl Into<String>) -> Self {
        self.achievements.push(id.into());
        self
    }

    /// Start a fight against `enemy`, optionally alongside allies.
    pub fn with_combat(mut self, enemy: impl Into<String>, allies: &[&str]) -> Self {
        self.combat = Some(CombatTrigger {
            enemy: enemy.into(),
            allies: allies.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    pub fn to_scene(mut self, scene: impl Into<String>) -> Self {
        self.next_scene = Some(scene.into());
        self
    }

    /// Move to another arc's starting scene.
    pub fn to_arc(mut self, arc: u32) -> Self {
        self.next_arc = Some(arc);
        self
    }

    pub fn to_arc_scene(mut self, arc: u32, scene: impl Into<String>) -> Self {
        self.next_arc = Some(arc);
        self.next_scene = Some(scene.into());
        self
    }

    pub fn ending(mut self) -> Self {
        self.game_over = true;
        self
    }

    /// Resolve where this consequence leads.
    pub fn transition(&self) -> Result<Transition, ConsequenceDefect> {
        if self.game_over {
            if self.next_arc.is_some() || self.next_scene.is_some() {
                return Err(ConsequenceDefect::AmbiguousTarget);
            }
            if self.combat.is_some() {
                return Err(ConsequenceDefect::CombatEndsGame);
            }
            return Ok(Transition::GameOver);
        }

        match (self.next_arc, &self.next_scene) {
            (Some(arc), scene) => Ok(Transition::Arc {
                arc,
                scene: scene.clone(),
            }),
            (None, Some(scene)) => Ok(Transition::Scene(scene.clone())),
            (None, None) => Err(ConsequenceDefect::NoTarget),
        }
    }

    /// Apply every state mutation in order. Transitions are not applied here.
    pub fn apply(&self, state: &mut GameState) {
        for (name, delta) in &self.traits {
            state.adjust_trait(name, *delta);
        }
        for (ally, delta) in &self.relationships {
            state.adjust_relationship(ally, *delta);
        }
        for (name, value) in &self.flags {
            state.set_flag(name.clone(), value.clone());
        }
        state.gain_experience(self.experience);
        for id in &self.achievements {
            state.unlock_achievement(id.clone());
        }
    }
}
