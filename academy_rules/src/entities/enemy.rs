//! Enemy templates and the scaled enemies produced from them.

use serde::{Deserialize, Serialize};

use super::StatsComponent;

/// How an enemy scales against the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyGrade {
    /// Tracks the player's level.
    Ordinary,
    /// Always sits a fixed margin above the player, with a level floor.
    SpecialGrade,
}

/// Authored base stats for an enemy tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub base_hp: i32,
    pub base_energy: i32,
    pub grade: EnemyGrade,
    #[serde(default)]
    pub abilities: Vec<String>,
    /// AI behaviour pattern tag, interpreted by the combat resolver.
    #[serde(default)]
    pub behavior: Option<String>,
    /// Number of fight phases (1 for a single-phase enemy).
    #[serde(default = "default_phases")]
    pub phases: u8,
}

fn default_phases() -> u8 {
    1
}

impl EnemyTemplate {
    pub fn ordinary(name: impl Into<String>, base_hp: i32, base_energy: i32) -> Self {
        Self {
            name: name.into(),
            base_hp,
            base_energy,
            grade: EnemyGrade::Ordinary,
            abilities: Vec::new(),
            behavior: None,
            phases: 1,
        }
    }

    pub fn special_grade(name: impl Into<String>, base_hp: i32, base_energy: i32) -> Self {
        Self {
            grade: EnemyGrade::SpecialGrade,
            ..Self::ordinary(name, base_hp, base_energy)
        }
    }

    pub fn with_abilities(
        mut self,
        abilities: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.abilities.extend(abilities.into_iter().map(Into::into));
        self
    }

    pub fn with_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.behavior = Some(behavior.into());
        self
    }

    pub fn with_phases(mut self, phases: u8) -> Self {
        self.phases = phases.max(1);
        self
    }
}

/// A concrete enemy ready to hand to the combat resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// The content tag this enemy was created from.
    pub tag: String,
    pub name: String,
    pub grade: EnemyGrade,
    pub level: u32,
    pub stats: StatsComponent,
    pub abilities: Vec<String>,
    pub behavior: Option<String>,
    pub phases: u8,
}

impl Enemy {
    pub fn is_special_grade(&self) -> bool {
        self.grade == EnemyGrade::SpecialGrade
    }
}
