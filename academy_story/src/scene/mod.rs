//! Scene graph nodes: scenes, choices, consequences, and requirements.

mod consequence;
mod requirement;

pub use consequence::*;
pub use requirement::*;

use academy_rules::GameState;
use serde::{Deserialize, Serialize};

/// A player-selectable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub consequence: Consequence,
}

impl Choice {
    pub fn new(text: impl Into<String>, consequence: Consequence) -> Self {
        Self {
            text: text.into(),
            consequence,
        }
    }
}

/// A navigable node in an arc. Immutable once authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub text: String,
    pub location: String,
    /// Choices in display order; the engine indexes them from 0.
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl Scene {
    /// Create a scene with no text, location, or choices.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: String::new(),
            location: String::new(),
            choices: Vec::new(),
            requirements: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_choice(mut self, text: impl Into<String>, consequence: Consequence) -> Self {
        self.choices.push(Choice::new(text, consequence));
        self
    }

    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    /// The first requirement the state fails, if any.
    pub fn unmet_requirement(&self, state: &GameState) -> Option<&Requirement> {
        self.requirements.iter().find(|r| !r.is_met(state))
    }

    pub fn is_accessible(&self, state: &GameState) -> bool {
        self.unmet_requirement(state).is_none()
    }
}
