//! Combat hand-off types.
//!
//! The engine never resolves a fight. It returns a [`CombatRequest`], parks the
//! session, and waits for a [`CombatOutcome`].

use academy_rules::Enemy;
use serde::{Deserialize, Serialize};

/// Story flag holding the outcome of the most recent fight.
pub const LAST_COMBAT_OUTCOME_FLAG: &str = "last_combat_outcome";

/// What the combat resolver is asked to fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatRequest {
    pub enemy: Enemy,
    pub allies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

impl CombatOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombatOutcome::Victory => "victory",
            CombatOutcome::Defeat => "defeat",
            CombatOutcome::Fled => "fled",
        }
    }
}

/// How a defeat is handled. Content has no authored defeat branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatLossPolicy {
    /// Continue to the declared next scene, as on victory.
    #[default]
    Proceed,
    /// Stay on the scene that started the fight.
    RetryScene,
    /// End the session.
    GameOver,
}

/// The external combat collaborator.
pub trait CombatResolver {
    fn resolve(&mut self, request: &CombatRequest) -> CombatOutcome;
}

impl<F> CombatResolver for F
where
    F: FnMut(&CombatRequest) -> CombatOutcome,
{
    fn resolve(&mut self, request: &CombatRequest) -> CombatOutcome {
        self(request)
    }
}
