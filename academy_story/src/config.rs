//! Engine configuration.

use academy_rules::ScalingConfig;
use serde::{Deserialize, Serialize};

use crate::error::StoryError;
use crate::traversal::CombatLossPolicy;

/// Configuration for the traversal engine.
///
/// Loaded from TOML; every key is optional.
///
/// ```toml
/// starting_arc = 1
/// enforce_requirements = true
/// combat_loss = "retry_scene"
///
/// [scaling]
/// hp_per_level = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Arc a new session starts in.
    pub starting_arc: u32,

    /// Refuse to display or act on scenes whose requirements fail.
    pub enforce_requirements: bool,

    /// What a combat defeat does. Content ships no defeat branches.
    pub combat_loss: CombatLossPolicy,

    pub scaling: ScalingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_arc: 1,
            enforce_requirements: true,
            combat_loss: CombatLossPolicy::default(),
            scaling: ScalingConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, StoryError> {
        Ok(toml::from_str(text)?)
    }
}
