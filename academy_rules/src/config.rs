//! Balance configuration for enemy scaling.

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::mechanics::SpecialGradeRule;

/// Per-level growth applied to ordinary enemies, plus the fallback
/// special-grade rule used by the default tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    /// HP added per scaled level.
    pub hp_per_level: i32,

    /// Cursed energy added per scaled level.
    pub energy_per_level: i32,

    /// Rule for special-grade tags that no arc overrides.
    pub special_grade: SpecialGradeRule,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            hp_per_level: 10,
            energy_per_level: 5,
            special_grade: SpecialGradeRule::default(),
        }
    }
}

impl ScalingConfig {
    /// Parse a scaling configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, RulesError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = ScalingConfig::default();
        assert_eq!(config.hp_per_level, 10);
        assert_eq!(config.energy_per_level, 5);
        assert_eq!(config.special_grade.level_margin, 3);
        assert_eq!(config.special_grade.level_floor, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ScalingConfig::from_toml_str(
            r#"
            hp_per_level = 12

            [special_grade]
            level_floor = 14
            "#,
        )
        .unwrap();

        assert_eq!(config.hp_per_level, 12);
        assert_eq!(config.energy_per_level, 5);
        assert_eq!(config.special_grade.level_margin, 3);
        assert_eq!(config.special_grade.level_floor, 14);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = ScalingConfig::from_toml_str("hp_per_level = \"lots\"");
        assert!(matches!(result, Err(RulesError::InvalidConfig(_))));
    }
}
