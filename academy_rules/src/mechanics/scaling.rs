//! Enemy creation and level scaling.
//!
//! Ordinary enemies track the player: every level past the first adds a fixed
//! amount of HP and energy. Special-grade enemies keep their authored stats and
//! always sit above the player via a margin-plus-floor level rule.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::config::ScalingConfig;
use crate::entities::{Enemy, EnemyGrade, EnemyTemplate, StatsComponent};

/// Tag used when neither an arc nor the default tier knows the requested tag.
pub const FALLBACK_ENEMY_TAG: &str = "grade_3_curse";

/// The shared default tier: (tag, base HP, base energy), weakest first.
pub const DEFAULT_ENEMY_TIERS: [(&str, i32, i32); 6] = [
    ("weak_curse", 30, 20),
    ("grade_4_curse", 50, 30),
    ("grade_3_curse", 80, 40),
    ("grade_2_curse", 120, 60),
    ("grade_1_curse", 180, 90),
    ("special_grade", 300, 150),
];

/// Level rule for special-grade enemies: `max(player_level + margin, floor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialGradeRule {
    pub level_margin: u32,
    pub level_floor: u32,
}

impl SpecialGradeRule {
    pub fn new(level_margin: u32, level_floor: u32) -> Self {
        Self {
            level_margin,
            level_floor,
        }
    }

    /// Enemy level for a given player level.
    pub fn level_for(&self, player_level: u32) -> u32 {
        player_level
            .saturating_add(self.level_margin)
            .max(self.level_floor)
    }
}

impl Default for SpecialGradeRule {
    fn default() -> Self {
        Self::new(3, 10)
    }
}

/// Look up a tag in the default tier.
pub fn default_template(tag: &str) -> Option<EnemyTemplate> {
    DEFAULT_ENEMY_TIERS
        .iter()
        .find(|(tier, _, _)| *tier == tag)
        .map(|(tier, hp, energy)| tier_template(tier, *hp, *energy))
}

fn tier_template(tag: &str, hp: i32, energy: i32) -> EnemyTemplate {
    let name = tag.replace('_', " ");
    if tag == "special_grade" {
        EnemyTemplate::special_grade(name, hp, energy)
    } else {
        EnemyTemplate::ordinary(name, hp, energy)
    }
}

/// Look up a tag in the default tier, falling back to [`FALLBACK_ENEMY_TAG`]
/// so content can reference enemies that have not been written yet.
pub fn default_template_or_fallback(tag: &str) -> EnemyTemplate {
    default_template(tag).unwrap_or_else(|| {
        warn!(tag, fallback = FALLBACK_ENEMY_TAG, "unknown enemy tag, using fallback tier");
        tier_template(FALLBACK_ENEMY_TAG, 80, 40)
    })
}

/// Create an enemy from the default tier outside any arc, using the
/// configured special-grade rule.
pub fn default_enemy(tag: &str, player_level: u32, config: &ScalingConfig) -> Enemy {
    let template = default_template_or_fallback(tag);
    scale_enemy(tag, &template, player_level, config, &config.special_grade)
}

/// Turn a template into a concrete enemy for the given player level.
pub fn scale_enemy(
    tag: &str,
    template: &EnemyTemplate,
    player_level: u32,
    config: &ScalingConfig,
    special_grade: &SpecialGradeRule,
) -> Enemy {
    let (level, mut stats) = match template.grade {
        EnemyGrade::Ordinary => {
            let scaled_levels =
                i32::try_from(player_level.saturating_sub(1).max(1)).unwrap_or(i32::MAX);
            let stats = StatsComponent::new(
                template
                    .base_hp
                    .saturating_add(scaled_levels.saturating_mul(config.hp_per_level)),
                template
                    .base_energy
                    .saturating_add(scaled_levels.saturating_mul(config.energy_per_level)),
            );
            (player_level.max(1), stats)
        }
        EnemyGrade::SpecialGrade => (
            special_grade.level_for(player_level),
            StatsComponent::new(template.base_hp, template.base_energy),
        ),
    };
    stats.reset_to_max();

    Enemy {
        tag: tag.to_string(),
        name: template.name.clone(),
        grade: template.grade,
        level,
        stats,
        abilities: template.abilities.clone(),
        behavior: template.behavior.clone(),
        phases: template.phases,
    }
}

/// Per-arc enemy table layered over the default tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyRoster {
    overrides: HashMap<String, EnemyTemplate>,
    special_grade: SpecialGradeRule,
}

impl EnemyRoster {
    /// Create a roster with no overrides and the given special-grade rule.
    pub fn new(special_grade: SpecialGradeRule) -> Self {
        Self {
            overrides: HashMap::new(),
            special_grade,
        }
    }

    /// Register an arc-specific template for a tag.
    pub fn with_enemy(mut self, tag: impl Into<String>, template: EnemyTemplate) -> Self {
        self.overrides.insert(tag.into(), template);
        self
    }

    /// Create an enemy, taking the template from the default tier for tags this
    /// roster does not override. Special grades always use this roster's rule.
    pub fn create_enemy(&self, tag: &str, player_level: u32, config: &ScalingConfig) -> Enemy {
        match self.overrides.get(tag) {
            Some(template) => scale_enemy(tag, template, player_level, config, &self.special_grade),
            None => {
                let template = default_template_or_fallback(tag);
                scale_enemy(tag, &template, player_level, config, &self.special_grade)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers_resolve() {
        for (tag, hp, _) in DEFAULT_ENEMY_TIERS {
            let template = default_template(tag).unwrap();
            assert_eq!(template.base_hp, hp);
        }
        assert_eq!(
            default_template("special_grade").unwrap().grade,
            EnemyGrade::SpecialGrade
        );
    }

    #[test]
    fn test_ordinary_scaling_formula() {
        let config = ScalingConfig::default();

        // Level 1 still gets one scaled level.
        let enemy = default_enemy("weak_curse", 1, &config);
        assert_eq!(enemy.level, 1);
        assert_eq!(enemy.stats.max_hp, 40);
        assert_eq!(enemy.stats.max_energy, 25);

        let enemy = default_enemy("grade_2_curse", 5, &config);
        assert_eq!(enemy.level, 5);
        assert_eq!(enemy.stats.max_hp, 120 + 4 * 10);
        assert_eq!(enemy.stats.max_energy, 60 + 4 * 5);
        assert_eq!(enemy.stats.current_hp, enemy.stats.max_hp);
        assert_eq!(enemy.stats.current_energy, enemy.stats.max_energy);
    }

    #[test]
    fn test_level_zero_is_treated_as_one() {
        let enemy = default_enemy("grade_4_curse", 0, &ScalingConfig::default());
        assert_eq!(enemy.level, 1);
        assert_eq!(enemy.stats.max_hp, 60);
    }

    #[test]
    fn test_ordinary_scaling_is_monotonic() {
        let config = ScalingConfig::default();
        for level in 2..60 {
            let lower = default_enemy("grade_1_curse", level, &config);
            let higher = default_enemy("grade_1_curse", level + 1, &config);
            assert!(higher.stats.max_hp > lower.stats.max_hp);
            assert!(higher.stats.max_energy > lower.stats.max_energy);
        }
        // Levels 1 and 2 share the one-level floor.
        assert!(
            default_enemy("grade_1_curse", 2, &config).stats.max_hp
                >= default_enemy("grade_1_curse", 1, &config).stats.max_hp
        );
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        let config = ScalingConfig::default();
        let enemy = default_enemy("not_written_yet", 3, &config);
        let reference = default_enemy(FALLBACK_ENEMY_TAG, 3, &config);

        assert_eq!(enemy.tag, "not_written_yet");
        assert_eq!(enemy.stats, reference.stats);
        assert_eq!(enemy.grade, EnemyGrade::Ordinary);
    }

    #[test]
    fn test_special_grade_rule() {
        let rule = SpecialGradeRule::new(5, 12);
        assert_eq!(rule.level_for(1), 12);
        assert_eq!(rule.level_for(7), 12);
        assert_eq!(rule.level_for(8), 13);
        assert_eq!(rule.level_for(30), 35);
    }

    #[test]
    fn test_special_grade_always_outlevels_player() {
        let config = ScalingConfig::default();
        for level in 1..100 {
            let enemy = default_enemy("special_grade", level, &config);
            assert!(enemy.level > level);
            assert_eq!(enemy.stats.max_hp, 300);
        }
    }

    #[test]
    fn test_roster_override_and_delegation() {
        let config = ScalingConfig::default();
        let roster = EnemyRoster::new(SpecialGradeRule::new(8, 20)).with_enemy(
            "finger_bearer",
            EnemyTemplate::special_grade("Finger Bearer", 400, 200).with_phases(2),
        );

        let boss = roster.create_enemy("finger_bearer", 4, &config);
        assert_eq!(boss.level, 20);
        assert_eq!(boss.phases, 2);
        assert!(boss.is_special_grade());

        let grunt = roster.create_enemy("grade_4_curse", 4, &config);
        assert_eq!(grunt, default_enemy("grade_4_curse", 4, &config));
    }

    #[test]
    fn test_roster_rule_applies_to_default_tier_special_grade() {
        let config = ScalingConfig::default();
        let roster = EnemyRoster::new(SpecialGradeRule::new(8, 20));

        let enemy = roster.create_enemy("special_grade", 1, &config);
        assert_eq!(enemy.level, 20);
        assert_eq!(enemy.stats.max_hp, 300);
        assert_eq!(roster.create_enemy("special_grade", 15, &config).level, 23);

        // Outside a roster the configured rule applies.
        assert_eq!(default_enemy("special_grade", 1, &config).level, 10);
    }

    #[test]
    fn test_roster_unknown_tag_falls_back() {
        let config = ScalingConfig::default();
        let roster = EnemyRoster::new(SpecialGradeRule::new(5, 12));

        let enemy = roster.create_enemy("not_written_yet", 2, &config);
        assert_eq!(enemy.tag, "not_written_yet");
        assert_eq!(enemy.stats, default_enemy(FALLBACK_ENEMY_TAG, 2, &config).stats);
    }
}
