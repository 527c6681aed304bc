//! Component definitions for combatants.

use serde::{Deserialize, Serialize};

/// HP and cursed energy pools for a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsComponent {
    pub current_hp: i32,
    pub max_hp: i32,
    pub current_energy: i32,
    pub max_energy: i32,
}

impl StatsComponent {
    /// Create a stat block with both pools full.
    pub fn new(max_hp: i32, max_energy: i32) -> Self {
        Self {
            current_hp: max_hp,
            max_hp,
            current_energy: max_energy,
            max_energy,
        }
    }

    /// Refill both pools to their maximums.
    pub fn reset_to_max(&mut self) {
        self.current_hp = self.max_hp;
        self.current_energy = self.max_energy;
    }

    pub fn is_depleted(&self) -> bool {
        self.current_hp <= 0
    }
}

impl Default for StatsComponent {
    fn default() -> Self {
        Self::new(10, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_full() {
        let stats = StatsComponent::new(80, 40);
        assert_eq!(stats.current_hp, 80);
        assert_eq!(stats.current_energy, 40);
        assert!(!stats.is_depleted());
    }

    #[test]
    fn test_reset_to_max() {
        let mut stats = StatsComponent::new(50, 30);
        stats.current_hp = 0;
        stats.current_energy = 3;
        assert!(stats.is_depleted());

        stats.reset_to_max();
        assert_eq!(stats.current_hp, 50);
        assert_eq!(stats.current_energy, 30);
    }
}
