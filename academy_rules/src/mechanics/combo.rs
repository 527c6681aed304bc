//! Team-combo techniques.
//!
//! Combos are static definitions. Whether a combo is usable right now
//! ([`TeamCombo::is_available`]) depends only on who is present and how
//! close they are to the player; whether it has been narratively unlocked is
//! tracked separately as a story flag (see the `unlocks` module).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::RulesError;

/// Participant name for the player character.
pub const PLAYER: &str = "player";

/// Wildcard participant satisfied by the closest available ally.
pub const ANY_ALLY: &str = "any_ally";

/// Minimum relationship for a synthesized custom combo.
pub const CUSTOM_COMBO_THRESHOLD: i64 = 50;

/// A multi-participant technique gated by relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamCombo {
    pub id: String,
    pub name: String,
    /// Participant ids, including [`PLAYER`] and optionally [`ANY_ALLY`].
    pub participants: Vec<String>,
    /// Shared threshold every non-player participant must meet.
    pub relationship_requirement: i64,
    /// Always at least 1.0.
    pub damage_multiplier: f64,
    pub description: String,
    /// Effect tags carried through to the caller uninterpreted.
    pub special_effects: Vec<String>,
}

impl TeamCombo {
    /// Check whether every participant is present and close enough.
    pub fn is_available(
        &self,
        relationships: &BTreeMap<String, i64>,
        available_allies: &[&str],
    ) -> bool {
        let score = |ally: &str| relationships.get(ally).copied().unwrap_or(0);

        self.participants.iter().all(|participant| match participant.as_str() {
            PLAYER => true,
            ANY_ALLY => available_allies
                .iter()
                .map(|ally| score(*ally))
                .max()
                .is_some_and(|best| best >= self.relationship_requirement),
            ally => {
                available_allies.contains(&ally) && score(ally) >= self.relationship_requirement
            }
        })
    }
}

/// Result of executing a combo. The caller applies damage and effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboResult {
    pub combo_id: String,
    pub combo_name: String,
    pub damage: i64,
    pub participants: Vec<String>,
    pub special_effects: Vec<String>,
    pub description: String,
}

fn combo(
    id: &str,
    name: &str,
    participants: &[&str],
    relationship_requirement: i64,
    damage_multiplier: f64,
    description: &str,
    special_effects: &[&str],
) -> TeamCombo {
    TeamCombo {
        id: id.to_string(),
        name: name.to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        relationship_requirement,
        damage_multiplier,
        description: description.to_string(),
        special_effects: special_effects.iter().map(|e| e.to_string()).collect(),
    }
}

/// The authored combo catalogue.
pub fn combo_catalogue() -> Vec<TeamCombo> {
    vec![
        combo(
            "divergent_fist_barrage",
            "Divergent Fist Barrage",
            &[PLAYER, "yuji"],
            60,
            1.8,
            "Yuji's delayed cursed energy impact lands a beat after your strike.",
            &["stagger"],
        ),
        combo(
            "shadow_puppet_ambush",
            "Shadow Puppet Ambush",
            &[PLAYER, "megumi"],
            60,
            1.7,
            "Megumi's shikigami pin the target while you close the distance.",
            &["bind"],
        ),
        combo(
            "resonance_nail_strike",
            "Resonance Nail Strike",
            &[PLAYER, "nobara"],
            60,
            1.75,
            "Nobara drives a nail through the opening you create.",
            &["resonance"],
        ),
        combo(
            "first_year_trinity",
            "First-Year Trinity",
            &[PLAYER, "yuji", "megumi", "nobara"],
            75,
            2.5,
            "The whole first-year class strikes as one.",
            &["stagger", "bind", "resonance"],
        ),
        combo(
            "boogie_woogie_swap",
            "Boogie Woogie Swap",
            &[PLAYER, "todo"],
            70,
            2.0,
            "Todo claps and the two of you trade places mid-swing.",
            &["reposition", "confuse"],
        ),
        combo(
            "cursed_tool_relay",
            "Cursed Tool Relay",
            &[PLAYER, "maki"],
            65,
            1.9,
            "Maki passes you the right cursed tool at the right moment.",
            &["armor_break"],
        ),
        combo(
            "backup_strike",
            "Backup Strike",
            &[PLAYER, ANY_ALLY],
            40,
            1.3,
            "Whoever is closest covers your attack.",
            &["assist"],
        ),
    ]
}

/// Look up a catalogue combo by id.
pub fn find_combo(id: &str) -> Result<TeamCombo, RulesError> {
    combo_catalogue()
        .into_iter()
        .find(|combo| combo.id == id)
        .ok_or_else(|| RulesError::UnknownCombo(id.to_string()))
}

/// All catalogue combos usable with the allies currently present.
pub fn available_combos(
    relationships: &BTreeMap<String, i64>,
    available_allies: &[&str],
) -> Vec<TeamCombo> {
    let combos: Vec<_> = combo_catalogue()
        .into_iter()
        .filter(|combo| combo.is_available(relationships, available_allies))
        .collect();
    debug!(
        allies = ?available_allies,
        available = combos.len(),
        "evaluated combo availability"
    );
    combos
}

/// Synthesize a two-person combo from a relationship score.
///
/// Returns `None` below [`CUSTOM_COMBO_THRESHOLD`]. Above it the multiplier
/// grows linearly inside three bands:
///
/// | relationship | base | per point |
/// |--------------|------|-----------|
/// | 50-69        | 1.5  | 0.02      |
/// | 70-89        | 2.0  | 0.025     |
/// | 90+          | 2.5  | 0.03      |
pub fn create_custom_combo(player: &str, ally: &str, relationship_level: i64) -> Option<TeamCombo> {
    if relationship_level < CUSTOM_COMBO_THRESHOLD {
        return None;
    }

    type Band = (i64, f64, f64, &'static str, &'static [&'static str]);
    let (floor, base, slope, title, effects): Band = match relationship_level {
        50..=69 => (50, 1.5, 0.02, "Tandem Strike", &["synchronized"]),
        70..=89 => (70, 2.0, 0.025, "Resonant Assault", &["synchronized", "energy_surge"]),
        _ => (
            90,
            2.5,
            0.03,
            "Perfect Unison",
            &["synchronized", "energy_surge", "black_flash_chance"],
        ),
    };
    let multiplier = base + (relationship_level - floor) as f64 * slope;

    Some(TeamCombo {
        id: format!("custom_{player}_{ally}"),
        name: format!("{title}: {player} & {ally}"),
        participants: vec![player.to_string(), ally.to_string()],
        relationship_requirement: floor,
        damage_multiplier: multiplier,
        description: format!("A technique {player} and {ally} built together."),
        special_effects: effects.iter().map(|e| e.to_string()).collect(),
    })
}

/// Compute a combo's damage. Pure; nothing is applied to game state.
pub fn execute_combo(combo: &TeamCombo, base_damage: i64, participants: &[&str]) -> ComboResult {
    let damage = (base_damage as f64 * combo.damage_multiplier).floor() as i64;
    debug!(combo = %combo.id, base_damage, damage, "executed combo");

    ComboResult {
        combo_id: combo.id.clone(),
        combo_name: combo.name.clone(),
        damage,
        participants: participants.iter().map(|p| p.to_string()).collect(),
        special_effects: combo.special_effects.clone(),
        description: combo.description.clone(),
    }
}
