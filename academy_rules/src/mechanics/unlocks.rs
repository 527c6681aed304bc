//! Combo unlock rules.
//!
//! Every catalogue combo has its own hand-written predicate over story flags,
//! relationships, and the events of the most recent encounter. Unlocked combos
//! are recorded as boolean story flags on the game state and added to its
//! learned techniques.

use std::collections::HashSet;
use tracing::info;

use crate::state::GameState;

type UnlockPredicate = fn(&GameState, &HashSet<String>) -> bool;

/// Unlock rules in catalogue order.
const UNLOCK_RULES: [(&str, UnlockPredicate); 7] = [
    ("divergent_fist_barrage", divergent_fist_barrage),
    ("shadow_puppet_ambush", shadow_puppet_ambush),
    ("resonance_nail_strike", resonance_nail_strike),
    ("first_year_trinity", first_year_trinity),
    ("boogie_woogie_swap", boogie_woogie_swap),
    ("cursed_tool_relay", cursed_tool_relay),
    ("backup_strike", backup_strike),
];

/// Story flag recording that a combo has been unlocked.
pub fn combo_flag(combo_id: &str) -> String {
    format!("combo_unlocked:{combo_id}")
}

pub fn is_combo_unlocked(state: &GameState, combo_id: &str) -> bool {
    state.has_flag(&combo_flag(combo_id))
}

/// Combo ids whose unlock rule holds now and that were not unlocked before.
pub fn check_combo_unlocks(state: &GameState, recent_events: &HashSet<String>) -> Vec<String> {
    UNLOCK_RULES
        .iter()
        .filter(|(id, _)| !is_combo_unlocked(state, id))
        .filter(|(_, predicate)| predicate(state, recent_events))
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Run [`check_combo_unlocks`], then flag and learn every newly unlocked combo.
pub fn unlock_combos(state: &mut GameState, recent_events: &HashSet<String>) -> Vec<String> {
    let unlocked = check_combo_unlocks(state, recent_events);
    for id in &unlocked {
        info!(combo = %id, "combo unlocked");
        state.set_flag(combo_flag(id), true);
        state.learn_technique(id.clone());
    }
    unlocked
}

fn divergent_fist_barrage(state: &GameState, events: &HashSet<String>) -> bool {
    state.relationship("yuji") >= 60
        && state.has_flag("helped_injured_student")
        && events.contains("fought_alongside_yuji")
}

fn shadow_puppet_ambush(state: &GameState, events: &HashSet<String>) -> bool {
    state.relationship("megumi") >= 60
        && state.has_flag("survived_detention_center")
        && events.contains("fought_alongside_megumi")
}

fn resonance_nail_strike(state: &GameState, events: &HashSet<String>) -> bool {
    state.relationship("nobara") >= 60
        && events.contains("fought_alongside_nobara")
        && events.contains("ally_in_danger")
}

// Needs the three pair techniques first.
fn first_year_trinity(state: &GameState, _events: &HashSet<String>) -> bool {
    ["yuji", "megumi", "nobara"]
        .iter()
        .all(|ally| state.relationship(ally) >= 75)
        && state.has_flag("kyoto_exchange_complete")
        && ["divergent_fist_barrage", "shadow_puppet_ambush", "resonance_nail_strike"]
            .iter()
            .all(|id| is_combo_unlocked(state, id))
}

fn boogie_woogie_swap(state: &GameState, events: &HashSet<String>) -> bool {
    state.relationship("todo") >= 70
        && state.has_flag("trained_with_todo")
        && events.contains("black_flash")
}

fn cursed_tool_relay(state: &GameState, events: &HashSet<String>) -> bool {
    state.relationship("maki") >= 65
        && state.has_flag("kyoto_exchange_complete")
        && events.contains("fought_alongside_maki")
}

fn backup_strike(state: &GameState, events: &HashSet<String>) -> bool {
    state.relationships.values().any(|score| *score >= 40) && events.contains("ally_in_danger")
}
