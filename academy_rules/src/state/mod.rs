//! Game state - the single mutable record a play session owns.
//!
//! Everything here serializes to a flat record of primitives so a host can
//! persist it however it likes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Experience needed for each player level.
pub const XP_PER_LEVEL: u64 = 100;

/// Traits every new session starts with.
pub const DEFAULT_TRAITS: [&str; 4] = ["compassion", "courage", "determination", "wisdom"];

/// Unique identifier for a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Story flag values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl FlagValue {
    /// Whether the flag counts as "set" when used as a gate.
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Bool(b) => *b,
            FlagValue::Int(n) => *n != 0,
            FlagValue::Float(f) => *f != 0.0,
            FlagValue::String(s) => !s.is_empty(),
        }
    }

    /// Compare two values, treating integers and floats as plain numbers.
    ///
    /// A persisted `3.0` may come back as `Int(3)`.
    pub fn matches(&self, other: &FlagValue) -> bool {
        match (self, other) {
            (FlagValue::Int(a), FlagValue::Float(b)) | (FlagValue::Float(b), FlagValue::Int(a)) => {
                *a as f64 == *b
            }
            _ => self == other,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        FlagValue::Int(value)
    }
}

impl From<f64> for FlagValue {
    fn from(value: f64) -> Self {
        FlagValue::Float(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::String(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::String(value)
    }
}

/// A combat encounter waiting on the external resolver.
///
/// The session stays at the scene that triggered the fight until the outcome
/// arrives; `resume_arc`/`resume_scene` is where it continues afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCombat {
    pub enemy: String,
    pub allies: Vec<String>,
    pub resume_arc: u32,
    pub resume_scene: String,
}

/// The complete state of one play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub session_id: SessionId,

    /// Numeric character traits, ordered by name. Unbounded.
    pub traits: BTreeMap<String, i64>,

    /// Ally id -> relationship score. Unbounded and may go negative.
    pub relationships: BTreeMap<String, i64>,

    /// Persistent story flags.
    pub flags: BTreeMap<String, FlagValue>,

    pub current_arc: u32,
    pub current_scene: String,

    pub experience: u64,

    /// Learned techniques, including every unlocked team combo.
    pub techniques: BTreeSet<String>,

    pub achievements: BTreeSet<String>,

    /// Set while traversal is suspended on a combat encounter.
    pub pending_combat: Option<PendingCombat>,

    /// Set once a consequence ends the game.
    pub game_over: bool,
}

impl GameState {
    /// Create a fresh session positioned at the given arc and scene.
    pub fn new(arc: u32, scene: impl Into<String>) -> Self {
        Self {
            session_id: SessionId::new(),
            traits: DEFAULT_TRAITS
                .iter()
                .map(|name| (name.to_string(), 0))
                .collect(),
            relationships: BTreeMap::new(),
            flags: BTreeMap::new(),
            current_arc: arc,
            current_scene: scene.into(),
            experience: 0,
            techniques: BTreeSet::new(),
            achievements: BTreeSet::new(),
            pending_combat: None,
            game_over: false,
        }
    }

    /// Current trait value, zero if never touched.
    pub fn trait_value(&self, name: &str) -> i64 {
        self.traits.get(name).copied().unwrap_or(0)
    }

    /// Current relationship score with an ally, zero if never met.
    pub fn relationship(&self, ally: &str) -> i64 {
        self.relationships.get(ally).copied().unwrap_or(0)
    }

    pub fn adjust_trait(&mut self, name: &str, delta: i64) {
        let value = self.traits.entry(name.to_string()).or_insert(0);
        *value = value.saturating_add(delta);
    }

    pub fn adjust_relationship(&mut self, ally: &str, delta: i64) {
        let value = self.relationships.entry(ally.to_string()).or_insert(0);
        *value = value.saturating_add(delta);
    }

    /// Set a story flag, replacing any previous value.
    pub fn set_flag(&mut self, name: impl Into<String>, value: impl Into<FlagValue>) {
        self.flags.insert(name.into(), value.into());
    }

    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    /// Check if a flag is present and truthy.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(FlagValue::is_truthy)
    }

    pub fn gain_experience(&mut self, amount: u64) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Player level derived from total experience (starts at 1).
    pub fn level(&self) -> u32 {
        let level = 1 + self.experience / XP_PER_LEVEL;
        u32::try_from(level).unwrap_or(u32::MAX)
    }

    /// Record an achievement. Returns false if it was already unlocked.
    pub fn unlock_achievement(&mut self, id: impl Into<String>) -> bool {
        self.achievements.insert(id.into())
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.contains(id)
    }

    /// Record a learned technique. Returns false if it was already known.
    pub fn learn_technique(&mut self, id: impl Into<String>) -> bool {
        self.techniques.insert(id.into())
    }

    /// Move the session to a new position.
    pub fn move_to(&mut self, arc: u32, scene: impl Into<String>) {
        self.current_arc = arc;
        self.current_scene = scene.into();
    }

    /// Check if traversal is waiting on a combat outcome.
    pub fn is_suspended(&self) -> bool {
        self.pending_combat.is_some()
    }
}
