//! Story engine error types.

use thiserror::Error;

use crate::scene::ConsequenceDefect;

/// Errors raised while building or traversing the story graph.
///
/// All of these are deterministic data or input errors; the caller decides
/// whether to retry, log, or end the session.
#[derive(Debug, Error)]
pub enum StoryError {
    /// No arc with this number is registered.
    #[error("arc {0} not found")]
    ArcNotFound(u32),

    /// The arc exists but has no such scene - a dangling reference in content.
    #[error("scene '{scene}' not found in arc {arc}")]
    SceneNotFound { arc: u32, scene: String },

    /// The chosen index is outside the scene's choice list.
    #[error("choice {index} out of range ({available} choices) in scene '{scene}', arc {arc}")]
    InvalidChoice {
        arc: u32,
        scene: String,
        index: usize,
        available: usize,
    },

    /// A choice's consequence does not resolve to exactly one outcome.
    #[error("malformed consequence on choice {choice} of scene '{scene}' in arc {arc}: {defect}")]
    MalformedConsequence {
        arc: u32,
        scene: String,
        choice: usize,
        #[source]
        defect: ConsequenceDefect,
    },

    /// The scene was accessed while one of its requirements fails.
    #[error("scene '{scene}' in arc {arc} is inaccessible: requires {requirement}")]
    RequirementNotMet {
        arc: u32,
        scene: String,
        requirement: String,
    },

    /// A scene id was registered twice in one arc.
    #[error("scene '{scene}' registered twice in arc {arc}")]
    DuplicateScene { arc: u32, scene: String },

    /// Two constructors produced the same arc number.
    #[error("arc {0} registered twice")]
    DuplicateArc(u32),

    /// A constructor built a different arc than it was registered under.
    #[error("constructor registered for arc {registered} built arc {built}")]
    ArcNumberMismatch { registered: u32, built: u32 },

    /// Arc numbers must run 1..=N without gaps.
    #[error("arc numbers must be contiguous from 1: expected {expected}, found {found}")]
    NonContiguousArcs { expected: u32, found: u32 },

    /// Traversal is suspended until the pending combat is resolved.
    #[error("a combat encounter is pending")]
    CombatPending,

    /// A combat outcome arrived with no combat pending.
    #[error("no combat encounter is pending")]
    NoCombatPending,

    /// The session already reached game over.
    #[error("the session has ended")]
    SessionEnded,

    /// Engine configuration could not be parsed.
    #[error("invalid engine configuration: {0}")]
    Config(#[from] toml::de::Error),
}
