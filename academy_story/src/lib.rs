//! # Academy Story
//!
//! The story engine for Cursed Academy. Arcs are built once into an immutable
//! [`ArcRegistry`]; the [`TraversalEngine`] then walks a session's
//! [`GameState`](academy_rules::GameState) through the scene graph one choice
//! at a time.
//!
//! ## Core Components
//!
//! - **scene**: scenes, choices, consequence records, and access requirements
//! - **arc**: arc definitions and the validated registry
//! - **content**: the shipped arcs
//! - **traversal**: the choice state machine and the combat hand-off

pub mod arc;
pub mod config;
pub mod content;
pub mod error;
pub mod scene;
pub mod traversal;

pub use arc::*;
pub use config::*;
pub use error::*;
pub use scene::*;
pub use traversal::*;
