//! Entity definitions: enemies and their stat blocks.

mod components;
mod enemy;

pub use components::*;
pub use enemy::*;
