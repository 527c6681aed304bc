//! # Academy Rules
//!
//! The rules crate for Cursed Academy - player state, enemy stat tables, and
//! team-combo techniques. This crate owns the data the story engine mutates and
//! does not know anything about scenes or arcs.

pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod state;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use state::*;
