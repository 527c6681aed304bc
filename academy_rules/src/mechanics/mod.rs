//! Game mechanics: enemy scaling, team combos, and combo unlocks.

mod combo;
mod scaling;
mod unlocks;

pub use combo::*;
pub use scaling::*;
pub use unlocks::*;
