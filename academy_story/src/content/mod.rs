//! The shipped story arcs.
//!
//! Each arc is a build function returning an immutable [`Arc`](crate::arc::Arc).
//! The registry invokes each constructor once.

mod detention_center;
mod goodwill_exchange;
mod orientation;
mod shibuya;

use crate::arc::ArcConstructor;

/// Arc number -> constructor for every shipped arc.
pub const ARC_CONSTRUCTORS: &[(u32, ArcConstructor)] = &[
    (1, orientation::build),
    (2, detention_center::build),
    (3, goodwill_exchange::build),
    (4, shibuya::build),
];
