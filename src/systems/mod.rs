//! Systems module - the bead chain and its bond potential.

mod chain;
mod spring;

pub use chain::{Chain, DEFAULT_LABEL};
pub use spring::HarmonicSpring;
