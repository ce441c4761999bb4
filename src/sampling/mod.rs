//! Sampling module - Metropolis Monte Carlo over chain conformations.

mod traits;
mod moves;
pub mod metropolis;

pub use traits::BondPotential;
pub use moves::{MoveGenerator, MoveShape};
pub use metropolis::{
    acceptance_probability, metropolis_accept, round_to_precision, MetropolisSampler,
    RunSummary, SamplerParams, StepOutcome, COORDINATE_PRECISION,
};
