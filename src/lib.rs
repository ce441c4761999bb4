//! Spring Fold - Metropolis Monte Carlo relaxation of bead-chain proteins.
//!
//! A protein backbone is reduced to one point per residue (its alpha carbon by
//! default) and consecutive points are joined by harmonic springs. The sampler
//! moves one particle at a time and accepts moves with the Metropolis rule.

pub mod error;
pub mod systems;
pub mod sampling;
pub mod io;
pub mod logging;

// Re-export commonly used types at crate root
pub use error::{Result, SamplerError};
pub use systems::{Chain, HarmonicSpring};
pub use sampling::{
    BondPotential, MetropolisSampler, MoveGenerator, MoveShape, RunSummary, SamplerParams,
    StepOutcome,
};
pub use io::{read_config, read_pdb_file, write_xyz_file, RunConfig};
