//! Harmonic ("spring") bond potential.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use crate::error::{Result, SamplerError};
use crate::sampling::BondPotential;
use super::Chain;

/// Harmonic bond: E = (k / 2) d², with `d` the bond length.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HarmonicSpring {
    pub k: f64,
}

impl HarmonicSpring {
    pub fn new(k: f64) -> Self {
        Self { k }
    }

    /// Ideal-chain estimate k = 3 kBT / R², where R is the end-to-end distance.
    pub fn from_end_to_end(chain: &Chain, kbt: f64) -> Result<Self> {
        let distance = chain.end_to_end_distance().ok_or_else(|| {
            SamplerError::InvalidInput(
                "cannot estimate a spring constant for an empty chain".into(),
            )
        })?;
        let dist_squared = distance * distance;
        if dist_squared == 0.0 {
            return Err(SamplerError::InvalidInput(
                "chain endpoints coincide; end-to-end distance is zero".into(),
            ));
        }
        Ok(Self::new(3.0 * kbt / dist_squared))
    }
}

impl BondPotential for HarmonicSpring {
    fn bond_energy(&self, a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
        (self.k / 2.0) * (b - a).norm_squared()
    }
}
