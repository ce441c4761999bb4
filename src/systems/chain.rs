//! Bead-chain model: one point per residue, bonded to its sequence neighbours.

use nalgebra::Vector3;
use crate::error::{Result, SamplerError};
use crate::sampling::BondPotential;

/// Label used when a chain is built from bare coordinates.
pub const DEFAULT_LABEL: &str = "CA";

/// An ordered chain of particles. Particle `i` is bonded to `i - 1` and `i + 1`;
/// the chain does not wrap around.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    labels: Vec<String>,
    positions: Vec<Vector3<f64>>,
}

impl Chain {
    /// Build a chain from per-particle labels and positions of equal length.
    pub fn new(labels: Vec<String>, positions: Vec<Vector3<f64>>) -> Result<Self> {
        if labels.len() != positions.len() {
            return Err(SamplerError::InvalidInput(format!(
                "{} labels for {} positions",
                labels.len(),
                positions.len()
            )));
        }
        Ok(Self { labels, positions })
    }

    pub fn from_positions(positions: Vec<Vector3<f64>>) -> Self {
        let labels = vec![DEFAULT_LABEL.to_string(); positions.len()];
        Self { labels, positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    /// Mutable view of the coordinates. The particle count is fixed.
    pub fn positions_mut(&mut self) -> &mut [Vector3<f64>] {
        &mut self.positions
    }

    /// Number of bonds, `N - 1` for a non-empty chain.
    pub fn bond_count(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    /// Total bond energy summed over every consecutive pair.
    pub fn total_energy<P: BondPotential>(&self, potential: &P) -> f64 {
        potential.total_energy(&self.positions)
    }

    /// Mean bond length over the `N - 1` bonds; zero when there are no bonds.
    pub fn average_bond_length(&self) -> f64 {
        let bonds = self.bond_count();
        if bonds == 0 {
            return 0.0;
        }
        let total: f64 = self
            .positions
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .sum();
        total / bonds as f64
    }

    /// Distance between the first and the last particle.
    pub fn end_to_end_distance(&self) -> Option<f64> {
        match (self.positions.first(), self.positions.last()) {
            (Some(first), Some(last)) => Some((last - first).norm()),
            _ => None,
        }
    }
}
