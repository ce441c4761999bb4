//! Traits for Monte Carlo sampling.

use nalgebra::Vector3;

/// Pairwise potential acting on the bonds of a linear chain.
pub trait BondPotential {
    /// Energy of a single bond between `a` and `b`.
    fn bond_energy(&self, a: &Vector3<f64>, b: &Vector3<f64>) -> f64;

    /// Total energy over all `N - 1` bonds.
    fn total_energy(&self, positions: &[Vector3<f64>]) -> f64 {
        positions
            .windows(2)
            .map(|pair| self.bond_energy(&pair[0], &pair[1]))
            .sum()
    }

    /// Change in total energy when particle `index` moves to `candidate`.
    ///
    /// Only the bonds incident to `index` are evaluated, so the cost does not
    /// depend on chain length. `positions` must hold the unmoved chain and
    /// `index` must be in range.
    fn delta_energy(
        &self,
        positions: &[Vector3<f64>],
        index: usize,
        candidate: &Vector3<f64>,
    ) -> f64 {
        let n = positions.len();
        if n < 2 {
            return 0.0;
        }
        let current = &positions[index];
        if index > 0 && index < n - 1 {
            let left = &positions[index - 1];
            let right = &positions[index + 1];
            let new_energy = self.bond_energy(candidate, left) + self.bond_energy(candidate, right);
            let old_energy = self.bond_energy(current, left) + self.bond_energy(current, right);
            new_energy - old_energy
        } else {
            let neighbour = if index == 0 { &positions[1] } else { &positions[n - 2] };
            self.bond_energy(candidate, neighbour) - self.bond_energy(current, neighbour)
        }
    }
}
