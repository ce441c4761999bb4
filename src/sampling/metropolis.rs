//! Metropolis Monte Carlo over chain conformations.
//!
//! Each iteration picks one particle uniformly at random, displaces it with
//! [`MoveGenerator`], scores the move from the bonds touching that particle
//! only, and applies the Metropolis criterion. Accepted coordinates are rounded
//! to [`COORDINATE_PRECISION`] decimal places.

use nalgebra::Vector3;
use rand::Rng;
use tracing::{info, instrument, trace};
use crate::error::{Result, SamplerError};
use crate::systems::HarmonicSpring;
use super::moves::{check_radius, MoveGenerator, MoveShape};
use super::traits::BondPotential;

/// Decimal places kept for accepted coordinates.
pub const COORDINATE_PRECISION: i32 = 3;

/// Validated run parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplerParams {
    pub iterations: usize,
    pub spring_constant: f64,
    pub kbt: f64,
    pub move_radius: f64,
    pub move_shape: MoveShape,
}

impl SamplerParams {
    pub fn new(
        iterations: usize,
        spring_constant: f64,
        kbt: f64,
        move_radius: f64,
    ) -> Result<Self> {
        let params = Self {
            iterations,
            spring_constant,
            kbt,
            move_radius,
            move_shape: MoveShape::default(),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_move_shape(mut self, move_shape: MoveShape) -> Self {
        self.move_shape = move_shape;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(SamplerError::invalid_parameter(
                "iterations",
                "must be a positive integer",
            ));
        }
        if self.kbt == 0.0 || self.kbt.is_nan() {
            return Err(SamplerError::invalid_parameter(
                "kbt",
                format!("must be nonzero, got {}", self.kbt),
            ));
        }
        check_radius(self.move_radius)
    }
}

/// Record of a single trial move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub index: usize,
    /// Proposed position before rounding.
    pub candidate: Vector3<f64>,
    pub delta_energy: f64,
    pub accepted: bool,
}

/// Acceptance counts for a completed run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub proposed: usize,
    pub accepted: usize,
}

impl RunSummary {
    pub fn rejected(&self) -> usize {
        self.proposed - self.accepted
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.proposed as f64
    }
}

/// Probability of accepting a move with energy change `delta_energy`.
pub fn acceptance_probability(delta_energy: f64, kbt: f64) -> f64 {
    if delta_energy < 0.0 {
        1.0
    } else {
        (-(delta_energy / kbt)).exp()
    }
}

/// Metropolis criterion. Downhill moves are accepted without consuming a draw;
/// every other move, including `delta_energy == 0`, draws one uniform value.
pub fn metropolis_accept<R: Rng + ?Sized>(delta_energy: f64, kbt: f64, rng: &mut R) -> bool {
    if delta_energy < 0.0 {
        return true;
    }
    rng.gen::<f64>() < acceptance_probability(delta_energy, kbt)
}

/// Round each component to `places` decimal places, halves away from zero.
pub fn round_to_precision(v: &Vector3<f64>, places: i32) -> Vector3<f64> {
    let factor = 10f64.powi(places);
    v.map(|c| (c * factor).round() / factor)
}

/// Single-particle Metropolis sampler over a bonded chain.
#[derive(Clone, Debug)]
pub struct MetropolisSampler<P: BondPotential> {
    params: SamplerParams,
    potential: P,
    mover: MoveGenerator,
}

impl MetropolisSampler<HarmonicSpring> {
    /// Sampler with a harmonic bond of stiffness `params.spring_constant`.
    pub fn harmonic(params: SamplerParams) -> Result<Self> {
        Self::with_potential(params, HarmonicSpring::new(params.spring_constant))
    }
}

impl<P: BondPotential> MetropolisSampler<P> {
    pub fn with_potential(params: SamplerParams, potential: P) -> Result<Self> {
        params.validate()?;
        let mover = MoveGenerator::new(params.move_radius, params.move_shape)?;
        Ok(Self { params, potential, mover })
    }

    pub fn params(&self) -> &SamplerParams {
        &self.params
    }

    pub fn potential(&self) -> &P {
        &self.potential
    }

    /// Perform one trial move on `positions`.
    ///
    /// Draw order: particle index, displacement, acceptance. A rejected move
    /// leaves `positions` untouched.
    pub fn step<R: Rng + ?Sized>(
        &self,
        positions: &mut [Vector3<f64>],
        rng: &mut R,
    ) -> Result<StepOutcome> {
        ensure_non_empty(positions)?;
        Ok(self.trial_move(positions, rng))
    }

    /// Run `params.iterations` trial moves, mutating `positions` in place.
    #[instrument(skip_all, name = "metropolis_run")]
    pub fn run<R: Rng + ?Sized>(
        &self,
        positions: &mut [Vector3<f64>],
        rng: &mut R,
    ) -> Result<RunSummary> {
        ensure_non_empty(positions)?;
        info!(
            particles = positions.len(),
            iterations = self.params.iterations,
            kbt = self.params.kbt,
            move_radius = self.params.move_radius,
            "Starting Metropolis run."
        );

        let mut summary = RunSummary::default();
        for step in 0..self.params.iterations {
            let outcome = self.trial_move(positions, rng);
            summary.proposed += 1;
            if outcome.accepted {
                summary.accepted += 1;
                trace!(
                    step,
                    index = outcome.index,
                    delta_energy = outcome.delta_energy,
                    "Move accepted."
                );
            }
        }

        info!(
            accepted = summary.accepted,
            rejected = summary.rejected(),
            acceptance_rate = summary.acceptance_rate(),
            "Metropolis run finished."
        );
        Ok(summary)
    }

    fn trial_move<R: Rng + ?Sized>(
        &self,
        positions: &mut [Vector3<f64>],
        rng: &mut R,
    ) -> StepOutcome {
        let index = rng.gen_range(0..positions.len());
        let candidate = positions[index] + self.mover.displacement(rng);
        let delta_energy = self.potential.delta_energy(positions, index, &candidate);
        let accepted = metropolis_accept(delta_energy, self.params.kbt, rng);
        if accepted {
            positions[index] = round_to_precision(&candidate, COORDINATE_PRECISION);
        }
        StepOutcome { index, candidate, delta_energy, accepted }
    }
}

fn ensure_non_empty(positions: &[Vector3<f64>]) -> Result<()> {
    if positions.is_empty() {
        return Err(SamplerError::InvalidInput(
            "cannot sample an empty chain".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn straight_chain(n: usize, spacing: f64) -> Vec<Vector3<f64>> {
        (0..n).map(|i| Vector3::new(i as f64 * spacing, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_params_validation() {
        assert!(SamplerParams::new(10, 1.0, 1.0, 0.5).is_ok());
        assert!(matches!(
            SamplerParams::new(10, 1.0, 0.0, 0.5),
            Err(SamplerError::InvalidParameter { name: "kbt", .. })
        ));
        assert!(matches!(
            SamplerParams::new(10, 1.0, 1.0, -0.5),
            Err(SamplerError::InvalidParameter { name: "move_radius", .. })
        ));
        assert!(matches!(
            SamplerParams::new(0, 1.0, 1.0, 0.5),
            Err(SamplerError::InvalidParameter { name: "iterations", .. })
        ));
    }

    #[test]
    fn test_huge_radius_builds_sampler() {
        let params = SamplerParams::new(1, 1.0, 1.0, f64::MAX).unwrap();
        let sampler = MetropolisSampler::harmonic(params).unwrap();
        let mut rng = StdRng::seed_from_u64(31);
        let mut positions = straight_chain(3, 1.0);
        let outcome = sampler.step(&mut positions, &mut rng).unwrap();
        assert!(outcome.index < 3);
    }

    #[test]
    fn test_sampler_revalidates_params() {
        let params = SamplerParams {
            iterations: 5,
            spring_constant: 1.0,
            kbt: 0.0,
            move_radius: 1.0,
            move_shape: MoveShape::Ring,
        };
        assert!(MetropolisSampler::harmonic(params).is_err());
    }

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(0.0, 1.0), 1.0);
        assert_eq!(acceptance_probability(-5.0, 1e-9), 1.0);
        assert_eq!(acceptance_probability(-5.0, 100.0), 1.0);
        assert_relative_eq!(acceptance_probability(3.0, 1.0), 0.049787068, epsilon = 1e-8);

        let mut previous = 1.0;
        for i in 0..200 {
            let p = acceptance_probability(i as f64 * 0.1, 2.5);
            assert!(p <= previous);
            previous = p;
        }
    }

    #[test]
    fn test_downhill_accept_skips_draw() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut reference = rng.clone();
        assert!(metropolis_accept(-0.1, 1.0, &mut rng));
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_zero_delta_consumes_draw() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut reference = rng.clone();
        assert!(metropolis_accept(0.0, 1.0, &mut rng));
        let _ = reference.gen::<f64>();
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_uphill_acceptance_frequency() {
        let mut rng = StdRng::seed_from_u64(21);
        let trials = 20000;
        let accepted = (0..trials)
            .filter(|_| metropolis_accept(3.0, 1.0, &mut rng))
            .count();
        let rate = accepted as f64 / trials as f64;
        assert!((rate - (-3.0f64).exp()).abs() < 0.01, "rate = {}", rate);
    }

    #[test]
    fn test_round_to_precision() {
        let v = Vector3::new(1.23456, -0.0004, 2.0006);
        let rounded = round_to_precision(&v, 3);
        assert_relative_eq!(rounded.x, 1.235, epsilon = 1e-12);
        assert_eq!(rounded.y, 0.0);
        assert_relative_eq!(rounded.z, 2.001, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_chain_is_invalid_input() {
        let params = SamplerParams::new(10, 1.0, 1.0, 0.5).unwrap();
        let sampler = MetropolisSampler::harmonic(params).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut positions: Vec<Vector3<f64>> = Vec::new();
        assert!(matches!(
            sampler.run(&mut positions, &mut rng),
            Err(SamplerError::InvalidInput(_))
        ));
        assert!(sampler.step(&mut positions, &mut rng).is_err());
    }

    #[test]
    fn test_zero_radius_leaves_chain_unchanged() {
        let params = SamplerParams::new(100, 1.0, 1.0, 0.0).unwrap();
        let sampler = MetropolisSampler::harmonic(params).unwrap();
        let mut rng = StdRng::seed_from_u64(100);
        let initial = straight_chain(3, 1.0);
        let mut positions = initial.clone();

        let summary = sampler.run(&mut positions, &mut rng).unwrap();
        assert_eq!(positions, initial);
        assert_eq!(summary.proposed, 100);
        // delta is exactly zero, so every move passes the probabilistic branch
        assert_eq!(summary.accepted, 100);
    }

    #[test]
    fn test_single_particle_always_accepts() {
        let params = SamplerParams::new(50, 5.0, 0.01, 1.0).unwrap();
        let sampler = MetropolisSampler::harmonic(params).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let mut positions = vec![Vector3::new(0.5, 0.5, 0.5)];
        let summary = sampler.run(&mut positions, &mut rng).unwrap();
        assert_eq!(summary.accepted, 50);
    }

    #[test]
    fn test_rejected_moves_leave_chain_bitwise_identical() {
        let params = SamplerParams::new(1, 10.0, 0.05, 1.0).unwrap();
        let sampler = MetropolisSampler::harmonic(params).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let mut positions = straight_chain(8, 1.0);
        let mut rejections = 0;

        for _ in 0..500 {
            let before = positions.clone();
            let outcome = sampler.step(&mut positions, &mut rng).unwrap();
            if !outcome.accepted {
                rejections += 1;
                for (b, a) in before.iter().zip(&positions) {
                    for axis in 0..3 {
                        assert_eq!(b[axis].to_bits(), a[axis].to_bits());
                    }
                }
            } else {
                assert_eq!(positions[outcome.index], round_to_precision(&outcome.candidate, 3));
            }
        }
        assert!(rejections > 0);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let params = SamplerParams::new(1, 1.0, 0.5, 0.3).unwrap();
        let sampler = MetropolisSampler::harmonic(params).unwrap();
        let mut rng_a = StdRng::seed_from_u64(2024);
        let mut rng_b = StdRng::seed_from_u64(2024);
        let mut chain_a = straight_chain(10, 1.2);
        let mut chain_b = chain_a.clone();

        for _ in 0..300 {
            let a = sampler.step(&mut chain_a, &mut rng_a).unwrap();
            let b = sampler.step(&mut chain_b, &mut rng_b).unwrap();
            assert_eq!(a, b);
            assert_eq!(chain_a, chain_b);
        }
    }

    #[test]
    fn test_accepted_coordinates_are_rounded() {
        let params = SamplerParams::new(2000, 1.0, 1.0, 0.37).unwrap();
        let sampler = MetropolisSampler::harmonic(params).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut positions = straight_chain(6, 1.0);
        sampler.run(&mut positions, &mut rng).unwrap();

        for p in &positions {
            assert_eq!(*p, round_to_precision(p, 3));
        }
    }

    #[test]
    fn test_stretched_chain_relaxes_at_low_temperature() {
        let params = SamplerParams::new(5000, 1.0, 0.01, 0.5).unwrap();
        let sampler = MetropolisSampler::harmonic(params).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let mut positions = straight_chain(10, 3.0);
        let initial_energy = sampler.potential().total_energy(&positions);

        let summary = sampler.run(&mut positions, &mut rng).unwrap();
        let final_energy = sampler.potential().total_energy(&positions);
        assert_eq!(positions.len(), 10);
        assert!(summary.accepted > 0);
        assert!(final_energy < 0.5 * initial_energy, "{} -> {}", initial_energy, final_energy);
    }

    #[test]
    fn test_run_summary_rates() {
        let summary = RunSummary { proposed: 8, accepted: 2 };
        assert_eq!(summary.rejected(), 6);
        assert_relative_eq!(summary.acceptance_rate(), 0.25);
        assert_eq!(RunSummary::default().acceptance_rate(), 0.0);
    }
}
