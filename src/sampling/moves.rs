//! Single-particle trial displacements.

use std::str::FromStr;
use nalgebra::Vector3;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use crate::error::{Result, SamplerError};

/// Shape of the horizontal (x, y) part of a trial move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveShape {
    /// (dx, dy) lies exactly on the circle of radius r.
    #[default]
    Ring,
    /// (dx, dy) is uniform over the disk of radius r.
    Disk,
}

impl FromStr for MoveShape {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ring" => Ok(MoveShape::Ring),
            "disk" => Ok(MoveShape::Disk),
            other => Err(format!("unknown move shape '{}', expected 'ring' or 'disk'", other)),
        }
    }
}

/// Draws displacement vectors for one particle.
///
/// Draw order per call: angle, disk radius (`Disk` only), z offset.
#[derive(Clone, Debug)]
pub struct MoveGenerator {
    radius: f64,
    shape: MoveShape,
    angle: Uniform<f64>,
    /// Unit interval [-1, 1], scaled by `radius` per draw.
    vertical: Uniform<f64>,
}

impl MoveGenerator {
    pub fn new(radius: f64, shape: MoveShape) -> Result<Self> {
        check_radius(radius)?;
        Ok(Self {
            radius,
            shape,
            angle: Uniform::new(0.0, 360.0),
            vertical: Uniform::new_inclusive(-1.0, 1.0),
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn shape(&self) -> MoveShape {
        self.shape
    }

    /// Sample a displacement (dx, dy, dz) with |dz| <= r.
    pub fn displacement<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        let theta = self.angle.sample(rng).to_radians();
        let horizontal = match self.shape {
            MoveShape::Ring => self.radius,
            MoveShape::Disk => self.radius * rng.gen::<f64>().sqrt(),
        };
        let dz = self.radius * self.vertical.sample(rng);
        Vector3::new(horizontal * theta.cos(), horizontal * theta.sin(), dz)
    }
}

pub(crate) fn check_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(SamplerError::invalid_parameter(
            "move_radius",
            format!("must be finite and non-negative, got {}", radius),
        ));
    }
    Ok(())
}
