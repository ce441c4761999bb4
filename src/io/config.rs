//! YAML run configuration.
//!
//! Example:
//! ```yaml
//! iterations: 10000
//! spring_constant: 1.0
//! kbt: 1.0
//! move_radius: 0.5
//! move_shape: ring
//! seed: 42
//! ```

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::error::Result;
use crate::sampling::{MoveShape, SamplerParams};
use crate::systems::{Chain, HarmonicSpring};

/// Run settings as written in a config file. Every field is optional so that
/// command-line flags can fill the gaps.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub iterations: Option<usize>,
    pub spring_constant: Option<f64>,
    /// Derive k from the end-to-end distance instead of `spring_constant`.
    pub theoretical_spring_constant: bool,
    pub kbt: Option<f64>,
    pub move_radius: Option<f64>,
    pub move_shape: Option<MoveShape>,
    pub seed: Option<u64>,
    pub atom_name: Option<String>,
}

impl RunConfig {
    /// Overlay `other` on top of `self`; values set in `other` win.
    ///
    /// An explicit `spring_constant` in `other` replaces a geometry-derived k
    /// requested by `self`.
    pub fn merge(self, other: RunConfig) -> RunConfig {
        let theoretical_spring_constant = if other.spring_constant.is_some() {
            other.theoretical_spring_constant
        } else {
            other.theoretical_spring_constant || self.theoretical_spring_constant
        };
        RunConfig {
            iterations: other.iterations.or(self.iterations),
            spring_constant: other.spring_constant.or(self.spring_constant),
            theoretical_spring_constant,
            kbt: other.kbt.or(self.kbt),
            move_radius: other.move_radius.or(self.move_radius),
            move_shape: other.move_shape.or(self.move_shape),
            seed: other.seed.or(self.seed),
            atom_name: other.atom_name.or(self.atom_name),
        }
    }

    /// Resolve the bond potential: the end-to-end estimate when requested,
    /// otherwise `spring_constant` (k = 1 when unset).
    pub fn spring(&self, chain: &Chain) -> Result<HarmonicSpring> {
        if self.theoretical_spring_constant {
            let spring = HarmonicSpring::from_end_to_end(chain, self.kbt.unwrap_or(0.0))?;
            info!(k = spring.k, "Using spring constant from end-to-end distance.");
            return Ok(spring);
        }
        let k = self.spring_constant.unwrap_or_else(|| {
            warn!("No spring constant given; defaulting to k = 1.");
            1.0
        });
        Ok(HarmonicSpring::new(k))
    }

    /// Build validated sampler parameters, taking `spring_constant` as the
    /// resolved k (either from the file or from the chain geometry).
    pub fn sampler_params(&self, spring_constant: f64) -> Result<SamplerParams> {
        let params = SamplerParams::new(
            self.iterations.unwrap_or(0),
            spring_constant,
            self.kbt.unwrap_or(0.0),
            self.move_radius.unwrap_or(0.0),
        )?;
        Ok(params.with_move_shape(self.move_shape.unwrap_or_default()))
    }
}

pub fn parse_config(text: &str) -> Result<RunConfig> {
    Ok(serde_yaml::from_str(text)?)
}

/// Read a [`RunConfig`] from a YAML file.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = std::io::BufReader::new(file);
    let config: RunConfig = serde_yaml::from_reader(reader)?;
    debug!(path = %path.as_ref().display(), "Loaded run configuration.");
    Ok(config)
}
