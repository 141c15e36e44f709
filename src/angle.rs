use filament_common::ConfigurationError;
use log::trace;
use rand::distr::Uniform;
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// Step headings of a correlated random walk, in radians.
///
/// Angles are not wrapped into `[0, 2pi)`; only their projection matters.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleSequence {
    angles: Vec<f64>,
}

impl AngleSequence {
    /// Wraps a fixed list of headings.
    #[cfg(test)]
    pub fn from_angles(angles: Vec<f64>) -> Self {
        AngleSequence { angles }
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.angles
    }
}

/// Draws `length` headings: the first uniform in `[0, 2pi)`, each following one
/// perturbed by a uniform draw from `[-sigma*pi, +sigma*pi]`.
///
/// `sigma` is the spread of the heading change as a fraction of a full turn,
/// so `sigma = 0` yields a straight line.
pub fn generate<R: Rng>(
    length: usize,
    sigma: f64,
    rng: &mut R,
) -> Result<AngleSequence, ConfigurationError> {
    if length < 1 {
        return Err(ConfigurationError::InvalidLength(length));
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(ConfigurationError::InvalidAngleVariance(sigma));
    }

    let heading_dist = Uniform::new(0.0, TAU)
        .map_err(|e| ConfigurationError::SamplingRange(e.to_string()))?;
    let half_range = sigma * PI;
    let delta_dist = Uniform::new_inclusive(-half_range, half_range)
        .map_err(|e| ConfigurationError::SamplingRange(e.to_string()))?;

    let mut angles = Vec::with_capacity(length);
    let mut angle: f64 = rng.sample(heading_dist);
    angles.push(angle);
    for _ in 1..length {
        angle += rng.sample(delta_dist);
        angles.push(angle);
    }
    trace!("Generated {} angles, final heading {:.4} rad", angles.len(), angle);

    Ok(AngleSequence { angles })
}
