use serde::{Deserialize, Serialize};
use crate::config::{ContactSizing, FilamentMode, OverlapStrategy};
use crate::error::ConfigurationError;

/// Validated parameters for one simulation run, derived from the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    // Walk
    pub length: usize,          // L, number of points
    pub angle_variance: f64,    // sigma, fraction of 2pi
    pub mode: FilamentMode,
    pub step_distance: f64,     // continuous mode only

    // Overlap detection
    pub overlap_strategy: OverlapStrategy,
    pub overlap_tolerance: f64, // continuous mode only

    // Contact matrix
    pub segment_length: usize,  // S, points per segment
    pub contact_sizing: ContactSizing,

    pub seed: u64,
}

impl SimParams {
    /// Parameters with the same defaults a minimal config file gets.
    pub fn new(length: usize, angle_variance: f64, segment_length: usize) -> Self {
        SimParams {
            length,
            angle_variance,
            mode: FilamentMode::default(),
            step_distance: 1.0,
            overlap_strategy: OverlapStrategy::default(),
            overlap_tolerance: 0.0,
            segment_length,
            contact_sizing: ContactSizing::default(),
            seed: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.length < 1 {
            return Err(ConfigurationError::InvalidLength(self.length));
        }
        if !self.angle_variance.is_finite() || self.angle_variance < 0.0 {
            return Err(ConfigurationError::InvalidAngleVariance(self.angle_variance));
        }
        if self.segment_length < 1 {
            return Err(ConfigurationError::InvalidSegmentLength(self.segment_length));
        }
        if !self.step_distance.is_finite() || self.step_distance <= 0.0 {
            return Err(ConfigurationError::InvalidStepDistance(self.step_distance));
        }
        if !self.overlap_tolerance.is_finite() || self.overlap_tolerance < 0.0 {
            return Err(ConfigurationError::InvalidTolerance(self.overlap_tolerance));
        }
        Ok(())
    }
}
