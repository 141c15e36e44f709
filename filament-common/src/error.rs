use thiserror::Error;

/// Invalid input to one of the filament pipeline stages.
///
/// Every variant is fatal to the run: the core does no I/O, so there is
/// nothing to retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Filament length must be at least one point.
    #[error("filament length must be at least 1, got {0}")]
    InvalidLength(usize),

    /// Angle variance is a non-negative fraction of a full turn.
    #[error("angle variance must be a finite value >= 0, got {0}")]
    InvalidAngleVariance(f64),

    /// Segment length must be at least one point.
    #[error("segment length must be at least 1, got {0}")]
    InvalidSegmentLength(usize),

    #[error("step distance must be a finite value > 0, got {0}")]
    InvalidStepDistance(f64),

    #[error("overlap tolerance must be a finite value >= 0, got {0}")]
    InvalidTolerance(f64),

    /// The overlap map handed to the contact builder does not describe a
    /// filament of the stated length.
    #[error("overlap map covers {found} points but the filament has {expected}")]
    OverlapLengthMismatch { expected: usize, found: usize },

    /// An overlap entry points past the end of the filament.
    #[error("overlap map references point {index} but the filament has {length}")]
    OverlapIndexOutOfRange { index: usize, length: usize },

    /// A stored contact matrix whose cell buffer does not hold `size * size` cells.
    #[error("contact matrix of size {size} needs {expected} cells, found {found}")]
    MatrixShape { size: usize, expected: usize, found: usize },

    /// The random source rejected the requested sampling range.
    #[error("invalid sampling range: {0}")]
    SamplingRange(String),
}
