use serde::{Deserialize, Serialize};
use crate::config::FilamentMode;
use crate::vecmath::Vec2;

/// An integer lattice position, used by quantized filaments.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub fn new(x: i64, y: i64) -> Self {
        GridPoint { x, y }
    }

    pub fn chebyshev_distance(&self, other: GridPoint) -> i64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn manhattan_distance(&self, other: GridPoint) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }
}

/// The simulated polymer: a connected path of points starting at the origin.
///
/// Consecutive points are always one step apart. The path may cross itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filament {
    Continuous { points: Vec<Vec2>, step_distance: f64 },
    Quantized { points: Vec<GridPoint> },
}

impl Filament {
    pub fn len(&self) -> usize {
        match self {
            Filament::Continuous { points, .. } => points.len(),
            Filament::Quantized { points } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> FilamentMode {
        match self {
            Filament::Continuous { .. } => FilamentMode::Continuous,
            Filament::Quantized { .. } => FilamentMode::Quantized,
        }
    }

    /// Distance between consecutive points.
    pub fn step_distance(&self) -> f64 {
        match self {
            Filament::Continuous { step_distance, .. } => *step_distance,
            Filament::Quantized { .. } => 1.0,
        }
    }

    /// Position of point `index` as a float vector, whatever the mode.
    pub fn position(&self, index: usize) -> Option<Vec2> {
        match self {
            Filament::Continuous { points, .. } => points.get(index).copied(),
            Filament::Quantized { points } => points.get(index).map(|p| p.to_vec2()),
        }
    }

    pub fn positions(&self) -> Vec<Vec2> {
        match self {
            Filament::Continuous { points, .. } => points.clone(),
            Filament::Quantized { points } => points.iter().map(|p| p.to_vec2()).collect(),
        }
    }

    /// Axis-aligned bounding box as `(min, max)`, `None` for an empty filament.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let positions = self.positions();
        let first = *positions.first()?;
        Some(positions.iter().fold((first, first), |(min, max), p| {
            (
                Vec2::new(min.x.min(p.x), min.y.min(p.y)),
                Vec2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}
