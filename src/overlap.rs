use crate::grid::SpatialHash;
use filament_common::{ConfigurationError, Filament, GridPoint, OverlapMap, OverlapStrategy, Vec2};
use log::warn;
use rayon::prelude::*;
use std::collections::HashMap;

/// Finds, for every filament point, the other points at the same location.
///
/// Quantized filaments compare lattice points exactly and ignore `tolerance`.
/// Continuous filaments treat two points as overlapping when they are at most
/// `tolerance` apart; `tolerance = 0` means exact coordinate equality.
/// Both strategies return the same map.
pub fn detect(
    filament: &Filament,
    tolerance: f64,
    strategy: OverlapStrategy,
) -> Result<OverlapMap, ConfigurationError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ConfigurationError::InvalidTolerance(tolerance));
    }

    let entries = match filament {
        Filament::Quantized { points } => {
            if tolerance > 0.0 {
                warn!("Overlap tolerance {} ignored for a quantized filament.", tolerance);
            }
            match strategy {
                OverlapStrategy::AllPairs => all_pairs(points, |a, b| a == b),
                OverlapStrategy::SpatialHash => group_lattice_points(points),
            }
        }
        Filament::Continuous { points, .. } => {
            let max_dist_sq = tolerance * tolerance;
            match strategy {
                OverlapStrategy::AllPairs => {
                    all_pairs(points, |a, b| a.distance_squared(*b) <= max_dist_sq)
                }
                OverlapStrategy::SpatialHash => {
                    within_tolerance(points, tolerance.max(filament.step_distance()), max_dist_sq)
                }
            }
        }
    };

    Ok(OverlapMap::from_entries(entries))
}

/// O(L^2) scan. Each index owns its output slot, so the outer loop runs in parallel.
fn all_pairs<T, F>(points: &[T], same_place: F) -> Vec<Vec<usize>>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    (0..points.len())
        .into_par_iter()
        .map(|i| {
            (0..points.len())
                .filter(|&j| j != i && same_place(&points[i], &points[j]))
                .collect::<Vec<usize>>()
        })
        .collect()
}

/// Groups indices by lattice point; every member of a group overlaps the rest.
fn group_lattice_points(points: &[GridPoint]) -> Vec<Vec<usize>> {
    let mut groups: HashMap<GridPoint, Vec<usize>> = HashMap::new();
    for (idx, &point) in points.iter().enumerate() {
        groups.entry(point).or_default().push(idx);
    }

    let mut entries = vec![Vec::new(); points.len()];
    for members in groups.values().filter(|m| m.len() > 1) {
        for &i in members {
            entries[i] = members.iter().copied().filter(|&j| j != i).collect();
        }
    }
    entries
}

fn within_tolerance(points: &[Vec2], cell_size: f64, max_dist_sq: f64) -> Vec<Vec<usize>> {
    let grid = SpatialHash::build(points, cell_size);
    log::debug!(
        "Spatial hash: {} points in {} buckets (cell size {:.4}).",
        points.len(),
        grid.bucket_count(),
        cell_size
    );

    (0..points.len())
        .into_par_iter()
        .map(|i| {
            let mut neighbors = Vec::new();
            grid.for_each_neighbor(i, points[i], max_dist_sq, points, |j| {
                neighbors.push(j);
                true
            });
            neighbors
        })
        .collect()
}
