use filament_common::Vec2;
use std::collections::HashMap;

/// Relative widening applied to every cell, well above the rounding error of
/// `coord * inv_cell_size` for coordinates reachable by a walk.
pub const CELL_MARGIN: f64 = 1e-9;

/// Bucket coordinates of a position for a grid with the given inverse cell size.
#[inline(always)]
pub fn get_grid_cell_key(pos: Vec2, inv_cell_size: f64) -> (i64, i64) {
    (
        (pos.x * inv_cell_size).floor() as i64,
        (pos.y * inv_cell_size).floor() as i64,
    )
}

/// Sparse uniform grid over an unbounded plane. Buckets hold point indices
/// in ascending order.
#[derive(Debug)]
pub struct SpatialHash {
    inv_cell_size: f64,
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialHash {
    /// Buckets every position. `cell_size` must be positive and at least the
    /// largest search radius later passed to [`SpatialHash::for_each_neighbor`].
    ///
    /// The cell is widened by [`CELL_MARGIN`] so that two points exactly one
    /// radius apart can never round into buckets two cells apart.
    pub fn build(positions: &[Vec2], cell_size: f64) -> Self {
        let inv_cell_size = if cell_size > 1e-12 {
            1.0 / (cell_size * (1.0 + CELL_MARGIN))
        } else {
            1.0
        };
        let mut buckets: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (idx, &pos) in positions.iter().enumerate() {
            buckets
                .entry(get_grid_cell_key(pos, inv_cell_size))
                .or_default()
                .push(idx);
        }
        SpatialHash { inv_cell_size, buckets }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Calls `f` for each other point within `max_dist_sq` (inclusive) of `pos`,
    /// searching the 3x3 block of buckets around it. Stops early when `f`
    /// returns `false`.
    #[inline(always)]
    pub fn for_each_neighbor<F>(
        &self,
        point_idx: usize,     // Index of the point we're finding neighbors for
        pos: Vec2,
        max_dist_sq: f64,
        positions: &[Vec2],
        mut f: F,
    ) where
        F: FnMut(usize) -> bool,
    {
        let (center_x, center_y) = get_grid_cell_key(pos, self.inv_cell_size);

        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = self.buckets.get(&(center_x + dx, center_y + dy)) else {
                    continue;
                };
                for &neighbor_idx in bucket {
                    // Don't compare a point to itself
                    if neighbor_idx == point_idx {
                        continue;
                    }
                    let Some(&neighbor_pos) = positions.get(neighbor_idx) else {
                        log::error!(
                            "Neighbor index {} out of bounds during search for point {}.",
                            neighbor_idx, point_idx
                        );
                        continue;
                    };
                    if pos.distance_squared(neighbor_pos) <= max_dist_sq && !f(neighbor_idx) {
                        return;
                    }
                }
            }
        }
    }
}
