use crate::angle::AngleSequence;
use filament_common::{angle_to_vec, Filament, FilamentMode, GridPoint, Vec2};
use std::f64::consts::FRAC_PI_2;

/// Von Neumann step for each quarter turn, counter-clockwise from +x.
const LATTICE_STEPS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Snaps `angle` to the nearest multiple of pi/2 and returns the unit lattice step.
///
/// Ties at odd multiples of pi/4 round half away from zero.
pub fn quantize_direction(angle: f64) -> GridPoint {
    let quarter_turns = (angle / FRAC_PI_2).round() as i64;
    let (dx, dy) = LATTICE_STEPS[quarter_turns.rem_euclid(4) as usize];
    GridPoint::new(dx, dy)
}

/// Folds the headings into a path starting at the origin.
///
/// Point `i` is point `i - 1` plus one step along `angles[i]`; `angles[0]`
/// only seeds the heading. The output has exactly as many points as there
/// are angles. `step_distance` is ignored in quantized mode, where every step
/// is one lattice unit.
pub fn build(angles: &AngleSequence, mode: FilamentMode, step_distance: f64) -> Filament {
    let headings = angles.as_slice().iter().skip(1);
    match mode {
        FilamentMode::Continuous => {
            let mut points = Vec::with_capacity(angles.len());
            if !angles.is_empty() {
                points.push(Vec2::zero());
            }
            let mut current = Vec2::zero();
            for &angle in headings {
                current = current + angle_to_vec(angle) * step_distance;
                points.push(current);
            }
            Filament::Continuous { points, step_distance }
        }
        FilamentMode::Quantized => {
            let mut points = Vec::with_capacity(angles.len());
            if !angles.is_empty() {
                points.push(GridPoint::default());
            }
            let mut current = GridPoint::default();
            for &angle in headings {
                let step = quantize_direction(angle);
                current = GridPoint::new(current.x + step.x, current.y + step.y);
                points.push(current);
            }
            Filament::Quantized { points }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::{FRAC_PI_4, PI};

    #[test]
    fn quantize_cardinal_directions() {
        assert_eq!(quantize_direction(0.0), GridPoint::new(1, 0));
        assert_eq!(quantize_direction(FRAC_PI_2), GridPoint::new(0, 1));
        assert_eq!(quantize_direction(PI), GridPoint::new(-1, 0));
        assert_eq!(quantize_direction(3.0 * FRAC_PI_2), GridPoint::new(0, -1));
        assert_eq!(quantize_direction(2.0 * PI), GridPoint::new(1, 0));
    }

    #[test]
    fn quantize_handles_negative_and_large_angles() {
        assert_eq!(quantize_direction(-FRAC_PI_2), GridPoint::new(0, -1));
        assert_eq!(quantize_direction(-PI), GridPoint::new(-1, 0));
        assert_eq!(quantize_direction(10.0 * PI + 0.1), GridPoint::new(1, 0));
        assert_eq!(quantize_direction(0.7), GridPoint::new(1, 0)); // ~40 degrees
        assert_eq!(quantize_direction(0.78), GridPoint::new(1, 0));
        assert_eq!(quantize_direction(0.8), GridPoint::new(0, 1)); // ~46 degrees
        assert_eq!(quantize_direction(-2.4), GridPoint::new(-1, 0));
    }

    #[test]
    fn quantize_ties_round_away_from_zero() {
        // pi/4 / (pi/2) is exactly 0.5 in floating point.
        assert_eq!(quantize_direction(FRAC_PI_4), GridPoint::new(0, 1));
        assert_eq!(quantize_direction(-FRAC_PI_4), GridPoint::new(0, -1));
    }

    #[test]
    fn single_angle_is_single_origin_point() {
        let angles = AngleSequence::from_angles(vec![1.234]);
        let quantized = build(&angles, FilamentMode::Quantized, 1.0);
        assert_eq!(quantized, Filament::Quantized { points: vec![GridPoint::new(0, 0)] });
        let continuous = build(&angles, FilamentMode::Continuous, 1.0);
        assert_eq!(continuous.positions(), vec![Vec2::zero()]);
    }

    #[test]
    fn straight_line_along_x() {
        let angles = AngleSequence::from_angles(vec![0.0; 5]);
        let filament = build(&angles, FilamentMode::Continuous, 1.0);
        let expected = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)];
        let positions = filament.positions();
        assert_eq!(positions.len(), 5);
        for (p, &(x, y)) in positions.iter().zip(expected.iter()) {
            assert!((p.x - x).abs() < 1e-12 && (p.y - y).abs() < 1e-12, "{p:?}");
        }
    }

    #[test]
    fn square_walk_returns_to_origin() {
        // right, up, left, down
        let angles = AngleSequence::from_angles(vec![0.0, 0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2]);
        let filament = build(&angles, FilamentMode::Quantized, 1.0);
        let expected: Vec<GridPoint> = [(0, 0), (1, 0), (1, 1), (0, 1), (0, 0)]
            .iter()
            .map(|&(x, y)| GridPoint::new(x, y))
            .collect();
        assert_eq!(filament, Filament::Quantized { points: expected });
    }

    #[test]
    fn continuous_steps_have_fixed_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let angles = angle::generate(2000, 0.3, &mut rng).unwrap();
        let filament = build(&angles, FilamentMode::Continuous, 2.5);
        assert_eq!(filament.len(), 2000);
        assert_eq!(filament.position(0), Some(Vec2::zero()));
        let positions = filament.positions();
        for pair in positions.windows(2) {
            assert!((pair[0].distance(pair[1]) - 2.5).abs() < 1e-9);
        }
    }

    #[test]
    fn quantized_steps_move_one_axis_by_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let angles = angle::generate(2000, 0.3, &mut rng).unwrap();
        let Filament::Quantized { points } = build(&angles, FilamentMode::Quantized, 7.0) else {
            panic!("expected a quantized filament");
        };
        assert_eq!(points.len(), 2000);
        assert_eq!(points[0], GridPoint::new(0, 0));
        for pair in points.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(pair[1]), 1);
            assert_eq!(pair[0].manhattan_distance(pair[1]), 1);
        }
    }

    #[test]
    fn same_seed_same_filament() {
        for mode in [FilamentMode::Continuous, FilamentMode::Quantized] {
            let a = angle::generate(300, 0.2, &mut StdRng::seed_from_u64(9)).unwrap();
            let b = angle::generate(300, 0.2, &mut StdRng::seed_from_u64(9)).unwrap();
            assert_eq!(build(&a, mode, 1.0), build(&b, mode, 1.0));
        }
    }
}
