use crate::{angle, contact, generator, overlap};
use anyhow::Result;
use filament_common::{SimParams, SimulationResult};
use log::{debug, info};
use rand::prelude::*;
use std::time::Instant;

/// Runs the filament pipeline: angles, path, overlaps, contact matrix.
pub struct FilamentSimulation {
    params: SimParams,
    /// Source of all randomness in the run, seeded from `params.seed`.
    rng: StdRng,
}

impl FilamentSimulation {
    /// Validates the parameters and seeds the random source.
    pub fn new(params: SimParams) -> Result<Self> {
        params.validate()?;
        let rng = StdRng::seed_from_u64(params.seed);
        Ok(Self { params, rng })
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Executes every stage once and bundles the artifacts.
    pub fn run(&mut self) -> Result<SimulationResult> {
        let params = &self.params;

        info!("Generating filament ({} points, {:?} mode)...", params.length, params.mode);
        let start = Instant::now();
        let angles = angle::generate(params.length, params.angle_variance, &mut self.rng)?;
        let filament = generator::build(&angles, params.mode, params.step_distance);
        info!("Filament generated in {:.2?}.", start.elapsed());
        if let Some((min, max)) = filament.bounds() {
            debug!(
                "Filament bounds: ({:.2}, {:.2}) to ({:.2}, {:.2})",
                min.x, min.y, max.x, max.y
            );
        }

        info!("Calculating overlaps ({:?})...", params.overlap_strategy);
        let start = Instant::now();
        let overlaps = overlap::detect(&filament, params.overlap_tolerance, params.overlap_strategy)?;
        info!(
            "Overlaps calculated in {:.2?}: {} overlapping points, {} pairs.",
            start.elapsed(),
            overlaps.overlapping_points(),
            overlaps.pair_count()
        );

        info!("Building contact matrix (segment length {})...", params.segment_length);
        let start = Instant::now();
        let contact_matrix = contact::build(
            filament.len(),
            &overlaps,
            params.segment_length,
            params.contact_sizing,
        )?;
        info!(
            "Contact matrix built in {:.2?}: {}x{} segments, {} contacts.",
            start.elapsed(),
            contact_matrix.size(),
            contact_matrix.size(),
            contact_matrix.contact_count()
        );

        Ok(SimulationResult {
            params: self.params.clone(),
            filament,
            overlaps,
            contact_matrix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filament_common::{
        ConfigurationError, Filament, FilamentMode, GridPoint, OverlapMap, Vec2, SELF_MARK,
    };

    #[test]
    fn single_point_run() {
        let mut sim = FilamentSimulation::new(SimParams::new(1, 0.3, 1)).unwrap();
        let result = sim.run().unwrap();
        assert_eq!(result.filament, Filament::Quantized { points: vec![GridPoint::new(0, 0)] });
        assert_eq!(result.overlaps, OverlapMap::empty(1));
        assert_eq!(result.contact_matrix.size(), 1);
        assert_eq!(result.contact_matrix.get(0, 0), Some(SELF_MARK));
    }

    #[test]
    fn zero_variance_continuous_run_is_straight() {
        let params = SimParams {
            mode: FilamentMode::Continuous,
            seed: 5,
            ..SimParams::new(5, 0.0, 1)
        };
        let result = FilamentSimulation::new(params).unwrap().run().unwrap();
        let positions = result.filament.positions();
        let heading = positions[1] - positions[0];
        for (i, p) in positions.iter().enumerate() {
            let expected = heading * i as f64;
            assert!(p.distance(expected) < 1e-9, "point {i}: {p:?}");
        }
        assert!((heading.length() - 1.0).abs() < 1e-12);
        assert_eq!(positions[0], Vec2::zero());
        assert_eq!(result.overlaps.overlapping_points(), 0);
        assert_eq!(result.contact_matrix.contact_count(), 0);
    }

    #[test]
    fn same_seed_reproduces_run() {
        let params = SimParams { seed: 10, ..SimParams::new(2000, 0.3, 100) };
        let a = FilamentSimulation::new(params.clone()).unwrap().run().unwrap();
        let b = FilamentSimulation::new(params).unwrap().run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn result_records_parameters() {
        let params = SimParams { seed: 3, ..SimParams::new(250, 0.2, 25) };
        let result = FilamentSimulation::new(params.clone()).unwrap().run().unwrap();
        assert_eq!(result.params, params);
        assert_eq!(result.filament.len(), 250);
        assert_eq!(result.overlaps.len(), 250);
        assert_eq!(result.contact_matrix.size(), 10);
    }

    #[test]
    fn invalid_params_fail_construction() {
        let err = FilamentSimulation::new(SimParams::new(10, 0.1, 0)).err().unwrap();
        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::InvalidSegmentLength(0))
        );
    }
}
