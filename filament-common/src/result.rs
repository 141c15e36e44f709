use serde::{Deserialize, Serialize};
use crate::contact_matrix::ContactMatrix;
use crate::filament::Filament;
use crate::overlap_map::OverlapMap;
use crate::sim_params::SimParams;

/// Everything one run produces, as written by the engine and read by the visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// The validated parameters the run used, seed included.
    pub params: SimParams,
    pub filament: Filament,
    pub overlaps: OverlapMap,
    pub contact_matrix: ContactMatrix,
}
