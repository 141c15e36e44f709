pub mod config;
pub mod contact_matrix;
pub mod error;
pub mod filament;
pub mod overlap_map;
pub mod result;
pub mod sim_params;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{ContactSizing, FilamentMode, OutputFormat, OverlapStrategy, SimulationConfig};
pub use contact_matrix::{ContactMatrix, CONTACT, NO_CONTACT, SELF_MARK};
pub use error::ConfigurationError;
pub use filament::{Filament, GridPoint};
pub use overlap_map::OverlapMap;
pub use result::SimulationResult;
pub use sim_params::SimParams;
pub use vecmath::{angle_to_vec, Vec2};
