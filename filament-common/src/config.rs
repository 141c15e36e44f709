use serde::{Deserialize, Serialize};
use anyhow::Result;
use crate::error::ConfigurationError;
use crate::sim_params::SimParams;
use std::path::Path;

/// How step directions become positions.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilamentMode {
    /// Raw cos/sin of each angle, floating point positions.
    Continuous,
    /// Angles snapped to the four lattice directions, integer positions.
    #[default]
    Quantized,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapStrategy {
    /// Compare every point against every other point.
    AllPairs,
    /// Bucket points by coordinate and only compare neighbouring buckets.
    #[default]
    SpatialHash,
}

/// Number of segments allotted to the contact matrix.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactSizing {
    /// `ceil(L / S)` segments, every segment holds at least one point.
    #[default]
    Tight,
    /// `L / S + 1` segments. Adds an empty trailing segment when `S` divides `L`.
    Legacy,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Bincode,
    Json,
    MessagePack,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Bincode => "bin",
            OutputFormat::Json => "json",
            OutputFormat::MessagePack => "msgpack",
        }
    }
}

// Walk generation settings, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FilamentConfig {
    pub length: usize,
    /// Spread of the per-step heading change, as a fraction of 2pi.
    pub angle_variance: f64,
    #[serde(default)]
    pub mode: FilamentMode,
    #[serde(default = "default_step_distance")]
    pub step_distance: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct OverlapConfig {
    #[serde(default)]
    pub strategy: OverlapStrategy,
    /// Only used in continuous mode.
    #[serde(default)]
    pub tolerance: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ContactConfig {
    pub segment_length: usize,
    #[serde(default)]
    pub sizing: ContactSizing,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RandomConfig {
    #[serde(default)]
    pub seed: u64,
}

// Configuration for output settings, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_true")]
    pub save_points_csv: bool,
    #[serde(default)]
    pub save_matrix_csv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_filename: default_base_filename(),
            format: OutputFormat::Bincode,
            save_points_csv: true,
            save_matrix_csv: false,
        }
    }
}

fn default_step_distance() -> f64 {
    1.0
}

fn default_base_filename() -> String {
    "filament".to_string()
}

fn default_true() -> bool {
    true
}

// Main simulation configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationConfig {
    pub filament: FilamentConfig,
    #[serde(default)]
    pub overlap: OverlapConfig,
    pub contact: ContactConfig,
    #[serde(default)]
    pub random: RandomConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config = Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))?;

        Ok(config)
    }

    /// Parses and validates a configuration held in memory.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(config_str)?;
        // Reject bad values up front rather than at the first pipeline stage.
        config.get_sim_params()?;
        Ok(config)
    }

    /// Converts the configuration into the validated parameters used at runtime.
    pub fn get_sim_params(&self) -> Result<SimParams, ConfigurationError> {
        let params = SimParams {
            length: self.filament.length,
            angle_variance: self.filament.angle_variance,
            mode: self.filament.mode,
            step_distance: self.filament.step_distance,
            overlap_strategy: self.overlap.strategy,
            overlap_tolerance: self.overlap.tolerance,
            segment_length: self.contact.segment_length,
            contact_sizing: self.contact.sizing,
            seed: self.random.seed,
        };
        params.validate()?;
        Ok(params)
    }
}
