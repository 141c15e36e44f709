use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

// Define modules used by main
mod angle;
mod contact;
mod generator;
mod grid;
mod output;
mod overlap;
mod simulation;

use filament_common::{FilamentMode, SimulationConfig};
use simulation::FilamentSimulation;

/// Command-line arguments for the filament engine
#[derive(Parser, Debug)]
#[command(author, version, about = "Random-walk filament and 3C contact matrix simulator", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the filament length (number of points)
    #[arg(long)]
    length: Option<usize>,

    /// Override the angle variance (fraction of 2pi)
    #[arg(long)]
    angle_variance: Option<f64>,

    /// Override the contact matrix segment length
    #[arg(long)]
    segment_length: Option<usize>,

    /// Override the walk mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Continuous,
    Quantized,
}

impl From<ModeArg> for FilamentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Continuous => FilamentMode::Continuous,
            ModeArg::Quantized => FilamentMode::Quantized,
        }
    }
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut SimulationConfig, args: &Args) {
    if let Some(seed) = args.seed {
        config.random.seed = seed;
    }
    if let Some(length) = args.length {
        config.filament.length = length;
    }
    if let Some(angle_variance) = args.angle_variance {
        config.filament.angle_variance = angle_variance;
    }
    if let Some(segment_length) = args.segment_length {
        config.contact.segment_length = segment_length;
    }
    if let Some(mode) = args.mode {
        config.filament.mode = mode.into();
    }
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    let args = Args::parse();
    info!("Starting Filament Engine...");

    // --- Load Configuration ---
    let mut config = SimulationConfig::load(&args.config)?;
    apply_overrides(&mut config, &args);
    let params = config.get_sim_params()?;
    debug!("Simulation Parameters: {:#?}", params);
    info!("Using {} Rayon threads for overlap detection.", rayon::current_num_threads());

    // --- Run Pipeline ---
    let start_time = Instant::now();
    let mut sim = FilamentSimulation::new(params)?;
    info!("Seed: {}", sim.params().seed);
    let result = sim.run()?;
    info!("Simulation finished in {:.3} seconds.", start_time.elapsed().as_secs_f64());

    // --- Save Recorded Data ---
    let base = &config.output.base_filename;
    let result_path = output::result_path(base, config.output.format);
    output::save_result(&result, &result_path, config.output.format)?;

    if config.output.save_points_csv {
        output::save_points_csv(&result, &PathBuf::from(format!("{}_points.csv", base)))?;
    } else {
        info!("Skipping saving filament points as per config.");
    }
    if config.output.save_matrix_csv {
        output::save_matrix_csv(&result.contact_matrix, &PathBuf::from(format!("{}_contacts.csv", base)))?;
    }

    info!("Simulation Complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let mut config = SimulationConfig::from_toml_str(
            "[filament]\nlength = 10\nangle_variance = 0.1\n[contact]\nsegment_length = 5\n",
        )
        .unwrap();
        let args = Args::parse_from([
            "filament-engine",
            "--seed",
            "9",
            "--length",
            "10000",
            "--angle-variance",
            "0.3",
            "--segment-length",
            "100",
            "--mode",
            "continuous",
        ]);
        apply_overrides(&mut config, &args);
        let params = config.get_sim_params().unwrap();
        assert_eq!(params.seed, 9);
        assert_eq!(params.length, 10000);
        assert_eq!(params.angle_variance, 0.3);
        assert_eq!(params.segment_length, 100);
        assert_eq!(params.mode, FilamentMode::Continuous);
    }

    #[test]
    fn config_path_defaults_to_config_toml() {
        let args = Args::parse_from(["filament-engine"]);
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(args.seed.is_none() && args.mode.is_none());
    }
}
