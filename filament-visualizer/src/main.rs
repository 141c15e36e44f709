use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use filament_common::SimulationResult;
use log::{info, warn, LevelFilter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

mod filament_image;
mod heatmap;

use filament_image::{draw_filament, FilamentStyle};

/// Command-line arguments for the visualizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input result file path (.bin, .json or .msgpack)
    #[arg(short, long)]
    input: PathBuf,

    /// Output path for the filament image
    #[arg(long, default_value = "filament.png")]
    filament_output: PathBuf,

    /// Output path for the contact matrix heatmap
    #[arg(long, default_value = "contact_matrix.png")]
    matrix_output: PathBuf,

    /// Width and height of the filament image in pixels
    #[arg(long, default_value_t = 1000)]
    size: u32,

    /// Pixels left empty around the filament bounds
    #[arg(long, default_value_t = 50)]
    padding: u32,

    /// Draw points that overlap another point in the highlight color
    #[arg(long)]
    highlight_intersections: bool,

    /// Width of the heatmap in pixels
    #[arg(long, default_value_t = 900)]
    heatmap_width: u32,

    /// Height of the heatmap in pixels
    #[arg(long, default_value_t = 800)]
    heatmap_height: u32,
}

/// Reads a result file, picking the decoder from the file extension.
fn load_result(path: &Path) -> Result<SimulationResult> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let result: SimulationResult = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse JSON result: {}", path.display()))?,
        Some("msgpack") => rmp_serde::decode::from_read(reader)
            .with_context(|| format!("Failed to parse MessagePack result: {}", path.display()))?,
        _ => bincode::deserialize_from(reader)
            .with_context(|| format!("Failed to parse bincode result: {}", path.display()))?,
    };
    Ok(result)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    run_with_args(args)
}

fn run_with_args(args: Args) -> Result<()> {
    // Initialize logger
    Builder::from_default_env()
        .filter(None, LevelFilter::Info)
        .init();

    info!("Starting Filament Visualizer...");
    info!("Input file: {}", args.input.display());
    let start_time = Instant::now();

    let result = load_result(&args.input)?;
    let params = &result.params;
    info!(
        "Loaded {} points ({:?} mode, seed {}), {} overlapping points, {}x{} contact matrix.",
        result.filament.len(),
        result.filament.mode(),
        params.seed,
        result.overlaps.overlapping_points(),
        result.contact_matrix.size(),
        result.contact_matrix.size()
    );
    if result.overlaps.len() != result.filament.len() {
        warn!(
            "Overlap map covers {} points but the filament has {}; highlights may be off.",
            result.overlaps.len(),
            result.filament.len()
        );
    }

    // --- Filament Image ---
    if args.padding.saturating_mul(2) >= args.size {
        warn!("Padding {} leaves no drawable area on a {} px canvas.", args.padding, args.size);
    }
    let style = FilamentStyle {
        img_size: args.size,
        padding: args.padding,
        highlight_intersections: args.highlight_intersections,
    };
    let image = draw_filament(&result.filament.positions(), &result.overlaps, &style);
    image
        .save(&args.filament_output)
        .with_context(|| format!("Failed to write image to {}", args.filament_output.display()))?;
    info!("Filament image saved to {}", args.filament_output.display());

    // --- Contact Matrix Heatmap ---
    let caption = format!(
        "Contact matrix (L = {}, S = {})",
        result.filament.len(),
        result.contact_matrix.segment_length()
    );
    heatmap::render_heatmap(
        &result.contact_matrix,
        &args.matrix_output,
        (args.heatmap_width, args.heatmap_height),
        &caption,
    )
    .map_err(|e| anyhow::anyhow!("Failed to render heatmap to {}: {}", args.matrix_output.display(), e))?;
    info!("Contact matrix heatmap saved to {}", args.matrix_output.display());

    info!("Visualization completed in {:.2?}", start_time.elapsed());
    Ok(())
}

// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use filament_common::{ContactMatrix, Filament, GridPoint, OverlapMap, SimParams};
    use std::io::Write;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("filament-visualizer-{}-{}", std::process::id(), name))
    }

    fn sample_result() -> SimulationResult {
        let mut contact_matrix = ContactMatrix::new(2, 2);
        contact_matrix.mark_contact(0, 1);
        contact_matrix.mark_contact(1, 0);
        contact_matrix.mark_diagonal();
        SimulationResult {
            params: SimParams::new(4, 0.2, 2),
            filament: Filament::Quantized {
                points: vec![
                    GridPoint::new(0, 0),
                    GridPoint::new(1, 0),
                    GridPoint::new(1, 1),
                    GridPoint::new(0, 0),
                ],
            },
            overlaps: OverlapMap::from_entries(vec![vec![3], vec![], vec![], vec![0]]),
            contact_matrix,
        }
    }

    #[test]
    fn loads_result_by_extension() {
        let result = sample_result();

        let json_path = scratch_path("result.json");
        std::fs::write(&json_path, serde_json::to_vec(&result).unwrap()).unwrap();
        assert_eq!(load_result(&json_path).unwrap(), result);

        let bin_path = scratch_path("result.bin");
        let mut file = File::create(&bin_path).unwrap();
        file.write_all(&bincode::serialize(&result).unwrap()).unwrap();
        drop(file);
        assert_eq!(load_result(&bin_path).unwrap(), result);

        let msgpack_path = scratch_path("result.msgpack");
        std::fs::write(&msgpack_path, rmp_serde::to_vec(&result).unwrap()).unwrap();
        assert_eq!(load_result(&msgpack_path).unwrap(), result);

        for path in [json_path, bin_path, msgpack_path] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn malformed_contact_matrix_is_rejected_on_load() {
        let mut value = serde_json::to_value(sample_result()).unwrap();
        value["contact_matrix"]["cells"] = serde_json::json!([2, 1, 1]);
        let path = scratch_path("bad_matrix.json");
        std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

        let err = load_result(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(format!("{err:#}").contains("needs 4 cells, found 3"), "{err:#}");
    }

    #[test]
    fn missing_input_is_reported_with_path() {
        let err = load_result(Path::new("/no/such/result.bin")).unwrap_err();
        assert!(err.to_string().contains("/no/such/result.bin"));
    }

    #[test]
    fn args_default_to_png_outputs() {
        let args = Args::parse_from(["filament-visualizer", "--input", "filament_result.bin"]);
        assert_eq!(args.filament_output, PathBuf::from("filament.png"));
        assert_eq!(args.matrix_output, PathBuf::from("contact_matrix.png"));
        assert_eq!(args.size, 1000);
        assert_eq!(args.padding, 50);
        assert!(!args.highlight_intersections);
    }
}
