use anyhow::{Context, Result};
use filament_common::{ContactMatrix, OutputFormat, SimulationResult};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path of the serialized result for a base filename and format.
pub fn result_path(base_filename: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("{}_result.{}", base_filename, format.extension()))
}

/// Writes the whole result in the requested format.
pub fn save_result(result: &SimulationResult, path: &Path, format: OutputFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Error creating result file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Json => serde_json::to_writer(&mut writer, result)
            .context("Error serializing result to JSON")?,
        OutputFormat::Bincode => bincode::serialize_into(&mut writer, result)
            .context("Error serializing result to bincode")?,
        OutputFormat::MessagePack => rmp_serde::encode::write(&mut writer, result)
            .context("Error serializing result to MessagePack")?,
    }
    writer.flush()?;

    info!("Result saved to {} ({:?} format)", path.display(), format);
    Ok(())
}

/// One row per filament point: index, coordinates and how many points it overlaps.
pub fn save_points_csv(result: &SimulationResult, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Error creating CSV file '{}'", path.display()))?;
    writer.write_record(["index", "x", "y", "overlap_count"])?;
    for (i, pos) in result.filament.positions().iter().enumerate() {
        writer.write_record(&[
            i.to_string(),
            format!("{:.4}", pos.x),
            format!("{:.4}", pos.y),
            result.overlaps.get(i).len().to_string(),
        ])?;
    }
    writer.flush()?;
    info!("Filament points saved to {}", path.display());
    Ok(())
}

/// The contact matrix as headerless CSV, one row per segment.
pub fn save_matrix_csv(matrix: &ContactMatrix, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Error creating CSV file '{}'", path.display()))?;
    for row in matrix.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    info!("Contact matrix ({}x{}) saved to {}", matrix.size(), matrix.size(), path.display());
    Ok(())
}
