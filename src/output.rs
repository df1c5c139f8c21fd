use anyhow::{Context, Result};
use flock_common::{OutputConfig, OutputFormat, Snapshot};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File the snapshot list is written to for a given output configuration.
pub fn snapshot_path(output: &OutputConfig) -> PathBuf {
    PathBuf::from(format!(
        "{}_snapshots.{}",
        output.base_filename,
        output.format.extension()
    ))
}

/// File the final positions CSV is written to.
pub fn final_positions_path(output: &OutputConfig) -> PathBuf {
    PathBuf::from(format!("{}_final_positions.csv", output.base_filename))
}

/// Serializes every recorded snapshot in the configured format. Returns the path written.
pub fn write_snapshots(snapshots: &[Snapshot], output: &OutputConfig) -> Result<PathBuf> {
    let path = snapshot_path(output);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create snapshot file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    match output.format {
        OutputFormat::Json => serde_json::to_writer(&mut writer, snapshots)
            .context("Failed to serialize snapshots to JSON")?,
        OutputFormat::Bincode => bincode::serialize_into(&mut writer, snapshots)
            .context("Failed to serialize snapshots to bincode")?,
        OutputFormat::MessagePack => rmp_serde::encode::write(&mut writer, snapshots)
            .context("Failed to serialize snapshots to MessagePack")?,
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write snapshot file '{}'", path.display()))?;

    info!(
        "{} snapshots saved to {} ({:?} format).",
        snapshots.len(),
        path.display(),
        output.format
    );
    Ok(path)
}

/// Writes `x,y` rows with four decimals, one per boid.
pub fn write_final_positions<P: AsRef<Path>>(positions: &[(f32, f32)], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file '{}'", path.display()))?;

    writer.write_record(["x", "y"])?;
    for (x, y) in positions {
        writer.write_record(&[format!("{:.4}", x), format!("{:.4}", y)])?;
    }
    writer.flush()?;

    info!("Final positions saved to {}", path.display());
    Ok(())
}
