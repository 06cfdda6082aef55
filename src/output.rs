use analysis_common::AnalysisConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the final MSD table: one `lag<TAB>value` line per lag, in order,
/// including the lag-0 row that never collects samples. The `{:?}` float
/// format keeps a trailing `.0` on whole values and round-trips the rest.
pub fn write_msd_table<P: AsRef<Path>>(path: P, msd: &[f64]) -> Result<()> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref)
        .with_context(|| format!("Failed to create output file '{}'", path_ref.display()))?;
    let mut writer = BufWriter::new(file);
    for (lag, value) in msd.iter().enumerate() {
        writeln!(writer, "{}\t{:?}", lag, value)
            .with_context(|| format!("Failed to write to '{}'", path_ref.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush '{}'", path_ref.display()))?;
    Ok(())
}

/// Writes the MSD curve as a headed CSV table next to the plain-text one.
pub fn write_msd_csv<P: AsRef<Path>>(path: P, msd: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["lag", "msd"])?;
    for (lag, value) in msd.iter().enumerate() {
        writer.write_record(&[lag.to_string(), format!("{:?}", value)])?;
    }
    writer.flush()?;
    Ok(())
}

/// A self-describing record of one analysis run: the parameters that were
/// in effect plus the final curve.
#[derive(Debug, Serialize)]
pub struct MsdSummary<'a> {
    pub num_frames: usize,
    pub num_atoms: usize,
    pub box_length: f64,
    pub trajectory_path: &'a str,
    pub msd: &'a [f64],
}

impl<'a> MsdSummary<'a> {
    pub fn new(config: &'a AnalysisConfig, msd: &'a [f64]) -> Self {
        MsdSummary {
            num_frames: config.trajectory.num_frames,
            num_atoms: config.trajectory.num_atoms,
            box_length: config.trajectory.box_length,
            trajectory_path: &config.trajectory.path,
            msd,
        }
    }
}

/// Serializes the run summary as JSON.
pub fn write_summary<P: AsRef<Path>>(path: P, summary: &MsdSummary) -> Result<()> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref)
        .with_context(|| format!("Failed to create summary file '{}'", path_ref.display()))?;
    serde_json::to_writer(file, summary)
        .with_context(|| format!("Failed to serialize summary to '{}'", path_ref.display()))?;
    Ok(())
}
