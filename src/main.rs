use analysis_common::AnalysisConfig;
use anyhow::Result;
use log::{error, info};
use std::time::Instant;

use msd_analysis::msd::accumulate_msd;
use msd_analysis::output::{self, MsdSummary};
use msd_analysis::trajectory::Trajectory;

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    info!("Starting MSD analysis...");

    // --- Load Configuration ---
    let config = AnalysisConfig::load_or_default("analysis.toml")?;
    let sim_box = config.sim_box();
    info!(
        "Trajectory: '{}' ({} frames, {} atoms, cubic box L = {})",
        config.trajectory.path,
        config.trajectory.num_frames,
        config.trajectory.num_atoms,
        config.trajectory.box_length
    );

    // --- Load Trajectory ---
    let load_start = Instant::now();
    let trajectory = Trajectory::read_xyz(
        &config.trajectory.path,
        config.trajectory.num_frames,
        config.trajectory.num_atoms,
    )?;
    info!(
        "Loaded {} frames in {:.2} s",
        trajectory.num_frames(),
        load_start.elapsed().as_secs_f64()
    );

    // --- All-Pairs MSD Scan ---
    let scan_start = Instant::now();
    let accumulator = accumulate_msd(&trajectory, &sim_box);
    let msd = accumulator.finalize();
    info!(
        "Accumulated MSD over {} lags in {:.2} s",
        msd.len(),
        scan_start.elapsed().as_secs_f64()
    );

    // --- Write Results ---
    output::write_msd_table(&config.output.msd_filename, &msd)?;
    info!("MSD table saved to {}", config.output.msd_filename);

    if config.output.save_csv {
        let filename = format!("{}_msd.csv", config.output.base_filename);
        match output::write_msd_csv(&filename, &msd) {
            Ok(()) => info!("MSD curve saved to {}", filename),
            Err(e) => error!("Error saving CSV file '{}': {}", filename, e),
        }
    }

    if config.output.save_summary {
        let filename = format!("{}_summary.json", config.output.base_filename);
        let summary = MsdSummary::new(&config, &msd);
        match output::write_summary(&filename, &summary) {
            Ok(()) => info!("Run summary saved to {}", filename),
            Err(e) => error!("Error saving summary file '{}': {}", filename, e),
        }
    }

    info!("Analysis complete.");
    Ok(())
}
