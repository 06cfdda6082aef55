use analysis_common::AnalysisConfig;
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use std::fs;
use std::path::PathBuf;

mod charts;
mod rdf;
mod thermo;
mod timing;

use charts::Series;
use rdf::read_rdf;
use thermo::{read_engine_log, read_lammps_log, tail_average, ThermoSeries};
use timing::read_timing_table;

/// Command-line arguments for the comparison report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// LAMMPS log file with the thermo table
    #[arg(long, default_value = "data_files/log.lammps")]
    lammps_log: PathBuf,

    /// Engine stdout capture with the thermo table
    #[arg(long, default_value = "data_files/engine_thermo.log")]
    engine_log: PathBuf,

    /// g(r) data for the LAMMPS run
    #[arg(long, default_value = "data_files/gr_lmp.dat")]
    lammps_rdf: PathBuf,

    /// g(r) data for the engine run
    #[arg(long, default_value = "data_files/gr_engine.dat")]
    engine_rdf: PathBuf,

    /// Scaling benchmark table
    #[arg(long, default_value = "data_files/timing_results.txt")]
    timing: PathBuf,

    /// Directory the charts are written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Optional path to the analysis config to pick up step/atom counts
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of thermo rows to read from each log (defaults to the
    /// configured frame count)
    #[arg(long)]
    steps: Option<usize>,

    /// Atom count used to normalize the engine's extensive energies
    #[arg(long)]
    atoms: Option<usize>,

    /// Leading thermo rows discarded as equilibration
    #[arg(long, default_value_t = 20)]
    skip: usize,

    /// Header lines before the thermo table in the LAMMPS log
    #[arg(long, default_value_t = 33)]
    lammps_header_lines: usize,

    /// Legend label for the engine series
    #[arg(long, default_value = "engine")]
    engine_label: String,

    /// Legend label for the LAMMPS series
    #[arg(long, default_value = "LAMMPS")]
    lammps_label: String,
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

    info!("Starting comparison report...");

    // --- Determine Run Parameters ---
    let defaults = if let Some(config_path) = &args.config {
        match AnalysisConfig::load(config_path) {
            Ok(config) => {
                info!("Loaded run parameters from {}", config_path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load config file '{}': {}. Using default parameters.",
                    config_path.display(),
                    e
                );
                AnalysisConfig::default()
            }
        }
    } else {
        AnalysisConfig::default()
    };
    let steps = args.steps.unwrap_or(defaults.trajectory.num_frames);
    let atoms = args.atoms.unwrap_or(defaults.trajectory.num_atoms);
    if args.skip >= steps {
        anyhow::bail!(
            "skip ({}) must leave at least one thermo row (steps = {})",
            args.skip,
            steps
        );
    }
    info!(
        "Comparing {} thermo rows ({} discarded as equilibration), {} atoms",
        steps, args.skip, atoms
    );

    fs::create_dir_all(&args.out_dir).with_context(|| {
        format!("Failed to create output directory '{}'", args.out_dir.display())
    })?;

    // --- Thermo Comparison ---
    let engine = read_engine_log(&args.engine_log, steps)?.energies_per_atom(atoms as f64);
    let lammps = read_lammps_log(&args.lammps_log, args.lammps_header_lines, steps)?;

    info!(
        "Average {} temperature: {:.4}",
        args.engine_label,
        tail_average(&engine.temperature, args.skip)
    );
    info!(
        "Average {} temperature: {:.4}",
        args.lammps_label,
        tail_average(&lammps.temperature, args.skip)
    );
    info!(
        "Average {} potential energy/atom: {:.4}",
        args.engine_label,
        tail_average(&engine.potential, args.skip)
    );
    info!(
        "Average {} potential energy/atom: {:.4}",
        args.lammps_label,
        tail_average(&lammps.potential, args.skip)
    );
    info!(
        "Average {} total energy/atom: {:.4}",
        args.engine_label,
        tail_average(&engine.total, args.skip)
    );
    info!(
        "Average {} total energy/atom: {:.4}",
        args.lammps_label,
        tail_average(&lammps.total, args.skip)
    );

    let thermo_chart = |filename: &str,
                        caption: &str,
                        y_desc: &str,
                        pick: fn(&ThermoSeries) -> &Vec<f64>|
     -> Result<()> {
        let path = args.out_dir.join(filename);
        charts::line_chart(
            &path,
            caption,
            "timestep",
            y_desc,
            &[
                Series {
                    label: &args.engine_label,
                    points: tail_points(&engine.time, pick(&engine), args.skip),
                },
                Series {
                    label: &args.lammps_label,
                    points: tail_points(&lammps.time, pick(&lammps), args.skip),
                },
            ],
        )?;
        info!("Chart saved to {}", path.display());
        Ok(())
    };

    thermo_chart("T_compare.png", "Temperature", "temperature", |s| {
        &s.temperature
    })?;
    thermo_chart(
        "PE_compare.png",
        "Potential energy per atom",
        "potential energy/atom (reduced units)",
        |s| &s.potential,
    )?;
    thermo_chart(
        "E_compare.png",
        "Total energy per atom",
        "total energy/atom (reduced units)",
        |s| &s.total,
    )?;

    // --- RDF Comparison ---
    let engine_rdf = read_rdf(&args.engine_rdf)?;
    let lammps_rdf = read_rdf(&args.lammps_rdf)?;
    info!(
        "Read {} engine and {} LAMMPS g(r) rows",
        engine_rdf.len(),
        lammps_rdf.len()
    );
    if engine_rdf.is_empty() || lammps_rdf.is_empty() {
        warn!("An RDF input is empty; the g(r) chart will have a blank series");
    }
    let rdf_path = args.out_dir.join("gr_compare.png");
    charts::line_chart(
        &rdf_path,
        "Radial distribution function",
        "r (reduced units)",
        "g(r)",
        &[
            Series {
                label: &args.engine_label,
                points: engine_rdf.points(),
            },
            Series {
                label: &args.lammps_label,
                points: lammps_rdf.points(),
            },
        ],
    )?;
    info!("Chart saved to {}", rdf_path.display());

    // --- Scaling Charts ---
    let table = read_timing_table(&args.timing)?;
    info!(
        "Timing grid: {} processor counts x {} system sizes x {} rs values",
        table.nprocs.len(),
        table.natoms.len(),
        table.rs.len()
    );
    let labels: Vec<String> = table.natoms.iter().map(|n| n.to_string()).collect();
    for (rs_idx, &rs) in table.rs.iter().enumerate() {
        let series: Vec<Series> = table
            .natoms
            .iter()
            .enumerate()
            .map(|(atom_idx, _)| Series {
                label: &labels[atom_idx],
                points: table.scaling_series(atom_idx, rs_idx),
            })
            .collect();
        let path = args.out_dir.join(format!("scaling_rs_{:.2}.png", rs));
        charts::line_chart(
            &path,
            &format!("Runtime scaling, rs = {:.2}", rs),
            "number of processors",
            "runtime (seconds)",
            &series,
        )?;
        info!("Chart saved to {}", path.display());
    }

    info!("Comparison report complete.");
    Ok(())
}

/// Time/value pairs for the rows after the equilibration window.
fn tail_points(time: &[f64], values: &[f64], skip: usize) -> Vec<(f64, f64)> {
    time[skip..]
        .iter()
        .copied()
        .zip(values[skip..].iter().copied())
        .collect()
}
