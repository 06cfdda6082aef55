use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Per-step thermodynamic output of one engine: temperature, potential
/// energy, and total energy against simulation time.
#[derive(Debug, Clone)]
pub struct ThermoSeries {
    pub time: Vec<f64>,
    pub temperature: Vec<f64>,
    pub potential: Vec<f64>,
    pub total: Vec<f64>,
}

impl ThermoSeries {
    /// Divides the energy columns by the atom count, for engines that
    /// report system totals rather than per-atom values. Temperature is
    /// already intensive and stays untouched.
    pub fn energies_per_atom(mut self, num_atoms: f64) -> Self {
        for value in self.potential.iter_mut() {
            *value /= num_atoms;
        }
        for value in self.total.iter_mut() {
            *value /= num_atoms;
        }
        self
    }
}

/// Reads the thermo table from a LAMMPS log: a fixed-size header is
/// skipped, then `steps` rows of `time T PE <skip> E` are consumed
/// (columns 0, 1, 2 and 4 of the thermo output).
pub fn read_lammps_log<P: AsRef<Path>>(
    path: P,
    header_lines: usize,
    steps: usize,
) -> Result<ThermoSeries> {
    read_thermo_table(path.as_ref(), header_lines, steps, 0, 1, 2, 4)
}

/// Reads the engine's stdout thermo table: `step KE PE T E` rows with no
/// header. Time is column 0, temperature column 3, potential column 2 and
/// total energy column 4; the kinetic-energy column is not used.
pub fn read_engine_log<P: AsRef<Path>>(path: P, steps: usize) -> Result<ThermoSeries> {
    read_thermo_table(path.as_ref(), 0, steps, 0, 3, 2, 4)
}

fn read_thermo_table(
    path: &Path,
    header_lines: usize,
    steps: usize,
    time_col: usize,
    temp_col: usize,
    pot_col: usize,
    total_col: usize,
) -> Result<ThermoSeries> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open thermo log '{}'", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    for i in 0..header_lines {
        lines.next().ok_or_else(|| {
            anyhow::anyhow!(
                "Thermo log '{}' ended inside the header (line {})",
                path.display(),
                i
            )
        })??;
    }

    let mut series = ThermoSeries {
        time: Vec::with_capacity(steps),
        temperature: Vec::with_capacity(steps),
        potential: Vec::with_capacity(steps),
        total: Vec::with_capacity(steps),
    };

    for row in 0..steps {
        let line = lines
            .next()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Thermo log '{}' ended early: expected {} rows, got {}",
                    path.display(),
                    steps,
                    row
                )
            })?
            .with_context(|| format!("Failed to read from '{}'", path.display()))?;
        let fields = split_numeric_row(&line)
            .with_context(|| format!("Bad thermo row {} in '{}'", row, path.display()))?;
        let max_col = time_col.max(temp_col).max(pot_col).max(total_col);
        if fields.len() <= max_col {
            anyhow::bail!(
                "Thermo row {} in '{}' has {} columns, expected at least {}",
                row,
                path.display(),
                fields.len(),
                max_col + 1
            );
        }
        series.time.push(fields[time_col]);
        series.temperature.push(fields[temp_col]);
        series.potential.push(fields[pot_col]);
        series.total.push(fields[total_col]);
    }

    Ok(series)
}

/// Splits a whitespace-separated row into f64 fields, failing on the first
/// non-numeric token.
pub fn split_numeric_row(line: &str) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("invalid numeric field '{}'", token))
        })
        .collect()
}

/// Average over the rows after the equilibration window. The caller is
/// responsible for ensuring `skip` leaves at least one row.
pub fn tail_average(values: &[f64], skip: usize) -> f64 {
    let tail = &values[skip..];
    tail.iter().sum::<f64>() / tail.len() as f64
}
