use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Scaling benchmark results on a (nprocs, natoms, rs) grid. Axes are the
/// sorted, deduplicated values seen in the input; `runtime` is indexed as
/// [nprocs][natoms][rs], flattened.
#[derive(Debug, Clone)]
pub struct TimingTable {
    pub nprocs: Vec<u64>,
    pub natoms: Vec<u64>,
    pub rs: Vec<f64>,
    runtime: Vec<f64>,
}

impl TimingTable {
    pub fn runtime(&self, proc_idx: usize, atom_idx: usize, rs_idx: usize) -> f64 {
        self.runtime[(proc_idx * self.natoms.len() + atom_idx) * self.rs.len() + rs_idx]
    }

    /// Runtime-vs-nprocs points for one (natoms, rs) combination, ready
    /// for plotting.
    pub fn scaling_series(&self, atom_idx: usize, rs_idx: usize) -> Vec<(f64, f64)> {
        self.nprocs
            .iter()
            .enumerate()
            .map(|(proc_idx, &nprocs)| (nprocs as f64, self.runtime(proc_idx, atom_idx, rs_idx)))
            .collect()
    }
}

/// Reads rows of `nprocs natoms rs <skip> runtime` (columns 0, 1, 2 and 4)
/// and buckets the runtimes onto the benchmark grid. Grid slots with no
/// matching row stay 0.0.
pub fn read_timing_table<P: AsRef<Path>>(path: P) -> Result<TimingTable> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open timing file '{}'", path_ref.display()))?;

    let mut rows: Vec<(u64, u64, f64, f64)> = Vec::new();
    for (row, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read from '{}'", path_ref.display()))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            anyhow::bail!(
                "Timing row {} in '{}' has {} columns, expected at least 5",
                row,
                path_ref.display(),
                fields.len()
            );
        }
        let context = || format!("Bad timing row {} in '{}'", row, path_ref.display());
        let nprocs: u64 = fields[0].parse().with_context(context)?;
        let natoms: u64 = fields[1].parse().with_context(context)?;
        let rs: f64 = fields[2].parse().with_context(context)?;
        let runtime: f64 = fields[4].parse().with_context(context)?;
        rows.push((nprocs, natoms, rs, runtime));
    }

    let mut nprocs: Vec<u64> = rows.iter().map(|r| r.0).collect();
    nprocs.sort_unstable();
    nprocs.dedup();
    let mut natoms: Vec<u64> = rows.iter().map(|r| r.1).collect();
    natoms.sort_unstable();
    natoms.dedup();
    let mut rs: Vec<f64> = rows.iter().map(|r| r.2).collect();
    rs.sort_by(|a, b| a.total_cmp(b));
    rs.dedup();

    let mut runtime = vec![0.0; nprocs.len() * natoms.len() * rs.len()];
    for (row_nprocs, row_natoms, row_rs, row_runtime) in rows {
        // Axis membership is guaranteed; the rows built the axes.
        let proc_idx = nprocs.iter().position(|&v| v == row_nprocs).unwrap();
        let atom_idx = natoms.iter().position(|&v| v == row_natoms).unwrap();
        let rs_idx = rs.iter().position(|&v| v == row_rs).unwrap();
        runtime[(proc_idx * natoms.len() + atom_idx) * rs.len() + rs_idx] = row_runtime;
    }

    Ok(TimingTable {
        nprocs,
        natoms,
        rs,
        runtime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(label: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("report_timing_test_{}_{}", label, std::process::id()));
        let mut file = File::create(&path).expect("create temp timing");
        file.write_all(contents.as_bytes()).expect("write");
        path
    }

    #[test]
    fn groups_rows_onto_sorted_axes() {
        // nprocs natoms rs <ignored> runtime, deliberately out of order
        let path = write_temp(
            "grid",
            "4 1000 2.50 x 10.0\n\
             1 1000 2.50 x 40.0\n\
             4 4000 2.50 x 55.0\n\
             1 4000 2.50 x 200.0\n\
             1 1000 3.00 x 45.0\n",
        );
        let table = read_timing_table(&path).expect("read");
        assert_eq!(table.nprocs, vec![1, 4]);
        assert_eq!(table.natoms, vec![1000, 4000]);
        assert_eq!(table.rs, vec![2.5, 3.0]);
        assert_eq!(table.runtime(0, 0, 0), 40.0);
        assert_eq!(table.runtime(1, 0, 0), 10.0);
        assert_eq!(table.runtime(1, 1, 0), 55.0);
        assert_eq!(table.runtime(0, 0, 1), 45.0);
        // unmeasured combination stays zero
        assert_eq!(table.runtime(1, 1, 1), 0.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn scaling_series_walks_the_nprocs_axis() {
        let path = write_temp(
            "series",
            "1 1000 2.50 x 40.0\n\
             2 1000 2.50 x 22.0\n\
             4 1000 2.50 x 12.0\n",
        );
        let table = read_timing_table(&path).expect("read");
        assert_eq!(
            table.scaling_series(0, 0),
            vec![(1.0, 40.0), (2.0, 22.0), (4.0, 12.0)]
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn short_row_is_fatal() {
        let path = write_temp("short", "1 1000 2.50 40.0\n");
        assert!(read_timing_table(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
