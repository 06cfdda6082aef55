use analysis_common::Vec3;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The positions of every atom at a single point in time.
/// The vector index is the atom id; ordering is assumed consistent across
/// frames and is not re-checked against the id column.
#[derive(Debug, Clone)]
pub struct Frame {
    pub positions: Vec<Vec3>,
}

/// A fully loaded trajectory: an ordered sequence of frames, each with the
/// same atom count. Loaded once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub frames: Vec<Frame>,
}

impl Trajectory {
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn num_atoms(&self) -> usize {
        self.frames.first().map_or(0, |f| f.positions.len())
    }

    /// Reads `num_frames` frames from an xyz-style trajectory file.
    ///
    /// Each frame is two header lines (atom count and comment) followed by
    /// `num_atoms` lines of `id x y z`. The id column is skipped. Any
    /// missing line, short row, or non-numeric field is a fatal error; a
    /// partially read trajectory is never returned.
    pub fn read_xyz<P: AsRef<Path>>(path: P, num_frames: usize, num_atoms: usize) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref)
            .with_context(|| format!("Failed to open trajectory file '{}'", path_ref.display()))?;
        let mut lines = BufReader::new(file).lines();

        let mut next_line = |what: &str, frame: usize| -> Result<String> {
            lines
                .next()
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Trajectory '{}' ended early: expected {} in frame {}",
                        path_ref.display(),
                        what,
                        frame
                    )
                })?
                .with_context(|| format!("Failed to read from '{}'", path_ref.display()))
        };

        let mut frames = Vec::with_capacity(num_frames);
        for frame_idx in 0..num_frames {
            // Two header lines per frame: atom count and a comment line.
            next_line("atom count header", frame_idx)?;
            next_line("comment header", frame_idx)?;

            let mut positions = Vec::with_capacity(num_atoms);
            for atom_idx in 0..num_atoms {
                let line = next_line("atom line", frame_idx)?;
                positions.push(parse_atom_line(&line).with_context(|| {
                    format!(
                        "Bad atom record in '{}' (frame {}, atom {})",
                        path_ref.display(),
                        frame_idx,
                        atom_idx
                    )
                })?);
            }
            frames.push(Frame { positions });
        }

        Ok(Trajectory { frames })
    }
}

/// Parses one `id x y z` row. The id column is present in the file but
/// carries no information beyond its position, so it is skipped.
fn parse_atom_line(line: &str) -> Result<Vec3> {
    let mut fields = line.split_whitespace();
    fields
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty atom line"))?;
    let mut coord = |axis: &str| -> Result<f64> {
        fields
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing {} coordinate", axis))?
            .parse::<f64>()
            .with_context(|| format!("invalid {} coordinate", axis))
    };
    let x = coord("x")?;
    let y = coord("y")?;
    let z = coord("z")?;
    Ok(Vec3::new(x, y, z))
}
