use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A radial distribution function g(r), read whole from a two-column file.
#[derive(Debug, Clone)]
pub struct RdfCurve {
    pub r: Vec<f64>,
    pub g: Vec<f64>,
}

impl RdfCurve {
    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.r.iter().copied().zip(self.g.iter().copied()).collect()
    }
}

/// Reads every `r g(r)` row of the file. Unlike the thermo logs there is
/// no fixed row count; the file length defines the curve.
pub fn read_rdf<P: AsRef<Path>>(path: P) -> Result<RdfCurve> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open RDF file '{}'", path_ref.display()))?;

    let mut curve = RdfCurve {
        r: Vec::new(),
        g: Vec::new(),
    };
    for (row, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read from '{}'", path_ref.display()))?;
        let mut fields = line.split_whitespace();
        let r = fields
            .next()
            .ok_or_else(|| {
                anyhow::anyhow!("Empty RDF row {} in '{}'", row, path_ref.display())
            })?
            .parse::<f64>()
            .with_context(|| format!("Bad r value in row {} of '{}'", row, path_ref.display()))?;
        let g = fields
            .next()
            .ok_or_else(|| {
                anyhow::anyhow!("Missing g(r) in row {} of '{}'", row, path_ref.display())
            })?
            .parse::<f64>()
            .with_context(|| format!("Bad g(r) value in row {} of '{}'", row, path_ref.display()))?;
        curve.r.push(r);
        curve.g.push(g);
    }

    Ok(curve)
}
