//! Readers for matrices, right-hand sides and request scripts.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, Trim};

use matstep_engine::{Matrix, Vector};

use crate::session::Request;

/// Read a matrix from a headerless CSV file, one matrix row per record.
///
/// Blank lines are skipped. Rows of differing length are reported by the
/// matrix constructor rather than the CSV reader.
pub fn read_matrix_csv<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open matrix file: {}", path.as_ref().display()))?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("Failed to read row {} of {}", row_idx + 1, path.as_ref().display()))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col_idx, field)| {
                field.parse::<f64>().with_context(|| {
                    format!(
                        "Invalid number '{}' at row {}, column {}",
                        field,
                        row_idx + 1,
                        col_idx + 1
                    )
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Matrix::from_rows(&rows)
        .with_context(|| format!("Invalid matrix in {}", path.as_ref().display()))
}

/// Parse a comma-separated list such as `3,5` or `1.5, -2`.
pub fn parse_vector(text: &str) -> Result<Vector> {
    if text.trim().is_empty() {
        bail!("Vector must contain at least one value");
    }
    let values = text
        .split(',')
        .map(str::trim)
        .map(|field| {
            field
                .parse::<f64>()
                .with_context(|| format!("Invalid number '{}' in vector '{}'", field, text))
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok(Vector::from(values))
}

/// Load a JSON array of requests.
pub fn read_script<P: AsRef<Path>>(path: P) -> Result<Vec<Request>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read script: {}", path.as_ref().display()))?;
    let requests: Vec<Request> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse script: {}", path.as_ref().display()))?;
    Ok(requests)
}
