//! Plain-text rendering of matrices, vectors and scalars.
//!
//! Values that sit within `INTEGER_TOLERANCE` of an integer are printed
//! without a decimal point; everything else gets a fixed number of decimals.
//! Matrix columns are right-aligned to their widest entry.

use crate::config::NumericPolicy;
use crate::math::{Matrix, Vector};

/// Decimal places used for matrix snapshots embedded in traces.
pub const DEFAULT_PRECISION: usize = 4;

const INTEGER_TOLERANCE: f64 = NumericPolicy::DEFAULT_EPSILON;

fn is_integer_like(value: f64) -> bool {
    value.is_finite() && (value - value.round()).abs() < INTEGER_TOLERANCE
}

/// Render one value: integers bare, everything else with `precision` decimals.
pub fn format_number(value: f64, precision: usize) -> String {
    if is_integer_like(value) {
        let rounded = value.round();
        // avoid printing "-0"
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        format!("{:.0}", rounded)
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Render a matrix as one `  [ a b c ]` line per row.
pub fn format_matrix(matrix: &Matrix, precision: usize) -> Vec<String> {
    let widths: Vec<usize> = (0..matrix.ncols())
        .map(|col| {
            (0..matrix.nrows())
                .map(|row| format!("{:.*}", precision, matrix[(row, col)]).len())
                .max()
                .unwrap_or(0)
        })
        .collect();

    (0..matrix.nrows())
        .map(|row| {
            let mut line = String::from("  [");
            for (col, width) in widths.iter().enumerate() {
                let cell = format_number(matrix[(row, col)], precision);
                line.push_str(&format!(" {:>width$}", cell, width = *width));
            }
            line.push_str(" ]");
            line
        })
        .collect()
}

pub fn format_vector(vector: &Vector, precision: usize) -> String {
    let cells: Vec<String> = vector
        .as_slice()
        .iter()
        .map(|&v| format_number(v, precision))
        .collect();
    format!("[{}]", cells.join(", "))
}
