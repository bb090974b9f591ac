//! Step-by-step narration returned next to every result.
//!
//! A `Trace` is an ordered list of human-readable lines. Operations build
//! their own trace and hand it back inside a `Traced<T>`; nothing is written
//! to stdout or any other shared sink, so callers decide how to render it.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Matrix;
use crate::render::{format_matrix, DEFAULT_PRECISION};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<String>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.steps.push(line.into());
    }

    /// Append a snapshot of `matrix`, one line per row.
    pub fn push_matrix(&mut self, matrix: &Matrix) {
        self.steps.extend(format_matrix(matrix, DEFAULT_PRECISION));
    }

    /// A labelled snapshot: the label line followed by the matrix rows.
    pub fn push_labeled(&mut self, label: impl Into<String>, matrix: &Matrix) {
        self.push(label);
        self.push_matrix(matrix);
    }

    pub fn extend(&mut self, other: Trace) {
        self.steps.extend(other.steps);
    }

    pub fn lines(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.steps.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, line) in self.steps.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// A result value together with the trace that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Traced<T> {
    pub value: T,
    pub trace: Trace,
}

impl<T> Traced<T> {
    pub fn new(value: T, trace: Trace) -> Self {
        Self { value, trace }
    }

    pub fn into_parts(self) -> (T, Trace) {
        (self.value, self.trace)
    }
}

/// Exact rendering of an operand, e.g. `2.0` or `0.30000000000000004`.
pub(crate) fn exact(value: f64) -> String {
    format!("{:?}", value)
}

/// Four-decimal rendering used in row-operation narration.
pub(crate) fn fixed(value: f64) -> String {
    format!("{:.4}", value)
}
