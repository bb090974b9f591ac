use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut, RangeBounds};

use serde::{Deserialize, Serialize};

use crate::math::vector::Vector;

/// Row/column count of a matrix. Always derived from a `Matrix`, never stored apart from one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from(value: (usize, usize)) -> Self {
        Shape::new(value.0, value.1)
    }
}

impl From<Shape> for (usize, usize) {
    fn from(value: Shape) -> Self {
        (value.rows, value.cols)
    }
}

impl PartialEq<(usize, usize)> for Shape {
    fn eq(&self, other: &(usize, usize)) -> bool {
        self.rows == other.0 && self.cols == other.1
    }
}

/// Dense rectangular matrix of `f64`, stored row-major.
///
/// A `Matrix` always has at least one row and one column. Every engine
/// operation takes matrices by reference and returns new ones; algorithms
/// that need to mutate work on a private clone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty);
        }
        if data.len() != rows * cols {
            return Err(ShapeError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from nested rows, rejecting empty and ragged input.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[f64]>,
    {
        let first = rows.first().ok_or(ShapeError::Empty)?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(ShapeError::Empty);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ShapeError::Ragged {
                    row: idx,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Wrap a buffer whose shape the caller has already validated.
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert!(rows > 0 && cols > 0 && data.len() == rows * cols);
        Self { data, rows, cols }
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self, ShapeError> {
        Self::from_shape_vec((rows, cols), vec![0.0; rows * cols])
    }

    /// Identity of order `n`. An order of zero is clamped to one.
    pub fn identity(n: usize) -> Self {
        let n = n.max(1);
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            data,
            rows: n,
            cols: n,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn column(&self, col: usize) -> Vector {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)]).collect()
    }

    pub fn select_columns<R>(&self, range: R) -> Matrix
    where
        R: RangeBounds<usize>,
    {
        use std::ops::Bound;

        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
        };

        let end = match range.end_bound() {
            Bound::Unbounded => self.cols,
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
        };

        assert!(
            start < end && end <= self.cols,
            "column slice out of bounds"
        );

        let new_cols = end - start;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for row in 0..self.rows {
            data.extend_from_slice(&self.row_slice(row)[start..end]);
        }

        Matrix {
            data,
            rows: self.rows,
            cols: new_cols,
        }
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            let (oa, ob) = (self.offset(a, col), self.offset(b, col));
            self.data.swap(oa, ob);
        }
    }

    /// The matrix left after deleting `row` and `col`. Returns `None` for a 1x1
    /// input or for indices outside the matrix.
    pub fn minor(&self, row: usize, col: usize) -> Option<Matrix> {
        if self.rows < 2 || self.cols < 2 || row >= self.rows || col >= self.cols {
            return None;
        }
        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for r in (0..self.rows).filter(|&r| r != row) {
            for c in (0..self.cols).filter(|&c| c != col) {
                data.push(self[(r, c)]);
            }
        }
        Some(Matrix {
            data,
            rows: self.rows - 1,
            cols: self.cols - 1,
        })
    }

    /// Append `values` as an extra right-most column.
    pub fn augment_column(&self, values: &Vector) -> Matrix {
        assert_eq!(
            values.len(),
            self.rows,
            "augmented column must have one entry per row"
        );
        let cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in 0..self.rows {
            data.extend_from_slice(self.row_slice(row));
            data.push(values[row]);
        }
        Matrix {
            data,
            rows: self.rows,
            cols,
        }
    }

    /// Place `other` to the right of `self`, as in `[A|B]`.
    pub fn augment(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            self.rows, other.rows,
            "augmented blocks must have the same row count"
        );
        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in 0..self.rows {
            data.extend_from_slice(self.row_slice(row));
            data.extend_from_slice(other.row_slice(row));
        }
        Matrix {
            data,
            rows: self.rows,
            cols,
        }
    }

    /// Inverse of `augment_column`: strip the last column off and return it separately.
    pub fn split_last_column(&self) -> (Matrix, Vector) {
        assert!(self.cols >= 2, "cannot split the only column of a matrix");
        let last = self.column(self.cols - 1);
        (self.select_columns(..self.cols - 1), last)
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row_slice(r).to_vec()).collect()
    }

    /// Element-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = ShapeError;

    fn try_from(value: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(&value)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(value: Matrix) -> Self {
        value.to_rows()
    }
}

impl TryFrom<&ndarray::Array2<f64>> for Matrix {
    type Error = ShapeError;

    fn try_from(value: &ndarray::Array2<f64>) -> Result<Self, Self::Error> {
        let (rows, cols) = value.dim();
        Matrix::from_shape_vec((rows, cols), value.iter().copied().collect())
    }
}

impl From<&Matrix> for ndarray::Array2<f64> {
    fn from(value: &Matrix) -> Self {
        ndarray::Array2::from_shape_fn((value.rows, value.cols), |(r, c)| value[(r, c)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    Empty,
    BufferLength { rows: usize, cols: usize, len: usize },
    Ragged { row: usize, expected: usize, found: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Empty => write!(f, "a matrix needs at least one row and one column"),
            ShapeError::BufferLength { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            ShapeError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} values but the first row has {}",
                row + 1,
                found,
                expected
            ),
        }
    }
}

impl Error for ShapeError {}
