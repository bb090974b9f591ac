//! Integration tests for the Matrix and Vector types.

use matstep_engine::math::{Matrix, Shape, ShapeError, Vector};

// ---------------------------------------------------------------------------
// Vector basics
// ---------------------------------------------------------------------------

#[test]
fn vector_from_vec_and_len() {
    let v = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    assert_eq!(v.len(), 3);
    assert!(!v.is_empty());
    assert_eq!(v[1], 2.0);
}

#[test]
fn vector_zeros_and_dot() {
    let z = Vector::zeros(3);
    assert!(z.iter().all(|&x| x == 0.0));
    let a = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    let b = Vector::from_vec(vec![4.0, -5.0, 6.0]);
    assert_eq!(a.dot(&b), 12.0);
}

#[test]
fn vector_exposes_its_values_as_a_slice() {
    let v = Vector::from(vec![0.8, 2.0]);
    assert_eq!(v.as_slice(), &[0.8, 2.0]);
    assert_eq!(Vec::from(v), vec![0.8, 2.0]);
}

// ---------------------------------------------------------------------------
// Matrix construction
// ---------------------------------------------------------------------------

#[test]
fn matrix_from_rows() {
    let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    assert_eq!(m.nrows(), 2);
    assert_eq!(m.ncols(), 3);
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.shape(), Shape::new(2, 3));
    assert_eq!(m[(1, 2)], 6.0);
}

#[test]
fn matrix_rejects_ragged_rows() {
    let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    assert_eq!(
        err,
        ShapeError::Ragged {
            row: 1,
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn matrix_rejects_empty_input() {
    let rows: Vec<Vec<f64>> = vec![];
    assert_eq!(Matrix::from_rows(&rows).unwrap_err(), ShapeError::Empty);
    assert_eq!(Matrix::from_rows(&[Vec::<f64>::new()]).unwrap_err(), ShapeError::Empty);
    assert!(Matrix::zeros(0, 3).is_err());
}

#[test]
fn matrix_from_shape_vec_checks_length() {
    assert!(Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0]).is_err());
    let m = Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(m.row_slice(1), &[3.0, 4.0]);
}

#[test]
fn identity_has_unit_diagonal() {
    let id = Matrix::identity(3);
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(id[(i, j)], if i == j { 1.0 } else { 0.0 });
        }
    }
}

// ---------------------------------------------------------------------------
// Matrix helpers used by the algorithms
// ---------------------------------------------------------------------------

#[test]
fn minor_deletes_row_and_column() {
    let m = Matrix::from_rows(&[
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![7.0, 8.0, 9.0],
    ])
    .unwrap();
    let minor = m.minor(0, 1).unwrap();
    assert_eq!(minor.to_rows(), vec![vec![4.0, 6.0], vec![7.0, 9.0]]);
    assert!(Matrix::identity(1).minor(0, 0).is_none());
}

#[test]
fn augment_and_split_round_trip() {
    let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let b = Vector::from_vec(vec![5.0, 6.0]);
    let aug = m.augment_column(&b);
    assert_eq!(aug.shape(), (2, 3));
    let (back, rhs) = aug.split_last_column();
    assert_eq!(back, m);
    assert_eq!(rhs, b);
}

#[test]
fn augment_with_identity_and_select_right_half() {
    let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let aug = m.augment(&Matrix::identity(2));
    assert_eq!(aug.row_slice(0), &[1.0, 2.0, 1.0, 0.0]);
    assert_eq!(aug.select_columns(2..4), Matrix::identity(2));
}

#[test]
fn swap_rows_exchanges_whole_rows() {
    let mut m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    m.swap_rows(0, 1);
    assert_eq!(m.to_rows(), vec![vec![3.0, 4.0], vec![1.0, 2.0]]);
}

#[test]
fn column_extracts_a_vector() {
    let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
    assert_eq!(m.column(1).to_vec(), vec![2.0, 4.0, 6.0]);
}

// ---------------------------------------------------------------------------
// Serialization & interop
// ---------------------------------------------------------------------------

#[test]
fn matrix_serializes_as_nested_rows() {
    let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.5]]).unwrap();
    let json = serde_json::to_string(&m).unwrap();
    assert_eq!(json, "[[1.0,2.0],[3.0,4.5]]");
    let back: Matrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn matrix_deserialization_rejects_ragged_rows() {
    let result: Result<Matrix, _> = serde_json::from_str("[[1.0,2.0],[3.0]]");
    assert!(result.is_err());
}

#[test]
fn ndarray_conversion_preserves_layout() {
    let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let arr: ndarray::Array2<f64> = (&m).into();
    assert_eq!(arr.dim(), (2, 3));
    assert_eq!(arr[[1, 0]], 4.0);
    let back = Matrix::try_from(&arr).unwrap();
    assert_eq!(back, m);
}
