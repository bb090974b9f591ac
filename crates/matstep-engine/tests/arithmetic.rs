//! Integration tests for addition, subtraction, multiplication and the
//! cofactor determinant.

use approx::assert_relative_eq;
use matstep_engine::ops::{add, determinant, multiply, subtract};
use matstep_engine::{LinalgError, Matrix, Operation, Shape};

fn m(rows: &[&[f64]]) -> Matrix {
    Matrix::from_rows(rows).unwrap()
}

// ---------------------------------------------------------------------------
// Add / Subtract
// ---------------------------------------------------------------------------

#[test]
fn add_is_cellwise() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let b = m(&[&[5.0, -6.0], &[0.5, 8.0]]);
    let sum = add(&a, &b).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_eq!(sum.value[(i, j)], a[(i, j)] + b[(i, j)]);
        }
    }
}

#[test]
fn add_traces_one_line_per_cell_in_row_major_order() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
    let trace = add(&a, &b).unwrap().trace;
    let cells: Vec<&String> = trace
        .lines()
        .iter()
        .filter(|l| l.starts_with("Element"))
        .collect();
    assert_eq!(cells.len(), 4);
    assert_eq!(cells[0], "Element (1,1) = 1.0 + 5.0 = 6.0");
    assert_eq!(cells[1], "Element (1,2) = 2.0 + 6.0 = 8.0");
    assert_eq!(cells[3], "Element (2,2) = 4.0 + 8.0 = 12.0");
}

#[test]
fn subtract_undoes_add() {
    let a = m(&[&[0.1, 2.5, -3.0], &[4.0, 0.2, 6.0]]);
    let b = m(&[&[0.7, -1.0, 9.0], &[1.3, 0.4, -2.0]]);
    let sum = add(&a, &b).unwrap().value;
    let back = subtract(&sum, &b).unwrap();
    assert!(back.value.approx_eq(&a, 1e-10));
    assert!(back.trace.contains("Element (1,1) = "));
    assert!(back.trace.contains(" - "));
}

#[test]
fn add_rejects_mismatched_shapes() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let b = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let err = add(&a, &b).unwrap_err();
    assert_eq!(
        err,
        LinalgError::Dimension {
            op: Operation::Add,
            lhs: Shape::new(2, 2),
            rhs: Shape::new(2, 3),
        }
    );
    assert_eq!(
        err.to_string(),
        "addition is not defined for shapes 2x2 and 2x3"
    );
    assert!(matches!(
        subtract(&a, &b).unwrap_err(),
        LinalgError::Dimension {
            op: Operation::Subtract,
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Multiply
// ---------------------------------------------------------------------------

#[test]
fn multiply_shape_is_rows_by_cols() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let b = m(&[&[1.0], &[0.0], &[-1.0]]);
    let product = multiply(&a, &b).unwrap().value;
    assert_eq!(product.shape(), (2, 1));
    assert_eq!(product.to_rows(), vec![vec![-2.0], vec![-2.0]]);
}

#[test]
fn multiply_by_identity_is_a_no_op() {
    let a = m(&[&[1.5, -2.0, 3.0], &[4.0, 0.0, 6.25]]);
    let product = multiply(&a, &Matrix::identity(3)).unwrap().value;
    assert_eq!(product, a);
}

#[test]
fn multiply_trace_names_every_term() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
    let result = multiply(&a, &b).unwrap();
    assert_eq!(
        result.value.to_rows(),
        vec![vec![19.0, 22.0], vec![43.0, 50.0]]
    );
    assert!(result
        .trace
        .contains("Element (1,1) = 1.0 * 5.0 + 2.0 * 7.0 (running: 5.0 -> 19.0) = 19.0"));
    assert_eq!(
        result
            .trace
            .lines()
            .iter()
            .filter(|l| l.starts_with("Element"))
            .count(),
        4
    );
}

#[test]
fn multiply_rejects_incompatible_inner_dimension() {
    let a = m(&[&[1.0, 2.0]]);
    let b = m(&[&[1.0, 2.0]]);
    let err = multiply(&a, &b).unwrap_err();
    assert!(matches!(
        err,
        LinalgError::Dimension {
            op: Operation::Multiply,
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Determinant
// ---------------------------------------------------------------------------

#[test]
fn determinant_base_cases() {
    let one = determinant(&m(&[&[-7.5]])).unwrap();
    assert_eq!(one.value, -7.5);

    let two = determinant(&m(&[&[3.0, 8.0], &[4.0, 6.0]])).unwrap();
    assert_eq!(two.value, 3.0 * 6.0 - 8.0 * 4.0);
    assert!(two
        .trace
        .contains("Determinant of 2x2 matrix = (3.0 * 6.0) - (8.0 * 4.0) = -14.0"));
}

#[test]
fn determinant_of_identity_is_one() {
    for n in 1..=4 {
        let det = determinant(&Matrix::identity(n)).unwrap().value;
        assert_eq!(det, 1.0, "identity of order {}", n);
    }
}

#[test]
fn determinant_expands_along_first_row() {
    let a = m(&[&[6.0, 1.0, 1.0], &[4.0, -2.0, 5.0], &[2.0, 8.0, 7.0]]);
    let result = determinant(&a).unwrap();
    assert_relative_eq!(result.value, -306.0, epsilon = 1e-12);
    assert!(result.trace.contains("Term 1: +1 * 6.0 * -54.0 = -324.0"));
    assert!(result.trace.contains("Term 2: -1 * 1.0 * 18.0 = -18.0"));
    assert!(result.trace.contains("Term 3: +1 * 1.0 * 36.0 = 36.0"));
    assert_eq!(
        result.trace.lines().last().map(String::as_str),
        Some("Final determinant = -306.0")
    );
}

#[test]
fn determinant_4x4_recurses_through_minors() {
    let a = m(&[
        &[1.0, 0.0, 2.0, -1.0],
        &[3.0, 0.0, 0.0, 5.0],
        &[2.0, 1.0, 4.0, -3.0],
        &[1.0, 0.0, 5.0, 0.0],
    ]);
    let result = determinant(&a).unwrap();
    assert_relative_eq!(result.value, 30.0, epsilon = 1e-9);
    let expansions = result
        .trace
        .lines()
        .iter()
        .filter(|l| l.starts_with("Expanding"))
        .count();
    // the 4x4 level plus one 3x3 expansion per first-row entry
    assert_eq!(expansions, 5);
}

#[test]
fn determinant_rejects_rectangular_input() {
    let err = determinant(&m(&[&[1.0, 2.0, 3.0]])).unwrap_err();
    assert_eq!(
        err,
        LinalgError::NotSquare {
            op: Operation::Determinant,
            shape: Shape::new(1, 3),
        }
    );
}
