//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `matstep` binary end-to-end: argument
//! parsing, CSV and script input, text and JSON output, and exit status.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("matstep").unwrap()
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag_lists_operations() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("determinant"))
        .stdout(predicate::str::contains("gauss-jordan"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("matstep"));
}

// ---------------------------------------------------------------------------
// One-shot operations
// ---------------------------------------------------------------------------

#[test]
fn add_prints_result_and_steps() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "1,2\n3,4\n");
    let b = write_file(dir.path(), "b.csv", "5,6\n7,8\n");

    cmd()
        .args(["add", a.to_str().unwrap(), b.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sum stored as matrix C"))
        .stdout(predicate::str::contains("Element (2,2) = 4.0 + 8.0 = 12.0"))
        .stdout(predicate::str::contains("      10      12 ]"));
}

#[test]
fn determinant_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "1, 2\n3, 4\n");

    cmd()
        .args(["determinant", a.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Determinant of matrix A = -2"));
}

#[test]
fn determinant_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "1,2\n3,4\n");

    let output = cmd()
        .args(["determinant", a.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["determinant"], -2.0);
    assert!(value["steps"].as_str().unwrap().contains("Determinant of 2x2 matrix"));
}

#[test]
fn no_steps_flag_hides_the_trace() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "4,7\n2,6\n");

    cmd()
        .args(["inverse", a.to_str().unwrap(), "--no-steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inverse stored as matrix B"))
        .stdout(predicate::str::contains("Steps:").not());
}

#[test]
fn gaussian_with_rhs_solves_the_system() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "2,1\n1,3\n");

    cmd()
        .args(["gaussian", a.to_str().unwrap(), "--rhs", "3,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x1 = 0.8000"))
        .stdout(predicate::str::contains("x2 = 1.4000"));
}

#[test]
fn gauss_jordan_without_rhs_stores_reduced_form() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "1,2\n3,4\n");

    cmd()
        .args(["gauss-jordan", a.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reduced echelon form stored as matrix B"));
}

#[test]
fn lu_stores_both_factors() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "2,-1,-2\n-4,6,3\n-4,-2,8\n");

    cmd()
        .args(["lu", a.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("L stored as matrix B, U stored as matrix C"));
}

#[test]
fn singular_inverse_fails() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "1,2\n2,4\n");

    cmd()
        .args(["inverse", a.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: matrix is singular"));
}

#[test]
fn epsilon_flag_rejects_nan() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "1,2\n2,4\n");

    cmd()
        .args(["inverse", a.to_str().unwrap(), "--epsilon", "NaN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "epsilon must be a positive finite number",
        ));
}

#[test]
fn negative_epsilon_keeps_singular_inverse_failing() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "1,2\n2,4\n");
    let negative = write_file(dir.path(), "neg.json", r#"{"policy": {"epsilon": -1e-10}}"#);

    cmd()
        .args(["inverse", a.to_str().unwrap(), "--config", negative.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: matrix is singular"));

    cmd()
        .args(["inverse", a.to_str().unwrap(), "--epsilon=-1e-10"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: matrix is singular"));
}

#[test]
fn incompatible_multiplication_fails() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "1,2,3\n");
    let b = write_file(dir.path(), "b.csv", "1,2\n");

    cmd()
        .args(["multiply", a.to_str().unwrap(), b.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "multiplication is not defined for shapes 1x3 and 1x2",
        ));
}

#[test]
fn nonexistent_matrix_file_errors() {
    cmd()
        .args(["determinant", "/nonexistent/matrix.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open matrix file"));
}

#[test]
fn oversized_matrix_respects_config() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.csv", "1,2\n3,4\n");
    let strict = write_file(dir.path(), "strict.json", r#"{"max_dimension": 1}"#);
    let open = write_file(dir.path(), "open.json", r#"{"max_dimension": null}"#);

    cmd()
        .args(["determinant", a.to_str().unwrap(), "--config", strict.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Matrix dimensions must be between"));

    cmd()
        .args(["determinant", a.to_str().unwrap(), "--config", open.to_str().unwrap()])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

#[test]
fn run_executes_script_in_one_session() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_file(
        dir.path(),
        "script.json",
        r#"[
            {"op": "create", "matrix": [[4, 7], [2, 6]]},
            {"op": "inverse", "id": "A"},
            {"op": "list"}
        ]"#,
    );

    let output = cmd()
        .args(["run", script.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let responses = value.as_array().unwrap();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[1]["matrix_ids"][0], "B");
    assert_eq!(responses[2]["matrices"].as_array().unwrap().len(), 2);
}

#[test]
fn run_reports_failure_but_finishes_script() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_file(
        dir.path(),
        "script.json",
        r#"[
            {"op": "determinant", "id": "Q"},
            {"op": "create", "matrix": [[1]]}
        ]"#,
    );

    cmd()
        .args(["run", script.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Invalid matrix ID: Q"))
        .stdout(predicate::str::contains("Matrix A created and stored"));
}

#[test]
fn run_rejects_malformed_script() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_file(dir.path(), "script.json", r#"[{"op": "transpose"}]"#);

    cmd()
        .args(["run", script.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse script"));
}
