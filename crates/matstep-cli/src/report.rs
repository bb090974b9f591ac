//! Plain-text rendering of session responses for the terminal.
use matstep_engine::render::{format_matrix, format_number, format_vector};
use matstep_engine::Matrix;

use crate::session::Response;

pub fn format_response(response: &Response, precision: usize) -> String {
    let mut out: Vec<String> = Vec::new();

    if response.success {
        out.push(response.message.clone());
    } else {
        out.push(format!("Error: {}", response.message));
    }

    if let Some(steps) = &response.steps {
        out.push("Steps:".to_string());
        out.extend(steps.lines().map(str::to_string));
    }

    if let Some(result) = &response.result {
        push_matrix(&mut out, "Result:", result, precision);
    }
    if let Some(det) = response.determinant {
        out.push(format!("Determinant: {}", format_number(det, precision)));
    }
    if let Some(rhs) = &response.rhs {
        out.push(format!(
            "Transformed right-hand side: {}",
            format_vector(rhs, precision)
        ));
    }
    if let Some(solution) = &response.solution {
        out.push("Solution:".to_string());
        for (i, value) in solution.iter().enumerate() {
            out.push(format!("  x{} = {}", i + 1, format_number(*value, precision)));
        }
    }
    if let Some(l) = &response.l {
        push_matrix(&mut out, "Matrix L:", l, precision);
    }
    if let Some(u) = &response.u {
        push_matrix(&mut out, "Matrix U:", u, precision);
    }
    for warning in &response.warnings {
        out.push(format!("Warning: {}", warning));
    }
    for stored in &response.matrices {
        push_matrix(
            &mut out,
            &format!("Matrix {} ({}x{}):", stored.id, stored.rows, stored.cols),
            &stored.data,
            precision,
        );
    }

    out.join("\n")
}

fn push_matrix(out: &mut Vec<String>, label: &str, matrix: &Matrix, precision: usize) {
    out.push(label.to_string());
    out.extend(format_matrix(matrix, precision));
}
