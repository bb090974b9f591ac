//! Request execution against a stateful matrix store.
//!
//! A `Session` is what a script or a one-shot command talks to: requests
//! name stored matrices by identifier, and matrix results are stored under
//! freshly minted identifiers so later requests can refer to them.
use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use matstep_engine::render::format_number;
use matstep_engine::{EliminationMode, Engine, Matrix, Trace, Vector};

use crate::config::CliConfig;
use crate::store::{MatrixId, MatrixStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Create {
        matrix: Matrix,
    },
    List,
    Add {
        lhs: String,
        rhs: String,
    },
    Subtract {
        lhs: String,
        rhs: String,
    },
    Multiply {
        lhs: String,
        rhs: String,
    },
    Determinant {
        id: String,
    },
    Inverse {
        id: String,
    },
    /// Echelon form of `id`; with `solve`, the solution of `id * x = rhs`.
    Gaussian {
        id: String,
        #[serde(default)]
        solve: bool,
        #[serde(default)]
        rhs: Option<Vector>,
    },
    GaussJordan {
        id: String,
        #[serde(default)]
        solve: bool,
        #[serde(default)]
        rhs: Option<Vector>,
    },
    Lu {
        id: String,
    },
    Delete {
        id: String,
    },
}

impl Request {
    pub fn op_name(&self) -> &'static str {
        match self {
            Request::Create { .. } => "create",
            Request::List => "list",
            Request::Add { .. } => "add",
            Request::Subtract { .. } => "subtract",
            Request::Multiply { .. } => "multiply",
            Request::Determinant { .. } => "determinant",
            Request::Inverse { .. } => "inverse",
            Request::Gaussian { .. } => "gaussian",
            Request::GaussJordan { .. } => "gauss_jordan",
            Request::Lu { .. } => "lu",
            Request::Delete { .. } => "delete",
        }
    }
}

/// One entry of a `list` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMatrix {
    pub id: String,
    pub rows: usize,
    pub cols: usize,
    pub data: Matrix,
}

/// Outcome of a request. Fields that do not apply are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    pub success: bool,
    pub message: String,
    /// The operation's trace, one step per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    /// Identifiers minted by this request, in allocation order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matrix_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Matrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub determinant: Option<f64>,
    /// Right-hand side after the elimination's row operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rhs: Option<Vector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<Vector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l: Option<Matrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u: Option<Matrix>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matrices: Vec<StoredMatrix>,
}

impl Response {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }
}

pub struct Session {
    engine: Engine,
    config: CliConfig,
    store: MatrixStore,
}

impl Session {
    pub fn new(config: CliConfig) -> Self {
        Self {
            engine: config.engine(),
            config,
            store: MatrixStore::new(),
        }
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    pub fn store(&self) -> &MatrixStore {
        &self.store
    }

    /// Run one request. Failures come back as `success: false` responses and
    /// leave the store untouched.
    pub fn execute(&mut self, request: Request) -> Response {
        let op = request.op_name();
        log::debug!("[matstep::session] executing {}", op);
        match self.dispatch(request) {
            Ok(response) => response,
            Err(e) => {
                log::warn!("[matstep::session] {} failed: {:#}", op, e);
                Response::failure(format!("{:#}", e))
            }
        }
    }

    pub fn run_script(&mut self, requests: Vec<Request>) -> Vec<Response> {
        requests
            .into_iter()
            .map(|request| self.execute(request))
            .collect()
    }

    fn dispatch(&mut self, request: Request) -> Result<Response> {
        match request {
            Request::Create { matrix } => self.create(matrix),
            Request::List => Ok(self.list()),
            Request::Add { lhs, rhs } => {
                let (a, b) = self.pair(&lhs, &rhs)?;
                let (sum, trace) = self.engine.add(a, b)?.into_parts();
                Ok(self.store_result(sum, trace, "Sum"))
            }
            Request::Subtract { lhs, rhs } => {
                let (a, b) = self.pair(&lhs, &rhs)?;
                let (difference, trace) = self.engine.subtract(a, b)?.into_parts();
                Ok(self.store_result(difference, trace, "Difference"))
            }
            Request::Multiply { lhs, rhs } => {
                let (a, b) = self.pair(&lhs, &rhs)?;
                let (product, trace) = self.engine.multiply(a, b)?.into_parts();
                Ok(self.store_result(product, trace, "Product"))
            }
            Request::Determinant { id } => {
                let (det, trace) = self.engine.determinant(self.lookup(&id)?)?.into_parts();
                Ok(Response {
                    determinant: Some(det),
                    steps: self.steps(trace),
                    ..Response::ok(format!(
                        "Determinant of matrix {} = {}",
                        id,
                        format_number(det, self.config.precision)
                    ))
                })
            }
            Request::Inverse { id } => {
                let (inverse, trace) = self.engine.inverse(self.lookup(&id)?)?.into_parts();
                Ok(self.store_result(inverse, trace, "Inverse"))
            }
            Request::Gaussian { id, solve, rhs } => {
                self.eliminate(&id, solve, rhs, EliminationMode::Plain)
            }
            Request::GaussJordan { id, solve, rhs } => {
                self.eliminate(&id, solve, rhs, EliminationMode::Reduced)
            }
            Request::Lu { id } => self.lu(&id),
            Request::Delete { id } => {
                if self.store.remove(&id).is_none() {
                    bail!("Invalid matrix ID: {}", id);
                }
                Ok(Response::ok(format!("Matrix {} deleted", id)))
            }
        }
    }

    fn create(&mut self, matrix: Matrix) -> Result<Response> {
        if let Some(max) = self.config.max_dimension {
            if matrix.nrows() > max || matrix.ncols() > max {
                bail!(
                    "Matrix dimensions must be between 1x1 and {}x{}, got {}",
                    max,
                    max,
                    matrix.shape()
                );
            }
        }
        let id = self.store.insert(matrix.clone());
        Ok(Response {
            matrix_ids: vec![id.to_string()],
            result: Some(matrix),
            ..Response::ok(format!("Matrix {} created and stored", id))
        })
    }

    fn list(&self) -> Response {
        let matrices: Vec<StoredMatrix> = self
            .store
            .list()
            .map(|(id, matrix)| StoredMatrix {
                id: id.to_string(),
                rows: matrix.nrows(),
                cols: matrix.ncols(),
                data: matrix.clone(),
            })
            .collect();
        let message = match matrices.len() {
            0 => "No matrices stored".to_string(),
            1 => "1 matrix stored".to_string(),
            n => format!("{} matrices stored", n),
        };
        Response {
            matrices,
            ..Response::ok(message)
        }
    }

    fn eliminate(
        &mut self,
        id: &str,
        solve: bool,
        rhs: Option<Vector>,
        mode: EliminationMode,
    ) -> Result<Response> {
        let matrix = self.lookup(id)?;

        if solve {
            // an omitted right-hand side is the homogeneous system
            let rhs = rhs.unwrap_or_else(|| Vector::zeros(matrix.nrows()));
            let (solved, trace) = self.engine.solve(matrix, &rhs, mode)?.into_parts();
            let message = if solved.solution.is_unique() {
                format!("System solved with {}", mode)
            } else {
                "System has infinitely many solutions, showing the one with free unknowns set to 0"
                    .to_string()
            };
            return Ok(Response {
                steps: self.steps(trace),
                result: Some(solved.elimination.matrix),
                rhs: solved.elimination.rhs,
                warnings: solved
                    .solution
                    .warnings
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                solution: Some(solved.solution.values),
                ..Response::ok(message)
            });
        }

        let (result, trace) = self.engine.eliminate(matrix, rhs.as_ref(), mode)?.into_parts();
        let label = match mode {
            EliminationMode::Plain => "Echelon form",
            EliminationMode::Reduced => "Reduced echelon form",
        };
        let stored = self.store.insert(result.matrix.clone());
        Ok(Response {
            steps: self.steps(trace),
            matrix_ids: vec![stored.to_string()],
            result: Some(result.matrix),
            rhs: result.rhs,
            ..Response::ok(format!("{} stored as matrix {}", label, stored))
        })
    }

    fn lu(&mut self, id: &str) -> Result<Response> {
        let (lu, trace) = self.engine.lu_factorization(self.lookup(id)?)?.into_parts();
        let l_id = self.store.insert(lu.l.clone());
        let u_id = self.store.insert(lu.u.clone());
        Ok(Response {
            steps: self.steps(trace),
            matrix_ids: vec![l_id.to_string(), u_id.to_string()],
            l: Some(lu.l),
            u: Some(lu.u),
            ..Response::ok(format!(
                "L stored as matrix {}, U stored as matrix {}",
                l_id, u_id
            ))
        })
    }

    fn store_result(&mut self, matrix: Matrix, trace: Trace, label: &str) -> Response {
        let id: MatrixId = self.store.insert(matrix.clone());
        Response {
            steps: self.steps(trace),
            matrix_ids: vec![id.to_string()],
            result: Some(matrix),
            ..Response::ok(format!("{} stored as matrix {}", label, id))
        }
    }

    fn lookup(&self, id: &str) -> Result<&Matrix> {
        self.store
            .get(id)
            .ok_or_else(|| anyhow!("Invalid matrix ID: {}", id))
    }

    fn pair(&self, lhs: &str, rhs: &str) -> Result<(&Matrix, &Matrix)> {
        Ok((self.lookup(lhs)?, self.lookup(rhs)?))
    }

    fn steps(&self, trace: Trace) -> Option<String> {
        self.config.show_steps.then(|| trace.to_string())
    }
}
