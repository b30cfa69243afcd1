//! MeshProbeError: Unified error type for mesh-probe public APIs
//!
//! Every fallible operation in the crate returns this type so that the
//! command-line front end can report a single descriptive message and exit
//! with a non-zero status. Nothing in the library catches and retries.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for mesh-probe operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshProbeError {
    /// The source mesh does not exist.
    #[error("mesh not found: {}", path.display())]
    NotFound { path: PathBuf },
    /// The source mesh carries an unsupported file suffix.
    #[error("unsupported extension for {}: expected `.{expected}`, got `{found}`", path.display())]
    Extension {
        path: PathBuf,
        expected: String,
        found: String,
    },
    /// Grammar violation in a legacy VTK stream.
    #[error("malformed legacy mesh: {0}")]
    Format(String),
    /// A cell has the wrong number of node indices for the requested operation.
    #[error("cell shape mismatch: expected {expected} node indices, got {found}")]
    Shape { expected: usize, found: usize },
    /// A node index appears twice in one cell.
    #[error("node {node} appears more than once in a cell")]
    DuplicateNode { node: usize },
    /// The requested quality metric is not available for this mesh.
    #[error("quality metric `{metric}` is not available for {cell_type} cells")]
    MetricNotFound { metric: String, cell_type: String },
    /// A metric short code has no entry in the configured metric map.
    #[error("unknown metric code `{code}`")]
    UnknownMetricCode { code: String },
    /// A quality array does not hold exactly one value per cell.
    #[error("quality array `{metric}` has {values} values for {cells} cells")]
    QualityLength {
        metric: String,
        values: usize,
        cells: usize,
    },
    /// A quality array without values cannot be summarised.
    #[error("quality array `{metric}` is empty")]
    EmptyQualityArray { metric: String },
    /// A mesh index range could not be parsed.
    #[error("invalid mesh range: {0}")]
    InvalidRange(String),
    /// A cell id outside of the mesh was queried.
    #[error("cell {cell} out of range for mesh with {n_cells} cells")]
    CellOutOfRange { cell: usize, n_cells: usize },
    /// Underlying I/O failure (message only, to keep the error `Clone`).
    #[error("I/O error: {0}")]
    Io(String),
    /// Configuration file could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// A batch run stopped at the mesh with the given index.
    #[error("mesh {index} failed: {source}")]
    Batch {
        index: u32,
        #[source]
        source: Box<MeshProbeError>,
    },
}

impl From<std::io::Error> for MeshProbeError {
    fn from(err: std::io::Error) -> Self {
        MeshProbeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MeshProbeError {
    fn from(err: serde_json::Error) -> Self {
        MeshProbeError::Config(err.to_string())
    }
}

impl From<tempfile::PersistError> for MeshProbeError {
    fn from(err: tempfile::PersistError) -> Self {
        MeshProbeError::Io(err.error.to_string())
    }
}
