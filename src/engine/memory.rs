//! In-memory engine serving pre-built meshes keyed by path.
//!
//! Useful for exercising the analysis layer without any geometry library:
//! centroids, raw neighbor lists and quality arrays are given explicitly,
//! and a path without a registered mesh behaves like a missing file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::engine::{EngineMesh, MeshEngine, Point3, check_cell};
use crate::mesh_error::MeshProbeError;

/// Explicit mesh description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryMesh {
    /// Label used in error messages (e.g. `"tetrahedron"`).
    pub cell_kind: String,
    pub centroids: Vec<Point3>,
    /// Raw neighbor lists, returned unmodified by `face_neighbors`.
    pub neighbors: Vec<Vec<usize>>,
    pub quality: BTreeMap<String, Vec<f64>>,
}

impl InMemoryMesh {
    pub fn new(cell_kind: &str, centroids: Vec<Point3>, neighbors: Vec<Vec<usize>>) -> Self {
        Self {
            cell_kind: cell_kind.to_string(),
            centroids,
            neighbors,
            quality: BTreeMap::new(),
        }
    }

    pub fn with_quality(mut self, metric: &str, values: Vec<f64>) -> Self {
        self.quality.insert(metric.to_string(), values);
        self
    }
}

impl EngineMesh for InMemoryMesh {
    fn n_cells(&self) -> usize {
        self.centroids.len()
    }

    fn centroid(&self, cell: usize) -> Result<Point3, MeshProbeError> {
        check_cell(cell, self.n_cells())?;
        Ok(self.centroids[cell])
    }

    fn face_neighbors(&self, cell: usize) -> Result<Vec<usize>, MeshProbeError> {
        check_cell(cell, self.n_cells())?;
        Ok(self.neighbors.get(cell).cloned().unwrap_or_default())
    }

    fn quality_array(&self, metric: &str) -> Result<Vec<f64>, MeshProbeError> {
        self.quality
            .get(metric)
            .cloned()
            .ok_or_else(|| MeshProbeError::MetricNotFound {
                metric: metric.to_string(),
                cell_type: self.cell_kind.clone(),
            })
    }
}

/// Engine whose "filesystem" is a map from path to mesh or load failure.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngine {
    meshes: BTreeMap<PathBuf, Result<InMemoryMesh, MeshProbeError>>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, mesh: InMemoryMesh) {
        self.meshes.insert(path.into(), Ok(mesh));
    }

    /// Make loading `path` fail with `error`.
    pub fn insert_failure(&mut self, path: impl Into<PathBuf>, error: MeshProbeError) {
        self.meshes.insert(path.into(), Err(error));
    }
}

impl MeshEngine for InMemoryEngine {
    type Mesh = InMemoryMesh;

    fn load(&self, path: &Path) -> Result<InMemoryMesh, MeshProbeError> {
        match self.meshes.get(path) {
            Some(entry) => entry.clone(),
            None => Err(MeshProbeError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }
}
