//! Mesh Engine capability boundary.
//!
//! The analysis layer never reads files or evaluates geometry itself; it
//! asks a [`MeshEngine`] to load a mesh and then queries the returned
//! [`EngineMesh`] for centroids, face neighbors and per-cell quality
//! arrays. Two engines ship with the crate:
//!
//! - [`vtk::VtkMeshEngine`]: loads ASCII legacy `.vtk` files and computes
//!   everything natively.
//! - [`memory::InMemoryEngine`]: serves pre-built meshes keyed by path,
//!   with explicit centroids, neighbor lists and quality arrays.

pub mod memory;
pub mod vtk;

use crate::mesh_error::MeshProbeError;
use std::path::Path;

/// Cartesian point.
pub type Point3 = [f64; 3];

/// A mesh loaded by a [`MeshEngine`], queried by cell id (`0..n_cells`).
pub trait EngineMesh {
    /// Number of cells.
    fn n_cells(&self) -> usize;

    /// Representative point of `cell`.
    fn centroid(&self, cell: usize) -> Result<Point3, MeshProbeError>;

    /// Cells sharing a face with `cell`, as reported by the engine.
    ///
    /// The list may contain duplicates or `cell` itself; use
    /// [`crate::algs::adjacency::face_neighbor_set`] for a clean set.
    fn face_neighbors(&self, cell: usize) -> Result<Vec<usize>, MeshProbeError>;

    /// One value per cell for the named metric.
    ///
    /// Fails with [`MeshProbeError::MetricNotFound`] when the engine cannot
    /// evaluate `metric` on this mesh.
    fn quality_array(&self, metric: &str) -> Result<Vec<f64>, MeshProbeError>;
}

/// Loads meshes from paths.
pub trait MeshEngine {
    type Mesh: EngineMesh;

    /// Load the mesh at `path`; a missing file is [`MeshProbeError::NotFound`].
    fn load(&self, path: &Path) -> Result<Self::Mesh, MeshProbeError>;
}

pub(crate) fn check_cell(cell: usize, n_cells: usize) -> Result<(), MeshProbeError> {
    if cell >= n_cells {
        return Err(MeshProbeError::CellOutOfRange { cell, n_cells });
    }
    Ok(())
}
