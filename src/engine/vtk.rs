//! Native engine over ASCII legacy `.vtk` unstructured grids.

use std::collections::BTreeSet;
use std::path::Path;

use crate::algs::adjacency::{AdjacencyGraph, cell_face_adjacency};
use crate::config::{LEGACY_EXTENSION, ProbeConfig};
use crate::engine::{EngineMesh, MeshEngine, Point3, check_cell};
use crate::geometry::quality::{QualityMeasure, cell_measure, centroid};
use crate::io::LegacyMesh;
use crate::io::vtk::VtkReader;
use crate::mesh_error::MeshProbeError;
use crate::topology::cell_type::CellType;

/// Loads legacy mesh files with [`VtkReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VtkMeshEngine {
    extension: String,
}

impl Default for VtkMeshEngine {
    fn default() -> Self {
        Self::new(LEGACY_EXTENSION)
    }
}

impl VtkMeshEngine {
    /// Engine accepting files with the given suffix (leading dot optional).
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Engine accepting the extension configured in `config`.
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(&config.extension)
    }

    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// A legacy mesh with precomputed centroids and face adjacency.
#[derive(Debug, Clone)]
pub struct VtkMesh {
    mesh: LegacyMesh,
    centroids: Vec<Point3>,
    adjacency: AdjacencyGraph,
    cell_types: BTreeSet<CellType>,
}

impl VtkMesh {
    pub fn new(mesh: LegacyMesh) -> Self {
        let centroids = mesh
            .cells
            .iter()
            .map(|c| centroid(&vertices_of(&mesh, c.nodes())))
            .collect();
        let adjacency = cell_face_adjacency(&mesh.cells);
        let cell_types = mesh.cells.iter().map(|c| c.cell_type()).collect();
        Self {
            mesh,
            centroids,
            adjacency,
            cell_types,
        }
    }

    #[inline]
    pub fn mesh(&self) -> &LegacyMesh {
        &self.mesh
    }

    #[inline]
    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }
}

fn vertices_of(mesh: &LegacyMesh, nodes: &[usize]) -> Vec<Point3> {
    nodes.iter().map(|&n| mesh.points[n]).collect()
}

impl EngineMesh for VtkMesh {
    fn n_cells(&self) -> usize {
        self.mesh.cells.len()
    }

    fn centroid(&self, cell: usize) -> Result<Point3, MeshProbeError> {
        check_cell(cell, self.n_cells())?;
        Ok(self.centroids[cell])
    }

    fn face_neighbors(&self, cell: usize) -> Result<Vec<usize>, MeshProbeError> {
        check_cell(cell, self.n_cells())?;
        Ok(self.adjacency.neighbors(cell).to_vec())
    }

    fn quality_array(&self, metric: &str) -> Result<Vec<f64>, MeshProbeError> {
        let kinds = || self.cell_types.iter().map(ToString::to_string).collect::<Vec<_>>().join("/");
        let measure: QualityMeasure =
            metric
                .parse()
                .map_err(|_| MeshProbeError::MetricNotFound {
                    metric: metric.to_string(),
                    cell_type: kinds(),
                })?;
        if let Some(ct) = self.cell_types.iter().find(|ct| !measure.supports(**ct)) {
            return Err(MeshProbeError::MetricNotFound {
                metric: metric.to_string(),
                cell_type: ct.to_string(),
            });
        }
        self.mesh
            .cells
            .iter()
            .map(|c| cell_measure(measure, c.cell_type(), &vertices_of(&self.mesh, c.nodes())))
            .collect()
    }
}

impl MeshEngine for VtkMeshEngine {
    type Mesh = VtkMesh;

    fn load(&self, path: &Path) -> Result<VtkMesh, MeshProbeError> {
        let mesh = VtkReader.read_file(path, &self.extension)?;
        log::info!(
            "loaded {} ({} points, {} cells)",
            path.display(),
            mesh.points.len(),
            mesh.cells.len()
        );
        Ok(VtkMesh::new(mesh))
    }
}
