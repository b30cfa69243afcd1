//! Centroid distances between face-adjacent cells.
//!
//! For every cell the mean Euclidean distance from its centroid to the
//! centroids of its face neighbors is computed. A cell without neighbors
//! has no such mean and reports `NaN`; [`DistanceSummary`] skips those
//! cells rather than counting them as zero.

use crate::algs::adjacency::face_neighbor_set;
use crate::engine::EngineMesh;
use crate::geometry::quality::distance;
use crate::mesh_error::MeshProbeError;
use serde::Serialize;

/// Mean distance from `cell` to its face neighbors, `NaN` when isolated.
pub fn mean_neighbour_distance<M>(mesh: &M, cell: usize) -> Result<f64, MeshProbeError>
where
    M: EngineMesh + ?Sized,
{
    let neighbours = face_neighbor_set(mesh, cell)?;
    if neighbours.is_empty() {
        return Ok(f64::NAN);
    }
    let here = mesh.centroid(cell)?;
    let mut total = 0.0;
    for &other in &neighbours {
        total += distance(here, mesh.centroid(other)?);
    }
    Ok(total / neighbours.len() as f64)
}

/// One mean neighbor distance per cell, in cell order.
pub fn neighbour_distances<M>(mesh: &M) -> Result<Vec<f64>, MeshProbeError>
where
    M: EngineMesh + ?Sized,
{
    (0..mesh.n_cells())
        .map(|c| mean_neighbour_distance(mesh, c))
        .collect()
}

/// Aggregate of per-cell neighbor distances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DistanceSummary {
    /// Mean over cells with at least one neighbor (`NaN` if there are none).
    pub mean: f64,
    /// Population standard deviation over the same cells.
    pub std: f64,
    /// Total number of cells.
    pub cells: usize,
    /// Cells without any face neighbor.
    pub isolated: usize,
}

impl DistanceSummary {
    pub fn from_distances(distances: &[f64]) -> Self {
        let finite: Vec<f64> = distances.iter().copied().filter(|d| !d.is_nan()).collect();
        let isolated = distances.len() - finite.len();
        let (mean, std) = if finite.is_empty() {
            (f64::NAN, f64::NAN)
        } else {
            let n = finite.len() as f64;
            let mean = finite.iter().sum::<f64>() / n;
            let var = finite.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
            (mean, var.sqrt())
        };
        Self {
            mean,
            std,
            cells: distances.len(),
            isolated,
        }
    }
}

/// Compute and summarise neighbor distances for a whole mesh.
pub fn distance_summary<M>(mesh: &M) -> Result<DistanceSummary, MeshProbeError>
where
    M: EngineMesh + ?Sized,
{
    let summary = DistanceSummary::from_distances(&neighbour_distances(mesh)?);
    if summary.isolated > 0 {
        log::warn!(
            "{} of {} cells have no face neighbor; their distance is not computable",
            summary.isolated,
            summary.cells
        );
    }
    Ok(summary)
}
