//! # mesh-probe
//!
//! mesh-probe is a small toolkit for post-processing volumetric simulation
//! meshes. It converts legacy ASCII VTK hexahedral meshes to tetrahedral
//! ones and reports geometric statistics over single meshes or numbered
//! mesh series.
//!
//! ## Features
//! - Streaming hexahedron-to-tetrahedron conversion ([`io::vtk::convert_file`])
//!   that never loads the mesh into memory and never leaves partial output
//! - A legacy VTK reader and writer for in-memory work ([`io::vtk::VtkReader`],
//!   [`io::vtk::VtkWriter`])
//! - Face-adjacency graphs and centroid neighbor distances
//! - Per-cell quality measures (aspect ratio, Jacobian, edge ratio, volume)
//!   with mean, spread and percentile reports
//! - A [`engine::MeshEngine`] seam so the analysis layer runs against the
//!   built-in VTK engine or an in-memory fixture
//!
//! ## Usage
//!
//! ```no_run
//! use mesh_probe::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), MeshProbeError> {
//! let cfg = ProbeConfig::default();
//! let (out, summary) = convert_file(Path::new("scaffold.vtk"), &cfg)?;
//! println!("{} -> {} cells in {}", summary.source_cells, summary.output_cells, out.display());
//!
//! let mesh = VtkMeshEngine::from_config(&cfg).load(&out)?;
//! println!("{}", quality_report(&mesh, "Jacobian")?);
//! # Ok(())
//! # }
//! ```

pub mod algs;
pub mod analysis;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::adjacency::{AdjacencyGraph, build_face_adjacency, cell_face_adjacency};
    pub use crate::algs::decompose::{HEX_TO_TET, decompose_cell, decompose_hexahedron};
    pub use crate::analysis::{
        BatchFailure, DistanceSummary, MeshRange, MeshSeries, QualityReport, batch_distance,
        batch_quality, distance_summary, quality_report,
    };
    pub use crate::config::ProbeConfig;
    pub use crate::engine::memory::{InMemoryEngine, InMemoryMesh};
    pub use crate::engine::vtk::{VtkMesh, VtkMeshEngine};
    pub use crate::engine::{EngineMesh, MeshEngine};
    pub use crate::geometry::quality::QualityMeasure;
    pub use crate::io::LegacyMesh;
    pub use crate::io::vtk::{ConversionSummary, VtkReader, VtkWriter, convert_file};
    pub use crate::mesh_error::MeshProbeError;
    pub use crate::topology::{Cell, CellType};
}
