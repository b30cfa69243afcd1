//! Mesh analysis layer: neighbor distances, quality reports, batch runs.
//!
//! Everything here works against the [`crate::engine::EngineMesh`]
//! capability trait, so the same code runs on the native legacy VTK
//! engine and on in-memory fixtures.

pub mod batch;
pub mod distance;
pub mod quality;

pub use batch::{BatchFailure, MeshRange, MeshSeries, batch_distance, batch_quality, run_batch};
pub use distance::{DistanceSummary, distance_summary, neighbour_distances};
pub use quality::{QualityReport, quality_report};
