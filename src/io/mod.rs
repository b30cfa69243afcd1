//! Mesh I/O helpers for legacy VTK meshes.
//!
//! This module provides the path checks shared by the converter and the
//! analysis engine, and the [`vtk`] submodule with the streaming
//! hexahedron → tetrahedron converter plus a whole-mesh reader/writer.

pub mod vtk;

use crate::mesh_error::MeshProbeError;
use crate::topology::cell::Cell;
use std::path::{Path, PathBuf};

/// A mesh held in memory: node coordinates plus ordered cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegacyMesh {
    /// Node coordinates, indexed by global 0-based node id.
    pub points: Vec<[f64; 3]>,
    /// Cells in file order.
    pub cells: Vec<Cell>,
}

impl LegacyMesh {
    /// Total size of the `CELLS` block (count prefixes included).
    pub fn connectivity_size(&self) -> usize {
        self.cells.iter().map(Cell::record_size).sum()
    }
}

/// Reject paths whose extension is not `expected` (compared without the dot).
///
/// This never touches the filesystem.
pub fn check_extension(path: &Path, expected: &str) -> Result<(), MeshProbeError> {
    let found = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if found != expected {
        return Err(MeshProbeError::Extension {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Fail with [`MeshProbeError::NotFound`] unless `path` is an existing file.
pub fn require_file(path: &Path) -> Result<(), MeshProbeError> {
    if !path.is_file() {
        return Err(MeshProbeError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// `dir/stem.ext` → `dir/stem{suffix}.ext`.
pub fn converted_path(source: &Path, suffix: &str) -> Result<PathBuf, MeshProbeError> {
    if suffix.is_empty() {
        return Err(MeshProbeError::Config(
            "conversion suffix must not be empty".into(),
        ));
    }
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| MeshProbeError::NotFound {
            path: source.to_path_buf(),
        })?;
    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    Ok(source.with_file_name(name))
}
