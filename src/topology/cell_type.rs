//! Cell type metadata for volumetric cells.

use crate::mesh_error::MeshProbeError;
use std::fmt;

/// VTK identifier of a linear tetrahedron (`VTK_TETRA`).
pub const VTK_TETRA: i32 = 10;
/// VTK identifier of a linear hexahedron (`VTK_HEXAHEDRON`).
pub const VTK_HEXAHEDRON: i32 = 12;

/// Volumetric cell kinds understood by the topology engine.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum CellType {
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D tensor-product cell (hex).
    Hexahedron,
}

impl CellType {
    /// Number of vertices of the cell.
    pub fn vertex_count(self) -> usize {
        match self {
            CellType::Tetrahedron => 4,
            CellType::Hexahedron => 8,
        }
    }

    /// Local vertex lists of the bounding faces.
    pub fn faces(self) -> &'static [&'static [usize]] {
        match self {
            CellType::Tetrahedron => &TET_FACES,
            CellType::Hexahedron => &HEX_FACES,
        }
    }

    /// Legacy VTK type identifier.
    pub fn vtk_id(self) -> i32 {
        match self {
            CellType::Tetrahedron => VTK_TETRA,
            CellType::Hexahedron => VTK_HEXAHEDRON,
        }
    }

    /// Map a legacy VTK type identifier back to a cell type.
    pub fn from_vtk_id(id: i32) -> Result<Self, MeshProbeError> {
        match id {
            VTK_TETRA => Ok(CellType::Tetrahedron),
            VTK_HEXAHEDRON => Ok(CellType::Hexahedron),
            _ => Err(MeshProbeError::Format(format!(
                "unsupported VTK cell type {id}"
            ))),
        }
    }
}

const TET_FACES: [&[usize]; 4] = [&[0, 1, 2], &[0, 1, 3], &[1, 2, 3], &[0, 2, 3]];
const HEX_FACES: [&[usize]; 6] = [
    &[0, 1, 2, 3],
    &[4, 5, 6, 7],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
];

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellType::Tetrahedron => write!(f, "tetrahedron"),
            CellType::Hexahedron => write!(f, "hexahedron"),
        }
    }
}
