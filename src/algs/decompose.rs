//! Hexahedron → six tetrahedra decomposition.
//
// Every hexahedron is split along the diagonal through its local vertices
// 2 and 4 using one fixed table, so all tetrahedra produced across a mesh
// share the same handedness. The table is data, not logic; the output of
// row `t` is `[hex[i] for i in HEX_TO_TET[t]]` in exactly that order.
//
// Local vertex numbering follows VTK_HEXAHEDRON: bottom face [0, 1, 2, 3],
// top face [4, 5, 6, 7], vertex `i + 4` above vertex `i`.
//
// Geometric degeneracy is not checked: a collapsed or inverted hexahedron
// yields collapsed or inverted tetrahedra.

use static_assertions::const_assert_eq;

use crate::mesh_error::MeshProbeError;
use crate::topology::cell::Cell;
use crate::topology::cell_type::CellType;

/// Number of tetrahedra produced per hexahedron.
pub const TETS_PER_HEX: usize = 6;

/// Local hexahedron vertex positions forming each output tetrahedron.
pub static HEX_TO_TET: [[usize; 4]; TETS_PER_HEX] = [
    [0, 1, 2, 4],
    [0, 2, 3, 4],
    [1, 2, 4, 5],
    [2, 3, 4, 7],
    [2, 4, 5, 6],
    [2, 4, 6, 7],
];

/// Size of the `CELLS` records emitted for one hexahedron (count prefix + 4 indices, six times).
pub const RECORD_SIZE_PER_HEX: usize = TETS_PER_HEX * (1 + 4);

const_assert_eq!(RECORD_SIZE_PER_HEX, 30);

/// Split one hexahedron given by its 8 ordered global node indices.
///
/// Returns [`MeshProbeError::Shape`] unless exactly 8 indices are supplied.
pub fn decompose_hexahedron(hex: &[usize]) -> Result<[[usize; 4]; TETS_PER_HEX], MeshProbeError> {
    if hex.len() != CellType::Hexahedron.vertex_count() {
        return Err(MeshProbeError::Shape {
            expected: CellType::Hexahedron.vertex_count(),
            found: hex.len(),
        });
    }
    let mut out = [[0usize; 4]; TETS_PER_HEX];
    for (tet, row) in out.iter_mut().zip(HEX_TO_TET.iter()) {
        for (slot, &local) in tet.iter_mut().zip(row.iter()) {
            *slot = hex[local];
        }
    }
    Ok(out)
}

/// Split a hexahedral [`Cell`] into six tetrahedral cells.
pub fn decompose_cell(cell: &Cell) -> Result<Vec<Cell>, MeshProbeError> {
    if cell.cell_type() != CellType::Hexahedron {
        return Err(MeshProbeError::Shape {
            expected: CellType::Hexahedron.vertex_count(),
            found: cell.nodes().len(),
        });
    }
    decompose_hexahedron(cell.nodes())?
        .into_iter()
        .map(Cell::tetrahedron)
        .collect()
}
