//! `Cell`: an ordered list of global node indices tagged with its kind.
//!
//! The order of the node indices fixes the correspondence between the
//! reference element and the physical vertices, so it is stored exactly as
//! given and never normalised.

use crate::mesh_error::MeshProbeError;
use crate::topology::cell_type::CellType;

/// A single volumetric cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    cell_type: CellType,
    nodes: Vec<usize>,
}

impl Cell {
    /// Build a cell, checking arity and node uniqueness.
    pub fn try_new(cell_type: CellType, nodes: Vec<usize>) -> Result<Self, MeshProbeError> {
        let expected = cell_type.vertex_count();
        if nodes.len() != expected {
            return Err(MeshProbeError::Shape {
                expected,
                found: nodes.len(),
            });
        }
        for (i, node) in nodes.iter().enumerate() {
            if nodes[..i].contains(node) {
                return Err(MeshProbeError::DuplicateNode { node: *node });
            }
        }
        Ok(Self { cell_type, nodes })
    }

    /// Hexahedron from eight ordered node indices.
    pub fn hexahedron(nodes: [usize; 8]) -> Result<Self, MeshProbeError> {
        Self::try_new(CellType::Hexahedron, nodes.to_vec())
    }

    /// Tetrahedron from four ordered node indices.
    pub fn tetrahedron(nodes: [usize; 4]) -> Result<Self, MeshProbeError> {
        Self::try_new(CellType::Tetrahedron, nodes.to_vec())
    }

    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    #[inline]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Size of this cell's record in a `CELLS` block (count prefix included).
    #[inline]
    pub fn record_size(&self) -> usize {
        self.nodes.len() + 1
    }
}
