//! Build face-adjacency graphs for volumetric meshes.
//!
//! Two entry points:
//! - [`cell_face_adjacency`] derives cell-to-cell adjacency from explicit
//!   connectivity: two cells are neighbors when they share a face with the
//!   same node set.
//! - [`face_neighbor_set`] / [`build_face_adjacency`] clean the neighbor
//!   lists reported by a [`EngineMesh`] (duplicates, self references and
//!   out-of-range ids are removed).
//!
//! Determinism:
//! - Neighbor lists are always sorted and deduplicated.

use std::collections::BTreeSet;

use hashbrown::HashMap;

use crate::engine::EngineMesh;
use crate::mesh_error::MeshProbeError;
use crate::topology::cell::Cell;

/// CSR-style adjacency graph over cell ids `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    /// CSR offsets into `adjncy` for each cell.
    pub xadj: Vec<usize>,
    /// Concatenated, sorted neighbor lists.
    pub adjncy: Vec<usize>,
}

impl AdjacencyGraph {
    /// Return the neighbor slice for cell `i`.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }

    /// Number of cells in the graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.xadj.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when every edge `i → j` has a matching `j → i`.
    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|i| {
            self.neighbors(i)
                .iter()
                .all(|&j| self.neighbors(j).binary_search(&i).is_ok())
        })
    }

    fn from_lists(lists: Vec<Vec<usize>>) -> Self {
        let total: usize = lists.iter().map(Vec::len).sum();
        let mut xadj = Vec::with_capacity(lists.len() + 1);
        let mut adjncy = Vec::with_capacity(total);
        xadj.push(0);
        for list in &lists {
            adjncy.extend(list.iter().copied());
            xadj.push(adjncy.len());
        }
        Self { xadj, adjncy }
    }
}

/// Face adjacency from explicit cell connectivity.
///
/// Faces are matched by their node set, so a triangle never matches a quad
/// and a non-conforming interface produces no edge.
pub fn cell_face_adjacency(cells: &[Cell]) -> AdjacencyGraph {
    let n = cells.len();
    let mut incident: HashMap<Vec<usize>, Vec<usize>> = HashMap::with_capacity(n * 4);
    for (i, cell) in cells.iter().enumerate() {
        for face in cell.cell_type().faces() {
            let mut key: Vec<usize> = face.iter().map(|&l| cell.nodes()[l]).collect();
            key.sort_unstable();
            incident.entry(key).or_default().push(i);
        }
    }

    let mut neigh: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (_face, mut owners) in incident {
        if owners.len() < 2 {
            continue;
        }
        owners.sort_unstable();
        owners.dedup();
        if owners.len() > 2 {
            log::warn!("non-manifold face shared by {} cells", owners.len());
        }
        for a in 0..owners.len() {
            for &b in &owners[(a + 1)..] {
                neigh[owners[a]].push(b);
                neigh[b].push(owners[a]);
            }
        }
    }
    for list in &mut neigh {
        list.sort_unstable();
        list.dedup();
    }
    AdjacencyGraph::from_lists(neigh)
}

/// Clean face-neighbor set of `cell` as reported by the engine.
///
/// Idempotent: the result never contains `cell`, duplicates, or ids outside
/// `0..mesh.n_cells()`.
pub fn face_neighbor_set<M>(mesh: &M, cell: usize) -> Result<BTreeSet<usize>, MeshProbeError>
where
    M: EngineMesh + ?Sized,
{
    let n_cells = mesh.n_cells();
    crate::engine::check_cell(cell, n_cells)?;
    let raw = mesh.face_neighbors(cell)?;
    let mut out = BTreeSet::new();
    for other in raw {
        if other == cell {
            continue;
        }
        if other >= n_cells {
            log::debug!("cell {cell}: ignoring neighbor id {other} outside the mesh");
            continue;
        }
        out.insert(other);
    }
    Ok(out)
}

/// Face-adjacency graph over every cell of an engine mesh.
pub fn build_face_adjacency<M>(mesh: &M) -> Result<AdjacencyGraph, MeshProbeError>
where
    M: EngineMesh + ?Sized,
{
    let lists = (0..mesh.n_cells())
        .map(|c| face_neighbor_set(mesh, c).map(|s| s.into_iter().collect()))
        .collect::<Result<Vec<Vec<usize>>, _>>()?;
    Ok(AdjacencyGraph::from_lists(lists))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::decompose::decompose_cell;
    use crate::engine::memory::InMemoryMesh;

    fn two_hexes() -> Vec<Cell> {
        // 3 x 2 x 2 node lattice, node id = x + 3 (y + 2 z)
        let id = |x: usize, y: usize, z: usize| x + 3 * (y + 2 * z);
        let hex = |x: usize| {
            Cell::hexahedron([
                id(x, 0, 0),
                id(x + 1, 0, 0),
                id(x + 1, 1, 0),
                id(x, 1, 0),
                id(x, 0, 1),
                id(x + 1, 0, 1),
                id(x + 1, 1, 1),
                id(x, 1, 1),
            ])
            .unwrap()
        };
        vec![hex(0), hex(1)]
    }

    #[test]
    fn hexes_sharing_a_face_are_neighbors() {
        let g = cell_face_adjacency(&two_hexes());
        assert_eq!(g.xadj, vec![0, 1, 2]);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0]);
        assert!(g.is_symmetric());
    }

    #[test]
    fn decomposed_hex_is_internally_connected() {
        let hex = &two_hexes()[0];
        let tets = decompose_cell(hex).unwrap();
        let g = cell_face_adjacency(&tets);
        assert_eq!(g.len(), 6);
        assert!(g.is_symmetric());
        // every tet touches at least one sibling through an interior face
        assert!((0..6).all(|i| !g.neighbors(i).is_empty()));
        // the six tets share 6 interior faces in total
        assert_eq!(g.adjncy.len(), 12);
    }

    #[test]
    fn engine_lists_are_cleaned_into_csr() {
        let mesh = InMemoryMesh::new(
            "tetrahedron",
            vec![[0.0; 3]; 3],
            vec![vec![2, 1, 1, 0, 9], vec![0, 1], vec![0, 0, 42]],
        );
        let g = build_face_adjacency(&mesh).unwrap();
        assert_eq!(g.xadj, vec![0, 2, 3, 4]);
        assert_eq!(g.neighbors(0), &[1, 2]);
        assert_eq!(g.neighbors(1), &[0]);
        assert_eq!(g.neighbors(2), &[0]);
        assert!(g.is_symmetric());
        assert_eq!(
            face_neighbor_set(&mesh, 3).unwrap_err(),
            MeshProbeError::CellOutOfRange { cell: 3, n_cells: 3 }
        );
    }

    #[test]
    fn empty_mesh_graph() {
        let g = cell_face_adjacency(&[]);
        assert!(g.is_empty());
        assert_eq!(g.xadj, vec![0]);
    }
}
