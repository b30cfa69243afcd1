//! Per-cell quality measures for linear tetrahedra and hexahedra.
//!
//! # Vertex ordering
//! - **Tetrahedron**: `[v0, v1, v2, v3]`.
//! - **Hexahedron**: `[v0, v1, v2, v3, v4, v5, v6, v7]` with bottom face
//!   `[0, 1, 2, 3]` and top face `[4, 5, 6, 7]` (VTK ordering).
//!
//! # Measures
//! | name           | tetrahedron | hexahedron |
//! |----------------|-------------|------------|
//! | `Aspect Ratio` | yes         | no         |
//! | `Jacobian`     | yes         | yes        |
//! | `Edge Ratio`   | yes         | yes        |
//! | `Volume`       | yes         | yes        |
//!
//! The tetrahedral aspect ratio is `h_max / (2√6 · r_in)`, which equals 1
//! for the regular tetrahedron and grows without bound as the cell
//! flattens; degenerate cells report `f64::MAX`.

use crate::mesh_error::MeshProbeError;
use crate::topology::cell_type::CellType;
use std::fmt;
use std::str::FromStr;

const EPS: f64 = 1e-12;

/// Named per-cell quality measure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QualityMeasure {
    AspectRatio,
    Jacobian,
    EdgeRatio,
    Volume,
}

impl QualityMeasure {
    pub const ALL: [QualityMeasure; 4] = [
        QualityMeasure::AspectRatio,
        QualityMeasure::Jacobian,
        QualityMeasure::EdgeRatio,
        QualityMeasure::Volume,
    ];

    /// Display name, also used as the metric identifier.
    pub fn name(self) -> &'static str {
        match self {
            QualityMeasure::AspectRatio => "Aspect Ratio",
            QualityMeasure::Jacobian => "Jacobian",
            QualityMeasure::EdgeRatio => "Edge Ratio",
            QualityMeasure::Volume => "Volume",
        }
    }

    /// Whether this measure is defined for `cell_type`.
    pub fn supports(self, cell_type: CellType) -> bool {
        !matches!(
            (self, cell_type),
            (QualityMeasure::AspectRatio, CellType::Hexahedron)
        )
    }
}

impl fmt::Display for QualityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QualityMeasure {
    type Err = MeshProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QualityMeasure::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MeshProbeError::MetricNotFound {
                metric: s.to_string(),
                cell_type: "any".to_string(),
            })
    }
}

/// Evaluate `measure` on one cell given its vertex coordinates.
pub fn cell_measure(
    measure: QualityMeasure,
    cell_type: CellType,
    vertices: &[[f64; 3]],
) -> Result<f64, MeshProbeError> {
    if vertices.len() != cell_type.vertex_count() {
        return Err(MeshProbeError::Shape {
            expected: cell_type.vertex_count(),
            found: vertices.len(),
        });
    }
    if !measure.supports(cell_type) {
        return Err(MeshProbeError::MetricNotFound {
            metric: measure.name().to_string(),
            cell_type: cell_type.to_string(),
        });
    }
    Ok(match (measure, cell_type) {
        (QualityMeasure::AspectRatio, _) => tet_aspect_ratio(vertices),
        (QualityMeasure::Jacobian, CellType::Tetrahedron) => tet_jacobian(vertices),
        (QualityMeasure::Jacobian, CellType::Hexahedron) => hex_jacobian(vertices),
        (QualityMeasure::EdgeRatio, _) => edge_ratio(cell_type, vertices),
        (QualityMeasure::Volume, CellType::Tetrahedron) => {
            signed_volume(vertices[0], vertices[1], vertices[2], vertices[3])
        }
        (QualityMeasure::Volume, CellType::Hexahedron) => hex_signed_volume(vertices),
    })
}

/// Arithmetic mean of the vertices.
pub fn centroid(vertices: &[[f64; 3]]) -> [f64; 3] {
    if vertices.is_empty() {
        return [f64::NAN; 3];
    }
    let mut c = [0.0f64; 3];
    for v in vertices {
        for k in 0..3 {
            c[k] += v[k];
        }
    }
    let n = vertices.len() as f64;
    [c[0] / n, c[1] / n, c[2] / n]
}

/// Euclidean distance between two points.
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    norm(sub(a, b))
}

fn tet_aspect_ratio(v: &[[f64; 3]]) -> f64 {
    let volume = signed_volume(v[0], v[1], v[2], v[3]).abs();
    let h_max = TET_EDGES
        .iter()
        .map(|&(a, b)| norm(sub(v[a], v[b])))
        .fold(0.0f64, f64::max);
    let area: f64 = TET_FACES
        .iter()
        .map(|f| 0.5 * norm(cross(sub(v[f[1]], v[f[0]]), sub(v[f[2]], v[f[0]]))))
        .sum();
    if volume <= EPS {
        return f64::MAX;
    }
    // r_in = 3V / A, so h_max / (2√6 r_in) = h_max A / (6√6 V)
    h_max * area / (6.0 * 6.0f64.sqrt() * volume)
}

fn tet_jacobian(v: &[[f64; 3]]) -> f64 {
    det3(sub(v[1], v[0]), sub(v[2], v[0]), sub(v[3], v[0]))
}

fn hex_jacobian(v: &[[f64; 3]]) -> f64 {
    let mut min_det = f64::INFINITY;
    for (corner, [a, b, c]) in HEX_CORNER_EDGES.iter().enumerate() {
        let d = det3(
            sub(v[*a], v[corner]),
            sub(v[*b], v[corner]),
            sub(v[*c], v[corner]),
        );
        min_det = min_det.min(d);
    }
    // principal axes through the cell centre
    let axis = |plus: [usize; 4], minus: [usize; 4]| {
        let mut out = [0.0f64; 3];
        for k in 0..3 {
            let p: f64 = plus.iter().map(|&i| v[i][k]).sum();
            let m: f64 = minus.iter().map(|&i| v[i][k]).sum();
            out[k] = (p - m) / 4.0;
        }
        out
    };
    let x1 = axis([1, 2, 5, 6], [0, 3, 4, 7]);
    let x2 = axis([2, 3, 6, 7], [0, 1, 4, 5]);
    let x3 = axis([4, 5, 6, 7], [0, 1, 2, 3]);
    min_det.min(det3(x1, x2, x3))
}

fn edge_ratio(cell_type: CellType, v: &[[f64; 3]]) -> f64 {
    let edges: &[(usize, usize)] = match cell_type {
        CellType::Tetrahedron => &TET_EDGES,
        CellType::Hexahedron => &HEX_EDGES,
    };
    let mut min_len = f64::INFINITY;
    let mut max_len = 0.0f64;
    for &(a, b) in edges {
        let len = norm(sub(v[a], v[b]));
        min_len = min_len.min(len);
        max_len = max_len.max(len);
    }
    if min_len <= EPS {
        return f64::MAX;
    }
    max_len / min_len
}

fn signed_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    det3(sub(b, a), sub(c, a), sub(d, a)) / 6.0
}

fn hex_signed_volume(v: &[[f64; 3]]) -> f64 {
    signed_volume(v[0], v[1], v[3], v[4])
        + signed_volume(v[1], v[2], v[3], v[6])
        + signed_volume(v[1], v[3], v[4], v[6])
        + signed_volume(v[1], v[4], v[5], v[6])
        + signed_volume(v[3], v[4], v[6], v[7])
}

fn det3(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    dot(a, cross(b, c))
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

const TET_EDGES: [(usize, usize); 6] = [(0, 1), (1, 2), (2, 0), (0, 3), (1, 3), (2, 3)];
const TET_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [1, 2, 3], [0, 2, 3]];
const HEX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];
// Right-handed edge triples leaving each hexahedron corner.
const HEX_CORNER_EDGES: [[usize; 3]; 8] = [
    [1, 3, 4],
    [2, 0, 5],
    [3, 1, 6],
    [0, 2, 7],
    [7, 5, 0],
    [4, 6, 1],
    [5, 7, 2],
    [6, 4, 3],
];
