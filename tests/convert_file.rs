use mesh_probe::config::ProbeConfig;
use mesh_probe::io::vtk::{VtkReader, convert_file};
use mesh_probe::mesh_error::MeshProbeError;
use mesh_probe::topology::cell_type::CellType;
use std::fs;
use std::path::Path;

// Two unit hexahedra side by side along x; node id = x + 3y + 6z.
const TWO_HEX: &str = "# vtk DataFile Version 3.0
scaffold
ASCII
DATASET UNSTRUCTURED_GRID
POINTS 12 float
0 0 0 1 0 0 2 0 0
0 1 0 1 1 0 2 1 0
0 0 1 1 0 1 2 0 1
0 1 1 1 1 1 2 1 1
CELLS 2 18
8 0 1 4 3 6 7 10 9
8 1 2 5 4 7 8 11 10
CELL_TYPES 2
12
12
CELL_DATA 2
SCALARS region int 1
LOOKUP_TABLE default
1
2
";

fn write_fixture(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn converted_file_lands_next_to_source() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_fixture(dir.path(), "scaffold.vtk", TWO_HEX);

    let (out, summary) = convert_file(&src, &ProbeConfig::default()).unwrap();

    assert_eq!(out, dir.path().join("scaffold_tet.vtk"));
    assert_eq!(summary.source_cells, 2);
    assert_eq!(summary.output_cells, 12);
    assert_eq!(summary.output_size, 60);
    assert_eq!(summary.dropped_lines, 5);

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("CELLS 12 60\n"));
    assert!(text.contains("CELL_TYPES 12\n"));
    assert!(!text.contains("CELL_DATA"));
    assert_eq!(fs::read_to_string(&src).unwrap(), TWO_HEX);
}

#[test]
fn converted_file_reads_back_as_tetrahedra() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_fixture(dir.path(), "scaffold.vtk", TWO_HEX);
    let (out, _) = convert_file(&src, &ProbeConfig::default()).unwrap();

    let mesh = VtkReader.read_path(&out).unwrap();
    assert_eq!(mesh.points.len(), 12);
    assert_eq!(mesh.cells.len(), 12);
    assert!(
        mesh.cells
            .iter()
            .all(|c| c.cell_type() == CellType::Tetrahedron)
    );
    // second hexahedron's first tetrahedron is (1, 2, 5, 7)
    assert_eq!(mesh.cells[6].nodes(), &[1, 2, 5, 7]);
}

#[test]
fn custom_suffix_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_fixture(dir.path(), "scaffold.vtk", TWO_HEX);
    let cfg = ProbeConfig {
        conversion_suffix: "_tetra".into(),
        ..ProbeConfig::default()
    };
    let (out, _) = convert_file(&src, &cfg).unwrap();
    assert_eq!(out.file_name().unwrap(), "scaffold_tetra.vtk");
}

#[test]
fn wrong_extension_is_rejected_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("scaffold.obj");
    let err = convert_file(&src, &ProbeConfig::default()).unwrap_err();
    assert_eq!(
        err,
        MeshProbeError::Extension {
            path: src,
            expected: "vtk".into(),
            found: "obj".into(),
        }
    );
}

#[test]
fn missing_source_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("absent.vtk");
    let err = convert_file(&src, &ProbeConfig::default()).unwrap_err();
    assert_eq!(err, MeshProbeError::NotFound { path: src });
    assert!(!dir.path().join("absent_tet.vtk").exists());
}

#[test]
fn failed_conversion_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let truncated = TWO_HEX.replace("8 1 2 5 4 7 8 11 10\n", "");
    let src = write_fixture(dir.path(), "broken.vtk", &truncated);

    let err = convert_file(&src, &ProbeConfig::default()).unwrap_err();
    assert!(matches!(err, MeshProbeError::Format(_)), "{err:?}");

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("broken.vtk")]);
}

#[test]
fn mixed_cell_mesh_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mixed = TWO_HEX
        .replace("CELLS 2 18", "CELLS 2 14")
        .replace("8 1 2 5 4 7 8 11 10", "4 1 2 4 7")
        .replace("12\n12\nCELL_DATA", "12\n10\nCELL_DATA");
    let src = write_fixture(dir.path(), "mixed.vtk", &mixed);
    let err = convert_file(&src, &ProbeConfig::default()).unwrap_err();
    assert!(
        matches!(&err, MeshProbeError::Format(m) if m.contains("only hexahedra")),
        "{err:?}"
    );
    assert!(!dir.path().join("mixed_tet.vtk").exists());
}
