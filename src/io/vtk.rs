//! Legacy VTK (`.vtk`) reader/writer and hexahedron → tetrahedron converter.
//!
//! The converter is a line-at-a-time state machine
//! ([`SectionState::Header`] → [`SectionState::InCells`] →
//! [`SectionState::InCellTypes`] → [`SectionState::Done`]): every line
//! before `CELLS` is copied verbatim, each hexahedron record is rewritten
//! as six tetrahedron records as soon as it is read, and the `CELL_TYPES`
//! block is only read to validate counts. Memory use is bounded by the
//! longest line.
//!
//! [`VtkReader`] and [`VtkWriter`] handle whole ASCII `UNSTRUCTURED_GRID`
//! meshes in memory and back the native analysis engine.

use crate::algs::decompose::{RECORD_SIZE_PER_HEX, TETS_PER_HEX, decompose_cell, decompose_hexahedron};
use crate::config::ProbeConfig;
use crate::io::{LegacyMesh, check_extension, converted_path, require_file};
use crate::mesh_error::MeshProbeError;
use crate::topology::cell::Cell;
use crate::topology::cell_type::{CellType, VTK_HEXAHEDRON, VTK_TETRA};
use itertools::Itertools;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const KW_CELLS: &str = "CELLS";
const KW_CELL_TYPES: &str = "CELL_TYPES";
const SECTION_KEYWORDS: [&str; 6] = [
    KW_CELLS,
    KW_CELL_TYPES,
    "CELL_DATA",
    "POINT_DATA",
    "FIELD",
    "POINTS",
];

/// Position of the converter within the legacy file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionState {
    /// Copying header and `POINTS` lines verbatim.
    Header,
    /// Reading hexahedron records of the `CELLS` block.
    InCells,
    /// Reading type ids of the `CELL_TYPES` block.
    InCellTypes,
    /// Past `CELL_TYPES`; remaining lines are dropped.
    Done,
}

/// Counts describing one completed conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// Hexahedra read from the source.
    pub source_cells: usize,
    /// Tetrahedra written (`6 × source_cells`).
    pub output_cells: usize,
    /// `CELLS` size field written (`30 × source_cells`).
    pub output_size: usize,
    /// Lines copied verbatim before `CELLS`.
    pub header_lines: usize,
    /// Non-blank lines after the `CELL_TYPES` block that were not copied.
    pub dropped_lines: usize,
}

/// Streaming hexahedron → tetrahedron rewriter.
#[derive(Debug)]
pub struct HexToTetStream {
    state: SectionState,
    declared_cells: usize,
    declared_size: usize,
    parsed_cells: usize,
    parsed_size: usize,
    declared_types: usize,
    parsed_types: usize,
    output_cells: usize,
    output_size: usize,
    header_lines: usize,
    dropped_lines: usize,
    line_no: usize,
}

impl Default for HexToTetStream {
    fn default() -> Self {
        Self::new()
    }
}

impl HexToTetStream {
    pub fn new() -> Self {
        Self {
            state: SectionState::Header,
            declared_cells: 0,
            declared_size: 0,
            parsed_cells: 0,
            parsed_size: 0,
            declared_types: 0,
            parsed_types: 0,
            output_cells: 0,
            output_size: 0,
            header_lines: 0,
            dropped_lines: 0,
            line_no: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> SectionState {
        self.state
    }

    /// Consume one raw line (terminator included or not) and emit output.
    pub fn feed<W: Write>(&mut self, raw: &str, out: &mut W) -> Result<(), MeshProbeError> {
        self.line_no += 1;
        let line = raw.trim();
        match self.state {
            SectionState::Header => {
                if first_token(line) == Some(KW_CELLS) {
                    self.begin_cells(line, out)
                } else {
                    out.write_all(raw.as_bytes())?;
                    if !raw.ends_with('\n') {
                        out.write_all(b"\n")?;
                    }
                    self.header_lines += 1;
                    Ok(())
                }
            }
            SectionState::InCells => {
                if line.is_empty() {
                    return Ok(());
                }
                if self.parsed_cells == self.declared_cells {
                    return self.begin_cell_types(line, out);
                }
                if let Some(kw) = first_token(line).filter(|t| is_keyword(t)) {
                    return Err(self.error(format!(
                        "expected {} cells, found {} before `{kw}`",
                        self.declared_cells, self.parsed_cells
                    )));
                }
                self.rewrite_cell(line, out)
            }
            SectionState::InCellTypes => {
                if line.is_empty() {
                    return Ok(());
                }
                let id: i32 = line.parse().map_err(|_| {
                    self.error(format!("invalid cell type id `{line}`"))
                })?;
                if id != VTK_HEXAHEDRON {
                    return Err(self.error(format!(
                        "cell type {id} is not a hexahedron ({VTK_HEXAHEDRON})"
                    )));
                }
                self.parsed_types += 1;
                if self.parsed_types == self.declared_types {
                    self.finish_cell_types(out)?;
                }
                Ok(())
            }
            SectionState::Done => {
                if !line.is_empty() {
                    self.dropped_lines += 1;
                }
                Ok(())
            }
        }
    }

    /// Check that the stream ended in a consistent state.
    pub fn finish(self) -> Result<ConversionSummary, MeshProbeError> {
        match self.state {
            SectionState::Done => {
                if self.dropped_lines > 0 {
                    log::warn!(
                        "dropped {} line(s) following the CELL_TYPES block",
                        self.dropped_lines
                    );
                }
                Ok(ConversionSummary {
                    source_cells: self.declared_cells,
                    output_cells: self.output_cells,
                    output_size: self.output_size,
                    header_lines: self.header_lines,
                    dropped_lines: self.dropped_lines,
                })
            }
            SectionState::Header => Err(MeshProbeError::Format(
                "missing CELLS section".into(),
            )),
            SectionState::InCells if self.parsed_cells < self.declared_cells => {
                Err(MeshProbeError::Format(format!(
                    "unexpected end of stream: expected {} cells, found {}",
                    self.declared_cells, self.parsed_cells
                )))
            }
            SectionState::InCells => Err(MeshProbeError::Format(
                "missing CELL_TYPES section".into(),
            )),
            SectionState::InCellTypes => Err(MeshProbeError::Format(format!(
                "unexpected end of stream: expected {} cell types, found {}",
                self.declared_types, self.parsed_types
            ))),
        }
    }

    fn begin_cells<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), MeshProbeError> {
        let (n, size) = parse_cells_header(line).map_err(|msg| self.error(msg))?;
        log::debug!("CELLS block at line {}: {n} cells, size {size}", self.line_no);
        let (output_cells, output_size) = n
            .checked_mul(TETS_PER_HEX)
            .zip(n.checked_mul(RECORD_SIZE_PER_HEX))
            .ok_or_else(|| self.error(format!("cell count {n} too large")))?;
        self.declared_cells = n;
        self.declared_size = size;
        self.output_cells = output_cells;
        self.output_size = output_size;
        writeln!(out, "{KW_CELLS} {output_cells} {output_size}")?;
        self.state = SectionState::InCells;
        Ok(())
    }

    fn rewrite_cell<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), MeshProbeError> {
        let record = parse_cell_record(line).map_err(|msg| self.error(msg))?;
        if record.len() != CellType::Hexahedron.vertex_count() {
            return Err(self.error(format!(
                "cell declares {} points; only hexahedra (8) can be converted",
                record.len()
            )));
        }
        for tet in decompose_hexahedron(&record)? {
            writeln!(out, "4 {}", tet.iter().join(" "))?;
        }
        self.parsed_cells += 1;
        self.parsed_size += record.len() + 1;
        Ok(())
    }

    fn begin_cell_types<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> Result<(), MeshProbeError> {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(KW_CELL_TYPES) {
            return Err(self.error(format!(
                "expected {KW_CELL_TYPES} after {} cells, found `{line}`",
                self.declared_cells
            )));
        }
        if self.parsed_size != self.declared_size {
            return Err(self.error(format!(
                "CELLS size field is {} but the records hold {} values",
                self.declared_size, self.parsed_size
            )));
        }
        let count: usize = tokens
            .next()
            .ok_or_else(|| self.error("missing cell types count".into()))?
            .parse()
            .map_err(|_| self.error("invalid cell types count".into()))?;
        if count != self.declared_cells {
            return Err(self.error(format!(
                "CELL_TYPES declares {count} entries but CELLS declares {}",
                self.declared_cells
            )));
        }
        self.declared_types = count;
        self.state = SectionState::InCellTypes;
        if count == 0 {
            self.finish_cell_types(out)?;
        }
        Ok(())
    }

    fn finish_cell_types<W: Write>(&mut self, out: &mut W) -> Result<(), MeshProbeError> {
        let n = self.output_cells;
        writeln!(out, "{KW_CELL_TYPES} {n}")?;
        for _ in 0..n {
            writeln!(out, "{VTK_TETRA}")?;
        }
        self.state = SectionState::Done;
        Ok(())
    }

    fn error(&self, msg: String) -> MeshProbeError {
        MeshProbeError::Format(format!("line {}: {msg}", self.line_no))
    }
}

fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

fn is_keyword(token: &str) -> bool {
    SECTION_KEYWORDS.contains(&token)
}

fn parse_cells_header(line: &str) -> Result<(usize, usize), String> {
    let mut tokens = line.split_whitespace().skip(1);
    let n = tokens
        .next()
        .ok_or("missing cell count")?
        .parse::<usize>()
        .map_err(|_| "invalid cell count".to_string())?;
    let size = tokens
        .next()
        .ok_or("missing cell size")?
        .parse::<usize>()
        .map_err(|_| "invalid cell size".to_string())?;
    Ok((n, size))
}

/// `k i0 … i{k-1}` → the `k` indices.
fn parse_cell_record(line: &str) -> Result<Vec<usize>, String> {
    let mut tokens = line.split_whitespace();
    let count: usize = tokens
        .next()
        .ok_or("missing point count")?
        .parse()
        .map_err(|_| format!("invalid point count in `{line}`"))?;
    let indices = tokens
        .map(|t| {
            t.parse::<usize>()
                .map_err(|_| format!("invalid node index `{t}`"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if indices.len() != count {
        return Err(format!(
            "cell declares {count} points but lists {}",
            indices.len()
        ));
    }
    Ok(indices)
}

/// Rewrite a hexahedral legacy mesh read from `reader` into `writer`.
///
/// The writer receives bytes as the input is consumed; on error its content
/// is incomplete and must be discarded by the caller.
pub fn convert_stream<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
) -> Result<ConversionSummary, MeshProbeError> {
    let mut machine = HexToTetStream::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        machine.feed(&line, &mut writer)?;
    }
    writer.flush()?;
    machine.finish()
}

/// Convert the mesh at `source` and return the path of the new file.
///
/// The output goes to a temporary file next to the target and is only
/// renamed into place once the whole stream converted cleanly.
pub fn convert_file(
    source: &Path,
    config: &ProbeConfig,
) -> Result<(PathBuf, ConversionSummary), MeshProbeError> {
    check_extension(source, &config.extension)?;
    require_file(source)?;
    let target = converted_path(source, &config.conversion_suffix)?;
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let reader = BufReader::new(File::open(source)?);
    let tmp = NamedTempFile::new_in(&dir)?;
    let mut writer = BufWriter::new(tmp);
    let summary = convert_stream(reader, &mut writer)?;
    let tmp = writer
        .into_inner()
        .map_err(|e| MeshProbeError::Io(e.error().to_string()))?;
    tmp.persist(&target)?;

    log::info!(
        "converted {} → {} ({} hexahedra → {} tetrahedra)",
        source.display(),
        target.display(),
        summary.source_cells,
        summary.output_cells
    );
    Ok((target, summary))
}

/// Decompose every hexahedron of an in-memory mesh; points are shared.
pub fn convert_mesh(mesh: &LegacyMesh) -> Result<LegacyMesh, MeshProbeError> {
    let mut cells = Vec::with_capacity(TETS_PER_HEX * mesh.cells.len());
    for cell in &mesh.cells {
        cells.extend(decompose_cell(cell)?);
    }
    Ok(LegacyMesh {
        points: mesh.points.clone(),
        cells,
    })
}

/// Whole-mesh ASCII legacy VTK reader.
#[derive(Debug, Default, Clone)]
pub struct VtkReader;

/// Whole-mesh ASCII legacy VTK writer.
#[derive(Debug, Default, Clone)]
pub struct VtkWriter;

impl VtkReader {
    /// Read and parse a `.vtk` file.
    pub fn read_path(&self, path: &Path) -> Result<LegacyMesh, MeshProbeError> {
        self.read_file(path, crate::config::LEGACY_EXTENSION)
    }

    /// Read and parse a legacy mesh stored under the `extension` suffix.
    pub fn read_file(&self, path: &Path, extension: &str) -> Result<LegacyMesh, MeshProbeError> {
        check_extension(path, extension)?;
        require_file(path)?;
        self.read(BufReader::new(File::open(path)?))
    }

    /// Parse `POINTS`, `CELLS` and `CELL_TYPES`; trailing data sections are ignored.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<LegacyMesh, MeshProbeError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let mut lines = input.lines();
        let _version = lines.next();
        let _title = lines.next();
        let format = lines
            .next()
            .ok_or_else(|| MeshProbeError::Format("missing ASCII line".into()))?;
        if format.trim() != "ASCII" {
            return Err(MeshProbeError::Format("VTK ASCII format required".into()));
        }
        let dataset = lines
            .next()
            .ok_or_else(|| MeshProbeError::Format("missing DATASET line".into()))?;
        if !dataset.trim().ends_with("UNSTRUCTURED_GRID") {
            return Err(MeshProbeError::Format(
                "VTK UNSTRUCTURED_GRID required".into(),
            ));
        }

        let mut tokens = lines.flat_map(str::split_whitespace);
        expect_keyword(&mut tokens, "POINTS")?;
        let num_points: usize = next_parsed(&mut tokens, "point count")?;
        let _point_type = next_token(&mut tokens, "point type")?;
        // Declared counts are untrusted; never reserve beyond what the input can hold.
        let mut points = Vec::with_capacity(num_points.min(input.len() / 6));
        for _ in 0..num_points {
            let mut xyz = [0.0f64; 3];
            for v in &mut xyz {
                *v = next_parsed(&mut tokens, "point value")?;
            }
            points.push(xyz);
        }

        expect_keyword(&mut tokens, KW_CELLS)?;
        let num_cells: usize = next_parsed(&mut tokens, "cell count")?;
        let total_size: usize = next_parsed(&mut tokens, "cell size")?;
        let mut connectivity = Vec::with_capacity(num_cells.min(input.len() / 2));
        let mut seen_size = 0usize;
        for _ in 0..num_cells {
            let count: usize = next_parsed(&mut tokens, "cell point count")?;
            let mut conn = Vec::with_capacity(count.min(CellType::Hexahedron.vertex_count()));
            for _ in 0..count {
                let idx: usize = next_parsed(&mut tokens, "cell index")?;
                if idx >= num_points {
                    return Err(MeshProbeError::Format(format!(
                        "node index {idx} out of range for {num_points} points"
                    )));
                }
                conn.push(idx);
            }
            seen_size += count + 1;
            connectivity.push(conn);
        }
        if seen_size != total_size {
            return Err(MeshProbeError::Format(format!(
                "CELLS size field is {total_size} but the records hold {seen_size} values"
            )));
        }

        expect_keyword(&mut tokens, KW_CELL_TYPES)?;
        let type_count: usize = next_parsed(&mut tokens, "cell types count")?;
        if type_count != num_cells {
            return Err(MeshProbeError::Format(format!(
                "CELL_TYPES declares {type_count} entries but CELLS declares {num_cells}"
            )));
        }
        let mut cells = Vec::with_capacity(connectivity.len());
        for conn in connectivity {
            let id: i32 = next_parsed(&mut tokens, "cell type")?;
            cells.push(Cell::try_new(CellType::from_vtk_id(id)?, conn)?);
        }
        Ok(LegacyMesh { points, cells })
    }
}

impl VtkWriter {
    /// Serialise `mesh` as an ASCII legacy unstructured grid.
    pub fn write<W: Write>(&self, mut writer: W, mesh: &LegacyMesh) -> Result<(), MeshProbeError> {
        writeln!(writer, "# vtk DataFile Version 3.0")?;
        writeln!(writer, "mesh-probe")?;
        writeln!(writer, "ASCII")?;
        writeln!(writer, "DATASET UNSTRUCTURED_GRID")?;
        writeln!(writer, "POINTS {} double", mesh.points.len())?;
        for [x, y, z] in &mesh.points {
            writeln!(writer, "{x} {y} {z}")?;
        }
        writeln!(
            writer,
            "{KW_CELLS} {} {}",
            mesh.cells.len(),
            mesh.connectivity_size()
        )?;
        for cell in &mesh.cells {
            writeln!(
                writer,
                "{} {}",
                cell.nodes().len(),
                cell.nodes().iter().join(" ")
            )?;
        }
        writeln!(writer, "{KW_CELL_TYPES} {}", mesh.cells.len())?;
        for cell in &mesh.cells {
            writeln!(writer, "{}", cell.cell_type().vtk_id())?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn next_token<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<&'a str, MeshProbeError> {
    tokens
        .next()
        .ok_or_else(|| MeshProbeError::Format(format!("missing {what}")))
}

fn next_parsed<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<T, MeshProbeError> {
    let raw = next_token(tokens, what)?;
    raw.parse::<T>()
        .map_err(|_| MeshProbeError::Format(format!("invalid {what} `{raw}`")))
}

fn expect_keyword<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    keyword: &str,
) -> Result<(), MeshProbeError> {
    match tokens.next() {
        Some(t) if t == keyword => Ok(()),
        Some(t) => Err(MeshProbeError::Format(format!(
            "expected {keyword} section, found `{t}`"
        ))),
        None => Err(MeshProbeError::Format(format!("missing {keyword}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_HEX: &str = "# vtk DataFile Version 3.0\n\
uterus\n\
ASCII\n\
DATASET UNSTRUCTURED_GRID\n\
POINTS 8 float\n\
0 0 0\n1 0 0\n1 1 0\n0 1 0\n0 0 1\n1 0 1\n1 1 1\n0 1 1\n\
CELLS 1 9\n\
8 0 1 2 3 4 5 6 7\n\
CELL_TYPES 1\n\
12\n";

    fn run(input: &str) -> Result<(String, ConversionSummary), MeshProbeError> {
        let mut out = Vec::new();
        let summary = convert_stream(input.as_bytes(), &mut out)?;
        Ok((String::from_utf8(out).unwrap(), summary))
    }

    #[test]
    fn single_hex_is_rewritten() {
        let (out, summary) = run(ONE_HEX).unwrap();
        let expected_tail = "CELLS 6 30\n\
4 0 1 2 4\n4 0 2 3 4\n4 1 2 4 5\n4 2 3 4 7\n4 2 4 5 6\n4 2 4 6 7\n\
CELL_TYPES 6\n10\n10\n10\n10\n10\n10\n";
        assert!(out.starts_with("# vtk DataFile Version 3.0\nuterus\nASCII\n"));
        assert!(out.ends_with(expected_tail), "got:\n{out}");
        assert_eq!(summary.source_cells, 1);
        assert_eq!(summary.output_cells, 6);
        assert_eq!(summary.output_size, 30);
        assert_eq!(summary.header_lines, 13);
    }

    #[test]
    fn state_machine_walks_all_sections() {
        let mut machine = HexToTetStream::new();
        let mut sink = Vec::new();
        assert_eq!(machine.state(), SectionState::Header);
        machine.feed("POINTS 0 float\n", &mut sink).unwrap();
        assert_eq!(machine.state(), SectionState::Header);
        machine.feed("CELLS 1 9\n", &mut sink).unwrap();
        assert_eq!(machine.state(), SectionState::InCells);
        machine.feed("8 0 1 2 3 4 5 6 7\n", &mut sink).unwrap();
        assert_eq!(machine.state(), SectionState::InCells);
        machine.feed("CELL_TYPES 1\n", &mut sink).unwrap();
        assert_eq!(machine.state(), SectionState::InCellTypes);
        machine.feed("12\n", &mut sink).unwrap();
        assert_eq!(machine.state(), SectionState::Done);
        machine.feed("CELL_DATA 1\n", &mut sink).unwrap();
        let summary = machine.finish().unwrap();
        assert_eq!(summary.dropped_lines, 1);
    }

    #[test]
    fn header_lines_pass_through_byte_for_byte() {
        let input = "# vtk DataFile Version 2.0\r\n  odd   spacing \r\nCELLS 0 0\nCELL_TYPES 0\n";
        let (out, summary) = run(input).unwrap();
        assert!(out.starts_with("# vtk DataFile Version 2.0\r\n  odd   spacing \r\n"));
        assert!(out.ends_with("CELLS 0 0\nCELL_TYPES 0\n"));
        assert_eq!(summary.output_cells, 0);
    }

    #[test]
    fn missing_cells_section() {
        let err = run("# vtk\nPOINTS 0 float\n").unwrap_err();
        assert_eq!(err, MeshProbeError::Format("missing CELLS section".into()));
    }

    #[test]
    fn non_hexahedral_record_rejected() {
        let input = ONE_HEX.replace("8 0 1 2 3 4 5 6 7", "4 0 1 2 3");
        let err = run(&input).unwrap_err();
        assert!(
            matches!(&err, MeshProbeError::Format(m) if m.contains("only hexahedra")),
            "{err:?}"
        );
    }

    #[test]
    fn unparsable_counts_rejected() {
        for header in ["CELLS one 9", "CELLS 1 nine", "CELLS 1"] {
            let input = ONE_HEX.replace("CELLS 1 9", header);
            assert!(matches!(run(&input), Err(MeshProbeError::Format(_))), "{header}");
        }
    }

    #[test]
    fn cell_types_count_mismatch() {
        let input = ONE_HEX.replace("CELL_TYPES 1", "CELL_TYPES 2");
        let err = run(&input).unwrap_err();
        assert!(matches!(&err, MeshProbeError::Format(m) if m.contains("CELL_TYPES declares 2")));
    }

    #[test]
    fn size_field_mismatch() {
        let input = ONE_HEX.replace("CELLS 1 9", "CELLS 1 8");
        assert!(matches!(run(&input), Err(MeshProbeError::Format(_))));
    }

    #[test]
    fn too_few_cell_records() {
        let input = ONE_HEX.replace("CELLS 1 9", "CELLS 2 18");
        let err = run(&input).unwrap_err();
        assert!(matches!(&err, MeshProbeError::Format(m) if m.contains("expected 2 cells, found 1")));
    }

    #[test]
    fn truncated_cell_types() {
        let input = ONE_HEX.trim_end_matches("12\n");
        let err = run(input).unwrap_err();
        assert!(matches!(&err, MeshProbeError::Format(m) if m.contains("cell types")));
    }

    #[test]
    fn overflowing_cell_count_is_a_format_error() {
        let err = run("# vtk\nCELLS 18446744073709551615 0\n").unwrap_err();
        assert!(
            matches!(&err, MeshProbeError::Format(m) if m.starts_with("line 2:") && m.contains("too large")),
            "{err:?}"
        );
    }

    #[test]
    fn non_hexahedral_type_id_rejected() {
        let input = ONE_HEX.replace("CELL_TYPES 1\n12\n", "CELL_TYPES 1\n10\n");
        let err = run(&input).unwrap_err();
        assert!(
            matches!(&err, MeshProbeError::Format(m) if m.contains("cell type 10 is not a hexahedron")),
            "{err:?}"
        );
    }

    #[test]
    fn unparsable_type_id_rejected() {
        let input = ONE_HEX.replace("CELL_TYPES 1\n12\n", "CELL_TYPES 1\nx\n");
        let err = run(&input).unwrap_err();
        assert!(
            matches!(&err, MeshProbeError::Format(m) if m.contains("invalid cell type id `x`")),
            "{err:?}"
        );
    }

    #[test]
    fn reader_survives_absurd_declared_counts() {
        for points in ["POINTS 18446744073709551615 float", "POINTS 100000000000 float"] {
            let input = ONE_HEX.replace("POINTS 8 float", points);
            let err = VtkReader.read(input.as_bytes()).unwrap_err();
            assert!(matches!(err, MeshProbeError::Format(_)), "{points}: {err:?}");
        }
        let input = ONE_HEX.replace("CELLS 1 9", "CELLS 18446744073709551615 9");
        let err = VtkReader.read(input.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshProbeError::Format(_)), "{err:?}");
    }

    #[test]
    fn writer_output_reads_back_unchanged() {
        let hex = VtkReader.read(ONE_HEX.as_bytes()).unwrap();
        let mut mesh = convert_mesh(&hex).unwrap();
        mesh.cells.extend(hex.cells.iter().cloned());
        mesh.points[6] = [1.5, 1.25, 0.75];

        let mut buf = Vec::new();
        VtkWriter.write(&mut buf, &mesh).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("CELLS 7 39\n"));
        assert!(text.contains("CELL_TYPES 7\n"));

        let back = VtkReader.read(text.as_bytes()).unwrap();
        assert_eq!(back, mesh);
    }

    #[test]
    fn reader_loads_points_and_cells() {
        let mesh = VtkReader.read(ONE_HEX.as_bytes()).unwrap();
        assert_eq!(mesh.points.len(), 8);
        assert_eq!(mesh.points[6], [1.0, 1.0, 1.0]);
        assert_eq!(mesh.cells.len(), 1);
        assert_eq!(mesh.cells[0].cell_type(), CellType::Hexahedron);
        assert_eq!(mesh.connectivity_size(), 9);
    }

    #[test]
    fn reader_rejects_dangling_node_index() {
        let input = ONE_HEX.replace("8 0 1 2 3 4 5 6 7", "8 0 1 2 3 4 5 6 8");
        assert!(matches!(
            VtkReader.read(input.as_bytes()),
            Err(MeshProbeError::Format(_))
        ));
    }

    #[test]
    fn streamed_and_in_memory_conversion_agree() {
        let (streamed, _) = run(ONE_HEX).unwrap();
        let converted = convert_mesh(&VtkReader.read(ONE_HEX.as_bytes()).unwrap()).unwrap();
        let reparsed = VtkReader.read(streamed.as_bytes()).unwrap();
        assert_eq!(reparsed.cells, converted.cells);
        assert_eq!(reparsed.points, converted.points);
    }
}
