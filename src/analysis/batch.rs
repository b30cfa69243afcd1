//! Sequential analysis over a numbered series of meshes.
//!
//! Meshes of one series share a base path: index `i` lives at
//! `<base>_<i>.<ext>`. A batch processes the indices in order and stops at
//! the first failure; the summaries computed before the failure are handed
//! back inside [`BatchFailure`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::analysis::distance::{DistanceSummary, distance_summary};
use crate::analysis::quality::{QualityReport, quality_report};
use crate::engine::MeshEngine;
use crate::mesh_error::MeshProbeError;

/// Set of mesh indices to analyse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshRange {
    /// `"5"`
    Single(u32),
    /// `"1-3"`, both ends included.
    Inclusive { start: u32, end: u32 },
    /// `"1" "3" "5"`
    List(Vec<u32>),
}

impl MeshRange {
    /// Parse command-line tokens: one number, one `a-b` range, or several numbers.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, MeshProbeError> {
        match tokens {
            [] => Err(MeshProbeError::InvalidRange("no mesh index given".into())),
            [one] => one.as_ref().parse(),
            many => many
                .iter()
                .map(|t| parse_index(t.as_ref()))
                .collect::<Result<Vec<_>, _>>()
                .map(MeshRange::List),
        }
    }

    /// Indices in processing order, produced lazily.
    pub fn indices(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            MeshRange::Single(i) => Box::new(std::iter::once(*i)),
            MeshRange::Inclusive { start, end } => Box::new(*start..=*end),
            MeshRange::List(list) => Box::new(list.iter().copied()),
        }
    }
}

impl FromStr for MeshRange {
    type Err = MeshProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('-') {
            None => parse_index(s).map(MeshRange::Single),
            Some((a, b)) => {
                let start = parse_index(a)?;
                let end = parse_index(b)?;
                if start > end {
                    return Err(MeshProbeError::InvalidRange(format!(
                        "range `{s}` is reversed"
                    )));
                }
                Ok(MeshRange::Inclusive { start, end })
            }
        }
    }
}

fn parse_index(raw: &str) -> Result<u32, MeshProbeError> {
    raw.trim()
        .parse()
        .map_err(|_| MeshProbeError::InvalidRange(format!("`{raw}` is not a mesh index")))
}

/// Base path and extension shared by a numbered mesh series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshSeries {
    base: PathBuf,
    extension: String,
}

impl MeshSeries {
    pub fn new(base: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            base: base.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Display name of the series (last component of the base path).
    pub fn name(&self) -> String {
        self.base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `<base>.<ext>`
    pub fn single_path(&self) -> PathBuf {
        with_suffix(&self.base, &format!(".{}", self.extension))
    }

    /// `<base>_<index>.<ext>`
    pub fn path_for(&self, index: u32) -> PathBuf {
        with_suffix(&self.base, &format!("_{index}.{}", self.extension))
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// A batch stopped at mesh `index`; `completed` holds earlier results.
#[derive(Debug)]
pub struct BatchFailure<T> {
    pub index: u32,
    pub completed: BTreeMap<u32, T>,
    pub source: MeshProbeError,
}

impl<T> fmt::Display for BatchFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh {} failed: {}", self.index, self.source)
    }
}

impl<T> From<BatchFailure<T>> for MeshProbeError {
    fn from(failure: BatchFailure<T>) -> Self {
        MeshProbeError::Batch {
            index: failure.index,
            source: Box::new(failure.source),
        }
    }
}

/// Load and analyse each mesh of `range` in order, stopping at the first error.
pub fn run_batch<E, T, F>(
    engine: &E,
    series: &MeshSeries,
    range: &MeshRange,
    mut analyse: F,
) -> Result<BTreeMap<u32, T>, BatchFailure<T>>
where
    E: MeshEngine,
    F: FnMut(&E::Mesh) -> Result<T, MeshProbeError>,
{
    let mut completed = BTreeMap::new();
    for index in range.indices() {
        let path = series.path_for(index);
        log::debug!("batch: mesh {index} at {}", path.display());
        let result = engine.load(&path).and_then(|mesh| analyse(&mesh));
        match result {
            Ok(value) => {
                completed.insert(index, value);
            }
            Err(source) => {
                log::error!("batch stopped at mesh {index}: {source}");
                return Err(BatchFailure {
                    index,
                    completed,
                    source,
                });
            }
        }
    }
    Ok(completed)
}

/// Neighbor-distance summary for every mesh of the range.
pub fn batch_distance<E: MeshEngine>(
    engine: &E,
    series: &MeshSeries,
    range: &MeshRange,
) -> Result<BTreeMap<u32, DistanceSummary>, BatchFailure<DistanceSummary>> {
    run_batch(engine, series, range, |mesh| distance_summary(mesh))
}

/// Quality report of `metric` for every mesh of the range.
pub fn batch_quality<E: MeshEngine>(
    engine: &E,
    series: &MeshSeries,
    range: &MeshRange,
    metric: &str,
) -> Result<BTreeMap<u32, QualityReport>, BatchFailure<QualityReport>> {
    run_batch(engine, series, range, |mesh| quality_report(mesh, metric))
}
