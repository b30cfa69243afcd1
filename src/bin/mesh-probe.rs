//! mesh-probe command-line interface.
//!
//! ```text
//! mesh-probe convert scaffold.vtk
//! mesh-probe distance data/scaffold -r 1-4
//! mesh-probe quality data/scaffold ja
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mesh_probe::analysis::{
    BatchFailure, DistanceSummary, MeshRange, MeshSeries, batch_distance,
    batch_quality, distance_summary, quality_report,
};
use mesh_probe::config::{LEGACY_EXTENSION, ProbeConfig};
use mesh_probe::engine::MeshEngine;
use mesh_probe::engine::vtk::VtkMeshEngine;
use mesh_probe::io::vtk::convert_file;
use mesh_probe::mesh_error::MeshProbeError;
use serde::Serialize;

/// Legacy VTK mesh conversion and analysis
#[derive(Parser)]
#[command(name = "mesh-probe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert hexahedral VTK meshes and report mesh statistics", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split every hexahedron of a legacy VTK mesh into six tetrahedra
    Convert(ConvertArgs),
    /// Mean centroid distance between face-adjacent cells
    Distance(SeriesArgs),
    /// Quality statistics of a per-cell metric
    Quality(QualityArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Hexahedral mesh to convert
    mesh: PathBuf,

    /// Marker appended to the output file stem
    #[arg(long)]
    suffix: Option<String>,
}

#[derive(Args)]
struct SeriesArgs {
    /// Mesh path without extension (and without the `_<index>` part for a range)
    base: PathBuf,

    /// Mesh numbers: `5`, `1-3` or `1 3 5`
    #[arg(short, long, num_args = 1..)]
    range: Option<Vec<String>>,

    /// Mesh file extension
    #[arg(long)]
    extension: Option<String>,
}

#[derive(Args)]
struct QualityArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Metric code (`ar`, `ja`) or full metric name
    metric: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .parse_filters(&cli.log_level)
        .format_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => ProbeConfig::from_json_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => ProbeConfig::default(),
    };

    match cli.command {
        Commands::Convert(args) => {
            if let Some(suffix) = args.suffix {
                config.conversion_suffix = suffix;
            }
            convert(&args.mesh, &config, cli.json)
        }
        Commands::Distance(args) => distance(&args, &config, cli.json),
        Commands::Quality(args) => quality(&args, &config, cli.json),
    }
}

fn convert(mesh: &Path, config: &ProbeConfig, json: bool) -> Result<()> {
    let (out, summary) = convert_file(mesh, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{}: {} hexahedra -> {} tetrahedra",
            out.display(),
            summary.source_cells,
            summary.output_cells
        );
    }
    Ok(())
}

/// Series paths and an engine that accepts the same extension.
fn series_of(args: &SeriesArgs, config: &ProbeConfig) -> (MeshSeries, VtkMeshEngine) {
    let extension = args
        .extension
        .as_deref()
        .unwrap_or(if config.extension.is_empty() {
            LEGACY_EXTENSION
        } else {
            config.extension.as_str()
        });
    (
        MeshSeries::new(&args.base, extension),
        VtkMeshEngine::new(extension),
    )
}

fn distance(args: &SeriesArgs, config: &ProbeConfig, json: bool) -> Result<()> {
    let (series, engine) = series_of(args, config);
    let name = series.name();

    let Some(tokens) = &args.range else {
        let mesh = engine.load(&series.single_path())?;
        let summary = distance_summary(&mesh)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{}", distance_line(&name, &summary));
        }
        return Ok(());
    };

    let range = MeshRange::parse(tokens)?;
    let outcome = batch_distance(&engine, &series, &range);
    report_batch(outcome, json, |idx, s| {
        distance_line(&format!("{name}_{idx}"), s)
    })
}

fn quality(args: &QualityArgs, config: &ProbeConfig, json: bool) -> Result<()> {
    let (series, engine) = series_of(&args.series, config);
    let metric = config.resolve_metric(&args.metric)?;
    let name = series.name();

    let Some(tokens) = &args.series.range else {
        let mesh = engine.load(&series.single_path())?;
        let report = quality_report(&mesh, metric)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{report}");
        }
        return Ok(());
    };

    let range = MeshRange::parse(tokens)?;
    let outcome = batch_quality(&engine, &series, &range, metric);
    report_batch(outcome, json, |idx, r| {
        format!(
            "{name}_{idx}: {} {:.2} \u{b1} {:.2}",
            r.metric, r.mean, r.std
        )
    })
}

fn distance_line(name: &str, summary: &DistanceSummary) -> String {
    format!(
        "{name}: mean distance {:.2} \u{b1} {:.2}",
        summary.mean, summary.std
    )
}

/// Print every completed mesh, then surface the failure if the batch stopped.
fn report_batch<T, F>(
    outcome: Result<BTreeMap<u32, T>, BatchFailure<T>>,
    json: bool,
    line: F,
) -> Result<()>
where
    T: Serialize,
    F: Fn(u32, &T) -> String,
{
    let (completed, failure) = match outcome {
        Ok(done) => (done, None),
        Err(mut failure) => (std::mem::take(&mut failure.completed), Some(failure)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&completed)?);
    } else {
        for (idx, value) in &completed {
            println!("{}", line(*idx, value));
        }
    }

    match failure {
        None => Ok(()),
        Some(failure) => Err(MeshProbeError::from(failure).into()),
    }
}
