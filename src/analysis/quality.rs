//! Aggregate statistics of a per-cell quality array.

use crate::engine::EngineMesh;
use crate::mesh_error::MeshProbeError;
use serde::Serialize;
use std::fmt;

/// Summary of one quality array.
///
/// Percentiles use linear interpolation between closest ranks:
/// `rank = p / 100 · (n − 1)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityReport {
    pub metric: String,
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
}

impl QualityReport {
    pub fn from_values(metric: &str, values: &[f64]) -> Result<Self, MeshProbeError> {
        if values.is_empty() {
            return Err(MeshProbeError::EmptyQualityArray {
                metric: metric.to_string(),
            });
        }
        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Ok(Self {
            metric: metric.to_string(),
            count: values.len(),
            mean,
            std: var.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p25: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            p75: percentile(&sorted, 75.0),
        })
    }
}

/// Linear-interpolation percentile of an ascending, non-empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} quality data:", self.metric)?;
        writeln!(f, "Mean: {:.2} \u{b1} {:.2}", self.mean, self.std)?;
        writeln!(f, "Min-Max: [{:.2} - {:.2}]", self.min, self.max)?;
        writeln!(f, "25th percentile: {:.2}", self.p25)?;
        writeln!(f, "Median: {:.2}", self.median)?;
        write!(f, "75th percentile: {:.2}", self.p75)
    }
}

/// Fetch `metric` from the engine and summarise it.
pub fn quality_report<M>(mesh: &M, metric: &str) -> Result<QualityReport, MeshProbeError>
where
    M: EngineMesh + ?Sized,
{
    let values = mesh.quality_array(metric)?;
    if values.len() != mesh.n_cells() {
        return Err(MeshProbeError::QualityLength {
            metric: metric.to_string(),
            values: values.len(),
            cells: mesh.n_cells(),
        });
    }
    QualityReport::from_values(metric, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::memory::InMemoryMesh;
    use approx::assert_relative_eq;

    #[test]
    fn five_point_report() {
        let r = QualityReport::from_values("Test Metric", &[0.5, 0.6, 0.7, 0.8, 0.9]).unwrap();
        assert_relative_eq!(r.mean, 0.7, epsilon = 1e-12);
        assert_relative_eq!(r.std, 0.02f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(r.min, 0.5);
        assert_relative_eq!(r.max, 0.9);
        assert_relative_eq!(r.p25, 0.6, epsilon = 1e-12);
        assert_relative_eq!(r.median, 0.7, epsilon = 1e-12);
        assert_relative_eq!(r.p75, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn report_is_order_independent() {
        let a = QualityReport::from_values("m", &[0.9, 0.5, 0.8, 0.6, 0.7]).unwrap();
        let b = QualityReport::from_values("m", &[0.5, 0.6, 0.7, 0.8, 0.9]).unwrap();
        assert_relative_eq!(a.median, b.median);
        assert_relative_eq!(a.p25, b.p25);
        assert_relative_eq!(a.min, b.min);
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        assert_relative_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0), 2.5);
        assert_relative_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 25.0), 1.75);
        assert_relative_eq!(percentile(&[7.0], 75.0), 7.0);
    }

    #[test]
    fn empty_array_rejected() {
        assert_eq!(
            QualityReport::from_values("Jacobian", &[]).unwrap_err(),
            MeshProbeError::EmptyQualityArray {
                metric: "Jacobian".into()
            }
        );
    }

    #[test]
    fn array_must_cover_every_cell() {
        let mesh = InMemoryMesh::new("tetrahedron", vec![[0.0; 3]; 3], vec![vec![]; 3])
            .with_quality("Jacobian", vec![1.0, 2.0]);
        assert_eq!(
            quality_report(&mesh, "Jacobian").unwrap_err(),
            MeshProbeError::QualityLength {
                metric: "Jacobian".into(),
                values: 2,
                cells: 3
            }
        );
    }

    #[test]
    fn display_matches_report_layout() {
        let r = QualityReport::from_values("Test Metric", &[0.5, 0.6, 0.7, 0.8, 0.9]).unwrap();
        let text = r.to_string();
        assert!(text.contains("Mean: 0.70 \u{b1} 0.14"));
        assert!(text.contains("Min-Max: [0.50 - 0.90]"));
        assert!(text.contains("25th percentile: 0.60"));
        assert!(text.contains("Median: 0.70"));
        assert!(text.contains("75th percentile: 0.80"));
    }
}
