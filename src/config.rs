//! Explicit configuration passed to the converter and the analysis layer.
//!
//! Nothing here is process-global: callers build a [`ProbeConfig`] (from
//! defaults or a JSON file) and hand it to the operations that need it.

use crate::mesh_error::MeshProbeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Default suffix of the legacy mesh format.
pub const LEGACY_EXTENSION: &str = "vtk";
/// Default marker appended to the stem of converted meshes.
pub const CONVERSION_SUFFIX: &str = "_tet";

/// Runtime configuration for mesh-probe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Recognised legacy mesh extension, without the leading dot.
    pub extension: String,
    /// Marker inserted between the source stem and extension on conversion.
    pub conversion_suffix: String,
    /// Metric short codes mapped to engine metric names.
    pub metrics: BTreeMap<String, String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        let mut metrics = BTreeMap::new();
        metrics.insert("ar".to_string(), "Aspect Ratio".to_string());
        metrics.insert("ja".to_string(), "Jacobian".to_string());
        Self {
            extension: LEGACY_EXTENSION.to_string(),
            conversion_suffix: CONVERSION_SUFFIX.to_string(),
            metrics,
        }
    }
}

impl ProbeConfig {
    /// Decode a configuration from JSON; missing fields take their defaults.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, MeshProbeError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, MeshProbeError> {
        if !path.exists() {
            return Err(MeshProbeError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let file = std::fs::File::open(path)?;
        let config = Self::from_json_reader(std::io::BufReader::new(file))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve a metric short code (`ar`, `ja`, ...) to its engine name.
    ///
    /// A full metric name that appears as a value in the map is accepted as is.
    pub fn resolve_metric(&self, code: &str) -> Result<&str, MeshProbeError> {
        if let Some(name) = self.metrics.get(code) {
            return Ok(name.as_str());
        }
        self.metrics
            .values()
            .find(|name| name.as_str() == code)
            .map(String::as_str)
            .ok_or_else(|| MeshProbeError::UnknownMetricCode {
                code: code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metric_codes() {
        let cfg = ProbeConfig::default();
        assert_eq!(cfg.resolve_metric("ar").unwrap(), "Aspect Ratio");
        assert_eq!(cfg.resolve_metric("ja").unwrap(), "Jacobian");
        assert_eq!(cfg.resolve_metric("Jacobian").unwrap(), "Jacobian");
        assert_eq!(
            cfg.resolve_metric("xx").unwrap_err(),
            MeshProbeError::UnknownMetricCode { code: "xx".into() }
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "conversion_suffix": "_split", "metrics": { "vol": "Volume" } }"#;
        let cfg = ProbeConfig::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(cfg.extension, "vtk");
        assert_eq!(cfg.conversion_suffix, "_split");
        assert_eq!(cfg.resolve_metric("vol").unwrap(), "Volume");
        assert!(cfg.resolve_metric("ar").is_err());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ProbeConfig::from_json_reader("{ nope".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshProbeError::Config(_)));
    }
}
