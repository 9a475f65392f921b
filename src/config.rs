//! Tunable thresholds for the feature detectors.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default relative deviation allowed between a slope and the running mean
/// of the slopes before it.
pub const DEFAULT_ELASTIC_TOLERANCE: f64 = 0.15;
/// Default fraction of peak load below which the specimen is considered broken.
pub const DEFAULT_FRACTURE_THRESHOLD: f64 = 0.5;
/// Default offset strain for the proof-stress construction (0.2 %).
pub const DEFAULT_OFFSET_STRAIN: f64 = 0.002;

/// Thresholds used by [`CurveAnalyzer`](crate::CurveAnalyzer).
///
/// The detectors are threshold heuristics, so these usually need adjusting
/// per material class rather than per specimen.
///
/// # Examples
/// ```
/// use tensilex::AnalyzerConfig;
///
/// let config: AnalyzerConfig = serde_json::from_str(r#"{ "fracture_threshold": 0.3 }"#)
///     .expect("partial config parses");
/// assert_eq!(config.fracture_threshold, 0.3);
/// assert_eq!(config.elastic_tolerance, AnalyzerConfig::default().elastic_tolerance);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Relative slope deviation tolerated inside the elastic region.
    pub elastic_tolerance: f64,
    /// Fraction of peak load that marks a post-peak collapse.
    pub fracture_threshold: f64,
    /// Strain offset for the proof-stress line.
    pub offset_strain: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            elastic_tolerance: DEFAULT_ELASTIC_TOLERANCE,
            fracture_threshold: DEFAULT_FRACTURE_THRESHOLD,
            offset_strain: DEFAULT_OFFSET_STRAIN,
        }
    }
}

impl AnalyzerConfig {
    /// Check every threshold lies in its valid range.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.elastic_tolerance.is_finite() && self.elastic_tolerance > 0.0) {
            return Err(ConfigError::ElasticTolerance(self.elastic_tolerance));
        }
        if !(self.fracture_threshold > 0.0 && self.fracture_threshold < 1.0) {
            return Err(ConfigError::FractureThreshold(self.fracture_threshold));
        }
        if !(self.offset_strain.is_finite() && self.offset_strain >= 0.0) {
            return Err(ConfigError::OffsetStrain(self.offset_strain));
        }
        Ok(())
    }
}
