//! The curve analysis pipeline and its structured result.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::curve::CurveSeries;
use crate::detect::{elastic_limit, fracture_index, offset_yield_index};
use crate::errors::{AnalysisError, InputError};
use crate::fit::LinearFit;
use crate::sample::{RawSample, Sample, SpecimenConstants};

/// Minimum number of usable samples for an analysis.
pub const MIN_SAMPLES: usize = 2;

/// Strain/stress coordinate of the detected specimen failure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FracturePoint {
    /// Engineering strain at failure.
    pub strain: f64,
    /// Engineering stress at failure in megapascals.
    pub stress: f64,
}

/// Proof-stress point from the offset construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct YieldPoint {
    /// Engineering strain at yield.
    pub strain: f64,
    /// Yield strength in megapascals.
    pub stress: f64,
    /// Secant inclination at the yield sample in degrees.
    pub slope_angle: Option<f64>,
}

/// A point on the strain-stress chart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Strain coordinate.
    pub x: f64,
    /// Stress coordinate in megapascals.
    pub y: f64,
}

/// Headline numbers for a single test.
///
/// The maxima are taken independently and need not share an index.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Largest engineering stress in megapascals.
    pub max_stress_mpa: f64,
    /// Largest engineering strain.
    pub max_strain: f64,
    /// Largest load in newtons.
    pub max_load_n: f64,
    /// Least-squares Young's modulus over the elastic region in megapascals.
    pub elastic_modulus_mpa: Option<f64>,
    /// Offset yield strength in megapascals.
    pub yield_strength_mpa: Option<f64>,
}

/// Complete, immutable result of one analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Per-sample series.
    #[serde(flatten)]
    pub series: CurveSeries,
    /// Last index of the linear elastic region.
    pub yield_index: Option<usize>,
    /// Detected failure point.
    pub fracture_point: Option<FracturePoint>,
    /// Offset yield point.
    pub yield_point: Option<YieldPoint>,
    /// Offset line from the offset strain on the axis to the yield point, or empty.
    pub offset_line: Vec<ChartPoint>,
    /// Summary metrics.
    pub metrics: Metrics,
    /// Rows dropped during cleaning.
    pub skipped_rows: usize,
}

/// Derives the stress-strain curve and detects its features.
///
/// The analyzer holds only its thresholds, so one instance can be shared
/// freely between threads.
///
/// # Examples
/// ```
/// use tensilex::{zip_samples, CurveAnalyzer, SpecimenConstants};
///
/// let samples = zip_samples(&[0.0, 0.001, 0.002, 0.003], &[0.0, 500.0, 1_200.0, 2_000.0]);
/// let constants = SpecimenConstants::new(50.0, 1.0e-4).expect("valid constants");
/// let analysis = CurveAnalyzer::default()
///     .analyze(&samples, &constants)
///     .expect("analysis succeeds");
/// assert_eq!(analysis.series.len(), 4);
/// assert_eq!(analysis.series.youngs_modulus[0], None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CurveAnalyzer {
    /// Detector thresholds.
    config: AnalyzerConfig,
}

impl CurveAnalyzer {
    /// Create an analyzer with the supplied thresholds.
    ///
    /// The thresholds are validated when [`CurveAnalyzer::analyze`] runs.
    #[must_use]
    pub const fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Thresholds used by this analyzer.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyse clean samples.
    ///
    /// Samples with a non-finite value are dropped and counted in
    /// [`Analysis::skipped_rows`].
    ///
    /// # Errors
    ///
    /// See [`CurveAnalyzer::analyze_raw`].
    pub fn analyze(
        &self,
        samples: &[Sample],
        constants: &SpecimenConstants,
    ) -> Result<Analysis, AnalysisError> {
        let rows: Vec<RawSample> = samples.iter().copied().map(RawSample::from).collect();
        self.analyze_raw(&rows, constants)
    }

    /// Analyse rows that may contain missing cells.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConstants`] for non-positive constants,
    /// [`AnalysisError::InvalidConfig`] for out-of-range thresholds and
    /// [`AnalysisError::InvalidInput`] with [`InputError::TooFewSamples`] when
    /// fewer than two rows are usable.
    pub fn analyze_raw(
        &self,
        rows: &[RawSample],
        constants: &SpecimenConstants,
    ) -> Result<Analysis, AnalysisError> {
        constants.validate()?;
        self.config.validate()?;

        let samples: Vec<Sample> = rows.iter().filter_map(|row| row.usable()).collect();
        let skipped_rows = rows.len() - samples.len();
        if skipped_rows > 0 {
            warn!(skipped_rows, "dropped rows with missing or non-numeric cells");
        }
        if samples.len() < MIN_SAMPLES {
            return Err(InputError::TooFewSamples {
                usable: samples.len(),
            }
            .into());
        }

        let series = CurveSeries::derive(&samples, constants);

        let yield_index = elastic_limit(
            &series.displacement,
            &series.load,
            self.config.elastic_tolerance,
        );
        debug!(?yield_index, "elastic region detected");

        let elastic_fit =
            yield_index.and_then(|end| LinearFit::fit(&series.strain[..=end], &series.stress[..=end]));
        if let Some(fit) = elastic_fit {
            debug!(
                modulus = fit.slope,
                r_squared = fit.r_squared,
                "elastic modulus fitted"
            );
        }
        let elastic_modulus = elastic_fit.map(|fit| fit.slope);

        let yield_point = elastic_modulus
            .and_then(|modulus| {
                offset_yield_index(
                    &series.strain,
                    &series.stress,
                    modulus,
                    self.config.offset_strain,
                )
            })
            .map(|idx| YieldPoint {
                strain: series.strain[idx],
                stress: series.stress[idx],
                slope_angle: series.slope_angles[idx],
            });
        let offset_line = yield_point
            .map(|point| {
                vec![
                    ChartPoint {
                        x: self.config.offset_strain,
                        y: 0.0,
                    },
                    ChartPoint {
                        x: point.strain,
                        y: point.stress,
                    },
                ]
            })
            .unwrap_or_default();

        let fracture_point =
            fracture_index(&series.load, self.config.fracture_threshold).map(|idx| FracturePoint {
                strain: series.strain[idx],
                stress: series.stress[idx],
            });
        debug!(?fracture_point, "fracture detection finished");

        let metrics = Metrics {
            max_stress_mpa: max_of(&series.stress),
            max_strain: max_of(&series.strain),
            max_load_n: max_of(&series.load),
            elastic_modulus_mpa: elastic_modulus,
            yield_strength_mpa: yield_point.map(|point| point.stress),
        };

        Ok(Analysis {
            series,
            yield_index,
            fracture_point,
            yield_point,
            offset_line,
            metrics,
            skipped_rows,
        })
    }
}

/// Largest value in a non-empty slice.
fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::errors::{ConfigError, ConstantsError};
    use crate::sample::{sample, zip_samples};

    fn constants() -> SpecimenConstants {
        SpecimenConstants::new(50.0, 1.0e-4).expect("valid constants")
    }

    #[test]
    fn single_sample_is_invalid_input() {
        let error = CurveAnalyzer::default()
            .analyze(&[sample(0.0, 0.0)], &constants())
            .expect_err("one sample rejected");
        assert_eq!(
            error,
            AnalysisError::InvalidInput(InputError::TooFewSamples { usable: 1 })
        );
    }

    #[test]
    fn malformed_row_is_dropped() {
        let rows = [
            RawSample::new(Some(0.0), Some(0.0)),
            RawSample::new(Some(0.001), None),
            RawSample::new(Some(0.002), Some(1_000.0)),
            RawSample::new(Some(0.003), Some(1_500.0)),
        ];
        let analysis = CurveAnalyzer::default()
            .analyze_raw(&rows, &constants())
            .expect("analysis succeeds");
        assert_eq!(analysis.series.len(), 3);
        assert_eq!(analysis.skipped_rows, 1);
    }

    #[test]
    fn dropping_rows_below_minimum_fails() {
        let rows = [
            RawSample::new(Some(0.0), Some(0.0)),
            RawSample::new(None, Some(1.0)),
        ];
        let error = CurveAnalyzer::default()
            .analyze_raw(&rows, &constants())
            .expect_err("too few usable rows");
        assert_eq!(
            error,
            AnalysisError::InvalidInput(InputError::TooFewSamples { usable: 1 })
        );
    }

    #[test]
    fn invalid_constants_are_reported_before_input() {
        let constants: SpecimenConstants =
            serde_json::from_str(r#"{ "original_length": 50.0, "cracked_area": -1.0 }"#)
                .expect("constants deserialize");
        let error = CurveAnalyzer::default()
            .analyze(&[], &constants)
            .expect_err("negative area rejected");
        assert_eq!(
            error,
            AnalysisError::InvalidConstants(ConstantsError::NonPositiveArea(-1.0))
        );
    }

    #[test]
    fn invalid_config_is_reported() {
        let analyzer = CurveAnalyzer::new(AnalyzerConfig {
            fracture_threshold: 0.0,
            ..AnalyzerConfig::default()
        });
        let samples = zip_samples(&[0.0, 1.0], &[0.0, 1.0]);
        let error = analyzer
            .analyze(&samples, &constants())
            .expect_err("zero threshold rejected");
        assert_eq!(
            error,
            AnalysisError::InvalidConfig(ConfigError::FractureThreshold(0.0))
        );
    }

    #[test]
    fn linear_then_plastic_curve_has_all_features() {
        // Linear to 0.2 mm, then hardening, then a sudden break.
        let displacement = [0.0, 0.05, 0.10, 0.15, 0.20, 0.40, 0.80, 1.20, 1.60, 1.65];
        let load = [
            0.0, 2_500.0, 5_000.0, 7_500.0, 10_000.0, 10_800.0, 11_500.0, 12_000.0, 11_000.0,
            1_000.0,
        ];
        let samples = zip_samples(&displacement, &load);
        let constants = SpecimenConstants::new(50.0, 5.0e-5).expect("valid constants");
        let analysis = CurveAnalyzer::default()
            .analyze(&samples, &constants)
            .expect("analysis succeeds");

        assert_eq!(analysis.yield_index, Some(4));

        let modulus = analysis
            .metrics
            .elastic_modulus_mpa
            .expect("modulus fitted");
        // 50 MPa per 0.001 strain.
        assert_relative_eq!(modulus, 50_000.0, max_relative = 1.0e-9);

        let fracture = analysis.fracture_point.expect("fracture detected");
        assert_relative_eq!(fracture.strain, 1.65 / 50.0, epsilon = 1.0e-12);
        assert_relative_eq!(fracture.stress, 20.0, epsilon = 1.0e-9);

        let yield_point = analysis.yield_point.expect("offset yield found");
        assert_eq!(analysis.offset_line.len(), 2);
        assert_relative_eq!(analysis.offset_line[0].x, 0.002);
        assert_relative_eq!(analysis.offset_line[1].y, yield_point.stress);
        assert_eq!(analysis.metrics.yield_strength_mpa, Some(yield_point.stress));

        assert_relative_eq!(analysis.metrics.max_load_n, 12_000.0);
        assert_relative_eq!(analysis.metrics.max_stress_mpa, 240.0, epsilon = 1.0e-9);
        assert_relative_eq!(analysis.metrics.max_strain, 1.65 / 50.0, epsilon = 1.0e-12);
    }

    #[test]
    fn serializes_flat_result() {
        let samples = zip_samples(&[0.0, 0.001, 0.002, 0.003], &[0.0, 500.0, 1_200.0, 2_000.0]);
        let analysis = CurveAnalyzer::default()
            .analyze(&samples, &constants())
            .expect("analysis succeeds");
        let value = serde_json::to_value(&analysis).expect("serializes");
        for key in [
            "displacement",
            "load",
            "strain",
            "stress",
            "youngs_modulus",
            "slope_angles",
            "yield_index",
            "fracture_point",
            "metrics",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(value["youngs_modulus"][0].is_null());
        assert!(value["fracture_point"].is_null());
        assert!(value["metrics"]["max_load_n"].is_number());
    }
}
