//! Engineering stress-strain series derived from raw samples.

use serde::{Deserialize, Serialize};
use uom::si::area::square_meter;
use uom::si::f64::{Area, Force, Pressure};
use uom::si::force::newton;
use uom::si::pressure::megapascal;

use crate::sample::{Sample, SpecimenConstants};

/// Parallel per-sample series describing one test.
///
/// Every vector has one entry per cleaned sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    /// Raw displacement values.
    pub displacement: Vec<f64>,
    /// Raw load values in newtons.
    pub load: Vec<f64>,
    /// Engineering strain.
    pub strain: Vec<f64>,
    /// Engineering stress in megapascals.
    pub stress: Vec<f64>,
    /// Local secant modulus in megapascals; `None` where the strain does not change.
    pub youngs_modulus: Vec<Option<f64>>,
    /// Inclination of the secant in degrees, matching `youngs_modulus`.
    pub slope_angles: Vec<Option<f64>>,
}

impl CurveSeries {
    /// Derive the full series from cleaned samples.
    ///
    /// # Examples
    /// ```
    /// use tensilex::{sample, CurveSeries, SpecimenConstants};
    ///
    /// let constants = SpecimenConstants::new(100.0, 1.0e-4).expect("valid constants");
    /// let series = CurveSeries::derive(&[sample(0.0, 0.0), sample(1.0, 1_000.0)], &constants);
    /// assert_eq!(series.strain, vec![0.0, 0.01]);
    /// assert_eq!(series.youngs_modulus.len(), 2);
    /// ```
    #[must_use]
    pub fn derive(samples: &[Sample], constants: &SpecimenConstants) -> Self {
        let displacement: Vec<f64> = samples.iter().map(|s| s.displacement).collect();
        let load: Vec<f64> = samples.iter().map(|s| s.load).collect();
        let strain = displacement
            .iter()
            .map(|&d| engineering_strain(d, constants.original_length()))
            .collect::<Vec<_>>();
        let stress = load
            .iter()
            .map(|&f| engineering_stress_mpa(f, constants.cracked_area()))
            .collect::<Vec<_>>();
        let youngs_modulus = secant_moduli(&strain, &stress);
        let slope_angles = youngs_modulus
            .iter()
            .map(|modulus| modulus.map(slope_angle_degrees))
            .collect();

        Self {
            displacement,
            load,
            strain,
            stress,
            youngs_modulus,
            slope_angles,
        }
    }

    /// Number of samples in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.load.len()
    }

    /// Return `true` when the series holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.load.is_empty()
    }
}

/// Engineering strain, `displacement / original_length`.
///
/// # Examples
/// ```
/// use tensilex::engineering_strain;
///
/// assert_eq!(engineering_strain(0.5, 50.0), 0.01);
/// ```
#[must_use]
pub fn engineering_strain(displacement: f64, original_length: f64) -> f64 {
    displacement / original_length
}

/// Engineering stress in megapascals for a load in newtons over an area in square metres.
///
/// # Examples
/// ```
/// use approx::assert_relative_eq;
/// use tensilex::engineering_stress_mpa;
///
/// assert_relative_eq!(engineering_stress_mpa(500.0, 1.0e-4), 5.0, epsilon = 1.0e-9);
/// ```
#[must_use]
pub fn engineering_stress_mpa(load: f64, area: f64) -> f64 {
    let stress: Pressure = Force::new::<newton>(load) / Area::new::<square_meter>(area);
    stress.get::<megapascal>()
}

/// Secant slope of stress over strain between each sample and its predecessor.
///
/// Index 0 and any index where the strain is unchanged are `None`.
///
/// # Examples
/// ```
/// use tensilex::secant_moduli;
///
/// let moduli = secant_moduli(&[0.0, 0.001, 0.001], &[0.0, 200.0, 210.0]);
/// assert_eq!(moduli[0], None);
/// assert!((moduli[1].expect("defined") - 200_000.0).abs() < 1.0e-6);
/// assert_eq!(moduli[2], None);
/// ```
#[must_use]
pub fn secant_moduli(strain: &[f64], stress: &[f64]) -> Vec<Option<f64>> {
    let mut moduli = Vec::with_capacity(strain.len());
    if strain.is_empty() {
        return moduli;
    }
    moduli.push(None);
    for (eps, sigma) in strain.windows(2).zip(stress.windows(2)) {
        let d_strain = eps[1] - eps[0];
        moduli.push((d_strain != 0.0).then(|| (sigma[1] - sigma[0]) / d_strain));
    }
    moduli
}

/// Angle in degrees of a line with the given slope.
///
/// # Examples
/// ```
/// use tensilex::slope_angle_degrees;
///
/// assert!((slope_angle_degrees(1.0) - 45.0).abs() < 1.0e-12);
/// assert_eq!(slope_angle_degrees(0.0), 0.0);
/// ```
#[must_use]
pub fn slope_angle_degrees(slope: f64) -> f64 {
    slope.atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::sample::zip_samples;

    fn reference_series() -> CurveSeries {
        let samples = zip_samples(&[0.0, 0.001, 0.002, 0.003], &[0.0, 500.0, 1_200.0, 2_000.0]);
        let constants = SpecimenConstants::new(50.0, 1.0e-4).expect("valid constants");
        CurveSeries::derive(&samples, &constants)
    }

    #[test]
    fn derives_strain_and_stress() {
        let series = reference_series();
        for (actual, expected) in series.strain.iter().zip([0.0, 2.0e-5, 4.0e-5, 6.0e-5]) {
            assert_relative_eq!(*actual, expected, epsilon = 1.0e-15);
        }
        for (actual, expected) in series.stress.iter().zip([0.0, 5.0, 12.0, 20.0]) {
            assert_relative_eq!(*actual, expected, epsilon = 1.0e-9);
        }
    }

    #[test]
    fn first_secant_is_undefined() {
        let series = reference_series();
        assert_eq!(series.youngs_modulus[0], None);
        assert_eq!(series.slope_angles[0], None);
        let modulus = series.youngs_modulus[1].expect("defined modulus");
        assert_relative_eq!(modulus, 250_000.0, max_relative = 1.0e-9);
        let angle = series.slope_angles[1].expect("defined angle");
        assert!(angle > 89.9 && angle < 90.0);
    }

    #[test]
    fn repeated_strain_yields_none() {
        let moduli = secant_moduli(&[0.0, 0.1, 0.1, 0.2], &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(moduli.len(), 4);
        assert_eq!(moduli[2], None);
        assert!(moduli[3].is_some());
    }

    #[test]
    fn all_series_share_length() {
        let series = reference_series();
        let n = series.len();
        assert_eq!(series.displacement.len(), n);
        assert_eq!(series.strain.len(), n);
        assert_eq!(series.stress.len(), n);
        assert_eq!(series.youngs_modulus.len(), n);
        assert_eq!(series.slope_angles.len(), n);
    }

    #[test]
    fn slope_of_one_is_forty_five_degrees() {
        assert_relative_eq!(slope_angle_degrees(1.0), 45.0, epsilon = 1.0e-12);
    }
}
