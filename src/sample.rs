//! Fundamental input types for tensile curve analysis.

use serde::{Deserialize, Serialize};

use crate::errors::ConstantsError;

/// One reading from the test frame, in test time order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Crosshead displacement or extension, in the same length unit as the
    /// specimen's original length.
    pub displacement: f64,
    /// Applied load in newtons.
    pub load: f64,
}

impl Sample {
    /// Create a [`Sample`] with explicit values.
    #[must_use]
    pub const fn new(displacement: f64, load: f64) -> Self {
        Self { displacement, load }
    }
}

/// A row before cleaning, where either cell may be missing or unparsable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawSample {
    /// Displacement cell, if it held a number.
    pub displacement: Option<f64>,
    /// Load cell, if it held a number.
    pub load: Option<f64>,
}

impl RawSample {
    /// Create a [`RawSample`] from optional cells.
    #[must_use]
    pub const fn new(displacement: Option<f64>, load: Option<f64>) -> Self {
        Self { displacement, load }
    }

    /// Return the cleaned sample when both cells are present and finite.
    #[must_use]
    pub fn usable(self) -> Option<Sample> {
        match (self.displacement, self.load) {
            (Some(displacement), Some(load)) if displacement.is_finite() && load.is_finite() => {
                Some(Sample::new(displacement, load))
            }
            _ => None,
        }
    }
}

impl From<Sample> for RawSample {
    fn from(value: Sample) -> Self {
        Self::new(Some(value.displacement), Some(value.load))
    }
}

/// Physical constants describing the specimen under test.
///
/// The cracked area is taken as supplied; it is never derived from the
/// original cross-section.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecimenConstants {
    /// Original gauge length.
    original_length: f64,
    /// Cracked cross-sectional area in square metres.
    cracked_area: f64,
}

impl SpecimenConstants {
    /// Create validated specimen constants.
    ///
    /// # Errors
    ///
    /// Returns [`ConstantsError`] when either value is not strictly positive and finite.
    ///
    /// # Examples
    /// ```
    /// use tensilex::{ConstantsError, SpecimenConstants};
    ///
    /// let constants = SpecimenConstants::new(50.0, 1.0e-4).expect("valid constants");
    /// assert_eq!(constants.original_length(), 50.0);
    ///
    /// let error = SpecimenConstants::new(0.0, 1.0e-4).expect_err("zero length rejected");
    /// assert_eq!(error, ConstantsError::NonPositiveLength(0.0));
    /// ```
    pub fn new(original_length: f64, cracked_area: f64) -> Result<Self, ConstantsError> {
        let constants = Self {
            original_length,
            cracked_area,
        };
        constants.validate()?;
        Ok(constants)
    }

    /// Original gauge length, in the displacement's length unit.
    #[must_use]
    pub const fn original_length(&self) -> f64 {
        self.original_length
    }

    /// Cracked cross-sectional area in square metres.
    #[must_use]
    pub const fn cracked_area(&self) -> f64 {
        self.cracked_area
    }

    /// Check both constants are strictly positive and finite.
    ///
    /// Deserialised constants bypass [`SpecimenConstants::new`], so the
    /// analyzer calls this again before using them.
    ///
    /// # Errors
    ///
    /// Returns [`ConstantsError`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ConstantsError> {
        if !(self.original_length.is_finite() && self.original_length > 0.0) {
            return Err(ConstantsError::NonPositiveLength(self.original_length));
        }
        if !(self.cracked_area.is_finite() && self.cracked_area > 0.0) {
            return Err(ConstantsError::NonPositiveArea(self.cracked_area));
        }
        Ok(())
    }
}

/// Convenience helper for creating [`Sample`] instances.
///
/// # Examples
/// ```
/// use tensilex::sample;
///
/// let reading = sample(0.5, 1_200.0);
/// assert_eq!(reading.load, 1_200.0);
/// ```
#[must_use]
pub const fn sample(displacement: f64, load: f64) -> Sample {
    Sample::new(displacement, load)
}

/// Zip parallel displacement and load columns into samples.
///
/// Extra values in the longer column are ignored.
#[must_use]
pub fn zip_samples(displacement: &[f64], load: &[f64]) -> Vec<Sample> {
    displacement
        .iter()
        .zip(load)
        .map(|(&displacement, &load)| Sample::new(displacement, load))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_sample_requires_both_cells() {
        assert_eq!(RawSample::new(Some(1.0), None).usable(), None);
        assert_eq!(RawSample::new(None, Some(1.0)).usable(), None);
        assert_eq!(RawSample::new(Some(1.0), Some(f64::NAN)).usable(), None);
        assert_eq!(
            RawSample::new(Some(1.0), Some(2.0)).usable(),
            Some(Sample::new(1.0, 2.0))
        );
    }

    #[test]
    fn constants_reject_non_positive_values() {
        assert_eq!(
            SpecimenConstants::new(-1.0, 1.0),
            Err(ConstantsError::NonPositiveLength(-1.0))
        );
        assert_eq!(
            SpecimenConstants::new(1.0, 0.0),
            Err(ConstantsError::NonPositiveArea(0.0))
        );
        assert!(SpecimenConstants::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn zip_truncates_to_shorter_column() {
        let samples = zip_samples(&[0.0, 1.0, 2.0], &[10.0, 20.0]);
        assert_eq!(samples, vec![sample(0.0, 10.0), sample(1.0, 20.0)]);
    }
}
