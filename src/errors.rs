//! Error types produced while ingesting or analysing tensile test data.

use thiserror::Error;

/// Error returned when a curve analysis fails.
///
/// Analysis is atomic: when one of these is returned no part of the result is
/// available.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the samples cannot support an analysis.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    /// Returned when the specimen constants are not physically meaningful.
    #[error("invalid specimen constants: {0}")]
    InvalidConstants(#[from] ConstantsError),
    /// Returned when the detection thresholds are out of range.
    #[error("invalid analyzer configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Why a set of samples, or the file they came from, cannot be analysed.
///
/// Shared by [`AnalysisError::InvalidInput`] and [`IngestError::InvalidInput`]
/// so a caller reading a CSV sees the same kind whichever stage rejects it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Returned when fewer than two usable samples remain after cleaning.
    #[error("at least 2 usable samples are required (found {usable})")]
    TooFewSamples {
        /// Number of samples that survived cleaning.
        usable: usize,
    },
    /// Returned when no displacement or load column can be identified.
    #[error(
        "could not auto-detect columns, found {found:?}; expected headers containing \
         'displacement' (or 'extension'/'delta') and 'load' (or 'force')"
    )]
    MissingColumns {
        /// Normalised header names present in the file.
        found: Vec<String>,
    },
}

/// Error returned when constructing [`SpecimenConstants`](crate::SpecimenConstants).
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConstantsError {
    /// Returned when the original gauge length is zero, negative or not finite.
    #[error("original length must be positive (received {0})")]
    NonPositiveLength(f64),
    /// Returned when the cracked cross-sectional area is zero, negative or not finite.
    #[error("cracked area must be positive (received {0})")]
    NonPositiveArea(f64),
}

/// Error returned when validating an [`AnalyzerConfig`](crate::AnalyzerConfig).
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Returned when the elastic tolerance is not a positive finite fraction.
    #[error("elastic tolerance must be positive (received {0})")]
    ElasticTolerance(f64),
    /// Returned when the fracture threshold is outside the open interval (0, 1).
    #[error("fracture threshold must lie in (0, 1) (received {0})")]
    FractureThreshold(f64),
    /// Returned when the offset strain is negative or not finite.
    #[error("offset strain must be non-negative (received {0})")]
    OffsetStrain(f64),
}

/// Error returned when reading samples from a CSV source.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Returned when the source cannot be opened or read.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the CSV header row cannot be decoded.
    #[error("failed to read CSV headers: {0}")]
    Header(#[source] csv::Error),
    /// Returned when the file lacks a displacement or load column.
    #[error(transparent)]
    InvalidInput(#[from] InputError),
}

impl IngestError {
    /// The input problem behind this error, if it is one.
    ///
    /// Lets a caller report a file with absent columns through
    /// [`AnalysisError::InvalidInput`], the same as one with too few rows.
    #[must_use]
    pub fn input_error(&self) -> Option<&InputError> {
        match self {
            Self::InvalidInput(error) => Some(error),
            _ => None,
        }
    }
}

/// A row that was dropped during cleaning.
///
/// Malformed rows are never fatal on their own; they are counted and logged so
/// callers can tell the user how much of the file was usable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedRow {
    /// One-based line number in the source file on which the record starts,
    /// header included.
    pub line: u64,
    /// Why the row was dropped.
    pub reason: String,
}

impl std::fmt::Display for MalformedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}
