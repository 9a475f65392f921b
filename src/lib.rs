#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod analyzer;
mod config;
mod curve;
mod detect;
mod errors;
mod fit;
mod ingest;
mod sample;

pub use analyzer::{
    Analysis, ChartPoint, CurveAnalyzer, FracturePoint, Metrics, YieldPoint, MIN_SAMPLES,
};
pub use config::{
    AnalyzerConfig, DEFAULT_ELASTIC_TOLERANCE, DEFAULT_FRACTURE_THRESHOLD, DEFAULT_OFFSET_STRAIN,
};
pub use curve::{
    engineering_strain, engineering_stress_mpa, secant_moduli, slope_angle_degrees, CurveSeries,
};
pub use detect::{elastic_limit, fracture_index, offset_yield_index, peak_index};
pub use errors::{
    AnalysisError, ConfigError, ConstantsError, IngestError, InputError, MalformedRow,
};
pub use fit::LinearFit;
pub use ingest::{detect_columns, read_csv, read_csv_path, ColumnsUsed, Ingested};
pub use sample::{sample, zip_samples, RawSample, Sample, SpecimenConstants};
