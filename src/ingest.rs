//! CSV ingest with displacement/load column auto-detection.
//!
//! Rows are never rejected outright here. A row with a missing or
//! non-numeric cell is kept as a [`RawSample`] with an empty cell and reported
//! as a [`MalformedRow`], so that the analyzer's skipped-row count matches the
//! number of rows reported.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Position, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{IngestError, InputError, MalformedRow};
use crate::sample::RawSample;

/// Header fragments identifying the displacement column.
const DISPLACEMENT_KEYS: [&str; 3] = ["disp", "extension", "delta"];
/// Header fragments identifying the load column.
const LOAD_KEYS: [&str; 2] = ["load", "force"];

/// Names of the columns chosen by auto-detection, as normalised header text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsUsed {
    /// Displacement column header.
    pub displacement: String,
    /// Load column header.
    pub load: String,
}

/// Rows read from a CSV source.
#[derive(Clone, Debug, PartialEq)]
pub struct Ingested {
    /// One entry per data record, in file order.
    pub rows: Vec<RawSample>,
    /// Columns the rows were taken from.
    pub columns: ColumnsUsed,
    /// Records with a missing or unparsable cell.
    pub malformed: Vec<MalformedRow>,
}

/// Read samples from a CSV file on disk.
///
/// # Errors
///
/// Returns [`IngestError::Io`] when the file cannot be opened, otherwise the
/// errors of [`read_csv`].
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<Ingested, IngestError> {
    let file = File::open(path.as_ref())?;
    read_csv(file)
}

/// Read samples from CSV text.
///
/// The whole source is buffered so each malformed row can be reported with
/// the line it starts on.
///
/// # Errors
///
/// Returns [`IngestError::Io`] when the source cannot be read,
/// [`IngestError::Header`] when the header row cannot be decoded and
/// [`IngestError::InvalidInput`] wrapping [`InputError::MissingColumns`] when
/// no displacement or load column exists.
///
/// # Examples
/// ```
/// use tensilex::read_csv;
///
/// let text = "Time (s),Extension (mm),Force (N)\n0,0.0,0\n1,0.1,250\n2,0.2,n/a\n";
/// let ingested = read_csv(text.as_bytes()).expect("columns detected");
/// assert_eq!(ingested.columns.displacement, "extension (mm)");
/// assert_eq!(ingested.rows.len(), 3);
/// assert_eq!(ingested.malformed[0].line, 4);
/// ```
pub fn read_csv<R: Read>(mut source: R) -> Result<Ingested, IngestError> {
    let mut text = Vec::new();
    source.read_to_end(&mut text)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_slice());

    let headers: Vec<String> = reader
        .headers()
        .map_err(IngestError::Header)?
        .iter()
        .map(normalize_header)
        .collect();

    let (disp_col, load_col) =
        detect_columns(&headers).ok_or_else(|| InputError::MissingColumns {
            found: headers.clone(),
        })?;
    let columns = ColumnsUsed {
        displacement: headers[disp_col].clone(),
        load: headers[load_col].clone(),
    };
    info!(
        displacement = %columns.displacement,
        load = %columns.load,
        "detected CSV columns"
    );

    let mut rows = Vec::new();
    let mut malformed = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Only used if the reader has no position for the record.
        let fallback = idx as u64 + 2;
        let (line, row) = match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map_or(fallback, |position| record_line(&text, position));
                (line, parse_record(&record, disp_col, load_col))
            }
            Err(e) => {
                let line = e
                    .position()
                    .map_or(fallback, |position| record_line(&text, position));
                malformed.push(MalformedRow {
                    line,
                    reason: format!("CSV parse error: {e}"),
                });
                rows.push(RawSample::default());
                continue;
            }
        };
        if let Some(reason) = describe_gap(&row) {
            malformed.push(MalformedRow {
                line,
                reason: reason.to_owned(),
            });
        }
        rows.push(row);
    }

    if !malformed.is_empty() {
        warn!(
            count = malformed.len(),
            first = %malformed[0],
            "rows with missing or non-numeric cells will be skipped"
        );
    }

    Ok(Ingested {
        rows,
        columns,
        malformed,
    })
}

/// Pick the displacement and load column indices from normalised headers.
///
/// When several headers match, the last one wins.
///
/// # Examples
/// ```
/// use tensilex::detect_columns;
///
/// let headers = ["time".to_owned(), "displacement".to_owned(), "load".to_owned()];
/// assert_eq!(detect_columns(&headers), Some((1, 2)));
/// ```
#[must_use]
pub fn detect_columns(headers: &[String]) -> Option<(usize, usize)> {
    let mut disp_col = None;
    let mut load_col = None;
    for (idx, header) in headers.iter().enumerate() {
        if DISPLACEMENT_KEYS.iter().any(|key| header.contains(key)) {
            disp_col = Some(idx);
        }
        if LOAD_KEYS.iter().any(|key| header.contains(key)) {
            load_col = Some(idx);
        }
    }
    Some((disp_col?, load_col?))
}

/// Lower-case a header and strip whitespace and any UTF-8 byte order mark.
fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// One-based line on which the record at `position` starts.
///
/// The reader stamps a record with the position reached after the previous
/// one, before it skips any blank lines, so those are stepped over here.
fn record_line(text: &[u8], position: &Position) -> u64 {
    let start = usize::try_from(position.byte())
        .unwrap_or(usize::MAX)
        .min(text.len());
    let skipped = text[start..]
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .filter(|&&b| b == b'\n')
        .count();
    position.line() + skipped as u64
}

/// Pull the displacement and load cells out of a record.
fn parse_record(record: &StringRecord, disp_col: usize, load_col: usize) -> RawSample {
    RawSample::new(
        record.get(disp_col).and_then(parse_cell),
        record.get(load_col).and_then(parse_cell),
    )
}

/// Parse one cell, treating non-finite values as missing.
fn parse_cell(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Explain which cell of a row is unusable, if any.
fn describe_gap(row: &RawSample) -> Option<&'static str> {
    match (row.displacement, row.load) {
        (Some(_), Some(_)) => None,
        (None, Some(_)) => Some("missing or non-numeric displacement"),
        (Some(_), None) => Some("missing or non-numeric load"),
        (None, None) => Some("missing or non-numeric displacement and load"),
    }
}
