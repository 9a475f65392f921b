use anyhow::{Context, Result};
use serde::Serialize;
use tensilex::{read_csv_path, Analysis, ColumnsUsed, CurveAnalyzer, MalformedRow, SpecimenConstants};
use tracing::info;

use crate::cli::Cli;

/// Everything produced by one CLI run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutput {
    /// Result of the curve analysis.
    #[serde(flatten)]
    pub analysis: Analysis,
    /// Columns picked from the CSV header.
    pub columns_used: ColumnsUsed,
    /// Rows dropped while reading the file.
    #[serde(skip)]
    pub malformed: Vec<MalformedRow>,
}

/// Read the CSV named on the command line and analyse it.
pub fn run_analysis(cli: &Cli) -> Result<RunOutput> {
    let constants = SpecimenConstants::new(cli.length, cli.area)
        .context("specimen length and area must be positive numbers")?;
    let analyzer = CurveAnalyzer::new(cli.analyzer_config()?);

    let ingested = read_csv_path(&cli.input)
        .with_context(|| format!("failed to load '{}'", cli.input.display()))?;
    let analysis = analyzer
        .analyze_raw(&ingested.rows, &constants)
        .with_context(|| format!("failed to analyse '{}'", cli.input.display()))?;

    info!(
        samples = analysis.series.len(),
        skipped = analysis.skipped_rows,
        "analysis complete"
    );

    Ok(RunOutput {
        analysis,
        columns_used: ingested.columns,
        malformed: ingested.malformed,
    })
}
