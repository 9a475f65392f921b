mod analysis;
mod cli;
mod report;

use analysis::run_analysis;
use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use report::render_summary;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so JSON on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Read the CSV, derive stress and strain, and detect the elastic region,
    // yield and fracture. Engineering stress is F / A and strain is dL / L0,
    // see https://en.wikipedia.org/wiki/Stress%E2%80%93strain_curve.
    let output = run_analysis(&cli)?;

    let rendered = if cli.json {
        serde_json::to_string_pretty(&output).context("failed to serialise result")?
    } else {
        render_summary(&output)
    };

    match &cli.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write '{}'", path.display()))?,
        None => println!("{}", rendered.trim_end()),
    }

    Ok(())
}
