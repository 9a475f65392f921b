use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tensilex::AnalyzerConfig;

/// Command line arguments for a single-specimen analysis.
#[derive(Debug, Parser)]
#[command(
    name = "tensilex",
    version,
    about = "Derive a stress-strain curve and its features from tensile test CSV data"
)]
pub struct Cli {
    /// CSV file with a displacement (or extension/delta) column and a load (or force) column.
    pub input: PathBuf,

    #[arg(
        long,
        default_value_t = 1.0,
        help = "Original gauge length, in the displacement column's unit"
    )]
    pub length: f64,

    #[arg(
        long,
        default_value_t = 0.003,
        help = "Cracked cross-sectional area in square metres"
    )]
    pub area: f64,

    #[arg(long, help = "Relative slope tolerance for the elastic region [default: 0.15]")]
    pub elastic_tolerance: Option<f64>,

    #[arg(long, help = "Fraction of peak load that marks fracture [default: 0.5]")]
    pub fracture_threshold: Option<f64>,

    #[arg(long, help = "Offset strain for the proof-stress line [default: 0.002]")]
    pub offset_strain: Option<f64>,

    #[arg(long, help = "JSON file with analyzer thresholds; flags override it")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Print the full result as JSON")]
    pub json: bool,

    #[arg(long, help = "Write output to this file instead of stdout")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Resolve thresholds from the config file (if any) and the override flags.
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config '{}'", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse config '{}'", path.display()))?
            }
            None => AnalyzerConfig::default(),
        };
        if let Some(value) = self.elastic_tolerance {
            config.elastic_tolerance = value;
        }
        if let Some(value) = self.fracture_threshold {
            config.fracture_threshold = value;
        }
        if let Some(value) = self.offset_strain {
            config.offset_strain = value;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "elastic_tolerance": 0.3, "fracture_threshold": 0.4 }}"#)
            .expect("config written");

        let cli = Cli::parse_from([
            "tensilex",
            "data.csv",
            "--config",
            file.path().to_str().expect("utf-8 path"),
            "--fracture-threshold",
            "0.25",
        ]);
        let config = cli.analyzer_config().expect("config resolves");
        assert_eq!(config.elastic_tolerance, 0.3);
        assert_eq!(config.fracture_threshold, 0.25);
        assert_eq!(config.offset_strain, AnalyzerConfig::default().offset_strain);
    }

    #[test]
    fn defaults_match_form_defaults() {
        let cli = Cli::parse_from(["tensilex", "data.csv"]);
        assert_eq!(cli.length, 1.0);
        assert_eq!(cli.area, 0.003);
        assert!(!cli.json);
        assert_eq!(
            cli.analyzer_config().expect("default config"),
            AnalyzerConfig::default()
        );
    }
}
