use crate::analysis::RunOutput;
use std::fmt::Write;

/// Render a textual summary of a tensile test analysis.
///
/// Stresses are reported in MPa and strains as plain ratios, the same units
/// the JSON output uses.
#[must_use]
pub fn render_summary(output: &RunOutput) -> String {
    let analysis = &output.analysis;
    let metrics = &analysis.metrics;
    let mut text = String::new();

    writeln!(
        &mut text,
        "Tensile test analysis ({} samples, columns '{}' / '{}')",
        analysis.series.len(),
        output.columns_used.displacement,
        output.columns_used.load
    )
    .expect("writing to string cannot fail");

    if analysis.skipped_rows > 0 {
        writeln!(
            &mut text,
            "Skipped rows: {} (missing or non-numeric cells)",
            analysis.skipped_rows
        )
        .expect("writing to string cannot fail");
        for row in output.malformed.iter().take(5) {
            writeln!(&mut text, "  {row}").expect("writing to string cannot fail");
        }
    }

    writeln!(
        &mut text,
        "Max stress: {:.2} MPa, max strain: {:.6}, max load: {:.2} N",
        metrics.max_stress_mpa, metrics.max_strain, metrics.max_load_n
    )
    .expect("writing to string cannot fail");

    match analysis.yield_index {
        Some(index) => writeln!(
            &mut text,
            "Elastic region: samples 0..={index} (strain <= {:.6})",
            analysis.series.strain[index]
        )
        .expect("writing to string cannot fail"),
        None => text.push_str("Elastic region: not detected\n"),
    }

    match metrics.elastic_modulus_mpa {
        Some(modulus) => writeln!(&mut text, "Young's modulus (fit): {modulus:.1} MPa")
            .expect("writing to string cannot fail"),
        None => text.push_str("Young's modulus (fit): not available\n"),
    }

    match &analysis.yield_point {
        Some(point) => writeln!(
            &mut text,
            "Offset yield: {:.2} MPa at strain {:.6}",
            point.stress, point.strain
        )
        .expect("writing to string cannot fail"),
        None => text.push_str("Offset yield: not found\n"),
    }

    match &analysis.fracture_point {
        Some(point) => writeln!(
            &mut text,
            "Fracture: {:.2} MPa at strain {:.6}",
            point.stress, point.strain
        )
        .expect("writing to string cannot fail"),
        None => text.push_str("Fracture: no sudden load drop detected\n"),
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensilex::{zip_samples, ColumnsUsed, CurveAnalyzer, MalformedRow, SpecimenConstants};

    fn output() -> RunOutput {
        let samples = zip_samples(
            &[0.0, 0.1, 0.2, 0.3, 0.5, 0.6],
            &[0.0, 1_000.0, 2_000.0, 3_000.0, 3_200.0, 100.0],
        );
        let constants = SpecimenConstants::new(50.0, 1.0e-4).expect("valid constants");
        let analysis = CurveAnalyzer::default()
            .analyze(&samples, &constants)
            .expect("analysis succeeds");
        RunOutput {
            analysis,
            columns_used: ColumnsUsed {
                displacement: "displacement".to_owned(),
                load: "load".to_owned(),
            },
            malformed: vec![MalformedRow {
                line: 4,
                reason: "missing or non-numeric load".to_owned(),
            }],
        }
    }

    #[test]
    fn formats_human_readable_report() {
        let report = render_summary(&output());
        assert!(report.contains("Tensile test analysis (6 samples"));
        assert!(report.contains("Max stress: 32.00 MPa"));
        assert!(report.contains("Elastic region: samples 0..=3"));
        assert!(report.contains("Fracture: 1.00 MPa at strain 0.012000"));
    }

    #[test]
    fn lists_malformed_rows_when_present() {
        let mut output = output();
        output.analysis.skipped_rows = 1;
        let report = render_summary(&output);
        assert!(report.contains("Skipped rows: 1"));
        assert!(report.contains("line 4: missing or non-numeric load"));
    }
}
