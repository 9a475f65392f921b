use tensilex::{read_csv, AnalyzerConfig, CurveAnalyzer, SpecimenConstants};

const DATA: &str = "\
Extension (mm),Load (N)
0.00,0
0.02,420
0.04,845
0.06,1260
0.08,1690
0.10,1805
0.20,1950
0.30,2010
0.40,1985
0.42,n/a
0.44,640
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ingested = read_csv(DATA.as_bytes())?;
    for row in &ingested.malformed {
        println!("skipping {row}");
    }

    // Brittle material: treat a drop below 40 % of peak as fracture
    let analyzer = CurveAnalyzer::new(AnalyzerConfig {
        fracture_threshold: 0.4,
        ..AnalyzerConfig::default()
    });
    let constants = SpecimenConstants::new(25.0, 1.0e-5)?;
    let analysis = analyzer.analyze_raw(&ingested.rows, &constants)?;

    println!("{}", serde_json::to_string_pretty(&analysis.metrics)?);

    Ok(())
}
