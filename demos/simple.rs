use tensilex::{zip_samples, CurveAnalyzer, SpecimenConstants};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Displacement in mm, load in N
    let displacement = [0.0, 0.05, 0.10, 0.15, 0.20, 0.50, 1.00, 1.50, 1.55];
    let load = [0.0, 1_000.0, 2_000.0, 3_000.0, 4_000.0, 4_600.0, 5_000.0, 4_800.0, 400.0];
    let samples = zip_samples(&displacement, &load);

    // 50 mm gauge length, 20 mm^2 cracked area
    let constants = SpecimenConstants::new(50.0, 2.0e-5)?;

    let analysis = CurveAnalyzer::default().analyze(&samples, &constants)?;

    println!("max stress = {:.1} MPa", analysis.metrics.max_stress_mpa);
    if let Some(modulus) = analysis.metrics.elastic_modulus_mpa {
        println!("E = {:.0} MPa", modulus);
    }
    if let Some(fracture) = analysis.fracture_point {
        println!(
            "fracture at strain {:.4}, stress {:.1} MPa",
            fracture.strain, fracture.stress
        );
    }

    Ok(())
}
