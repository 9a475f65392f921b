//! Threshold-based feature detectors operating on sample indices.
//!
//! The detectors only locate indices. Turning an index into chart coordinates
//! is left to [`CurveAnalyzer`](crate::CurveAnalyzer).

/// Locate the last sample of the initial linear region of the load curve.
///
/// Consecutive slopes `Δload / Δdisplacement` are accepted while they stay
/// positive and within `tolerance` (relative) of the running mean of the
/// slopes accepted before them. Returns `None` for fewer than three samples,
/// and when the very first slope is already non-positive or undefined, since a
/// single sample is not a linear region. A returned index is always at least 1.
///
/// # Examples
/// ```
/// use tensilex::elastic_limit;
///
/// let displacement = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let load = [0.0, 10.0, 20.0, 30.0, 32.0];
/// assert_eq!(elastic_limit(&displacement, &load, 0.15), Some(3));
/// ```
#[must_use]
pub fn elastic_limit(displacement: &[f64], load: &[f64], tolerance: f64) -> Option<usize> {
    let n = displacement.len().min(load.len());
    if n < 3 {
        return None;
    }

    let mut slope_sum = 0.0;
    let mut accepted = 0usize;
    let mut last = 0;
    for i in 1..n {
        let d_displacement = displacement[i] - displacement[i - 1];
        if d_displacement == 0.0 {
            break;
        }
        let slope = (load[i] - load[i - 1]) / d_displacement;
        if !(slope.is_finite() && slope > 0.0) {
            break;
        }
        if accepted > 0 {
            let mean = slope_sum / accepted as f64;
            if ((slope - mean) / mean).abs() > tolerance {
                break;
            }
        }
        slope_sum += slope;
        accepted += 1;
        last = i;
    }
    (accepted > 0).then_some(last)
}

/// Index of the first maximum of `values`, ignoring NaN.
///
/// # Examples
/// ```
/// use tensilex::peak_index;
///
/// assert_eq!(peak_index(&[1.0, 4.0, 4.0, f64::NAN, 2.0]), Some(1));
/// assert_eq!(peak_index(&[]), None);
/// ```
#[must_use]
pub fn peak_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &value) in values.iter().enumerate() {
        match best {
            Some((_, current)) if value <= current => {}
            _ if value.is_nan() => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Locate the first post-peak sample whose load falls below
/// `threshold * peak_load`.
///
/// Returns `None` when the load never collapses before the data ends, or
/// when the peak load is not positive.
///
/// # Examples
/// ```
/// use tensilex::fracture_index;
///
/// let load = [0.0, 50.0, 100.0, 90.0, 40.0, 5.0];
/// assert_eq!(fracture_index(&load, 0.5), Some(4));
/// assert_eq!(fracture_index(&load[..4], 0.5), None);
/// ```
#[must_use]
pub fn fracture_index(load: &[f64], threshold: f64) -> Option<usize> {
    let peak = peak_index(load)?;
    let peak_load = load[peak];
    if peak_load <= 0.0 {
        return None;
    }
    let limit = threshold * peak_load;
    (peak + 1..load.len()).find(|&j| load[j] < limit)
}

/// Locate the offset (proof) yield point.
///
/// Finds the first sample beyond `offset` strain that falls below the line
/// `modulus * (strain - offset)` and returns the sample just before it.
/// Returns `None` when the curve never crosses the line, when the crossing
/// is the very first sample, or when `modulus` is not positive.
///
/// # Examples
/// ```
/// use tensilex::offset_yield_index;
///
/// let strain = [0.0, 0.001, 0.002, 0.003, 0.006];
/// let stress = [0.0, 200.0, 400.0, 450.0, 460.0];
/// // The 0.2 % line reaches 800 MPa at strain 0.006, above the curve.
/// assert_eq!(offset_yield_index(&strain, &stress, 200_000.0, 0.002), Some(3));
/// ```
#[must_use]
pub fn offset_yield_index(strain: &[f64], stress: &[f64], modulus: f64, offset: f64) -> Option<usize> {
    if !(modulus.is_finite() && modulus > 0.0) {
        return None;
    }
    let crossing = strain
        .iter()
        .zip(stress)
        .position(|(&eps, &sigma)| eps > offset && sigma < modulus * (eps - offset))?;
    crossing.checked_sub(1)
}
