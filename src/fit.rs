//! Least-squares line fit used for the elastic modulus estimate.

use nalgebra::DVector;

/// Straight line `y = slope * x + intercept` fitted by ordinary least squares.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Coefficient of determination; 1.0 for a perfect fit.
    pub r_squared: f64,
}

impl LinearFit {
    /// Fit a line through the paired points.
    ///
    /// Returns `None` with fewer than two points or when every `x` is equal.
    ///
    /// # Examples
    /// ```
    /// use tensilex::LinearFit;
    ///
    /// let fit = LinearFit::fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).expect("line fits");
    /// assert!((fit.slope - 2.0).abs() < 1.0e-12);
    /// assert!((fit.intercept - 1.0).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub fn fit(x: &[f64], y: &[f64]) -> Option<Self> {
        let n = x.len().min(y.len());
        if n < 2 {
            return None;
        }
        let x = DVector::from_column_slice(&x[..n]);
        let y = DVector::from_column_slice(&y[..n]);
        let x_mean = x.mean();
        let y_mean = y.mean();

        // Centre both axes so tiny strains do not swamp the normal equations.
        let dx = x.add_scalar(-x_mean);
        let dy = y.add_scalar(-y_mean);
        let sxx = dx.norm_squared();
        if sxx == 0.0 || !sxx.is_finite() {
            return None;
        }
        let slope = dx.dot(&dy) / sxx;
        let intercept = y_mean - slope * x_mean;

        let residuals = &dy - &dx * slope;
        let syy = dy.norm_squared();
        let r_squared = if syy == 0.0 {
            1.0
        } else {
            1.0 - residuals.norm_squared() / syy
        };

        Some(Self {
            slope,
            intercept,
            r_squared,
        })
    }
}
