//! Least-squares polynomial fitting and root finding
//!
//! Fits run on a rescaled abscissa `t = (x - offset) / scale` with `t` in
//! `[0, 1]` so the Vandermonde system stays well conditioned for depths in
//! the hundreds of meters. Roots of the fitted polynomial (or its derivative)
//! come from the eigenvalues of the companion matrix.

use nalgebra::{Complex, DMatrix, DVector};

use crate::types::AnalysisError;

/// Singular values below this fraction of the largest are treated as zero.
const SVD_EPS: f64 = 1e-12;

/// Leading coefficients smaller than this (relative) are trimmed before root finding.
const LEADING_EPS: f64 = 1e-12;

/// Derivative coefficients below this fraction of the fitted polynomial's
/// largest coefficient are round-off from the least-squares solve.
const NEGLIGIBLE_SLOPE: f64 = 1e-9;

/// Polynomial with coefficients in ascending order: `c[0] + c[1] t + c[2] t² + ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<f64>) -> Self {
        Self { coeffs }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Nominal degree (number of coefficients minus one).
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Horner evaluation.
    pub fn eval(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    /// Largest absolute coefficient.
    pub fn magnitude(&self) -> f64 {
        self.coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()))
    }

    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &c)| c * k as f64)
            .collect();
        Self { coeffs }
    }

    /// All complex roots.
    ///
    /// Negligible leading coefficients are dropped first, so a cubic whose
    /// top term vanished is solved as a quadratic. Constant polynomials have
    /// no roots.
    pub fn roots(&self) -> Vec<Complex<f64>> {
        self.roots_above(LEADING_EPS * self.magnitude())
    }

    /// Roots after dropping every leading coefficient whose magnitude is at
    /// most `threshold`. A polynomial trimmed down to a constant has no roots.
    pub fn roots_above(&self, threshold: f64) -> Vec<Complex<f64>> {
        let mut coeffs = self.coeffs.as_slice();
        while let Some((&lead, rest)) = coeffs.split_last() {
            if lead.abs() > threshold {
                break;
            }
            coeffs = rest;
        }
        let n = coeffs.len().saturating_sub(1);
        match n {
            0 => Vec::new(),
            1 => vec![Complex::new(-coeffs[0] / coeffs[1], 0.0)],
            _ => {
                let lead = coeffs[n];
                // Companion matrix of the monic polynomial
                let companion = DMatrix::from_fn(n, n, |i, j| {
                    if j == n - 1 {
                        -coeffs[i] / lead
                    } else if i == j + 1 {
                        1.0
                    } else {
                        0.0
                    }
                });
                companion.complex_eigenvalues().iter().copied().collect()
            }
        }
    }
}

/// Least-squares fit of degree `order` through `(xs, ys)` in the raw abscissa.
pub fn fit_polynomial(xs: &[f64], ys: &[f64], order: usize) -> Result<Polynomial, AnalysisError> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::FitFailed(format!(
            "{} abscissae for {} ordinates",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < order + 1 {
        return Err(AnalysisError::FitFailed(format!(
            "degree {order} needs at least {} points, got {}",
            order + 1,
            xs.len()
        )));
    }
    let vandermonde = DMatrix::from_fn(xs.len(), order + 1, |i, j| xs[i].powi(j as i32));
    let rhs = DVector::from_column_slice(ys);
    let solution = vandermonde
        .svd(true, true)
        .solve(&rhs, SVD_EPS)
        .map_err(|e| AnalysisError::FitFailed(e.to_string()))?;
    if solution.iter().any(|c| !c.is_finite()) {
        return Err(AnalysisError::FitFailed(
            "least-squares solution is not finite".to_string(),
        ));
    }
    Ok(Polynomial::new(solution.iter().copied().collect()))
}

/// Polynomial fitted on the rescaled abscissa, with the mapping back to `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFit {
    poly: Polynomial,
    offset: f64,
    scale: f64,
}

impl ScaledFit {
    /// Fit `ys` against `xs` after mapping `xs` onto `[0, 1]`.
    pub fn fit(xs: &[f64], ys: &[f64], order: usize) -> Result<Self, AnalysisError> {
        let (Some(&first), Some(&last)) = (xs.first(), xs.last()) else {
            return Err(AnalysisError::FitFailed("no points to fit".to_string()));
        };
        let scale = last - first;
        if scale <= 0.0 {
            return Err(AnalysisError::FitFailed(format!(
                "abscissa range [{first}, {last}] is empty"
            )));
        }
        let ts: Vec<f64> = xs.iter().map(|x| (x - first) / scale).collect();
        let poly = fit_polynomial(&ts, ys, order)?;
        Ok(Self { poly, offset: first, scale })
    }

    pub const fn polynomial(&self) -> &Polynomial {
        &self.poly
    }

    pub fn order(&self) -> usize {
        self.poly.degree()
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.poly.eval(self.to_unit(x))
    }

    /// Roots of the derivative, mapped back to `x`.
    ///
    /// Each root keeps its imaginary part (rescaled) so callers can decide
    /// which ones count as real. Derivative terms that are negligible next to
    /// the fitted values are ignored, so a flat fit has no critical points.
    pub fn critical_points(&self) -> Vec<Complex<f64>> {
        let threshold = NEGLIGIBLE_SLOPE * self.poly.magnitude();
        self.poly
            .derivative()
            .roots_above(threshold)
            .into_iter()
            .map(|r| Complex::new(self.offset + r.re * self.scale, r.im * self.scale))
            .collect()
    }

    fn to_unit(&self, x: f64) -> f64 {
        (x - self.offset) / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_recovers_exact_quadratic() {
        let xs: Vec<f64> = (0..8_i32).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 - 3.0 * x + 0.5 * x * x).collect();
        let poly = fit_polynomial(&xs, &ys, 2).unwrap();
        let c = poly.coefficients();
        assert!((c[0] - 2.0).abs() < 1e-8);
        assert!((c[1] + 3.0).abs() < 1e-8);
        assert!((c[2] - 0.5).abs() < 1e-8);
    }

    #[test]
    fn test_fit_rejects_too_few_points() {
        let err = fit_polynomial(&[0.0, 1.0], &[1.0, 2.0], 3).unwrap_err();
        assert!(matches!(err, AnalysisError::FitFailed(_)));
    }

    #[test]
    fn test_derivative_and_eval() {
        // 1 + 2t + 3t²
        let p = Polynomial::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(p.eval(2.0), 17.0);
        assert_eq!(p.derivative().coefficients(), &[2.0, 6.0]);
    }

    #[test]
    fn test_roots_of_cubic() {
        // (t - 1)(t - 2)(t - 3) = -6 + 11t - 6t² + t³
        let p = Polynomial::new(vec![-6.0, 11.0, -6.0, 1.0]);
        let mut re: Vec<f64> = p.roots().iter().map(|r| r.re).collect();
        re.sort_by(f64::total_cmp);
        for (got, want) in re.iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-8, "root {got} != {want}");
        }
    }

    #[test]
    fn test_complex_roots_have_imaginary_part() {
        // t² + 1
        let roots = Polynomial::new(vec![1.0, 0.0, 1.0]).roots();
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|r| (r.im.abs() - 1.0).abs() < 1e-8));
    }

    #[test]
    fn test_vanishing_leading_term_is_trimmed() {
        let roots = Polynomial::new(vec![-4.0, 2.0, 0.0]).roots();
        assert_eq!(roots.len(), 1);
        assert!((roots[0].re - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_off_derivative_has_no_roots() {
        let p = Polynomial::new(vec![50.0, 3e-13, -4e-13, 2e-13]);
        assert_eq!(p.derivative().roots().len(), 2, "noise alone looks like a quadratic");
        assert!(p.derivative().roots_above(1e-9 * p.magnitude()).is_empty());
    }

    #[test]
    fn test_flat_fit_has_no_critical_points() {
        let xs = [10.0, 20.0, 30.0, 40.0, 50.0];
        let fit = ScaledFit::fit(&xs, &[50.0; 5], 3).unwrap();
        assert!(fit.critical_points().is_empty());
    }

    #[test]
    fn test_scaled_fit_critical_point_in_raw_units() {
        // Parabola with its vertex at x = 60
        let xs: Vec<f64> = (0..9_i32).map(|i| 20.0 + 10.0 * f64::from(i)).collect();
        let ys: Vec<f64> = xs.iter().map(|x| (x - 60.0).powi(2) + 40.0).collect();
        let fit = ScaledFit::fit(&xs, &ys, 2).unwrap();
        let points = fit.critical_points();
        assert_eq!(points.len(), 1);
        assert!((points[0].re - 60.0).abs() < 1e-6);
        assert!((fit.eval(60.0) - 40.0).abs() < 1e-6);
    }
}
