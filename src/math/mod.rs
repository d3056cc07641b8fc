//! Shared numeric helpers
//!
//! Small, allocation-light routines used by both the profile and the
//! sounding analysis: averaging, piecewise-linear integration, dipole
//! rounding and log10 inversion. Polynomial fitting lives in [`polynomial`].

pub mod polynomial;

pub use polynomial::{fit_polynomial, Polynomial, ScaledFit};

use statrs::statistics::Statistics;

/// Grade (m) that dipole lengths are rounded to.
pub const DIPOLE_GRADE: f64 = 5.0;

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    Statistics::mean(values)
}

/// Smallest value, `NaN` for an empty slice.
pub fn min(values: &[f64]) -> f64 {
    Statistics::min(values)
}

/// Largest value, `NaN` for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    Statistics::max(values)
}

/// Round a dipole length to the 5 m grade used in the field.
///
/// With `r = value mod 5`: `r < 3` rounds down, `3 <= r < 7` rounds up to the
/// next multiple of 5, anything else jumps by 10.
pub fn round_dipole_length(value: f64) -> f64 {
    let r = value.rem_euclid(DIPOLE_GRADE);
    let graded = if r < 3.0 {
        value - r
    } else if r < 7.0 {
        value - r + DIPOLE_GRADE
    } else {
        value - r + 10.0
    };
    graded.round()
}

/// Undo a log10 transform.
pub fn inverse_log10(value: f64) -> f64 {
    10f64.powf(value)
}

/// Trapezoidal integral of `ys` over `xs`.
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
        .sum()
}

/// Linear interpolation of the polyline `(xs, ys)` at `x`.
///
/// `xs` must be ascending; `x` outside the range is clamped to the end values.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return f64::NAN;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    // First index with xs[i] >= x; x is strictly inside the range here
    let i = xs[..n].partition_point(|&v| v < x);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Trapezoidal integral of the piecewise-linear interpolant between `lo` and `hi`.
///
/// Breakpoints strictly inside `(lo, hi)` are kept, so adjacent intervals
/// sharing a bound sum to the integral over their union.
pub fn integrate_between(xs: &[f64], ys: &[f64], lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    let mut px = vec![lo];
    let mut py = vec![interpolate(xs, ys, lo)];
    for (&x, &y) in xs.iter().zip(ys) {
        if x > lo && x < hi {
            px.push(x);
            py.push(y);
        }
    }
    px.push(hi);
    py.push(interpolate(xs, ys, hi));
    trapezoid(&px, &py)
}
