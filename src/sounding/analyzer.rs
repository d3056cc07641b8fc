//! Fractured-zone segmentation of a sounding curve

use tracing::{debug, warn};

use crate::config::SoundingConfig;
use crate::math::{self, ScaledFit};
use crate::types::{
    AnalysisError, Diagnostic, DiagnosticKind, FractureSegment, VesAnalysis, VesCurve,
};

/// Fewest samples a window may hold before the analysis gives up.
const MIN_WINDOW_SAMPLES: usize = 2;

/// Segments the deep part of a sounding curve and integrates its ohmic area.
#[derive(Debug, Clone, PartialEq)]
pub struct VesCurveAnalyzer {
    imaginary_tolerance: f64,
}

impl Default for VesCurveAnalyzer {
    fn default() -> Self {
        Self::from_config(&SoundingConfig::default())
    }
}

impl VesCurveAnalyzer {
    /// `imaginary_tolerance` is relative to the window width.
    pub const fn new(imaginary_tolerance: f64) -> Self {
        Self { imaginary_tolerance }
    }

    pub const fn from_config(config: &SoundingConfig) -> Self {
        Self::new(config.imaginary_tolerance)
    }

    /// Analyze the samples at AB/2 >= `from_s` with a fit of degree `order`.
    pub fn analyze(
        &self,
        curve: &VesCurve,
        from_s: f64,
        order: usize,
    ) -> Result<VesAnalysis, AnalysisError> {
        if order == 0 {
            return Err(AnalysisError::FitFailed(
                "polynomial order must be at least 1".to_string(),
            ));
        }

        let window: Vec<(f64, f64)> = curve
            .samples()
            .iter()
            .filter(|s| s.position >= from_s)
            .map(|s| (s.position, s.value))
            .collect();
        if window.len() < MIN_WINDOW_SAMPLES {
            return Err(AnalysisError::DegenerateCurve {
                reason: format!(
                    "{} samples at AB/2 >= {from_s} m, need at least {MIN_WINDOW_SAMPLES}",
                    window.len()
                ),
            });
        }
        let (depths, stored): (Vec<f64>, Vec<f64>) = window.into_iter().unzip();

        let mut diagnostics = Vec::new();
        let fit_order = if depths.len() < order + 1 {
            let reduced = (depths.len() - 1).max(1);
            warn!(
                requested = order,
                used = reduced,
                samples = depths.len(),
                from_s,
                "Sounding window too small for requested order, fit order reduced"
            );
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::DegradedFitOrder,
                format!("order {order} reduced to {reduced} for {} samples", depths.len()),
            ));
            reduced
        } else {
            order
        };

        let fit = ScaledFit::fit(&depths, &stored, fit_order)?;

        let first = depths[0];
        let last = depths[depths.len() - 1];
        let width = last - first;
        let mut roots: Vec<f64> = Vec::new();
        for root in fit.critical_points() {
            if root.im.abs() > self.imaginary_tolerance * width {
                debug!(re = root.re, im = root.im, "Complex derivative root discarded");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::DiscardedRoot,
                    format!("complex root {:.4}{:+.4}i", root.re, root.im),
                ));
            } else if root.re <= first || root.re >= last {
                debug!(root = root.re, first, last, "Derivative root outside window discarded");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::DiscardedRoot,
                    format!("root {:.4} outside window ({first}, {last})", root.re),
                ));
            } else {
                roots.push(root.re);
            }
        }
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|a, b| (*a - *b).abs() <= 1e-9 * width);

        let resistivity: Vec<f64> = if curve.is_log_scaled() {
            stored.iter().copied().map(math::inverse_log10).collect()
        } else {
            stored
        };

        let mut bounds = Vec::with_capacity(roots.len() + 2);
        bounds.push(first);
        bounds.extend_from_slice(&roots);
        bounds.push(last);
        let segments: Vec<FractureSegment> = bounds
            .windows(2)
            .map(|b| FractureSegment {
                bounds: (b[0], b[1]),
                area: math::integrate_between(&depths, &resistivity, b[0], b[1]),
            })
            .collect();
        let ohmic_area: f64 = segments.iter().map(|s| s.area).sum();

        debug!(
            from_s,
            fit_order,
            roots = roots.len(),
            ohmic_area,
            "Sounding curve analyzed"
        );

        Ok(VesAnalysis {
            roots,
            segments,
            ohmic_area,
            fractured_zone: depths,
            fractured_zone_resistivity: resistivity,
            fit_order,
            diagnostics,
        })
    }
}
