//! Conductive zone detection
//!
//! The conductive zone is the valley around the lowest resistivity of a
//! profile: starting from the minimum, the zone grows left and right while
//! the values keep rising away from it, and stops at the first station where
//! the curve turns back down (or at the profile boundary).

use tracing::debug;

use crate::types::{AnalysisError, ConductiveZone, ErpCurve, MIN_CURVE_SAMPLES};

/// Locates the conductive zone of a resistivity profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConductiveZoneDetector;

impl ConductiveZoneDetector {
    pub const fn new() -> Self {
        Self
    }

    /// Zone around the global minimum (first occurrence on ties).
    pub fn detect(&self, curve: &ErpCurve) -> Result<ConductiveZone, AnalysisError> {
        let values = curve.values();
        check_variation(&values)?;
        let anchor = argmin(&values);
        let (start, end) = expand_valley(&values, anchor);
        debug!(anchor, start, end, "Conductive zone detected");
        ConductiveZone::new(start, end, values.len())
    }

    /// Zone around a caller-chosen station index.
    pub fn detect_at(
        &self,
        curve: &ErpCurve,
        index: usize,
    ) -> Result<ConductiveZone, AnalysisError> {
        let values = curve.values();
        if index >= values.len() {
            return Err(AnalysisError::InvalidStation(format!(
                "station index {index} is outside a {}-station profile",
                values.len()
            )));
        }
        check_variation(&values)?;
        let (start, end) = expand_valley(&values, index);
        debug!(anchor = index, start, end, "Conductive zone detected at selected station");
        ConductiveZone::new(start, end, values.len())
    }
}

fn check_variation(values: &[f64]) -> Result<(), AnalysisError> {
    if values.len() < MIN_CURVE_SAMPLES {
        return Err(AnalysisError::DegenerateCurve {
            reason: format!("profile holds {} stations", values.len()),
        });
    }
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if hi - lo <= f64::EPSILON * hi.abs().max(1.0) {
        return Err(AnalysisError::DegenerateCurve {
            reason: "profile is flat, no conductive zone".to_string(),
        });
    }
    Ok(())
}

/// Index of the smallest value, first occurrence on ties.
pub(crate) fn argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v < values[best] {
            best = i;
        }
    }
    best
}

/// Grow `[anchor, anchor]` outward while values do not decrease away from the anchor.
pub(crate) fn expand_valley(values: &[f64], anchor: usize) -> (usize, usize) {
    let mut start = anchor;
    while start > 0 && values[start - 1] >= values[start] {
        start -= 1;
    }
    let mut end = anchor;
    while end + 1 < values.len() && values[end + 1] >= values[end] {
        end += 1;
    }
    (start, end)
}

/// Start indices of the strict local-minimum runs strictly inside the profile.
///
/// A run of equal values counts once, anchored at its first index.
pub(crate) fn interior_minima(values: &[f64]) -> Vec<usize> {
    let mut minima = Vec::new();
    let mut i = 1;
    while i + 1 < values.len() {
        let mut j = i;
        while j + 1 < values.len() && values[j + 1] == values[i] {
            j += 1;
        }
        let is_min = j + 1 < values.len() && values[i - 1] > values[i] && values[j + 1] > values[i];
        if is_min {
            minima.push(i);
        }
        i = j + 1;
    }
    minima
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(values: &[f64]) -> ErpCurve {
        let positions: Vec<f64> = (0..values.len()).map(|i| i as f64 * 10.0).collect();
        ErpCurve::from_parts(&positions, values).unwrap()
    }

    #[test]
    fn test_zone_stops_at_first_rise() {
        let curve = profile(&[90.0, 100.0, 80.0, 60.0, 40.0, 70.0, 95.0, 85.0]);
        let zone = ConductiveZoneDetector::new().detect(&curve).unwrap();
        assert_eq!((zone.start(), zone.end()), (1, 6));
    }

    #[test]
    fn test_minimum_at_boundary_gives_one_sided_zone() {
        let curve = profile(&[20.0, 40.0, 60.0, 50.0]);
        let zone = ConductiveZoneDetector::new().detect(&curve).unwrap();
        assert_eq!((zone.start(), zone.end()), (0, 2));
    }

    #[test]
    fn test_flat_profile_is_degenerate() {
        let curve = profile(&[50.0, 50.0, 50.0, 50.0]);
        let err = ConductiveZoneDetector::new().detect(&curve).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateCurve { .. }));
    }

    #[test]
    fn test_detect_at_rejects_out_of_range_station() {
        let curve = profile(&[90.0, 60.0, 80.0]);
        let err = ConductiveZoneDetector::new().detect_at(&curve, 3).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidStation(_)));
    }

    #[test]
    fn test_detect_at_secondary_valley() {
        let curve = profile(&[90.0, 30.0, 80.0, 100.0, 50.0, 45.0, 70.0]);
        let zone = ConductiveZoneDetector::new().detect_at(&curve, 5).unwrap();
        assert_eq!((zone.start(), zone.end()), (3, 6));
    }

    #[test]
    fn test_interior_minima_counts_plateau_once() {
        let values = [5.0, 3.0, 3.0, 4.0, 2.0, 6.0, 1.0];
        assert_eq!(interior_minima(&values), vec![1, 4]);
    }

    #[test]
    fn test_argmin_first_occurrence() {
        assert_eq!(argmin(&[3.0, 1.0, 2.0, 1.0]), 1);
    }
}
