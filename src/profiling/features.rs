//! Conductive zone features: type, shape, power, magnitude and sfi

use tracing::debug;

use super::zone::{argmin, expand_valley, interior_minima};
use crate::config::ProfilingConfig;
use crate::math;
use crate::types::{
    AnalysisError, AnomalyShape, AnomalyType, ConductiveZone, ErpCurve, FeatureVector,
};

/// Computes the [`FeatureVector`] of a conductive zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ErpFeatureExtractor {
    min_anomaly_magnitude: f64,
    center_tolerance: f64,
}

impl Default for ErpFeatureExtractor {
    fn default() -> Self {
        Self::from_config(&ProfilingConfig::default())
    }
}

impl ErpFeatureExtractor {
    pub fn new(min_anomaly_magnitude: f64, center_tolerance: f64) -> Self {
        Self {
            min_anomaly_magnitude,
            center_tolerance,
        }
    }

    pub fn from_config(config: &ProfilingConfig) -> Self {
        Self::new(config.min_anomaly_magnitude, config.center_tolerance)
    }

    /// Extract the features of `zone` on `curve`.
    ///
    /// Pure: the same inputs always give the same vector. Fails only when the
    /// zone does not fit the curve.
    pub fn extract(
        &self,
        curve: &ErpCurve,
        zone: &ConductiveZone,
    ) -> Result<FeatureVector, AnalysisError> {
        let values = curve.values();
        let positions = curve.positions();
        if zone.start() > zone.end() || zone.end() >= values.len() {
            return Err(AnalysisError::DegenerateCurve {
                reason: format!(
                    "zone [{}, {}] exceeds a {}-station profile",
                    zone.start(),
                    zone.end(),
                    values.len()
                ),
            });
        }

        let zone_values = &values[zone.start()..=zone.end()];
        let power = positions[zone.end()] - positions[zone.start()];
        let magnitude = math::max(zone_values) - math::min(zone_values);
        let best_station_index = zone.start() + argmin(zone_values);

        let span = curve.span();
        let mean = math::mean(&values);
        let sfi = if span > 0.0 && mean > 0.0 {
            ((magnitude / mean) * (power / span)).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let shape = classify_shape(zone_values);
        let anomaly_type = self.classify_type(&values, &positions, zone, magnitude);

        debug!(
            start = zone.start(),
            end = zone.end(),
            power,
            magnitude,
            sfi,
            %shape,
            %anomaly_type,
            "Conductive zone features extracted"
        );

        Ok(FeatureVector {
            anomaly_type,
            shape,
            power,
            magnitude,
            sfi,
            best_station_index,
        })
    }

    fn classify_type(
        &self,
        values: &[f64],
        positions: &[f64],
        zone: &ConductiveZone,
        magnitude: f64,
    ) -> AnomalyType {
        if magnitude < self.min_anomaly_magnitude {
            return AnomalyType::NC;
        }
        if zone.touches_boundary(values.len()) {
            return AnomalyType::CB;
        }

        // Other valleys of the profile deep enough to count as anomalies
        let competitors = interior_minima(values)
            .into_iter()
            .filter(|&m| !zone.contains(m))
            .filter(|&m| {
                let (s, e) = expand_valley(values, m);
                let bracket = &values[s..=e];
                math::max(bracket) - math::min(bracket) >= self.min_anomaly_magnitude
            })
            .count();

        let first = positions[0];
        let last = positions[positions.len() - 1];
        let span = last - first;
        let midpoint = (first + last) / 2.0;
        let centre = (positions[zone.start()] + positions[zone.end()]) / 2.0;
        let centred = (centre - midpoint).abs() <= self.center_tolerance * span;

        if competitors == 0 && centred {
            AnomalyType::EC
        } else {
            AnomalyType::CP
        }
    }
}

/// Shape of the zone values, read on their run-length-compressed form.
pub fn classify_shape(zone_values: &[f64]) -> AnomalyShape {
    // (value, run length)
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &v in zone_values {
        match runs.last_mut() {
            Some((last, len)) if *last == v => *len += 1,
            _ => runs.push((v, 1)),
        }
    }

    let Some(&(first, _)) = runs.first() else {
        return AnomalyShape::C;
    };
    let last = runs[runs.len() - 1].0;

    if runs.len() == 1 {
        return if zone_values.len() >= 3 { AnomalyShape::M } else { AnomalyShape::C };
    }

    let minima: Vec<usize> = (1..runs.len() - 1)
        .filter(|&i| runs[i - 1].0 > runs[i].0 && runs[i + 1].0 > runs[i].0)
        .collect();

    match minima.as_slice() {
        [] => {
            if runs.windows(2).all(|w| w[1].0 > w[0].0) {
                AnomalyShape::K
            } else if runs.windows(2).all(|w| w[1].0 < w[0].0) {
                AnomalyShape::H
            } else {
                AnomalyShape::C
            }
        }
        [i] => {
            let (value, len) = runs[*i];
            if len >= 2 {
                AnomalyShape::M
            } else if value < first && value < last {
                AnomalyShape::V
            } else {
                AnomalyShape::C
            }
        }
        [_, _] => AnomalyShape::W,
        _ => AnomalyShape::C,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(values: &[f64]) -> ErpCurve {
        let positions: Vec<f64> = (0..values.len()).map(|i| i as f64 * 10.0).collect();
        ErpCurve::from_parts(&positions, values).unwrap()
    }

    #[test]
    fn test_shape_v() {
        assert_eq!(classify_shape(&[100.0, 60.0, 30.0, 70.0]), AnomalyShape::V);
    }

    #[test]
    fn test_shape_w() {
        assert_eq!(classify_shape(&[100.0, 40.0, 80.0, 35.0, 90.0]), AnomalyShape::W);
    }

    #[test]
    fn test_shape_k_and_h() {
        assert_eq!(classify_shape(&[20.0, 40.0, 60.0]), AnomalyShape::K);
        assert_eq!(classify_shape(&[60.0, 40.0, 20.0]), AnomalyShape::H);
    }

    #[test]
    fn test_shape_m_plateau() {
        assert_eq!(classify_shape(&[100.0, 30.0, 30.0, 30.0, 90.0]), AnomalyShape::M);
        assert_eq!(classify_shape(&[50.0, 50.0, 50.0]), AnomalyShape::M);
    }

    #[test]
    fn test_shape_c_fallback() {
        assert_eq!(classify_shape(&[20.0, 80.0, 30.0]), AnomalyShape::C);
    }

    #[test]
    fn test_centred_single_anomaly_is_ec() {
        let curve = profile(&[200.0, 190.0, 185.0, 120.0, 60.0, 110.0, 180.0, 190.0, 200.0]);
        let zone = ConductiveZone::new(1, 7, curve.len()).unwrap();
        let features = ErpFeatureExtractor::default().extract(&curve, &zone).unwrap();
        assert_eq!(features.anomaly_type, AnomalyType::EC);
        assert_eq!(features.best_station_index, 4);
        assert_eq!(features.power, 60.0);
        assert_eq!(features.magnitude, 130.0);
    }

    #[test]
    fn test_boundary_zone_is_cb() {
        let curve = profile(&[20.0, 40.0, 60.0, 50.0, 70.0]);
        let zone = ConductiveZone::new(0, 2, curve.len()).unwrap();
        let features = ErpFeatureExtractor::default().extract(&curve, &zone).unwrap();
        assert_eq!(features.anomaly_type, AnomalyType::CB);
        assert_eq!(features.shape, AnomalyShape::K);
    }

    #[test]
    fn test_shallow_zone_is_nc() {
        let curve = profile(&[100.0, 98.0, 95.0, 99.0, 100.0]);
        let zone = ConductiveZone::new(0, 4, curve.len()).unwrap();
        let features = ErpFeatureExtractor::default().extract(&curve, &zone).unwrap();
        assert_eq!(features.anomaly_type, AnomalyType::NC);
    }

    #[test]
    fn test_zone_beyond_curve_is_rejected() {
        let curve = profile(&[100.0, 50.0, 90.0]);
        let zone = ConductiveZone::new(0, 5, 10).unwrap();
        assert!(ErpFeatureExtractor::default().extract(&curve, &zone).is_err());
    }
}
