//! Resistivity curves: station-indexed profiles (ERP) and depth-indexed soundings (VES)

use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// Minimum number of samples a curve must hold.
pub const MIN_CURVE_SAMPLES: usize = 3;

/// Which family of field curve a table describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// Electrical resistivity profiling
    Erp,
    /// Vertical electrical sounding
    Ves,
}

impl std::fmt::Display for CurveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveKind::Erp => write!(f, "ERP"),
            CurveKind::Ves => write!(f, "VES"),
        }
    }
}

/// One `(position, value)` pair of a curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub position: f64,
    pub value: f64,
}

impl Sample {
    pub const fn new(position: f64, value: f64) -> Self {
        Self { position, value }
    }
}

/// Coordinate pair attached to an ERP station. Metadata only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Coordinate {
    /// Projected easting / northing (meters)
    Projected { easting: f64, northing: f64 },
    /// Geographic longitude / latitude (decimal degrees)
    Geographic { longitude: f64, latitude: f64 },
}

/// Check the shared curve invariants: at least three samples, finite
/// values and strictly increasing positions.
fn validate_samples(samples: &[Sample]) -> Result<(), AnalysisError> {
    if samples.len() < MIN_CURVE_SAMPLES {
        return Err(AnalysisError::DegenerateCurve {
            reason: format!(
                "curve holds {} samples, need at least {MIN_CURVE_SAMPLES}",
                samples.len()
            ),
        });
    }
    for (i, pair) in samples.windows(2).enumerate() {
        let increasing = pair[1].position > pair[0].position;
        if !increasing {
            return Err(AnalysisError::NonMonotonicPosition {
                index: i + 1,
                previous: pair[0].position,
                current: pair[1].position,
            });
        }
    }
    Ok(())
}

// ============================================================================
// ERP
// ============================================================================

/// Apparent resistivity measured at stations along a survey line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErpCurve {
    samples: Vec<Sample>,
    coordinates: Option<Vec<Coordinate>>,
}

impl ErpCurve {
    /// Build a profile from samples, rejecting short, unordered or negative data.
    pub fn new(samples: Vec<Sample>) -> Result<Self, AnalysisError> {
        validate_samples(&samples)?;
        for (row, s) in samples.iter().enumerate() {
            if !s.value.is_finite() || s.value < 0.0 {
                return Err(AnalysisError::InvalidValue {
                    field: "resistivity".to_string(),
                    row,
                    value: s.value,
                });
            }
        }
        Ok(Self { samples, coordinates: None })
    }

    /// Convenience constructor from parallel position/value slices.
    pub fn from_parts(positions: &[f64], values: &[f64]) -> Result<Self, AnalysisError> {
        Self::new(zip_samples(positions, values)?)
    }

    /// Attach one coordinate per station.
    pub fn with_coordinates(mut self, coordinates: Vec<Coordinate>) -> Result<Self, AnalysisError> {
        if coordinates.len() != self.samples.len() {
            return Err(AnalysisError::DegenerateCurve {
                reason: format!(
                    "{} coordinates for {} stations",
                    coordinates.len(),
                    self.samples.len()
                ),
            });
        }
        self.coordinates = Some(coordinates);
        Ok(self)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed curve; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn coordinates(&self) -> Option<&[Coordinate]> {
        self.coordinates.as_deref()
    }

    /// Distance between the first and last station.
    pub fn span(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.position - first.position,
            _ => 0.0,
        }
    }
}

// ============================================================================
// VES
// ============================================================================

/// Apparent resistivity measured at increasing AB/2 spacing at one location.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VesCurve {
    samples: Vec<Sample>,
    mn: Option<Vec<f64>>,
    log_scaled: bool,
}

impl VesCurve {
    /// Build a sounding curve. `log_scaled` marks values as log10 resistivities.
    pub fn new(samples: Vec<Sample>, log_scaled: bool) -> Result<Self, AnalysisError> {
        validate_samples(&samples)?;
        for (row, s) in samples.iter().enumerate() {
            let invalid = !s.value.is_finite() || (!log_scaled && s.value < 0.0);
            if invalid {
                return Err(AnalysisError::InvalidValue {
                    field: "resistivity".to_string(),
                    row,
                    value: s.value,
                });
            }
        }
        Ok(Self { samples, mn: None, log_scaled })
    }

    pub fn from_parts(depths: &[f64], values: &[f64]) -> Result<Self, AnalysisError> {
        Self::new(zip_samples(depths, values)?, false)
    }

    /// Attach the MN spacing recorded with each sample.
    pub fn with_mn(mut self, mn: Vec<f64>) -> Result<Self, AnalysisError> {
        if mn.len() != self.samples.len() {
            return Err(AnalysisError::DegenerateCurve {
                reason: format!("{} MN values for {} samples", mn.len(), self.samples.len()),
            });
        }
        self.mn = Some(mn);
        Ok(self)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// AB/2 spacing of each sample.
    pub fn depths(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.position).collect()
    }

    /// Stored values, in log10 space when the curve is log-scaled.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn mn(&self) -> Option<&[f64]> {
        self.mn.as_deref()
    }

    pub const fn is_log_scaled(&self) -> bool {
        self.log_scaled
    }

    pub fn max_depth(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.position)
    }
}

/// Either curve family, as produced by the generic builder entry point.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum Curve {
    Erp(ErpCurve),
    Ves(VesCurve),
}

impl Curve {
    pub const fn kind(&self) -> CurveKind {
        match self {
            Curve::Erp(_) => CurveKind::Erp,
            Curve::Ves(_) => CurveKind::Ves,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        match self {
            Curve::Erp(c) => c.samples(),
            Curve::Ves(c) => c.samples(),
        }
    }
}

fn zip_samples(positions: &[f64], values: &[f64]) -> Result<Vec<Sample>, AnalysisError> {
    if positions.len() != values.len() {
        return Err(AnalysisError::DegenerateCurve {
            reason: format!(
                "{} positions for {} values",
                positions.len(),
                values.len()
            ),
        });
    }
    Ok(positions
        .iter()
        .zip(values)
        .map(|(&p, &v)| Sample::new(p, v))
        .collect())
}
