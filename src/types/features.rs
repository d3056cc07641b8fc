//! Feature records produced by profile and sounding analysis
//!
//! All records are plain immutable values: once returned by a detector,
//! extractor or analyzer they carry no behavior beyond accessors, and are
//! serializable for reporting and export collaborators.

use serde::{Deserialize, Serialize};

use super::{AnalysisError, Diagnostic};

// ============================================================================
// Conductive zone (ERP)
// ============================================================================

/// Contiguous station range `[start, end]` of a profile holding the target anomaly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "ZoneBounds")]
pub struct ConductiveZone {
    start: usize,
    end: usize,
}

/// Unchecked wire form of a [`ConductiveZone`].
#[derive(Deserialize)]
struct ZoneBounds {
    start: usize,
    end: usize,
}

impl TryFrom<ZoneBounds> for ConductiveZone {
    type Error = String;

    fn try_from(bounds: ZoneBounds) -> Result<Self, Self::Error> {
        let ZoneBounds { start, end } = bounds;
        if start > end {
            return Err(format!("zone start {start} is after its end {end}"));
        }
        Ok(Self { start, end })
    }
}

impl ConductiveZone {
    /// Create a zone over a curve of `curve_len` samples.
    ///
    /// Enforces `start <= end < curve_len`.
    pub fn new(start: usize, end: usize, curve_len: usize) -> Result<Self, AnalysisError> {
        if start > end || end >= curve_len {
            return Err(AnalysisError::DegenerateCurve {
                reason: format!(
                    "zone [{start}, {end}] is not a valid range of a {curve_len}-sample curve"
                ),
            });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of stations in the zone.
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A zone always holds at least one station.
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    /// True when the zone reaches the first or last station of the curve.
    pub const fn touches_boundary(&self, curve_len: usize) -> bool {
        self.start == 0 || self.end + 1 == curve_len
    }
}

/// Geometric signature of the anomaly inside a conductive zone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AnomalyShape {
    /// Single interior minimum below both boundaries
    V,
    /// Two interior minima separated by a rise
    W,
    /// Resistivity rising through the zone
    K,
    /// Resistivity falling through the zone
    H,
    /// Flat plateau at the bottom of the zone
    M,
    /// Anything else
    C,
}

impl std::fmt::Display for AnomalyShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            AnomalyShape::V => "V",
            AnomalyShape::W => "W",
            AnomalyShape::K => "K",
            AnomalyShape::H => "H",
            AnomalyShape::M => "M",
            AnomalyShape::C => "C",
        };
        write!(f, "{code}")
    }
}

/// Coarse placement category of the anomaly along the profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AnomalyType {
    /// Single, well-centered conductive zone
    EC,
    /// Zone in contact with a profile boundary
    CB,
    /// Off-centre zone, or one of several qualifying anomalies
    CP,
    /// No qualifying zone: the resistivity drop is below threshold
    NC,
}

impl std::fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            AnomalyType::EC => "EC",
            AnomalyType::CB => "CB",
            AnomalyType::CP => "CP",
            AnomalyType::NC => "NC",
        };
        write!(f, "{code}")
    }
}

/// Scalar and categorical features of one conductive zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub shape: AnomalyShape,
    /// Spatial extent of the zone (m)
    pub power: f64,
    /// Resistivity drop inside the zone (ohm·m)
    pub magnitude: f64,
    /// Pseudo-fracturing index in [0, 1]
    pub sfi: f64,
    /// Curve index of the recommended drilling station
    pub best_station_index: usize,
}

// ============================================================================
// Fractured zone (VES)
// ============================================================================

/// One depth interval of the fractured-zone window and its ohmic area.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FractureSegment {
    /// `(depth_lo, depth_hi)` in meters
    pub bounds: (f64, f64),
    /// Integral of resistivity over the interval (ohm·m²)
    pub area: f64,
}

/// Result of a sounding analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VesAnalysis {
    /// Interior real roots of the fitted derivative, ascending
    pub roots: Vec<f64>,
    pub segments: Vec<FractureSegment>,
    /// Sum of all segment areas (ohm·m²)
    pub ohmic_area: f64,
    /// AB/2 depths inside the window
    pub fractured_zone: Vec<f64>,
    /// Linear resistivity at each `fractured_zone` depth
    pub fractured_zone_resistivity: Vec<f64>,
    /// Polynomial order actually used for the fit
    pub fit_order: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl VesAnalysis {
    /// Number of ohmic areas computed.
    pub fn nareas(&self) -> usize {
        self.segments.len()
    }

    pub fn area1(&self) -> Option<f64> {
        self.segments.first().map(|s| s.area)
    }

    pub fn area2(&self) -> Option<f64> {
        self.segments.get(1).map(|s| s.area)
    }

    /// Segment boundaries as `[lo, hi]` pairs.
    ///
    /// Pairs are contiguous: each one starts where the previous ended, from
    /// the first window depth to the last.
    pub fn root_pairs(&self) -> Vec<[f64; 2]> {
        self.segments
            .iter()
            .map(|s| [s.bounds.0, s.bounds.1])
            .collect()
    }

    /// Whether the fit had to run at a lower order than requested.
    pub fn is_degraded(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == super::DiagnosticKind::DegradedFitOrder)
    }
}
