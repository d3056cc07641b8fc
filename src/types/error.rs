//! Fatal analysis errors
//!
//! Recoverable conditions (dropped headers, degraded fit order, discarded
//! roots) are never errors; they travel as [`super::Diagnostic`] values.

use thiserror::Error;

use super::CurveKind;
use crate::schema::CanonicalField;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("{kind} table is missing mandatory fields: {}", format_fields(.missing))]
    SchemaMismatch {
        kind: CurveKind,
        missing: Vec<CanonicalField>,
    },

    #[error(
        "Positions must be strictly increasing: sample {index} at {current} follows {previous}"
    )]
    NonMonotonicPosition {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Degenerate curve: {reason}")]
    DegenerateCurve { reason: String },

    #[error("Invalid {field} value {value} at row {row}")]
    InvalidValue {
        field: String,
        row: usize,
        value: f64,
    },

    #[error("Invalid station selection: {0}")]
    InvalidStation(String),

    #[error("Polynomial fit failed: {0}")]
    FitFailed(String),
}

fn format_fields(fields: &[CanonicalField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
