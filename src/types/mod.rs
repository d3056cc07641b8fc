//! Shared data structures for geo-electrical feature extraction
//!
//! This module defines the values that flow through the pipeline:
//! - Curves: ErpCurve (station-indexed), VesCurve (depth-indexed)
//! - Survey metadata: Arrangement
//! - Profile features: ConductiveZone, FeatureVector
//! - Sounding features: FractureSegment, VesAnalysis
//! - Errors and non-fatal diagnostics

mod curve;
mod diagnostics;
mod error;
mod features;
mod survey;

pub use curve::*;
pub use diagnostics::*;
pub use error::*;
pub use features::*;
pub use survey::*;
