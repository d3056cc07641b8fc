//! Electrical survey methods
//!
//! Each method bundles the survey configuration with the analysis it runs,
//! and exposes the same entry points:
//!
//! 1. **ResistivityProfiling** (ERP) - conductive zone and its features
//! 2. **VerticalSounding** (VES) - fractured zone and ohmic area
//!
//! `fit` works on an already built curve, `fit_table` builds the curve from
//! a raw table first, and `fit_batch` runs `fit_table` over many tables in
//! parallel.

mod erp;
mod ves;

pub use erp::{ErpFit, ResistivityProfiling};
pub use ves::VerticalSounding;

use rayon::prelude::*;

use crate::acquisition::RawTable;
use crate::types::{AnalysisError, CurveKind};

/// Trait for electrical survey methods
pub trait ElectricalMethod: Send + Sync {
    /// Curve family this method consumes
    type Curve;
    /// Analysis record this method produces
    type Output: Send;

    fn kind(&self) -> CurveKind;

    /// Analyze a validated curve.
    fn fit(&self, curve: &Self::Curve) -> Result<Self::Output, AnalysisError>;

    /// Build the curve from a raw table, then analyze it.
    fn fit_table(&self, table: &RawTable) -> Result<Self::Output, AnalysisError>;

    /// Analyze independent tables in parallel; results keep the input order.
    fn fit_batch(&self, tables: &[RawTable]) -> Vec<Result<Self::Output, AnalysisError>> {
        tables.par_iter().map(|t| self.fit_table(t)).collect()
    }
}
