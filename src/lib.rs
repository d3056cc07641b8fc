//! resfeat: Geo-electrical feature extraction
//!
//! Extracts the features used to rank groundwater drilling sites from two
//! families of resistivity field curves.
//!
//! ## Architecture
//!
//! - **Schema**: normalizes arbitrary column headers to canonical fields
//! - **Acquisition**: builds validated curves from raw tables
//! - **Profiling (ERP)**: conductive zone detection and its features
//! - **Sounding (VES)**: fractured zone segmentation and ohmic area
//! - **Methods**: `ResistivityProfiling` / `VerticalSounding` entry points
//!
//! ## Example
//!
//! ```ignore
//! use resfeat::{ElectricalMethod, FeatureConfig, RawTable, ResistivityProfiling};
//!
//! let config = FeatureConfig::load();
//! let erp = ResistivityProfiling::from_config(&config)?;
//! let table = RawTable::from_columns([("pk", stations), ("rho", resistivity)]);
//! let fit = erp.fit_table(&table)?;
//! println!("drill at {} ({})", fit.best_station, fit.features.anomaly_type);
//! ```
//!
//! The crate emits `tracing` events but never installs a subscriber.

pub mod acquisition;
pub mod config;
pub mod math;
pub mod methods;
pub mod profiling;
pub mod schema;
pub mod sounding;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, FeatureConfig};

// Re-export commonly used types
pub use types::{
    AnalysisError, AnomalyShape, AnomalyType, Arrangement, ConductiveZone, Curve, CurveKind,
    Diagnostic, DiagnosticKind, ErpCurve, FeatureVector, FractureSegment, Sample, VesAnalysis,
    VesCurve,
};

// Re-export pipeline components
pub use acquisition::{Built, CurveBuilder, RawTable};
pub use methods::{ElectricalMethod, ErpFit, ResistivityProfiling, VerticalSounding};
pub use profiling::{ConductiveZoneDetector, ErpFeatureExtractor};
pub use schema::{CanonicalField, SchemaKind, SchemaNormalizer};
pub use sounding::VesCurveAnalyzer;
