//! Vertical Electrical Sounding (VES)
//!
//! The deep part of a sounding curve (AB/2 beyond `from_s`) is fitted with a
//! least-squares polynomial. Real roots of its derivative mark where the
//! apparent resistivity turns, and split the window into segments whose
//! integrated resistivity ("ohmic area") indicates how fractured, and so how
//! water-bearing, the formation is.

mod analyzer;

pub use analyzer::VesCurveAnalyzer;
