//! Header normalization
//!
//! Field tables arrive with whatever column names the acquisition crew or
//! spreadsheet tool produced (`"Rho_a"`, `"PK"`, `"AB/2"`, ...). The
//! [`SchemaNormalizer`] maps them onto a small set of canonical fields so the
//! curve builder can locate its columns.
//!
//! ## Matching
//!
//! 1. Lowercase the header and trim the configured strip characters
//! 2. Walk the rule table of the requested kind in declaration order
//! 3. The first field owning a token contained in the header wins
//!
//! Headers matching nothing are dropped; the output keeps input order.

mod rules;

pub use rules::{mandatory_fields, rules_for, FieldRule, ERP_RULES, FEATURE_RULES, VES_RULES};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SchemaConfig;
use crate::types::CurveKind;

/// Canonical column names shared by all loaders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    // ERP
    Station,
    Resistivity,
    Longitude,
    Latitude,
    Easting,
    Northing,
    // VES
    Ab,
    Mn,
    // Exported feature tables
    Id,
    East,
    North,
    Power,
    Magnitude,
    Shape,
    Type,
    Sfi,
    Lat,
    Lon,
    Lwi,
    OhmS,
    Geol,
    Flow,
}

impl CanonicalField {
    pub const fn as_str(self) -> &'static str {
        match self {
            CanonicalField::Station => "station",
            CanonicalField::Resistivity => "resistivity",
            CanonicalField::Longitude => "longitude",
            CanonicalField::Latitude => "latitude",
            CanonicalField::Easting => "easting",
            CanonicalField::Northing => "northing",
            CanonicalField::Ab => "AB",
            CanonicalField::Mn => "MN",
            CanonicalField::Id => "id",
            CanonicalField::East => "east",
            CanonicalField::North => "north",
            CanonicalField::Power => "power",
            CanonicalField::Magnitude => "magnitude",
            CanonicalField::Shape => "shape",
            CanonicalField::Type => "type",
            CanonicalField::Sfi => "sfi",
            CanonicalField::Lat => "lat",
            CanonicalField::Lon => "lon",
            CanonicalField::Lwi => "lwi",
            CanonicalField::OhmS => "ohmS",
            CanonicalField::Geol => "geol",
            CanonicalField::Flow => "flow",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule table to normalize against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Erp,
    Ves,
    /// Exported feature tables (one row per candidate borehole)
    Features,
}

impl From<CurveKind> for SchemaKind {
    fn from(kind: CurveKind) -> Self {
        match kind {
            CurveKind::Erp => SchemaKind::Erp,
            CurveKind::Ves => SchemaKind::Ves,
        }
    }
}

/// Maps raw header tokens to [`CanonicalField`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNormalizer {
    strip_chars: String,
}

impl Default for SchemaNormalizer {
    fn default() -> Self {
        Self::from_config(&SchemaConfig::default())
    }
}

impl SchemaNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters trimmed from both ends of a header before matching.
    pub fn with_strip_chars(strip_chars: impl Into<String>) -> Self {
        Self { strip_chars: strip_chars.into() }
    }

    pub fn from_config(config: &SchemaConfig) -> Self {
        Self::with_strip_chars(config.strip_chars.clone())
    }

    /// Canonical field for a single header, if any rule matches.
    pub fn match_header(&self, header: &str, kind: SchemaKind) -> Option<CanonicalField> {
        let lowered = header.to_lowercase();
        let cleaned = lowered.trim_matches(|c| self.strip_chars.contains(c));
        if cleaned.is_empty() {
            return None;
        }
        rules_for(kind)
            .iter()
            .find(|rule| rule.tokens.iter().any(|token| cleaned.contains(token)))
            .map(|rule| rule.field)
    }

    /// Positional mapping: one entry per input header, `None` when dropped.
    pub fn resolve<S: AsRef<str>>(
        &self,
        headers: &[S],
        kind: SchemaKind,
    ) -> Vec<Option<CanonicalField>> {
        headers
            .iter()
            .map(|h| {
                let field = self.match_header(h.as_ref(), kind);
                if field.is_none() {
                    debug!(
                        header = h.as_ref(),
                        ?kind,
                        "Header matches no canonical field, dropped"
                    );
                }
                field
            })
            .collect()
    }

    /// Canonical names of the recognized headers, in input order.
    pub fn normalize<S: AsRef<str>>(&self, headers: &[S], kind: SchemaKind) -> Vec<CanonicalField> {
        self.resolve(headers, kind).into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erp_headers_map_in_order() {
        let normalizer = SchemaNormalizer::new();
        let fields = normalizer.normalize(&["PK", "Rho_a", "Easting", "Northing"], SchemaKind::Erp);
        assert_eq!(
            fields,
            vec![
                CanonicalField::Station,
                CanonicalField::Resistivity,
                CanonicalField::Easting,
                CanonicalField::Northing,
            ]
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "resistivity" also contains the northing token "y"
        let normalizer = SchemaNormalizer::new();
        assert_eq!(
            normalizer.match_header("resistivity", SchemaKind::Erp),
            Some(CanonicalField::Resistivity)
        );
        assert_eq!(
            normalizer.match_header("Longitude", SchemaKind::Erp),
            Some(CanonicalField::Longitude)
        );
    }

    #[test]
    fn test_ves_headers() {
        let normalizer = SchemaNormalizer::new();
        let fields = normalizer.normalize(&["AB/2", "MN/2", "rhoa"], SchemaKind::Ves);
        assert_eq!(
            fields,
            vec![CanonicalField::Ab, CanonicalField::Mn, CanonicalField::Resistivity]
        );
        assert_eq!(normalizer.match_header("Depth", SchemaKind::Ves), Some(CanonicalField::Ab));
    }

    #[test]
    fn test_empty_and_stripped_headers() {
        let normalizer = SchemaNormalizer::new();
        assert_eq!(normalizer.match_header("", SchemaKind::Erp), None);
        assert_eq!(normalizer.match_header(" __ ", SchemaKind::Erp), None);
        assert_eq!(
            normalizer.match_header("  _Rho-", SchemaKind::Erp),
            Some(CanonicalField::Resistivity)
        );
    }

    #[test]
    fn test_resolve_keeps_positions() {
        let normalizer = SchemaNormalizer::new();
        let mapping = normalizer.resolve(&["pk", "notes", "rho"], SchemaKind::Erp);
        assert_eq!(
            mapping,
            vec![Some(CanonicalField::Station), None, Some(CanonicalField::Resistivity)]
        );
    }

    #[test]
    fn test_feature_table_headers() {
        let normalizer = SchemaNormalizer::new();
        let fields = normalizer.normalize(
            &["Borehole", "Magnitude", "Shape", "Flow rate"],
            SchemaKind::Features,
        );
        assert_eq!(
            fields,
            vec![
                CanonicalField::Id,
                CanonicalField::Magnitude,
                CanonicalField::Shape,
                CanonicalField::Flow,
            ]
        );
    }
}
