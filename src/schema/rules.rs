//! Ordered header-matching rule tables
//!
//! Each table lists canonical fields in declaration order together with the
//! lowercase tokens that identify them. A header matches a field when it
//! contains one of the field's tokens; the first field that matches wins.

use super::{CanonicalField, SchemaKind};

/// One canonical field and its identifying tokens.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: CanonicalField,
    pub tokens: &'static [&'static str],
}

const RESISTIVITY_TOKENS: &[&str] = &["rho", "app", "res", "se", "sounding.values"];

pub const ERP_RULES: &[FieldRule] = &[
    FieldRule {
        field: CanonicalField::Station,
        tokens: &["pk", "sta", "pos"],
    },
    FieldRule {
        field: CanonicalField::Resistivity,
        tokens: RESISTIVITY_TOKENS,
    },
    FieldRule {
        field: CanonicalField::Longitude,
        tokens: &["long", "lon"],
    },
    FieldRule {
        field: CanonicalField::Latitude,
        tokens: &["lat"],
    },
    FieldRule {
        field: CanonicalField::Easting,
        tokens: &["east", "x"],
    },
    FieldRule {
        field: CanonicalField::Northing,
        tokens: &["north", "y"],
    },
];

pub const VES_RULES: &[FieldRule] = &[
    FieldRule {
        field: CanonicalField::Ab,
        tokens: &["ab", "ab/2", "current.electrodes", "depth", "thickness"],
    },
    FieldRule {
        field: CanonicalField::Mn,
        tokens: &["mn", "mn/2", "potential.electrodes", "mnspacing"],
    },
    FieldRule {
        field: CanonicalField::Resistivity,
        tokens: RESISTIVITY_TOKENS,
    },
];

pub const FEATURE_RULES: &[FieldRule] = &[
    FieldRule {
        field: CanonicalField::Id,
        tokens: &["bore", "for"],
    },
    FieldRule {
        field: CanonicalField::East,
        tokens: &["x", "east"],
    },
    FieldRule {
        field: CanonicalField::North,
        tokens: &["y", "north"],
    },
    FieldRule {
        field: CanonicalField::Power,
        tokens: &["pow", "puiss", "pa"],
    },
    FieldRule {
        field: CanonicalField::Magnitude,
        tokens: &["magn", "amp", "ma"],
    },
    FieldRule {
        field: CanonicalField::Shape,
        tokens: &["shape", "form"],
    },
    FieldRule {
        field: CanonicalField::Type,
        tokens: &["type"],
    },
    FieldRule {
        field: CanonicalField::Sfi,
        tokens: &["sfi", "if"],
    },
    FieldRule {
        field: CanonicalField::Lat,
        tokens: &["lat"],
    },
    FieldRule {
        field: CanonicalField::Lon,
        tokens: &["lon"],
    },
    FieldRule {
        field: CanonicalField::Lwi,
        tokens: &["lwi", "wi"],
    },
    FieldRule {
        field: CanonicalField::OhmS,
        tokens: &["ohms", "surf"],
    },
    FieldRule {
        field: CanonicalField::Geol,
        tokens: &["geol"],
    },
    FieldRule {
        field: CanonicalField::Flow,
        tokens: &["flow", "deb"],
    },
];

/// Rule table for a schema kind.
pub const fn rules_for(kind: SchemaKind) -> &'static [FieldRule] {
    match kind {
        SchemaKind::Erp => ERP_RULES,
        SchemaKind::Ves => VES_RULES,
        SchemaKind::Features => FEATURE_RULES,
    }
}

/// Fields a table of this kind must provide before a curve can be built.
pub const fn mandatory_fields(kind: SchemaKind) -> &'static [CanonicalField] {
    match kind {
        SchemaKind::Erp => &[CanonicalField::Resistivity],
        SchemaKind::Ves => &[CanonicalField::Ab, CanonicalField::Resistivity],
        SchemaKind::Features => &[],
    }
}
