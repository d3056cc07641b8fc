//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use crate::types::Arrangement;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for FeatureConfig.
///
/// Maintained by hand to match the struct hierarchy in feature_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [survey]
        "survey",
        "survey.ab",
        "survey.mn",
        "survey.arrangement",
        "survey.area",
        "survey.from_log10",
        // [profiling]
        "profiling",
        "profiling.dipole",
        "profiling.station",
        "profiling.min_anomaly_magnitude",
        "profiling.center_tolerance",
        // [sounding]
        "sounding",
        "sounding.from_s",
        "sounding.order",
        "sounding.imaginary_tolerance",
        // [schema]
        "schema",
        "schema.strip_chars",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        // Ties broken alphabetically so the suggestion is stable
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        // parse errors are reported by serde later
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

fn warning(field: &str, message: String) -> ValidationWarning {
    ValidationWarning {
        field: field.to_string(),
        message,
        suggestion: None,
    }
}

/// Validate physical ranges on a parsed FeatureConfig.
///
/// Returns (errors, warnings): errors are impossible values that must
/// reject the config; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::FeatureConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let survey = &config.survey;
    let profiling = &config.profiling;
    let sounding = &config.sounding;

    // Spacings are lengths: strictly positive and finite
    for (name, value) in [
        ("survey.ab", survey.ab),
        ("survey.mn", survey.mn),
        ("profiling.dipole", profiling.dipole),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} = {value} must be a positive length (m)"));
        }
    }

    if survey.arrangement == Arrangement::Schlumberger && survey.mn >= survey.ab {
        warnings.push(warning(
            "survey.mn",
            format!(
                "survey.mn = {:.1} is not smaller than survey.ab = {:.1} for a Schlumberger array",
                survey.mn, survey.ab
            ),
        ));
    }

    if !profiling.min_anomaly_magnitude.is_finite() || profiling.min_anomaly_magnitude < 0.0 {
        errors.push(format!(
            "profiling.min_anomaly_magnitude = {} must be >= 0",
            profiling.min_anomaly_magnitude
        ));
    }

    let tol = profiling.center_tolerance;
    let tol_in_range = tol > 0.0 && tol <= 0.5;
    if !tol_in_range {
        errors.push(format!(
            "profiling.center_tolerance = {tol} is outside (0, 0.5]"
        ));
    }

    if let Some(ref label) = profiling.station {
        if let Err(e) = crate::profiling::parse_station_label(label) {
            errors.push(format!("profiling.station: {e}"));
        }
    }

    // Dipoles beyond a few hundred meters are unusual for groundwater surveys
    if profiling.dipole.is_finite() && profiling.dipole > 500.0 {
        warnings.push(warning(
            "profiling.dipole",
            format!(
                "profiling.dipole = {:.1} is outside typical range (5-500 m)",
                profiling.dipole
            ),
        ));
    }

    if !sounding.from_s.is_finite() || sounding.from_s < 0.0 {
        errors.push(format!("sounding.from_s = {} must be >= 0", sounding.from_s));
    }

    if sounding.order == 0 {
        errors.push("sounding.order must be >= 1".to_string());
    } else if sounding.order > 6 {
        warnings.push(warning(
            "sounding.order",
            format!(
                "sounding.order = {} is high; fits above order 6 tend to oscillate",
                sounding.order
            ),
        ));
    }

    if !sounding.imaginary_tolerance.is_finite() || sounding.imaginary_tolerance < 0.0 {
        errors.push(format!(
            "sounding.imaginary_tolerance = {} must be >= 0",
            sounding.imaginary_tolerance
        ));
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureConfig;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("dipole", "dipole"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("dipol", "dipole"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [sounding]
            order = 4
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"sounding".to_string()));
        assert!(keys.contains(&"sounding.order".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[sounding]
from_ss = 30.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("from_ss"));
        assert_eq!(warnings[0].suggestion.as_deref(), Some("sounding.from_s"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_physical_range_defaults_clean() {
        let config = FeatureConfig::default();
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty(), "Defaults should produce no errors: {errors:?}");
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {warnings:?}");
    }

    #[test]
    fn test_physical_range_zero_order() {
        let mut config = FeatureConfig::default();
        config.sounding.order = 0;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("sounding.order")));
    }

    #[test]
    fn test_physical_range_mn_not_below_ab() {
        let mut config = FeatureConfig::default();
        config.survey.mn = 250.0;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "survey.mn"));
    }

    #[test]
    fn test_physical_range_nan_spacing() {
        let mut config = FeatureConfig::default();
        config.survey.ab = f64::NAN;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("survey.ab")));
    }
}
