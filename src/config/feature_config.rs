//! Feature Configuration - survey geometry and analysis tuning as TOML values
//!
//! Each section implements `Default` with the values used in the field, so a
//! missing file or a partial file behaves exactly like the built-in setup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::types::Arrangement;

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "RESFEAT_CONFIG";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "resfeat.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one survey campaign.
///
/// Load with `FeatureConfig::load()` which searches:
/// 1. `$RESFEAT_CONFIG` env var
/// 2. `./resfeat.toml`
/// 3. Built-in defaults
///
/// The loaded value is passed explicitly to the analysis methods; nothing is
/// stored globally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureConfig {
    /// Acquisition geometry
    #[serde(default)]
    pub survey: SurveyConfig,

    /// Resistivity profiling (ERP) tuning
    #[serde(default)]
    pub profiling: ProfilingConfig,

    /// Vertical sounding (VES) tuning
    #[serde(default)]
    pub sounding: SoundingConfig,

    /// Header normalization
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl FeatureConfig {
    /// Load configuration using the standard search order:
    /// 1. `$RESFEAT_CONFIG` environment variable
    /// 2. `./resfeat.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(
                            path = %p.display(),
                            area = %config.survey.area,
                            "Loaded feature config from RESFEAT_CONFIG"
                        );
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from RESFEAT_CONFIG, falling back"
                        );
                    }
                }
            } else {
                warn!(path = %path, "RESFEAT_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./resfeat.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(area = %config.survey.area, "Loaded feature config from ./resfeat.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./resfeat.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No resfeat.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(&contents) {
            warn!(path = %path.display(), "{}", w);
        }

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate an in-memory TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }
        let config: Self = toml::from_str(contents).map_err(ConfigError::InvalidToml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Feature config saved");
        Ok(())
    }

    /// Validate all values for physical plausibility.
    ///
    /// Impossible values (non-positive spacing, zero fit order, ...) are
    /// errors; suspicious ones are logged as warnings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_physical_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    InvalidToml(toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::InvalidToml(e) => write!(f, "Config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {e}"),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Survey
// ============================================================================

/// Acquisition geometry shared by both methods.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyConfig {
    /// Current electrode spacing AB (m)
    #[serde(default = "default_ab")]
    pub ab: f64,

    /// Potential electrode spacing MN (m)
    #[serde(default = "default_mn")]
    pub mn: f64,

    /// Electrode arrangement; names, aliases, codes and ids are accepted
    #[serde(default)]
    pub arrangement: Arrangement,

    /// Survey area label, only used in logs and reports
    #[serde(default)]
    pub area: String,

    /// Resistivity columns hold log10 values
    #[serde(default)]
    pub from_log10: bool,
}

fn default_ab() -> f64 { 200.0 }
fn default_mn() -> f64 { 20.0 }

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            ab: default_ab(),
            mn: default_mn(),
            arrangement: Arrangement::default(),
            area: String::new(),
            from_log10: false,
        }
    }
}

// ============================================================================
// Profiling (ERP)
// ============================================================================

/// Resistivity profiling parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfilingConfig {
    /// Station spacing (m), used when the table has no station column
    #[serde(default = "default_dipole")]
    pub dipole: f64,

    /// Station to anchor the conductive zone on, e.g. `"S7"` (1-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,

    /// Resistivity drop (ohm·m) below which no conductive zone is reported
    #[serde(default = "default_min_anomaly_magnitude")]
    pub min_anomaly_magnitude: f64,

    /// Max distance of a centred zone from the profile midpoint, as a fraction of the span
    #[serde(default = "default_center_tolerance")]
    pub center_tolerance: f64,
}

fn default_dipole() -> f64 { 10.0 }
fn default_min_anomaly_magnitude() -> f64 { 10.0 }
fn default_center_tolerance() -> f64 { 0.25 }

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            dipole: default_dipole(),
            station: None,
            min_anomaly_magnitude: default_min_anomaly_magnitude(),
            center_tolerance: default_center_tolerance(),
        }
    }
}

// ============================================================================
// Sounding (VES)
// ============================================================================

/// Vertical sounding parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoundingConfig {
    /// AB/2 depth (m) where the fractured-zone window starts
    #[serde(default = "default_from_s")]
    pub from_s: f64,

    /// Polynomial order of the least-squares fit
    #[serde(default = "default_order")]
    pub order: usize,

    /// Largest imaginary part for a derivative root to count as real
    #[serde(default = "default_imaginary_tolerance")]
    pub imaginary_tolerance: f64,
}

fn default_from_s() -> f64 { 45.0 }
fn default_order() -> usize { 3 }
fn default_imaginary_tolerance() -> f64 { 1e-6 }

impl Default for SoundingConfig {
    fn default() -> Self {
        Self {
            from_s: default_from_s(),
            order: default_order(),
            imaginary_tolerance: default_imaginary_tolerance(),
        }
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Header normalization parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Characters trimmed from both ends of every header
    #[serde(default = "default_strip_chars")]
    pub strip_chars: String,
}

fn default_strip_chars() -> String {
    " _-".to_string()
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self { strip_chars: default_strip_chars() }
    }
}
