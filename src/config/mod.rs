//! Feature Configuration Module
//!
//! Survey geometry and analysis tuning loaded from TOML files.
//!
//! ## Loading Order
//!
//! 1. `RESFEAT_CONFIG` environment variable (path to TOML file)
//! 2. `resfeat.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Load once and hand the value to the methods that need it:
//!
//! ```ignore
//! let config = FeatureConfig::load();
//! let erp = ResistivityProfiling::from_config(&config)?;
//! let fit = erp.fit_table(&table)?;
//! ```

mod feature_config;
pub mod validation;

pub use feature_config::*;
