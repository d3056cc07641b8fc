//! Electrical Resistivity Profiling (ERP)
//!
//! Locates the conductive zone of a profile and describes it with the
//! features used to rank drilling candidates:
//!
//! - `zone`: [`ConductiveZoneDetector`] (global minimum or selected station)
//! - `features`: [`ErpFeatureExtractor`] (type, shape, power, magnitude, sfi)
//!
//! Stations are labelled for humans with 1-based names (`S1`, `S2`, ...);
//! every index in the API is 0-based.

mod features;
mod zone;

pub use features::{classify_shape, ErpFeatureExtractor};
pub use zone::ConductiveZoneDetector;

use crate::types::AnalysisError;

/// Parse a station label such as `"S7"`, `"s07"` or `"7"` into a 0-based index.
pub fn parse_station_label(label: &str) -> Result<usize, AnalysisError> {
    let trimmed = label.trim();
    let digits = trimmed.strip_prefix(['S', 's']).unwrap_or(trimmed);
    let number: usize = digits.parse().map_err(|_| {
        AnalysisError::InvalidStation(format!("cannot read station label '{label}'"))
    })?;
    if number == 0 {
        return Err(AnalysisError::InvalidStation(format!(
            "station label '{label}' must be 1-based"
        )));
    }
    Ok(number - 1)
}

/// Human label of a 0-based station index.
pub fn station_label(index: usize) -> String {
    format!("S{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_station_labels() {
        assert_eq!(parse_station_label("S7"), Ok(6));
        assert_eq!(parse_station_label("s07"), Ok(6));
        assert_eq!(parse_station_label(" 12 "), Ok(11));
    }

    #[test]
    fn test_parse_station_label_rejects_garbage() {
        assert!(parse_station_label("S0").is_err());
        assert!(parse_station_label("station seven").is_err());
        assert!(parse_station_label("").is_err());
    }

    #[test]
    fn test_station_label_round_trip() {
        assert_eq!(station_label(6), "S7");
        assert_eq!(parse_station_label(&station_label(6)), Ok(6));
    }
}
