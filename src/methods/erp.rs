//! Resistivity profiling method

use serde::{Deserialize, Serialize};
use tracing::info;

use super::ElectricalMethod;
use crate::acquisition::{CurveBuilder, RawTable};
use crate::config::{FeatureConfig, SurveyConfig};
use crate::profiling::{
    parse_station_label, station_label, ConductiveZoneDetector, ErpFeatureExtractor,
};
use crate::types::{AnalysisError, ConductiveZone, CurveKind, Diagnostic, ErpCurve, FeatureVector};

/// Result of a profiling fit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErpFit {
    pub zone: ConductiveZone,
    pub features: FeatureVector,
    /// Label of the recommended drilling station, e.g. `"S7"`
    pub best_station: String,
    /// Station spacing used to place the stations, when it was not read from the table
    pub dipole: Option<f64>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Electrical resistivity profiling.
#[derive(Debug, Clone)]
pub struct ResistivityProfiling {
    survey: SurveyConfig,
    station: Option<usize>,
    builder: CurveBuilder,
    detector: ConductiveZoneDetector,
    extractor: ErpFeatureExtractor,
}

impl Default for ResistivityProfiling {
    fn default() -> Self {
        let config = FeatureConfig::default();
        Self {
            survey: config.survey.clone(),
            station: None,
            builder: CurveBuilder::from_config(&config),
            detector: ConductiveZoneDetector::new(),
            extractor: ErpFeatureExtractor::from_config(&config.profiling),
        }
    }
}

impl ResistivityProfiling {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a configuration; fails on an unreadable station label.
    pub fn from_config(config: &FeatureConfig) -> Result<Self, AnalysisError> {
        let station = config
            .profiling
            .station
            .as_deref()
            .map(parse_station_label)
            .transpose()?;
        Ok(Self {
            survey: config.survey.clone(),
            station,
            builder: CurveBuilder::from_config(config),
            detector: ConductiveZoneDetector::new(),
            extractor: ErpFeatureExtractor::from_config(&config.profiling),
        })
    }

    /// Anchor the conductive zone on a station label (`"S7"`, `"7"`, ...).
    pub fn with_station(mut self, label: &str) -> Result<Self, AnalysisError> {
        self.station = Some(parse_station_label(label)?);
        Ok(self)
    }

    pub const fn survey(&self) -> &SurveyConfig {
        &self.survey
    }

    /// Selected station index (0-based), if any.
    pub const fn station(&self) -> Option<usize> {
        self.station
    }

    fn locate(&self, curve: &ErpCurve) -> Result<ConductiveZone, AnalysisError> {
        match self.station {
            Some(index) => self.detector.detect_at(curve, index),
            None => self.detector.detect(curve),
        }
    }
}

impl ElectricalMethod for ResistivityProfiling {
    type Curve = ErpCurve;
    type Output = ErpFit;

    fn kind(&self) -> CurveKind {
        CurveKind::Erp
    }

    fn fit(&self, curve: &ErpCurve) -> Result<ErpFit, AnalysisError> {
        let zone = self.locate(curve)?;
        let features = self.extractor.extract(curve, &zone)?;
        let best_station = station_label(features.best_station_index);
        info!(
            area = %self.survey.area,
            arrangement = %self.survey.arrangement,
            best_station = %best_station,
            anomaly_type = %features.anomaly_type,
            shape = %features.shape,
            "Resistivity profile fitted"
        );
        Ok(ErpFit {
            zone,
            features,
            best_station,
            dipole: None,
            diagnostics: Vec::new(),
        })
    }

    fn fit_table(&self, table: &RawTable) -> Result<ErpFit, AnalysisError> {
        let built = self.builder.build_erp(table)?;
        let mut fit = self.fit(&built.curve)?;
        fit.dipole = built.dipole;
        fit.diagnostics = built.diagnostics;
        Ok(fit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable::from_columns([(
            "rho",
            vec![250.0, 280.0, 150.0, 90.0, 140.0, 260.0, 120.0, 100.0, 250.0],
        )])
    }

    #[test]
    fn test_fit_table_reports_synthesized_dipole() {
        let fit = ResistivityProfiling::new().fit_table(&table()).unwrap();
        assert_eq!(fit.dipole, Some(10.0));
        assert_eq!(fit.features.best_station_index, 3);
        assert_eq!(fit.best_station, "S4");
        assert_eq!((fit.zone.start(), fit.zone.end()), (1, 5));
    }

    #[test]
    fn test_selected_station_moves_the_zone() {
        let erp = ResistivityProfiling::new().with_station("S8").unwrap();
        let fit = erp.fit_table(&table()).unwrap();
        assert_eq!((fit.zone.start(), fit.zone.end()), (5, 8));
        assert_eq!(fit.best_station, "S8");
    }

    #[test]
    fn test_bad_station_label_in_config() {
        let mut config = FeatureConfig::default();
        config.profiling.station = Some("north".to_string());
        assert!(matches!(
            ResistivityProfiling::from_config(&config),
            Err(AnalysisError::InvalidStation(_))
        ));
    }
}
