//! Vertical sounding method

use tracing::info;

use super::ElectricalMethod;
use crate::acquisition::{CurveBuilder, RawTable};
use crate::config::{FeatureConfig, SurveyConfig};
use crate::sounding::VesCurveAnalyzer;
use crate::types::{AnalysisError, CurveKind, VesAnalysis, VesCurve};

/// Vertical electrical sounding.
#[derive(Debug, Clone)]
pub struct VerticalSounding {
    survey: SurveyConfig,
    from_s: f64,
    order: usize,
    builder: CurveBuilder,
    analyzer: VesCurveAnalyzer,
}

impl Default for VerticalSounding {
    fn default() -> Self {
        Self::from_config(&FeatureConfig::default())
    }
}

impl VerticalSounding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FeatureConfig) -> Self {
        Self {
            survey: config.survey.clone(),
            from_s: config.sounding.from_s,
            order: config.sounding.order,
            builder: CurveBuilder::from_config(config),
            analyzer: VesCurveAnalyzer::from_config(&config.sounding),
        }
    }

    /// Depth (m) where the fractured-zone window starts.
    pub fn with_from_s(mut self, from_s: f64) -> Self {
        self.from_s = from_s;
        self
    }

    /// Requested polynomial order.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub const fn survey(&self) -> &SurveyConfig {
        &self.survey
    }
}

impl ElectricalMethod for VerticalSounding {
    type Curve = VesCurve;
    type Output = VesAnalysis;

    fn kind(&self) -> CurveKind {
        CurveKind::Ves
    }

    fn fit(&self, curve: &VesCurve) -> Result<VesAnalysis, AnalysisError> {
        let analysis = self.analyzer.analyze(curve, self.from_s, self.order)?;
        info!(
            area = %self.survey.area,
            from_s = self.from_s,
            nareas = analysis.nareas(),
            ohmic_area = analysis.ohmic_area,
            "Sounding curve fitted"
        );
        Ok(analysis)
    }

    fn fit_table(&self, table: &RawTable) -> Result<VesAnalysis, AnalysisError> {
        let built = self.builder.build_ves(table)?;
        let mut analysis = self.fit(&built.curve)?;
        let mut diagnostics = built.diagnostics;
        diagnostics.append(&mut analysis.diagnostics);
        analysis.diagnostics = diagnostics;
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiagnosticKind;

    #[test]
    fn test_fit_table_merges_build_diagnostics() {
        let table = RawTable::from_columns([
            ("AB/2", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            ("comment", vec![0.0; 5]),
            ("rhoa", vec![50.0, 40.0, f64::NAN, 45.0, 60.0]),
        ]);
        let ves = VerticalSounding::new().with_from_s(1.0).with_order(2);
        let analysis = ves.fit_table(&table).unwrap();
        assert_eq!(analysis.fractured_zone, vec![1.0, 2.0, 4.0, 5.0]);
        let kinds: Vec<DiagnosticKind> = analysis.diagnostics.iter().map(|d| d.kind).collect();
        assert!(kinds.contains(&DiagnosticKind::DroppedHeader));
        assert!(kinds.contains(&DiagnosticKind::DroppedRow));
    }
}
