//! Curve construction from normalized tables
//!
//! The builder resolves column headers through the [`SchemaNormalizer`],
//! checks that the mandatory fields are present, drops incomplete rows and
//! derives station positions when the table does not carry them.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::RawTable;
use crate::config::FeatureConfig;
use crate::math;
use crate::schema::{mandatory_fields, CanonicalField, SchemaKind, SchemaNormalizer};
use crate::types::{
    AnalysisError, Coordinate, Curve, CurveKind, Diagnostic, DiagnosticKind, ErpCurve, Sample,
    VesCurve,
};

/// A built curve together with the notes collected while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Built<C> {
    pub curve: C,
    pub diagnostics: Vec<Diagnostic>,
    /// Station spacing (m) used to synthesize ERP positions, if any
    pub dipole: Option<f64>,
}

impl<C> Built<C> {
    fn map<D>(self, f: impl FnOnce(C) -> D) -> Built<D> {
        Built {
            curve: f(self.curve),
            diagnostics: self.diagnostics,
            dipole: self.dipole,
        }
    }
}

/// Column index of each canonical field found in a table.
struct ColumnMap {
    columns: HashMap<CanonicalField, usize>,
}

impl ColumnMap {
    fn get(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

/// Builds validated [`ErpCurve`]s and [`VesCurve`]s from raw tables.
#[derive(Debug, Clone)]
pub struct CurveBuilder {
    normalizer: SchemaNormalizer,
    dipole: f64,
    from_log10: bool,
}

impl Default for CurveBuilder {
    fn default() -> Self {
        Self::from_config(&FeatureConfig::default())
    }
}

impl CurveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FeatureConfig) -> Self {
        Self {
            normalizer: SchemaNormalizer::from_config(&config.schema),
            dipole: config.profiling.dipole,
            from_log10: config.survey.from_log10,
        }
    }

    /// Station spacing used when neither stations nor coordinates are present.
    pub fn with_dipole(mut self, dipole: f64) -> Self {
        self.dipole = dipole;
        self
    }

    /// Treat resistivity columns as log10 values.
    pub fn with_log10(mut self, from_log10: bool) -> Self {
        self.from_log10 = from_log10;
        self
    }

    pub fn with_normalizer(mut self, normalizer: SchemaNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Build either curve family.
    pub fn build(&self, table: &RawTable, kind: CurveKind) -> Result<Built<Curve>, AnalysisError> {
        match kind {
            CurveKind::Erp => Ok(self.build_erp(table)?.map(Curve::Erp)),
            CurveKind::Ves => Ok(self.build_ves(table)?.map(Curve::Ves)),
        }
    }

    /// Build a resistivity profile.
    ///
    /// Positions come from the station column, else from the planar
    /// coordinates, else from the configured dipole length.
    pub fn build_erp(&self, table: &RawTable) -> Result<Built<ErpCurve>, AnalysisError> {
        let mut diagnostics = Vec::new();
        let columns = self.map_columns(table, CurveKind::Erp, &mut diagnostics)?;

        let rho_col = columns
            .get(CanonicalField::Resistivity)
            .ok_or_else(|| missing(CurveKind::Erp, &[CanonicalField::Resistivity]))?;
        let station_col = columns.get(CanonicalField::Station);

        let mut mandatory = vec![rho_col];
        mandatory.extend(station_col);
        let rows = kept_rows(table, &mandatory, &mut diagnostics);

        let mut values = Vec::with_capacity(rows.len());
        for &row in &rows {
            let raw = table.cell(row, rho_col);
            let value = if self.from_log10 { math::inverse_log10(raw) } else { raw };
            if value < 0.0 {
                return Err(AnalysisError::InvalidValue {
                    field: CanonicalField::Resistivity.as_str().to_string(),
                    row,
                    value,
                });
            }
            values.push(value);
        }

        let coordinates = erp_coordinates(table, &columns, &rows);

        let (positions, dipole): (Vec<f64>, Option<f64>) = if let Some(col) = station_col {
            (rows.iter().map(|&r| table.cell(r, col)).collect(), None)
        } else {
            let dipole = match coordinates.as_deref().and_then(planar_step) {
                Some(step) => {
                    let dipole = graded(step);
                    debug!(mean_step = step, dipole, "Dipole length inferred from coordinates");
                    dipole
                }
                None => graded(self.dipole),
            };
            let positions = (0..rows.len()).map(|i| i as f64 * dipole).collect();
            (positions, Some(dipole))
        };

        let samples = positions
            .iter()
            .zip(&values)
            .map(|(&p, &v)| Sample::new(p, v))
            .collect();
        let mut curve = ErpCurve::new(samples)?;
        if let Some(coords) = coordinates {
            curve = curve.with_coordinates(coords)?;
        }

        debug!(stations = curve.len(), dropped = table.n_rows() - rows.len(), "Built ERP curve");
        Ok(Built { curve, diagnostics, dipole })
    }

    /// Build a sounding curve. Log10 values are kept as-is and flagged.
    pub fn build_ves(&self, table: &RawTable) -> Result<Built<VesCurve>, AnalysisError> {
        let mut diagnostics = Vec::new();
        let columns = self.map_columns(table, CurveKind::Ves, &mut diagnostics)?;

        let (Some(ab_col), Some(rho_col)) = (
            columns.get(CanonicalField::Ab),
            columns.get(CanonicalField::Resistivity),
        ) else {
            return Err(missing(CurveKind::Ves, &[CanonicalField::Ab, CanonicalField::Resistivity]));
        };

        let rows = kept_rows(table, &[ab_col, rho_col], &mut diagnostics);

        let mut samples = Vec::with_capacity(rows.len());
        for &row in &rows {
            let value = table.cell(row, rho_col);
            if !self.from_log10 && value < 0.0 {
                return Err(AnalysisError::InvalidValue {
                    field: CanonicalField::Resistivity.as_str().to_string(),
                    row,
                    value,
                });
            }
            samples.push(Sample::new(table.cell(row, ab_col), value));
        }

        let mut curve = VesCurve::new(samples, self.from_log10)?;
        if let Some(mn_col) = columns.get(CanonicalField::Mn) {
            let mn: Vec<f64> = rows.iter().map(|&r| table.cell(r, mn_col)).collect();
            if mn.iter().all(|v| v.is_finite()) {
                curve = curve.with_mn(mn)?;
            } else {
                debug!("MN column has blank cells, spacing metadata ignored");
            }
        }

        debug!(
            samples = curve.len(),
            max_depth = curve.max_depth(),
            log_scaled = curve.is_log_scaled(),
            "Built VES curve"
        );
        Ok(Built { curve, diagnostics, dipole: None })
    }

    /// Resolve headers to column indices, keeping the first column per field.
    fn map_columns(
        &self,
        table: &RawTable,
        kind: CurveKind,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<ColumnMap, AnalysisError> {
        let schema = SchemaKind::from(kind);
        let mut columns = HashMap::new();

        for (idx, (header, field)) in table
            .headers
            .iter()
            .zip(self.normalizer.resolve(&table.headers, schema))
            .enumerate()
        {
            let Some(field) = field else {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::DroppedHeader,
                    format!("column '{header}' matches no {kind} field"),
                ));
                continue;
            };
            if let Some(&first) = columns.get(&field) {
                warn!(header = %header, field = %field, kept = first, "Duplicate column ignored");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::DuplicateColumn,
                    format!("column '{header}' also maps to {field}; column {first} kept"),
                ));
                continue;
            }
            columns.insert(field, idx);
        }

        let absent: Vec<CanonicalField> = mandatory_fields(schema)
            .iter()
            .copied()
            .filter(|f| !columns.contains_key(f))
            .collect();
        if !absent.is_empty() {
            return Err(AnalysisError::SchemaMismatch { kind, missing: absent });
        }

        Ok(ColumnMap { columns })
    }
}

fn missing(kind: CurveKind, fields: &[CanonicalField]) -> AnalysisError {
    AnalysisError::SchemaMismatch {
        kind,
        missing: fields.to_vec(),
    }
}

/// Indices of rows whose mandatory cells are all finite.
fn kept_rows(
    table: &RawTable,
    mandatory: &[usize],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<usize> {
    let mut kept = Vec::with_capacity(table.n_rows());
    for row in 0..table.n_rows() {
        if mandatory.iter().all(|&c| table.cell(row, c).is_finite()) {
            kept.push(row);
        } else {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::DroppedRow,
                format!("row {row} has a blank mandatory cell"),
            ));
        }
    }
    let dropped = table.n_rows() - kept.len();
    if dropped > 0 {
        warn!(dropped, total = table.n_rows(), "Rows with blank mandatory cells dropped");
    }
    kept
}

/// Per-station coordinates, when a complete pair of columns exists.
fn erp_coordinates(
    table: &RawTable,
    columns: &ColumnMap,
    rows: &[usize],
) -> Option<Vec<Coordinate>> {
    let pair = |a: CanonicalField, b: CanonicalField| -> Option<Vec<(f64, f64)>> {
        let (ca, cb) = (columns.get(a)?, columns.get(b)?);
        let values: Vec<(f64, f64)> = rows
            .iter()
            .map(|&r| (table.cell(r, ca), table.cell(r, cb)))
            .collect();
        values
            .iter()
            .all(|(x, y)| x.is_finite() && y.is_finite())
            .then_some(values)
    };

    if let Some(xy) = pair(CanonicalField::Easting, CanonicalField::Northing) {
        return Some(
            xy.into_iter()
                .map(|(easting, northing)| Coordinate::Projected { easting, northing })
                .collect(),
        );
    }
    pair(CanonicalField::Longitude, CanonicalField::Latitude).map(|ll| {
        ll.into_iter()
            .map(|(longitude, latitude)| Coordinate::Geographic { longitude, latitude })
            .collect()
    })
}

/// Mean planar distance between consecutive projected stations.
fn planar_step(coordinates: &[Coordinate]) -> Option<f64> {
    let points: Vec<(f64, f64)> = coordinates
        .iter()
        .map(|c| match *c {
            Coordinate::Projected { easting, northing } => Some((easting, northing)),
            Coordinate::Geographic { .. } => None,
        })
        .collect::<Option<_>>()?;
    let steps: Vec<f64> = points
        .windows(2)
        .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
        .collect();
    let step = math::mean(&steps);
    (step.is_finite() && step > 0.0).then_some(step)
}

/// Dipole rounded to the field grade; spacings below the grade are kept as given.
fn graded(dipole: f64) -> f64 {
    let rounded = math::round_dipole_length(dipole);
    if rounded > 0.0 {
        rounded
    } else {
        dipole
    }
}
