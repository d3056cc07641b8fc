//! Field table acquisition
//!
//! Turns loosely-labelled field tables into validated curves. File readers
//! live outside the crate; they hand over a [`RawTable`] of headers and
//! numeric rows, with `NaN` marking blank cells.

mod curve_builder;

pub use curve_builder::{Built, CurveBuilder};

use serde::{Deserialize, Serialize};

/// A header row plus numeric data rows, as produced by an external loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl RawTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>, rows: Vec<Vec<f64>>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows,
        }
    }

    /// Build a table from named columns of equal length.
    pub fn from_columns<S: Into<String>>(columns: impl IntoIterator<Item = (S, Vec<f64>)>) -> Self {
        let (headers, columns): (Vec<String>, Vec<Vec<f64>>) =
            columns.into_iter().map(|(h, c)| (h.into(), c)).unzip();
        let n_rows = columns.iter().map(Vec::len).max().unwrap_or(0);
        let rows = (0..n_rows)
            .map(|r| {
                columns
                    .iter()
                    .map(|c| c.get(r).copied().unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, col)`; short rows read as blank.
    pub fn cell(&self, row: usize, col: usize) -> f64 {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_pads_short_columns() {
        let table =
            RawTable::from_columns([("pk", vec![0.0, 10.0, 20.0]), ("rho", vec![5.0, 6.0])]);
        assert_eq!(table.headers, vec!["pk", "rho"]);
        assert_eq!(table.n_rows(), 3);
        assert!(table.cell(2, 1).is_nan());
        assert!(table.cell(9, 0).is_nan());
        assert_eq!(table.cell(1, 0), 10.0);
    }
}
