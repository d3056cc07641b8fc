//! Shared field fixtures for the integration tests.

#![allow(dead_code)]

use resfeat::RawTable;

/// Apparent resistivity (ohm·m) of a 23-station profile, 30 m apart.
pub const ERP_RHO: [f64; 23] = [
    2210.0, 1890.0, 1300.0, 1369.0, 1345.0, 1147.0, 1101.0, 1180.0, 1260.0, 1230.0, 1950.0,
    2320.0, 2460.0, 2410.0, 2380.0, 2520.0, 2610.0, 2550.0, 2480.0, 2430.0, 2390.0, 2440.0,
    2500.0,
];

/// GPS jitter (m) added to the surveyed station coordinates.
const JITTER: [f64; 23] = [
    0.4, -0.3, 0.2, -0.1, 0.5, -0.4, 0.1, 0.3, -0.2, 0.0, 0.2, -0.5, 0.3, -0.1, 0.4, -0.3, 0.2,
    0.1, -0.2, 0.3, -0.4, 0.1, 0.0,
];

/// Profile laid along the easting axis with a 30 m station spacing.
///
/// The table carries no station column, so positions must be derived from
/// the coordinates.
pub fn erp_table() -> RawTable {
    let easting: Vec<f64> = (0..ERP_RHO.len())
        .map(|i| 382_410.0 + i as f64 * 30.0 + JITTER[i])
        .collect();
    let northing: Vec<f64> = JITTER.iter().map(|j| 1_163_250.0 - j).collect();
    RawTable::from_columns([
        ("Easting", easting),
        ("Northing", northing),
        ("Rho_a", ERP_RHO.to_vec()),
    ])
}

/// AB/2 (m) of the sounding.
pub const VES_AB: [f64; 23] = [
    1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 12.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0,
    55.0, 60.0, 70.0, 80.0, 90.0, 100.0,
];

/// Apparent resistivity (ohm·m) of the sounding.
pub const VES_RHO: [f64; 23] = [
    125.0, 110.0, 96.0, 85.0, 74.0, 66.0, 55.0, 48.0, 43.0, 40.0, 38.0, 41.0, 47.0, 56.0, 66.0,
    70.0, 64.0, 60.0, 57.0, 55.0, 58.0, 66.0, 80.0,
];

/// Sounding table with a constant MN/2 column.
pub fn ves_table() -> RawTable {
    RawTable::from_columns([
        ("AB/2", VES_AB.to_vec()),
        ("MN/2", vec![0.5; VES_AB.len()]),
        ("rhoa", VES_RHO.to_vec()),
    ])
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected {expected} ± {tolerance}, got {actual}"
    );
}
