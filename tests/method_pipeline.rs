//! End-to-end method tests
//!
//! Raw tables in, analysis records out, through the `ElectricalMethod`
//! entry points and a loaded configuration.

mod common;

use common::{erp_table, ves_table, ERP_RHO};
use resfeat::{
    AnalysisError, Built, Curve, CurveBuilder, CurveKind, ElectricalMethod, FeatureConfig,
    RawTable, ResistivityProfiling, VerticalSounding,
};

#[test]
fn profiling_batch_keeps_input_order() {
    let tables = vec![
        erp_table(),
        RawTable::from_columns([("rho", vec![100.0, 100.0, 100.0, 100.0])]),
        RawTable::from_columns([("pk", vec![0.0, 10.0, 20.0])]),
        RawTable::from_columns([("rho", vec![300.0, 120.0, 80.0, 150.0, 290.0])]),
    ];
    let results = ResistivityProfiling::new().fit_batch(&tables);

    assert_eq!(results.len(), tables.len());
    assert_eq!(results[0].as_ref().unwrap().best_station, "S7");
    assert!(matches!(results[1], Err(AnalysisError::DegenerateCurve { .. })));
    assert!(matches!(results[2], Err(AnalysisError::SchemaMismatch { .. })));
    assert_eq!(results[3].as_ref().unwrap().best_station, "S3");
}

#[test]
fn batch_matches_sequential_fits() {
    let ves = VerticalSounding::new().with_from_s(20.0);
    let tables = vec![ves_table(), ves_table(), ves_table()];
    let batch = ves.fit_batch(&tables);
    let sequential = ves.fit_table(&ves_table()).unwrap();
    for result in batch {
        assert_eq!(result.unwrap(), sequential);
    }
}

#[test]
fn synthesized_positions_follow_configured_dipole() {
    let mut config = FeatureConfig::default();
    config.profiling.dipole = 25.0;
    let erp = ResistivityProfiling::from_config(&config).unwrap();

    let table = RawTable::from_columns([("resistivity", ERP_RHO.to_vec())]);
    let fit = erp.fit_table(&table).unwrap();
    assert_eq!(fit.dipole, Some(25.0));
    assert_eq!(fit.features.power, 5.0 * 25.0, "Zone spans five dipoles");

    let built = CurveBuilder::from_config(&config).build_erp(&table).unwrap();
    let positions = built.curve.positions();
    assert!(positions.windows(2).all(|w| w[1] - w[0] == 25.0));
    let rebuilt = RawTable::from_columns([("pk", positions), ("rho", built.curve.values())]);
    let refit = erp.fit_table(&rebuilt).unwrap();
    assert_eq!(refit.features, fit.features, "Explicit stations reproduce the synthesized fit");
    assert_eq!(refit.dipole, None);
}

#[test]
fn configured_station_is_used_by_the_method() {
    let config = FeatureConfig::from_toml_str("[profiling]\nstation = \"S10\"\n").unwrap();
    let erp = ResistivityProfiling::from_config(&config).unwrap();
    assert_eq!(erp.station(), Some(9));

    let fit = erp.fit_table(&erp_table()).unwrap();
    assert_eq!(fit.best_station, "S10");
    assert_eq!((fit.zone.start(), fit.zone.end()), (8, 12));
}

#[test]
fn generic_build_dispatches_on_curve_kind() {
    let builder = CurveBuilder::new();
    let Built { curve, .. } = builder.build(&ves_table(), CurveKind::Ves).unwrap();
    assert_eq!(curve.kind(), CurveKind::Ves);
    assert!(matches!(curve, Curve::Ves(_)));

    let Built { curve, dipole, .. } = builder.build(&erp_table(), CurveKind::Erp).unwrap();
    assert_eq!(curve.kind(), CurveKind::Erp);
    assert_eq!(curve.samples().len(), ERP_RHO.len());
    assert_eq!(dipole, Some(30.0));
}

#[test]
fn methods_report_their_curve_kind() {
    assert_eq!(ResistivityProfiling::new().kind(), CurveKind::Erp);
    assert_eq!(VerticalSounding::new().kind(), CurveKind::Ves);
}

#[test]
fn log10_survey_flag_reaches_both_builders() {
    let config = FeatureConfig::from_toml_str("[survey]\nfrom_log10 = true\n").unwrap();
    let log_rho: Vec<f64> = [300.0_f64, 120.0, 80.0, 150.0, 290.0]
        .iter()
        .map(|v| v.log10())
        .collect();
    let table = RawTable::from_columns([("rho", log_rho)]);

    let fit = ResistivityProfiling::from_config(&config)
        .unwrap()
        .fit_table(&table)
        .unwrap();
    assert_eq!(fit.best_station, "S3");
    assert!((fit.features.magnitude - 220.0).abs() < 1e-6, "got {}", fit.features.magnitude);

    let ves = VerticalSounding::from_config(&config).with_from_s(90.0);
    let log_table = RawTable::from_columns([
        ("AB/2", common::VES_AB.to_vec()),
        ("rhoa", common::VES_RHO.iter().map(|v| v.log10()).collect::<Vec<f64>>()),
    ]);
    let analysis = ves.fit_table(&log_table).unwrap();
    assert!((analysis.ohmic_area - 730.0).abs() < 1e-6);
}
