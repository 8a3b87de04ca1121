//! End-to-end pipeline tests over the shipped price table and scenarios.

mod common;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use fuel_credit_sim::config::ScenarioConfig;
use fuel_credit_sim::fuel::Dge;
use fuel_credit_sim::io::export::write_revenue_csv;
use fuel_credit_sim::market::{HistoricalSeriesParser, ParseMode, SeriesStats};
use fuel_credit_sim::pipeline::{Pipeline, projection_rng};
use fuel_credit_sim::projection::ProjectionHorizon;
use fuel_credit_sim::CreditError;

#[test]
fn shipped_table_skips_weeks_without_a_price() {
    let series = common::weekly_prices();
    assert_eq!(series.len(), 50);

    let first = &series.points()[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    assert!((first.price - 68.0).abs() < 1e-9);

    let latest = series.latest().unwrap();
    assert_eq!(latest.date, NaiveDate::from_ymd_opt(2023, 12, 25).unwrap());
    assert!((latest.price - 76.40).abs() < 1e-9);

    // blank weeks are dropped, not zero-filled
    assert!(series.points().iter().all(|p| p.price > 0.0));
    assert!(
        !series
            .points()
            .iter()
            .any(|p| p.date == NaiveDate::from_ymd_opt(2023, 5, 8).unwrap())
    );
}

#[test]
fn strict_parse_reports_unparseable_price() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/malformed_prices.csv");
    let err = HistoricalSeriesParser::default()
        .parse_path(&path)
        .unwrap_err();
    match err {
        CreditError::MalformedRows(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].value, "n/a");
        }
        other => panic!("expected MalformedRows, got {other:?}"),
    }

    let lenient = HistoricalSeriesParser::new(b',', ParseMode::Lenient)
        .parse_path(&path)
        .unwrap();
    assert_eq!(lenient.len(), 2);
}

#[test]
fn diesel_fleet_report_over_shipped_history() {
    let history = common::weekly_prices();
    let stats = SeriesStats::from_series(&history).unwrap();
    let months = ProjectionHorizon::OneYear.months();

    let report = Pipeline::default()
        .run("Diesel", 1000.0, history, months, &mut projection_rng(Some(42)))
        .unwrap();

    assert_eq!(report.estimate.dge, Dge(1000.0));
    assert!((report.estimate.credits.value() - 9.4734115).abs() < 1e-6);
    assert_eq!(report.stats, stats);
    assert_eq!(report.horizon_months(), 12);
    assert_eq!(report.revenue.len(), 12);

    let credits = report.estimate.credits.value();
    for (p, r) in report.projection.iter().zip(&report.revenue) {
        assert_eq!(p.month, r.month);
        assert!(p.optimistic >= p.base && p.base >= p.pessimistic);
        assert!((r.base_revenue - p.base * credits).abs() < 1e-9);
        assert!((r.optimistic - p.optimistic).abs() < 1e-9);
    }

    // first month: latest price scaled by noise in [0.95, 1.05)
    let first = report.projection[0].base;
    assert!(first >= 76.40 * 0.95 && first < 76.40 * 1.05, "first base {first}");
}

#[test]
fn same_seed_same_report() {
    let run = |seed| {
        Pipeline::default()
            .run(
                "Gasoline",
                500.0,
                common::weekly_prices(),
                60,
                &mut StdRng::seed_from_u64(seed),
            )
            .unwrap()
    };
    let a = run(7);
    let b = run(7);
    let c = run(8);
    assert_eq!(a.projection, b.projection);
    assert_eq!(a.revenue, b.revenue);
    assert_ne!(a.projection, c.projection);
}

#[test]
fn scenario_files_load_and_run() {
    for name in ["diesel_fleet", "ev_fleet", "renewable_diesel_pathway"] {
        let scenario = ScenarioConfig::from_toml_file(&common::scenario_path(name))
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(scenario.validate().is_empty(), "{name} should validate");

        let history_path = scenario.history.path.clone().expect("history path set");
        assert!(history_path.exists(), "{name}: {}", history_path.display());

        let history = HistoricalSeriesParser::new(b',', scenario.history.mode)
            .parse_path(&history_path)
            .unwrap();
        let pipeline = Pipeline::from_config(&scenario).unwrap();
        let months = scenario.projection.horizon().unwrap().months();
        let report = pipeline
            .run(
                &scenario.fuel.name,
                scenario.fuel.amount,
                history,
                months,
                &mut projection_rng(scenario.projection.seed),
            )
            .unwrap();

        assert_eq!(report.horizon_months(), months);
        assert!(report.estimate.credits.value() > 0.0, "{name}");
    }
}

#[test]
fn scenario_pathway_ci_raises_credits() {
    let path = common::scenario_path("renewable_diesel_pathway");
    let scenario = ScenarioConfig::from_toml_file(&path).unwrap();
    let preset = ScenarioConfig::renewable_diesel();
    assert_eq!(scenario.fuel.name, preset.fuel.name);
    assert_eq!(scenario.fuel.amount, preset.fuel.amount);
    assert_eq!(scenario.projection.horizon_years, preset.projection.horizon_years);

    let tuned = Pipeline::from_config(&scenario)
        .unwrap()
        .estimate(&scenario.fuel.name, scenario.fuel.amount)
        .unwrap();
    let generic = Pipeline::default()
        .estimate(&scenario.fuel.name, scenario.fuel.amount)
        .unwrap();

    assert_eq!(tuned.fuel_ci, 25.0);
    assert_eq!(tuned.dge, generic.dge);
    assert!(tuned.credits.value() > generic.credits.value());
}

#[test]
fn revenue_csv_has_header_and_one_row_per_month() {
    let report = Pipeline::default()
        .run(
            "Diesel",
            1000.0,
            common::weekly_series(&[60.0, 62.0, 64.0]),
            12,
            &mut projection_rng(Some(1)),
        )
        .unwrap();

    let mut buf = Vec::new();
    write_revenue_csv(&report.revenue, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 13);
    assert!(lines[0].starts_with("month,"));
    assert!(lines[12].starts_with("12,"));
}

#[test]
fn empty_history_is_rejected() {
    let result = Pipeline::default().run(
        "Diesel",
        1000.0,
        common::weekly_series(&[]),
        12,
        &mut projection_rng(Some(1)),
    );
    assert!(matches!(result, Err(CreditError::EmptySeries)));
}
