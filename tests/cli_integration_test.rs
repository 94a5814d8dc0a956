//! CLI integration tests: settings from INI files on disk, record loading
//! through the adapter chosen for the data path, and output rendering.

mod common;

use common::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use stockscreen::adapters::stock_port_for;
use stockscreen::cli::{self, Settings};
use stockscreen::domain::error::ScreenerError;
use stockscreen::domain::screener::screen;
use stockscreen::domain::stock::Metric;
use stockscreen::domain::table::{TableState, build_view};
use tempfile::TempDir;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[data]
path = /srv/stockscreen/stocks.csv

[table]
page_size = 25

[web]
listen = 0.0.0.0:8080
"#;

#[test]
fn load_settings_from_valid_ini() {
    let file = write_temp_ini(VALID_INI);
    let settings = cli::load_settings(Some(file.path())).unwrap();
    assert_eq!(
        settings.data_path,
        Some(PathBuf::from("/srv/stockscreen/stocks.csv"))
    );
    assert_eq!(settings.page_size, 25);
    assert_eq!(settings.listen.to_string(), "0.0.0.0:8080");
}

#[test]
fn load_settings_without_config_uses_defaults() {
    let settings = cli::load_settings(None).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.page_size, 10);
    assert!(settings.data_path.is_none());
}

#[test]
fn load_settings_missing_file_is_config_parse_error() {
    let err = cli::load_settings(Some(std::path::Path::new("/nonexistent/screen.ini"))).unwrap_err();
    assert!(matches!(err, ScreenerError::ConfigParse { .. }));
    let code: std::process::ExitCode = (&err).into();
    assert_eq!(code, std::process::ExitCode::from(2));
}

#[test]
fn load_settings_rejects_bad_values() {
    let file = write_temp_ini("[table]\npage_size = 0\n");
    assert!(matches!(
        cli::load_settings(Some(file.path())),
        Err(ScreenerError::ConfigInvalid { .. })
    ));

    let file = write_temp_ini("[web]\nlisten = nowhere\n");
    assert!(matches!(
        cli::load_settings(Some(file.path())),
        Err(ScreenerError::ConfigInvalid { .. })
    ));
}

#[test]
fn json_and_csv_sources_load_the_same_records() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("stocks.json");
    let csv_path = dir.path().join("stocks.csv");
    fs::write(
        &json_path,
        r#"[
            {"ticker":"BHP","marketCapitalization":12000,"roe":12.0},
            {"ticker":"CBA","marketCapitalization":11000,"roe":"n/a"}
        ]"#,
    )
    .unwrap();
    fs::write(
        &csv_path,
        "ticker,marketCapitalization,roe\nBHP,12000,12.0\nCBA,11000,n/a\n",
    )
    .unwrap();

    let from_json = stock_port_for(Some(&json_path)).load_stocks().unwrap();
    let from_csv = stock_port_for(Some(&csv_path)).load_stocks().unwrap();
    assert_eq!(from_json, from_csv);
    assert_eq!(from_json[1].metric(Metric::Roe), None);
}

#[test]
fn configured_data_path_drives_screening() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("stocks.csv");
    let mut csv = String::from("ticker,roe\n");
    for i in 0..12 {
        csv.push_str(&format!("S{:02},{}\n", i, i * 5));
    }
    fs::write(&csv_path, csv).unwrap();

    let ini = format!("[data]\npath = {}\n[table]\npage_size = 3\n", csv_path.display());
    let file = write_temp_ini(&ini);
    let settings = cli::load_settings(Some(file.path())).unwrap();

    let stocks = stock_port_for(settings.data_path.as_deref())
        .load_stocks()
        .unwrap();
    let outcome = screen(&stocks, "roe > 20");
    let view = build_view(outcome.stocks(), &TableState::default(), settings.page_size);
    assert_eq!(view.total_rows, 7);
    assert_eq!(view.total_pages, 3);
    assert_eq!(tickers(&view.rows), vec!["S05", "S06", "S07"]);
}

#[test]
fn missing_data_file_maps_to_data_exit_code() {
    let err = stock_port_for(Some(std::path::Path::new("/nonexistent/stocks.json")))
        .load_stocks()
        .unwrap_err();
    let code: std::process::ExitCode = (&err).into();
    assert_eq!(code, std::process::ExitCode::from(3));
}

#[test]
fn bundled_data_answers_the_sample_query() {
    let stocks = stock_port_for(None).load_stocks().unwrap();
    let outcome = screen(&stocks, "Market Capitalization > 10000 AND\nROE > 15");
    assert!(!outcome.stocks().is_empty());
    for stock in outcome.stocks() {
        assert!(stock.metric(Metric::MarketCapitalization).unwrap() > 10000.0);
        assert!(stock.metric(Metric::Roe).unwrap() > 15.0);
    }
}

#[test]
fn render_table_prints_one_line_per_row() {
    let stocks = sample_stocks();
    let rows: Vec<_> = stocks.iter().collect();
    let text = cli::render_table(&rows);
    assert_eq!(text.lines().count(), rows.len() + 2);
    assert!(text.contains("NODATA"));
    assert!(text.lines().last().unwrap().trim_end().ends_with('-'));
}
