// File: crates/tempchart-core/tests/csv_source.rs
// Purpose: CSV loading (Country + F<year> columns) and TOML configuration from disk.

use std::io::Write;

use tempchart_core::source::read_rows;
use tempchart_core::types::entity_options;
use tempchart_core::{ChartConfig, ChartError, CsvSource, DataSource};

const SAMPLE: &str = "\
ObjectId,Country,ISO3,F1961,F2018,F2019
1,World,WLD,0.211,0.83,0.95
2,Sparse,SPR,,not-a-number,0.4
3,Cold,CLD,-0.12,-0.3,
";

#[test]
fn reads_year_columns_and_maps_blanks_to_nan() {
    let rows = read_rows(SAMPLE.as_bytes()).expect("parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].entity, "World");
    assert_eq!(rows[0].value(2018), 0.83);
    assert_eq!(rows[0].value(1961), 0.211);

    assert!(rows[1].value(1961).is_nan());
    assert!(rows[1].value(2018).is_nan());
    assert_eq!(rows[1].defined_value(2019), Some(0.4));

    assert_eq!(rows[2].value(2018), -0.3);
    assert!(rows[2].value(2019).is_nan());
    // a year with no column at all
    assert!(rows[2].value(1999).is_nan());
}

#[test]
fn missing_country_column_is_a_load_error() {
    let err = read_rows("Name,F2018\nWorld,1.0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, ChartError::DataLoad(_)), "{err}");
}

#[test]
fn invalid_utf8_record_is_a_load_error() {
    let bytes: &[u8] = b"Country,F2018\nW\xff\xfeld,1.0\n";
    let err = read_rows(bytes).unwrap_err();
    assert!(matches!(err, ChartError::DataLoad(_)), "{err}");
}

#[test]
fn invalid_utf8_file_is_a_load_error() {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    f.write_all(b"Country,F2018\nWorld,1.0\nCaf\xe9,0.5\n").expect("write");
    let mut src = CsvSource::new(f.path());
    assert!(matches!(src.load_rows(), Err(ChartError::DataLoad(_))));
}

#[test]
fn cell_text_is_kept_for_display() {
    let rows = read_rows("Country,F2018,F2019\nWorld, 0.380 ,\n".as_bytes()).expect("parse");
    assert_eq!(rows[0].value(2018), 0.38);
    assert_eq!(rows[0].display_value(2018), "0.380");
    assert!(rows[0].value(2019).is_nan());
}

#[test]
fn csv_source_reads_from_disk() {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    f.write_all(SAMPLE.as_bytes()).expect("write");
    let mut src = CsvSource::new(f.path());
    assert_eq!(src.path(), f.path());
    let rows = src.load_rows().expect("load");
    assert_eq!(rows.len(), 3);
    assert_eq!(entity_options(&rows, "World"), vec!["World", "Sparse", "Cold"]);
}

#[test]
fn csv_source_missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut src = CsvSource::new(dir.path().join("absent.csv"));
    assert!(matches!(src.load_rows(), Err(ChartError::DataLoad(_))));
}

#[test]
fn config_from_toml_overrides_defaults() {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(f, "snapshot_years = [2000, 2001]\ntop_k = 3\nshow_global_readout = false").expect("write");
    let cfg = ChartConfig::load(f.path()).expect("config");
    assert_eq!(cfg.snapshot_years, vec![2000, 2001]);
    assert_eq!(cfg.top_k, 3);
    assert!(!cfg.show_global_readout);
    assert_eq!(cfg.aggregate_entity, "World");
    assert_eq!(cfg.window_bounds(), (2000, 2001));
    assert_eq!(cfg.page_count(), 2);
}

#[test]
fn config_validation_errors() {
    assert!(matches!(ChartConfig::from_toml_str("snapshot_years = []"), Err(ChartError::Config(_))));
    assert!(matches!(ChartConfig::from_toml_str("first_year = 2030"), Err(ChartError::Config(_))));
    assert!(matches!(ChartConfig::from_toml_str("top_k = \"five\""), Err(ChartError::Config(_))));
    assert!(ChartConfig::from_toml_str("").is_ok());
}
