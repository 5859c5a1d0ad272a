// File: crates/tempchart-core/src/source.rs
// Summary: Data sources producing rows: CSV files (`Country`, `F<year>` columns) and in-memory tables.

use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{ChartError, Result};
use crate::types::{parse_year_column, Row, ENTITY_COLUMN};

/// Loads the full row table. Called once per render pass.
pub trait DataSource {
    fn load_rows(&mut self) -> Result<Vec<Row>>;
}

/// Reads rows from a CSV file on every call.
#[derive(Clone, Debug)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }
}

impl DataSource for CsvSource {
    fn load_rows(&mut self) -> Result<Vec<Row>> {
        let file = std::fs::File::open(&self.path)
            .map_err(|e| ChartError::DataLoad(format!("opening {}: {e}", self.path.display())))?;
        let rows = read_rows(file)?;
        debug!("loaded {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

/// Serves a fixed table; handy for tests and for callers that already hold rows.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    rows: Vec<Row>,
}

impl MemorySource {
    pub fn new(rows: Vec<Row>) -> Self { Self { rows } }
}

impl DataSource for MemorySource {
    fn load_rows(&mut self) -> Result<Vec<Row>> { Ok(self.rows.clone()) }
}

/// Parse a temperature table from any reader.
///
/// Every `F<year>` column is kept; other columns are ignored. Empty or
/// unparseable cells are stored as NaN rather than rejected. Cell text is
/// kept alongside the value so labels show it unchanged.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let i_entity = headers
        .iter()
        .position(|h| h.trim() == ENTITY_COLUMN)
        .ok_or_else(|| ChartError::DataLoad(format!("missing '{ENTITY_COLUMN}' column")))?;
    let year_cols: Vec<(usize, i32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| parse_year_column(h).map(|y| (i, y)))
        .collect();
    debug!("found {} year columns", year_cols.len());

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let Some(entity) = rec.get(i_entity) else { continue };
        let mut row = Row::new(entity.trim());
        for &(ix, year) in &year_cols {
            row.set_cell(year, rec.get(ix).unwrap_or(""));
        }
        out.push(row);
    }
    Ok(out)
}
