// File: crates/tempchart-core/src/types.rs
// Summary: Shared row model and defaults (aggregate entity, year windows, column naming).

use std::collections::BTreeMap;

/// Name of the global aggregate row in the source table.
pub const AGGREGATE_ENTITY: &str = "World";
/// Years paged through as top-K snapshots.
pub const SNAPSHOT_YEARS: [i32; 5] = [2018, 2019, 2020, 2021, 2022];
/// Entities shown per snapshot.
pub const TOP_K: usize = 5;
/// Full historical range used by the interactive view (inclusive).
pub const FIRST_YEAR: i32 = 1961;
pub const LAST_YEAR: i32 = 2022;

/// Column holding the entity key.
pub const ENTITY_COLUMN: &str = "Country";
/// Prefix of per-year value columns, e.g. `F2018`.
pub const YEAR_COLUMN_PREFIX: char = 'F';

/// Column name for `year`.
pub fn year_column(year: i32) -> String { format!("{YEAR_COLUMN_PREFIX}{year}") }

/// Parse a column name like `F2018` into its year.
pub fn parse_year_column(name: &str) -> Option<i32> {
    name.trim().strip_prefix(YEAR_COLUMN_PREFIX)?.parse().ok()
}

/// One entity's record: its key plus one value per year.
/// Contract: a missing or unparseable value reads back as NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub entity: String,
    values: BTreeMap<i32, f64>,
    // cell text as written in the source, e.g. "0.380"
    texts: BTreeMap<i32, String>,
}

impl Row {
    pub fn new(entity: impl Into<String>) -> Self {
        Self { entity: entity.into(), values: BTreeMap::new(), texts: BTreeMap::new() }
    }

    /// Builder-style helper mostly used by tests and in-memory sources.
    pub fn with_value(mut self, year: i32, value: f64) -> Self {
        self.set_value(year, value);
        self
    }

    pub fn set_value(&mut self, year: i32, value: f64) {
        self.values.insert(year, value);
        self.texts.remove(&year);
    }

    /// Store a source cell: its text, and its parsed value (NaN when unparseable).
    pub fn set_cell(&mut self, year: i32, text: &str) {
        let text = text.trim();
        self.values.insert(year, text.parse::<f64>().unwrap_or(f64::NAN));
        if !text.is_empty() {
            self.texts.insert(year, text.to_string());
        }
    }

    /// Value for `year` as the source wrote it; shortest float form for rows built in code.
    pub fn display_value(&self, year: i32) -> String {
        match self.texts.get(&year) {
            Some(t) => t.clone(),
            None => format_value(self.value(year)),
        }
    }

    /// Value for `year`, NaN when absent.
    pub fn value(&self, year: i32) -> f64 { self.values.get(&year).copied().unwrap_or(f64::NAN) }

    /// Value for `year` when it is a real number.
    pub fn defined_value(&self, year: i32) -> Option<f64> {
        let v = self.value(year);
        if v.is_finite() { Some(v) } else { None }
    }

    /// Values across `first..=last` in year order (NaN where undefined).
    pub fn series(&self, first: i32, last: i32) -> Vec<(i32, f64)> {
        (first..=last).map(|y| (y, self.value(y))).collect()
    }
}

/// Shortest round-trip formatting of a value.
pub fn format_value(v: f64) -> String { format!("{v}") }

/// Find a row by entity key.
pub fn find_row<'a>(rows: &'a [Row], entity: &str) -> Option<&'a Row> {
    rows.iter().find(|r| r.entity == entity)
}

/// Options for an entity selector: the aggregate first, then the rest in file order.
pub fn entity_options(rows: &[Row], aggregate: &str) -> Vec<String> {
    let mut out = vec![aggregate.to_string()];
    for r in rows {
        if !out.iter().any(|e| e == &r.entity) {
            out.push(r.entity.clone());
        }
    }
    out
}
