// File: crates/tempchart-core/src/error.rs
// Summary: Error kinds surfaced by a render pass, data loading and configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Fetching or parsing the source table failed.
    #[error("failed to load data: {0}")]
    DataLoad(String),

    /// A required row (normally the aggregate) is absent.
    #[error("entity '{entity}' not found in data{}", year_suffix(.year))]
    MissingEntity { entity: String, year: Option<i32> },

    /// The selected entity has no defined value anywhere in the year range.
    #[error("no values for '{entity}' in the selected year range")]
    MissingSeries { entity: String },

    #[error("entity selection is only valid in the interactive view")]
    NotInteractive,

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The drawing backend could not produce its output.
    #[error("render failed: {0}")]
    Render(String),
}

fn year_suffix(year: &Option<i32>) -> String {
    year.map(|y| format!(" for {y}")).unwrap_or_default()
}

impl From<csv::Error> for ChartError {
    fn from(e: csv::Error) -> Self { ChartError::DataLoad(e.to_string()) }
}

impl From<toml::de::Error> for ChartError {
    fn from(e: toml::de::Error) -> Self { ChartError::Config(e.to_string()) }
}
