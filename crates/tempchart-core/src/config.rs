// File: crates/tempchart-core/src/config.rs
// Summary: Chart policy settings (years, K, aggregate, annotation wording) loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::types::{AGGREGATE_ENTITY, FIRST_YEAR, LAST_YEAR, SNAPSHOT_YEARS, TOP_K};

/// Policy for one chart session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Years shown as top-K snapshot pages, in page order.
    pub snapshot_years: Vec<i32>,
    /// Entities per snapshot. Default: 5
    pub top_k: usize,
    /// Aggregate row used for the global readout and default selection.
    pub aggregate_entity: String,
    /// First year of the interactive time series. Default: 1961
    pub first_year: i32,
    /// Last year of the interactive time series. Default: 2022
    pub last_year: i32,
    /// Upper bound of the snapshot y-axis before nice rounding. Default: 4.0
    pub fixed_domain_high: f64,
    /// Target y-axis tick count. Default: 4
    pub tick_count: usize,
    /// Emit the "global temperature has risen by" line on snapshot pages.
    pub show_global_readout: bool,
    /// Reference period the values deviate from.
    pub baseline_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            snapshot_years: SNAPSHOT_YEARS.to_vec(),
            top_k: TOP_K,
            aggregate_entity: AGGREGATE_ENTITY.to_string(),
            first_year: FIRST_YEAR,
            last_year: LAST_YEAR,
            fixed_domain_high: 4.0,
            tick_count: 4,
            show_global_readout: true,
            baseline_label: "1951-1980 baseline".to_string(),
        }
    }
}

impl ChartConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: ChartConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChartError::Config(format!("reading {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(ChartError::Config("top_k must be at least 1".into()));
        }
        if self.snapshot_years.is_empty() {
            return Err(ChartError::Config("snapshot_years must not be empty".into()));
        }
        if self.first_year > self.last_year {
            return Err(ChartError::Config(format!(
                "first_year {} is after last_year {}",
                self.first_year, self.last_year
            )));
        }
        if !(self.fixed_domain_high > 0.0) {
            return Err(ChartError::Config("fixed_domain_high must be positive".into()));
        }
        Ok(())
    }

    /// Number of snapshot pages (N).
    pub fn page_count(&self) -> usize { self.snapshot_years.len() }

    /// `(min, max)` of the snapshot window, for annotation headings.
    pub fn window_bounds(&self) -> (i32, i32) {
        let lo = self.snapshot_years.iter().copied().min().unwrap_or(self.first_year);
        let hi = self.snapshot_years.iter().copied().max().unwrap_or(self.last_year);
        (lo, hi)
    }

    /// Axis label for every page.
    pub fn axis_label(&self) -> String { format!("Change °C from {}", self.baseline_label) }
}
