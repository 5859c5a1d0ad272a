// File: crates/tempchart-core/src/rank.rs
// Summary: Top-K ranking per year and the appearance history accumulated across a year window.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::types::{Row, AGGREGATE_ENTITY};

/// Top entities for one year, best first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedYear {
    pub year: i32,
    pub top_entities: Vec<String>,
}

/// entity -> years in which it placed in a top-K.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppearanceHistory {
    years: BTreeMap<String, BTreeSet<i32>>,
}

impl AppearanceHistory {
    pub fn new() -> Self { Self::default() }

    /// Record `ranked.year` for each of its entities. Re-recording a year is a no-op.
    pub fn accumulate(&mut self, ranked: &RankedYear) {
        for e in &ranked.top_entities {
            self.years.entry(e.clone()).or_default().insert(ranked.year);
        }
    }

    pub fn years_of(&self, entity: &str) -> Option<&BTreeSet<i32>> { self.years.get(entity) }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<i32>)> { self.years.iter() }

    pub fn len(&self) -> usize { self.years.len() }

    pub fn is_empty(&self) -> bool { self.years.is_empty() }
}

/// Ranks rows by a single year's value, skipping one aggregate row.
#[derive(Clone, Debug)]
pub struct Ranker {
    k: usize,
    aggregate: String,
}

impl Ranker {
    /// `k` must be at least 1; `ChartConfig::validate` rejects 0 before a
    /// session builds its ranker. Debug builds assert it. Release builds rank
    /// with `k = 1` instead of returning an empty snapshot.
    pub fn new(k: usize, aggregate: impl Into<String>) -> Self {
        debug_assert!(k >= 1, "Ranker::new: k must be at least 1");
        Self { k: k.max(1), aggregate: aggregate.into() }
    }

    pub fn k(&self) -> usize { self.k }

    /// Top-k entities for `year`, descending. Rows without a defined value never
    /// make the cut, so fewer than k names come back when data is sparse.
    pub fn rank(&self, rows: &[Row], year: i32) -> RankedYear {
        let mut candidates: Vec<(&str, f64)> = rows
            .iter()
            .filter(|r| r.entity != self.aggregate)
            .map(|r| (r.entity.as_str(), r.value(year)))
            .collect();
        // stable: ties keep file order; NaN sorts after every number
        candidates.sort_by(|a, b| descending_nan_last(a.1, b.1));
        let top_entities: Vec<String> = candidates
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .take(self.k)
            .map(|(e, _)| e.to_string())
            .collect();
        debug!("rank {year}: {top_entities:?}");
        RankedYear { year, top_entities }
    }

    /// Rank every year of `years` and fold the results into a fresh history.
    pub fn history(&self, rows: &[Row], years: &[i32]) -> AppearanceHistory {
        let mut history = AppearanceHistory::new();
        for &y in years {
            history.accumulate(&self.rank(rows, y));
        }
        history
    }
}

impl Default for Ranker {
    fn default() -> Self { Self::new(crate::types::TOP_K, AGGREGATE_ENTITY) }
}

/// Top-k for `year` with the default aggregate excluded. `k >= 1`, see `Ranker::new`.
pub fn rank(rows: &[Row], year: i32, k: usize) -> RankedYear {
    Ranker::new(k, AGGREGATE_ENTITY).rank(rows, year)
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}
