// File: crates/tempchart-core/src/scale.rs
// Summary: Y-axis domains (fixed snapshot range, dynamic per-entity range) with nice rounding and ticks.

use crate::error::{ChartError, Result};

/// Closed value interval for the y-axis.
/// Contract: `low <= high`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisDomain {
    pub low: f64,
    pub high: f64,
}

impl AxisDomain {
    /// Swaps the bounds if given out of order.
    pub fn new(low: f64, high: f64) -> Self {
        if low <= high { Self { low, high } } else { Self { low: high, high: low } }
    }

    pub fn span(&self) -> f64 { self.high - self.low }

    pub fn contains(&self, v: f64) -> bool { v >= self.low && v <= self.high }

    /// Extend both bounds outward to multiples of the tick step for `count` ticks.
    pub fn nice(&self, count: usize) -> Self {
        let (mut low, mut high) = (self.low, self.high);
        let mut prev_step = f64::NAN;
        for _ in 0..10 {
            let step = tick_step(low, high, count);
            if !(step > 0.0) || step == prev_step {
                break;
            }
            low = snap(low, step, f64::floor);
            high = snap(high, step, f64::ceil);
            prev_step = step;
        }
        Self { low, high }
    }

    /// Tick values inside the domain on a 1/2/5 x 10^n grid, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let step = tick_step(self.low, self.high, count);
        if !(step > 0.0) || !step.is_finite() {
            return vec![self.low];
        }
        let i0 = index_of(self.low, step, f64::ceil);
        let i1 = index_of(self.high, step, f64::floor);
        (i0..=i1).map(|i| from_index(i, step)).collect()
    }
}

// Sub-unit steps go through their integer inverse (0.1 -> 10) so that
// multiples like -0.2 come out exact instead of -0.30000000000000004.
fn index_of(v: f64, step: f64, round: fn(f64) -> f64) -> i64 {
    if step < 1.0 { round(v * (1.0 / step).round()) as i64 } else { round(v / step) as i64 }
}

fn from_index(i: i64, step: f64) -> f64 {
    if step < 1.0 { i as f64 / (1.0 / step).round() } else { i as f64 * step }
}

fn snap(v: f64, step: f64, round: fn(f64) -> f64) -> f64 { from_index(index_of(v, step, round), step) }

/// Step between ticks for the interval, snapped to 1, 2, 5 or 10 times a power of ten.
pub fn tick_step(low: f64, high: f64, count: usize) -> f64 {
    let span = high - low;
    if !(span > 0.0) || count == 0 {
        return 0.0;
    }
    let raw = span / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let err = raw / base;
    let factor = if err >= 50f64.sqrt() {
        10.0
    } else if err >= 10f64.sqrt() {
        5.0
    } else if err >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Snapshot pages share one domain regardless of data: `[0, pad_to]`.
pub fn fixed_domain(pad_to: f64) -> AxisDomain { AxisDomain::new(0.0, pad_to) }

/// Domain for one entity's series: `[min(0, min), max]` over its defined values.
///
/// Zero stays in view as the baseline anchor. A series with no defined value
/// is a data error rather than an empty `[0, 0]`.
pub fn dynamic_domain(entity: &str, series: &[f64]) -> Result<AxisDomain> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in series.iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return Err(ChartError::MissingSeries { entity: entity.to_string() });
    }
    Ok(AxisDomain { low: lo.min(0.0), high: hi })
}

/// One-decimal tick label.
pub fn format_tick(v: f64) -> String {
    let s = format!("{v:.1}");
    if s == "-0.0" { "0.0".to_string() } else { s }
}
