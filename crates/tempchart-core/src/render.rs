// File: crates/tempchart-core/src/render.rs
// Summary: Renderer boundary: immutable frames handed to a drawing backend, plus a plain-text backend.

use std::io::Write;

use log::warn;

use crate::annotate::Annotation;
use crate::error::{ChartError, Result};
use crate::scale::{format_tick, AxisDomain};
use crate::types::format_value;

/// One bar: category label and signed value. A NaN value is a gap: the
/// category keeps its slot but nothing is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Value as shown in labels.
    pub display: String,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value, display: format_value(value) }
    }

    /// Bar whose label keeps the given text, e.g. a cell exactly as the source wrote it.
    pub fn with_display(label: impl Into<String>, value: f64, display: impl Into<String>) -> Self {
        Self { label: label.into(), value, display: display.into() }
    }

    pub fn is_negative(&self) -> bool { self.value < 0.0 }

    pub fn is_defined(&self) -> bool { self.value.is_finite() }

    /// `0.83°C`; empty for a gap.
    pub fn value_label(&self) -> String {
        if self.is_defined() { format!("{}°C", self.display) } else { String::new() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FrameKind {
    Snapshot { year: i32 },
    Interactive { entity: String },
}

/// Everything a backend needs to draw one page. Built fresh for every pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub kind: FrameKind,
    pub title: String,
    pub bars: Vec<Bar>,
    /// Domain before nice rounding.
    pub domain: AxisDomain,
    pub tick_count: usize,
    pub y_label: String,
    /// Bar labels that get a visible x-axis tick; all bars when `None`.
    pub x_tick_labels: Option<Vec<String>>,
    /// Side text, one entry per line. Empty means no annotation at all.
    pub annotations: Vec<Annotation>,
}

impl Frame {
    /// Domain the axis is drawn with.
    pub fn nice_domain(&self) -> AxisDomain { self.domain.nice(self.tick_count) }

    pub fn ticks(&self) -> Vec<f64> { self.nice_domain().ticks(self.tick_count) }

    pub fn shows_x_tick(&self, label: &str) -> bool {
        match &self.x_tick_labels {
            Some(labels) => labels.iter().any(|l| l == label),
            None => true,
        }
    }

    pub fn bar(&self, label: &str) -> Option<&Bar> { self.bars.iter().find(|b| b.label == label) }

    /// Annotation lines without their roles.
    pub fn annotation_text(&self) -> Vec<&str> { self.annotations.iter().map(|a| a.text.as_str()).collect() }
}

/// Drawing backend consumed by the controller.
pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> Result<()>;

    /// Show a pass failure to the user. The previously rendered frame stays up.
    fn report_error(&mut self, err: &ChartError) {
        warn!("render pass failed: {err}");
    }
}

/// Writes frames as indented text listings.
pub struct TextRenderer<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self { Self { out, width: 40 } }

    /// Characters used by the longest bar.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn into_inner(self) -> W { self.out }

    fn write_frame(&mut self, frame: &Frame) -> std::io::Result<()> {
        let domain = frame.nice_domain();
        writeln!(self.out, "== {}", frame.title)?;
        let ticks = frame.ticks().into_iter().map(format_tick).collect::<Vec<_>>().join(" ");
        writeln!(self.out, "   {} [{ticks}]", frame.y_label)?;
        let name_w = frame.bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
        let scale = domain.span().abs().max(1e-12);
        for b in &frame.bars {
            let n = if b.is_defined() { ((b.value.abs() / scale) * self.width as f64).round() as usize } else { 0 };
            let glyph = if b.is_negative() { '-' } else { '#' };
            let bar: String = std::iter::repeat(glyph).take(n.min(self.width)).collect();
            writeln!(self.out, "   {:<name_w$} | {:<w$} {}", b.label, bar, b.value_label(), w = self.width)?;
        }
        for (i, a) in frame.annotations.iter().enumerate() {
            if i > 0 && a.starts_block() {
                writeln!(self.out, "   >")?;
            }
            writeln!(self.out, "   > {}", a.text)?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.write_frame(frame).map_err(|e| ChartError::Render(e.to_string()))
    }

    fn report_error(&mut self, err: &ChartError) {
        warn!("render pass failed: {err}");
        if let Err(e) = writeln!(self.out, "!! {err}") {
            warn!("could not write error to text output: {e}");
        }
    }
}
