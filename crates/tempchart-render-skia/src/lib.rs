// File: crates/tempchart-render-skia/src/lib.rs
// Summary: Skia renderer crate; writes one PNG per rendered frame.

pub mod chart;
pub mod text;
pub mod theme;
pub mod types;

use std::path::{Path, PathBuf};

use log::{info, warn};
use tempchart_core::{ChartError, Frame, FrameKind, Renderer};

pub use chart::{render_to_png_bytes, RenderOptions};
pub use text::TextShaper;
pub use theme::Theme;

/// Rasterises each frame to `<out_dir>/<seq>_<page>.png`.
pub struct SkiaRenderer {
    opts: RenderOptions,
    shaper: TextShaper,
    out_dir: PathBuf,
    written: Vec<PathBuf>,
    errors: Vec<String>,
}

impl SkiaRenderer {
    pub fn new(out_dir: impl Into<PathBuf>, opts: RenderOptions) -> Self {
        Self { opts, shaper: TextShaper::new(), out_dir: out_dir.into(), written: Vec::new(), errors: Vec::new() }
    }

    /// Files written so far, in render order.
    pub fn written(&self) -> &[PathBuf] { &self.written }

    /// Messages of the failures reported so far.
    pub fn errors(&self) -> &[String] { &self.errors }

    pub fn out_dir(&self) -> &Path { &self.out_dir }

    fn file_name(&self, frame: &Frame) -> String {
        let page = match &frame.kind {
            FrameKind::Snapshot { year } => format!("snapshot_{year}"),
            FrameKind::Interactive { entity } => format!("series_{}", slug(entity)),
        };
        format!("{:02}_{page}.png", self.written.len())
    }

    fn write_frame(&mut self, frame: &Frame) -> anyhow::Result<PathBuf> {
        let bytes = render_to_png_bytes(frame, &self.opts, &self.shaper)?;
        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(self.file_name(frame));
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

impl Renderer for SkiaRenderer {
    fn render(&mut self, frame: &Frame) -> tempchart_core::Result<()> {
        let path = self.write_frame(frame).map_err(|e| ChartError::Render(format!("{e:#}")))?;
        info!("wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }

    fn report_error(&mut self, err: &ChartError) {
        warn!("frame not rendered: {err}");
        self.errors.push(err.to_string());
    }
}

/// Lowercase file-name-safe form of an entity name.
pub fn slug(name: &str) -> String {
    let s: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let trimmed = s.trim_matches('_');
    if trimmed.is_empty() { "entity".to_string() } else { trimmed.to_string() }
}
