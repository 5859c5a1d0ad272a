// File: crates/tempchart-render-skia/src/chart.rs
// Summary: Headless frame rasterisation: grid, axes, signed bars, labels and side annotations.

use anyhow::Result;
use skia_safe as skia;
use tempchart_core::scale::format_tick;
use tempchart_core::{AxisDomain, Frame, FrameKind};

use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, RectI32, ANNOTATION_WIDTH, HEIGHT, WIDTH};

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Text off gives byte-stable output on machines with different fonts.
    pub draw_labels: bool,
    pub font_size: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
            font_size: 15.0,
        }
    }
}

/// Render `frame` and return PNG bytes.
pub fn render_to_png_bytes(frame: &Frame, opts: &RenderOptions, shaper: &TextShaper) -> Result<Vec<u8>> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(opts.theme.background);

    let plot = RectI32::plot(opts.width, opts.height, &opts.insets);
    let domain = frame.nice_domain();
    let ticks = frame.ticks();

    draw_grid(canvas, &plot, &domain, &ticks, frame.bars.len(), &opts.theme);
    draw_bars(canvas, &plot, &domain, frame, opts, shaper);
    draw_axes(canvas, &plot, &domain, &ticks, frame, opts, shaper);
    if opts.draw_labels {
        draw_annotations(canvas, &plot, frame, opts, shaper);
    }

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

// ---- helpers ----------------------------------------------------------------

fn y_px(plot: &RectI32, domain: &AxisDomain, v: f64) -> f32 {
    let span = domain.span().max(1e-9);
    plot.bottom as f32 - ((v - domain.low) / span) as f32 * plot.height() as f32
}

/// Band width and the bar width inside it. Snapshot bars are half as wide as
/// their band; time-series bars fill it.
fn band(plot: &RectI32, n: usize, kind: &FrameKind) -> (f32, f32) {
    let band = plot.width() as f32 / n.max(1) as f32;
    let inner = band * 0.9;
    let bar = match kind {
        FrameKind::Snapshot { .. } => inner * 0.5,
        FrameKind::Interactive { .. } => inner,
    };
    (band, bar)
}

fn draw_grid(canvas: &skia::Canvas, plot: &RectI32, domain: &AxisDomain, ticks: &[f64], n: usize, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let (l, r) = (plot.left as f32, plot.right as f32);
    for &t in ticks {
        let y = y_px(plot, domain, t);
        canvas.draw_line((l, y), (r, y), &paint);
    }
    // band separators
    let step = plot.width() as f32 / n.max(1) as f32;
    for i in 0..=n {
        let x = l + step * i as f32;
        canvas.draw_line((x, plot.top as f32), (x, plot.bottom as f32), &paint);
    }
}

fn draw_bars(
    canvas: &skia::Canvas,
    plot: &RectI32,
    domain: &AxisDomain,
    frame: &Frame,
    opts: &RenderOptions,
    shaper: &TextShaper,
) {
    if frame.bars.is_empty() { return; }
    let (band_px, bar_px) = band(plot, frame.bars.len(), &frame.kind);
    let zero = y_px(plot, domain, 0f64.clamp(domain.low, domain.high));

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);

    for (i, b) in frame.bars.iter().enumerate() {
        if !b.value.is_finite() { continue; }
        let cx = plot.left as f32 + band_px * (i as f32 + 0.5);
        let yv = y_px(plot, domain, b.value);
        let (top, bottom) = (yv.min(zero), yv.max(zero));
        fill.set_color(opts.theme.bar(b.value));
        let rect = skia::Rect::from_ltrb(cx - bar_px * 0.5, top, cx + bar_px * 0.5, bottom.max(top + 1.0));
        canvas.draw_rect(rect, &fill);

        if opts.draw_labels && matches!(frame.kind, FrameKind::Snapshot { .. }) {
            shaper.draw_centered(canvas, &b.value_label(), cx, top - 5.0, opts.font_size + 1.0, opts.theme.axis_label);
        }
    }
}

fn draw_axes(
    canvas: &skia::Canvas,
    plot: &RectI32,
    domain: &AxisDomain,
    ticks: &[f64],
    frame: &Frame,
    opts: &RenderOptions,
    shaper: &TextShaper,
) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(opts.theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    canvas.draw_line((l, b), (r, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);

    if !opts.draw_labels { return; }
    let size = opts.font_size;

    for &tv in ticks {
        let y = y_px(plot, domain, tv);
        let label = format_tick(tv);
        let w = shaper.measure_width(&label, size);
        canvas.draw_line((l - 6.0, y), (l, y), &axis_paint);
        shaper.draw_left(canvas, &label, l - 10.0 - w, y + size * 0.35, size, opts.theme.tick);
    }

    let (band_px, _) = band(plot, frame.bars.len(), &frame.kind);
    for (i, bar) in frame.bars.iter().enumerate() {
        if !frame.shows_x_tick(&bar.label) { continue; }
        let cx = l + band_px * (i as f32 + 0.5);
        canvas.draw_line((cx, b), (cx, b + 6.0), &axis_paint);
        shaper.draw_centered(canvas, &bar.label, cx, b + 8.0 + size, size, opts.theme.tick);
    }

    // rotated y label, centered on the plot height
    let label_w = shaper.measure_width(&frame.y_label, size + 1.0);
    canvas.save();
    canvas.translate((l - 48.0, (t + b) * 0.5));
    canvas.rotate(-90.0, None);
    shaper.draw_left(canvas, &frame.y_label, -label_w * 0.5, 0.0, size + 1.0, opts.theme.axis_label);
    canvas.restore();

    shaper.draw_left(canvas, &frame.title, l, t - 16.0, size + 5.0, opts.theme.axis_label);
}

fn draw_annotations(canvas: &skia::Canvas, plot: &RectI32, frame: &Frame, opts: &RenderOptions, shaper: &TextShaper) {
    let size = opts.font_size + 1.0;
    let line_h = size * 1.2;
    let x = plot.right as f32 + 10.0;
    let mut y = plot.top as f32 + 10.0;
    for (i, entry) in frame.annotations.iter().enumerate() {
        if i > 0 && entry.starts_block() { y += line_h * 0.5; }
        for line in shaper.wrap(&entry.text, ANNOTATION_WIDTH, size) {
            shaper.draw_left(canvas, &line, x, y, size, opts.theme.annotation);
            y += line_h;
        }
    }
}
