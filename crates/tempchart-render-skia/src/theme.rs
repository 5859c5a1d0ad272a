// File: crates/tempchart-render-skia/src/theme.rs
// Summary: Light/Dark palettes for bar charts; warm bars above the baseline, cool bars below.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub bar_warm: skia::Color,
    pub bar_cool: skia::Color,
    pub annotation: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 0, 0, 0),
            tick: skia::Color::from_argb(255, 0, 0, 0),
            bar_warm: skia::Color::from_argb(255, 0xd9, 0x6f, 0x6f),
            bar_cool: skia::Color::from_argb(255, 0, 197, 255),
            annotation: skia::Color::from_argb(255, 0, 0, 0),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            bar_warm: skia::Color::from_argb(255, 220, 80, 80),
            bar_cool: skia::Color::from_argb(255, 64, 160, 255),
            annotation: skia::Color::from_argb(255, 210, 210, 220),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            axis_line: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tick: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            bar_warm: skia::Color::from_argb(255, 0xff, 0x00, 0x00),
            bar_cool: skia::Color::from_argb(255, 0x00, 0xff, 0xff),
            annotation: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
        }
    }

    /// Bar fill for a signed value.
    pub fn bar(&self, value: f64) -> skia::Color {
        if value >= 0.0 { self.bar_warm } else { self.bar_cool }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
