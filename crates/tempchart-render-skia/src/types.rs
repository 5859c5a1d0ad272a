// File: crates/tempchart-render-skia/src/types.rs
// Summary: Surface sizes, plot margins and the plot rectangle derived from them.

/// Default surface width in pixels.
pub const WIDTH: i32 = 1200;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 500;
/// Width reserved for wrapped side annotations.
pub const ANNOTATION_WIDTH: f32 = 190.0;

/// Screen margins, in pixels. The right margin holds the annotations.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72, 220, 48, 40)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    /// Plot area of a `width` x `height` surface after `insets`.
    pub fn plot(width: i32, height: i32, insets: &Insets) -> Self {
        Self::from_ltrb(
            insets.left as i32,
            insets.top as i32,
            (width - insets.right as i32).max(insets.left as i32 + 1),
            (height - insets.bottom as i32).max(insets.top as i32 + 1),
        )
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}
