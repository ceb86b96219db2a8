//! 2D drawing surface.
//!
//! Decoders only ever talk to [`Canvas2d`]. A browser-style canvas, a
//! software rasterizer or the [`DrawRecorder`](crate::DrawRecorder) used by
//! tests all plug in here.

use crate::blend::BlendMode;

/// Straight-alpha RGBA color. Channels are 0..=255, alpha is 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Opacity in [0, 1].
    pub a: f32,
}

impl Rgba {
    /// Color from channels; alpha is clamped to [0, 1] (NaN becomes 0).
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a: unit(a) }
    }

    /// Opaque color from `0xRRGGBB`.
    #[must_use]
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: unit(a), ..self }
    }

    /// CSS `rgba(...)` notation.
    #[must_use]
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Clamps to [0, 1]; NaN maps to 0.
#[must_use]
pub fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Fill style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Flat color.
    Solid(Rgba),
    /// Top-to-bottom linear gradient across the filled shape.
    VerticalGradient {
        /// Color at the top edge.
        top: Rgba,
        /// Color at the bottom edge.
        bottom: Rgba,
    },
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

/// Immediate-mode 2D surface in canvas coordinates (origin top-left, y down).
pub trait Canvas2d {
    /// Surface width in pixels.
    fn width(&self) -> f32;

    /// Surface height in pixels.
    fn height(&self) -> f32;

    /// Current blend mode.
    fn blend_mode(&self) -> BlendMode;

    /// Erases the whole surface to transparent.
    fn clear(&mut self);

    /// Switches the blend mode for subsequent draws.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Sets the fill style.
    fn set_fill(&mut self, paint: Paint);

    /// Sets stroke color and width.
    fn set_stroke(&mut self, color: Rgba, line_width: f32);

    /// Sets the text font, CSS shorthand.
    fn set_font(&mut self, font: &str);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Strokes an axis-aligned rectangle.
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Fills a circle.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);

    /// Strokes a single segment.
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32);

    /// Draws text with its baseline at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    /// Fills the whole surface.
    fn fill_background(&mut self, paint: Paint) {
        self.set_fill(paint);
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0.0, 0.0, w, h);
    }
}
