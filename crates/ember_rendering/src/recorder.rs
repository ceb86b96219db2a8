//! Recording canvas.
//!
//! Captures every draw together with the style and blend mode in effect at
//! the time. [`Canvas2d::clear`] discards what was recorded, so the recorder
//! always holds exactly one frame.

use crate::blend::BlendMode;
use crate::canvas::{Canvas2d, Paint, Rgba};

/// Shape of a recorded draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled rectangle.
    FillRect {
        /// Left.
        x: f32,
        /// Top.
        y: f32,
        /// Width.
        w: f32,
        /// Height.
        h: f32,
    },
    /// Stroked rectangle.
    StrokeRect {
        /// Left.
        x: f32,
        /// Top.
        y: f32,
        /// Width.
        w: f32,
        /// Height.
        h: f32,
    },
    /// Filled circle.
    Circle {
        /// Center x.
        cx: f32,
        /// Center y.
        cy: f32,
        /// Radius.
        radius: f32,
    },
    /// Stroked segment.
    Line {
        /// Start x.
        x0: f32,
        /// Start y.
        y0: f32,
        /// End x.
        x1: f32,
        /// End y.
        y1: f32,
    },
    /// Text run.
    Text {
        /// Content.
        text: String,
        /// Baseline x.
        x: f32,
        /// Baseline y.
        y: f32,
    },
}

impl DrawOp {
    /// True for ops that use the stroke style.
    #[must_use]
    pub fn is_stroke(&self) -> bool {
        matches!(self, DrawOp::StrokeRect { .. } | DrawOp::Line { .. })
    }
}

/// A draw plus the state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Shape.
    pub op: DrawOp,
    /// Blend mode at issue time.
    pub blend: BlendMode,
    /// Fill style (meaningful for fills and text).
    pub fill: Paint,
    /// Stroke color (meaningful for strokes).
    pub stroke: Rgba,
    /// Stroke width.
    pub line_width: f32,
    /// Font at issue time.
    pub font: String,
}

/// [`Canvas2d`] that records instead of rasterizing.
#[derive(Debug, Clone)]
pub struct DrawRecorder {
    width: f32,
    height: f32,
    blend: BlendMode,
    fill: Paint,
    stroke: Rgba,
    line_width: f32,
    font: String,
    commands: Vec<DrawCommand>,
}

impl DrawRecorder {
    /// Empty recorder of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            blend: BlendMode::Normal,
            fill: Paint::Solid(Rgba::hex(0x00_00_00)),
            stroke: Rgba::hex(0x00_00_00),
            line_width: 1.0,
            font: "10px sans-serif".to_owned(),
            commands: Vec::new(),
        }
    }

    /// Recorded commands in issue order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the style state untouched.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded circles.
    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c.op, DrawOp::Circle { .. })).count()
    }

    /// Number of recorded lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c.op, DrawOp::Line { .. })).count()
    }

    fn record(&mut self, op: DrawOp) {
        self.commands.push(DrawCommand {
            op,
            blend: self.blend,
            fill: self.fill,
            stroke: self.stroke,
            line_width: self.line_width,
            font: self.font.clone(),
        });
    }
}

impl Canvas2d for DrawRecorder {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn set_fill(&mut self, paint: Paint) {
        self.fill = paint;
    }

    fn set_stroke(&mut self, color: Rgba, line_width: f32) {
        self.stroke = color;
        self.line_width = line_width;
    }

    fn set_font(&mut self, font: &str) {
        font.clone_into(&mut self.font);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.record(DrawOp::FillRect { x, y, w, h });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.record(DrawOp::StrokeRect { x, y, w, h });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        self.record(DrawOp::Circle { cx, cy, radius });
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        self.record(DrawOp::Line { x0, y0, x1, y1 });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.record(DrawOp::Text { text: text.to_owned(), x, y });
    }
}
