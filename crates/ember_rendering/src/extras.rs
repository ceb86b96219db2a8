//! Per-scene decoration parameters.

use serde::{Deserialize, Serialize};

/// Text region in unit space (`y` up, origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl TextBox {
    /// Pixel rectangle `(x, y, w, h)` on a `width` x `height` surface.
    #[must_use]
    pub fn to_canvas(&self, width: f32, height: f32) -> (f32, f32, f32, f32) {
        (
            self.x * width,
            (1.0 - self.y - self.h) * height,
            self.w * width,
            self.h * height,
        )
    }

    /// Point just above the top-center of the box, where text particles spawn.
    #[must_use]
    pub fn spawn_origin(&self) -> [f32; 2] {
        [self.x + self.w / 2.0, self.y + self.h + 0.1]
    }
}

/// Optional decoration a decoder draws besides particles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneExtras {
    /// Torch top in unit space (fire).
    pub torch: Option<[f32; 2]>,
    /// Text region (text).
    pub text_box: Option<TextBox>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_box_geometry() {
        let text_box = TextBox { x: 0.35, y: 0.2, w: 0.3, h: 0.25 };
        let (x, y, w, h) = text_box.to_canvas(200.0, 100.0);
        assert!((x - 70.0).abs() < 1e-4);
        assert!((y - 55.0).abs() < 1e-4);
        assert!((w - 60.0).abs() < 1e-4);
        assert!((h - 25.0).abs() < 1e-4);

        let origin = text_box.spawn_origin();
        assert!((origin[0] - 0.5).abs() < 1e-6);
        assert!((origin[1] - 0.55).abs() < 1e-6);
    }
}
