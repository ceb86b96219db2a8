//! Blend modes for particle passes.
//!
//! Two modes, two jobs:
//! - `Normal` (SRC_ALPHA + ONE_MINUS_SRC_ALPHA) for smoke, ash and anything
//!   that blocks light. Order dependent.
//! - `Additive` (ONE + ONE) for flames and sparks. Order independent among
//!   additive draws, but not with the normal draws beneath it, so normal
//!   passes always run first.
//!
//! ```text
//! color_blend (additive):
//!   src_factor: ONE
//!   dst_factor: ONE
//!   operation: ADD
//! ```

/// Compositing mode of a 2D surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Source-over alpha blending.
    #[default]
    Normal,
    /// Additive (lighter) blending.
    Additive,
}

impl BlendMode {
    /// Canvas composite-operation name.
    #[must_use]
    pub const fn composite_operation(self) -> &'static str {
        match self {
            BlendMode::Normal => "source-over",
            BlendMode::Additive => "lighter",
        }
    }

    /// True when draws under this mode may be reordered freely.
    #[must_use]
    pub const fn is_order_independent(self) -> bool {
        matches!(self, BlendMode::Additive)
    }

    /// Blend equation for a GPU-backed surface.
    #[must_use]
    pub const fn blend_state(self) -> BlendStateConfig {
        match self {
            BlendMode::Normal => BlendStateConfig {
                color_src: BlendFactor::SrcAlpha,
                color_dst: BlendFactor::OneMinusSrcAlpha,
                alpha_src: BlendFactor::One,
                alpha_dst: BlendFactor::OneMinusSrcAlpha,
            },
            BlendMode::Additive => BlendStateConfig {
                color_src: BlendFactor::SrcAlpha,
                color_dst: BlendFactor::One,
                alpha_src: BlendFactor::One,
                alpha_dst: BlendFactor::One,
            },
        }
    }
}

/// Blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    /// 1
    One,
    /// src.a
    SrcAlpha,
    /// 1 - src.a
    OneMinusSrcAlpha,
}

/// Blend equation; the operation is always `src * f_src + dst * f_dst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendStateConfig {
    /// Source factor for color.
    pub color_src: BlendFactor,
    /// Destination factor for color.
    pub color_dst: BlendFactor,
    /// Source factor for alpha.
    pub alpha_src: BlendFactor,
    /// Destination factor for alpha.
    pub alpha_dst: BlendFactor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_names() {
        assert_eq!(BlendMode::Normal.composite_operation(), "source-over");
        assert_eq!(BlendMode::Additive.composite_operation(), "lighter");
        assert_eq!(BlendMode::default(), BlendMode::Normal);
    }

    #[test]
    fn test_additive_keeps_destination() {
        let state = BlendMode::Additive.blend_state();
        assert_eq!(state.color_dst, BlendFactor::One);
        assert!(BlendMode::Additive.is_order_independent());
        assert!(!BlendMode::Normal.is_order_independent());
    }
}
