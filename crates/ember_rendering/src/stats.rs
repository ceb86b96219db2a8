//! Decoder statistics.

use std::ops::AddAssign;

/// What one decoder call drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Active records drawn by at least one pass.
    pub drawn: u32,
    /// Records skipped because their life was not positive.
    pub skipped: u32,
}

impl DrawStats {
    /// Total records inspected.
    #[must_use]
    pub fn inspected(&self) -> u32 {
        self.drawn + self.skipped
    }

    /// Fraction of inspected records that were drawn.
    #[must_use]
    pub fn fill_ratio(&self) -> f32 {
        let total = self.inspected();
        if total > 0 {
            self.drawn as f32 / total as f32
        } else {
            0.0
        }
    }
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.skipped += rhs.skipped;
    }
}
