//! Packed particle records.
//!
//! Every particle is 8 consecutive `f32`s on the GPU:
//!
//! ```text
//! [x, y, life, seed, vx, vy, kind, aux]
//! ```
//!
//! `y` grows upward, `life <= 0` marks an inactive record, and `kind` is a
//! float discriminant that must be compared against bands, never for equality.

use bytemuck::{Pod, Zeroable};

/// Floats per particle record.
pub const PARTICLE_STRIDE_FLOATS: usize = 8;
/// Bytes per particle record.
pub const PARTICLE_STRIDE_BYTES: usize = PARTICLE_STRIDE_FLOATS * 4;

/// A single particle as the compute kernel writes it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleRecord {
    /// Horizontal position in unit space.
    pub x: f32,
    /// Vertical position in unit space, bottom-up.
    pub y: f32,
    /// Remaining lifetime; `<= 0` is inactive.
    pub life: f32,
    /// Per-particle random seed, opaque to rendering.
    pub seed: f32,
    /// Horizontal velocity.
    pub vx: f32,
    /// Vertical velocity.
    pub vy: f32,
    /// Sub-style discriminant.
    pub kind: f32,
    /// Effect-specific payload (size factor, palette index or label value).
    pub aux: f32,
}

impl ParticleRecord {
    /// Creates an inactive record parked at `origin`.
    #[must_use]
    pub const fn parked(origin: [f32; 2], seed: f32, aux: f32) -> Self {
        Self {
            x: origin[0],
            y: origin[1],
            life: -1.0,
            seed,
            vx: 0.0,
            vy: 0.0,
            kind: 0.0,
            aux,
        }
    }

    /// True when the record should be drawn. NaN lifetimes count as inactive.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.life > 0.0
    }

    /// Converts the unit-space position to surface pixels (top-down `y`).
    #[inline]
    #[must_use]
    pub fn to_canvas(&self, width: f32, height: f32) -> (f32, f32) {
        (self.x * width, (1.0 - self.y) * height)
    }
}

/// Copies raw readback bytes into owned records.
///
/// Trailing bytes that do not form a whole record are ignored. The copy goes
/// through a zeroed `Vec` so the source slice may have any alignment.
#[must_use]
pub fn decode_particles(bytes: &[u8]) -> Vec<ParticleRecord> {
    let count = bytes.len() / PARTICLE_STRIDE_BYTES;
    let mut records = vec![ParticleRecord::zeroed(); count];
    bytemuck::cast_slice_mut::<ParticleRecord, u8>(&mut records)
        .copy_from_slice(&bytes[..count * PARTICLE_STRIDE_BYTES]);
    records
}

/// Fire sub-styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireKind {
    /// `kind < 0.5`: additive flame.
    Flame,
    /// `kind >= 0.5`: alpha-blended smoke.
    Smoke,
}

impl FireKind {
    /// Classifies a fire `kind` value. The two bands are disjoint and cover
    /// every input, so each record lands in exactly one pass.
    #[inline]
    #[must_use]
    pub fn classify(kind: f32) -> Self {
        if kind < 0.5 {
            FireKind::Flame
        } else {
            FireKind::Smoke
        }
    }
}

/// Firework sub-styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkKind {
    /// `kind < 0.5`: additive palette spark.
    Spark,
    /// `0.9 <= kind <= 1.1`: tinted smoke.
    Smoke,
    /// `kind >= 1.9`: small tinted ash.
    Ash,
}

impl FireworkKind {
    /// Classifies a firework `kind` value. Values between the bands are not
    /// drawn by any layer.
    #[inline]
    #[must_use]
    pub fn classify(kind: f32) -> Option<Self> {
        if kind < 0.5 {
            Some(FireworkKind::Spark)
        } else if (0.9..=1.1).contains(&kind) {
            Some(FireworkKind::Smoke)
        } else if kind >= 1.9 {
            Some(FireworkKind::Ash)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_stride() {
        assert_eq!(std::mem::size_of::<ParticleRecord>(), PARTICLE_STRIDE_BYTES);
        assert_eq!(PARTICLE_STRIDE_BYTES, 32);
    }

    #[test]
    fn test_decode_indexes_by_stride() {
        let floats: Vec<f32> = (0..24).map(|v| v as f32).collect();
        let bytes: &[u8] = bytemuck::cast_slice(&floats);
        let records = decode_particles(bytes);

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].x, 8.0);
        assert_eq!(records[2].aux, 23.0);
    }

    #[test]
    fn test_decode_unaligned_source() {
        let floats = [0.25f32, 0.75, 1.0, 4.0, 0.0, -1.0, 2.0, 7.0];
        let mut bytes = vec![0u8];
        bytes.extend_from_slice(bytemuck::cast_slice(&floats));
        bytes.push(0);

        let records = decode_particles(&bytes[1..]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].y, 0.75);
        assert_eq!(records[0].kind, 2.0);
    }

    #[test]
    fn test_inactive_records() {
        let mut record = ParticleRecord::parked([0.5, 0.5], 1.0, 3.0);
        assert!(!record.is_active());
        record.life = 0.0;
        assert!(!record.is_active());
        record.life = f32::NAN;
        assert!(!record.is_active());
        record.life = 0.01;
        assert!(record.is_active());
    }

    #[test]
    fn test_canvas_flips_y() {
        let record = ParticleRecord { x: 0.25, y: 0.2, ..Default::default() };
        assert_eq!(record.to_canvas(400.0, 100.0), (100.0, 80.0));
    }

    #[test]
    fn test_fire_bands() {
        assert_eq!(FireKind::classify(0.0), FireKind::Flame);
        assert_eq!(FireKind::classify(0.49), FireKind::Flame);
        assert_eq!(FireKind::classify(0.5), FireKind::Smoke);
        assert_eq!(FireKind::classify(1.0), FireKind::Smoke);
    }

    #[test]
    fn test_firework_bands() {
        for kind in [0.0, 0.4] {
            assert_eq!(FireworkKind::classify(kind), Some(FireworkKind::Spark));
        }
        for kind in [0.95, 1.0, 1.05] {
            assert_eq!(FireworkKind::classify(kind), Some(FireworkKind::Smoke));
        }
        for kind in [2.0, 2.5] {
            assert_eq!(FireworkKind::classify(kind), Some(FireworkKind::Ash));
        }
        for kind in [0.7, 1.5] {
            assert_eq!(FireworkKind::classify(kind), None);
        }
    }
}
