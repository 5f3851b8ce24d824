//! Procedural outlines
//!
//! Rocks get a jittered octagon derived from their shape seed. The outline
//! is recomputed every time it is asked for; the seed is the only thing
//! stored, so the same seed always yields the same shape.

use std::f32::consts::TAU;

use glam::Vec2;

/// 8-bit Galois LFSR with an extra mixing step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr(u8);

impl Lfsr {
    /// Feedback taps applied when a 1 is shifted out
    pub const TAP_MASK: u8 = 0xC7;
    /// The register is XORed with itself shifted left by this much
    pub const MIX_SHIFT: u32 = 7;

    pub const fn new(seed: u8) -> Self {
        Self(seed)
    }

    /// Current register value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Step the register and return the new value
    pub fn next_byte(&mut self) -> u8 {
        let lsb = self.0 & 1;
        self.0 >>= 1;
        if lsb == 1 {
            self.0 ^= Self::TAP_MASK;
        }
        self.0 ^= self.0 << Self::MIX_SHIFT;
        self.0
    }
}

impl Iterator for Lfsr {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_byte())
    }
}

/// Vertices in a rock outline
pub const OBSTACLE_VERTICES: usize = 8;

/// The ship's outline, nose along +y before rotation
pub const SHIP_OUTLINE: [Vec2; 3] = [
    Vec2::new(-3.0, -3.0),
    Vec2::new(0.0, 6.0),
    Vec2::new(3.0, -3.0),
];

/// Radial scale for one LFSR output, in [0.7, 1.3]
#[inline]
pub fn jitter_scale(byte: u8) -> f32 {
    0.7 + (byte as f32 / 255.0) * 0.6
}

/// Build the unrotated outline of a rock of radius `size`.
///
/// Vertex `j` sits at angle `2πj/8`, pushed in or out by the `j+1`th LFSR
/// output. The polygon is closed: the last vertex connects to the first.
pub fn obstacle_outline(size: f32, seed: u8) -> [Vec2; OBSTACLE_VERTICES] {
    let mut lfsr = Lfsr::new(seed);
    std::array::from_fn(|j| {
        let angle = TAU / OBSTACLE_VERTICES as f32 * j as f32;
        let scale = jitter_scale(lfsr.next_byte());
        Vec2::new(angle.sin(), angle.cos()) * size * scale
    })
}

/// Rotate every point of `points` by `angle` around the origin
pub fn rotate(points: &[Vec2], angle: f32) -> Vec<Vec2> {
    // sin/cos once for the whole polygon
    let rotation = Vec2::from_angle(angle);
    points.iter().map(|&p| rotation.rotate(p)).collect()
}
