use std::f64::consts::PI;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::{RenderBuffer, BLACK};
use crate::error::RenderError;
use crate::iteration_buffer::IterationBuffer;

/// Number of entries in a color table.
pub const PALETTE_SIZE: usize = 256;

// ---------------------------------------------------------------------------
// Generation policy
// ---------------------------------------------------------------------------

/// Which closed-form rule fills a [`ColorTable`].
///
/// Serialized as its 1-based selector, matching the palette keys `1`..`4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PalettePolicy {
    /// Short runs of semi-smooth transitions, all over the spectrum.
    Banded = 1,
    /// Repeating black / grey / white bands.
    TriLevel = 2,
    /// Smooth ramp from black to white.
    GrayRamp = 3,
    /// Smooth red ↔ blue waves.
    #[default]
    RedBlue = 4,
}

impl PalettePolicy {
    pub const ALL: [Self; 4] = [Self::Banded, Self::TriLevel, Self::GrayRamp, Self::RedBlue];

    pub fn label(self) -> &'static str {
        match self {
            Self::Banded => "Banded",
            Self::TriLevel => "Tri-level",
            Self::GrayRamp => "Gray ramp",
            Self::RedBlue => "Red/blue",
        }
    }

    /// Color for table slot `i` (1-based; slot 0 is always the sentinel).
    fn entry(self, i: usize) -> [u8; 4] {
        match self {
            Self::Banded => [
                ((20 + i * 10) % 256) as u8,
                ((30 + i * 20) % 256) as u8,
                ((10 + i * 15) % 256) as u8,
                255,
            ],
            Self::TriLevel => {
                let v = (i % 3 * 122) as u8;
                [v, v, v, 255]
            }
            Self::GrayRamp => {
                let v = (i * 255 / PALETTE_SIZE) as u8;
                [v, v, v, 255]
            }
            Self::RedBlue => {
                let theta = 3.0 * PI * i as f64 / PALETTE_SIZE as f64;
                [
                    (theta.sin().abs() * 255.0) as u8,
                    0,
                    (theta.cos().abs() * 255.0) as u8,
                    255,
                ]
            }
        }
    }
}

impl TryFrom<u8> for PalettePolicy {
    type Error = RenderError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            1 => Ok(Self::Banded),
            2 => Ok(Self::TriLevel),
            3 => Ok(Self::GrayRamp),
            4 => Ok(Self::RedBlue),
            other => Err(RenderError::InvalidPalette(other)),
        }
    }
}

impl From<PalettePolicy> for u8 {
    fn from(policy: PalettePolicy) -> Self {
        policy as u8
    }
}

// ---------------------------------------------------------------------------
// Color table
// ---------------------------------------------------------------------------

/// A fixed ring of [`PALETTE_SIZE`] RGBA colors.
///
/// Slot 0 is reserved for points that never escaped and is always black.
/// Slots `1..PALETTE_SIZE` can be rotated to animate the palette without
/// touching any iteration data.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    policy: PalettePolicy,
    rotation: usize,
    colors: [[u8; 4]; PALETTE_SIZE],
}

impl ColorTable {
    pub fn new(policy: PalettePolicy) -> Self {
        let mut table = Self {
            policy,
            rotation: 0,
            colors: [BLACK; PALETTE_SIZE],
        };
        table.generate(policy);
        table
    }

    /// Refill the whole table from `policy`, clearing any rotation.
    pub fn generate(&mut self, policy: PalettePolicy) {
        self.colors[0] = BLACK;
        for (i, slot) in self.colors.iter_mut().enumerate().skip(1) {
            *slot = policy.entry(i);
        }
        self.policy = policy;
        self.rotation = 0;
    }

    /// Shift slots `1..PALETTE_SIZE` one place to the left, wrapping the
    /// first around to the end. Slot 0 stays put.
    pub fn rotate(&mut self) {
        self.colors[1..].rotate_left(1);
        self.rotation = (self.rotation + 1) % (PALETTE_SIZE - 1);
    }

    pub fn policy(&self) -> PalettePolicy {
        self.policy
    }

    /// Rotation steps applied since the last `generate`, modulo the cycle.
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }

    /// Table slot for an escape count under a given iteration limit.
    ///
    /// A count equal to the limit lands on slot 0, the in-set color.
    #[inline]
    pub fn index_for(count: u32, iteration_limit: u32) -> usize {
        (count % iteration_limit.max(1)) as usize % PALETTE_SIZE
    }

    #[inline]
    pub fn color(&self, index: usize) -> [u8; 4] {
        self.colors[index % PALETTE_SIZE]
    }

    #[inline]
    pub fn color_for(&self, count: u32, iteration_limit: u32) -> [u8; 4] {
        self.colors[Self::index_for(count, iteration_limit)]
    }

    /// Recolor `canvas` from cached escape counts.
    pub fn colorize(&self, iterations: &IterationBuffer, canvas: &mut RenderBuffer) {
        debug_assert_eq!(iterations.counts.len() * 4, canvas.pixels.len());
        let limit = iterations.iteration_limit;
        canvas
            .pixels
            .par_chunks_mut(4)
            .zip(iterations.counts.par_iter())
            .for_each(|(pixel, &count)| {
                pixel.copy_from_slice(&self.color_for(count, limit));
            });
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new(PalettePolicy::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
