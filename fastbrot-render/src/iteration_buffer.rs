use crate::band::Band;

/// Raw per-pixel escape counts for a full frame.
///
/// Kept next to the colored canvas so a palette change or rotation can
/// recolor the frame without iterating a single point again.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationBuffer {
    pub width: u32,
    pub height: u32,
    /// The limit the counts were computed against.
    pub iteration_limit: u32,
    pub counts: Vec<u32>,
}

impl IterationBuffer {
    pub fn new(width: u32, height: u32, iteration_limit: u32) -> Self {
        Self {
            width,
            height,
            iteration_limit,
            counts: vec![0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn count(&self, x: u32, y: u32) -> u32 {
        self.counts[y as usize * self.width as usize + x as usize]
    }

    /// Copy a band's counts into its columns of this buffer.
    pub fn blit_band(&mut self, band: &Band, band_counts: &[u32]) {
        debug_assert_eq!(band_counts.len(), band.pixel_count(self.height));
        let row_len = band.width() as usize;
        if row_len == 0 {
            return;
        }
        let stride = self.width as usize;
        let col = band.start_column as usize;
        for (row, src) in band_counts.chunks_exact(row_len).enumerate() {
            let dst = row * stride + col;
            self.counts[dst..dst + row_len].copy_from_slice(src);
        }
    }

    /// Number of pixels that ran to the iteration limit.
    pub fn interior_count(&self) -> usize {
        self.counts
            .iter()
            .filter(|&&n| n >= self.iteration_limit)
            .count()
    }
}
