use crate::band::Band;

/// Opaque black, also the in-set sentinel color.
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// An RGBA pixel buffer representing a rendered image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl RenderBuffer {
    /// Create a new buffer filled with black (opaque).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: BLACK.repeat(width as usize * height as usize),
        }
    }

    /// Paint every pixel opaque black.
    pub fn clear(&mut self) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&BLACK);
        }
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&color);
    }

    /// Copy a band's RGBA data into its columns of this buffer.
    ///
    /// `band_pixels` is row-major with `band.width()` pixels per row and
    /// the same number of rows as this buffer.
    pub fn blit_band(&mut self, band: &Band, band_pixels: &[u8]) {
        debug_assert_eq!(band_pixels.len(), band.pixel_count(self.height) * 4);
        let stride = self.width as usize * 4;
        let row_len = band.width() as usize * 4;
        if row_len == 0 {
            return;
        }
        let col = band.start_column as usize * 4;
        for (row, src) in band_pixels.chunks_exact(row_len).enumerate() {
            let dst = row * stride + col;
            self.pixels[dst..dst + row_len].copy_from_slice(src);
        }
    }
}
