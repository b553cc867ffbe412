use fastbrot_core::{CoordinateMapper, Mandelbrot};

use crate::band::Band;
use crate::palette::ColorTable;

/// Private output of one band worker: escape counts and their colors,
/// row-major, `band.width()` pixels per row.
#[derive(Debug, Clone, Default)]
pub struct BandBuffer {
    pub counts: Vec<u32>,
    pub pixels: Vec<u8>,
}

impl BandBuffer {
    pub fn for_band(band: &Band, height: u32) -> Self {
        let n = band.pixel_count(height);
        Self {
            counts: vec![0; n],
            pixels: vec![0; n * 4],
        }
    }

    /// `true` if this buffer already has the right size for `band`.
    pub fn fits(&self, band: &Band, height: u32) -> bool {
        self.counts.len() == band.pixel_count(height)
    }
}

/// Iterate every pixel in `band` and write its count and color into `out`.
///
/// Reads only the mapper's coordinate tables and the color table, and
/// writes only `out`. Returns how many pixels ran to the iteration limit.
pub fn fill_band(
    band: &Band,
    mapper: &CoordinateMapper,
    kernel: &Mandelbrot,
    palette: &ColorTable,
    out: &mut BandBuffer,
) -> usize {
    debug_assert!(out.fits(band, mapper.grid_height()));
    let limit = kernel.params().iteration_limit;
    let columns = &mapper.column_plane_x()[band.start_column as usize..band.stop_column as usize];
    let mut interior = 0;

    let rows = out
        .counts
        .chunks_exact_mut(columns.len().max(1))
        .zip(out.pixels.chunks_exact_mut(columns.len().max(1) * 4));
    for ((count_row, pixel_row), &ci) in rows.zip(mapper.row_plane_y()) {
        let cells = count_row
            .iter_mut()
            .zip(pixel_row.chunks_exact_mut(4))
            .zip(columns);
        for ((count, pixel), &cr) in cells {
            let n = kernel.escape_count(cr, ci);
            if kernel.is_interior(n) {
                interior += 1;
            }
            *count = n;
            pixel.copy_from_slice(&palette.color_for(n, limit));
        }
    }
    interior
}
