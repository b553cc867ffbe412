use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use fastbrot_core::{CoordinateMapper, CoreError, EscapeParams, Mandelbrot};

use crate::band::{partition, Band, BandCount};
use crate::buffer::RenderBuffer;
use crate::error::RenderError;
use crate::iteration_buffer::IterationBuffer;
use crate::palette::ColorTable;
use crate::worker::{fill_band, BandBuffer};

/// Summary of one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub elapsed: Duration,
    pub bands: usize,
    pub iteration_limit: u32,
    /// Pixels that ran to the iteration limit.
    pub interior_pixels: usize,
}

/// Owns the persistent canvas and drives the band workers.
///
/// A pass has two phases. First every band is computed on the rayon pool
/// into its own [`BandBuffer`]; nothing shared is written. Once all bands
/// have finished, the bands are copied one after another into the canvas
/// and the iteration cache. The canvas therefore only ever holds a
/// complete frame.
#[derive(Debug)]
pub struct Compositor {
    canvas: RenderBuffer,
    iterations: IterationBuffer,
    bands: Vec<Band>,
    band_buffers: Vec<BandBuffer>,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        check_grid(width, height)?;
        Ok(Self {
            canvas: RenderBuffer::new(width, height),
            iterations: IterationBuffer::new(width, height, 1),
            bands: Vec::new(),
            band_buffers: Vec::new(),
        })
    }

    /// Replace the canvas, cache, and band buffers for a new grid size.
    ///
    /// Either everything is reallocated or, on error, nothing changes.
    pub fn resize(&mut self, width: u32, height: u32) -> crate::Result<()> {
        check_grid(width, height)?;
        if width == self.canvas.width && height == self.canvas.height {
            return Ok(());
        }
        self.canvas = RenderBuffer::new(width, height);
        self.iterations = IterationBuffer::new(width, height, 1);
        self.bands.clear();
        self.band_buffers.clear();
        debug!(width, height, "Resized compositor");
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// The last fully composited frame.
    pub fn canvas(&self) -> &RenderBuffer {
        &self.canvas
    }

    pub(crate) fn canvas_mut(&mut self) -> &mut RenderBuffer {
        &mut self.canvas
    }

    /// Escape counts behind the current canvas.
    pub fn iterations(&self) -> &IterationBuffer {
        &self.iterations
    }

    /// Bands used by the most recent pass.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Run a full render pass for `mapper` and composite it into the canvas.
    pub fn render(
        &mut self,
        mapper: &CoordinateMapper,
        palette: &ColorTable,
        bailout_sq: f64,
        band_count: BandCount,
    ) -> crate::Result<RenderStats> {
        if mapper.grid_width() != self.canvas.width || mapper.grid_height() != self.canvas.height
        {
            return Err(RenderError::GridMismatch {
                mapper_width: mapper.grid_width(),
                mapper_height: mapper.grid_height(),
                canvas_width: self.canvas.width,
                canvas_height: self.canvas.height,
            });
        }
        let start = Instant::now();
        let iteration_limit = mapper.iteration_limit();
        let kernel = Mandelbrot::new(EscapeParams::new(iteration_limit, bailout_sq)?);
        self.prepare_bands(band_count.resolve())?;

        debug!(
            bands = self.bands.len(),
            width = self.canvas.width,
            height = self.canvas.height,
            iteration_limit,
            "Starting band render"
        );

        // Fan out: each worker owns exactly one band buffer.
        let interior_pixels: usize = self
            .bands
            .par_iter()
            .zip(self.band_buffers.par_iter_mut())
            .map(|(band, buffer)| fill_band(band, mapper, &kernel, palette, buffer))
            .sum();

        // Fan in: every band has finished; composite in order.
        self.iterations.iteration_limit = iteration_limit;
        for (band, buffer) in self.bands.iter().zip(&self.band_buffers) {
            self.canvas.blit_band(band, &buffer.pixels);
            self.iterations.blit_band(band, &buffer.counts);
        }

        let elapsed = start.elapsed();
        info!(
            elapsed_ms = elapsed.as_millis(),
            bands = self.bands.len(),
            iteration_limit,
            interior_pixels,
            "Render complete"
        );

        Ok(RenderStats {
            elapsed,
            bands: self.bands.len(),
            iteration_limit,
            interior_pixels,
        })
    }

    /// Recolor the canvas from the cached counts without iterating.
    pub fn recolor(&mut self, palette: &ColorTable) {
        palette.colorize(&self.iterations, &mut self.canvas);
    }

    /// Partition the grid, reusing the previous band buffers when the
    /// layout is unchanged.
    ///
    /// Never more bands than columns: the extra bands would be empty.
    fn prepare_bands(&mut self, band_count: usize) -> crate::Result<()> {
        let height = self.canvas.height;
        let band_count = band_count.min(self.canvas.width as usize);
        let bands = partition(self.canvas.width, band_count)?;
        if bands == self.bands
            && self
                .band_buffers
                .iter()
                .zip(&bands)
                .all(|(buf, band)| buf.fits(band, height))
        {
            return Ok(());
        }
        self.band_buffers = bands
            .iter()
            .map(|band| BandBuffer::for_band(band, height))
            .collect();
        self.bands = bands;
        Ok(())
    }
}

fn check_grid(width: u32, height: u32) -> crate::Result<()> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidGrid { width, height }.into());
    }
    Ok(())
}
