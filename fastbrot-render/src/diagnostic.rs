//! Orbit plot: draws the intermediate points of every orbit instead of
//! escape counts. Slow and strictly single-threaded; it exists to watch
//! the recurrence at work, not to render.

use tracing::debug;

use fastbrot_core::{CoordinateMapper, EscapeParams, Mandelbrot};

use crate::buffer::RenderBuffer;
use crate::palette::ColorTable;
use crate::surface::PresentationSurface;

/// Longest orbit followed per pixel.
pub const MAX_ORBIT_STEPS: u32 = 10_000;

/// Plot orbits column by column into `canvas`, presenting after each column.
///
/// The canvas is cleared at the start of every column, so each presented
/// frame shows the orbits seeded from one column of the grid.
pub fn plot_orbits<S: PresentationSurface + ?Sized>(
    mapper: &CoordinateMapper,
    palette: &ColorTable,
    bailout_sq: f64,
    canvas: &mut RenderBuffer,
    surface: &mut S,
) -> crate::Result<()> {
    let limit = mapper.iteration_limit();
    let kernel = Mandelbrot::new(EscapeParams::new(limit, bailout_sq)?);
    let (w, h) = (mapper.grid_width() as f64, mapper.grid_height() as f64);
    let mut plotted = 0usize;

    for x in 0..mapper.grid_width() {
        canvas.clear();
        for y in 0..mapper.grid_height() {
            let c = mapper.pixel_to_plane(x as f64, y as f64);
            for (step, z) in kernel.orbit(c, MAX_ORBIT_STEPS) {
                let (px, py) = mapper.plane_to_pixel(z);
                let (px, py) = (px.floor(), py.floor());
                if px >= 0.0 && px < w && py >= 0.0 && py < h {
                    canvas.set_pixel(px as u32, py as u32, palette.color_for(step, limit));
                    plotted += 1;
                }
            }
        }
        surface.present(canvas);
    }

    debug!(plotted, "Orbit plot complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastbrot_core::{IterationBounds, Viewport};

    use crate::buffer::BLACK;
    use crate::surface::RecordingSurface;

    #[test]
    fn presents_once_per_column() {
        let mapper =
            CoordinateMapper::new(&Viewport::default(), 12, 8, IterationBounds::default()).unwrap();
        let mut canvas = RenderBuffer::new(12, 8);
        let mut surface = RecordingSurface::default();
        plot_orbits(&mapper, &ColorTable::default(), 4.0, &mut canvas, &mut surface).unwrap();
        assert_eq!(surface.frames_presented, 12);
    }

    #[derive(Default)]
    struct LitFrames {
        frames: usize,
        lit: usize,
    }

    impl PresentationSurface for LitFrames {
        fn present(&mut self, frame: &RenderBuffer) {
            self.frames += 1;
            if frame.pixels.chunks_exact(4).any(|p| p != BLACK) {
                self.lit += 1;
            }
        }
    }

    #[test]
    fn interior_orbits_light_up_frames() {
        let mapper =
            CoordinateMapper::new(&Viewport::default(), 30, 20, IterationBounds::default()).unwrap();
        let mut canvas = RenderBuffer::new(30, 20);
        let mut surface = LitFrames::default();
        plot_orbits(&mapper, &ColorTable::default(), 4.0, &mut canvas, &mut surface).unwrap();

        assert_eq!(surface.frames, 30);
        // Columns through the main cardioid seed orbits that never leave the view.
        assert!(surface.lit > 0);
    }
}
