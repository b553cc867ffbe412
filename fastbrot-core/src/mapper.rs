use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;
use crate::params::IterationBounds;
use crate::viewport::{Region, Viewport};

/// Affine pixel ↔ plane transform fitted to a pixel grid.
///
/// The viewport is scaled uniformly so that it fits the grid on its tighter
/// axis and is centred on the other (letterboxing), so the requested
/// region is always fully visible and never cropped.
///
/// Plane coordinates for every column and row are precomputed; the band
/// workers only ever index into these tables. Both tables are rebuilt in
/// full on every [`recompute`](Self::recompute).
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    bounds: IterationBounds,
    grid_width: u32,
    grid_height: u32,
    /// Plane units per pixel.
    scale: f64,
    /// Pixel-space offsets: `plane = (pixel - translate) * scale`.
    x_translate: f64,
    y_translate: f64,
    iteration_limit: u32,
    column_plane_x: Vec<f64>,
    row_plane_y: Vec<f64>,
}

impl CoordinateMapper {
    /// Build a mapper for `viewport` on a `grid_width × grid_height` grid.
    pub fn new(
        viewport: &Viewport,
        grid_width: u32,
        grid_height: u32,
        bounds: IterationBounds,
    ) -> crate::Result<Self> {
        let mut mapper = Self {
            bounds,
            grid_width: 0,
            grid_height: 0,
            scale: 1.0,
            x_translate: 0.0,
            y_translate: 0.0,
            iteration_limit: bounds.min,
            column_plane_x: Vec::new(),
            row_plane_y: Vec::new(),
        };
        mapper.recompute(viewport, grid_width, grid_height)?;
        Ok(mapper)
    }

    /// Re-derive the transform, iteration budget, and coordinate tables.
    ///
    /// On error the previous state is kept as-is.
    pub fn recompute(
        &mut self,
        viewport: &Viewport,
        grid_width: u32,
        grid_height: u32,
    ) -> crate::Result<()> {
        if grid_width == 0 || grid_height == 0 {
            return Err(CoreError::InvalidGrid {
                width: grid_width,
                height: grid_height,
            });
        }
        viewport.region().validate()?;

        let w = grid_width as f64;
        let h = grid_height as f64;

        let aspect_canvas = w / h;
        let scale = if aspect_canvas < viewport.aspect() {
            // Fit view to grid width.
            viewport.width / w
        } else {
            // Fit view to grid height.
            viewport.height / h
        };

        // Centre the view on the grid.
        let x_translate = -viewport.left / scale + w / 2.0 - viewport.width / (2.0 * scale);
        let y_translate = -viewport.top / scale + h / 2.0 - viewport.height / (2.0 * scale);

        let iteration_limit = self.bounds.limit_for(viewport.width);

        self.column_plane_x = (0..grid_width)
            .map(|x| (x as f64 - x_translate) * scale)
            .collect();
        self.row_plane_y = (0..grid_height)
            .map(|y| (y as f64 - y_translate) * scale)
            .collect();
        self.grid_width = grid_width;
        self.grid_height = grid_height;
        self.scale = scale;
        self.x_translate = x_translate;
        self.y_translate = y_translate;
        self.iteration_limit = iteration_limit;

        debug!(
            grid_width,
            grid_height, scale, iteration_limit, "Recomputed coordinate mapper"
        );
        Ok(())
    }

    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    pub fn grid_height(&self) -> u32 {
        self.grid_height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn x_translate(&self) -> f64 {
        self.x_translate
    }

    pub fn y_translate(&self) -> f64 {
        self.y_translate
    }

    pub fn iteration_limit(&self) -> u32 {
        self.iteration_limit
    }

    /// Real part for each pixel column, indexed by pixel-x.
    pub fn column_plane_x(&self) -> &[f64] {
        &self.column_plane_x
    }

    /// Imaginary part for each pixel row, indexed by pixel-y.
    pub fn row_plane_y(&self) -> &[f64] {
        &self.row_plane_y
    }

    /// Map (possibly fractional) pixel coordinates onto the plane.
    #[inline]
    pub fn pixel_to_plane(&self, px: f64, py: f64) -> Complex {
        Complex::new(
            (px - self.x_translate) * self.scale,
            (py - self.y_translate) * self.scale,
        )
    }

    /// Inverse of [`pixel_to_plane`](Self::pixel_to_plane).
    #[inline]
    pub fn plane_to_pixel(&self, point: Complex) -> (f64, f64) {
        (
            point.re / self.scale + self.x_translate,
            point.im / self.scale + self.y_translate,
        )
    }

    /// The plane rectangle covered by the whole grid, letterbox included.
    pub fn visible_region(&self) -> Region {
        Region::new(
            -self.x_translate * self.scale,
            -self.y_translate * self.scale,
            self.grid_width as f64 * self.scale,
            self.grid_height as f64 * self.scale,
        )
    }

    /// Translate a pixel rectangle (two opposite corners, any order) into a
    /// plane region.
    ///
    /// Corners outside the grid are clamped onto it first, since pointer
    /// drags routinely leave the widget. A box with zero width or height
    /// after clamping is rejected.
    pub fn zoom_box_region(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> crate::Result<Region> {
        let max_x = self.grid_width as f64;
        let max_y = self.grid_height as f64;
        let (x0, x1) = (clamp_px(x0, max_x), clamp_px(x1, max_x));
        let (y0, y1) = (clamp_px(y0, max_y), clamp_px(y1, max_y));

        let corner = self.pixel_to_plane(x0.min(x1), y0.min(y1));
        let region = Region::new(
            corner.re,
            corner.im,
            (x1 - x0).abs() * self.scale,
            (y1 - y0).abs() * self.scale,
        );
        region.validate()?;
        Ok(region)
    }

    /// Human-readable view bounds and iteration budget for a status line.
    pub fn status_text(&self) -> String {
        format!("{}, Iter: {}", self.visible_region(), self.iteration_limit)
    }
}

fn clamp_px(v: f64, max: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, max)
    }
}
