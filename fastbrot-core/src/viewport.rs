use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An axis-aligned rectangle on the complex plane.
///
/// `left`/`top` is the corner with the smallest real and imaginary parts;
/// pixel-y grows with the imaginary part, so `top` is the first row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// The region that frames the whole Mandelbrot set.
    pub const MANDELBROT: Self = Self {
        left: -2.0,
        top: -1.0,
        width: 3.0,
        height: 2.0,
    };

    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check the `width > 0 && height > 0` invariant (and finiteness).
    pub fn validate(&self) -> crate::Result<()> {
        let finite = self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        if !finite {
            return Err(CoreError::InvalidViewport {
                reason: format!("region must be finite, got {self}"),
            });
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(CoreError::InvalidViewport {
                reason: format!(
                    "dimensions must be > 0, got {}×{}",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }

    /// Width / height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// `true` if `other` lies entirely inside `self`, allowing `tolerance`
    /// of slack on every edge.
    pub fn contains(&self, other: &Region, tolerance: f64) -> bool {
        self.left <= other.left + tolerance
            && self.top <= other.top + tolerance
            && self.right() + tolerance >= other.right()
            && self.bottom() + tolerance >= other.bottom()
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::MANDELBROT
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Left: {}, Top {}, Width: {}, Height: {}",
            self.left, self.top, self.width, self.height
        )
    }
}

/// The part of the complex plane the user is looking at.
///
/// Holds the current region plus the region it was created with, so a
/// `reset` can always return to the starting view. The current region is
/// mutated in place by zoom/pan commands and reused across every redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    original: Region,
}

impl Viewport {
    /// Create a viewport whose current and original region are `region`.
    pub fn new(region: Region) -> crate::Result<Self> {
        region.validate()?;
        Ok(Self {
            left: region.left,
            top: region.top,
            width: region.width,
            height: region.height,
            original: region,
        })
    }

    /// Snapshot of the current region.
    pub fn region(&self) -> Region {
        Region::new(self.left, self.top, self.width, self.height)
    }

    /// The region `reset` returns to.
    pub fn original(&self) -> Region {
        self.original
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Shrink the view by `percent` of its current size, keeping its centre.
    ///
    /// Negative values zoom out. `percent` must stay below `1.0`; anything
    /// larger would flip the rectangle inside out.
    pub fn zoom(&mut self, percent: f64) {
        debug_assert!(percent < 1.0, "zoom({percent}) would invert the viewport");
        let x_delta = self.width * percent;
        let y_delta = self.height * percent;

        self.left += x_delta / 2.0;
        self.width -= x_delta;
        self.top += y_delta / 2.0;
        self.height -= y_delta;
    }

    /// Slide the view by a fraction of its own width and height.
    pub fn pan(&mut self, x_percent: f64, y_percent: f64) {
        self.left += self.width * x_percent;
        self.top += self.height * y_percent;
    }

    /// Return to the region the viewport was created with.
    pub fn reset(&mut self) {
        self.left = self.original.left;
        self.top = self.original.top;
        self.width = self.original.width;
        self.height = self.original.height;
    }

    /// Replace the current region outright.
    ///
    /// On error the viewport is left untouched.
    pub fn set_region(&mut self, region: Region) -> crate::Result<()> {
        region.validate()?;
        self.left = region.left;
        self.top = region.top;
        self.width = region.width;
        self.height = region.height;
        Ok(())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        let r = Region::MANDELBROT;
        Self {
            left: r.left,
            top: r.top,
            width: r.width,
            height: r.height,
            original: r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn zoom_in_shrinks_around_centre() {
        let mut vp = Viewport::default();
        let (cx, cy) = (vp.left + vp.width / 2.0, vp.top + vp.height / 2.0);
        vp.zoom(0.2);

        assert!(approx(vp.width, 2.4));
        assert!(approx(vp.height, 1.6));
        assert!(approx(vp.left + vp.width / 2.0, cx));
        assert!(approx(vp.top + vp.height / 2.0, cy));
    }

    #[test]
    fn zoom_out_grows() {
        let mut vp = Viewport::default();
        vp.zoom(-0.2);
        assert!(approx(vp.width, 3.6));
        assert!(approx(vp.height, 2.4));
        assert!(approx(vp.left, -2.3));
    }

    #[test]
    fn pan_moves_without_resizing() {
        let mut vp = Viewport::default();
        vp.pan(0.2, -0.2);
        assert!(approx(vp.left, -2.0 + 0.6));
        assert!(approx(vp.top, -1.0 - 0.4));
        assert!(approx(vp.width, 3.0));
        assert!(approx(vp.height, 2.0));
    }

    #[test]
    fn reset_after_zooms_is_exact() {
        let mut vp = Viewport::default();
        for _ in 0..5 {
            vp.zoom(0.2);
        }
        vp.pan(0.2, 0.2);
        vp.reset();
        assert_eq!(vp.region(), Region::new(-2.0, -1.0, 3.0, 2.0));
    }

    #[test]
    fn set_region_rejects_degenerate() {
        let mut vp = Viewport::default();
        assert!(vp.set_region(Region::new(0.0, 0.0, 0.0, 1.0)).is_err());
        assert!(vp.set_region(Region::new(0.0, 0.0, 1.0, -1.0)).is_err());
        assert!(vp.set_region(Region::new(f64::NAN, 0.0, 1.0, 1.0)).is_err());
        assert_eq!(vp.region(), Region::MANDELBROT);
    }

    #[test]
    fn set_region_keeps_original() {
        let mut vp = Viewport::default();
        vp.set_region(Region::new(-0.5, -0.5, 0.1, 0.1)).unwrap();
        assert_eq!(vp.original(), Region::MANDELBROT);
        vp.reset();
        assert_eq!(vp.region(), Region::MANDELBROT);
    }

    #[test]
    fn new_rejects_zero_size() {
        assert!(Viewport::new(Region::new(0.0, 0.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn region_round_trips_through_json() {
        let r = Region::new(-1.5, -0.25, 0.5, 0.5);
        let json = serde_json::to_string(&r).unwrap();
        let back: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
