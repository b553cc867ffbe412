//! The host-facing facade: one viewport, one mapper, one color table, and
//! the compositor that turns them into a canvas.
//!
//! View mutators only update the viewport and mapper. The host decides
//! when to call [`Engine::recompute_and_render`] and [`Engine::present`],
//! mirroring the "change view, redraw, paint" sequence of an interactive
//! front end.

use tracing::{debug, warn};

use fastbrot_core::{CoordinateMapper, EscapeParams, IterationBounds, Region, Viewport};

use crate::buffer::RenderBuffer;
use crate::compositor::{Compositor, RenderStats};
use crate::config::EngineConfig;
use crate::diagnostic;
use crate::palette::{ColorTable, PalettePolicy, PALETTE_SIZE};
use crate::surface::PresentationSurface;

#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    viewport: Viewport,
    mapper: CoordinateMapper,
    palette: ColorTable,
    compositor: Compositor,
    last_stats: Option<RenderStats>,
}

impl Engine {
    /// Build an engine for a `width × height` grid.
    ///
    /// The canvas starts black; call [`recompute_and_render`](Self::recompute_and_render)
    /// to fill it.
    pub fn new(config: EngineConfig, width: u32, height: u32) -> crate::Result<Self> {
        // Deserialized configs bypass the constructors, so re-check them here.
        let bounds = IterationBounds::new(config.iteration_bounds.min, config.iteration_bounds.max)?;
        EscapeParams::new(bounds.min, config.bailout_sq)?;
        config.band_count.validate()?;

        let viewport = Viewport::new(config.initial_region)?;
        let mapper = CoordinateMapper::new(&viewport, width, height, bounds)?;
        let compositor = Compositor::new(width, height)?;

        debug!(width, height, palette = config.initial_palette.label(), "Engine created");
        Ok(Self {
            config,
            viewport,
            mapper,
            palette: ColorTable::new(config.initial_palette),
            compositor,
            last_stats: None,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn palette(&self) -> &ColorTable {
        &self.palette
    }

    /// The last fully composited frame.
    pub fn canvas(&self) -> &RenderBuffer {
        self.compositor.canvas()
    }

    /// Stats of the most recent render pass, if any.
    pub fn last_stats(&self) -> Option<RenderStats> {
        self.last_stats
    }

    pub fn status_text(&self) -> String {
        self.mapper.status_text()
    }

    // -- Geometry ----------------------------------------------------------

    /// Adopt a new grid size. Mapper tables and all buffers are rebuilt.
    pub fn resize(&mut self, width: u32, height: u32) -> crate::Result<()> {
        let mut mapper = self.mapper.clone();
        mapper.recompute(&self.viewport, width, height)?;
        self.compositor.resize(width, height)?;
        self.mapper = mapper;
        Ok(())
    }

    /// Zoom by `percent` of the current size; negative zooms out.
    pub fn zoom(&mut self, percent: f64) -> crate::Result<()> {
        self.update_view(|v| {
            v.zoom(percent);
            Ok(())
        })
    }

    /// Pan by a fraction of the current width and height.
    pub fn pan(&mut self, x_percent: f64, y_percent: f64) -> crate::Result<()> {
        self.update_view(|v| {
            v.pan(x_percent, y_percent);
            Ok(())
        })
    }

    /// Go back to the initial region.
    pub fn reset(&mut self) -> crate::Result<()> {
        self.update_view(|v| {
            v.reset();
            Ok(())
        })
    }

    pub fn set_region(&mut self, region: Region) -> crate::Result<()> {
        self.update_view(|v| v.set_region(region))
    }

    /// Zoom into the pixel rectangle spanned by two corners. Corners off
    /// the grid are clamped onto it.
    pub fn zoom_box(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> crate::Result<()> {
        let region = self.mapper.zoom_box_region(x0, y0, x1, y1)?;
        self.set_region(region)
    }

    /// The region a drag from `(x0, y0)` to `(x1, y1)` would select, and
    /// its status line. Nothing changes.
    pub fn preview_zoom_box(
        &self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    ) -> crate::Result<(Region, String)> {
        let region = self.mapper.zoom_box_region(x0, y0, x1, y1)?;
        Ok((region, region.to_string()))
    }

    /// Apply `change` to a copy of the viewport and commit it only if the
    /// mapper accepts the result.
    fn update_view(
        &mut self,
        change: impl FnOnce(&mut Viewport) -> fastbrot_core::Result<()>,
    ) -> crate::Result<()> {
        let mut next = self.viewport;
        let mut mapper = self.mapper.clone();
        let applied = change(&mut next).and_then(|()| {
            mapper.recompute(&next, self.compositor.width(), self.compositor.height())
        });
        if let Err(e) = applied {
            warn!(error = %e, "Rejected view change");
            return Err(e.into());
        }
        self.viewport = next;
        self.mapper = mapper;
        Ok(())
    }

    // -- Rendering ---------------------------------------------------------

    /// Iterate the whole grid for the current view and composite the result.
    pub fn recompute_and_render(&mut self) -> crate::Result<RenderStats> {
        let stats = self.compositor.render(
            &self.mapper,
            &self.palette,
            self.config.bailout_sq,
            self.config.band_count,
        )?;
        self.last_stats = Some(stats);
        Ok(stats)
    }

    /// Hand the current canvas and status line to `surface`.
    pub fn present<S: PresentationSurface + ?Sized>(&self, surface: &mut S) {
        surface.show_status(&self.status_text());
        surface.present(self.compositor.canvas());
    }

    /// Switch to palette `selector` (1..=4) and recolor the canvas.
    pub fn select_palette(&mut self, selector: u8) -> crate::Result<()> {
        let policy = PalettePolicy::try_from(selector)?;
        self.palette.generate(policy);
        self.compositor.recolor(&self.palette);
        debug!(palette = policy.label(), "Selected palette");
        Ok(())
    }

    /// Rotate the palette by one slot and recolor the canvas.
    pub fn rotate_palette(&mut self) {
        self.palette.rotate();
        self.compositor.recolor(&self.palette);
    }

    /// Rotate through every slot once, presenting a frame per step.
    pub fn cycle_palette<S: PresentationSurface + ?Sized>(&mut self, surface: &mut S) {
        for _ in 0..PALETTE_SIZE {
            self.rotate_palette();
            surface.present(self.compositor.canvas());
        }
        debug!(rotation = self.palette.rotation(), "Palette cycle complete");
    }

    /// Replace the canvas with the orbit plot, presenting column by column.
    ///
    /// The iteration cache is untouched, so the next recolor or render
    /// brings the escape-time image back.
    pub fn plot_orbits<S: PresentationSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> crate::Result<()> {
        diagnostic::plot_orbits(
            &self.mapper,
            &self.palette,
            self.config.bailout_sq,
            self.compositor.canvas_mut(),
            surface,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::BandCount;
    use crate::error::RenderError;
    use crate::surface::RecordingSurface;
    use fastbrot_core::CoreError;

    fn engine(w: u32, h: u32) -> Engine {
        Engine::new(EngineConfig::default(), w, h).unwrap()
    }

    #[test]
    fn default_view_status_on_800_by_600() {
        let mut e = engine(800, 600);
        let stats = e.recompute_and_render().unwrap();
        assert_eq!(stats.iteration_limit, 100);

        let status = e.status_text();
        assert!(status.starts_with("Left: "), "{status}");
        assert!(status.ends_with("Iter: 100"), "{status}");

        let visible = e.mapper().visible_region();
        assert!((visible.width - 3.0).abs() < 1e-9);
        assert!((visible.height - 2.25).abs() < 1e-9);

        // The origin is deep inside the main cardioid.
        let (px, py) = e.mapper().plane_to_pixel(fastbrot_core::Complex::ZERO);
        let count = e.compositor.iterations().count(px as u32, py as u32);
        assert_eq!(count, 100);
    }

    #[test]
    fn zoom_recentres_and_reset_is_exact() {
        let mut e = engine(64, 48);
        e.zoom(0.2).unwrap();
        let r = e.viewport().region();
        assert!((r.width - 2.4).abs() < 1e-12);
        assert!((r.height - 1.6).abs() < 1e-12);
        assert!((r.left + r.width / 2.0 + 0.5).abs() < 1e-12);
        assert!((r.top + r.height / 2.0).abs() < 1e-12);

        for _ in 0..4 {
            e.zoom(0.2).unwrap();
        }
        e.reset().unwrap();
        assert_eq!(e.viewport().region(), Region::new(-2.0, -1.0, 3.0, 2.0));
    }

    #[test]
    fn deeper_zoom_raises_iteration_limit() {
        let mut e = engine(64, 48);
        for _ in 0..20 {
            e.zoom(0.2).unwrap();
        }
        assert!(e.mapper().iteration_limit() > 100);
        assert!(e.mapper().iteration_limit() <= 1000);
    }

    #[test]
    fn rejected_region_changes_nothing() {
        let mut e = engine(80, 60);
        e.recompute_and_render().unwrap();
        let canvas = e.canvas().clone();
        let region = e.viewport().region();
        let status = e.status_text();

        let err = e.set_region(Region::new(0.0, 0.0, 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, RenderError::Core(CoreError::InvalidViewport { .. })));
        assert_eq!(e.viewport().region(), region);
        assert_eq!(e.status_text(), status);
        assert_eq!(e.canvas(), &canvas);
    }

    #[test]
    fn rejected_resize_changes_nothing() {
        let mut e = engine(40, 30);
        assert!(e.resize(0, 30).is_err());
        assert_eq!((e.mapper().grid_width(), e.canvas().width), (40, 40));

        e.resize(50, 20).unwrap();
        assert_eq!(e.mapper().grid_width(), 50);
        assert_eq!(e.mapper().grid_height(), 20);
        assert_eq!(e.canvas().pixels.len(), 50 * 20 * 4);
    }

    #[test]
    fn zoom_box_clamps_off_grid_corners() {
        let mut e = engine(100, 100);
        let visible = e.mapper().visible_region();
        e.zoom_box(-50.0, -50.0, 250.0, 300.0).unwrap();
        let r = e.viewport().region();
        assert!((r.left - visible.left).abs() < 1e-12);
        assert!((r.top - visible.top).abs() < 1e-12);
        assert!((r.width - visible.width).abs() < 1e-12);
        assert!((r.height - visible.height).abs() < 1e-12);
    }

    #[test]
    fn degenerate_zoom_box_is_rejected() {
        let mut e = engine(100, 100);
        let before = e.viewport().region();
        assert!(e.zoom_box(10.0, 10.0, 10.0, 90.0).is_err());
        assert_eq!(e.viewport().region(), before);
    }

    #[test]
    fn preview_matches_commit() {
        let mut e = engine(200, 100);
        let (region, status) = e.preview_zoom_box(150.0, 80.0, 50.0, 20.0).unwrap();
        assert!(status.starts_with("Left: "));
        assert!(!status.contains("Iter"));
        e.zoom_box(50.0, 20.0, 150.0, 80.0).unwrap();
        assert_eq!(e.viewport().region(), region);
    }

    #[test]
    fn band_count_does_not_change_the_canvas() {
        let mut a = Engine::new(
            EngineConfig {
                band_count: BandCount::Fixed(1),
                ..EngineConfig::default()
            },
            120,
            90,
        )
        .unwrap();
        let mut b = Engine::new(
            EngineConfig {
                band_count: BandCount::CLASSIC,
                ..EngineConfig::default()
            },
            120,
            90,
        )
        .unwrap();
        a.recompute_and_render().unwrap();
        b.recompute_and_render().unwrap();
        assert_eq!(a.canvas(), b.canvas());
    }

    #[test]
    fn rotation_recolors_like_a_full_render() {
        let mut e = engine(90, 60);
        e.recompute_and_render().unwrap();
        e.rotate_palette();
        e.rotate_palette();
        let recolored = e.canvas().clone();
        e.recompute_and_render().unwrap();
        assert_eq!(e.canvas(), &recolored);
    }

    #[test]
    fn palette_selection() {
        let mut e = engine(60, 40);
        e.recompute_and_render().unwrap();
        assert_eq!(e.select_palette(5), Err(RenderError::InvalidPalette(5)));
        assert_eq!(e.palette().policy(), PalettePolicy::RedBlue);

        e.select_palette(2).unwrap();
        assert_eq!(e.palette().policy(), PalettePolicy::TriLevel);
        let recolored = e.canvas().clone();
        e.recompute_and_render().unwrap();
        assert_eq!(e.canvas(), &recolored);
    }

    #[test]
    fn cycle_presents_every_step() {
        let mut e = engine(30, 20);
        e.recompute_and_render().unwrap();
        let mut surface = RecordingSurface::default();
        e.cycle_palette(&mut surface);
        assert_eq!(surface.frames_presented, PALETTE_SIZE);
        // 256 steps on a 255-long cycle leave a single rotation.
        assert_eq!(e.palette().rotation(), 1);
    }

    #[test]
    fn present_sends_status_and_frame() {
        let mut e = engine(30, 20);
        e.recompute_and_render().unwrap();
        let mut surface = RecordingSurface::default();
        e.present(&mut surface);
        assert_eq!(surface.frames_presented, 1);
        assert_eq!(surface.last_frame.as_ref(), Some(e.canvas()));
        assert_eq!(surface.last_status, Some(e.status_text()));
    }

    #[test]
    fn orbit_plot_keeps_the_cache() {
        let mut e = engine(20, 14);
        e.recompute_and_render().unwrap();
        let mut surface = RecordingSurface::default();
        e.plot_orbits(&mut surface).unwrap();
        assert_eq!(surface.frames_presented, 20);

        // Recoloring from the cache restores the escape-time image.
        e.rotate_palette();
        let recolored = e.canvas().clone();
        e.recompute_and_render().unwrap();
        assert_eq!(e.canvas(), &recolored);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.bailout_sq = -1.0;
        assert!(Engine::new(config, 10, 10).is_err());

        let mut config = EngineConfig::default();
        config.iteration_bounds.min = 500;
        config.iteration_bounds.max = 100;
        assert!(Engine::new(config, 10, 10).is_err());

        assert!(Engine::new(EngineConfig::default(), 0, 10).is_err());
    }

    #[test]
    fn zero_band_config_fails_at_construction() {
        let config: EngineConfig = serde_json::from_str(r#"{"band_count":{"fixed":0}}"#).unwrap();
        assert_eq!(
            Engine::new(config, 64, 48).unwrap_err(),
            RenderError::InvalidBandCount(0)
        );
    }

    #[test]
    fn oversized_band_config_still_renders() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"band_count":{"fixed":18446744073709551615}}"#).unwrap();
        let mut e = Engine::new(config, 64, 48).unwrap();
        let stats = e.recompute_and_render().unwrap();
        assert_eq!(stats.bands, 64);
    }
}
