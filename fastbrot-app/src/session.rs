//! Replays commands against the engine the way the key handlers would.

use std::io::Write;

use tracing::{error, info};

use fastbrot_render::Engine;

use crate::input::{Command, ZOOM_STEP};
use crate::terminal::TerminalSurface;

pub struct Session<W: Write> {
    engine: Engine,
    surface: TerminalSurface<W>,
}

impl<W: Write> Session<W> {
    /// Render and present the initial view.
    pub fn start(engine: Engine, surface: TerminalSurface<W>) -> fastbrot_render::Result<Self> {
        let mut session = Self { engine, surface };
        session.redraw()?;
        Ok(session)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn surface(&self) -> &TerminalSurface<W> {
        &self.surface
    }

    /// Run every command, logging failures and carrying on with the next.
    /// Returns how many commands failed.
    pub fn run_all(&mut self, commands: &[Command]) -> usize {
        let mut failed = 0;
        for command in commands {
            if let Err(e) = self.run(*command) {
                error!(?command, "Command failed: {e}");
                failed += 1;
            }
        }
        failed
    }

    pub fn run(&mut self, command: Command) -> fastbrot_render::Result<()> {
        match command {
            Command::ZoomIn => {
                self.engine.zoom(ZOOM_STEP)?;
                self.redraw()
            }
            Command::ZoomOut => {
                self.engine.zoom(-ZOOM_STEP)?;
                self.redraw()
            }
            Command::Pan {
                x_percent,
                y_percent,
            } => {
                self.engine.pan(x_percent, y_percent)?;
                self.redraw()
            }
            Command::Home => {
                self.engine.reset()?;
                self.redraw()
            }
            Command::ZoomBox { x0, y0, x1, y1 } => {
                let (_, preview) = self.engine.preview_zoom_box(x0, y0, x1, y1)?;
                info!("Zoom box: {preview}");
                self.engine.zoom_box(x0, y0, x1, y1)?;
                self.redraw()
            }
            Command::Resize { width, height } => {
                self.engine.resize(width, height)?;
                self.redraw()
            }
            Command::Palette(selector) => {
                self.engine.select_palette(selector)?;
                self.engine.present(&mut self.surface);
                Ok(())
            }
            Command::Rotate => {
                self.engine.rotate_palette();
                self.engine.present(&mut self.surface);
                Ok(())
            }
            Command::Cycle => {
                self.surface.set_quiet(true);
                self.engine.cycle_palette(&mut self.surface);
                self.surface.set_quiet(false);
                self.engine.present(&mut self.surface);
                Ok(())
            }
            Command::Orbits => {
                self.surface.set_quiet(true);
                let plotted = self.engine.plot_orbits(&mut self.surface);
                self.surface.set_quiet(false);
                plotted?;
                self.engine.present(&mut self.surface);
                Ok(())
            }
            Command::Status => {
                info!("{}", self.engine.status_text());
                Ok(())
            }
        }
    }

    fn redraw(&mut self) -> fastbrot_render::Result<()> {
        self.engine.recompute_and_render()?;
        self.engine.present(&mut self.surface);
        Ok(())
    }
}
