//! A presentation surface that draws frames as text.

use std::io::Write;

use tracing::{info, warn};

use fastbrot_render::{PresentationSurface, RenderBuffer, BLACK};

/// Brightness ramp, darkest first. In-set pixels use [`INTERIOR`].
const RAMP: &[u8] = b" .:-=+*%";
const INTERIOR: u8 = b'#';

pub struct TerminalSurface<W: Write> {
    out: W,
    preview_columns: u32,
    show_preview: bool,
    quiet: bool,
    frames: u64,
    status: String,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, preview_columns: u32, show_preview: bool) -> Self {
        Self {
            out,
            preview_columns: preview_columns.max(1),
            show_preview,
            quiet: false,
            frames: 0,
            status: String::new(),
        }
    }

    /// While quiet, frames are counted but neither drawn nor logged.
    /// Used around bulk operations that present hundreds of frames.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn draw(&mut self, frame: &RenderBuffer) -> std::io::Result<()> {
        let columns = self.preview_columns.min(frame.width);
        // Character cells are roughly twice as tall as they are wide.
        let rows = ((frame.height as u64 * columns as u64) / (2 * frame.width as u64)).max(1) as u32;

        let mut line = Vec::with_capacity(columns as usize);
        for row in 0..rows {
            let y = sample(row, rows, frame.height);
            line.clear();
            line.extend((0..columns).map(|col| {
                let x = sample(col, columns, frame.width);
                shade(frame.pixel(x, y))
            }));
            self.out.write_all(&line)?;
            self.out.write_all(b"\n")?;
        }
        writeln!(self.out, "{}", self.status)?;
        self.out.flush()
    }
}

impl<W: Write> PresentationSurface for TerminalSurface<W> {
    fn present(&mut self, frame: &RenderBuffer) {
        self.frames += 1;
        if self.quiet {
            return;
        }
        info!(
            frame = self.frames,
            width = frame.width,
            height = frame.height,
            "Frame presented"
        );
        if self.show_preview {
            if let Err(e) = self.draw(frame) {
                warn!("Failed to draw preview: {e}");
            }
        }
    }

    fn show_status(&mut self, text: &str) {
        text.clone_into(&mut self.status);
    }
}

/// Grid coordinate at the centre of cell `i` of `cells`.
fn sample(i: u32, cells: u32, extent: u32) -> u32 {
    let pos = (2 * i as u64 + 1) * extent as u64 / (2 * cells as u64);
    (pos as u32).min(extent - 1)
}

fn shade(pixel: [u8; 4]) -> u8 {
    if pixel == BLACK {
        return INTERIOR;
    }
    let luma = (299 * pixel[0] as u32 + 587 * pixel[1] as u32 + 114 * pixel[2] as u32) / 1000;
    RAMP[(luma as usize * RAMP.len() / 256).min(RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, fill: [u8; 4]) -> RenderBuffer {
        let mut buf = RenderBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buf.set_pixel(x, y, fill);
            }
        }
        buf
    }

    #[test]
    fn preview_dimensions() {
        let mut surface = TerminalSurface::new(Vec::new(), 20, true);
        surface.show_status("Left: 0");
        surface.present(&RenderBuffer::new(40, 40));

        let text = String::from_utf8(surface.out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[..10].iter().all(|l| *l == "#".repeat(20)));
        assert_eq!(lines[10], "Left: 0");
    }

    #[test]
    fn bright_pixels_use_top_of_ramp() {
        let mut surface = TerminalSurface::new(Vec::new(), 4, true);
        surface.present(&frame(4, 8, [255, 255, 255, 255]));
        let text = String::from_utf8(surface.out).unwrap();
        assert!(text.starts_with("%%%%\n"));
    }

    #[test]
    fn quiet_and_disabled_preview_write_nothing() {
        let mut surface = TerminalSurface::new(Vec::new(), 10, true);
        surface.set_quiet(true);
        surface.present(&RenderBuffer::new(10, 10));
        assert_eq!(surface.frames(), 1);
        assert!(surface.out.is_empty());

        let mut surface = TerminalSurface::new(Vec::new(), 10, false);
        surface.present(&RenderBuffer::new(10, 10));
        assert_eq!(surface.frames(), 1);
        assert!(surface.out.is_empty());
    }

    #[test]
    fn sampling_stays_on_grid() {
        for cells in 1..20 {
            for extent in 1..30 {
                for i in 0..cells {
                    assert!(sample(i, cells, extent) < extent);
                }
            }
        }
    }
}
