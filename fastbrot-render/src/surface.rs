use crate::buffer::RenderBuffer;

/// Something that can put a finished frame in front of the user.
///
/// Implemented by the host. The engine only calls `present` with a
/// complete canvas, never while a pass is compositing.
pub trait PresentationSurface {
    /// Show `frame`.
    fn present(&mut self, frame: &RenderBuffer);

    /// Update the status readout. Hosts without one can ignore it.
    fn show_status(&mut self, _text: &str) {}
}

/// A surface that keeps the last presented frame. Handy for tests and
/// headless hosts.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames_presented: usize,
    pub last_frame: Option<RenderBuffer>,
    pub last_status: Option<String>,
}

impl PresentationSurface for RecordingSurface {
    fn present(&mut self, frame: &RenderBuffer) {
        self.frames_presented += 1;
        self.last_frame = Some(frame.clone());
    }

    fn show_status(&mut self, text: &str) {
        self.last_status = Some(text.to_owned());
    }
}
