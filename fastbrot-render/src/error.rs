use thiserror::Error;

/// Errors originating from the band renderer and color tables.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("invalid band count: {0} (must be > 0)")]
    InvalidBandCount(usize),

    #[error("invalid palette selector: {0} (expected 1..=4)")]
    InvalidPalette(u8),

    #[error("mapper grid {mapper_width}×{mapper_height} does not match canvas {canvas_width}×{canvas_height}")]
    GridMismatch {
        mapper_width: u32,
        mapper_height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error(transparent)]
    Core(#[from] fastbrot_core::CoreError),
}
