use thiserror::Error;

/// Errors originating from view geometry and the iteration kernel setup.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("invalid grid dimensions: {width}×{height} (both must be > 0)")]
    InvalidGrid { width: u32, height: u32 },

    #[error("invalid iteration limit: {0} (must be >= 1)")]
    InvalidIterationLimit(u32),

    #[error("invalid iteration bounds: min {min} > max {max}")]
    InvalidIterationBounds { min: u32, max: u32 },

    #[error("invalid bailout: {0} (must be positive and finite)")]
    InvalidBailout(f64),
}
