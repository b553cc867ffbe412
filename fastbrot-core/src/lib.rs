pub mod complex;
pub mod error;
pub mod mandelbrot;
pub mod mapper;
pub mod params;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use mandelbrot::{Mandelbrot, Orbit};
pub use mapper::CoordinateMapper;
pub use params::{EscapeParams, IterationBounds};
pub use viewport::{Region, Viewport};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
