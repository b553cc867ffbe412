pub mod band;
pub mod buffer;
pub mod compositor;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod iteration_buffer;
pub mod palette;
pub mod surface;
pub mod worker;

pub use band::{partition, Band, BandCount};
pub use buffer::{RenderBuffer, BLACK};
pub use compositor::{Compositor, RenderStats};
pub use config::EngineConfig;
pub use diagnostic::{plot_orbits, MAX_ORBIT_STEPS};
pub use engine::Engine;
pub use error::RenderError;
pub use iteration_buffer::IterationBuffer;
pub use palette::{ColorTable, PalettePolicy, PALETTE_SIZE};
pub use surface::{PresentationSurface, RecordingSurface};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
