use serde::{Deserialize, Serialize};

use fastbrot_core::{EscapeParams, IterationBounds, Region};

use crate::band::BandCount;
use crate::palette::PalettePolicy;

/// Tunables for an [`Engine`](crate::Engine).
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Range of the zoom-adaptive iteration budget.
    #[serde(default)]
    pub iteration_bounds: IterationBounds,
    /// Squared bailout radius.
    #[serde(default = "default_bailout_sq")]
    pub bailout_sq: f64,
    /// How many column bands to render concurrently.
    #[serde(default)]
    pub band_count: BandCount,
    /// Region shown at startup and restored by `reset`.
    #[serde(default)]
    pub initial_region: Region,
    /// Color table selected at startup.
    #[serde(default)]
    pub initial_palette: PalettePolicy,
}

fn default_bailout_sq() -> f64 {
    EscapeParams::DEFAULT_BAILOUT_SQ
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            iteration_bounds: IterationBounds::default(),
            bailout_sq: default_bailout_sq(),
            band_count: BandCount::default(),
            initial_region: Region::default(),
            initial_palette: PalettePolicy::default(),
        }
    }
}
