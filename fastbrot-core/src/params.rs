use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Bounds on the zoom-adaptive iteration budget.
///
/// The budget grows as the view narrows: `min + floor(1 / view_width)`,
/// clamped to `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationBounds {
    pub min: u32,
    pub max: u32,
}

impl IterationBounds {
    pub const DEFAULT_MIN: u32 = 100;
    pub const DEFAULT_MAX: u32 = 1000;

    pub fn new(min: u32, max: u32) -> crate::Result<Self> {
        if min < 1 {
            return Err(CoreError::InvalidIterationLimit(min));
        }
        if min > max {
            return Err(CoreError::InvalidIterationBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Iteration budget for a view `view_width` plane units wide.
    ///
    /// Monotonically non-increasing in `view_width`.
    pub fn limit_for(&self, view_width: f64) -> u32 {
        let extra = (1.0 / view_width).floor();
        let limit = (self.min as f64 + extra).clamp(self.min as f64, self.max as f64);
        limit as u32
    }
}

impl Default for IterationBounds {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Parameters for one run of the escape-time kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeParams {
    /// Counter value at which a point is declared (probably) in the set.
    pub iteration_limit: u32,

    /// Squared bailout radius; `|z|² > bailout_sq` means the orbit escaped.
    pub bailout_sq: f64,
}

impl EscapeParams {
    /// Bailout radius 2, compared squared.
    pub const DEFAULT_BAILOUT_SQ: f64 = 4.0;

    pub fn new(iteration_limit: u32, bailout_sq: f64) -> crate::Result<Self> {
        if iteration_limit < 1 {
            return Err(CoreError::InvalidIterationLimit(iteration_limit));
        }
        if bailout_sq <= 0.0 || !bailout_sq.is_finite() {
            return Err(CoreError::InvalidBailout(bailout_sq));
        }
        Ok(Self {
            iteration_limit,
            bailout_sq,
        })
    }
}

impl Default for EscapeParams {
    fn default() -> Self {
        Self {
            iteration_limit: IterationBounds::DEFAULT_MIN,
            bailout_sq: Self::DEFAULT_BAILOUT_SQ,
        }
    }
}
