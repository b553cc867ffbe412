use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// A contiguous run of pixel columns rendered by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First column (inclusive).
    pub start_column: u32,
    /// One past the last column.
    pub stop_column: u32,
}

impl Band {
    /// Number of columns in this band. Zero when the grid is narrower
    /// than the band count.
    pub fn width(&self) -> u32 {
        self.stop_column - self.start_column
    }

    pub fn is_empty(&self) -> bool {
        self.start_column == self.stop_column
    }

    /// Number of pixels this band covers on a grid `height` rows tall.
    pub fn pixel_count(&self, height: u32) -> usize {
        self.width() as usize * height as usize
    }
}

/// How many bands to split the grid into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandCount {
    /// One band per thread in the rayon pool.
    #[default]
    Auto,
    /// A fixed number of bands, whatever the hardware.
    Fixed(usize),
}

impl BandCount {
    /// The band count the classic renderer used.
    pub const CLASSIC: Self = Self::Fixed(40);

    /// Resolve to a concrete count for the current thread pool.
    pub fn resolve(self) -> usize {
        match self {
            Self::Auto => rayon::current_num_threads().max(1),
            Self::Fixed(n) => n,
        }
    }

    /// A fixed count of zero can never render.
    pub fn validate(self) -> crate::Result<()> {
        match self {
            Self::Fixed(0) => Err(RenderError::InvalidBandCount(0)),
            _ => Ok(()),
        }
    }
}

/// Split `grid_width` columns into `band_count` bands.
///
/// Every band is `grid_width / band_count` columns wide except the last,
/// which runs to the right edge and absorbs the remainder. The bands cover
/// `[0, grid_width)` exactly once, in order.
pub fn partition(grid_width: u32, band_count: usize) -> crate::Result<Vec<Band>> {
    if band_count == 0 {
        return Err(RenderError::InvalidBandCount(band_count));
    }
    let block_size = (grid_width as usize / band_count) as u32;
    let bands = (0..band_count)
        .map(|i| {
            let start_column = i as u32 * block_size;
            let stop_column = if i == band_count - 1 {
                grid_width
            } else {
                start_column + block_size
            };
            Band {
                start_column,
                stop_column,
            }
        })
        .collect();
    Ok(bands)
}
