//! Filter selection as a value
//!
//! [`FilterOp`] bundles one filter with its parameters so an editor can keep
//! "the current filter settings" in a single field and re-run them against
//! an untouched original.

use crate::{
    Kernel, SmoothingSize, SobelMode, convolve, gaussian_blur, median_filter, sharpen, smooth,
    sobel_edge,
};
use rastra_core::PixelBuffer;

/// A filter together with its parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterOp {
    /// Uniform smoothing
    Smooth { size: SmoothingSize },
    /// Gaussian blur
    Gaussian { radius: f64, sigma: f64 },
    /// Binarized Sobel magnitude
    Sobel { mode: SobelMode, threshold: f64 },
    /// High-pass sharpen blended by `strength`
    Sharpen { strength: f64 },
    /// Median over a `size x size` window
    Median { size: u32 },
    /// Arbitrary kernel, divisor and offset
    Custom(Kernel),
}

impl Default for FilterOp {
    fn default() -> Self {
        FilterOp::Smooth {
            size: SmoothingSize::default(),
        }
    }
}

impl FilterOp {
    /// Run the filter on `buf`, returning a new buffer.
    pub fn apply(&self, buf: &PixelBuffer) -> PixelBuffer {
        log::trace!("applying {self:?}");
        match self {
            FilterOp::Smooth { size } => smooth(buf, size.size()),
            FilterOp::Gaussian { radius, sigma } => gaussian_blur(buf, *radius, *sigma),
            FilterOp::Sobel { mode, threshold } => sobel_edge(buf, *mode, *threshold),
            FilterOp::Sharpen { strength } => sharpen(buf, *strength),
            FilterOp::Median { size } => median_filter(buf, *size),
            FilterOp::Custom(kernel) => convolve(buf, kernel),
        }
    }
}
