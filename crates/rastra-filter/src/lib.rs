//! rastra-filter - Pixel filtering operations
//!
//! This crate provides the neighbourhood and tone filters of the editor:
//!
//! - Convolution with arbitrary kernels (replicate border)
//! - Smoothing and Gaussian blur
//! - Edge detection (Sobel) and sharpening
//! - Rank filtering (median)
//! - Contrast stretching and histogram equalization
//!
//! Every filter takes `&PixelBuffer` and returns a new buffer; the input is
//! never modified.

pub mod convolve;
pub mod edge;
pub mod enhance;
mod error;
pub mod kernel;
pub mod op;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, MAX_KERNEL_SIZE};
pub use op::FilterOp;

// Re-export commonly used functions
pub use convolve::{SmoothingSize, convolve, gaussian_blur, smooth};
pub use edge::{SobelMode, sharpen, sobel_edge};
pub use enhance::{
    TrcLut, equalize_histogram, equalize_lut, identity_trc, stretch_contrast, stretch_trc,
    trc_map,
};
pub use rank::median_filter;
