//! rastra - Pixel-level core of a raster image editor
//!
//! # Overview
//!
//! rastra works on dense RGBA buffers and provides:
//!
//! - Bounds-checked pixel storage and shape rasterization
//! - Convolution filters, edge detection, median and contrast enhancement
//! - Binary morphology (dilation, erosion, opening, closing, hit-or-miss)
//! - Global threshold selection and binarization
//! - Per-channel histograms
//!
//! # Example
//!
//! ```
//! use rastra::morph::Sel;
//! use rastra::threshold::{ThresholdMethod, threshold_buffer};
//! use rastra::{PixelBuffer, Rgba};
//!
//! let mut buf = PixelBuffer::filled(32, 32, Rgba::BLACK).unwrap();
//! buf.fill_disk(16, 16, 8, Rgba::WHITE);
//!
//! let blurred = rastra::filter::gaussian_blur(&buf, 1.0, 1.0);
//! let (_, binary) = threshold_buffer(&blurred, &ThresholdMethod::IterativeMean);
//! let cleaned = rastra::morph::open(&binary, &Sel::cross(3).unwrap());
//!
//! assert_eq!(cleaned.get_pixel(16, 16), Some(Rgba::WHITE));
//! assert_eq!(cleaned.get_pixel(0, 0), Some(Rgba::BLACK));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rastra_core::*;

// Re-export algorithm crates as modules to avoid name conflicts
pub use rastra_color as threshold;
pub use rastra_filter as filter;
pub use rastra_morph as morph;
