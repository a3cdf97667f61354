//! rastra-color - Threshold selection and binarization
//!
//! This crate turns gray or color buffers into binary ones:
//!
//! - **Threshold selection** ([`threshold`]): manual, percentile, iterative
//!   mean, Kapur entropy, Kittler-Illingworth minimum error and fuzzy
//!   minimum error
//! - **Binarization**: `gray >= t` becomes white, anything else black
//!
//! # Example
//!
//! ```
//! use rastra_color::{ThresholdMethod, threshold_buffer};
//! use rastra_core::{PixelBuffer, Rgba};
//!
//! let mut buf = PixelBuffer::filled(4, 4, Rgba::rgb(30, 30, 30)).unwrap();
//! buf.set_pixel(1, 1, Rgba::rgb(220, 220, 220));
//! let (t, binary) = threshold_buffer(&buf, &ThresholdMethod::IterativeMean);
//! assert!(t > 30 && t <= 220);
//! assert_eq!(binary.get_pixel(1, 1), Some(Rgba::WHITE));
//! ```

pub mod error;
pub mod threshold;

// Re-export core types
pub use rastra_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export threshold types and functions
pub use threshold::{DEFAULT_THRESHOLD, ThresholdMethod, binarize, threshold_buffer};
