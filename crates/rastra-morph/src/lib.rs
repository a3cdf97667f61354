//! rastra-morph - Binary morphology
//!
//! This crate provides morphological operations on binary buffers:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Dilation, erosion, opening and closing
//! - Morphological gradient (boundary extraction)
//! - Hit-or-miss transform for pattern detection
//! - Threshold-then-morph for gray or color input
//!
//! # Example
//!
//! ```
//! use rastra_core::{PixelBuffer, Rgba};
//! use rastra_morph::{Sel, dilate};
//!
//! let mut buf = PixelBuffer::filled(5, 5, Rgba::BLACK).unwrap();
//! buf.set_pixel(2, 2, Rgba::WHITE);
//! let out = dilate(&buf, &Sel::square(3).unwrap());
//! assert_eq!(out.get_pixel(1, 1), Some(Rgba::WHITE));
//! ```

pub mod binary;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{MAX_SEL_SIZE, Sel, SelShape};

pub use binary::{
    FOREGROUND_CUT, MorphOp, binarize_then, close, dilate, erode, gradient, hit_or_miss, open,
};
