//! rastra-core - Basic data structures for the rastra image editor
//!
//! This crate provides the fundamental pieces every other rastra crate
//! builds on:
//!
//! - [`PixelBuffer`] - Bounds-checked RGBA raster storage
//! - [`Rgba`] - A single RGBA color value
//! - [`Shape`] - Vector primitives that rasterize into a buffer
//! - [`Histogram`] - Per-channel 256-bin frequency counts
//!
//! # Example
//!
//! ```
//! use rastra_core::{PixelBuffer, Rgba};
//!
//! let mut buf = PixelBuffer::new(64, 48).unwrap();
//! buf.draw_line(0, 0, 63, 47, Rgba::rgb(255, 0, 0), 1);
//! assert_eq!(buf.get_pixel(0, 0), Some(Rgba::rgb(255, 0, 0)));
//! assert_eq!(buf.get_pixel(64, 0), None);
//! ```

pub mod buffer;
pub mod error;

pub use buffer::graphics::{BEZIER_SEGMENTS, Shape};
pub use buffer::histogram::{Channel, HISTOGRAM_BINS, Histogram};
pub use buffer::{PixelBuffer, Rgba};
pub use error::{Error, Result};

/// Channel layout and luminance helpers for RGBA pixels.
///
/// # Pixel format
///
/// Pixels are stored as four consecutive bytes `R, G, B, A`.
pub mod color {
    /// Red channel offset within a pixel
    pub const RED: usize = 0;
    /// Green channel offset within a pixel
    pub const GREEN: usize = 1;
    /// Blue channel offset within a pixel
    pub const BLUE: usize = 2;
    /// Alpha channel offset within a pixel
    pub const ALPHA: usize = 3;

    /// Bytes per pixel
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Perceptual luminance weights (ITU-R BT.601)
    pub const LUMA_RED: f64 = 0.299;
    pub const LUMA_GREEN: f64 = 0.587;
    pub const LUMA_BLUE: f64 = 0.114;

    /// Grayscale value of an RGB triple.
    ///
    /// `round(0.299 R + 0.587 G + 0.114 B)` clamped to `[0, 255]`.
    #[inline]
    pub fn gray(r: u8, g: u8, b: u8) -> u8 {
        let y = LUMA_RED * r as f64 + LUMA_GREEN * g as f64 + LUMA_BLUE * b as f64;
        clamp_to_u8(y)
    }

    /// Round a real value and saturate it into `[0, 255]`.
    ///
    /// NaN maps to 0.
    #[inline]
    pub fn clamp_to_u8(v: f64) -> u8 {
        if v.is_nan() {
            return 0;
        }
        v.round().clamp(0.0, 255.0) as u8
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_gray_primaries() {
            assert_eq!(gray(255, 0, 0), 76);
            assert_eq!(gray(0, 255, 0), 150);
            assert_eq!(gray(0, 0, 255), 29);
        }

        #[test]
        fn test_gray_extremes() {
            assert_eq!(gray(0, 0, 0), 0);
            assert_eq!(gray(255, 255, 255), 255);
            assert_eq!(gray(128, 128, 128), 128);
        }

        #[test]
        fn test_clamp_to_u8() {
            assert_eq!(clamp_to_u8(-3.2), 0);
            assert_eq!(clamp_to_u8(254.6), 255);
            assert_eq!(clamp_to_u8(300.0), 255);
            assert_eq!(clamp_to_u8(12.5), 13);
            assert_eq!(clamp_to_u8(f64::NAN), 0);
        }
    }
}
