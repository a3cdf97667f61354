//! PixelBuffer - The RGBA raster container
//!
//! # Pixel layout
//!
//! - Four bytes per pixel, interleaved `R, G, B, A`
//! - Rows are stored top to bottom, pixels left to right
//! - No row padding: the byte length is always `width * height * 4`
//!
//! # Bounds policy
//!
//! Every accessor is bounds-checked. Writes outside the buffer are dropped
//! and reads outside it return `None`; shapes routinely extend past the
//! visible canvas, so neither case is an error.
//!
//! A buffer never changes size. Resizing a canvas means building a new
//! buffer.

pub mod graphics;
pub mod histogram;

use crate::color::{self, BYTES_PER_PIXEL};
use crate::error::{Error, Result};

/// A single RGBA color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a color from all four components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent black, the cleared-buffer value
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque black
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Grayscale value of this color (alpha ignored).
    pub fn gray(&self) -> u8 {
        color::gray(self.r, self.g, self.b)
    }
}

/// Bounds-checked RGBA raster storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new zero-filled (transparent black) buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `width` or `height` is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self> {
        let mut buf = Self::new(width, height)?;
        for px in buf.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Ok(buf)
    }

    /// Wrap decoded RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero side and
    /// [`Error::DataLength`] if `data.len() != width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a zero-filled buffer with the same dimensions as `self`.
    pub fn new_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: vec![0; self.data.len()],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its RGBA bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Zero-fill the whole buffer (transparent black).
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Check whether `(x, y)` lies inside the buffer.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Byte offset of pixel `(x, y)`, or `None` when out of bounds.
    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
        } else {
            None
        }
    }

    /// Byte offset of an in-bounds pixel.
    ///
    /// Callers iterate `0..width` x `0..height`, so no check is needed.
    #[inline]
    pub fn offset_unchecked(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + BYTES_PER_PIXEL]
                .copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Overwrite the pixel at `(x, y)` with an opaque color.
    #[inline]
    pub fn set_rgb(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        self.set_pixel(x, y, Rgba::rgb(r, g, b));
    }

    /// Read the pixel at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.offset(x, y).map(|i| {
            Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
        })
    }

    /// Read the pixel at an in-bounds position.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Rgba {
        let i = self.offset_unchecked(x, y);
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Grayscale value at `(x, y)`, or `None` when out of bounds.
    pub fn gray_at(&self, x: i32, y: i32) -> Option<u8> {
        self.get_pixel(x, y).map(|p| p.gray())
    }

    /// Flat row-major grayscale samples, one per pixel.
    pub fn to_gray_values(&self) -> Vec<u8> {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| color::gray(px[color::RED], px[color::GREEN], px[color::BLUE]))
            .collect()
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
    }
}

fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(Error::InvalidDimension { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_filled() {
        let buf = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.data().len(), 24);
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(matches!(
            PixelBuffer::new(0, 5),
            Err(Error::InvalidDimension {
                width: 0,
                height: 5
            })
        ));
        assert!(PixelBuffer::new(5, 0).is_err());
    }

    #[test]
    fn test_from_raw_length_check() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            PixelBuffer::from_raw(2, 2, vec![0; 15]),
            Err(Error::DataLength {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_set_get_pixel() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        buf.set_pixel(1, 2, Rgba::new(10, 20, 30, 40));
        assert_eq!(buf.get_pixel(1, 2), Some(Rgba::new(10, 20, 30, 40)));
        let i = (2 * 4 + 1) * 4;
        assert_eq!(&buf.data()[i..i + 4], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_set_rgb_defaults_alpha() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.set_rgb(0, 0, 1, 2, 3);
        assert_eq!(buf.get_pixel(0, 0), Some(Rgba::new(1, 2, 3, 255)));
    }

    #[test]
    fn test_out_of_bounds_is_silent() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        let before = buf.clone();
        buf.set_pixel(-1, 0, Rgba::WHITE);
        buf.set_pixel(4, 0, Rgba::WHITE);
        buf.set_pixel(0, 4, Rgba::WHITE);
        buf.set_pixel(0, -7, Rgba::WHITE);
        assert_eq!(buf, before);
        assert_eq!(buf.get_pixel(-1, 0), None);
        assert_eq!(buf.get_pixel(4, 3), None);
        assert_eq!(buf.gray_at(0, 4), None);
    }

    #[test]
    fn test_clear() {
        let mut buf = PixelBuffer::filled(3, 3, Rgba::WHITE).unwrap();
        buf.clear();
        assert!(buf.pixels().all(|p| p == Rgba::TRANSPARENT));
    }

    #[test]
    fn test_to_gray_values() {
        let mut buf = PixelBuffer::new(2, 1).unwrap();
        buf.set_rgb(0, 0, 255, 255, 255);
        buf.set_rgb(1, 0, 255, 0, 0);
        assert_eq!(buf.to_gray_values(), vec![255, 76]);
    }
}
