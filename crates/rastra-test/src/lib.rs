//! rastra-test - Regression test harness for rastra
//!
//! Provides [`RegParams`], which accumulates many comparisons inside one
//! test and reports them together, plus the synthetic fixtures in
//! [`images`] used by every crate's regression tests.
//!
//! # Usage
//!
//! ```ignore
//! use rastra_test::{RegParams, images};
//!
//! let mut rp = RegParams::new("histogram");
//! let buf = images::gradient(16, 16);
//! rp.compare_values(256.0, buf.pixel_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to print every compared value
//! - `RUST_LOG`: Filter for library log output during tests

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Synthetic test images
pub mod images {
    use crate::{TestError, TestResult};
    use rastra_core::{PixelBuffer, Rgba};

    /// Build an opaque grayscale buffer from rows of gray values.
    pub fn from_gray_rows(rows: &[&[u8]]) -> TestResult<PixelBuffer> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != width) {
            return Err(TestError::Fixture("ragged rows".to_string()));
        }
        let mut buf = PixelBuffer::new(width as u32, height as u32)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                buf.set_rgb(x as i32, y as i32, v, v, v);
            }
        }
        Ok(buf)
    }

    /// Build a binary buffer from a text pattern.
    ///
    /// `x` or `#` is foreground (255), anything else background (0).
    pub fn from_pattern(lines: &[&str]) -> TestResult<PixelBuffer> {
        let rows: Vec<Vec<u8>> = lines
            .iter()
            .map(|l| {
                l.chars()
                    .map(|c| if c == 'x' || c == '#' { 255 } else { 0 })
                    .collect()
            })
            .collect();
        let refs: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
        from_gray_rows(&refs)
    }

    /// Alternating `lo`/`hi` cells of `cell x cell` pixels, `lo` at the origin.
    pub fn checkerboard(width: u32, height: u32, cell: u32, lo: u8, hi: u8) -> PixelBuffer {
        let cell = cell.max(1);
        let mut buf = blank(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = if ((x / cell) + (y / cell)) % 2 == 0 { lo } else { hi };
                buf.set_rgb(x as i32, y as i32, v, v, v);
            }
        }
        buf
    }

    /// Smooth color ramp: red grows with x, green with y, blue constant.
    pub fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut buf = blank(width, height);
        let wd = (width.max(2) - 1) as f64;
        let hd = (height.max(2) - 1) as f64;
        for y in 0..height {
            for x in 0..width {
                let r = (x as f64 * 255.0 / wd).round() as u8;
                let g = (y as f64 * 255.0 / hd).round() as u8;
                buf.set_pixel(x as i32, y as i32, Rgba::new(r, g, 96, 255));
            }
        }
        buf
    }

    /// Deterministic pseudo-random binary image.
    ///
    /// About `density` of the pixels at least `margin` pixels away from the
    /// border are foreground; the margin is always background.
    pub fn noisy_binary(
        width: u32,
        height: u32,
        density: f64,
        margin: u32,
        seed: u64,
    ) -> PixelBuffer {
        let mut buf = PixelBuffer::filled(width, height, Rgba::BLACK)
            .unwrap_or_else(|e| panic!("fixture {width}x{height}: {e}"));
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        for y in margin..height.saturating_sub(margin) {
            for x in margin..width.saturating_sub(margin) {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let u = (state >> 11) as f64 / (1u64 << 53) as f64;
                if u < density {
                    buf.set_pixel(x as i32, y as i32, Rgba::WHITE);
                }
            }
        }
        buf
    }

    /// Count pixels whose RGB is pure white.
    pub fn foreground_count(buf: &PixelBuffer) -> usize {
        buf.pixels()
            .filter(|p| p.r == 255 && p.g == 255 && p.b == 255)
            .count()
    }

    /// True if every foreground pixel of `inner` is foreground in `outer`.
    pub fn is_subset(inner: &PixelBuffer, outer: &PixelBuffer) -> bool {
        inner
            .pixels()
            .zip(outer.pixels())
            .all(|(a, b)| a.r != 255 || b.r == 255)
    }

    fn blank(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::new(width, height).unwrap_or_else(|e| panic!("fixture {width}x{height}: {e}"))
    }

}
