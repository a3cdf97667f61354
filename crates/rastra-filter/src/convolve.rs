//! Convolution operations
//!
//! Implements buffer convolution with arbitrary kernels, plus the uniform
//! smoothing and Gaussian blur built on it.

use crate::Kernel;
use rastra_core::PixelBuffer;
use rastra_core::color::{self, BYTES_PER_PIXEL};

/// Standard smoothing window sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmoothingSize {
    /// 3x3 window
    #[default]
    Three,
    /// 5x5 window
    Five,
    /// 7x7 window
    Seven,
    /// 9x9 window
    Nine,
}

impl SmoothingSize {
    /// Window side length in pixels.
    pub fn size(self) -> u32 {
        match self {
            SmoothingSize::Three => 3,
            SmoothingSize::Five => 5,
            SmoothingSize::Seven => 7,
            SmoothingSize::Nine => 9,
        }
    }
}

/// Convolve a buffer with a kernel
///
/// Each of R, G and B is filtered independently; alpha is copied. The output
/// value is `clamp(round(sum / divisor + offset), 0, 255)`.
///
/// Uses replicate (clamp) border handling: pixels outside the buffer are
/// treated as having the same value as the nearest edge pixel. A divisor of
/// 0 is treated as 1.
pub fn convolve(buf: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let divisor = if kernel.divisor() == 0.0 {
        log::debug!("kernel divisor is 0, using 1");
        1.0
    } else {
        kernel.divisor()
    };
    let offset = kernel.offset();

    let w = buf.width() as i32;
    let h = buf.height() as i32;
    let kw = kernel.width() as i32;
    let kh = kernel.height() as i32;
    let kcx = kernel.center_x() as i32;
    let kcy = kernel.center_y() as i32;
    let weights = kernel.data();

    let src = buf.data();
    let mut out = buf.new_like();
    let dst = out.data_mut();

    for y in 0..h {
        for x in 0..w {
            let mut sum = [0.0f64; 3];

            for ky in 0..kh {
                // Clamp to buffer boundaries (replicate border)
                let sy = (y + ky - kcy).clamp(0, h - 1);
                for kx in 0..kw {
                    let k = weights[(ky * kw + kx) as usize];
                    if k == 0.0 {
                        continue;
                    }
                    let sx = (x + kx - kcx).clamp(0, w - 1);
                    let i = (sy * w + sx) as usize * BYTES_PER_PIXEL;
                    sum[0] += src[i] as f64 * k;
                    sum[1] += src[i + 1] as f64 * k;
                    sum[2] += src[i + 2] as f64 * k;
                }
            }

            let o = (y * w + x) as usize * BYTES_PER_PIXEL;
            for (c, s) in sum.iter().enumerate() {
                dst[o + c] = color::clamp_to_u8(s / divisor + offset);
            }
            dst[o + color::ALPHA] = src[o + color::ALPHA];
        }
    }

    log::trace!("convolved {w}x{h} buffer with {kw}x{kh} kernel");
    out
}

/// Uniform smoothing over a `size x size` window.
///
/// A size of 0 is treated as 1 (no change); see [`Kernel::box_kernel`] for
/// the upper clamp.
pub fn smooth(buf: &PixelBuffer, size: u32) -> PixelBuffer {
    convolve(buf, &Kernel::box_kernel(size))
}

/// Gaussian blur with a kernel built by [`Kernel::gaussian`].
pub fn gaussian_blur(buf: &PixelBuffer, radius: f64, sigma: f64) -> PixelBuffer {
    convolve(buf, &Kernel::gaussian(radius, sigma))
}
