//! Edge detection and enhancement operations
//!
//! - [`sobel_edge`]: binarized Sobel gradient magnitude
//! - [`sharpen`]: high-pass kernel blended with the original

use crate::{Kernel, convolve};
use rastra_core::PixelBuffer;
use rastra_core::color::{self, BYTES_PER_PIXEL};

/// Which Sobel gradient component to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SobelMode {
    /// `|Gx|`
    Horizontal,
    /// `|Gy|`
    Vertical,
    /// `sqrt(Gx² + Gy²)`
    #[default]
    Both,
}

/// Apply Sobel edge detection.
///
/// The buffer is converted to grayscale, convolved with the 3x3 Sobel
/// kernels (replicate border) and the magnitude selected by `mode` is
/// binarized: `>= threshold` gives 255 in R, G and B, anything else 0.
/// Alpha is copied.
pub fn sobel_edge(buf: &PixelBuffer, mode: SobelMode, threshold: f64) -> PixelBuffer {
    let gray = buf.to_gray_values();
    let w = buf.width() as i32;
    let h = buf.height() as i32;
    let gx_kernel = Kernel::sobel_horizontal();
    let gy_kernel = Kernel::sobel_vertical();
    let gx_w = gx_kernel.data();
    let gy_w = gy_kernel.data();

    let src = buf.data();
    let mut out = buf.new_like();
    let dst = out.data_mut();
    let mut edges = 0usize;

    for y in 0..h {
        for x in 0..w {
            let mut gx = 0.0f64;
            let mut gy = 0.0f64;
            for ky in 0..3 {
                let sy = (y + ky - 1).clamp(0, h - 1);
                for kx in 0..3 {
                    let sx = (x + kx - 1).clamp(0, w - 1);
                    let v = gray[(sy * w + sx) as usize] as f64;
                    let k = (ky * 3 + kx) as usize;
                    gx += v * gx_w[k];
                    gy += v * gy_w[k];
                }
            }

            let magnitude = match mode {
                SobelMode::Horizontal => gx.abs(),
                SobelMode::Vertical => gy.abs(),
                SobelMode::Both => gx.hypot(gy),
            };
            let v = if magnitude >= threshold {
                edges += 1;
                255
            } else {
                0
            };

            let o = (y * w + x) as usize * BYTES_PER_PIXEL;
            dst[o..o + 3].fill(v);
            dst[o + color::ALPHA] = src[o + color::ALPHA];
        }
    }

    log::trace!("sobel {mode:?} at {threshold}: {edges} edge pixels");
    out
}

/// Sharpen with the high-pass kernel and blend by `strength`.
///
/// `out = clamp(round(orig + (conv - orig) * strength), 0, 255)` per R, G, B
/// channel, where `conv` is the clamped convolution result. Strength 0 leaves
/// the buffer unchanged and 1 gives the plain convolution.
pub fn sharpen(buf: &PixelBuffer, strength: f64) -> PixelBuffer {
    let conv = convolve(buf, &Kernel::sharpen());
    let mut out = buf.clone();
    for (o, c) in out
        .data_mut()
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(conv.data().chunks_exact(BYTES_PER_PIXEL))
    {
        for ch in [color::RED, color::GREEN, color::BLUE] {
            let orig = o[ch] as f64;
            o[ch] = color::clamp_to_u8(orig + (c[ch] as f64 - orig) * strength);
        }
    }
    out
}
