//! Rank filtering operations
//!
//! Order-statistic filters. Only the median is offered; it cannot be
//! expressed as a weighted convolution.

use rastra_core::PixelBuffer;
use rastra_core::color::{self, BYTES_PER_PIXEL};

/// Apply a median filter over a `size x size` window.
///
/// For each of R, G and B the in-bounds neighbourhood values are sorted and
/// the element at index `count / 2` is taken, so windows clipped by the
/// border use fewer samples rather than replicated ones. Alpha is copied.
/// A size of 0 is treated as 1. Windows wider than twice the larger buffer
/// side already cover the whole buffer, so larger sizes are clamped there.
pub fn median_filter(buf: &PixelBuffer, size: u32) -> PixelBuffer {
    let w = buf.width() as i32;
    let h = buf.height() as i32;
    let full = 2 * w.max(h) + 1;
    let size = (size.min(full as u32) as i32).max(1);
    let lo = size / 2;
    let hi = size - 1 - lo;

    let src = buf.data();
    let mut out = buf.new_like();
    let dst = out.data_mut();

    let cap = (size as usize).pow(2).min(buf.pixel_count());
    let mut window: [Vec<u8>; 3] = [
        Vec::with_capacity(cap),
        Vec::with_capacity(cap),
        Vec::with_capacity(cap),
    ];

    for y in 0..h {
        let y0 = (y - lo).max(0);
        let y1 = (y + hi).min(h - 1);
        for x in 0..w {
            let x0 = (x - lo).max(0);
            let x1 = (x + hi).min(w - 1);

            for values in &mut window {
                values.clear();
            }
            for sy in y0..=y1 {
                for sx in x0..=x1 {
                    let i = (sy * w + sx) as usize * BYTES_PER_PIXEL;
                    for (c, values) in window.iter_mut().enumerate() {
                        values.push(src[i + c]);
                    }
                }
            }

            let o = (y * w + x) as usize * BYTES_PER_PIXEL;
            for (c, values) in window.iter_mut().enumerate() {
                values.sort_unstable();
                dst[o + c] = values[values.len() / 2];
            }
            dst[o + color::ALPHA] = src[o + color::ALPHA];
        }
    }

    out
}
