//! Image enhancement operations
//!
//! Tone reproduction curve (TRC) mapping, contrast stretching and
//! histogram equalization.

use rastra_core::color::{self, BYTES_PER_PIXEL};
use rastra_core::{Channel, Histogram, PixelBuffer};

/// 256-entry lookup table mapping input intensity to output intensity.
pub type TrcLut = [u8; 256];

/// The identity lookup table.
pub fn identity_trc() -> TrcLut {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = i as u8;
    }
    lut
}

/// Linear stretch of `[min, max]` onto `[0, 255]`.
///
/// `min == max` gives the identity table.
pub fn stretch_trc(min: u8, max: u8) -> TrcLut {
    if min >= max {
        return identity_trc();
    }
    let span = (max - min) as f64;
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = color::clamp_to_u8((i as f64 - min as f64) / span * 255.0);
    }
    lut
}

/// Remap the R, G and B channels through one table each. Alpha is kept.
pub fn trc_map(buf: &PixelBuffer, luts: [&TrcLut; 3]) -> PixelBuffer {
    let mut out = buf.clone();
    for px in out.data_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
        for (c, lut) in luts.iter().enumerate() {
            px[c] = lut[px[c] as usize];
        }
    }
    out
}

/// Per-channel contrast stretch.
///
/// Each of R, G and B is rescaled from its observed `[min, max]` to
/// `[0, 255]` as `round((v - min) / (max - min) * 255)`. A channel with
/// `min == max` is left unchanged.
pub fn stretch_contrast(buf: &PixelBuffer) -> PixelBuffer {
    let hist = buf.histogram();
    let luts = [Channel::Red, Channel::Green, Channel::Blue].map(|ch| {
        match hist.min_max(ch) {
            Some((min, max)) if min < max => stretch_trc(min, max),
            _ => {
                log::debug!("{ch:?} channel is flat, left unchanged");
                identity_trc()
            }
        }
    });
    trc_map(buf, [&luts[0], &luts[1], &luts[2]])
}

/// Histogram equalization table for the gray channel of `hist`.
///
/// `lut[i] = round((cdf[i] - cdf_min) / (total - cdf_min) * 255)` where
/// `cdf_min` is the first non-zero CDF entry; bins below it map to 0. An
/// empty or single-valued histogram gives the identity table.
pub fn equalize_lut(hist: &Histogram) -> TrcLut {
    let mut cdf = [0u64; 256];
    let mut running = 0u64;
    for (i, &count) in hist.gray.iter().enumerate() {
        running += count as u64;
        cdf[i] = running;
    }
    let total = running;
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);

    if total == cdf_min {
        log::debug!("gray histogram has at most one occupied bin, equalization is identity");
        return identity_trc();
    }

    let span = (total - cdf_min) as f64;
    let mut lut = [0u8; 256];
    for (entry, &c) in lut.iter_mut().zip(cdf.iter()) {
        *entry = color::clamp_to_u8((c as f64 - cdf_min as f64) / span * 255.0);
    }
    lut
}

/// Histogram equalization driven by the gray channel.
///
/// Each pixel's R, G and B are scaled by `new_gray / old_gray` (1 when the
/// old gray is 0) and clamped to 255. Strong scale factors shift hue and
/// saturation. Alpha is kept.
pub fn equalize_histogram(buf: &PixelBuffer) -> PixelBuffer {
    let lut = equalize_lut(&buf.histogram());
    let mut out = buf.clone();
    for px in out.data_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
        let old = color::gray(px[color::RED], px[color::GREEN], px[color::BLUE]);
        if old == 0 {
            continue;
        }
        let scale = lut[old as usize] as f64 / old as f64;
        for c in [color::RED, color::GREEN, color::BLUE] {
            px[c] = color::clamp_to_u8(px[c] as f64 * scale);
        }
    }
    out
}
