//! Histogram generation for pixel buffers
//!
//! A [`Histogram`] holds four 256-bin counts (red, green, blue, gray) and is
//! always computed from scratch in one pass over the buffer. Every channel
//! sums to the buffer's pixel count.

use super::PixelBuffer;
use crate::color;

/// Number of bins per channel
pub const HISTOGRAM_BINS: usize = 256;

/// Channel selector for [`Histogram`] queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    /// Luminance, see [`color::gray`]
    Gray,
}

impl Channel {
    /// All four channels, in storage order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Gray];
}

/// Per-channel frequency counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Red channel histogram
    pub red: [u32; HISTOGRAM_BINS],
    /// Green channel histogram
    pub green: [u32; HISTOGRAM_BINS],
    /// Blue channel histogram
    pub blue: [u32; HISTOGRAM_BINS],
    /// Grayscale histogram
    pub gray: [u32; HISTOGRAM_BINS],
}

impl Histogram {
    /// Count every pixel of `buf` into the four channels.
    pub fn compute(buf: &PixelBuffer) -> Self {
        let mut hist = Histogram {
            red: [0; HISTOGRAM_BINS],
            green: [0; HISTOGRAM_BINS],
            blue: [0; HISTOGRAM_BINS],
            gray: [0; HISTOGRAM_BINS],
        };

        for px in buf.data().chunks_exact(color::BYTES_PER_PIXEL) {
            let (r, g, b) = (px[color::RED], px[color::GREEN], px[color::BLUE]);
            hist.red[r as usize] += 1;
            hist.green[g as usize] += 1;
            hist.blue[b as usize] += 1;
            hist.gray[color::gray(r, g, b) as usize] += 1;
        }

        log::trace!("histogram computed over {}x{} buffer", buf.width(), buf.height());
        hist
    }

    /// Build a gray-only histogram from flat grayscale samples.
    ///
    /// The color channels stay empty.
    pub fn from_gray_samples(samples: &[u8]) -> Self {
        let mut gray = [0u32; HISTOGRAM_BINS];
        for &s in samples {
            gray[s as usize] += 1;
        }
        Histogram {
            red: [0; HISTOGRAM_BINS],
            green: [0; HISTOGRAM_BINS],
            blue: [0; HISTOGRAM_BINS],
            gray,
        }
    }

    /// Bins of one channel.
    pub fn channel(&self, channel: Channel) -> &[u32; HISTOGRAM_BINS] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
            Channel::Gray => &self.gray,
        }
    }

    /// Total count of one channel (the pixel count for a computed histogram).
    pub fn total(&self, channel: Channel) -> u64 {
        self.channel(channel).iter().map(|&c| c as u64).sum()
    }

    /// Mean intensity of one channel, or `None` if the channel is empty.
    pub fn mean(&self, channel: Channel) -> Option<f64> {
        let bins = self.channel(channel);
        let total = self.total(channel);
        if total == 0 {
            return None;
        }
        let sum: f64 = bins
            .iter()
            .enumerate()
            .map(|(i, &c)| i as f64 * c as f64)
            .sum();
        Some(sum / total as f64)
    }

    /// Smallest and largest occupied bin of one channel.
    pub fn min_max(&self, channel: Channel) -> Option<(u8, u8)> {
        let bins = self.channel(channel);
        let min = bins.iter().position(|&c| c > 0)?;
        let max = bins.iter().rposition(|&c| c > 0)?;
        Some((min as u8, max as u8))
    }
}

impl PixelBuffer {
    /// Compute the four-channel histogram of this buffer.
    pub fn histogram(&self) -> Histogram {
        Histogram::compute(self)
    }
}
