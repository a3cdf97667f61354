//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, closing and the hit-or-miss
//! transform on binary RGBA buffers.
//!
//! A pixel is foreground when its gray value is at least
//! [`FOREGROUND_CUT`], which is exact for buffers whose R, G and B are
//! already 0 or 255. Results are new buffers with R, G and B set to 255
//! (foreground) or 0 and alpha copied from the source.
//!
//! Pixels outside the buffer always read as background, for dilation and
//! erosion alike. Erosion therefore eats foreground that touches the
//! border, and a closing is only guaranteed to contain its input when the
//! foreground keeps clear of the border by the element size.

use crate::Sel;
use rastra_core::PixelBuffer;
use rastra_core::color::{self, BYTES_PER_PIXEL};

/// Gray level at or above which a pixel counts as foreground
pub const FOREGROUND_CUT: u8 = 128;

/// A binary morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MorphOp {
    Dilate,
    Erode,
    /// Erosion then dilation
    #[default]
    Open,
    /// Dilation then erosion
    Close,
}

impl MorphOp {
    /// Apply this operation to `buf`.
    pub fn apply(self, buf: &PixelBuffer, sel: &Sel) -> PixelBuffer {
        let mask = Mask::from_buffer(buf, FOREGROUND_CUT);
        mask_op(self, &mask, sel).to_buffer(buf)
    }
}

/// Foreground flags of a buffer, row-major
struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    fn from_buffer(buf: &PixelBuffer, cut: u8) -> Self {
        Self {
            width: buf.width() as i32,
            height: buf.height() as i32,
            bits: buf.to_gray_values().into_iter().map(|g| g >= cut).collect(),
        }
    }

    fn empty_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            bits: vec![false; self.bits.len()],
        }
    }

    /// Foreground test with the exterior reading as background
    #[inline]
    fn get(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && x < self.width
            && y < self.height
            && self.bits[(y * self.width + x) as usize]
    }

    /// Write 0/255 into R, G, B, copying alpha from `src`
    fn to_buffer(&self, src: &PixelBuffer) -> PixelBuffer {
        let mut out = src.clone();
        for (px, &on) in out
            .data_mut()
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(self.bits.iter())
        {
            px[..color::ALPHA].fill(if on { 255 } else { 0 });
        }
        out
    }
}

fn dilate_mask(src: &Mask, sel: &Sel) -> Mask {
    let offsets: Vec<_> = sel.offsets().collect();
    let mut out = src.empty_like();
    for y in 0..src.height {
        for x in 0..src.width {
            if offsets.iter().any(|&(dx, dy)| src.get(x - dx, y - dy)) {
                out.bits[(y * src.width + x) as usize] = true;
            }
        }
    }
    out
}

fn erode_mask(src: &Mask, sel: &Sel) -> Mask {
    let offsets: Vec<_> = sel.offsets().collect();
    let mut out = src.empty_like();
    for y in 0..src.height {
        for x in 0..src.width {
            if offsets.iter().all(|&(dx, dy)| src.get(x + dx, y + dy)) {
                out.bits[(y * src.width + x) as usize] = true;
            }
        }
    }
    out
}

fn mask_op(op: MorphOp, mask: &Mask, sel: &Sel) -> Mask {
    match op {
        MorphOp::Dilate => dilate_mask(mask, sel),
        MorphOp::Erode => erode_mask(mask, sel),
        MorphOp::Open => dilate_mask(&erode_mask(mask, sel), sel),
        MorphOp::Close => erode_mask(&dilate_mask(mask, sel), sel),
    }
}

/// Dilate a binary buffer
///
/// A pixel becomes foreground when any active `(sx, sy)` of the element
/// sees foreground at `(x - sx + cx, y - sy + cy)`.
pub fn dilate(buf: &PixelBuffer, sel: &Sel) -> PixelBuffer {
    MorphOp::Dilate.apply(buf, sel)
}

/// Erode a binary buffer
///
/// A pixel stays foreground only when every active `(sx, sy)` of the
/// element sees foreground at `(x + sx - cx, y + sy - cy)`.
pub fn erode(buf: &PixelBuffer, sel: &Sel) -> PixelBuffer {
    MorphOp::Erode.apply(buf, sel)
}

/// Open a binary buffer (erosion followed by dilation)
///
/// Removes foreground specks smaller than the element. The result never
/// has foreground where the input has none.
pub fn open(buf: &PixelBuffer, sel: &Sel) -> PixelBuffer {
    MorphOp::Open.apply(buf, sel)
}

/// Close a binary buffer (dilation followed by erosion)
///
/// Fills background gaps smaller than the element.
pub fn close(buf: &PixelBuffer, sel: &Sel) -> PixelBuffer {
    MorphOp::Close.apply(buf, sel)
}

/// Morphological gradient: `dilate(X) AND NOT erode(X)`
///
/// Marks the pixels on either side of every foreground boundary.
pub fn gradient(buf: &PixelBuffer, sel: &Sel) -> PixelBuffer {
    let mask = Mask::from_buffer(buf, FOREGROUND_CUT);
    let dilated = dilate_mask(&mask, sel);
    let eroded = erode_mask(&mask, sel);
    let mut out = mask.empty_like();
    for (o, (d, e)) in out
        .bits
        .iter_mut()
        .zip(dilated.bits.iter().zip(eroded.bits.iter()))
    {
        *o = *d && !*e;
    }
    out.to_buffer(buf)
}

/// Hit-or-miss transform
///
/// A pixel is set when every active cell of `fg` lands on foreground and
/// every active cell of `bg` lands on background, both read at
/// `(x + sx - cx, y + sy - cy)`. Pixels closer to the border than half the
/// larger element are left at 0.
pub fn hit_or_miss(buf: &PixelBuffer, fg: &Sel, bg: &Sel) -> PixelBuffer {
    let mask = Mask::from_buffer(buf, FOREGROUND_CUT);
    let hits: Vec<_> = fg.offsets().collect();
    let misses: Vec<_> = bg.offsets().collect();
    let mx = (fg.width().max(bg.width()) / 2) as i32;
    let my = (fg.height().max(bg.height()) / 2) as i32;

    let mut out = mask.empty_like();
    let mut matches = 0usize;
    for y in my..mask.height - my {
        for x in mx..mask.width - mx {
            let hit = hits.iter().all(|&(dx, dy)| mask.get(x + dx, y + dy))
                && misses.iter().all(|&(dx, dy)| !mask.get(x + dx, y + dy));
            if hit {
                out.bits[(y * mask.width + x) as usize] = true;
                matches += 1;
            }
        }
    }
    log::trace!("hit-or-miss matched {matches} pixels");
    out.to_buffer(buf)
}

/// Threshold at `cut`, then apply `op`
///
/// Pixels with gray `>= cut` are foreground. Works on any buffer, not just
/// binary ones.
pub fn binarize_then(buf: &PixelBuffer, cut: u8, op: MorphOp, sel: &Sel) -> PixelBuffer {
    let mask = Mask::from_buffer(buf, cut);
    mask_op(op, &mask, sel).to_buffer(buf)
}
