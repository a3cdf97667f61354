//! Convolution kernels
//!
//! A [`Kernel`] is a rectangular grid of `f64` weights with a center at
//! `(width / 2, height / 2)`, a divisor applied to every weighted sum and an
//! offset added afterwards. Odd dimensions are not enforced.
//!
//! Constructors:
//! - [`Kernel::new`] / [`Kernel::from_slice`] / [`Kernel::from_rows`]
//! - [`Kernel::identity`], [`Kernel::box_kernel`], [`Kernel::gaussian`]
//! - [`Kernel::sobel_horizontal`], [`Kernel::sobel_vertical`], [`Kernel::sharpen`]

use crate::{FilterError, FilterResult};

/// Largest kernel side; presets asking for more are clamped to it
pub const MAX_KERNEL_SIZE: u32 = 1025;

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "KernelSettings", into = "KernelSettings")
)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
    /// Every weighted sum is divided by this
    divisor: f64,
    /// Added after division
    offset: f64,
}

impl Kernel {
    /// Create a zero-filled kernel with divisor 1 and offset 0.
    ///
    /// Each side must lie in `1..=MAX_KERNEL_SIZE`.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 || width > MAX_KERNEL_SIZE || height > MAX_KERNEL_SIZE {
            return Err(FilterError::InvalidKernel(format!(
                "kernel sides must be in 1..={MAX_KERNEL_SIZE}, got {width}x{height}"
            )));
        }
        Ok(Self::build(width, height, vec![0.0; area(width, height)]))
    }

    /// Create a kernel from row-major weights.
    pub fn from_slice(width: u32, height: u32, data: &[f64]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values for a {}x{} kernel, got {}",
                kernel.data.len(),
                width,
                height,
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a kernel from a list of rows plus divisor and offset.
    ///
    /// All rows must have the same non-zero length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], divisor: f64, offset: f64) -> FilterResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.as_ref().len() != width)
        {
            return Err(FilterError::InvalidKernel(format!(
                "row {} has {} values, expected {}",
                i,
                row.as_ref().len(),
                width
            )));
        }
        let data: Vec<f64> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        let kernel = Self::from_slice(width as u32, height as u32, &data)?;
        Ok(kernel.with_divisor(divisor).with_offset(offset))
    }

    fn build(width: u32, height: u32, data: Vec<f64>) -> Self {
        Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data,
            divisor: 1.0,
            offset: 0.0,
        }
    }

    /// 3x3 kernel that reproduces its input.
    pub fn identity() -> Self {
        let mut data = vec![0.0; 9];
        data[4] = 1.0;
        Self::build(3, 3, data)
    }

    /// Uniform `size x size` kernel of ones with divisor `size²`.
    ///
    /// A size of 0 is treated as 1; sizes above [`MAX_KERNEL_SIZE`] are
    /// clamped to it.
    pub fn box_kernel(size: u32) -> Self {
        let size = clamp_side(size.max(1));
        let n = area(size, size);
        Self::build(size, size, vec![1.0; n]).with_divisor(n as f64)
    }

    /// Normalized Gaussian kernel.
    ///
    /// The side is `ceil(radius * 6)` forced odd (at least 1, at most
    /// [`MAX_KERNEL_SIZE`]); the weight at offset `(x, y)` from the center
    /// is `exp(-(x² + y²) / (2σ²))`, scaled so all weights sum to 1. A
    /// non-positive `sigma` gives the 1x1 identity kernel.
    pub fn gaussian(radius: f64, sigma: f64) -> Self {
        if sigma.is_nan() || sigma <= 0.0 {
            log::debug!("gaussian sigma {sigma} is not positive, using identity kernel");
            return Self::build(1, 1, vec![1.0]);
        }
        let raw = (radius * 6.0).ceil();
        let mut size = if raw.is_nan() || raw < 1.0 {
            1
        } else if raw > MAX_KERNEL_SIZE as f64 {
            log::debug!("gaussian radius {radius} too large, clamping side to {MAX_KERNEL_SIZE}");
            MAX_KERNEL_SIZE
        } else {
            raw as u32
        };
        if size % 2 == 0 {
            size += 1;
        }

        let c = (size / 2) as f64;
        let two_sigma2 = 2.0 * sigma * sigma;
        let mut data = Vec::with_capacity(area(size, size));
        for y in 0..size {
            for x in 0..size {
                let dx = x as f64 - c;
                let dy = y as f64 - c;
                data.push((-(dx * dx + dy * dy) / two_sigma2).exp());
            }
        }

        let mut kernel = Self::build(size, size, data);
        kernel.normalize();
        log::trace!("gaussian kernel {size}x{size} (radius {radius}, sigma {sigma})");
        kernel
    }

    /// Sobel `Gx` (responds to horizontal intensity change).
    pub fn sobel_horizontal() -> Self {
        Self::build(3, 3, vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0])
    }

    /// Sobel `Gy` (responds to vertical intensity change).
    pub fn sobel_vertical() -> Self {
        Self::build(3, 3, vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
    }

    /// High-pass sharpening kernel `[[0,-1,0],[-1,5,-1],[0,-1,0]]`.
    pub fn sharpen() -> Self {
        Self::build(3, 3, vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0])
    }

    /// Replace the divisor.
    pub fn with_divisor(mut self, divisor: f64) -> Self {
        self.divisor = divisor;
        self
    }

    /// Replace the offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Kernel weights, row-major.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Weight at `(x, y)`, or `None` outside the kernel.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Set the weight at `(x, y)`. Ignored outside the kernel.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        if x < self.width && y < self.height {
            self.data[y as usize * self.width as usize + x as usize] = value;
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Scale the weights so they sum to 1. No-op when the sum is 0.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn clamp_side(size: u32) -> u32 {
    if size > MAX_KERNEL_SIZE {
        log::debug!("kernel side {size} clamped to {MAX_KERNEL_SIZE}");
        MAX_KERNEL_SIZE
    } else {
        size
    }
}

/// Serialized form of a [`Kernel`]; deserializing re-runs the checks of
/// [`Kernel::from_slice`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct KernelSettings {
    width: u32,
    height: u32,
    data: Vec<f64>,
    divisor: f64,
    offset: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<KernelSettings> for Kernel {
    type Error = FilterError;

    fn try_from(s: KernelSettings) -> FilterResult<Self> {
        let kernel = Kernel::from_slice(s.width, s.height, &s.data)?;
        Ok(kernel.with_divisor(s.divisor).with_offset(s.offset))
    }
}

#[cfg(feature = "serde")]
impl From<Kernel> for KernelSettings {
    fn from(k: Kernel) -> Self {
        Self {
            width: k.width,
            height: k.height,
            data: k.data,
            divisor: k.divisor,
            offset: k.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(Kernel::new(0, 3).is_err());
        let k = Kernel::new(4, 2).unwrap();
        assert_eq!(k.center_x(), 2);
        assert_eq!(k.center_y(), 1);
        assert_eq!(k.divisor(), 1.0);
    }

    #[test]
    fn test_from_rows() {
        let k = Kernel::from_rows(&[[1.0, 2.0, 1.0], [2.0, 4.0, 2.0]], 12.0, 3.0).unwrap();
        assert_eq!(k.width(), 3);
        assert_eq!(k.height(), 2);
        assert_eq!(k.get(1, 1), Some(4.0));
        assert_eq!(k.get(3, 0), None);
        assert_eq!(k.divisor(), 12.0);
        assert_eq!(k.offset(), 3.0);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(Kernel::from_rows(&rows, 1.0, 0.0), Err(FilterError::InvalidKernel(_))));
        let empty: Vec<Vec<f64>> = Vec::new();
        assert!(Kernel::from_rows(&empty, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_box_kernel() {
        let k = Kernel::box_kernel(5);
        assert_eq!(k.width(), 5);
        assert_eq!(k.sum(), 25.0);
        assert_eq!(k.divisor(), 25.0);
        assert_eq!(Kernel::box_kernel(0).width(), 1);
    }

    #[test]
    fn test_gaussian_size_and_normalization() {
        // ceil(1.0 * 6) = 6, forced odd
        let k = Kernel::gaussian(1.0, 1.0);
        assert_eq!(k.width(), 7);
        assert_eq!(k.center_x(), 3);
        assert!((k.sum() - 1.0).abs() < 1e-12);
        // peak at center, symmetric
        let center = k.get(3, 3).unwrap();
        assert!(k.data().iter().all(|&v| v <= center));
        assert_eq!(k.get(0, 3), k.get(6, 3));
        assert_eq!(k.get(3, 0), k.get(3, 6));

        assert_eq!(Kernel::gaussian(0.5, 1.0).width(), 3);
        assert_eq!(Kernel::gaussian(0.0, 1.0).width(), 1);
    }

    #[test]
    fn test_gaussian_non_positive_sigma_is_identity() {
        let k = Kernel::gaussian(2.0, 0.0);
        assert_eq!(k.width(), 1);
        assert_eq!(k.data(), &[1.0]);
        assert_eq!(Kernel::gaussian(2.0, -1.0), k);
    }

    #[test]
    fn test_fixed_kernels_sum() {
        assert_eq!(Kernel::identity().sum(), 1.0);
        assert_eq!(Kernel::sharpen().sum(), 1.0);
        assert_eq!(Kernel::sobel_horizontal().sum(), 0.0);
        assert_eq!(Kernel::sobel_vertical().get(1, 2), Some(2.0));
    }

    #[test]
    fn test_normalize_zero_sum_is_noop() {
        let mut k = Kernel::sobel_horizontal();
        k.normalize();
        assert_eq!(k, Kernel::sobel_horizontal());
    }

    #[test]
    fn test_oversized_requests() {
        assert!(Kernel::new(MAX_KERNEL_SIZE + 1, 1).is_err());
        assert!(Kernel::new(u32::MAX, u32::MAX).is_err());
        assert!(Kernel::new(MAX_KERNEL_SIZE, 1).is_ok());

        let k = Kernel::box_kernel(u32::MAX);
        assert_eq!(k.width(), MAX_KERNEL_SIZE);
        assert_eq!(k.divisor(), (MAX_KERNEL_SIZE as f64).powi(2));
    }

    #[test]
    fn test_gaussian_huge_radius_is_clamped() {
        for radius in [12000.0, 1e12, f64::INFINITY] {
            let k = Kernel::gaussian(radius, 2.0);
            assert_eq!(k.width(), MAX_KERNEL_SIZE);
            assert_eq!(k.center_x(), MAX_KERNEL_SIZE / 2);
            assert!((k.sum() - 1.0).abs() < 1e-9);
        }
        assert_eq!(Kernel::gaussian(f64::NAN, 2.0).width(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let k = Kernel::from_rows(&[[1.0, 2.0], [3.0, 4.0]], 10.0, 5.0).unwrap();
        let json = serde_json::to_string(&k).unwrap();
        let back: Kernel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, k);
        assert_eq!(back.center_x(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_malformed() {
        let short = r#"{"width":3,"height":3,"data":[1.0],"divisor":1.0,"offset":0.0}"#;
        assert!(serde_json::from_str::<Kernel>(short).is_err());
        let empty = r#"{"width":0,"height":3,"data":[],"divisor":1.0,"offset":0.0}"#;
        assert!(serde_json::from_str::<Kernel>(empty).is_err());
    }
}
