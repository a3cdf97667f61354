//! Global threshold selection and binarization
//!
//! Every method works on the 256-bin gray histogram and returns one cut
//! value `t`. Pixels with `gray < t` are background, `gray >= t` foreground.
//!
//! The search-based methods try every `t` in `1..=254` and keep the first
//! best candidate. Input that leaves no usable candidate (an empty
//! histogram, or one where every split has an empty class) yields
//! [`DEFAULT_THRESHOLD`] instead of an error.

use std::fmt;
use std::str::FromStr;

use crate::{ColorError, ColorResult};
use rastra_core::color::{self, BYTES_PER_PIXEL};
use rastra_core::{HISTOGRAM_BINS, Histogram, PixelBuffer};

/// Threshold returned when the histogram gives no usable answer
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Iteration cap for [`ThresholdMethod::IterativeMean`]
const MAX_ITERATIONS: usize = 100;

/// Floor applied to class variances in the minimum-error criterion
const VARIANCE_FLOOR: f64 = 1e-6;

/// Decay length of the fuzzy membership functions, in gray levels
const FUZZY_SPREAD: f64 = 10.0;

/// Strategy for choosing a global threshold
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdMethod {
    /// Fixed user-supplied value
    Manual(u8),
    /// Gray value below which the given percentage of pixels lies
    Percentile(f64),
    /// Isodata: midpoint of the two class means, iterated to convergence
    #[default]
    IterativeMean,
    /// Kapur: maximize the summed class entropies
    Entropy,
    /// Kittler-Illingworth: minimize the classification error criterion
    MinimumError,
    /// Minimize the fuzziness of exponential class memberships
    FuzzyMinimumError,
}

impl ThresholdMethod {
    /// Choose a threshold from a 256-bin gray histogram.
    pub fn compute(&self, hist: &[u32; HISTOGRAM_BINS]) -> u8 {
        let t = match *self {
            ThresholdMethod::Manual(t) => return t,
            ThresholdMethod::Percentile(p) => percentile(hist, p),
            ThresholdMethod::IterativeMean => iterative_mean(hist),
            ThresholdMethod::Entropy => best_candidate(hist, kapur_score),
            ThresholdMethod::MinimumError => {
                best_candidate(hist, |p, t| kittler_criterion(p, t).map(|j| -j))
            }
            ThresholdMethod::FuzzyMinimumError => {
                best_candidate(hist, |p, t| Some(-fuzzy_entropy(p, t)))
            }
        };
        log::trace!("{self:?} threshold = {t}");
        t
    }

    /// Choose a threshold from flat gray samples.
    ///
    /// Same result as [`ThresholdMethod::compute`] on their histogram.
    pub fn compute_from_samples(&self, samples: &[u8]) -> u8 {
        self.compute(&Histogram::from_gray_samples(samples).gray)
    }
}

impl fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdMethod::Manual(t) => write!(f, "manual:{t}"),
            ThresholdMethod::Percentile(p) => write!(f, "percentile:{p}"),
            ThresholdMethod::IterativeMean => f.write_str("iterative-mean"),
            ThresholdMethod::Entropy => f.write_str("entropy"),
            ThresholdMethod::MinimumError => f.write_str("minimum-error"),
            ThresholdMethod::FuzzyMinimumError => f.write_str("fuzzy-minimum-error"),
        }
    }
}

impl FromStr for ThresholdMethod {
    type Err = ColorError;

    /// Parse the form written by `Display`, e.g. `manual:100` or `entropy`.
    fn from_str(s: &str) -> ColorResult<Self> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };
        let bad = ColorError::InvalidParameters;

        match (name.to_ascii_lowercase().as_str(), arg) {
            ("manual", Some(a)) => a
                .parse::<u8>()
                .map(ThresholdMethod::Manual)
                .map_err(|e| bad(format!("manual threshold {a:?}: {e}"))),
            ("percentile", Some(a)) => {
                let p = a
                    .parse::<f64>()
                    .map_err(|e| bad(format!("percentile {a:?}: {e}")))?;
                if p.is_finite() {
                    Ok(ThresholdMethod::Percentile(p))
                } else {
                    Err(bad(format!("percentile must be finite, got {p}")))
                }
            }
            ("manual" | "percentile", None) => Err(bad(format!("{name} needs a value"))),
            ("iterative-mean", None) => Ok(ThresholdMethod::IterativeMean),
            ("entropy", None) => Ok(ThresholdMethod::Entropy),
            ("minimum-error", None) => Ok(ThresholdMethod::MinimumError),
            ("fuzzy-minimum-error", None) => Ok(ThresholdMethod::FuzzyMinimumError),
            _ => Err(bad(format!("unknown threshold method {s:?}"))),
        }
    }
}

/// Histogram as probabilities, or `None` when it is empty.
fn normalized(hist: &[u32; HISTOGRAM_BINS]) -> Option<[f64; HISTOGRAM_BINS]> {
    let total: u64 = hist.iter().map(|&c| c as u64).sum();
    if total == 0 {
        return None;
    }
    let mut p = [0.0; HISTOGRAM_BINS];
    for (pi, &c) in p.iter_mut().zip(hist.iter()) {
        *pi = c as f64 / total as f64;
    }
    Some(p)
}

/// Run `score` over `t` in `1..=254`, returning the first maximum.
fn best_candidate<F>(hist: &[u32; HISTOGRAM_BINS], score: F) -> u8
where
    F: Fn(&[f64; HISTOGRAM_BINS], usize) -> Option<f64>,
{
    let Some(p) = normalized(hist) else {
        log::debug!("empty histogram, using default threshold");
        return DEFAULT_THRESHOLD;
    };

    let mut best: Option<(usize, f64)> = None;
    for t in 1..HISTOGRAM_BINS - 1 {
        let Some(s) = score(&p, t).filter(|s| s.is_finite()) else {
            continue;
        };
        if best.is_none_or(|(_, b)| s > b) {
            best = Some((t, s));
        }
    }

    match best {
        Some((t, _)) => t as u8,
        None => {
            log::debug!("no admissible threshold candidate, using default");
            DEFAULT_THRESHOLD
        }
    }
}

/// Mass, mean and variance of bins `range` of `p`.
fn class_stats(p: &[f64; HISTOGRAM_BINS], range: std::ops::Range<usize>) -> (f64, f64, f64) {
    let mass: f64 = p[range.clone()].iter().sum();
    if mass <= 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let mean = range.clone().map(|i| i as f64 * p[i]).sum::<f64>() / mass;
    let var = range
        .map(|i| (i as f64 - mean) * (i as f64 - mean) * p[i])
        .sum::<f64>()
        / mass;
    (mass, mean, var)
}

fn percentile(hist: &[u32; HISTOGRAM_BINS], p: f64) -> u8 {
    let total: u64 = hist.iter().map(|&c| c as u64).sum();
    if total == 0 {
        log::debug!("empty histogram, using default threshold");
        return DEFAULT_THRESHOLD;
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
    let index = ((p / 100.0 * total as f64).floor() as u64).min(total - 1);

    // value of the sorted sample at `index`
    let mut seen = 0u64;
    for (v, &c) in hist.iter().enumerate() {
        seen += c as u64;
        if seen > index {
            return v as u8;
        }
    }
    u8::MAX
}

fn iterative_mean(hist: &[u32; HISTOGRAM_BINS]) -> u8 {
    let mut t = DEFAULT_THRESHOLD as i32;
    for _ in 0..MAX_ITERATIONS {
        let (mut n1, mut s1, mut n2, mut s2) = (0u64, 0u64, 0u64, 0u64);
        for (i, &c) in hist.iter().enumerate() {
            if (i as i32) < t {
                n1 += c as u64;
                s1 += i as u64 * c as u64;
            } else {
                n2 += c as u64;
                s2 += i as u64 * c as u64;
            }
        }
        let mean1 = if n1 == 0 { 0.0 } else { s1 as f64 / n1 as f64 };
        let mean2 = if n2 == 0 { 255.0 } else { s2 as f64 / n2 as f64 };
        let next = ((mean1 + mean2) / 2.0).round() as i32;
        let delta = (next - t).abs();
        t = next;
        if delta <= 1 {
            break;
        }
    }
    t.clamp(0, 255) as u8
}

/// `H1 + H2` of the two renormalized classes; `None` if either is empty.
fn kapur_score(p: &[f64; HISTOGRAM_BINS], t: usize) -> Option<f64> {
    let p1: f64 = p[..t].iter().sum();
    let p2: f64 = p[t..].iter().sum();
    if p1 <= 0.0 || p2 <= 0.0 {
        return None;
    }
    let entropy = |bins: &[f64], mass: f64| -> f64 {
        bins.iter()
            .filter(|&&q| q > 0.0)
            .map(|&q| {
                let r = q / mass;
                -r * r.ln()
            })
            .sum()
    };
    Some(entropy(&p[..t], p1) + entropy(&p[t..], p2))
}

/// Kittler-Illingworth `J(t)`; `None` if either class is empty.
fn kittler_criterion(p: &[f64; HISTOGRAM_BINS], t: usize) -> Option<f64> {
    let (p1, _, v1) = class_stats(p, 0..t);
    let (p2, _, v2) = class_stats(p, t..HISTOGRAM_BINS);
    if p1 <= 0.0 || p2 <= 0.0 {
        return None;
    }
    let ln_sigma1 = 0.5 * v1.max(VARIANCE_FLOOR).ln();
    let ln_sigma2 = 0.5 * v2.max(VARIANCE_FLOOR).ln();
    Some(1.0 + 2.0 * (p1 * ln_sigma1 + p2 * ln_sigma2) - 2.0 * (p1 * p1.ln() + p2 * p2.ln()))
}

/// Total fuzziness `-Σ p(i) (μ1 ln μ1 + μ2 ln μ2)` at threshold `t`.
fn fuzzy_entropy(p: &[f64; HISTOGRAM_BINS], t: usize) -> f64 {
    // μ ln μ for μ = exp(-d / spread)
    let term = |d: f64| -> f64 {
        let mu = (-d / FUZZY_SPREAD).exp();
        mu * mu.ln()
    };
    p.iter()
        .enumerate()
        .filter(|&(_, &q)| q > 0.0)
        .map(|(i, &q)| {
            let (mu1, mu2) = if i <= t {
                (0.0, if i < t { term((t - i) as f64) } else { 0.0 })
            } else {
                (term((i - t) as f64), 0.0)
            };
            -q * (mu1 + mu2)
        })
        .sum()
}

/// Binarize at `t`: `gray >= t` becomes white, anything else black.
///
/// Alpha is left untouched.
pub fn binarize(buf: &PixelBuffer, t: u8) -> PixelBuffer {
    let mut out = buf.clone();
    for px in out.data_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
        let g = color::gray(px[color::RED], px[color::GREEN], px[color::BLUE]);
        px[..color::ALPHA].fill(if g >= t { 255 } else { 0 });
    }
    out
}

/// Pick a threshold for `buf` with `method` and binarize at it.
pub fn threshold_buffer(buf: &PixelBuffer, method: &ThresholdMethod) -> (u8, PixelBuffer) {
    let t = method.compute(&buf.histogram().gray);
    (t, binarize(buf, t))
}
