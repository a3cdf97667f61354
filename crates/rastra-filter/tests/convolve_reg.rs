//! Convolution regression test
//!
//! Identity, smoothing, Gaussian blur and custom kernels.

use rastra_core::{PixelBuffer, Rgba};
use rastra_filter::{Kernel, SmoothingSize, convolve, gaussian_blur, smooth};
use rastra_test::{RegParams, images};

#[test]
fn convolve_reg() {
    let mut rp = RegParams::new("convolve");

    let pixs = images::gradient(40, 30);
    let board = images::checkerboard(24, 24, 3, 0, 255);

    // --- Test 1: identity kernel reproduces the input ---
    let identity = Kernel::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]], 1.0, 0.0)
        .expect("identity kernel");
    rp.compare_buffers(&pixs, &convolve(&pixs, &identity));
    rp.compare_buffers(&board, &convolve(&board, &identity));

    // --- Test 2: smoothing keeps dimensions and lowers variance ---
    let orig_var = gray_variance(&board);
    for size in [
        SmoothingSize::Three,
        SmoothingSize::Five,
        SmoothingSize::Seven,
        SmoothingSize::Nine,
    ] {
        let out = smooth(&board, size.size());
        rp.compare_values(board.width() as f64, out.width() as f64, 0.0);
        rp.compare_values(board.height() as f64, out.height() as f64, 0.0);
        let var = gray_variance(&out);
        eprintln!("  smooth({}): variance {:.1}", size.size(), var);
        rp.compare_true(var < orig_var);
    }

    // --- Test 3: smoothing a linear ramp leaves the interior unchanged ---
    let smoothed = smooth(&pixs, 3);
    let mut max_diff = 0i32;
    for y in 1..29 {
        for x in 1..39 {
            let a = pixs.get_pixel(x, y).expect("in bounds");
            let b = smoothed.get_pixel(x, y).expect("in bounds");
            max_diff = max_diff.max((a.r as i32 - b.r as i32).abs());
            max_diff = max_diff.max((a.g as i32 - b.g as i32).abs());
        }
    }
    rp.compare_values(0.0, max_diff as f64, 1.0);

    // --- Test 4: Gaussian blur of a flat buffer is flat ---
    let flat = PixelBuffer::filled(16, 16, Rgba::new(33, 66, 99, 128)).expect("flat");
    for &(radius, sigma) in &[(0.5, 0.5), (1.0, 1.0), (2.0, 1.5)] {
        rp.compare_buffers(&flat, &gaussian_blur(&flat, radius, sigma));
    }

    // --- Test 5: Gaussian preserves mean brightness away from borders ---
    let mut spot = PixelBuffer::filled(31, 31, Rgba::BLACK).expect("spot");
    spot.fill_disk(15, 15, 3, Rgba::WHITE);
    let blurred = gaussian_blur(&spot, 1.0, 1.0);
    let before: u64 = spot.pixels().map(|p| p.r as u64).sum();
    let after: u64 = blurred.pixels().map(|p| p.r as u64).sum();
    rp.compare_values(before as f64, after as f64, before as f64 * 0.02);

    // --- Test 6: custom kernel with divisor and offset ---
    let emboss = Kernel::from_rows(&[[-1.0, 0.0], [0.0, 1.0]], 1.0, 128.0).expect("emboss");
    let embossed = convolve(&flat, &emboss);
    rp.compare_buffers(
        &PixelBuffer::filled(16, 16, Rgba::new(128, 128, 128, 128)).expect("gray"),
        &embossed,
    );

    assert!(rp.cleanup(), "convolve regression test failed");
}

fn gray_variance(buf: &PixelBuffer) -> f64 {
    let values = buf.to_gray_values();
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values
        .iter()
        .map(|&v| (v as f64 - mean) * (v as f64 - mean))
        .sum::<f64>()
        / n
}
