//! Binary morphology regression test
//!
//! Idempotence and containment of opening and closing on noisy binary
//! images, plus dilation/erosion ordering.

use rastra_morph::{Sel, SelShape, close, dilate, erode, open};
use rastra_test::{RegParams, images};

#[test]
fn binmorph_reg() {
    let mut rp = RegParams::new("binmorph");

    for seed in [1u64, 7, 42] {
        for shape in [SelShape::Square, SelShape::Cross, SelShape::Circle] {
            for size in [3u32, 5] {
                let sel = Sel::from_shape(shape, size).expect("sel");
                // keep foreground away from the border by the element size
                let pixs = images::noisy_binary(48, 40, 0.45, 2 * size, seed);
                let orig = images::foreground_count(&pixs);

                // --- dilation grows, erosion shrinks ---
                let dilated = dilate(&pixs, &sel);
                let eroded = erode(&pixs, &sel);
                rp.compare_true(images::is_subset(&pixs, &dilated));
                rp.compare_true(images::is_subset(&eroded, &pixs));

                // --- opening: anti-extensive and idempotent ---
                let opened = open(&pixs, &sel);
                rp.compare_true(images::is_subset(&opened, &pixs));
                rp.compare_buffers(&opened, &open(&opened, &sel));

                // --- closing: extensive and idempotent ---
                let closed = close(&pixs, &sel);
                rp.compare_true(images::is_subset(&pixs, &closed));
                rp.compare_buffers(&closed, &close(&closed, &sel));

                eprintln!(
                    "  seed {} {:?}{}: orig {}, open {}, close {}",
                    seed,
                    shape,
                    size,
                    orig,
                    images::foreground_count(&opened),
                    images::foreground_count(&closed)
                );
            }
        }
    }

    // --- Opening is exact even when foreground touches the border ---
    let sel = Sel::square(3).expect("sel");
    let edge = images::noisy_binary(20, 20, 0.6, 0, 3);
    let opened = open(&edge, &sel);
    rp.compare_true(images::is_subset(&opened, &edge));
    rp.compare_buffers(&opened, &open(&opened, &sel));

    assert!(rp.cleanup(), "binmorph regression test failed");
}
