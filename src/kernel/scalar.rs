//! Scalar render tiers: the exact reference and the approximate baseline.
//!
//! The exact tier is the accuracy reference for the whole ladder: library
//! `atan2` plus the library remainder. The approximate tier swaps both for
//! the polynomial estimate and truncated remainder from [`crate::angle`];
//! it fixes the numerical behavior every vector tier must reproduce.

use std::f32::consts::PI;

use crate::angle::{atan2_approx, wave_ratio, wave_ratio_exact};
use crate::frame::Frame;
use crate::palette::Palette;

/// One pixel of the exact tier.
#[inline(always)]
pub(crate) fn compute_color_exact(
    dim: usize,
    i: usize,
    j: usize,
    base_angle: f32,
    palette: &Palette,
) -> u32 {
    let half = dim as f32 / 2.0;
    let dy = half - i as f32;
    let dx = j as f32 - half;
    let angle = dy.atan2(dx) + (PI + base_angle);

    palette.blend(wave_ratio_exact(angle))
}

/// One pixel of the approximate tier.
///
/// The rotation offset is added as `th + (π + base_angle)` — one rounded
/// sum of constants per pixel, the exact association the wide-lane tiers
/// use after hoisting `π + base_angle` out of the frame loop. Keeping the
/// association identical is what lets the vector tiers match this function
/// bit-for-bit.
#[inline(always)]
pub(crate) fn compute_color_approx(
    dim: usize,
    i: usize,
    j: usize,
    base_angle: f32,
    palette: &Palette,
) -> u32 {
    let half = dim as f32 / 2.0;
    let dy = half - i as f32;
    let dx = j as f32 - half;
    let angle = atan2_approx(dy, dx) + (PI + base_angle);

    palette.blend(wave_ratio(angle))
}

/// Renders one full frame with the exact pixel function.
pub(super) fn frame_exact(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    for i in 0..dim {
        for j in 0..dim {
            frame.set(i, j, compute_color_exact(dim, i, j, base_angle, palette));
        }
    }
}

/// Renders one full frame with the approximate pixel function.
pub(super) fn frame_approx(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    for i in 0..dim {
        for j in 0..dim {
            frame.set(i, j, compute_color_approx(dim, i, j, base_angle, palette));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel;

    #[test]
    fn exact_and_approx_pixels_stay_close_away_from_center() {
        let palette = Palette::default();
        let dim = 32;

        for i in 0..dim {
            for j in 0..dim {
                if i == dim / 2 && j == dim / 2 {
                    continue; // degenerate center, covered elsewhere
                }

                let exact = pixel::unpack(compute_color_exact(dim, i, j, 0.0, &palette));
                let approx = pixel::unpack(compute_color_approx(dim, i, j, 0.0, &palette));

                // 0.005 rad of angle error moves the ratio by at most
                // 0.005 / (π/8) ≈ 0.013, i.e. a handful of channel counts.
                let worst = [
                    (exact.0 as i32 - approx.0 as i32).abs(),
                    (exact.1 as i32 - approx.1 as i32).abs(),
                    (exact.2 as i32 - approx.2 as i32).abs(),
                    (exact.3 as i32 - approx.3 as i32).abs(),
                ]
                .into_iter()
                .max()
                .unwrap();
                assert!(worst <= 6, "pixel ({i}, {j}): {exact:?} vs {approx:?}");
            }
        }
    }

    #[test]
    fn center_pixel_collapses_to_zero_in_the_approx_tier() {
        let palette = Palette::default();
        // dy = dx = 0 -> 0/0 -> NaN ratio -> every channel truncates to 0
        assert_eq!(compute_color_approx(8, 4, 4, 0.0, &palette), 0);
    }
}
