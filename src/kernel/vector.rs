//! The wide-lane render ladder: seven tiers over one pixel pipeline.
//!
//! Every tier computes the same approximate pipeline as
//! [`super::scalar::compute_color_approx`] — polynomial angle estimate,
//! triangular ratio, truncating blend, packed store — and they differ only
//! in how much of it runs in wide lanes and how the loops are shaped:
//!
//! | Tier   | Wide part                         | Loop shape                |
//! |--------|-----------------------------------|---------------------------|
//! | `v0`   | nothing (lane loop, packed store) | row × column blocks       |
//! | `v1`   | ratio                             | row × column blocks       |
//! | `v2`   | ratio + blend + packing           | row × column blocks       |
//! | `v3`   | whole pipeline (masked quadrants) | row × column blocks       |
//! | `v4`   | whole pipeline, body inlined      | row × column blocks       |
//! | `v5`   | whole pipeline                    | row-invariants hoisted    |
//! | `v6`   | whole pipeline                    | hoisted, block body bound |
//! | `v6u2` | whole pipeline                    | v6 body × 2 per iteration |
//! | `v6u4` | whole pipeline                    | v6 body × 4 per iteration |
//!
//! All lane arithmetic uses the same operand order as the scalar tier and
//! no fused multiply-adds, so on a given backend every tier writes the same
//! buffer bit-for-bit (the lone exception is the NaN-valued buffer center,
//! where the backend's truncating conversion decides the pixel).
//!
//! Columns are consumed in lane-width blocks; whatever is left of a row
//! (any `dim` not a multiple of the lane width, including `dim < LANES`)
//! is finished by the scalar pixel function.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI};

use crate::angle::ATAN_APPROX_C;
use crate::frame::Frame;
use crate::kernel::scalar::compute_color_approx;
use crate::palette::Palette;
use crate::simd::{F32s, I32s, Mask, LANES};

/// Truncated remainder on lanes: `x − trunc(x/y)·y`, two rounded steps.
#[inline(always)]
fn fmod_approx_simd(x: F32s, y: F32s) -> F32s {
    x - (x / y).trunc() * y
}

/// Lane version of the single-term arctangent estimate.
#[inline(always)]
fn atan_approx_simd(z: F32s) -> F32s {
    z * (F32s::splat(FRAC_PI_4) + F32s::splat(ATAN_APPROX_C) * (F32s::splat(1.0) - z.abs()))
}

/// Lane version of the quadrant-reconstructing arctangent: the three
/// ordered sign fixups become three ordered mask blends.
#[inline(always)]
fn atan2_approx_simd(y: F32s, x: F32s) -> F32s {
    let ay = y.abs();
    let ax = x.abs();
    let invert = ay.gt(ax);
    let z = invert.select(ax / ay, ay / ax);

    let mut th = atan_approx_simd(z);
    th = invert.select(F32s::splat(FRAC_PI_2) - th, th);
    th = x.lt(F32s::splat(0.0)).select(F32s::splat(PI) - th, th);
    th = y.lt(F32s::splat(0.0)).select(-th, th);

    th
}

/// Lane version of the triangular-wave ratio.
#[inline(always)]
fn wave_ratio_simd(angle: F32s) -> F32s {
    ((fmod_approx_simd(angle, F32s::splat(FRAC_PI_4)) - F32s::splat(FRAC_PI_8))
        / F32s::splat(FRAC_PI_8))
    .abs()
}

/// Lane version of blend-and-pack: four truncated channel lanes shifted
/// and or-ed into packed pixels.
#[inline(always)]
fn blend_pack_simd(ratio: F32s, palette: &Palette) -> I32s {
    let remainder = F32s::splat(1.0) - ratio;

    let r = (F32s::splat(palette.color_a.r) * ratio + F32s::splat(palette.color_b.r) * remainder)
        .to_int_trunc();
    let g = (F32s::splat(palette.color_a.g) * ratio + F32s::splat(palette.color_b.g) * remainder)
        .to_int_trunc();
    let b = (F32s::splat(palette.color_a.b) * ratio + F32s::splat(palette.color_b.b) * remainder)
        .to_int_trunc();
    let a = (F32s::splat(palette.color_a.a) * ratio + F32s::splat(palette.color_b.a) * remainder)
        .to_int_trunc();

    r | g.shl::<8>() | b.shl::<16>() | a.shl::<24>()
}

/// Finishes the columns a block loop could not cover with the scalar pixel
/// function. Shared by every tier.
#[inline(always)]
fn scalar_tail(
    row: &mut [u32],
    dim: usize,
    i: usize,
    start: usize,
    base_angle: f32,
    palette: &Palette,
) {
    for j in start..dim {
        row[j] = compute_color_approx(dim, i, j, base_angle, palette);
    }
}

/// Tier v0: iterate the lanes of each block with the scalar pixel function
/// and store the block in one go. Demonstrates that lane-shaped loops gain
/// nothing while the math stays scalar.
pub(super) fn frame_simd_v0(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();

    for i in 0..dim {
        let row = frame.row_mut(i);
        let mut j = 0;
        while j + LANES <= dim {
            let mut block = [0u32; LANES];
            for (lane, px) in block.iter_mut().enumerate() {
                *px = compute_color_approx(dim, i, j + lane, base_angle, palette);
            }
            row[j..j + LANES].copy_from_slice(&block);
            j += LANES;
        }
        scalar_tail(row, dim, i, j, base_angle, palette);
    }
}

/// Tier v1: angles still per lane in scalar code, ratio in wide lanes,
/// blend back in scalar code.
pub(super) fn frame_simd_v1(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    let half = dim as f32 / 2.0;
    let offset = PI + base_angle;

    for i in 0..dim {
        let row = frame.row_mut(i);
        let mut j = 0;
        while j + LANES <= dim {
            let mut angles = [0.0f32; LANES];
            for (lane, angle) in angles.iter_mut().enumerate() {
                let dy = half - i as f32;
                let dx = (j + lane) as f32 - half;
                *angle = crate::angle::atan2_approx(dy, dx) + offset;
            }

            let ratios = wave_ratio_simd(F32s::from_array(angles)).to_array();

            let mut block = [0u32; LANES];
            for (lane, px) in block.iter_mut().enumerate() {
                *px = palette.blend(ratios[lane]);
            }
            row[j..j + LANES].copy_from_slice(&block);
            j += LANES;
        }
        scalar_tail(row, dim, i, j, base_angle, palette);
    }
}

/// Tier v2: v1 plus wide blend and wide bit-packing; only the angle is
/// still computed per lane.
pub(super) fn frame_simd_v2(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    let half = dim as f32 / 2.0;
    let offset = PI + base_angle;

    for i in 0..dim {
        let row = frame.row_mut(i);
        let mut j = 0;
        while j + LANES <= dim {
            let mut angles = [0.0f32; LANES];
            for (lane, angle) in angles.iter_mut().enumerate() {
                let dy = half - i as f32;
                let dx = (j + lane) as f32 - half;
                *angle = crate::angle::atan2_approx(dy, dx) + offset;
            }

            let ratio = wave_ratio_simd(F32s::from_array(angles));
            blend_pack_simd(ratio, palette).store(&mut row[j..j + LANES]);
            j += LANES;
        }
        scalar_tail(row, dim, i, j, base_angle, palette);
    }
}

/// Tier v3: the whole pipeline in wide lanes, quadrant reconstruction as
/// mask blends.
pub(super) fn frame_simd_v3(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    let half = dim as f32 / 2.0;
    let offset = F32s::splat(PI + base_angle);

    for i in 0..dim {
        let row = frame.row_mut(i);
        let mut j = 0;
        while j + LANES <= dim {
            let r_dy = F32s::splat(half - i as f32);
            let r_dx = F32s::iota(j as f32) - F32s::splat(half);

            let angle = atan2_approx_simd(r_dy, r_dx) + offset;
            let ratio = wave_ratio_simd(angle);
            blend_pack_simd(ratio, palette).store(&mut row[j..j + LANES]);
            j += LANES;
        }
        scalar_tail(row, dim, i, j, base_angle, palette);
    }
}

/// Tier v4: same numerics as v3 with the helper calls flattened into one
/// straight-line block body — no intermediate registers live across calls.
pub(super) fn frame_simd_v4(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    let half = dim as f32 / 2.0;
    let offset = F32s::splat(PI + base_angle);

    for i in 0..dim {
        let row = frame.row_mut(i);
        let mut j = 0;
        while j + LANES <= dim {
            let r_dy = F32s::splat(half - i as f32);
            let r_dx = F32s::iota(j as f32) - F32s::splat(half);

            let r_ay = r_dy.abs();
            let r_ax = r_dx.abs();
            let invert = r_ay.gt(r_ax);
            let r_z = invert.select(r_ax / r_ay, r_ay / r_ax);
            let mut r_th = r_z
                * (F32s::splat(FRAC_PI_4)
                    + F32s::splat(ATAN_APPROX_C) * (F32s::splat(1.0) - r_z.abs()));
            r_th = invert.select(F32s::splat(FRAC_PI_2) - r_th, r_th);
            r_th = r_dx.lt(F32s::splat(0.0)).select(F32s::splat(PI) - r_th, r_th);
            r_th = r_dy.lt(F32s::splat(0.0)).select(-r_th, r_th);

            let angle = r_th + offset;
            let rem = angle - (angle / F32s::splat(FRAC_PI_4)).trunc() * F32s::splat(FRAC_PI_4);
            let ratio = ((rem - F32s::splat(FRAC_PI_8)) / F32s::splat(FRAC_PI_8)).abs();

            blend_pack_simd(ratio, palette).store(&mut row[j..j + LANES]);
            j += LANES;
        }
        scalar_tail(row, dim, i, j, base_angle, palette);
    }
}

/// Tier v5: v4 with the row-invariant registers — `dy`, `|dy|` and the
/// `dy < 0` predicate — computed once per row instead of once per block.
pub(super) fn frame_simd_v5(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    let half = dim as f32 / 2.0;
    let offset = F32s::splat(PI + base_angle);

    for i in 0..dim {
        let row = frame.row_mut(i);

        // Row-invariant: dy depends on i only.
        let r_dy = F32s::splat(half - i as f32);
        let r_ay = r_dy.abs();
        let m_dy_neg = r_dy.lt(F32s::splat(0.0));

        let mut j = 0;
        while j + LANES <= dim {
            let r_dx = F32s::iota(j as f32) - F32s::splat(half);

            let r_ax = r_dx.abs();
            let invert = r_ay.gt(r_ax);
            let r_z = invert.select(r_ax / r_ay, r_ay / r_ax);
            let mut r_th = r_z
                * (F32s::splat(FRAC_PI_4)
                    + F32s::splat(ATAN_APPROX_C) * (F32s::splat(1.0) - r_z.abs()));
            r_th = invert.select(F32s::splat(FRAC_PI_2) - r_th, r_th);
            r_th = r_dx.lt(F32s::splat(0.0)).select(F32s::splat(PI) - r_th, r_th);
            r_th = m_dy_neg.select(-r_th, r_th);

            let ratio = wave_ratio_simd(r_th + offset);
            blend_pack_simd(ratio, palette).store(&mut row[j..j + LANES]);
            j += LANES;
        }
        scalar_tail(row, dim, i, j, base_angle, palette);
    }
}

/// One lane-width column block of the hoisted pipeline: the unit the v6
/// tiers repeat. Takes the row-invariant registers as explicit bindings so
/// the unrolled tiers reuse them verbatim across consecutive blocks.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
fn hoisted_block(
    row: &mut [u32],
    j: usize,
    half: f32,
    r_ay: F32s,
    m_dy_neg: Mask,
    offset: F32s,
    palette: &Palette,
) {
    let r_dx = F32s::iota(j as f32) - F32s::splat(half);

    let r_ax = r_dx.abs();
    let invert = r_ay.gt(r_ax);
    let r_z = invert.select(r_ax / r_ay, r_ay / r_ax);
    let mut r_th = atan_approx_simd(r_z);
    r_th = invert.select(F32s::splat(FRAC_PI_2) - r_th, r_th);
    r_th = r_dx.lt(F32s::splat(0.0)).select(F32s::splat(PI) - r_th, r_th);
    r_th = m_dy_neg.select(-r_th, r_th);

    let ratio = wave_ratio_simd(r_th + offset);
    blend_pack_simd(ratio, palette).store(&mut row[j..j + LANES]);
}

/// Renders one row with the hoisted block body. Shared by tier v6 and the
/// row-parallel renderer.
pub(crate) fn render_row_hoisted(
    row: &mut [u32],
    dim: usize,
    i: usize,
    base_angle: f32,
    palette: &Palette,
) {
    let half = dim as f32 / 2.0;
    let offset = F32s::splat(PI + base_angle);

    let r_dy = F32s::splat(half - i as f32);
    let r_ay = r_dy.abs();
    let m_dy_neg = r_dy.lt(F32s::splat(0.0));

    let mut j = 0;
    while j + LANES <= dim {
        hoisted_block(row, j, half, r_ay, m_dy_neg, offset, palette);
        j += LANES;
    }
    scalar_tail(row, dim, i, j, base_angle, palette);
}

/// Tier v6: v5 with the block body bound as an explicit reusable unit.
pub(super) fn frame_simd_v6(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    for i in 0..dim {
        render_row_hoisted(frame.row_mut(i), dim, i, base_angle, palette);
    }
}

/// Tier v6, unrolled 2×: two independent block bodies per loop iteration.
pub(super) fn frame_simd_v6u2(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    let half = dim as f32 / 2.0;
    let offset = F32s::splat(PI + base_angle);

    for i in 0..dim {
        let row = frame.row_mut(i);

        let r_dy = F32s::splat(half - i as f32);
        let r_ay = r_dy.abs();
        let m_dy_neg = r_dy.lt(F32s::splat(0.0));

        let mut j = 0;
        while j + 2 * LANES <= dim {
            hoisted_block(row, j, half, r_ay, m_dy_neg, offset, palette);
            hoisted_block(row, j + LANES, half, r_ay, m_dy_neg, offset, palette);
            j += 2 * LANES;
        }
        while j + LANES <= dim {
            hoisted_block(row, j, half, r_ay, m_dy_neg, offset, palette);
            j += LANES;
        }
        scalar_tail(row, dim, i, j, base_angle, palette);
    }
}

/// Tier v6, unrolled 4×: four independent block bodies per loop iteration.
pub(super) fn frame_simd_v6u4(frame: &mut Frame, base_angle: f32, palette: &Palette) {
    let dim = frame.dim();
    let half = dim as f32 / 2.0;
    let offset = F32s::splat(PI + base_angle);

    for i in 0..dim {
        let row = frame.row_mut(i);

        let r_dy = F32s::splat(half - i as f32);
        let r_ay = r_dy.abs();
        let m_dy_neg = r_dy.lt(F32s::splat(0.0));

        let mut j = 0;
        while j + 4 * LANES <= dim {
            hoisted_block(row, j, half, r_ay, m_dy_neg, offset, palette);
            hoisted_block(row, j + LANES, half, r_ay, m_dy_neg, offset, palette);
            hoisted_block(row, j + 2 * LANES, half, r_ay, m_dy_neg, offset, palette);
            hoisted_block(row, j + 3 * LANES, half, r_ay, m_dy_neg, offset, palette);
            j += 4 * LANES;
        }
        while j + LANES <= dim {
            hoisted_block(row, j, half, r_ay, m_dy_neg, offset, palette);
            j += LANES;
        }
        scalar_tail(row, dim, i, j, base_angle, palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle;

    #[test]
    fn lane_atan2_matches_scalar_bitwise() {
        let ys = [3.0f32, -3.0, 0.5, -0.5];
        let xs = [1.0f32, -2.0, 4.0, -8.0];

        for &y in &ys {
            for &x in &xs {
                let wide = atan2_approx_simd(F32s::splat(y), F32s::splat(x)).to_array();
                let narrow = angle::atan2_approx(y, x);
                for lane in wide {
                    assert_eq!(lane.to_bits(), narrow.to_bits(), "y = {y}, x = {x}");
                }
            }
        }
    }

    #[test]
    fn lane_ratio_matches_scalar_bitwise() {
        for step in 0..200 {
            let a = step as f32 * 0.05;
            let wide = wave_ratio_simd(F32s::splat(a)).to_array();
            let narrow = angle::wave_ratio(a);
            for lane in wide {
                assert_eq!(lane.to_bits(), narrow.to_bits(), "angle = {a}");
            }
        }
    }

    #[test]
    fn lane_blend_matches_scalar_pixels() {
        let palette = Palette::default();
        for step in 0..=100 {
            let ratio = step as f32 / 100.0;
            let wide = blend_pack_simd(F32s::splat(ratio), &palette).to_array();
            let narrow = palette.blend(ratio);
            for lane in wide {
                assert_eq!(lane as u32, narrow, "ratio = {ratio}");
            }
        }
    }
}
