//! Scalar angle math: exact and approximate polar angles, truncated
//! remainder, and the periodic triangular ratio.
//!
//! The approximate path replaces the library `atan2` with a short polynomial
//! estimate so the per-pixel pipeline spends no time in transcendental code:
//!
//! ```text
//! atan(z) ≈ z · (π/4 + 0.273 · (1 − |z|))        for z ∈ [0, 1]
//! ```
//!
//! with the argument folded into `[0, 1]` by dividing the smaller of
//! `|y|, |x|` by the larger, and the quadrant restored afterwards by three
//! ordered sign fixups. The peak error of the estimate stays below ~0.005 rad
//! on its domain, well inside the 0.01 rad budget the render ladder is
//! validated against.
//!
//! Every wide-lane kernel in [`crate::kernel::vector`] evaluates these exact
//! formulas with the same operand order (and without fused multiply-adds),
//! so the approximate tiers agree with this module bit-for-bit.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI};

/// Polynomial correction weight for the single-term arctangent estimate.
pub const ATAN_APPROX_C: f32 = 0.273;

/// Single-term polynomial arctangent estimate, valid for `z ∈ [0, 1]`.
#[inline(always)]
pub fn atan_approx(z: f32) -> f32 {
    z * (FRAC_PI_4 + ATAN_APPROX_C * (1.0 - z.abs()))
}

/// Two-argument arctangent estimate with quadrant reconstruction.
///
/// Folds the ratio into `[0, 1]` (avoiding the steep part of the true
/// division range), estimates `atan` there, then applies the three sign
/// fixups **in this order**:
///
/// 1. `|y| > |x|` → `θ = π/2 − θ`
/// 2. `x < 0`     → `θ = π − θ`
/// 3. `y < 0`     → `θ = −θ`
///
/// The ordering is load-bearing: the wide-lane kernels reproduce it with
/// predicate masks, and reordering the fixups changes results on the axes.
///
/// Axis behavior is whatever the divisions produce — in particular
/// `(0, 0)` divides `0/0` and yields NaN. The render pipeline keeps that
/// outcome rather than patching it to the `atan2(0, 0) = 0` convention; see
/// the degenerate-center tests in `tests/variants.rs`.
#[inline(always)]
pub fn atan2_approx(y: f32, x: f32) -> f32 {
    let ay = y.abs();
    let ax = x.abs();
    let invert = ay > ax;
    let z = if invert { ax / ay } else { ay / ax };

    let mut th = atan_approx(z); // [0, π/4]
    if invert {
        th = FRAC_PI_2 - th; // [0, π/2]
    }
    if x < 0.0 {
        th = PI - th; // [0, π]
    }
    if y < 0.0 {
        th = -th;
    }

    th
}

/// Truncated floating remainder: `x − trunc(x/y)·y`.
///
/// Truncation toward zero, not floor — for negative `x` this differs from a
/// mathematical modulo, and the difference shapes where the color period
/// wraps, so it is kept verbatim. The multiply and subtract are two
/// separately rounded operations; the vector kernels deliberately avoid an
/// FMA here so all approximate tiers stay bit-identical.
#[inline(always)]
pub fn fmod_approx(x: f32, y: f32) -> f32 {
    x - (x / y).trunc() * y
}

/// Maps an angle to a blend ratio in `[0, 1]` via a triangular wave of
/// period `π/4`, using the approximate remainder.
#[inline(always)]
pub fn wave_ratio(angle: f32) -> f32 {
    ((fmod_approx(angle, FRAC_PI_4) - FRAC_PI_8) / FRAC_PI_8).abs()
}

/// Triangular-wave ratio using the library remainder (`%` on `f32` is the
/// truncated `fmodf` convention). This is the exact tier's ratio.
#[inline(always)]
pub fn wave_ratio_exact(angle: f32) -> f32 {
    ((angle % FRAC_PI_4 - FRAC_PI_8) / FRAC_PI_8).abs()
}
