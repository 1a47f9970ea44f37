//! Precision comparison tests between the polynomial angle estimators and
//! the standard library implementations.
//!
//! The approximate pipeline trades accuracy for lane-friendliness; these
//! tests pin how much accuracy it actually gives up.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spinwheel::angle::{atan2_approx, fmod_approx, wave_ratio, wave_ratio_exact};

/// The estimate stays within 0.01 rad of libm `atan2` on a dense grid of
/// directions around the origin.
#[test]
fn test_atan2_precision_on_direction_grid() {
    let mut worst = 0.0f32;

    for yi in -50i32..=50 {
        for xi in -50i32..=50 {
            if yi == 0 && xi == 0 {
                continue;
            }
            let y = yi as f32 * 0.3;
            let x = xi as f32 * 0.3;

            let error = (atan2_approx(y, x) - y.atan2(x)).abs();
            worst = worst.max(error);
            assert!(
                error < 0.01,
                "atan2_approx({y}, {x}) off by {error} rad"
            );
        }
    }

    println!("worst grid error: {worst} rad");
}

/// Same bound over random directions, including very uneven magnitudes.
#[test]
fn test_atan2_precision_on_random_directions() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..10_000 {
        let y: f32 = rng.random_range(-1000.0..1000.0);
        let x: f32 = rng.random_range(-1000.0..1000.0);
        if y == 0.0 && x == 0.0 {
            continue;
        }

        let error = (atan2_approx(y, x) - y.atan2(x)).abs();
        assert!(
            error < 0.01,
            "atan2_approx({y}, {x}) off by {error} rad"
        );
    }
}

/// The estimate is exact (to rounding) on the axes and diagonals, where the
/// polynomial term vanishes or hits its calibration points.
#[test]
fn test_atan2_landmark_directions() {
    assert_eq!(atan2_approx(0.0, 1.0), 0.0);
    assert_eq!(atan2_approx(1.0, 0.0), FRAC_PI_2);
    assert_eq!(atan2_approx(-1.0, 0.0), -FRAC_PI_2);
    assert_eq!(atan2_approx(0.0, -1.0), PI);

    assert!((atan2_approx(1.0, 1.0) - FRAC_PI_4).abs() < 1e-6);
    assert!((atan2_approx(-1.0, 1.0) + FRAC_PI_4).abs() < 1e-6);
}

/// The truncated remainder matches libm `%` wherever the quotient rounds to
/// the same integer, i.e. away from multiples of the divisor.
#[test]
fn test_truncated_remainder_against_libm() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..10_000 {
        let x: f32 = rng.random_range(-20.0..20.0);
        let fast = fmod_approx(x, FRAC_PI_4);
        let libm = x % FRAC_PI_4;

        // The one-rounding-step discrepancy shows up only right at the
        // period boundary, where both results are near 0 or near π/4.
        let direct = (fast - libm).abs();
        let wrapped = (direct - FRAC_PI_4).abs();
        assert!(
            direct < 1e-4 || wrapped < 1e-4,
            "fmod_approx({x}, π/4) = {fast}, libm = {libm}"
        );
    }
}

/// The triangular ratio stays in range and repeats with period π/4 in both
/// the fast and the exact form.
#[test]
fn test_wave_ratio_range_and_period() {
    for step in 0..=4_000 {
        let angle = step as f32 * 0.005;

        for ratio in [wave_ratio(angle), wave_ratio_exact(angle)] {
            // The truncated remainder may undershoot 0 by one rounding
            // step, which reflects to a ratio epsilon above 1; the blend's
            // channel truncation absorbs it.
            assert!(
                (0.0..=1.0 + 1e-5).contains(&ratio),
                "ratio {ratio} out of range at angle {angle}"
            );
        }

        let a = wave_ratio_exact(angle);
        let b = wave_ratio_exact(angle + FRAC_PI_4);
        assert!(
            (a - b).abs() < 1e-4,
            "ratio not π/4-periodic at {angle}: {a} vs {b}"
        );
    }
}
