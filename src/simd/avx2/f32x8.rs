//! AVX2 8-lane vector types used by the render pipeline.
//!
//! Three types wrap the 256-bit registers the pixel kernels need:
//!
//! - [`F32s`] carries coordinates, angles and blend ratios (8 × `f32`);
//! - [`I32s`] carries truncated color channels and packed pixels (8 × `i32`);
//! - [`Mask`] carries per-lane predicates for the branch-free quadrant
//!   reconstruction (comparison results blended with [`Mask::select`]).
//!
//! Every arithmetic method is one correctly-rounded AVX2 instruction, so a
//! lane computes bit-for-bit the same value as the equivalent scalar `f32`
//! expression. No fused multiply-adds are exposed: the approximate render
//! tiers rely on separately rounded multiply and subtract to stay
//! bit-identical with the scalar tier.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, BitOr, Div, Mul, Neg, Sub};

/// Number of f32 lanes in a 256-bit AVX2 register.
pub const LANES: usize = 8;

/// 8 packed `f32` values.
#[derive(Copy, Clone, Debug)]
pub struct F32s(pub(crate) __m256);

/// 8 packed `i32` values (color channels / packed pixels).
#[derive(Copy, Clone, Debug)]
pub struct I32s(pub(crate) __m256i);

/// 8-lane predicate: all-ones lanes where the compared condition held.
#[derive(Copy, Clone, Debug)]
pub struct Mask(pub(crate) __m256);

impl F32s {
    /// Broadcasts one value to all lanes.
    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self(unsafe { _mm256_set1_ps(value) })
    }

    /// Lanes `start, start+1, …, start+7`.
    ///
    /// Exact for any `start` whose lane values stay below 2²⁴, which covers
    /// every pixel coordinate the kernels produce.
    #[inline(always)]
    pub fn iota(start: f32) -> Self {
        let steps = unsafe { _mm256_setr_ps(0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0) };
        Self(unsafe { _mm256_add_ps(_mm256_set1_ps(start), steps) })
    }

    /// Loads lanes from an array.
    #[inline(always)]
    pub fn from_array(values: [f32; LANES]) -> Self {
        Self(unsafe { _mm256_loadu_ps(values.as_ptr()) })
    }

    /// Copies the lanes out to an array.
    #[inline(always)]
    pub fn to_array(self) -> [f32; LANES] {
        let mut out = [0.0; LANES];
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), self.0) };
        out
    }

    /// Lane-wise absolute value (clears the sign bit).
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self(unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), self.0) })
    }

    /// Lane-wise truncation toward zero.
    #[inline(always)]
    pub fn trunc(self) -> Self {
        Self(unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
    }

    /// Lane-wise `self < rhs` (ordered: false on NaN, like scalar `<`).
    #[inline(always)]
    pub fn lt(self, rhs: Self) -> Mask {
        Mask(unsafe { _mm256_cmp_ps::<_CMP_LT_OS>(self.0, rhs.0) })
    }

    /// Lane-wise `self > rhs` (ordered: false on NaN, like scalar `>`).
    #[inline(always)]
    pub fn gt(self, rhs: Self) -> Mask {
        Mask(unsafe { _mm256_cmp_ps::<_CMP_GT_OS>(self.0, rhs.0) })
    }

    /// Truncating conversion to integer lanes.
    ///
    /// `cvttps` semantics: rounds toward zero; NaN and out-of-range lanes
    /// become `i32::MIN`. The scalar tiers use Rust `as`, which collapses
    /// NaN to 0 instead — the only pixel where this matters is the
    /// degenerate buffer center.
    #[inline(always)]
    pub fn to_int_trunc(self) -> I32s {
        I32s(unsafe { _mm256_cvttps_epi32(self.0) })
    }
}

impl Mask {
    /// Lane-wise select: `taken` where the predicate held, `other` elsewhere.
    #[inline(always)]
    pub fn select(self, taken: F32s, other: F32s) -> F32s {
        F32s(unsafe { _mm256_blendv_ps(other.0, taken.0, self.0) })
    }
}

impl I32s {
    /// Lane-wise left shift by a constant bit count.
    #[inline(always)]
    pub fn shl<const BITS: i32>(self) -> Self {
        Self(unsafe { _mm256_slli_epi32::<BITS>(self.0) })
    }

    /// Stores the 8 packed pixels into the head of `out`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `out` holds fewer than [`LANES`] pixels.
    #[inline(always)]
    pub fn store(self, out: &mut [u32]) {
        debug_assert!(out.len() >= LANES, "store needs {LANES} pixels of room");
        unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, self.0) };
    }

    /// Copies the lanes out to an array.
    #[inline(always)]
    pub fn to_array(self) -> [i32; LANES] {
        let mut out = [0i32; LANES];
        unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, self.0) };
        out
    }
}

impl Add for F32s {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_add_ps(self.0, rhs.0) })
    }
}

impl Sub for F32s {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_sub_ps(self.0, rhs.0) })
    }
}

impl Mul for F32s {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_mul_ps(self.0, rhs.0) })
    }
}

impl Div for F32s {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_div_ps(self.0, rhs.0) })
    }
}

impl Neg for F32s {
    type Output = Self;

    /// Sign-bit flip, matching scalar `-x` exactly (including on NaN).
    #[inline(always)]
    fn neg(self) -> Self {
        Self(unsafe { _mm256_xor_ps(self.0, _mm256_set1_ps(-0.0)) })
    }
}

impl BitOr for I32s {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_or_si256(self.0, rhs.0) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iota_counts_from_start() {
        assert_eq!(
            F32s::iota(3.0).to_array(),
            [3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );
    }

    #[test]
    fn trunc_rounds_toward_zero() {
        let v = F32s::from_array([1.9, -1.9, 0.5, -0.5, 2.0, -2.0, 7.99, -7.99]);
        assert_eq!(
            v.trunc().to_array(),
            [1.0, -1.0, 0.0, -0.0, 2.0, -2.0, 7.0, -7.0]
        );
    }

    #[test]
    fn select_takes_first_operand_where_predicate_holds() {
        let a = F32s::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let b = F32s::splat(0.0);
        let picked = a.gt(F32s::splat(4.0)).select(a, b);
        assert_eq!(picked.to_array(), [0.0, 0.0, 0.0, 0.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn comparisons_are_false_on_nan() {
        let nan = F32s::splat(f32::NAN);
        let zero = F32s::splat(0.0);
        let picked = nan.lt(zero).select(F32s::splat(1.0), F32s::splat(2.0));
        assert_eq!(picked.to_array(), [2.0; LANES]);
    }

    #[test]
    fn truncating_conversion_and_packing_ops() {
        let v = F32s::from_array([254.9, 0.1, 1.0, 255.0, 3.7, -0.2, 10.5, 99.99]);
        assert_eq!(v.to_int_trunc().to_array(), [254, 0, 1, 255, 3, 0, 10, 99]);

        let r = F32s::splat(0x12 as f32).to_int_trunc();
        let g = F32s::splat(0x34 as f32).to_int_trunc();
        let packed = r | g.shl::<8>();
        assert_eq!(packed.to_array(), [0x3412; LANES]);
    }
}
