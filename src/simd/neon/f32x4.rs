//! NEON 4-lane vector types used by the render pipeline.
//!
//! Mirrors the AVX2 backend's API over 128-bit NEON registers. Arithmetic
//! methods are single correctly-rounded instructions, so lanes match the
//! scalar `f32` pipeline bit-for-bit; masks are `uint32x4_t` predicates
//! consumed by `vbsl`-based selects.
//!
//! One backend-specific wrinkle: `vcvtq_s32_f32` converts NaN lanes to 0
//! (where AVX2's `cvttps` saturates to `i32::MIN`). Both behaviors are
//! acceptable for the degenerate buffer-center pixel and are pinned by the
//! variant tests.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::ops::{Add, BitOr, Div, Mul, Neg, Sub};

/// Number of f32 lanes in a 128-bit NEON register.
pub const LANES: usize = 4;

/// 4 packed `f32` values.
#[derive(Copy, Clone, Debug)]
pub struct F32s(pub(crate) float32x4_t);

/// 4 packed `i32` values (color channels / packed pixels).
#[derive(Copy, Clone, Debug)]
pub struct I32s(pub(crate) int32x4_t);

/// 4-lane predicate: all-ones lanes where the compared condition held.
#[derive(Copy, Clone, Debug)]
pub struct Mask(pub(crate) uint32x4_t);

impl F32s {
    /// Broadcasts one value to all lanes.
    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self(unsafe { vdupq_n_f32(value) })
    }

    /// Lanes `start, start+1, start+2, start+3`.
    #[inline(always)]
    pub fn iota(start: f32) -> Self {
        let steps = [0.0f32, 1.0, 2.0, 3.0];
        let steps = unsafe { vld1q_f32(steps.as_ptr()) };
        Self(unsafe { vaddq_f32(vdupq_n_f32(start), steps) })
    }

    /// Loads lanes from an array.
    #[inline(always)]
    pub fn from_array(values: [f32; LANES]) -> Self {
        Self(unsafe { vld1q_f32(values.as_ptr()) })
    }

    /// Copies the lanes out to an array.
    #[inline(always)]
    pub fn to_array(self) -> [f32; LANES] {
        let mut out = [0.0; LANES];
        unsafe { vst1q_f32(out.as_mut_ptr(), self.0) };
        out
    }

    /// Lane-wise absolute value.
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self(unsafe { vabsq_f32(self.0) })
    }

    /// Lane-wise truncation toward zero (`frintz`).
    #[inline(always)]
    pub fn trunc(self) -> Self {
        Self(unsafe { vrndq_f32(self.0) })
    }

    /// Lane-wise `self < rhs` (false on NaN, like scalar `<`).
    #[inline(always)]
    pub fn lt(self, rhs: Self) -> Mask {
        Mask(unsafe { vcltq_f32(self.0, rhs.0) })
    }

    /// Lane-wise `self > rhs` (false on NaN, like scalar `>`).
    #[inline(always)]
    pub fn gt(self, rhs: Self) -> Mask {
        Mask(unsafe { vcgtq_f32(self.0, rhs.0) })
    }

    /// Truncating conversion to integer lanes (`fcvtzs`: toward zero,
    /// NaN → 0, out-of-range saturates).
    #[inline(always)]
    pub fn to_int_trunc(self) -> I32s {
        I32s(unsafe { vcvtq_s32_f32(self.0) })
    }
}

impl Mask {
    /// Lane-wise select: `taken` where the predicate held, `other` elsewhere.
    #[inline(always)]
    pub fn select(self, taken: F32s, other: F32s) -> F32s {
        F32s(unsafe { vbslq_f32(self.0, taken.0, other.0) })
    }
}

impl I32s {
    /// Lane-wise left shift by a constant bit count.
    #[inline(always)]
    pub fn shl<const BITS: i32>(self) -> Self {
        Self(unsafe { vshlq_n_s32::<BITS>(self.0) })
    }

    /// Stores the 4 packed pixels into the head of `out`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `out` holds fewer than [`LANES`] pixels.
    #[inline(always)]
    pub fn store(self, out: &mut [u32]) {
        debug_assert!(out.len() >= LANES, "store needs {LANES} pixels of room");
        unsafe { vst1q_u32(out.as_mut_ptr(), vreinterpretq_u32_s32(self.0)) };
    }

    /// Copies the lanes out to an array.
    #[inline(always)]
    pub fn to_array(self) -> [i32; LANES] {
        let mut out = [0i32; LANES];
        unsafe { vst1q_s32(out.as_mut_ptr(), self.0) };
        out
    }
}

impl Add for F32s {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { vaddq_f32(self.0, rhs.0) })
    }
}

impl Sub for F32s {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { vsubq_f32(self.0, rhs.0) })
    }
}

impl Mul for F32s {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { vmulq_f32(self.0, rhs.0) })
    }
}

impl Div for F32s {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { vdivq_f32(self.0, rhs.0) })
    }
}

impl Neg for F32s {
    type Output = Self;

    /// Sign-bit flip, matching scalar `-x` exactly (including on NaN).
    #[inline(always)]
    fn neg(self) -> Self {
        Self(unsafe { vnegq_f32(self.0) })
    }
}

impl BitOr for I32s {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self(unsafe { vorrq_s32(self.0, rhs.0) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iota_counts_from_start() {
        assert_eq!(F32s::iota(3.0).to_array(), [3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn trunc_rounds_toward_zero() {
        let v = F32s::from_array([1.9, -1.9, 0.5, -0.5]);
        assert_eq!(v.trunc().to_array(), [1.0, -1.0, 0.0, -0.0]);
    }

    #[test]
    fn select_takes_first_operand_where_predicate_holds() {
        let a = F32s::from_array([1.0, 2.0, 3.0, 4.0]);
        let b = F32s::splat(0.0);
        let picked = a.gt(F32s::splat(2.0)).select(a, b);
        assert_eq!(picked.to_array(), [0.0, 0.0, 3.0, 4.0]);
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
        let v = F32s::from_array([254.9, 0.1, 1.0, 255.0]);
        assert_eq!(v.to_int_trunc().to_array(), [254, 0, 1, 255]);

        let r = F32s::splat(0x12 as f32).to_int_trunc();
        let g = F32s::splat(0x34 as f32).to_int_trunc();
        let packed = r | g.shl::<8>();
        assert_eq!(packed.to_array(), [0x3412; LANES]);
    }
}
