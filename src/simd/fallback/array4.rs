//! Array-backed 4-lane types with the same API as the intrinsic backends.
//!
//! Each operation is a lane loop over `[f32; 4]`; being ordinary scalar
//! `f32` arithmetic, lanes trivially match the scalar pipeline bit-for-bit.
//! The truncating conversion uses Rust `as`, so NaN lanes become 0 (same as
//! NEON, unlike AVX2's `i32::MIN`).

use std::ops::{Add, BitOr, Div, Mul, Neg, Sub};

/// Number of lanes the fallback processes per block.
pub const LANES: usize = 4;

/// 4 `f32` lanes.
#[derive(Copy, Clone, Debug)]
pub struct F32s(pub(crate) [f32; LANES]);

/// 4 `i32` lanes (color channels / packed pixels).
#[derive(Copy, Clone, Debug)]
pub struct I32s(pub(crate) [i32; LANES]);

/// 4-lane predicate.
#[derive(Copy, Clone, Debug)]
pub struct Mask(pub(crate) [bool; LANES]);

impl F32s {
    /// Broadcasts one value to all lanes.
    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self([value; LANES])
    }

    /// Lanes `start, start+1, start+2, start+3`.
    #[inline(always)]
    pub fn iota(start: f32) -> Self {
        Self([start, start + 1.0, start + 2.0, start + 3.0])
    }

    /// Loads lanes from an array.
    #[inline(always)]
    pub fn from_array(values: [f32; LANES]) -> Self {
        Self(values)
    }

    /// Copies the lanes out to an array.
    #[inline(always)]
    pub fn to_array(self) -> [f32; LANES] {
        self.0
    }

    /// Lane-wise absolute value.
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self(self.0.map(f32::abs))
    }

    /// Lane-wise truncation toward zero.
    #[inline(always)]
    pub fn trunc(self) -> Self {
        Self(self.0.map(f32::trunc))
    }

    /// Lane-wise `self < rhs` (false on NaN).
    #[inline(always)]
    pub fn lt(self, rhs: Self) -> Mask {
        let mut out = [false; LANES];
        for lane in 0..LANES {
            out[lane] = self.0[lane] < rhs.0[lane];
        }
        Mask(out)
    }

    /// Lane-wise `self > rhs` (false on NaN).
    #[inline(always)]
    pub fn gt(self, rhs: Self) -> Mask {
        let mut out = [false; LANES];
        for lane in 0..LANES {
            out[lane] = self.0[lane] > rhs.0[lane];
        }
        Mask(out)
    }

    /// Truncating conversion to integer lanes (Rust `as`: toward zero,
    /// NaN → 0, out-of-range saturates).
    #[inline(always)]
    pub fn to_int_trunc(self) -> I32s {
        I32s(self.0.map(|v| v as i32))
    }
}

impl Mask {
    /// Lane-wise select: `taken` where the predicate held, `other` elsewhere.
    #[inline(always)]
    pub fn select(self, taken: F32s, other: F32s) -> F32s {
        let mut out = [0.0; LANES];
        for lane in 0..LANES {
            out[lane] = if self.0[lane] {
                taken.0[lane]
            } else {
                other.0[lane]
            };
        }
        F32s(out)
    }
}

impl I32s {
    /// Lane-wise left shift by a constant bit count.
    #[inline(always)]
    pub fn shl<const BITS: i32>(self) -> Self {
        Self(self.0.map(|v| v << BITS))
    }

    /// Stores the 4 packed pixels into the head of `out`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `out` holds fewer than [`LANES`] pixels.
    #[inline(always)]
    pub fn store(self, out: &mut [u32]) {
        debug_assert!(out.len() >= LANES, "store needs {LANES} pixels of room");
        for lane in 0..LANES {
            out[lane] = self.0[lane] as u32;
        }
    }

    /// Copies the lanes out to an array.
    #[inline(always)]
    pub fn to_array(self) -> [i32; LANES] {
        self.0
    }
}

macro_rules! lanewise_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for F32s {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                let mut out = [0.0; LANES];
                for lane in 0..LANES {
                    out[lane] = self.0[lane] $op rhs.0[lane];
                }
                Self(out)
            }
        }
    };
}

lanewise_op!(Add, add, +);
lanewise_op!(Sub, sub, -);
lanewise_op!(Mul, mul, *);
lanewise_op!(Div, div, /);

impl Neg for F32s {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self(self.0.map(|v| -v))
    }
}

impl BitOr for I32s {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        let mut out = [0i32; LANES];
        for lane in 0..LANES {
            out[lane] = self.0[lane] | rhs.0[lane];
        }
        Self(out)
    }
}
