//! Wide-lane numeric backends for the vector render kernels.
//!
//! Exactly one backend is compiled, selected by `build.rs` from the CPU
//! features it detects:
//!
//! | cfg        | Backend              | Lanes | Register      |
//! |------------|----------------------|-------|---------------|
//! | `avx2`     | [`avx2::f32x8`]      | 8     | `__m256`      |
//! | `neon`     | [`neon::f32x4`]      | 4     | `float32x4_t` |
//! | `fallback` | [`fallback::array4`] | 4     | `[f32; 4]`    |
//!
//! Every backend exports the same three types under the same names —
//! `F32s`, `I32s` and `Mask` — plus the lane count `LANES`, so the kernels
//! in [`crate::kernel::vector`] are written once against a portable lane
//! vocabulary: splat/iota construction, element-wise arithmetic, predicate
//! masks with blending selects, truncating float-to-int conversion, and
//! packed integer shift/or/store.
//!
//! The backends only promise identical results for operations that are
//! single correctly-rounded IEEE 754 steps (which is all the kernels use).
//! The truncating conversion of NaN is the one deliberate divergence
//! (`cvttps` saturates to `i32::MIN`, NEON and Rust `as` give 0); it is
//! covered by the degenerate-center tests.

#[cfg(avx2)]
pub mod avx2;

#[cfg(neon)]
pub mod neon;

#[cfg(fallback)]
pub mod fallback;

#[cfg(avx2)]
pub use avx2::f32x8::{F32s, I32s, Mask, LANES};

#[cfg(neon)]
pub use neon::f32x4::{F32s, I32s, Mask, LANES};

#[cfg(fallback)]
pub use fallback::array4::{F32s, I32s, Mask, LANES};

use std::sync::Once;

/// Human-readable description of the active wide-lane backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimdInfo {
    /// Backend name as selected by the build script.
    pub backend: &'static str,
    /// Register width in bits.
    pub register_bits: usize,
    /// Number of f32 lanes per register.
    pub lanes: usize,
}

/// Reports the backend the vector kernels were compiled against.
pub fn simd_info() -> SimdInfo {
    #[cfg(avx2)]
    {
        SimdInfo {
            backend: "avx2",
            register_bits: 256,
            lanes: LANES,
        }
    }

    #[cfg(neon)]
    {
        SimdInfo {
            backend: "neon",
            register_bits: 128,
            lanes: LANES,
        }
    }

    #[cfg(fallback)]
    {
        SimdInfo {
            backend: "fallback (scalar arrays)",
            register_bits: 32,
            lanes: LANES,
        }
    }
}

static PRINT_INFO: Once = Once::new();

/// Prints the active backend description to stderr, at most once per
/// process. Invoked by the vector-variant dispatch as a render-time
/// diagnostic; it has no other side effect.
pub fn print_info_once() {
    PRINT_INFO.call_once(|| {
        let info = simd_info();
        eprintln!("SIMD infos:");
        eprintln!(" - backend:        {}", info.backend);
        eprintln!(" - register size:  {} bits", info.register_bits);
        eprintln!(" - f32 lanes:      {}", info.lanes);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_matches_compiled_lane_count() {
        let info = simd_info();
        assert_eq!(info.lanes, LANES);
        assert!(info.lanes == 4 || info.lanes == 8);
    }
}
