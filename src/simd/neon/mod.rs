//! NEON backend: 4-lane wide types for the vector render kernels.
//!
//! Compiled when the build script detects ARM Advanced SIMD on a native
//! build (all AArch64 processors). The same lane vocabulary as the AVX2
//! backend, at half the width; the kernels pick the width up through
//! `simd::LANES` and never hard-code it.
//!
//! # Available Types
//!
//! - [`f32x4::F32s`]: 128-bit vector of 4 packed `f32` values
//! - [`f32x4::I32s`]: 128-bit vector of 4 packed `i32` pixel channels
//! - [`f32x4::Mask`]: 4-lane predicate produced by comparisons

pub mod f32x4;
