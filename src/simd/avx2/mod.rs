//! AVX2 backend: 8-lane wide types for the vector render kernels.
//!
//! This module is only compiled when the build script detects AVX2 support
//! (Intel Haswell 2013+ / AMD Excavator 2015+) on a native build; the build
//! script also enables `-C target-feature=+avx2,+avx`, so the intrinsics
//! used here are always available at run time.
//!
//! # Available Types
//!
//! - [`f32x8::F32s`]: 256-bit vector of 8 packed `f32` values
//! - [`f32x8::I32s`]: 256-bit vector of 8 packed `i32` pixel channels
//! - [`f32x8::Mask`]: 8-lane predicate produced by comparisons, consumed by
//!   blending selects

pub mod f32x8;
