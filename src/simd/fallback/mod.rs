//! Fallback backend: plain-array lane types for targets without a detected
//! vector extension.
//!
//! Compiled when the build script detects neither AVX2 nor NEON. The lane
//! types wrap fixed `[f32; 4]` arrays and lean on the autovectorizer; the
//! vector kernels keep their shape and semantics, they just stop being an
//! actual speedup.

pub mod array4;
