//! A rotating radial color wheel, rendered through a ladder of
//! increasingly vectorized kernels.
//!
//! Entry point is [`Spin`]: pick a [`Variant`], hand it a [`Frame`], and
//! render. The build script selects the wide-lane backend (AVX2, NEON or a
//! plain-array fallback) at compile time; see [`simd`] for the lane types
//! and [`kernel`] for the ladder itself.

pub mod angle;
pub mod frame;
pub mod kernel;
pub mod palette;
pub mod pixel;
pub mod simd;

pub use frame::Frame;
pub use kernel::{Spin, Variant};
pub use palette::{Color, Palette};
