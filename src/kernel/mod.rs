//! Frame rendering: the [`Spin`] state machine and its render variants.
//!
//! A [`Spin`] owns the rotation angle and the palette; rendering a frame
//! paints the radial color wheel for the current angle into a [`Frame`] and
//! then advances the angle by one degree. The same image can be produced by
//! any of the [`Variant`]s, which form a performance ladder over one fixed
//! pixel pipeline — from the libm-backed scalar reference down to unrolled
//! wide-lane kernels — plus a row-parallel renderer on top of the fastest
//! tier.

use rayon::prelude::*;

use std::f32::consts::PI;

use crate::frame::Frame;
use crate::palette::{Color, Palette};
use crate::simd;

mod scalar;
mod vector;

/// One rung of the render ladder.
///
/// Every variant paints the same wheel. `Exact` is the accuracy reference
/// (library `atan2` and `%`); all others share the approximate pipeline and
/// produce bit-identical frames on a given backend, differing only in how
/// the work is laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Scalar pixels with library `atan2` and library remainder.
    Exact,
    /// Scalar pixels with the polynomial estimate and truncated remainder.
    Approx,
    /// Lane-shaped loops, scalar math per lane.
    SimdV0,
    /// Wide ratio; angle and blend still scalar.
    SimdV1,
    /// Wide ratio, blend and packing; angle still scalar.
    SimdV2,
    /// Fully wide pipeline with masked quadrant reconstruction.
    SimdV3,
    /// Fully wide pipeline, block body written out inline.
    SimdV4,
    /// Fully wide pipeline with row-invariant registers hoisted.
    SimdV5,
    /// Hoisted pipeline with the block body bound as a reusable unit.
    SimdV6,
    /// The v6 body unrolled two blocks per iteration.
    SimdV6U2,
    /// The v6 body unrolled four blocks per iteration.
    SimdV6U4,
}

impl Variant {
    /// All variants, slowest tier first.
    pub const ALL: [Variant; 11] = [
        Variant::Exact,
        Variant::Approx,
        Variant::SimdV0,
        Variant::SimdV1,
        Variant::SimdV2,
        Variant::SimdV3,
        Variant::SimdV4,
        Variant::SimdV5,
        Variant::SimdV6,
        Variant::SimdV6U2,
        Variant::SimdV6U4,
    ];

    /// Short name, stable across releases (used by benches and logs).
    pub fn name(self) -> &'static str {
        match self {
            Variant::Exact => "exact",
            Variant::Approx => "approx",
            Variant::SimdV0 => "simd_v0",
            Variant::SimdV1 => "simd_v1",
            Variant::SimdV2 => "simd_v2",
            Variant::SimdV3 => "simd_v3",
            Variant::SimdV4 => "simd_v4",
            Variant::SimdV5 => "simd_v5",
            Variant::SimdV6 => "simd_v6",
            Variant::SimdV6U2 => "simd_v6u2",
            Variant::SimdV6U4 => "simd_v6u4",
        }
    }

    /// Whether this variant runs (at least partly) in wide lanes.
    pub fn is_vector(self) -> bool {
        !matches!(self, Variant::Exact | Variant::Approx)
    }
}

/// The rotating color wheel: current angle plus palette.
///
/// `base_angle` starts at 0 and advances by π/180 after every rendered
/// frame, wrapping modulo π (the wheel has a π-periodic ratio, so a half
/// turn is a full cycle).
#[derive(Clone, Debug)]
pub struct Spin {
    base_angle: f32,
    palette: Palette,
}

impl Default for Spin {
    fn default() -> Self {
        Self::new()
    }
}

impl Spin {
    /// A wheel at angle 0 with the default yellow/blue palette.
    pub fn new() -> Self {
        Self {
            base_angle: 0.0,
            palette: Palette::default(),
        }
    }

    /// Current rotation angle in radians, in `[0, π)`.
    pub fn base_angle(&self) -> f32 {
        self.base_angle
    }

    /// The palette frames are blended from.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replaces the color shown where the ratio reaches 1.
    pub fn set_color_a(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.palette.color_a = Color::from_rgba(r, g, b, a);
    }

    /// Replaces the color shown where the ratio reaches 0.
    pub fn set_color_b(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.palette.color_b = Color::from_rgba(r, g, b, a);
    }

    /// Advances the wheel by one degree, wrapping at a half turn.
    fn rotate(&mut self) {
        self.base_angle = (self.base_angle + PI / 180.0) % PI;
    }

    /// Renders `nb_frames` consecutive frames into `frame` with the chosen
    /// variant, rotating after each one; the buffer ends up holding the
    /// last frame. Returns the number of pixels that failed to render,
    /// which is always 0 (kept as a checksum-style result for callers that
    /// tally across runs).
    ///
    /// With `nb_frames == 0` the buffer is left untouched and the angle
    /// does not advance.
    pub fn render(&mut self, variant: Variant, frame: &mut Frame, nb_frames: u32) -> u32 {
        if variant.is_vector() {
            simd::print_info_once();
        }

        for _ in 0..nb_frames {
            match variant {
                Variant::Exact => scalar::frame_exact(frame, self.base_angle, &self.palette),
                Variant::Approx => scalar::frame_approx(frame, self.base_angle, &self.palette),
                Variant::SimdV0 => vector::frame_simd_v0(frame, self.base_angle, &self.palette),
                Variant::SimdV1 => vector::frame_simd_v1(frame, self.base_angle, &self.palette),
                Variant::SimdV2 => vector::frame_simd_v2(frame, self.base_angle, &self.palette),
                Variant::SimdV3 => vector::frame_simd_v3(frame, self.base_angle, &self.palette),
                Variant::SimdV4 => vector::frame_simd_v4(frame, self.base_angle, &self.palette),
                Variant::SimdV5 => vector::frame_simd_v5(frame, self.base_angle, &self.palette),
                Variant::SimdV6 => vector::frame_simd_v6(frame, self.base_angle, &self.palette),
                Variant::SimdV6U2 => {
                    vector::frame_simd_v6u2(frame, self.base_angle, &self.palette)
                }
                Variant::SimdV6U4 => {
                    vector::frame_simd_v6u4(frame, self.base_angle, &self.palette)
                }
            }
            self.rotate();
        }

        0
    }

    /// Row-parallel render: the hoisted wide-lane row kernel fanned out
    /// over a rayon thread pool. Produces the same frames as
    /// [`Variant::SimdV6`], including the same angle advancement.
    pub fn par_render(&mut self, frame: &mut Frame, nb_frames: u32) -> u32 {
        simd::print_info_once();

        let dim = frame.dim();
        for _ in 0..nb_frames {
            let base_angle = self.base_angle;
            let palette = self.palette;
            frame
                .as_mut_slice()
                .par_chunks_mut(dim)
                .enumerate()
                .for_each(|(i, row)| {
                    vector::render_row_hoisted(row, dim, i, base_angle, &palette);
                });
            self.rotate();
        }

        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_advances_the_angle_one_degree_per_frame() {
        let mut spin = Spin::new();
        let mut frame = Frame::new(1);
        spin.render(Variant::Approx, &mut frame, 1);
        assert_eq!(spin.base_angle(), PI / 180.0);
        spin.render(Variant::Approx, &mut frame, 1);
        assert_eq!(spin.base_angle(), PI / 180.0 + PI / 180.0);
    }

    #[test]
    fn angle_stays_in_half_turn_range() {
        let mut spin = Spin::new();
        let mut frame = Frame::new(1);
        for _ in 0..500 {
            spin.render(Variant::Approx, &mut frame, 1);
            let angle = spin.base_angle();
            assert!((0.0..PI).contains(&angle), "angle out of range: {angle}");
        }
    }

    #[test]
    fn zero_frames_is_a_no_op() {
        let mut spin = Spin::new();
        let mut frame = Frame::new(4);
        let failed = spin.render(Variant::SimdV6, &mut frame, 0);
        assert_eq!(failed, 0);
        assert_eq!(spin.base_angle(), 0.0);
        assert!(frame.as_slice().iter().all(|&px| px == 0));
    }

    #[test]
    fn palette_setters_reach_the_rendered_frame() {
        let mut spin = Spin::new();
        spin.set_color_a(10, 20, 30, 40);

        // At angle 0 on a 4x4 frame the top-left pixel sits on a ratio-1
        // diagonal, so it shows color_a with no blending loss.
        let mut frame = Frame::new(4);
        spin.render(Variant::Approx, &mut frame, 1);
        assert_eq!(frame.get(0, 0), crate::pixel::pack(10, 20, 30, 40));
    }
}
