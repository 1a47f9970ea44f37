//! Two-color palette blended by the periodic ratio.
//!
//! A frame is painted with a linear blend between `color_a` and `color_b`,
//! per channel, driven by the ratio in `[0, 1]` produced by
//! [`crate::angle::wave_ratio`]. Channels are stored widened to `f32` so the
//! kernels (scalar and wide-lane alike) can splat them straight into the
//! blend without per-pixel conversions.

use crate::pixel;

/// One RGBA color with channels widened for blending.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Builds a color from 8-bit channels.
    #[inline]
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32,
            g: g as f32,
            b: b as f32,
            a: a as f32,
        }
    }
}

/// The pair of colors a frame blends between.
///
/// Defaults to yellow (`255, 255, 0, 255`) and blue (`0, 0, 255, 255`).
/// Channel values are read, never clamped, by the kernels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    pub color_a: Color,
    pub color_b: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            color_a: Color::from_rgba(255, 255, 0, 255),
            color_b: Color::from_rgba(0, 0, 255, 255),
        }
    }
}

impl Palette {
    /// Blends the two colors by `ratio` and packs the result.
    ///
    /// Each channel is `a_ch * ratio + b_ch * (1 - ratio)` evaluated in
    /// `f32` and converted to an integer channel by truncation (`as i32`),
    /// the same rule the wide-lane kernels apply with their truncating
    /// float-to-int conversions.
    #[inline(always)]
    pub fn blend(&self, ratio: f32) -> u32 {
        let r = (self.color_a.r * ratio + self.color_b.r * (1.0 - ratio)) as i32;
        let g = (self.color_a.g * ratio + self.color_b.g * (1.0 - ratio)) as i32;
        let b = (self.color_a.b * ratio + self.color_b.b * (1.0 - ratio)) as i32;
        let a = (self.color_a.a * ratio + self.color_b.a * (1.0 - ratio)) as i32;

        pixel::pack(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints_select_each_color() {
        let palette = Palette::default();
        assert_eq!(palette.blend(1.0), pixel::pack(255, 255, 0, 255));
        assert_eq!(palette.blend(0.0), pixel::pack(0, 0, 255, 255));
    }

    #[test]
    fn blend_truncates_channels() {
        let palette = Palette::default();
        // ratio 0.5 over (255, 0): 127.5 truncates to 127, not 128
        let (r, _, b, _) = pixel::unpack(palette.blend(0.5));
        assert_eq!(r, 127);
        assert_eq!(b, 127);
    }
}
