//! Packed RGBA pixel encoding.
//!
//! Every pixel produced by the render kernels is a single `u32` holding four
//! 8-bit channels in little-endian channel order:
//!
//! | Byte | 0 | 1 | 2 | 3 |
//! |------|---|---|---|---|
//! | Channel | R | G | B | A |
//!
//! i.e. `R | G << 8 | B << 16 | A << 24`. The wide-lane kernels rebuild this
//! exact layout with integer shifts and ors, so [`pack`] is the single source
//! of truth for the format and [`unpack`] must invert it bit-for-bit.

/// Packs four 8-bit channels into one `u32` pixel.
///
/// Channels are taken as `i32` because the blend stage produces truncated
/// `f32 → i32` values; only the low byte of each channel participates, which
/// matches the wide-lane packing (`r | g << 8 | b << 16 | a << 24` on 32-bit
/// lanes).
#[inline(always)]
pub fn pack(r: i32, g: i32, b: i32, a: i32) -> u32 {
    (r as u32 & 0xff) | (g as u32 & 0xff) << 8 | (b as u32 & 0xff) << 16 | (a as u32 & 0xff) << 24
}

/// Unpacks a `u32` pixel back into its four 8-bit channels `(r, g, b, a)`.
#[inline(always)]
pub fn unpack(pixel: u32) -> (u8, u8, u8, u8) {
    (
        (pixel & 0xff) as u8,
        (pixel >> 8 & 0xff) as u8,
        (pixel >> 16 & 0xff) as u8,
        (pixel >> 24) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_channel_extremes() {
        for &c in &[0u8, 1, 127, 128, 254, 255] {
            assert_eq!(unpack(pack(c as i32, 0, 0, 0)).0, c);
            assert_eq!(unpack(pack(0, c as i32, 0, 0)).1, c);
            assert_eq!(unpack(pack(0, 0, c as i32, 0)).2, c);
            assert_eq!(unpack(pack(0, 0, 0, c as i32)).3, c);
        }
    }

    #[test]
    fn round_trip_random_samples() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let (r, g, b, a) = (
                rng.random_range(0..=255u8),
                rng.random_range(0..=255u8),
                rng.random_range(0..=255u8),
                rng.random_range(0..=255u8),
            );
            assert_eq!(
                unpack(pack(r as i32, g as i32, b as i32, a as i32)),
                (r, g, b, a)
            );
        }
    }

    #[test]
    fn layout_is_little_endian_channel_order() {
        let pixel = pack(255, 255, 0, 255);
        assert_eq!(pixel, 255 | 255 << 8 | 255 << 24);
        assert_eq!(pack(0x12, 0x34, 0x56, 0x78), 0x7856_3412);
    }
}
