//! Square pixel buffer shared between the caller and the render kernels.
//!
//! A [`Frame`] owns a `dim × dim` row-major grid of packed pixels (see
//! [`crate::pixel`] for the channel layout). The buffer is allocated once by
//! the caller, handed to the kernels by mutable reference, and overwritten in
//! place every frame; its side length never changes afterwards.

/// Row-major `dim × dim` buffer of packed RGBA pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    dim: usize,
    pixels: Vec<u32>,
}

impl Frame {
    /// Allocates a zeroed `dim × dim` frame.
    ///
    /// The side length may be any positive integer: the vector kernels
    /// process full lane-width column blocks and hand the remaining columns
    /// to the scalar pixel function, so `dim` does not need to be a multiple
    /// of the lane width.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is zero.
    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "frame side length must be positive");

        Self {
            dim,
            pixels: vec![0; dim * dim],
        }
    }

    /// Side length of the square buffer.
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Reads the pixel at row `i`, column `j`.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.pixels[i * self.dim + j]
    }

    /// Writes the pixel at row `i`, column `j`.
    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, pixel: u32) {
        self.pixels[i * self.dim + j] = pixel;
    }

    /// The whole buffer as one row-major slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// The whole buffer as one mutable row-major slice.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Mutable view of row `i`, used by the vector kernels for block stores.
    #[inline(always)]
    pub fn row_mut(&mut self, i: usize) -> &mut [u32] {
        let start = i * self.dim;
        &mut self.pixels[start..start + self.dim]
    }
}
