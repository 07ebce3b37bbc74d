use bitvec::prelude::*;
#[cfg(feature = "embedded-graphics")]
use embedded_graphics::{image::ImageRaw, pixelcolor::BinaryColor};

use crate::layout::{DISPLAY_HEIGHT as HEIGHT, DISPLAY_MEMORY_SIZE, DISPLAY_WIDTH as WIDTH};

const ROW_LENGTH: usize = WIDTH / 8;

fn bit_index(x: usize, y: usize) -> Option<usize> {
    if x < WIDTH && y < HEIGHT {
        Some(y * WIDTH + x)
    } else {
        None
    }
}

/// An owned copy of the display
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Frame([u8; DISPLAY_MEMORY_SIZE]);

/// A shared view over the display region of memory
///
/// Has different accessors for the content of frames, which can be used independently
/// to fulfill the needs.
///
/// Each pixel is represented either by a corresponding bit being set, or by `true` value.
/// Internally, the data is stored in a form of concatenating rows from top to bottom of the frame.
/// Rows are represented as an individual bits of continuous memory, matching the state of pixels
/// from left to the right, so the most significant bit of a byte is its leftmost pixel.
///
/// #Note:
/// Can return ImageRaw instance with `embedded-graphics` feature on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FrameView<'a>(&'a [u8]);

impl<'a> FrameView<'a> {
    pub(crate) fn new(display: &'a [u8]) -> Self {
        debug_assert_eq!(display.len(), DISPLAY_MEMORY_SIZE);
        Self(display)
    }

    /// View the raw memory of a frame
    pub fn as_raw(&self) -> &'a [u8] {
        self.0
    }

    /// Create an owned copy of a frame
    pub fn copy_frame(self) -> Frame {
        let mut data = [0; DISPLAY_MEMORY_SIZE];
        data.copy_from_slice(self.0);
        Frame(data)
    }

    /// Access frame's bits by indexes, `None` outside of the screen
    pub fn get_bit(&self, x: usize, y: usize) -> Option<bool> {
        bit_index(x, y).and_then(|idx| self.0.view_bits::<Msb0>().get(idx).copied())
    }

    /// Whether no pixel is set
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&byte| byte == 0)
    }

    /// Get iterator over rows in a form of a `BitSlice`s
    pub fn iter_rows_as_bitslices(&self) -> impl Iterator<Item = &'a BitSlice<Msb0, u8>> {
        self.0.chunks(ROW_LENGTH).map(|row| row.view_bits::<Msb0>())
    }

    /// Iter frame pixelwise (each pixel in row for each row in frame) after scaling it
    /// by a given factor.
    pub fn iter_pixelwise_scaled(
        &self,
        scale: usize,
    ) -> impl Iterator<Item = impl Iterator<Item = &'a bool>> {
        self.iter_rows_as_bitslices()
            .map(move |row| {
                row.iter()
                    .flat_map(move |bit| core::iter::repeat(bit).take(scale))
            })
            .flat_map(move |row| core::iter::repeat(row).take(scale))
    }

    /// Get `ImageRaw` structure from frame's data
    #[cfg(feature = "embedded-graphics")]
    pub fn as_raw_image(&self) -> ImageRaw<'a, BinaryColor> {
        ImageRaw::new(self.0, WIDTH as u32, HEIGHT as u32)
    }
}

impl Frame {
    /// Get view over frame
    pub fn view(&self) -> FrameView<'_> {
        FrameView(&self.0)
    }
}

/// An exclusive view over the display region of memory, used by the
/// drawing instructions
pub(crate) struct FrameMut<'a>(&'a mut [u8]);

impl<'a> FrameMut<'a> {
    pub(crate) fn new(display: &'a mut [u8]) -> Self {
        debug_assert_eq!(display.len(), DISPLAY_MEMORY_SIZE);
        Self(display)
    }

    pub(crate) fn clear(&mut self) {
        self.0.iter_mut().for_each(|byte| *byte = 0);
    }

    pub(crate) fn get_bit(&self, x: usize, y: usize) -> bool {
        bit_index(x, y)
            .and_then(|idx| self.0.view_bits::<Msb0>().get(idx).copied())
            .unwrap_or(false)
    }

    /// Pixels outside of the screen are ignored
    pub(crate) fn set_bit(&mut self, x: usize, y: usize, val: bool) {
        let bits = self.0.view_bits_mut::<Msb0>();
        if let Some(mut bit) = bit_index(x, y).and_then(|idx| bits.get_mut(idx)) {
            *bit = val;
        };
    }

    /// XOR sprite rows onto the frame with its top left corner at (x, y)
    ///
    /// Anything past the right or the bottom edge is clipped. Returns whether
    /// any pixel was switched off.
    pub(crate) fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (dy, byte) in sprite.iter().enumerate() {
            let py = y + dy;
            if py >= HEIGHT {
                break;
            }
            for (dx, &lit) in core::slice::from_ref(byte).view_bits::<Msb0>().iter().enumerate() {
                let px = x + dx;
                if px >= WIDTH {
                    break;
                }
                if lit {
                    let was_set = self.get_bit(px, py);
                    collision |= was_set;
                    self.set_bit(px, py, !was_set);
                }
            }
        }
        collision
    }
}
