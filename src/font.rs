//! Built-in hexadecimal glyphs, 4 pixels wide and 5 rows tall.

pub(crate) const FONT_START: usize = 0x000;
pub(crate) const GLYPH_HEIGHT: usize = 5;

#[rustfmt::skip]
pub(crate) const FONT: [u8; 16 * GLYPH_HEIGHT] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Address of the glyph for the low nibble of `digit`
pub(crate) fn glyph_address(digit: u8) -> u16 {
    (FONT_START + (digit & 0x0F) as usize * GLYPH_HEIGHT) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_addresses() {
        assert_eq!(glyph_address(0x0), 0);
        assert_eq!(glyph_address(0xA), 50);
        assert_eq!(glyph_address(0xF), 75);
        assert_eq!(glyph_address(0x1F), 75);
    }
}
