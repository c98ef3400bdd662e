//! RGBA8 color values and their packed framebuffer representation

/// An RGBA8 color. Plain value type; the framebuffer never stores these
/// directly, only the packed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::new(0x00, 0xFF, 0x00);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xFF);
    pub const PURPLE: Color = Color::new(0xA0, 0x20, 0xF0);
    pub const OLIVE: Color = Color::new(0x80, 0x80, 0x00);
    pub const GREY: Color = Color::new(0x80, 0x80, 0x80);

    /// Opaque color from RGB channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Pack into the single word the framebuffer stores per pixel.
    /// Layout is `r<<24 | g<<16 | b<<8 | a`, which is RGBA8888 byte order
    /// on little-endian targets.
    #[inline]
    pub const fn packed(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_channel_order() {
        let c = Color {
            r: 0x12,
            g: 0x34,
            b: 0x56,
            a: 0x78,
        };
        assert_eq!(c.packed(), 0x12345678);
    }

    #[test]
    fn test_presets_are_opaque() {
        for c in [
            Color::BLACK,
            Color::WHITE,
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::PURPLE,
            Color::OLIVE,
            Color::GREY,
        ] {
            assert_eq!(c.a, 0xFF);
            assert_eq!(c.packed() & 0xFF, 0xFF);
        }
    }

    #[test]
    fn test_preset_values() {
        assert_eq!(Color::RED.packed(), 0xFF0000FF);
        assert_eq!(Color::PURPLE.packed(), 0xA020F0FF);
        assert_eq!(Color::OLIVE.packed(), 0x808000FF);
    }
}
