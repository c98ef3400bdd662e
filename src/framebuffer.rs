//! Packed-pixel framebuffer with clipped writes.
//!
//! One `u32` per pixel in the `Color::packed` layout, row-major. Writes are
//! clipped to the buffer: a single pixel outside `[0,width)×[0,height)` is a
//! no-op, and spans are clamped to the row. Off-screen geometry therefore
//! costs nothing instead of being undefined behavior.

use crate::simd::{fill_lanes, LANE_WIDTH};

pub struct Framebuffer {
    pixels: Vec<u32>,
    width: i32,
    height: i32,
    pitch: usize,
    simd_chunks: usize,
}

impl Framebuffer {
    pub fn with_size(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "framebuffer must be non-empty");
        let pixel_count = (width as usize) * (height as usize);
        Self {
            pixels: vec![0; pixel_count],
            width,
            height,
            pitch: width as usize * 4,
            simd_chunks: pixel_count / LANE_WIDTH,
        }
    }

    /// Reallocate for a new resolution. Only valid between frames; the
    /// pixel contents are discarded.
    pub fn resize(&mut self, width: i32, height: i32) {
        assert!(width > 0 && height > 0, "framebuffer must be non-empty");
        let pixel_count = (width as usize) * (height as usize);
        self.pixels.clear();
        self.pixels.resize(pixel_count, 0);
        self.width = width;
        self.height = height;
        self.pitch = width as usize * 4;
        self.simd_chunks = pixel_count / LANE_WIDTH;
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Row stride in bytes, for texture upload
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Whole-buffer fill size in SIMD chunks, precomputed at resize
    #[inline]
    pub fn simd_chunks(&self) -> usize {
        self.simd_chunks
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn pixel_index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Write one packed pixel, clipped
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, packed: u32) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x, y);
            self.pixels[idx] = packed;
        }
    }

    /// Read one packed pixel; `None` outside the buffer
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.pixel_index(x, y)])
        } else {
            None
        }
    }

    /// Fill the inclusive horizontal span `[x1, x2]` on row `y`, clipped.
    ///
    /// Spans of at least one SIMD lane use the wide store for the whole
    /// lanes and finish the remainder pixel-by-pixel.
    pub fn fill_span(&mut self, x1: i32, x2: i32, y: i32, packed: u32) {
        if y < 0 || y >= self.height {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width - 1);
        if start > end {
            return;
        }

        let idx = self.pixel_index(start, y);
        let count = (end - start + 1) as usize;
        let span = &mut self.pixels[idx..idx + count];

        let chunks = count / LANE_WIDTH;
        if chunks > 0 {
            fill_lanes(span, packed, chunks);
        }
        for pixel in &mut span[chunks * LANE_WIDTH..] {
            *pixel = packed;
        }
    }

    /// Clear every pixel to `packed`. The whole buffer is one contiguous
    /// row-major run, so this is a single `simd_chunks`-sized flat fill
    /// plus a scalar tail when the pixel count is not a lane multiple.
    pub fn clear(&mut self, packed: u32) {
        let chunks = self.simd_chunks;
        fill_lanes(&mut self.pixels, packed, chunks);
        for pixel in &mut self.pixels[chunks * LANE_WIDTH..] {
            *pixel = packed;
        }
    }

    /// Packed pixel words, row-major
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        // Safety: reinterprets the pixel words as 4x as many bytes; the
        // allocation is exactly pixels.len() * 4 bytes and u8 has no
        // alignment requirement.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr() as *const u8, self.pixels.len() * 4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_fill_4x4() {
        let mut fb = Framebuffer::with_size(4, 4);
        fb.clear(0xFF0000FF);
        assert_eq!(fb.pixels().len(), 16);
        assert!(fb.pixels().iter().all(|&p| p == 0xFF0000FF));
    }

    #[test]
    fn test_clear_non_lane_multiple() {
        // 3x3 = 9 pixels: one chunk of 8 plus a scalar tail of 1
        let mut fb = Framebuffer::with_size(3, 3);
        fb.clear(0xABCDEF01);
        assert!(fb.pixels().iter().all(|&p| p == 0xABCDEF01));
    }

    #[test]
    fn test_set_pixel_out_of_bounds_is_noop() {
        let mut fb = Framebuffer::with_size(4, 4);
        fb.set_pixel(-1, 0, 0xFFFFFFFF);
        fb.set_pixel(0, -1, 0xFFFFFFFF);
        fb.set_pixel(4, 0, 0xFFFFFFFF);
        fb.set_pixel(0, 4, 0xFFFFFFFF);
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_fill_span_clips_to_row() {
        let mut fb = Framebuffer::with_size(8, 2);
        fb.fill_span(-5, 20, 1, 0x11223344);
        for x in 0..8 {
            assert_eq!(fb.pixel(x, 0), Some(0));
            assert_eq!(fb.pixel(x, 1), Some(0x11223344));
        }
    }

    #[test]
    fn test_fill_span_off_screen_row() {
        let mut fb = Framebuffer::with_size(4, 4);
        fb.fill_span(0, 3, -1, 0xFFFFFFFF);
        fb.fill_span(0, 3, 4, 0xFFFFFFFF);
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_fill_span_endpoint_order() {
        let mut a = Framebuffer::with_size(16, 1);
        let mut b = Framebuffer::with_size(16, 1);
        a.fill_span(2, 13, 0, 0xFF00FF00);
        b.fill_span(13, 2, 0, 0xFF00FF00);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_fill_span_mixed_simd_and_tail() {
        // 19-pixel span: 2 chunks of 8 plus 3 scalar pixels
        let mut fb = Framebuffer::with_size(32, 1);
        fb.fill_span(5, 23, 0, 0xCAFEBABE);
        for x in 0..32 {
            let expected = if (5..=23).contains(&x) { 0xCAFEBABE } else { 0 };
            assert_eq!(fb.pixel(x, 0), Some(expected));
        }
    }

    #[test]
    fn test_resize_recomputes_layout() {
        let mut fb = Framebuffer::with_size(4, 4);
        fb.clear(0xFFFFFFFF);
        fb.resize(6, 3);
        assert_eq!(fb.pixels().len(), 18);
        assert_eq!(fb.pitch(), 24);
        assert_eq!(fb.simd_chunks(), 18 / LANE_WIDTH);
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_pitch_and_chunks() {
        let fb = Framebuffer::with_size(640, 480);
        assert_eq!(fb.pitch(), 640 * 4);
        assert_eq!(fb.simd_chunks(), 640 * 480 / LANE_WIDTH);
        assert_eq!(fb.as_bytes().len(), 640 * 480 * 4);
    }
}
