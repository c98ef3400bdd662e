//! Vectorized constant-color fill.
//!
//! Background clears and the interior spans of filled primitives all come
//! down to "store this packed color N times in a row". On x86_64 with AVX2
//! available that is done with unaligned 256-bit stores, eight pixels per
//! instruction; everywhere else a scalar loop produces identical results.

/// Pixels per SIMD chunk. Framebuffer `simd_chunks` and span-fill math are
/// expressed in multiples of this.
pub const LANE_WIDTH: usize = 8;

/// Store `chunks` blocks of `LANE_WIDTH` copies of `packed` at the start of
/// `row`. The destination does not need any particular alignment. Pixels
/// past `chunks * LANE_WIDTH` are left untouched.
pub fn fill_lanes(row: &mut [u32], packed: u32, chunks: usize) {
    let pixel_count = chunks * LANE_WIDTH;
    assert!(pixel_count <= row.len());

    #[cfg(target_arch = "x86_64")]
    if is_x86_feature_detected!("avx2") {
        // Safety: AVX2 support just verified; the assert above guarantees
        // `pixel_count` pixels are in bounds.
        unsafe { fill_lanes_avx2(row.as_mut_ptr(), packed, chunks) };
        return;
    }

    for pixel in &mut row[..pixel_count] {
        *pixel = packed;
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn fill_lanes_avx2(mut row: *mut u32, packed: u32, chunks: usize) {
    use std::arch::x86_64::{__m256i, _mm256_set1_epi32, _mm256_storeu_si256};

    let wide = _mm256_set1_epi32(packed as i32);
    for _ in 0..chunks {
        // Unaligned store: span starts land on arbitrary pixel offsets
        _mm256_storeu_si256(row as *mut __m256i, wide);
        row = row.add(LANE_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_exactly_chunk_range() {
        let mut row = vec![0u32; 24];
        fill_lanes(&mut row, 0xFF0000FF, 2);
        assert!(row[..16].iter().all(|&p| p == 0xFF0000FF));
        assert!(row[16..].iter().all(|&p| p == 0));
    }

    #[test]
    fn test_zero_chunks_is_noop() {
        let mut row = vec![0xAAAAAAAA_u32; 8];
        fill_lanes(&mut row, 0x12345678, 0);
        assert!(row.iter().all(|&p| p == 0xAAAAAAAA));
    }

    #[test]
    fn test_unaligned_destination() {
        // Start the fill mid-row so the pointer is not 32-byte aligned
        let mut row = vec![0u32; 17];
        fill_lanes(&mut row[1..], 0xDEADBEEF, 2);
        assert_eq!(row[0], 0);
        assert!(row[1..17].iter().all(|&p| p == 0xDEADBEEF));
    }
}
