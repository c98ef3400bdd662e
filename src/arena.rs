//! Fixed-capacity scratch arena for per-frame transient allocations.
//!
//! Every draw call that needs a temporary array (the triangle filler's
//! per-edge x tables, for instance) carves it out of this arena instead of
//! the heap. Allocation is a pointer bump, so its cost is O(1) and
//! predictable inside the frame budget. The host resets the arena exactly
//! once per frame, after the frame's draw calls have finished.
//!
//! The arena never grows and never falls back to the heap: a request that
//! doesn't fit is a capacity misconfiguration and panics rather than
//! silently truncating rasterizer output.

use std::cell::{Cell, UnsafeCell};
use std::mem;

pub struct ScratchArena {
    // UnsafeCell per byte so handing out &mut slices from &self needs no
    // &mut to the storage itself
    storage: Box<[UnsafeCell<u8>]>,
    offset: Cell<usize>,
}

impl ScratchArena {
    /// Create an arena backed by `capacity` bytes. The backing buffer is
    /// zero-initialized once here; `reset` never re-zeroes it, so callers
    /// must write allocations before reading them.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: (0..capacity).map(|_| UnsafeCell::new(0)).collect(),
            offset: Cell::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Bytes handed out since the last `reset`, including alignment padding
    pub fn used(&self) -> usize {
        self.offset.get()
    }

    /// Bump-allocate a slice of `count` elements of `T`, aligned for `T`.
    ///
    /// The returned contents are whatever the arena last held at those
    /// addresses; write before reading.
    ///
    /// # Panics
    /// Panics if the request does not fit in the remaining capacity. No
    /// partial allocation is made in that case.
    #[allow(clippy::mut_from_ref)] // bump allocator: distinct calls return disjoint ranges
    pub fn alloc<T: Copy>(&self, count: usize) -> &mut [T] {
        let align = mem::align_of::<T>();
        let bytes = mem::size_of::<T>() * count;

        // Align the actual address, not the offset alone: the backing
        // buffer is byte-aligned, so its base address contributes to T's
        // alignment too.
        let base = self.storage.as_ptr() as usize;
        let start = ((base + self.offset.get() + align - 1) & !(align - 1)) - base;
        let end = match start.checked_add(bytes) {
            Some(end) if end <= self.storage.len() => end,
            _ => panic!(
                "scratch arena exhausted: requested {} bytes with {} of {} in use",
                bytes,
                self.offset.get(),
                self.capacity()
            ),
        };
        self.offset.set(end);

        // Safety: [start, end) lies within the backing buffer and its
        // address is aligned for T; the bump above claimed the range, so no
        // other live slice aliases it; mutation goes through the
        // UnsafeCells. T is Copy (no drop obligations) and the buffer bytes
        // are initialized, so any T bit pattern read back is frozen.
        unsafe {
            let ptr = self.storage.as_ptr().add(start) as *mut T;
            std::slice::from_raw_parts_mut(ptr, count)
        }
    }

    /// Rewind the bump pointer to the start of the buffer.
    ///
    /// Takes `&mut self`, so the borrow checker guarantees no slice handed
    /// out by `alloc` is still alive. Memory is not zeroed.
    pub fn reset(&mut self) {
        self.offset.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_allocations_do_not_overlap() {
        let arena = ScratchArena::with_capacity(1024);
        let a = arena.alloc::<i32>(10);
        let b = arena.alloc::<i32>(10);
        a.fill(1);
        b.fill(2);
        assert!(a.iter().all(|&v| v == 1));
        assert!(b.iter().all(|&v| v == 2));

        let a_end = a.as_ptr() as usize + 10 * std::mem::size_of::<i32>();
        assert!(a_end <= b.as_ptr() as usize);
    }

    #[test]
    fn test_allocations_fill_to_capacity() {
        let arena = ScratchArena::with_capacity(64);
        for _ in 0..16 {
            let slice = arena.alloc::<i32>(1);
            slice[0] = 7;
        }
        assert_eq!(arena.used(), 64);
    }

    #[test]
    #[should_panic(expected = "scratch arena exhausted")]
    fn test_over_allocation_panics() {
        let arena = ScratchArena::with_capacity(64);
        arena.alloc::<i32>(17);
    }

    #[test]
    fn test_reset_reuses_backing_addresses() {
        let mut arena = ScratchArena::with_capacity(256);
        let first = arena.alloc::<i32>(8).as_ptr() as usize;
        arena.alloc::<i32>(8);
        arena.reset();
        assert_eq!(arena.used(), 0);
        let again = arena.alloc::<i32>(8).as_ptr() as usize;
        assert_eq!(first, again);
    }

    #[test]
    fn test_alignment_padding() {
        let arena = ScratchArena::with_capacity(64);
        arena.alloc::<u8>(1);
        let ints = arena.alloc::<i32>(2);
        assert_eq!(ints.as_ptr() as usize % std::mem::align_of::<i32>(), 0);
    }

    #[test]
    fn test_address_alignment_for_wide_types() {
        // The returned address itself must be aligned, whatever the base
        // address of the byte buffer happens to be
        let arena = ScratchArena::with_capacity(128);
        arena.alloc::<u8>(3);
        let wide = arena.alloc::<u64>(2);
        assert_eq!(wide.as_ptr() as usize % std::mem::align_of::<u64>(), 0);
        wide.fill(0xDEAD_BEEF_DEAD_BEEF);
        assert_eq!(wide[1], 0xDEAD_BEEF_DEAD_BEEF);
    }

    #[test]
    fn test_zero_length_allocation() {
        let arena = ScratchArena::with_capacity(16);
        let empty = arena.alloc::<i32>(0);
        assert!(empty.is_empty());
        assert_eq!(arena.used(), 0);
    }
}
