//! # Bootstrap Bump Allocator
//!
//! Hands out monotonically increasing byte ranges from the [`FreeArena`].
//!
//! ## WARNING
//!
//! - Never frees. Memory handed out here stays allocated for the lifetime of the kernel.
//! - There is exactly one allocation context during early boot; the allocator is
//!   passed around by `&mut` instead of living in a global.

use crate::selector::FreeArena;
use log::trace;

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BumpError {
    #[error("allocation before the bump allocator was seeded with an arena")]
    Uninitialized,
    #[error("the bump allocator was already seeded")]
    AlreadyInitialized,
    #[error("out of memory: requested {requested} bytes, {remaining} bytes left in the arena")]
    OutOfMemory { requested: u64, remaining: u64 },
    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(u64),
}

/// Forward-only allocator over a single [`FreeArena`].
///
/// # Invariants
/// - `cursor` never decreases.
/// - `arena.start <= cursor <= arena.end()` at all times after [`init`](Self::init).
#[derive(Debug, Clone)]
pub struct BumpAllocator {
    /// `None` until seeded.
    cursor: Option<u64>,
    end: u64,
}

impl Default for BumpAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl BumpAllocator {
    /// An allocator that was not yet seeded; every allocation fails with
    /// [`BumpError::Uninitialized`] until [`init`](Self::init) is called.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor: None,
            end: 0,
        }
    }

    /// An allocator seeded with `arena`.
    #[must_use]
    pub const fn with_arena(arena: FreeArena) -> Self {
        Self {
            cursor: Some(arena.start),
            end: arena.end(),
        }
    }

    /// Seed the allocator; sets the cursor to the start of `arena`.
    ///
    /// # Errors
    /// [`BumpError::AlreadyInitialized`] if the allocator was seeded before.
    pub const fn init(&mut self, arena: FreeArena) -> Result<(), BumpError> {
        if self.cursor.is_some() {
            return Err(BumpError::AlreadyInitialized);
        }
        self.cursor = Some(arena.start);
        self.end = arena.end();
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.cursor.is_some()
    }

    /// The address the next allocation will start at.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Option<u64> {
        self.cursor
    }

    /// Bytes left between the cursor and the arena end.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        match self.cursor {
            Some(cursor) => self.end.saturating_sub(cursor),
            None => 0,
        }
    }

    /// Allocate `size` bytes and return the start address of the range.
    ///
    /// No alignment beyond byte granularity; see [`alloc_aligned`](Self::alloc_aligned).
    ///
    /// # Errors
    /// * [`BumpError::Uninitialized`] before [`init`](Self::init).
    /// * [`BumpError::OutOfMemory`] if the range would pass the arena end;
    ///   the cursor is left untouched in that case.
    pub fn alloc(&mut self, size: u64) -> Result<u64, BumpError> {
        let cursor = self.cursor.ok_or(BumpError::Uninitialized)?;
        let next = cursor
            .checked_add(size)
            .filter(|&next| next <= self.end)
            .ok_or(BumpError::OutOfMemory {
                requested: size,
                remaining: self.end.saturating_sub(cursor),
            })?;

        self.cursor = Some(next);
        trace!("bump: {size} bytes at {cursor:#018x}");
        Ok(cursor)
    }

    /// Allocate `size` bytes starting at a multiple of `align`.
    ///
    /// The padding in front of the range is consumed as well.
    ///
    /// # Errors
    /// As [`alloc`](Self::alloc), plus [`BumpError::InvalidAlignment`] if `align`
    /// is not a power of two.
    pub fn alloc_aligned(&mut self, size: u64, align: u64) -> Result<u64, BumpError> {
        if !align.is_power_of_two() {
            return Err(BumpError::InvalidAlignment(align));
        }

        let cursor = self.cursor.ok_or(BumpError::Uninitialized)?;
        let padding = cursor.wrapping_neg() & (align - 1);
        let total = padding.checked_add(size).ok_or(BumpError::OutOfMemory {
            requested: size,
            remaining: self.remaining(),
        })?;

        match self.alloc(total) {
            Ok(start) => Ok(start + padding),
            Err(BumpError::OutOfMemory { remaining, .. }) => Err(BumpError::OutOfMemory {
                requested: size,
                remaining,
            }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: FreeArena = FreeArena::new(0x10_0000, 0x1000);

    #[test]
    fn unseeded_allocator_refuses() {
        let mut a = BumpAllocator::new();
        assert_eq!(a.alloc(8), Err(BumpError::Uninitialized));
        assert_eq!(a.remaining(), 0);
    }

    #[test]
    fn init_sets_cursor_to_arena_start() {
        let mut a = BumpAllocator::new();
        a.init(ARENA).expect("first init");
        assert_eq!(a.cursor(), Some(0x10_0000));
        assert_eq!(a.init(ARENA), Err(BumpError::AlreadyInitialized));
    }

    #[test]
    fn returns_cursor_then_advances() {
        let mut a = BumpAllocator::with_arena(ARENA);
        assert_eq!(a.alloc(3), Ok(0x10_0000));
        assert_eq!(a.alloc(5), Ok(0x10_0003));
        assert_eq!(a.cursor(), Some(0x10_0008));
        assert_eq!(a.remaining(), 0x1000 - 8);
    }

    #[test]
    fn exhausting_the_arena_is_an_error() {
        let mut a = BumpAllocator::with_arena(ARENA);
        assert_eq!(a.alloc(0x1000), Ok(0x10_0000));
        assert_eq!(
            a.alloc(1),
            Err(BumpError::OutOfMemory {
                requested: 1,
                remaining: 0
            })
        );
        assert_eq!(a.cursor(), Some(0x10_1000));
    }

    #[test]
    fn overflowing_request_leaves_cursor_alone() {
        let mut a = BumpAllocator::with_arena(ARENA);
        a.alloc(0x10).expect("small allocation");
        assert!(matches!(a.alloc(u64::MAX), Err(BumpError::OutOfMemory { .. })));
        assert_eq!(a.cursor(), Some(0x10_0010));
    }

    #[test]
    fn aligned_allocation_pads() {
        let mut a = BumpAllocator::with_arena(ARENA);
        assert_eq!(a.alloc(1), Ok(0x10_0000));
        assert_eq!(a.alloc_aligned(16, 16), Ok(0x10_0010));
        assert_eq!(a.cursor(), Some(0x10_0020));
        assert_eq!(a.alloc_aligned(4, 3), Err(BumpError::InvalidAlignment(3)));
    }
}
