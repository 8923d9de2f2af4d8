//! # Early Boot Memory
//!
//! Physical memory handling for the phase between bootloader handoff and the
//! first real allocator. Two pieces live here:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │            Memory Region Selector ([`selector`])    │
//! │    • one pass over the boot memory map              │
//! │    • largest usable region becomes the arena        │
//! │    • kernel footprint matched by base address       │
//! └─────────────────┬───────────────────────────────────┘
//!                   │ FreeArena
//! ┌─────────────────▼───────────────────────────────────┐
//! │              Bump Allocator ([`bump`])              │
//! │    • single forward-moving cursor                   │
//! │    • byte granularity, optional alignment           │
//! │    • never frees                                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! A single largest contiguous block is all a bump allocator needs; there is
//! no reclamation at this stage, so a free list would buy nothing.
//!
//! ## Usage
//!
//! ```rust
//! use kernel_bootmem::{BumpAllocator, select};
//! use kernel_info::memory::{MemoryRegion, MemoryRegionKind};
//!
//! let map = [
//!     MemoryRegion::new(0x0000_0000, 0x0009_f000, MemoryRegionKind::Usable),
//!     MemoryRegion::new(0x0010_0000, 0x7ee0_0000, MemoryRegionKind::Usable),
//! ];
//! let selection = select(&map, 0xffff_ffff_8000_0000).expect("usable memory");
//!
//! let mut alloc = BumpAllocator::with_arena(selection.arena);
//! let a = alloc.alloc(64).expect("allocation");
//! let b = alloc.alloc(64).expect("allocation");
//! assert_eq!(b, a + 64);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod bump;
pub mod selector;

pub use bump::{BumpAllocator, BumpError};
pub use selector::{
    FreeArena, KernelFootprint, MemoryMapSummary, SelectError, Selection, retain_into, select,
};
