//! # Kernel Configuration and Boot Interface
//!
//! This crate defines the data structures and configuration constants that are
//! shared between the boot-protocol glue in the kernel binary and the early-boot
//! subsystems (memory selection, module lookup, font loading, framebuffer output).
//!
//! ## Overview
//!
//! The bootloader answers a handful of requests (memory map, modules, framebuffer,
//! kernel load address). Those answers are raw, protocol-specific structures.
//! The kernel converts them exactly once, at entry, into the strongly typed,
//! immutable values defined here and passes them around by reference from then on.
//!
//! ## Architecture
//!
//! ### Boot Information ([`boot`])
//! * **[`KernelBootInfo`](boot::KernelBootInfo)**: The complete handoff, borrowed from the bootloader
//! * **[`ModuleEntry`](boot::ModuleEntry)**: A file staged into memory, addressable by path
//! * **[`BootFramebufferInfo`](boot::BootFramebufferInfo)**: Framebuffer geometry as reported
//! * **[`BootInfoBuilder`](boot::BootInfoBuilder)**: Assembles the handoff and reports missing responses
//!
//! ### Memory Map ([`memory`])
//! * **[`MemoryRegion`](memory::MemoryRegion)**: One `(base, length, kind)` triple
//! * **[`MemoryRegionKind`](memory::MemoryRegionKind)**: Usable, reserved, kernel image, ...
//!
//! ### Configuration ([`config`])
//! Compile-time constants: font search paths, forced pixel depth, colors and the
//! boot banner.
//!
//! ## Boot Flow
//!
//! ```text
//! Limine responses ──► BootInfoBuilder ──► KernelBootInfo ──► early-boot subsystems
//!                           │
//!                           └── missing response ──► BootInfoError::Missing
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kernel_info::boot::{BootFramebufferInfo, BootInfoBuilder, ModuleEntry};
//! use kernel_info::memory::{MemoryRegion, MemoryRegionKind};
//!
//! let regions = [MemoryRegion::new(0x10_0000, 0x10_0000, MemoryRegionKind::Usable)];
//! let modules: [ModuleEntry; 0] = [];
//! let fb = BootFramebufferInfo { address: 0, width: 640, height: 480, pitch: 2560, bits_per_pixel: 32 };
//!
//! let info = BootInfoBuilder::new()
//!     .with_memory_map(&regions)
//!     .with_modules(&modules)
//!     .with_framebuffer(fb, 1)
//!     .with_kernel_base(0x20_0000)
//!     .build()
//!     .expect("all responses present");
//! assert_eq!(info.memory_map.len(), 1);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod boot;
pub mod config;
pub mod memory;
