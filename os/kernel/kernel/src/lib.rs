//! # Blackrock Kernel
//!
//! The hardware-independent half of the kernel: it takes the typed boot
//! information the entry point collected and turns it into a [`BootContext`]
//! (free-memory arena, seeded bump allocator, framebuffer geometry, console
//! font), then draws the boot screen.
//!
//! The binary half (`main.rs`) owns everything that needs the real machine:
//! the Limine requests, the entry point, the halt loop and the panic handler.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod error;
pub mod init;
pub mod tracing;

pub use error::BootError;
pub use init::{BootContext, finish, initialize, present};
