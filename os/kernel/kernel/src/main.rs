//! # Kernel Entry Point
//!
//! Limine loads the image, answers the requests in `.requests` and jumps to
//! [`kmain`] in 64-bit long mode with interrupts disabled. From there:
//!
//! 1. install the debug-port logger,
//! 2. convert the Limine responses into [`KernelBootInfo`],
//! 3. run [`kernel::initialize`] and [`kernel::present`],
//! 4. halt.
//!
//! Any error along the way ends in [`halt`]. The kernel never returns to the
//! bootloader; doing so would make Limine reboot in a loop.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]
#![allow(unsafe_code)]

#[cfg(target_os = "none")]
mod entry;

/// Hosted builds only exist so the workspace builds and tests on the host.
#[cfg(not(target_os = "none"))]
fn main() {}
