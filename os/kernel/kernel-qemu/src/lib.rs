//! # QEMU Debug Console
//!
//! Diagnostic output for a kernel that has nothing else yet: no serial driver,
//! no allocator, possibly no framebuffer. Bytes written to a debug I/O port
//! appear on the host as soon as the `out` instruction retires.
//!
//! ```text
//! log::info!(..)            qemu_trace!(..)
//!       │                         │
//!   QemuLogger               qemu_fmt::qemu_write
//!       └──────────┬──────────────┘
//!              PortSink (fmt::Write)
//!                  │
//!        DebugPort::E9 / DebugPort::DebugCon
//!                  │
//!      qemu-system-x86_64 -debugcon stdio
//! ```
//!
//! ## Components
//!
//! * [`QemuLogger`]: a `log::Log` backend, installed from a `static`.
//! * [`qemu_trace!`]: formatted output that bypasses the `log` facade, for the
//!   places where a logger may not be installed (early entry, panics).
//! * [`PortSink`]: the `core::fmt::Write` adapter both of them use.
//!
//! ## Features
//!
//! `enabled` (default) compiles the port I/O in. Without it, and on any target
//! other than bare-metal x86-64, writes are accepted and dropped. That keeps
//! the crate usable from host-side unit tests.
//!
//! ## Host side
//!
//! ```bash
//! qemu-system-x86_64 -cdrom image.iso -debugcon stdio
//! qemu-system-x86_64 -cdrom image.iso -debugcon file:debug.log
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod logger;
mod port;

pub use logger::QemuLogger;
pub use port::{DebugPort, PortSink};

#[doc(hidden)]
pub mod qemu_fmt {
    use crate::port::{DebugPort, PortSink};
    use core::fmt;

    #[doc(hidden)]
    #[inline]
    pub fn qemu_write(args: fmt::Arguments) {
        // Best-effort debug output.
        let _ = fmt::write(&mut PortSink::new(DebugPort::DEFAULT), args);
    }
}

/// Write formatted text to the default debug port, without a trailing newline.
#[macro_export]
macro_rules! qemu_trace {
    ($($arg:tt)*) => {{
        $crate::qemu_fmt::qemu_write(core::format_args!($($arg)*));
    }};
}
