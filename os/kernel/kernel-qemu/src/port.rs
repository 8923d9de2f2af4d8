//! # Debug I/O Ports
//!
//! Both ports are write-only byte sinks: every `out` to them shows up verbatim
//! on the host (`-debugcon stdio` in QEMU, `port_e9_hack` in Bochs).

use core::fmt::{self, Write};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u16)]
pub enum DebugPort {
    /// The Bochs "port E9 hack", also QEMU's default `-debugcon` port.
    E9 = 0xE9,
    /// The port OVMF firmware builds log to.
    DebugCon = 0x402,
}

impl DebugPort {
    pub const DEFAULT: Self = Self::E9;

    #[must_use]
    pub const fn number(self) -> u16 {
        self as u16
    }

    /// Emit a single byte.
    ///
    /// A no-op unless the `enabled` feature is on and the kernel runs bare metal.
    #[allow(clippy::inline_always)]
    #[inline(always)]
    pub fn write_byte(self, byte: u8) {
        #[cfg(all(feature = "enabled", target_arch = "x86_64", target_os = "none"))]
        unsafe {
            outb(self.number(), byte);
        }

        #[cfg(not(all(feature = "enabled", target_arch = "x86_64", target_os = "none")))]
        let _ = byte;
    }
}

#[cfg(all(feature = "enabled", target_arch = "x86_64", target_os = "none"))]
#[allow(clippy::inline_always)]
#[inline(always)]
unsafe fn outb(port: u16, val: u8) {
    unsafe {
        core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") val,
            options(nomem, nostack, preserves_flags)
        );
    }
}

/// [`Write`] adapter over a [`DebugPort`]. Unbuffered.
#[derive(Debug)]
pub struct PortSink {
    port: DebugPort,
    written: usize,
}

impl PortSink {
    #[must_use]
    pub const fn new(port: DebugPort) -> Self {
        Self { port, written: 0 }
    }

    #[must_use]
    pub const fn port(&self) -> DebugPort {
        self.port
    }

    /// Bytes pushed through this sink so far.
    #[must_use]
    pub const fn bytes_written(&self) -> usize {
        self.written
    }
}

impl Write for PortSink {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            self.port.write_byte(b);
        }
        self.written += s.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_numbers() {
        assert_eq!(DebugPort::E9.number(), 0xe9);
        assert_eq!(DebugPort::DebugCon.number(), 0x402);
        assert_eq!(DebugPort::DEFAULT, DebugPort::E9);
    }

    #[test]
    fn sink_counts_utf8_bytes() {
        let mut sink = PortSink::new(DebugPort::E9);
        write!(sink, "{}: {}", "fb", 960).expect("infallible");
        sink.write_char('\u{e9}').expect("infallible");
        assert_eq!(sink.bytes_written(), "fb: 960".len() + 2);
    }
}
