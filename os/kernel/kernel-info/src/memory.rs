//! # Physical Memory Map

use core::fmt;

/// Classification of a physical memory range as reported by the boot environment.
///
/// The variants mirror the Limine memory map entry types. Only [`Usable`](Self::Usable)
/// ranges may be handed out by the early allocator; everything else is left alone.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MemoryRegionKind {
    /// Free RAM, safe to repurpose.
    Usable,
    /// Firmware or device memory. Never touch.
    Reserved,
    /// ACPI tables; reclaimable once the tables were parsed.
    AcpiReclaimable,
    /// ACPI non-volatile storage.
    AcpiNvs,
    /// Defective RAM.
    BadMemory,
    /// Memory used by the bootloader; reclaimable once its responses are no longer needed.
    BootloaderReclaimable,
    /// The kernel image and the modules staged next to it.
    KernelAndModules,
    /// The linear framebuffer.
    Framebuffer,
    /// Any type this kernel does not know about; treated like [`Reserved`](Self::Reserved).
    Other,
}

impl MemoryRegionKind {
    /// Whether the range may be used by the early allocator.
    #[inline]
    #[must_use]
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Usable)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usable => "USABLE",
            Self::Reserved => "RESERVED",
            Self::AcpiReclaimable => "ACPI_RECLAIM",
            Self::AcpiNvs => "ACPI_NVS",
            Self::BadMemory => "BAD",
            Self::BootloaderReclaimable => "BOOTLOADER",
            Self::KernelAndModules => "KERNEL",
            Self::Framebuffer => "FRAMEBUFFER",
            Self::Other => "UNKNOWN",
        }
    }
}

impl fmt::Display for MemoryRegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical range of the boot memory map.
///
/// Regions are trusted input: no ordering or overlap invariant is checked.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MemoryRegion {
    /// Physical base address.
    pub base: u64,
    /// Length in bytes.
    pub length: u64,
    /// What the range contains.
    pub kind: MemoryRegionKind,
}

impl MemoryRegion {
    #[inline]
    #[must_use]
    pub const fn new(base: u64, length: u64, kind: MemoryRegionKind) -> Self {
        Self { base, length, kind }
    }

    /// Exclusive end address, saturating at `u64::MAX`.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.base.saturating_add(self.length)
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#012x} - {:#012x} ({:12} bytes) {}",
            self.base,
            self.end(),
            self.length,
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_usable_is_usable() {
        assert!(MemoryRegionKind::Usable.is_usable());
        assert!(!MemoryRegionKind::BootloaderReclaimable.is_usable());
        assert!(!MemoryRegionKind::KernelAndModules.is_usable());
        assert!(!MemoryRegionKind::Other.is_usable());
    }

    #[test]
    fn end_saturates() {
        let r = MemoryRegion::new(u64::MAX - 1, 16, MemoryRegionKind::Reserved);
        assert_eq!(r.end(), u64::MAX);
        let r = MemoryRegion::new(0x1000, 0x2000, MemoryRegionKind::Usable);
        assert_eq!(r.end(), 0x3000);
    }
}
