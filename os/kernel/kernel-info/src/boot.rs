//! # Kernel Boot Information
//!
//! Typed, immutable view of what the boot environment handed to the kernel.
//! The raw boot protocol responses are converted into these types exactly once,
//! at kernel entry; nothing downstream looks at the wire layout again.

use crate::memory::MemoryRegion;
use core::fmt;

/// Framebuffer properties exactly as reported by the boot environment.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BootFramebufferInfo {
    /// Linear framebuffer base address (as mapped by the bootloader).
    pub address: u64,

    /// Visible width in **pixels**.
    pub width: u64,

    /// Visible height in **pixels**.
    pub height: u64,

    /// Bytes per scanline. May be larger than `width * bytes_per_pixel` due to padding.
    pub pitch: u64,

    /// Reported color depth in **bits** per pixel.
    pub bits_per_pixel: u16,
}

/// A file staged into memory by the boot environment before kernel entry.
///
/// The backing memory is never reclaimed by the bootloader, so the borrow may
/// live for the rest of the kernel's runtime.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct ModuleEntry<'a> {
    path: &'a str,
    data: &'a [u8],
}

impl<'a> ModuleEntry<'a> {
    #[inline]
    #[must_use]
    pub const fn new(path: &'a str, data: &'a [u8]) -> Self {
        Self { path, data }
    }

    /// The path the module was loaded from, e.g. `boot():/fonts/zap-light16.psf`.
    #[inline]
    #[must_use]
    pub const fn path(&self) -> &'a str {
        self.path
    }

    /// The module contents.
    #[inline]
    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Address of the first byte of the module.
    #[inline]
    #[must_use]
    pub fn base(&self) -> u64 {
        self.data.as_ptr() as u64
    }

    /// Length of the module in bytes.
    #[inline]
    #[must_use]
    pub const fn length(&self) -> u64 {
        self.data.len() as u64
    }
}

impl fmt::Debug for ModuleEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("path", &self.path)
            .field("base", &format_args!("{:#018x}", self.base()))
            .field("length", &self.length())
            .finish()
    }
}

/// The boot environment responses this kernel cannot start without.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BootData {
    MemoryMap,
    Modules,
    Framebuffer,
    KernelAddress,
}

impl fmt::Display for BootData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MemoryMap => "memory map",
            Self::Modules => "module list",
            Self::Framebuffer => "framebuffer",
            Self::KernelAddress => "kernel address",
        })
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BootInfoError {
    #[error("the boot environment did not provide the {0}")]
    Missing(BootData),
}

/// Everything the kernel needs right after the bootloader handed over control.
#[derive(Debug, Copy, Clone)]
pub struct KernelBootInfo<'a> {
    /// Physical memory map, in the order reported by the boot environment.
    pub memory_map: &'a [MemoryRegion],

    /// Staged modules, in the order reported by the boot environment.
    pub modules: &'a [ModuleEntry<'a>],

    /// The first (primary) framebuffer.
    pub framebuffer: BootFramebufferInfo,

    /// Number of framebuffers the boot environment reported.
    pub framebuffer_count: u64,

    /// Physical base address the kernel image was loaded at.
    pub kernel_base: u64,
}

/// Collects the individual boot responses and checks that none is missing.
#[derive(Debug, Default, Copy, Clone)]
pub struct BootInfoBuilder<'a> {
    memory_map: Option<&'a [MemoryRegion]>,
    modules: Option<&'a [ModuleEntry<'a>]>,
    framebuffer: Option<(BootFramebufferInfo, u64)>,
    kernel_base: Option<u64>,
}

impl<'a> BootInfoBuilder<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            memory_map: None,
            modules: None,
            framebuffer: None,
            kernel_base: None,
        }
    }

    #[must_use]
    pub const fn with_memory_map(mut self, regions: &'a [MemoryRegion]) -> Self {
        self.memory_map = Some(regions);
        self
    }

    #[must_use]
    pub const fn with_modules(mut self, modules: &'a [ModuleEntry<'a>]) -> Self {
        self.modules = Some(modules);
        self
    }

    /// Register the primary framebuffer together with the total number of framebuffers.
    #[must_use]
    pub const fn with_framebuffer(mut self, framebuffer: BootFramebufferInfo, count: u64) -> Self {
        self.framebuffer = Some((framebuffer, count));
        self
    }

    #[must_use]
    pub const fn with_kernel_base(mut self, kernel_base: u64) -> Self {
        self.kernel_base = Some(kernel_base);
        self
    }

    /// Finish the boot information.
    ///
    /// # Errors
    /// Returns [`BootInfoError::Missing`] naming the first absent response,
    /// checked in the order memory map, modules, framebuffer, kernel address.
    pub const fn build(self) -> Result<KernelBootInfo<'a>, BootInfoError> {
        let Some(memory_map) = self.memory_map else {
            return Err(BootInfoError::Missing(BootData::MemoryMap));
        };
        let Some(modules) = self.modules else {
            return Err(BootInfoError::Missing(BootData::Modules));
        };
        let Some((framebuffer, framebuffer_count)) = self.framebuffer else {
            return Err(BootInfoError::Missing(BootData::Framebuffer));
        };
        let Some(kernel_base) = self.kernel_base else {
            return Err(BootInfoError::Missing(BootData::KernelAddress));
        };

        Ok(KernelBootInfo {
            memory_map,
            modules,
            framebuffer,
            framebuffer_count,
            kernel_base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRegionKind;

    const FB: BootFramebufferInfo = BootFramebufferInfo {
        address: 0xfd00_0000,
        width: 1024,
        height: 768,
        pitch: 4096,
        bits_per_pixel: 32,
    };

    #[test]
    fn module_entry_reports_location() {
        static BYTES: [u8; 6] = *b"abcdef";
        let m = ModuleEntry::new("boot():/fonts/x.psf", &BYTES);
        assert_eq!(m.base(), BYTES.as_ptr() as u64);
        assert_eq!(m.length(), 6);
        assert_eq!(m.path(), "boot():/fonts/x.psf");
    }

    #[test]
    fn builder_requires_every_response() {
        let regions = [MemoryRegion::new(0, 0x1000, MemoryRegionKind::Usable)];
        let modules: [ModuleEntry; 0] = [];

        let err = BootInfoBuilder::new().build().unwrap_err();
        assert_eq!(err, BootInfoError::Missing(BootData::MemoryMap));

        let err = BootInfoBuilder::new()
            .with_memory_map(&regions)
            .with_modules(&modules)
            .with_kernel_base(0x10_0000)
            .build()
            .unwrap_err();
        assert_eq!(err, BootInfoError::Missing(BootData::Framebuffer));

        let info = BootInfoBuilder::new()
            .with_memory_map(&regions)
            .with_modules(&modules)
            .with_framebuffer(FB, 1)
            .with_kernel_base(0x10_0000)
            .build()
            .expect("complete boot info");
        assert_eq!(info.memory_map.len(), 1);
        assert!(info.modules.is_empty());
        assert_eq!(info.framebuffer_count, 1);
        assert_eq!(info.kernel_base, 0x10_0000);
    }
}
