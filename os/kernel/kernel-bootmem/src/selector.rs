//! # Memory Region Selection
//!
//! Picks the single largest usable region of the boot memory map as the
//! free-memory arena and determines the kernel image's own footprint.

use core::fmt;
use kernel_info::config::KERNEL_FOOTPRINT_FALLBACK;
use kernel_info::memory::{MemoryRegion, MemoryRegionKind};
use log::trace;

/// The contiguous physical range the bump allocator hands memory out of.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FreeArena {
    pub start: u64,
    pub length: u64,
}

impl FreeArena {
    #[inline]
    #[must_use]
    pub const fn new(start: u64, length: u64) -> Self {
        Self { start, length }
    }

    /// Exclusive end address, saturating at `u64::MAX`.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.start.saturating_add(self.length)
    }
}

impl fmt::Display for FreeArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#018x}..{:#018x} ({} KiB)",
            self.start,
            self.end(),
            self.length / 1024
        )
    }
}

/// The memory occupied by the kernel image itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KernelFootprint {
    /// The kernel base address the bootloader reported.
    pub base: u64,
    /// Length of the memory map entry starting at `base`, or
    /// [`KERNEL_FOOTPRINT_FALLBACK`] if no entry starts there.
    pub length: u64,
}

/// Result of a successful [`select`] pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Selection {
    pub arena: FreeArena,
    pub kernel: KernelFootprint,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SelectError {
    #[error("the memory map contains no usable region")]
    NoUsableMemory,
}

/// Select the free-memory arena and the kernel footprint in a single pass.
///
/// * A `Usable` region replaces the current best only if it is **strictly**
///   longer, so the first of several equally long regions wins.
/// * Any other region (including a usable one that lost) whose base equals
///   `kernel_base` records the kernel footprint.
///
/// # Errors
/// [`SelectError::NoUsableMemory`] if no usable region with a non-zero length exists.
pub fn select(regions: &[MemoryRegion], kernel_base: u64) -> Result<Selection, SelectError> {
    let mut best: Option<FreeArena> = None;
    let mut best_length = 0;
    let mut kernel_length = KERNEL_FOOTPRINT_FALLBACK;

    for region in regions {
        if region.kind == MemoryRegionKind::Usable && region.length > best_length {
            trace!("New largest usable region: {region}");
            best_length = region.length;
            best = Some(FreeArena::new(region.base, region.length));
        } else if region.base == kernel_base {
            trace!("Kernel image region: {region}");
            kernel_length = region.length;
        }
    }

    let arena = best.ok_or(SelectError::NoUsableMemory)?;
    Ok(Selection {
        arena,
        kernel: KernelFootprint {
            base: kernel_base,
            length: kernel_length,
        },
    })
}

/// Copy `regions` into `slots`, keeping their order.
///
/// When the map has more entries than there are slots, the regions [`select`]
/// looks at (usable ones and the one starting at `kernel_base`) are kept and
/// other entries are dropped to make room. The selection over the result then
/// matches the selection over the full map unless those regions alone
/// overflow `slots`.
///
/// Returns the filled prefix of `slots`.
pub fn retain_into<I>(
    regions: I,
    kernel_base: u64,
    slots: &mut [MemoryRegion],
) -> &[MemoryRegion]
where
    I: IntoIterator<Item = MemoryRegion>,
    I::IntoIter: Clone,
{
    let regions = regions.into_iter();
    let wanted = |region: &MemoryRegion| region.kind.is_usable() || region.base == kernel_base;
    let needed = regions.clone().filter(wanted).count();
    let mut spare = slots.len().saturating_sub(needed);

    let mut count = 0;
    for region in regions {
        if count == slots.len() {
            break;
        }
        if !wanted(&region) {
            if spare == 0 {
                trace!("Dropping {region}");
                continue;
            }
            spare -= 1;
        }
        slots[count] = region;
        count += 1;
    }
    &slots[..count]
}

/// Byte totals over a memory map, for boot diagnostics.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct MemoryMapSummary {
    pub regions: usize,
    pub total_bytes: u64,
    pub usable_bytes: u64,
    pub reclaimable_bytes: u64,
}

impl MemoryMapSummary {
    #[must_use]
    pub fn of(regions: &[MemoryRegion]) -> Self {
        regions.iter().fold(Self::default(), |mut acc, r| {
            acc.regions += 1;
            acc.total_bytes = acc.total_bytes.saturating_add(r.length);
            match r.kind {
                MemoryRegionKind::Usable => {
                    acc.usable_bytes = acc.usable_bytes.saturating_add(r.length);
                }
                MemoryRegionKind::AcpiReclaimable | MemoryRegionKind::BootloaderReclaimable => {
                    acc.reclaimable_bytes = acc.reclaimable_bytes.saturating_add(r.length);
                }
                _ => {}
            }
            acc
        })
    }
}
