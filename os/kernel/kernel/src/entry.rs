//! # Limine Glue

use core::panic::PanicInfo;
use kernel::BootError;
use kernel_bootmem::retain_into;
use kernel_framebuffer::Canvas;
use kernel_info::boot::{BootFramebufferInfo, BootInfoBuilder, BootInfoError, KernelBootInfo, ModuleEntry};
use kernel_info::memory::{MemoryRegion, MemoryRegionKind};
use kernel_qemu::{QemuLogger, qemu_trace};
use limine::BaseRevision;
use limine::file::File;
use limine::memory_map::{Entry, EntryType};
use limine::request::{
    ExecutableAddressRequest, FramebufferRequest, MemoryMapRequest, ModuleRequest,
    RequestsEndMarker, RequestsStartMarker,
};
use log::{LevelFilter, error, info, warn};

#[cfg(feature = "qemu")]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(feature = "qemu"))]
const LOG_LEVEL: LevelFilter = LevelFilter::Off;

/// Memory map slots on the entry stack. A longer map loses entries the region
/// selector does not look at first; see [`retain_into`].
const MAX_REGIONS: usize = 256;

/// Boot modules beyond this are dropped (with a warning).
const MAX_MODULES: usize = 16;

static LOGGER: QemuLogger = QemuLogger::new(LOG_LEVEL);

#[used]
#[unsafe(link_section = ".requests_start_marker")]
static _START_MARKER: RequestsStartMarker = RequestsStartMarker::new();

#[used]
#[unsafe(link_section = ".requests")]
static BASE_REVISION: BaseRevision = BaseRevision::new();

#[used]
#[unsafe(link_section = ".requests")]
static MEMORY_MAP: MemoryMapRequest = MemoryMapRequest::new();

#[used]
#[unsafe(link_section = ".requests")]
static FRAMEBUFFER: FramebufferRequest = FramebufferRequest::new();

#[used]
#[unsafe(link_section = ".requests")]
static MODULES: ModuleRequest = ModuleRequest::new();

#[used]
#[unsafe(link_section = ".requests")]
static EXECUTABLE_ADDRESS: ExecutableAddressRequest = ExecutableAddressRequest::new();

#[used]
#[unsafe(link_section = ".requests_end_marker")]
static _END_MARKER: RequestsEndMarker = RequestsEndMarker::new();

/// The kernel entry point Limine jumps to.
#[unsafe(no_mangle)]
extern "C" fn kmain() -> ! {
    if LOGGER.init().is_err() {
        qemu_trace!("logger already installed\n");
    }
    info!("Blackrock");

    if !BASE_REVISION.is_supported() {
        halt(&BootError::UnsupportedRevision);
    }

    let mut regions = [MemoryRegion::new(0, 0, MemoryRegionKind::Reserved); MAX_REGIONS];
    let mut modules = [ModuleEntry::new("", &[]); MAX_MODULES];
    let boot_info = match collect_boot_info(&mut regions, &mut modules) {
        Ok(boot_info) => boot_info,
        Err(err) => halt(&err.into()),
    };

    let context = match kernel::initialize(&boot_info) {
        Ok(context) => context,
        Err(err) => halt(&err),
    };

    // SAFETY: Limine maps the framebuffer and nothing else in the kernel draws to it.
    let canvas = match unsafe { Canvas::new(&context.framebuffer) } {
        Ok(canvas) => canvas,
        Err(err) => halt(&err.into()),
    };

    let mut console = match kernel::present(&context, canvas) {
        Ok(console) => console,
        Err(err) => halt(&err),
    };

    info!(
        "Boot arena has {} bytes left",
        context.allocator.remaining()
    );
    if let Err(err) = kernel::finish(&mut console) {
        warn!("Boot screen incomplete: {err}");
    }
    idle()
}

/// Gather the Limine responses into slots on the entry stack.
fn collect_boot_info<'a>(
    regions: &'a mut [MemoryRegion],
    modules: &'a mut [ModuleEntry<'static>],
) -> Result<KernelBootInfo<'a>, BootInfoError> {
    let mut builder = BootInfoBuilder::new();

    let kernel_base = EXECUTABLE_ADDRESS
        .get_response()
        .map(|response| response.physical_base());

    if let Some(response) = MEMORY_MAP.get_response() {
        let map = fill_regions(regions, response.entries(), kernel_base.unwrap_or_default());
        builder = builder.with_memory_map(map);
    }

    if let Some(response) = MODULES.get_response() {
        builder = builder.with_modules(fill_modules(modules, response.modules()));
    }

    if let Some(response) = FRAMEBUFFER.get_response() {
        let count = response.framebuffers().count() as u64;
        if let Some(fb) = response.framebuffers().next() {
            let info = BootFramebufferInfo {
                address: fb.addr() as u64,
                width: fb.width(),
                height: fb.height(),
                pitch: fb.pitch(),
                bits_per_pixel: fb.bpp(),
            };
            builder = builder.with_framebuffer(info, count);
        }
    }

    if let Some(kernel_base) = kernel_base {
        builder = builder.with_kernel_base(kernel_base);
    }

    builder.build()
}

const fn region_kind(entry_type: EntryType) -> MemoryRegionKind {
    match entry_type {
        EntryType::USABLE => MemoryRegionKind::Usable,
        EntryType::RESERVED => MemoryRegionKind::Reserved,
        EntryType::ACPI_RECLAIMABLE => MemoryRegionKind::AcpiReclaimable,
        EntryType::ACPI_NVS => MemoryRegionKind::AcpiNvs,
        EntryType::BAD_MEMORY => MemoryRegionKind::BadMemory,
        EntryType::BOOTLOADER_RECLAIMABLE => MemoryRegionKind::BootloaderReclaimable,
        EntryType::EXECUTABLE_AND_MODULES => MemoryRegionKind::KernelAndModules,
        EntryType::FRAMEBUFFER => MemoryRegionKind::Framebuffer,
        _ => MemoryRegionKind::Other,
    }
}

fn fill_regions<'a>(
    slots: &'a mut [MemoryRegion],
    entries: &[&Entry],
    kernel_base: u64,
) -> &'a [MemoryRegion] {
    let regions = entries
        .iter()
        .map(|entry| MemoryRegion::new(entry.base, entry.length, region_kind(entry.entry_type)));
    let kept = retain_into(regions, kernel_base, slots);

    if kept.len() < entries.len() {
        warn!(
            "Memory map has {} entries, kept {} of them",
            entries.len(),
            kept.len()
        );
    }
    kept
}

fn fill_modules<'a>(
    slots: &'a mut [ModuleEntry<'static>],
    files: &'static [&'static File],
) -> &'a [ModuleEntry<'static>] {
    let mut count = 0;
    for file in files {
        let Ok(path) = file.path().to_str() else {
            warn!("Skipping boot module with a non UTF-8 path");
            continue;
        };
        let Some(slot) = slots.get_mut(count) else {
            warn!("More than {MAX_MODULES} boot modules, ignoring {path}");
            continue;
        };

        let length = usize::try_from(file.size()).unwrap_or_default();
        // SAFETY: Limine keeps module memory mapped and untouched for the kernel's lifetime.
        let data = unsafe { core::slice::from_raw_parts(file.addr().cast_const(), length) };
        *slot = ModuleEntry::new(path, data);
        count += 1;
    }
    &slots[..count]
}

/// Report `err` and stop.
fn halt(err: &BootError) -> ! {
    if err.is_fatal() {
        error!("{err}");
    } else {
        error!("{err} (no alternative left)");
    }
    info!("System Halted");
    idle()
}

/// Park the CPU for good.
fn idle() -> ! {
    loop {
        unsafe {
            core::arch::asm!("cli", "hlt", options(nomem, nostack));
        }
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    qemu_trace!("\nKERNEL PANIC: {info}\n");
    idle()
}
