//! # Kernel Tracing helpers

use kernel_bootmem::{MemoryMapSummary, Selection};
use kernel_framebuffer::FramebufferDescriptor;
use kernel_info::boot::KernelBootInfo;
use kernel_modules::ModuleList;
use log::{debug, info, trace};

pub fn trace_boot_info(boot_info: &KernelBootInfo<'_>) {
    let summary = MemoryMapSummary::of(boot_info.memory_map);
    info!(
        concat!(
            "Boot Info in Kernel:\n",
            "  MMAP     = {regions} regions, {total} KiB total, {usable} KiB usable, {reclaimable} KiB reclaimable\n",
            "  Modules  = {modules}\n",
            "  FB ptr   = {fb_ptr:#018x}, width = {fb_width}, height = {fb_height}, pitch = {fb_pitch}, bpp = {fb_bpp}, count = {fb_count}\n",
            "  Kernel   = {kernel:#018x}"
        ),
        regions = summary.regions,
        total = summary.total_bytes / 1024,
        usable = summary.usable_bytes / 1024,
        reclaimable = summary.reclaimable_bytes / 1024,
        modules = boot_info.modules.len(),
        fb_ptr = boot_info.framebuffer.address,
        fb_width = boot_info.framebuffer.width,
        fb_height = boot_info.framebuffer.height,
        fb_pitch = boot_info.framebuffer.pitch,
        fb_bpp = boot_info.framebuffer.bits_per_pixel,
        fb_count = boot_info.framebuffer_count,
        kernel = boot_info.kernel_base,
    );

    for region in boot_info.memory_map {
        trace!("  {region}");
    }
}

pub fn trace_modules(modules: &ModuleList<'_>) {
    for (index, module) in modules.iter().enumerate() {
        debug!(
            "Module[{index}]: {path} at {base:#018x}, {length} bytes",
            path = module.path(),
            base = module.base(),
            length = module.length()
        );
    }
}

pub fn trace_selection(selection: &Selection) {
    info!(
        "Boot arena: {arena}; kernel footprint {length:#x} bytes at {base:#018x}",
        arena = selection.arena,
        length = selection.kernel.length,
        base = selection.kernel.base
    );
}

pub fn trace_framebuffer(fb: &FramebufferDescriptor) {
    info!(
        concat!(
            "Framebuffer Info:\n",
            "  Address: {address:#x}\n",
            "  Width: {width}\n",
            "  Height: {height}\n",
            "  PPSL: {ppsl}\n",
            "  Framebuffer Count: {count}\n",
            "  BPP: {bpp}"
        ),
        address = fb.base_address,
        width = fb.width,
        height = fb.height,
        ppsl = fb.pixels_per_scanline,
        count = fb.buffer_count,
        bpp = fb.bytes_per_pixel,
    );
}
