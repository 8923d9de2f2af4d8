//! # Boot Pipeline
//!
//! ```text
//! KernelBootInfo ─► select ─► BumpAllocator::init ─► FramebufferDescriptor::build
//!                                                            │
//!        present ◄── kernel_font::load ◄── ModuleList::find_any(FONT_PATHS)
//! ```
//!
//! Every step either succeeds or returns a [`BootError`]; the entry point
//! decides what to do with it.

use crate::error::BootError;
use crate::tracing::{trace_boot_info, trace_framebuffer, trace_modules, trace_selection};
use kernel_bootmem::{BumpAllocator, Selection, select};
use kernel_font::LoadedFont;
use kernel_framebuffer::{Canvas, FramebufferConsole, FramebufferDescriptor};
use kernel_info::boot::KernelBootInfo;
use kernel_info::config::{ACCENT, ACCENT_LINE_Y, BACKGROUND, BANNER, FONT_PATHS, FOREGROUND};
use kernel_modules::{LocateError, ModuleList};
use log::info;

/// Blank scanlines between the accent line and the first line of text.
const TEXT_MARGIN: u64 = 8;

/// Printed once the boot pipeline has nothing left to do.
const HALT_TEXT: &str = "Font Loaded\n\nSystem Halted";

/// What the boot pipeline established, handed on to everything after it.
#[derive(Debug)]
pub struct BootContext<'a> {
    /// The free-memory arena and the kernel footprint.
    pub selection: Selection,

    /// Seeded with [`Selection::arena`].
    pub allocator: BumpAllocator,

    pub framebuffer: FramebufferDescriptor,

    /// The console font.
    pub font: LoadedFont<'a>,

    /// The font path that matched.
    pub font_path: &'static str,
}

/// Run the boot pipeline up to a loaded console font.
///
/// # Errors
/// The first [`BootError`] any stage reports. A missing font is reported as
/// [`BootError::NotFound`] with the preferred path, after every entry of
/// [`FONT_PATHS`] was tried.
pub fn initialize<'a>(boot_info: &KernelBootInfo<'a>) -> Result<BootContext<'a>, BootError> {
    trace_boot_info(boot_info);

    let selection = select(boot_info.memory_map, boot_info.kernel_base)?;
    trace_selection(&selection);

    let mut allocator = BumpAllocator::new();
    allocator.init(selection.arena)?;

    info!("Initialising Framebuffer...");
    let framebuffer =
        FramebufferDescriptor::build(&boot_info.framebuffer, boot_info.framebuffer_count);
    info!("Framebuffer Initialised");
    trace_framebuffer(&framebuffer);

    let modules = ModuleList::new(boot_info.modules);
    trace_modules(&modules);

    let (font_path, module) = modules.find_any(FONT_PATHS).map_err(|LocateError::NotFound| {
        BootError::NotFound {
            name: FONT_PATHS.first().copied().unwrap_or_default(),
        }
    })?;

    let font = kernel_font::load(module)?;
    info!("Font Loaded from {}", module.path());

    Ok(BootContext {
        selection,
        allocator,
        framebuffer,
        font,
        font_path,
    })
}

/// Draw the boot screen: the accent line across the left half of the screen
/// at [`ACCENT_LINE_Y`], then the banner on a console below it.
///
/// Returns the console so later stages can keep printing.
///
/// # Errors
/// [`BootError::Render`] if the framebuffer is too small for the layout.
pub fn present<'fb, 'f>(
    context: &BootContext<'f>,
    mut canvas: Canvas<'fb>,
) -> Result<FramebufferConsole<'fb, 'f>, BootError> {
    let length = canvas.width() / 2;
    canvas.draw_hline(0, ACCENT_LINE_Y, length, ACCENT)?;

    let mut console = FramebufferConsole::below(
        canvas,
        context.font,
        FOREGROUND,
        BACKGROUND,
        ACCENT_LINE_Y + 1 + TEXT_MARGIN,
    );

    console.write_text(BANNER)?;
    console.write_text("\n\n")?;
    info!("{BANNER}");

    Ok(console)
}

/// Print the closing lines of the boot screen below the banner.
///
/// # Errors
/// [`BootError::Render`] if the console has no room for the text.
pub fn finish(console: &mut FramebufferConsole<'_, '_>) -> Result<(), BootError> {
    console.write_text(HALT_TEXT)?;
    info!("System Halted");
    Ok(())
}
