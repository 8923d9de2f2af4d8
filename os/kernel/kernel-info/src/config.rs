//! # Early Boot Configuration

/// Candidate module paths of the console font, tried in order.
///
/// Matching is by path suffix, so the bootloader's path prefix
/// (e.g. `boot():/`) does not need to be spelled out.
pub const FONT_PATHS: &[&str] = &["fonts/zap-light16.psf", "zap-light16.psf"];

/// Kernel footprint length assumed when no memory map entry starts at the kernel base.
pub const KERNEL_FOOTPRINT_FALLBACK: u64 = 1;

/// Bytes per pixel the kernel draws with, regardless of what the bootloader reports.
pub const FORCED_BYTES_PER_PIXEL: u64 = 4;

/// Banner printed first on every boot.
pub const BANNER: &str = "Blackrock";

/// Default text color (opaque white).
pub const FOREGROUND: u32 = 0xffff_ffff;

/// Background color used when the console clears the screen.
pub const BACKGROUND: u32 = 0xff00_0000;

/// Accent color of the boot status line.
pub const ACCENT: u32 = 0xff54_043b;

/// Scanline the boot status line is drawn at.
pub const ACCENT_LINE_Y: u64 = 50;

const _: () = {
    assert!(!FONT_PATHS.is_empty());
    assert!(FORCED_BYTES_PER_PIXEL == 4);
    assert!(KERNEL_FOOTPRINT_FALLBACK > 0);
};
