//! # Framebuffer Descriptor
//!
//! The kernel draws with 32-bit pixels no matter what depth the bootloader
//! reports, so the scanline length in pixels is always `pitch / 4`.

use core::fmt;
use kernel_info::boot::BootFramebufferInfo;
use kernel_info::config::FORCED_BYTES_PER_PIXEL;
use log::warn;

/// Geometry of the linear framebuffer as the kernel uses it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FramebufferDescriptor {
    /// Address of pixel (0, 0).
    pub base_address: u64,

    /// Visible width in pixels.
    pub width: u64,

    /// Visible height in pixels.
    pub height: u64,

    /// Pixels per scanline, including padding past `width`.
    pub pixels_per_scanline: u64,

    /// Always [`FORCED_BYTES_PER_PIXEL`].
    pub bytes_per_pixel: u64,

    /// `height * pitch` in bytes.
    pub buffer_size: u64,

    /// Number of framebuffers the bootloader reported.
    pub buffer_count: u64,
}

impl FramebufferDescriptor {
    /// Derive the descriptor from the raw bootloader report.
    ///
    /// The reported bits per pixel are ignored; a mismatch is logged.
    #[must_use]
    pub fn build(raw: &BootFramebufferInfo, buffer_count: u64) -> Self {
        if u64::from(raw.bits_per_pixel) != FORCED_BYTES_PER_PIXEL * 8 {
            warn!(
                "Framebuffer reports {} bpp, drawing with {} bytes per pixel anyway",
                raw.bits_per_pixel, FORCED_BYTES_PER_PIXEL
            );
        }

        Self {
            base_address: raw.address,
            width: raw.width,
            height: raw.height,
            pixels_per_scanline: raw.pitch / FORCED_BYTES_PER_PIXEL,
            bytes_per_pixel: FORCED_BYTES_PER_PIXEL,
            buffer_size: raw.height.saturating_mul(raw.pitch),
            buffer_count,
        }
    }

    /// Bytes per scanline as used for drawing.
    #[must_use]
    pub const fn pitch(&self) -> u64 {
        self.pixels_per_scanline * self.bytes_per_pixel
    }

    /// Number of 32-bit pixels in the buffer, padding included.
    #[must_use]
    pub const fn pixel_count(&self) -> u64 {
        self.pixels_per_scanline.saturating_mul(self.height)
    }
}

impl fmt::Display for FramebufferDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Address: {:#x}, Width: {}, Height: {}, PPSL: {}, Framebuffer Count: {}, BPP: {}",
            self.base_address,
            self.width,
            self.height,
            self.pixels_per_scanline,
            self.buffer_count,
            self.bytes_per_pixel
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(width: u64, height: u64, pitch: u64, bpp: u16) -> BootFramebufferInfo {
        BootFramebufferInfo {
            address: 0xfd00_0000,
            width,
            height,
            pitch,
            bits_per_pixel: bpp,
        }
    }

    #[test]
    fn scanline_is_pitch_over_four() {
        let desc = FramebufferDescriptor::build(&raw(960, 540, 3840, 32), 1);
        assert_eq!(desc.pixels_per_scanline, 960);
        assert_eq!(desc.bytes_per_pixel, 4);
        assert_eq!(desc.buffer_size, 540 * 3840);
        assert_eq!(desc.buffer_count, 1);
        assert_eq!(desc.base_address, 0xfd00_0000);
    }

    #[test]
    fn reported_depth_is_ignored() {
        let desc = FramebufferDescriptor::build(&raw(800, 600, 2400, 24), 2);
        assert_eq!(desc.bytes_per_pixel, 4);
        assert_eq!(desc.pixels_per_scanline, 600);
        assert_eq!(desc.buffer_size, 600 * 2400);
        assert_eq!(desc.buffer_count, 2);
    }

    #[test]
    fn padded_scanlines() {
        let desc = FramebufferDescriptor::build(&raw(1000, 10, 4096, 32), 1);
        assert_eq!(desc.width, 1000);
        assert_eq!(desc.pixels_per_scanline, 1024);
        assert_eq!(desc.pitch(), 4096);
        assert_eq!(desc.pixel_count(), 10 * 1024);
    }

    #[test]
    fn display_lists_every_field() {
        let desc = FramebufferDescriptor::build(&raw(960, 540, 3840, 32), 1);
        assert_eq!(
            desc.to_string(),
            "Address: 0xfd000000, Width: 960, Height: 540, PPSL: 960, Framebuffer Count: 1, BPP: 4"
        );
    }
}
