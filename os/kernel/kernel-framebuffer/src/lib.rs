//! # Kernel Framebuffer
//!
//! Everything between the bootloader's framebuffer report and pixels on screen:
//!
//! * [`descriptor`] turns the raw report into the geometry the kernel draws with
//!   (always 32-bit pixels, scanline length `pitch / 4`).
//! * [`canvas`] writes pixels, lines, rectangles and PSF1 glyphs.
//! * [`console`] lays glyphs out as text and implements [`core::fmt::Write`].
//!
//! Tests and tools can draw into ordinary memory with [`Canvas::over`]:
//!
//! ```rust
//! use kernel_framebuffer::{Canvas, FramebufferDescriptor};
//! use kernel_info::boot::BootFramebufferInfo;
//!
//! let raw = BootFramebufferInfo { address: 0, width: 64, height: 64, pitch: 256, bits_per_pixel: 32 };
//! let desc = FramebufferDescriptor::build(&raw, 1);
//!
//! let mut pixels = vec![0_u32; 64 * 64];
//! let mut canvas = Canvas::over(&mut pixels, &desc).expect("buffer large enough");
//! canvas.draw_hline(0, 50, desc.width / 2, 0xff54_043b).expect("inside");
//! assert_eq!(pixels[50 * 64 + 31], 0xff54_043b);
//! assert_eq!(pixels[50 * 64 + 32], 0);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod canvas;
pub mod console;
pub mod descriptor;

pub use canvas::{Canvas, RenderError};
pub use console::FramebufferConsole;
pub use descriptor::FramebufferDescriptor;
