//! # Kernel Bitmap Fonts
//!
//! Validation and glyph lookup for the console font the bootloader stages as a
//! module. Only PSF1 ([`psf1`]) is supported: 8 pixel wide glyphs, one byte per
//! row, 256 or 512 glyphs.
//!
//! The font is never copied. [`LoadedFont`] borrows the module memory, which the
//! bootloader leaves in place for the lifetime of the kernel.
//!
//! ```rust
//! use kernel_font::{LoadedFont, PSF1_MAGIC};
//!
//! let mut bytes = vec![PSF1_MAGIC[0], PSF1_MAGIC[1], 0x00, 16];
//! bytes.resize(4 + 256 * 16, 0);
//! bytes[4 + usize::from(b'A') * 16] = 0b0001_1000;
//!
//! let font = LoadedFont::from_bytes(&bytes).expect("valid PSF1");
//! assert_eq!(font.height(), 16);
//! assert_eq!(font.glyph(b'A')[0], 0b0001_1000);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod psf1;

pub use psf1::{
    FontError, GLYPH_WIDTH, LoadedFont, PSF1_HEADER_SIZE, PSF1_MAGIC, Psf1Header, Psf1Mode, load,
};
