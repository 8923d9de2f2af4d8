//! # PC Screen Font, version 1
//!
//! ```text
//! offset  size            field
//! 0       2               magic (0x36 0x04)
//! 2       1               mode flags
//! 3       1               charsize: bytes per glyph == rows per glyph
//! 4       N * charsize    glyph bitmaps, N = 512 if mode & 1 else 256
//! ```
//!
//! Every glyph is 8 pixels wide; each byte is one row, bit 7 is the leftmost pixel.

use bitfield_struct::bitfield;
use kernel_info::boot::ModuleEntry;
use log::debug;

/// Signature at the start of every PSF1 file.
pub const PSF1_MAGIC: [u8; 2] = [0x36, 0x04];

/// Size of the on-disk header in bytes.
pub const PSF1_HEADER_SIZE: usize = 4;

/// Width of every PSF1 glyph in pixels.
pub const GLYPH_WIDTH: u32 = 8;

/// The PSF1 `mode` byte.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Psf1Mode {
    /// Bit 0: the font has 512 glyphs instead of 256.
    pub has_512_glyphs: bool,
    /// Bit 1: a unicode table follows the glyphs.
    pub has_unicode_table: bool,
    /// Bit 2: the unicode table contains sequences.
    pub has_sequences: bool,
    #[bits(5)]
    __: u8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FontError {
    #[error("font resource is {length} bytes, shorter than the PSF1 header")]
    TooShort { length: usize },
    #[error("magic {0:02x?} is not PSF1")]
    BadMagic([u8; 2]),
    #[error("font declares zero-height glyphs")]
    EmptyGlyphs,
    #[error("glyph table truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Psf1Header {
    pub magic: [u8; 2],
    pub mode: Psf1Mode,
    /// Bytes per glyph; identical to the glyph height in rows.
    pub glyph_byte_size: u8,
}

impl Psf1Header {
    /// Parse and validate the header at the start of `bytes`.
    ///
    /// # Errors
    /// [`FontError::TooShort`] or [`FontError::BadMagic`].
    pub fn parse(bytes: &[u8]) -> Result<Self, FontError> {
        let &[m0, m1, mode, glyph_byte_size, ..] = bytes else {
            return Err(FontError::TooShort {
                length: bytes.len(),
            });
        };

        let magic = [m0, m1];
        if magic != PSF1_MAGIC {
            return Err(FontError::BadMagic(magic));
        }

        Ok(Self {
            magic,
            mode: Psf1Mode::from_bits(mode),
            glyph_byte_size,
        })
    }

    /// Number of glyphs in the table.
    #[must_use]
    pub const fn glyph_count(&self) -> usize {
        if self.mode.has_512_glyphs() { 512 } else { 256 }
    }

    /// Size of the glyph table in bytes.
    #[must_use]
    pub const fn glyph_table_size(&self) -> usize {
        self.glyph_count() * self.glyph_byte_size as usize
    }
}

/// A validated PSF1 font borrowed from its resource.
#[derive(Debug, Copy, Clone)]
pub struct LoadedFont<'a> {
    header: Psf1Header,
    glyphs: &'a [u8],
}

impl<'a> LoadedFont<'a> {
    /// Wrap the raw contents of a PSF1 file.
    ///
    /// # Errors
    /// Any [`FontError`]; all of them mean the resource is not a usable PSF1 font.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, FontError> {
        let header = Psf1Header::parse(bytes)?;
        if header.glyph_byte_size == 0 {
            return Err(FontError::EmptyGlyphs);
        }

        let glyphs = &bytes[PSF1_HEADER_SIZE..];
        let expected = header.glyph_table_size();
        if glyphs.len() < expected {
            return Err(FontError::Truncated {
                expected,
                actual: glyphs.len(),
            });
        }

        Ok(Self { header, glyphs })
    }

    #[must_use]
    pub const fn header(&self) -> &Psf1Header {
        &self.header
    }

    /// Address of the first glyph byte, i.e. the resource base plus the header size.
    #[must_use]
    pub fn glyph_table_base(&self) -> u64 {
        self.glyphs.as_ptr() as u64
    }

    /// Glyph width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        GLYPH_WIDTH
    }

    /// Glyph height in pixels (rows).
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.header.glyph_byte_size as u32
    }

    /// The rows of the glyph for character code `ch`, top to bottom.
    #[must_use]
    pub fn glyph(&self, ch: u8) -> &'a [u8] {
        let size = usize::from(self.header.glyph_byte_size);
        let start = usize::from(ch) * size;
        self.glyphs.get(start..start + size).unwrap_or_default()
    }
}

/// Load the PSF1 font contained in a boot module.
///
/// # Errors
/// Any [`FontError`]; the caller treats all of them as an invalid font format.
pub fn load<'a>(resource: &ModuleEntry<'a>) -> Result<LoadedFont<'a>, FontError> {
    let font = LoadedFont::from_bytes(resource.data())?;
    debug!(
        "Loaded PSF1 font {path}: {count} glyphs of 8x{height}, mode {mode:#04x}",
        path = resource.path(),
        count = font.header.glyph_count(),
        height = font.height(),
        mode = font.header.mode.into_bits(),
    );
    Ok(font)
}
