//! # Boot Error Taxonomy

use kernel_bootmem::{BumpError, SelectError};
use kernel_font::FontError;
use kernel_framebuffer::RenderError;
use kernel_info::boot::{BootData, BootInfoError};

/// Everything that can stop the kernel between entry and the idle loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BootError {
    /// No boot module path ends with `name`.
    #[error("Failed to get Font \"{name}\"!")]
    NotFound { name: &'static str },

    #[error("memory map has no usable region")]
    NoUsableMemory,

    #[error("Font Header Invalid: {0}")]
    InvalidFormat(#[from] FontError),

    #[error("the boot environment did not provide the {0}")]
    MissingBootData(BootData),

    #[error("bootloader does not support the requested protocol revision")]
    UnsupportedRevision,

    #[error("boot allocator: {0}")]
    Allocation(#[from] BumpError),

    #[error("framebuffer: {0}")]
    Render(#[from] RenderError),
}

impl BootError {
    /// Whether boot cannot continue.
    ///
    /// Only a missing module is recoverable, and only as long as there is an
    /// alternate path left to try.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

impl From<BootInfoError> for BootError {
    fn from(value: BootInfoError) -> Self {
        match value {
            BootInfoError::Missing(data) => Self::MissingBootData(data),
        }
    }
}

impl From<SelectError> for BootError {
    fn from(value: SelectError) -> Self {
        match value {
            SelectError::NoUsableMemory => Self::NoUsableMemory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_modules_are_recoverable() {
        assert!(!BootError::NotFound { name: "fonts/zap-light16.psf" }.is_fatal());
        assert!(BootError::NoUsableMemory.is_fatal());
        assert!(BootError::UnsupportedRevision.is_fatal());
        assert!(BootError::from(FontError::EmptyGlyphs).is_fatal());
        assert!(BootError::from(BumpError::Uninitialized).is_fatal());
        assert!(BootError::from(RenderError::NullBase).is_fatal());
    }

    #[test]
    fn conversions() {
        assert_eq!(
            BootError::from(BootInfoError::Missing(BootData::Framebuffer)),
            BootError::MissingBootData(BootData::Framebuffer)
        );
        assert_eq!(
            BootError::from(SelectError::NoUsableMemory),
            BootError::NoUsableMemory
        );
        assert_eq!(
            BootError::from(FontError::BadMagic([0, 0])),
            BootError::InvalidFormat(FontError::BadMagic([0, 0]))
        );
    }

    #[test]
    fn diagnostics() {
        assert_eq!(
            BootError::NotFound { name: "fonts/zap-light16.psf" }.to_string(),
            "Failed to get Font \"fonts/zap-light16.psf\"!"
        );
        assert!(
            BootError::from(FontError::BadMagic([0x72, 0xb5]))
                .to_string()
                .starts_with("Font Header Invalid")
        );
    }
}
