//! # Boot Module Lookup
//!
//! Locates files the bootloader staged into memory next to the kernel.
//! Modules are looked up by **path suffix**, so callers can ask for
//! `fonts/zap-light16.psf` without knowing whether the bootloader reports it as
//! `boot():/fonts/zap-light16.psf` or `/boot/fonts/zap-light16.psf`.

#![cfg_attr(not(any(test, doctest)), no_std)]

use kernel_info::boot::ModuleEntry;
use log::debug;

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum LocateError {
    #[error("no boot module matches the requested path")]
    NotFound,
}

/// Whether `path` ends with `name`.
///
/// Both strings are compared from their ends; a `name` longer than `path`
/// never matches.
#[inline]
#[must_use]
pub fn path_ends_with(path: &str, name: &str) -> bool {
    path.as_bytes().ends_with(name.as_bytes())
}

/// Borrowed view over the bootloader's module list.
#[derive(Debug, Copy, Clone)]
pub struct ModuleList<'a> {
    modules: &'a [ModuleEntry<'a>],
}

impl<'a> ModuleList<'a> {
    #[must_use]
    pub const fn new(modules: &'a [ModuleEntry<'a>]) -> Self {
        Self { modules }
    }

    /// Number of modules.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate in the order the bootloader reported the modules.
    pub fn iter(&self) -> core::slice::Iter<'a, ModuleEntry<'a>> {
        self.modules.iter()
    }

    /// Find the first module whose path ends with `name`.
    ///
    /// # Errors
    /// [`LocateError::NotFound`] if no module matches (including an empty list).
    pub fn find(&self, name: &str) -> Result<&'a ModuleEntry<'a>, LocateError> {
        self.modules
            .iter()
            .find(|m| path_ends_with(m.path(), name))
            .ok_or(LocateError::NotFound)
    }

    /// Try each of `names` in turn and return the first hit together with the
    /// name that matched.
    ///
    /// # Errors
    /// [`LocateError::NotFound`] if none of the names matches any module.
    pub fn find_any<'n>(
        &self,
        names: &[&'n str],
    ) -> Result<(&'n str, &'a ModuleEntry<'a>), LocateError> {
        for &name in names {
            match self.find(name) {
                Ok(module) => return Ok((name, module)),
                Err(LocateError::NotFound) => debug!("No boot module matches {name:?}"),
            }
        }
        Err(LocateError::NotFound)
    }
}

impl<'a> IntoIterator for &ModuleList<'a> {
    type Item = &'a ModuleEntry<'a>;
    type IntoIter = core::slice::Iter<'a, ModuleEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
