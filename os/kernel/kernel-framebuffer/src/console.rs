//! # Framebuffer Text Console
//!
//! A fixed grid of 8 x `font.height()` cells below an optional top margin.
//! Text that runs past the last row wraps to the first row after the text area
//! has been cleared.

use crate::canvas::{Canvas, RenderError};
use core::fmt;
use kernel_font::{GLYPH_WIDTH, LoadedFont};

/// Columns a tab advances to a multiple of.
const TAB_WIDTH: u64 = 4;

/// Printed for characters the font cannot represent.
const REPLACEMENT: u8 = b'?';

pub struct FramebufferConsole<'fb, 'f> {
    canvas: Canvas<'fb>,
    font: LoadedFont<'f>,
    foreground: u32,
    background: u32,
    top: u64,
    columns: u64,
    rows: u64,
    column: u64,
    row: u64,
}

impl<'fb, 'f> FramebufferConsole<'fb, 'f> {
    /// Create a console covering the whole canvas.
    #[must_use]
    pub fn new(canvas: Canvas<'fb>, font: LoadedFont<'f>, foreground: u32, background: u32) -> Self {
        Self::below(canvas, font, foreground, background, 0)
    }

    /// Create a console whose first text row starts at scanline `top`.
    #[must_use]
    pub fn below(
        canvas: Canvas<'fb>,
        font: LoadedFont<'f>,
        foreground: u32,
        background: u32,
        top: u64,
    ) -> Self {
        let top = top.min(canvas.height());
        let columns = canvas.width() / u64::from(GLYPH_WIDTH);
        let rows = (canvas.height() - top) / u64::from(font.height());
        Self {
            canvas,
            font,
            foreground,
            background,
            top,
            columns,
            rows,
            column: 0,
            row: 0,
        }
    }

    /// Text grid size as (columns, rows).
    #[must_use]
    pub const fn size(&self) -> (u64, u64) {
        (self.columns, self.rows)
    }

    /// Cursor position as (column, row).
    #[must_use]
    pub const fn cursor(&self) -> (u64, u64) {
        (self.column, self.row)
    }

    pub const fn set_foreground(&mut self, color: u32) {
        self.foreground = color;
    }

    /// Direct pixel access, e.g. for drawing decorations around the text.
    pub const fn canvas_mut(&mut self) -> &mut Canvas<'fb> {
        &mut self.canvas
    }

    /// Give the canvas back.
    #[must_use]
    pub fn into_canvas(self) -> Canvas<'fb> {
        self.canvas
    }

    /// Paint the text area with the background color and home the cursor.
    ///
    /// # Errors
    /// Only if the text area does not fit the canvas, which [`below`](Self::below) rules out.
    pub fn clear(&mut self) -> Result<(), RenderError> {
        let height = self.rows * u64::from(self.font.height());
        self.canvas
            .fill_rect(0, self.top, self.canvas.width(), height, self.background)?;
        self.column = 0;
        self.row = 0;
        Ok(())
    }

    fn newline(&mut self) -> Result<(), RenderError> {
        self.column = 0;
        self.row += 1;
        if self.row >= self.rows {
            self.clear()?;
        }
        Ok(())
    }

    /// Print one byte of the font's character set at the cursor.
    ///
    /// # Errors
    /// [`RenderError::OutOfBounds`] if the canvas is too small for a single cell.
    pub fn put_byte(&mut self, byte: u8) -> Result<(), RenderError> {
        let x = self.column * u64::from(GLYPH_WIDTH);
        let y = self.top + self.row * u64::from(self.font.height());
        self.canvas
            .draw_glyph(&self.font, self.foreground, byte, x, y)?;

        self.column += 1;
        if self.column >= self.columns {
            self.newline()?;
        }
        Ok(())
    }

    /// Print `text` at the cursor, handling `\n`, `\r` and `\t`.
    ///
    /// Characters outside ASCII print as `?`; other control characters are dropped.
    ///
    /// # Errors
    /// As [`put_byte`](Self::put_byte). Text before the failing character stays on screen.
    pub fn write_text(&mut self, text: &str) -> Result<(), RenderError> {
        text.chars().try_for_each(|ch| self.put_char(ch))
    }

    fn put_char(&mut self, ch: char) -> Result<(), RenderError> {
        match ch {
            '\n' => self.newline(),
            '\r' => {
                self.column = 0;
                Ok(())
            }
            '\t' => {
                let stop = (self.column / TAB_WIDTH + 1) * TAB_WIDTH;
                for _ in self.column..stop.min(self.columns) {
                    self.put_byte(b' ')?;
                }
                Ok(())
            }
            c if c.is_ascii_control() => Ok(()),
            c => self.put_byte(
                u8::try_from(c)
                    .ok()
                    .filter(u8::is_ascii)
                    .unwrap_or(REPLACEMENT),
            ),
        }
    }
}

impl fmt::Write for FramebufferConsole<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s).map_err(|_| fmt::Error)
    }
}

impl fmt::Debug for FramebufferConsole<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramebufferConsole")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("column", &self.column)
            .field("row", &self.row)
            .finish_non_exhaustive()
    }
}
