//! # Pixel Canvas and Glyph Renderer
//!
//! Pixels are 32 bits wide and addressed as `base + x + y * pixels_per_scanline`.
//! All writes are volatile; the framebuffer is device memory.

use crate::descriptor::FramebufferDescriptor;
use core::marker::PhantomData;
use core::ptr::NonNull;
use kernel_font::{GLYPH_WIDTH, LoadedFont};

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("{width}x{height} area at ({x}, {y}) does not fit the framebuffer")]
    OutOfBounds { x: u64, y: u64, width: u64, height: u64 },
    #[error("framebuffer base address is null")]
    NullBase,
    #[error("backing buffer holds {actual} pixels, framebuffer needs {expected}")]
    BufferTooSmall { expected: u64, actual: u64 },
    #[error("scanlines of {stride} pixels cannot hold {width} visible pixels")]
    StrideTooNarrow { width: u64, stride: u64 },
}

/// Mutable access to the pixels of one framebuffer.
#[derive(Debug)]
pub struct Canvas<'fb> {
    pixels: NonNull<u32>,
    width: u64,
    height: u64,
    stride: u64,
    _buffer: PhantomData<&'fb mut [u32]>,
}

impl Canvas<'static> {
    /// Draw directly into the framebuffer the descriptor points at.
    ///
    /// # Errors
    /// [`RenderError::NullBase`] if the descriptor has no base address.
    /// [`RenderError::StrideTooNarrow`] if a scanline is narrower than the visible width,
    /// e.g. for a 24 bpp mode measured in 4-byte pixels.
    ///
    /// # Safety
    /// `desc.base_address` must be mapped, writable, 4-byte aligned and at least
    /// `desc.buffer_size` bytes long, and nothing else may access that memory
    /// while the canvas is alive.
    pub unsafe fn new(desc: &FramebufferDescriptor) -> Result<Self, RenderError> {
        let pixels = NonNull::new(desc.base_address as *mut u32).ok_or(RenderError::NullBase)?;
        Self::from_parts(pixels, desc)
    }
}

impl<'fb> Canvas<'fb> {
    /// Draw into `buffer`, laid out with the descriptor's geometry.
    ///
    /// The descriptor's base address is ignored.
    ///
    /// # Errors
    /// [`RenderError::BufferTooSmall`] if `buffer` holds fewer than
    /// [`FramebufferDescriptor::pixel_count`] pixels, and
    /// [`RenderError::StrideTooNarrow`] as for [`Canvas::new`].
    pub fn over(buffer: &'fb mut [u32], desc: &FramebufferDescriptor) -> Result<Self, RenderError> {
        let actual = buffer.len() as u64;
        let expected = desc.pixel_count();
        if actual < expected {
            return Err(RenderError::BufferTooSmall { expected, actual });
        }
        Self::from_parts(NonNull::from(buffer).cast(), desc)
    }

    /// Every visible pixel must lie within `height` scanlines of `stride` pixels.
    const fn from_parts(
        pixels: NonNull<u32>,
        desc: &FramebufferDescriptor,
    ) -> Result<Self, RenderError> {
        if desc.width > desc.pixels_per_scanline {
            return Err(RenderError::StrideTooNarrow {
                width: desc.width,
                stride: desc.pixels_per_scanline,
            });
        }
        Ok(Self {
            pixels,
            width: desc.width,
            height: desc.height,
            stride: desc.pixels_per_scanline,
            _buffer: PhantomData,
        })
    }

    #[must_use]
    pub const fn width(&self) -> u64 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u64 {
        self.height
    }

    #[must_use]
    pub const fn pixels_per_scanline(&self) -> u64 {
        self.stride
    }

    /// Whether the `width` x `height` rectangle at (`x`, `y`) lies inside the visible area.
    #[must_use]
    pub fn contains(&self, x: u64, y: u64, width: u64, height: u64) -> bool {
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height);
        fits_x && fits_y
    }

    fn check(&self, x: u64, y: u64, width: u64, height: u64) -> Result<(), RenderError> {
        if self.contains(x, y, width, height) {
            Ok(())
        } else {
            Err(RenderError::OutOfBounds {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// # Safety
    /// (`x`, `y`) must be inside the visible area.
    #[allow(clippy::cast_possible_truncation)]
    #[inline]
    unsafe fn write(&mut self, x: u64, y: u64, color: u32) {
        let index = (x + y * self.stride) as usize;
        unsafe { self.pixels.add(index).write_volatile(color) }
    }

    /// Set a single pixel.
    ///
    /// # Errors
    /// [`RenderError::OutOfBounds`] outside the visible area.
    pub fn put_pixel(&mut self, x: u64, y: u64, color: u32) -> Result<(), RenderError> {
        self.check(x, y, 1, 1)?;
        unsafe { self.write(x, y, color) };
        Ok(())
    }

    /// Fill a rectangle with `color`.
    ///
    /// # Errors
    /// [`RenderError::OutOfBounds`] if any part of the rectangle is outside the
    /// visible area; nothing is drawn then.
    pub fn fill_rect(
        &mut self,
        x: u64,
        y: u64,
        width: u64,
        height: u64,
        color: u32,
    ) -> Result<(), RenderError> {
        self.check(x, y, width, height)?;
        for row in y..y + height {
            for column in x..x + width {
                unsafe { self.write(column, row, color) };
            }
        }
        Ok(())
    }

    /// Draw a one pixel high horizontal line of `length` pixels starting at (`x`, `y`).
    ///
    /// # Errors
    /// [`RenderError::OutOfBounds`] if the line leaves the visible area.
    pub fn draw_hline(&mut self, x: u64, y: u64, length: u64, color: u32) -> Result<(), RenderError> {
        self.fill_rect(x, y, length, 1, color)
    }

    /// Paint the whole visible area.
    pub fn clear(&mut self, color: u32) {
        for row in 0..self.height {
            for column in 0..self.width {
                unsafe { self.write(column, row, color) };
            }
        }
    }

    /// Draw glyph `ch` of `font` with its top-left corner at (`x`, `y`).
    ///
    /// Only set bits are painted; the background shows through everywhere else.
    ///
    /// # Errors
    /// [`RenderError::OutOfBounds`] if the 8 x `font.height()` cell does not fit;
    /// nothing is drawn then.
    pub fn draw_glyph(
        &mut self,
        font: &LoadedFont<'_>,
        color: u32,
        ch: u8,
        x: u64,
        y: u64,
    ) -> Result<(), RenderError> {
        self.check(x, y, u64::from(GLYPH_WIDTH), u64::from(font.height()))?;
        unsafe { self.draw_glyph_unchecked(font, color, ch, x, y) };
        Ok(())
    }

    /// [`draw_glyph`](Self::draw_glyph) without the bounds check.
    ///
    /// # Safety
    /// `x + 8 <= width` and `y + font.height() <= height` must hold.
    pub unsafe fn draw_glyph_unchecked(
        &mut self,
        font: &LoadedFont<'_>,
        color: u32,
        ch: u8,
        x: u64,
        y: u64,
    ) {
        for (row, bits) in (y..).zip(font.glyph(ch)) {
            for column in 0..GLYPH_WIDTH {
                if bits & (0x80_u8 >> column) != 0 {
                    unsafe { self.write(x + u64::from(column), row, color) };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_font::{PSF1_HEADER_SIZE, PSF1_MAGIC};

    const WIDTH: u64 = 32;
    const HEIGHT: u64 = 24;
    const STRIDE: u64 = 40;

    fn descriptor() -> FramebufferDescriptor {
        FramebufferDescriptor {
            base_address: 0,
            width: WIDTH,
            height: HEIGHT,
            pixels_per_scanline: STRIDE,
            bytes_per_pixel: 4,
            buffer_size: HEIGHT * STRIDE * 4,
            buffer_count: 1,
        }
    }

    fn buffer() -> Vec<u32> {
        vec![0; (STRIDE * HEIGHT) as usize]
    }

    fn font_with(ch: u8, rows: &[u8]) -> Vec<u8> {
        let mut bytes = vec![PSF1_MAGIC[0], PSF1_MAGIC[1], 0, 16];
        bytes.resize(PSF1_HEADER_SIZE + 256 * 16, 0);
        let start = PSF1_HEADER_SIZE + usize::from(ch) * 16;
        bytes[start..start + rows.len()].copy_from_slice(rows);
        bytes
    }

    fn set_pixels(buf: &[u32]) -> Vec<(u64, u64)> {
        buf.iter()
            .enumerate()
            .filter(|&(_, &p)| p != 0)
            .map(|(i, _)| (i as u64 % STRIDE, i as u64 / STRIDE))
            .collect()
    }

    #[test]
    fn glyph_row_bit_four_sets_column_three() {
        let bytes = font_with(b'A', &[0b0001_0000]);
        let font = LoadedFont::from_bytes(&bytes).expect("valid font");
        let mut buf = buffer();

        let mut canvas = Canvas::over(&mut buf, &descriptor()).expect("buffer fits");
        canvas.draw_glyph(&font, 0xff00_ff00, b'A', 0, 0).expect("glyph fits");

        assert_eq!(set_pixels(&buf), vec![(3, 0)]);
    }

    #[test]
    fn leftmost_pixel_is_bit_seven() {
        let bytes = font_with(b'x', &[0b1000_0000, 0b0000_0001]);
        let font = LoadedFont::from_bytes(&bytes).expect("valid font");
        let mut buf = buffer();

        let mut canvas = Canvas::over(&mut buf, &descriptor()).expect("buffer fits");
        canvas.draw_glyph(&font, 7, b'x', 10, 3).expect("glyph fits");

        assert_eq!(set_pixels(&buf), vec![(10, 3), (17, 4)]);
        assert_eq!(buf[(10 + 3 * STRIDE) as usize], 7);
    }

    #[test]
    fn clear_bits_leave_the_background_untouched() {
        let bytes = font_with(b'#', &[0xf0; 16]);
        let font = LoadedFont::from_bytes(&bytes).expect("valid font");
        let mut buf = vec![0xdead_beef; (STRIDE * HEIGHT) as usize];

        let mut canvas = Canvas::over(&mut buf, &descriptor()).expect("buffer fits");
        canvas.draw_glyph(&font, 1, b'#', 0, 0).expect("glyph fits");

        for row in 0..16 {
            for column in 0..8 {
                let expected = if column < 4 { 1 } else { 0xdead_beef };
                assert_eq!(buf[(column + row * STRIDE) as usize], expected);
            }
        }
    }

    #[test]
    fn glyph_outside_the_visible_area_is_rejected() {
        let bytes = font_with(b'A', &[0xff; 16]);
        let font = LoadedFont::from_bytes(&bytes).expect("valid font");
        let mut buf = buffer();

        let mut canvas = Canvas::over(&mut buf, &descriptor()).expect("buffer fits");
        assert_eq!(
            canvas.draw_glyph(&font, 1, b'A', WIDTH - 7, 0),
            Err(RenderError::OutOfBounds {
                x: WIDTH - 7,
                y: 0,
                width: 8,
                height: 16
            })
        );
        assert!(canvas.draw_glyph(&font, 1, b'A', 0, HEIGHT - 15).is_err());
        assert!(canvas.draw_glyph(&font, 1, b'A', WIDTH - 8, HEIGHT - 16).is_ok());

        let drawn = set_pixels(&buf);
        assert_eq!(drawn.len(), 8 * 16);
        assert!(drawn.iter().all(|&(x, y)| x >= WIDTH - 8 && y >= HEIGHT - 16));
    }

    #[test]
    fn hline_and_padding() {
        let mut buf = buffer();
        let mut canvas = Canvas::over(&mut buf, &descriptor()).expect("buffer fits");
        canvas.draw_hline(0, 5, WIDTH / 2, 0xff54_043b).expect("line fits");
        assert!(canvas.draw_hline(0, HEIGHT, 1, 1).is_err());
        assert!(canvas.draw_hline(1, 0, WIDTH, 1).is_err());

        let drawn = set_pixels(&buf);
        assert_eq!(drawn, (0..WIDTH / 2).map(|x| (x, 5)).collect::<Vec<_>>());
    }

    #[test]
    fn clear_paints_visible_pixels_only() {
        let mut buf = buffer();
        let mut canvas = Canvas::over(&mut buf, &descriptor()).expect("buffer fits");
        canvas.clear(9);

        for (i, &p) in buf.iter().enumerate() {
            let visible = (i as u64 % STRIDE) < WIDTH;
            assert_eq!(p, if visible { 9 } else { 0 });
        }
    }

    #[test]
    fn put_pixel_and_fill_rect() {
        let mut buf = buffer();
        let mut canvas = Canvas::over(&mut buf, &descriptor()).expect("buffer fits");
        canvas.put_pixel(WIDTH - 1, HEIGHT - 1, 3).expect("inside");
        assert!(canvas.put_pixel(WIDTH, 0, 3).is_err());
        canvas.fill_rect(2, 2, 2, 2, 4).expect("inside");

        assert_eq!(
            set_pixels(&buf),
            vec![(2, 2), (3, 2), (2, 3), (3, 3), (WIDTH - 1, HEIGHT - 1)]
        );
    }

    #[test]
    fn small_buffers_are_rejected() {
        let mut buf = vec![0; 10];
        assert_eq!(
            Canvas::over(&mut buf, &descriptor()).unwrap_err(),
            RenderError::BufferTooSmall {
                expected: STRIDE * HEIGHT,
                actual: 10
            }
        );
    }

    #[test]
    fn narrow_stride_is_rejected_by_both_constructors() {
        // 24 bpp, pitch 24 bytes: six 4-byte pixels per scanline for an 8 pixel wide mode.
        let desc = FramebufferDescriptor {
            width: 8,
            height: 4,
            pixels_per_scanline: 6,
            bytes_per_pixel: 4,
            buffer_size: 4 * 24,
            ..descriptor()
        };
        let narrow = RenderError::StrideTooNarrow { width: 8, stride: 6 };

        let mut buf = vec![0_u32; 24 + 16];
        let desc = FramebufferDescriptor {
            base_address: buf.as_mut_ptr() as u64,
            ..desc
        };
        assert_eq!(unsafe { Canvas::new(&desc) }.unwrap_err(), narrow);
        assert_eq!(Canvas::over(&mut buf, &desc).unwrap_err(), narrow);
        assert!(buf.iter().all(|&p| p == 0));
    }

    #[test]
    fn null_framebuffer_is_rejected() {
        let desc = descriptor();
        assert_eq!(unsafe { Canvas::new(&desc) }.unwrap_err(), RenderError::NullBase);
    }
}
