use kernel_font::{FontError, PSF1_HEADER_SIZE, load};
use kernel_info::boot::ModuleEntry;

fn font_bytes(magic: [u8; 2], mode: u8, charsize: u8, glyphs: usize) -> Vec<u8> {
    let mut bytes = vec![magic[0], magic[1], mode, charsize];
    bytes.resize(PSF1_HEADER_SIZE + glyphs * usize::from(charsize), 0);
    bytes
}

#[test]
fn valid_magic_loads_and_glyphs_follow_the_header() {
    let bytes = font_bytes([0x36, 0x04], 0, 16, 256);
    let module = ModuleEntry::new("boot():/fonts/zap-light16.psf", &bytes);

    let font = load(&module).expect("valid PSF1");
    assert_eq!(font.glyph_table_base(), module.base() + 4);
    assert_eq!(font.header().glyph_byte_size, 16);
    assert_eq!(font.header().magic, [0x36, 0x04]);
}

#[test]
fn any_other_magic_is_invalid() {
    for magic in [[0x00, 0x00], [0x04, 0x36], [0x36, 0x05], [0x72, 0xb5]] {
        let bytes = font_bytes(magic, 0, 16, 256);
        let module = ModuleEntry::new("font.psf", &bytes);
        assert_eq!(load(&module).unwrap_err(), FontError::BadMagic(magic));
    }
}

#[test]
fn truncated_glyph_table_is_invalid() {
    let bytes = font_bytes([0x36, 0x04], 0, 16, 100);
    let module = ModuleEntry::new("font.psf", &bytes);
    assert_eq!(
        load(&module).unwrap_err(),
        FontError::Truncated {
            expected: 256 * 16,
            actual: 100 * 16
        }
    );
}

#[test]
fn glyphs_are_indexed_by_character_code() {
    let mut bytes = font_bytes([0x36, 0x04], 0, 8, 256);
    let a = PSF1_HEADER_SIZE + usize::from(b'A') * 8;
    bytes[a..a + 8].copy_from_slice(&[0x10, 0x28, 0x44, 0x82, 0xfe, 0x82, 0x82, 0x00]);
    let module = ModuleEntry::new("font.psf", &bytes);

    let font = load(&module).expect("valid PSF1");
    assert_eq!(font.glyph(b'A'), &[0x10, 0x28, 0x44, 0x82, 0xfe, 0x82, 0x82, 0x00]);
    assert_eq!(font.glyph(b'B'), &[0; 8]);
    assert_eq!(font.glyph(0xff).len(), 8);
}

#[test]
fn five_hundred_twelve_glyph_fonts_need_the_full_table() {
    let bytes = font_bytes([0x36, 0x04], 0x01, 16, 256);
    let module = ModuleEntry::new("font.psf", &bytes);
    assert!(matches!(load(&module), Err(FontError::Truncated { .. })));

    let bytes = font_bytes([0x36, 0x04], 0x01, 16, 512);
    let module = ModuleEntry::new("font.psf", &bytes);
    assert_eq!(load(&module).expect("valid PSF1").header().glyph_count(), 512);
}
