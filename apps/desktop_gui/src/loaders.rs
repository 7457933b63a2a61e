//! Synchronous decoding for user-initiated file loads. All loads run on the
//! UI thread; each either completes or fails before the next event.

use anyhow::{bail, Context, Result};

/// Preview thumbnails are bounded to this many display units per side; the
/// original file is kept untouched for export.
pub const THUMBNAIL_MAX_DIM: u32 = 100;

pub struct DecodedThumbnail {
    pub rgba: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// Decodes PNG/JPEG bytes and downscales to at most
/// [`THUMBNAIL_MAX_DIM`]×[`THUMBNAIL_MAX_DIM`], preserving aspect ratio.
pub fn decode_thumbnail(bytes: &[u8]) -> Result<DecodedThumbnail> {
    let decoded = image::load_from_memory(bytes).context("unsupported or corrupt image data")?;
    let rgba = decoded
        .thumbnail(THUMBNAIL_MAX_DIM, THUMBNAIL_MAX_DIM)
        .to_rgba8();
    Ok(DecodedThumbnail {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}

/// Decodes a loaded text file as UTF-8, falling back to Windows-1251. The
/// fallback decode is strict (no replacement characters); if both fail the
/// error propagates to the caller for a user-visible dialog.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }
    match encoding_rs::WINDOWS_1251.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok(text.into_owned()),
        None => bail!("file is neither UTF-8 nor Windows-1251"),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_text, decode_thumbnail};

    #[test]
    fn decodes_utf8_text_verbatim() {
        let content = "  Привет, мир!\nВторая строка.  \n";
        let decoded = decode_text(content.as_bytes()).expect("utf-8");
        // Verbatim load; trimming happens downstream at render time.
        assert_eq!(decoded, content);
    }

    #[test]
    fn falls_back_to_windows_1251() {
        // "Привет" in Windows-1251.
        let bytes = [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        assert_eq!(decode_text(&bytes).expect("cp1251"), "Привет");
    }

    #[test]
    fn reports_text_that_neither_encoding_accepts() {
        // 0x98 is unassigned in Windows-1251 and invalid as UTF-8.
        let err = decode_text(&[0x98]).expect_err("undecodable");
        assert!(err.to_string().contains("Windows-1251"));
    }

    #[test]
    fn thumbnail_is_bounded_to_preview_size() {
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(image::RgbaImage::new(300, 200))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .expect("encode png");

        let thumbnail = decode_thumbnail(&png).expect("decode");
        assert_eq!(thumbnail.width, 100);
        assert!(thumbnail.height <= 100 && thumbnail.height > 0);
        assert_eq!(thumbnail.rgba.len(), thumbnail.width * thumbnail.height * 4);
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(image::RgbaImage::new(40, 30))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .expect("encode png");

        let thumbnail = decode_thumbnail(&png).expect("decode");
        assert_eq!((thumbnail.width, thumbnail.height), (40, 30));
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(decode_thumbnail(b"definitely not a png").is_err());
    }
}
