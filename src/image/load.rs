//! Loading local images: read, hash, decode.

use std::fs;
use std::path::Path;

use image::ImageFormat;

use super::{ImageRecord, LocalFacts};
use crate::error::SheetError;

/// Read `dir/filename` and build its local record.
///
/// Any decode failure aborts: the CSS references the file by name, so it
/// cannot simply be left out.
pub fn load_local_image(
    dir: &Path,
    filename: &str,
    usage_count: usize,
) -> Result<ImageRecord, SheetError> {
    let path = dir.join(filename);
    let bytes = fs::read(&path).map_err(|err| SheetError::read("the local image", &path, err))?;

    let invalid = |source| SheetError::InvalidImage {
        name: filename.to_string(),
        source,
    };
    let format = image::guess_format(&bytes).map_err(invalid)?;
    let decoded = image::load_from_memory_with_format(&bytes, format).map_err(invalid)?;

    let facts = LocalFacts {
        file_size: bytes.len() as u64,
        width: decoded.width(),
        height: decoded.height(),
        format: format_name(format),
        usage_count,
        is_new: false,
        path,
    };

    Ok(ImageRecord::local(filename, content_hash(&bytes), facts))
}

/// Hex-encoded blake3 hash of the raw bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(blake3::hash(bytes).as_bytes())
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "png".to_string(),
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        other => format!("{other:?}").to_ascii_lowercase(),
    }
}

#[cfg(test)]
pub(crate) fn test_png_bytes(width: u32, height: u32, seed: u8) -> Vec<u8> {
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    let img = RgbaImage::from_pixel(width, height, Rgba([seed, 0, 255 - seed, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}
