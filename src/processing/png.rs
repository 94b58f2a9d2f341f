//! # PNG Intake and Output
//!
//! Turns uploaded bytes into an RGBA pixel buffer and back. Only PNG is
//! accepted: a lossy format would destroy the hidden bits on save.

use image::{ImageFormat, RgbaImage};
use log::debug;
use std::io::Cursor;

use super::steganography::{embed_message, extract_message};
use crate::cipher::CipherParams;
use crate::error::{CodecError, Result};

/// Largest accepted upload (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Decode PNG bytes with the default 5 MiB limit.
pub fn load_png(bytes: &[u8]) -> Result<RgbaImage> {
    load_png_with_limit(bytes, MAX_IMAGE_BYTES)
}

/// Decode PNG bytes into an RGBA buffer.
///
/// # Errors
/// - [`CodecError::MissingInput`]: `bytes` is empty
/// - [`CodecError::ImageTooLarge`]: more than `limit` bytes
/// - [`CodecError::UnsupportedFormat`]: not a PNG
/// - [`CodecError::Image`]: the PNG could not be decoded
pub fn load_png_with_limit(bytes: &[u8], limit: usize) -> Result<RgbaImage> {
    if bytes.is_empty() {
        return Err(CodecError::MissingInput("an image"));
    }
    if bytes.len() > limit {
        return Err(CodecError::ImageTooLarge {
            size: Some(bytes.len()),
            limit,
        });
    }
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => {}
        _ => return Err(CodecError::UnsupportedFormat),
    }

    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8();
    debug!("Loaded {}x{} PNG ({} bytes)", img.width(), img.height(), bytes.len());
    Ok(img)
}

/// Encode an RGBA buffer as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;
    Ok(output_bytes)
}

/// Hide `message` in a PNG and return the new PNG bytes.
///
/// # Example
/// ```ignore
/// let image_data = std::fs::read("input.png")?;
/// let params = CipherParams::new(5, 8)?;
/// let stego = embed_message_png(&image_data, "Secret", &params)?;
/// std::fs::write("imatge_encriptada.png", stego)?;
/// ```
pub fn embed_message_png(bytes: &[u8], message: &str, params: &CipherParams) -> Result<Vec<u8>> {
    let carrier = load_png(bytes)?;
    let stego = embed_message(&carrier, message, params)?;
    encode_png(&stego)
}

/// Recover the message hidden in a PNG.
pub fn extract_message_png(bytes: &[u8], params: &CipherParams) -> Result<String> {
    let carrier = load_png(bytes)?;
    extract_message(&carrier, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([120, 200, 33, 255]));
        encode_png(&img).unwrap()
    }

    #[test]
    fn test_png_round_trip() {
        let params = CipherParams::new(5, 8).unwrap();
        let stego = embed_message_png(&png_bytes(16, 16), "Hola món", &params).unwrap();
        assert_eq!(extract_message_png(&stego, &params).unwrap(), "Hola món");
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(load_png(&[]), Err(CodecError::MissingInput(_))));
    }

    #[test]
    fn test_rejects_jpeg_signature() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
        assert!(matches!(load_png(&jpeg), Err(CodecError::UnsupportedFormat)));
    }

    #[test]
    fn test_rejects_oversized_input() {
        let bytes = png_bytes(8, 8);
        let err = load_png_with_limit(&bytes, bytes.len() - 1).unwrap_err();
        assert!(matches!(err, CodecError::ImageTooLarge { .. }));
        assert!(load_png_with_limit(&bytes, bytes.len()).is_ok());
    }

    #[test]
    fn test_truncated_png() {
        let bytes = png_bytes(8, 8);
        assert!(matches!(
            load_png(&bytes[..20]),
            Err(CodecError::Image(_))
        ));
    }
}
