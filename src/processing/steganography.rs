//! # Modular Affine LSB Steganography
//!
//! Hides a short text message in the least significant bit of the **blue**
//! channel of an RGBA image. Every character is first passed through the
//! affine byte cipher `(a*x + b) mod 256`.
//!
//! ## Algorithm
//!
//! Pixels are visited in row-major order. Each pixel carries exactly one
//! bit, stored in bit 0 of its blue channel. Red, green, alpha and the
//! upper seven blue bits are never touched.
//!
//! ### Encoding Process
//! 1. Check the message length (1..=256 characters) and the image capacity
//! 2. Copy the carrier image
//! 3. Write the message length as a 16-bit big-endian header into pixels 0..16
//! 4. For each character, write its encrypted byte MSB-first into the next 8 pixels
//!
//! ### Decoding Process
//! 1. Read the 16-bit length header from the first 16 pixels
//! 2. Reject a length of 0, above 256, or larger than the image can hold
//! 3. Read `length` bytes MSB-first and decrypt each one
//!
//! ### Capacity
//! A carrier with `P` pixels holds `(P - 16) / 8` characters, capped at 256.
//!
//! Example: a 10x10 image holds 10 characters.

use image::RgbaImage;
use log::{debug, warn};

use crate::cipher::{decrypt_byte, encrypt_byte, CipherParams};
use crate::error::{CodecError, Result};

/// Longest message that can be hidden.
pub const MAX_MESSAGE_LENGTH: usize = 256;

/// Pixels used by the length header.
pub const HEADER_BITS: usize = 16;

const BLUE: usize = 2;

/// Number of characters a `width` x `height` carrier can hold.
pub fn capacity(width: u32, height: u32) -> usize {
    let pixels = width as usize * height as usize;
    (pixels.saturating_sub(HEADER_BITS) / 8).min(MAX_MESSAGE_LENGTH)
}

/// Pixels needed to hide a message of `length` characters.
pub fn required_pixels(length: usize) -> usize {
    HEADER_BITS + 8 * length
}

/// Hide `message` in a copy of `carrier`.
///
/// The carrier itself is left untouched; the returned image differs from it
/// only in the blue-channel LSB of the first `16 + 8 * len` pixels.
///
/// # Arguments
/// - `carrier`: Image to hide the message in
/// - `message`: Text to hide (1 to 256 characters)
/// - `params`: Validated cipher key
///
/// # Errors
/// - [`CodecError::MissingInput`]: the message is empty
/// - [`CodecError::MessageTooLong`]: more than 256 characters
/// - [`CodecError::CapacityExceeded`]: the image has too few pixels
///
/// # Example
/// ```ignore
/// let params = CipherParams::new(5, 8)?;
/// let stego = embed_message(&carrier, "Hi", &params)?;
/// assert_eq!(extract_message(&stego, &params)?, "Hi");
/// ```
pub fn embed_message(carrier: &RgbaImage, message: &str, params: &CipherParams) -> Result<RgbaImage> {
    if message.is_empty() {
        return Err(CodecError::MissingInput("a message to hide"));
    }

    let length = message.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(CodecError::MessageTooLong {
            length,
            max: MAX_MESSAGE_LENGTH,
        });
    }

    let (width, height) = carrier.dimensions();
    let available = width as usize * height as usize;
    let required = required_pixels(length);
    if required > available {
        return Err(CodecError::CapacityExceeded {
            required,
            available,
            max_chars: capacity(width, height),
        });
    }

    if message.chars().any(|c| c as u32 > 0xFF) {
        warn!("Message contains characters above U+00FF; they will not survive decoding");
    }

    let mut img = carrier.clone();
    {
        let mut blues = img.pixels_mut().map(|p| &mut p.0[BLUE]);
        let mut write_bits = |value: u16, bits: u32| {
            for shift in (0..bits).rev() {
                // Capacity was checked above, so the iterator cannot run dry
                if let Some(blue) = blues.next() {
                    let bit = ((value >> shift) & 1) as u8;
                    *blue = (*blue & 0xFE) | bit;
                }
            }
        };

        write_bits(length as u16, HEADER_BITS as u32);
        for c in message.chars() {
            write_bits(encrypt_byte(c as u32, params) as u16, 8);
        }
    }

    debug!(
        "Embedded {} characters with {} into {}x{} image",
        length, params, width, height
    );

    Ok(img)
}

/// Read the 16-bit length header of `carrier` without decrypting anything.
///
/// Returns `None` when the image has fewer than 16 pixels.
pub fn read_header(carrier: &RgbaImage) -> Option<u16> {
    let mut blues = carrier.pixels().map(|p| p.0[BLUE]);
    read_bits(&mut blues, HEADER_BITS as u32)
}

/// Recover a message hidden by [`embed_message`].
///
/// Decoding with a different key does not fail: it produces different
/// (garbled) text.
///
/// # Errors
/// [`CodecError::NoHiddenMessage`] when the header is missing, zero, above
/// 256, or claims more characters than the image can hold.
pub fn extract_message(carrier: &RgbaImage, params: &CipherParams) -> Result<String> {
    let mut blues = carrier.pixels().map(|p| p.0[BLUE]);

    let length = read_bits(&mut blues, HEADER_BITS as u32)
        .ok_or(CodecError::NoHiddenMessage { length: None })?;

    let (width, height) = carrier.dimensions();
    if length == 0
        || length as usize > MAX_MESSAGE_LENGTH
        || length as usize > capacity(width, height)
    {
        debug!("Rejected length header {} for {}x{} image", length, width, height);
        return Err(CodecError::NoHiddenMessage {
            length: Some(length),
        });
    }

    let mut message = String::with_capacity(length as usize);
    for _ in 0..length {
        let encrypted = read_bits(&mut blues, 8).ok_or(CodecError::NoHiddenMessage {
            length: Some(length),
        })?;
        message.push(char::from(decrypt_byte(encrypted as u8, params)));
    }

    Ok(message)
}

/// Assemble `bits` LSBs MSB-first. `None` if the pixels run out.
fn read_bits<I>(blues: &mut I, bits: u32) -> Option<u16>
where
    I: Iterator<Item = u8>,
{
    let mut value = 0u16;
    for _ in 0..bits {
        value = (value << 1) | (blues.next()? & 1) as u16;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn carrier(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 13) as u8, (x * 31 + y * 17) as u8, 255])
        })
    }

    fn params() -> CipherParams {
        CipherParams::new(5, 8).unwrap()
    }

    #[test]
    fn test_round_trip_hi() {
        let img = carrier(10, 10);
        let stego = embed_message(&img, "Hi", &params()).unwrap();
        assert_eq!(extract_message(&stego, &params()).unwrap(), "Hi");
    }

    #[test]
    fn test_header_is_big_endian_length() {
        let stego = embed_message(&carrier(10, 10), "Hi", &params()).unwrap();
        assert_eq!(read_header(&stego), Some(2));
        let bits: Vec<u8> = stego.pixels().take(16).map(|p| p[2] & 1).collect();
        assert_eq!(bits, [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_first_character_bits() {
        let stego = embed_message(&carrier(10, 10), "H", &params()).unwrap();
        // 'H' encrypts to 112 = 0b01110000
        let bits: Vec<u8> = stego.pixels().skip(16).take(8).map(|p| p[2] & 1).collect();
        assert_eq!(bits, [0, 1, 1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_only_blue_lsb_changes() {
        let img = carrier(12, 12);
        let stego = embed_message(&img, "Secret!", &params()).unwrap();
        for (before, after) in img.pixels().zip(stego.pixels()) {
            assert_eq!(before[0], after[0]);
            assert_eq!(before[1], after[1]);
            assert_eq!(before[3], after[3]);
            assert_eq!(before[2] & 0xFE, after[2] & 0xFE);
        }
    }

    #[test]
    fn test_untouched_pixels_after_payload() {
        let img = carrier(10, 10);
        let stego = embed_message(&img, "Hi", &params()).unwrap();
        let used = required_pixels(2);
        assert!(img.pixels().skip(used).eq(stego.pixels().skip(used)));
    }

    #[test]
    fn test_capacity_exceeded() {
        // 2 characters need 32 pixels; 31 is one short
        let img = carrier(31, 1);
        let err = embed_message(&img, "Hi", &params()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::CapacityExceeded {
                required: 32,
                available: 31,
                max_chars: 1
            }
        ));

        let img = carrier(32, 1);
        assert!(embed_message(&img, "Hi", &params()).is_ok());
    }

    #[test]
    fn test_empty_message() {
        assert!(matches!(
            embed_message(&carrier(10, 10), "", &params()),
            Err(CodecError::MissingInput(_))
        ));
    }

    #[test]
    fn test_message_too_long() {
        let long = "x".repeat(257);
        assert!(matches!(
            embed_message(&carrier(100, 100), &long, &params()),
            Err(CodecError::MessageTooLong { length: 257, max: 256 })
        ));
    }

    #[test]
    fn test_max_length_round_trip() {
        let message: String = (0..=255u8).map(char::from).collect();
        assert_eq!(message.chars().count(), 256);
        let stego = embed_message(&carrier(50, 50), &message, &params()).unwrap();
        assert_eq!(extract_message(&stego, &params()).unwrap(), message);
    }

    #[test]
    fn test_blank_image_has_no_message() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        assert!(matches!(
            extract_message(&img, &params()),
            Err(CodecError::NoHiddenMessage { length: Some(0) })
        ));
    }

    #[test]
    fn test_header_above_maximum() {
        // all LSBs set: header reads 0xFFFF
        let img = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 1, 255]));
        assert!(matches!(
            extract_message(&img, &params()),
            Err(CodecError::NoHiddenMessage { length: Some(0xFFFF) })
        ));
    }

    #[test]
    fn test_header_beyond_image() {
        // header says 4 characters but 20 pixels only hold the header
        let mut img = RgbaImage::from_pixel(20, 1, Rgba([0, 0, 0, 255]));
        img.get_pixel_mut(13, 0)[2] = 1;
        assert_eq!(read_header(&img), Some(4));
        assert!(matches!(
            extract_message(&img, &params()),
            Err(CodecError::NoHiddenMessage { length: Some(4) })
        ));
    }

    #[test]
    fn test_tiny_image() {
        let img = carrier(3, 3);
        assert_eq!(read_header(&img), None);
        assert!(matches!(
            extract_message(&img, &params()),
            Err(CodecError::NoHiddenMessage { length: None })
        ));
    }

    #[test]
    fn test_wrong_shift_garbles_message() {
        let stego = embed_message(&carrier(10, 10), "Hi", &params()).unwrap();
        let wrong = CipherParams::new(5, 9).unwrap();
        let decoded = extract_message(&stego, &wrong).unwrap();
        assert_eq!(decoded.chars().count(), 2);
        assert_ne!(decoded, "Hi");
    }

    #[test]
    fn test_capacity() {
        assert_eq!(capacity(10, 10), 10);
        assert_eq!(capacity(4, 4), 0);
        assert_eq!(capacity(1, 1), 0);
        assert_eq!(capacity(1000, 1000), MAX_MESSAGE_LENGTH);
    }
}
