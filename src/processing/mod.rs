//! # Image Processing and Steganography
//!
//! This module hides and recovers short messages in PNG images using
//! blue-channel LSB steganography combined with the affine byte cipher.
//!
//! - [`steganography`]: the codec itself, on RGBA pixel buffers
//! - [`png`]: upload checks and PNG decode / encode
//! - [`preview`]: pixel matrix preview of the first pixels

pub mod png;
pub mod preview;
pub mod steganography;

// Re-export main functions for convenience
pub use png::{embed_message_png, extract_message_png, load_png, MAX_IMAGE_BYTES};
pub use steganography::{capacity, embed_message, extract_message, MAX_MESSAGE_LENGTH};
