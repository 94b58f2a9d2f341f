//! Toy affine cipher and blue-channel LSB steganography for PNG images.
//!
//! The cipher `(a*x + b) mod 256` is a classroom demonstration and is not
//! secure.

pub mod cipher;
pub mod common;
pub mod error;
pub mod processing;
pub mod server;

pub use cipher::CipherParams;
pub use error::{CodecError, ParamError};
pub use server::StegoService;
