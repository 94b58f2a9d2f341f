//! # Ciphers
//!
//! Toy affine ciphers used by the image codec and the letter demo.
//!
//! ## Modules
//!
//! - [`modular`]: gcd and modular inverse
//! - [`params`]: validated key `(a, b)` of the byte cipher
//! - [`affine`]: byte cipher `(a*x + b) mod 256` and its trial trace
//! - [`letters`]: alphabet cipher `(a*x + k) mod 26` and Caesar shift

pub mod affine;
pub mod letters;
pub mod modular;
pub mod params;

pub use affine::{decrypt_byte, encrypt_byte, CharTrace};
pub use params::CipherParams;
