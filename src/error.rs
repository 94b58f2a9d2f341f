//! # Error Types
//!
//! Every failure the codec can report. None of them is fatal: they are meant
//! to be shown to the user as status text so the request can be retried
//! with corrected input.

use thiserror::Error;

/// Why a pair of cipher parameters was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// `a` or `b` is not an integer
    #[error("parameters must be valid numbers (got a = {a:?}, b = {b:?})")]
    NotNumeric { a: String, b: String },

    #[error("\"a\" must be between 1 and 255 (got {0})")]
    AOutOfRange(i64),

    #[error("\"b\" must be between 0 and 255 (got {0})")]
    BOutOfRange(i64),

    /// Even multipliers have no inverse mod 256
    #[error("\"a\" must be odd to have a modular inverse (got {0})")]
    AEven(i64),

    #[error("\"a\" must be coprime with {modulus} (got {a})")]
    ANotCoprime { a: i64, modulus: u64 },

    #[error("no modular inverse of {a} exists mod {modulus}")]
    NoInverse { a: i64, modulus: u64 },
}

/// Errors raised while hiding or recovering a message.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid cipher parameters: {0}")]
    InvalidParameters(#[from] ParamError),

    /// A required input (image, message) was not supplied
    #[error("missing input: please provide {0}")]
    MissingInput(&'static str),

    #[error("message too long: {length} characters (maximum {max})")]
    MessageTooLong { length: usize, max: usize },

    #[error(
        "message too long for this image: needs {required} pixels, image has {available} (maximum {max_chars} characters)"
    )]
    CapacityExceeded {
        required: usize,
        available: usize,
        max_chars: usize,
    },

    /// The length header is zero, out of range, or points past the image
    #[error("no valid hidden message found in this image")]
    NoHiddenMessage { length: Option<u16> },

    /// `size` is unknown when the upload was cut off while streaming
    #[error("file too large: the maximum size is {limit} bytes")]
    ImageTooLarge { size: Option<usize>, limit: usize },

    #[error("please upload a PNG image")]
    UnsupportedFormat,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CodecError {
    /// Taxonomy name used in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameters(_) => "InvalidParameters",
            Self::MissingInput(_) => "MissingInput",
            Self::MessageTooLong { .. } => "MessageTooLong",
            Self::CapacityExceeded { .. } => "CapacityExceeded",
            Self::NoHiddenMessage { .. } => "NoHiddenMessage",
            Self::ImageTooLarge { .. } => "ImageTooLarge",
            Self::UnsupportedFormat => "UnsupportedFormat",
            Self::Image(_) => "ImageError",
        }
    }

    /// `true` when the error was caused by what the user supplied rather
    /// than by the image library failing on valid input.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Image(image::ImageError::Encoding(_)))
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
