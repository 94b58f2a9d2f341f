//! # Stego Service - Codec Runner
//!
//! The core service is responsible for ONE thing: running the codec on a
//! request's image and returning the result. HTTP concerns (multipart
//! parsing, status codes, JSON) live in [`api`](super::api).
//!
//! Each call owns its input buffers. Nothing is kept between requests.

use anyhow::Result;
use log::{info, warn};
use serde::Serialize;

use crate::cipher::affine::{self, CharTrace, DEFAULT_TRIAL_TEXT};
use crate::cipher::letters::{self, Direction, LetterKey};
use crate::cipher::CipherParams;
use crate::common::config::LimitsConfig;
use crate::error::{CodecError, ParamError};
use crate::processing::png::{encode_png, load_png_with_limit};
use crate::processing::preview::{pixel_matrix, PixelMatrix};
use crate::processing::steganography;

/// How many characters the encryption details cover.
pub const DETAIL_CHARS: usize = 3;

/// Result of hiding a message.
#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    /// PNG bytes of the carrier with the message embedded
    pub png: Vec<u8>,
    pub params: CipherParams,
    pub length: usize,
    /// Cipher trace of the first characters
    pub details: Vec<CharTrace>,
    pub preview_before: PixelMatrix,
    pub preview_after: PixelMatrix,
}

/// Result of recovering a message.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    pub message: String,
    pub params: CipherParams,
    pub preview: PixelMatrix,
}

/// Outcome of a parameter check.
#[derive(Debug, Clone, Serialize)]
pub struct ParamCheck {
    pub formula: String,
    pub inverse: u8,
    pub trial: Vec<CharTrace>,
}

/// Core service that runs encode and decode requests.
#[derive(Debug, Clone)]
pub struct StegoService {
    limits: LimitsConfig,
}

impl StegoService {
    /// Create a new service with the given request limits.
    ///
    /// # Example
    /// ```ignore
    /// let service = StegoService::new(LimitsConfig::default());
    /// ```
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Hide `message` in the PNG `image_data`.
    ///
    /// This function:
    /// 1. Checks that a message and an image were supplied
    /// 2. Decodes the PNG (size and format checked)
    /// 3. Embeds the encrypted message into a copy of the pixels
    /// 4. Encodes the result as PNG
    ///
    /// The work runs on the blocking thread pool, since PNG decoding of a
    /// 5 MiB upload should not stall the async runtime.
    ///
    /// # Returns
    /// - `Ok(EncodeOutcome)`: PNG bytes plus details and previews
    /// - `Err`: a [`CodecError`] for bad input, or a worker failure
    pub async fn encode(
        &self,
        request_id: u64,
        image_data: Vec<u8>,
        message: String,
        params: CipherParams,
    ) -> Result<EncodeOutcome> {
        info!(
            "📷 Request #{}: hiding {} characters with {} in {} byte image",
            request_id,
            message.chars().count(),
            params,
            image_data.len()
        );

        let limits = self.limits;
        let outcome = tokio::task::spawn_blocking(move || -> Result<EncodeOutcome, CodecError> {
            if message.is_empty() {
                return Err(CodecError::MissingInput("a message to hide"));
            }
            let carrier = load_png_with_limit(&image_data, limits.max_image_bytes)?;
            let stego = steganography::embed_message(&carrier, &message, &params)?;
            Ok(EncodeOutcome {
                png: encode_png(&stego)?,
                params,
                length: message.chars().count(),
                details: affine::details(&message, &params, DETAIL_CHARS),
                preview_before: pixel_matrix(&carrier, limits.preview_side),
                preview_after: pixel_matrix(&stego, limits.preview_side),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("Encode task panicked: {}", e))?;

        match outcome {
            Ok(outcome) => {
                info!(
                    "✅ Request #{}: message hidden, carrier size {} bytes",
                    request_id,
                    outcome.png.len()
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!("❌ Request #{}: {}", request_id, e);
                Err(e.into())
            }
        }
    }

    /// Recover the message hidden in the PNG `image_data`.
    pub async fn decode(
        &self,
        request_id: u64,
        image_data: Vec<u8>,
        params: CipherParams,
    ) -> Result<DecodeOutcome> {
        info!(
            "🔍 Request #{}: extracting with {} from {} byte image",
            request_id,
            params,
            image_data.len()
        );

        let limits = self.limits;
        let outcome = tokio::task::spawn_blocking(move || -> Result<DecodeOutcome, CodecError> {
            let carrier = load_png_with_limit(&image_data, limits.max_image_bytes)?;
            let message = steganography::extract_message(&carrier, &params)?;
            Ok(DecodeOutcome {
                message,
                params,
                preview: pixel_matrix(&carrier, limits.preview_side),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("Decode task panicked: {}", e))?;

        match outcome {
            Ok(outcome) => {
                info!(
                    "🔓 Request #{}: recovered {} characters",
                    request_id,
                    outcome.message.chars().count()
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!("❌ Request #{}: {}", request_id, e);
                Err(e.into())
            }
        }
    }

    /// Validate `a` and `b` and run the trial text through the cipher.
    pub fn check_params(a: &str, b: &str, text: Option<&str>) -> Result<ParamCheck, ParamError> {
        let params = CipherParams::parse(a, b)?;
        Ok(ParamCheck {
            formula: params.to_string(),
            inverse: params.inverse(),
            trial: affine::trial(text.unwrap_or(DEFAULT_TRIAL_TEXT), &params),
        })
    }

    /// Run the letter cipher (mod 26).
    pub fn letters(text: &str, a: i64, k: i64, decrypt: bool) -> Result<String, CodecError> {
        let key = LetterKey::new(a, k)?;
        let direction = if decrypt {
            Direction::Decrypt
        } else {
            Direction::Encrypt
        };
        letters::transform(text, &key, direction)
    }
}
