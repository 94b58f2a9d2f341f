//! # Affine Byte Cipher
//!
//! Per-character transform applied before a character is hidden in an image:
//!
//! - Encrypt: `y = (a*x + b) mod 256`
//! - Decrypt: `x = a⁻¹ * (y - b) mod 256`
//!
//! This is a toy substitution cipher over a single byte. It is trivially
//! broken and offers no secrecy.

use serde::Serialize;

use super::params::{CipherParams, MOD_VALUE};

/// Text used by the parameter trial when none is given.
pub const DEFAULT_TRIAL_TEXT: &str = "Hola";

/// Encrypt one character code. Codes above 255 are reduced mod 256.
pub fn encrypt_byte(x: u32, params: &CipherParams) -> u8 {
    let y = (params.a() as u64 * x as u64 + params.b() as u64) % MOD_VALUE;
    y as u8
}

/// Decrypt one byte back to the character code it came from.
pub fn decrypt_byte(y: u8, params: &CipherParams) -> u8 {
    let shifted = (y as i64 - params.b() as i64).rem_euclid(MOD_VALUE as i64);
    ((params.inverse() as i64 * shifted) % MOD_VALUE as i64) as u8
}

/// One character pushed through the cipher and back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharTrace {
    pub character: char,
    pub code: u32,
    pub encrypted: u8,
    /// `encrypted` as eight binary digits, the bits written to the image
    pub binary: String,
    pub decrypted: u8,
    /// Whether decrypting gave back the original code
    pub round_trip: bool,
}

impl CharTrace {
    fn new(character: char, params: &CipherParams) -> Self {
        let code = character as u32;
        let encrypted = encrypt_byte(code, params);
        let decrypted = decrypt_byte(encrypted, params);
        Self {
            character,
            code,
            encrypted,
            binary: format!("{:08b}", encrypted),
            decrypted,
            round_trip: decrypted as u32 == code,
        }
    }
}

/// Run every character of `text` through encrypt and decrypt.
///
/// Used to sanity-check a key before hiding anything: with valid
/// parameters every character below U+0100 reports `round_trip == true`.
pub fn trial(text: &str, params: &CipherParams) -> Vec<CharTrace> {
    text.chars().map(|c| CharTrace::new(c, params)).collect()
}

/// Encryption details for the first `limit` characters of a message.
pub fn details(message: &str, params: &CipherParams, limit: usize) -> Vec<CharTrace> {
    message
        .chars()
        .take(limit)
        .map(|c| CharTrace::new(c, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrypt_inverts_encrypt_for_all_keys() {
        for a in (1..=255).step_by(2) {
            for b in [0, 1, 8, 127, 255] {
                let params = CipherParams::new(a, b).unwrap();
                for x in 0..256u32 {
                    let y = encrypt_byte(x, &params);
                    assert_eq!(decrypt_byte(y, &params) as u32, x, "a={} b={} x={}", a, b, x);
                }
            }
        }
    }

    #[test]
    fn test_known_values() {
        let params = CipherParams::new(5, 8).unwrap();
        // 'H' = 72: 5*72 + 8 = 368 ≡ 112
        assert_eq!(encrypt_byte('H' as u32, &params), 112);
        // 'i' = 105: 5*105 + 8 = 533 ≡ 21
        assert_eq!(encrypt_byte('i' as u32, &params), 21);
        assert_eq!(decrypt_byte(112, &params), b'H');
    }

    #[test]
    fn test_decrypt_handles_y_below_b() {
        let params = CipherParams::new(1, 200).unwrap();
        let y = encrypt_byte(100, &params);
        assert_eq!(y, 44);
        assert_eq!(decrypt_byte(y, &params), 100);
    }

    #[test]
    fn test_wide_code_points_are_reduced() {
        let params = CipherParams::new(3, 7).unwrap();
        // U+0141 = 321 ≡ 65
        assert_eq!(encrypt_byte(0x141, &params), encrypt_byte(65, &params));
    }

    #[test]
    fn test_trial_on_default_text() {
        let params = CipherParams::new(5, 8).unwrap();
        let trace = trial(DEFAULT_TRIAL_TEXT, &params);
        assert_eq!(trace.len(), 4);
        assert!(trace.iter().all(|t| t.round_trip));
        assert_eq!(trace[0].character, 'H');
        assert_eq!(trace[0].binary, "01110000");
    }

    #[test]
    fn test_trial_flags_lossy_characters() {
        let params = CipherParams::new(5, 8).unwrap();
        let trace = trial("Ł", &params);
        assert!(!trace[0].round_trip);
    }

    #[test]
    fn test_details_limit() {
        let params = CipherParams::new(5, 8).unwrap();
        assert_eq!(details("Hello", &params, 3).len(), 3);
        assert_eq!(details("Hi", &params, 3).len(), 2);
    }
}
