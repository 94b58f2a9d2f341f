//! # Letter Affine Cipher
//!
//! The classic affine cipher on the 26-letter Latin alphabet:
//!
//! - Encrypt: `C(x) = (a*x + k) mod 26`
//! - Decrypt: `D(y) = a⁻¹ (y - k) mod 26`
//!
//! ASCII letters keep their case, every other character passes through
//! unchanged. The Caesar cipher is the special case `a = 1`.

use super::modular::{gcd, mod_inverse};
use crate::error::{CodecError, ParamError};

const ALPHABET_LEN: u64 = 26;

/// Direction of a letter cipher run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Key of the letter cipher. `a` is one of the twelve values coprime with 26.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterKey {
    a: u64,
    k: u64,
    inverse: u64,
}

impl LetterKey {
    /// Validate a key. `k` may be any integer and is reduced mod 26.
    pub fn new(a: i64, k: i64) -> Result<Self, ParamError> {
        let reduced_a = a.rem_euclid(ALPHABET_LEN as i64) as u64;
        if !(1..=25).contains(&a) || gcd(reduced_a, ALPHABET_LEN) != 1 {
            return Err(ParamError::ANotCoprime {
                a,
                modulus: ALPHABET_LEN,
            });
        }
        let inverse = mod_inverse(reduced_a, ALPHABET_LEN).ok_or(ParamError::NoInverse {
            a,
            modulus: ALPHABET_LEN,
        })?;

        Ok(Self {
            a: reduced_a,
            k: k.rem_euclid(ALPHABET_LEN as i64) as u64,
            inverse,
        })
    }

    /// Valid multipliers, in ascending order.
    pub fn valid_multipliers() -> Vec<u64> {
        (1..ALPHABET_LEN)
            .filter(|a| gcd(*a, ALPHABET_LEN) == 1)
            .collect()
    }

    pub fn inverse(&self) -> u64 {
        self.inverse
    }

    fn apply(&self, x: u64, direction: Direction) -> u64 {
        match direction {
            Direction::Encrypt => (self.a * x + self.k) % ALPHABET_LEN,
            Direction::Decrypt => (self.inverse * (x + ALPHABET_LEN - self.k)) % ALPHABET_LEN,
        }
    }
}

/// Run the letter cipher over `text`.
///
/// # Errors
/// [`CodecError::MissingInput`] when `text` is empty or only whitespace.
pub fn transform(text: &str, key: &LetterKey, direction: Direction) -> Result<String, CodecError> {
    if text.trim().is_empty() {
        return Err(CodecError::MissingInput("a message"));
    }

    let out = text
        .chars()
        .map(|c| {
            let base = match c {
                'A'..='Z' => b'A',
                'a'..='z' => b'a',
                _ => return c,
            };
            let x = (c as u8 - base) as u64;
            (base + key.apply(x, direction) as u8) as char
        })
        .collect();

    Ok(out)
}

pub fn encrypt(text: &str, key: &LetterKey) -> Result<String, CodecError> {
    transform(text, key, Direction::Encrypt)
}

pub fn decrypt(text: &str, key: &LetterKey) -> Result<String, CodecError> {
    transform(text, key, Direction::Decrypt)
}

/// Caesar shift, i.e. the letter cipher with `a = 1`.
pub fn caesar(text: &str, shift: i64, direction: Direction) -> Result<String, CodecError> {
    let key = LetterKey::new(1, shift)?;
    transform(text, &key, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_multipliers() {
        assert_eq!(
            LetterKey::valid_multipliers(),
            vec![1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25]
        );
    }

    #[test]
    fn test_rejects_non_coprime_a() {
        assert!(LetterKey::new(13, 8).is_err());
        assert!(LetterKey::new(2, 8).is_err());
        assert!(LetterKey::new(0, 8).is_err());
        assert!(LetterKey::new(27, 8).is_err());
    }

    #[test]
    fn test_encrypt_known_value() {
        let key = LetterKey::new(5, 8).unwrap();
        // h=7 -> 43 mod 26 = 17 = r ; e=4 -> 28 mod 26 = 2 = c
        assert_eq!(encrypt("he", &key).unwrap(), "rc");
    }

    #[test]
    fn test_round_trip_preserves_case_and_punctuation() {
        let key = LetterKey::new(7, 3).unwrap();
        let text = "Hola, Món! 123";
        let encrypted = encrypt(text, &key).unwrap();
        assert_ne!(encrypted, text);
        assert!(encrypted.ends_with("! 123"));
        assert_eq!(decrypt(&encrypted, &key).unwrap(), text);
    }

    #[test]
    fn test_caesar() {
        assert_eq!(caesar("abc", 3, Direction::Encrypt).unwrap(), "def");
        assert_eq!(caesar("XYZ", 3, Direction::Encrypt).unwrap(), "ABC");
        assert_eq!(caesar("def", 3, Direction::Decrypt).unwrap(), "abc");
        assert_eq!(caesar("abc", -1, Direction::Encrypt).unwrap(), "zab");
    }

    #[test]
    fn test_empty_message() {
        let key = LetterKey::new(5, 8).unwrap();
        assert!(matches!(
            encrypt("   ", &key),
            Err(CodecError::MissingInput(_))
        ));
    }
}
