//! # Cipher Parameters
//!
//! The key of the byte cipher: multiplier `a` and shift `b` of the affine
//! transform `(a*x + b) mod 256`.
//!
//! A [`CipherParams`] value can only be obtained through validation, so any
//! instance is guaranteed to have a modular inverse. The inverse is computed
//! once at construction time.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::modular::{gcd, mod_inverse};
use crate::error::ParamError;

/// Modulus of the byte cipher.
pub const MOD_VALUE: u64 = 256;

/// Validated affine key for the byte cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParams", into = "RawParams")]
pub struct CipherParams {
    a: u8,
    b: u8,
    inverse: u8,
}

/// Unvalidated wire form of [`CipherParams`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawParams {
    pub a: i64,
    pub b: i64,
}

impl CipherParams {
    /// Validate numeric parameters.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// range of `a`, range of `b`, parity of `a`, `gcd(a, 256)`, inverse.
    ///
    /// # Example
    /// ```ignore
    /// let params = CipherParams::new(5, 8)?;
    /// assert_eq!(params.inverse(), 205);
    /// ```
    pub fn new(a: i64, b: i64) -> Result<Self, ParamError> {
        if !(1..=255).contains(&a) {
            return Err(ParamError::AOutOfRange(a));
        }
        if !(0..=255).contains(&b) {
            return Err(ParamError::BOutOfRange(b));
        }
        if a % 2 == 0 {
            return Err(ParamError::AEven(a));
        }
        if gcd(a as u64, MOD_VALUE) != 1 {
            return Err(ParamError::ANotCoprime {
                a,
                modulus: MOD_VALUE,
            });
        }
        let inverse = mod_inverse(a as u64, MOD_VALUE).ok_or(ParamError::NoInverse {
            a,
            modulus: MOD_VALUE,
        })?;

        Ok(Self {
            a: a as u8,
            b: b as u8,
            inverse: inverse as u8,
        })
    }

    /// Parse and validate parameters given as text (form fields, CLI).
    ///
    /// Surrounding whitespace is ignored. Anything that is not an integer
    /// yields [`ParamError::NotNumeric`].
    pub fn parse(a: &str, b: &str) -> Result<Self, ParamError> {
        match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
            (Ok(a), Ok(b)) => Self::new(a, b),
            _ => Err(ParamError::NotNumeric {
                a: a.to_string(),
                b: b.to_string(),
            }),
        }
    }

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    /// `a⁻¹ mod 256`
    pub fn inverse(&self) -> u8 {
        self.inverse
    }
}

impl fmt::Display for CipherParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}x + {}) mod {}", self.a, self.b, MOD_VALUE)
    }
}

impl TryFrom<RawParams> for CipherParams {
    type Error = ParamError;

    fn try_from(raw: RawParams) -> Result<Self, Self::Error> {
        Self::new(raw.a, raw.b)
    }
}

impl From<CipherParams> for RawParams {
    fn from(params: CipherParams) -> Self {
        Self {
            a: params.a as i64,
            b: params.b as i64,
        }
    }
}
