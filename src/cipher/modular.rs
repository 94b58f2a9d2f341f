//! # Modular Arithmetic
//!
//! Greatest common divisor and modular multiplicative inverse, shared by the
//! byte cipher (mod 256) and the letter cipher (mod 26).

/// Greatest common divisor (Euclid).
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Modular multiplicative inverse of `a` modulo `m` via the extended
/// Euclidean algorithm.
///
/// Returns `Some(v)` with `v ∈ [1, m)` and `(a * v) mod m == 1`, or `None`
/// when no inverse exists (`gcd(a, m) != 1`, or `m < 2`).
///
/// # Example
/// ```ignore
/// assert_eq!(mod_inverse(5, 256), Some(205));
/// assert_eq!(mod_inverse(4, 256), None);
/// ```
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m < 2 {
        return None;
    }

    let m_signed = m as i128;
    let (mut old_r, mut r) = ((a % m) as i128, m_signed);
    let (mut old_s, mut s) = (1i128, 0i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    // old_r is gcd(a, m)
    if old_r != 1 {
        return None;
    }

    Some(old_s.rem_euclid(m_signed) as u64)
}
