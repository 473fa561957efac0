//! Addition and subtraction.
//!
//! Both operations align their operands to a common integer-digit count
//! and scale (left-padding the integer part, right-padding the fractional
//! part with zeros), then either add magnitudes digit-by-digit with carry
//! propagation (same sign) or fall through to a magnitude comparison
//! followed by an unsigned subtraction (cross sign).

use super::{Decimal, Sign};
use std::cmp::Ordering;
use std::ops::{Add, Sub};

fn align(a: &Decimal, b: &Decimal) -> (Vec<u8>, Vec<u8>, usize, usize) {
    let int_len = a.int_len().max(b.int_len());
    let scale = a.scale().max(b.scale());

    let pad = |d: &Decimal| -> Vec<u8> {
        let mut out = Vec::with_capacity(int_len + scale);
        out.extend(std::iter::repeat(0u8).take(int_len - d.int_len()));
        out.extend_from_slice(d.int_digits());
        out.extend_from_slice(d.frac_digits());
        out.extend(std::iter::repeat(0u8).take(scale - d.scale()));
        out
    };

    (pad(a), pad(b), int_len, scale)
}

/// `a + b` where both are already the same length. Returns a digit vector
/// one longer than the input when the addition carries out of the top.
fn unsigned_add(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; a.len()];
    let mut carry = 0u8;
    for i in (0..a.len()).rev() {
        let sum = a[i] + b[i] + carry;
        out[i] = sum % 10;
        carry = sum / 10;
    }
    if carry > 0 {
        out.insert(0, carry);
    }
    out
}

/// `a - b` assuming `a >= b` in magnitude and equal length.
fn unsigned_sub(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; a.len()];
    let mut borrow = 0i8;
    for i in (0..a.len()).rev() {
        let mut diff = a[i] as i8 - b[i] as i8 - borrow;
        if diff < 0 {
            diff += 10;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out[i] = diff as u8;
    }
    out
}

/// Compares two equal-length, equal-scale digit vectors as magnitudes.
fn cmp_digits(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

pub fn add(a: &Decimal, b: &Decimal) -> Decimal {
    let (ad, bd, int_len, scale) = align(a, b);

    if a.sign() == b.sign() {
        let sum = unsigned_add(&ad, &bd);
        let carried = sum.len() > int_len + scale;
        let new_int_len = if carried { int_len + 1 } else { int_len };
        return Decimal::from_parts(a.sign(), sum, new_int_len, scale);
    }

    match cmp_digits(&ad, &bd) {
        Ordering::Equal => Decimal::zero(),
        Ordering::Greater => Decimal::from_parts(a.sign(), unsigned_sub(&ad, &bd), int_len, scale),
        Ordering::Less => Decimal::from_parts(b.sign(), unsigned_sub(&bd, &ad), int_len, scale),
    }
}

pub fn sub(a: &Decimal, b: &Decimal) -> Decimal {
    add(a, &b.negated())
}

impl Add for &Decimal {
    type Output = Decimal;
    fn add(self, rhs: &Decimal) -> Decimal {
        add(self, rhs)
    }
}

impl Add for Decimal {
    type Output = Decimal;
    fn add(self, rhs: Decimal) -> Decimal {
        add(&self, &rhs)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;
    fn sub(self, rhs: &Decimal) -> Decimal {
        sub(self, rhs)
    }
}

impl Sub for Decimal {
    type Output = Decimal;
    fn sub(self, rhs: Decimal) -> Decimal {
        sub(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_lossy(s)
    }

    #[test]
    fn same_sign_addition_carries() {
        assert_eq!((&d("99") + &d("1")).to_string(), "100");
        assert_eq!((&d("1.99") + &d("0.02")).to_string(), "2.01");
    }

    #[test]
    fn cross_sign_addition_takes_larger_magnitude_sign() {
        assert_eq!((&d("5") + &d("-3")).to_string(), "2");
        assert_eq!((&d("3") + &d("-5")).to_string(), "-2");
        assert_eq!((&d("5") + &d("-5")).to_string(), "0");
    }

    #[test]
    fn subtraction_is_addition_of_the_negation() {
        assert_eq!((&d("10") - &d("3")).to_string(), "7");
        assert_eq!((&d("3") - &d("10")).to_string(), "-7");
        assert_eq!((&d("1.5") - &d("1.5")).to_string(), "0");
    }
}
