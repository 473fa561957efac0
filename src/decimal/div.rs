//! Division and modulus.
//!
//! Division scales both operands up into plain integers so the desired
//! number of fractional digits lands inside the integer quotient, then
//! runs a textbook shift-and-subtract long division: one quotient digit
//! per step, found by trial subtraction of `0..=9` multiples of the
//! divisor from a running remainder. The quotient is truncated, never
//! rounded, matching multiplication's truncation rule.

use super::{Decimal, Sign};
use crate::diagnostics::CalcError;
use std::cmp::Ordering;

fn strip_leading(v: &mut Vec<u8>) {
    while v.len() > 1 && v[0] == 0 {
        v.remove(0);
    }
}

fn compare_mag(a: &[u8], b: &[u8]) -> Ordering {
    let a = {
        let mut v = a.to_vec();
        strip_leading(&mut v);
        v
    };
    let b = {
        let mut v = b.to_vec();
        strip_leading(&mut v);
        v
    };
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    a.cmp(&b)
}

/// `den * digit`, MSB-first, for a single decimal digit `0..=9`.
fn mul_small(den: &[u8], digit: u8) -> Vec<u8> {
    if digit == 0 {
        return vec![0];
    }
    let mut out = vec![0u8; den.len() + 1];
    let mut carry = 0u32;
    for (i, &d) in den.iter().enumerate().rev() {
        let prod = d as u32 * digit as u32 + carry;
        out[i + 1] = (prod % 10) as u8;
        carry = prod / 10;
    }
    out[0] = carry as u8;
    strip_leading(&mut out);
    out
}

/// `a - b`, MSB-first, assuming `a >= b` numerically.
fn sub_mag(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; a.len()];
    let offset = a.len() - b.len();
    let mut borrow = 0i8;
    for i in (0..a.len()).rev() {
        let bv = if i >= offset { b[i - offset] as i8 } else { 0 };
        let mut diff = a[i] as i8 - bv - borrow;
        if diff < 0 {
            diff += 10;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out[i] = diff as u8;
    }
    strip_leading(&mut out);
    out
}

/// Long division of two non-negative, MSB-first digit strings. Returns a
/// quotient with exactly `numerator.len()` digits (callers trim leading
/// zeros as needed); the remainder is discarded, which is exactly the
/// truncation rule division is specified to use.
fn divide_digits(numerator: &[u8], denominator: &[u8]) -> Vec<u8> {
    let mut remainder: Vec<u8> = vec![0];
    let mut quotient = Vec::with_capacity(numerator.len());

    for &digit in numerator {
        remainder.push(digit);
        strip_leading(&mut remainder);

        let mut q = 0u8;
        while q < 9 && compare_mag(&mul_small(denominator, q + 1), &remainder) != Ordering::Greater {
            q += 1;
        }
        let subtrahend = mul_small(denominator, q);
        remainder = sub_mag(&remainder, &subtrahend);
        quotient.push(q);
    }

    quotient
}

impl Decimal {
    /// `self / other`, truncated to `scale` fractional digits.
    pub fn div(&self, other: &Decimal, scale: usize) -> Result<Decimal, CalcError> {
        if other.is_zero() {
            return Err(CalcError::DivisionByZero);
        }

        let mut numerator = self.digits_full();
        numerator.extend(std::iter::repeat(0u8).take(other.scale() + scale));
        let mut denominator = other.digits_full();
        denominator.extend(std::iter::repeat(0u8).take(self.scale()));
        strip_leading(&mut denominator);

        let mut quotient = divide_digits(&numerator, &denominator);
        if quotient.len() <= scale {
            let pad = scale + 1 - quotient.len();
            let mut padded = vec![0u8; pad];
            padded.extend(quotient);
            quotient = padded;
        }
        let int_len = quotient.len() - scale;
        Ok(Decimal::from_parts(Sign::product(self.sign(), other.sign()), quotient, int_len, scale))
    }

    /// `self % other` at `scale` fractional digits: `self - (self div other
    /// truncated toward zero) * other`, following the sign of `self`.
    pub fn rem(&self, other: &Decimal, scale: usize) -> Result<Decimal, CalcError> {
        if other.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let truncated_quotient = self.div(other, 0)?;
        let product = super::mul::mul_full(&truncated_quotient, other);
        Ok(super::arith::sub(self, &product).truncate_to_scale(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_lossy(s)
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(d("1").div(&d("0"), 2).unwrap_err(), CalcError::DivisionByZero);
    }

    #[test]
    fn divides_and_truncates_to_scale() {
        assert_eq!(d("10").div(&d("3"), 4).unwrap().to_string(), "3.3333");
        assert_eq!(d("1").div(&d("4"), 2).unwrap().to_string(), "0.25");
        assert_eq!(d("-7").div(&d("2"), 0).unwrap().to_string(), "-3");
    }

    #[test]
    fn exact_division_has_no_trailing_noise() {
        assert_eq!(d("10").div(&d("2"), 0).unwrap().to_string(), "5");
    }

    #[test]
    fn modulus_follows_truncated_quotient() {
        assert_eq!(d("10").rem(&d("3"), 0).unwrap().to_string(), "1");
        assert_eq!(d("-10").rem(&d("3"), 0).unwrap().to_string(), "-1");
    }
}
