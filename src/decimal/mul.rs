//! Multiplication: Karatsuba for large operands, schoolbook below a small
//! digit-count threshold where the divide-and-conquer overhead isn't worth
//! paying.
//!
//! Both operands are treated as plain base-10 integers (the decimal point
//! is pure metadata — multiplying the full digit strings and summing the
//! input scales gives the correctly-scaled product), then the result is
//! truncated to whatever scale the caller asked for.

use super::{Decimal, Sign};
use std::ops::Mul;

/// Below this many digits, Karatsuba's recursion overhead outweighs its
/// sub-quadratic win; fall back to schoolbook multiplication. Must stay
/// above 3: at length 2 or 3, a carry out of `a_sum`/`b_sum` can leave the
/// `z1` sub-call the same length as the parent call, so the recursion
/// never shrinks and never terminates.
const KARATSUBA_THRESHOLD: usize = 4;

/// Grade-school multiplication of two least-significant-digit-first digit
/// vectors. `O(len(a) * len(b))`.
fn schoolbook_lsb(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut acc = vec![0u32; a.len() + b.len()];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0 {
            continue;
        }
        let mut carry = 0u32;
        for (j, &bj) in b.iter().enumerate() {
            let sum = acc[i + j] + ai as u32 * bj as u32 + carry;
            acc[i + j] = sum % 10;
            carry = sum / 10;
        }
        let mut k = i + b.len();
        while carry > 0 {
            let sum = acc[k] + carry;
            acc[k] = sum % 10;
            carry = sum / 10;
            k += 1;
        }
    }
    acc.into_iter().map(|d| d as u8).collect()
}

fn add_lsb(a: &[u8], b: &[u8]) -> Vec<u8> {
    let len = a.len().max(b.len());
    let mut out = Vec::with_capacity(len + 1);
    let mut carry = 0u8;
    for i in 0..len {
        let sum = *a.get(i).unwrap_or(&0) + *b.get(i).unwrap_or(&0) + carry;
        out.push(sum % 10);
        carry = sum / 10;
    }
    if carry > 0 {
        out.push(carry);
    }
    out
}

/// `a - b`, both least-significant-digit-first. Assumes `a >= b`
/// numerically, which every call site below guarantees algebraically.
fn sub_lsb(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0i8;
    for i in 0..a.len() {
        let mut diff = a[i] as i8 - *b.get(i).unwrap_or(&0) as i8 - borrow;
        if diff < 0 {
            diff += 10;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(diff as u8);
    }
    while out.len() > 1 && *out.last().unwrap() == 0 {
        out.pop();
    }
    out
}

fn shift_lsb(a: &[u8], shift: usize) -> Vec<u8> {
    let mut out = vec![0u8; shift];
    out.extend_from_slice(a);
    out
}

fn split_at_lsb(a: &[u8], half: usize) -> (Vec<u8>, Vec<u8>) {
    if half >= a.len() {
        (a.to_vec(), vec![0])
    } else {
        (a[..half].to_vec(), a[half..].to_vec())
    }
}

fn karatsuba_lsb(a: &[u8], b: &[u8]) -> Vec<u8> {
    if a.len() < KARATSUBA_THRESHOLD || b.len() < KARATSUBA_THRESHOLD {
        return schoolbook_lsb(a, b);
    }

    let half = a.len().max(b.len()) / 2;
    let (a_lo, a_hi) = split_at_lsb(a, half);
    let (b_lo, b_hi) = split_at_lsb(b, half);

    let z0 = karatsuba_lsb(&a_lo, &b_lo);
    let z2 = karatsuba_lsb(&a_hi, &b_hi);
    let a_sum = add_lsb(&a_lo, &a_hi);
    let b_sum = add_lsb(&b_lo, &b_hi);
    let z1_raw = karatsuba_lsb(&a_sum, &b_sum);
    let z1 = sub_lsb(&sub_lsb(&z1_raw, &z0), &z2);

    let mut result = add_lsb(&z0, &shift_lsb(&z1, half));
    result = add_lsb(&result, &shift_lsb(&z2, half * 2));
    result
}

/// Multiplies two most-significant-digit-first digit vectors (no sign, no
/// decimal point — plain integers), returning a vector padded up to
/// exactly `a.len() + b.len()` digits.
fn mul_digits(a: &[u8], b: &[u8]) -> Vec<u8> {
    let a_lsb: Vec<u8> = a.iter().rev().copied().collect();
    let b_lsb: Vec<u8> = b.iter().rev().copied().collect();
    let mut result_lsb = karatsuba_lsb(&a_lsb, &b_lsb);
    result_lsb.resize(a.len() + b.len(), 0);
    result_lsb.into_iter().rev().collect()
}

/// The exact product, carrying every digit (`a.scale() + b.scale()`
/// fractional digits, none discarded).
pub fn mul_full(a: &Decimal, b: &Decimal) -> Decimal {
    let product = mul_digits(&a.digits_full(), &b.digits_full());
    let scale = a.scale() + b.scale();
    let int_len = product.len() - scale;
    Decimal::from_parts(Sign::product(a.sign(), b.sign()), product, int_len, scale)
}

/// The product truncated (no rounding) to `scale` fractional digits.
pub fn mul(a: &Decimal, b: &Decimal, scale: usize) -> Decimal {
    mul_full(a, b).truncate_to_scale(scale)
}

impl Decimal {
    /// `self * other`, truncated to `scale` fractional digits. The
    /// evaluator's preferred entry point; [`std::ops::Mul`] below is exact
    /// (unscaled) and mainly useful internally and in tests.
    pub fn mul(&self, other: &Decimal, scale: usize) -> Decimal {
        mul(self, other, scale)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;
    fn mul(self, rhs: &Decimal) -> Decimal {
        mul_full(self, rhs)
    }
}

impl Mul for Decimal {
    type Output = Decimal;
    fn mul(self, rhs: Decimal) -> Decimal {
        mul_full(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_lossy(s)
    }

    #[test]
    fn schoolbook_range_multiplies_correctly() {
        assert_eq!((&d("12") * &d("13")).to_string(), "156");
        assert_eq!((&d("-7") * &d("6")).to_string(), "-42");
        assert_eq!((&d("1.5") * &d("2.4")).to_string(), "3.60");
    }

    #[test]
    fn multiplying_by_zero_is_zero() {
        assert_eq!((&d("12345") * &d("0")).to_string(), "0");
    }

    #[test]
    fn truncates_to_requested_scale_without_rounding() {
        let product = mul(&d("1.23"), &d("1.23"), 2);
        assert_eq!(product.to_string(), "1.51");
    }

    #[test]
    fn large_operands_cross_the_karatsuba_threshold() {
        // (10^60 - 1)^2 = 10^120 - 2*10^60 + 1
        let a = d(&"9".repeat(60));
        let product = &a * &a;
        let expected = format!("{}8{}01", "9".repeat(59), "0".repeat(58));
        assert_eq!(product.to_string(), expected);
    }
}
