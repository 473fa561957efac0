//! Integer exponentiation by repeated multiplication.
//!
//! A fractional exponent is rejected outright (`CalcError::NonIntegerExponent`);
//! a negative exponent computes the positive power first and then takes its
//! reciprocal at the requested scale, so `2 ^ -2` divides `1` by `2 ^ 2`.

use super::mul;
use super::Decimal;
use crate::diagnostics::CalcError;

fn is_integer_valued(value: &Decimal) -> bool {
    value.frac_digits().iter().all(|&d| d == 0)
}

fn magnitude_as_u64(value: &Decimal) -> u64 {
    let mut v: u64 = 0;
    for &d in value.int_digits() {
        v = v.saturating_mul(10).saturating_add(d as u64);
    }
    v
}

impl Decimal {
    /// `self ^ exponent`, truncated to `scale` fractional digits.
    ///
    /// `exponent` must carry no nonzero fractional digits; fractional
    /// exponents (roots via `^`) are out of scope and reported as
    /// [`CalcError::NonIntegerExponent`].
    pub fn pow(&self, exponent: &Decimal, scale: usize) -> Result<Decimal, CalcError> {
        if !is_integer_valued(exponent) {
            return Err(CalcError::NonIntegerExponent);
        }

        let magnitude = magnitude_as_u64(exponent);
        let mut result = Decimal::one();
        for _ in 0..magnitude {
            result = mul::mul_full(&result, self);
        }

        if exponent.is_negative() {
            Decimal::one().div(&result, scale)
        } else {
            Ok(result.truncate_to_scale(scale))
        }
    }
}
