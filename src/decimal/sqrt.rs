//! Square root via Newton's method.
//!
//! Iterates `g_new = (g + self/g) / 2` at a working scale a couple of
//! digits deeper than the caller asked for, seeded from the host-double
//! square root, and stops once successive iterates are
//! [near-zero apart](Decimal::is_near_zero) at that working scale. The
//! final value is rounded (not merely truncated) down to the requested
//! scale, per the "truncated with rounding" finishing step.

use super::Decimal;
use crate::diagnostics::CalcError;

/// Newton iterations rarely need more than a handful of steps at any
/// reasonable scale; this is a generous backstop against a pathological
/// seed that never quite satisfies the near-zero tolerance.
const MAX_ITERATIONS: usize = 500;

impl Decimal {
    /// `sqrt(self)`, rounded to `scale` fractional digits.
    pub fn sqrt(&self, scale: usize) -> Result<Decimal, CalcError> {
        if self.is_negative() {
            return Err(CalcError::NegativeSqrt);
        }
        if self.is_zero() {
            return Ok(Decimal::zero().truncate_to_scale(scale));
        }

        let working_scale = scale + 2;

        let seed = self.to_f64().sqrt();
        let mut g = if seed.is_finite() && seed > 0.0 {
            Decimal::from_f64_lossy(seed).truncate_to_scale(working_scale)
        } else {
            Decimal::one().truncate_to_scale(working_scale)
        };
        if g.is_zero() {
            g = Decimal::one().truncate_to_scale(working_scale);
        }

        let two = Decimal::two();
        for _ in 0..MAX_ITERATIONS {
            let quotient = self.div(&g, working_scale)?;
            let sum = &g + &quotient;
            let g_new = sum.div(&two, working_scale)?;
            let diff = &g_new - &g;
            g = g_new;
            if diff.is_near_zero(working_scale) {
                break;
            }
        }

        Ok(g.round_to_scale(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_lossy(s)
    }

    #[test]
    fn negative_input_is_an_error() {
        assert_eq!(d("-1").sqrt(4).unwrap_err(), CalcError::NegativeSqrt);
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(d("0").sqrt(4).unwrap().to_string(), "0");
    }

    #[test]
    fn perfect_squares() {
        assert_eq!(d("4").sqrt(4).unwrap().to_string(), "2.0000");
        assert_eq!(d("144").sqrt(2).unwrap().to_string(), "12.00");
    }

    #[test]
    fn irrational_root_to_several_digits() {
        assert_eq!(d("2").sqrt(9).unwrap().to_string(), "1.414213562");
    }
}
