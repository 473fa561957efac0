//! Transcendental functions, bridged through host [`f64`] arithmetic.
//!
//! Arbitrary-precision trigonometry, logarithms, and exponentials are out
//! of scope for the digit-vector representation; these five functions
//! convert to a double, call the matching `f64` method, and convert back.
//! A domain error (`ln` of a non-positive number, for instance) becomes
//! `NaN`/`±inf` on the `f64` side, which the round trip back through
//! [`Decimal::from_f64_lossy`] silently turns into zero — the same
//! "garbage in, zero out" contract numeric-literal parsing already uses,
//! rather than a dedicated error variant for each transcendental's domain.

use super::Decimal;

impl Decimal {
    pub fn sin(&self, scale: usize) -> Decimal {
        Decimal::from_f64_lossy(self.to_f64().sin()).truncate_to_scale(scale)
    }

    pub fn cos(&self, scale: usize) -> Decimal {
        Decimal::from_f64_lossy(self.to_f64().cos()).truncate_to_scale(scale)
    }

    pub fn atan(&self, scale: usize) -> Decimal {
        Decimal::from_f64_lossy(self.to_f64().atan()).truncate_to_scale(scale)
    }

    pub fn ln(&self, scale: usize) -> Decimal {
        Decimal::from_f64_lossy(self.to_f64().ln()).truncate_to_scale(scale)
    }

    pub fn exp(&self, scale: usize) -> Decimal {
        Decimal::from_f64_lossy(self.to_f64().exp()).truncate_to_scale(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_lossy(s)
    }

    #[test]
    fn sin_cos_of_zero() {
        // Zero always prints bare "0", regardless of the scale it carries.
        assert_eq!(d("0").sin(4).to_string(), "0");
        assert_eq!(d("0").cos(4).to_string(), "1.0000");
    }

    #[test]
    fn ln_of_e_is_approximately_one() {
        let result = Decimal::e().ln(8).to_f64();
        assert!((result - 1.0).abs() < 1e-6, "ln(e) ~= 1, got {result}");
    }

    #[test]
    fn exp_of_zero_is_one() {
        assert_eq!(d("0").exp(4).to_string(), "1.0000");
    }

    #[test]
    fn ln_of_a_non_positive_number_falls_back_to_zero() {
        assert_eq!(d("-1").ln(4).to_string(), "0");
        assert_eq!(d("0").ln(4).to_string(), "0");
    }

    #[test]
    fn atan_of_one() {
        // atan(1) == pi/4 ~= 0.785398...; truncated, not rounded, to scale 4.
        let result = d("1").atan(4);
        assert_eq!(result.to_string(), "0.7853");
    }
}
