//! Arbitrary-precision signed decimal arithmetic.
//!
//! A [`Decimal`] is a digit-vector number: a sign, an integer-digit count,
//! a fractional-digit count (the *scale*), and a flat array of base-10
//! digits. The integer part is kept free of leading zeros (a lone `0` is
//! retained when the integer part is zero); the fractional part is never
//! trimmed — scale is tracked explicitly and `to_string` always emits
//! exactly that many fractional digits.
//!
//! Values are reference-counted (`Rc`) rather than deep-copied on clone;
//! every arithmetic operation still returns a freshly allocated result, so
//! there is never any aliased mutation to worry about.

mod arith;
mod div;
mod mul;
mod pow;
mod sqrt;
mod transcendental;

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

/// Sign of a [`Decimal`]. Zero is always represented as `Pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Pos,
    Neg,
}

impl Sign {
    pub fn negated(self) -> Sign {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }

    /// The sign of `a * b` / `a / b`, with zero treated as positive.
    pub fn product(a: Sign, b: Sign) -> Sign {
        if a == b { Sign::Pos } else { Sign::Neg }
    }
}

#[derive(Debug)]
struct DecimalInner {
    sign: Sign,
    int_len: usize,
    scale: usize,
    digits: Box<[u8]>,
}

/// An arbitrary-precision signed decimal number.
///
/// Cheap to clone (an `Rc` bump); every operation below allocates a fresh
/// result rather than mutating its operands.
#[derive(Debug, Clone)]
pub struct Decimal(Rc<DecimalInner>);

static ZERO: LazyLock<Decimal> = LazyLock::new(|| Decimal::from_parts(Sign::Pos, vec![0], 1, 0));
static ONE: LazyLock<Decimal> = LazyLock::new(|| Decimal::from_parts(Sign::Pos, vec![1], 1, 0));
static TWO: LazyLock<Decimal> = LazyLock::new(|| Decimal::from_parts(Sign::Pos, vec![2], 1, 0));

// At least 20 significant digits, per the data model's constant requirement.
static E: LazyLock<Decimal> =
    LazyLock::new(|| Decimal::from_str_lossy("2.7182818284590452354"));
static PI: LazyLock<Decimal> =
    LazyLock::new(|| Decimal::from_str_lossy("3.1415926535897932385"));

impl Decimal {
    /// A fresh copy of the immutable constant `0`.
    pub fn zero() -> Decimal {
        ZERO.clone()
    }

    /// A fresh copy of the immutable constant `1`.
    pub fn one() -> Decimal {
        ONE.clone()
    }

    /// A fresh copy of the immutable constant `2`.
    pub fn two() -> Decimal {
        TWO.clone()
    }

    /// A fresh copy of the limited-precision constant `e`.
    pub fn e() -> Decimal {
        E.clone()
    }

    /// A fresh copy of the limited-precision constant `pi`.
    pub fn pi() -> Decimal {
        PI.clone()
    }

    /// Allocates a zero-valued number with the given integer and fractional
    /// digit counts.
    pub(crate) fn new(int_len: usize, scale: usize) -> Decimal {
        debug_assert!(int_len >= 1);
        Decimal::from_parts(Sign::Pos, vec![0u8; int_len + scale], int_len, scale)
    }

    /// Builds a number from its raw parts, normalising away leading zeros
    /// in the integer part (keeping one digit if the integer part is all
    /// zero) and forcing the sign to `Pos` if the whole value is zero.
    pub(crate) fn from_parts(sign: Sign, mut digits: Vec<u8>, int_len: usize, scale: usize) -> Decimal {
        debug_assert_eq!(digits.len(), int_len + scale);

        let mut leading = 0;
        while leading + 1 < int_len && digits[leading] == 0 {
            leading += 1;
        }
        if leading > 0 {
            digits.drain(0..leading);
        }
        let int_len = int_len - leading;

        let is_zero = digits.iter().all(|&d| d == 0);
        let sign = if is_zero { Sign::Pos } else { sign };

        Decimal(Rc::new(DecimalInner {
            sign,
            int_len,
            scale,
            digits: digits.into_boxed_slice(),
        }))
    }

    pub fn sign(&self) -> Sign {
        self.0.sign
    }

    pub fn int_len(&self) -> usize {
        self.0.int_len
    }

    pub fn scale(&self) -> usize {
        self.0.scale
    }

    /// The integer-part digits, most significant first.
    pub fn int_digits(&self) -> &[u8] {
        &self.0.digits[..self.0.int_len]
    }

    /// The fractional-part digits, most significant first.
    pub fn frac_digits(&self) -> &[u8] {
        &self.0.digits[self.0.int_len..]
    }

    /// A fresh owned copy of the full digit array (integer then fractional).
    pub(crate) fn digits_full(&self) -> Vec<u8> {
        self.0.digits.to_vec()
    }

    /// `true` iff every digit is zero (sign is disregarded: the invariant
    /// is that zero always carries [`Sign::Pos`], but callers may have a
    /// not-yet-normalised vector on hand).
    pub fn is_zero(&self) -> bool {
        self.0.digits.iter().all(|&d| d == 0)
    }

    /// `true` iff the value is negative. Zero is never negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.sign == Sign::Neg
    }

    /// Returns a value equal in magnitude with the opposite sign (no-op on
    /// zero, which has no sign).
    pub fn negated(&self) -> Decimal {
        if self.is_zero() {
            return self.clone();
        }
        Decimal::from_parts(self.sign().negated(), self.digits_full(), self.int_len(), self.scale())
    }

    /// A deep copy, independent of `self`'s underlying allocation. Plain
    /// [`Clone::clone`] only bumps the refcount; use this when the caller
    /// genuinely needs a distinct allocation (none of the operations in
    /// this crate mutate in place, so this is rarely required).
    pub fn replicate(&self) -> Decimal {
        Decimal::from_parts(self.sign(), self.digits_full(), self.int_len(), self.scale())
    }

    /// Moves the decimal point: positive `positions` multiplies by
    /// `10^positions` (digits move from the fractional part into the
    /// integer part, padding with zeros if there aren't enough fractional
    /// digits to move); negative divides by `10^-positions`.
    pub fn shift(&self, positions: i64) -> Decimal {
        if positions == 0 {
            return self.clone();
        }

        let sign = self.sign();
        let mut full = self.digits_full();
        let mut int_len = self.int_len() as i64;
        let mut scale = self.scale() as i64;

        if positions > 0 {
            if positions <= scale {
                int_len += positions;
                scale -= positions;
            } else {
                let pad = positions - scale;
                full.extend(std::iter::repeat(0u8).take(pad as usize));
                int_len += positions;
                scale = 0;
            }
        } else {
            let p = -positions;
            if p < int_len {
                int_len -= p;
                scale += p;
            } else {
                let pad = p - int_len + 1;
                let mut new_full = vec![0u8; pad as usize];
                new_full.extend(full);
                full = new_full;
                scale += p;
                int_len = 1;
            }
        }

        Decimal::from_parts(sign, full, int_len as usize, scale as usize)
    }

    /// Truncates (no rounding) the fractional part to exactly `new_scale`
    /// digits, padding with zeros if it currently carries fewer.
    pub(crate) fn truncate_to_scale(&self, new_scale: usize) -> Decimal {
        let cur_scale = self.scale();
        if new_scale == cur_scale {
            return self.clone();
        }
        let mut full = self.digits_full();
        if new_scale > cur_scale {
            full.extend(std::iter::repeat(0u8).take(new_scale - cur_scale));
        } else {
            full.truncate(self.int_len() + new_scale);
        }
        Decimal::from_parts(self.sign(), full, self.int_len(), new_scale)
    }

    /// Rounds the fractional part to `new_scale` digits (half-up on the
    /// first discarded digit), used by [`sqrt`](Decimal::sqrt) per the
    /// spec's "truncated with rounding" finishing step.
    pub(crate) fn round_to_scale(&self, new_scale: usize) -> Decimal {
        let cur_scale = self.scale();
        if new_scale >= cur_scale {
            return self.truncate_to_scale(new_scale);
        }

        let drop = cur_scale - new_scale;
        let mut full = self.digits_full();
        let round_up = full[self.int_len() + new_scale] >= 5;
        full.truncate(self.int_len() + new_scale);

        if round_up {
            let mut i = full.len();
            loop {
                if i == 0 {
                    full.insert(0, 1);
                    break;
                }
                i -= 1;
                if full[i] == 9 {
                    full[i] = 0;
                } else {
                    full[i] += 1;
                    break;
                }
            }
        }

        let int_len = full.len() - new_scale;
        let _ = drop;
        Decimal::from_parts(self.sign(), full, int_len, new_scale)
    }

    /// True when, up to `scale` fractional digits, only the final examined
    /// digit is allowed to exceed zero (and even then only up to `1`).
    /// This tolerance (rather than requiring every digit to be exactly
    /// zero) is deliberate: it is what lets Newton's iteration in
    /// [`sqrt`](Decimal::sqrt) terminate instead of oscillating forever on
    /// a borderline last digit.
    pub fn is_near_zero(&self, scale: usize) -> bool {
        let frac = self.frac_digits();
        let end = scale.min(self.scale());

        if scale > 0 && self.scale() >= scale {
            if frac[scale - 1] > 1 {
                return false;
            }
        }
        for &d in frac.iter().take(end.saturating_sub(1)) {
            if d != 0 {
                return false;
            }
        }
        true
    }

    /// Parses a base-10 literal: optional sign, optional leading zeros,
    /// integer digits, optional `.` and fractional digits. Any leftover
    /// byte after a would-be number — or an entirely unparsable string —
    /// yields zero rather than an error ("garbage in, zero out").
    pub fn from_str_lossy(s: &str) -> Decimal {
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0usize;
        let sign = match chars.first() {
            Some('+') => {
                i += 1;
                Sign::Pos
            }
            Some('-') => {
                i += 1;
                Sign::Neg
            }
            _ => Sign::Pos,
        };

        while chars.get(i) == Some(&'0') {
            i += 1;
        }

        let int_start = i;
        while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
        let raw_int_len = i - int_start;

        if chars.get(i) == Some(&'.') {
            i += 1;
        }
        let frac_start = i;
        while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
        let scale = i - frac_start;

        if i != chars.len() || raw_int_len + scale == 0 {
            return Decimal::zero();
        }

        let zero_int = raw_int_len == 0;
        let int_len = if zero_int { 1 } else { raw_int_len };

        let mut digits = Vec::with_capacity(int_len + scale);
        if zero_int {
            digits.push(0);
        }
        for &c in &chars[int_start..int_start + raw_int_len] {
            digits.push(c.to_digit(10).unwrap() as u8);
        }
        for &c in &chars[frac_start..frac_start + scale] {
            digits.push(c.to_digit(10).unwrap() as u8);
        }

        Decimal::from_parts(sign, digits, int_len, scale)
    }

    /// Round-trips through [`f64`]'s default formatting.
    pub fn from_f64_lossy(value: f64) -> Decimal {
        Decimal::from_str_lossy(&format!("{value}"))
    }

    /// Round-trips through [`i64`]'s decimal formatting.
    pub fn from_i64(value: i64) -> Decimal {
        Decimal::from_str_lossy(&value.to_string())
    }

    /// Converts to the nearest [`f64`], at the cost of the usual binary
    /// floating-point precision loss. Used internally by the
    /// transcendental functions, which bridge through host doubles.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(0.0)
    }

    fn magnitude_cmp(a: &Decimal, b: &Decimal) -> Ordering {
        let a_int = strip_leading_zeros(a.int_digits());
        let b_int = strip_leading_zeros(b.int_digits());
        if a_int.len() != b_int.len() {
            return a_int.len().cmp(&b_int.len());
        }
        match a_int.cmp(b_int) {
            Ordering::Equal => {}
            other => return other,
        }

        let a_frac = strip_trailing_zeros(a.frac_digits());
        let b_frac = strip_trailing_zeros(b.frac_digits());
        let min_len = a_frac.len().min(b_frac.len());
        match a_frac[..min_len].cmp(&b_frac[..min_len]) {
            Ordering::Equal => a_frac.len().cmp(&b_frac.len()),
            other => other,
        }
    }

    /// Three-valued comparison respecting sign (use [`Decimal::magnitude_cmp`]
    /// via [`Decimal::cmp_unsigned`] to compare absolute values only).
    pub fn cmp_signed(&self, other: &Decimal) -> Ordering {
        let a_zero = self.is_zero();
        let b_zero = other.is_zero();
        if a_zero && b_zero {
            return Ordering::Equal;
        }
        if a_zero {
            return if other.sign() == Sign::Neg { Ordering::Greater } else { Ordering::Less };
        }
        if b_zero {
            return if self.sign() == Sign::Neg { Ordering::Less } else { Ordering::Greater };
        }
        if self.sign() != other.sign() {
            return if self.sign() == Sign::Neg { Ordering::Less } else { Ordering::Greater };
        }
        let m = Decimal::magnitude_cmp(self, other);
        if self.sign() == Sign::Neg { m.reverse() } else { m }
    }

    /// Compares absolute values, ignoring sign.
    pub fn cmp_unsigned(&self, other: &Decimal) -> Ordering {
        Decimal::magnitude_cmp(self, other)
    }
}

fn strip_leading_zeros(digits: &[u8]) -> &[u8] {
    let first_nonzero = digits.iter().position(|&d| d != 0).unwrap_or(digits.len());
    &digits[first_nonzero..]
}

fn strip_trailing_zeros(digits: &[u8]) -> &[u8] {
    let last_nonzero = digits.iter().rposition(|&d| d != 0).map(|i| i + 1).unwrap_or(0);
    &digits[..last_nonzero]
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_signed(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_signed(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_signed(other)
    }
}

impl std::str::FromStr for Decimal {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Decimal::from_str_lossy(s))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        if self.sign() == Sign::Neg {
            write!(f, "-")?;
        }
        for &d in self.int_digits() {
            write!(f, "{d}")?;
        }
        if self.scale() > 0 {
            write!(f, ".")?;
            for &d in self.frac_digits() {
                write!(f, "{d}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(Decimal::from_str_lossy("123").to_string(), "123");
        assert_eq!(Decimal::from_str_lossy("-123").to_string(), "-123");
        assert_eq!(Decimal::from_str_lossy("+123").to_string(), "123");
    }

    #[test]
    fn strips_leading_zeros_but_keeps_scale() {
        assert_eq!(Decimal::from_str_lossy("007.100").to_string(), "7.100");
        assert_eq!(Decimal::from_str_lossy("000").to_string(), "0");
    }

    #[test]
    fn leading_dot_is_valid() {
        assert_eq!(Decimal::from_str_lossy(".5").to_string(), "0.5");
    }

    #[test]
    fn garbage_input_is_zero_not_an_error() {
        assert_eq!(Decimal::from_str_lossy("12a").to_string(), "0");
        assert_eq!(Decimal::from_str_lossy("1.2.3").to_string(), "0");
        assert_eq!(Decimal::from_str_lossy("").to_string(), "0");
        assert_eq!(Decimal::from_str_lossy("--1").to_string(), "0");
    }

    #[test]
    fn zero_always_prints_bare_zero_regardless_of_scale() {
        let z = Decimal::new(1, 4);
        assert_eq!(z.to_string(), "0");
    }

    #[test]
    fn equality_ignores_trailing_fractional_zeros() {
        assert_eq!(Decimal::from_str_lossy("1.50"), Decimal::from_str_lossy("1.5"));
        assert!(Decimal::from_str_lossy("1.5") < Decimal::from_str_lossy("1.51"));
        assert!(Decimal::from_str_lossy("-1.5") < Decimal::from_str_lossy("1.5"));
        assert!(Decimal::from_str_lossy("-2") < Decimal::from_str_lossy("-1"));
    }

    #[test]
    fn near_zero_tolerates_trailing_one() {
        let almost = Decimal::from_str_lossy("0.0001");
        assert!(almost.is_near_zero(4));
        let two_in_last = Decimal::from_str_lossy("0.0002");
        assert!(!two_in_last.is_near_zero(4));
        let nonzero_before_last = Decimal::from_str_lossy("0.0101");
        assert!(!nonzero_before_last.is_near_zero(4));
    }

    #[test]
    fn shift_moves_the_decimal_point() {
        assert_eq!(Decimal::from_str_lossy("1.23").shift(2).to_string(), "123");
        assert_eq!(Decimal::from_str_lossy("123").shift(-2).to_string(), "1.23");
        assert_eq!(Decimal::from_str_lossy("5").shift(3).to_string(), "5000");
    }

    #[test]
    fn round_to_scale_rounds_half_up() {
        assert_eq!(Decimal::from_str_lossy("1.25").round_to_scale(1).to_string(), "1.3");
        assert_eq!(Decimal::from_str_lossy("1.24").round_to_scale(1).to_string(), "1.2");
        assert_eq!(Decimal::from_str_lossy("9.99").round_to_scale(1).to_string(), "10.0");
    }
}
