use serde::{Deserialize, Serialize};
use std::{fmt, iter::Sum, str::FromStr};
use thiserror::Error;

// Scaling factor for fixed-point arithmetic
// Using 10000 for easy decimal representation (4 decimal places)
pub const SCALE: i64 = 10_000;
const SCALE_DIGITS: usize = 4;

/// Fixed-point money amount with 4 decimal places of precision.
///
/// Bankrolls, wagers and payouts are all expressed in this type so that
/// settlement is exact and reproducible across runs. Intermediate products use
/// `i128` to avoid overflow on ratio math.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Decimal(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("invalid decimal: {0}")]
    Invalid(String),
    #[error("decimal out of range: {0}")]
    OutOfRange(String),
    #[error("too many fractional digits (max 4): {0}")]
    Precision(String),
}

impl Decimal {
    pub const ZERO: Decimal = Decimal(0);
    pub const CENT: Decimal = Decimal(SCALE / 100);

    /// Create from an integer value
    pub const fn from_int(value: i64) -> Self {
        Decimal(value * SCALE)
    }

    /// Create from a float, rounding to the nearest representable value.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * SCALE as f64).round();
        if scaled < i64::MIN as f64 || scaled > i64::MAX as f64 {
            return None;
        }
        Some(Decimal(scaled as i64))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Get the raw scaled value
    pub const fn raw(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply by `numerator / denominator`, truncating toward zero.
    pub fn mul_ratio(self, numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Decimal(0);
        }
        let scaled = (self.0 as i128) * (numerator as i128) / (denominator as i128);
        Decimal(scaled as i64)
    }

    /// Multiply by `numerator / denominator`, rounding up to the next whole
    /// multiple of `step`. Only meaningful for non-negative amounts.
    pub fn mul_ratio_ceil(self, numerator: u32, denominator: u32, step: Decimal) -> Self {
        if denominator == 0 || step.0 <= 0 {
            return Decimal(0);
        }
        let product = (self.0 as i128) * (numerator as i128);
        let unit = (denominator as i128) * (step.0 as i128);
        let steps = (product + unit - 1).div_euclid(unit);
        Decimal((steps * step.0 as i128) as i64)
    }

    /// Divide by an integer
    pub fn div_int(self, other: i64) -> Self {
        if other == 0 {
            return Decimal(0);
        }
        Decimal(self.0 / other)
    }
}

impl std::ops::Add for Decimal {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Decimal(self.0 + other.0)
    }
}

impl std::ops::AddAssign for Decimal {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::ops::Sub for Decimal {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Decimal(self.0 - other.0)
    }
}

impl std::ops::SubAssign for Decimal {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl std::ops::Neg for Decimal {
    type Output = Self;
    fn neg(self) -> Self {
        Decimal(-self.0)
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, |acc, value| acc + value)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl TryFrom<f64> for Decimal {
    type Error = DecimalError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::from_f64(value).ok_or_else(|| DecimalError::OutOfRange(value.to_string()))
    }
}

impl From<Decimal> for f64 {
    fn from(value: Decimal) -> Self {
        value.to_f64()
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(DecimalError::Invalid(s.to_string()));
        }
        if frac.len() > SCALE_DIGITS {
            return Err(DecimalError::Precision(s.to_string()));
        }

        let out_of_range = || DecimalError::OutOfRange(s.to_string());
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };
        let mut frac_raw: i64 = 0;
        for (idx, b) in frac.bytes().enumerate() {
            frac_raw += (b - b'0') as i64 * 10i64.pow((SCALE_DIGITS - 1 - idx) as u32);
        }
        let raw = whole
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac_raw))
            .ok_or_else(out_of_range)?;
        Ok(Decimal(if negative { -raw } else { raw }))
    }
}

impl fmt::Display for Decimal {
    /// Renders with the requested precision (default 2, max 4), rounding half
    /// away from zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2).min(SCALE_DIGITS);
        let divisor = 10u128.pow((SCALE_DIGITS - precision) as u32);
        let magnitude = self.0.unsigned_abs() as u128;
        let rounded = (magnitude + divisor / 2) / divisor;
        let unit = 10u128.pow(precision as u32);
        let sign = if self.0 < 0 && rounded != 0 { "-" } else { "" };
        if precision == 0 {
            write!(f, "{sign}{rounded}")
        } else {
            write!(
                f,
                "{sign}{}.{:0width$}",
                rounded / unit,
                rounded % unit,
                width = precision
            )
        }
    }
}
