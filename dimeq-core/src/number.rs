//! Numbers with exact and floating representations
//!
//! Values parsed from text or built from integers are exact rationals
//! (dashu-ratio's RBig). Anything involving an irrational factor such as
//! 2π is carried as an f64. Arithmetic keeps exact operands exact and
//! promotes to float as soon as one operand is a float.

use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Largest decimal exponent accepted when parsing exact literals
const MAX_DECIMAL_SCALE: u64 = 4096;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Non-finite value: {0}")]
    NonFinite(f64),

    #[error("Cannot represent {value} as {target} without loss")]
    InexactCast { value: String, target: &'static str },
}

/// A numeric payload: exact rational or binary float
#[derive(Debug, Clone)]
pub enum Number {
    /// Exact rational value
    Exact(RBig),
    /// Approximate value
    Float(f64),
}

impl Number {
    // ========== Construction ==========

    /// Create from string representation
    /// Supports: "123", "3.14", "3/2", "1.602176634e-19", "-42"
    ///
    /// The result is always exact.
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        if let Some((num, den)) = s.split_once('/') {
            let num = Self::parse_decimal(num.trim(), s)?;
            let den = Self::parse_decimal(den.trim(), s)?;
            if den == RBig::ZERO {
                return Err(NumberError::DivisionByZero);
            }
            return Ok(Number::Exact(num / den));
        }

        Ok(Number::Exact(Self::parse_decimal(s, s)?))
    }

    /// Parse "[-+]digits[.digits][e[-+]digits]" into an exact rational
    fn parse_decimal(s: &str, original: &str) -> Result<RBig, NumberError> {
        let err = || NumberError::ParseError(original.to_string());

        let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exp: i64 = s[pos + 1..].parse().map_err(|_| err())?;
                (&s[..pos], exp)
            }
            None => (s, 0),
        };

        let (negative, mantissa) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
            return Err(err());
        }

        let digits = format!("{}{}", int_part, frac_part);
        let magnitude: UBig = digits.parse().map_err(|_| err())?;
        let mut numerator = IBig::from(magnitude);
        if negative {
            numerator = -numerator;
        }

        let scale = i64::try_from(frac_part.len()).ok()
            .and_then(|len| exponent.checked_sub(len))
            .filter(|scale| scale.unsigned_abs() <= MAX_DECIMAL_SCALE)
            .ok_or_else(err)?;
        let ten = UBig::from(10u8);
        let shift = scale.unsigned_abs() as usize;
        let value = if scale >= 0 {
            RBig::from(numerator * IBig::from(ten.pow(shift)))
        } else {
            RBig::from_parts(numerator, ten.pow(shift))
        };
        Ok(value)
    }

    /// Create an exact integer
    pub fn from_i64(n: i64) -> Self {
        Number::Exact(RBig::from(IBig::from(n)))
    }

    /// Create an exact ratio `num / den`
    pub fn from_ratio(num: i64, den: i64) -> Result<Self, NumberError> {
        if den == 0 {
            return Err(NumberError::DivisionByZero);
        }
        let sign = if den < 0 { -1 } else { 1 };
        let num = IBig::from(num) * IBig::from(sign);
        let den = UBig::from(den.unsigned_abs());
        Ok(Number::Exact(RBig::from_parts(num, den)))
    }

    /// Create a float value
    pub fn from_f64(f: f64) -> Self {
        Number::Float(f)
    }

    /// 2π, the factor between linear and angular conventions
    pub fn tau() -> Self {
        Number::Float(std::f64::consts::TAU)
    }

    // ========== Predicates ==========

    /// Check if the value is held exactly
    pub fn is_exact(&self) -> bool {
        matches!(self, Number::Exact(_))
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Exact(r) => *r == RBig::ZERO,
            Number::Float(f) => *f == 0.0,
        }
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        match self {
            Number::Exact(r) => *r < RBig::ZERO,
            Number::Float(f) => *f < 0.0,
        }
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        match self {
            Number::Exact(r) => *r.denominator() == UBig::ONE,
            Number::Float(f) => f.is_finite() && f.fract() == 0.0,
        }
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a + b),
            _ => Number::Float(self.to_f64() + other.to_f64()),
        }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a - b),
            _ => Number::Float(self.to_f64() - other.to_f64()),
        }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a * b),
            _ => Number::Float(self.to_f64() * other.to_f64()),
        }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a / b),
            _ => Number::Float(self.to_f64() / other.to_f64()),
        })
    }

    /// Negation
    pub fn neg(&self) -> Self {
        match self {
            Number::Exact(r) => Number::Exact(-r.clone()),
            Number::Float(f) => Number::Float(-f),
        }
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Integer power, exact for exact bases
    pub fn pow(&self, exp: i32) -> Result<Self, NumberError> {
        if let Number::Float(f) = self {
            return Ok(Number::Float(f.powi(exp)));
        }

        let mut result = Self::from_i64(1);
        for _ in 0..exp.unsigned_abs() {
            result = result.mul(self);
        }

        if exp < 0 {
            Self::from_i64(1).checked_div(&result)
        } else {
            Ok(result)
        }
    }

    // ========== Conversion ==========

    /// Convert to f64 (nearest representable value for exact numbers)
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Exact(r) => r.to_f64().value(),
            Number::Float(f) => *f,
        }
    }

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        match self {
            Number::Exact(r) => r.numerator().clone().try_into().ok(),
            Number::Float(f) => {
                // i64::MAX as f64 rounds up to 2^63, which does not fit
                if *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Convert a float into the exact rational of its shortest decimal form
    pub fn to_exact(&self) -> Result<Self, NumberError> {
        match self {
            Number::Exact(_) => Ok(self.clone()),
            Number::Float(f) if !f.is_finite() => Err(NumberError::NonFinite(*f)),
            Number::Float(f) => Self::from_str(&format!("{:e}", f)),
        }
    }

    // ========== Display ==========

    /// Render as decimal string with specified decimal places
    pub fn as_decimal(&self, places: u32) -> String {
        if let Number::Exact(r) = self {
            if *r.denominator() == UBig::ONE {
                return r.numerator().to_string();
            }
        }

        let f = self.to_f64();
        // Handle very small non-zero numbers
        if f != 0.0 && f.abs() < 1e-6 {
            return self.as_sigfigs(places.max(1));
        }

        format!("{:.prec$}", f, prec = places as usize)
    }

    /// Render with N significant figures
    pub fn as_sigfigs(&self, sigfigs: u32) -> String {
        let f = self.to_f64();
        if f == 0.0 {
            return "0".to_string();
        }

        let sigfigs = sigfigs.max(1) as usize;
        let exp = f.abs().log10().floor() as i32;

        if (-3..=4).contains(&exp) {
            let decimal_places = if exp >= 0 {
                (sigfigs as i32 - exp - 1).max(0) as usize
            } else {
                sigfigs + (-exp - 1) as usize
            };
            format!("{:.prec$}", f, prec = decimal_places)
        } else {
            let mantissa = f / 10_f64.powi(exp);
            format!("{:.prec$}e{}", mantissa, exp, prec = sigfigs - 1)
        }
    }
}

/// Numeric types a converted magnitude can be stripped into
pub trait FromNumber: Sized {
    /// Name used in cast errors
    const NAME: &'static str;

    fn from_number(n: &Number) -> Result<Self, NumberError>;
}

impl FromNumber for Number {
    const NAME: &'static str = "Number";

    fn from_number(n: &Number) -> Result<Self, NumberError> {
        Ok(n.clone())
    }
}

impl FromNumber for f64 {
    const NAME: &'static str = "f64";

    fn from_number(n: &Number) -> Result<Self, NumberError> {
        Ok(n.to_f64())
    }
}

impl FromNumber for f32 {
    const NAME: &'static str = "f32";

    fn from_number(n: &Number) -> Result<Self, NumberError> {
        Ok(n.to_f64() as f32)
    }
}

impl FromNumber for i64 {
    const NAME: &'static str = "i64";

    fn from_number(n: &Number) -> Result<Self, NumberError> {
        n.to_i64().ok_or_else(|| NumberError::InexactCast {
            value: n.to_string(),
            target: Self::NAME,
        })
    }
}

impl FromNumber for RBig {
    const NAME: &'static str = "RBig";

    fn from_number(n: &Number) -> Result<Self, NumberError> {
        match n.to_exact()? {
            Number::Exact(r) => Ok(r),
            Number::Float(f) => Err(NumberError::NonFinite(f)),
        }
    }
}

// ========== Trait Implementations ==========

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Self::from_i64(n as i64)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Self::from_f64(f)
    }
}

impl From<RBig> for Number {
    fn from(r: RBig) -> Self {
        Number::Exact(r)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Exact(r) => write!(f, "{}", r),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => a == b,
            _ => self.to_f64() == other.to_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Some(a.cmp(b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}
