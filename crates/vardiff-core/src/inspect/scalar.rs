//! Terminal values.
//!
//! `Scalar` is the closed set of value kinds the engine compares by equality
//! and never decomposes.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// A terminal value borrowed from the compared graph.
#[derive(Debug, Clone, Copy)]
pub enum Scalar<'a> {
    Bool(bool),
    Char(char),
    Int(i128),
    UInt(u128),
    Float(f64),
    Text(&'a str),
    Uuid(Uuid),
    Decimal(Decimal),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
    /// Signed duration in nanoseconds
    Span(i128),
}

fn float_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn float_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for Scalar<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => float_eq(*a, *b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::OffsetDateTime(a), Self::OffsetDateTime(b)) => a == b,
            (Self::Span(a), Self::Span(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar<'_> {}

impl Hash for Scalar<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Bool(v) => v.hash(state),
            Scalar::Char(v) => v.hash(state),
            Scalar::Int(v) => v.hash(state),
            Scalar::UInt(v) => v.hash(state),
            Scalar::Float(v) => float_bits(*v).hash(state),
            Scalar::Text(v) => v.hash(state),
            Scalar::Uuid(v) => v.hash(state),
            Scalar::Decimal(v) => v.hash(state),
            Scalar::Date(v) => v.hash(state),
            Scalar::Time(v) => v.hash(state),
            Scalar::DateTime(v) => v.hash(state),
            Scalar::OffsetDateTime(v) => v.hash(state),
            Scalar::Span(v) => v.hash(state),
        }
    }
}

impl Scalar<'_> {
    fn rank(&self) -> u8 {
        match self {
            Scalar::Bool(_) => 0,
            Scalar::Char(_) => 1,
            Scalar::Int(_) => 2,
            Scalar::UInt(_) => 3,
            Scalar::Float(_) => 4,
            Scalar::Text(_) => 5,
            Scalar::Uuid(_) => 6,
            Scalar::Decimal(_) => 7,
            Scalar::Date(_) => 8,
            Scalar::Time(_) => 9,
            Scalar::DateTime(_) => 10,
            Scalar::OffsetDateTime(_) => 11,
            Scalar::Span(_) => 12,
        }
    }

    /// Total order that agrees with `==`.
    ///
    /// Orders by kind first. Decimals order by their normalized digits, not
    /// numerically; the order only has to be deterministic.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Char(a), Self::Char(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::UInt(a), Self::UInt(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => {
                f64::from_bits(float_bits(*a)).total_cmp(&f64::from_bits(float_bits(*b)))
            }
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Uuid(a), Self::Uuid(b)) => a.cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => {
                let (a, b) = (a.normalized(), b.normalized());
                (a.scale, a.mantissa).cmp(&(b.scale, b.mantissa))
            }
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (Self::OffsetDateTime(a), Self::OffsetDateTime(b)) => a.cmp(b),
            (Self::Span(a), Self::Span(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Char(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::UInt(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(v) => f.write_str(v),
            Scalar::Uuid(v) => write!(f, "{}", v),
            Scalar::Decimal(v) => write!(f, "{}", v),
            Scalar::Date(v) => write!(f, "{}", v),
            Scalar::Time(v) => write!(f, "{}", v),
            Scalar::DateTime(v) => write!(f, "{}", v),
            Scalar::OffsetDateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Scalar::Span(v) => write!(f, "{}ns", v),
        }
    }
}

/// Fixed-point decimal: `mantissa * 10^-scale`.
///
/// Equality and hashing are numeric, so `1.0` and `1.00` are the same value.
#[derive(Debug, Clone, Copy)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    pub const fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Same value with trailing fractional zeros removed
    pub fn normalized(&self) -> Self {
        let mut mantissa = self.mantissa;
        let mut scale = self.scale;
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        Self { mantissa, scale }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.normalized(), other.normalized());
        a.mantissa == b.mantissa && a.scale == b.scale
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalized();
        n.mantissa.hash(state);
        n.scale.hash(state);
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }
        let padded = format!("{:0>width$}", digits, width = scale + 1);
        let (whole, frac) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, whole, frac)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid decimal literal: {0:?}")]
pub struct ParseDecimalError(String);

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDecimalError(s.to_string());
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let digits = format!("{}{}", whole, frac);
        let magnitude: i128 = digits.parse().map_err(|_| invalid())?;
        let scale = u32::try_from(frac.len()).map_err(|_| invalid())?;
        let mantissa = if negative { -magnitude } else { magnitude };
        Ok(Decimal::new(mantissa, scale))
    }
}
