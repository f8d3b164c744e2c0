//! Numeric abstraction with a pluggable backend.
//!
//! Every value that takes part in a computation is a [`Num`]. A [`NumBackend`]
//! is the explicit numeric context: series, order builders and criteria take
//! it (or read it off an existing value) instead of consulting any global
//! factory. Arithmetic between two different backends is an error, never a
//! silent conversion.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use super::error::TradescoreError;

/// Tolerance used by [`Num::is_equal`] on the double backend.
pub const DOUBLE_EPSILON: f64 = 0.00001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumBackend {
    /// IEEE-754 double precision.
    Double,
    /// 96-bit exact decimal.
    Decimal,
}

impl NumBackend {
    pub fn name(self) -> &'static str {
        match self {
            NumBackend::Double => "double",
            NumBackend::Decimal => "decimal",
        }
    }

    pub fn zero(self) -> Num {
        match self {
            NumBackend::Double => Num::Double(0.0),
            NumBackend::Decimal => Num::Decimal(Decimal::ZERO),
        }
    }

    pub fn num_of_i64(self, value: i64) -> Num {
        match self {
            NumBackend::Double => Num::Double(value as f64),
            NumBackend::Decimal => Num::Decimal(Decimal::from(value)),
        }
    }

    pub fn num_of_f64(self, value: f64) -> Result<Num, TradescoreError> {
        let invalid = || TradescoreError::InvalidNumber {
            literal: value.to_string(),
            backend: self,
        };
        if !value.is_finite() {
            return Err(invalid());
        }
        match self {
            NumBackend::Double => Ok(Num::Double(value)),
            NumBackend::Decimal => Decimal::from_f64(value)
                .map(|d| Num::Decimal(d.normalize()))
                .ok_or_else(invalid),
        }
    }

    /// Parses an integer or decimal literal such as `"50"` or `"-12.75"`.
    pub fn num_of_str(self, literal: &str) -> Result<Num, TradescoreError> {
        let trimmed = literal.trim();
        let invalid = || TradescoreError::InvalidNumber {
            literal: literal.to_string(),
            backend: self,
        };
        match self {
            NumBackend::Double => match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Num::Double(v)),
                _ => Err(invalid()),
            },
            NumBackend::Decimal => Decimal::from_str(trimmed)
                .map(Num::Decimal)
                .map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for NumBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "double" | "f64" => Ok(NumBackend::Double),
            "decimal" => Ok(NumBackend::Decimal),
            other => Err(format!(
                "unknown numeric backend '{other}' (expected decimal or double)"
            )),
        }
    }
}

/// An immutable numeric value tagged with its backend.
#[derive(Debug, Clone, Copy)]
pub enum Num {
    Double(f64),
    Decimal(Decimal),
}

impl Num {
    pub fn backend(&self) -> NumBackend {
        match self {
            Num::Double(_) => NumBackend::Double,
            Num::Decimal(_) => NumBackend::Decimal,
        }
    }

    pub fn add(&self, other: &Num) -> Result<Num, TradescoreError> {
        match (self, other) {
            (Num::Double(a), Num::Double(b)) => finite(a + b, "add"),
            (Num::Decimal(a), Num::Decimal(b)) => checked(a.checked_add(*b), "add"),
            _ => Err(self.incompatible(other)),
        }
    }

    pub fn subtract(&self, other: &Num) -> Result<Num, TradescoreError> {
        match (self, other) {
            (Num::Double(a), Num::Double(b)) => finite(a - b, "subtract"),
            (Num::Decimal(a), Num::Decimal(b)) => checked(a.checked_sub(*b), "subtract"),
            _ => Err(self.incompatible(other)),
        }
    }

    pub fn multiply(&self, other: &Num) -> Result<Num, TradescoreError> {
        match (self, other) {
            (Num::Double(a), Num::Double(b)) => finite(a * b, "multiply"),
            (Num::Decimal(a), Num::Decimal(b)) => checked(a.checked_mul(*b), "multiply"),
            _ => Err(self.incompatible(other)),
        }
    }

    pub fn divide(&self, other: &Num) -> Result<Num, TradescoreError> {
        match (self, other) {
            (Num::Double(a), Num::Double(b)) => {
                if *b == 0.0 {
                    return Err(TradescoreError::DivisionByZero);
                }
                finite(a / b, "divide")
            }
            (Num::Decimal(a), Num::Decimal(b)) => {
                if b.is_zero() {
                    return Err(TradescoreError::DivisionByZero);
                }
                checked(a.checked_div(*b), "divide")
            }
            _ => Err(self.incompatible(other)),
        }
    }

    pub fn negate(&self) -> Num {
        match self {
            Num::Double(v) => Num::Double(-v),
            Num::Decimal(v) => Num::Decimal(-*v),
        }
    }

    pub fn compare_to(&self, other: &Num) -> Result<Ordering, TradescoreError> {
        match (self, other) {
            (Num::Double(a), Num::Double(b)) => Ok(a.total_cmp(b)),
            (Num::Decimal(a), Num::Decimal(b)) => Ok(a.cmp(b)),
            _ => Err(self.incompatible(other)),
        }
    }

    /// Exact for decimals, within [`DOUBLE_EPSILON`] for doubles.
    pub fn is_equal(&self, other: &Num) -> Result<bool, TradescoreError> {
        match (self, other) {
            (Num::Double(a), Num::Double(b)) => Ok((a - b).abs() <= DOUBLE_EPSILON),
            (Num::Decimal(a), Num::Decimal(b)) => Ok(a == b),
            _ => Err(self.incompatible(other)),
        }
    }

    pub fn is_greater_than(&self, other: &Num) -> Result<bool, TradescoreError> {
        Ok(self.compare_to(other)? == Ordering::Greater)
    }

    pub fn is_less_than(&self, other: &Num) -> Result<bool, TradescoreError> {
        Ok(self.compare_to(other)? == Ordering::Less)
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Num::Double(v) => *v == 0.0,
            Num::Decimal(v) => v.is_zero(),
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Num::Double(v) => *v > 0.0,
            Num::Decimal(v) => v.is_sign_positive() && !v.is_zero(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Num::Double(v) => *v < 0.0,
            Num::Decimal(v) => v.is_sign_negative() && !v.is_zero(),
        }
    }

    /// Lossy view for display and approximate comparisons.
    pub fn to_f64(&self) -> f64 {
        match self {
            Num::Double(v) => *v,
            Num::Decimal(v) => v.to_f64().unwrap_or(f64::NAN),
        }
    }

    fn incompatible(&self, other: &Num) -> TradescoreError {
        TradescoreError::IncompatibleNumericBackend {
            left: self.backend(),
            right: other.backend(),
        }
    }
}

fn finite(value: f64, operation: &'static str) -> Result<Num, TradescoreError> {
    if value.is_finite() {
        Ok(Num::Double(value))
    } else {
        Err(TradescoreError::NumericOverflow { operation })
    }
}

fn checked(value: Option<Decimal>, operation: &'static str) -> Result<Num, TradescoreError> {
    value
        .map(Num::Decimal)
        .ok_or(TradescoreError::NumericOverflow { operation })
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Double(v) => write!(f, "{v}"),
            Num::Decimal(v) => write!(f, "{}", v.normalize()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Num {
        NumBackend::Decimal.num_of_str(s).unwrap()
    }

    #[test]
    fn backend_from_str() {
        assert_eq!("decimal".parse::<NumBackend>().unwrap(), NumBackend::Decimal);
        assert_eq!("Double".parse::<NumBackend>().unwrap(), NumBackend::Double);
        assert_eq!("f64".parse::<NumBackend>().unwrap(), NumBackend::Double);
        assert!("bigint".parse::<NumBackend>().is_err());
    }

    #[test]
    fn decimal_arithmetic_is_exact() {
        let sum = dec("0.1").add(&dec("0.2")).unwrap();
        assert!(sum.is_equal(&dec("0.3")).unwrap());

        let product = dec("110").subtract(&dec("100")).unwrap().multiply(&dec("50")).unwrap();
        assert!(product.is_equal(&NumBackend::Decimal.num_of_i64(500)).unwrap());
    }

    #[test]
    fn double_equality_uses_epsilon() {
        let a = NumBackend::Double.num_of_f64(0.1 + 0.2).unwrap();
        let b = NumBackend::Double.num_of_f64(0.3).unwrap();
        assert!(a.is_equal(&b).unwrap());

        let c = NumBackend::Double.num_of_f64(0.3001).unwrap();
        assert!(!a.is_equal(&c).unwrap());
    }

    #[test]
    fn negate_flips_sign() {
        let n = dec("250").negate();
        assert!(n.is_negative());
        assert_eq!(n.to_string(), "-250");
        assert!(n.negate().is_positive());
    }

    #[test]
    fn divide_by_zero_fails() {
        let err = dec("10").divide(&NumBackend::Decimal.zero()).unwrap_err();
        assert!(matches!(err, TradescoreError::DivisionByZero));

        let d = NumBackend::Double;
        let err = d.num_of_i64(10).divide(&d.zero()).unwrap_err();
        assert!(matches!(err, TradescoreError::DivisionByZero));
    }

    #[test]
    fn mixing_backends_fails() {
        let a = NumBackend::Decimal.num_of_i64(1);
        let b = NumBackend::Double.num_of_i64(1);
        for result in [a.add(&b), a.subtract(&b), a.multiply(&b), a.divide(&b)] {
            assert!(matches!(
                result,
                Err(TradescoreError::IncompatibleNumericBackend {
                    left: NumBackend::Decimal,
                    right: NumBackend::Double,
                })
            ));
        }
        assert!(a.compare_to(&b).is_err());
        assert!(a.is_equal(&b).is_err());
    }

    #[test]
    fn compare_gives_total_order() {
        let values = ["-1500", "-250", "0", "750"];
        for pair in values.windows(2) {
            assert_eq!(dec(pair[0]).compare_to(&dec(pair[1])).unwrap(), Ordering::Less);
            assert!(dec(pair[1]).is_greater_than(&dec(pair[0])).unwrap());
        }
        assert_eq!(dec("5").compare_to(&dec("5.00")).unwrap(), Ordering::Equal);
    }

    #[test]
    fn invalid_literals_rejected() {
        assert!(matches!(
            NumBackend::Decimal.num_of_str("12,5"),
            Err(TradescoreError::InvalidNumber { .. })
        ));
        assert!(NumBackend::Double.num_of_str("abc").is_err());
        assert!(NumBackend::Double.num_of_str("inf").is_err());
        assert!(NumBackend::Decimal.num_of_f64(f64::NAN).is_err());
    }

    #[test]
    fn decimal_overflow_reported() {
        let max = Num::Decimal(Decimal::MAX);
        let err = max.add(&dec("1")).unwrap_err();
        assert!(matches!(err, TradescoreError::NumericOverflow { operation: "add" }));
    }

    #[test]
    fn zero_and_sign_helpers() {
        for backend in [NumBackend::Double, NumBackend::Decimal] {
            let zero = backend.zero();
            assert!(zero.is_zero());
            assert!(!zero.is_positive());
            assert!(!zero.is_negative());
            assert_eq!(zero.backend(), backend);
        }
    }
}
