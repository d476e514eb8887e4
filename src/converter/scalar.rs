/*
    Converter parameters
*/

use std::cmp::Ordering;
use std::fmt;

use super::*;
use crate::Number;

impl Scalar {
    /// Returns true if this parameter is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Double(x) => *x == 0.0,
            Scalar::Exact(r) => r.is_zero(),
        }
    }

    /// Returns true if this parameter is one.
    pub fn is_one(&self) -> bool {
        match self {
            Scalar::Double(x) => *x == 1.0,
            Scalar::Exact(r) => r.is_one(),
        }
    }

    /// Returns true if this parameter is an exact fraction.
    pub fn is_exact(&self) -> bool {
        matches!(self, Scalar::Exact(_))
    }

    /// Converts this parameter to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        match self {
            Scalar::Double(x) => *x,
            Scalar::Exact(r) => r.to_f64(),
        }
    }

    /// Converts this parameter to a `Number` of the same exactness.
    pub fn to_number(&self) -> Number {
        match self {
            Scalar::Double(x) => Number::Double(*x),
            Scalar::Exact(r) => Number::exact(r.clone()),
        }
    }

    pub fn negate(&self) -> Self {
        match self {
            Scalar::Double(x) => Scalar::Double(-x),
            Scalar::Exact(r) => Scalar::Exact(r.negate()),
        }
    }

    /// Returns `1 / self`. An exact zero has no exact reciprocal
    /// and becomes a floating-point infinity.
    pub fn reciprocal(&self) -> Self {
        match self {
            Scalar::Double(x) => Scalar::Double(1.0 / x),
            Scalar::Exact(r) => match r.reciprocal() {
                Ok(r) => Scalar::Exact(r),
                Err(_) => Scalar::Double(f64::INFINITY),
            },
        }
    }

    /// Sums two parameters, exactly if both are exact.
    pub fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Scalar::Exact(a), Scalar::Exact(b)) => Scalar::Exact(a.add(b)),
            _ => Scalar::Double(self.to_f64() + other.to_f64()),
        }
    }

    /// Multiplies two parameters, exactly if both are exact.
    pub fn multiply(&self, other: &Self) -> Self {
        match (self, other) {
            (Scalar::Exact(a), Scalar::Exact(b)) => Scalar::Exact(a.multiply(b)),
            _ => Scalar::Double(self.to_f64() * other.to_f64()),
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// floating-point parameters sort before exact ones
impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Double(a), Scalar::Double(b)) => a.total_cmp(b),
            (Scalar::Exact(a), Scalar::Exact(b)) => a.cmp(b),
            (Scalar::Double(_), Scalar::Exact(_)) => Ordering::Less,
            (Scalar::Exact(_), Scalar::Double(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Double(x) => write!(f, "{}", x),
            Scalar::Exact(r) => write!(f, "{}", r),
        }
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Double(x)
    }
}

impl From<RationalNumber> for Scalar {
    fn from(r: RationalNumber) -> Self {
        Scalar::Exact(r)
    }
}
