/*
    Defines a number
*/

use std::fmt;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use rug::{Float, Integer};

use crate::util::{bigint_to_integer, integer_to_bigint};
use crate::RationalNumber;

/// Precision, in bits, of an `f64` significand.
pub const DOUBLE_PRECISION: u32 = 53;

/// The number type.
///
/// The central value type of this library.
/// A `Number` is either a machine floating-point value, an exact
/// integer or fraction, or an arbitrary-precision value carrying
/// its own binary precision.
/// The `Calculator` decides which of these forms a result takes.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    /// machine floating point
    Double(f64),
    /// exact arbitrary-precision integer
    Integer(BigInt),
    /// exact fraction, never with a denominator of one
    Rational(RationalNumber),
    /// arbitrary-precision value
    Decimal(Float),
}

impl Number {
    /// Returns an exact `Number`, demoting fractions with
    /// a denominator of one to integers.
    pub fn exact(r: RationalNumber) -> Self {
        if r.is_integer() {
            Number::Integer(r.numerator().clone())
        } else {
            Number::Rational(r)
        }
    }

    /// Returns true if this `Number` encodes a zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Double(x) => *x == 0.0,
            Number::Integer(i) => i.is_zero(),
            Number::Rational(r) => r.is_zero(),
            Number::Decimal(f) => f.is_zero(),
        }
    }

    /// Returns true if this `Number` is an integer or a fraction.
    pub fn is_exact(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::Rational(_))
    }

    /// Returns true if this `Number` encodes an infinity.
    pub fn is_infinity(&self) -> bool {
        match self {
            Number::Double(x) => x.is_infinite(),
            Number::Decimal(f) => f.is_infinite(),
            _ => false,
        }
    }

    /// Returns true if this `Number` does not encode a number.
    pub fn is_nan(&self) -> bool {
        match self {
            Number::Double(x) => x.is_nan(),
            Number::Decimal(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Returns true if this `Number` encodes a finite number.
    pub fn is_finite(&self) -> bool {
        !self.is_infinity() && !self.is_nan()
    }

    /// Returns the binary precision of an arbitrary-precision value.
    /// The result is wrapped in an option since only those carry one.
    pub fn precision(&self) -> Option<u32> {
        match self {
            Number::Decimal(f) => Some(f.prec()),
            _ => None,
        }
    }

    /// Returns this value as an exact fraction, if it is exact.
    pub fn to_rational(&self) -> Option<RationalNumber> {
        match self {
            Number::Integer(i) => Some(RationalNumber::from_integer(i.clone())),
            Number::Rational(r) => Some(r.clone()),
            _ => None,
        }
    }

    /// Converts this value to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Double(x) => *x,
            Number::Integer(i) => i.to_f64().unwrap_or(f64::NAN),
            Number::Rational(r) => r.to_f64(),
            Number::Decimal(f) => f.to_f64(),
        }
    }

    /// Converts this value to an arbitrary-precision value with `prec` bits.
    pub fn to_float(&self, prec: u32) -> Float {
        match self {
            Number::Double(x) => Float::with_val(prec, *x),
            Number::Integer(i) => Float::with_val(prec, bigint_to_integer(i)),
            Number::Rational(r) => r.to_float(prec),
            Number::Decimal(f) => Float::with_val(prec, f),
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Integer(BigInt::zero())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Double(x) => write!(f, "{}", x),
            Number::Integer(i) => write!(f, "{}", i),
            Number::Rational(r) => write!(f, "{}", r),
            Number::Decimal(x) => write!(f, "{}", x),
        }
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Double(x)
    }
}

impl From<BigInt> for Number {
    fn from(i: BigInt) -> Self {
        Number::Integer(i)
    }
}

impl From<Integer> for Number {
    fn from(i: Integer) -> Self {
        Number::Integer(integer_to_bigint(&i))
    }
}

impl From<RationalNumber> for Number {
    fn from(r: RationalNumber) -> Self {
        Number::exact(r)
    }
}

impl From<Float> for Number {
    fn from(f: Float) -> Self {
        Number::Decimal(f)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::Integer(BigInt::from(n))
                }
            }
        )*
    };
}

from_integer!(i32, i64, u32, u64);
