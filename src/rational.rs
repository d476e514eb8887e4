/*
    Exact rational numbers
*/

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rug::Float;

use crate::util::{bigint_to_integer, integer_to_bigint};
use crate::{Error, MathContext, Result};

/// An exact fraction of two arbitrary-precision integers.
///
/// A `RationalNumber` is always stored in lowest terms with a
/// positive denominator, so equality, hashing and ordering
/// only ever look at the canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RationalNumber {
    num: BigInt,
    den: BigInt,
}

impl RationalNumber {
    /// Creates the fraction `num / den` reduced to lowest terms.
    /// Fails with `DivideByZero` if `den` is zero.
    pub fn new(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Result<Self> {
        let den = den.into();
        if den.is_zero() {
            return Err(Error::DivideByZero);
        }
        Ok(Self::reduced(num.into(), den))
    }

    /// Creates the fraction `n / 1`.
    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self {
            num: n.into(),
            den: BigInt::one(),
        }
    }

    /// Returns the fraction `0 / 1`.
    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    /// Returns the fraction `1 / 1`.
    pub fn one() -> Self {
        Self::from_integer(1)
    }

    // Canonicalizes `num / den`; `den` must be non-zero
    fn reduced(num: BigInt, den: BigInt) -> Self {
        let g = num.gcd(&den);
        let (mut num, mut den) = if g.is_one() { (num, den) } else { (num / &g, den / &g) };
        if den.is_negative() {
            num = -num;
            den = -den;
        }
        Self { num, den }
    }

    /// Returns the (canonical) numerator.
    pub fn numerator(&self) -> &BigInt {
        &self.num
    }

    /// Returns the (canonical, positive) denominator.
    pub fn denominator(&self) -> &BigInt {
        &self.den
    }

    /// Returns true if this fraction is zero.
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Returns true if this fraction is one.
    pub fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }

    /// Returns true if the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    /// Returns true if this fraction has a terminating binary expansion.
    pub fn is_dyadic(&self) -> bool {
        self.den.trailing_zeros().map_or(false, |tz| tz + 1 == self.den.bits())
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.den == other.den {
            return Self::reduced(&self.num + &other.num, self.den.clone());
        }
        Self::reduced(
            &self.num * &other.den + &other.num * &self.den,
            &self.den * &other.den,
        )
    }

    pub fn subtract(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    pub fn multiply(&self, other: &Self) -> Self {
        Self::reduced(&self.num * &other.num, &self.den * &other.den)
    }

    /// Divides this fraction by another.
    /// Fails with `DivideByZero` if `other` is zero.
    pub fn divide(&self, other: &Self) -> Result<Self> {
        Ok(self.multiply(&other.reciprocal()?))
    }

    /// Returns `1 / self`.
    /// Fails with `DivideByZero` if this fraction is zero.
    pub fn reciprocal(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivideByZero);
        }
        Ok(Self::reduced(self.den.clone(), self.num.clone()))
    }

    pub fn negate(&self) -> Self {
        Self {
            num: -&self.num,
            den: self.den.clone(),
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    /// Raises this fraction to an integer power.
    /// Fails with `DivideByZero` for a negative power of zero.
    pub fn pow(&self, exponent: i32) -> Result<Self> {
        let base = if exponent < 0 { self.reciprocal()? } else { self.clone() };
        let e = exponent.unsigned_abs();
        Ok(Self {
            num: base.num.pow(e),
            den: base.den.pow(e),
        })
    }

    /// Converts this fraction to an MPFR rational.
    pub fn to_rug(&self) -> rug::Rational {
        rug::Rational::from((bigint_to_integer(&self.num), bigint_to_integer(&self.den)))
    }

    /// Converts this fraction to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        self.to_rug().to_f64()
    }

    /// Converts this fraction to an arbitrary-precision value
    /// with `prec` bits, rounding to nearest.
    pub fn to_float(&self, prec: u32) -> Float {
        Float::with_val(prec, self.to_rug())
    }

    /// Converts this fraction to an arbitrary-precision value
    /// according to the provided context.
    ///
    /// With an unlimited context the conversion is exact, which is only
    /// possible for fractions with a terminating binary expansion.
    pub fn to_decimal(&self, ctx: &MathContext) -> Result<Float> {
        match ctx.precision() {
            Some(prec) => Ok(Float::with_val_round(prec, self.to_rug(), ctx.round()).0),
            None if self.is_dyadic() => {
                let bits = self.num.bits().max(1);
                let prec = u32::try_from(bits).unwrap_or(u32::MAX).min(rug::float::prec_max());
                Ok(Float::with_val(prec, self.to_rug()))
            }
            None => Err(Error::NonTerminatingExpansion(self.to_string())),
        }
    }
}

impl Default for RationalNumber {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialOrd for RationalNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        // denominators are positive
        (&self.num * &other.den).cmp(&(&other.num * &self.den))
    }
}

impl fmt::Display for RationalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl From<BigInt> for RationalNumber {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

// MPFR rationals are already canonical
impl From<&rug::Rational> for RationalNumber {
    fn from(r: &rug::Rational) -> Self {
        Self {
            num: integer_to_bigint(r.numer()),
            den: integer_to_bigint(r.denom()),
        }
    }
}

macro_rules! from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RationalNumber {
                fn from(n: $t) -> Self {
                    Self::from_integer(n)
                }
            }
        )*
    };
}

from_primitive!(i32, i64, u32, u64);
