/*
    Unit converters
*/

mod compose;
mod evaluate;
mod order;
mod scalar;

use crate::{RationalNumber, Result};

/// A parameter of an affine or linear converter.
///
/// Parameters are either machine floating-point values or exact
/// fractions. Combining two exact parameters stays exact.
#[derive(Clone, Debug)]
pub enum Scalar {
    Double(f64),
    Exact(RationalNumber),
}

/// A function mapping a value in one unit to the equivalent value in another.
///
/// The set of converter kinds is closed. Converters are immutable values;
/// composing or inverting one always builds a new converter.
///
/// Two converters are equal if they are of the same kind with equal
/// parameters, or if both are identities.
#[derive(Clone, Debug)]
pub enum UnitConverter {
    /// `x`
    Identity,
    /// `x + offset`
    Add(Scalar),
    /// `x * factor`
    Multiply(Scalar),
    /// `x * base^exponent`
    PowerOfInt { base: u32, exponent: i32 },
    /// `x * π^exponent`
    PiPower(i32),
    /// `base^x`
    Exp(f64),
    /// `log_base(x)`
    Log(f64),
    /// Steps applied in order, none of which fuse with their neighbour.
    Chain(Chain),
}

/// An ordered sequence of converters that could not be fused.
///
/// A `Chain` holds at least two steps, none of them an identity
/// or itself a chain. It can only be built through composition.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Chain {
    steps: Vec<UnitConverter>,
}

impl Chain {
    /// Returns the steps of this chain in application order.
    pub fn steps(&self) -> &[UnitConverter] {
        &self.steps
    }

    /// Returns the number of steps in this chain.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false, a chain holds at least two steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// Constructors
impl UnitConverter {
    /// Returns the identity converter.
    pub fn identity() -> Self {
        UnitConverter::Identity
    }

    /// Returns a converter adding a floating-point offset.
    pub fn add(offset: f64) -> Self {
        UnitConverter::Add(Scalar::Double(offset))
    }

    /// Returns a converter adding an exact offset.
    pub fn add_exact(offset: RationalNumber) -> Self {
        UnitConverter::Add(Scalar::Exact(offset))
    }

    /// Returns a converter multiplying by a floating-point factor.
    pub fn multiply(factor: f64) -> Self {
        UnitConverter::Multiply(Scalar::Double(factor))
    }

    /// Returns a converter multiplying by an exact factor.
    pub fn multiply_exact(factor: RationalNumber) -> Self {
        UnitConverter::Multiply(Scalar::Exact(factor))
    }

    /// Returns a converter multiplying by the exact factor `num / den`.
    /// Fails with `DivideByZero` if `den` is zero.
    pub fn rational(num: i64, den: i64) -> Result<Self> {
        Ok(Self::multiply_exact(RationalNumber::new(num, den)?))
    }

    /// Returns a converter multiplying by `base^exponent`.
    pub fn power_of_int(base: u32, exponent: i32) -> Self {
        UnitConverter::PowerOfInt { base, exponent }
    }

    /// Returns a converter multiplying by `10^exponent`, as for metric prefixes.
    pub fn power_of_ten(exponent: i32) -> Self {
        Self::power_of_int(10, exponent)
    }

    /// Returns a converter multiplying by `π^exponent`.
    pub fn pi_power(exponent: i32) -> Self {
        UnitConverter::PiPower(exponent)
    }

    /// Returns the converter `x -> base^x`.
    pub fn exp(base: f64) -> Self {
        UnitConverter::Exp(base)
    }

    /// Returns the converter `x -> log_base(x)`.
    pub fn log(base: f64) -> Self {
        UnitConverter::Log(base)
    }

    /// Returns the natural logarithm converter.
    pub fn ln() -> Self {
        Self::log(std::f64::consts::E)
    }
}

// Queries
impl UnitConverter {
    /// Returns true if this converter maps every value to itself.
    pub fn is_identity(&self) -> bool {
        match self {
            UnitConverter::Identity => true,
            UnitConverter::Add(offset) => offset.is_zero(),
            UnitConverter::Multiply(factor) => factor.is_one(),
            UnitConverter::PowerOfInt { base, exponent } => *exponent == 0 || *base == 1,
            UnitConverter::PiPower(exponent) => *exponent == 0,
            UnitConverter::Exp(_) | UnitConverter::Log(_) => false,
            UnitConverter::Chain(chain) => chain.steps.iter().all(Self::is_identity),
        }
    }

    /// Returns true if this converter is a pure scaling, `f(k x) = k f(x)`.
    pub fn is_linear(&self) -> bool {
        match self {
            UnitConverter::Identity => true,
            UnitConverter::Add(offset) => offset.is_zero(),
            UnitConverter::Multiply(_) => true,
            UnitConverter::PowerOfInt { .. } => true,
            UnitConverter::PiPower(_) => true,
            UnitConverter::Exp(_) | UnitConverter::Log(_) => false,
            UnitConverter::Chain(chain) => chain.steps.iter().all(Self::is_linear),
        }
    }

    /// Returns the converter undoing this one.
    /// An identity is its own inverse.
    pub fn inverse(&self) -> Self {
        if self.is_identity() {
            return self.clone();
        }

        match self {
            UnitConverter::Identity => UnitConverter::Identity,
            UnitConverter::Add(offset) => UnitConverter::Add(offset.negate()),
            UnitConverter::Multiply(factor) => UnitConverter::Multiply(factor.reciprocal()),
            UnitConverter::PowerOfInt { base, exponent } => UnitConverter::PowerOfInt {
                base: *base,
                exponent: exponent.saturating_neg(),
            },
            UnitConverter::PiPower(exponent) => UnitConverter::PiPower(exponent.saturating_neg()),
            UnitConverter::Exp(base) => UnitConverter::Log(*base),
            UnitConverter::Log(base) => UnitConverter::Exp(*base),
            UnitConverter::Chain(chain) => {
                Self::from_steps(chain.steps.iter().rev().map(Self::inverse).collect())
            }
        }
    }

    /// Returns the steps of this converter in application order:
    /// none for an identity, the chain's steps for a chain,
    /// and the converter itself otherwise.
    pub fn steps(&self) -> &[UnitConverter] {
        match self {
            UnitConverter::Identity => &[],
            UnitConverter::Chain(chain) => chain.steps(),
            _ => std::slice::from_ref(self),
        }
    }
}
