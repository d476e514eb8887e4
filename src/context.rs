/*
    Precision context
*/

use std::f64::consts::LOG2_10;

use rug::float::{prec_max, Round};

/// Rounding modes available for arbitrary-precision evaluation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    #[default]
    NearestEven,
    ToPositive,
    ToNegative,
    ToZero,
}

impl RoundingMode {
    /// Translates this `RoundingMode` to the MPFR rounding direction.
    pub fn round(&self) -> Round {
        match self {
            RoundingMode::NearestEven => Round::Nearest,
            RoundingMode::ToPositive => Round::Up,
            RoundingMode::ToNegative => Round::Down,
            RoundingMode::ToZero => Round::Zero,
        }
    }
}

/// Parameters for arbitrary-precision evaluation.
///
/// Most operations on arbitrary-precision values can be decomposed into
/// an exact real operation followed by a rounding operation.
/// A `MathContext` describes the second step: how many significant
/// decimal digits to keep and in which direction to round.
/// Zero digits means unlimited: exact where possible, an error otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MathContext {
    digits: u32,
    rm: RoundingMode,
}

impl MathContext {
    /// Creates an unlimited precision context
    /// with `rm` set to `RoundingMode::NearestEven`.
    pub fn new() -> Self {
        Self {
            digits: 0,
            rm: RoundingMode::NearestEven,
        }
    }

    /// Creates a context keeping `digits` significant decimal digits.
    pub fn with_digits(digits: u32) -> Self {
        Self::new().digits(digits)
    }

    /// 7 digits, the precision of an IEEE-754 decimal32.
    pub fn decimal32() -> Self {
        Self::with_digits(7)
    }

    /// 16 digits, the precision of an IEEE-754 decimal64.
    pub fn decimal64() -> Self {
        Self::with_digits(16)
    }

    /// 34 digits, the precision of an IEEE-754 decimal128.
    pub fn decimal128() -> Self {
        Self::with_digits(34)
    }

    /// Sets the number of significant decimal digits.
    pub fn digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// Sets the rounding mode.
    pub fn rounding_mode(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    /// Returns the requested number of significant decimal digits.
    pub fn num_digits(&self) -> u32 {
        self.digits
    }

    /// Returns true if this context requests unlimited precision.
    pub fn is_unlimited(&self) -> bool {
        self.digits == 0
    }

    /// Returns the rounding mode of this context.
    pub fn mode(&self) -> RoundingMode {
        self.rm
    }

    /// Returns the MPFR rounding direction of this context.
    pub fn round(&self) -> Round {
        self.rm.round()
    }

    /// Returns the binary precision needed to hold the requested digits,
    /// or `None` for an unlimited context.
    /// The precision never exceeds the largest one MPFR supports.
    pub fn precision(&self) -> Option<u32> {
        if self.is_unlimited() {
            None
        } else {
            Some(digits_to_bits(self.digits).min(prec_max()))
        }
    }
}

// Number of bits needed to represent `digits` significant decimal digits
fn digits_to_bits(digits: u32) -> u32 {
    (f64::from(digits) * LOG2_10).ceil() as u32
}
