/*
    Evaluation of converters
*/

use std::f64::consts::PI;

use rug::float::{prec_max, Constant};
use rug::ops::PowAssign;
use rug::Float;

use super::*;
use crate::{Calculator, Error, MathContext, Number};

// Extra bits carried while evaluating irrational constants
const GUARD_BITS: u32 = 16;

impl UnitConverter {
    /// Converts a machine floating-point value.
    /// No precision is guaranteed beyond machine epsilon.
    pub fn convert(&self, value: f64) -> f64 {
        if self.is_identity() {
            return value;
        }

        match self {
            UnitConverter::Identity => value,
            UnitConverter::Add(offset) => value + offset.to_f64(),
            UnitConverter::Multiply(factor) => value * factor.to_f64(),
            UnitConverter::PowerOfInt { base, exponent } => {
                value * f64::from(*base).powi(*exponent)
            }
            UnitConverter::PiPower(exponent) => value * PI.powi(*exponent),
            UnitConverter::Exp(base) => base.powf(value),
            UnitConverter::Log(base) => value.ln() / base.ln(),
            UnitConverter::Chain(chain) => chain.steps().iter().fold(value, |x, s| s.convert(x)),
        }
    }

    /// Converts an arbitrary-precision value according to `ctx`.
    ///
    /// Fails with `UnlimitedPrecisionRequested` if this converter involves
    /// an irrational constant and `ctx` requests unlimited precision.
    pub fn convert_decimal(&self, value: &Float, ctx: &MathContext) -> Result<Float> {
        match self.convert_number(&Number::Decimal(value.clone()), ctx)? {
            Number::Decimal(f) => Ok(f),
            other => Ok(other.to_float(value.prec())),
        }
    }

    /// Converts any `Number` according to `ctx`.
    ///
    /// Machine floating-point values take the fast path, exact values stay
    /// exact as long as every step is exact, and irrational steps produce
    /// arbitrary-precision values with the precision requested by `ctx`.
    pub fn convert_number(&self, value: &Number, ctx: &MathContext) -> Result<Number> {
        self.convert_with(value, &Calculator::with_context(ctx.clone()))
    }

    pub(crate) fn convert_with(&self, value: &Number, calc: &Calculator) -> Result<Number> {
        if self.is_identity() {
            return Ok(value.clone());
        }
        if let Number::Double(x) = value {
            return Ok(Number::Double(self.convert(*x)));
        }

        match self {
            UnitConverter::Identity => Ok(value.clone()),
            UnitConverter::Add(offset) => calc.add(value, &offset.to_number()),
            UnitConverter::Multiply(factor) => calc.multiply(value, &factor.to_number()),
            UnitConverter::PowerOfInt { base, exponent } => {
                let factor = RationalNumber::from(*base).pow(*exponent)?;
                calc.multiply(value, &Number::exact(factor))
            }
            UnitConverter::PiPower(exponent) => {
                let prec = self.irrational_precision(value, calc)?;
                let mut pi = Float::with_val(guarded(prec), Constant::Pi);
                pi.pow_assign(*exponent);
                let factor = Float::with_val_round(prec, &pi, calc.context().round()).0;
                calc.multiply(value, &Number::Decimal(factor))
            }
            UnitConverter::Exp(base) => {
                let prec = self.irrational_precision(value, calc)?;
                let x = value.to_float(guarded(prec));
                let mut r = Float::with_val(guarded(prec), *base);
                r.pow_assign(&x);
                Ok(Number::Decimal(Float::with_val_round(prec, &r, calc.context().round()).0))
            }
            UnitConverter::Log(base) => {
                let prec = self.irrational_precision(value, calc)?;
                let x = value.to_float(guarded(prec)).ln();
                let b = Float::with_val(guarded(prec), *base).ln();
                Ok(Number::Decimal(Float::with_val_round(prec, &x / &b, calc.context().round()).0))
            }
            UnitConverter::Chain(chain) => chain
                .steps()
                .iter()
                .try_fold(value.clone(), |x, s| s.convert_with(&x, calc)),
        }
    }

    // Precision for a step involving an irrational constant,
    // which is only defined for a bounded context
    fn irrational_precision(&self, value: &Number, calc: &Calculator) -> Result<u32> {
        if calc.context().is_unlimited() {
            return Err(Error::UnlimitedPrecisionRequested(self.to_string()));
        }
        Ok(calc.working_precision(value, value))
    }
}

// Working precision plus guard bits, within what MPFR supports
fn guarded(prec: u32) -> u32 {
    prec.saturating_add(GUARD_BITS).min(prec_max())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_bits_stay_in_range() {
        assert_eq!(guarded(113), 113 + GUARD_BITS);
        assert_eq!(guarded(u32::MAX), prec_max());
        assert_eq!(guarded(prec_max()), prec_max());
    }
}
