/*
    Precision-aware calculator
*/

use std::cmp::Ordering;

use rug::Float;
use tracing::trace;

use crate::number::DOUBLE_PRECISION;
use crate::{Error, MathContext, Number, Operation, RationalNumber, Result, UnaryOperation};

// Numeric representation an operation is evaluated in
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    // both operands are integers or fractions
    Exact,
    // at least one operand is an arbitrary-precision value
    Decimal,
    // otherwise
    Double,
}

impl Mode {
    fn of(lhs: &Number, rhs: &Number) -> Self {
        match (lhs, rhs) {
            (Number::Decimal(_), _) | (_, Number::Decimal(_)) => Mode::Decimal,
            (Number::Double(_), _) | (_, Number::Double(_)) => Mode::Double,
            _ => Mode::Exact,
        }
    }
}

/// Evaluates arithmetic on `Number`s.
///
/// The representation of the result is chosen from the operands:
///  - two exact operands give an exact result,
///  - an arbitrary-precision operand gives an arbitrary-precision
///    result at the larger of the operand precisions and the
///    precision requested by the context,
///  - anything else is evaluated in machine floating point.
///
/// Operands are never modified.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    ctx: MathContext,
}

impl Calculator {
    /// Creates a calculator with an unlimited precision context.
    pub fn new() -> Self {
        Self::with_context(MathContext::new())
    }

    /// Creates a calculator evaluating according to `ctx`.
    pub fn with_context(ctx: MathContext) -> Self {
        Self { ctx }
    }

    /// Returns the precision context of this calculator.
    pub fn context(&self) -> &MathContext {
        &self.ctx
    }

    /// Applies a binary operation to two values.
    /// Fails with `DivideByZero` when dividing by zero in any mode.
    pub fn apply(&self, op: Operation, lhs: &Number, rhs: &Number) -> Result<Number> {
        if op == Operation::Divide && rhs.is_zero() {
            return Err(Error::DivideByZero);
        }

        let mode = Mode::of(lhs, rhs);
        trace!(%op, ?mode, "evaluating binary operation");
        match mode {
            Mode::Exact => {
                let (a, b) = (exact_operand(lhs), exact_operand(rhs));
                let r = match op {
                    Operation::Add => a.add(&b),
                    Operation::Subtract => a.subtract(&b),
                    Operation::Multiply => a.multiply(&b),
                    Operation::Divide => a.divide(&b)?,
                };
                Ok(Number::exact(r))
            }
            Mode::Decimal => {
                let prec = self.working_precision(lhs, rhs);
                let (a, b) = (decimal_operand(lhs, prec), decimal_operand(rhs, prec));
                let round = self.ctx.round();
                let (r, _) = match op {
                    Operation::Add => Float::with_val_round(prec, &a + &b, round),
                    Operation::Subtract => Float::with_val_round(prec, &a - &b, round),
                    Operation::Multiply => Float::with_val_round(prec, &a * &b, round),
                    Operation::Divide => Float::with_val_round(prec, &a / &b, round),
                };
                Ok(Number::Decimal(r))
            }
            Mode::Double => {
                let (a, b) = (lhs.to_f64(), rhs.to_f64());
                let r = match op {
                    Operation::Add => a + b,
                    Operation::Subtract => a - b,
                    Operation::Multiply => a * b,
                    Operation::Divide => a / b,
                };
                Ok(Number::Double(r))
            }
        }
    }

    /// Applies a unary operation to a value, keeping its representation.
    /// Fails with `DivideByZero` for the reciprocal of zero.
    pub fn apply_unary(&self, op: UnaryOperation, x: &Number) -> Result<Number> {
        if op == UnaryOperation::Reciprocal && x.is_zero() {
            return Err(Error::DivideByZero);
        }

        trace!(%op, "evaluating unary operation");
        match x {
            Number::Double(v) => Ok(Number::Double(match op {
                UnaryOperation::Negate => -v,
                UnaryOperation::Abs => v.abs(),
                UnaryOperation::Reciprocal => 1.0 / v,
            })),
            Number::Integer(_) | Number::Rational(_) => {
                let r = exact_operand(x);
                Ok(Number::exact(match op {
                    UnaryOperation::Negate => r.negate(),
                    UnaryOperation::Abs => r.abs(),
                    UnaryOperation::Reciprocal => r.reciprocal()?,
                }))
            }
            Number::Decimal(f) => {
                let prec = self.ctx.precision().map_or(f.prec(), |p| p.max(f.prec()));
                let round = self.ctx.round();
                let (r, _) = match op {
                    UnaryOperation::Negate => Float::with_val_round(prec, -f, round),
                    UnaryOperation::Abs => Float::with_val_round(prec, f.abs_ref(), round),
                    UnaryOperation::Reciprocal => Float::with_val_round(prec, f.recip_ref(), round),
                };
                Ok(Number::Decimal(r))
            }
        }
    }

    pub fn add(&self, lhs: &Number, rhs: &Number) -> Result<Number> {
        self.apply(Operation::Add, lhs, rhs)
    }

    pub fn subtract(&self, lhs: &Number, rhs: &Number) -> Result<Number> {
        self.apply(Operation::Subtract, lhs, rhs)
    }

    pub fn multiply(&self, lhs: &Number, rhs: &Number) -> Result<Number> {
        self.apply(Operation::Multiply, lhs, rhs)
    }

    pub fn divide(&self, lhs: &Number, rhs: &Number) -> Result<Number> {
        self.apply(Operation::Divide, lhs, rhs)
    }

    pub fn negate(&self, x: &Number) -> Result<Number> {
        self.apply_unary(UnaryOperation::Negate, x)
    }

    pub fn abs(&self, x: &Number) -> Result<Number> {
        self.apply_unary(UnaryOperation::Abs, x)
    }

    pub fn reciprocal(&self, x: &Number) -> Result<Number> {
        self.apply_unary(UnaryOperation::Reciprocal, x)
    }

    /// Compares two values in the same representation `apply` would use.
    /// Returns `None` if either value is a NaN.
    pub fn compare(&self, lhs: &Number, rhs: &Number) -> Option<Ordering> {
        match Mode::of(lhs, rhs) {
            Mode::Exact => Some(exact_operand(lhs).cmp(&exact_operand(rhs))),
            Mode::Decimal => {
                let prec = self.working_precision(lhs, rhs);
                decimal_operand(lhs, prec).partial_cmp(&decimal_operand(rhs, prec))
            }
            Mode::Double => lhs.to_f64().partial_cmp(&rhs.to_f64()),
        }
    }

    // Precision of an arbitrary-precision result: the larger of the
    // operand precisions and the precision requested by the context.
    pub(crate) fn working_precision(&self, lhs: &Number, rhs: &Number) -> u32 {
        [lhs.precision(), rhs.precision(), self.ctx.precision()]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(DOUBLE_PRECISION)
    }
}

// Exact operands only; anything else is a logic error in mode selection
fn exact_operand(x: &Number) -> RationalNumber {
    x.to_rational().unwrap_or_else(|| unreachable!("inexact operand in exact mode: {}", x))
}

// Promotes an operand to an arbitrary-precision value.
// Doubles are converted exactly, existing values keep their precision.
fn decimal_operand(x: &Number, prec: u32) -> Float {
    match x {
        Number::Double(v) => Float::with_val(DOUBLE_PRECISION, *v),
        Number::Decimal(f) => f.clone(),
        _ => x.to_float(prec),
    }
}
