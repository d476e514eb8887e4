/*
    Quantity arithmetic
*/

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::converter::UnitConverter;
use crate::{Calculator, Number, Operation, Result};

/// The unit hierarchy this crate computes against.
///
/// Implementations resolve converters between units, the system unit
/// of each unit, and the units of products, quotients and inverses.
pub trait UnitSystem {
    type Unit: Clone + PartialEq + fmt::Debug;

    /// Returns the converter from `from` to `to`.
    /// Fails with `Error::IncommensurableUnits` if there is none.
    fn converter(&self, from: &Self::Unit, to: &Self::Unit) -> Result<UnitConverter>;

    /// Returns the system unit `unit` is defined against.
    fn system_unit(&self, unit: &Self::Unit) -> Self::Unit;

    /// Returns the unit of a product of quantities.
    fn multiply(&self, lhs: &Self::Unit, rhs: &Self::Unit) -> Self::Unit;

    /// Returns the unit of a quotient of quantities.
    fn divide(&self, lhs: &Self::Unit, rhs: &Self::Unit) -> Self::Unit;

    /// Returns the unit of the reciprocal of a quantity.
    fn inverse(&self, unit: &Self::Unit) -> Self::Unit;
}

/// Whether a quantity is a point on its scale or a difference between points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scale {
    #[default]
    Absolute,
    Relative,
}

/// A numeric value paired with a unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Quantity<U> {
    value: Number,
    unit: U,
    scale: Scale,
}

impl<U> Quantity<U> {
    /// Creates an absolute quantity.
    pub fn new(value: impl Into<Number>, unit: U) -> Self {
        Self::with_scale(value, unit, Scale::Absolute)
    }

    pub fn with_scale(value: impl Into<Number>, unit: U, scale: Scale) -> Self {
        Self {
            value: value.into(),
            unit,
            scale,
        }
    }

    pub fn value(&self) -> &Number {
        &self.value
    }

    pub fn unit(&self) -> &U {
        &self.unit
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }
}

impl<U: fmt::Display> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Arithmetic on quantities of one unit system.
///
/// Additions happen in the system unit of the left operand and the
/// result is expressed in the left operand's unit. Products and
/// quotients combine the values as they are and let the unit system
/// build the resulting unit.
pub struct QuantityArithmetic<'a, S: UnitSystem> {
    system: &'a S,
    calculator: Calculator,
}

impl<'a, S: UnitSystem> QuantityArithmetic<'a, S> {
    /// Creates quantity arithmetic over `system` with an
    /// unlimited precision calculator.
    pub fn new(system: &'a S) -> Self {
        Self::with_calculator(system, Calculator::new())
    }

    pub fn with_calculator(system: &'a S, calculator: Calculator) -> Self {
        Self { system, calculator }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn add(
        &self,
        lhs: &Quantity<S::Unit>,
        rhs: &Quantity<S::Unit>,
    ) -> Result<Quantity<S::Unit>> {
        self.addition(Operation::Add, lhs, rhs)
    }

    pub fn subtract(
        &self,
        lhs: &Quantity<S::Unit>,
        rhs: &Quantity<S::Unit>,
    ) -> Result<Quantity<S::Unit>> {
        self.addition(Operation::Subtract, lhs, rhs)
    }

    pub fn multiply(
        &self,
        lhs: &Quantity<S::Unit>,
        rhs: &Quantity<S::Unit>,
    ) -> Result<Quantity<S::Unit>> {
        let value = self.calculator.multiply(&lhs.value, &rhs.value)?;
        let unit = self.system.multiply(&lhs.unit, &rhs.unit);
        Ok(Quantity::new(value, unit))
    }

    pub fn divide(
        &self,
        lhs: &Quantity<S::Unit>,
        rhs: &Quantity<S::Unit>,
    ) -> Result<Quantity<S::Unit>> {
        let value = self.calculator.divide(&lhs.value, &rhs.value)?;
        let unit = self.system.divide(&lhs.unit, &rhs.unit);
        Ok(Quantity::new(value, unit))
    }

    /// Scales a quantity by a bare number, keeping its unit.
    pub fn multiply_by(&self, q: &Quantity<S::Unit>, factor: &Number) -> Result<Quantity<S::Unit>> {
        let value = self.calculator.multiply(&q.value, factor)?;
        Ok(Quantity::with_scale(value, q.unit.clone(), q.scale))
    }

    /// Divides a quantity by a bare number, keeping its unit.
    pub fn divide_by(&self, q: &Quantity<S::Unit>, divisor: &Number) -> Result<Quantity<S::Unit>> {
        let value = self.calculator.divide(&q.value, divisor)?;
        Ok(Quantity::with_scale(value, q.unit.clone(), q.scale))
    }

    /// Returns the reciprocal of a quantity, in the inverse unit.
    pub fn inverse(&self, q: &Quantity<S::Unit>) -> Result<Quantity<S::Unit>> {
        let value = self.calculator.reciprocal(&q.value)?;
        Ok(Quantity::new(value, self.system.inverse(&q.unit)))
    }

    pub fn negate(&self, q: &Quantity<S::Unit>) -> Result<Quantity<S::Unit>> {
        let value = self.calculator.negate(&q.value)?;
        Ok(Quantity::with_scale(value, q.unit.clone(), q.scale))
    }

    /// Expresses a quantity in another unit.
    pub fn to(&self, q: &Quantity<S::Unit>, unit: &S::Unit) -> Result<Quantity<S::Unit>> {
        let converter = self.system.converter(&q.unit, unit)?;
        let value = converter.convert_with(&q.value, &self.calculator)?;
        Ok(Quantity::with_scale(value, unit.clone(), q.scale))
    }

    /// Compares two quantities after expressing both in the unit of `lhs`.
    pub fn compare(
        &self,
        lhs: &Quantity<S::Unit>,
        rhs: &Quantity<S::Unit>,
    ) -> Result<Option<Ordering>> {
        let rhs = self.to(rhs, &lhs.unit)?;
        Ok(self.calculator.compare(&lhs.value, &rhs.value))
    }

    /// Summarizes quantities expressed in `unit`.
    pub fn summarize<'q, I>(
        &self,
        quantities: I,
        unit: &S::Unit,
    ) -> Result<QuantitySummary<S::Unit>>
    where
        I: IntoIterator<Item = &'q Quantity<S::Unit>>,
        S::Unit: 'q,
    {
        let mut summary = QuantitySummary::empty(unit.clone());
        for q in quantities {
            let q = self.to(q, unit)?;
            summary.sum = self.calculator.add(&summary.sum, &q.value)?;
            summary.min = Some(match summary.min.take() {
                Some(min) if self.calculator.compare(&min, &q.value) != Some(Ordering::Greater) => {
                    min
                }
                _ => q.value.clone(),
            });
            summary.max = Some(match summary.max.take() {
                Some(max) if self.calculator.compare(&max, &q.value) != Some(Ordering::Less) => max,
                _ => q.value.clone(),
            });
            summary.count += 1;
        }
        Ok(summary)
    }

    // Adds or subtracts two quantities in the system unit of `lhs`
    fn addition(
        &self,
        op: Operation,
        lhs: &Quantity<S::Unit>,
        rhs: &Quantity<S::Unit>,
    ) -> Result<Quantity<S::Unit>> {
        let system_unit = self.system.system_unit(&lhs.unit);
        let c1 = self.system.converter(&lhs.unit, &system_unit)?;
        let c2 = self.system.converter(&rhs.unit, &system_unit)?;

        let a = c1.convert_with(&lhs.value, &self.calculator)?;
        let b = c2.convert_with(&rhs.value, &self.calculator)?;
        let r = self.calculator.apply(op, &a, &b)?;
        let value = c1.inverse().convert_with(&r, &self.calculator)?;

        // TODO: reconcile absolute and relative scales once the
        // semantics of mixed-scale addition are settled
        if lhs.scale != rhs.scale {
            debug!(
                lhs = ?lhs.scale,
                rhs = ?rhs.scale,
                %op,
                "combining quantities of different scales"
            );
        }
        Ok(Quantity::with_scale(value, lhs.unit.clone(), lhs.scale))
    }
}

/// Count, sum, extrema and average of a collection of quantities.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantitySummary<U> {
    unit: U,
    count: u64,
    sum: Number,
    min: Option<Number>,
    max: Option<Number>,
}

impl<U: Clone> QuantitySummary<U> {
    fn empty(unit: U) -> Self {
        Self {
            unit,
            count: 0,
            sum: Number::from(0),
            min: None,
            max: None,
        }
    }

    pub fn unit(&self) -> &U {
        &self.unit
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> Quantity<U> {
        Quantity::new(self.sum.clone(), self.unit.clone())
    }

    pub fn min(&self) -> Option<Quantity<U>> {
        self.min.clone().map(|v| Quantity::new(v, self.unit.clone()))
    }

    pub fn max(&self) -> Option<Quantity<U>> {
        self.max.clone().map(|v| Quantity::new(v, self.unit.clone()))
    }

    /// Returns the mean of the summarized quantities.
    /// Fails with `DivideByZero` if nothing was summarized.
    pub fn average(&self, calculator: &Calculator) -> Result<Quantity<U>> {
        let value = calculator.divide(&self.sum, &Number::from(self.count))?;
        Ok(Quantity::new(value, self.unit.clone()))
    }
}
