/*
    Errors
*/

use thiserror::Error;

/// Errors raised by converters, the calculator and quantity arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Division or reciprocal with a zero divisor, in any numeric mode.
    #[error("division by zero")]
    DivideByZero,

    /// An irrational value was requested with unlimited precision.
    #[error("unlimited precision requested for irrational value: {0}")]
    UnlimitedPrecisionRequested(String),

    /// An exact value has no terminating expansion and no precision was given.
    #[error("non-terminating expansion of {0} requires a bounded precision")]
    NonTerminatingExpansion(String),

    /// No converter exists between two units.
    /// Raised by the unit system, never by this crate.
    #[error("incommensurable units: {from} and {to}")]
    IncommensurableUnits { from: String, to: String },
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
