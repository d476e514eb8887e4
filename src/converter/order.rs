/*
    Equality, ordering and display of converters
*/

use std::cmp::Ordering;
use std::fmt;

use super::*;

impl UnitConverter {
    /// Returns the name of this converter's kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            UnitConverter::Identity => "Identity",
            UnitConverter::Add(_) => "Add",
            UnitConverter::Multiply(_) => "Multiply",
            UnitConverter::PowerOfInt { .. } => "PowerOfInt",
            UnitConverter::PiPower(_) => "PiPower",
            UnitConverter::Exp(_) => "Exp",
            UnitConverter::Log(_) => "Log",
            UnitConverter::Chain(_) => "Chain",
        }
    }
}

impl PartialEq for UnitConverter {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for UnitConverter {}

impl PartialOrd for UnitConverter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Identities are all equal and sort before everything else. Converters
// of the same kind compare by parameter, anything else by kind name.
impl Ord for UnitConverter {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        match (self, other) {
            (UnitConverter::Add(a), UnitConverter::Add(b)) => a.cmp(b),
            (UnitConverter::Multiply(a), UnitConverter::Multiply(b)) => a.cmp(b),
            (
                UnitConverter::PowerOfInt { base: b1, exponent: e1 },
                UnitConverter::PowerOfInt { base: b2, exponent: e2 },
            ) => (b1, e1).cmp(&(b2, e2)),
            (UnitConverter::PiPower(a), UnitConverter::PiPower(b)) => a.cmp(b),
            (UnitConverter::Exp(a), UnitConverter::Exp(b)) => a.total_cmp(b),
            (UnitConverter::Log(a), UnitConverter::Log(b)) => a.total_cmp(b),
            (UnitConverter::Chain(a), UnitConverter::Chain(b)) => a.cmp(b),
            _ => self.type_name().cmp(other.type_name()),
        }
    }
}

impl fmt::Display for UnitConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitConverter::Identity => write!(f, "Identity"),
            UnitConverter::Add(offset) => write!(f, "Add({})", offset),
            UnitConverter::Multiply(factor) => write!(f, "Multiply({})", factor),
            UnitConverter::PowerOfInt { base, exponent } => {
                write!(f, "PowerOfInt({}^{})", base, exponent)
            }
            UnitConverter::PiPower(exponent) => write!(f, "PiPower(π^{})", exponent),
            UnitConverter::Exp(base) => write!(f, "Exp({})", base),
            UnitConverter::Log(base) => write!(f, "Log({})", base),
            UnitConverter::Chain(chain) => write!(f, "{}", chain),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chain[")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", step)?;
        }
        write!(f, "]")
    }
}
