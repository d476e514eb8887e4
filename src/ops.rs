/*
    Operations
*/

use std::fmt;

/// A binary arithmetic operation understood by the `Calculator`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// A unary arithmetic operation understood by the `Calculator`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperation {
    Negate,
    Abs,
    Reciprocal,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        };
        f.write_str(s)
    }
}

impl fmt::Display for UnaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOperation::Negate => "neg",
            UnaryOperation::Abs => "abs",
            UnaryOperation::Reciprocal => "recip",
        };
        f.write_str(s)
    }
}
