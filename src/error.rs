//! Errors raised while defining or checking a circuit.
//!
//! Only usage errors are reported at construction time. A circuit whose
//! constraints cannot be satisfied (division by zero, an out-of-range value)
//! builds fine and is reported by [`ConstraintSystem::is_satisfied`] or by the
//! proving backend.
//!
//! [`ConstraintSystem::is_satisfied`]: crate::circuit::ConstraintSystem::is_satisfied

use crate::circuit::{Variable, VariableKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("duplicate {kind} input name {name:?}")]
    DuplicateInputName { kind: VariableKind, name: String },
    #[error("{op} expects at least {expected} operands, got {actual}")]
    NotEnoughOperands {
        op: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("bit width {bits} must be in the range 1..={max}")]
    InvalidBitWidth { bits: usize, max: usize },
    #[error("constant bound needs {required} bits but the comparator is {bits} bits wide")]
    BoundTooWide { required: usize, bits: usize },
    #[error("argument {arg} does not have expected length {expected}, got {actual}")]
    LengthMismatch {
        arg: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("no value assigned to {0}")]
    UnassignedVariable(Variable),
    #[error("unknown coefficient id {0}")]
    UnknownCoefficient(usize),
    #[error("{kind} {index} is not satisfied")]
    NotSatisfied { kind: &'static str, index: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
