//! Variables, linear combinations and operands.

use crate::circuit::coefficients::CoeffId;
use crate::field::Fr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sequence a variable belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    /// The constant-one wire, always assigned 1
    One,
    PublicInput,
    SecretInput,
    /// Output of a gate
    Intermediate,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableKind::One => "one",
            VariableKind::PublicInput => "public",
            VariableKind::SecretInput => "secret",
            VariableKind::Intermediate => "intermediate",
        };
        f.write_str(name)
    }
}

/// A wire of the circuit. Cheap to copy; all state lives in the builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub kind: VariableKind,
    /// Position within the sequence of its kind
    pub index: usize,
}

impl Variable {
    pub const ONE: Variable = Variable {
        kind: VariableKind::One,
        index: 0,
    };

    /// Variable `index` of the given kind
    pub fn new(kind: VariableKind, index: usize) -> Self {
        Variable { kind, index }
    }

    /// Whether this is the constant-one wire
    pub fn is_one(&self) -> bool {
        self.kind == VariableKind::One
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            VariableKind::One => f.write_str("one"),
            VariableKind::PublicInput => write!(f, "pub[{}]", self.index),
            VariableKind::SecretInput => write!(f, "sec[{}]", self.index),
            VariableKind::Intermediate => write!(f, "v[{}]", self.index),
        }
    }
}

/// A single weighted wire: coefficient · variable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinearTerm {
    pub variable: Variable,
    pub coeff: CoeffId,
}

impl LinearTerm {
    /// coeff · variable
    pub fn new(variable: Variable, coeff: CoeffId) -> Self {
        LinearTerm { variable, coeff }
    }
}

/// Σ coeff_i · variable_i. Term order only affects iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinearCombination(Vec<LinearTerm>);

impl LinearCombination {
    pub fn new() -> Self {
        LinearCombination(Vec::new())
    }

    /// Combination with a single term
    pub fn single(variable: Variable, coeff: CoeffId) -> Self {
        LinearCombination(vec![LinearTerm::new(variable, coeff)])
    }

    /// Append a term
    pub fn push(&mut self, term: LinearTerm) {
        self.0.push(term);
    }

    /// Append every term of `other`
    pub fn extend(&mut self, other: &LinearCombination) {
        self.0.extend_from_slice(&other.0);
    }

    /// Terms in insertion order
    pub fn terms(&self) -> &[LinearTerm] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinearTerm> {
        self.0.iter()
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Variables referenced by the combination, in term order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.iter().map(|t| t.variable)
    }
}

impl From<Vec<LinearTerm>> for LinearCombination {
    fn from(terms: Vec<LinearTerm>) -> Self {
        LinearCombination(terms)
    }
}

impl FromIterator<LinearTerm> for LinearCombination {
    fn from_iter<I: IntoIterator<Item = LinearTerm>>(iter: I) -> Self {
        LinearCombination(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LinearCombination {
    type Item = &'a LinearTerm;
    type IntoIter = std::slice::Iter<'a, LinearTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Anything an operation accepts as an input.
///
/// Every builder operation normalizes its operands to a
/// [`LinearCombination`] through the same routine, so constants, wires and
/// weighted sums are interchangeable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Constant(Fr),
    Var(Variable),
    Linear(LinearCombination),
}

impl From<Fr> for Operand {
    fn from(value: Fr) -> Self {
        Operand::Constant(value)
    }
}

impl From<u64> for Operand {
    fn from(value: u64) -> Self {
        Operand::Constant(Fr::from_u64(value))
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Constant(Fr::from(value))
    }
}

impl From<Variable> for Operand {
    fn from(variable: Variable) -> Self {
        Operand::Var(variable)
    }
}

impl From<&Variable> for Operand {
    fn from(variable: &Variable) -> Self {
        Operand::Var(*variable)
    }
}

impl From<LinearCombination> for Operand {
    fn from(lc: LinearCombination) -> Self {
        Operand::Linear(lc)
    }
}
