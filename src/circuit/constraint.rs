//! Constraint System Definition
//!
//! Defines the R1CS gates produced by the builder and the finished constraint
//! system handed to a proving backend.
//!
//! Every gate and every constraint has the form
//!
//!   (Σ left) · (Σ right) = (Σ output)
//!
//! Gates introduce fresh intermediate variables; constraints only assert
//! relations between variables that already exist.

use crate::circuit::assignment::Assignment;
use crate::circuit::coefficients::CoefficientTable;
use crate::circuit::variable::{LinearCombination, Variable};
use crate::error::{Error, Result};
use crate::field::Fr;
use serde::{Deserialize, Serialize};

/// How a backend may solve the gate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// One fresh variable, recoverable by a single field operation
    SingleOutput,
    /// Bit decomposition: the fresh bits are read off the output value
    BinaryDecomposition,
}

/// A quadratic relation (Σ left) · (Σ right) = (Σ output)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub left: LinearCombination,
    pub right: LinearCombination,
    pub output: LinearCombination,
    pub kind: GateKind,
}

impl Gate {
    /// Gate with an explicit kind
    pub fn new(
        left: LinearCombination,
        right: LinearCombination,
        output: LinearCombination,
        kind: GateKind,
    ) -> Self {
        Gate {
            left,
            right,
            output,
            kind,
        }
    }

    /// Gate solved for one fresh variable
    pub fn single(left: LinearCombination, right: LinearCombination, output: LinearCombination) -> Self {
        Gate::new(left, right, output, GateKind::SingleOutput)
    }

    /// Values of the three sides under `assignment`.
    pub fn evaluate(&self, coeffs: &CoefficientTable, assignment: &Assignment) -> Result<(Fr, Fr, Fr)> {
        Ok((
            assignment.evaluate(&self.left, coeffs)?,
            assignment.evaluate(&self.right, coeffs)?,
            assignment.evaluate(&self.output, coeffs)?,
        ))
    }

    /// Check if the gate holds under `assignment`
    pub fn is_satisfied(&self, coeffs: &CoefficientTable, assignment: &Assignment) -> Result<bool> {
        let (l, r, o) = self.evaluate(coeffs, assignment)?;
        Ok(l * r == o)
    }

    /// Every variable referenced by the gate, left then right then output.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.left
            .variables()
            .chain(self.right.variables())
            .chain(self.output.variables())
    }
}

/// The complete constraint system
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSystem {
    pub(crate) public_inputs: Vec<Variable>,
    pub(crate) public_input_names: Vec<String>,
    pub(crate) secret_inputs: Vec<Variable>,
    pub(crate) secret_input_names: Vec<String>,
    pub(crate) gates: Vec<Gate>,
    pub(crate) constraints: Vec<Gate>,
    pub(crate) coefficients: CoefficientTable,
    pub(crate) num_intermediates: usize,
}

impl ConstraintSystem {
    pub(crate) fn new() -> Self {
        ConstraintSystem {
            public_inputs: Vec::new(),
            public_input_names: Vec::new(),
            secret_inputs: Vec::new(),
            secret_input_names: Vec::new(),
            gates: Vec::new(),
            constraints: Vec::new(),
            coefficients: CoefficientTable::new(),
            num_intermediates: 0,
        }
    }

    /// Public input variables in declaration order
    pub fn public_inputs(&self) -> &[Variable] {
        &self.public_inputs
    }

    /// Names of the public inputs, aligned with `public_inputs`
    pub fn public_input_names(&self) -> &[String] {
        &self.public_input_names
    }

    /// Secret input variables in declaration order
    pub fn secret_inputs(&self) -> &[Variable] {
        &self.secret_inputs
    }

    /// Names of the secret inputs, aligned with `secret_inputs`
    pub fn secret_input_names(&self) -> &[String] {
        &self.secret_input_names
    }

    /// Public input declared under `name`
    pub fn public_input(&self, name: &str) -> Option<Variable> {
        self.public_input_names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.public_inputs.get(i).copied())
    }

    /// Secret input declared under `name`
    pub fn secret_input(&self, name: &str) -> Option<Variable> {
        self.secret_input_names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.secret_inputs.get(i).copied())
    }

    /// Gates in emission order
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Assertions in emission order
    pub fn constraints(&self) -> &[Gate] {
        &self.constraints
    }

    /// Shared coefficient table
    pub fn coefficients(&self) -> &CoefficientTable {
        &self.coefficients
    }

    /// Number of gate-produced variables
    pub fn num_intermediates(&self) -> usize {
        self.num_intermediates
    }

    /// Check every gate and every constraint under `assignment`.
    ///
    /// Returns the first failing relation as [`Error::NotSatisfied`].
    pub fn is_satisfied(&self, assignment: &Assignment) -> Result<()> {
        check_len("public", self.public_inputs.len(), assignment.public.len())?;
        check_len("secret", self.secret_inputs.len(), assignment.secret.len())?;
        check_len("intermediate", self.num_intermediates, assignment.intermediate.len())?;

        for (index, gate) in self.gates.iter().enumerate() {
            if !gate.is_satisfied(&self.coefficients, assignment)? {
                return Err(Error::NotSatisfied { kind: "gate", index });
            }
        }
        for (index, constraint) in self.constraints.iter().enumerate() {
            if !constraint.is_satisfied(&self.coefficients, assignment)? {
                return Err(Error::NotSatisfied {
                    kind: "constraint",
                    index,
                });
            }
        }
        Ok(())
    }

    /// Render a gate as `(…) * (…) = (…)` for debugging.
    pub fn describe(&self, gate: &Gate) -> String {
        format!(
            "({}) * ({}) = ({})",
            self.format_lc(&gate.left),
            self.format_lc(&gate.right),
            self.format_lc(&gate.output)
        )
    }

    fn format_lc(&self, lc: &LinearCombination) -> String {
        let terms: Vec<String> = lc
            .terms()
            .iter()
            .map(|t| match self.coefficients.value(t.coeff) {
                Some(c) if c == Fr::one() => t.variable.to_string(),
                Some(c) => format!("{}·{}", c.to_short_hex(), t.variable),
                None => format!("{}·{}", t.coeff, t.variable),
            })
            .collect();
        terms.join(" + ")
    }

    /// Get circuit statistics
    pub fn stats(&self) -> CircuitStats {
        CircuitStats {
            num_public_inputs: self.public_inputs.len(),
            num_secret_inputs: self.secret_inputs.len(),
            num_intermediates: self.num_intermediates,
            num_gates: self.gates.len(),
            num_binary_decompositions: self
                .gates
                .iter()
                .filter(|g| g.kind == GateKind::BinaryDecomposition)
                .count(),
            num_constraints: self.constraints.len(),
            num_coefficients: self.coefficients.len(),
        }
    }
}

fn check_len(arg: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::LengthMismatch {
            arg,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Circuit statistics
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitStats {
    pub num_public_inputs: usize,
    pub num_secret_inputs: usize,
    pub num_intermediates: usize,
    pub num_gates: usize,
    pub num_binary_decompositions: usize,
    pub num_constraints: usize,
    pub num_coefficients: usize,
}
