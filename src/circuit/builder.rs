//! Circuit Builder
//!
//! [`CircuitBuilder`] owns the growing constraint system. Gadget code calls its
//! operations with constants, variables or linear combinations and gets back
//! fresh [`Variable`] handles; every call appends gates, constraints or
//! coefficients and never rewrites what is already there.
//!
//! Arithmetic operations live here. Boolean gadgets, bit decomposition and
//! the range check add further `impl CircuitBuilder` blocks in sibling modules.

use crate::circuit::coefficients::CoeffId;
use crate::circuit::constraint::{ConstraintSystem, Gate};
use crate::circuit::variable::{LinearCombination, LinearTerm, Operand, Variable, VariableKind};
use crate::config::CircuitConfig;
use crate::error::{Error, Result};
use crate::field::Fr;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Incremental R1CS builder
#[derive(Clone, Debug)]
pub struct CircuitBuilder {
    pub(crate) cs: ConstraintSystem,
    /// Variables that already carry a boolean constraint
    pub(crate) booleans: HashSet<Variable>,
    pub(crate) config: CircuitConfig,
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CircuitBuilder {
    /// Empty builder with the default configuration.
    pub fn new() -> Self {
        CircuitBuilder {
            cs: ConstraintSystem::new(),
            booleans: HashSet::new(),
            config: CircuitConfig::default(),
        }
    }

    /// Empty builder with a validated configuration.
    pub fn with_config(config: CircuitConfig) -> Result<Self> {
        config.validate()?;
        Ok(CircuitBuilder {
            config,
            ..Self::new()
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    /// Read-only view of everything emitted so far.
    pub fn constraint_system(&self) -> &ConstraintSystem {
        &self.cs
    }

    /// Finish construction and hand out the constraint system.
    pub fn build(self) -> ConstraintSystem {
        let stats = self.cs.stats();
        debug!(
            public = stats.num_public_inputs,
            secret = stats.num_secret_inputs,
            gates = stats.num_gates,
            constraints = stats.num_constraints,
            coefficients = stats.num_coefficients,
            "constraint system built"
        );
        self.cs
    }

    /// Declare a public input. Names are unique among public inputs.
    pub fn new_public_input(&mut self, name: impl Into<String>) -> Result<Variable> {
        self.new_input(VariableKind::PublicInput, name.into())
    }

    /// Declare a secret input. Names are unique among secret inputs.
    pub fn new_secret_input(&mut self, name: impl Into<String>) -> Result<Variable> {
        self.new_input(VariableKind::SecretInput, name.into())
    }

    fn new_input(&mut self, kind: VariableKind, name: String) -> Result<Variable> {
        let cs = &mut self.cs;
        let (variables, names) = match kind {
            VariableKind::PublicInput => (&mut cs.public_inputs, &mut cs.public_input_names),
            _ => (&mut cs.secret_inputs, &mut cs.secret_input_names),
        };
        if names.contains(&name) {
            return Err(Error::DuplicateInputName { kind, name });
        }
        let variable = Variable::new(kind, variables.len());
        debug!(%variable, name = %name, "input declared");
        variables.push(variable);
        names.push(name);
        Ok(variable)
    }

    pub(crate) fn new_intermediate(&mut self) -> Variable {
        let variable = Variable::new(VariableKind::Intermediate, self.cs.num_intermediates);
        self.cs.num_intermediates += 1;
        variable
    }

    /// Id of `value` in the coefficient table.
    pub fn coeff_id(&mut self, value: Fr) -> CoeffId {
        self.cs.coefficients.get_id(value)
    }

    /// Build Σ coeff_i · variable_i from `(coefficient, variable)` pairs.
    pub fn linear_combination<I, C>(&mut self, terms: I) -> LinearCombination
    where
        I: IntoIterator<Item = (C, Variable)>,
        C: Into<Fr>,
    {
        terms
            .into_iter()
            .map(|(coeff, variable)| self.term(variable, coeff.into()))
            .collect()
    }

    pub(crate) fn term(&mut self, variable: Variable, coeff: Fr) -> LinearTerm {
        LinearTerm::new(variable, self.coeff_id(coeff))
    }

    /// 1 · variable
    pub(crate) fn unit(&mut self, variable: Variable) -> LinearCombination {
        LinearCombination::single(variable, self.coeff_id(Fr::one()))
    }

    /// Normalize any operand to a non-empty linear combination.
    pub(crate) fn to_linear(&mut self, operand: Operand) -> LinearCombination {
        match operand {
            Operand::Constant(c) => LinearCombination::single(Variable::ONE, self.coeff_id(c)),
            Operand::Var(v) => self.unit(v),
            Operand::Linear(lc) if lc.is_empty() => {
                LinearCombination::single(Variable::ONE, self.coeff_id(Fr::zero()))
            }
            Operand::Linear(lc) => lc,
        }
    }

    /// k · lc, re-interning every scaled coefficient.
    pub(crate) fn scale(&mut self, lc: &LinearCombination, k: Fr) -> Result<LinearCombination> {
        lc.iter()
            .map(|t| {
                let c = self
                    .cs
                    .coefficients
                    .value(t.coeff)
                    .ok_or(Error::UnknownCoefficient(t.coeff.0))?;
                Ok(self.term(t.variable, c * k))
            })
            .collect()
    }

    pub(crate) fn negate(&mut self, lc: &LinearCombination) -> Result<LinearCombination> {
        self.scale(lc, -Fr::one())
    }

    pub(crate) fn push_gate(&mut self, gate: Gate) {
        trace!(index = self.cs.gates.len(), kind = ?gate.kind, "gate");
        self.cs.gates.push(gate);
    }

    pub(crate) fn push_constraint(&mut self, constraint: Gate) {
        trace!(index = self.cs.constraints.len(), "constraint");
        self.cs.constraints.push(constraint);
    }

    /// Sum of two or more operands, one gate: (Σ operands) · 1 = out
    pub fn add<I>(&mut self, operands: I) -> Result<Variable>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let operands: Vec<Operand> = operands.into_iter().map(Into::into).collect();
        require_operands("add", 2, operands.len())?;

        let res = self.new_intermediate();
        let mut left = LinearCombination::new();
        for operand in operands {
            let lc = self.to_linear(operand);
            left.extend(&lc);
        }
        let right = self.unit(Variable::ONE);
        let output = self.unit(res);
        self.push_gate(Gate::single(left, right, output));
        Ok(res)
    }

    /// a - b, one gate: (a + (-1)·b) · 1 = out
    pub fn sub(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Result<Variable> {
        let res = self.new_intermediate();
        let mut left = self.to_linear(a.into());
        let b = self.to_linear(b.into());
        left.extend(&self.negate(&b)?);
        let right = self.unit(Variable::ONE);
        let output = self.unit(res);
        self.push_gate(Gate::single(left, right, output));
        Ok(res)
    }

    /// Product of two or more operands. N operands cost N - 1 gates.
    pub fn mul<I>(&mut self, operands: I) -> Result<Variable>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let operands: Vec<Operand> = operands.into_iter().map(Into::into).collect();
        let count = operands.len();
        let mut iter = operands.into_iter();
        let (Some(first), Some(second)) = (iter.next(), iter.next()) else {
            return Err(Error::NotEnoughOperands {
                op: "mul",
                expected: 2,
                actual: count,
            });
        };

        let mut res = self.mul_pair(first, second);
        for operand in iter {
            res = self.mul_pair(Operand::Var(res), operand);
        }
        Ok(res)
    }

    pub(crate) fn mul_pair(&mut self, a: Operand, b: Operand) -> Variable {
        let res = self.new_intermediate();
        let left = self.to_linear(a);
        let right = self.to_linear(b);
        let output = self.unit(res);
        self.push_gate(Gate::single(left, right, output));
        res
    }

    /// 1 / v, one gate: out · v = 1
    ///
    /// A zero `v` leaves the gate unsatisfiable; nothing is checked here.
    pub fn inverse(&mut self, v: impl Into<Operand>) -> Variable {
        let res = self.new_intermediate();
        let left = self.unit(res);
        let right = self.to_linear(v.into());
        let output = self.unit(Variable::ONE);
        self.push_gate(Gate::single(left, right, output));
        res
    }

    /// a / b, one gate: b · out = a
    ///
    /// A zero `b` leaves the gate unsatisfiable; nothing is checked here.
    pub fn div(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Variable {
        let res = self.new_intermediate();
        let left = self.to_linear(b.into());
        let right = self.unit(res);
        let output = self.to_linear(a.into());
        self.push_gate(Gate::single(left, right, output));
        res
    }

    /// Copy an operand into a fresh variable: input · 1 = out.
    /// The constant 1 is the one wire itself and costs nothing.
    pub fn allocate(&mut self, input: impl Into<Operand>) -> Variable {
        let input = input.into();
        if matches!(&input, Operand::Constant(c) if c.is_one()) {
            return Variable::ONE;
        }
        let res = self.new_intermediate();
        let left = self.to_linear(input);
        let right = self.unit(Variable::ONE);
        let output = self.unit(res);
        self.push_gate(Gate::single(left, right, output));
        res
    }
}

pub(crate) fn require_operands(op: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual < expected {
        return Err(Error::NotEnoughOperands { op, expected, actual });
    }
    Ok(())
}
