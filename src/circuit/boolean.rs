//! Boolean and selection gadgets.

use crate::circuit::builder::CircuitBuilder;
use crate::circuit::constraint::Gate;
use crate::circuit::variable::{LinearCombination, Operand, Variable};
use crate::error::Result;
use crate::field::Fr;

impl CircuitBuilder {
    /// Whether `v` already carries a boolean constraint.
    pub fn is_boolean(&self, v: Variable) -> bool {
        v.is_one() || self.booleans.contains(&v)
    }

    /// Constrain `v ∈ {0, 1}` with `v · (1 - v) = 0`. Emitted at most once per variable.
    pub fn must_be_boolean(&mut self, v: Variable) {
        if self.is_boolean(v) {
            return;
        }
        let left = self.unit(v);
        let right: LinearCombination = vec![
            self.term(Variable::ONE, Fr::one()),
            self.term(v, -Fr::one()),
        ]
        .into();
        let output = LinearCombination::single(Variable::ONE, self.coeff_id(Fr::zero()));
        self.push_constraint(Gate::single(left, right, output));
        self.booleans.insert(v);
    }

    /// a XOR b for boolean a, b: (2a) · b = a + b - out
    pub fn xor(&mut self, a: Variable, b: Variable) -> Variable {
        self.must_be_boolean(a);
        self.must_be_boolean(b);

        let res = self.new_intermediate();
        let left = LinearCombination::single(a, self.coeff_id(Fr::from_u64(2)));
        let right = self.unit(b);
        let output: LinearCombination = vec![
            self.term(a, Fr::one()),
            self.term(b, Fr::one()),
            self.term(res, -Fr::one()),
        ]
        .into();
        self.push_gate(Gate::single(left, right, output));
        res
    }

    /// `if_true` when `cond = 1`, `if_false` when `cond = 0`.
    ///
    /// One gate: cond · (if_true - if_false) = out - if_false.
    /// `cond` is boolean-constrained unless it already is.
    pub fn select(
        &mut self,
        cond: Variable,
        if_true: impl Into<Operand>,
        if_false: impl Into<Operand>,
    ) -> Result<Variable> {
        self.must_be_boolean(cond);

        let res = self.new_intermediate();
        let left = self.unit(cond);
        let mut right = self.to_linear(if_true.into());
        let if_false = self.to_linear(if_false.into());
        let minus_false = self.negate(&if_false)?;
        right.extend(&minus_false);
        let mut output = self.unit(res);
        output.extend(&minus_false);
        self.push_gate(Gate::single(left, right, output));
        Ok(res)
    }

    /// Assert a = b with the constraint (Σa) · 1 = Σb. No variable is created.
    pub fn must_be_equal(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) {
        let left = self.to_linear(a.into());
        let right = self.unit(Variable::ONE);
        let output = self.to_linear(b.into());
        self.push_constraint(Gate::single(left, right, output));
    }
}
