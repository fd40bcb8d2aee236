//! Shared helpers for the integration tests: a forward witness solver and
//! tracing setup.

#![allow(dead_code)]

use r1cs_frontend::circuit::{Assignment, ConstraintSystem, GateKind, LinearCombination, Variable, VariableKind};
use r1cs_frontend::Fr;
use std::collections::HashMap;

/// Install a test subscriber once; `RUST_LOG=r1cs_frontend=trace` shows every gate.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Walks the gates in order and derives every intermediate value.
///
/// Each single-output gate must reference exactly one not yet known
/// variable, which is then solved linearly. Binary decomposition gates read
/// their bits off the output value, unless an override supplies them.
pub struct Solver<'a> {
    cs: &'a ConstraintSystem,
    public: Vec<Fr>,
    secret: Vec<Fr>,
    intermediate: Vec<Option<Fr>>,
    bit_overrides: HashMap<usize, Vec<bool>>,
}

impl<'a> Solver<'a> {
    pub fn new(cs: &'a ConstraintSystem, public: Vec<Fr>, secret: Vec<Fr>) -> Self {
        Solver {
            cs,
            public,
            secret,
            intermediate: vec![None; cs.num_intermediates()],
            bit_overrides: HashMap::new(),
        }
    }

    /// Use `bits` instead of the canonical decomposition at gate `gate_index`.
    pub fn override_bits(mut self, gate_index: usize, bits: Vec<bool>) -> Self {
        self.bit_overrides.insert(gate_index, bits);
        self
    }

    pub fn solve(mut self) -> Result<Assignment, String> {
        let cs = self.cs;
        for (index, gate) in cs.gates().iter().enumerate() {
            match gate.kind {
                GateKind::BinaryDecomposition => self.solve_bits(index, &gate.left, &gate.output)?,
                GateKind::SingleOutput => {
                    self.solve_single(index, &gate.left, &gate.right, &gate.output)?
                }
            }
        }

        let intermediate = self
            .intermediate
            .iter()
            .enumerate()
            .map(|(i, v)| v.ok_or(format!("v[{}] never assigned", i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Assignment::new(self.public, self.secret, intermediate))
    }

    fn solve_bits(&mut self, index: usize, bits: &LinearCombination, value: &LinearCombination) -> Result<(), String> {
        let value = self
            .evaluate(value)
            .ok_or(format!("gate {}: decomposed value unknown", index))?;
        let override_bits = self.bit_overrides.get(&index).cloned();
        for (i, term) in bits.iter().enumerate() {
            let bit = match &override_bits {
                Some(bits) => bits[i],
                None => value.bit(i),
            };
            self.assign(term.variable, Fr::from_u64(bit as u64), index)?;
        }
        Ok(())
    }

    fn solve_single(
        &mut self,
        index: usize,
        left: &LinearCombination,
        right: &LinearCombination,
        output: &LinearCombination,
    ) -> Result<(), String> {
        let mut unknowns: Vec<Variable> = left
            .variables()
            .chain(right.variables())
            .chain(output.variables())
            .filter(|v| self.value(*v).is_none())
            .collect();
        unknowns.sort();
        unknowns.dedup();
        let &[x] = unknowns.as_slice() else {
            return Err(format!("gate {}: expected one unknown, found {:?}", index, unknowns));
        };

        let (lk, la) = self.split(left, x);
        let (rk, ra) = self.split(right, x);
        let (ok, oa) = self.split(output, x);
        if !la.is_zero() && !ra.is_zero() {
            return Err(format!("gate {}: {} appears on both factors", index, x));
        }
        // (lk + la·x)(rk + ra·x) = ok + oa·x, linear in x
        let slope = la * rk + ra * lk - oa;
        let inv = slope
            .inverse()
            .ok_or(format!("gate {}: {} is not determined", index, x))?;
        self.assign(x, (ok - lk * rk) * inv, index)
    }

    /// (Σ over known terms, Σ of coefficients on `x`)
    fn split(&self, lc: &LinearCombination, x: Variable) -> (Fr, Fr) {
        let mut known = Fr::zero();
        let mut slope = Fr::zero();
        for term in lc {
            let coeff = self.coeff(term.coeff.0);
            if term.variable == x {
                slope += coeff;
            } else if let Some(v) = self.value(term.variable) {
                known += coeff * v;
            }
        }
        (known, slope)
    }

    fn coeff(&self, id: usize) -> Fr {
        self.cs.coefficients().values()[id]
    }

    fn evaluate(&self, lc: &LinearCombination) -> Option<Fr> {
        let mut sum = Fr::zero();
        for term in lc {
            sum += self.coeff(term.coeff.0) * self.value(term.variable)?;
        }
        Some(sum)
    }

    fn value(&self, v: Variable) -> Option<Fr> {
        match v.kind {
            VariableKind::One => Some(Fr::one()),
            VariableKind::PublicInput => self.public.get(v.index).copied(),
            VariableKind::SecretInput => self.secret.get(v.index).copied(),
            VariableKind::Intermediate => self.intermediate.get(v.index).copied().flatten(),
        }
    }

    fn assign(&mut self, v: Variable, value: Fr, index: usize) -> Result<(), String> {
        if v.kind != VariableKind::Intermediate {
            return Err(format!("gate {}: cannot assign {}", index, v));
        }
        match self.intermediate.get_mut(v.index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(value);
                Ok(())
            }
            _ => Err(format!("gate {}: {} assigned twice", index, v)),
        }
    }
}

/// Solve with canonical decompositions.
pub fn solve(cs: &ConstraintSystem, public: Vec<Fr>, secret: Vec<Fr>) -> Result<Assignment, String> {
    Solver::new(cs, public, secret).solve()
}

/// Solve, then check every gate and constraint.
pub fn is_satisfied(cs: &ConstraintSystem, public: Vec<Fr>, secret: Vec<Fr>) -> bool {
    match solve(cs, public, secret) {
        Ok(assignment) => cs.is_satisfied(&assignment).is_ok(),
        Err(_) => false,
    }
}

pub fn fr(v: u64) -> Fr {
    Fr::from_u64(v)
}
