//! Variable assignments.
//!
//! An assignment is produced outside this crate (by a witness solver) and can
//! be checked against a [`ConstraintSystem`](crate::circuit::ConstraintSystem).

use crate::circuit::coefficients::CoefficientTable;
use crate::circuit::variable::{LinearCombination, Variable, VariableKind};
use crate::error::{Error, Result};
use crate::field::Fr;
use serde::{Deserialize, Serialize};

/// Values for every wire, indexed per kind. The one wire is implicit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub public: Vec<Fr>,
    pub secret: Vec<Fr>,
    pub intermediate: Vec<Fr>,
}

impl Assignment {
    /// Values for public inputs, secret inputs and intermediates, in index order.
    pub fn new(public: Vec<Fr>, secret: Vec<Fr>, intermediate: Vec<Fr>) -> Self {
        Assignment {
            public,
            secret,
            intermediate,
        }
    }

    /// Value of `variable`; the one wire is always 1.
    pub fn value(&self, variable: Variable) -> Result<Fr> {
        let values = match variable.kind {
            VariableKind::One => return Ok(Fr::one()),
            VariableKind::PublicInput => &self.public,
            VariableKind::SecretInput => &self.secret,
            VariableKind::Intermediate => &self.intermediate,
        };
        values
            .get(variable.index)
            .copied()
            .ok_or(Error::UnassignedVariable(variable))
    }

    /// Σ coeff_i · value(variable_i)
    pub fn evaluate(&self, lc: &LinearCombination, coeffs: &CoefficientTable) -> Result<Fr> {
        let mut sum = Fr::zero();
        for term in lc {
            let coeff = coeffs
                .value(term.coeff)
                .ok_or(Error::UnknownCoefficient(term.coeff.0))?;
            sum += coeff * self.value(term.variable)?;
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::variable::LinearTerm;

    #[test]
    fn test_value_lookup() {
        let assignment = Assignment::new(vec![Fr::from_u64(5)], vec![], vec![Fr::from_u64(9)]);
        assert_eq!(assignment.value(Variable::ONE), Ok(Fr::one()));
        assert_eq!(
            assignment.value(Variable::new(VariableKind::PublicInput, 0)),
            Ok(Fr::from_u64(5))
        );
        let missing = Variable::new(VariableKind::SecretInput, 0);
        assert_eq!(assignment.value(missing), Err(Error::UnassignedVariable(missing)));
    }

    #[test]
    fn test_evaluate() {
        let mut coeffs = CoefficientTable::new();
        let three = coeffs.get_id(Fr::from_u64(3));
        let minus_one = coeffs.get_id(-Fr::one());
        let x = Variable::new(VariableKind::Intermediate, 0);

        // 3·x - 1·one with x = 4
        let lc: LinearCombination = vec![LinearTerm::new(x, three), LinearTerm::new(Variable::ONE, minus_one)].into();
        let assignment = Assignment::new(vec![], vec![], vec![Fr::from_u64(4)]);
        assert_eq!(assignment.evaluate(&lc, &coeffs), Ok(Fr::from_u64(11)));
    }

    #[test]
    fn test_unknown_coefficient() {
        let coeffs = CoefficientTable::new();
        let lc = LinearCombination::single(Variable::ONE, crate::circuit::CoeffId(3));
        let assignment = Assignment::default();
        assert_eq!(assignment.evaluate(&lc, &coeffs), Err(Error::UnknownCoefficient(3)));
    }
}
