//! Bit decomposition and recomposition.
//!
//! Bits are little-endian: `bits[0]` weighs 2^0.

use crate::circuit::builder::{require_operands, CircuitBuilder};
use crate::circuit::constraint::{Gate, GateKind};
use crate::circuit::variable::{LinearCombination, Operand, Variable};
use crate::config::MAX_BITS;
use crate::error::{Error, Result};
use crate::field::Fr;

impl CircuitBuilder {
    /// Decompose `v` into `n_bits` fresh boolean variables.
    ///
    /// Emits one boolean constraint per bit and a single
    /// [`GateKind::BinaryDecomposition`] gate (Σ 2^i · bit_i) · 1 = v.
    /// A value that needs more than `n_bits` bits leaves the gate unsatisfiable.
    pub fn to_binary(&mut self, v: impl Into<Operand>, n_bits: usize) -> Result<Vec<Variable>> {
        if n_bits == 0 || n_bits > MAX_BITS {
            return Err(Error::InvalidBitWidth {
                bits: n_bits,
                max: MAX_BITS,
            });
        }

        let bits: Vec<Variable> = (0..n_bits).map(|_| self.new_intermediate()).collect();
        for &bit in &bits {
            self.must_be_boolean(bit);
        }

        let left = self.weighted_sum(&bits);
        let right = self.unit(Variable::ONE);
        let output = self.to_linear(v.into());
        self.push_gate(Gate::new(left, right, output, GateKind::BinaryDecomposition));
        Ok(bits)
    }

    /// Σ 2^i · bits[i] as a fresh variable. The bits are taken as given;
    /// no boolean constraint is added for them.
    pub fn from_binary(&mut self, bits: &[Variable]) -> Result<Variable> {
        require_operands("from_binary", 1, bits.len())?;

        let res = self.new_intermediate();
        let left = self.weighted_sum(bits);
        let right = self.unit(Variable::ONE);
        let output = self.unit(res);
        self.push_gate(Gate::single(left, right, output));
        Ok(res)
    }

    fn weighted_sum(&mut self, bits: &[Variable]) -> LinearCombination {
        let mut weight = Fr::one();
        let mut lc = LinearCombination::new();
        for &bit in bits {
            let term = self.term(bit, weight);
            lc.push(term);
            weight = weight.double();
        }
        lc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Assignment;

    fn bits_of(v: u64, n: usize) -> Vec<Fr> {
        (0..n).map(|i| Fr::from_u64((v >> i) & 1)).collect()
    }

    #[test]
    fn test_to_binary_shape() {
        let mut builder = CircuitBuilder::new();
        let x = builder.new_secret_input("x").unwrap();
        let bits = builder.to_binary(x, 8).unwrap();
        let cs = builder.build();

        assert_eq!(bits.len(), 8);
        assert_eq!(cs.constraints().len(), 8);
        assert_eq!(cs.gates().len(), 1);
        assert_eq!(cs.gates()[0].kind, GateKind::BinaryDecomposition);
        assert_eq!(cs.stats().num_binary_decompositions, 1);
        // 1, 2, 4, ..., 128 plus -1 and 0 from the boolean constraints
        assert_eq!(cs.coefficients().len(), 10);
    }

    #[test]
    fn test_to_binary_satisfied() {
        let mut builder = CircuitBuilder::new();
        let x = builder.new_secret_input("x").unwrap();
        builder.to_binary(x, 8).unwrap();
        let cs = builder.build();

        let good = Assignment::new(vec![], vec![Fr::from_u64(0xa5)], bits_of(0xa5, 8));
        assert!(cs.is_satisfied(&good).is_ok());

        // 300 does not fit in 8 bits
        let too_big = Assignment::new(vec![], vec![Fr::from_u64(300)], bits_of(300, 8));
        assert!(cs.is_satisfied(&too_big).is_err());
    }

    #[test]
    fn test_invalid_widths() {
        let mut builder = CircuitBuilder::new();
        let x = builder.new_secret_input("x").unwrap();
        assert_eq!(
            builder.to_binary(x, 0),
            Err(Error::InvalidBitWidth { bits: 0, max: 256 })
        );
        assert_eq!(
            builder.to_binary(x, 257),
            Err(Error::InvalidBitWidth { bits: 257, max: 256 })
        );
        assert_eq!(builder.constraint_system().num_intermediates(), 0);
    }

    #[test]
    fn test_from_binary() {
        let mut builder = CircuitBuilder::new();
        let x = builder.new_secret_input("x").unwrap();
        let bits = builder.to_binary(x, 4).unwrap();
        let back = builder.from_binary(&bits).unwrap();
        let cs = builder.build();

        // from_binary re-uses the existing boolean constraints
        assert_eq!(cs.constraints().len(), 4);
        assert_eq!(back.index, 4);

        let mut intermediate = bits_of(11, 4);
        intermediate.push(Fr::from_u64(11));
        let assignment = Assignment::new(vec![], vec![Fr::from_u64(11)], intermediate);
        assert!(cs.is_satisfied(&assignment).is_ok());
    }

    #[test]
    fn test_from_binary_needs_a_bit() {
        let mut builder = CircuitBuilder::new();
        assert_eq!(
            builder.from_binary(&[]),
            Err(Error::NotEnoughOperands {
                op: "from_binary",
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_decompose_constant() {
        let mut builder = CircuitBuilder::new();
        builder.to_binary(6u64, 3).unwrap();
        let cs = builder.build();
        assert!(cs.is_satisfied(&Assignment::new(vec![], vec![], bits_of(6, 3))).is_ok());
    }
}
