//! Range check: w ≤ bound.
//!
//! Both comparators walk the bits of `w` from the most significant down and
//! keep a running prefix variable p. After position i, p = 1 iff the bits of
//! `w` above and at i match the bound's bits exactly. While p = 1, a zero bit in
//! the bound forces the matching bit of `w` to be zero:
//!
//!   (1 - open - w_i) · w_i = 0
//!
//! where `open` is p when the bound bit is zero and 0 otherwise. A bit of `w`
//! falling below the bound's bit drops p to 0 and leaves every lower bit free.
//!
//! The width is [`CircuitConfig::range_check_bits`](crate::config::CircuitConfig).

use crate::circuit::builder::CircuitBuilder;
use crate::circuit::constraint::Gate;
use crate::circuit::variable::{LinearCombination, Operand, Variable};
use crate::error::{Error, Result};
use crate::field::Fr;
use tracing::{debug, instrument};

impl CircuitBuilder {
    /// Constrain `w ≤ bound` as integers in `[0, r)`.
    ///
    /// Construction never fails for an out-of-range `w`; the emitted
    /// constraints are simply unsatisfiable. Errors are reserved for misuse,
    /// such as a constant bound wider than the configured width.
    pub fn must_be_less_or_equal(&mut self, w: Variable, bound: impl Into<Operand>) -> Result<()> {
        match bound.into() {
            Operand::Constant(c) => self.less_or_equal_constant(w, c),
            Operand::Var(b) => self.less_or_equal_variable(w, b),
            Operand::Linear(lc) => {
                let b = self.allocate(lc);
                self.less_or_equal_variable(w, b)
            }
        }
    }

    #[instrument(level = "debug", skip(self, bound), fields(bound = %bound.to_short_hex()))]
    fn less_or_equal_constant(&mut self, w: Variable, bound: Fr) -> Result<()> {
        let n_bits = self.config.range_check_bits;
        if bound.num_bits() > n_bits {
            return Err(Error::BoundTooWide {
                required: bound.num_bits(),
                bits: n_bits,
            });
        }

        let bits = self.to_binary(w, n_bits)?;
        self.assert_bits_le_constant(&bits, bound.to_limbs());
        debug!(n_bits, "constant range check emitted");
        Ok(())
    }

    /// Bits (little-endian, one per position below `bits.len()`) read as an
    /// integer no greater than the constant whose limbs are given.
    fn assert_bits_le_constant(&mut self, bits: &[Variable], limbs: [u64; Fr::NUM_LIMBS]) {
        let n_bits = bits.len();
        let mut prefix = self.allocate(Fr::one());

        for (chunk, limb) in limbs.iter().enumerate().rev() {
            for offset in (0..64).rev() {
                let i = chunk * 64 + offset;
                if i >= n_bits {
                    continue;
                }
                if (limb >> offset) & 1 == 1 {
                    prefix = self.mul_pair(Operand::Var(prefix), Operand::Var(bits[i]));
                } else {
                    self.assert_bit_not_above(prefix, bits[i]);
                }
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn less_or_equal_variable(&mut self, w: Variable, bound: Variable) -> Result<()> {
        let n_bits = self.config.range_check_bits;
        let w_bits = self.to_binary(w, n_bits)?;
        let bound_bits = self.to_binary(bound, n_bits)?;

        // Enough bits to spell bound + r as well as bound: pin the canonical one.
        if n_bits >= Fr::MODULUS_BITS {
            self.assert_bits_le_constant(&bound_bits, (-Fr::one()).to_limbs());
        }

        let mut prefix = Variable::ONE;
        for i in (0..n_bits).rev() {
            let candidate = self.mul_pair(Operand::Var(prefix), Operand::Var(w_bits[i]));
            let next = self.select(bound_bits[i], candidate, prefix)?;
            let open = self.select(bound_bits[i], Fr::zero(), prefix)?;
            self.assert_bit_not_above(open, w_bits[i]);
            prefix = next;
        }
        debug!(n_bits, "variable range check emitted");
        Ok(())
    }

    /// (1 - open - bit) · bit = 0
    fn assert_bit_not_above(&mut self, open: Variable, bit: Variable) {
        let left: LinearCombination = vec![
            self.term(Variable::ONE, Fr::one()),
            self.term(open, -Fr::one()),
            self.term(bit, -Fr::one()),
        ]
        .into();
        let right = self.unit(bit);
        let output = LinearCombination::single(Variable::ONE, self.coeff_id(Fr::zero()));
        self.push_constraint(Gate::single(left, right, output));
    }
}
