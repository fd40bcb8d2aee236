//! Circuit builder configuration.

use crate::error::{Error, Result};

/// Widest bit decomposition the builder accepts, four 64-bit limbs.
pub const MAX_BITS: usize = 256;

/// Environment variable overriding [`CircuitConfig::range_check_bits`].
pub const RANGE_CHECK_BITS_ENV: &str = "R1CS_RANGE_CHECK_BITS";

/// Builder configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitConfig {
    /// Width of both operands in `must_be_less_or_equal`
    pub range_check_bits: usize,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        CircuitConfig {
            range_check_bits: MAX_BITS,
        }
    }
}

impl CircuitConfig {
    /// Set the comparator width.
    pub fn with_range_check_bits(mut self, bits: usize) -> Self {
        self.range_check_bits = bits;
        self
    }

    /// Width must be in 1..=MAX_BITS.
    pub fn validate(&self) -> Result<()> {
        if self.range_check_bits == 0 || self.range_check_bits > MAX_BITS {
            return Err(Error::InvalidConfig(format!(
                "range_check_bits must be in 1..={}, got {}",
                MAX_BITS, self.range_check_bits
            )));
        }
        Ok(())
    }

    /// Defaults, overridden by `R1CS_RANGE_CHECK_BITS` when it is set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(RANGE_CHECK_BITS_ENV) {
            config.range_check_bits = raw.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("{RANGE_CHECK_BITS_ENV}={raw:?} is not a number"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }
}
