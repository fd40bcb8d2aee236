//! R1CS Circuit Builder
//!
//! A front end that turns high-level operations (arithmetic, booleans, bit
//! decomposition, range checks) into a rank-1 constraint system over the
//! BLS12-381 scalar field. The resulting [`ConstraintSystem`] is a plain data
//! artifact: a proving backend consumes it together with an [`Assignment`]
//! produced by its own witness solver.
//!
//! # Modules
//! - `field`: BLS12-381 scalar field operations
//! - `circuit`: variables, gates, the builder and its gadgets
//! - `config`: builder configuration
//! - `error`: error type shared by every operation

pub mod circuit;
pub mod config;
pub mod error;
pub mod field;

/// Re-export commonly used types
pub use circuit::{Assignment, CircuitBuilder, ConstraintSystem, Operand, Variable};
pub use config::CircuitConfig;
pub use error::{Error, Result};
pub use field::Fr;
