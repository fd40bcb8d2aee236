//! Circuit Construction Module
//!
//! Builds rank-1 constraint systems. Every relation has the form
//!
//!   (Σ left) · (Σ right) = (Σ output)
//!
//! where each side is a linear combination of variables weighted by entries
//! of a shared coefficient table.
//!
//! - `builder`: the [`CircuitBuilder`] and arithmetic operations
//! - `boolean`: boolean membership, xor, select and equality
//! - `binary`: bit decomposition and recomposition
//! - `range_check`: w ≤ bound against constant or variable bounds

pub mod assignment;
pub mod binary;
pub mod boolean;
pub mod builder;
pub mod coefficients;
pub mod constraint;
pub mod range_check;
pub mod variable;

pub use assignment::Assignment;
pub use builder::CircuitBuilder;
pub use coefficients::{CoeffId, CoefficientTable};
pub use constraint::{CircuitStats, ConstraintSystem, Gate, GateKind};
pub use variable::{LinearCombination, LinearTerm, Operand, Variable, VariableKind};
