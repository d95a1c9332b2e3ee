//! Execution units used by the Execute stage.

/// Integer ALU.
pub mod alu;

/// Load/store address arithmetic.
pub mod lsu;
