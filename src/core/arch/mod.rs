//! APEX architectural state.
//!
//! The register file with its ready bits and the condition codes with their
//! validity bit. Both are owned by the CPU and mutated only by the pipeline
//! stages.

/// Condition codes (Z/N/P) and their validity bit.
pub mod flags;

/// Integer register file with per-register ready bits.
pub mod gpr;
