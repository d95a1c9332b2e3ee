//! APEX CPU core.
//!
//! The [`Cpu`] owns every piece of architectural and pipeline state and
//! advances it one clock cycle per [`Cpu::tick`].

/// Register file and condition codes.
pub mod arch;

/// Control-flow flush and program counter redirection.
pub mod control;

/// CPU state and the per-cycle stage sequencing.
pub mod cpu;

/// Code and data memories.
pub mod memory;

/// Stage latches, hazards and stage functions.
pub mod pipeline;

/// Execution units.
pub mod units;

pub use cpu::{CycleOutcome, Cpu};
