//! Instruction pipeline implementation.
//!
//! This module contains the five-stage instruction pipeline (fetch, decode,
//! execute, memory, writeback), the stage latches, hazard detection, and
//! the opcode-to-ALU selection used by Execute.

/// Decode-stage hazard detection and Writeback release checks.
pub mod hazards;

/// Per-stage latches.
pub mod latches;

/// ALU operation selection.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Latch interface shared by the stages.
pub mod traits;
