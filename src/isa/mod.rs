//! APEX instruction set.
//!
//! The opcode set is closed: every opcode the loader accepts appears in
//! [`Opcode`], and the pipeline dispatches on it directly.

/// Opcode enumeration and opcode class predicates.
pub mod opcode;

/// Decoded instruction record.
pub mod instruction;

pub use instruction::Instruction;
pub use opcode::Opcode;
