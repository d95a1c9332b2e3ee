//! Pipeline stage implementations.
//!
//! Contains the five stages of the instruction pipeline:
//! - Fetch: Reads the instruction at the program counter
//! - Decode: Checks hazards and reads register values
//! - Execute: Performs ALU operations and resolves branches
//! - Memory: Handles load/store operations
//! - Writeback: Commits results and releases ready bits
//!
//! The CPU calls them in reverse order each cycle, Writeback first.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::{wb_stage, WritebackOutcome};
