//! Architectural constants of the reference APEX machine.

/// Address of the first instruction in code memory.
pub const CODE_BASE: u32 = 4000;

/// Size of one instruction in code memory, in address units.
pub const INSTRUCTION_WIDTH: u32 = 4;

/// Number of architectural integer registers.
pub const REG_FILE_SIZE: usize = 32;

/// Number of words in data memory.
pub const DATA_MEMORY_SIZE: usize = 4096;

/// Number of data memory words printed by the final state dump.
pub const MEMORY_DUMP_WORDS: usize = 250;

/// Amount LOADP and STOREP add to their base register.
pub const POST_INCREMENT: i32 = 4;

/// Mask clearing the two low bits of a jump target.
pub const WORD_ALIGN_MASK: i32 = !0x3;
