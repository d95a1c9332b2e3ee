//! Simulator error definitions.
//!
//! Hazards are not errors: a register that is not ready or condition codes
//! that are not valid simply stall Decode until the next cycle. The variants
//! here cover the conditions that prevent a CPU from being built or a cycle
//! from completing.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the simulator.
#[derive(Error, Debug)]
pub enum SimError {
    /// A program or configuration file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The program text contains a malformed line.
    #[error("failed to parse program '{path}': {source}")]
    Parse {
        /// Program file being parsed.
        path: PathBuf,
        /// Position and reason of the failure.
        #[source]
        source: ParseError,
    },

    /// The configuration file is not valid TOML for `Config`.
    #[error("failed to parse configuration: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    /// A configuration value is out of its legal range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The program holds no instructions, so there is nothing to simulate.
    #[error("program contains no instructions")]
    EmptyProgram,

    /// An instruction names a register the register file does not have.
    #[error("instruction at pc {pc} names R{index}, but the register file has {count} registers")]
    RegisterOutOfRange {
        /// Address of the offending instruction.
        pc: u32,
        /// Register index named by the instruction.
        index: usize,
        /// Configured register count.
        count: usize,
    },

    /// A load or store computed an effective address outside data memory.
    #[error("data memory access at address {address} from pc {pc} is outside 0..{size}")]
    DataAddressOutOfRange {
        /// Address of the load/store instruction.
        pc: u32,
        /// Effective address computed in Execute.
        address: i32,
        /// Number of words in data memory.
        size: usize,
    },

    /// Statistics could not be serialized.
    #[error("failed to serialize statistics: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to parse one line of program text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line number in the program text.
    pub line: usize,
    /// What was wrong with the line.
    pub message: String,
}

impl ParseError {
    /// Creates a parse error for `line`.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Type alias for Result with SimError.
pub type SimResult<T> = Result<T, SimError>;
