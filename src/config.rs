//! Simulator configuration.
//!
//! The configuration is read from a TOML file. Every key carries a default, so
//! an empty file (or no file at all) describes the reference APEX machine:
//! code at pc 4000, 32 registers, 4096 words of data memory, single-cycle
//! Execute for every opcode.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::{
    CODE_BASE, DATA_MEMORY_SIZE, INSTRUCTION_WIDTH, MEMORY_DUMP_WORDS, REG_FILE_SIZE,
};
use crate::common::{SimError, SimResult};

/// Complete simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Observation and reporting options.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline geometry and timing.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Architectural storage sizes.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            pipeline: PipelineConfig::default(),
            memory: MemoryConfig::default(),
        }
    }
}

impl Config {
    /// Reads and validates a configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a TOML file
    ///
    /// # Returns
    ///
    /// The parsed configuration, or an error if the file cannot be read, is
    /// not valid TOML, or holds an out-of-range value.
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration text.
    pub fn from_toml(content: &str) -> SimResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        if self.pipeline.instruction_width == 0 {
            return Err(SimError::Config(
                "pipeline.instruction_width must be at least 1".into(),
            ));
        }
        if self.pipeline.mul_div_latency == 0 {
            return Err(SimError::Config(
                "pipeline.mul_div_latency must be at least 1".into(),
            ));
        }
        if self.memory.register_count == 0 {
            return Err(SimError::Config(
                "memory.register_count must be at least 1".into(),
            ));
        }
        if self.memory.data_memory_size == 0 {
            return Err(SimError::Config(
                "memory.data_memory_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Observation and reporting options. None of these affect simulation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Print the content of every stage at the start of each cycle.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Print the register file and data memory once the run stops.
    #[serde(default = "default_display_state")]
    pub display_state: bool,

    /// Number of data memory words included in the final dump.
    #[serde(default = "default_memory_dump_words")]
    pub memory_dump_words: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            display_state: default_display_state(),
            memory_dump_words: default_memory_dump_words(),
        }
    }
}

/// Pipeline geometry and timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Program counter of the first instruction.
    #[serde(default = "default_start_pc")]
    pub start_pc: u32,

    /// Distance between consecutive instructions in code memory.
    #[serde(default = "default_instruction_width")]
    pub instruction_width: u32,

    /// Cycles MUL and DIV occupy the Execute stage.
    #[serde(default = "default_mul_div_latency")]
    pub mul_div_latency: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            start_pc: default_start_pc(),
            instruction_width: default_instruction_width(),
            mul_div_latency: default_mul_div_latency(),
        }
    }
}

/// Architectural storage sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Words of data memory.
    #[serde(default = "default_data_memory_size")]
    pub data_memory_size: usize,

    /// Integer registers in the register file.
    #[serde(default = "default_register_count")]
    pub register_count: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_memory_size: default_data_memory_size(),
            register_count: default_register_count(),
        }
    }
}

fn default_display_state() -> bool {
    true
}

fn default_memory_dump_words() -> usize {
    MEMORY_DUMP_WORDS
}

fn default_start_pc() -> u32 {
    CODE_BASE
}

fn default_instruction_width() -> u32 {
    INSTRUCTION_WIDTH
}

fn default_mul_div_latency() -> u32 {
    1
}

fn default_data_memory_size() -> usize {
    DATA_MEMORY_SIZE
}

fn default_register_count() -> usize {
    REG_FILE_SIZE
}
