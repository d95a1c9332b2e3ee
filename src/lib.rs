//! APEX Pipeline Simulator Library.
//!
//! This crate implements a cycle-accurate simulator for the APEX integer
//! instruction set. Programs run on a five-stage in-order pipeline that
//! stalls on hazards instead of forwarding operands.
//!
//! # Architecture
//!
//! * **Core**: 5-stage in-order pipeline (Fetch, Decode/RF, Execute, Memory, Writeback).
//! * **Hazards**: register ready bits and condition-code validity gate Decode.
//! * **Control flow**: branches and jumps resolve in Execute and flush Fetch/Decode.
//!
//! # Modules
//!
//! * `common`: Error handling and shared constants.
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction Set Architecture definitions.
//! * `sim`: Program loader and simulation driver.
//! * `stats`: Performance statistics collection.

/// Error types and constants shared across the simulator.
pub mod common;

/// Configuration system for architectural sizes and pipeline behavior.
///
/// Loads and parses TOML configuration files; every key has a default so an
/// empty file yields the reference APEX machine.
pub mod config;

/// CPU core implementation including pipeline stages and execution units.
///
/// Implements the 5-stage in-order pipeline, the register file with its
/// ready bits, condition codes, and the code and data memories.
pub mod core;

/// Instruction Set Architecture definitions.
///
/// Defines the closed APEX opcode set and the decoded instruction record.
pub mod isa;

/// Program loading and the cycle-by-cycle simulation driver.
pub mod sim;

/// Performance statistics collection and reporting.
///
/// Tracks cycle counts, retired instructions, stalls and flushes.
pub mod stats;
