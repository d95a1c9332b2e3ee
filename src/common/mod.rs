//! Common utilities and types used throughout the APEX simulator.
//!
//! This module provides the error type reported by construction, loading and
//! execution, and the architectural constants of the reference machine.

/// Constants describing the reference APEX machine.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{ParseError, SimError, SimResult};
