//! Program loading and simulation control.

/// Program text parsing.
pub mod loader;

/// Run loop and stop conditions.
pub mod simulator;

pub use simulator::{RunLimits, RunSummary, Simulator, StopReason};
